//! Structural classification of a collection's encoded elements.
//!
//! Once a collection fails to vectorize, each element is encoded on its own
//! and two detectors fold over the results:
//!
//! - [`ArrayDetector`] stays active while every element is a VECTOR or
//!   ND_ARRAY with the same dimensions and kinds that unify. The collection
//!   becomes one ND_ARRAY with an extra dimension for the element count.
//! - [`TableDetector`] stays active while every element is a named record of
//!   scalars with the same column names and per-column kinds that unify. A
//!   NULL cell is accepted in a character column only. The collection becomes
//!   a DATA_FRAME.
//!
//! Otherwise the elements form an opaque LIST.

use rdx_ir::{
    ArrayOrder, Dims, EncodedValue, Payload, PayloadError, RKind, Scalar, StructureCode, TypeCode,
};
use rdx_layout::{stack_buffers, LayoutError};
use smallvec::SmallVec;

use crate::coerce::{last_warning, tag_warning, BufferBuilder};
use crate::errors::EncodeResult;

type ColumnKinds = SmallVec<[RKind; 8]>;

/// Tracks whether a run of elements can be stacked into one array.
#[derive(Clone, Debug, PartialEq)]
pub enum ArrayDetector {
    /// Every element so far has dimensions `dims`; `kind` is their unified kind.
    Active { dims: Dims, kind: RKind },
    Rejected,
}

impl ArrayDetector {
    pub fn seed(first: &EncodedValue) -> Self {
        match array_part(first) {
            Some((dims, kind)) => ArrayDetector::Active {
                dims: Dims::from_slice(dims),
                kind,
            },
            None => ArrayDetector::Rejected,
        }
    }

    #[must_use]
    pub fn step(self, next: &EncodedValue) -> Self {
        let (dims, kind) = match self {
            ArrayDetector::Active { dims, kind } => (dims, kind),
            ArrayDetector::Rejected => return ArrayDetector::Rejected,
        };
        let Some((next_dims, next_kind)) = array_part(next) else {
            tracing::debug!(structure = ?next.structure(), "array detector rejected non-array element");
            return ArrayDetector::Rejected;
        };
        if next_dims != dims.as_slice() {
            tracing::debug!(?dims, ?next_dims, "array detector rejected dimension mismatch");
            return ArrayDetector::Rejected;
        }
        match kind.unify(next_kind) {
            Some(kind) => ArrayDetector::Active { dims, kind },
            None => {
                tracing::debug!(%kind, %next_kind, "array detector rejected kind mismatch");
                ArrayDetector::Rejected
            }
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, ArrayDetector::Active { .. })
    }
}

fn array_part(value: &EncodedValue) -> Option<(&[usize], RKind)> {
    match value.structure() {
        StructureCode::Vector | StructureCode::NdArray => {
            Some((value.dims()?, value.try_buffer()?.kind()))
        }
        _ => None,
    }
}

/// Tracks whether a run of records can be read as the rows of a table.
#[derive(Clone, Debug, PartialEq)]
pub enum TableDetector {
    /// Every record so far has columns `names`; `kinds` are their unified kinds.
    Active { names: Vec<String>, kinds: ColumnKinds },
    Rejected,
}

impl TableDetector {
    pub fn seed(first: &EncodedValue) -> Self {
        match record_columns(first) {
            Some((names, cells)) => TableDetector::Active {
                names: names.to_vec(),
                kinds: cells
                    .into_iter()
                    .map(|cell| cell.unwrap_or(RKind::Character))
                    .collect(),
            },
            None => TableDetector::Rejected,
        }
    }

    #[must_use]
    pub fn step(self, next: &EncodedValue) -> Self {
        let (names, mut kinds) = match self {
            TableDetector::Active { names, kinds } => (names, kinds),
            TableDetector::Rejected => return TableDetector::Rejected,
        };
        let Some((row_names, cells)) = record_columns(next) else {
            tracing::debug!(structure = ?next.structure(), "table detector rejected non-record element");
            return TableDetector::Rejected;
        };
        if row_names != names.as_slice() {
            tracing::debug!(?names, ?row_names, "table detector rejected column names");
            return TableDetector::Rejected;
        }
        for (kind, cell) in kinds.iter_mut().zip(cells) {
            let unified = match cell {
                Some(cell) => kind.unify(cell),
                None if *kind == RKind::Character => Some(RKind::Character),
                None => None,
            };
            match unified {
                Some(unified) => *kind = unified,
                None => {
                    tracing::debug!(%kind, ?cell, "table detector rejected column kind");
                    return TableDetector::Rejected;
                }
            }
        }
        TableDetector::Active { names, kinds }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, TableDetector::Active { .. })
    }
}

/// Column names and cell kinds of a named scalar record. A `None` cell is a
/// NULL. Records holding anything but primitive scalars and NULLs yield
/// `None`.
fn record_columns(value: &EncodedValue) -> Option<(&[String], SmallVec<[Option<RKind>; 8]>)> {
    if !value.is_named_scalar_record() {
        return None;
    }
    let composite = value.try_composite()?;
    let cells = composite
        .elements()
        .iter()
        .map(|cell| match cell.type_code() {
            TypeCode::Null => Some(None),
            code => code.kind().map(Some),
        })
        .collect::<Option<_>>()?;
    Some((composite.names()?, cells))
}

/// Combine the encoded elements of a non-vectorizable collection.
#[tracing::instrument(level = "trace", skip_all, fields(len = elements.len()))]
pub fn classify(elements: Vec<EncodedValue>, order: ArrayOrder) -> EncodeResult {
    let warning = last_warning(&elements);
    let Some((first, rest)) = elements.split_first() else {
        return Ok(EncodedValue::list(elements));
    };
    let seed = (ArrayDetector::seed(first), TableDetector::seed(first));
    let detectors = rest.iter().fold(seed, |(array, table), next| {
        (array.step(next), table.step(next))
    });

    let encoded = match detectors {
        (ArrayDetector::Active { dims, kind }, _) => {
            tracing::debug!(?dims, %kind, "collection stacked into an array");
            stack_elements(elements, kind, &dims, order)?
        }
        (_, TableDetector::Active { names, kinds }) => {
            tracing::debug!(columns = names.len(), "collection read as a table");
            table_from_records(&elements, names, &kinds)?
        }
        _ => EncodedValue::list(elements),
    };
    Ok(tag_warning(encoded, warning))
}

/// One ND_ARRAY from same-shaped array elements, widened to `kind`.
fn stack_elements(
    elements: Vec<EncodedValue>,
    kind: RKind,
    sub_dims: &[usize],
    order: ArrayOrder,
) -> EncodeResult {
    let mut parts = Vec::with_capacity(elements.len());
    for element in elements {
        let buffer = match element.into_payload() {
            Payload::Buffer(buffer) => buffer,
            other => {
                return Err(PayloadError::WrongKind {
                    expected: "buffer",
                    found: other.describe(),
                }
                .into())
            }
        };
        let widened = buffer
            .widen(kind)
            .map_err(|buffer| LayoutError::KindMismatch {
                expected: kind,
                found: buffer.kind(),
            })?;
        parts.push(widened);
    }
    let (buffer, dims) = stack_buffers(kind, parts, sub_dims, order)?;
    Ok(EncodedValue::nd_array(buffer, dims)?)
}

/// One DATA_FRAME from records; column `i` gathers the `i`-th cell of every
/// record.
fn table_from_records(records: &[EncodedValue], names: Vec<String>, kinds: &[RKind]) -> EncodeResult {
    let mut columns: Vec<BufferBuilder> = kinds
        .iter()
        .map(|&kind| BufferBuilder::new(kind, records.len()))
        .collect();
    for record in records {
        for (column, cell) in columns.iter_mut().zip(record.as_composite()?.elements()) {
            let scalar = cell.try_scalar();
            if !column.push_scalar(scalar) {
                return Err(LayoutError::KindMismatch {
                    expected: column.kind(),
                    found: scalar.map_or(column.kind(), Scalar::kind),
                }
                .into());
            }
        }
    }
    let columns = columns
        .into_iter()
        .map(|column| {
            let (buffer, warning) = column.finish();
            tag_warning(EncodedValue::vector(buffer), warning)
        })
        .collect();
    Ok(EncodedValue::data_frame(names, columns))
}
