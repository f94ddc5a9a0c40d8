//! Reverse direction: target data back into source values.
//!
//! These helpers serve the collaborator that receives target-side vectors
//! and needs source-side lists, maps, row records and nested arrays.

use indexmap::IndexMap;
use rdx_ir::{ArrayOrder, Buffer, ElementClass, HostArray, HostValue, RKind};

use crate::error::{length_mismatch, LayoutError};
use crate::flat::unflatten_buffer;

/// One row of a table, keyed by column name in column order.
pub type Record = IndexMap<String, HostValue>;

/// Source collection of the given values, in order.
pub fn create_list(values: Vec<HostValue>) -> HostValue {
    HostValue::Collection(values)
}

/// Source map pairing `names` with `values`. A repeated name keeps its first
/// position and its last value.
pub fn create_map(names: Vec<String>, values: Vec<HostValue>) -> Result<HostValue, LayoutError> {
    if names.len() != values.len() {
        return Err(LayoutError::ColumnCountMismatch {
            names: names.len(),
            columns: values.len(),
        });
    }
    let map: Record = names.into_iter().zip(values).collect();
    Ok(HostValue::map(map))
}

/// Split table columns into row records.
///
/// The row count is the length of the first column; every other column must
/// match it. Missing character values become `Null`.
pub fn records_from_columns(names: &[String], columns: &[Buffer]) -> Result<Vec<Record>, LayoutError> {
    if names.len() != columns.len() {
        return Err(LayoutError::ColumnCountMismatch {
            names: names.len(),
            columns: columns.len(),
        });
    }
    let rows = columns.first().map_or(0, Buffer::len);
    if let Some((name, column)) = names.iter().zip(columns).find(|(_, c)| c.len() != rows) {
        return Err(LayoutError::ColumnLengthMismatch {
            name: name.clone(),
            expected: rows,
            found: column.len(),
        });
    }

    let mut records: Vec<Record> = (0..rows)
        .map(|_| IndexMap::with_capacity(columns.len()))
        .collect();
    for (name, column) in names.iter().zip(columns) {
        for (record, value) in records.iter_mut().zip(column_values(column)) {
            record.insert(name.clone(), value);
        }
    }
    Ok(records)
}

/// [`records_from_columns`] wrapped as a source collection of maps.
pub fn create_list_of_records(names: &[String], columns: &[Buffer]) -> Result<HostValue, LayoutError> {
    let records = records_from_columns(names, columns)?;
    Ok(HostValue::Collection(
        records.into_iter().map(HostValue::map).collect(),
    ))
}

/// Nested source array of shape `dims` from a buffer laid out under `order`.
///
/// `dims` is the nested shape, outermost first; use
/// [`restore_dims`](crate::flat::restore_dims) to recover it from a target
/// dimension vector.
pub fn create_nd_array(flat: &Buffer, dims: &[usize], order: ArrayOrder) -> Result<HostArray, LayoutError> {
    let nested = unflatten_buffer(flat, dims, order)?;
    let len = nested.len();
    HostArray::from_row_major(element_class(nested.kind()), dims, column_values(&nested))
        .ok_or_else(|| length_mismatch(dims, len))
}

fn element_class(kind: RKind) -> ElementClass {
    match kind {
        RKind::Numeric => ElementClass::Double,
        RKind::Integer => ElementClass::Int,
        RKind::Character => ElementClass::Str,
        RKind::Logical => ElementClass::Bool,
        RKind::Raw => ElementClass::Byte,
    }
}

fn column_values(column: &Buffer) -> Vec<HostValue> {
    match column {
        Buffer::Numeric(v) => v.iter().copied().map(HostValue::Double).collect(),
        Buffer::Integer(v) => v.iter().copied().map(HostValue::Int).collect(),
        Buffer::Character(v) => v
            .iter()
            .map(|s| s.clone().map_or(HostValue::Null, HostValue::Str))
            .collect(),
        Buffer::Logical(v) => v.iter().copied().map(HostValue::Bool).collect(),
        Buffer::Raw(v) => v.iter().copied().map(HostValue::Byte).collect(),
    }
}
