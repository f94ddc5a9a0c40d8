//! Scalar and vector coercion.
//!
//! Every scalar source value has exactly one target kind. A run of scalars
//! shares a buffer when their kinds unify under `Raw < Integer < Numeric`;
//! character and logical values only share a buffer with their own kind.
//!
//! Nulls inside a buffer become the kind's missing value. Logical and raw
//! buffers cannot represent one, so they get `false` and `0` instead and the
//! builder records a warning.

use num_traits::ToPrimitive;
use rdx_ir::na::{NA_INTEGER, NA_LOGICAL_DEFAULT, NA_RAW_DEFAULT, NA_REAL};
use rdx_ir::{Buffer, EncodedValue, ExceptionCode, HostValue, RKind, Scalar};

/// Target kind of a non-null scalar source value.
pub fn scalar_kind(value: &HostValue) -> Option<RKind> {
    let kind = match value {
        HostValue::Bool(_) => RKind::Logical,
        HostValue::Byte(_) => RKind::Raw,
        HostValue::Short(_) | HostValue::Int(_) => RKind::Integer,
        HostValue::Long(_)
        | HostValue::Float(_)
        | HostValue::Double(_)
        | HostValue::BigInteger(_)
        | HostValue::BigDecimal(_) => RKind::Numeric,
        HostValue::Char(_) | HostValue::Str(_) => RKind::Character,
        HostValue::Null
        | HostValue::Map(_)
        | HostValue::Collection(_)
        | HostValue::Array(_)
        | HostValue::Error(_)
        | HostValue::Object { .. } => return None,
    };
    Some(kind)
}

/// Target scalar of a non-null scalar source value. 64-bit and
/// arbitrary-precision numbers are narrowed to `f64`.
pub fn to_scalar(value: &HostValue) -> Option<Scalar> {
    let scalar = match value {
        HostValue::Bool(b) => Scalar::Logical(*b),
        HostValue::Byte(b) => Scalar::Raw(*b),
        HostValue::Short(v) => Scalar::Integer(i32::from(*v)),
        HostValue::Int(v) => Scalar::Integer(*v),
        HostValue::Long(v) => Scalar::Numeric(*v as f64),
        HostValue::Float(v) => Scalar::Numeric(f64::from(*v)),
        HostValue::Double(v) => Scalar::Numeric(*v),
        HostValue::BigInteger(v) => Scalar::Numeric(v.to_f64().unwrap_or(NA_REAL)),
        HostValue::BigDecimal(v) => Scalar::Numeric(v.to_f64().unwrap_or(NA_REAL)),
        HostValue::Char(c) => Scalar::Character(Some(c.to_string())),
        HostValue::Str(s) => Scalar::Character(Some(s.clone())),
        _ => return None,
    };
    Some(scalar)
}

/// Fills a buffer of one fixed kind, substituting missing values.
#[derive(Debug)]
pub struct BufferBuilder {
    buffer: Buffer,
    warning: ExceptionCode,
}

impl BufferBuilder {
    pub fn new(kind: RKind, capacity: usize) -> Self {
        BufferBuilder {
            buffer: Buffer::with_capacity(kind, capacity),
            warning: ExceptionCode::None,
        }
    }

    #[inline]
    pub fn kind(&self) -> RKind {
        self.buffer.kind()
    }

    /// Append a source leaf. Returns `false`, appending nothing, when the
    /// value is not a scalar that widens to this buffer's kind.
    pub fn push(&mut self, value: &HostValue) -> bool {
        if value.is_null() {
            self.push_missing();
            return true;
        }
        match to_scalar(value) {
            Some(scalar) => self.buffer.push(&scalar),
            None => false,
        }
    }

    /// Append an already-converted scalar; `None` is a missing value.
    pub fn push_scalar(&mut self, scalar: Option<&Scalar>) -> bool {
        match scalar {
            Some(scalar) => self.buffer.push(scalar),
            None => {
                self.push_missing();
                true
            }
        }
    }

    pub fn push_missing(&mut self) {
        let (missing, warning) = match self.buffer.kind() {
            RKind::Numeric => (Scalar::Numeric(NA_REAL), None),
            RKind::Integer => (Scalar::Integer(NA_INTEGER), None),
            RKind::Character => (Scalar::Character(None), None),
            RKind::Logical => (
                Scalar::Logical(NA_LOGICAL_DEFAULT),
                Some(ExceptionCode::WarningMissingLogical),
            ),
            RKind::Raw => (
                Scalar::Raw(NA_RAW_DEFAULT),
                Some(ExceptionCode::WarningMissingRaw),
            ),
        };
        let stored = self.buffer.push(&missing);
        debug_assert!(stored, "missing value must fit its own kind");
        if let Some(warning) = warning {
            self.warning = warning;
        }
    }

    /// The filled buffer and the warning raised while filling it, if any.
    pub fn finish(self) -> (Buffer, ExceptionCode) {
        (self.buffer, self.warning)
    }
}

/// Coerce a collection of scalars into one buffer.
///
/// Nulls are skipped when choosing the kind. Returns `None` when an item is
/// not a scalar, when kinds cannot share a buffer, or when every item is
/// null.
pub fn vectorize(items: &[HostValue]) -> Option<(Buffer, ExceptionCode)> {
    let mut kind: Option<RKind> = None;
    for item in items.iter().filter(|item| !item.is_null()) {
        let item_kind = scalar_kind(item)?;
        kind = Some(match kind {
            Some(kind) => kind.unify(item_kind)?,
            None => item_kind,
        });
    }

    let mut builder = BufferBuilder::new(kind?, items.len());
    for item in items {
        if !builder.push(item) {
            return None;
        }
    }
    Some(builder.finish())
}

/// The last warning carried by any of `values`. Error objects among them
/// do not count.
pub fn last_warning(values: &[EncodedValue]) -> ExceptionCode {
    values
        .iter()
        .rev()
        .map(EncodedValue::exception)
        .find(|code| code.is_warning())
        .unwrap_or(ExceptionCode::None)
}

/// Tag `value` with `warning` unless it is `None`.
pub fn tag_warning(value: EncodedValue, warning: ExceptionCode) -> EncodedValue {
    if warning.is_warning() {
        value.with_exception(warning)
    } else {
        value
    }
}
