//! Target primitives: kinds, scalars and flat buffers.

use std::fmt;

use crate::codes::TypeCode;
use crate::na::{is_na_integer, NA_REAL};

/// One of the five primitive kinds of the target runtime.
///
/// `Raw < Integer < Numeric` is a total widening order. `Character` and
/// `Logical` are incomparable with every other kind.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RKind {
    Numeric,
    Integer,
    Character,
    Logical,
    Raw,
}

impl RKind {
    pub const ALL: [RKind; 5] = [
        RKind::Numeric,
        RKind::Integer,
        RKind::Character,
        RKind::Logical,
        RKind::Raw,
    ];

    pub const fn type_code(self) -> TypeCode {
        match self {
            RKind::Numeric => TypeCode::Numeric,
            RKind::Integer => TypeCode::Integer,
            RKind::Character => TypeCode::Character,
            RKind::Logical => TypeCode::Logical,
            RKind::Raw => TypeCode::Raw,
        }
    }

    /// Position in the numeric widening order, `None` for character and logical.
    const fn numeric_rank(self) -> Option<u8> {
        match self {
            RKind::Raw => Some(0),
            RKind::Integer => Some(1),
            RKind::Numeric => Some(2),
            RKind::Character | RKind::Logical => None,
        }
    }

    /// Smallest kind both `self` and `other` widen to, or `None` when they
    /// cannot share a buffer.
    pub const fn unify(self, other: RKind) -> Option<RKind> {
        match (self.numeric_rank(), other.numeric_rank()) {
            (Some(a), Some(b)) => {
                if a >= b {
                    Some(self)
                } else {
                    Some(other)
                }
            }
            _ => {
                if self as u8 == other as u8 {
                    Some(self)
                } else {
                    None
                }
            }
        }
    }

    /// Whether a value of kind `self` may be stored in a buffer of `target`.
    pub const fn widens_to(self, target: RKind) -> bool {
        match self.unify(target) {
            Some(kind) => kind as u8 == target as u8,
            None => false,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            RKind::Numeric => "numeric",
            RKind::Integer => "integer",
            RKind::Character => "character",
            RKind::Logical => "logical",
            RKind::Raw => "raw",
        }
    }
}

impl fmt::Display for RKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single target primitive.
#[derive(Clone, Debug)]
pub enum Scalar {
    Numeric(f64),
    Integer(i32),
    /// `None` is a missing character value.
    Character(Option<String>),
    Logical(bool),
    Raw(u8),
}

impl Scalar {
    pub fn kind(&self) -> RKind {
        match self {
            Scalar::Numeric(_) => RKind::Numeric,
            Scalar::Integer(_) => RKind::Integer,
            Scalar::Character(_) => RKind::Character,
            Scalar::Logical(_) => RKind::Logical,
            Scalar::Raw(_) => RKind::Raw,
        }
    }

    /// Widen to numeric. Missing integers become the numeric sentinel.
    pub fn to_f64(&self) -> Option<f64> {
        match *self {
            Scalar::Numeric(v) => Some(v),
            Scalar::Integer(v) => Some(integer_to_f64(v)),
            Scalar::Raw(v) => Some(f64::from(v)),
            Scalar::Character(_) | Scalar::Logical(_) => None,
        }
    }

    pub fn to_i32(&self) -> Option<i32> {
        match *self {
            Scalar::Integer(v) => Some(v),
            Scalar::Raw(v) => Some(i32::from(v)),
            Scalar::Numeric(_) | Scalar::Character(_) | Scalar::Logical(_) => None,
        }
    }
}

/// Numeric and integer payloads compare by bit pattern so sentinels are equal
/// to themselves.
impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Scalar::Numeric(a), Scalar::Numeric(b)) => a.to_bits() == b.to_bits(),
            (Scalar::Integer(a), Scalar::Integer(b)) => a == b,
            (Scalar::Character(a), Scalar::Character(b)) => a == b,
            (Scalar::Logical(a), Scalar::Logical(b)) => a == b,
            (Scalar::Raw(a), Scalar::Raw(b)) => a == b,
            _ => false,
        }
    }
}

#[inline]
pub(crate) fn integer_to_f64(value: i32) -> f64 {
    if is_na_integer(value) {
        NA_REAL
    } else {
        f64::from(value)
    }
}

/// A homogeneous flat buffer of one primitive kind.
#[derive(Clone, Debug)]
pub enum Buffer {
    Numeric(Vec<f64>),
    Integer(Vec<i32>),
    Character(Vec<Option<String>>),
    Logical(Vec<bool>),
    Raw(Vec<u8>),
}

impl Buffer {
    /// An empty buffer of the given kind with room for `capacity` elements.
    pub fn with_capacity(kind: RKind, capacity: usize) -> Self {
        match kind {
            RKind::Numeric => Buffer::Numeric(Vec::with_capacity(capacity)),
            RKind::Integer => Buffer::Integer(Vec::with_capacity(capacity)),
            RKind::Character => Buffer::Character(Vec::with_capacity(capacity)),
            RKind::Logical => Buffer::Logical(Vec::with_capacity(capacity)),
            RKind::Raw => Buffer::Raw(Vec::with_capacity(capacity)),
        }
    }

    pub fn kind(&self) -> RKind {
        match self {
            Buffer::Numeric(_) => RKind::Numeric,
            Buffer::Integer(_) => RKind::Integer,
            Buffer::Character(_) => RKind::Character,
            Buffer::Logical(_) => RKind::Logical,
            Buffer::Raw(_) => RKind::Raw,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Buffer::Numeric(v) => v.len(),
            Buffer::Integer(v) => v.len(),
            Buffer::Character(v) => v.len(),
            Buffer::Logical(v) => v.len(),
            Buffer::Raw(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element `index` as a scalar.
    pub fn get(&self, index: usize) -> Option<Scalar> {
        match self {
            Buffer::Numeric(v) => v.get(index).map(|x| Scalar::Numeric(*x)),
            Buffer::Integer(v) => v.get(index).map(|x| Scalar::Integer(*x)),
            Buffer::Character(v) => v.get(index).map(|x| Scalar::Character(x.clone())),
            Buffer::Logical(v) => v.get(index).map(|x| Scalar::Logical(*x)),
            Buffer::Raw(v) => v.get(index).map(|x| Scalar::Raw(*x)),
        }
    }

    /// Append a scalar, widening it to this buffer's kind.
    ///
    /// Returns `false` and leaves the buffer untouched if the scalar's kind
    /// does not widen to the buffer's kind.
    pub fn push(&mut self, scalar: &Scalar) -> bool {
        match self {
            Buffer::Numeric(v) => match scalar.to_f64() {
                Some(x) => v.push(x),
                None => return false,
            },
            Buffer::Integer(v) => match scalar.to_i32() {
                Some(x) => v.push(x),
                None => return false,
            },
            Buffer::Character(v) => match scalar {
                Scalar::Character(s) => v.push(s.clone()),
                _ => return false,
            },
            Buffer::Logical(v) => match scalar {
                Scalar::Logical(b) => v.push(*b),
                _ => return false,
            },
            Buffer::Raw(v) => match scalar {
                Scalar::Raw(b) => v.push(*b),
                _ => return false,
            },
        }
        true
    }

    /// Convert to a wider kind.
    ///
    /// Identity when `target` is this buffer's kind. Returns the buffer
    /// unchanged in `Err` when `target` is not reachable by widening.
    pub fn widen(self, target: RKind) -> Result<Buffer, Buffer> {
        if self.kind() == target {
            return Ok(self);
        }
        match (self, target) {
            (Buffer::Integer(v), RKind::Numeric) => Ok(Buffer::Numeric(
                v.into_iter().map(integer_to_f64).collect(),
            )),
            (Buffer::Raw(v), RKind::Numeric) => {
                Ok(Buffer::Numeric(v.into_iter().map(f64::from).collect()))
            }
            (Buffer::Raw(v), RKind::Integer) => {
                Ok(Buffer::Integer(v.into_iter().map(i32::from).collect()))
            }
            (other, _) => Err(other),
        }
    }
}

/// Numeric buffers compare by bit pattern, like `Scalar`.
impl PartialEq for Buffer {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Buffer::Numeric(a), Buffer::Numeric(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.to_bits() == y.to_bits())
            }
            (Buffer::Integer(a), Buffer::Integer(b)) => a == b,
            (Buffer::Character(a), Buffer::Character(b)) => a == b,
            (Buffer::Logical(a), Buffer::Logical(b)) => a == b,
            (Buffer::Raw(a), Buffer::Raw(b)) => a == b,
            _ => false,
        }
    }
}
