//! Source values.
//!
//! `HostValue` is the closed set of shapes the encoder recognizes. Anything
//! the source runtime can hold that has no mapping rule arrives as
//! `HostValue::Object` and is rejected by the encoder.
//!
//! # Arrays
//!
//! A `HostArray` has a declared element class and a declared rank, both
//! properties of its type rather than its contents. A rank-1 array holds
//! leaves; a higher-rank array holds optional sub-arrays of rank one less,
//! where `None` is a null sub-array.
//!
//! ```text
//! let v = HostArray::ints([1, 2, 3]);                          // int[]
//! let m = HostArray::matrix(ElementClass::Int, vec![...]);     // int[][]
//! let n = HostArray::nested(ElementClass::Int, 3, rows);       // int[][][]
//! ```

use std::fmt;

use num_bigint::BigInt;
use rust_decimal::Decimal;

use crate::buffer::RKind;

/// A value of the source model.
#[derive(Clone, Debug, PartialEq)]
pub enum HostValue {
    Null,

    // Scalars
    Bool(bool),
    Byte(u8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    BigInteger(BigInt),
    BigDecimal(Decimal),
    Char(char),
    Str(String),

    /// Key-ordered mapping. Keys are arbitrary values so the encoder can
    /// reject non-string keys.
    Map(Vec<(HostValue, HostValue)>),
    /// Ordered collection of arbitrary values.
    Collection(Vec<HostValue>),
    /// Array of declared element class and rank.
    Array(HostArray),
    /// Error object, carried by its message.
    Error(String),
    /// Any value with no mapping rule, identified by its runtime class name.
    Object { class_name: String },
}

impl HostValue {
    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        HostValue::Str(s.into())
    }

    #[inline]
    pub fn list(items: impl IntoIterator<Item = HostValue>) -> Self {
        HostValue::Collection(items.into_iter().collect())
    }

    /// Build a map with string keys, preserving the given order.
    pub fn map<K: Into<String>>(entries: impl IntoIterator<Item = (K, HostValue)>) -> Self {
        HostValue::Map(
            entries
                .into_iter()
                .map(|(k, v)| (HostValue::Str(k.into()), v))
                .collect(),
        )
    }

    #[inline]
    pub fn error(message: impl Into<String>) -> Self {
        HostValue::Error(message.into())
    }

    #[inline]
    pub fn object(class_name: impl Into<String>) -> Self {
        HostValue::Object {
            class_name: class_name.into(),
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, HostValue::Null)
    }

    /// Name of the value's runtime class, for error messages.
    pub fn type_name(&self) -> &str {
        match self {
            HostValue::Null => "null",
            HostValue::Bool(_) => "bool",
            HostValue::Byte(_) => "byte",
            HostValue::Short(_) => "short",
            HostValue::Int(_) => "int",
            HostValue::Long(_) => "long",
            HostValue::Float(_) => "float",
            HostValue::Double(_) => "double",
            HostValue::BigInteger(_) => "BigInteger",
            HostValue::BigDecimal(_) => "BigDecimal",
            HostValue::Char(_) => "char",
            HostValue::Str(_) => "String",
            HostValue::Map(_) => "Map",
            HostValue::Collection(_) => "Collection",
            HostValue::Array(_) => "Array",
            HostValue::Error(_) => "Error",
            HostValue::Object { class_name } => class_name,
        }
    }
}

impl From<HostArray> for HostValue {
    fn from(array: HostArray) -> Self {
        HostValue::Array(array)
    }
}

/// Base element class of an array.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ElementClass {
    Bool,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    BigInteger,
    BigDecimal,
    Char,
    Str,
    /// Arrays of arbitrary values. Never encoded as a target array.
    Object,
}

impl ElementClass {
    /// Target kind for arrays of this class, `None` for `Object`.
    pub const fn kind(self) -> Option<RKind> {
        match self {
            ElementClass::Bool => Some(RKind::Logical),
            ElementClass::Byte => Some(RKind::Raw),
            ElementClass::Short | ElementClass::Int => Some(RKind::Integer),
            ElementClass::Long
            | ElementClass::Float
            | ElementClass::Double
            | ElementClass::BigInteger
            | ElementClass::BigDecimal => Some(RKind::Numeric),
            ElementClass::Char | ElementClass::Str => Some(RKind::Character),
            ElementClass::Object => None,
        }
    }

    /// Whether `value` may sit at a leaf of an array of this class. Every
    /// class admits null leaves.
    pub fn accepts(self, value: &HostValue) -> bool {
        match (self, value) {
            (ElementClass::Object, _)
            | (_, HostValue::Null)
            | (ElementClass::Bool, HostValue::Bool(_))
            | (ElementClass::Byte, HostValue::Byte(_))
            | (ElementClass::Short, HostValue::Short(_))
            | (ElementClass::Int, HostValue::Int(_))
            | (ElementClass::Long, HostValue::Long(_))
            | (ElementClass::Float, HostValue::Float(_))
            | (ElementClass::Double, HostValue::Double(_))
            | (ElementClass::BigInteger, HostValue::BigInteger(_))
            | (ElementClass::BigDecimal, HostValue::BigDecimal(_))
            | (ElementClass::Char, HostValue::Char(_))
            | (ElementClass::Str, HostValue::Str(_)) => true,
            _ => false,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            ElementClass::Bool => "bool",
            ElementClass::Byte => "byte",
            ElementClass::Short => "short",
            ElementClass::Int => "int",
            ElementClass::Long => "long",
            ElementClass::Float => "float",
            ElementClass::Double => "double",
            ElementClass::BigInteger => "BigInteger",
            ElementClass::BigDecimal => "BigDecimal",
            ElementClass::Char => "char",
            ElementClass::Str => "String",
            ElementClass::Object => "Object",
        }
    }
}

impl fmt::Display for ElementClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Contents of one array level.
#[derive(Clone, Debug, PartialEq)]
pub enum Slots {
    /// Rank-1 contents.
    Leaves(Vec<HostValue>),
    /// Sub-arrays of a higher-rank array; `None` is a null sub-array.
    Rows(Vec<Option<HostArray>>),
}

/// An array with declared element class and rank.
#[derive(Clone, Debug, PartialEq)]
pub struct HostArray {
    element: ElementClass,
    rank: usize,
    slots: Slots,
}

impl HostArray {
    /// Rank-1 array.
    pub fn vector(element: ElementClass, values: Vec<HostValue>) -> Self {
        HostArray {
            element,
            rank: 1,
            slots: Slots::Leaves(values),
        }
    }

    /// Array of rank `rank >= 2` whose rows are arrays of rank `rank - 1` and
    /// the same element class.
    ///
    /// Returns `None` if a row's class or rank disagrees with the declared
    /// type.
    pub fn nested(element: ElementClass, rank: usize, rows: Vec<Option<HostArray>>) -> Option<Self> {
        if rank < 2 {
            return None;
        }
        let well_typed = rows
            .iter()
            .flatten()
            .all(|row| row.element == element && row.rank == rank - 1);
        if !well_typed {
            return None;
        }
        Some(HostArray {
            element,
            rank,
            slots: Slots::Rows(rows),
        })
    }

    /// Rank-2 array from leaf rows.
    pub fn matrix(element: ElementClass, rows: Vec<Vec<HostValue>>) -> Self {
        HostArray {
            element,
            rank: 2,
            slots: Slots::Rows(
                rows.into_iter()
                    .map(|row| Some(HostArray::vector(element, row)))
                    .collect(),
            ),
        }
    }

    /// Rectangular array of shape `dims` from leaves in row-major order (last
    /// index varies fastest).
    ///
    /// Returns `None` if `dims` is empty or its product is not the number of
    /// leaves.
    pub fn from_row_major(element: ElementClass, dims: &[usize], leaves: Vec<HostValue>) -> Option<Self> {
        let total: usize = dims.iter().product();
        if dims.is_empty() || total != leaves.len() {
            return None;
        }
        let mut leaves = leaves.into_iter();
        Some(Self::build_row_major(element, dims, &mut leaves))
    }

    fn build_row_major<I>(element: ElementClass, dims: &[usize], leaves: &mut I) -> Self
    where
        I: Iterator<Item = HostValue>,
    {
        match dims {
            [] => HostArray::vector(element, Vec::new()),
            [len] => HostArray::vector(element, leaves.by_ref().take(*len).collect()),
            [len, rest @ ..] => HostArray {
                element,
                rank: dims.len(),
                slots: Slots::Rows(
                    (0..*len)
                        .map(|_| Some(Self::build_row_major(element, rest, leaves)))
                        .collect(),
                ),
            },
        }
    }

    pub fn bools(values: impl IntoIterator<Item = bool>) -> Self {
        Self::vector(ElementClass::Bool, values.into_iter().map(HostValue::Bool).collect())
    }

    pub fn bytes(values: impl IntoIterator<Item = u8>) -> Self {
        Self::vector(ElementClass::Byte, values.into_iter().map(HostValue::Byte).collect())
    }

    pub fn ints(values: impl IntoIterator<Item = i32>) -> Self {
        Self::vector(ElementClass::Int, values.into_iter().map(HostValue::Int).collect())
    }

    pub fn longs(values: impl IntoIterator<Item = i64>) -> Self {
        Self::vector(ElementClass::Long, values.into_iter().map(HostValue::Long).collect())
    }

    pub fn doubles(values: impl IntoIterator<Item = f64>) -> Self {
        Self::vector(ElementClass::Double, values.into_iter().map(HostValue::Double).collect())
    }

    pub fn strings<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Self::vector(
            ElementClass::Str,
            values.into_iter().map(|s| HostValue::Str(s.into())).collect(),
        )
    }

    /// Base element class, looking through every level.
    #[inline]
    pub fn element(&self) -> ElementClass {
        self.element
    }

    /// Declared number of dimensions.
    #[inline]
    pub fn rank(&self) -> usize {
        self.rank
    }

    #[inline]
    pub fn slots(&self) -> &Slots {
        &self.slots
    }

    /// Length of the outermost level.
    pub fn len(&self) -> usize {
        match &self.slots {
            Slots::Leaves(values) => values.len(),
            Slots::Rows(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The outermost level as a list of values; null rows become `Null`.
    pub fn to_values(&self) -> Vec<HostValue> {
        match &self.slots {
            Slots::Leaves(values) => values.clone(),
            Slots::Rows(rows) => rows
                .iter()
                .map(|row| match row {
                    Some(array) => HostValue::Array(array.clone()),
                    None => HostValue::Null,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests;
