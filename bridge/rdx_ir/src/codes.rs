//! Composite codes.
//!
//! A composite code packs four independent tags into one `i32` so it can be
//! handed to the target runtime as a plain integer:
//!
//! ```text
//!  bits 24-30   bits 16-23   bits 8-15    bits 0-7
//! +-----------+------------+-----------+----------+
//! | user tag  | exception  | structure |   type   |
//! +-----------+------------+-----------+----------+
//! ```
//!
//! The field ranges are disjoint, so OR-ing the four values and masking them
//! back out always recovers the originals. The sign bit is never used.

use std::fmt;

use crate::buffer::RKind;

/// Target data type of an encoded value (bits 0-7).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum TypeCode {
    Null = 0x00,
    Numeric = 0x01,
    Integer = 0x02,
    Character = 0x03,
    Logical = 0x04,
    Raw = 0x05,
    /// Lists, data frames, user-defined values and exceptions.
    Other = 0xFE,
    Unsupported = 0xFF,
}

impl TypeCode {
    pub const MASK: i32 = 0x0000_00FF;

    pub const ALL: [TypeCode; 8] = [
        TypeCode::Null,
        TypeCode::Numeric,
        TypeCode::Integer,
        TypeCode::Character,
        TypeCode::Logical,
        TypeCode::Raw,
        TypeCode::Other,
        TypeCode::Unsupported,
    ];

    #[inline]
    pub const fn bits(self) -> i32 {
        self as i32
    }

    pub const fn from_bits(bits: i32) -> Option<Self> {
        match bits & Self::MASK {
            0x00 => Some(TypeCode::Null),
            0x01 => Some(TypeCode::Numeric),
            0x02 => Some(TypeCode::Integer),
            0x03 => Some(TypeCode::Character),
            0x04 => Some(TypeCode::Logical),
            0x05 => Some(TypeCode::Raw),
            0xFE => Some(TypeCode::Other),
            0xFF => Some(TypeCode::Unsupported),
            _ => None,
        }
    }

    /// The primitive kind this type code denotes, if it is one of the five
    /// target primitives.
    pub const fn kind(self) -> Option<RKind> {
        match self {
            TypeCode::Numeric => Some(RKind::Numeric),
            TypeCode::Integer => Some(RKind::Integer),
            TypeCode::Character => Some(RKind::Character),
            TypeCode::Logical => Some(RKind::Logical),
            TypeCode::Raw => Some(RKind::Raw),
            TypeCode::Null | TypeCode::Other | TypeCode::Unsupported => None,
        }
    }
}

/// Target structure of an encoded value (bits 8-15).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum StructureCode {
    Scalar = 0x000,
    Vector = 0x100,
    NdArray = 0x200,
    DataFrame = 0x300,
    List = 0x400,
    NamedList = 0x500,
    UserDefined = 0xFF00,
}

impl StructureCode {
    pub const MASK: i32 = 0x0000_FF00;

    pub const ALL: [StructureCode; 7] = [
        StructureCode::Scalar,
        StructureCode::Vector,
        StructureCode::NdArray,
        StructureCode::DataFrame,
        StructureCode::List,
        StructureCode::NamedList,
        StructureCode::UserDefined,
    ];

    #[inline]
    pub const fn bits(self) -> i32 {
        self as i32
    }

    pub const fn from_bits(bits: i32) -> Option<Self> {
        match bits & Self::MASK {
            0x000 => Some(StructureCode::Scalar),
            0x100 => Some(StructureCode::Vector),
            0x200 => Some(StructureCode::NdArray),
            0x300 => Some(StructureCode::DataFrame),
            0x400 => Some(StructureCode::List),
            0x500 => Some(StructureCode::NamedList),
            0xFF00 => Some(StructureCode::UserDefined),
            _ => None,
        }
    }

    /// Whether values of this structure carry a dimension vector.
    #[inline]
    pub const fn has_dims(self) -> bool {
        matches!(self, StructureCode::Vector | StructureCode::NdArray)
    }
}

/// Exception tag of an encoded value (bits 16-23).
///
/// `Exception` marks an encoded error object. The two warnings are advisory:
/// the conversion succeeded but substituted a default for missing values the
/// target kind cannot represent.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ExceptionCode {
    None = 0x0_0000,
    Exception = 0x1_0000,
    WarningMissingLogical = 0xA_0000,
    WarningMissingRaw = 0xB_0000,
}

impl ExceptionCode {
    pub const MASK: i32 = 0x00FF_0000;

    pub const ALL: [ExceptionCode; 4] = [
        ExceptionCode::None,
        ExceptionCode::Exception,
        ExceptionCode::WarningMissingLogical,
        ExceptionCode::WarningMissingRaw,
    ];

    #[inline]
    pub const fn bits(self) -> i32 {
        self as i32
    }

    pub const fn from_bits(bits: i32) -> Option<Self> {
        match bits & Self::MASK {
            0x0_0000 => Some(ExceptionCode::None),
            0x1_0000 => Some(ExceptionCode::Exception),
            0xA_0000 => Some(ExceptionCode::WarningMissingLogical),
            0xB_0000 => Some(ExceptionCode::WarningMissingRaw),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_warning(self) -> bool {
        matches!(
            self,
            ExceptionCode::WarningMissingLogical | ExceptionCode::WarningMissingRaw
        )
    }
}

/// Caller-assigned tag for user-defined values (bits 24-30).
///
/// Valid tags lie in `0x0100_0000..=0x7F00_0000` with the low 24 bits clear,
/// which leaves room for 127 distinct tags.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct UserCode(i32);

impl UserCode {
    pub const MASK: i32 = 0x7F00_0000;
    pub const MIN: i32 = 0x0100_0000;
    pub const MAX: i32 = 0x7F00_0000;

    /// Validate a raw tag. Returns `None` when it falls outside the reserved
    /// range or touches bits owned by another field.
    pub const fn new(raw: i32) -> Option<Self> {
        if raw < Self::MIN || raw & !Self::MASK != 0 {
            None
        } else {
            Some(UserCode(raw))
        }
    }

    /// Build a tag from its ordinal (1..=127).
    pub const fn from_ordinal(ordinal: u8) -> Option<Self> {
        if ordinal == 0 || ordinal > 0x7F {
            None
        } else {
            Some(UserCode((ordinal as i32) << 24))
        }
    }

    #[inline]
    pub const fn bits(self) -> i32 {
        self.0
    }

    #[inline]
    pub const fn ordinal(self) -> u8 {
        (self.0 >> 24) as u8
    }
}

/// Packed type/structure/exception/user tag.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct CompositeCode(i32);

impl CompositeCode {
    pub const fn new(
        type_code: TypeCode,
        structure: StructureCode,
        exception: ExceptionCode,
        user: Option<UserCode>,
    ) -> Self {
        let user_bits = match user {
            Some(code) => code.bits(),
            None => 0,
        };
        CompositeCode(type_code.bits() | structure.bits() | exception.bits() | user_bits)
    }

    /// Shorthand for a code with no exception and no user tag.
    #[inline]
    pub const fn of(type_code: TypeCode, structure: StructureCode) -> Self {
        Self::new(type_code, structure, ExceptionCode::None, None)
    }

    /// Decode a raw integer. Returns `None` if any field holds a value that no
    /// tag maps to.
    pub const fn from_bits(bits: i32) -> Option<Self> {
        if bits < 0 {
            return None;
        }
        if TypeCode::from_bits(bits).is_none()
            || StructureCode::from_bits(bits).is_none()
            || ExceptionCode::from_bits(bits).is_none()
        {
            return None;
        }
        Some(CompositeCode(bits))
    }

    #[inline]
    pub const fn bits(self) -> i32 {
        self.0
    }

    pub const fn type_code(self) -> TypeCode {
        match TypeCode::from_bits(self.0) {
            Some(code) => code,
            None => TypeCode::Unsupported,
        }
    }

    pub const fn structure(self) -> StructureCode {
        match StructureCode::from_bits(self.0) {
            Some(code) => code,
            None => StructureCode::Scalar,
        }
    }

    pub const fn exception(self) -> ExceptionCode {
        match ExceptionCode::from_bits(self.0) {
            Some(code) => code,
            None => ExceptionCode::None,
        }
    }

    pub const fn user_code(self) -> Option<UserCode> {
        let bits = self.0 & UserCode::MASK;
        if bits == 0 {
            None
        } else {
            Some(UserCode(bits))
        }
    }

    /// Replace the exception field, keeping the other three.
    #[must_use]
    pub const fn with_exception(self, exception: ExceptionCode) -> Self {
        CompositeCode((self.0 & !ExceptionCode::MASK) | exception.bits())
    }
}

impl fmt::Debug for CompositeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeCode")
            .field("bits", &format_args!("{:#010X}", self.0))
            .field("type", &self.type_code())
            .field("structure", &self.structure())
            .field("exception", &self.exception())
            .field("user", &self.user_code().map(UserCode::ordinal))
            .finish()
    }
}

impl fmt::Display for CompositeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#X}", self.0)
    }
}
