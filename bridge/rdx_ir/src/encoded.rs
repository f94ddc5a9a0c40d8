//! Encoder output.
//!
//! An `EncodedValue` is an immutable (code, dims, payload) triple. The fields
//! are private and every constructor keeps them consistent:
//!
//! | structure     | dims              | payload                     |
//! |---------------|-------------------|-----------------------------|
//! | SCALAR        | none              | empty, scalar or message    |
//! | VECTOR        | `[len]`           | buffer                      |
//! | ND_ARRAY      | two or more       | buffer, column-major        |
//! | LIST          | none              | composite, no names         |
//! | NAMED_LIST    | none              | composite, names            |
//! | DATA_FRAME    | none              | composite of VECTOR columns |
//! | USER_DEFINED  | none              | source value                |

use smallvec::SmallVec;
use thiserror::Error;

use crate::buffer::{Buffer, Scalar};
use crate::codes::{CompositeCode, ExceptionCode, StructureCode, TypeCode, UserCode};
use crate::host::HostValue;

/// Dimension vector, outermost first, always in column-major semantics.
pub type Dims = SmallVec<[usize; 4]>;

/// Error reading or building a payload.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PayloadError {
    #[error("expected {expected} payload, found {found}")]
    WrongKind {
        expected: &'static str,
        found: &'static str,
    },
    #[error("dimensions {dims:?} do not describe a buffer of length {len}")]
    ShapeMismatch { dims: Vec<usize>, len: usize },
}

/// Payload of an encoded value.
#[derive(Clone, Debug, PartialEq)]
pub enum Payload {
    /// NULL, and structures that carry nothing.
    Empty,
    Scalar(Scalar),
    Buffer(Buffer),
    Composite(Composite),
    /// The untouched source value of a user-defined encoding.
    UserDefined(Box<HostValue>),
}

impl Payload {
    /// Short description for error messages.
    pub fn describe(&self) -> &'static str {
        match self {
            Payload::Empty => "empty",
            Payload::Scalar(s) => match s {
                Scalar::Numeric(_) => "numeric scalar",
                Scalar::Integer(_) => "integer scalar",
                Scalar::Character(_) => "character scalar",
                Scalar::Logical(_) => "logical scalar",
                Scalar::Raw(_) => "raw scalar",
            },
            Payload::Buffer(b) => match b {
                Buffer::Numeric(_) => "numeric buffer",
                Buffer::Integer(_) => "integer buffer",
                Buffer::Character(_) => "character buffer",
                Buffer::Logical(_) => "logical buffer",
                Buffer::Raw(_) => "raw buffer",
            },
            Payload::Composite(_) => "composite",
            Payload::UserDefined(_) => "user-defined",
        }
    }
}

/// Ordered child values, optionally named.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Composite {
    elements: Vec<EncodedValue>,
    names: Option<Vec<String>>,
}

impl Composite {
    #[inline]
    pub fn elements(&self) -> &[EncodedValue] {
        &self.elements
    }

    #[inline]
    pub fn names(&self) -> Option<&[String]> {
        self.names.as_deref()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Per-element composite codes, in order.
    pub fn codes(&self) -> Vec<CompositeCode> {
        self.elements.iter().map(EncodedValue::code).collect()
    }

    /// Per-element payloads, in order.
    pub fn payloads(&self) -> impl Iterator<Item = &Payload> {
        self.elements.iter().map(EncodedValue::payload)
    }

    /// Element whose name is `name`.
    pub fn get(&self, name: &str) -> Option<&EncodedValue> {
        let names = self.names.as_ref()?;
        let index = names.iter().position(|n| n == name)?;
        self.elements.get(index)
    }

    pub fn into_parts(mut self) -> (Vec<EncodedValue>, Option<Vec<String>>) {
        (
            std::mem::take(&mut self.elements),
            std::mem::take(&mut self.names),
        )
    }
}

/// Nested composites are released from a worklist, so dropping a deeply
/// nested value uses constant stack.
impl Drop for Composite {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.elements);
        while let Some(child) = pending.pop() {
            if let Payload::Composite(mut nested) = child.into_payload() {
                pending.append(&mut nested.elements);
            }
        }
    }
}

/// A fully encoded value.
#[derive(Clone, Debug, PartialEq)]
pub struct EncodedValue {
    code: CompositeCode,
    dims: Option<Dims>,
    payload: Payload,
    /// Set on NAMED_LIST values whose every element is a SCALAR.
    named_scalar_record: bool,
}

// Constructors

impl EncodedValue {
    fn new(code: CompositeCode, dims: Option<Dims>, payload: Payload) -> Self {
        EncodedValue {
            code,
            dims,
            payload,
            named_scalar_record: false,
        }
    }

    /// NULL scalar with no payload.
    pub fn null() -> Self {
        Self::new(
            CompositeCode::of(TypeCode::Null, StructureCode::Scalar),
            None,
            Payload::Empty,
        )
    }

    pub fn scalar(value: Scalar) -> Self {
        let code = CompositeCode::of(value.kind().type_code(), StructureCode::Scalar);
        Self::new(code, None, Payload::Scalar(value))
    }

    /// One-dimensional buffer.
    pub fn vector(buffer: Buffer) -> Self {
        let code = CompositeCode::of(buffer.kind().type_code(), StructureCode::Vector);
        let dims = smallvec::smallvec![buffer.len()];
        Self::new(code, Some(dims), Payload::Buffer(buffer))
    }

    /// Multi-dimensional buffer. `dims` must have at least two entries whose
    /// product is the buffer length.
    pub fn nd_array(buffer: Buffer, dims: Dims) -> Result<Self, PayloadError> {
        let product: usize = dims.iter().product();
        if dims.len() < 2 || product != buffer.len() {
            return Err(PayloadError::ShapeMismatch {
                dims: dims.to_vec(),
                len: buffer.len(),
            });
        }
        let code = CompositeCode::of(buffer.kind().type_code(), StructureCode::NdArray);
        Ok(Self::new(code, Some(dims), Payload::Buffer(buffer)))
    }

    /// Opaque heterogeneous list.
    pub fn list(elements: Vec<EncodedValue>) -> Self {
        Self::new(
            CompositeCode::of(TypeCode::Other, StructureCode::List),
            None,
            Payload::Composite(Composite {
                elements,
                names: None,
            }),
        )
    }

    /// Key-ordered list. `names` and `elements` pair up positionally.
    pub fn named_list(names: Vec<String>, elements: Vec<EncodedValue>) -> Self {
        debug_assert_eq!(names.len(), elements.len());
        let named_scalar_record = !elements.is_empty()
            && elements
                .iter()
                .all(|e| e.structure() == StructureCode::Scalar);
        let mut value = Self::new(
            CompositeCode::of(TypeCode::Other, StructureCode::NamedList),
            None,
            Payload::Composite(Composite {
                elements,
                names: Some(names),
            }),
        );
        value.named_scalar_record = named_scalar_record;
        value
    }

    /// Table of named columns; each column is a VECTOR of the row count.
    pub fn data_frame(names: Vec<String>, columns: Vec<EncodedValue>) -> Self {
        debug_assert_eq!(names.len(), columns.len());
        Self::new(
            CompositeCode::of(TypeCode::Other, StructureCode::DataFrame),
            None,
            Payload::Composite(Composite {
                elements: columns,
                names: Some(names),
            }),
        )
    }

    /// Encoded error object carrying its message.
    pub fn error_object(message: impl Into<String>) -> Self {
        Self::new(
            CompositeCode::new(
                TypeCode::Other,
                StructureCode::Scalar,
                ExceptionCode::Exception,
                None,
            ),
            None,
            Payload::Scalar(Scalar::Character(Some(message.into()))),
        )
    }

    /// Source value passed through unclassified under a caller tag.
    pub fn user_defined(value: HostValue, user: UserCode) -> Self {
        Self::new(
            CompositeCode::new(
                TypeCode::Other,
                StructureCode::UserDefined,
                ExceptionCode::None,
                Some(user),
            ),
            None,
            Payload::UserDefined(Box::new(value)),
        )
    }

    /// Replace the exception field of the code.
    #[must_use]
    pub fn with_exception(mut self, exception: ExceptionCode) -> Self {
        self.code = self.code.with_exception(exception);
        self
    }
}

// Accessors

impl EncodedValue {
    #[inline]
    pub fn code(&self) -> CompositeCode {
        self.code
    }

    #[inline]
    pub fn type_code(&self) -> TypeCode {
        self.code.type_code()
    }

    #[inline]
    pub fn structure(&self) -> StructureCode {
        self.code.structure()
    }

    #[inline]
    pub fn exception(&self) -> ExceptionCode {
        self.code.exception()
    }

    #[inline]
    pub fn user_code(&self) -> Option<UserCode> {
        self.code.user_code()
    }

    /// Dimension vector; present only on VECTOR and ND_ARRAY.
    #[inline]
    pub fn dims(&self) -> Option<&[usize]> {
        self.dims.as_deref()
    }

    #[inline]
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    #[inline]
    pub fn is_named_scalar_record(&self) -> bool {
        self.named_scalar_record
    }

    pub fn into_payload(self) -> Payload {
        self.payload
    }

    pub fn try_scalar(&self) -> Option<&Scalar> {
        match &self.payload {
            Payload::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn try_buffer(&self) -> Option<&Buffer> {
        match &self.payload {
            Payload::Buffer(b) => Some(b),
            _ => None,
        }
    }

    pub fn try_composite(&self) -> Option<&Composite> {
        match &self.payload {
            Payload::Composite(c) => Some(c),
            _ => None,
        }
    }

    pub fn try_user_defined(&self) -> Option<&HostValue> {
        match &self.payload {
            Payload::UserDefined(v) => Some(&**v),
            _ => None,
        }
    }

    /// Message of an encoded error object.
    pub fn try_message(&self) -> Option<&str> {
        if self.exception() != ExceptionCode::Exception {
            return None;
        }
        match &self.payload {
            Payload::Scalar(Scalar::Character(Some(s))) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn try_f64(&self) -> Option<f64> {
        match self.try_scalar()? {
            Scalar::Numeric(v) => Some(*v),
            _ => None,
        }
    }

    pub fn try_i32(&self) -> Option<i32> {
        match self.try_scalar()? {
            Scalar::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Character scalar; the inner `None` is a missing value.
    pub fn try_str(&self) -> Option<Option<&str>> {
        match self.try_scalar()? {
            Scalar::Character(v) => Some(v.as_deref()),
            _ => None,
        }
    }

    pub fn try_bool(&self) -> Option<bool> {
        match self.try_scalar()? {
            Scalar::Logical(v) => Some(*v),
            _ => None,
        }
    }

    pub fn try_u8(&self) -> Option<u8> {
        match self.try_scalar()? {
            Scalar::Raw(v) => Some(*v),
            _ => None,
        }
    }

    pub fn try_f64_slice(&self) -> Option<&[f64]> {
        match self.try_buffer()? {
            Buffer::Numeric(v) => Some(v.as_slice()),
            _ => None,
        }
    }

    pub fn try_i32_slice(&self) -> Option<&[i32]> {
        match self.try_buffer()? {
            Buffer::Integer(v) => Some(v.as_slice()),
            _ => None,
        }
    }

    pub fn try_str_slice(&self) -> Option<&[Option<String>]> {
        match self.try_buffer()? {
            Buffer::Character(v) => Some(v.as_slice()),
            _ => None,
        }
    }

    pub fn try_bool_slice(&self) -> Option<&[bool]> {
        match self.try_buffer()? {
            Buffer::Logical(v) => Some(v.as_slice()),
            _ => None,
        }
    }

    pub fn try_u8_slice(&self) -> Option<&[u8]> {
        match self.try_buffer()? {
            Buffer::Raw(v) => Some(v.as_slice()),
            _ => None,
        }
    }
}

// Checked accessors

impl EncodedValue {
    #[cold]
    fn wrong_kind(&self, expected: &'static str) -> PayloadError {
        PayloadError::WrongKind {
            expected,
            found: self.payload.describe(),
        }
    }

    pub fn as_scalar(&self) -> Result<&Scalar, PayloadError> {
        self.try_scalar().ok_or_else(|| self.wrong_kind("scalar"))
    }

    pub fn as_buffer(&self) -> Result<&Buffer, PayloadError> {
        self.try_buffer().ok_or_else(|| self.wrong_kind("buffer"))
    }

    pub fn as_composite(&self) -> Result<&Composite, PayloadError> {
        self.try_composite().ok_or_else(|| self.wrong_kind("composite"))
    }

    pub fn as_user_defined(&self) -> Result<&HostValue, PayloadError> {
        self.try_user_defined()
            .ok_or_else(|| self.wrong_kind("user-defined"))
    }

    pub fn as_f64(&self) -> Result<f64, PayloadError> {
        self.try_f64().ok_or_else(|| self.wrong_kind("numeric scalar"))
    }

    pub fn as_i32(&self) -> Result<i32, PayloadError> {
        self.try_i32().ok_or_else(|| self.wrong_kind("integer scalar"))
    }

    pub fn as_str(&self) -> Result<Option<&str>, PayloadError> {
        self.try_str().ok_or_else(|| self.wrong_kind("character scalar"))
    }

    pub fn as_bool(&self) -> Result<bool, PayloadError> {
        self.try_bool().ok_or_else(|| self.wrong_kind("logical scalar"))
    }

    pub fn as_u8(&self) -> Result<u8, PayloadError> {
        self.try_u8().ok_or_else(|| self.wrong_kind("raw scalar"))
    }

    pub fn as_f64_slice(&self) -> Result<&[f64], PayloadError> {
        self.try_f64_slice()
            .ok_or_else(|| self.wrong_kind("numeric buffer"))
    }

    pub fn as_i32_slice(&self) -> Result<&[i32], PayloadError> {
        self.try_i32_slice()
            .ok_or_else(|| self.wrong_kind("integer buffer"))
    }

    pub fn as_str_slice(&self) -> Result<&[Option<String>], PayloadError> {
        self.try_str_slice()
            .ok_or_else(|| self.wrong_kind("character buffer"))
    }

    pub fn as_bool_slice(&self) -> Result<&[bool], PayloadError> {
        self.try_bool_slice()
            .ok_or_else(|| self.wrong_kind("logical buffer"))
    }

    pub fn as_u8_slice(&self) -> Result<&[u8], PayloadError> {
        self.try_u8_slice()
            .ok_or_else(|| self.wrong_kind("raw buffer"))
    }
}

#[cfg(test)]
mod tests;
