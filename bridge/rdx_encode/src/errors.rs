//! Fatal encoding errors.
//!
//! Advisory conditions (missing logicals and raw bytes) are not errors: they
//! travel on the encoded value's exception code. Everything here aborts the
//! conversion.

use rdx_ir::{ElementClass, EncodedValue, HostValue, PayloadError};
use rdx_layout::LayoutError;
use thiserror::Error;

/// Result of encoding.
pub type EncodeResult<T = EncodedValue> = Result<T, EncodeError>;

#[derive(Clone, Debug, PartialEq, Error)]
pub enum EncodeError {
    #[error("values of class '{class_name}' have no target representation")]
    UnsupportedType { class_name: String },

    #[error("map keys must be strings, found a {found} key")]
    NonStringKey { found: String },

    #[error("map key '{key}' appears more than once")]
    DuplicateKey { key: String },

    #[error(
        "user-defined code {code:#010X} is outside 0x01000000..=0x7F000000 or sets bits below 0x01000000"
    )]
    UserCodeOutOfRange { code: i32 },

    #[error("{element} array holds a {found} element")]
    ElementMismatch {
        element: ElementClass,
        found: String,
    },

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Payload(#[from] PayloadError),
}

#[cold]
pub fn unsupported_type(value: &HostValue) -> EncodeError {
    EncodeError::UnsupportedType {
        class_name: value.type_name().to_owned(),
    }
}

#[cold]
pub fn non_string_key(key: &HostValue) -> EncodeError {
    EncodeError::NonStringKey {
        found: key.type_name().to_owned(),
    }
}

#[cold]
pub fn duplicate_key(key: &str) -> EncodeError {
    EncodeError::DuplicateKey {
        key: key.to_owned(),
    }
}

#[cold]
pub fn user_code_out_of_range(code: i32) -> EncodeError {
    EncodeError::UserCodeOutOfRange { code }
}

#[cold]
pub fn element_mismatch(element: ElementClass, found: &HostValue) -> EncodeError {
    EncodeError::ElementMismatch {
        element,
        found: found.type_name().to_owned(),
    }
}
