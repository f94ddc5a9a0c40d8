//! rdx IR - value model shared by every stage of the rdx bridge.
//!
//! This crate provides:
//! - Source values (`HostValue`, `HostArray`, `ElementClass`) as a closed union
//!   of every shape the encoder recognizes
//! - Target primitives (`RKind`, `Scalar`, `Buffer`) and their missing-value
//!   sentinels
//! - Composite codes (`TypeCode`, `StructureCode`, `ExceptionCode`, `UserCode`,
//!   `CompositeCode`)
//! - The encoder's output (`EncodedValue`, `Payload`, `Composite`)
//!
//! # Encoded Value Invariants
//!
//! `EncodedValue` fields are private; the factory methods are the only way to
//! build one, so a VECTOR always carries a one-element dimension vector, an
//! ND_ARRAY always carries two or more, and every other structure carries none.

mod buffer;
mod codes;
mod encoded;
mod host;
pub mod na;
mod order;

pub use buffer::{Buffer, RKind, Scalar};
pub use codes::{CompositeCode, ExceptionCode, StructureCode, TypeCode, UserCode};
pub use encoded::{Composite, Dims, EncodedValue, Payload, PayloadError};
pub use host::{ElementClass, HostArray, HostValue, Slots};
pub use order::{ArrayOrder, ParseArrayOrderError};

// Re-exported so downstream crates build source values without naming the
// numeric crates themselves.
pub use num_bigint::BigInt;
pub use rust_decimal::Decimal;
