//! rdx Encode - converts source values into target-runtime values.
//!
//! The entry points are [`encode`], [`encode_with`] and
//! [`encode_user_defined`], or an [`Encoder`] built from an
//! [`EncoderConfig`] for repeated and batch use.
//!
//! # Result
//!
//! Every call returns a fresh [`EncodedValue`](rdx_ir::EncodedValue): a
//! composite code, an optional dimension vector and a payload. Missing
//! logical and raw values are substituted and reported through the code's
//! exception field; only values with no target representation are errors
//! (see [`EncodeError`]).
//!
//! # Tracing
//!
//! Set `RUST_LOG=rdx_encode=debug` and call [`init_tracing`] to see which
//! structure each collection and map was given and why a detector gave up.

mod classify;
mod coerce;
mod config;
mod encoder;
mod errors;
mod stack;

pub use classify::{classify, ArrayDetector, TableDetector};
pub use coerce::{scalar_kind, to_scalar, vectorize, BufferBuilder};
pub use config::{
    EncoderConfig, ARRAY_ORDER_ENV, DEFAULT_PARALLEL_THRESHOLD, PARALLEL_THRESHOLD_ENV,
};
pub use encoder::{encode, encode_user_defined, encode_with, Encoder};
pub use errors::{EncodeError, EncodeResult};
pub use stack::ensure_sufficient_stack;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install a `fmt` subscriber filtered by `RUST_LOG`.
///
/// Does nothing unless `RUST_LOG` is set, and only the first call has any
/// effect.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}
