//! Encoder configuration.

use rdx_ir::ArrayOrder;

/// Environment variable naming the default [`ArrayOrder`].
pub const ARRAY_ORDER_ENV: &str = "RDX_ARRAY_ORDER";

/// Environment variable holding the batch size at which
/// [`Encoder::encode_all`](crate::Encoder::encode_all) goes parallel.
pub const PARALLEL_THRESHOLD_ENV: &str = "RDX_PARALLEL_THRESHOLD";

pub const DEFAULT_PARALLEL_THRESHOLD: usize = 64;

/// Settings shared by every value one [`Encoder`](crate::Encoder) converts.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EncoderConfig {
    /// Layout of every multi-dimensional buffer produced during a call.
    pub array_order: ArrayOrder,
    /// Minimum batch size for parallel batch encoding.
    pub parallel_threshold: usize,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        EncoderConfig {
            array_order: ArrayOrder::RowMajor,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl EncoderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_array_order(mut self, array_order: ArrayOrder) -> Self {
        self.array_order = array_order;
        self
    }

    #[must_use]
    pub fn with_parallel_threshold(mut self, parallel_threshold: usize) -> Self {
        self.parallel_threshold = parallel_threshold;
        self
    }

    /// Read the configuration from the process environment.
    ///
    /// Unset or unparsable variables keep their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(ARRAY_ORDER_ENV) {
            match raw.parse::<ArrayOrder>() {
                Ok(order) => config.array_order = order,
                Err(err) => {
                    tracing::debug!(%err, "ignoring {ARRAY_ORDER_ENV}");
                }
            }
        }

        if let Some(raw) = lookup(PARALLEL_THRESHOLD_ENV) {
            match raw.trim().parse::<usize>() {
                Ok(threshold) => config.parallel_threshold = threshold,
                Err(err) => {
                    tracing::debug!(%err, value = %raw, "ignoring {PARALLEL_THRESHOLD_ENV}");
                }
            }
        }

        config
    }
}

#[cfg(test)]
mod tests;
