//! The encoder: one recursive pass from a source value to an encoded value.
//!
//! Dispatch is by source shape:
//!
//! - scalars map one to one onto target scalars
//! - rectangular arrays of a primitive element class become a VECTOR (rank 1)
//!   or an ND_ARRAY laid out under the configured [`ArrayOrder`]
//! - ragged arrays and arrays of `Object` are treated as collections of
//!   their outermost elements
//! - collections vectorize when they hold only scalars, and are otherwise
//!   classified from their encoded elements (see [`classify`])
//! - maps become NAMED_LIST, or DATA_FRAME when every value is a VECTOR of
//!   one length
//! - error objects become an EXCEPTION-tagged character scalar

use rayon::prelude::*;
use rdx_ir::{ArrayOrder, EncodedValue, HostArray, HostValue, StructureCode, UserCode};
use rdx_layout::{flatten_buffer, inspect, leaves};
use rustc_hash::FxHashSet;

use crate::classify::classify;
use crate::coerce::{last_warning, tag_warning, to_scalar, vectorize, BufferBuilder};
use crate::config::EncoderConfig;
use crate::errors::{
    duplicate_key, element_mismatch, non_string_key, unsupported_type, user_code_out_of_range,
    EncodeResult,
};
use crate::stack::ensure_sufficient_stack;

/// Converts source values under one configuration.
///
/// Encoding holds no state between calls, so one encoder can be shared
/// across threads.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Encoder {
    config: EncoderConfig,
}

impl Encoder {
    pub fn new(config: EncoderConfig) -> Self {
        Encoder { config }
    }

    /// Encoder with the default configuration and the given array order.
    pub fn with_array_order(array_order: ArrayOrder) -> Self {
        Encoder::new(EncoderConfig::default().with_array_order(array_order))
    }

    #[inline]
    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    #[inline]
    pub fn array_order(&self) -> ArrayOrder {
        self.config.array_order
    }

    #[tracing::instrument(level = "trace", skip_all, fields(class = value.type_name()))]
    pub fn encode(&self, value: &HostValue) -> EncodeResult {
        match value {
            HostValue::Null => Ok(EncodedValue::null()),
            HostValue::Bool(_)
            | HostValue::Byte(_)
            | HostValue::Short(_)
            | HostValue::Int(_)
            | HostValue::Long(_)
            | HostValue::Float(_)
            | HostValue::Double(_)
            | HostValue::BigInteger(_)
            | HostValue::BigDecimal(_)
            | HostValue::Char(_)
            | HostValue::Str(_) => to_scalar(value)
                .map(EncodedValue::scalar)
                .ok_or_else(|| unsupported_type(value)),
            HostValue::Map(entries) => self.encode_map(entries),
            HostValue::Collection(items) => self.encode_items(items),
            HostValue::Array(array) => self.encode_array(array),
            HostValue::Error(message) => Ok(EncodedValue::error_object(message.as_str())),
            HostValue::Object { .. } => Err(unsupported_type(value)),
        }
    }

    /// Encode independent values. Batches of at least
    /// [`parallel_threshold`](EncoderConfig::parallel_threshold) values are
    /// spread over the rayon pool. Results keep the input order.
    pub fn encode_all(&self, values: &[HostValue]) -> Vec<EncodeResult> {
        if values.len() >= self.config.parallel_threshold {
            tracing::debug!(len = values.len(), "encoding batch in parallel");
            values.par_iter().map(|value| self.encode(value)).collect()
        } else {
            values.iter().map(|value| self.encode(value)).collect()
        }
    }

    fn encode_child(&self, value: &HostValue) -> EncodeResult {
        ensure_sufficient_stack(|| self.encode(value))
    }

    fn encode_items(&self, items: &[HostValue]) -> EncodeResult {
        if items.is_empty() {
            return Ok(EncodedValue::list(Vec::new()));
        }
        if let Some((buffer, warning)) = vectorize(items) {
            return Ok(tag_warning(EncodedValue::vector(buffer), warning));
        }
        let elements = items
            .iter()
            .map(|item| self.encode_child(item))
            .collect::<EncodeResult<Vec<_>>>()?;
        classify(elements, self.config.array_order)
    }

    #[tracing::instrument(level = "trace", skip_all, fields(element = %array.element(), rank = array.rank()))]
    fn encode_array(&self, array: &HostArray) -> EncodeResult {
        let element = array.element();
        let (Some(kind), Some(shape)) = (element.kind(), inspect(array)) else {
            tracing::debug!("array is ragged or untyped, encoding its elements");
            return self.encode_items(&array.to_values());
        };

        let leaves = leaves(array);
        let mut builder = BufferBuilder::new(kind, leaves.len());
        for leaf in leaves {
            if !element.accepts(leaf) || !builder.push(leaf) {
                return Err(element_mismatch(element, leaf));
            }
        }
        let (buffer, warning) = builder.finish();

        let encoded = if shape.rank() == 1 {
            EncodedValue::vector(buffer)
        } else {
            let (flat, dims) = flatten_buffer(&buffer, &shape.dims, self.config.array_order)?;
            EncodedValue::nd_array(flat, dims)?
        };
        Ok(tag_warning(encoded, warning))
    }

    fn encode_map(&self, entries: &[(HostValue, HostValue)]) -> EncodeResult {
        let mut seen = FxHashSet::default();
        let mut names = Vec::with_capacity(entries.len());
        let mut values = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            let HostValue::Str(name) = key else {
                return Err(non_string_key(key));
            };
            if !seen.insert(name.as_str()) {
                return Err(duplicate_key(name));
            }
            names.push(name.clone());
            values.push(self.encode_child(value)?);
        }

        let warning = last_warning(&values);
        let encoded = if is_column_set(&values) {
            tracing::debug!(columns = values.len(), "map read as a table");
            EncodedValue::data_frame(names, values)
        } else {
            EncodedValue::named_list(names, values)
        };
        Ok(tag_warning(encoded, warning))
    }
}

/// More than one value, every one a VECTOR of the same length.
fn is_column_set(values: &[EncodedValue]) -> bool {
    let Some(first) = values.first() else {
        return false;
    };
    values.len() > 1
        && values
            .iter()
            .all(|v| v.structure() == StructureCode::Vector && v.dims() == first.dims())
}

/// Encode `value` with the default configuration.
pub fn encode(value: &HostValue) -> EncodeResult {
    Encoder::default().encode(value)
}

/// Encode `value`, laying out every multi-dimensional buffer under `order`.
pub fn encode_with(value: &HostValue, order: ArrayOrder) -> EncodeResult {
    Encoder::with_array_order(order).encode(value)
}

/// Wrap `value` unclassified under a caller-assigned user code.
///
/// `user_code` must lie in `0x0100_0000..=0x7F00_0000` with its low 24 bits
/// clear.
pub fn encode_user_defined(value: HostValue, user_code: i32) -> EncodeResult {
    let user = UserCode::new(user_code).ok_or_else(|| user_code_out_of_range(user_code))?;
    Ok(EncodedValue::user_defined(value, user))
}
