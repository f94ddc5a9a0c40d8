//! Missing-value sentinels of the target runtime.
//!
//! Numeric and integer vectors reserve one value each to mean "missing".
//! Logical and raw vectors have no representation the bridge can produce, so
//! missing values are substituted with a default and the result is tagged
//! with a warning (see `ExceptionCode`).

/// Missing numeric: a NaN with payload 1954.
pub const NA_REAL: f64 = f64::from_bits(0x7FF0_0000_0000_07A2);

/// Missing integer.
pub const NA_INTEGER: i32 = i32::MIN;

/// Value substituted for a missing logical.
pub const NA_LOGICAL_DEFAULT: bool = false;

/// Value substituted for a missing raw byte.
pub const NA_RAW_DEFAULT: u8 = 0;

/// Check for the numeric sentinel specifically, as opposed to any NaN.
#[inline]
pub fn is_na_real(value: f64) -> bool {
    value.to_bits() == NA_REAL.to_bits()
}

#[inline]
pub fn is_na_integer(value: i32) -> bool {
    value == NA_INTEGER
}
