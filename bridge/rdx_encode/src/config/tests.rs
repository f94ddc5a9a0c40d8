#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use super::*;
use pretty_assertions::assert_eq;

fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
    move |name: &str| {
        vars.iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| (*value).to_owned())
    }
}

#[test]
fn test_defaults() {
    let config = EncoderConfig::default();
    assert_eq!(config.array_order, ArrayOrder::RowMajor);
    assert_eq!(config.parallel_threshold, DEFAULT_PARALLEL_THRESHOLD);
    assert_eq!(EncoderConfig::from_lookup(|_| None), config);
}

#[test]
fn test_builders() {
    let config = EncoderConfig::new()
        .with_array_order(ArrayOrder::ColumnMinor)
        .with_parallel_threshold(2);
    assert_eq!(config.array_order, ArrayOrder::ColumnMinor);
    assert_eq!(config.parallel_threshold, 2);
}

#[test]
fn test_reads_both_variables() {
    let vars = [
        (ARRAY_ORDER_ENV, "Column-Major"),
        (PARALLEL_THRESHOLD_ENV, " 8 "),
    ];
    let config = EncoderConfig::from_lookup(lookup(&vars));
    assert_eq!(config.array_order, ArrayOrder::ColumnMajor);
    assert_eq!(config.parallel_threshold, 8);
}

#[test]
fn test_bad_values_keep_defaults() {
    let vars = [
        (ARRAY_ORDER_ENV, "sideways"),
        (PARALLEL_THRESHOLD_ENV, "-3"),
    ];
    assert_eq!(
        EncoderConfig::from_lookup(lookup(&vars)),
        EncoderConfig::default()
    );
}
