//! Property-based tests for the encoder.
//!
//! 1. A collection of numeric scalars takes the widest kind present, and
//!    only an all-null collection fails to vectorize.
//! 2. A rectangular array encodes to its flattened buffer under the permuted
//!    dimensions, and reads back through `unflatten`.
//! 3. A collection of same-shaped arrays encodes exactly like the one array
//!    with an extra leading dimension.
//! 4. Batch encoding equals encoding one value at a time.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use proptest::prelude::*;
use rdx_encode::{encode_with, Encoder, EncoderConfig};
use rdx_ir::{ArrayOrder, ElementClass, HostArray, HostValue, StructureCode, TypeCode};
use rdx_layout::{flatten, permute_dims, unflatten};

// -- Strategies --

fn order_strategy() -> impl Strategy<Value = ArrayOrder> {
    prop::sample::select(ArrayOrder::ALL.to_vec())
}

/// Numeric-family scalars and nulls.
fn number_strategy() -> impl Strategy<Value = HostValue> {
    prop_oneof![
        Just(HostValue::Null),
        any::<u8>().prop_map(HostValue::Byte),
        any::<i16>().prop_map(HostValue::Short),
        (-1000i32..1000).prop_map(HostValue::Int),
        (-1000i64..1000).prop_map(HostValue::Long),
        (-1.0e6f64..1.0e6).prop_map(HostValue::Double),
    ]
}

fn sub_dims_strategy() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(1usize..4, 1..4)
}

// -- Helpers --

fn expected_type(items: &[HostValue]) -> Option<TypeCode> {
    let has = |pred: fn(&HostValue) -> bool| items.iter().any(pred);
    if has(|v| matches!(v, HostValue::Long(_) | HostValue::Double(_))) {
        Some(TypeCode::Numeric)
    } else if has(|v| matches!(v, HostValue::Int(_) | HostValue::Short(_))) {
        Some(TypeCode::Integer)
    } else if has(|v| matches!(v, HostValue::Byte(_))) {
        Some(TypeCode::Raw)
    } else {
        None
    }
}

fn int_array(dims: &[usize], first: i32) -> HostArray {
    let len: usize = dims.iter().product();
    let leaves = (0..len as i32).map(|i| HostValue::Int(first + i)).collect();
    HostArray::from_row_major(ElementClass::Int, dims, leaves).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 256, ..ProptestConfig::default() })]

    #[test]
    fn prop_number_collections_take_widest_kind(
        items in prop::collection::vec(number_strategy(), 1..12),
        order in order_strategy(),
    ) {
        let encoded = encode_with(&HostValue::list(items.clone()), order).unwrap();
        match expected_type(&items) {
            Some(type_code) => {
                prop_assert_eq!(encoded.type_code(), type_code);
                prop_assert_eq!(encoded.structure(), StructureCode::Vector);
                prop_assert_eq!(encoded.dims().map(<[usize]>::to_vec), Some(vec![items.len()]));
            }
            None => {
                prop_assert_eq!(encoded.structure(), StructureCode::List);
                prop_assert_eq!(encoded.try_composite().unwrap().len(), items.len());
            }
        }
    }

    #[test]
    fn prop_array_encodes_to_its_flat_layout(
        dims in prop::collection::vec(1usize..5, 1..5),
        order in order_strategy(),
    ) {
        let array = int_array(&dims, 0);
        let nested: Vec<i32> = (0..dims.iter().product::<usize>() as i32).collect();
        let encoded = encode_with(&array.into(), order).unwrap();

        let (expected, permuted) = flatten(&nested, &dims, order).unwrap();
        prop_assert_eq!(encoded.dims(), Some(permuted.as_slice()));
        prop_assert_eq!(encoded.try_i32_slice(), Some(expected.as_slice()));
        let again = permute_dims(&dims, order);
        prop_assert_eq!(again.as_slice(), permuted.as_slice());

        let back = unflatten(encoded.try_i32_slice().unwrap(), &dims, order).unwrap();
        prop_assert_eq!(back, nested);
    }

    #[test]
    fn prop_collection_of_arrays_matches_nested_array(
        count in 1usize..4,
        sub_dims in sub_dims_strategy(),
        order in order_strategy(),
    ) {
        let sub_len: usize = sub_dims.iter().product();
        let parts: Vec<HostValue> = (0..count)
            .map(|i| int_array(&sub_dims, (i * sub_len) as i32).into())
            .collect();
        let mut dims = vec![count];
        dims.extend_from_slice(&sub_dims);
        let whole = int_array(&dims, 0);

        let stacked = encode_with(&HostValue::list(parts), order).unwrap();
        let direct = encode_with(&whole.into(), order).unwrap();
        if count == 1 && sub_dims.len() == 1 {
            // A one-element collection of a vector is still stacked.
            prop_assert_eq!(stacked.structure(), StructureCode::NdArray);
        }
        prop_assert_eq!(stacked, direct);
    }

    #[test]
    fn prop_batch_equals_sequential(
        batch in prop::collection::vec(
            prop::collection::vec(number_strategy(), 0..4).prop_map(HostValue::list),
            0..20,
        ),
        threshold in 0usize..8,
    ) {
        let encoder = Encoder::new(EncoderConfig::default().with_parallel_threshold(threshold));
        let parallel = encoder.encode_all(&batch);
        let sequential: Vec<_> = batch.iter().map(|v| encoder.encode(v)).collect();
        prop_assert_eq!(parallel, sequential);
    }
}
