#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use super::*;
use pretty_assertions::assert_eq;

/// An int array of declared `rank` allocated with the given leading extents;
/// levels past `sizes` are null, like `new int[2][3][][]`.
fn alloc(sizes: &[usize], rank: usize) -> HostArray {
    let (&len, rest) = sizes.split_first().unwrap();
    if rank == 1 {
        return HostArray::ints(vec![0; len]);
    }
    let rows = (0..len)
        .map(|_| (!rest.is_empty()).then(|| alloc(rest, rank - 1)))
        .collect();
    HostArray::nested(ElementClass::Int, rank, rows).unwrap()
}

fn dims_of(array: &HostArray) -> Option<Vec<usize>> {
    inspect(array).map(|shape| shape.dims.to_vec())
}

fn rows(rank: usize, rows: Vec<Option<HostArray>>) -> HostArray {
    HostArray::nested(ElementClass::Int, rank, rows).unwrap()
}

#[test]
fn test_vector_shape() {
    assert_eq!(dims_of(&HostArray::ints([])), Some(vec![0]));
    assert_eq!(dims_of(&HostArray::ints([1, 2, 3])), Some(vec![3]));
    let shape = inspect(&HostArray::doubles([1.0])).map(|s| s.element);
    assert_eq!(shape, Some(ElementClass::Double));
}

#[test]
fn test_leading_zero_is_all_zeros() {
    for sizes in [
        &[0][..],
        &[0, 0],
        &[0, 1],
        &[0, 2, 2],
        &[0, 0, 0, 1],
        &[0, 1, 2, 2],
        &[0, 2, 0, 2],
    ] {
        assert_eq!(dims_of(&alloc(sizes, 4)), Some(vec![0, 0, 0, 0]), "{sizes:?}");
    }
}

#[test]
fn test_inner_zero_short_circuits() {
    let cases: &[(&[usize], Option<&[usize]>)] = &[
        (&[1, 0], Some(&[1, 0, 0, 0])),
        (&[1, 0, 2, 2], Some(&[1, 0, 0, 0])),
        (&[1, 1, 0], Some(&[1, 1, 0, 0])),
        (&[1, 2, 0, 2], Some(&[1, 2, 0, 0])),
        (&[2, 0, 1], Some(&[2, 0, 0, 0])),
        (&[2, 1, 0, 1], Some(&[2, 1, 0, 0])),
        (&[2, 2, 1, 0], Some(&[2, 2, 1, 0])),
        (&[2, 2, 2, 0], Some(&[2, 2, 2, 0])),
    ];
    for (sizes, expected) in cases {
        assert_eq!(
            dims_of(&alloc(sizes, 4)),
            expected.map(<[usize]>::to_vec),
            "{sizes:?}"
        );
    }
}

#[test]
fn test_null_sub_arrays_are_ragged() {
    for sizes in [&[1][..], &[1, 1], &[1, 1, 1], &[1, 2, 2], &[2], &[2, 2], &[2, 1, 2]] {
        assert_eq!(dims_of(&alloc(sizes, 4)), None, "{sizes:?}");
    }
}

#[test]
fn test_full_allocation() {
    assert_eq!(dims_of(&alloc(&[1, 1, 1, 1], 4)), Some(vec![1, 1, 1, 1]));
    assert_eq!(dims_of(&alloc(&[1, 2, 1, 2], 4)), Some(vec![1, 2, 1, 2]));
    assert_eq!(dims_of(&alloc(&[2, 2, 2, 2], 4)), Some(vec![2, 2, 2, 2]));
}

#[test]
fn test_rank_two_ragged() {
    let pair = || Some(HostArray::ints([0, 1]));
    assert_eq!(dims_of(&rows(2, vec![None, None])), None);
    assert_eq!(dims_of(&rows(2, vec![pair(), None])), None);
    assert_eq!(dims_of(&rows(2, vec![None, pair()])), None);
    assert_eq!(dims_of(&rows(2, vec![pair(), pair()])), Some(vec![2, 2]));
}

#[test]
fn test_rank_three_ragged() {
    let col = |values: &[i32]| {
        rows(
            2,
            values.iter().map(|v| Some(HostArray::ints([*v]))).collect(),
        )
    };
    let empty = || Some(rows(2, Vec::new()));
    let full = || Some(col(&[1, 2, 3]));

    assert_eq!(dims_of(&rows(3, vec![None, None, None])), None);
    assert_eq!(dims_of(&rows(3, vec![empty(), None, None])), None);
    assert_eq!(dims_of(&rows(3, vec![empty(), empty(), None])), None);
    assert_eq!(dims_of(&rows(3, vec![empty(), empty()])), Some(vec![2, 0, 0]));
    assert_eq!(dims_of(&rows(3, vec![full(), empty()])), None);
    assert_eq!(dims_of(&rows(3, vec![full(), Some(col(&[1, 2]))])), None);

    let short_tail = rows(
        2,
        vec![
            Some(HostArray::ints([1])),
            Some(HostArray::ints([2])),
            Some(HostArray::ints([])),
        ],
    );
    assert_eq!(dims_of(&rows(3, vec![full(), Some(short_tail.clone())])), None);
    assert_eq!(dims_of(&rows(3, vec![Some(short_tail), full()])), None);

    let long_tail = rows(
        2,
        vec![
            Some(HostArray::ints([1])),
            Some(HostArray::ints([2])),
            Some(HostArray::ints([3, 3])),
        ],
    );
    assert_eq!(dims_of(&rows(3, vec![full(), Some(long_tail.clone())])), None);
    assert_eq!(dims_of(&rows(3, vec![Some(long_tail), full()])), None);

    assert_eq!(dims_of(&rows(3, vec![full(), full()])), Some(vec![2, 3, 1]));
}

#[test]
fn test_leaves_in_nested_order() {
    let m = HostArray::matrix(
        ElementClass::Int,
        vec![
            vec![HostValue::Int(1), HostValue::Int(2)],
            vec![HostValue::Int(3), HostValue::Int(4)],
        ],
    );
    let got: Vec<_> = leaves(&m).into_iter().cloned().collect();
    assert_eq!(got, (1..=4).map(HostValue::Int).collect::<Vec<_>>());
}
