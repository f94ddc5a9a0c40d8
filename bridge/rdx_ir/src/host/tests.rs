#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_nested_rejects_mismatched_rows() {
    let ints = HostArray::ints([1, 2]);
    let doubles = HostArray::doubles([1.0]);
    assert!(HostArray::nested(ElementClass::Int, 2, vec![Some(ints.clone())]).is_some());
    assert!(HostArray::nested(ElementClass::Int, 2, vec![Some(doubles)]).is_none());
    assert!(HostArray::nested(ElementClass::Int, 3, vec![Some(ints.clone())]).is_none());
    assert!(HostArray::nested(ElementClass::Int, 1, vec![Some(ints)]).is_none());
}

#[test]
fn test_rank_is_declared_not_observed() {
    let cube = HostArray::nested(ElementClass::Double, 3, vec![None, None]).unwrap();
    assert_eq!(cube.rank(), 3);
    assert_eq!(cube.element(), ElementClass::Double);
    assert_eq!(cube.len(), 2);
    assert_eq!(cube.to_values(), vec![HostValue::Null, HostValue::Null]);
}

#[test]
fn test_matrix_rows_are_vectors() {
    let m = HostArray::matrix(
        ElementClass::Int,
        vec![vec![HostValue::Int(1)], vec![HostValue::Int(2)]],
    );
    assert_eq!(m.rank(), 2);
    assert_eq!(
        m.to_values(),
        vec![
            HostValue::Array(HostArray::ints([1])),
            HostValue::Array(HostArray::ints([2])),
        ]
    );
}

#[test]
fn test_element_class_accepts() {
    assert!(ElementClass::Int.accepts(&HostValue::Int(3)));
    assert!(ElementClass::Int.accepts(&HostValue::Null));
    assert!(!ElementClass::Int.accepts(&HostValue::Long(3)));
    assert!(ElementClass::Str.accepts(&HostValue::string("x")));
    assert!(!ElementClass::Char.accepts(&HostValue::string("x")));
    assert!(ElementClass::Object.accepts(&HostValue::object("acme.io.Thread")));
}

#[test]
fn test_element_class_kinds() {
    assert_eq!(ElementClass::Short.kind(), Some(RKind::Integer));
    assert_eq!(ElementClass::Long.kind(), Some(RKind::Numeric));
    assert_eq!(ElementClass::BigDecimal.kind(), Some(RKind::Numeric));
    assert_eq!(ElementClass::Char.kind(), Some(RKind::Character));
    assert_eq!(ElementClass::Byte.kind(), Some(RKind::Raw));
    assert_eq!(ElementClass::Object.kind(), None);
}

#[test]
fn test_map_factory_uses_string_keys() {
    let m = HostValue::map([("a", HostValue::Int(1)), ("b", HostValue::Null)]);
    assert_eq!(
        m,
        HostValue::Map(vec![
            (HostValue::string("a"), HostValue::Int(1)),
            (HostValue::string("b"), HostValue::Null),
        ])
    );
    assert_eq!(HostValue::object("Widget").type_name(), "Widget");
}

#[test]
fn test_from_row_major_builds_nested_rows() {
    let leaves = (1..=6).map(HostValue::Int).collect();
    let built = HostArray::from_row_major(ElementClass::Int, &[2, 3], leaves);
    let expected = HostArray::matrix(
        ElementClass::Int,
        vec![
            vec![HostValue::Int(1), HostValue::Int(2), HostValue::Int(3)],
            vec![HostValue::Int(4), HostValue::Int(5), HostValue::Int(6)],
        ],
    );
    assert_eq!(built, Some(expected));
}

#[test]
fn test_from_row_major_zero_extent() {
    let built = HostArray::from_row_major(ElementClass::Int, &[2, 1, 0], Vec::new()).unwrap();
    assert_eq!(built.rank(), 3);
    assert_eq!(built.len(), 2);
    assert!(HostArray::from_row_major(ElementClass::Int, &[2], Vec::new()).is_none());
    assert!(HostArray::from_row_major(ElementClass::Int, &[], Vec::new()).is_none());
}
