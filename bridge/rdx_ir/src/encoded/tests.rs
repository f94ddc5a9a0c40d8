#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use super::*;
use pretty_assertions::assert_eq;
use smallvec::smallvec;

#[test]
fn test_null_has_no_payload() {
    let value = EncodedValue::null();
    assert_eq!(value.type_code(), TypeCode::Null);
    assert_eq!(value.structure(), StructureCode::Scalar);
    assert_eq!(value.exception(), ExceptionCode::None);
    assert_eq!(value.dims(), None);
    assert_eq!(value.payload(), &Payload::Empty);
    assert_eq!(value.code().bits(), 0);
}

#[test]
fn test_vector_dims_follow_buffer() {
    let value = EncodedValue::vector(Buffer::Integer(vec![1, 2, 3]));
    assert_eq!(value.code().bits(), 0x102);
    assert_eq!(value.dims(), Some(&[3][..]));
    assert_eq!(value.try_i32_slice(), Some(&[1, 2, 3][..]));
    assert_eq!(value.try_f64_slice(), None);
}

#[test]
fn test_nd_array_checks_shape() {
    let ok = EncodedValue::nd_array(Buffer::Raw(vec![0; 6]), smallvec![2, 3]).unwrap();
    assert_eq!(ok.structure(), StructureCode::NdArray);
    assert_eq!(ok.type_code(), TypeCode::Raw);
    assert_eq!(ok.dims(), Some(&[2, 3][..]));

    assert_eq!(
        EncodedValue::nd_array(Buffer::Raw(vec![0; 5]), smallvec![2, 3]),
        Err(PayloadError::ShapeMismatch {
            dims: vec![2, 3],
            len: 5
        })
    );
    assert!(EncodedValue::nd_array(Buffer::Raw(vec![0; 5]), smallvec![5]).is_err());
}

#[test]
fn test_named_list_record_flag() {
    let record = EncodedValue::named_list(
        vec!["a".into(), "b".into()],
        vec![EncodedValue::scalar(Scalar::Integer(1)), EncodedValue::null()],
    );
    assert!(record.is_named_scalar_record());

    let nested = EncodedValue::named_list(
        vec!["a".into()],
        vec![EncodedValue::vector(Buffer::Logical(vec![true]))],
    );
    assert!(!nested.is_named_scalar_record());

    let empty = EncodedValue::named_list(Vec::new(), Vec::new());
    assert!(!empty.is_named_scalar_record());
}

#[test]
fn test_composite_accessors() {
    let value = EncodedValue::named_list(
        vec!["x".into(), "y".into()],
        vec![
            EncodedValue::scalar(Scalar::Numeric(1.5)),
            EncodedValue::scalar(Scalar::Character(None)),
        ],
    );
    let composite = value.as_composite().unwrap();
    assert_eq!(composite.len(), 2);
    assert_eq!(
        composite.codes(),
        vec![
            CompositeCode::of(TypeCode::Numeric, StructureCode::Scalar),
            CompositeCode::of(TypeCode::Character, StructureCode::Scalar),
        ]
    );
    assert_eq!(composite.get("x").and_then(EncodedValue::try_f64), Some(1.5));
    assert_eq!(composite.get("y").and_then(EncodedValue::try_str), Some(None));
    assert!(composite.get("z").is_none());
}

#[test]
fn test_error_object_carries_message() {
    let value = EncodedValue::error_object("boom");
    assert_eq!(value.code().bits(), 0x1_00FE);
    assert_eq!(value.exception(), ExceptionCode::Exception);
    assert_eq!(value.try_message(), Some("boom"));
    assert_eq!(EncodedValue::scalar(Scalar::Character(Some("boom".into()))).try_message(), None);
}

#[test]
fn test_user_defined_keeps_source_value() {
    let user = UserCode::from_ordinal(3).unwrap();
    let value = EncodedValue::user_defined(HostValue::Int(7), user);
    assert_eq!(value.type_code(), TypeCode::Other);
    assert_eq!(value.structure(), StructureCode::UserDefined);
    assert_eq!(value.user_code(), Some(user));
    assert_eq!(value.as_user_defined(), Ok(&HostValue::Int(7)));
}

#[test]
fn test_checked_accessor_reports_kinds() {
    let value = EncodedValue::vector(Buffer::Logical(vec![false]));
    assert_eq!(
        value.as_i32_slice(),
        Err(PayloadError::WrongKind {
            expected: "integer buffer",
            found: "logical buffer",
        })
    );
    assert_eq!(value.as_bool_slice(), Ok(&[false][..]));
    assert_eq!(
        EncodedValue::null().as_scalar(),
        Err(PayloadError::WrongKind {
            expected: "scalar",
            found: "empty",
        })
    );
}

#[test]
fn test_with_exception_keeps_other_fields() {
    let value = EncodedValue::vector(Buffer::Logical(vec![false]))
        .with_exception(ExceptionCode::WarningMissingLogical);
    assert_eq!(value.code().bits(), 0xA_0104);
    assert_eq!(value.dims(), Some(&[1][..]));
}

#[test]
fn test_deep_composite_drops_iteratively() {
    let mut value = EncodedValue::null();
    for _ in 0..100_000 {
        value = EncodedValue::list(vec![value, EncodedValue::null()]);
    }
    drop(value);
}

#[test]
fn test_into_parts_keeps_children() {
    let value = EncodedValue::named_list(
        vec!["a".to_owned()],
        vec![EncodedValue::list(vec![EncodedValue::null()])],
    );
    let Payload::Composite(composite) = value.into_payload() else {
        panic!("named list has a composite payload");
    };
    let (elements, names) = composite.into_parts();
    assert_eq!(names, Some(vec!["a".to_owned()]));
    assert_eq!(elements[0].try_composite().unwrap().len(), 1);
}
