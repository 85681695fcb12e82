use spanlog::datatype::{Span, Value};
use spanlog::error::SpanlogError;

#[test]
fn non_integer_start_is_rejected() {
    let err = Span::from_values(&Value::from("x"), &Value::Integer(0)).unwrap_err();
    assert!(matches!(err, SpanlogError::SpanEndpoints));
    assert_eq!(format!("{}", err), "Span's start/end must be integers");
}

#[test]
fn two_non_integer_endpoints_are_rejected() {
    let err = Span::from_values(&Value::from("x"), &Value::from("x")).unwrap_err();
    assert_eq!(format!("{}", err), "Span's start/end must be integers");
}

#[test]
fn non_integer_end_is_rejected() {
    let err = Span::from_values(&Value::Integer(0), &Value::from("x")).unwrap_err();
    assert_eq!(format!("{}", err), "Span's start/end must be integers");
}

#[test]
fn message_does_not_vary_with_failing_endpoint() {
    let bad = Value::from("x");
    let good = Value::Integer(0);
    let combos = [(&bad, &good), (&bad, &bad), (&good, &bad)];
    for (start, end) in combos {
        let err = Span::from_values(start, end).unwrap_err();
        assert_eq!(
            format!("{}", err),
            "Span's start/end must be integers",
            "unexpected message for ({start}, {end})"
        );
    }
}

#[test]
fn spans_from_other_value_kinds_are_rejected() {
    let span = Value::Span(Span::new(1, 2));
    let err = Span::from_values(&span, &Value::Integer(3)).unwrap_err();
    assert!(matches!(err, SpanlogError::SpanEndpoints));
}

#[test]
fn integer_endpoints_construct_a_span() {
    let span = Span::from_values(&Value::Integer(15), &Value::Integer(16)).expect("span ok");
    assert_eq!(span, Span::new(15, 16));
    assert_eq!(span.start(), 15);
    assert_eq!(span.end(), 16);
}

#[test]
fn try_from_value_pair() {
    let span = Span::try_from((&Value::Integer(3), &Value::Integer(9))).expect("span ok");
    assert_eq!(span, Span::new(3, 9));
    assert!(Span::try_from((&Value::from("x"), &Value::Integer(9))).is_err());
}

#[test]
fn equal_offsets_compare_equal() {
    assert_eq!(Span::new(15, 16), Span::new(15, 16));
    assert_ne!(Span::new(15, 16), Span::new(15, 17));
    assert_ne!(Span::new(15, 16), Span::new(14, 16));
}

#[test]
fn offsets_need_not_be_ordered() {
    // only integrality is validated, reversed intervals are representable
    let reversed = Span::new(9, 3);
    assert_eq!(reversed.start(), 9);
    assert_eq!(reversed.end(), 3);
    assert_eq!(reversed.to_string(), "[9, 3)");
}

#[test]
fn negative_offsets_are_integers_too() {
    let span = Span::from_values(&Value::Integer(-4), &Value::Integer(-1)).expect("span ok");
    assert_eq!(span, Span::new(-4, -1));
}
