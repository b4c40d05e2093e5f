use super::*;

#[test]
fn empty_displays_as_empty_string() {
    assert_eq!(Value::Empty.to_string(), "");
}

#[test]
fn whole_number_displays_without_fraction() {
    assert_eq!(Value::Number(2.0).to_string(), "2");
    assert_eq!(Value::Number(12500.0).to_string(), "12500");
}

#[test]
fn fractional_number_keeps_fraction() {
    assert_eq!(Value::Number(1.5).to_string(), "1.5");
}

#[test]
fn numbers_compare_numerically() {
    assert_eq!(Value::Number(9.0).compare(&Value::Number(10.0)), Ordering::Less);
}

#[test]
fn text_compares_lexicographically() {
    assert_eq!(Value::from("10").compare(&Value::from("9")), Ordering::Less);
    assert_eq!(Value::from("b").compare(&Value::from("a")), Ordering::Greater);
}

#[test]
fn mixed_kinds_order_empty_number_text() {
    assert_eq!(Value::Empty.compare(&Value::Number(0.0)), Ordering::Less);
    assert_eq!(Value::Number(100.0).compare(&Value::from("a")), Ordering::Less);
    assert_eq!(Value::from("").compare(&Value::Empty), Ordering::Greater);
}

#[test]
fn nan_orders_after_numbers() {
    assert_eq!(Value::Number(f64::NAN).compare(&Value::Number(1.0)), Ordering::Greater);
    assert_eq!(Value::Number(f64::NAN).compare(&Value::Number(f64::NAN)), Ordering::Equal);
}

#[test]
fn sorting_with_nan_is_total() {
    let mut values = vec![
        Value::Number(f64::NAN),
        Value::Number(1.0),
        Value::Empty,
        Value::Number(0.0),
    ];
    values.sort_by(Value::compare);
    assert_eq!(values[0], Value::Empty);
    assert_eq!(values[1], Value::Number(0.0));
    assert_eq!(values[2], Value::Number(1.0));
    assert!(matches!(values[3], Value::Number(n) if n.is_nan()));
}

#[test]
fn option_none_becomes_empty() {
    let v: Value = Option::<String>::None.into();
    assert_eq!(v, Value::Empty);
    let v: Value = Some("x").into();
    assert_eq!(v, Value::Text("x".to_string()));
}
