use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_value_display() {
    assert_eq!(Value::number(42.0).to_string(), "42");
    assert_eq!(Value::number(-3.5).to_string(), "-3.5");
    assert_eq!(Value::Bool(true).to_string(), "true");
    assert_eq!(Value::Null.to_string(), "null");
    assert_eq!(Value::string("hello").to_string(), "hello");
}

#[test]
fn test_container_display_quotes_strings() {
    let list = Value::array(vec![Value::number(1.0), Value::string("a,b")]);
    assert_eq!(list.to_string(), "[1, \"a,b\"]");

    let mut entries = ValueMap::new();
    entries.insert("name".to_string(), Value::string("hero"));
    entries.insert("hp".to_string(), Value::number(100.0));
    assert_eq!(Value::map(entries).to_string(), "{name: \"hero\", hp: 100}");
}

#[test]
fn test_format_number_special_values() {
    assert_eq!(format_number(f64::NAN), "NaN");
    assert_eq!(format_number(f64::INFINITY), "Infinity");
    assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
    assert_eq!(format_number(0.25), "0.25");
    assert_eq!(format_number(1e20), "100000000000000000000");
}

#[test]
fn test_parse_number_is_strict() {
    assert_eq!(parse_number("12"), Some(12.0));
    assert_eq!(parse_number(" -1.5 "), Some(-1.5));
    assert_eq!(parse_number("2e3"), Some(2000.0));
    assert_eq!(parse_number("inf"), None);
    assert_eq!(parse_number("NaN"), None);
    assert_eq!(parse_number("12abc"), None);
    assert_eq!(parse_number(""), None);
    assert_eq!(parse_number("1-2"), None);
}

#[test]
fn test_type_names() {
    assert_eq!(Value::string("x").type_name(), "string");
    assert_eq!(Value::number(1.0).type_name(), "number");
    assert_eq!(Value::Bool(false).type_name(), "boolean");
    assert_eq!(Value::Null.type_name(), "null");
    assert_eq!(Value::array(vec![]).type_name(), "array");
    assert_eq!(Value::map(ValueMap::new()).type_name(), "object");
}

#[test]
fn test_emptiness_is_type_aware() {
    assert!(Value::Null.is_empty_value());
    assert!(Value::string("").is_empty_value());
    assert!(Value::array(vec![]).is_empty_value());
    assert!(Value::map(ValueMap::new()).is_empty_value());
    assert!(!Value::number(0.0).is_empty_value());
    assert!(!Value::Bool(false).is_empty_value());
}

#[test]
fn test_truthiness() {
    assert!(Value::number(1.0).is_truthy());
    assert!(!Value::number(0.0).is_truthy());
    assert!(!Value::number(f64::NAN).is_truthy());
    assert!(!Value::string("").is_truthy());
    assert!(Value::array(vec![]).is_truthy());
    assert!(!Value::Null.is_truthy());
}

#[test]
fn test_compare_orders_numbers_numerically() {
    assert_eq!(
        Value::number(9.0).compare(&Value::number(10.0)),
        Ordering::Less
    );
    assert_eq!(
        Value::string("b").compare(&Value::string("a")),
        Ordering::Greater
    );
}
