use crate::{Record, Value};

#[test]
fn json_objects_become_plain_records_in_order() {
    let json: serde_json::Value =
        serde_json::from_str(r#"{"type": "Identifier", "name": "x", "range": [0, 1]}"#).unwrap();
    let value = Value::from(json);

    let record = value.as_record().unwrap();
    assert!(record.is_plain());
    assert_eq!(record.keys().collect::<Vec<_>>(), ["type", "name", "range"]);
    assert_eq!(value.type_tag(), Some("Identifier"));
    assert_eq!(
        record.get("range"),
        Some(&Value::Array(vec![Value::Number(0.0), Value::Number(1.0)]))
    );
}

#[test]
fn json_scalars() {
    assert_eq!(Value::from(serde_json::json!(null)), Value::Null);
    assert_eq!(Value::from(serde_json::json!(false)), Value::Bool(false));
    assert_eq!(Value::from(serde_json::json!(2.5)), Value::Number(2.5));
    assert_eq!(Value::from(serde_json::json!("s")), Value::from("s"));
}

#[test]
fn none_is_undefined() {
    assert!(Value::from(Option::<&str>::None).is_undefined());
    assert_eq!(Value::from(Some("x")), Value::from("x"));
}

#[test]
fn classed_records() {
    let record = Record::with_class("ParseError").field("type", "Identifier");
    assert!(!record.is_plain());
    assert_eq!(record.class(), Some("ParseError"));
    assert_eq!(record.type_tag(), Some("Identifier"));
}

#[test]
fn type_tag_must_be_a_string() {
    let record = Record::new().field("type", 3);
    assert_eq!(record.type_tag(), None);
    assert_eq!(Value::from(3).type_tag(), None);
}

#[test]
fn insert_replaces_in_place_and_remove_keeps_order() {
    let mut record = Record::new().field("a", 1).field("b", 2).field("c", 3);
    record.insert("a", 10);
    assert_eq!(record.keys().collect::<Vec<_>>(), ["a", "b", "c"]);
    assert_eq!(record.get("a"), Some(&Value::from(10)));

    assert_eq!(record.remove("b"), Some(Value::from(2)));
    assert_eq!(record.keys().collect::<Vec<_>>(), ["a", "c"]);
    assert_eq!(record.len(), 2);
    assert!(!record.contains("b"));
}
