use super::*;

#[test]
fn label_uses_name_when_present() {
    let record = Record::new(1, Some("Alpha".to_owned()));
    assert_eq!(record.label(), "Alpha");
}

#[test]
fn label_falls_back_to_id_when_name_missing() {
    assert_eq!(Record::new(7, None).label(), "Object 7");
}

#[test]
fn label_falls_back_to_id_when_name_empty() {
    assert_eq!(Record::new("abc", Some(String::new())).label(), "Object abc");
}

#[test]
fn parse_accepts_numeric_and_string_ids() {
    let records = parse_records(r#"[{"id": 1, "name": "one"}, {"id": "two"}]"#).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, RecordId::Number(1));
    assert_eq!(records[1].id, RecordId::Text("two".to_owned()));
    assert_eq!(records[1].name, None);
}

#[test]
fn parse_ignores_unknown_fields() {
    let records = parse_records(r#"[{"id": 3, "name": "x", "data": {"color": "red"}, "extra": [1, 2]}]"#).unwrap();
    assert_eq!(records, vec![Record::new(3, Some("x".to_owned()))]);
}

#[test]
fn parse_rejects_missing_id() {
    assert!(parse_records(r#"[{"name": "no id"}]"#).is_err());
}

#[test]
fn parse_rejects_non_array() {
    assert!(parse_records(r#"{"id": 1}"#).is_err());
}

#[test]
fn parse_empty_array() {
    assert!(parse_records("[]").unwrap().is_empty());
}

#[test]
fn parse_accepts_null_name() {
    let records = parse_records(r#"[{"id": 9, "name": null}]"#).unwrap();
    assert_eq!(records[0].label(), "Object 9");
}
