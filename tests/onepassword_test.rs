use opfill::{
    document::Document,
    error::Error,
    onepassword::{extract_payload, looks_like_json, OnePasswordSource},
    source::SecretSource,
};

fn item(json: &str) -> Document {
    Document::parse("item", json.as_bytes()).unwrap()
}

#[test]
fn test_payload_from_labelled_field() {
    let item = item(
        r#"{"id":"abc","fields":[
            {"id":"password","label":"password","value":"hunter2"},
            {"id":"x1","label":"json","value":"{\"db\":{\"user\":\"admin\"}}"}
        ]}"#,
    );
    assert_eq!(extract_payload(&item).unwrap(), r#"{"db":{"user":"admin"}}"#);
}

#[test]
fn test_payload_from_field_id() {
    let item = item(r#"{"fields":[{"id":"json","label":"payload","value":"{}"}]}"#);
    assert_eq!(extract_payload(&item).unwrap(), "{}");
}

#[test]
fn test_payload_from_section() {
    let item = item(
        r#"{"fields":[],"sections":[
            {"fields":[{"label":"other","value":"no"}]},
            {"fields":[{"label":"json","value":"[1,2]"}]}
        ]}"#,
    );
    assert_eq!(extract_payload(&item).unwrap(), "[1,2]");
}

#[test]
fn test_payload_from_notes() {
    let item = item(r#"{"fields":[],"notesPlain":" {\"a\":1} "}"#);
    assert_eq!(extract_payload(&item).unwrap(), r#" {"a":1} "#);
}

#[test]
fn test_notes_that_are_not_json_are_ignored() {
    let item = item(r#"{"fields":[],"notesPlain":"just a note"}"#);
    assert!(matches!(extract_payload(&item), Err(Error::SourceError(_))));
}

#[test]
fn test_looks_like_json() {
    assert!(looks_like_json("{\"a\":1}"));
    assert!(looks_like_json("  [1, 2]\n"));
    assert!(!looks_like_json(""));
    assert!(!looks_like_json("{ unterminated"));
    assert!(!looks_like_json("plain"));
}

#[test]
fn test_missing_cli_is_reported() {
    let source = OnePasswordSource::new("Private", "db", None)
        .with_binary("opfill-test-missing-op-binary");

    assert_eq!(source.name(), "1Password item 'db' in vault 'Private'");
    match source.fetch() {
        Err(Error::SourceError(msg)) => assert!(msg.contains("not found on PATH")),
        other => panic!("Expected SourceError, got {other:?}"),
    }
}
