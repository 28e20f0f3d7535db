use opfill::path::query;
use serde_json::json;

fn item() -> &'static str {
    r#"{
            "title": "db",
            "fields": [
                {"id": "username", "label": "user", "value": "admin"},
                {"id": "json", "label": "json", "value": "{\"a\":1}"},
                {"id": "other", "label": "json", "value": "second"}
            ],
            "sections": [
                {"fields": [{"label": "x", "value": 1}]},
                {"fields": [{"label": "json", "value": "nested"}]}
            ],
            "ports": [80, 443, 8080],
            "people": [
                {"name": "ann", "age": 31, "admin": true},
                {"name": "bob", "age": 25, "admin": false},
                {"name": "cy", "age": 44, "admin": true}
            ],
            "dotted.key": "escaped",
            "price": 10.50
        }"#
}

#[test]
fn test_plain_key_path() {
    let root = r#"{"a": {"b": {"c": "deep"}}}"#;
    assert_eq!(query(root, "a.b.c").unwrap().as_scalar_string(), "deep");
}

#[test]
fn test_missing_path_is_none() {
    let root = r#"{"a": {"b": 1}}"#;
    assert!(query(root, "a.c").is_none());
    assert!(query(root, "a.b.c").is_none());
    assert!(query(root, "").is_none());
}

#[test]
fn test_array_index() {
    assert_eq!(query(item(), "ports.1").unwrap().as_scalar_string(), "443");
    assert!(query(item(), "ports.9").is_none());
}

#[test]
fn test_first_match_filter() {
    let found = query(item(), r#"fields.#(label=="json").value"#).unwrap();
    assert_eq!(found.as_scalar_string(), "{\"a\":1}");
}

#[test]
fn test_all_matches_filter() {
    let found = query(item(), r#"fields.#(label=="json")#.value"#).unwrap();
    assert_eq!(found.to_value().unwrap(), json!(["{\"a\":1}", "second"]));
}

#[test]
fn test_numeric_and_bool_conditions() {
    assert_eq!(
        query(item(), "people.#(age>30)#.name").unwrap().to_value().unwrap(),
        json!(["ann", "cy"])
    );
    assert_eq!(query(item(), "people.#(age<=25).name").unwrap().as_scalar_string(), "bob");
    assert_eq!(
        query(item(), "people.#(admin==false).name").unwrap().as_scalar_string(),
        "bob"
    );
    assert_eq!(
        query(item(), r#"people.#(name!="ann").name"#).unwrap().as_scalar_string(),
        "bob"
    );
}

#[test]
fn test_like_condition() {
    assert_eq!(query(item(), r#"people.#(name%"c*").age"#).unwrap().as_scalar_string(), "44");
    assert_eq!(query(item(), r#"people.#(name!%"a*").name"#).unwrap().as_scalar_string(), "bob");
}

#[test]
fn test_existence_condition() {
    let root = r#"{"items": [{"a": 1}, {"b": 2}]}"#;
    assert_eq!(query(root, "items.#(b).b").unwrap().as_scalar_string(), "2");
}

#[test]
fn test_no_match_is_none() {
    assert!(query(item(), r#"fields.#(label=="nope").value"#).is_none());
}

#[test]
fn test_count_and_map() {
    assert_eq!(query(item(), "ports.#").unwrap().as_scalar_string(), "3");
    assert_eq!(
        query(item(), "people.#.name").unwrap().to_value().unwrap(),
        json!(["ann", "bob", "cy"])
    );
}

#[test]
fn test_nested_map_over_sections() {
    let found = query(item(), r#"sections.#.fields.#(label=="json").value"#).unwrap();
    assert_eq!(found.to_value().unwrap(), json!(["nested"]));
}

#[test]
fn test_escaped_dot_and_wildcard() {
    assert_eq!(query(item(), r"dotted\.key").unwrap().as_scalar_string(), "escaped");
    assert_eq!(query(item(), "tit?e").unwrap().as_scalar_string(), "db");
    assert_eq!(query(item(), "pri*").unwrap().as_scalar_string(), "10.50");
}

#[test]
fn test_scalar_and_raw_rendering() {
    let root = r#"{"s": "text", "n": 1.250, "b": true, "z": null, "o": {"y": 2, "x": 1}}"#;

    assert_eq!(query(root, "s").unwrap().as_scalar_string(), "text");
    assert_eq!(query(root, "s").unwrap().as_raw_json(), "\"text\"");
    assert_eq!(query(root, "n").unwrap().as_scalar_string(), "1.250");
    assert_eq!(query(root, "b").unwrap().as_scalar_string(), "true");
    assert_eq!(query(root, "z").unwrap().as_scalar_string(), "");
    assert_eq!(query(root, "z").unwrap().as_raw_json(), "null");
    assert_eq!(query(root, "o").unwrap().as_raw_json(), r#"{"y": 2, "x": 1}"#);
}

#[test]
fn test_raw_json_is_exact_slice() {
    let root = "{\n  \"a\": {\n    \"b\": 1,\n    \"c\": [1, 2]\n  },\n  \"s\": \"caf\\u00e9 a\\/b\"\n}";

    assert_eq!(
        query(root, "a").unwrap().as_raw_json(),
        "{\n    \"b\": 1,\n    \"c\": [1, 2]\n  }"
    );
    assert_eq!(query(root, "a.c").unwrap().as_raw_json(), "[1, 2]");
    assert_eq!(query(root, "s").unwrap().as_raw_json(), r#""caf\u00e9 a\/b""#);
    assert_eq!(query(root, "s").unwrap().as_scalar_string(), "café a/b");
}

#[test]
fn test_duplicate_keys_first_wins() {
    let root = r#"{"a": "first", "a": "second", "n": {"k": 1, "k": 2}}"#;
    assert_eq!(query(root, "a").unwrap().as_scalar_string(), "first");
    assert_eq!(query(root, "n.k").unwrap().as_scalar_string(), "1");
    assert_eq!(query(root, "n").unwrap().as_raw_json(), r#"{"k": 1, "k": 2}"#);
}

#[test]
fn test_nested_query_in_condition() {
    let root = r#"{"friends": [
        {"first": "Dale", "nets": ["ig", "fb", "tw"]},
        {"first": "Roger", "nets": ["fb", "tw"]},
        {"first": "Jane", "nets": ["ig", "tw"]}
    ]}"#;

    assert_eq!(
        query(root, r#"friends.#(nets.#(=="fb")).first"#).unwrap().as_scalar_string(),
        "Dale"
    );
    assert_eq!(
        query(root, r#"friends.#(nets.#(=="fb"))#.first"#).unwrap().to_value().unwrap(),
        json!(["Dale", "Roger"])
    );
}

#[test]
fn test_mapped_arrays_join_raw_elements() {
    let root = r#"{"items": [{"v": {"x": 1}}, {"w": 0}, {"v": [ 2 ]}]}"#;
    assert_eq!(query(root, "items.#.v").unwrap().as_raw_json(), r#"[{"x": 1},[ 2 ]]"#);
}
