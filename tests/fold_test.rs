use opfill::{
    config::Config,
    document::Document,
    error::Error,
    fill::{Filler, LogObserver},
    fold::{fold, fold_sources},
};

fn doc(name: &str, json: &str) -> Document {
    Document::parse(name, json.as_bytes()).unwrap()
}

#[test]
fn test_fold_fills_from_each_document_in_turn() {
    let config = Config::default();
    let filler = Filler::new(&config, &LogObserver);
    let documents = [doc("db", r#"{"user":"admin"}"#), doc("api", r#"{"key":"k-123"}"#)];

    let output = fold(&filler, "[[user]]:[[key]]", &documents);
    assert_eq!(output, "admin:k-123");
}

#[test]
fn test_earlier_document_wins() {
    let config = Config::default();
    let filler = Filler::new(&config, &LogObserver);
    let documents = [doc("first", r#"{"x":"one"}"#), doc("second", r#"{"x":"two"}"#)];

    assert_eq!(fold(&filler, "[[x]]", &documents), "one");
}

#[test]
fn test_fold_resolves_at_least_what_first_fill_does() {
    let config = Config::default();
    let filler = Filler::new(&config, &LogObserver);
    let template = "[[a]] [[b]] [[c]]";
    let d1 = doc("d1", r#"{"a":"A"}"#);
    let d2 = doc("d2", r#"{"b":"B","a":"other"}"#);

    let single = filler.fill(template, &d1);
    let folded = fold(&filler, template, &[d1, d2]);

    assert_eq!(single, "A [[b]] [[c]]");
    assert_eq!(folded, "A B [[c]]");
}

#[test]
fn test_fold_with_no_documents_returns_template() {
    let config = Config::default();
    let filler = Filler::new(&config, &LogObserver);
    assert_eq!(fold(&filler, "[[a]]", &[]), "[[a]]");
}

#[test]
fn test_fold_sources_in_order() {
    let config = Config::default();
    let filler = Filler::new(&config, &LogObserver);
    let sources = vec![
        ("one.json", br#"{"a":"1"}"#.to_vec()),
        ("two.json", br#"{"b":"2"}"#.to_vec()),
    ];

    assert_eq!(fold_sources(&filler, "[[a]][[b]]", &sources).unwrap(), "12");
}

#[test]
fn test_fold_sources_aborts_on_malformed_document() {
    let config = Config::default();
    let filler = Filler::new(&config, &LogObserver);
    let sources = vec![
        ("good.json", br#"{"a":"1"}"#.to_vec()),
        ("bad.json", b"{\"b\":".to_vec()),
    ];

    match fold_sources(&filler, "[[a]][[b]]", &sources) {
        Err(Error::MalformedDocument { source_name, .. }) => assert_eq!(source_name, "bad.json"),
        other => panic!("Expected MalformedDocument, got {other:?}"),
    }
}
