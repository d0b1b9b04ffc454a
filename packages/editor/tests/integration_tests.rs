//! Integration tests for editor crate

use prompt_editor::{
    extract_variable_names, parse, serialize, EditSession, EditorError, Mutation, Segment,
    Variable,
};

#[test]
fn test_round_trip_law() {
    let samples = [
        "",
        "plain",
        "Hello ${name}!",
        "line1\nline2",
        "\n",
        "trailing\n",
        "${a}${b}\n\n${c}",
        "${ unclosed ${x",
        "$${dollar}} {not} ${}",
        "tabs\tand ünïcödé ${v_1}",
        "${${nested}}",
    ];

    for text in samples {
        assert_eq!(serialize(&parse(text)), text, "round trip of {text:?}");
    }
}

#[test]
fn test_token_recognition() {
    let doc = parse("Hello ${name}!");
    let segments: Vec<_> = doc.segments().cloned().collect();

    assert_eq!(
        segments,
        vec![
            Segment::text("Hello "),
            Segment::variable("name").unwrap(),
            Segment::text("!"),
        ]
    );
    assert_eq!(extract_variable_names(&doc), vec!["name"]);
}

#[test]
fn test_deduplication_and_ordering() {
    let doc = parse("${b} and ${a} and ${b}");
    assert_eq!(extract_variable_names(&doc), vec!["b", "a"]);
}

#[test]
fn test_multi_line_preservation() {
    let doc = parse("line1\nline2");
    let segments: Vec<_> = doc.segments().cloned().collect();

    assert_eq!(
        segments,
        vec![
            Segment::text("line1"),
            Segment::LineBreak,
            Segment::text("line2"),
        ]
    );
    assert_eq!(serialize(&doc), "line1\nline2");
}

#[test]
fn test_adjacent_edit_isolation() {
    let mut session = EditSession::new("test", "${x}");

    session.apply_edit(Mutation::insert_text(4, "y")).unwrap();

    let segments: Vec<_> = session.document().segments().cloned().collect();
    assert_eq!(
        segments,
        vec![Segment::variable("x").unwrap(), Segment::text("y")]
    );
    assert_eq!(session.content().variables, vec!["x"]);
}

#[test]
fn test_malformed_direct_construction() {
    assert_eq!(
        Variable::from_token("{foo}"),
        Err(EditorError::InvalidTokenFormat("{foo}".to_string()))
    );

    let variable = Variable::from_token("${foo}").unwrap();
    assert_eq!(variable.name(), "foo");
}

#[test]
fn test_empty_input() {
    let doc = parse("");

    assert_eq!(doc.blocks().len(), 1);
    assert!(doc.blocks()[0].segments().is_empty());
    assert_eq!(serialize(&doc), "");
    assert!(extract_variable_names(&doc).is_empty());
}

#[test]
fn test_session_reinitialize_replaces_document() {
    let mut session = EditSession::new("test", "old ${a}");
    session.apply_edit(Mutation::insert_text(0, "very ")).unwrap();
    assert!(session.can_undo());

    session.initialize("new ${b}");

    assert_eq!(session.content().text, "new ${b}");
    assert_eq!(session.content().variables, vec!["b"]);
    assert!(!session.can_undo());
    assert_eq!(session.document().version, 0);
}

#[test]
fn test_mutation_serialization() {
    let mutation = Mutation::insert_variable(3, "topic");

    let json = serde_json::to_value(&mutation).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "op": "insertVariable", "at": 3, "name": "topic" })
    );

    let deserialized: Mutation = serde_json::from_value(json).unwrap();
    assert_eq!(mutation, deserialized);
}

#[test]
fn test_prompt_content_serialization() {
    let session = EditSession::new("test", "${q}");
    let json = serde_json::to_value(session.content()).unwrap();

    assert_eq!(
        json,
        serde_json::json!({ "text": "${q}", "variables": ["q"] })
    );
}
