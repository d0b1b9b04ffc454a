//! Comprehensive tests for complex mutation sequences
//!
//! This tests:
//! - Typing, pasting and deleting around variables
//! - Undo/redo sequences
//! - Batched mutations
//! - Document integrity after operations

use prompt_editor::{Document, EditSession, Mutation, UndoStack};

/// Simulate typing `text` one character at a time starting at `at`.
fn type_text(stack: &mut UndoStack, doc: &mut Document, at: usize, text: &str) {
    for (offset, ch) in text.chars().enumerate() {
        let mutation = if ch == '\n' {
            Mutation::insert_line_break(at + offset)
        } else {
            Mutation::insert_text(at + offset, ch.to_string())
        };
        stack.apply(&mutation, doc).unwrap();
    }
}

#[test]
fn test_typing_prompt_character_by_character() {
    let mut doc = Document::parse("");
    let mut stack = UndoStack::new();

    type_text(&mut stack, &mut doc, 0, "Translate ${text}\ninto ${language}.");

    assert_eq!(doc.to_text(), "Translate ${text}\ninto ${language}.");
    assert_eq!(doc.variables(), vec!["text", "language"]);
    assert_eq!(Document::parse(&doc.to_text()), doc);
}

#[test]
fn test_undo_everything_restores_empty_document() {
    let mut doc = Document::parse("");
    let mut stack = UndoStack::with_max_levels(0);

    type_text(&mut stack, &mut doc, 0, "${a} ${b}");
    while stack.undo(&mut doc).unwrap() {}

    assert_eq!(doc.to_text(), "");
    assert!(doc.variables().is_empty());

    while stack.redo(&mut doc).unwrap() {}
    assert_eq!(doc.to_text(), "${a} ${b}");
}

#[test]
fn test_delete_then_undo_restores_variable() {
    let mut doc = Document::parse("Use ${tone} tone");
    let mut stack = UndoStack::new();

    // Backspace the closing brace
    stack.apply(&Mutation::delete(10, 11), &mut doc).unwrap();
    assert!(doc.variables().is_empty());

    stack.undo(&mut doc).unwrap();
    assert_eq!(doc.variables(), vec!["tone"]);
    assert_eq!(doc.to_text(), "Use ${tone} tone");
}

#[test]
fn test_replace_all_is_undoable() {
    let mut doc = Document::parse("first ${one}");
    let mut stack = UndoStack::new();

    stack
        .apply(&Mutation::replace_all("second ${two}"), &mut doc)
        .unwrap();
    stack.undo(&mut doc).unwrap();

    assert_eq!(doc.to_text(), "first ${one}");
}

#[test]
fn test_paste_in_middle_of_variable() {
    let mut doc = Document::parse("${ab}");
    let mut stack = UndoStack::new();

    stack
        .apply(&Mutation::insert_text(3, "} and ${"), &mut doc)
        .unwrap();

    assert_eq!(doc.to_text(), "${a} and ${b}");
    assert_eq!(doc.variables(), vec!["a", "b"]);

    stack.undo(&mut doc).unwrap();
    assert_eq!(doc.variables(), vec!["ab"]);
}

#[test]
fn test_session_batch_is_one_undo_step() {
    let mut session = EditSession::new("seq", "");

    session.begin_batch(Some("autocomplete"));
    session
        .apply_edit(Mutation::insert_text(0, "Hello "))
        .unwrap();
    session.apply_edit(Mutation::insert_variable(6, "name")).unwrap();
    session.end_batch();

    assert_eq!(session.content().text, "Hello ${name}");
    assert!(session.undo().unwrap());
    assert_eq!(session.content().text, "");
    assert!(!session.can_undo());
    assert!(session.redo().unwrap());
    assert_eq!(session.content().text, "Hello ${name}");
}

#[test]
fn test_undo_redo_notify_listeners() {
    use std::cell::RefCell;
    use std::rc::Rc;

    let mut session = EditSession::new("seq", "a");
    let texts = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&texts);
    session.subscribe(move |content| sink.borrow_mut().push(content.text.clone()));

    session.apply_edit(Mutation::insert_text(1, "b")).unwrap();
    session.undo().unwrap();
    session.redo().unwrap();
    // Nothing left to redo: no notification
    session.redo().unwrap();

    assert_eq!(*texts.borrow(), vec!["ab", "a", "ab"]);
}
