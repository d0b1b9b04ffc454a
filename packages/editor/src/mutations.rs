//! # Prompt Mutations
//!
//! Discrete edit operations on a [`Document`], as produced by UI events.
//!
//! ## Addressing
//!
//! Positions are character offsets into the serialized text, where a
//! variable counts as its full `${name}` token and a line break as one
//! character. A position equal to a variable's start or end is *adjacent*
//! to it; anything in between is *inside* it.
//!
//! ## Mutation Semantics
//!
//! ### InsertText / Delete
//! - Adjacent edits never touch a variable; text lands in a sibling run
//! - Edits inside a variable turn it back into text first; recognition then
//!   creates a new variable if the result is still a valid token
//! - `\n` in inserted text becomes a line break
//!
//! ### InsertVariable
//! - Rejected inside another variable
//!
//! ### ReplaceAll
//! - Atomic replacement of the whole content (programmatic load)
//!
//! Every mutation validates before touching the document, so a failed
//! mutation leaves it unchanged.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::document::text_to_segments;
use crate::segment::{is_identifier, Segment, Variable};
use crate::Document;

/// Semantic edit operations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Mutation {
    /// Insert literal text (may contain newlines, e.g. a paste)
    InsertText { at: usize, text: String },

    /// Remove the characters in `start..end`
    Delete { start: usize, end: usize },

    /// Insert a single line break
    InsertLineBreak { at: usize },

    /// Insert a `${name}` token
    InsertVariable { at: usize, name: String },

    /// Replace the whole content
    ReplaceAll { text: String },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Position {position} is out of bounds (length {len})")]
    OutOfBounds { position: usize, len: usize },

    #[error("Invalid range {start}..{end}")]
    InvalidRange { start: usize, end: usize },

    #[error("Position {position} is inside variable `{name}`")]
    InsideVariable { position: usize, name: String },

    #[error("Range {start}..{end} spans more than one block")]
    CrossBlock { start: usize, end: usize },

    #[error("Invalid variable name `{0}`")]
    InvalidVariableName(String),
}

impl Mutation {
    pub fn insert_text(at: usize, text: impl Into<String>) -> Self {
        Mutation::InsertText {
            at,
            text: text.into(),
        }
    }

    pub fn delete(start: usize, end: usize) -> Self {
        Mutation::Delete { start, end }
    }

    pub fn insert_line_break(at: usize) -> Self {
        Mutation::InsertLineBreak { at }
    }

    pub fn insert_variable(at: usize, name: impl Into<String>) -> Self {
        Mutation::InsertVariable {
            at,
            name: name.into(),
        }
    }

    pub fn replace_all(text: impl Into<String>) -> Self {
        Mutation::ReplaceAll { text: text.into() }
    }

    /// Debug name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::InsertText { .. } => "InsertText",
            Mutation::Delete { .. } => "Delete",
            Mutation::InsertLineBreak { .. } => "InsertLineBreak",
            Mutation::InsertVariable { .. } => "InsertVariable",
            Mutation::ReplaceAll { .. } => "ReplaceAll",
        }
    }

    /// Check that this mutation can be applied to the document
    pub fn validate(&self, doc: &Document) -> Result<(), MutationError> {
        match self {
            Mutation::InsertText { at, .. } | Mutation::InsertLineBreak { at } => {
                doc.check_range(*at, *at)
            }

            Mutation::Delete { start, end } => doc.check_range(*start, *end),

            Mutation::InsertVariable { at, name } => {
                if !is_identifier(name) {
                    return Err(MutationError::InvalidVariableName(name.clone()));
                }
                doc.check_range(*at, *at)?;
                match doc.variable_at(*at) {
                    Some(variable) => Err(MutationError::InsideVariable {
                        position: *at,
                        name: variable.name().to_string(),
                    }),
                    None => Ok(()),
                }
            }

            Mutation::ReplaceAll { .. } => Ok(()),
        }
    }

    /// Whether applying this mutation would leave the text unchanged
    pub fn is_noop(&self, doc: &Document) -> bool {
        match self {
            Mutation::InsertText { text, .. } => text.is_empty(),
            Mutation::Delete { start, end } => start == end,
            Mutation::ReplaceAll { text } => *text == doc.to_text(),
            Mutation::InsertLineBreak { .. } | Mutation::InsertVariable { .. } => false,
        }
    }

    /// Apply mutation with validation
    pub fn apply(&self, doc: &mut Document) -> Result<(), MutationError> {
        self.validate(doc)?;

        match self {
            Mutation::InsertText { at, text } => {
                doc.splice(*at, *at, text_to_segments(text))?;
            }

            Mutation::Delete { start, end } => {
                doc.splice(*start, *end, Vec::new())?;
            }

            Mutation::InsertLineBreak { at } => {
                doc.splice(*at, *at, vec![Segment::LineBreak])?;
            }

            Mutation::InsertVariable { at, name } => {
                let variable = Variable::new(name.as_str())
                    .map_err(|_| MutationError::InvalidVariableName(name.clone()))?;
                doc.splice(*at, *at, vec![Segment::Variable(variable)])?;
            }

            Mutation::ReplaceAll { text } => doc.replace_text(text),
        }

        Ok(())
    }

    /// Create the mutation that undoes this one.
    ///
    /// Must be called on the document *before* this mutation is applied.
    pub fn to_inverse(&self, doc: &Document) -> Result<Mutation, MutationError> {
        self.validate(doc)?;

        let inverse = match self {
            Mutation::InsertText { at, text } => Mutation::delete(*at, at + text.chars().count()),

            Mutation::Delete { start, end } => {
                Mutation::insert_text(*start, doc.text_range(*start, *end)?)
            }

            Mutation::InsertLineBreak { at } => Mutation::delete(*at, at + 1),

            Mutation::InsertVariable { at, name } => Mutation::delete(*at, at + name.len() + 3),

            Mutation::ReplaceAll { .. } => Mutation::replace_all(doc.to_text()),
        };

        Ok(inverse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(text: &str, mutation: Mutation) -> Document {
        let mut doc = Document::parse(text);
        mutation.apply(&mut doc).unwrap();
        doc
    }

    fn var(name: &str) -> Segment {
        Segment::variable(name).unwrap()
    }

    #[test]
    fn test_insert_text_after_variable_creates_sibling() {
        let doc = apply("${x}", Mutation::insert_text(4, "a"));
        assert_eq!(doc.blocks()[0].segments(), &[var("x"), Segment::text("a")]);
        assert_eq!(doc.variables(), vec!["x"]);
    }

    #[test]
    fn test_insert_text_before_variable_creates_sibling() {
        let doc = apply("${x}", Mutation::insert_text(0, "a"));
        assert_eq!(doc.blocks()[0].segments(), &[Segment::text("a"), var("x")]);
    }

    #[test]
    fn test_insert_closing_brace_after_variable_stays_text() {
        let doc = apply("${x}", Mutation::insert_text(4, "y}"));
        assert_eq!(doc.blocks()[0].segments(), &[var("x"), Segment::text("y}")]);
    }

    #[test]
    fn test_typing_completes_a_token() {
        let mut doc = Document::parse("say ${na");
        Mutation::insert_text(8, "me}").apply(&mut doc).unwrap();
        assert_eq!(
            doc.blocks()[0].segments(),
            &[Segment::text("say "), var("name")]
        );
    }

    #[test]
    fn test_insert_inside_variable_renames_via_recognition() {
        let doc = apply("${ab}", Mutation::insert_text(3, "x"));
        assert_eq!(doc.blocks()[0].segments(), &[var("axb")]);
        assert_eq!(doc.to_text(), "${axb}");
    }

    #[test]
    fn test_insert_invalid_char_inside_variable_demotes_it() {
        let doc = apply("${ab}", Mutation::insert_text(3, "-"));
        assert_eq!(doc.blocks()[0].segments(), &[Segment::text("${a-b}")]);
        assert!(doc.variables().is_empty());
    }

    #[test]
    fn test_delete_closing_brace_demotes_variable() {
        let doc = apply("${foo} bar", Mutation::delete(5, 6));
        assert_eq!(doc.blocks()[0].segments(), &[Segment::text("${foo bar")]);
    }

    #[test]
    fn test_delete_whole_variable() {
        let doc = apply("a ${x} b", Mutation::delete(2, 6));
        assert_eq!(doc.blocks()[0].segments(), &[Segment::text("a  b")]);
    }

    #[test]
    fn test_delete_line_break_joins_lines() {
        let doc = apply("${a\n}", Mutation::delete(3, 4));
        assert_eq!(doc.blocks()[0].segments(), &[var("a")]);
    }

    #[test]
    fn test_insert_text_with_newlines() {
        let doc = apply("ab", Mutation::insert_text(1, "1\n2"));
        assert_eq!(
            doc.blocks()[0].segments(),
            &[Segment::text("a1"), Segment::LineBreak, Segment::text("2b")]
        );
    }

    #[test]
    fn test_insert_line_break_splits_run() {
        let doc = apply("ab", Mutation::insert_line_break(1));
        assert_eq!(doc.to_text(), "a\nb");
    }

    #[test]
    fn test_insert_variable() {
        let doc = apply("Hi !", Mutation::insert_variable(3, "who"));
        assert_eq!(
            doc.blocks()[0].segments(),
            &[Segment::text("Hi "), var("who"), Segment::text("!")]
        );
    }

    #[test]
    fn test_insert_variable_inside_variable_is_rejected() {
        let mut doc = Document::parse("${ab}");
        let result = Mutation::insert_variable(2, "c").apply(&mut doc);
        assert_eq!(
            result,
            Err(MutationError::InsideVariable {
                position: 2,
                name: "ab".to_string()
            })
        );
        assert_eq!(doc.to_text(), "${ab}");
    }

    #[test]
    fn test_insert_variable_rejects_bad_name() {
        let mut doc = Document::parse("");
        let result = Mutation::insert_variable(0, "no good").apply(&mut doc);
        assert_eq!(
            result,
            Err(MutationError::InvalidVariableName("no good".to_string()))
        );
    }

    #[test]
    fn test_out_of_bounds_leaves_document_unchanged() {
        let mut doc = Document::parse("abc");
        let result = Mutation::insert_text(4, "x").apply(&mut doc);
        assert_eq!(
            result,
            Err(MutationError::OutOfBounds { position: 4, len: 3 })
        );
        assert_eq!(doc.to_text(), "abc");
    }

    #[test]
    fn test_inverse_of_delete_restores_variables() {
        let mut doc = Document::parse("a ${x}\nb");
        let mutation = Mutation::delete(1, 8);
        let inverse = mutation.to_inverse(&doc).unwrap();
        assert_eq!(inverse, Mutation::insert_text(1, " ${x}\nb"));

        mutation.apply(&mut doc).unwrap();
        assert_eq!(doc.to_text(), "a");
        inverse.apply(&mut doc).unwrap();
        assert_eq!(doc, Document::parse("a ${x}\nb"));
    }

    #[test]
    fn test_inverse_of_insert_variable() {
        let doc = Document::parse("ab");
        let inverse = Mutation::insert_variable(1, "xy").to_inverse(&doc).unwrap();
        assert_eq!(inverse, Mutation::delete(1, 6));
    }

    #[test]
    fn test_noop_detection() {
        let doc = Document::parse("same");
        assert!(Mutation::insert_text(0, "").is_noop(&doc));
        assert!(Mutation::delete(2, 2).is_noop(&doc));
        assert!(Mutation::replace_all("same").is_noop(&doc));
        assert!(!Mutation::replace_all("other").is_noop(&doc));
        assert!(!Mutation::insert_line_break(0).is_noop(&doc));
    }
}
