//! # Prompt Editor
//!
//! Variable-aware text model behind the task prompt editor.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ host view: keystrokes, paste, loads         │
//! └─────────────────────────────────────────────┘
//!                     ↓ Mutation
//! ┌─────────────────────────────────────────────┐
//! │ session: Document lifecycle + history       │
//! │  - Apply mutations with validation          │
//! │  - Undo/redo with batching                  │
//! │  - Notify listeners once per settled edit   │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ document: blocks → segments                 │
//! │  TextRun | LineBreak | Variable(${name})    │
//! │  recognizer keeps every block canonical     │
//! └─────────────────────────────────────────────┘
//!                     ↓ PromptContent
//! ┌─────────────────────────────────────────────┐
//! │ host: persist text, derive input schema     │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Text is the source of truth**: a document always equals
//!    `Document::parse(&doc.to_text())`
//! 2. **Variables are atomic**: they are created by recognition and never
//!    edited in place
//! 3. **Edits are all-or-nothing**: a rejected mutation changes nothing
//!
//! ## Usage
//!
//! ```rust
//! use prompt_editor::{EditSession, Mutation};
//!
//! let mut session = EditSession::new("task-editor", "Summarize ${article}");
//! session.subscribe(|content| println!("variables: {:?}", content.variables));
//!
//! // Typing a token turns it into a variable
//! session.apply_edit(Mutation::insert_text(20, " for ${audience}"))?;
//! assert_eq!(session.content().variables, vec!["article", "audience"]);
//!
//! session.undo()?;
//! assert_eq!(session.content().text, "Summarize ${article}");
//! # Ok::<(), prompt_editor::EditorError>(())
//! ```

mod document;
mod errors;
mod mutations;
mod recognizer;
mod segment;
mod session;
mod undo_stack;

pub use document::{Block, Document, MutationResult, Segments};
pub use errors::EditorError;
pub use mutations::{Mutation, MutationError};
pub use recognizer::find_variable;
pub use segment::{is_identifier, Segment, Variable};
pub use session::{EditSession, ListenerId, PromptContent};
pub use undo_stack::{MutationBatch, UndoStack};

/// Parse flat text into a document.
pub fn parse(text: &str) -> Document {
    Document::parse(text)
}

/// Serialize a document back to flat text.
pub fn serialize(doc: &Document) -> String {
    doc.to_text()
}

/// Variable names in first-seen order, without duplicates.
pub fn extract_variable_names(doc: &Document) -> Vec<String> {
    doc.variables()
}
