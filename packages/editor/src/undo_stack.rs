//! # Undo/Redo Stack
//!
//! Tracks mutation history and enables undo/redo operations.
//!
//! ## Design
//!
//! - Each mutation records its inverse before being applied
//! - Undo applies the inverse and moves mutation to redo stack
//! - Redo reapplies the original mutation
//! - New mutations clear the redo stack
//! - Mutations that leave the text unchanged are not recorded
//! - Supports batched operations (group multiple mutations as one undo step)
//!
//! ## Example
//!
//! ```rust
//! use prompt_editor::{Document, Mutation, UndoStack};
//!
//! let mut doc = Document::parse("Hello");
//! let mut stack = UndoStack::new();
//!
//! stack.apply(&Mutation::insert_text(5, " ${name}"), &mut doc)?;
//! assert_eq!(doc.variables(), vec!["name"]);
//!
//! stack.undo(&mut doc)?;
//! assert_eq!(doc.to_text(), "Hello");
//!
//! stack.redo(&mut doc)?;
//! assert_eq!(doc.to_text(), "Hello ${name}");
//! # Ok::<(), prompt_editor::EditorError>(())
//! ```

use crate::{Document, EditorError, Mutation, MutationResult};

/// A group of mutations that should be undone/redone together
#[derive(Debug, Clone, Default)]
pub struct MutationBatch {
    /// The mutations in this batch (in application order)
    pub mutations: Vec<Mutation>,

    /// The inverse mutations (in reverse order for undo)
    pub inverses: Vec<Mutation>,

    /// Optional description of this batch
    pub description: Option<String>,
}

impl MutationBatch {
    /// Create a single-mutation batch
    pub fn single(mutation: Mutation, inverse: Mutation) -> Self {
        Self {
            mutations: vec![mutation],
            inverses: vec![inverse],
            description: None,
        }
    }
}

/// Undo/redo stack for document editing
#[derive(Debug)]
pub struct UndoStack {
    /// Stack of applied mutations (most recent last)
    undo_stack: Vec<MutationBatch>,

    /// Stack of undone mutations (most recent last)
    redo_stack: Vec<MutationBatch>,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,

    /// Currently building a batch
    current_batch: Option<MutationBatch>,
}

impl UndoStack {
    /// Create a new undo stack with default max levels (100)
    pub fn new() -> Self {
        Self::with_max_levels(100)
    }

    /// Create an undo stack with custom max levels
    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_levels,
            current_batch: None,
        }
    }

    /// Apply a mutation and record it for undo
    pub fn apply(
        &mut self,
        mutation: &Mutation,
        doc: &mut Document,
    ) -> Result<MutationResult, EditorError> {
        // Generate inverse before applying
        let inverse = mutation.to_inverse(doc)?;

        let result = doc.apply(mutation)?;
        if !result.changed {
            return Ok(result);
        }

        if let Some(batch) = &mut self.current_batch {
            batch.mutations.push(mutation.clone());
            batch.inverses.insert(0, inverse);
        } else {
            self.push_batch(MutationBatch::single(mutation.clone(), inverse));
        }

        Ok(result)
    }

    /// Start a batch of mutations (will be undone/redone together)
    pub fn begin_batch(&mut self) {
        self.current_batch = Some(MutationBatch::default());
    }

    /// End the current batch and push to undo stack
    pub fn end_batch(&mut self) {
        if let Some(batch) = self.current_batch.take() {
            if !batch.mutations.is_empty() {
                self.push_batch(batch);
            }
        }
    }

    /// Whether a batch is open
    pub fn is_batching(&self) -> bool {
        self.current_batch.is_some()
    }

    /// Set description for current batch (if batching)
    pub fn set_batch_description(&mut self, description: impl Into<String>) {
        if let Some(batch) = &mut self.current_batch {
            batch.description = Some(description.into());
        }
    }

    fn push_batch(&mut self, batch: MutationBatch) {
        self.undo_stack.push(batch);

        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.remove(0);
        }

        // New action invalidates future
        self.redo_stack.clear();
    }

    /// Undo the most recent mutation/batch
    pub fn undo(&mut self, doc: &mut Document) -> Result<bool, EditorError> {
        // An open batch is closed first so it can be undone as a unit.
        self.end_batch();

        let Some(batch) = self.undo_stack.pop() else {
            return Ok(false);
        };

        for inverse in &batch.inverses {
            doc.apply(inverse)?;
        }
        self.redo_stack.push(batch);

        Ok(true)
    }

    /// Redo the most recently undone mutation/batch
    pub fn redo(&mut self, doc: &mut Document) -> Result<bool, EditorError> {
        let Some(batch) = self.redo_stack.pop() else {
            return Ok(false);
        };

        for mutation in &batch.mutations {
            doc.apply(mutation)?;
        }
        self.undo_stack.push(batch);

        Ok(true)
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Get the number of undo levels available
    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    /// Get the number of redo levels available
    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    /// Clear all undo/redo history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.current_batch = None;
    }

    /// Get description of the next undo operation
    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack
            .last()
            .and_then(|batch| batch.description.as_deref())
    }

    /// Get description of the next redo operation
    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack
            .last()
            .and_then(|batch| batch.description.as_deref())
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undo_stack_creation() {
        let stack = UndoStack::new();
        assert_eq!(stack.undo_levels(), 0);
        assert_eq!(stack.redo_levels(), 0);
        assert!(!stack.can_undo());
        assert!(!stack.can_redo());
    }

    #[test]
    fn test_apply_and_undo_text_mutation() {
        let mut doc = Document::parse("Hello");
        let mut stack = UndoStack::new();

        stack
            .apply(&Mutation::insert_text(5, " World"), &mut doc)
            .unwrap();
        assert_eq!(doc.to_text(), "Hello World");
        assert_eq!(stack.undo_levels(), 1);

        assert!(stack.undo(&mut doc).unwrap());
        assert_eq!(doc.to_text(), "Hello");
        assert_eq!(stack.redo_levels(), 1);

        assert!(stack.redo(&mut doc).unwrap());
        assert_eq!(doc.to_text(), "Hello World");
        assert_eq!(stack.undo_levels(), 1);
        assert_eq!(stack.redo_levels(), 0);
    }

    #[test]
    fn test_batched_mutations() {
        let mut doc = Document::parse("");
        let mut stack = UndoStack::new();

        assert!(!stack.is_batching());
        stack.begin_batch();
        assert!(stack.is_batching());
        stack.set_batch_description("Type greeting");
        for (at, ch) in "Hi ${you}".chars().enumerate() {
            stack
                .apply(&Mutation::insert_text(at, ch.to_string()), &mut doc)
                .unwrap();
        }
        stack.end_batch();
        assert!(!stack.is_batching());

        assert_eq!(doc.variables(), vec!["you"]);
        assert_eq!(stack.undo_levels(), 1);
        assert_eq!(stack.undo_description(), Some("Type greeting"));

        stack.undo(&mut doc).unwrap();
        assert_eq!(doc.to_text(), "");
        assert_eq!(stack.redo_description(), Some("Type greeting"));

        stack.redo(&mut doc).unwrap();
        assert_eq!(doc.to_text(), "Hi ${you}");
    }

    #[test]
    fn test_new_mutation_clears_redo() {
        let mut doc = Document::parse("Hello");
        let mut stack = UndoStack::new();

        stack.apply(&Mutation::delete(0, 1), &mut doc).unwrap();
        stack.undo(&mut doc).unwrap();
        assert_eq!(stack.redo_levels(), 1);

        stack
            .apply(&Mutation::insert_line_break(5), &mut doc)
            .unwrap();
        assert_eq!(stack.redo_levels(), 0);
    }

    #[test]
    fn test_noop_is_not_recorded() {
        let mut doc = Document::parse("Hello");
        let mut stack = UndoStack::new();

        let result = stack.apply(&Mutation::delete(2, 2), &mut doc).unwrap();
        assert!(!result.changed);
        assert_eq!(stack.undo_levels(), 0);
    }

    #[test]
    fn test_failed_mutation_is_not_recorded() {
        let mut doc = Document::parse("Hello");
        let mut stack = UndoStack::new();

        assert!(stack.apply(&Mutation::delete(3, 10), &mut doc).is_err());
        assert_eq!(stack.undo_levels(), 0);
        assert_eq!(doc.to_text(), "Hello");
    }

    #[test]
    fn test_max_levels_enforced() {
        let mut doc = Document::parse("");
        let mut stack = UndoStack::with_max_levels(2);

        for i in 0..3 {
            stack
                .apply(&Mutation::insert_text(i, "x"), &mut doc)
                .unwrap();
        }

        assert_eq!(stack.undo_levels(), 2);
    }
}
