//! # Edit Session Management
//!
//! An EditSession is one editor instance: it owns the document for the
//! lifetime of the view, its undo history and the listeners that want to
//! hear about content changes.
//!
//! Every settled mutation that changes the text emits exactly one
//! [`PromptContent`] to each listener, synchronously, before the next
//! mutation is accepted. Inside a batch, notifications are held back and
//! emitted once when the batch ends.

use serde::{Deserialize, Serialize};

use crate::{Document, EditorError, Mutation, MutationResult, UndoStack};

/// Snapshot handed to listeners after each change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptContent {
    /// Serialized prompt text
    pub text: String,

    /// Variable names, first-seen order, unique
    pub variables: Vec<String>,
}

impl From<&Document> for PromptContent {
    fn from(doc: &Document) -> Self {
        Self {
            text: doc.to_text(),
            variables: doc.variables(),
        }
    }
}

/// Handle returned by [`EditSession::subscribe`]
pub type ListenerId = u64;

type Listener = Box<dyn FnMut(&PromptContent)>;

/// Single editing session
pub struct EditSession {
    /// Unique session identifier
    pub id: String,

    document: Document,

    history: UndoStack,

    listeners: Vec<(ListenerId, Listener)>,

    next_listener_id: ListenerId,

    /// Text at the start of the open batch, if any
    batch_start: Option<String>,
}

impl EditSession {
    /// Create new edit session seeded with `text`
    pub fn new(id: impl Into<String>, text: &str) -> Self {
        Self {
            id: id.into(),
            document: Document::parse(text),
            history: UndoStack::new(),
            listeners: Vec::new(),
            next_listener_id: 0,
            batch_start: None,
        }
    }

    /// Replace the document with freshly loaded content.
    ///
    /// Clears history and any open batch, then notifies listeners.
    pub fn initialize(&mut self, text: &str) {
        tracing::debug!(session = %self.id, len = text.len(), "Initializing session");

        self.document = Document::parse(text);
        self.history.clear();
        self.batch_start = None;
        self.notify();
    }

    /// Apply a user edit and record it for undo
    pub fn apply_edit(&mut self, mutation: Mutation) -> Result<MutationResult, EditorError> {
        let result = self
            .history
            .apply(&mutation, &mut self.document)
            .inspect_err(|err| {
                tracing::warn!(session = %self.id, mutation = mutation.name(), %err, "Rejected edit");
            })?;

        if result.changed && !self.history.is_batching() {
            self.notify();
        }

        Ok(result)
    }

    /// Undo the last edit (or batch). Returns false if there was nothing to undo.
    pub fn undo(&mut self) -> Result<bool, EditorError> {
        self.end_batch();
        let undone = self.history.undo(&mut self.document)?;
        if undone {
            self.notify();
        }
        Ok(undone)
    }

    /// Redo the last undone edit (or batch).
    pub fn redo(&mut self) -> Result<bool, EditorError> {
        self.end_batch();
        let redone = self.history.redo(&mut self.document)?;
        if redone {
            self.notify();
        }
        Ok(redone)
    }

    /// Group the following edits into one undo step and one notification.
    pub fn begin_batch(&mut self, description: Option<&str>) {
        self.end_batch();
        self.history.begin_batch();
        if let Some(description) = description {
            self.history.set_batch_description(description);
        }
        self.batch_start = Some(self.document.to_text());
    }

    /// Close the open batch, notifying once if the text changed.
    pub fn end_batch(&mut self) {
        self.history.end_batch();
        if let Some(start) = self.batch_start.take() {
            if start != self.document.to_text() {
                self.notify();
            }
        }
    }

    /// Register a change listener
    pub fn subscribe(&mut self, listener: impl FnMut(&PromptContent) + 'static) -> ListenerId {
        let id = self.next_listener_id;
        self.next_listener_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    /// Current text and variables
    pub fn content(&self) -> PromptContent {
        PromptContent::from(&self.document)
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn notify(&mut self) {
        if self.listeners.is_empty() {
            return;
        }
        let content = self.content();
        for (_, listener) in &mut self.listeners {
            listener(&content);
        }
    }
}

impl std::fmt::Debug for EditSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditSession")
            .field("id", &self.id)
            .field("document", &self.document)
            .field("history", &self.history)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recording(session: &mut EditSession) -> Rc<RefCell<Vec<PromptContent>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        session.subscribe(move |content| sink.borrow_mut().push(content.clone()));
        seen
    }

    #[test]
    fn test_session_creation() {
        let session = EditSession::new("client-1", "Hello ${name}");

        assert_eq!(session.id, "client-1");
        assert_eq!(session.content().variables, vec!["name"]);
        assert!(!session.can_undo());
    }

    #[test]
    fn test_edit_notifies_once() {
        let mut session = EditSession::new("s", "Hi");
        let seen = recording(&mut session);

        session
            .apply_edit(Mutation::insert_text(2, " ${who}"))
            .unwrap();

        assert_eq!(
            *seen.borrow(),
            vec![PromptContent {
                text: "Hi ${who}".to_string(),
                variables: vec!["who".to_string()],
            }]
        );
    }

    #[test]
    fn test_noop_and_failed_edits_do_not_notify() {
        let mut session = EditSession::new("s", "Hi");
        let seen = recording(&mut session);

        session.apply_edit(Mutation::delete(1, 1)).unwrap();
        assert!(session.apply_edit(Mutation::delete(0, 9)).is_err());

        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_batch_notifies_once() {
        let mut session = EditSession::new("s", "");
        let seen = recording(&mut session);

        session.begin_batch(Some("paste"));
        session.apply_edit(Mutation::insert_text(0, "${a}")).unwrap();
        session.apply_edit(Mutation::insert_text(4, " ${b}")).unwrap();
        assert!(seen.borrow().is_empty());
        session.end_batch();

        assert_eq!(seen.borrow().len(), 1);
        assert_eq!(seen.borrow()[0].variables, vec!["a", "b"]);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let mut session = EditSession::new("s", "");
        let seen = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&seen);
        let id = session.subscribe(move |_| *sink.borrow_mut() += 1);

        session.apply_edit(Mutation::insert_text(0, "a")).unwrap();
        assert!(session.unsubscribe(id));
        assert!(!session.unsubscribe(id));
        session.apply_edit(Mutation::insert_text(1, "b")).unwrap();

        assert_eq!(*seen.borrow(), 1);
    }
}
