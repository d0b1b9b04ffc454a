//! # Segments
//!
//! The atomic units of prompt content. A block is a flat list of segments:
//!
//! ```text
//! "Hello ${name}!\nBye"
//!   → TextRun("Hello ") Variable(name) TextRun("!") LineBreak TextRun("Bye")
//! ```

use std::fmt;

use crate::EditorError;

/// A `${name}` placeholder.
///
/// The name is validated on construction and never changes afterwards; edits
/// that touch a variable's text produce new segments instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Variable {
    name: String,
}

impl Variable {
    /// Create a variable from a bare identifier (`foo`).
    pub fn new(name: impl Into<String>) -> Result<Self, EditorError> {
        let name = name.into();
        if !is_identifier(&name) {
            return Err(EditorError::InvalidVariableName(name));
        }
        Ok(Self { name })
    }

    /// Create a variable from its raw token text (`${foo}`).
    pub fn from_token(raw: &str) -> Result<Self, EditorError> {
        let inner = raw
            .strip_prefix("${")
            .and_then(|rest| rest.strip_suffix('}'))
            .ok_or_else(|| EditorError::InvalidTokenFormat(raw.to_string()))?;
        Self::new(inner)
    }

    /// Build a variable from a token the recognizer already matched.
    pub(crate) fn from_match(token: &str) -> Self {
        Self {
            name: token[2..token.len() - 1].to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The token text, e.g. `${foo}`.
    pub fn token(&self) -> String {
        format!("${{{}}}", self.name)
    }

    /// Length of the token text in characters.
    pub fn token_len(&self) -> usize {
        // Identifiers are ASCII, so bytes == chars.
        self.name.len() + 3
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${{{}}}", self.name)
    }
}

/// Check `[a-zA-Z_][a-zA-Z0-9_]*`.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// One unit of block content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text. Never contains `\n`.
    TextRun(String),

    /// An explicit newline.
    LineBreak,

    /// An atomic `${name}` token.
    Variable(Variable),
}

impl Segment {
    pub fn text(content: impl Into<String>) -> Self {
        Segment::TextRun(content.into())
    }

    /// Variable segment from a bare name.
    pub fn variable(name: impl Into<String>) -> Result<Self, EditorError> {
        Variable::new(name).map(Segment::Variable)
    }

    /// Length of the serialized form in characters.
    pub fn len(&self) -> usize {
        match self {
            Segment::TextRun(content) => content.chars().count(),
            Segment::LineBreak => 1,
            Segment::Variable(variable) => variable.token_len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Segment::TextRun(content) if content.is_empty())
    }

    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            Segment::Variable(variable) => Some(variable),
            _ => None,
        }
    }

    /// Append the serialized form to `out`.
    pub fn write_text(&self, out: &mut String) {
        match self {
            Segment::TextRun(content) => out.push_str(content),
            Segment::LineBreak => out.push('\n'),
            Segment::Variable(variable) => {
                out.push_str("${");
                out.push_str(variable.name());
                out.push('}');
            }
        }
    }
}
