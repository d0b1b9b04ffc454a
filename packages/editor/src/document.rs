//! # Document
//!
//! Structured representation of prompt text.
//!
//! A Document is an ordered list of blocks, each holding a flat list of
//! segments. Text loaded with [`Document::parse`] always produces a single
//! block; the block layer exists so renderers can map it onto paragraphs.
//!
//! ## Lifecycle
//!
//! ```text
//! parse → apply(mutation)* → to_text
//!   ↓            ↓              ↓
//! String    canonical form    String
//! ```
//!
//! After every change each block is canonical: no empty or adjacent text
//! runs and no unrecognized `${identifier}` left in a text run. A document
//! therefore always equals `Document::parse(&doc.to_text())`.

use std::collections::HashSet;
use std::fmt;

use crate::recognizer::canonicalize;
use crate::segment::{Segment, Variable};
use crate::{EditorError, Mutation, MutationError};

/// A paragraph-equivalent container of segments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    segments: Vec<Segment>,
}

impl Block {
    /// Build a block from raw segments, normalizing them.
    pub fn new(segments: Vec<Segment>) -> Self {
        Self {
            segments: canonicalize(segments),
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Length of the serialized block in characters.
    pub fn len(&self) -> usize {
        self.segments.iter().map(Segment::len).sum()
    }

    /// Replace the characters in `start..end` with `replacement`.
    ///
    /// Variables straddling either boundary are turned back into text first,
    /// so the edit lands on plain characters. Variables that merely touch a
    /// boundary are untouched.
    fn splice(&mut self, start: usize, end: usize, replacement: Vec<Segment>) -> Vec<Segment> {
        let segments = std::mem::take(&mut self.segments);
        let (mut before, rest) = split_segments(segments, start);
        let (removed, after) = split_segments(rest, end - start);

        before.extend(replacement);
        before.extend(after);
        self.segments = canonicalize(before);

        removed
    }
}

/// Split a segment list at a character offset.
fn split_segments(segments: Vec<Segment>, at: usize) -> (Vec<Segment>, Vec<Segment>) {
    let mut left = Vec::new();
    let mut right = Vec::new();
    let mut offset = 0;

    for segment in segments {
        let len = segment.len();
        let (start, end) = (offset, offset + len);
        offset = end;

        if end <= at {
            left.push(segment);
        } else if start >= at {
            right.push(segment);
        } else {
            let text = match segment {
                Segment::TextRun(content) => content,
                Segment::Variable(variable) => {
                    tracing::debug!(name = variable.name(), "Demoting variable to text");
                    variable.token()
                }
                Segment::LineBreak => unreachable!("line breaks have length 1"),
            };
            let (head, tail) = split_at_char(&text, at - start);
            left.push(Segment::text(head));
            right.push(Segment::text(tail));
        }
    }

    (left, right)
}

fn split_at_char(text: &str, chars: usize) -> (&str, &str) {
    let byte = text
        .char_indices()
        .nth(chars)
        .map(|(index, _)| index)
        .unwrap_or(text.len());
    text.split_at(byte)
}

/// Convert flat text into segments, turning `\n` into line breaks.
pub(crate) fn text_to_segments(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();

    for (index, line) in text.split('\n').enumerate() {
        if index > 0 {
            segments.push(Segment::LineBreak);
        }
        if !line.is_empty() {
            segments.push(Segment::text(line));
        }
    }

    segments
}

/// Editable prompt document
///
/// Equality compares content only; `version` is bookkeeping.
#[derive(Debug, Clone)]
pub struct Document {
    blocks: Vec<Block>,

    /// Current version number (increments on each applied mutation)
    pub version: u64,
}

impl Document {
    /// Parse flat text into a document.
    ///
    /// Never fails: any string is a valid prompt.
    pub fn parse(text: &str) -> Self {
        Self {
            blocks: vec![Block::new(text_to_segments(text))],
            version: 0,
        }
    }

    /// Build a document from pre-built blocks.
    ///
    /// Block seams serialize to nothing, so only content that cannot form a
    /// token across a seam round-trips. Public construction goes through
    /// [`Document::parse`], which always yields one block.
    #[cfg(test)]
    pub(crate) fn from_blocks(blocks: Vec<Block>) -> Self {
        let blocks = if blocks.is_empty() {
            vec![Block::default()]
        } else {
            blocks
        };
        Self { blocks, version: 0 }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Depth-first traversal of every segment.
    pub fn segments(&self) -> Segments<'_> {
        Segments {
            blocks: self.blocks.iter(),
            current: <&[Segment]>::default().iter(),
        }
    }

    /// Serialize back to flat text.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for segment in self.segments() {
            segment.write_text(&mut out);
        }
        out
    }

    /// Variable names in first-seen order, without duplicates.
    pub fn variables(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.segments()
            .filter_map(Segment::as_variable)
            .filter(|variable| seen.insert(variable.name()))
            .map(|variable| variable.name().to_string())
            .collect()
    }

    /// Length of the serialized text in characters.
    pub fn len(&self) -> usize {
        self.blocks.iter().map(Block::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.iter().all(Block::is_empty)
    }

    /// The serialized characters in `start..end`.
    pub fn text_range(&self, start: usize, end: usize) -> Result<String, MutationError> {
        self.check_range(start, end)?;
        Ok(self.to_text().chars().skip(start).take(end - start).collect())
    }

    /// The variable whose token strictly contains `position`, if any.
    ///
    /// Offsets at a token's first or last boundary are outside it.
    pub fn variable_at(&self, position: usize) -> Option<&Variable> {
        let mut offset = 0;
        for segment in self.segments() {
            let len = segment.len();
            if let Segment::Variable(variable) = segment {
                if offset < position && position < offset + len {
                    return Some(variable);
                }
            }
            offset += len;
            if offset >= position {
                break;
            }
        }
        None
    }

    pub(crate) fn check_position(&self, position: usize) -> Result<(), MutationError> {
        let len = self.len();
        if position > len {
            return Err(MutationError::OutOfBounds { position, len });
        }
        Ok(())
    }

    pub(crate) fn check_range(&self, start: usize, end: usize) -> Result<(), MutationError> {
        if start > end {
            return Err(MutationError::InvalidRange { start, end });
        }
        self.check_position(end)?;
        let (start_block, _) = self.locate(start)?;
        let (end_block, _) = self.locate(end)?;
        if start_block != end_block {
            return Err(MutationError::CrossBlock { start, end });
        }
        Ok(())
    }

    /// Map a document offset to (block index, offset within block).
    ///
    /// An offset on the seam between two blocks belongs to the earlier one.
    fn locate(&self, position: usize) -> Result<(usize, usize), MutationError> {
        let mut offset = 0;
        for (index, block) in self.blocks.iter().enumerate() {
            let len = block.len();
            if position <= offset + len {
                return Ok((index, position - offset));
            }
            offset += len;
        }
        Err(MutationError::OutOfBounds {
            position,
            len: offset,
        })
    }

    /// Replace `start..end` with `replacement` and re-canonicalize.
    ///
    /// Returns the removed segments.
    pub(crate) fn splice(
        &mut self,
        start: usize,
        end: usize,
        replacement: Vec<Segment>,
    ) -> Result<Vec<Segment>, MutationError> {
        self.check_range(start, end)?;
        let (block, local_start) = self.locate(start)?;
        let local_end = local_start + (end - start);
        Ok(self.blocks[block].splice(local_start, local_end, replacement))
    }

    /// Swap the whole content for freshly parsed `text`.
    pub(crate) fn replace_text(&mut self, text: &str) {
        self.blocks = vec![Block::new(text_to_segments(text))];
    }

    /// Apply a mutation
    pub fn apply(&mut self, mutation: &Mutation) -> Result<MutationResult, EditorError> {
        let changed = !mutation.is_noop(self);
        mutation.apply(self)?;
        self.version += 1;

        tracing::debug!(
            mutation = mutation.name(),
            version = self.version,
            changed,
            "Applied mutation"
        );

        Ok(MutationResult {
            version: self.version,
            changed,
        })
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.blocks == other.blocks
    }
}

impl Eq for Document {}

impl Default for Document {
    fn default() -> Self {
        Self::parse("")
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in self.segments() {
            match segment {
                Segment::TextRun(content) => f.write_str(content)?,
                Segment::LineBreak => f.write_str("\n")?,
                Segment::Variable(variable) => write!(f, "{variable}")?,
            }
        }
        Ok(())
    }
}

/// Result of applying a mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutationResult {
    /// New version number
    pub version: u64,

    /// Whether the text changed
    pub changed: bool,
}

/// Depth-first iterator over block → segment.
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    blocks: std::slice::Iter<'a, Block>,
    current: std::slice::Iter<'a, Segment>,
}

impl<'a> Iterator for Segments<'a> {
    type Item = &'a Segment;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(segment) = self.current.next() {
                return Some(segment);
            }
            self.current = self.blocks.next()?.segments.iter();
        }
    }
}
