//! # Variable Recognition
//!
//! Keeps a block's segment list in canonical form after every change:
//!
//! 1. Line breaks inside text runs become `LineBreak` segments
//! 2. Adjacent text runs are merged and empty runs dropped
//! 3. Every `${identifier}` inside a text run is cut out into a `Variable`
//!
//! Matching is leftmost-first and non-overlapping. Existing variables are
//! never rescanned.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::segment::{Segment, Variable};

static VARIABLE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{[a-zA-Z_][a-zA-Z0-9_]*\}").expect("valid variable pattern")
});

/// Byte range of the leftmost variable token in `text`.
pub fn find_variable(text: &str) -> Option<Range<usize>> {
    VARIABLE_PATTERN.find(text).map(|m| m.range())
}

/// Normalize and recognize a segment list.
pub fn canonicalize(segments: Vec<Segment>) -> Vec<Segment> {
    recognize(merge_text_runs(split_line_breaks(segments)))
}

/// Cut every `\n` inside a text run out into a `LineBreak`.
pub fn split_line_breaks(segments: Vec<Segment>) -> Vec<Segment> {
    let mut result = Vec::with_capacity(segments.len());
    for segment in segments {
        match segment {
            Segment::TextRun(content) if content.contains('\n') => {
                for (index, line) in content.split('\n').enumerate() {
                    if index > 0 {
                        result.push(Segment::LineBreak);
                    }
                    result.push(Segment::text(line));
                }
            }
            other => result.push(other),
        }
    }
    result
}

/// Merge neighbouring text runs and drop empty ones.
pub fn merge_text_runs(segments: Vec<Segment>) -> Vec<Segment> {
    let mut merged: Vec<Segment> = Vec::with_capacity(segments.len());

    for segment in segments {
        match segment {
            Segment::TextRun(content) if content.is_empty() => {}
            Segment::TextRun(content) => match merged.last_mut() {
                Some(Segment::TextRun(previous)) => previous.push_str(&content),
                _ => merged.push(Segment::TextRun(content)),
            },
            other => merged.push(other),
        }
    }

    merged
}

/// Split every text run around the variable tokens it contains.
pub fn recognize(segments: Vec<Segment>) -> Vec<Segment> {
    let mut result = Vec::with_capacity(segments.len());

    for segment in segments {
        match segment {
            Segment::TextRun(content) => split_run(&content, &mut result),
            other => result.push(other),
        }
    }

    result
}

fn split_run(content: &str, out: &mut Vec<Segment>) {
    let mut rest = content;

    while let Some(range) = find_variable(rest) {
        if range.start > 0 {
            out.push(Segment::text(&rest[..range.start]));
        }
        let token = &rest[range.clone()];
        tracing::debug!(token, "Recognized variable");
        out.push(Segment::Variable(Variable::from_match(token)));
        rest = &rest[range.end..];
    }

    if !rest.is_empty() {
        out.push(Segment::text(rest));
    }
}
