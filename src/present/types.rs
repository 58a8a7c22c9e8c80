use serde::Serialize;
use std::ops::Range;

/// A line of text with at most one highlighted byte range.
/// The range always falls on `char` boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HighlightedText {
    pub text: String,
    pub highlight: Option<Range<usize>>,
}

impl HighlightedText {
    pub fn plain(text: impl Into<String>) -> Self {
        HighlightedText {
            text: text.into(),
            highlight: None,
        }
    }

    /// The whole line is marked, even when it is empty.
    pub fn full(text: impl Into<String>) -> Self {
        let text = text.into();
        let highlight = Some(0..text.len());
        HighlightedText { text, highlight }
    }

    /// Unmarked text before the highlight, the highlight, and unmarked text after it.
    pub fn parts(&self) -> (&str, Option<&str>, &str) {
        match &self.highlight {
            Some(r) => (
                &self.text[..r.start],
                Some(&self.text[r.clone()]),
                &self.text[r.end..],
            ),
            None => (&self.text, None, ""),
        }
    }

    pub fn highlighted(&self) -> Option<&str> {
        self.parts().1
    }
}

/// One side of a row, numbered from 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Side {
    pub line: usize,
    pub content: HighlightedText,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RenderRow {
    Keep { old: Side, new: Side },
    Change { old: Side, new: Side },
    Delete { old: Side },
    Insert { new: Side },
}

impl RenderRow {
    /// Side A, absent on insert rows.
    pub fn left(&self) -> Option<&Side> {
        match self {
            RenderRow::Keep { old, .. } | RenderRow::Change { old, .. } | RenderRow::Delete { old } => {
                Some(old)
            }
            RenderRow::Insert { .. } => None,
        }
    }

    /// Side B, absent on delete rows.
    pub fn right(&self) -> Option<&Side> {
        match self {
            RenderRow::Keep { new, .. } | RenderRow::Change { new, .. } | RenderRow::Insert { new } => {
                Some(new)
            }
            RenderRow::Delete { .. } => None,
        }
    }
}

/// Row counts per kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiffStats {
    pub kept: usize,
    pub changed: usize,
    pub deleted: usize,
    pub inserted: usize,
}
