mod types;
pub use types::*;

use crate::lcs::{DiffOp, Script};
use log::debug;

struct RowBuilder {
    old_line: usize,
    new_line: usize,
    rows: Vec<RenderRow>,
}

impl RowBuilder {
    fn new() -> Self {
        RowBuilder {
            old_line: 0,
            new_line: 0,
            rows: vec![],
        }
    }

    fn old_side(&mut self, content: HighlightedText) -> Side {
        self.old_line += 1;
        Side {
            line: self.old_line,
            content,
        }
    }

    fn new_side(&mut self, content: HighlightedText) -> Side {
        self.new_line += 1;
        Side {
            line: self.new_line,
            content,
        }
    }

    fn keep(&mut self, a: String, b: String) {
        let old = self.old_side(HighlightedText::plain(a));
        let new = self.new_side(HighlightedText::plain(b));
        self.rows.push(RenderRow::Keep { old, new });
    }

    fn change(&mut self, a: String, b: String) {
        let (a, b) = intraline(&a, &b);
        let old = self.old_side(a);
        let new = self.new_side(b);
        self.rows.push(RenderRow::Change { old, new });
    }

    fn delete(&mut self, a: String) {
        let old = self.old_side(HighlightedText::full(a));
        self.rows.push(RenderRow::Delete { old });
    }

    fn insert(&mut self, b: String) {
        let new = self.new_side(HighlightedText::full(b));
        self.rows.push(RenderRow::Insert { new });
    }

    fn finish(self) -> Vec<RenderRow> {
        self.rows
    }
}

/// Turns an edit script into side-by-side rows.
///
/// A delete immediately followed by an insert becomes a single change row
/// with the differing middle of both lines highlighted. Every other op
/// maps to exactly one row, in script order.
pub fn rows(script: Script<String>) -> Vec<RenderRow> {
    let mut builder = RowBuilder::new();
    let mut ops = script.into_iter().peekable();
    while let Some(op) = ops.next() {
        match op {
            DiffOp::Keep(a, b) => builder.keep(a, b),
            DiffOp::Delete(a) => match ops.next_if(|next| matches!(next, DiffOp::Insert(_))) {
                Some(DiffOp::Insert(b)) => builder.change(a, b),
                _ => builder.delete(a),
            },
            DiffOp::Insert(b) => builder.insert(b),
        }
    }
    let rows = builder.finish();
    debug!("built {} rows", rows.len());
    rows
}

/// Highlights the part of two lines that lies between their common
/// prefix and their common suffix.
///
/// The suffix is searched only in what remains after the prefix, so the
/// two never overlap. A side whose middle is empty gets no highlight.
pub fn intraline(a: &str, b: &str) -> (HighlightedText, HighlightedText) {
    if a == b {
        return (HighlightedText::plain(a), HighlightedText::plain(b));
    }

    let prefix: usize = a
        .chars()
        .zip(b.chars())
        .take_while(|(x, y)| x == y)
        .map(|(x, _)| x.len_utf8())
        .sum();
    let suffix: usize = a[prefix..]
        .chars()
        .rev()
        .zip(b[prefix..].chars().rev())
        .take_while(|(x, y)| x == y)
        .map(|(x, _)| x.len_utf8())
        .sum();

    (mark(a, prefix, suffix), mark(b, prefix, suffix))
}

fn mark(text: &str, prefix: usize, suffix: usize) -> HighlightedText {
    let end = text.len() - suffix;
    HighlightedText {
        text: text.to_string(),
        highlight: (prefix < end).then_some(prefix..end),
    }
}

pub fn stats(rows: &[RenderRow]) -> DiffStats {
    rows.iter().fold(DiffStats::default(), |mut acc, row| {
        match row {
            RenderRow::Keep { .. } => acc.kept += 1,
            RenderRow::Change { .. } => acc.changed += 1,
            RenderRow::Delete { .. } => acc.deleted += 1,
            RenderRow::Insert { .. } => acc.inserted += 1,
        }
        acc
    })
}
