pub mod types;
pub use types::*;

use crate::text::split_lines;
use log::{debug, warn};
use std::cmp::max;

/// Tables above this many cells get a warning, the diff is still computed.
const LARGE_TABLE: usize = 4_000 * 4_000;

/// `cells[i * width + j]` holds the LCS length of `old[i..]` and `new[j..]`.
struct Table {
    cells: Vec<usize>,
    width: usize,
}

impl Table {
    fn new(rows: usize, cols: usize) -> Self {
        Table {
            cells: vec![0; rows * cols],
            width: cols,
        }
    }

    fn get(&self, i: usize, j: usize) -> usize {
        self.cells[i * self.width + j]
    }

    fn set(&mut self, i: usize, j: usize, val: usize) {
        self.cells[i * self.width + j] = val;
    }

    /// Fills the table bottom-up; row `n` and column `m` stay at zero.
    fn build<T: Eq>(old: &[T], new: &[T]) -> Self {
        let n = old.len();
        let m = new.len();
        let mut table = Table::new(n + 1, m + 1);
        for i in (0..n).rev() {
            for j in (0..m).rev() {
                let val = if old[i] == new[j] {
                    table.get(i + 1, j + 1) + 1
                } else {
                    max(table.get(i + 1, j), table.get(i, j + 1))
                };
                table.set(i, j, val);
            }
        }
        table
    }
}

/// Computes the diff between two strings after breaking them into lines
/// and running `diff`.
pub fn diff_lines(old: &str, new: &str) -> Script<String> {
    let old_lines = split_lines(old);
    let new_lines = split_lines(new);
    debug!(
        "diffing {} old lines against {} new lines",
        old_lines.len(),
        new_lines.len()
    );
    diff(&old_lines, &new_lines)
}

/// Computes a shortest edit script between two sequences through their
/// longest common subsequence.
///
/// When deleting and inserting lead to equally long subsequences the
/// deletion is emitted first, so the output is fully determined by the
/// inputs.
///
/// # Examples
///
/// ```
/// use querydiff::lcs::{diff, DiffOp};
///
/// let old = vec![1, 2, 3];
/// let new = vec![1, 3, 4];
/// let result = diff(&old, &new);
/// assert_eq!(result, vec![
///     DiffOp::Keep(1, 1),
///     DiffOp::Delete(2),
///     DiffOp::Keep(3, 3),
///     DiffOp::Insert(4),
/// ]);
/// ```
///
/// # Arguments
///
/// * `old` - The original sequence
/// * `new` - The new sequence
pub fn diff<T: Eq + Clone>(old: &[T], new: &[T]) -> Script<T> {
    if old.is_empty() {
        return new.iter().map(|e| DiffOp::Insert(e.clone())).collect();
    }
    if new.is_empty() {
        return old.iter().map(|e| DiffOp::Delete(e.clone())).collect();
    }

    let n = old.len();
    let m = new.len();
    if (n + 1) * (m + 1) > LARGE_TABLE {
        warn!("large comparison: {n} x {m} lines");
    }
    let table = Table::build(old, new);

    let mut ops: Script<T> = Vec::with_capacity(n + m - table.get(0, 0));
    let (mut i, mut j) = (0, 0);
    while i < n && j < m {
        if old[i] == new[j] {
            ops.push(DiffOp::Keep(old[i].clone(), new[j].clone()));
            i += 1;
            j += 1;
        } else if table.get(i + 1, j) >= table.get(i, j + 1) {
            ops.push(DiffOp::Delete(old[i].clone()));
            i += 1;
        } else {
            ops.push(DiffOp::Insert(new[j].clone()));
            j += 1;
        }
    }
    ops.extend(old[i..].iter().map(|e| DiffOp::Delete(e.clone())));
    ops.extend(new[j..].iter().map(|e| DiffOp::Insert(e.clone())));

    debug!("script has {} ops, {} kept", ops.len(), table.get(0, 0));
    ops
}

/// Elements of the old sequence, in order, as seen by the script.
pub fn old_side<T: Clone>(script: &[DiffOp<T>]) -> Vec<T> {
    script
        .iter()
        .filter_map(|op| match op {
            DiffOp::Keep(a, _) | DiffOp::Delete(a) => Some(a.clone()),
            DiffOp::Insert(_) => None,
        })
        .collect()
}

/// Elements of the new sequence, in order, as seen by the script.
pub fn new_side<T: Clone>(script: &[DiffOp<T>]) -> Vec<T> {
    script
        .iter()
        .filter_map(|op| match op {
            DiffOp::Keep(_, b) | DiffOp::Insert(b) => Some(b.clone()),
            DiffOp::Delete(_) => None,
        })
        .collect()
}
