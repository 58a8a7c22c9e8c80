pub mod config;
pub mod history;
pub mod lcs;
pub mod present;
pub mod render;
pub mod text;

use present::RenderRow;

/// Compares two text blobs line by line and returns the side-by-side rows.
///
/// # Examples
///
/// ```
/// use querydiff::present::RenderRow;
///
/// let rows = querydiff::compare("select x from t", "select y from t");
/// match &rows[..] {
///     [RenderRow::Change { old, new }] => {
///         assert_eq!(old.content.highlighted(), Some("x"));
///         assert_eq!(new.content.highlighted(), Some("y"));
///     }
///     other => panic!("unexpected rows: {:?}", other),
/// }
/// ```
pub fn compare(old: &str, new: &str) -> Vec<RenderRow> {
    present::rows(lcs::diff_lines(old, new))
}
