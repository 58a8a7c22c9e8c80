/// Alias for a vector of DiffOp
/// Result of the LCS diff function
pub type Script<T> = Vec<DiffOp<T>>;

/// Each element in a script can be
/// present on both sides (Keep, carrying the old and the new element)
/// removed from the old side (Delete)
/// added on the new side (Insert)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffOp<T> {
    Keep(T, T),
    Delete(T),
    Insert(T),
}
