/// Breaks a text blob into lines.
///
/// `\r\n` is collapsed to `\n` before splitting, so the same query saved
/// on Windows and Unix compares equal line by line.
/// The empty string is the empty document; anything else yields
/// one more line than it has newlines.
pub fn split_lines(text: &str) -> Vec<String> {
    if text.is_empty() {
        return vec![];
    }
    text.replace("\r\n", "\n")
        .split('\n')
        .map(ToString::to_string)
        .collect()
}
