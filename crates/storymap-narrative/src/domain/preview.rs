//! Short text previews for start options and step choices.

/// Character budget of a preview, counted in Unicode scalar values.
pub const PREVIEW_CHARS: usize = 100;

/// Appended when text had to be cut.
pub const TRUNCATION_MARKER: &str = "...";

/// Returns `text` unchanged if it fits the budget, otherwise its first
/// [`PREVIEW_CHARS`] characters followed by [`TRUNCATION_MARKER`].
#[must_use]
pub fn preview(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}{TRUNCATION_MARKER}", &text[..cut]),
        None => text.to_owned(),
    }
}
