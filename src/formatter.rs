//! Presentation rules applied to reconstructed paragraphs.

use crate::book::Paragraph;

/// Two ideographic spaces, the customary first-line indent for Chinese text.
pub const INDENT: &str = "\u{3000}\u{3000}";

/// Escaped, presentation-ready text of one paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment(String);

impl Fragment {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A chapter whose paragraphs have been formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedChapter {
    pub title: String,
    pub fragments: Vec<Fragment>,
}

pub fn format(paragraphs: &[Paragraph], force_indent: bool) -> Vec<Fragment> {
    paragraphs
        .iter()
        .map(|paragraph| format_text(&paragraph.text(), force_indent))
        .collect()
}

/// Format a single piece of paragraph text.
pub fn format_text(text: &str, force_indent: bool) -> Fragment {
    let text = if force_indent { indent(text) } else { text.to_string() };
    Fragment(html_escape::encode_text(&text).into_owned())
}

/// Replace whatever leading whitespace `text` has with [`INDENT`].
///
/// Text that already starts with [`INDENT`] is returned unchanged, so indenting
/// twice is the same as indenting once.
pub fn indent(text: &str) -> String {
    if text.starts_with(INDENT) {
        return text.to_string();
    }
    format!("{INDENT}{}", text.trim_start())
}
