//! The structured representation of a novel: chapters of paragraphs plus the
//! metadata that goes on the book itself.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A chapter as cut out of the raw text, before paragraph reconstruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    pub title: String,
    /// Every line between this chapter's heading and the next one
    pub body: Vec<String>,
}

impl Chapter {
    pub fn new<S: ToString>(title: S, body: Vec<String>) -> Chapter {
        Chapter {
            title: title.to_string(),
            body,
        }
    }
}

/// One reading unit: a run of non-empty lines that belong together.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Paragraph {
    pub lines: Vec<String>,
}

impl Paragraph {
    pub fn from_line<S: Into<String>>(line: S) -> Paragraph {
        Paragraph {
            lines: vec![line.into()],
        }
    }

    pub fn push<S: Into<String>>(&mut self, line: S) {
        self.lines.push(line.into());
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The merged text of the paragraph.
    ///
    /// Lines are concatenated directly when either side of the join is CJK, and
    /// separated by a single space otherwise.
    pub fn text(&self) -> String {
        let mut text = String::new();
        for line in &self.lines {
            if let (Some(prev), Some(next)) = (text.chars().last(), line.chars().next()) {
                if !is_cjk(prev) && !is_cjk(next) {
                    text.push(' ');
                }
            }
            text.push_str(line);
        }
        text
    }
}

/// Whether `c` belongs to a script or punctuation block that is written without
/// inter-word spaces.
pub fn is_cjk(c: char) -> bool {
    matches!(c as u32,
        0x1100..=0x11FF     // hangul jamo
        | 0x2E80..=0x2FDF   // radicals
        | 0x3000..=0x303F   // CJK symbols and punctuation
        | 0x3040..=0x30FF   // hiragana, katakana
        | 0x3100..=0x31FF   // bopomofo, kanbun, katakana extensions
        | 0x3400..=0x4DBF   // extension A
        | 0x4E00..=0x9FFF   // unified ideographs
        | 0xAC00..=0xD7AF   // hangul syllables
        | 0xF900..=0xFAFF   // compatibility ideographs
        | 0xFE30..=0xFE4F   // compatibility forms
        | 0xFF00..=0xFFEF   // half-width and full-width forms
        | 0x20000..=0x3134F // extensions B onwards
    ) || matches!(c, '“' | '”' | '‘' | '’' | '…' | '—')
}

/// An image to be used as the book's cover.
#[derive(Debug, Clone)]
pub struct CoverImage {
    /// File name inside the EPUB, e.g. `cover.jpg`
    pub file_name: String,
    pub mime_type: &'static str,
    pub data: Vec<u8>,
}

/// Book-level metadata, set once before assembly.
#[derive(Debug, Clone)]
pub struct BookMetadata {
    pub title: String,
    pub author: String,
    pub language: String,
    pub cover: Option<CoverImage>,
    /// Timestamp written as the book's modification date
    pub modified: DateTime<Utc>,
}

impl BookMetadata {
    /// A stable identifier for the book, derived from its title and author so
    /// repeated conversions of the same novel produce the same identifier.
    pub fn identifier(&self) -> Uuid {
        let name = format!("{}\u{0}{}", self.title, self.author);
        Uuid::new_v5(&Uuid::NAMESPACE_URL, name.as_bytes())
    }
}
