//! Paragraph reconstruction.
//!
//! Plain-text novels mark paragraphs in one of a few ways: one paragraph per
//! line, blank lines between paragraphs, or an indented first line. Some have
//! no marking at all and wrap lines at arbitrary widths. [`ParagraphMode`]
//! selects how a chapter body is turned back into paragraphs; `Smart` looks at
//! the chapter and picks one of the strategies in [`smart`].

pub mod smart;

use crate::book::Paragraph;
use crate::error::Error;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ParagraphMode {
    /// Every non-blank line is a paragraph
    Line,
    /// Paragraphs are separated by blank lines
    Blank,
    /// Detect the convention per chapter
    #[default]
    Smart,
}

impl FromStr for ParagraphMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "line" => Ok(ParagraphMode::Line),
            "blank" => Ok(ParagraphMode::Blank),
            "smart" => Ok(ParagraphMode::Smart),
            _ => Err(Error::InvalidParagraphMode(s.to_string())),
        }
    }
}

impl fmt::Display for ParagraphMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParagraphMode::Line => write!(f, "line"),
            ParagraphMode::Blank => write!(f, "blank"),
            ParagraphMode::Smart => write!(f, "smart"),
        }
    }
}

/// Rebuild the paragraphs of one chapter body.
pub fn reconstruct<S: AsRef<str>>(body: &[S], mode: ParagraphMode) -> Vec<Paragraph> {
    match mode {
        ParagraphMode::Line => by_line(body),
        ParagraphMode::Blank => by_blank_lines(body),
        ParagraphMode::Smart => smart::reconstruct(body),
    }
}

pub(crate) fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// One paragraph per non-blank line, trailing whitespace removed.
pub fn by_line<S: AsRef<str>>(body: &[S]) -> Vec<Paragraph> {
    body.iter()
        .map(|line| line.as_ref())
        .filter(|line| !is_blank(line))
        .map(|line| Paragraph::from_line(line.trim_end()))
        .collect()
}

/// Runs of non-blank lines become one paragraph each.
pub fn by_blank_lines<S: AsRef<str>>(body: &[S]) -> Vec<Paragraph> {
    let mut paragraphs = Vec::new();
    let mut current = Paragraph::default();

    for line in body.iter().map(|line| line.as_ref()) {
        if is_blank(line) {
            if !current.is_empty() {
                paragraphs.push(std::mem::take(&mut current));
            }
            continue;
        }
        current.push(line.trim());
    }
    if !current.is_empty() {
        paragraphs.push(current);
    }

    paragraphs
}
