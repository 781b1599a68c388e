//! Chapter detection.
//!
//! A chapter heading is any line which, once surrounding whitespace is
//! trimmed, matches the configured pattern in full. Everything between one
//! heading and the next is that chapter's body, so the chapters partition the
//! non-heading lines of the document without gaps or overlaps.

use crate::book::Chapter;
use crate::error::{Error, Result};
use regex::Regex;

/// A compiled chapter-heading pattern that only matches whole lines.
#[derive(Debug, Clone)]
pub struct ChapterPattern {
    source: String,
    regex: Regex,
}

impl ChapterPattern {
    pub fn new(pattern: &str) -> Result<ChapterPattern> {
        let regex = Regex::new(&format!("^(?:{pattern})$")).map_err(|source| {
            Error::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            }
        })?;
        Ok(ChapterPattern {
            source: pattern.to_string(),
            regex,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_heading(&self, line: &str) -> bool {
        let line = line.trim();
        !line.is_empty() && self.regex.is_match(line)
    }
}

/// A line recognised as a chapter heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterHeading {
    pub line_index: usize,
    pub title: String,
}

/// Find every heading in `lines`, in document order.
pub fn find_headings<S: AsRef<str>>(lines: &[S], pattern: &ChapterPattern) -> Vec<ChapterHeading> {
    lines
        .iter()
        .enumerate()
        .filter(|(_, line)| pattern.is_heading(line.as_ref()))
        .map(|(line_index, line)| ChapterHeading {
            line_index,
            title: line.as_ref().trim().to_string(),
        })
        .collect()
}

/// Partition `text` into chapters.
///
/// Text before the first heading becomes a chapter titled `preface_title`, as
/// long as it has any non-blank content. A document without headings becomes a
/// single chapter titled `book_title`. A document with no content at all yields
/// no chapters.
pub fn split(
    text: &str,
    pattern: &ChapterPattern,
    book_title: &str,
    preface_title: &str,
) -> Vec<Chapter> {
    let lines: Vec<&str> = text.split('\n').collect();
    let headings = find_headings(&lines, pattern);
    log::debug!("found {} chapter headings", headings.len());

    let to_body = |range: &[&str]| range.iter().map(|l| l.to_string()).collect::<Vec<_>>();
    let has_content = |range: &[&str]| range.iter().any(|l| !l.trim().is_empty());

    let Some(first) = headings.first() else {
        return if has_content(&lines[..]) {
            vec![Chapter::new(book_title, to_body(&lines[..]))]
        } else {
            Vec::new()
        };
    };

    let mut chapters = Vec::with_capacity(headings.len() + 1);

    let leading = &lines[..first.line_index];
    if has_content(leading) {
        chapters.push(Chapter::new(preface_title, to_body(leading)));
    }

    for (i, heading) in headings.iter().enumerate() {
        let end = headings
            .get(i + 1)
            .map(|next| next.line_index)
            .unwrap_or(lines.len());
        let body = &lines[heading.line_index + 1..end];
        chapters.push(Chapter::new(&heading.title, to_body(body)));
    }

    chapters
}
