//! Per-chapter detection of the paragraph convention.
//!
//! The chapter body is sampled once and one strategy is chosen, in this order:
//!
//! 1. [`SmartStrategy::Indent`] when more than half of the non-blank lines start
//!    with an indentation marker
//! 2. [`SmartStrategy::Blank`] when at least one blank line sits between two
//!    lines of text
//! 3. [`SmartStrategy::Punctuation`] otherwise
//!
//! The punctuation strategy is best-effort: it guesses paragraph ends from
//! sentence-final punctuation and quotation balance, and will merge or split
//! wrongly on text that doesn't follow those conventions.

use super::{by_blank_lines, is_blank};
use crate::book::Paragraph;

/// Characters that may end a paragraph.
pub const SENTENCE_FINAL: &[char] = &[
    '。', '！', '？', '.', '!', '?', '"', '\'', '」', '』', '”', '’', '》', ')', '）', '…',
];

const OPENING_QUOTES: &[char] = &['「', '『', '“', '‘'];
const CLOSING_QUOTES: &[char] = &['」', '』', '”', '’'];

/// How many following lines may close an open quotation before it is taken
/// for a stray mark and no longer holds the paragraph open.
const QUOTE_LOOKAHEAD: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmartStrategy {
    Indent,
    Blank,
    Punctuation,
}

/// Whether `line` starts with an ideographic space, a tab, or at least two
/// ASCII spaces.
pub fn has_indent(line: &str) -> bool {
    line.starts_with('\u{3000}') || line.starts_with('\t') || line.starts_with("  ")
}

fn strip_indent(line: &str) -> &str {
    line.trim_start_matches(['\u{3000}', ' ', '\t']).trim_end()
}

/// Pick the strategy for a chapter body.
pub fn classify<S: AsRef<str>>(body: &[S]) -> SmartStrategy {
    let lines: Vec<&str> = body.iter().map(|line| line.as_ref()).collect();

    let text_lines = lines.iter().filter(|line| !is_blank(line)).count();
    let indented = lines
        .iter()
        .filter(|line| !is_blank(line) && has_indent(line))
        .count();
    if text_lines > 0 && indented * 2 > text_lines {
        return SmartStrategy::Indent;
    }

    if has_separating_blank(&lines) {
        return SmartStrategy::Blank;
    }

    SmartStrategy::Punctuation
}

/// Whether a blank line appears somewhere between two lines of text, as
/// opposed to only at the start or end of the body.
fn has_separating_blank(lines: &[&str]) -> bool {
    let first = lines.iter().position(|line| !is_blank(line));
    let last = lines.iter().rposition(|line| !is_blank(line));
    match (first, last) {
        (Some(first), Some(last)) => lines[first..=last].iter().any(|line| is_blank(line)),
        _ => false,
    }
}

pub fn reconstruct<S: AsRef<str>>(body: &[S]) -> Vec<Paragraph> {
    let strategy = classify(body);
    log::trace!("smart paragraph strategy: {strategy:?}");
    match strategy {
        SmartStrategy::Indent => by_indent(body),
        SmartStrategy::Blank => by_blank_lines(body),
        SmartStrategy::Punctuation => by_punctuation(body),
    }
}

/// Indented lines open a new paragraph; other lines continue the open one.
/// Blank lines close the open paragraph.
pub fn by_indent<S: AsRef<str>>(body: &[S]) -> Vec<Paragraph> {
    let mut paragraphs = Vec::new();
    let mut current = Paragraph::default();

    for line in body.iter().map(|line| line.as_ref()) {
        if is_blank(line) || has_indent(line) {
            if !current.is_empty() {
                paragraphs.push(std::mem::take(&mut current));
            }
            if is_blank(line) {
                continue;
            }
        }
        current.push(strip_indent(line));
    }
    if !current.is_empty() {
        paragraphs.push(current);
    }

    paragraphs
}

/// Tracks open quotations across the lines of one paragraph.
#[derive(Debug, Default)]
struct QuoteBalance {
    depth: usize,
    straight_open: bool,
}

impl QuoteBalance {
    fn feed(&mut self, line: &str) {
        for c in line.chars() {
            if OPENING_QUOTES.contains(&c) {
                self.depth += 1;
            } else if CLOSING_QUOTES.contains(&c) {
                self.depth = self.depth.saturating_sub(1);
            } else if c == '"' {
                self.straight_open = !self.straight_open;
            }
        }
    }

    fn is_open(&self) -> bool {
        self.depth > 0 || self.straight_open
    }

    /// Whether one of the `following` lines, within [`QUOTE_LOOKAHEAD`],
    /// closes the open quotation.
    fn closes_soon(&self, following: &[&str]) -> bool {
        following.iter().take(QUOTE_LOOKAHEAD).any(|line| {
            (self.depth > 0 && line.contains(CLOSING_QUOTES))
                || (self.straight_open && line.contains('"'))
        })
    }
}

/// Merge lines until one ends a sentence outside of any quotation, unless the
/// following line starts by closing a quotation. A quotation that nothing
/// closes within the next few lines doesn't count as open.
pub fn by_punctuation<S: AsRef<str>>(body: &[S]) -> Vec<Paragraph> {
    let lines: Vec<&str> = body
        .iter()
        .map(|line| line.as_ref().trim())
        .filter(|line| !line.is_empty())
        .collect();

    let mut paragraphs = Vec::new();
    let mut current = Paragraph::default();
    let mut quotes = QuoteBalance::default();

    for (i, line) in lines.iter().enumerate() {
        current.push(*line);
        quotes.feed(line);

        let ends_sentence = line.ends_with(SENTENCE_FINAL);
        let next_continues_quote = lines
            .get(i + 1)
            .is_some_and(|next| next.starts_with(CLOSING_QUOTES));

        let quote_held = quotes.is_open() && quotes.closes_soon(&lines[i + 1..]);

        if ends_sentence && !quote_held && !next_continues_quote {
            paragraphs.push(std::mem::take(&mut current));
            quotes = QuoteBalance::default();
        }
    }
    if !current.is_empty() {
        paragraphs.push(current);
    }

    paragraphs
}
