//! EPUB output configuration.

use std::path::PathBuf;

/// EPUB output configuration.
#[derive(Debug, Clone)]
#[allow(clippy::upper_case_acronyms)]
pub struct EPUB {
    /// Output EPUB file path
    pub outfile: PathBuf,
    /// Whether paragraphs carry a literal indent rather than a CSS one
    pub force_indent: bool,
    /// Whether to generate a table of contents page
    pub inline_toc: bool,
    /// Title of the table of contents
    pub toc_title: String,
    /// Title of the cover page
    pub cover_title: String,
}

impl Default for EPUB {
    fn default() -> Self {
        Self {
            outfile: PathBuf::from("book.epub"),
            force_indent: true,
            inline_toc: true,
            toc_title: "目录".to_string(),
            cover_title: "封面".to_string(),
        }
    }
}

/// Statistics from rendering an EPUB, used for user feedback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderStats {
    /// Number of content documents in the EPUB, cover page included
    pub document_count: usize,
    pub chapter_count: usize,
    pub paragraph_count: usize,
}
