use crate::book::{BookMetadata, CoverImage};
use crate::error::Result;
use std::io::Write;

mod epub;
pub use epub::*;

/// The role a content document plays in the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentRole {
    Cover,
    Chapter,
}

/// One XHTML content document.
#[derive(Debug, Clone)]
pub struct Document {
    /// Path of the document inside the container, unique per book
    pub file_name: String,
    pub title: String,
    pub xhtml: String,
    pub role: DocumentRole,
}

/// The narrow surface through which a book is handed to an e-book library.
///
/// Documents are placed in the reading order in the order they are added.
pub trait BookBuilder {
    fn set_metadata(&mut self, metadata: &BookMetadata) -> Result<()>;
    fn set_stylesheet(&mut self, css: &str) -> Result<()>;
    fn set_cover(&mut self, cover: &CoverImage) -> Result<()>;
    fn add_document(&mut self, document: Document) -> Result<()>;
    /// Generate a table of contents page listing every document.
    fn add_table_of_contents(&mut self, title: &str) -> Result<()>;
    fn finish<W: Write>(self, out: W) -> Result<()>
    where
        Self: Sized;
}
