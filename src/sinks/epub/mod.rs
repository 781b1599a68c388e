//! EPUB generation for plain-text novels.
//!
//! This module turns formatted chapters into an EPUB ebook with:
//! - Book metadata (title, author, language, stable identifier)
//! - An optional cover image and cover page
//! - An optional inline table of contents
//! - One XHTML document per chapter, in reading order
//!
//! Packaging (OPF manifest, NCX navigation, ZIP structure) is left to the
//! `epub-builder` crate, reached only through [`BookBuilder`](super::BookBuilder).
//! Its output is then re-packed so that the same book always yields the same
//! bytes.

mod archive;
mod backend;
mod config;
mod rendering;
mod styles;

pub use backend::EpubBackend;
pub use config::{RenderStats, EPUB};
pub use rendering::{cover_from_path, mime_from_path};
