//! [`BookBuilder`] implementation backed by the `epub-builder` crate.

use super::archive;
use crate::book::{BookMetadata, CoverImage};
use crate::error::{Error, Result};
use crate::sinks::{BookBuilder, Document, DocumentRole};
use chrono::{DateTime, Utc};
use epub_builder::{EpubBuilder, EpubContent, ReferenceType, ZipLibrary};
use std::io::Write;

pub struct EpubBackend {
    builder: EpubBuilder<ZipLibrary>,
    /// Date stamped on every archive entry
    modified: DateTime<Utc>,
}

impl EpubBackend {
    pub fn new() -> Result<EpubBackend> {
        let zip = ZipLibrary::new().map_err(|e| Error::epub("create the ZIP library", e))?;
        let builder = EpubBuilder::new(zip).map_err(|e| Error::epub("create the builder", e))?;
        Ok(EpubBackend {
            builder,
            modified: DateTime::<Utc>::UNIX_EPOCH,
        })
    }
}

impl BookBuilder for EpubBackend {
    fn set_metadata(&mut self, metadata: &BookMetadata) -> Result<()> {
        self.builder
            .metadata("title", &metadata.title)
            .map_err(|e| Error::epub("set title metadata", e))?;
        self.builder
            .metadata("author", &metadata.author)
            .map_err(|e| Error::epub("set author metadata", e))?;
        self.builder
            .metadata("lang", &metadata.language)
            .map_err(|e| Error::epub("set language metadata", e))?;
        self.builder
            .metadata("generator", env!("CARGO_PKG_NAME"))
            .map_err(|e| Error::epub("set generator metadata", e))?;
        self.builder.set_uuid(metadata.identifier());
        self.builder.set_publication_date(metadata.modified);
        self.builder.set_modified_date(metadata.modified);
        self.modified = metadata.modified;
        Ok(())
    }

    fn set_stylesheet(&mut self, css: &str) -> Result<()> {
        self.builder
            .stylesheet(css.as_bytes())
            .map_err(|e| Error::epub("add the stylesheet", e))?;
        Ok(())
    }

    fn set_cover(&mut self, cover: &CoverImage) -> Result<()> {
        self.builder
            .add_cover_image(&cover.file_name, cover.data.as_slice(), cover.mime_type)
            .map_err(|e| Error::epub("add the cover image", e))?;
        Ok(())
    }

    fn add_document(&mut self, document: Document) -> Result<()> {
        let content = EpubContent::new(&document.file_name, document.xhtml.as_bytes())
            .title(&document.title);
        let content = match document.role {
            DocumentRole::Cover => content.reftype(ReferenceType::Cover),
            DocumentRole::Chapter => content.reftype(ReferenceType::Text),
        };
        self.builder
            .add_content(content)
            .map_err(|e| Error::epub("add a content document", e))?;
        Ok(())
    }

    fn add_table_of_contents(&mut self, title: &str) -> Result<()> {
        self.builder
            .metadata("toc_name", title)
            .map_err(|e| Error::epub("set the table of contents title", e))?;
        self.builder.inline_toc();
        Ok(())
    }

    fn finish<W: Write>(mut self, mut out: W) -> Result<()> {
        let mut raw = Vec::new();
        self.builder
            .generate(&mut raw)
            .map_err(|e| Error::epub("generate the EPUB", e))?;
        let packed = archive::normalize(raw, self.modified)?;
        out.write_all(&packed)
            .map_err(|e| Error::epub("write the EPUB", e))?;
        Ok(())
    }
}
