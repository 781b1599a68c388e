//! EPUB rendering orchestration.
//!
//! Hands the book to a [`BookBuilder`] in a fixed order: metadata, stylesheet,
//! cover, table of contents, then chapters. Chapter documents are named after
//! their position in the book (`chapter-0001.xhtml`, ...), never after their
//! titles, which may repeat or contain characters unsafe in file names.
//!
//! The EPUB is generated into a temporary file next to the destination and
//! renamed into place only once generation succeeded, so a failed run never
//! leaves a truncated book behind.

mod chapter;
mod cover;

use super::config::{RenderStats, EPUB};
use super::styles;
use crate::book::{BookMetadata, CoverImage};
use crate::error::{Error, Result};
use crate::formatter::FormattedChapter;
use crate::sinks::{BookBuilder, Document, DocumentRole, EpubBackend};
use indicatif::ProgressBar;
use std::io::{BufWriter, Write};
use std::path::Path;

impl EPUB {
    /// Render the book to an EPUB file at `self.outfile`.
    pub fn render(
        &self,
        chapters: &[FormattedChapter],
        metadata: &BookMetadata,
        progress: &ProgressBar,
    ) -> Result<RenderStats> {
        progress.set_message("Generating EPUB...");

        let mut builder = EpubBackend::new()?;
        let stats = self.assemble(&mut builder, chapters, metadata)?;

        write_atomically(&self.outfile, |out| builder.finish(out))?;
        log::info!(
            "wrote {} documents to {}",
            stats.document_count,
            self.outfile.display()
        );

        progress.finish_with_message("EPUB generated");
        Ok(stats)
    }

    /// Feed the book into `builder` without generating anything yet.
    pub fn assemble<B: BookBuilder>(
        &self,
        builder: &mut B,
        chapters: &[FormattedChapter],
        metadata: &BookMetadata,
    ) -> Result<RenderStats> {
        if chapters.is_empty() {
            return Err(Error::NoChapters(self.outfile.clone()));
        }

        builder.set_metadata(metadata)?;
        builder.set_stylesheet(&styles::generate_stylesheet(self.force_indent))?;

        let mut document_count = 0;

        if let Some(cover) = &metadata.cover {
            builder.set_cover(cover)?;
            builder.add_document(Document {
                file_name: "cover.xhtml".to_string(),
                title: self.cover_title.clone(),
                xhtml: cover::render(metadata, cover),
                role: DocumentRole::Cover,
            })?;
            document_count += 1;
        }

        if self.inline_toc {
            builder.add_table_of_contents(&self.toc_title)?;
        }

        let mut paragraph_count = 0;
        for (i, formatted) in chapters.iter().enumerate() {
            builder.add_document(Document {
                file_name: chapter_file_name(i),
                title: formatted.title.clone(),
                xhtml: chapter::render(formatted, &metadata.language),
                role: DocumentRole::Chapter,
            })?;
            document_count += 1;
            paragraph_count += formatted.fragments.len();
        }

        Ok(RenderStats {
            document_count,
            chapter_count: chapters.len(),
            paragraph_count,
        })
    }
}

/// File name of the chapter at zero-based position `index`.
fn chapter_file_name(index: usize) -> String {
    format!("chapter-{:04}.xhtml", index + 1)
}

/// Run `write` against a temporary file in the destination's directory and
/// move the result over `path` once it succeeded.
fn write_atomically<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<&mut std::fs::File>) -> Result<()>,
{
    let output_error = |source| Error::OutputWrite {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut builder = tempfile::Builder::new();
    builder.prefix(".txt2epub-").suffix(".tmp");
    // Temp files are owner-only; the book gets the mode `File::create` would give it.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }
    let mut temp = builder.tempfile_in(dir).map_err(output_error)?;

    {
        let mut writer = BufWriter::new(temp.as_file_mut());
        write(&mut writer)?;
        writer.flush().map_err(output_error)?;
    }

    temp.persist(path).map_err(|e| output_error(e.error))?;
    Ok(())
}

/// Determine the cover MIME type from the file extension.
pub fn mime_from_path(path: &Path) -> Result<&'static str> {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .as_deref()
    {
        Some("jpg" | "jpeg") => Ok("image/jpeg"),
        Some("png") => Ok("image/png"),
        Some("gif") => Ok("image/gif"),
        _ => Err(Error::UnsupportedCover(path.to_path_buf())),
    }
}

/// Read a cover image from disk.
pub fn cover_from_path(path: &Path) -> Result<CoverImage> {
    let mime_type = mime_from_path(path)?;
    let data = std::fs::read(path).map_err(|source| Error::CoverRead {
        path: path.to_path_buf(),
        source,
    })?;
    let extension = match mime_type {
        "image/png" => "png",
        "image/gif" => "gif",
        _ => "jpg",
    };
    log::debug!("read {} byte cover from {}", data.len(), path.display());

    Ok(CoverImage {
        file_name: format!("cover.{extension}"),
        mime_type,
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::formatter::format_text;
    use chrono::{DateTime, Utc};
    use std::path::PathBuf;

    /// Records every call so tests can check what reached the library.
    #[derive(Default)]
    struct RecordingBuilder {
        calls: Vec<String>,
        documents: Vec<Document>,
    }

    impl BookBuilder for RecordingBuilder {
        fn set_metadata(&mut self, metadata: &BookMetadata) -> Result<()> {
            self.calls.push(format!("metadata:{}", metadata.title));
            Ok(())
        }

        fn set_stylesheet(&mut self, _css: &str) -> Result<()> {
            self.calls.push("stylesheet".to_string());
            Ok(())
        }

        fn set_cover(&mut self, cover: &CoverImage) -> Result<()> {
            self.calls.push(format!("cover:{}", cover.file_name));
            Ok(())
        }

        fn add_document(&mut self, document: Document) -> Result<()> {
            self.calls.push(format!("document:{}", document.file_name));
            self.documents.push(document);
            Ok(())
        }

        fn add_table_of_contents(&mut self, title: &str) -> Result<()> {
            self.calls.push(format!("toc:{title}"));
            Ok(())
        }

        fn finish<W: Write>(self, mut out: W) -> Result<()> {
            out.write_all(self.calls.join("\n").as_bytes())
                .map_err(|source| Error::OutputWrite {
                    path: PathBuf::from("memory"),
                    source,
                })
        }
    }

    fn metadata(cover: Option<CoverImage>) -> BookMetadata {
        BookMetadata {
            title: "书名".to_string(),
            author: "作者".to_string(),
            language: "zh-CN".to_string(),
            cover,
            modified: DateTime::<Utc>::UNIX_EPOCH,
        }
    }

    fn chapter(title: &str, text: &str) -> FormattedChapter {
        FormattedChapter {
            title: title.to_string(),
            fragments: vec![format_text(text, true)],
        }
    }

    #[test]
    fn zero_chapters_is_a_structural_error() {
        let mut builder = RecordingBuilder::default();
        let err = EPUB::default()
            .assemble(&mut builder, &[], &metadata(None))
            .expect_err("no chapters");
        assert_eq!(err.kind(), ErrorKind::Structural);
        assert!(builder.calls.is_empty());
    }

    #[test]
    fn chapters_are_added_in_order_with_positional_ids() {
        let mut builder = RecordingBuilder::default();
        let chapters = vec![chapter("同名", "甲"), chapter("同名", "乙")];
        let stats = EPUB::default()
            .assemble(&mut builder, &chapters, &metadata(None))
            .expect("can assemble");

        assert_eq!(
            builder.calls,
            vec![
                "metadata:书名",
                "stylesheet",
                "toc:目录",
                "document:chapter-0001.xhtml",
                "document:chapter-0002.xhtml",
            ]
        );
        assert_eq!(stats.chapter_count, 2);
        assert_eq!(stats.paragraph_count, 2);
        assert!(builder.documents[1].xhtml.contains("乙"));
    }

    #[test]
    fn cover_comes_before_any_chapter() {
        let cover = CoverImage {
            file_name: "cover.png".to_string(),
            mime_type: "image/png",
            data: vec![0x89, b'P', b'N', b'G'],
        };
        let epub = EPUB {
            inline_toc: false,
            ..EPUB::default()
        };
        let mut builder = RecordingBuilder::default();
        let stats = epub
            .assemble(&mut builder, &[chapter("第一章", "正文")], &metadata(Some(cover)))
            .expect("can assemble");

        assert_eq!(
            builder.calls,
            vec![
                "metadata:书名",
                "stylesheet",
                "cover:cover.png",
                "document:cover.xhtml",
                "document:chapter-0001.xhtml",
            ]
        );
        assert_eq!(builder.documents[0].role, DocumentRole::Cover);
        assert_eq!(builder.documents[0].title, "封面");
        assert_eq!(stats.document_count, 2);
    }

    #[test]
    fn detects_cover_mime_types() {
        assert_eq!(mime_from_path(Path::new("a.JPG")).ok(), Some("image/jpeg"));
        assert_eq!(mime_from_path(Path::new("a.jpeg")).ok(), Some("image/jpeg"));
        assert_eq!(mime_from_path(Path::new("a.png")).ok(), Some("image/png"));
        assert_eq!(mime_from_path(Path::new("a.gif")).ok(), Some("image/gif"));
        let err = mime_from_path(Path::new("a.bmp")).expect_err("bmp is unsupported");
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn missing_cover_is_a_cover_error() {
        let dir = tempfile::tempdir().expect("can create temp dir");
        let err = cover_from_path(&dir.path().join("missing.jpg")).expect_err("no such file");
        assert_eq!(err.kind(), ErrorKind::Cover);
    }

    #[test]
    fn failed_write_leaves_nothing_behind() {
        let dir = tempfile::tempdir().expect("can create temp dir");
        let path = dir.path().join("book.epub");
        let result = write_atomically(&path, |out| {
            out.write_all(b"partial").expect("can write to buffer");
            Err(Error::NoChapters(PathBuf::from("input.txt")))
        });
        assert!(result.is_err());
        assert!(!path.exists());
        assert_eq!(
            std::fs::read_dir(dir.path())
                .expect("can list temp dir")
                .count(),
            0
        );
    }

    #[test]
    fn successful_write_replaces_destination() {
        let dir = tempfile::tempdir().expect("can create temp dir");
        let path = dir.path().join("book.epub");
        std::fs::write(&path, b"old").expect("can write old file");
        write_atomically(&path, |out| {
            out.write_all(b"new").expect("can write to buffer");
            Ok(())
        })
        .expect("can write");
        assert_eq!(std::fs::read(&path).expect("can read"), b"new");
    }

    #[cfg(unix)]
    #[test]
    fn written_file_gets_the_usual_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().expect("can create temp dir");
        let plain = dir.path().join("plain.epub");
        std::fs::File::create(&plain).expect("can create plain file");
        let path = dir.path().join("book.epub");
        write_atomically(&path, |out| {
            out.write_all(b"book").expect("can write to buffer");
            Ok(())
        })
        .expect("can write");

        let mode = |p: &Path| {
            std::fs::metadata(p)
                .expect("can stat")
                .permissions()
                .mode()
                & 0o777
        };
        assert_eq!(mode(&path), mode(&plain));
    }

    #[test]
    fn unwritable_destination_is_an_output_error() {
        let dir = tempfile::tempdir().expect("can create temp dir");
        let path = dir.path().join("missing-dir").join("book.epub");
        let err = write_atomically(&path, |_| Ok(())).expect_err("directory does not exist");
        assert_eq!(err.kind(), ErrorKind::Output);
    }
}
