//! The conversion pipeline: load, split, reconstruct, format, assemble.

use crate::book::BookMetadata;
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::formatter::{self, FormattedChapter};
use crate::paragraphs;
use crate::sinks::{cover_from_path, RenderStats, EPUB};
use crate::{loader, splitter};
use chrono::{DateTime, Utc};
use indicatif::ProgressBar;
use std::path::Path;

/// Convert the novel described by `settings` into an EPUB file.
pub fn convert(settings: &Settings, progress: &ProgressBar) -> Result<RenderStats> {
    let document = loader::load(&settings.input)?;
    log::info!(
        "loaded {} ({})",
        settings.input.display(),
        document.encoding.name()
    );

    let cover = settings
        .cover_image
        .as_deref()
        .map(cover_from_path)
        .transpose()?;

    log::debug!(
        "splitting chapters on `{}`",
        settings.chapter_pattern.as_str()
    );
    let chapters = splitter::split(
        &document.text,
        &settings.chapter_pattern,
        &settings.title,
        &settings.preface_title,
    );
    if chapters.is_empty() {
        return Err(Error::NoChapters(settings.input.clone()));
    }
    log::info!("found {} chapters", chapters.len());

    progress.set_length(chapters.len() as u64);
    progress.set_message("Reconstructing paragraphs...");
    let formatted: Vec<FormattedChapter> = chapters
        .iter()
        .map(|chapter| {
            progress.inc(1);
            let paragraphs = paragraphs::reconstruct(&chapter.body, settings.paragraph_mode);
            log::debug!("{}: {} paragraphs", chapter.title, paragraphs.len());
            FormattedChapter {
                title: chapter.title.clone(),
                fragments: formatter::format(&paragraphs, settings.force_indent),
            }
        })
        .collect();

    let metadata = BookMetadata {
        title: settings.title.clone(),
        author: settings.author.clone(),
        language: settings.language.clone(),
        cover,
        modified: modification_date(&settings.input),
    };

    let epub = EPUB {
        outfile: settings.output.clone(),
        force_indent: settings.force_indent,
        inline_toc: settings.inline_toc,
        toc_title: settings.toc_title.clone(),
        cover_title: settings.cover_title.clone(),
    };
    epub.render(&formatted, &metadata, progress)
}

/// The date recorded as the book's modification time.
///
/// Taken from `SOURCE_DATE_EPOCH` when set, otherwise from the input file's
/// modification time, so converting the same file twice gives the same date.
fn modification_date(input: &Path) -> DateTime<Utc> {
    if let Some(date) = std::env::var("SOURCE_DATE_EPOCH")
        .ok()
        .and_then(|epoch| epoch.trim().parse::<i64>().ok())
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
    {
        return date;
    }

    match std::fs::metadata(input).and_then(|m| m.modified()) {
        Ok(modified) => DateTime::<Utc>::from(modified),
        Err(e) => {
            log::warn!(
                "couldn't read modification time of {}: {e}",
                input.display()
            );
            DateTime::<Utc>::UNIX_EPOCH
        }
    }
}
