//! Normalization of the generated archive.
//!
//! The EPUB library stamps every ZIP entry with the current time, so two runs
//! over the same text would differ in their entry headers. The archive is
//! re-packed here with every entry dated to the book's modification time and
//! given fixed permissions. Entry order and compression method are kept, which
//! leaves `mimetype` first and stored.

use crate::error::{Error, Result};
use chrono::{DateTime, Datelike, Timelike, Utc};
use std::io::{self, Cursor};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Rewrite `raw` so its bytes depend only on its contents and `modified`.
pub fn normalize(raw: Vec<u8>, modified: DateTime<Utc>) -> Result<Vec<u8>> {
    let mut archive =
        ZipArchive::new(Cursor::new(raw)).map_err(|e| Error::epub("read back the archive", e))?;
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let timestamp = zip_timestamp(modified);

    for i in 0..archive.len() {
        let mut entry = archive
            .by_index(i)
            .map_err(|e| Error::epub("read back an archive entry", e))?;
        let name = entry.name().to_string();
        let method = match entry.compression() {
            CompressionMethod::Stored => CompressionMethod::Stored,
            _ => CompressionMethod::Deflated,
        };
        let options = SimpleFileOptions::default()
            .compression_method(method)
            .last_modified_time(timestamp)
            .unix_permissions(0o644);

        if entry.is_dir() {
            writer
                .add_directory(name, options)
                .map_err(|e| Error::epub("repack a directory entry", e))?;
            continue;
        }
        writer
            .start_file(name, options)
            .map_err(|e| Error::epub("repack an archive entry", e))?;
        io::copy(&mut entry, &mut writer).map_err(|e| Error::epub("copy an archive entry", e))?;
    }

    let packed = writer
        .finish()
        .map_err(|e| Error::epub("finish the archive", e))?;
    Ok(packed.into_inner())
}

/// ZIP entries hold DOS dates, which start in 1980. Earlier dates clamp to
/// the start of that range.
fn zip_timestamp(date: DateTime<Utc>) -> zip::DateTime {
    let (Ok(year), Ok(month), Ok(day)) = (
        u16::try_from(date.year()),
        u8::try_from(date.month()),
        u8::try_from(date.day()),
    ) else {
        return zip::DateTime::default();
    };
    zip::DateTime::from_date_and_time(
        year,
        month,
        day,
        date.hour() as u8,
        date.minute() as u8,
        date.second() as u8,
    )
    .unwrap_or_default()
}
