//! Error types for the conversion pipeline.
//!
//! Every variant carries the offending value or path so the message alone is
//! enough to fix the input. Variants are grouped by [`ErrorKind`], which is what
//! callers and tests match on.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Broad classification of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad pattern, bad paragraph mode, bad cover extension, bad config file
    Configuration,
    /// Input file missing, unreadable, or of unknown encoding
    Input,
    /// Cover image given but unreadable
    Cover,
    /// Nothing to put in the book
    Structural,
    /// Destination not writable, or the EPUB library failed to serialize
    Output,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid chapter pattern `{pattern}`")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid paragraph mode `{0}` (expected one of: line, blank, smart)")]
    InvalidParagraphMode(String),

    #[error("unsupported cover image format: {} (supported: jpg, jpeg, png, gif)", .0.display())]
    UnsupportedCover(PathBuf),

    #[error("failed to read config file {}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config file {}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to read input file {}", .path.display())]
    InputRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not determine the text encoding of {} (expected UTF-8 or GBK)", .0.display())]
    UnknownEncoding(PathBuf),

    #[error("failed to read cover image {}", .path.display())]
    CoverRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no chapters could be produced for {}", .0.display())]
    NoChapters(PathBuf),

    #[error("failed to write EPUB file {}", .path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("EPUB generation failed while trying to {action}: {message}")]
    Epub { action: &'static str, message: String },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidPattern { .. }
            | Error::InvalidParagraphMode(_)
            | Error::UnsupportedCover(_)
            | Error::ConfigRead { .. }
            | Error::ConfigParse { .. } => ErrorKind::Configuration,
            Error::InputRead { .. } | Error::UnknownEncoding(_) => ErrorKind::Input,
            Error::CoverRead { .. } => ErrorKind::Cover,
            Error::NoChapters(_) => ErrorKind::Structural,
            Error::OutputWrite { .. } | Error::Epub { .. } => ErrorKind::Output,
        }
    }

    /// Wrap an error reported by the EPUB library.
    pub(crate) fn epub(action: &'static str, err: impl std::fmt::Display) -> Self {
        Error::Epub {
            action,
            message: err.to_string(),
        }
    }
}
