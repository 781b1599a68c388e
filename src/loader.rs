//! Loading and decoding of the input text file.
//!
//! Novels distributed as plain text are usually either UTF-8 or GBK. The loader
//! resolves the encoding in a fixed order and refuses to guess lossily:
//!
//! 1. a byte order mark, if present
//! 2. strict UTF-8
//! 3. strict GB18030 (a superset of GBK and GB2312)
//! 4. whatever `chardetng` suggests, but only if it decodes without errors
//!
//! The decoded text has its line endings normalised to `\n`.

use crate::error::{Error, Result};
use chardetng::EncodingDetector;
use encoding_rs::{Encoding, GB18030, UTF_8};
use std::path::Path;

/// The decoded contents of the whole input file.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub text: String,
    pub encoding: &'static Encoding,
}

/// Read and decode the file at `path`.
pub fn load(path: &Path) -> Result<RawDocument> {
    let bytes = std::fs::read(path).map_err(|source| Error::InputRead {
        path: path.to_path_buf(),
        source,
    })?;

    let (text, encoding) =
        decode(&bytes).ok_or_else(|| Error::UnknownEncoding(path.to_path_buf()))?;
    log::debug!(
        "decoded {} ({} bytes) as {}",
        path.display(),
        bytes.len(),
        encoding.name()
    );

    Ok(RawDocument {
        text: normalize_newlines(&text),
        encoding,
    })
}

/// Decode raw bytes, returning the text and the encoding that produced it.
///
/// Returns `None` when no candidate decodes the bytes cleanly.
pub fn decode(bytes: &[u8]) -> Option<(String, &'static Encoding)> {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        return encoding
            .decode_without_bom_handling_and_without_replacement(&bytes[bom_len..])
            .map(|text| (text.into_owned(), encoding));
    }

    for encoding in [UTF_8, GB18030] {
        if let Some(text) = encoding.decode_without_bom_handling_and_without_replacement(bytes) {
            return Some((text.into_owned(), encoding));
        }
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let guess = detector.guess(None, true);
    log::debug!("falling back to statistical guess: {}", guess.name());
    guess
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(|text| (text.into_owned(), guess))
}

fn normalize_newlines(text: &str) -> String {
    if !text.contains('\r') {
        return text.to_string();
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::io::Write;

    #[test]
    fn decodes_utf8() {
        let (text, encoding) = decode("第一章 开始".as_bytes()).expect("can decode");
        assert_eq!(text, "第一章 开始");
        assert_eq!(encoding, UTF_8);
    }

    #[test]
    fn strips_utf8_bom() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice("正文".as_bytes());
        let (text, encoding) = decode(&bytes).expect("can decode");
        assert_eq!(text, "正文");
        assert_eq!(encoding, UTF_8);
    }

    #[test]
    fn decodes_gbk() {
        let (bytes, _, unmappable) = GB18030.encode("第一章 开始\n这是正文内容");
        assert!(!unmappable);
        let (text, encoding) = decode(&bytes).expect("can decode");
        assert_eq!(text, "第一章 开始\n这是正文内容");
        assert_eq!(encoding, GB18030);
    }

    #[test]
    fn normalizes_line_endings() {
        assert_eq!(normalize_newlines("a\r\nb\rc\n"), "a\nb\nc\n");
    }

    #[test]
    fn missing_file_is_an_input_error() {
        let dir = tempfile::tempdir().expect("can create temp dir");
        let err = load(&dir.path().join("missing.txt")).expect_err("file does not exist");
        assert_eq!(err.kind(), ErrorKind::Input);
    }

    #[test]
    fn loads_file_with_crlf() {
        let mut file = tempfile::NamedTempFile::new().expect("can create temp file");
        file.write_all("第一章\r\n正文\r\n".as_bytes())
            .expect("can write temp file");
        let doc = load(file.path()).expect("can load");
        assert_eq!(doc.text, "第一章\n正文\n");
    }
}
