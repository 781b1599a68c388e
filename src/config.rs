//! Resolution of the conversion settings.
//!
//! Settings come from three layers, highest precedence first: command line
//! flags, an optional TOML config file, and built-in defaults. Everything that
//! can be checked without reading the novel (the chapter pattern, the paragraph
//! mode, the cover image format) is validated here, so a bad option is
//! reported before any text is processed.

use crate::cli::Cli;
use crate::error::{Error, Result};
use crate::paragraphs::ParagraphMode;
use crate::sinks::mime_from_path;
use crate::splitter::ChapterPattern;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_AUTHOR: &str = "净无痕";
pub const DEFAULT_LANGUAGE: &str = "zh-CN";
pub const DEFAULT_CHAPTER_PATTERN: &str = r"^第.+章.*$";
pub const DEFAULT_PREFACE_TITLE: &str = "前言";
pub const DEFAULT_TOC_TITLE: &str = "目录";
pub const DEFAULT_COVER_TITLE: &str = "封面";

/// Contents of a TOML config file. Every key is optional.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub output: Option<PathBuf>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub language: Option<String>,
    pub chapter_pattern: Option<String>,
    pub cover_image: Option<PathBuf>,
    pub paragraph_mode: Option<String>,
    pub force_indent: Option<bool>,
    pub preface_title: Option<String>,
    pub toc_title: Option<String>,
    pub cover_title: Option<String>,
    pub inline_toc: Option<bool>,
}

impl ConfigFile {
    /// Load a config file. Relative paths inside it are taken relative to the
    /// file's own directory.
    pub fn load(path: &Path) -> Result<ConfigFile> {
        let contents = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: ConfigFile =
            toml::from_str(&contents).map_err(|source| Error::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;

        if let Some(base) = path.parent() {
            config.output = config.output.map(|p| base.join(p));
            config.cover_image = config.cover_image.map(|p| base.join(p));
        }
        Ok(config)
    }
}

/// Fully resolved and validated settings for one conversion.
#[derive(Debug, Clone)]
pub struct Settings {
    pub input: PathBuf,
    pub output: PathBuf,
    pub title: String,
    pub author: String,
    pub language: String,
    pub chapter_pattern: ChapterPattern,
    pub cover_image: Option<PathBuf>,
    pub paragraph_mode: ParagraphMode,
    pub force_indent: bool,
    pub preface_title: String,
    pub toc_title: String,
    pub cover_title: String,
    pub inline_toc: bool,
}

impl Settings {
    /// Resolve settings from the command line, loading the config file it
    /// names, if any.
    pub fn resolve(cli: &Cli) -> Result<Settings> {
        let file = match &cli.config {
            Some(path) => {
                log::debug!("loading config from {}", path.display());
                ConfigFile::load(path)?
            }
            None => ConfigFile::default(),
        };
        Settings::merge(cli, file)
    }

    /// Layer command line flags over a config file over the defaults.
    pub fn merge(cli: &Cli, file: ConfigFile) -> Result<Settings> {
        let chapter_pattern = cli
            .chapter_pattern
            .clone()
            .or(file.chapter_pattern)
            .unwrap_or_else(|| DEFAULT_CHAPTER_PATTERN.to_string());
        let chapter_pattern = ChapterPattern::new(&chapter_pattern)?;

        let paragraph_mode = match (cli.paragraph_mode, file.paragraph_mode) {
            (Some(mode), _) => mode,
            (None, Some(mode)) => mode.parse()?,
            (None, None) => ParagraphMode::default(),
        };

        let cover_image = cli.cover_image.clone().or(file.cover_image);
        if let Some(cover) = &cover_image {
            mime_from_path(cover)?;
        }

        let output = cli
            .output
            .clone()
            .or(file.output)
            .unwrap_or_else(|| cli.input.with_extension("epub"));
        let title = cli
            .title
            .clone()
            .or(file.title)
            .unwrap_or_else(|| title_from_path(&cli.input));

        let force_indent = !cli.no_indent && file.force_indent.unwrap_or(true);
        let inline_toc = !cli.no_toc && file.inline_toc.unwrap_or(true);

        Ok(Settings {
            input: cli.input.clone(),
            output,
            title,
            author: cli
                .author
                .clone()
                .or(file.author)
                .unwrap_or_else(|| DEFAULT_AUTHOR.to_string()),
            language: cli
                .language
                .clone()
                .or(file.language)
                .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            chapter_pattern,
            cover_image,
            paragraph_mode,
            force_indent,
            preface_title: cli
                .preface_title
                .clone()
                .or(file.preface_title)
                .unwrap_or_else(|| DEFAULT_PREFACE_TITLE.to_string()),
            toc_title: cli
                .toc_title
                .clone()
                .or(file.toc_title)
                .unwrap_or_else(|| DEFAULT_TOC_TITLE.to_string()),
            cover_title: cli
                .cover_title
                .clone()
                .or(file.cover_title)
                .unwrap_or_else(|| DEFAULT_COVER_TITLE.to_string()),
            inline_toc,
        })
    }
}

/// The input file name without its extension.
fn title_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| "Untitled".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        let mut full = vec!["txt2epub"];
        full.extend_from_slice(args);
        Cli::try_parse_from(full).expect("can parse arguments")
    }

    #[test]
    fn applies_defaults() {
        let settings = Settings::merge(&cli(&["books/我的小说.txt"]), ConfigFile::default())
            .expect("can resolve");
        assert_eq!(settings.output, PathBuf::from("books/我的小说.epub"));
        assert_eq!(settings.title, "我的小说");
        assert_eq!(settings.author, DEFAULT_AUTHOR);
        assert_eq!(settings.language, "zh-CN");
        assert_eq!(settings.chapter_pattern.as_str(), DEFAULT_CHAPTER_PATTERN);
        assert_eq!(settings.paragraph_mode, ParagraphMode::Smart);
        assert!(settings.force_indent);
        assert!(settings.inline_toc);
        assert_eq!(settings.cover_image, None);
        assert_eq!(settings.cover_title, "封面");
    }

    #[test]
    fn cover_title_comes_from_config_file_or_flag() {
        let file = ConfigFile {
            cover_title: Some("Cover".to_string()),
            ..ConfigFile::default()
        };
        let settings = Settings::merge(&cli(&["novel.txt"]), file.clone()).expect("can resolve");
        assert_eq!(settings.cover_title, "Cover");

        let settings = Settings::merge(&cli(&["novel.txt", "--cover-title", "书封"]), file)
            .expect("can resolve");
        assert_eq!(settings.cover_title, "书封");
    }

    #[test]
    fn command_line_beats_config_file() {
        let file = ConfigFile {
            title: Some("文件标题".to_string()),
            author: Some("文件作者".to_string()),
            paragraph_mode: Some("line".to_string()),
            force_indent: Some(true),
            ..ConfigFile::default()
        };
        let settings = Settings::merge(
            &cli(&["novel.txt", "-t", "命令行标题", "-p", "blank", "--no-indent"]),
            file,
        )
        .expect("can resolve");
        assert_eq!(settings.title, "命令行标题");
        assert_eq!(settings.author, "文件作者");
        assert_eq!(settings.paragraph_mode, ParagraphMode::Blank);
        assert!(!settings.force_indent);
    }

    #[test]
    fn invalid_pattern_is_a_configuration_error() {
        let err = Settings::merge(&cli(&["novel.txt", "-c", "第(.+"]), ConfigFile::default())
            .expect_err("pattern is invalid");
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn invalid_mode_in_config_file_is_a_configuration_error() {
        let file = ConfigFile {
            paragraph_mode: Some("sentence".to_string()),
            ..ConfigFile::default()
        };
        let err = Settings::merge(&cli(&["novel.txt"]), file).expect_err("mode is invalid");
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn unsupported_cover_extension_is_a_configuration_error() {
        let err = Settings::merge(&cli(&["novel.txt", "-i", "cover.bmp"]), ConfigFile::default())
            .expect_err("bmp is unsupported");
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn loads_config_file_relative_to_itself() {
        let dir = tempfile::tempdir().expect("can create temp dir");
        let path = dir.path().join("txt2epub.toml");
        std::fs::write(
            &path,
            "author = \"文件作者\"\ncover_image = \"cover.jpg\"\ninline_toc = false\n",
        )
        .expect("can write config");

        let config = ConfigFile::load(&path).expect("can load");
        assert_eq!(config.author.as_deref(), Some("文件作者"));
        assert_eq!(config.cover_image, Some(dir.path().join("cover.jpg")));
        assert_eq!(config.inline_toc, Some(false));
    }

    #[test]
    fn unknown_config_keys_are_rejected() {
        let dir = tempfile::tempdir().expect("can create temp dir");
        let path = dir.path().join("txt2epub.toml");
        std::fs::write(&path, "colour = \"red\"\n").expect("can write config");
        let err = ConfigFile::load(&path).expect_err("unknown key");
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }
}
