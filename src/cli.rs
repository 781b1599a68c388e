use crate::paragraphs::ParagraphMode;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Converts a plain-text novel into an EPUB book
#[derive(Parser, Debug)]
#[clap(author, version, about)]
pub struct Cli {
    /// The text file to convert (UTF-8 or GBK)
    pub input: PathBuf,

    /// Output EPUB path [default: the input path with an .epub extension]
    #[clap(short, long)]
    pub output: Option<PathBuf>,

    /// Book title [default: the input file name]
    #[clap(short, long)]
    pub title: Option<String>,

    /// Author name [default: 净无痕]
    #[clap(short, long)]
    pub author: Option<String>,

    /// Language code [default: zh-CN]
    #[clap(short, long)]
    pub language: Option<String>,

    /// Regular expression matching a whole chapter heading line [default: ^第.+章.*$]
    #[clap(short, long)]
    pub chapter_pattern: Option<String>,

    /// Cover image (JPG, PNG or GIF)
    #[clap(short = 'i', long)]
    pub cover_image: Option<PathBuf>,

    /// How paragraphs are delimited in the text [default: smart]
    #[clap(short, long, value_enum)]
    pub paragraph_mode: Option<ParagraphMode>,

    /// Don't force an indent at the start of each paragraph
    #[clap(long)]
    pub no_indent: bool,

    /// Title of the chapter holding any text before the first heading [default: 前言]
    #[clap(long)]
    pub preface_title: Option<String>,

    /// Title of the table of contents [default: 目录]
    #[clap(long)]
    pub toc_title: Option<String>,

    /// Title of the cover page [default: 封面]
    #[clap(long)]
    pub cover_title: Option<String>,

    /// Don't generate a table of contents page
    #[clap(long)]
    pub no_toc: bool,

    /// TOML file providing defaults for any of the options above
    #[clap(long, env = "TXT2EPUB_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log more detail (repeat for even more)
    #[clap(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
