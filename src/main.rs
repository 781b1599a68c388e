use anyhow::{Context, Result};
use cli::Cli;
use config::Settings;
use error::{Error, ErrorKind};
use indicatif::{ProgressBar, ProgressStyle};
use std::process::ExitCode;

mod book;
mod cli;
mod config;
mod error;
mod formatter;
mod loader;
mod paragraphs;
mod pipeline;
mod sinks;
mod splitter;

fn main() -> ExitCode {
    match try_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {e:#}", console::style("Error").red());
            e.downcast_ref::<Error>()
                .map(|e| ExitCode::from(exit_status(e.kind())))
                .unwrap_or(ExitCode::FAILURE)
        }
    }
}

/// Distinct exit statuses so scripts can tell failures apart.
fn exit_status(kind: ErrorKind) -> u8 {
    match kind {
        ErrorKind::Configuration => 2,
        ErrorKind::Input => 3,
        ErrorKind::Cover => 4,
        ErrorKind::Structural => 5,
        ErrorKind::Output => 6,
    }
}

fn try_main() -> Result<()> {
    use clap::Parser;
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let settings = Settings::resolve(&cli).with_context(|| "Invalid configuration")?;

    let progress = ProgressBar::new(0);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .expect("can parse progress style")
            .progress_chars("#>-"),
    );

    let stats = pipeline::convert(&settings, &progress).with_context(|| {
        format!(
            "Failed to convert {} to EPUB",
            settings.input.display()
        )
    })?;

    println!();
    println!("  EPUB:       {}", settings.output.display());
    println!("  Chapters:   {}", stats.chapter_count);
    println!("  Paragraphs: {}", stats.paragraph_count);

    Ok(())
}
