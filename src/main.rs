//! # Wordlight
//!
//! Highlights configured words in documents, each in its own color.
//!
//! ## Quick Start
//!
//! ```bash
//! # Print every highlight in a file
//! cargo run -- --config words.json src/main.rs
//!
//! # Keep running and re-highlight on every save
//! cargo run -- --config words.json --watch notes.md
//! ```
//!
//! `words.json` maps words to colors:
//!
//! ```json
//! { "TODO": "#ffff00", "FIXME": "#ff0000" }
//! ```

mod host;
mod watch;

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use host::TerminalHost;
use wordlight_core::{Document, HostEvent, Settings, WordHighlighter};

/// Wordlight - highlight configured words in documents
#[derive(Parser, Debug)]
#[command(name = "wordlight")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Documents to highlight
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Word map (JSON object of word to color); overrides the settings file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Settings file (TOML)
    #[arg(short, long, value_name = "PATH")]
    settings: Option<PathBuf>,

    /// Keep running and re-highlight when files change
    #[arg(short, long)]
    watch: bool,

    /// Verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    tracing::info!("Starting Wordlight v{}", env!("CARGO_PKG_VERSION"));

    let settings_path = match &args.settings {
        Some(path) => Some(path.clone()),
        None => Settings::default_path().ok(),
    };
    let settings = match &args.settings {
        Some(path) => Settings::load_from(path)
            .with_context(|| format!("Cannot load settings from {}", path.display()))?,
        None => Settings::load(),
    };

    // Open everything up front so a bad path fails before any style exists.
    let documents = args
        .files
        .iter()
        .map(|path| {
            Document::from_file(path).with_context(|| format!("Cannot open {}", path.display()))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let host = TerminalHost::new(settings, args.config, std::io::stdout());

    if args.watch {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        runtime.block_on(watch::run(host, documents, settings_path))
    } else {
        let mut host = host;
        run_once(&mut host, documents);
        Ok(())
    }
}

/// Highlights each document once, in the order given.
fn run_once<W: std::io::Write>(host: &mut TerminalHost<W>, documents: Vec<Document>) {
    let mut highlighter = WordHighlighter::activate(host);
    for doc in documents {
        let id = host.open(doc);
        let _ = highlighter.handle_event(&HostEvent::ActiveDocumentChanged(Some(id)), host);
    }
    highlighter.deactivate(host);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parsing() {
        let args = Args::parse_from(["wordlight"]);
        assert!(args.files.is_empty());
        assert!(!args.watch);
        assert!(args.config.is_none());
    }

    #[test]
    fn test_args_with_files_and_config() {
        let args = Args::parse_from(["wordlight", "-c", "words.json", "-vv", "a.rs", "b.rs"]);
        assert_eq!(args.config, Some(PathBuf::from("words.json")));
        assert_eq!(args.files, vec![PathBuf::from("a.rs"), PathBuf::from("b.rs")]);
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_run_once_highlights_each_document() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("words.json");
        std::fs::write(&config, r##"{"cat":"orange"}"##).unwrap();

        let mut host = TerminalHost::new(Settings::default(), Some(config), Vec::new());
        let docs = vec![Document::untitled("cat category"), Document::untitled("a\n cat")];
        run_once(&mut host, docs);
        assert_eq!(host.live_styles(), 0);

        let out = String::from_utf8(host.into_output()).unwrap();
        assert_eq!(
            out,
            "Untitled:1:1-1:4\tcat\torange\nUntitled:2:2-2:5\tcat\torange\n"
        );
    }
}
