//! querydiff CLI entry point.
//!
//! Compares an original query with its translation and prints the
//! side-by-side diff, or prints a saved translation history list.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use std::io::Read;
use std::path::{Path, PathBuf};

use querydiff::config::{OutputFormat, ViewConfig};
use querydiff::history;
use querydiff::render::{to_json, SideBySide, ToHtml, ToText};

#[derive(Parser, Debug)]
#[command(name = "querydiff")]
#[command(version)]
#[command(about = "Side-by-side diff of a query and its translation", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compare two files line by line
    Diff {
        /// Original query, or - for stdin
        original: PathBuf,

        /// Translated query, or - for stdin
        translated: PathBuf,

        /// Output format: html, text or json
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// TOML file with view settings
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Title of the left column
        #[arg(long)]
        old_title: Option<String>,

        /// Title of the right column
        #[arg(long)]
        new_title: Option<String>,

        /// Width of the left column in text output
        #[arg(short, long)]
        width: Option<usize>,
    },

    /// Print a saved history list
    History {
        /// JSON file as returned by the history endpoint, or - for stdin
        file: PathBuf,
    },
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn read_input(path: &Path) -> Result<String> {
    if is_stdin(path) {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    match args.command {
        Commands::Diff {
            original,
            translated,
            format,
            config,
            old_title,
            new_title,
            width,
        } => {
            if is_stdin(&original) && is_stdin(&translated) {
                bail!("Only one side can be read from stdin");
            }

            let mut view = match config {
                Some(path) => ViewConfig::load(&path)
                    .with_context(|| format!("Failed to load config {}", path.display()))?,
                None => ViewConfig::default(),
            };
            if let Some(format) = format {
                view.format = format;
            }
            if let Some(title) = old_title {
                view.old_title = title;
            }
            if let Some(title) = new_title {
                view.new_title = title;
            }
            if let Some(width) = width {
                view.width = width;
            }

            let old = read_input(&original)?;
            let new = read_input(&translated)?;
            let rows = querydiff::compare(&old, &new);
            info!("{} rows", rows.len());

            let layout = SideBySide {
                rows: &rows,
                old_title: &view.old_title,
                new_title: &view.new_title,
                width: view.width,
            };
            let out = match view.format {
                OutputFormat::Html => layout.to_html(),
                OutputFormat::Text => layout.to_text(),
                OutputFormat::Json => to_json(&rows).context("Failed to encode rows")?,
            };
            println!("{}", out);
        }
        Commands::History { file } => {
            let body = read_input(&file)?;
            println!("{}", history::describe(&history::parse(&body)));
        }
    }

    Ok(())
}
