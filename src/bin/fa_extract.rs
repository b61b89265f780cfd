//! Extract records from a saved page and print them as JSON.
//!
//! ```text
//! curl -s https://www.furaffinity.net/view/12345/ | fa_extract submission
//! fa_extract gallery --input gallery.html --pretty
//! ```

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use fa_extract::{extract_listing_bytes, extract_submission_bytes, ListingKind};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PageKind {
    Search,
    Browse,
    Gallery,
    Submission,
}

#[derive(Parser)]
#[command(name = "fa_extract", about = "Extract typed records from FurAffinity pages")]
struct Cli {
    /// Kind of page being read
    #[arg(value_enum)]
    page: PageKind,

    /// Read the page from a file instead of stdin
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    let body = match &cli.input {
        Some(path) => fs::read(path).with_context(|| format!("reading {}", path.display()))?,
        None => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf).context("reading stdin")?;
            buf
        }
    };
    tracing::info!(bytes = body.len(), page = ?cli.page, "extracting");

    let value = match cli.page {
        PageKind::Search => serde_json::to_value(extract_listing_bytes(&body, ListingKind::Search)?)?,
        PageKind::Browse => serde_json::to_value(extract_listing_bytes(&body, ListingKind::Browse)?)?,
        PageKind::Gallery => serde_json::to_value(extract_listing_bytes(&body, ListingKind::Gallery)?)?,
        PageKind::Submission => serde_json::to_value(extract_submission_bytes(&body)?)?,
    };

    let output = if cli.pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    };
    println!("{output}");
    Ok(())
}
