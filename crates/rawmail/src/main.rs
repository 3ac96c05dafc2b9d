//! `rawmail` - print the MIME upload body for a JSON message request.
//!
//! Reads a request such as
//!
//! ```json
//! {"headers": {"To": "a@b.com"}, "textPlain": "hi"}
//! ```
//!
//! from a file or stdin and writes the body to stdout. Logs go to stderr and
//! follow `RUST_LOG`.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use rawmail_mime::{BodyBuilder, MessageRequest};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "rawmail", version, about)]
struct Cli {
    /// JSON request file; reads stdin when omitted or `-`.
    path: Option<PathBuf>,

    /// Reject requests with empty required fields or boundary collisions.
    #[arg(long)]
    strict: bool,

    /// Use random boundary tokens instead of the fixed ones.
    ///
    /// The outer token is logged at info level; the upload request needs it.
    #[arg(long)]
    random_boundaries: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rawmail=info,rawmail_mime=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let raw = read_input(cli.path.as_deref())?;
    let request: MessageRequest =
        serde_json::from_str(&raw).context("Failed to parse message request")?;

    let body = render(&cli, &request)?;
    io::stdout()
        .lock()
        .write_all(body.as_bytes())
        .context("Failed to write body")?;

    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => {
            debug!(path = %path.display(), "reading request file");
            fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))
        }
        _ => {
            debug!("reading request from stdin");
            let mut raw = String::new();
            io::stdin()
                .read_to_string(&mut raw)
                .context("Failed to read stdin")?;
            Ok(raw)
        }
    }
}

fn render(cli: &Cli, request: &MessageRequest) -> Result<String> {
    let builder = if cli.random_boundaries {
        let builder = BodyBuilder::new().with_random_boundaries();
        info!(boundary = %builder.boundaries().outer, "generated outer boundary");
        builder
    } else {
        BodyBuilder::new()
    };

    if cli.strict {
        builder
            .try_build(request)
            .context("Message request failed validation")
    } else {
        Ok(builder.build(request))
    }
}
