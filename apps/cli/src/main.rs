use std::{
    path::{Path, PathBuf},
    process::ExitCode,
    sync::Arc,
};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{
    config::load_settings, http_component, FileSelection, InputSurface, SelectedFile,
    SelectionOutcome, SubmitOutcome,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

const FALLBACK_MEDIA_TYPE: &str = "application/octet-stream";

/// Upload a plain-text file to the summarize API and print the summary.
#[derive(Parser, Debug)]
#[command(name = "summarize")]
struct Args {
    /// File to summarize.
    path: PathBuf,
    /// Backend base URL, e.g. http://localhost:8080.
    #[arg(long)]
    backend_url: Option<String>,
    #[arg(long)]
    timeout_secs: Option<u64>,
    /// Config file; defaults to ./summarizer.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Declared media type. Guessed from the extension when omitted.
    #[arg(long)]
    media_type: Option<String>,
}

/// The terminal has no widget to clear; resets are only traced.
struct PathInput {
    path: PathBuf,
}

impl InputSurface for PathInput {
    fn reset(&self) {
        debug!(path = %self.path.display(), "input reset");
    }
}

fn guess_media_type(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_raw()
        .unwrap_or(FALLBACK_MEDIA_TYPE)
        .to_string()
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(backend_url) = args.backend_url {
        settings.backend_url = backend_url;
    }
    if let Some(timeout_secs) = args.timeout_secs {
        settings.request_timeout_secs = timeout_secs;
    }

    let content = tokio::fs::read(&args.path)
        .await
        .with_context(|| format!("failed to read '{}'", args.path.display()))?;
    let media_type = args
        .media_type
        .unwrap_or_else(|| guess_media_type(&args.path));
    let file = SelectedFile::new(display_name(&args.path), media_type, content);

    let component = http_component(&settings, Arc::new(PathInput { path: args.path }))?;

    if let SelectionOutcome::Rejected(err) = component.select(FileSelection::single(file)) {
        eprintln!("{err}");
        return Ok(ExitCode::FAILURE);
    }

    match component.submit().await {
        SubmitOutcome::Succeeded(summary) => {
            println!("{summary}");
            Ok(ExitCode::SUCCESS)
        }
        SubmitOutcome::Failed(_) | SubmitOutcome::Blocked(_) | SubmitOutcome::Busy => {
            eprintln!("{}", component.state().error_message);
            Ok(ExitCode::FAILURE)
        }
    }
}
