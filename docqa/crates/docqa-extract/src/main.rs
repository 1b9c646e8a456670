use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use docqa::document_processing::{
    ensure_dir_exists, find_documents, EventLevel, ExtractionDispatcher, RecentLog,
    TracingObserver,
};
use docqa::DocQaConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Extract plain text from uploaded documents (txt, pdf, docx, xlsx).
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a TOML configuration file (default: config/docqa.toml if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the text of one or more documents to stdout.
    Extract {
        /// Documents to extract.
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Print the recent extraction events to stderr when done.
        #[arg(long)]
        summary: bool,
    },
    /// List the supported documents in the data directory.
    List {
        /// Directory to scan instead of the configured data directory.
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Print the listing as JSON.
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = DocQaConfig::resolve(cli.config.as_deref())?;
    init_tracing(&config.logging.level);

    match cli.command {
        Command::Extract { paths, summary } => extract(&config, &paths, summary),
        Command::List { dir, json } => list(&config, dir, json),
    }
}

fn init_tracing(default_level: &str) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn extract(config: &DocQaConfig, paths: &[PathBuf], summary: bool) -> Result<()> {
    let recent = Arc::new(RecentLog::new(config.logging.recent_capacity));
    let dispatcher = ExtractionDispatcher::with_observer((TracingObserver, recent.clone()));

    let mut stdout = io::stdout().lock();
    let mut failed = 0;

    for path in paths {
        match dispatcher.extract(path) {
            Ok(text) => {
                if paths.len() > 1 {
                    writeln!(stdout, "==> {} <==", path.display())?;
                }
                stdout
                    .write_all(text.as_bytes())
                    .context("failed to write extracted text")?;
            }
            Err(e) => {
                failed += 1;
                eprintln!("{} Error processing file: {}", "✗".red(), e);
            }
        }
    }
    stdout.flush()?;

    if summary {
        for event in recent.snapshot() {
            let line = event.to_string();
            match event.level {
                EventLevel::Info => eprintln!("{}", line),
                EventLevel::Warn => eprintln!("{}", line.yellow()),
                EventLevel::Error => eprintln!("{}", line.red()),
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} documents could not be processed", failed, paths.len());
    }

    Ok(())
}

fn list(config: &DocQaConfig, dir: Option<PathBuf>, json: bool) -> Result<()> {
    let dir = dir.unwrap_or_else(|| config.documents.data_dir.clone());
    ensure_dir_exists(&dir)?;

    let documents = find_documents(&dir, config.documents.recursive)
        .with_context(|| format!("failed to list documents in {}", dir.display()))?;
    tracing::info!(count = documents.len(), dir = %dir.display(), "Found documents");

    if json {
        println!("{}", serde_json::to_string_pretty(&documents)?);
        return Ok(());
    }

    for document in &documents {
        let kind = format!("{:<11}", document.kind.to_string());
        println!("{}\t{}", kind.cyan(), document.path.display());
    }

    Ok(())
}
