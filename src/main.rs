//! # brief CLI
//!
//! Command-line entry point:
//!
//! - `serve`: run the HTTP service (landing page, `/search`, `/export`)
//! - `search`: run one query and print the summaries
//! - `export`: turn saved summaries into a PDF report
//!
//! Credentials and defaults come from the environment (and `.env`), see
//! [`brief::config::Config::from_env`].

mod telemetry;

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use brief::prelude::{Config, Orchestrator, SummaryItem};
use brief::report::{DEFAULT_REPORT_TITLE, ReportItem, render_report};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use telemetry::OtelGuard;
use tracing::{info, instrument};

#[derive(Parser)]
#[command(author, version, about = "Search the web and summarize what it finds", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP service
    Serve(ServeArgs),

    /// Search, extract and summarize articles for a query
    Search(SearchArgs),

    /// Render saved summaries as a PDF report
    Export(ExportArgs),
}

#[derive(Args, Debug)]
struct ServeArgs {
    /// Address to bind (default: BRIEF_HOST or 127.0.0.1)
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (default: BRIEF_PORT or 8000)
    #[arg(short, long)]
    port: Option<u16>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Args, Debug)]
struct SearchArgs {
    /// Search query
    #[arg(required = true)]
    query: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Number of candidates processed at once (default: BRIEF_CONCURRENCY or 1)
    #[arg(short, long)]
    concurrency: Option<usize>,
}

#[derive(Args, Debug)]
struct ExportArgs {
    /// JSON file with summaries, as written by `search --format json`
    #[arg(required = true)]
    input: PathBuf,

    /// Where to write the PDF
    #[arg(short, long, default_value = "summary.pdf")]
    output: PathBuf,

    /// Report heading; overrides a query stored in the input file
    #[arg(short, long)]
    query: Option<String>,
}

/// Accepted export inputs: a bare summary list or an `/export` request body
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ExportInput {
    Items(Vec<ReportItem>),
    Request {
        #[serde(default)]
        query: Option<String>,
        #[serde(default)]
        items: Vec<ReportItem>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _otel: OtelGuard = telemetry::init_tracing_subscriber()?;

    match cli.command {
        Commands::Serve(args) => serve_command(args).await?,
        Commands::Search(args) => search_command(args).await?,
        Commands::Export(args) => export_command(args)?,
    }

    Ok(())
}

async fn serve_command(args: ServeArgs) -> anyhow::Result<()> {
    let mut config = Config::from_env()?;
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }

    brief::server::serve(&config).await?;
    Ok(())
}

#[instrument]
async fn search_command(args: SearchArgs) -> anyhow::Result<()> {
    let mut config = Config::from_env()?;
    if let Some(concurrency) = args.concurrency {
        config.concurrency = concurrency.max(1);
    }

    let orchestrator = Orchestrator::from_config(&config)?;
    let items: Vec<SummaryItem> = orchestrator.run(&args.query).await?;

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&items)?),
        OutputFormat::Text => brief::markdown::print_summaries(&items)?,
    }
    Ok(())
}

fn export_command(args: ExportArgs) -> anyhow::Result<()> {
    let raw = fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let (stored_query, items) = match serde_json::from_str::<ExportInput>(&raw)
        .with_context(|| format!("{} is not a summary list", args.input.display()))?
    {
        ExportInput::Items(items) => (None, items),
        ExportInput::Request { query, items } => (query, items),
    };

    if items.is_empty() {
        anyhow::bail!("No items to export.");
    }

    let query = args
        .query
        .or(stored_query)
        .unwrap_or_else(|| DEFAULT_REPORT_TITLE.to_string());
    let pdf = render_report(&query, &items, chrono::Utc::now())?;
    fs::write(&args.output, &pdf)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    info!(items = items.len(), "Wrote {}", args.output.display());
    println!("Wrote {} summaries to {}", items.len(), args.output.display());
    Ok(())
}
