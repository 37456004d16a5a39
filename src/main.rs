//! CLI entry point for the shooting splits dashboard.
//!
//! Provides subcommands for printing the per-difficulty summary, rendering
//! the dashboard page to a file, and serving it over HTTP.

use anyhow::Result;
use clap::{Parser, Subcommand};
use shooting_splits::analyzers::analyzer::analyze;
use shooting_splits::{
    config::Settings,
    output::{print_json, print_pretty, print_table, write_json, write_records},
    render::{PageSpec, render_page},
    server::{Dashboard, serve},
};
use std::ffi::OsStr;
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "shooting_splits")]
#[command(about = "Field goal percentage by game difficulty", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the summary and print it as a table
    Summarize {
        /// Path to file or URL to fetch (defaults to DASHBOARD_SOURCE)
        #[arg(value_name = "FILE_OR_URL")]
        source: Option<String>,

        /// Also write the full report as JSON
        #[arg(long)]
        json: Option<String>,

        /// Also write the summary rows as CSV
        #[arg(long)]
        csv: Option<String>,
    },
    /// Render the dashboard page to an HTML file
    Render {
        /// Path to file or URL to fetch (defaults to DASHBOARD_SOURCE)
        #[arg(value_name = "FILE_OR_URL")]
        source: Option<String>,

        /// HTML file to write
        #[arg(short, long, default_value = "dashboard.html")]
        output: String,
    },
    /// Load the data once and serve the dashboard
    Serve {
        /// Path to file or URL to fetch (defaults to DASHBOARD_SOURCE)
        #[arg(value_name = "FILE_OR_URL")]
        source: Option<String>,

        /// Address to listen on (defaults to DASHBOARD_ADDR)
        #[arg(short, long)]
        addr: Option<std::net::SocketAddr>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let settings = Settings::from_env()?;

    // Logging setup: colored stderr + JSON rolling log file
    let log_dir = Path::new(&settings.log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&settings.log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("shooting_splits.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Summarize { source, json, csv } => {
            let source = source.unwrap_or(settings.source);
            let report = analyze(&source).await?;

            print_pretty(&report);
            print!("{}", print_table(&report.rows));

            if let Some(path) = json {
                write_json(&path, &report)?;
                info!(path, "JSON report written");
            } else {
                print_json(&report)?;
            }
            if let Some(path) = csv {
                write_records(&path, &report.rows)?;
                info!(path, "CSV summary written");
            }
        }
        Commands::Render { source, output } => {
            let source = source.unwrap_or(settings.source);
            let report = analyze(&source).await?;

            let page = render_page(&report.rows, &PageSpec::default())?;
            std::fs::write(&output, page)?;
            info!(output, "Dashboard page written");
        }
        Commands::Serve { source, addr } => {
            let source = source.unwrap_or(settings.source);
            let addr = addr.unwrap_or(settings.addr);
            let report = analyze(&source).await?;

            let dashboard = Arc::new(Dashboard::build(&report, &PageSpec::default())?);
            let listener = tokio::net::TcpListener::bind(addr).await?;
            serve(listener, dashboard).await?;
        }
    }

    Ok(())
}
