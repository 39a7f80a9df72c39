mod config;
mod db;
mod routes;
mod services;
mod state;
mod station;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use station::ScanStation;
use station::export::{DownloadNavigator, DownloadTarget, ExportError, trigger_export};
use station::scanner::{DEFAULT_FPS, DEFAULT_QRBOX, LineScanner, Reader, ScannerConfig, join_scanner, open_input};
use station::submit::{HttpSubmitter, SubmitError};
use station::ui::ConsoleUi;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("only one scanner input can read from stdin")]
    StdinTwice,
    #[error("scanner input {path}: {source}")]
    ScannerInput { path: String, source: std::io::Error },
    #[error("database init failed: {0}")]
    Database(#[from] sqlx::Error),
    #[error("server failed: {0}")]
    Serve(std::io::Error),
    #[error(transparent)]
    Submit(#[from] SubmitError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

#[derive(Parser, Debug)]
#[command(name = "palletscan", about = "Pallet packing scan station and scan collector")]
struct Cli {
    #[arg(long, env = "PALLETSCAN_BASE_URL", default_value = "http://127.0.0.1:5000")]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the collector HTTP service (configured from the environment).
    Serve,
    /// Read pallet and part decodes and submit part scans to the collector.
    Station(StationArgs),
    /// Download the collector's scan export.
    Export(ExportArgs),
}

#[derive(Args, Debug)]
struct StationArgs {
    #[arg(long, help = "Pallet scanner input path, or - for stdin")]
    pallet_input: String,

    #[arg(long, help = "Part scanner input path, or - for stdin")]
    part_input: String,

    #[arg(long, default_value_t = DEFAULT_FPS)]
    fps: u32,

    #[arg(long, default_value_t = DEFAULT_QRBOX)]
    qrbox: u32,
}

#[derive(Args, Debug)]
struct ExportArgs {
    #[arg(long, conflicts_with = "dir", help = "Write the export to this exact path")]
    out: Option<PathBuf>,

    #[arg(long, default_value = ".", help = "Directory for the server-named download")]
    dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    match cli.command {
        Command::Serve => run_serve().await,
        Command::Station(args) => run_station(&cli.base_url, args).await,
        Command::Export(args) => run_export(&cli.base_url, args).await,
    }
}

/// Log to stderr so operator prompts on stdout stay readable.
/// `RUST_LOG` overrides the default `info` filter.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run_serve() -> Result<(), CliError> {
    let config = config::ServerConfig::from_env();
    let pool = db::init_pool(&config.database_url, config.db_max_connections).await?;
    let state = state::AppState::new(pool);

    let app = routes::app(state, &config.static_dir);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port))
        .await
        .map_err(CliError::Serve)?;

    tracing::info!(port = config.port, static_dir = %config.static_dir.display(), "palletscan collector listening");
    axum::serve(listener, app).await.map_err(CliError::Serve)
}

async fn run_station(base_url: &str, args: StationArgs) -> Result<(), CliError> {
    if args.pallet_input == "-" && args.part_input == "-" {
        return Err(CliError::StdinTwice);
    }

    let config = ScannerConfig { fps: args.fps, qrbox: args.qrbox };
    let pallet_input = open_scanner_input(&args.pallet_input).await?;
    let part_input = open_scanner_input(&args.part_input).await?;

    let submitter = HttpSubmitter::new(base_url)?;
    tracing::info!(url = submitter.url(), "station submitting scans");

    let (tx, rx) = mpsc::channel(station::SCAN_EVENT_CAPACITY);
    let pallet = LineScanner::new(Reader::Pallet, pallet_input, config).render(tx.clone());
    let part = LineScanner::new(Reader::Part, part_input, config).render(tx);

    let station = ScanStation::new(Arc::new(submitter), ConsoleUi::new(std::io::stdout()));
    let summary = station.run(rx).await;

    // Both senders are gone once `run` returns, so the scanner tasks are done.
    join_scanner(Reader::Pallet, pallet).await;
    join_scanner(Reader::Part, part).await;

    tracing::info!(
        pallet_scans = summary.pallet_scans,
        part_scans = summary.part_scans,
        submitted = summary.submitted,
        failed = summary.failed,
        scanner_errors = summary.scanner_errors,
        "station stopped"
    );
    Ok(())
}

async fn open_scanner_input(
    path: &str,
) -> Result<Box<dyn tokio::io::AsyncBufRead + Unpin + Send>, CliError> {
    open_input(path)
        .await
        .map_err(|source| CliError::ScannerInput { path: path.to_owned(), source })
}

async fn run_export(base_url: &str, args: ExportArgs) -> Result<(), CliError> {
    let target = match args.out {
        Some(path) => DownloadTarget::File(path),
        None => DownloadTarget::Dir(args.dir),
    };
    trigger_export(&DownloadNavigator::new(base_url, target)).await?;
    Ok(())
}
