use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use credlens::{
    api, compute_statistics, extract_citations, extract_keywords, extract_timeline,
    similarity_matrix, HistoryEngine, Language, Settings,
};
use serde::Serialize;
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

// CLI Arguments
#[derive(Parser, Debug)]
#[command(author, version, about = "Content statistics and credibility history", long_about = None)]
struct Args {
    /// TOML configuration file
    #[arg(short, long, env = "CREDLENS_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// History database path
    #[arg(long, global = true)]
    db: Option<String>,

    /// Language code (en, hi, gu, mr)
    #[arg(short, long, global = true)]
    language: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP API
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Content statistics for a file ("-" for stdin)
    Stats { file: String },
    /// Top keywords for a file
    Keywords { file: String },
    /// Similarity matrix across files
    Compare {
        #[arg(required = true, num_args = 2..)]
        files: Vec<String>,
    },
    /// Dates mentioned in a file
    Timeline { file: String },
    /// DOIs, quotes and links in a file
    Citations { file: String },
    /// Stored analyses, oldest first
    History,
    /// Trends across stored analyses
    Patterns,
}

fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_input(file: &str) -> Result<String> {
    if file == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        Ok(text)
    } else {
        std::fs::read_to_string(file).with_context(|| format!("Failed to read {}", file))
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Resolve once `signal` fires. If the handler cannot be installed the server
/// keeps running instead of shutting down immediately.
async fn shutdown_signal<F>(signal: F)
where
    F: std::future::Future<Output = std::io::Result<()>>,
{
    if let Err(err) = signal.await {
        tracing::error!("failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

async fn serve(settings: Settings) -> Result<()> {
    let engine = Arc::new(HistoryEngine::new(
        &settings.storage.path,
        settings.analysis.default_language,
    )?);
    let app = api::create_router(engine.clone());

    let address = settings.server.address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    tracing::info!("credlens {} listening on {}", credlens::VERSION, address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(tokio::signal::ctrl_c()))
        .await?;

    engine.flush()
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = Settings::load(args.config.as_deref())?;
    if let Some(db) = args.db {
        settings.storage.path = db;
    }
    if let Some(code) = args.language.as_deref() {
        settings.analysis.default_language = Language::from_code(code);
    }

    init_logging(&settings.log.filter);
    let language = settings.analysis.default_language;

    match args.command {
        Command::Serve { host, port } => {
            if let Some(host) = host {
                settings.server.host = host;
            }
            if let Some(port) = port {
                settings.server.port = port;
            }
            serve(settings).await
        }
        Command::Stats { file } => print_json(&compute_statistics(&read_input(&file)?, language)),
        Command::Keywords { file } => print_json(&extract_keywords(&read_input(&file)?, language)),
        Command::Compare { files } => {
            let texts = files
                .iter()
                .map(|f| read_input(f))
                .collect::<Result<Vec<_>>>()?;
            print_json(&similarity_matrix(&texts))
        }
        Command::Timeline { file } => print_json(&extract_timeline(&read_input(&file)?)),
        Command::Citations { file } => print_json(&extract_citations(&read_input(&file)?)),
        Command::History => {
            let engine = HistoryEngine::new(&settings.storage.path, language)?;
            print_json(&engine.history()?)
        }
        Command::Patterns => {
            let engine = HistoryEngine::new(&settings.storage.path, language)?;
            print_json(&engine.patterns()?)
        }
    }
}
