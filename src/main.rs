//! cinefind command-line driver.
//!
//! Reads search terms from stdin, one per line, and redraws the search screen
//! on stdout. End of input exits once the last search has finished.

use cinefind::app::SearchTermStore;
use cinefind::ui::renderer::DEFAULT_COLUMNS;
use cinefind::{observability, Config, Runtime, TerminalSink, Theme};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::oneshot;

#[derive(Debug, Parser)]
#[command(name = "cinefind", version, about = "Search the TMDB catalog as you type")]
struct Cli {
    /// TOML configuration file.
    #[arg(long, env = "CINEFIND_CONFIG")]
    config: Option<PathBuf>,

    /// Tracing filter used when RUST_LOG is unset (e.g. `debug`).
    #[arg(long)]
    trace_level: Option<String>,

    /// Built-in theme: dark, light or plain.
    #[arg(long)]
    theme: Option<String>,

    /// Screen width in columns.
    #[arg(long, default_value_t = DEFAULT_COLUMNS)]
    columns: usize,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("cinefind: {e}");
            return ExitCode::FAILURE;
        }
    };
    if cli.trace_level.is_some() {
        config.trace_level = cli.trace_level;
    }
    if cli.theme.is_some() {
        config.theme_name = cli.theme;
    }

    let log_path = observability::init_tracing(&config);
    tracing::info!(log_file = ?log_path, backend = ?config.trending_backend, "cinefind starting");

    match run(&config, cli.columns).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "cinefind failed");
            eprintln!("cinefind: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: &Config, columns: usize) -> cinefind::Result<()> {
    let service = cinefind::build_query_service(config)?;
    let store = cinefind::build_trending_store(config)?;
    let recorder = cinefind::build_recorder(config, store);

    let theme: Theme = config.theme();
    let sink = TerminalSink::new(std::io::stdout(), theme).with_columns(columns);

    let terms = SearchTermStore::spawn(config.debounce());
    let setter = terms.setter();
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    setter.set(line.trim());
                }
                Ok(None) => break,
                Err(e) => {
                    tracing::error!(error = %e, "failed to read stdin");
                    break;
                }
            }
        }
        let _ = shutdown_tx.send(());
    });

    let runtime = Runtime::new(terms, service, recorder, sink);
    let state = runtime
        .run(async {
            let _ = shutdown_rx.await;
        })
        .await;

    tracing::info!(
        movies = state.movies.len(),
        trending = state.trending_movies.len(),
        "cinefind stopped"
    );
    Ok(())
}
