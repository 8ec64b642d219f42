mod cli;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lms_client::config::Config;
use lms_client::error::AppError;
use lms_client::state::AppState;

use crate::cli::Command;

#[derive(Parser, Debug)]
#[command(name = "lms", about = "Command-line client for the learning management system")]
struct Args {
    /// Base URL of the LMS server
    #[arg(long, env = "LMS_API_URL")]
    api_url: Option<String>,
    /// Where the signed-in user is remembered
    #[arg(long, env = "LMS_SESSION_FILE")]
    session_file: Option<PathBuf>,
    /// Re-run a command this many times when it fails with a retryable error
    #[arg(long, default_value_t = 0)]
    retries: u32,
    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "lms_client=info,lms=info".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let state = match setup(&args).await {
        Ok(state) => state,
        Err(e) => {
            eprintln!("{}", e.toast("Unable to start"));
            return ExitCode::FAILURE;
        }
    };

    let mut attempt = 0;
    loop {
        match cli::run(&state, &args.command).await {
            Ok(()) => return ExitCode::SUCCESS,
            Err(e) if e.is_retryable() && attempt < args.retries => {
                attempt += 1;
                warn!("{} failed ({}), retrying {}/{}", args.command.name(), e, attempt, args.retries);
            }
            Err(e) => {
                eprintln!("{}", e.toast(args.command.failure_title()));
                return ExitCode::FAILURE;
            }
        }
    }
}

async fn setup(args: &Args) -> Result<AppState, AppError> {
    let mut config = Config::new_from_env()?;
    if let Some(url) = &args.api_url {
        config = config.with_api_url(url)?;
    }
    if let Some(path) = &args.session_file {
        config.session_file = path.clone();
    }
    info!("using LMS at {}", config.api_url);

    let state = AppState::from_config(&config)?;
    state.session.restore().await?;
    Ok(state)
}
