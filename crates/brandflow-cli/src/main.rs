mod cli;
mod commands;

use anyhow::Result;
use brandflow_core::{AppConfig, AppCore};
use brandflow_storage::paths;
use clap::Parser;
use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to a file so command output stays clean.
    let log_dir = paths::logs_dir()?;
    std::fs::create_dir_all(&log_dir).ok();

    let file_appender = tracing_appender::rolling::daily(log_dir, "brandflow.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .init();

    let config = AppConfig::from_env();
    let core = AppCore::new(config)?;

    commands::run(&core, cli.command).await
}
