// main.rs - Game of Life harness: stdin commands, tokio-driven clock

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use conway_coro::{AppConfig, Cli, Outcome, Session};
use log::{debug, info};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::runtime::Handle;
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Config errors are fatal; there is no fallback to defaults.
    let mut config = AppConfig::load_from(&cli.config_dir).context("loading configuration")?;
    config.apply_cli(&cli);

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level)).init();

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut session = Session::new(&config, Handle::current(), Some(tx))
        .context("cannot create grid")?;
    info!("{}x{} grid ready, default interval {} ms", config.width, config.height, config.tick_interval_ms);

    tokio::spawn(async move {
        while let Some(report) = rx.recv().await {
            debug!("generation {}: {} cells changed", report.generation, report.changed.len());
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("reading stdin")? {
        let mut stdout = std::io::stdout().lock();
        if session.execute_line(&line, &mut stdout) == Outcome::Quit {
            break;
        }
    }

    let failed = session.failed();
    drop(session);
    Ok(if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}
