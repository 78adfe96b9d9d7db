//! depprobe - dependency confusion checker for remote package manifests.
//!
//! CLI entry point. Reads manifest URLs from stdin, one per line.

use clap::Parser;
use depprobe::config::{HttpConfig, RegistryConfig};
use depprobe::{
    read_targets, Config, ConsoleOutput, ManifestFetcher, Scanner, SearchPageRegistry, WorkerPool,
};
use std::process::ExitCode;
use std::sync::Arc;
use tokio::io::BufReader;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();

    // Diagnostics go to stderr; stdout carries the status lines only
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if config.verbose {
            EnvFilter::new("depprobe=debug")
        } else {
            EnvFilter::new("depprobe=warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tokio::spawn(async {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};
            let (Ok(mut sigterm), Ok(mut sigint)) = (
                signal(SignalKind::terminate()),
                signal(SignalKind::interrupt()),
            ) else {
                error!("Failed to register signal handlers");
                return;
            };

            tokio::select! {
                _ = sigterm.recv() => {},
                _ = sigint.recv() => {},
            }
        }

        #[cfg(not(unix))]
        {
            let _ = tokio::signal::ctrl_c().await;
        }

        std::process::exit(130);
    });

    let urls = match read_targets(BufReader::new(tokio::io::stdin())).await {
        Ok(urls) => urls,
        Err(e) => {
            println!("[ERROR] Failed to read input: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let client = match HttpConfig::default().build_client() {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to create HTTP client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let scanner = Scanner::new(
        ManifestFetcher::new(client.clone()),
        Arc::new(SearchPageRegistry::new(client, RegistryConfig::default())),
        Arc::new(ConsoleOutput::new(config.verbose)),
        WorkerPool::new(config.slots()),
    );

    let summary = scanner.scan_summary(urls).await;
    debug!("Run complete: {:?}", summary);

    ExitCode::SUCCESS
}
