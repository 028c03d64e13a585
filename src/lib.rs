pub mod config;
pub mod fetcher;
pub mod notifier;
pub mod reading;
pub mod watcher;

use std::time::Duration;

use anyhow::Result;
use log::info;
use tokio_util::sync::CancellationToken;

use config::WatchConfig;
use fetcher::CommandFetcher;
use notifier::DesktopNotifier;
use watcher::MailWatcher;

/// Application name, used for logging and as the notification source.
pub const APP_NAME: &str = "mailwatch";

pub async fn run() -> Result<()> {
    // Initialize logging (reads RUST_LOG env var)
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("{APP_NAME} starting up...");

    let config = WatchConfig::load()?;
    info!(
        "polling `{}` every {}s",
        config.status_command.join(" "),
        config.poll_interval_secs
    );

    let fetcher = CommandFetcher::new(&config)?;
    let mut watcher = MailWatcher::new(
        fetcher,
        DesktopNotifier,
        Duration::from_secs(config.poll_interval_secs),
    );

    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            shutdown_signal().await;
            info!("interrupt received; shutting down");
            cancel.cancel();
        });
    }

    watcher.run(cancel).await
}

/// Resolves when the process is asked to stop (SIGINT or SIGTERM).
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut terminate =
            signal(SignalKind::terminate()).expect("failed to install SIGTERM handler");
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = terminate.recv() => {}
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
