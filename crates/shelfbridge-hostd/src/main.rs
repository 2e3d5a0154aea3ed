//! Shelfbridge host daemon (shelfbridged)
//!
//! Bridges the host platform's share/open surface to the embedded
//! runtime:
//! - Reads one JSON document per stdin line: either an inbound external
//!   event (share-in / open-with) or a method request from the embedded
//!   runtime (e.g. `launchDownload`).
//! - Materializes event content into the private storage root and emits
//!   the resulting runtime calls as JSON lines on stdout.
//! - Answers requests with a `result` or structured `error` line.
//!
//! # Architecture
//!
//! The binary wires the host adapters into the core use cases, announces
//! runtime readiness once wiring completes, then runs a single event loop
//! controlled by a `CancellationToken` that is triggered on SIGTERM or
//! SIGINT. EOF on stdin also ends the loop.

use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::json;
use shelfbridge_core::config::Config;
use shelfbridge_core::domain::{InboundEvent, RuntimeRequest};
use shelfbridge_core::usecases::{
    IntakeUseCase, LaunchDownloadUseCase, RequestDispatcher, RuntimeNotifier,
};
use shelfbridge_host::{
    FsContentSource, FsPrivateStorage, MpscRuntimeChannel, SystemUrlHandler,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

/// One line of host input: either an external event or a runtime request
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum HostLine {
    Request(RuntimeRequest),
    Event(InboundEvent),
}

/// The wired bridge: intake pipeline plus request dispatch
struct BridgeService {
    intake: Arc<IntakeUseCase>,
    dispatcher: Arc<RequestDispatcher>,
    shutdown: CancellationToken,
}

impl BridgeService {
    /// Wires adapters and use cases from configuration
    ///
    /// Returns the service together with the notifier so the caller can
    /// announce runtime readiness once the output side is running.
    fn new(config: &Config, shutdown: CancellationToken) -> (Self, Arc<RuntimeNotifier>) {
        let (channel, mut calls) = MpscRuntimeChannel::new();
        let notifier = Arc::new(RuntimeNotifier::new(Arc::new(channel)));

        let intake = Arc::new(IntakeUseCase::new(
            Arc::new(FsContentSource::new()),
            Arc::new(FsPrivateStorage::new(config.storage.root.clone())),
            notifier.clone(),
            config.runtime.handled_events_capacity,
        ));

        let launcher = Arc::new(LaunchDownloadUseCase::new(
            Arc::new(SystemUrlHandler::new()),
            &config.runtime.app_id,
        ));
        let dispatcher = Arc::new(RequestDispatcher::new(launcher));

        // Forward runtime calls to stdout as they arrive.
        tokio::spawn(async move {
            while let Some(call) = calls.recv().await {
                match serde_json::to_string(&call) {
                    Ok(line) => println!("{line}"),
                    Err(e) => error!(error = %e, "failed to serialize runtime call"),
                }
            }
        });

        (
            Self {
                intake,
                dispatcher,
                shutdown,
            },
            notifier,
        )
    }

    /// Runs the stdin event loop until shutdown or EOF
    async fn run(&self) -> Result<()> {
        let stdin = BufReader::new(tokio::io::stdin());
        let mut lines = stdin.lines();

        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    info!("Shutdown signal received");
                    break;
                }
                line = lines.next_line() => {
                    match line.context("Failed to read from stdin")? {
                        Some(line) => self.handle_line(&line).await,
                        None => {
                            info!("Input closed, shutting down");
                            break;
                        }
                    }
                }
            }
        }

        Ok(())
    }

    /// Parses and dispatches one input line
    async fn handle_line(&self, line: &str) {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return;
        }

        match serde_json::from_str::<HostLine>(trimmed) {
            Ok(HostLine::Event(event)) => {
                debug!(event_id = %event.id, action = %event.action, "inbound event received");
                match self.intake.handle_event(&event).await {
                    Ok(Some(_)) => {}
                    Ok(None) => debug!(event_id = %event.id, "event produced no materialization"),
                    Err(e) => error!(event_id = %event.id, error = %e, "intake pipeline failed"),
                }
            }
            Ok(HostLine::Request(request)) => {
                let reply = match self.dispatcher.handle(&request).await {
                    Ok(result) => json!({ "result": result }),
                    Err(e) => json!({
                        "error": { "code": e.code(), "message": e.to_string() }
                    }),
                };
                println!("{reply}");
            }
            Err(e) => {
                warn!(error = %e, "unparseable input line dropped");
            }
        }
    }
}

/// Waits for SIGTERM or SIGINT and triggers the cancellation token
async fn shutdown_signal(token: CancellationToken) {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received SIGINT (Ctrl+C)");
        }
        _ = terminate => {
            info!("Received SIGTERM");
        }
    }

    token.cancel();
}

#[tokio::main]
async fn main() -> Result<()> {
    let config_path = Config::default_path();
    let config = Config::load_or_default(&config_path);

    // Initialize tracing; RUST_LOG wins over the configured level.
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    info!(
        config_path = %config_path.display(),
        storage_root = %config.storage.root.display(),
        "Shelfbridge host daemon starting (shelfbridged)"
    );

    let shutdown_token = CancellationToken::new();
    let signal_token = shutdown_token.clone();
    tokio::spawn(async move {
        shutdown_signal(signal_token).await;
    });

    let (service, notifier) = BridgeService::new(&config, shutdown_token.clone());

    // The output side is wired; the embedded runtime can receive calls now.
    notifier.mark_ready().await;

    let result = service.run().await;

    match &result {
        Ok(()) => info!("Shelfbridge host daemon shut down gracefully"),
        Err(e) => error!(error = %e, "Shelfbridge host daemon exiting with error"),
    }

    result
}
