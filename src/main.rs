// src/main.rs
use anyhow::Result;
use std::sync::Arc;
use tokio::signal;
use tracing::{debug, info};

use uptime_monitor::{config, metrics::MetricsRegistry, monitor::Monitor};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("uptime_monitor=debug".parse()?)
                .add_directive("hyper=info".parse()?)
                .add_directive("reqwest=info".parse()?),
        )
        .init();

    let config = config::load_config()?;

    // Start listening for interrupts before anything can block.
    let (stop_tx, stop_rx) = tokio::sync::oneshot::channel();
    tokio::spawn(async move {
        shutdown_signal().await;
        let _ = stop_tx.send(());
    });

    let metrics_registry = MetricsRegistry::new()?;
    let metrics = metrics_registry.collector();

    let monitor = Arc::new(Monitor::from_config(&config, metrics.clone())?);

    let stopper = monitor.clone();
    tokio::spawn(async move {
        if stop_rx.await.is_ok() {
            stopper.shutdown();
        }
    });

    monitor.run().await;

    let counts = metrics.probe_counts();
    info!(
        "Completed {} probes ({} succeeded, {} failed)",
        counts.total(),
        counts.succeeded,
        counts.failed
    );
    debug!("Final metrics:\n{}", metrics_registry.gather()?);

    Ok(())
}

// Graceful shutdown handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
