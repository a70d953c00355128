//! app-registry entry point.
//!
//! Builds the registry, registers the optional seed file, logs every
//! registry event, and runs until interrupted.

use std::sync::Arc;

use anyhow::Context;
use tokio::sync::broadcast;
use tracing_subscriber::EnvFilter;

use app_registry::config::{LogFormat, RegistryConfig};
use app_registry::domain::{EventBus, InMemoryApplicationStore, RegistryEvent};
use app_registry::seed;
use app_registry::service::ApplicationRegistry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = RegistryConfig::from_env();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Plain => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
    tracing::info!(
        event_bus_capacity = config.event_bus_capacity,
        "starting app-registry"
    );

    // Build domain layer
    let store = Arc::new(InMemoryApplicationStore::new());
    let event_bus = EventBus::new(config.event_bus_capacity);
    let observer = tokio::spawn(log_events(event_bus.subscribe()));

    // Build service layer
    let registry = ApplicationRegistry::with_hashing_ids(store, Arc::new(event_bus));

    if let Some(path) = &config.seed_file {
        let entries = seed::load_entries(path)
            .with_context(|| format!("loading seed file {}", path.display()))?;
        let summary = seed::register_entries(&registry, entries).await;
        tracing::info!(
            seeded = summary.registered,
            rejected = summary.rejected,
            "seed file registered"
        );
    }

    tracing::info!(
        applications = registry.get_applications().await.len(),
        "registry ready"
    );

    tokio::signal::ctrl_c()
        .await
        .context("waiting for shutdown signal")?;
    tracing::info!("shutting down");

    drop(registry);
    if let Err(err) = observer.await {
        tracing::warn!(error = %err, "event observer task failed");
    }
    Ok(())
}

/// Logs every event until the bus is dropped.
async fn log_events(mut events: broadcast::Receiver<RegistryEvent>) {
    loop {
        match events.recv().await {
            Ok(event) => {
                let application = event.application();
                tracing::info!(
                    event_type = event.event_type_str(),
                    id = %application.id(),
                    name = application.name(),
                    "registry event"
                );
            }
            Err(broadcast::error::RecvError::Lagged(n)) => {
                tracing::warn!(lagged = n, "event observer lagged behind event bus");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}
