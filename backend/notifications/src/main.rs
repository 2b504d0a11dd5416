mod config;
mod delivery;
mod domain;
mod repository;
mod telemetry;
mod usecase;

use std::sync::Arc;

use chrono::Utc;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing_subscriber::EnvFilter;

use crate::repository::memory::NotificationStore;
use crate::usecase::notifications::NotificationsUseCase;

pub struct AppState {
    pub notifications_usecase: NotificationsUseCase<NotificationStore>,
    pub metrics_handle: PrometheusHandle,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = config::AppConfig::from_env()?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let tracer_provider = if config.telemetry_enabled {
        let telemetry_config = telemetry::TelemetryConfig::from(&config);
        Some(telemetry::init_telemetry_with_subscriber(&telemetry_config, env_filter)?)
    } else {
        telemetry::init_subscriber_without_telemetry(env_filter)?;
        None
    };

    tracing::info!("starting the notifications service");

    let metrics_handle = PrometheusBuilder::new().install_recorder()?;
    metrics_process::Collector::default().describe();
    tracing::info!("prometheus metrics initialized");

    tracing::info!(
        telemetry_enabled = config.telemetry_enabled,
        seed_demo_inbox = config.seed_demo_inbox,
        "config loaded"
    );

    let store = if config.seed_demo_inbox {
        NotificationStore::seeded(usecase::seed::demo_inbox(Utc::now()))?
    } else {
        NotificationStore::new()
    };
    if store.is_empty() {
        tracing::info!("starting with an empty inbox");
    } else {
        tracing::info!(count = store.len(), "inbox seeded");
    }

    let shared_state = Arc::new(AppState {
        notifications_usecase: NotificationsUseCase::new(store),
        metrics_handle,
    });

    let router = delivery::http::router(shared_state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    tracing::info!(listen_addr = %config.listen_addr, "notifications service running");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(provider) = tracer_provider {
        telemetry::shutdown_telemetry(provider);
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
