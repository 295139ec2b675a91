//! News Trending - location-aware trending news service
//!
//! Serves trending articles per location with spatially clustered caching,
//! fed by a background event simulator.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use news_trending::api::{create_router, AppState};
use news_trending::{spawn_housekeeping_task, Config, MemoryStore, TrendingService};

/// Main entry point for the trending news server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load and validate configuration from environment variables
/// 3. Build the article/event store, optionally seeded from a JSON file
/// 4. Create the trending service and optionally seed an event burst
/// 5. Start cache housekeeping and the event simulator
/// 6. Start HTTP server on configured port
/// 7. On SIGINT/SIGTERM, cancel background tasks and wait for them
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "news_trending=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting News Trending Server");

    let config = Config::from_env();
    config.validate().context("invalid configuration")?;
    info!(
        "Configuration loaded: cache_ttl={}s, cluster_degrees={}, window={}h, port={}",
        config.cache_ttl, config.cluster_degrees, config.window_hours, config.server_port
    );

    let store = Arc::new(MemoryStore::new());
    if let Some(path) = &config.articles_path {
        store
            .load_articles(path)
            .await
            .with_context(|| format!("failed to load articles from {}", path))?;
    }
    info!("Article store ready with {} articles", store.article_count().await);

    let service = Arc::new(TrendingService::new(&config, store.clone(), store.clone())?);
    if config.seed_events > 0 {
        service.seed_events(config.seed_events).await;
    }

    let cancel = CancellationToken::new();
    let housekeeping = spawn_housekeeping_task(service.cache(), cancel.clone());
    if config.simulation_enabled {
        service.start_event_simulation(cancel.clone()).await;
    }

    let app = create_router(AppState::new(service.clone()));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cancel.clone()))
        .await
        .context("server error")?;

    cancel.cancel();
    service.join_event_simulation().await;
    if let Err(e) = housekeeping.await {
        tracing::error!("Cache housekeeping task failed: {}", e);
    }

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM), then cancels background tasks.
async fn shutdown_signal(cancel: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
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
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    cancel.cancel();
}
