use axum::{extract::Request, ServiceExt};
use notes_ratings_api::api::{self, fallback::FallbackChain, AppState};
use notes_ratings_api::config::AppConfig;
use notes_ratings_api::storage::NoteStore;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .init();

    info!("🚀 Starting Notes Ratings API Server");

    // Load configuration
    let config = AppConfig::load()?;
    info!("📋 Configuration loaded");
    info!("   - Server: {}", config.bind_addr());
    info!("   - Unmatched requests: {:?}", config.routing.unmatched);

    // Load dataset
    let store = match &config.storage.data_path {
        Some(path) => NoteStore::load(path)?,
        None => NoteStore::seed()?,
    };
    info!(
        "✅ Data store ready ({} notes, {} ratings)",
        store.notes().len(),
        store.ratings().len()
    );

    let state = AppState {
        store: Arc::new(store),
        fallback: Arc::new(FallbackChain::for_policy(config.routing.unmatched)),
    };

    let app = api::create_app(state);

    // Start server
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("🌐 Server listening on http://{}", addr);
    info!("");
    info!("📡 Available endpoints:");
    info!("   GET  /health                               - Health check");
    info!("   GET  /notes                                - List notes");
    info!("   GET  /notes/{{noteId}}                       - Get a note");
    info!("   GET  /notes/{{noteId}}/ratings               - Ratings for a note");
    info!("   GET  /notes/{{noteId}}/ratings/{{ratingId}}    - One rating for a note");
    info!("   GET  /ratings                              - All ratings");
    info!("   GET  /ratings/{{ratingId}}                   - Get a rating");
    info!("");
    info!("✨ Server is ready to accept requests!");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Server shutting down gracefully");

    Ok(())
}

/// Graceful shutdown handler
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
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

    info!("🛑 Shutdown signal received");
}
