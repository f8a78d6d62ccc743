use std::net::SocketAddr;
use std::sync::Arc;

use quill_server::store::{DocumentStore, MemoryDocumentStore, PgDocumentStore};
use quill_server::{create_router, db, AppState, Config};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quill_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let pool = match &config.database_url {
        Some(url) => {
            let pool = db::create_pool(url, config.database_max_connections).await?;
            db::migrate(&pool).await?;
            tracing::info!("Using PostgreSQL document store");
            Some(pool)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, documents are kept in memory only");
            None
        }
    };

    let store: Arc<dyn DocumentStore> = match &pool {
        Some(pool) => Arc::new(PgDocumentStore::new(pool.clone())),
        None => Arc::new(MemoryDocumentStore::new()),
    };

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let app = create_router(AppState::new(store, &config)?);

    tracing::info!("Server listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(pool) = pool {
        pool.close().await;
    }
    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
