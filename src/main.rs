//! Proxy server: reads settings from the environment, registers the configured resources, serves HTTP.

use resource_proxy::{
    build_app, load_from_path, resolve, AppState, MemoryStore, PgStore, RecordStore, ServerSettings, StoreKind,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("resource_proxy=info,tower_http=info")),
        )
        .init();

    let settings = ServerSettings::from_env()?;
    let config = load_from_path(&settings.config_path).await?;
    let model = resolve(&config)?;

    let store: Arc<dyn RecordStore> = match settings.store {
        StoreKind::Postgres => {
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(5)
                .connect(&settings.database_url)
                .await?;
            Arc::new(PgStore::new(pool, settings.schema.clone()))
        }
        StoreKind::Memory => {
            tracing::warn!("using in-memory store; data is lost on exit");
            Arc::new(MemoryStore::new())
        }
    };

    let state = AppState::new(store, model);
    let app = build_app(state, settings.body_limit);

    let listener = TcpListener::bind(&settings.bind).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
