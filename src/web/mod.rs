mod error;
mod extractors;
mod handlers;
mod routes;
pub mod security;
mod state;

pub use error::{AppError, AppResult};
pub use state::AppState;

use crate::services::storage::{self, MediaStore};
use crate::Config;
use anyhow::Result;
use axum::middleware;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

/// Builds the full application router over an already chosen store.
pub fn app(config: Config, store: Arc<dyn MediaStore>) -> Result<Router> {
    let upload_prefix = config.storage.upload_url_prefix.clone();
    let max_upload = config.media.max_upload_bytes;
    let state = Arc::new(AppState::new(config, store)?);

    let router = Router::new()
        .merge(routes::public_routes(&upload_prefix))
        .merge(routes::admin_routes())
        .merge(routes::api_routes(max_upload))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(middleware::from_fn(security::apply_security_headers)),
        )
        .with_state(state);

    Ok(router)
}

pub async fn serve(config: Config, addr: &str) -> Result<()> {
    let store = storage::from_config(&config)?;
    let backend = store.name();
    let app = app(config, store)?;

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Serving portfolio on http://{} ({} storage)", addr, backend);
    axum::serve(listener, app).await?;

    Ok(())
}
