use super::handlers;
use super::state::AppState;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;

pub fn public_routes(upload_url_prefix: &str) -> Router<Arc<AppState>> {
    let uploads = format!("{}/:filename", upload_url_prefix.trim_end_matches('/'));

    Router::new()
        .route("/", get(handlers::public::index))
        .route("/highlights", get(handlers::public::highlights))
        .route("/pictures", get(handlers::public::pictures))
        .route(&uploads, get(handlers::public::serve_upload))
        .route("/health", get(handlers::api::health))
}

pub fn admin_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/admin", get(handlers::admin::dashboard))
        .route(
            "/admin/login",
            get(handlers::auth::login_form).post(handlers::auth::login),
        )
        .route("/admin/logout", post(handlers::auth::logout))
}

pub fn api_routes(max_upload_bytes: usize) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/media",
            get(handlers::api::list_media)
                .post(handlers::api::create_media)
                .patch(handlers::api::patch_media)
                .delete(handlers::api::delete_media),
        )
        .route(
            "/api/upload",
            // Leave headroom for multipart framing around the file itself.
            post(handlers::api::upload_file)
                .layer(DefaultBodyLimit::max(max_upload_bytes.saturating_add(64 * 1024))),
        )
        .route("/api/auth/login", post(handlers::auth::api_login))
        .route("/api/auth/check", get(handlers::auth::check))
        .route("/api/auth/logout", post(handlers::auth::api_logout))
}
