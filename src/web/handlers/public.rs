use crate::models::MediaItem;
use crate::services::gallery;
use crate::web::error::AppResult;
use crate::web::extractors::IsAdmin;
use crate::web::state::AppState;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use std::sync::Arc;
use tera::Context;

fn make_context(state: &AppState, is_admin: bool, page: &str) -> Context {
    let mut ctx = Context::new();
    ctx.insert("site", &state.config.site);
    ctx.insert("is_admin", &is_admin);
    ctx.insert("page", page);
    ctx
}

/// Public pages never show a storage error; they log it and render an empty
/// gallery instead.
async fn visible_items(state: &AppState) -> Vec<MediaItem> {
    match state.media.list(false).await {
        Ok(items) => gallery::publicly_visible(items),
        Err(e) => {
            tracing::warn!("Rendering empty gallery after storage failure: {}", e);
            Vec::new()
        }
    }
}

pub async fn index(
    State(state): State<Arc<AppState>>,
    IsAdmin(is_admin): IsAdmin,
) -> AppResult<Html<String>> {
    let items = visible_items(&state).await;
    let featured: Vec<&MediaItem> = items.iter().filter(|item| item.is_featured()).collect();

    let mut ctx = make_context(&state, is_admin, "home");
    ctx.insert("featured", &featured);
    ctx.insert("items", &items);

    let html = state.templates.render("public/index.html", &ctx)?;
    Ok(Html(html))
}

pub async fn highlights(
    State(state): State<Arc<AppState>>,
    IsAdmin(is_admin): IsAdmin,
) -> AppResult<Html<String>> {
    let items = visible_items(&state).await;
    let rows = gallery::highlight_rows(&items);

    let mut ctx = make_context(&state, is_admin, "highlights");
    ctx.insert("rows", &rows);

    let html = state.templates.render("public/highlights.html", &ctx)?;
    Ok(Html(html))
}

pub async fn pictures(
    State(state): State<Arc<AppState>>,
    IsAdmin(is_admin): IsAdmin,
) -> AppResult<Html<String>> {
    let items = visible_items(&state).await;
    let photos = gallery::photos(&items);

    let mut ctx = make_context(&state, is_admin, "pictures");
    ctx.insert("items", &photos);

    let html = state.templates.render("public/pictures.html", &ctx)?;
    Ok(Html(html))
}

/// Serves files written by the filesystem store.
pub async fn serve_upload(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> AppResult<Response> {
    if filename.contains("..") || filename.contains('/') || filename.contains('\\') {
        return Ok(StatusCode::NOT_FOUND.into_response());
    }
    let Some(upload_dir) = state.upload_dir.as_ref() else {
        return Ok(StatusCode::NOT_FOUND.into_response());
    };

    let file_path = upload_dir.join(&filename);
    let content = match tokio::fs::read(&file_path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(StatusCode::NOT_FOUND.into_response())
        }
        Err(e) => return Err(anyhow::Error::from(e).into()),
    };
    let mime = mime_guess::from_path(&filename).first_or_octet_stream();

    Ok((
        [
            (header::CONTENT_TYPE, mime.to_string()),
            (header::CACHE_CONTROL, "public, max-age=31536000, immutable".to_string()),
        ],
        content,
    )
        .into_response())
}
