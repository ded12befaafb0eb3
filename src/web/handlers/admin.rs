use crate::models::MediaItem;
use crate::web::error::AppResult;
use crate::web::extractors::IsAdmin;
use crate::web::state::AppState;
use axum::extract::State;
use axum::response::{Html, IntoResponse, Redirect, Response};
use std::collections::BTreeSet;
use std::sync::Arc;
use tera::Context;

/// GET /admin
///
/// The dashboard lists everything, archived items included, and drives the
/// JSON API from the browser.
pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    IsAdmin(is_admin): IsAdmin,
) -> AppResult<Response> {
    if !is_admin {
        return Ok(Redirect::to("/admin/login").into_response());
    }

    let items = state.media.list(true).await?;
    let (active, archived): (Vec<MediaItem>, Vec<MediaItem>) =
        items.into_iter().partition(|item| !item.is_archived());
    let categories: BTreeSet<&str> = active
        .iter()
        .chain(archived.iter())
        .filter_map(|item| item.category.as_deref())
        .filter(|c| !c.trim().is_empty())
        .collect();

    let mut ctx = Context::new();
    ctx.insert("site", &state.config.site);
    ctx.insert("items", &active);
    ctx.insert("archived", &archived);
    ctx.insert("categories", &categories);
    ctx.insert("storage_backend", state.media.store().name());
    ctx.insert("max_upload_bytes", &state.config.media.max_upload_bytes);

    let html = state.templates.render("admin/dashboard.html", &ctx)?;
    Ok(Html(html).into_response())
}
