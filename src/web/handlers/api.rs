use crate::models::{MediaPatch, MediaType, NewMediaItem};
use crate::services::gallery::MediaFilter;
use crate::services::upload;
use crate::web::error::{AppError, AppResult};
use crate::web::extractors::{AdminAuth, IsAdmin};
use crate::web::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, Query, State};
use axum::response::{IntoResponse, Json, Response};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    #[serde(rename = "type")]
    pub media_type: Option<MediaType>,
    pub category: Option<String>,
    pub q: Option<String>,
    pub include_archived: Option<String>,
}

impl ListParams {
    fn wants_archived(&self) -> bool {
        matches!(self.include_archived.as_deref(), Some("true") | Some("1"))
    }

    fn filter(&self) -> MediaFilter {
        MediaFilter {
            media_type: self.media_type,
            category: self.category.clone(),
            q: self.q.clone(),
        }
    }
}

/// GET /api/media
pub async fn list_media(
    State(state): State<Arc<AppState>>,
    IsAdmin(is_admin): IsAdmin,
    Query(params): Query<ListParams>,
) -> AppResult<Response> {
    // Archived items are an admin-only view.
    let include_archived = is_admin && params.wants_archived();
    let items = state.media.list(include_archived).await?;
    let items = params.filter().apply(items);
    Ok(Json(items).into_response())
}

/// POST /api/media
pub async fn create_media(
    State(state): State<Arc<AppState>>,
    _auth: AdminAuth,
    payload: Result<Json<NewMediaItem>, JsonRejection>,
) -> AppResult<Response> {
    let Json(new_item) = payload?;
    let media_type = new_item.validate().map_err(AppError::Validation)?;

    let item = state.media.create(media_type, new_item).await?;
    Ok(Json(item).into_response())
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchRequest {
    pub action: Option<String>,
    pub ordered_ids: Option<Vec<String>>,
    pub id: Option<String>,
    #[serde(flatten)]
    pub patch: MediaPatch,
}

/// PATCH /api/media
///
/// Either a reorder directive (`{"action": "reorder", "orderedIds": [...]}`),
/// answered with the refreshed public listing, or a partial update of the
/// item named by `id`.
pub async fn patch_media(
    State(state): State<Arc<AppState>>,
    _auth: AdminAuth,
    payload: Result<Json<PatchRequest>, JsonRejection>,
) -> AppResult<Response> {
    let Json(request) = payload?;

    match request.action.as_deref() {
        Some("reorder") => {
            let ordered_ids = request.ordered_ids.ok_or_else(|| {
                AppError::Validation("orderedIds is required for reorder".to_string())
            })?;
            state.media.reorder(&ordered_ids).await?;
            let items = state.media.list(false).await?;
            return Ok(Json(items).into_response());
        }
        Some(other) => {
            return Err(AppError::Validation(format!("Unknown action: {}", other)));
        }
        None => {}
    }

    let id = request
        .id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| AppError::Validation("Missing required field: id".to_string()))?;

    match state.media.update(&id, request.patch).await? {
        Some(item) => Ok(Json(item).into_response()),
        None => Err(AppError::NotFound(format!("Media item not found: {}", id))),
    }
}

#[derive(Deserialize)]
pub struct DeleteParams {
    pub id: Option<String>,
}

/// DELETE /api/media?id=...
pub async fn delete_media(
    State(state): State<Arc<AppState>>,
    _auth: AdminAuth,
    Query(params): Query<DeleteParams>,
) -> AppResult<Response> {
    let id = params
        .id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| AppError::Validation("Missing required query parameter: id".to_string()))?;

    state.media.delete(&id).await?;
    Ok(Json(json!({ "success": true })).into_response())
}

/// POST /api/upload (multipart, field `file`)
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    _auth: AdminAuth,
    mut multipart: Multipart,
) -> AppResult<Response> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }

        let original_name = field.file_name().unwrap_or("upload").to_string();
        let declared_type = field.content_type().map(|s| s.to_string());
        let data = field.bytes().await?;

        let stored = upload::store_upload(
            state.media.store().as_ref(),
            &original_name,
            declared_type.as_deref(),
            data.to_vec(),
            state.config.media.max_upload_bytes,
        )
        .await?;

        return Ok(Json(stored).into_response());
    }

    Err(AppError::BadUpload("No file provided".to_string()))
}

/// GET /health
pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}
