use crate::models::MediaType;
use crate::services::storage::{MediaStore, StorageError};
use chrono::Utc;
use serde::Serialize;
use std::path::Path;
use thiserror::Error;

const ALLOWED_MIME_TYPES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/webp",
    "image/avif",
    "video/mp4",
    "video/webm",
    "video/quicktime",
];

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("No file provided")]
    MissingFile,

    #[error("File too large: {size} bytes (max {max} bytes)")]
    TooLarge { size: usize, max: usize },

    #[error("File type not allowed: {0}")]
    UnsupportedType(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(Debug, Clone, Serialize)]
pub struct StoredUpload {
    pub url: String,
    pub filename: String,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    #[serde(rename = "contentType")]
    pub content_type: String,
}

/// Sniffs the bytes first and falls back to the declared type, then to the
/// file extension.
pub fn detect_mime(original_name: &str, declared: Option<&str>, data: &[u8]) -> String {
    if let Some(kind) = infer::get(data) {
        return kind.mime_type().to_string();
    }
    if let Some(declared) = declared.filter(|d| !d.is_empty() && *d != "application/octet-stream") {
        return declared.to_string();
    }
    mime_guess::from_path(original_name)
        .first_or_octet_stream()
        .to_string()
}

pub fn media_type_for_mime(mime: &str) -> Option<MediaType> {
    if mime.starts_with("video/") {
        Some(MediaType::Video)
    } else if mime.starts_with("image/") {
        Some(MediaType::Photo)
    } else {
        None
    }
}

/// `<unix-millis>-<slugified stem>.<ext>`; keeps names URL- and
/// filesystem-safe whatever the client sent.
pub fn storage_filename(original_name: &str, millis: i64) -> String {
    let path = Path::new(original_name);
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .map(slug::slugify)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "upload".to_string());
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .filter(|e| e.chars().all(|c| c.is_ascii_alphanumeric()));

    match extension {
        Some(ext) if !ext.is_empty() => format!("{}-{}.{}", millis, stem, ext),
        _ => format!("{}-{}", millis, stem),
    }
}

pub async fn store_upload(
    store: &dyn MediaStore,
    original_name: &str,
    declared_type: Option<&str>,
    data: Vec<u8>,
    max_bytes: usize,
) -> Result<StoredUpload, UploadError> {
    if data.is_empty() {
        return Err(UploadError::MissingFile);
    }
    if data.len() > max_bytes {
        return Err(UploadError::TooLarge {
            size: data.len(),
            max: max_bytes,
        });
    }

    let content_type = detect_mime(original_name, declared_type, &data);
    if !ALLOWED_MIME_TYPES.contains(&content_type.as_str()) {
        return Err(UploadError::UnsupportedType(content_type));
    }
    let media_type = media_type_for_mime(&content_type)
        .ok_or_else(|| UploadError::UnsupportedType(content_type.clone()))?;

    let filename = storage_filename(original_name, Utc::now().timestamp_millis());
    let url = store.put(&filename, &content_type, data).await?;

    tracing::info!(
        "Stored upload {} ({}) via {} storage",
        filename,
        content_type,
        store.name()
    );

    Ok(StoredUpload {
        url,
        filename,
        media_type,
        content_type,
    })
}
