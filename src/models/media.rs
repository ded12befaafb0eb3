use crate::services::embed::{self, EmbedProvider};
use chrono::DateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::str::FromStr;

pub const UNCATEGORIZED: &str = "Uncategorized";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Video,
    Photo,
    Embed,
}

impl MediaType {
    /// Videos and third-party embeds both play in the highlights rows.
    pub fn is_playable(self) -> bool {
        matches!(self, Self::Video | Self::Embed)
    }
}

impl FromStr for MediaType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "video" => Ok(Self::Video),
            "photo" => Ok(Self::Photo),
            "embed" => Ok(Self::Embed),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Video => write!(f, "video"),
            Self::Photo => write!(f, "photo"),
            Self::Embed => write!(f, "embed"),
        }
    }
}

/// One gallery entry as persisted in the media list document.
///
/// Optional fields are omitted from the JSON when unset so the stored
/// document stays byte-compatible with lists written by earlier versions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    pub id: String,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embed_url: Option<String>,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

impl MediaItem {
    pub fn order_key(&self) -> i64 {
        self.order.unwrap_or(0)
    }

    pub fn is_archived(&self) -> bool {
        self.archived.unwrap_or(false)
    }

    pub fn is_visible(&self) -> bool {
        self.visible.unwrap_or(true)
    }

    pub fn is_featured(&self) -> bool {
        self.featured.unwrap_or(false)
    }

    /// Creation time in epoch milliseconds. Unparsable timestamps sort as the
    /// oldest possible value.
    pub fn created_at_millis(&self) -> i64 {
        DateTime::parse_from_rfc3339(&self.created_at)
            .map(|dt| dt.timestamp_millis())
            .unwrap_or(i64::MIN)
    }

    pub fn category_label(&self) -> &str {
        match self.category.as_deref() {
            Some(c) if !c.trim().is_empty() => c,
            _ => UNCATEGORIZED,
        }
    }

    /// The URL a player should load: the embed URL for embeds, the stored
    /// file URL otherwise.
    pub fn playback_url(&self) -> &str {
        match (self.media_type, self.embed_url.as_deref()) {
            (MediaType::Embed, Some(embed)) if !embed.is_empty() => embed,
            _ => &self.url,
        }
    }
}

/// Body of a create request. Everything except the type and location is
/// optional; server-owned fields (id, createdAt, order, archived) are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMediaItem {
    #[serde(rename = "type")]
    pub media_type: Option<MediaType>,
    pub url: Option<String>,
    pub embed_url: Option<String>,
    pub thumbnail: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub featured: Option<bool>,
    pub visible: Option<bool>,
    pub custom_url: Option<String>,
    pub alt_text: Option<String>,
    pub metadata: Option<Map<String, Value>>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl NewMediaItem {
    /// Checks the request carries a type and somewhere to load the media
    /// from. Embeds need a YouTube or Vimeo embed URL; files need a stored
    /// URL.
    pub fn validate(&self) -> Result<MediaType, String> {
        let media_type = self
            .media_type
            .ok_or_else(|| "Missing required field: type".to_string())?;

        let url = non_empty(&self.url);
        let embed_url = non_empty(&self.embed_url);

        if url.is_none() && embed_url.is_none() {
            return Err("Either url or embedUrl is required".to_string());
        }

        match media_type {
            MediaType::Embed => {
                let embed = embed_url
                    .ok_or_else(|| "embedUrl is required for embed items".to_string())?;
                if !embed::is_http_url(embed) {
                    return Err(format!("embedUrl is not a valid http(s) URL: {}", embed));
                }
                if embed::provider(embed) == EmbedProvider::Other {
                    return Err(format!(
                        "embedUrl must be a YouTube or Vimeo link: {}",
                        embed
                    ));
                }
            }
            MediaType::Video | MediaType::Photo => {
                if url.is_none() {
                    return Err(format!("url is required for {} items", media_type));
                }
            }
        }

        Ok(media_type)
    }
}

/// Partial update. `None` means "leave as is"; id, type and createdAt are not
/// patchable and are dropped if a client sends them.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaPatch {
    pub url: Option<String>,
    pub embed_url: Option<String>,
    pub thumbnail: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub featured: Option<bool>,
    pub visible: Option<bool>,
    pub custom_url: Option<String>,
    pub alt_text: Option<String>,
    pub order: Option<i64>,
    pub archived: Option<bool>,
    pub metadata: Option<Map<String, Value>>,
}

macro_rules! merge_fields {
    ($patch:expr, $item:ident, [$($field:ident),* $(,)?]) => {
        $(
            if let Some(value) = $patch.$field {
                $item.$field = Some(value);
            }
        )*
    };
}

impl MediaPatch {
    pub fn archive() -> Self {
        Self {
            archived: Some(true),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.url.is_none()
            && self.embed_url.is_none()
            && self.thumbnail.is_none()
            && self.title.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.tags.is_none()
            && self.featured.is_none()
            && self.visible.is_none()
            && self.custom_url.is_none()
            && self.alt_text.is_none()
            && self.order.is_none()
            && self.archived.is_none()
            && self.metadata.is_none()
    }

    /// Shallow merge onto an existing record.
    pub fn apply(self, item: &mut MediaItem) {
        if let Some(url) = self.url {
            item.url = url;
        }
        merge_fields!(
            self,
            item,
            [
                embed_url,
                thumbnail,
                title,
                description,
                category,
                tags,
                featured,
                visible,
                custom_url,
                alt_text,
                order,
                archived,
                metadata,
            ]
        );
    }
}
