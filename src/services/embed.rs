use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use url::Url;

static YOUTUBE_HOST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(^|\.)(youtube\.com|youtu\.be|youtube-nocookie\.com)$")
        .expect("Invalid YouTube host regex pattern")
});
static VIMEO_HOST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(^|\.)vimeo\.com$").expect("Invalid Vimeo host regex pattern"));
static YOUTUBE_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]{6,}$").expect("Invalid YouTube id regex pattern"));
static VIMEO_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+$").expect("Invalid Vimeo id regex pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbedProvider {
    YouTube,
    Vimeo,
    Other,
}

pub fn is_http_url(raw: &str) -> bool {
    Url::parse(raw.trim())
        .map(|u| matches!(u.scheme(), "http" | "https") && u.host_str().is_some())
        .unwrap_or(false)
}

pub fn provider(raw: &str) -> EmbedProvider {
    let Ok(url) = Url::parse(raw.trim()) else {
        return EmbedProvider::Other;
    };
    let host = url.host_str().unwrap_or("");
    if YOUTUBE_HOST.is_match(host) {
        EmbedProvider::YouTube
    } else if VIMEO_HOST.is_match(host) {
        EmbedProvider::Vimeo
    } else {
        EmbedProvider::Other
    }
}

/// Turns a watch/share link into the provider's iframe player URL. Links
/// that are already player URLs, or that belong to unknown providers, are
/// returned unchanged.
pub fn player_url(raw: &str) -> String {
    let trimmed = raw.trim();
    let Ok(url) = Url::parse(trimmed) else {
        return trimmed.to_string();
    };

    match provider(trimmed) {
        EmbedProvider::YouTube => youtube_id(&url)
            .map(|id| format!("https://www.youtube-nocookie.com/embed/{}", id))
            .unwrap_or_else(|| trimmed.to_string()),
        EmbedProvider::Vimeo => vimeo_id(&url)
            .map(|id| format!("https://player.vimeo.com/video/{}", id))
            .unwrap_or_else(|| trimmed.to_string()),
        EmbedProvider::Other => trimmed.to_string(),
    }
}

fn youtube_id(url: &Url) -> Option<String> {
    let host = url.host_str().unwrap_or("").to_lowercase();
    let segments: Vec<&str> = url
        .path_segments()
        .map(|s| s.filter(|p| !p.is_empty()).collect())
        .unwrap_or_default();

    let candidate = if host.ends_with("youtu.be") {
        segments.first().map(|s| s.to_string())
    } else if let Some((_, v)) = url.query_pairs().find(|(k, _)| k == "v") {
        Some(v.into_owned())
    } else {
        match segments.as_slice() {
            ["embed", id, ..] | ["shorts", id, ..] | ["live", id, ..] => Some(id.to_string()),
            _ => None,
        }
    };

    candidate.filter(|id| YOUTUBE_ID.is_match(id))
}

fn vimeo_id(url: &Url) -> Option<String> {
    url.path_segments()?
        .filter(|s| !s.is_empty())
        .find(|s| VIMEO_ID.is_match(s))
        .map(str::to_string)
}
