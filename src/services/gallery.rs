use crate::models::{MediaItem, MediaType, UNCATEGORIZED};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Optional narrowing applied on top of an already sorted listing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaFilter {
    #[serde(rename = "type")]
    pub media_type: Option<MediaType>,
    pub category: Option<String>,
    pub q: Option<String>,
}

impl MediaFilter {
    pub fn is_empty(&self) -> bool {
        self.media_type.is_none()
            && self.category.as_deref().map_or(true, |c| c.trim().is_empty())
            && self.q.as_deref().map_or(true, |q| q.trim().is_empty())
    }

    pub fn matches(&self, item: &MediaItem) -> bool {
        if let Some(media_type) = self.media_type {
            if item.media_type != media_type {
                return false;
            }
        }
        if let Some(category) = self.category.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
            if !item.category_label().eq_ignore_ascii_case(category) {
                return false;
            }
        }
        match self.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            Some(query) => matches_query(item, query),
            None => true,
        }
    }

    pub fn apply(&self, items: Vec<MediaItem>) -> Vec<MediaItem> {
        if self.is_empty() {
            return items;
        }
        items.into_iter().filter(|item| self.matches(item)).collect()
    }
}

/// Case-insensitive substring match against title, description and tags.
pub fn matches_query(item: &MediaItem, query: &str) -> bool {
    let needle = query.to_lowercase();
    let hit = |text: &str| text.to_lowercase().contains(&needle);

    item.title.as_deref().is_some_and(hit)
        || item.description.as_deref().is_some_and(hit)
        || item
            .tags
            .as_ref()
            .is_some_and(|tags| tags.iter().any(|tag| hit(tag)))
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryRow {
    pub name: String,
    pub items: Vec<MediaItem>,
}

/// Groups videos and embeds by category for the highlights page. Rows are
/// sorted by name with "Uncategorized" last; items keep their incoming order.
pub fn highlight_rows(items: &[MediaItem]) -> Vec<CategoryRow> {
    let mut grouped: BTreeMap<String, Vec<MediaItem>> = BTreeMap::new();
    for item in items
        .iter()
        .filter(|item| item.media_type.is_playable() && !item.is_archived())
    {
        grouped
            .entry(item.category_label().to_string())
            .or_default()
            .push(item.clone());
    }

    let uncategorized = grouped.remove(UNCATEGORIZED);
    let mut rows: Vec<CategoryRow> = grouped
        .into_iter()
        .map(|(name, items)| CategoryRow { name, items })
        .collect();
    rows.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name))
    });
    if let Some(items) = uncategorized {
        rows.push(CategoryRow {
            name: UNCATEGORIZED.to_string(),
            items,
        });
    }
    rows
}

pub fn photos(items: &[MediaItem]) -> Vec<MediaItem> {
    items
        .iter()
        .filter(|item| item.media_type == MediaType::Photo && !item.is_archived())
        .cloned()
        .collect()
}

pub fn publicly_visible(items: Vec<MediaItem>) -> Vec<MediaItem> {
    items
        .into_iter()
        .filter(|item| item.is_visible() && !item.is_archived())
        .collect()
}
