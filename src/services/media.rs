use crate::models::{MediaItem, MediaPatch, MediaType, NewMediaItem};
use crate::services::storage::{MediaStore, StorageError, StorageResult};
use chrono::{SecondsFormat, Utc};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Mutex;

/// CRUD and ordering over the single media list document.
///
/// Every mutation reads the whole list, edits it in memory and writes the
/// whole list back. Mutations inside one process are serialised; writers in
/// other processes still race with last-write-wins.
pub struct MediaRepository {
    store: Arc<dyn MediaStore>,
    write_lock: Mutex<()>,
}

impl MediaRepository {
    pub fn new(store: Arc<dyn MediaStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &Arc<dyn MediaStore> {
        &self.store
    }

    /// Items sorted by `order` (missing = 0), ties by ascending `createdAt`.
    /// Archived items are dropped unless `include_archived` is set.
    pub async fn list(&self, include_archived: bool) -> StorageResult<Vec<MediaItem>> {
        let mut items = self.load().await?;
        if !include_archived {
            items.retain(|item| !item.is_archived());
        }
        sort_items(&mut items);
        Ok(items)
    }

    pub async fn get(&self, id: &str) -> StorageResult<Option<MediaItem>> {
        let items = self.load().await?;
        Ok(items.into_iter().find(|item| item.id == id))
    }

    /// Appends a new item at the end of the display order. `media_type` is
    /// the type returned by [`NewMediaItem::validate`]; any type carried in
    /// `new` is ignored.
    pub async fn create(
        &self,
        media_type: MediaType,
        new: NewMediaItem,
    ) -> StorageResult<MediaItem> {
        let _guard = self.write_lock.lock().await;
        let mut items = self.load().await?;

        let taken: HashSet<&str> = items.iter().map(|item| item.id.as_str()).collect();
        let now = Utc::now();
        let id = unique_id(now.timestamp_millis(), &taken);

        let url = new
            .url
            .filter(|u| !u.trim().is_empty())
            .or_else(|| new.embed_url.clone())
            .unwrap_or_default();

        let item = MediaItem {
            id,
            media_type,
            url,
            thumbnail: new.thumbnail,
            title: new.title,
            description: new.description,
            embed_url: new.embed_url,
            created_at: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            order: Some(items.len() as i64),
            archived: Some(false),
            category: new.category,
            tags: new.tags,
            featured: new.featured,
            visible: Some(new.visible.unwrap_or(true)),
            custom_url: new.custom_url,
            alt_text: new.alt_text,
            metadata: new.metadata,
        };

        items.push(item.clone());
        self.save(&items).await?;

        tracing::info!("Created {} item {}", item.media_type, item.id);
        Ok(item)
    }

    /// Merges `patch` onto the item with `id`. Returns `None` when no such
    /// item exists; nothing is written in that case.
    pub async fn update(&self, id: &str, patch: MediaPatch) -> StorageResult<Option<MediaItem>> {
        let _guard = self.write_lock.lock().await;
        let mut items = self.load().await?;

        let Some(item) = items.iter_mut().find(|item| item.id == id) else {
            return Ok(None);
        };
        patch.apply(item);
        let updated = item.clone();

        self.save(&items).await?;
        tracing::info!("Updated item {}", id);
        Ok(Some(updated))
    }

    /// Removes the item with `id`. Deleting an unknown id is not an error.
    pub async fn delete(&self, id: &str) -> StorageResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut items = self.load().await?;

        let before = items.len();
        items.retain(|item| item.id != id);
        if items.len() == before {
            tracing::debug!("Delete of unknown item {} ignored", id);
        }

        self.save(&items).await?;
        tracing::info!("Deleted item {}", id);
        Ok(())
    }

    /// Sets `order = position` for each listed id. Unlisted items keep their
    /// old order and may collide with the reassigned values.
    pub async fn reorder(&self, ordered_ids: &[String]) -> StorageResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut items = self.load().await?;

        for (position, id) in ordered_ids.iter().enumerate() {
            if let Some(item) = items.iter_mut().find(|item| &item.id == id) {
                item.order = Some(position as i64);
            }
        }

        self.save(&items).await?;
        tracing::info!("Reordered {} item(s)", ordered_ids.len());
        Ok(())
    }

    async fn load(&self) -> StorageResult<Vec<MediaItem>> {
        match self.store.read_list().await? {
            None => Ok(Vec::new()),
            Some(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(Vec::new()),
            Some(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| StorageError::Malformed(e.to_string())),
        }
    }

    async fn save(&self, items: &[MediaItem]) -> StorageResult<()> {
        let bytes = serde_json::to_vec_pretty(items)?;
        self.store.write_list(bytes).await
    }
}

pub fn sort_items(items: &mut [MediaItem]) {
    items.sort_by(|a, b| {
        a.order_key()
            .cmp(&b.order_key())
            .then_with(|| a.created_at_millis().cmp(&b.created_at_millis()))
    });
}

fn unique_id(millis: i64, taken: &HashSet<&str>) -> String {
    let mut candidate = millis;
    loop {
        let id = candidate.to_string();
        if !taken.contains(id.as_str()) {
            return id;
        }
        candidate += 1;
    }
}
