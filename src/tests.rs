#[cfg(test)]
mod tests {
    use crate::models::{MediaItem, MediaPatch, MediaType, NewMediaItem};

    fn item(id: &str, order: Option<i64>, created_at: &str) -> MediaItem {
        MediaItem {
            id: id.to_string(),
            media_type: MediaType::Photo,
            url: format!("{}.jpg", id),
            thumbnail: None,
            title: None,
            description: None,
            embed_url: None,
            created_at: created_at.to_string(),
            order,
            archived: None,
            category: None,
            tags: None,
            featured: None,
            visible: None,
            custom_url: None,
            alt_text: None,
            metadata: None,
        }
    }

    fn new_photo(url: &str) -> NewMediaItem {
        NewMediaItem {
            media_type: Some(MediaType::Photo),
            url: Some(url.to_string()),
            ..NewMediaItem::default()
        }
    }

    mod model_tests {
        use super::*;

        #[test]
        fn test_media_type_parse_and_display() {
            assert_eq!("VIDEO".parse::<MediaType>(), Ok(MediaType::Video));
            assert_eq!("embed".parse::<MediaType>(), Ok(MediaType::Embed));
            assert!("audio".parse::<MediaType>().is_err());
            assert_eq!(MediaType::Photo.to_string(), "photo");
        }

        #[test]
        fn test_defaults_for_missing_optional_fields() {
            let it = item("1", None, "2024-01-01T00:00:00.000Z");
            assert_eq!(it.order_key(), 0);
            assert!(!it.is_archived());
            assert!(it.is_visible());
            assert!(!it.is_featured());
            assert_eq!(it.category_label(), "Uncategorized");
        }

        #[test]
        fn test_blank_category_is_uncategorized() {
            let mut it = item("1", None, "2024-01-01T00:00:00.000Z");
            it.category = Some("   ".to_string());
            assert_eq!(it.category_label(), "Uncategorized");
            it.category = Some("Solos".to_string());
            assert_eq!(it.category_label(), "Solos");
        }

        #[test]
        fn test_unparsable_created_at_is_oldest() {
            let bad = item("1", None, "not a date");
            let good = item("2", None, "1970-01-01T00:00:00.000Z");
            assert!(bad.created_at_millis() < good.created_at_millis());
        }

        #[test]
        fn test_serializes_camel_case_and_skips_unset() {
            let mut it = item("42", Some(3), "2024-01-01T00:00:00.000Z");
            it.embed_url = Some("https://youtu.be/abcdefghijk".to_string());
            let json = serde_json::to_value(&it).unwrap();

            assert_eq!(json["type"], "photo");
            assert_eq!(json["createdAt"], "2024-01-01T00:00:00.000Z");
            assert_eq!(json["embedUrl"], "https://youtu.be/abcdefghijk");
            assert_eq!(json["order"], 3);
            assert!(json.get("title").is_none());
            assert!(json.get("archived").is_none());
        }

        #[test]
        fn test_deserializes_original_document_shape() {
            let raw = r#"{
                "id": "1700000000000",
                "type": "embed",
                "url": "https://vimeo.com/123",
                "embedUrl": "https://vimeo.com/123",
                "createdAt": "2023-11-14T22:13:20.000Z",
                "tags": ["salsa", "duet"],
                "metadata": {"venue": {"name": "Hall"}, "rating": 5}
            }"#;
            let it: MediaItem = serde_json::from_str(raw).unwrap();
            assert_eq!(it.media_type, MediaType::Embed);
            assert_eq!(it.tags.as_deref(), Some(&["salsa".to_string(), "duet".to_string()][..]));
            let metadata = it.metadata.unwrap();
            assert_eq!(metadata["venue"]["name"], "Hall");
            assert_eq!(metadata["rating"], 5);
        }

        #[test]
        fn test_playback_url_prefers_embed_for_embeds() {
            let mut it = item("1", None, "2024-01-01T00:00:00.000Z");
            it.embed_url = Some("https://youtu.be/x".to_string());
            assert_eq!(it.playback_url(), "1.jpg");
            it.media_type = MediaType::Embed;
            assert_eq!(it.playback_url(), "https://youtu.be/x");
        }

        #[test]
        fn test_validate_requires_type() {
            let req = NewMediaItem {
                url: Some("a.jpg".to_string()),
                ..NewMediaItem::default()
            };
            assert!(req.validate().unwrap_err().contains("type"));
        }

        #[test]
        fn test_validate_requires_a_location() {
            let req = NewMediaItem {
                media_type: Some(MediaType::Video),
                url: Some("  ".to_string()),
                ..NewMediaItem::default()
            };
            assert!(req.validate().is_err());
        }

        #[test]
        fn test_validate_embed_needs_http_embed_url() {
            let mut req = NewMediaItem {
                media_type: Some(MediaType::Embed),
                url: Some("https://youtu.be/abcdefghijk".to_string()),
                ..NewMediaItem::default()
            };
            assert!(req.validate().is_err());

            req.embed_url = Some("javascript:alert(1)".to_string());
            assert!(req.validate().is_err());

            req.embed_url = Some("https://youtu.be/abcdefghijk".to_string());
            assert_eq!(req.validate(), Ok(MediaType::Embed));
        }

        #[test]
        fn test_validate_embed_rejects_unframeable_providers() {
            let mut req = NewMediaItem {
                media_type: Some(MediaType::Embed),
                embed_url: Some("https://example.com/player/42".to_string()),
                ..NewMediaItem::default()
            };
            assert!(req.validate().unwrap_err().contains("YouTube or Vimeo"));

            req.embed_url = Some("https://vimeo.com/76979871".to_string());
            assert_eq!(req.validate(), Ok(MediaType::Embed));
        }

        #[test]
        fn test_validate_photo_with_url() {
            assert_eq!(new_photo("a.jpg").validate(), Ok(MediaType::Photo));
        }

        #[test]
        fn test_empty_patch_changes_nothing() {
            let original = item("1", Some(2), "2024-01-01T00:00:00.000Z");
            let mut patched = original.clone();
            let patch = MediaPatch::default();
            assert!(patch.is_empty());
            patch.apply(&mut patched);
            assert_eq!(patched, original);
        }

        #[test]
        fn test_patch_merges_only_present_fields() {
            let mut it = item("1", Some(2), "2024-01-01T00:00:00.000Z");
            it.title = Some("Old".to_string());
            it.description = Some("Keep me".to_string());

            let patch = MediaPatch {
                title: Some("New".to_string()),
                tags: Some(vec!["hiphop".to_string()]),
                featured: Some(true),
                ..MediaPatch::default()
            };
            patch.apply(&mut it);

            assert_eq!(it.title.as_deref(), Some("New"));
            assert_eq!(it.description.as_deref(), Some("Keep me"));
            assert_eq!(it.tags, Some(vec!["hiphop".to_string()]));
            assert!(it.is_featured());
            assert_eq!(it.order, Some(2));
            assert_eq!(it.id, "1");
        }

        #[test]
        fn test_patch_ignores_immutable_fields_from_json() {
            let patch: MediaPatch = serde_json::from_str(
                r#"{"id": "x", "type": "video", "createdAt": "2000-01-01T00:00:00Z"}"#,
            )
            .unwrap();
            assert!(patch.is_empty());
        }

        #[test]
        fn test_archive_patch() {
            let mut it = item("1", None, "2024-01-01T00:00:00.000Z");
            MediaPatch::archive().apply(&mut it);
            assert!(it.is_archived());
        }
    }

    mod repository_tests {
        use super::*;
        use crate::services::media::{sort_items, MediaRepository};
        use crate::services::storage::{MemoryStore, StorageError};
        use std::sync::Arc;

        fn repo() -> (MediaRepository, Arc<MemoryStore>) {
            let store = Arc::new(MemoryStore::new());
            (MediaRepository::new(store.clone()), store)
        }

        fn ids(items: &[MediaItem]) -> Vec<String> {
            items.iter().map(|i| i.id.clone()).collect()
        }

        #[tokio::test]
        async fn test_list_of_never_written_store_is_empty() {
            let (repo, store) = repo();
            assert!(repo.list(false).await.unwrap().is_empty());
            assert!(repo.list(true).await.unwrap().is_empty());
            assert!(store.raw_list().is_none());
        }

        #[tokio::test]
        async fn test_blank_document_is_empty() {
            let repo = MediaRepository::new(Arc::new(MemoryStore::with_list("  \n")));
            assert!(repo.list(true).await.unwrap().is_empty());
        }

        #[tokio::test]
        async fn test_malformed_document_is_a_storage_error() {
            let store = Arc::new(MemoryStore::with_list("{not json"));
            let repo = MediaRepository::new(store.clone());

            let err = repo.list(false).await.unwrap_err();
            assert!(matches!(err, StorageError::Malformed(_)));

            // Mutations must not overwrite what could not be read.
            assert!(repo.create(MediaType::Photo, new_photo("a.jpg")).await.is_err());
            assert_eq!(store.raw_list().unwrap(), b"{not json".to_vec());
        }

        #[tokio::test]
        async fn test_create_assigns_server_fields() {
            let (repo, _) = repo();
            let first = repo.create(MediaType::Photo, new_photo("a.jpg")).await.unwrap();
            let second = repo.create(MediaType::Photo, new_photo("b.jpg")).await.unwrap();

            assert_ne!(first.id, second.id);
            assert_eq!(first.order, Some(0));
            assert_eq!(second.order, Some(1));
            assert_eq!(first.archived, Some(false));
            assert_eq!(first.visible, Some(true));
            assert!(chrono::DateTime::parse_from_rfc3339(&first.created_at).is_ok());
            assert!(first.id.parse::<i64>().is_ok());
        }

        #[tokio::test]
        async fn test_create_stores_the_validated_type() {
            let (repo, _) = repo();
            let request = NewMediaItem {
                url: Some("clip.mp4".to_string()),
                ..NewMediaItem::default()
            };
            assert!(request.validate().is_err());

            let created = repo.create(MediaType::Video, request).await.unwrap();
            assert_eq!(created.media_type, MediaType::Video);
        }

        #[tokio::test]
        async fn test_create_keeps_explicit_visibility() {
            let (repo, _) = repo();
            let mut req = new_photo("a.jpg");
            req.visible = Some(false);
            let created = repo.create(MediaType::Photo, req).await.unwrap();
            assert_eq!(created.visible, Some(false));
        }

        #[tokio::test]
        async fn test_create_embed_falls_back_to_embed_url() {
            let (repo, _) = repo();
            let created = repo
                .create(MediaType::Embed, NewMediaItem {
                    media_type: Some(MediaType::Embed),
                    embed_url: Some("https://vimeo.com/76979871".to_string()),
                    ..NewMediaItem::default()
                })
                .await
                .unwrap();
            assert_eq!(created.url, "https://vimeo.com/76979871");
        }

        #[tokio::test]
        async fn test_create_adds_exactly_one_unique_item() {
            let (repo, _) = repo();
            for n in 0..5 {
                repo.create(MediaType::Photo, new_photo(&format!("{}.jpg", n))).await.unwrap();
            }
            let before = repo.list(true).await.unwrap();
            let created = repo.create(MediaType::Photo, new_photo("new.jpg")).await.unwrap();
            let after = repo.list(true).await.unwrap();

            assert_eq!(after.len(), before.len() + 1);
            assert!(!before.iter().any(|i| i.id == created.id));
            let mut all_ids = ids(&after);
            all_ids.sort();
            all_ids.dedup();
            assert_eq!(all_ids.len(), after.len());
        }

        #[tokio::test]
        async fn test_list_sorted_by_order_then_created_at() {
            let mut items = vec![
                item("c", Some(1), "2024-01-03T00:00:00.000Z"),
                item("b", None, "2024-01-02T00:00:00.000Z"),
                item("a", Some(0), "2024-01-01T00:00:00.000Z"),
                item("z", Some(1), "garbage"),
            ];
            let store = Arc::new(MemoryStore::with_list(serde_json::to_vec(&items).unwrap()));
            let repo = MediaRepository::new(store);

            let listed = repo.list(false).await.unwrap();
            assert_eq!(ids(&listed), vec!["a", "b", "z", "c"]);

            sort_items(&mut items);
            assert_eq!(ids(&items), ids(&listed));
        }

        #[tokio::test]
        async fn test_archive_hides_from_default_listing() {
            let (repo, _) = repo();
            let a = repo.create(MediaType::Photo, new_photo("a.jpg")).await.unwrap();
            let b = repo.create(MediaType::Photo, new_photo("b.jpg")).await.unwrap();

            repo.update(&a.id, MediaPatch::archive()).await.unwrap();

            assert_eq!(ids(&repo.list(false).await.unwrap()), vec![b.id.clone()]);
            assert!(ids(&repo.list(true).await.unwrap()).contains(&a.id));
        }

        #[tokio::test]
        async fn test_update_unknown_id_is_none_and_writes_nothing() {
            let (repo, store) = repo();
            repo.create(MediaType::Photo, new_photo("a.jpg")).await.unwrap();
            let before = store.raw_list();

            let result = repo
                .update("missing", MediaPatch::archive())
                .await
                .unwrap();
            assert!(result.is_none());
            assert_eq!(store.raw_list(), before);
        }

        #[tokio::test]
        async fn test_empty_update_round_trips() {
            let (repo, _) = repo();
            let created = repo.create(MediaType::Photo, new_photo("a.jpg")).await.unwrap();
            let updated = repo
                .update(&created.id, MediaPatch::default())
                .await
                .unwrap()
                .unwrap();
            assert_eq!(updated, created);
        }

        #[tokio::test]
        async fn test_delete_is_idempotent() {
            let (repo, _) = repo();
            let a = repo.create(MediaType::Photo, new_photo("a.jpg")).await.unwrap();
            let b = repo.create(MediaType::Photo, new_photo("b.jpg")).await.unwrap();

            repo.delete(&a.id).await.unwrap();
            let after_first = repo.list(true).await.unwrap();
            repo.delete(&a.id).await.unwrap();
            let after_second = repo.list(true).await.unwrap();

            assert_eq!(ids(&after_first), vec![b.id]);
            assert_eq!(after_first, after_second);
        }

        #[tokio::test]
        async fn test_reorder_sets_positions() {
            let (repo, _) = repo();
            let one = repo.create(MediaType::Photo, new_photo("1.jpg")).await.unwrap();
            let two = repo.create(MediaType::Photo, new_photo("2.jpg")).await.unwrap();
            let three = repo.create(MediaType::Photo, new_photo("3.jpg")).await.unwrap();

            repo.reorder(&[three.id.clone(), one.id.clone(), two.id.clone()])
                .await
                .unwrap();

            assert_eq!(
                ids(&repo.list(false).await.unwrap()),
                vec![three.id, one.id, two.id]
            );
        }

        #[tokio::test]
        async fn test_reorder_leaves_unlisted_items_alone() {
            let (repo, _) = repo();
            let a = repo.create(MediaType::Photo, new_photo("a.jpg")).await.unwrap();
            let b = repo.create(MediaType::Photo, new_photo("b.jpg")).await.unwrap();
            let c = repo.create(MediaType::Photo, new_photo("c.jpg")).await.unwrap();

            repo.reorder(&[c.id.clone(), "ghost".to_string()]).await.unwrap();

            let all = repo.list(true).await.unwrap();
            let order_of = |id: &str| all.iter().find(|i| i.id == id).unwrap().order;
            assert_eq!(order_of(&c.id), Some(0));
            assert_eq!(order_of(&a.id), Some(0));
            assert_eq!(order_of(&b.id), Some(1));
        }

        #[tokio::test]
        async fn test_archive_then_reorder_scenario() {
            let (repo, _) = repo();
            let a = repo.create(MediaType::Photo, new_photo("a.jpg")).await.unwrap();
            let b = repo
                .create(MediaType::Video, NewMediaItem {
                    media_type: Some(MediaType::Video),
                    url: Some("b.mp4".to_string()),
                    category: Some("Solos".to_string()),
                    ..NewMediaItem::default()
                })
                .await
                .unwrap();

            assert_eq!(ids(&repo.list(false).await.unwrap()), vec![a.id.clone(), b.id.clone()]);

            repo.update(&a.id, MediaPatch::archive()).await.unwrap();
            assert_eq!(ids(&repo.list(false).await.unwrap()), vec![b.id.clone()]);

            repo.reorder(&[b.id.clone(), a.id.clone()]).await.unwrap();
            assert_eq!(ids(&repo.list(false).await.unwrap()), vec![b.id.clone()]);
            assert_eq!(ids(&repo.list(true).await.unwrap()), vec![b.id, a.id]);
        }

        #[tokio::test]
        async fn test_concurrent_creates_are_not_lost() {
            let (repo, _) = repo();
            let repo = Arc::new(repo);

            let mut handles = Vec::new();
            for n in 0..20 {
                let repo = repo.clone();
                handles.push(tokio::spawn(async move {
                    repo.create(MediaType::Photo, new_photo(&format!("{}.jpg", n))).await.unwrap()
                }));
            }
            for handle in handles {
                handle.await.unwrap();
            }

            assert_eq!(repo.list(true).await.unwrap().len(), 20);
        }

        #[tokio::test]
        async fn test_get_by_id() {
            let (repo, _) = repo();
            let a = repo.create(MediaType::Photo, new_photo("a.jpg")).await.unwrap();
            assert_eq!(repo.get(&a.id).await.unwrap(), Some(a));
            assert_eq!(repo.get("nope").await.unwrap(), None);
        }
    }

    mod embed_tests {
        use crate::services::embed::{is_http_url, player_url, provider, EmbedProvider};

        #[test]
        fn test_provider_detection() {
            assert_eq!(provider("https://www.youtube.com/watch?v=dQw4w9WgXcQ"), EmbedProvider::YouTube);
            assert_eq!(provider("https://youtu.be/dQw4w9WgXcQ"), EmbedProvider::YouTube);
            assert_eq!(provider("https://vimeo.com/76979871"), EmbedProvider::Vimeo);
            assert_eq!(provider("https://example.com/video"), EmbedProvider::Other);
            assert_eq!(provider("https://notyoutube.com/watch?v=x"), EmbedProvider::Other);
            assert_eq!(provider("not a url"), EmbedProvider::Other);
        }

        #[test]
        fn test_youtube_player_urls() {
            let expected = "https://www.youtube-nocookie.com/embed/dQw4w9WgXcQ";
            assert_eq!(player_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=30"), expected);
            assert_eq!(player_url("https://youtu.be/dQw4w9WgXcQ"), expected);
            assert_eq!(player_url("https://www.youtube.com/shorts/dQw4w9WgXcQ"), expected);
            assert_eq!(player_url("https://www.youtube.com/embed/dQw4w9WgXcQ"), expected);
        }

        #[test]
        fn test_vimeo_player_url() {
            assert_eq!(
                player_url("https://vimeo.com/channels/staffpicks/76979871"),
                "https://player.vimeo.com/video/76979871"
            );
        }

        #[test]
        fn test_unknown_links_pass_through() {
            assert_eq!(player_url(" https://example.com/v.mp4 "), "https://example.com/v.mp4");
            assert_eq!(player_url("https://www.youtube.com/"), "https://www.youtube.com/");
        }

        #[test]
        fn test_is_http_url() {
            assert!(is_http_url("https://vimeo.com/1"));
            assert!(is_http_url("http://localhost:3000/x"));
            assert!(!is_http_url("ftp://example.com/x"));
            assert!(!is_http_url("javascript:alert(1)"));
            assert!(!is_http_url("/relative/path"));
        }
    }

    mod gallery_tests {
        use super::*;
        use crate::services::gallery::{highlight_rows, matches_query, photos, publicly_visible, MediaFilter};

        fn with(id: &str, media_type: MediaType, category: Option<&str>) -> MediaItem {
            let mut it = item(id, None, "2024-01-01T00:00:00.000Z");
            it.media_type = media_type;
            it.category = category.map(str::to_string);
            it
        }

        #[test]
        fn test_query_matches_tags_title_and_description() {
            let mut it = item("1", None, "2024-01-01T00:00:00.000Z");
            it.title = Some("Winter Showcase".to_string());
            it.description = Some("Contemporary solo".to_string());
            it.tags = Some(vec!["Krump".to_string()]);

            assert!(matches_query(&it, "krump"));
            assert!(matches_query(&it, "SHOWCASE"));
            assert!(matches_query(&it, "solo"));
            assert!(!matches_query(&it, "ballet"));
        }

        #[test]
        fn test_filter_combines_conditions() {
            let items = vec![
                with("1", MediaType::Video, Some("Solos")),
                with("2", MediaType::Photo, Some("Solos")),
                with("3", MediaType::Video, None),
            ];

            let filter = MediaFilter {
                media_type: Some(MediaType::Video),
                category: Some("solos".to_string()),
                q: None,
            };
            let kept: Vec<_> = filter.apply(items.clone()).into_iter().map(|i| i.id).collect();
            assert_eq!(kept, vec!["1"]);

            let uncategorized = MediaFilter {
                category: Some("Uncategorized".to_string()),
                ..MediaFilter::default()
            };
            let kept: Vec<_> = uncategorized.apply(items.clone()).into_iter().map(|i| i.id).collect();
            assert_eq!(kept, vec!["3"]);

            assert!(MediaFilter::default().is_empty());
            assert_eq!(MediaFilter::default().apply(items.clone()).len(), items.len());
        }

        #[test]
        fn test_highlight_rows_sorted_with_uncategorized_last() {
            let items = vec![
                with("1", MediaType::Video, None),
                with("2", MediaType::Embed, Some("Solos")),
                with("3", MediaType::Photo, Some("Battles")),
                with("4", MediaType::Video, Some("battles")),
                with("5", MediaType::Video, Some("Choreography")),
                with("6", MediaType::Embed, Some("Solos")),
            ];

            let rows = highlight_rows(&items);
            let names: Vec<_> = rows.iter().map(|r| r.name.as_str()).collect();
            assert_eq!(names, vec!["battles", "Choreography", "Solos", "Uncategorized"]);

            let solos: Vec<_> = rows[2].items.iter().map(|i| i.id.as_str()).collect();
            assert_eq!(solos, vec!["2", "6"]);
        }

        #[test]
        fn test_highlight_rows_empty_without_videos() {
            let items = vec![with("1", MediaType::Photo, Some("Solos"))];
            assert!(highlight_rows(&items).is_empty());
        }

        #[test]
        fn test_photos_and_visibility() {
            let mut hidden = with("1", MediaType::Photo, None);
            hidden.visible = Some(false);
            let mut archived = with("2", MediaType::Photo, None);
            archived.archived = Some(true);
            let shown = with("3", MediaType::Photo, None);
            let video = with("4", MediaType::Video, None);

            let visible = publicly_visible(vec![hidden, archived, shown, video]);
            let ids: Vec<_> = visible.iter().map(|i| i.id.as_str()).collect();
            assert_eq!(ids, vec!["3", "4"]);

            let only_photos: Vec<_> = photos(&visible).into_iter().map(|i| i.id).collect();
            assert_eq!(only_photos, vec!["3"]);
        }
    }

    mod upload_tests {
        use crate::models::MediaType;
        use crate::services::storage::{FsStore, MemoryStore};
        use crate::services::upload::{
            detect_mime, media_type_for_mime, storage_filename, store_upload, UploadError,
        };

        const PNG_HEADER: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];

        #[test]
        fn test_storage_filename_is_sanitised() {
            assert_eq!(storage_filename("My Solo (final).MP4", 1700), "1700-my-solo-final.mp4");
            assert_eq!(storage_filename("../../etc/passwd", 5), "5-passwd");
            assert_eq!(storage_filename("???.jpg", 9), "9-upload.jpg");
        }

        #[test]
        fn test_detect_mime_prefers_sniffed_bytes() {
            assert_eq!(detect_mime("photo.mp4", Some("video/mp4"), PNG_HEADER), "image/png");
            assert_eq!(detect_mime("clip.webm", None, b"plain"), "video/webm");
            assert_eq!(detect_mime("clip", Some("video/mp4"), b"plain"), "video/mp4");
        }

        #[test]
        fn test_media_type_for_mime() {
            assert_eq!(media_type_for_mime("video/mp4"), Some(MediaType::Video));
            assert_eq!(media_type_for_mime("image/webp"), Some(MediaType::Photo));
            assert_eq!(media_type_for_mime("application/pdf"), None);
        }

        #[tokio::test]
        async fn test_store_upload_in_memory() {
            let store = MemoryStore::new();
            let stored = store_upload(&store, "Stage.png", None, PNG_HEADER.to_vec(), 1024)
                .await
                .unwrap();

            assert_eq!(stored.media_type, MediaType::Photo);
            assert_eq!(stored.content_type, "image/png");
            assert!(stored.filename.ends_with("-stage.png"));
            assert_eq!(stored.url, format!("memory://{}", stored.filename));
            assert_eq!(store.file(&stored.filename).unwrap(), PNG_HEADER.to_vec());
        }

        #[tokio::test]
        async fn test_store_upload_rejections() {
            let store = MemoryStore::new();

            let empty = store_upload(&store, "a.png", None, Vec::new(), 1024).await;
            assert!(matches!(empty, Err(UploadError::MissingFile)));

            let big = store_upload(&store, "a.png", None, PNG_HEADER.to_vec(), 4).await;
            assert!(matches!(big, Err(UploadError::TooLarge { .. })));

            let pdf = store_upload(&store, "a.pdf", Some("application/pdf"), b"%PDF-1.4".to_vec(), 1024).await;
            assert!(matches!(pdf, Err(UploadError::UnsupportedType(_))));
        }

        #[tokio::test]
        async fn test_store_upload_without_upload_dir() {
            let store = FsStore::new(std::env::temp_dir().join("unused-media.json"), None, "/uploads");
            let result = store_upload(&store, "a.png", None, PNG_HEADER.to_vec(), 1024).await;
            assert!(matches!(result, Err(UploadError::Storage(_))));
        }
    }

    mod auth_tests {
        use crate::config::AuthConfig;
        use crate::services::auth::{check_password, is_authenticated, login_cookie, logout_cookie};
        use axum_extra::extract::cookie::{Cookie, CookieJar};

        fn config() -> AuthConfig {
            AuthConfig {
                admin_password: Some("letmedance".to_string()),
                ..AuthConfig::default()
            }
        }

        #[test]
        fn test_cookie_gate() {
            let auth = config();
            let good = CookieJar::new().add(Cookie::new("admin-auth", "authenticated"));
            let wrong = CookieJar::new().add(Cookie::new("admin-auth", "yes"));
            let other_name = CookieJar::new().add(Cookie::new("session", "authenticated"));

            assert!(is_authenticated(&good, &auth));
            assert!(!is_authenticated(&wrong, &auth));
            assert!(!is_authenticated(&other_name, &auth));
            assert!(!is_authenticated(&CookieJar::new(), &auth));
        }

        #[test]
        fn test_password_check() {
            assert!(check_password(&config(), "letmedance"));
            assert!(!check_password(&config(), "letmedanc"));
            assert!(!check_password(&config(), ""));
            assert!(!check_password(&AuthConfig::default(), ""));
            assert!(!check_password(&AuthConfig::default(), "anything"));
        }

        #[test]
        fn test_login_and_logout_cookies() {
            let auth = config();
            let login = login_cookie(&auth, true);
            assert_eq!(login.name(), "admin-auth");
            assert_eq!(login.value(), "authenticated");
            assert_eq!(login.http_only(), Some(true));
            assert_eq!(login.secure(), Some(true));
            assert_eq!(login.path(), Some("/"));

            let logout = logout_cookie(&auth);
            assert_eq!(logout.value(), "");
            assert_eq!(logout.max_age(), Some(time::Duration::ZERO));
        }
    }

    mod config_tests {
        use crate::config::{Config, StorageConfig};

        #[test]
        fn test_empty_file_uses_defaults() {
            let config: Config = toml::from_str("").unwrap();
            assert_eq!(config.server.port, 3000);
            assert_eq!(config.auth.cookie_name, "admin-auth");
            assert_eq!(config.auth.cookie_value, "authenticated");
            assert_eq!(
                config.storage.list_file_path(),
                std::path::Path::new("data").join("media.json")
            );
            assert!(config.validate().is_ok());
        }

        #[test]
        fn test_partial_sections() {
            let config: Config = toml::from_str(
                r#"
                [site]
                title = "Studio Reel"

                [storage]
                data_dir = "/srv/portfolio"
                "#,
            )
            .unwrap();
            assert_eq!(config.site.title, "Studio Reel");
            assert_eq!(config.storage.list_file, "media.json");
            assert_eq!(config.storage.upload_url_prefix, "/uploads");
        }

        #[test]
        fn test_blob_token_placeholder_is_ignored() {
            let mut storage = StorageConfig::default();
            assert_eq!(storage.blob_token(), None);
            storage.blob_token = Some("your_vercel_blob_token_here".to_string());
            assert_eq!(storage.blob_token(), None);
            storage.blob_token = Some("  ".to_string());
            assert_eq!(storage.blob_token(), None);
            storage.blob_token = Some("vercel_blob_rw_abc".to_string());
            assert_eq!(storage.blob_token().as_deref(), Some("vercel_blob_rw_abc"));
        }

        #[test]
        fn test_validate_caps_cookie_lifetime() {
            let mut config = Config::default();
            config.auth.cookie_max_age_days = 3650;
            assert!(config.validate().is_ok());
            config.auth.cookie_max_age_days = 3651;
            assert!(config.validate().is_err());
            config.auth.cookie_max_age_days = i64::MAX;
            assert!(config.validate().is_err());
        }

        #[test]
        fn test_validate_rejects_empty_cookie() {
            let mut config = Config::default();
            config.auth.cookie_value = String::new();
            assert!(config.validate().is_err());
        }
    }

    mod security_tests {
        use crate::web::security::security_headers;
        use axum::http::Response;

        #[test]
        fn test_frame_src_allows_supported_players_only() {
            let response = security_headers(Response::new(()));
            let csp = response
                .headers()
                .get("content-security-policy")
                .and_then(|v| v.to_str().ok())
                .unwrap();
            assert!(csp.contains("https://www.youtube-nocookie.com"));
            assert!(csp.contains("https://player.vimeo.com"));
            assert_eq!(response.headers().get("x-frame-options").unwrap(), "DENY");
        }
    }
}
