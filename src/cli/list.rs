use crate::services::media::MediaRepository;
use crate::services::storage;
use crate::Config;
use anyhow::Result;
use std::path::Path;

pub async fn run(config_path: &Path, include_archived: bool, as_json: bool) -> Result<()> {
    let config = Config::load(config_path)?;
    let repo = MediaRepository::new(storage::from_config(&config)?);
    let items = repo.list(include_archived).await?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    if items.is_empty() {
        println!("No media items.");
        return Ok(());
    }

    println!(
        "{:<15} {:<6} {:>5} {:<20} {}",
        "ID", "TYPE", "ORDER", "CATEGORY", "TITLE"
    );
    for item in &items {
        let title = item.title.as_deref().unwrap_or("(untitled)");
        let marker = if item.is_archived() { " [archived]" } else { "" };
        println!(
            "{:<15} {:<6} {:>5} {:<20} {}{}",
            item.id,
            item.media_type.to_string(),
            item.order_key(),
            item.category_label(),
            title,
            marker
        );
    }

    Ok(())
}
