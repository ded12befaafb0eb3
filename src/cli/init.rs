use anyhow::Result;
use std::path::PathBuf;

pub async fn run(path: PathBuf, name: Option<String>) -> Result<()> {
    let site_name = name.unwrap_or_else(|| "Dance Portfolio".to_string());
    let config_path = path.join("portfolio.toml");

    if config_path.exists() {
        anyhow::bail!(
            "{} already exists; refusing to overwrite it",
            config_path.display()
        );
    }

    std::fs::create_dir_all(&path)?;
    std::fs::create_dir_all(path.join("data"))?;
    std::fs::create_dir_all(path.join("data/uploads"))?;

    let config = format!(
        r#"[site]
title = "{}"
description = "Performances, highlights and behind-the-scenes moments"
url = "http://localhost:3000"

[server]
host = "127.0.0.1"
port = 3000
secure_cookies = false

[storage]
data_dir = "./data"
list_file = "media.json"
upload_dir = "./data/uploads"
upload_url_prefix = "/uploads"
# Setting a token (or BLOB_READ_WRITE_TOKEN) switches to blob storage.
# blob_token = ""

[auth]
cookie_name = "admin-auth"
cookie_value = "authenticated"
cookie_max_age_days = 7
# Prefer the ADMIN_PASSWORD environment variable.
# admin_password = ""

[media]
max_upload_bytes = 104857600
"#,
        site_name.replace('"', "\\\"")
    );

    std::fs::write(&config_path, config)?;

    tracing::info!("Created new portfolio at {:?}", path);
    tracing::info!("Set ADMIN_PASSWORD and run 'portfolio serve' to start the server");

    Ok(())
}
