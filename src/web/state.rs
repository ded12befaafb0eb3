use crate::services::embed;
use crate::services::media::MediaRepository;
use crate::services::storage::MediaStore;
use crate::Config;
use anyhow::Result;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tera::{Tera, Value};

pub struct AppState {
    pub config: Config,
    pub media: MediaRepository,
    pub templates: Tera,
    pub upload_dir: Option<PathBuf>,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn MediaStore>) -> Result<Self> {
        let mut templates = Tera::default();

        templates.register_filter("format_date", format_date_filter);
        templates.register_filter("player_url", player_url_filter);
        templates.add_raw_templates(vec![
            ("base.html", include_str!("../../templates/base.html")),
            ("macros.html", include_str!("../../templates/macros.html")),
            ("public/index.html", include_str!("../../templates/public/index.html")),
            ("public/highlights.html", include_str!("../../templates/public/highlights.html")),
            ("public/pictures.html", include_str!("../../templates/public/pictures.html")),
            ("admin/login.html", include_str!("../../templates/admin/login.html")),
            ("admin/dashboard.html", include_str!("../../templates/admin/dashboard.html")),
        ])?;

        let upload_dir = Some(config.storage.upload_dir.trim())
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            config,
            media: MediaRepository::new(store),
            templates,
            upload_dir,
        })
    }
}

fn format_date_filter(value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
    let date_str = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("format_date requires a string"))?;

    let format = args
        .get("format")
        .and_then(|v| v.as_str())
        .unwrap_or("%B %d, %Y");

    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(date_str) {
        return Ok(Value::String(dt.format(format).to_string()));
    }

    Ok(Value::String(date_str.to_string()))
}

fn player_url_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let url = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("player_url requires a string"))?;
    Ok(Value::String(embed::player_url(url)))
}
