use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const BLOB_TOKEN_ENV: &str = "BLOB_READ_WRITE_TOKEN";
pub const ADMIN_PASSWORD_ENV: &str = "ADMIN_PASSWORD";
const BLOB_TOKEN_PLACEHOLDER: &str = "your_vercel_blob_token_here";
const MAX_COOKIE_AGE_DAYS: i64 = 3650;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub media: MediaConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SiteConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_description")]
    pub description: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub instagram: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            description: default_description(),
            url: String::new(),
            instagram: None,
            contact_email: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Mark the auth cookie `Secure`; turn on when served over HTTPS.
    #[serde(default)]
    pub secure_cookies: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            secure_cookies: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_list_file")]
    pub list_file: String,
    /// Local upload directory; empty disables filesystem uploads.
    #[serde(default = "default_upload_dir")]
    pub upload_dir: String,
    #[serde(default = "default_upload_url_prefix")]
    pub upload_url_prefix: String,
    /// Selects the networked blob store when set (or when the
    /// `BLOB_READ_WRITE_TOKEN` environment variable is).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blob_token: Option<String>,
    #[serde(default)]
    pub blob: BlobConfig,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            list_file: default_list_file(),
            upload_dir: default_upload_dir(),
            upload_url_prefix: default_upload_url_prefix(),
            blob_token: None,
            blob: BlobConfig::default(),
        }
    }
}

impl StorageConfig {
    pub fn list_file_path(&self) -> PathBuf {
        Path::new(&self.data_dir).join(&self.list_file)
    }

    /// The configured blob token, ignoring blanks and the sample placeholder.
    pub fn blob_token(&self) -> Option<String> {
        self.blob_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty() && *t != BLOB_TOKEN_PLACEHOLDER)
            .map(str::to_string)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BlobConfig {
    #[serde(default = "default_blob_api_url")]
    pub api_url: String,
    #[serde(default = "default_list_pathname")]
    pub list_pathname: String,
}

impl Default for BlobConfig {
    fn default() -> Self {
        Self {
            api_url: default_blob_api_url(),
            list_pathname: default_list_pathname(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    #[serde(default = "default_cookie_value")]
    pub cookie_value: String,
    #[serde(default = "default_cookie_max_age_days")]
    pub cookie_max_age_days: i64,
    /// Password accepted by the login endpoint. Prefer the
    /// `ADMIN_PASSWORD` environment variable over writing it here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_password: Option<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            cookie_value: default_cookie_value(),
            cookie_max_age_days: default_cookie_max_age_days(),
            admin_password: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MediaConfig {
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

fn default_title() -> String {
    "Dance Portfolio".to_string()
}

fn default_description() -> String {
    "Performances, highlights and behind-the-scenes moments".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_list_file() -> String {
    "media.json".to_string()
}

fn default_upload_dir() -> String {
    "data/uploads".to_string()
}

fn default_upload_url_prefix() -> String {
    "/uploads".to_string()
}

fn default_blob_api_url() -> String {
    "https://blob.vercel-storage.com".to_string()
}

fn default_list_pathname() -> String {
    "data/media.json".to_string()
}

fn default_cookie_name() -> String {
    "admin-auth".to_string()
}

fn default_cookie_value() -> String {
    "authenticated".to_string()
}

fn default_cookie_max_age_days() -> i64 {
    7
}

fn default_max_upload_bytes() -> usize {
    100 * 1024 * 1024
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            anyhow::anyhow!(
                "Could not read config file '{}': {}. Run `portfolio init` to create one.",
                path.display(),
                e
            )
        })?;
        let mut config: Config = toml::from_str(&content)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Environment variables win over the file for secrets.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(token) = std::env::var(BLOB_TOKEN_ENV) {
            if !token.trim().is_empty() {
                self.storage.blob_token = Some(token);
            }
        }
        if let Ok(password) = std::env::var(ADMIN_PASSWORD_ENV) {
            if !password.is_empty() {
                self.auth.admin_password = Some(password);
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.auth.cookie_name.trim().is_empty() {
            anyhow::bail!("auth.cookie_name must not be empty");
        }
        if self.auth.cookie_value.trim().is_empty() {
            anyhow::bail!("auth.cookie_value must not be empty");
        }
        if self.auth.cookie_max_age_days <= 0 || self.auth.cookie_max_age_days > MAX_COOKIE_AGE_DAYS {
            anyhow::bail!(
                "auth.cookie_max_age_days must be between 1 and {}",
                MAX_COOKIE_AGE_DAYS
            );
        }
        if self.storage.list_file.trim().is_empty() {
            anyhow::bail!("storage.list_file must not be empty");
        }
        if self.media.max_upload_bytes == 0 {
            anyhow::bail!("media.max_upload_bytes must be greater than 0");
        }
        Ok(())
    }
}
