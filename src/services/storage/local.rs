use super::{MediaStore, StorageError, StorageResult};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Keeps the media list as a pretty-printed JSON file and uploads in a plain
/// directory served under `url_prefix`.
pub struct FsStore {
    list_path: PathBuf,
    upload_dir: Option<PathBuf>,
    url_prefix: String,
}

impl FsStore {
    pub fn new(list_path: PathBuf, upload_dir: Option<PathBuf>, url_prefix: &str) -> Self {
        Self {
            list_path,
            upload_dir,
            url_prefix: url_prefix.trim_end_matches('/').to_string(),
        }
    }

    pub fn list_path(&self) -> &Path {
        &self.list_path
    }

    pub fn upload_dir(&self) -> Option<&Path> {
        self.upload_dir.as_deref()
    }
}

#[async_trait]
impl MediaStore for FsStore {
    async fn read_list(&self) -> StorageResult<Option<Vec<u8>>> {
        match fs::read(&self.list_path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_list(&self, bytes: Vec<u8>) -> StorageResult<()> {
        if let Some(parent) = self.list_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        // Write beside the target and rename so readers never see a torn file.
        let tmp_path = self.list_path.with_extension("json.tmp");
        fs::write(&tmp_path, &bytes).await?;
        fs::rename(&tmp_path, &self.list_path).await?;
        Ok(())
    }

    async fn put(
        &self,
        filename: &str,
        _content_type: &str,
        bytes: Vec<u8>,
    ) -> StorageResult<String> {
        let upload_dir = self.upload_dir.as_ref().ok_or_else(|| {
            StorageError::NotConfigured(
                "File uploads are not configured. Set storage.upload_dir or a blob token, \
                 or use YouTube/Vimeo embeds instead."
                    .to_string(),
            )
        })?;

        fs::create_dir_all(upload_dir).await?;
        fs::write(upload_dir.join(filename), bytes).await?;

        Ok(format!("{}/{}", self.url_prefix, filename))
    }

    fn name(&self) -> &'static str {
        "filesystem"
    }
}
