use super::{MediaStore, StorageResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// Process-local store, handy for tests and throwaway previews.
#[derive(Default)]
pub struct MemoryStore {
    list: Mutex<Option<Vec<u8>>>,
    files: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the list document with raw bytes, valid JSON or not.
    pub fn with_list(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            list: Mutex::new(Some(bytes.into())),
            files: Mutex::new(HashMap::new()),
        }
    }

    pub fn raw_list(&self) -> Option<Vec<u8>> {
        self.list.lock().ok().and_then(|guard| guard.clone())
    }

    pub fn file(&self, name: &str) -> Option<Vec<u8>> {
        self.files
            .lock()
            .ok()
            .and_then(|files| files.get(name).cloned())
    }
}

fn poisoned() -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, "memory store lock poisoned")
}

#[async_trait]
impl MediaStore for MemoryStore {
    async fn read_list(&self) -> StorageResult<Option<Vec<u8>>> {
        let guard = self.list.lock().map_err(|_| poisoned())?;
        Ok(guard.clone())
    }

    async fn write_list(&self, bytes: Vec<u8>) -> StorageResult<()> {
        let mut guard = self.list.lock().map_err(|_| poisoned())?;
        *guard = Some(bytes);
        Ok(())
    }

    async fn put(
        &self,
        filename: &str,
        _content_type: &str,
        bytes: Vec<u8>,
    ) -> StorageResult<String> {
        let mut files = self.files.lock().map_err(|_| poisoned())?;
        files.insert(filename.to_string(), bytes);
        Ok(format!("memory://{}", filename))
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
