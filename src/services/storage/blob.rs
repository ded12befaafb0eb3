use super::{MediaStore, StorageError, StorageResult};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;

const USER_AGENT: &str = "dance-portfolio/1.0";

/// Client for a hosted blob service: `PUT <api>/<pathname>` stores an object
/// and answers with its public URL, `GET <api>?prefix=` lists objects.
pub struct BlobStore {
    client: reqwest::Client,
    api_url: String,
    token: String,
    list_pathname: String,
}

#[derive(Deserialize)]
struct PutResponse {
    url: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListResponse {
    #[serde(default)]
    blobs: Vec<BlobEntry>,
    #[serde(default)]
    cursor: Option<String>,
    #[serde(default)]
    has_more: bool,
}

#[derive(Deserialize)]
struct BlobEntry {
    pathname: String,
    url: String,
}

impl BlobStore {
    pub fn new(api_url: &str, token: &str, list_pathname: &str) -> StorageResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            list_pathname: list_pathname.trim_start_matches('/').to_string(),
        })
    }

    /// Walks every listing page for the list document's exact pathname.
    /// Absence is only reported once the listing is exhausted.
    async fn find_list_url(&self) -> StorageResult<Option<String>> {
        let mut cursor: Option<String> = None;

        loop {
            let mut request = self
                .client
                .get(&self.api_url)
                .bearer_auth(&self.token)
                .query(&[("prefix", self.list_pathname.as_str()), ("limit", "100")]);
            if let Some(cursor) = cursor.as_deref() {
                request = request.query(&[("cursor", cursor)]);
            }

            let listing: ListResponse = check_status(request.send().await?).await?.json().await?;
            if let Some(entry) = listing
                .blobs
                .into_iter()
                .find(|b| b.pathname == self.list_pathname)
            {
                return Ok(Some(entry.url));
            }

            match listing.cursor {
                Some(next) if listing.has_more => cursor = Some(next),
                _ => return Ok(None),
            }
        }
    }

    async fn upload(
        &self,
        pathname: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> StorageResult<String> {
        let response = self
            .client
            .put(format!("{}/{}", self.api_url, pathname))
            .bearer_auth(&self.token)
            .header("x-content-type", content_type)
            .header("x-add-random-suffix", "0")
            .body(bytes)
            .send()
            .await?;

        let response = check_status(response).await?;
        let body: PutResponse = response.json().await?;
        Ok(body.url)
    }
}

async fn check_status(response: reqwest::Response) -> StorageResult<reqwest::Response> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    Err(StorageError::Remote { status, body })
}

#[async_trait]
impl MediaStore for BlobStore {
    async fn read_list(&self) -> StorageResult<Option<Vec<u8>>> {
        let Some(url) = self.find_list_url().await? else {
            return Ok(None);
        };

        let response = self.client.get(&url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let bytes = check_status(response).await?.bytes().await?;
        Ok(Some(bytes.to_vec()))
    }

    async fn write_list(&self, bytes: Vec<u8>) -> StorageResult<()> {
        self.upload(&self.list_pathname, "application/json", bytes)
            .await?;
        Ok(())
    }

    async fn put(
        &self,
        filename: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> StorageResult<String> {
        self.upload(filename, content_type, bytes).await
    }

    fn name(&self) -> &'static str {
        "blob"
    }
}
