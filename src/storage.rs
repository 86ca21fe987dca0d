//! Object storage client.
//!
//! Blobs are addressed by (bucket, key). Template sources live in the
//! `templates` bucket and rendered PDFs in the `pdfs` bucket; both buckets
//! are expected to exist before the server starts.

use async_trait::async_trait;
use log::debug;

pub const TEMPLATES_BUCKET: &str = "templates";
pub const PDFS_BUCKET: &str = "pdfs";

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub endpoint: String,
    pub access_key: String,
    pub secret_key: String,
}

impl StorageConfig {
    pub fn from_env() -> Result<Self, String> {
        let endpoint = std::env::var("OBJECT_STORE_ENDPOINT")
            .map_err(|_| "OBJECT_STORE_ENDPOINT must be set".to_string())?;
        let access_key = std::env::var("OBJECT_STORE_ACCESS_KEY")
            .map_err(|_| "OBJECT_STORE_ACCESS_KEY must be set".to_string())?;
        let secret_key = std::env::var("OBJECT_STORE_SECRET_KEY")
            .map_err(|_| "OBJECT_STORE_SECRET_KEY must be set".to_string())?;

        Ok(Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            access_key,
            secret_key,
        })
    }
}

#[async_trait]
pub trait ObjectStorage {
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        data: &[u8],
        content_type: &str,
    ) -> Result<(), String>;

    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, String>;

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<(), String>;
}

/// HTTP object store client. Speaks a plain path-style REST dialect
/// (`{endpoint}/{bucket}/{key}`) with basic-auth credentials, which is what
/// the gateway in front of the blob store accepts.
pub struct HttpObjectStore {
    config: StorageConfig,
    client: reqwest::Client,
}

impl HttpObjectStore {
    pub fn new(config: StorageConfig, client: reqwest::Client) -> Self {
        Self { config, client }
    }

    fn object_url(&self, bucket: &str, key: &str) -> String {
        format!("{}/{}/{}", self.config.endpoint, bucket, key)
    }
}

#[async_trait]
impl ObjectStorage for HttpObjectStore {
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        data: &[u8],
        content_type: &str,
    ) -> Result<(), String> {
        if bucket.is_empty() || key.is_empty() {
            return Err("bucket and key cannot be empty".to_string());
        }

        let url = self.object_url(bucket, key);
        debug!("Uploading {} bytes to {}", data.len(), url);

        let response = self
            .client
            .put(&url)
            .basic_auth(&self.config.access_key, Some(&self.config.secret_key))
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(data.to_vec())
            .send()
            .await
            .map_err(|e| format!("storage request failed: {}", e))?;

        if !response.status().is_success() {
            return Err(format!(
                "storage upload to {}/{} failed with status {}",
                bucket,
                key,
                response.status()
            ));
        }

        Ok(())
    }

    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, String> {
        if bucket.is_empty() || key.is_empty() {
            return Err("bucket and key cannot be empty".to_string());
        }

        let url = self.object_url(bucket, key);
        debug!("Downloading object from {}", url);

        let response = self
            .client
            .get(&url)
            .basic_auth(&self.config.access_key, Some(&self.config.secret_key))
            .send()
            .await
            .map_err(|e| format!("storage request failed: {}", e))?;

        if !response.status().is_success() {
            return Err(format!(
                "storage download of {}/{} failed with status {}",
                bucket,
                key,
                response.status()
            ));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| format!("failed to read storage response body: {}", e))?;

        Ok(bytes.to_vec())
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<(), String> {
        if bucket.is_empty() || key.is_empty() {
            return Err("bucket and key cannot be empty".to_string());
        }

        let url = self.object_url(bucket, key);
        debug!("Deleting object at {}", url);

        let response = self
            .client
            .delete(&url)
            .basic_auth(&self.config.access_key, Some(&self.config.secret_key))
            .send()
            .await
            .map_err(|e| format!("storage request failed: {}", e))?;

        if !response.status().is_success() {
            return Err(format!(
                "storage delete of {}/{} failed with status {}",
                bucket,
                key,
                response.status()
            ));
        }

        Ok(())
    }
}
