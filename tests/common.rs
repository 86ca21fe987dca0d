use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use autodocs_server::storage::ObjectStorage;

/// In-memory object store for tests, keyed by (bucket, key).
pub struct MockObjectStorage {
    objects: Arc<Mutex<HashMap<(String, String), Vec<u8>>>>,
}

impl MockObjectStorage {
    pub fn new() -> Self {
        Self {
            objects: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub async fn has_object(&self, bucket: &str, key: &str) -> bool {
        let objects = self.objects.lock().await;
        objects.contains_key(&(bucket.to_string(), key.to_string()))
    }
}

#[async_trait]
impl ObjectStorage for MockObjectStorage {
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        data: &[u8],
        _content_type: &str,
    ) -> Result<(), String> {
        let mut objects = self.objects.lock().await;
        objects.insert((bucket.to_string(), key.to_string()), data.to_vec());
        Ok(())
    }

    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, String> {
        let objects = self.objects.lock().await;
        objects
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
            .ok_or_else(|| format!("object {}/{} not found", bucket, key))
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<(), String> {
        let mut objects = self.objects.lock().await;
        objects.remove(&(bucket.to_string(), key.to_string()));
        Ok(())
    }
}
