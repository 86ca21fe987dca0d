mod common;

use autodocs_server::storage::{ObjectStorage, StorageConfig, PDFS_BUCKET, TEMPLATES_BUCKET};
use common::MockObjectStorage;

#[test]
fn test_storage_config_debug_format() {
    let config = StorageConfig {
        endpoint: "http://minio.local:9000".to_string(),
        access_key: "test-access".to_string(),
        secret_key: "test-secret".to_string(),
    };
    let debug_str = format!("{:?}", config);

    assert!(debug_str.contains("StorageConfig"));
    assert!(debug_str.contains("minio.local"));
}

#[test]
fn test_storage_config_clone() {
    let config1 = StorageConfig {
        endpoint: "http://minio.local:9000".to_string(),
        access_key: "test-access".to_string(),
        secret_key: "test-secret".to_string(),
    };
    let config2 = config1.clone();

    assert_eq!(config1.endpoint, config2.endpoint);
    assert_eq!(config1.access_key, config2.access_key);
    assert_eq!(config1.secret_key, config2.secret_key);
}

#[test]
fn test_bucket_names() {
    assert_eq!(TEMPLATES_BUCKET, "templates");
    assert_eq!(PDFS_BUCKET, "pdfs");
}

#[tokio::test]
async fn test_upload_then_download_is_byte_identical() {
    let storage = MockObjectStorage::new();
    let uploaded = b"<html><body>{{customer}}</body></html>".to_vec();

    storage
        .put_object(TEMPLATES_BUCKET, "tmpl-1", &uploaded, "text/html")
        .await
        .unwrap();

    let downloaded = storage.get_object(TEMPLATES_BUCKET, "tmpl-1").await.unwrap();
    assert_eq!(downloaded, uploaded);
}

#[tokio::test]
async fn test_buckets_are_separate_namespaces() {
    let storage = MockObjectStorage::new();
    storage
        .put_object(TEMPLATES_BUCKET, "same-key", b"template", "text/html")
        .await
        .unwrap();
    storage
        .put_object(PDFS_BUCKET, "same-key", b"%PDF-1.4", "application/pdf")
        .await
        .unwrap();

    assert_eq!(
        storage.get_object(TEMPLATES_BUCKET, "same-key").await.unwrap(),
        b"template"
    );
    assert_eq!(
        storage.get_object(PDFS_BUCKET, "same-key").await.unwrap(),
        b"%PDF-1.4"
    );
}

#[tokio::test]
async fn test_delete_removes_blob() {
    let storage = MockObjectStorage::new();
    storage
        .put_object(PDFS_BUCKET, "doc-1", b"%PDF-1.4 content", "application/pdf")
        .await
        .unwrap();
    assert!(storage.has_object(PDFS_BUCKET, "doc-1").await);

    storage.delete_object(PDFS_BUCKET, "doc-1").await.unwrap();

    assert!(!storage.has_object(PDFS_BUCKET, "doc-1").await);
    assert!(storage.get_object(PDFS_BUCKET, "doc-1").await.is_err());
}
