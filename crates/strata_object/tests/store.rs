// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Integration tests for `RemoteStore` against an in-memory object store.

use std::sync::Arc;

use bytes::Bytes;
use object_store::memory::InMemory;
use object_store::path::Path;
use object_store::{ObjectStore, PutPayload};
use strata_object::RemoteStoreBuilder;
use strata_tier::testing::LogCapture;
use strata_tier::{Error, Store, StoreExt};

fn text_store(client: &Arc<InMemory>, prefix: &str) -> strata_object::RemoteStore<String> {
    RemoteStoreBuilder::with_client("bucket", prefix, Arc::clone(client) as Arc<dyn ObjectStore>)
        .verbose(false)
        .build()
        .expect("failed to build store")
}

#[tokio::test]
async fn get_of_missing_object_is_absent() {
    let client = Arc::new(InMemory::new());
    let store = text_store(&client, "cache");

    assert!(store.get(&"missing").await.expect("get failed").is_none());
}

#[tokio::test]
async fn put_uploads_under_prefixed_key() {
    let client = Arc::new(InMemory::new());
    let store = text_store(&client, "cache");

    store.put(&"greeting", "hello".to_string()).await.expect("put failed");

    let body = client
        .get(&Path::from("cache/greeting"))
        .await
        .expect("object should exist")
        .bytes()
        .await
        .expect("body should be readable");
    assert_eq!(body, Bytes::from_static(b"hello"));
    assert_eq!(store.get(&"greeting").await.expect("get failed"), Some("hello".to_string()));
}

#[tokio::test]
async fn put_overwrites_existing_object() {
    let client = Arc::new(InMemory::new());
    let store = text_store(&client, "cache");

    store.put(&"key", "first".to_string()).await.expect("put failed");
    store.put(&"key", "second".to_string()).await.expect("put failed");

    assert_eq!(store.get(&"key").await.expect("get failed"), Some("second".to_string()));
}

#[tokio::test]
async fn objects_written_by_others_are_visible() {
    let client = Arc::new(InMemory::new());
    client
        .put(&Path::from("cache/seeded"), PutPayload::from(Bytes::from_static(b"from elsewhere")))
        .await
        .expect("seed failed");

    let store = text_store(&client, "cache");
    assert_eq!(
        store.get(&"seeded").await.expect("get failed"),
        Some("from elsewhere".to_string())
    );
}

#[tokio::test]
async fn remove_deletes_object_and_tolerates_absence() {
    let client = Arc::new(InMemory::new());
    let store = text_store(&client, "cache");

    store.remove(&"never-written").await.expect("remove of absent key failed");

    store.put(&"key", "value".to_string()).await.expect("put failed");
    store.remove(&"key").await.expect("remove failed");
    assert!(store.get(&"key").await.expect("get failed").is_none());

    store.remove(&"key").await.expect("second remove failed");
}

#[tokio::test]
async fn prefixes_partition_one_bucket() {
    let client = Arc::new(InMemory::new());
    let left = text_store(&client, "left");
    let right = text_store(&client, "right");

    left.put(&"key", "l".to_string()).await.expect("put failed");

    assert!(right.get(&"key").await.expect("get failed").is_none());
    assert_eq!(left.get(&"key").await.expect("get failed"), Some("l".to_string()));
}

#[tokio::test]
async fn transforms_round_trip_structured_values() {
    let client = Arc::new(InMemory::new());
    let store = RemoteStoreBuilder::<Vec<u32>>::with_client("bucket", "nums", client)
        .verbose(false)
        .encode(|values| {
            let text = values.iter().map(u32::to_string).collect::<Vec<_>>().join(" ");
            Ok(Bytes::from(text))
        })
        .decode(|raw| {
            std::str::from_utf8(&raw)
                .map_err(Error::transform)?
                .split_whitespace()
                .map(|part| part.parse().map_err(Error::transform))
                .collect()
        })
        .build()
        .expect("failed to build store");

    store.put(&"primes", vec![2, 3, 5, 7]).await.expect("put failed");
    assert_eq!(store.get(&"primes").await.expect("get failed"), Some(vec![2, 3, 5, 7]));
}

#[tokio::test]
async fn raw_bytes_pass_through() {
    let client = Arc::new(InMemory::new());
    let store = RemoteStoreBuilder::<Bytes>::with_client("bucket", "raw", client)
        .verbose(false)
        .build()
        .expect("failed to build store");

    let payload = Bytes::from_static(&[0, 159, 146, 150]);
    store.put(&"blob", payload.clone()).await.expect("put failed");
    assert_eq!(store.get(&"blob").await.expect("get failed"), Some(payload));
}

#[tokio::test]
async fn encode_errors_abort_the_upload() {
    let client = Arc::new(InMemory::new());
    let store = RemoteStoreBuilder::<String>::with_client("bucket", "cache", Arc::clone(&client) as Arc<dyn ObjectStore>)
        .verbose(false)
        .encode(|_| Err(Error::transform("refusing to encode")))
        .build()
        .expect("failed to build store");

    let error = store.put(&"key", "value".to_string()).await.expect_err("encode should fail");
    assert!(error.is_transform());
    assert!(client.head(&Path::from("cache/key")).await.is_err());
}

#[tokio::test]
async fn get_or_create_uploads_generated_value() {
    let client = Arc::new(InMemory::new());
    let store = text_store(&client, "cache");

    let value = store
        .get_or_create(&"report", |k| format!("generated {k}"))
        .await
        .expect("get_or_create failed");
    assert_eq!(value, "generated report");

    let again = store
        .get_or_create(&"report", |_| "regenerated".to_string())
        .await
        .expect("get_or_create failed");
    assert_eq!(again, "generated report");
}

#[tokio::test]
async fn verbose_store_logs_initialization_and_operations() {
    let capture = LogCapture::new();
    let _guard = tracing::subscriber::set_default(capture.subscriber());

    let store = RemoteStoreBuilder::<String>::with_client("bucket", "cache", Arc::new(InMemory::new()))
        .build()
        .expect("failed to build store");
    capture.assert_contains("s3://bucket/cache");
    capture.assert_contains("store.initialized");

    store.put(&"alpha", "1".to_string()).await.expect("put failed");
    let _ = store.get(&"alpha").await.expect("get failed");
    let _ = store.get(&"beta").await.expect("get failed");
    store.remove(&"alpha").await.expect("remove failed");

    capture.assert_contains("store.put");
    capture.assert_contains("store.hit");
    capture.assert_contains("store.miss");
    capture.assert_contains("store.remove");
    capture.assert_contains("RemoteStore(bucket='bucket', prefix='cache', region='eu-west-1')");
}
