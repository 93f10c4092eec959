// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Integration tests for `FileStore`.

use bytes::Bytes;
use strata_fs::{FileMode, FileStore};
use strata_tier::testing::LogCapture;
use strata_tier::{Error, Store, StoreExt};
use tempfile::TempDir;

fn text_store(dir: &TempDir) -> FileStore<String> {
    FileStore::builder(dir.path())
        .mode(FileMode::Text)
        .verbose(false)
        .build()
        .expect("failed to build text store")
}

fn bytes_store(dir: &TempDir) -> FileStore<Vec<u8>> {
    FileStore::builder(dir.path())
        .mode(FileMode::Bytes)
        .verbose(false)
        .build()
        .expect("failed to build bytes store")
}

#[tokio::test]
async fn get_of_missing_file_is_absent() {
    let dir = tempfile::tempdir().unwrap();
    let store = text_store(&dir);

    assert!(store.get(&"missing").await.expect("get failed").is_none());
}

#[tokio::test]
async fn put_writes_one_file_per_key() {
    let dir = tempfile::tempdir().unwrap();
    let store = text_store(&dir);

    store.put(&"greeting", "hello".to_string()).await.expect("put failed");

    let on_disk = std::fs::read_to_string(dir.path().join("greeting")).unwrap();
    assert_eq!(on_disk, "hello");
    assert_eq!(store.get(&"greeting").await.expect("get failed"), Some("hello".to_string()));
}

#[tokio::test]
async fn put_truncates_previous_contents() {
    let dir = tempfile::tempdir().unwrap();
    let store = text_store(&dir);

    store.put(&"key", "a much longer first value".to_string()).await.expect("put failed");
    store.put(&"key", "short".to_string()).await.expect("put failed");

    assert_eq!(store.get(&"key").await.expect("get failed"), Some("short".to_string()));
}

#[tokio::test]
async fn bytes_mode_round_trips_arbitrary_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let store = bytes_store(&dir);
    let payload = vec![0x00, 0xff, 0xc3, 0x28];

    store.put(&"blob", payload.clone()).await.expect("put failed");
    assert_eq!(store.get(&"blob").await.expect("get failed"), Some(payload));
}

#[tokio::test]
async fn text_mode_rejects_invalid_utf8_on_read() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("bad"), [0xff, 0xfe]).unwrap();

    let store = FileStore::<Bytes>::builder(dir.path())
        .mode(FileMode::Text)
        .verbose(false)
        .build()
        .expect("failed to build store");

    let error = store.get(&"bad").await.expect_err("invalid UTF-8 should fail in text mode");
    assert!(error.is_transform());
}

#[tokio::test]
async fn text_mode_rejects_invalid_utf8_on_write() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::<Vec<u8>>::builder(dir.path())
        .mode(FileMode::Text)
        .verbose(false)
        .build()
        .expect("failed to build store");

    let error = store.put(&"bad", vec![0xff]).await.expect_err("invalid UTF-8 should fail in text mode");
    assert!(error.is_transform());
    assert!(!dir.path().join("bad").exists());
}

#[tokio::test]
async fn remove_deletes_file_and_tolerates_absence() {
    let dir = tempfile::tempdir().unwrap();
    let store = text_store(&dir);

    store.remove(&"never-written").await.expect("remove of absent key failed");

    store.put(&"key", "value".to_string()).await.expect("put failed");
    store.remove(&"key").await.expect("remove failed");
    assert!(!dir.path().join("key").exists());
    assert!(store.get(&"key").await.expect("get failed").is_none());

    store.remove(&"key").await.expect("second remove failed");
}

#[tokio::test]
async fn directory_at_key_path_is_absent() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("nested")).unwrap();
    let store = text_store(&dir);

    assert!(store.get(&"nested").await.expect("get failed").is_none());
}

#[tokio::test]
async fn missing_directory_fails_writes_with_backend_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::<String>::builder(dir.path().join("does-not-exist"))
        .mode(FileMode::Text)
        .verbose(false)
        .build()
        .expect("construction does not touch the filesystem");

    let error = store.put(&"key", "value".to_string()).await.expect_err("write should fail");
    assert!(error.is_backend());
    assert!(error.to_string().contains("failed to write"), "got: {error}");

    let cause = std::error::Error::source(&error)
        .and_then(|source| source.downcast_ref::<std::io::Error>())
        .expect("the io::Error should be the source");
    assert_eq!(cause.kind(), std::io::ErrorKind::NotFound);

    // Reads of a missing directory are just misses.
    assert!(store.get(&"key").await.expect("get failed").is_none());
}

#[tokio::test]
async fn directory_at_key_path_is_left_alone_by_remove() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("nested")).unwrap();
    let store = text_store(&dir);

    store.remove(&"nested").await.expect("remove of a directory key should be a no-op");
    assert!(dir.path().join("nested").is_dir());
}

#[tokio::test]
async fn key_below_a_regular_file_is_absent() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("file"), "contents").unwrap();
    let store = text_store(&dir);

    assert!(store.get(&"file/sub").await.expect("get failed").is_none());
    store.remove(&"file/sub").await.expect("remove failed");
    assert_eq!(std::fs::read_to_string(dir.path().join("file")).unwrap(), "contents");
}

#[tokio::test]
async fn transforms_round_trip_structured_values() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::<(u32, u32)>::builder(dir.path())
        .mode(FileMode::Text)
        .verbose(false)
        .encode(|(a, b)| Ok(Bytes::from(format!("{a},{b}"))))
        .decode(|raw| {
            let text = std::str::from_utf8(&raw).map_err(Error::transform)?;
            let (a, b) = text.split_once(',').ok_or_else(|| Error::transform("missing comma"))?;
            Ok((a.parse().map_err(Error::transform)?, b.parse().map_err(Error::transform)?))
        })
        .build()
        .expect("failed to build store");

    store.put(&"pair", (3, 4)).await.expect("put failed");
    assert_eq!(std::fs::read_to_string(dir.path().join("pair")).unwrap(), "3,4");
    assert_eq!(store.get(&"pair").await.expect("get failed"), Some((3, 4)));
}

#[tokio::test]
async fn decode_errors_propagate_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("key"), "not a number").unwrap();

    let store = FileStore::<u64>::builder(dir.path())
        .mode(FileMode::Text)
        .verbose(false)
        .encode(|n| Ok(Bytes::from(n.to_string())))
        .decode(|_| Err(Error::transform("decoder refused")))
        .build()
        .expect("failed to build store");

    let error = store.get(&"key").await.expect_err("decode should fail");
    assert!(error.is_transform());
    assert!(error.to_string().contains("decoder refused"));
}

#[tokio::test]
async fn get_or_create_writes_generated_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = text_store(&dir);

    let value = store
        .get_or_create(&"report", |k| format!("generated {k}"))
        .await
        .expect("get_or_create failed");

    assert_eq!(value, "generated report");
    assert_eq!(std::fs::read_to_string(dir.path().join("report")).unwrap(), "generated report");
}

#[tokio::test]
async fn clones_write_to_the_same_directory() {
    let dir = tempfile::tempdir().unwrap();
    let store = text_store(&dir);
    let clone = store.clone();

    store.put(&"key", "value".to_string()).await.expect("put failed");
    assert_eq!(clone.get(&"key").await.expect("get failed"), Some("value".to_string()));
}

#[test]
fn unknown_mode_string_is_a_configuration_error() {
    let error = "binary".parse::<FileMode>().expect_err("unknown mode should be rejected");
    assert!(error.is_configuration());
}

#[tokio::test]
async fn verbose_store_logs_initialization_and_operations() {
    let capture = LogCapture::new();
    let _guard = tracing::subscriber::set_default(capture.subscriber());

    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::<String>::builder(dir.path())
        .mode(FileMode::Text)
        .build()
        .expect("failed to build store");

    capture.assert_contains("store.initialized");
    capture.assert_contains("initialized at");

    store.put(&"alpha", "1".to_string()).await.expect("put failed");
    let _ = store.get(&"alpha").await.expect("get failed");
    let _ = store.get(&"beta").await.expect("get failed");

    capture.assert_contains("store.put");
    capture.assert_contains("store.hit");
    capture.assert_contains("store.miss");
    capture.assert_contains("mode='text'");
}
