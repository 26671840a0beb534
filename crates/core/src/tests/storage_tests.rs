use super::*;

#[test]
fn memory_storage_roundtrip_and_remove() {
    let mut storage = MemoryStorage::new();
    assert_eq!(storage.get("saveData").expect("get"), None);

    storage.set("saveData", "blob").expect("set");
    assert_eq!(storage.get("saveData").expect("get").as_deref(), Some("blob"));

    storage.remove("saveData").expect("remove");
    assert!(!storage.contains("saveData"));
    storage.remove("saveData").expect("removing a missing key is fine");
}

#[test]
fn memory_storage_enforces_quota() {
    let mut storage = MemoryStorage::with_quota(16);
    storage.set("k", "0123456789").expect("11 bytes fit");
    storage
        .set("k", "abcdefghijklmno")
        .expect("replacing counts only the new value");

    let err = storage
        .set("other", "0123456789")
        .expect_err("would exceed quota");
    assert!(matches!(
        err,
        StorageError::QuotaExceeded {
            needed: 31,
            limit: 16
        }
    ));
    assert_eq!(
        storage.get("k").expect("get").as_deref(),
        Some("abcdefghijklmno")
    );
}

#[test]
fn directory_storage_roundtrip() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut storage = DirectoryStorage::new(dir.path().join("character"));

    assert_eq!(storage.get("saveData").expect("missing key"), None);
    storage.set("saveData", "first").expect("first write");
    storage.set("saveData", "second").expect("overwrite");
    assert_eq!(
        storage.get("saveData").expect("get").as_deref(),
        Some("second")
    );
    assert!(storage.root().join("saveData.sav").exists());
    assert!(!storage.root().join("saveData.tmp").exists());

    storage.remove("saveData").expect("remove");
    assert_eq!(storage.get("saveData").expect("get after remove"), None);
}

#[test]
fn directory_storage_rejects_path_like_keys() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut storage = DirectoryStorage::new(dir.path().to_path_buf());
    for key in ["", "../escape", "a/b", "with space"] {
        let err = storage.set(key, "x").expect_err("invalid key");
        assert!(matches!(err, StorageError::InvalidKey(_)), "key {key:?}");
    }
}

#[test]
fn failed_directory_write_keeps_previous_value() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut storage = DirectoryStorage::new(dir.path().to_path_buf());
    storage.set("saveData", "first").expect("first write");

    // A directory in the temp file's place makes the staging write fail.
    fs::create_dir(storage.root().join("saveData.tmp")).expect("block temp path");
    let err = storage.set("saveData", "second").expect_err("staging fails");
    assert!(matches!(err, StorageError::Io(_)));
    assert_eq!(
        storage.get("saveData").expect("get").as_deref(),
        Some("first")
    );
}
