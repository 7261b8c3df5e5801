use std::fs::OpenOptions;
use std::io::Write;

use anyhow::Result;
use leafdb::storage::key::{row_key, table_key_range};
use leafdb::storage::{FileStorage, FileStorageOptions, MemoryStorage, Storage, StorageError};
use rand::seq::SliceRandom;
use tempfile::tempdir;

fn collect(storage: &dyn Storage, lower: &[u8], upper: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>> {
    let mut cursor = storage.scan(lower, upper)?;
    let mut entries = Vec::new();
    while cursor.advance()? {
        if let (Some(key), Some(value)) = (cursor.key(), cursor.value()) {
            entries.push((key.to_vec(), value.to_vec()));
        }
    }
    Ok(entries)
}

fn exercise_contract(storage: &dyn Storage) -> Result<()> {
    let mut ids: Vec<u32> = (0..50).collect();
    ids.shuffle(&mut rand::thread_rng());
    for id in &ids {
        storage.put(&row_key("a", &id.to_string()), &id.to_le_bytes())?;
        storage.put(&row_key("ab", &id.to_string()), b"other")?;
    }
    storage.put(b"a", b"bare")?;

    let (lower, upper) = table_key_range("a");
    let entries = collect(storage, &lower, &upper)?;
    assert_eq!(entries.len(), 50);
    assert!(entries.windows(2).all(|w| w[0].0 < w[1].0));
    assert!(entries.iter().all(|(key, _)| key.starts_with(b"a:")));

    storage.delete(&row_key("a", "7"))?;
    storage.delete(b"never-written")?;
    assert!(matches!(storage.get(&row_key("a", "7")), Err(StorageError::NotFound(_))));
    assert_eq!(storage.get(&row_key("a", "8"))?, 8u32.to_le_bytes().to_vec());
    assert_eq!(collect(storage, &lower, &upper)?.len(), 49);
    assert!(collect(storage, b"z", b"zz")?.is_empty());
    Ok(())
}

#[test]
fn test_memory_storage_contract() -> Result<()> {
    exercise_contract(&MemoryStorage::new())
}

#[test]
fn test_file_storage_contract() -> Result<()> {
    let dir = tempdir()?;
    let storage = FileStorage::open(dir.path().join("data.log"), FileStorageOptions { sync_writes: false })?;
    exercise_contract(&storage)
}

#[test]
fn test_file_storage_survives_reopen_and_torn_tail() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("data.log");
    {
        let storage = FileStorage::open(&path, FileStorageOptions::default())?;
        storage.put(b"t:1", b"one")?;
        storage.put(b"t:2", b"two")?;
        storage.delete(b"t:1")?;
    }

    // A partially written record at the end is dropped on replay
    OpenOptions::new().append(true).open(&path)?.write_all(&[1, 9, 0])?;

    let storage = FileStorage::open(&path, FileStorageOptions::default())?;
    assert_eq!(storage.len(), 1);
    assert_eq!(storage.get(b"t:2")?, b"two".to_vec());

    storage.put(b"t:3", b"three")?;
    storage.compact()?;
    drop(storage);

    let storage = FileStorage::open(&path, FileStorageOptions::default())?;
    assert_eq!(collect(&storage, b"t:", b"t;")?.len(), 2);
    Ok(())
}
