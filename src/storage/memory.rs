// In-memory ordered store
//
// A BTreeMap behind a reader-writer lock. Used for tests and for databases
// opened without a data path.

use std::collections::BTreeMap;
use std::ops::Bound;

use log::trace;
use parking_lot::RwLock;

use super::cursor::SnapshotCursor;
use super::error::{StorageError, StorageResult};
use super::traits::{KvPair, Storage, StorageIterator};

/// Ordered map storage held entirely in memory
#[derive(Default)]
pub struct MemoryStorage {
    data: RwLock<BTreeMap<Vec<u8>, Vec<u8>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }
}

/// Copy the entries of `map` in `[lower, upper)`
pub(crate) fn collect_range(map: &BTreeMap<Vec<u8>, Vec<u8>>, lower: &[u8], upper: &[u8]) -> Vec<KvPair> {
    if lower >= upper {
        return Vec::new();
    }
    map.range::<[u8], _>((Bound::Included(lower), Bound::Excluded(upper)))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

impl Storage for MemoryStorage {
    fn get(&self, key: &[u8]) -> StorageResult<Vec<u8>> {
        self.data
            .read()
            .get(key)
            .cloned()
            .ok_or_else(|| StorageError::not_found(key))
    }

    fn put(&self, key: &[u8], value: &[u8]) -> StorageResult<()> {
        trace!("put {} ({} bytes)", String::from_utf8_lossy(key), value.len());
        self.data.write().insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &[u8]) -> StorageResult<()> {
        trace!("delete {}", String::from_utf8_lossy(key));
        self.data.write().remove(key);
        Ok(())
    }

    fn scan(&self, lower: &[u8], upper: &[u8]) -> StorageResult<Box<dyn StorageIterator>> {
        let entries = collect_range(&self.data.read(), lower, upper);
        Ok(Box::new(SnapshotCursor::new(entries)))
    }

    fn scan_all(&self) -> StorageResult<Box<dyn StorageIterator>> {
        let entries = self
            .data
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Ok(Box::new(SnapshotCursor::new(entries)))
    }
}
