//! Storage trait definitions.

use super::error::StorageResult;

/// A key and its value
pub type KvPair = (Vec<u8>, Vec<u8>);

/// Ordered byte-key to byte-value store.
///
/// Keys are ordered lexicographically by byte value; table isolation in the
/// engine relies on prefix ranges over exactly this ordering.
///
/// Implementations must allow concurrent readers and serialize writers.
pub trait Storage: Send + Sync {
    /// Point lookup. A missing key is `StorageError::NotFound`.
    fn get(&self, key: &[u8]) -> StorageResult<Vec<u8>>;

    /// Insert or overwrite a key
    fn put(&self, key: &[u8], value: &[u8]) -> StorageResult<()>;

    /// Remove a key. Removing a missing key succeeds.
    fn delete(&self, key: &[u8]) -> StorageResult<()>;

    /// Cursor over keys in `[lower, upper)`
    fn scan(&self, lower: &[u8], upper: &[u8]) -> StorageResult<Box<dyn StorageIterator>>;

    /// Cursor over every key
    fn scan_all(&self) -> StorageResult<Box<dyn StorageIterator>>;
}

/// Positioned cursor over `(key, value)` pairs in key order.
///
/// A fresh cursor is positioned before the first entry; `advance` moves it
/// and reports whether it now rests on an entry.
pub trait StorageIterator: Send {
    fn advance(&mut self) -> StorageResult<bool>;

    /// Key under the cursor, `None` when not positioned
    fn key(&self) -> Option<&[u8]>;

    /// Value under the cursor, `None` when not positioned
    fn value(&self) -> Option<&[u8]>;
}
