use super::error::StorageResult;
use super::traits::{KvPair, StorageIterator};

/// Cursor over a snapshot of entries taken when the scan was opened.
///
/// Writes made after the snapshot are not visible through it.
pub struct SnapshotCursor {
    entries: std::vec::IntoIter<KvPair>,
    current: Option<KvPair>,
}

impl SnapshotCursor {
    /// Entries must already be in key order
    pub fn new(entries: Vec<KvPair>) -> Self {
        SnapshotCursor {
            entries: entries.into_iter(),
            current: None,
        }
    }
}

impl StorageIterator for SnapshotCursor {
    fn advance(&mut self) -> StorageResult<bool> {
        self.current = self.entries.next();
        Ok(self.current.is_some())
    }

    fn key(&self) -> Option<&[u8]> {
        self.current.as_ref().map(|(k, _)| k.as_slice())
    }

    fn value(&self) -> Option<&[u8]> {
        self.current.as_ref().map(|(_, v)| v.as_slice())
    }
}
