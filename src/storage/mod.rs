// Storage Module
//
// The ordered key-value contract the engine persists rows through, the key
// encoding built on top of it, and two stores implementing it.

pub mod cursor;
pub mod error;
pub mod file;
pub mod key;
pub mod memory;
pub mod traits;

pub use self::cursor::SnapshotCursor;
pub use self::error::{StorageError, StorageResult};
pub use self::file::{FileStorage, FileStorageOptions};
pub use self::memory::MemoryStorage;
pub use self::traits::{KvPair, Storage, StorageIterator};
