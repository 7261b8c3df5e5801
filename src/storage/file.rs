// Log-structured file store
//
// Every put and delete is appended to a single log file. Opening the store
// replays the log into an in-memory ordered index; reads never touch the file.
//
// Record layout (little endian):
//   op: u8 | key_len: u32 | value_len: u32 | key | value

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use byteorder::{ByteOrder, LittleEndian, WriteBytesExt};
use log::{debug, info, trace, warn};
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};

use super::cursor::SnapshotCursor;
use super::error::{StorageError, StorageResult};
use super::memory::collect_range;
use super::traits::{Storage, StorageIterator};

const OP_PUT: u8 = 1;
const OP_DELETE: u8 = 2;
const HEADER_LEN: usize = 9;
/// Upper bound on key + value length accepted during replay
const MAX_RECORD_BODY: usize = 64 * 1024 * 1024;

/// Options for [`FileStorage`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileStorageOptions {
    /// fsync the log after every write
    pub sync_writes: bool,
}

impl Default for FileStorageOptions {
    fn default() -> Self {
        FileStorageOptions { sync_writes: true }
    }
}

enum LogRecord {
    Put(Vec<u8>, Vec<u8>),
    Delete(Vec<u8>),
}

/// Append-only log file with an in-memory index
pub struct FileStorage {
    path: PathBuf,
    options: FileStorageOptions,
    index: RwLock<BTreeMap<Vec<u8>, Vec<u8>>>,
    log: Mutex<BufWriter<File>>,
}

impl FileStorage {
    /// Open or create the log at `path` and replay it
    pub fn open(path: impl AsRef<Path>, options: FileStorageOptions) -> StorageResult<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new().read(true).append(true).create(true).open(&path)?;
        let (index, valid_len) = replay(&mut BufReader::new(File::open(&path)?))?;

        let file_len = file.metadata()?.len();
        if valid_len < file_len {
            warn!(
                "Discarding {} trailing bytes of incomplete record in {}",
                file_len - valid_len,
                path.display()
            );
            file.set_len(valid_len)?;
        }
        info!("Opened {} with {} keys", path.display(), index.len());

        Ok(FileStorage {
            path,
            options,
            index: RwLock::new(index),
            log: Mutex::new(BufWriter::new(file)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of live keys
    pub fn len(&self) -> usize {
        self.index.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.read().is_empty()
    }

    /// Rewrite the log so it holds one put per live key
    pub fn compact(&self) -> StorageResult<()> {
        let mut log = self.log.lock();
        log.flush()?;
        let index = self.index.read();

        let tmp_path = self.path.with_extension("compact");
        {
            let mut writer = BufWriter::new(File::create(&tmp_path)?);
            for (key, value) in index.iter() {
                write_record(&mut writer, OP_PUT, key, value)?;
            }
            writer.flush()?;
            writer.get_ref().sync_all()?;
        }
        fs::rename(&tmp_path, &self.path)?;

        *log = BufWriter::new(OpenOptions::new().append(true).open(&self.path)?);
        debug!("Compacted {} to {} keys", self.path.display(), index.len());
        Ok(())
    }

    fn append(&self, op: u8, key: &[u8], value: &[u8]) -> StorageResult<()> {
        let sync_writes = self.options.sync_writes;
        self.append_then(op, key, value, |file| if sync_writes { file.sync_data() } else { Ok(()) })
    }

    /// Append a record, apply it to the index, then run `sync` on the log file.
    ///
    /// The index is updated as soon as the record is flushed, so a failed sync
    /// still leaves the write visible, matching what a replay of the log would
    /// produce.
    fn append_then<F>(&self, op: u8, key: &[u8], value: &[u8], sync: F) -> StorageResult<()>
    where
        F: FnOnce(&File) -> io::Result<()>,
    {
        let mut log = self.log.lock();
        write_record(&mut *log, op, key, value)?;
        log.flush()?;

        // The index is updated while the log lock is held so both see writes
        // in the same order.
        {
            let mut index = self.index.write();
            match op {
                OP_PUT => {
                    index.insert(key.to_vec(), value.to_vec());
                }
                _ => {
                    index.remove(key);
                }
            }
        }

        sync(log.get_ref())?;
        Ok(())
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &[u8]) -> StorageResult<Vec<u8>> {
        self.index
            .read()
            .get(key)
            .cloned()
            .ok_or_else(|| StorageError::not_found(key))
    }

    fn put(&self, key: &[u8], value: &[u8]) -> StorageResult<()> {
        trace!("put {} ({} bytes)", String::from_utf8_lossy(key), value.len());
        self.append(OP_PUT, key, value)
    }

    fn delete(&self, key: &[u8]) -> StorageResult<()> {
        trace!("delete {}", String::from_utf8_lossy(key));
        self.append(OP_DELETE, key, &[])
    }

    fn scan(&self, lower: &[u8], upper: &[u8]) -> StorageResult<Box<dyn StorageIterator>> {
        let entries = collect_range(&self.index.read(), lower, upper);
        Ok(Box::new(SnapshotCursor::new(entries)))
    }

    fn scan_all(&self) -> StorageResult<Box<dyn StorageIterator>> {
        let entries = self
            .index
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Ok(Box::new(SnapshotCursor::new(entries)))
    }
}

fn length_prefix(len: usize) -> StorageResult<u32> {
    u32::try_from(len).map_err(|_| {
        StorageError::Io(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("record field of {} bytes is too large", len),
        ))
    })
}

fn write_record<W: Write>(writer: &mut W, op: u8, key: &[u8], value: &[u8]) -> StorageResult<()> {
    writer.write_u8(op)?;
    writer.write_u32::<LittleEndian>(length_prefix(key.len())?)?;
    writer.write_u32::<LittleEndian>(length_prefix(value.len())?)?;
    writer.write_all(key)?;
    writer.write_all(value)?;
    Ok(())
}

/// Read exactly `len` bytes, `None` if the input ends first
fn read_exact_or_eof<R: Read>(reader: &mut R, len: usize) -> StorageResult<Option<Vec<u8>>> {
    let mut buf = vec![0u8; len];
    match reader.read_exact(&mut buf) {
        Ok(()) => Ok(Some(buf)),
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Read one record starting at `offset`; `None` at end of log or on a torn tail
fn read_record<R: Read>(reader: &mut R, offset: u64) -> StorageResult<Option<(LogRecord, usize)>> {
    let Some(header) = read_exact_or_eof(reader, HEADER_LEN)? else {
        return Ok(None);
    };
    let op = header[0];
    let key_len = LittleEndian::read_u32(&header[1..5]) as usize;
    let value_len = LittleEndian::read_u32(&header[5..9]) as usize;

    if op != OP_PUT && op != OP_DELETE {
        return Err(StorageError::Corrupted {
            offset,
            reason: format!("unknown record type {}", op),
        });
    }
    if key_len + value_len > MAX_RECORD_BODY {
        return Err(StorageError::Corrupted {
            offset,
            reason: format!("record body of {} bytes", key_len + value_len),
        });
    }

    let Some(mut body) = read_exact_or_eof(reader, key_len + value_len)? else {
        return Ok(None);
    };
    let value = body.split_off(key_len);
    let record = match op {
        OP_PUT => LogRecord::Put(body, value),
        _ => LogRecord::Delete(body),
    };
    Ok(Some((record, HEADER_LEN + key_len + value_len)))
}

/// Rebuild the index from the log, returning it with the length of the valid prefix
fn replay<R: Read>(reader: &mut R) -> StorageResult<(BTreeMap<Vec<u8>, Vec<u8>>, u64)> {
    let mut index = BTreeMap::new();
    let mut offset = 0u64;
    while let Some((record, len)) = read_record(reader, offset)? {
        match record {
            LogRecord::Put(key, value) => {
                index.insert(key, value);
            }
            LogRecord::Delete(key) => {
                index.remove(&key);
            }
        }
        offset += len as u64;
    }
    Ok((index, offset))
}
