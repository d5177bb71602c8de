//! Segment reader implementation.
//!
//! Single-segment point lookups: binary-search the hash-sorted index region,
//! then read the value byte range. Merging lookups across multiple segments
//! belongs to the engine above this crate.

use crate::error::{Error, Result};
use crate::segment::index::{hash_key, IndexEntry};
use crate::segment::{HEADER_SIZE, INDEX_ENTRY_SIZE};
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

/// SegmentReader provides point lookups on one immutable segment file.
///
/// The index is loaded into memory at open time; values are read from the
/// file on demand. Lookups match on the 128-bit key hash only, because the
/// format stores no key bytes: two distinct keys with colliding hashes are
/// indistinguishable here.
///
/// Usage:
/// ```no_run
/// use segstore::segment::SegmentReader;
///
/// let reader = SegmentReader::open("000001.seg").unwrap();
/// if let Some(value) = reader.get(b"apple").unwrap() {
///     println!("Found: {:?}", value);
/// }
/// ```
#[derive(Debug)]
pub struct SegmentReader {
    file: File,
    level: u16,
    index: Vec<IndexEntry>,
}

impl SegmentReader {
    /// Open a segment file and load its index region.
    ///
    /// Fails with [`Error::Corruption`] if the header or index geometry is
    /// inconsistent with the file size.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        let file_size = file.metadata()?.len();

        if file_size < HEADER_SIZE as u64 {
            return Err(Error::corruption(format!(
                "file too small to hold a segment header: {} bytes",
                file_size
            )));
        }

        let mut header = [0u8; HEADER_SIZE];
        file.read_exact(&mut header)?;
        let level = u16::from_le_bytes(header[0..2].try_into().unwrap());
        let index_pos = u64::from_le_bytes(header[2..10].try_into().unwrap());

        if index_pos < HEADER_SIZE as u64 || index_pos > file_size {
            return Err(Error::corruption(format!(
                "index position {} outside file of {} bytes",
                index_pos, file_size
            )));
        }

        let index_len = (file_size - index_pos) as usize;
        if index_len % INDEX_ENTRY_SIZE != 0 {
            return Err(Error::corruption(format!(
                "index region of {} bytes is not a whole number of records",
                index_len
            )));
        }

        file.seek(SeekFrom::Start(index_pos))?;
        let mut raw = vec![0u8; index_len];
        file.read_exact(&mut raw)?;

        let mut index = Vec::with_capacity(index_len / INDEX_ENTRY_SIZE);
        for record in raw.chunks_exact(INDEX_ENTRY_SIZE) {
            let entry = IndexEntry::decode(record)?;
            if entry.value_start < HEADER_SIZE as u64 || entry.value_end > index_pos {
                return Err(Error::corruption(format!(
                    "index record points outside the value region: {}..{}",
                    entry.value_start, entry.value_end
                )));
            }
            index.push(entry);
        }

        Ok(Self { file, level, index })
    }

    /// Get the value for a key, or `None` if its hash is not in the index.
    pub fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        let hash = hash_key(key);
        let entry = match self.index.binary_search_by(|e| e.hash.cmp(&hash)) {
            Ok(i) => self.index[i],
            Err(_) => return Ok(None),
        };

        let mut file = &self.file;
        file.seek(SeekFrom::Start(entry.value_start))?;
        let mut value = vec![0u8; entry.value_len() as usize];
        file.read_exact(&mut value)?;

        Ok(Some(value))
    }

    /// The segment's level field (0 for a fresh flush).
    pub fn level(&self) -> u16 {
        self.level
    }

    /// Number of entries in the segment.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns `true` if the segment holds no entries.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}
