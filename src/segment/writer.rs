//! Segment writer implementation.
//!
//! Serializes one memtable generation into an immutable segment file:
//! header, key-ordered value region, hash-sorted index region.

use crate::error::Result;
use crate::segment::index::{hash_key, IndexEntry};
use crate::segment::{FRESH_SEGMENT_LEVEL, HEADER_SIZE, INDEX_ENTRY_SIZE};
use bytes::BytesMut;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// SegmentWriter serializes key-sorted entries into a segment file.
///
/// The file is written to a `.tmp` sibling first and renamed into place
/// once every region is on disk, so a failed flush never leaves a partial
/// file at the published path.
///
/// Usage:
/// ```no_run
/// use segstore::segment::SegmentWriter;
///
/// let writer = SegmentWriter::new("000001.seg");
/// let entries = [(b"apple".as_slice(), b"red".as_slice())];
/// writer.write(entries).unwrap();
/// ```
#[derive(Debug)]
pub struct SegmentWriter {
    path: PathBuf,
    sync: bool,
}

impl SegmentWriter {
    /// Creates a writer targeting `path` as the final segment location.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self { path: path.as_ref().to_path_buf(), sync: true }
    }

    /// Set whether the file is synced to disk before the rename (default: true).
    pub fn set_sync(&mut self, sync: bool) {
        self.sync = sync;
    }

    /// Writes the complete segment from entries in byte-wise key order.
    ///
    /// The value region preserves the given order; the index region is
    /// re-sorted by key hash. Returns the total file size in bytes.
    ///
    /// Any I/O error aborts the write, removes the temporary file, and is
    /// surfaced to the caller; the final path is only ever created by the
    /// rename of a fully written file.
    pub fn write<'a, I>(&self, entries: I) -> Result<u64>
    where
        I: IntoIterator<Item = (&'a [u8], &'a [u8])>,
    {
        let entries: Vec<(&[u8], &[u8])> = entries.into_iter().collect();
        let tmp = tmp_path(&self.path);

        match self.write_regions(&tmp, &entries) {
            Ok(file_size) => {
                fs::rename(&tmp, &self.path)?;
                Ok(file_size)
            }
            Err(e) => {
                let _ = fs::remove_file(&tmp);
                Err(e)
            }
        }
    }

    /// Write header, value region, and index region to the temporary file.
    fn write_regions(&self, tmp: &Path, entries: &[(&[u8], &[u8])]) -> Result<u64> {
        let total_value_size: u64 = entries.iter().map(|(_, v)| v.len() as u64).sum();
        let index_pos = HEADER_SIZE as u64 + total_value_size;

        let file = File::create(tmp)?;
        let mut writer = BufWriter::new(file);

        writer.write_all(&FRESH_SEGMENT_LEVEL.to_le_bytes())?;
        writer.write_all(&index_pos.to_le_bytes())?;

        // Stream values in key order, remembering where each one landed
        let mut index = Vec::with_capacity(entries.len());
        let mut offset = HEADER_SIZE as u64;
        for (key, value) in entries {
            writer.write_all(value)?;
            let value_start = offset;
            offset += value.len() as u64;
            index.push(IndexEntry::new(hash_key(key), value_start, offset));
        }

        // Hash order is what lets a reader binary-search without key bytes
        index.sort_unstable();

        let mut buf = BytesMut::with_capacity(index.len() * INDEX_ENTRY_SIZE);
        for entry in &index {
            entry.encode(&mut buf);
        }
        writer.write_all(&buf)?;

        writer.flush()?;
        if self.sync {
            writer.get_ref().sync_all()?;
        }

        Ok(index_pos + (index.len() * INDEX_ENTRY_SIZE) as u64)
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".tmp");
    PathBuf::from(name)
}
