//! Segment index records.
//!
//! Each record maps the 128-bit hash of a key to the byte range its value
//! occupies in the segment file. Records carry no key bytes: the index is
//! searched by hash alone.

use crate::error::{Error, Result};
use crate::segment::INDEX_ENTRY_SIZE;
use bytes::{BufMut, BytesMut};
use xxhash_rust::xxh3::xxh3_128;

/// Size of the key hash in bytes (128-bit xxh3).
pub const HASH_SIZE: usize = 16;

/// Computes the 128-bit index hash of a key.
///
/// The hash is stored big-endian so that unsigned byte-wise comparison of
/// the 16-byte field matches numeric ordering of the underlying `u128`.
pub fn hash_key(key: &[u8]) -> [u8; HASH_SIZE] {
    xxh3_128(key).to_be_bytes()
}

/// One record of the segment index region.
///
/// Offsets are absolute file offsets. The derived ordering compares the
/// hash bytes first, which is exactly the sort order of the index region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct IndexEntry {
    /// 128-bit hash of the entry's key.
    pub hash: [u8; HASH_SIZE],
    /// Absolute offset of the first byte of the value.
    pub value_start: u64,
    /// Absolute offset one past the last byte of the value.
    pub value_end: u64,
}

impl IndexEntry {
    /// Creates a new index entry.
    pub fn new(hash: [u8; HASH_SIZE], value_start: u64, value_end: u64) -> Self {
        Self { hash, value_start, value_end }
    }

    /// Length of the value this entry points at.
    pub fn value_len(&self) -> u64 {
        self.value_end - self.value_start
    }

    /// Encodes the entry into `buf` as one 32-byte index record.
    ///
    /// Format: `[hash: 16 bytes][value_start: u64 LE][value_end: u64 LE]`
    pub fn encode(&self, buf: &mut BytesMut) {
        buf.put_slice(&self.hash);
        buf.put_u64_le(self.value_start);
        buf.put_u64_le(self.value_end);
    }

    /// Decodes one index record from the head of `data`.
    pub fn decode(data: &[u8]) -> Result<Self> {
        if data.len() < INDEX_ENTRY_SIZE {
            return Err(Error::corruption(format!(
                "index record too short: expected {} bytes, got {}",
                INDEX_ENTRY_SIZE,
                data.len()
            )));
        }

        let hash: [u8; HASH_SIZE] = data[0..HASH_SIZE].try_into().unwrap();
        let value_start = u64::from_le_bytes(data[16..24].try_into().unwrap());
        let value_end = u64::from_le_bytes(data[24..32].try_into().unwrap());

        if value_start > value_end {
            return Err(Error::corruption(format!(
                "index record has inverted value range: {}..{}",
                value_start, value_end
            )));
        }

        Ok(Self { hash, value_start, value_end })
    }
}
