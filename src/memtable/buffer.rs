//! Ordered key-value buffer backing the memtable.
//!
//! Entries are kept sorted by raw-byte key order so that a flush can stream
//! them straight into the value region of a segment file. Backed by a
//! `BTreeMap`, which keeps insert and lookup at O(log n) regardless of
//! insertion order.

use std::collections::btree_map;
use std::collections::BTreeMap;

/// A sorted associative buffer mapping opaque byte keys to byte values.
///
/// Keys are unique; inserting an existing key overwrites its value
/// (last write wins). In-order iteration yields entries in strictly
/// increasing byte-wise key order.
#[derive(Debug, Default)]
pub struct OrderedBuffer {
    entries: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl OrderedBuffer {
    /// Creates a new empty buffer.
    pub fn new() -> Self {
        Self { entries: BTreeMap::new() }
    }

    /// Inserts a key-value pair, overwriting any existing value for the key.
    pub fn insert(&mut self, key: Vec<u8>, value: Vec<u8>) {
        self.entries.insert(key, value);
    }

    /// Looks up the value for a key.
    pub fn lookup(&self, key: &[u8]) -> Option<&[u8]> {
        self.entries.get(key).map(|v| v.as_slice())
    }

    /// Returns an iterator over all entries in byte-wise key order.
    ///
    /// Non-destructive: the buffer stays intact and a fresh call restarts
    /// from the first key.
    pub fn iter(&self) -> BufferIter<'_> {
        BufferIter { inner: self.entries.iter() }
    }

    /// Returns the number of entries in the buffer.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the buffer contains no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Iterator over buffer entries in sorted key order.
pub struct BufferIter<'a> {
    inner: btree_map::Iter<'a, Vec<u8>, Vec<u8>>,
}

impl<'a> Iterator for BufferIter<'a> {
    type Item = (&'a [u8], &'a [u8]);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k.as_slice(), v.as_slice()))
    }
}
