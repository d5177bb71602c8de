//! Immutable segment file format, writer, and reader.
//!
//! A segment is the flush output of one memtable generation: written once,
//! never mutated afterwards. Point lookups go through a hash-sorted index
//! region; the value region itself is in key order and is not searchable on
//! its own.
//!
//! ## File Format
//!
//! Little-endian throughout.
//!
//! ```text
//! [level: u16]          // offset 0, always 0 on a fresh flush
//! [index_pos: u64]      // offset 2, absolute offset of the index region
//! [value region]        // offset 10, concatenated values in key order
//! [index region]        // offset index_pos, N x 32-byte records
//! ```
//!
//! ## Index Record Format
//!
//! ```text
//! [hash: 16 bytes]         // 128-bit xxh3 of the key
//! [value_start: u64]       // absolute offset of the first value byte
//! [value_end: u64]         // absolute offset one past the last value byte
//! ```
//!
//! Records are sorted by unsigned byte-wise comparison of the hash, so a
//! reader can binary-search the index without the original keys.

pub mod index;
pub mod reader;
pub mod writer;

pub use index::{hash_key, IndexEntry};
pub use reader::SegmentReader;
pub use writer::SegmentWriter;

/// Size of the fixed segment header (level + index_pos) in bytes.
pub const HEADER_SIZE: usize = 10;

/// Size of one encoded index record in bytes.
pub const INDEX_ENTRY_SIZE: usize = 32;

/// Level assigned to a freshly flushed segment. Higher levels are produced
/// by the external compaction process.
pub const FRESH_SEGMENT_LEVEL: u16 = 0;
