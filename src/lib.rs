//! # segstore - Memtable and Segment Flush Core
//!
//! segstore is the on-disk storage core of an LSM-style indexed-data
//! engine: an in-memory sorted write buffer (the memtable) that absorbs
//! writes and flushes itself once into an immutable, hash-indexed segment
//! file.
//!
//! ## Architecture
//!
//! - **OrderedBuffer**: sorted in-memory map from byte keys to byte values
//! - **Memtable**: wraps the buffer with a reader/writer lock, tracks write
//!   volume for flush triggering, and orchestrates the flush
//! - **SegmentWriter**: serializes the buffer's in-order traversal into a
//!   segment file (header, key-ordered value region, hash-sorted index)
//! - **SegmentReader**: point lookups on a single written segment
//!
//! Segment rotation, multi-segment merge reads, write-ahead logging, and
//! compaction belong to the engine built on top of this crate.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use segstore::{Memtable, SegmentReader};
//!
//! # fn main() -> segstore::Result<()> {
//! let memtable = Memtable::new("./segment_000001.db");
//!
//! // Write operations
//! memtable.put(b"apple", b"red")?;
//! memtable.put(b"banana", b"yellow")?;
//!
//! // Reads are served from memory until the engine rotates the memtable
//! assert_eq!(memtable.get(b"apple"), Some(b"red".to_vec()));
//!
//! // Flush into an immutable segment file
//! memtable.flush()?;
//!
//! let reader = SegmentReader::open("./segment_000001.db")?;
//! assert_eq!(reader.get(b"banana")?, Some(b"yellow".to_vec()));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

// Module declarations
pub mod config;
pub mod error;
pub mod memtable;
pub mod segment;

// Re-exports
pub use config::Options;
pub use error::{Error, Result};
pub use memtable::Memtable;
pub use segment::{SegmentReader, SegmentWriter};
