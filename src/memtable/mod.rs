//! # Memtable - Concurrent Sorted Write Buffer
//!
//! The memtable absorbs writes in memory and is flushed once into an
//! immutable segment file when the owning engine decides to rotate it.
//!
//! ## Design
//!
//! - One [`OrderedBuffer`] per memtable generation, guarded by a single
//!   reader/writer lock: `get` and `size` take the shared mode, `put` takes
//!   the exclusive mode
//! - `size` tracks write volume (key bytes + value bytes, overwrites
//!   included) for the engine's flush-trigger policy
//! - `flush` streams the buffer's in-order traversal through a
//!   [`SegmentWriter`](crate::segment::SegmentWriter)
//!
//! ## Thread Safety
//!
//! `get`, `put`, and `size` may be called concurrently from any number of
//! threads. `flush` takes no exclusive lock of its own: the owning engine
//! must stop writers before flushing and discard the memtable afterwards,
//! as part of its segment-rotation protocol.

mod buffer;

pub use buffer::{BufferIter, OrderedBuffer};

use crate::config::Options;
use crate::error::Result;
use crate::segment::SegmentWriter;
use parking_lot::RwLock;
use std::path::{Path, PathBuf};

/// A concurrency-safe sorted write buffer bound to a flush target path.
///
/// # Example
///
/// ```rust
/// use segstore::Memtable;
///
/// let memtable = Memtable::new("segment_000001.db");
/// memtable.put(b"apple", b"red").unwrap();
/// assert_eq!(memtable.get(b"apple"), Some(b"red".to_vec()));
/// ```
pub struct Memtable {
    /// Buffer and size counter, behind one reader/writer lock
    state: RwLock<MemtableState>,

    /// Where `flush` writes the segment file
    path: PathBuf,

    /// Flush threshold and durability knobs
    options: Options,
}

struct MemtableState {
    buffer: OrderedBuffer,
    size: u64,
}

impl Memtable {
    /// Creates an empty memtable whose flush output will be written to `path`.
    ///
    /// Nothing is created on disk until [`flush`](Memtable::flush).
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self::with_options(path, Options::default())
    }

    /// Creates an empty memtable with explicit options.
    pub fn with_options<P: AsRef<Path>>(path: P, options: Options) -> Self {
        Self {
            state: RwLock::new(MemtableState { buffer: OrderedBuffer::new(), size: 0 }),
            path: path.as_ref().to_path_buf(),
            options,
        }
    }

    /// Retrieves the value for a key from the in-memory buffer.
    ///
    /// Returns `None` if the key is absent. Never consults disk: values
    /// already flushed to segments are served by the engine's merge read
    /// path, not by the memtable.
    pub fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        let state = self.state.read();
        state.buffer.lookup(key).map(|v| v.to_vec())
    }

    /// Inserts or overwrites a key-value pair.
    ///
    /// The size counter grows by `key.len() + value.len()` whether or not
    /// the key already existed: it measures write volume, not live memory,
    /// so an overwrite counts twice. Currently always returns `Ok`.
    pub fn put(&self, key: &[u8], value: &[u8]) -> Result<()> {
        let mut state = self.state.write();
        state.buffer.insert(key.to_vec(), value.to_vec());
        state.size += (key.len() + value.len()) as u64;

        Ok(())
    }

    /// Returns the cumulative write volume in bytes.
    ///
    /// Monotonically increasing across any sequence of `put` calls.
    ///
    /// # Example
    ///
    /// ```rust
    /// use segstore::Memtable;
    ///
    /// let memtable = Memtable::new("segment_000001.db");
    /// memtable.put(b"apple", b"red").unwrap();
    /// assert_eq!(memtable.size(), 8);
    /// ```
    pub fn size(&self) -> u64 {
        let state = self.state.read();
        state.size
    }

    /// Returns the number of distinct keys in the buffer.
    pub fn len(&self) -> usize {
        let state = self.state.read();
        state.buffer.len()
    }

    /// Returns `true` if the buffer contains no entries.
    pub fn is_empty(&self) -> bool {
        let state = self.state.read();
        state.buffer.is_empty()
    }

    /// Returns `true` once the write volume reaches the configured
    /// memtable size, signalling the engine to rotate and flush.
    pub fn should_flush(&self) -> bool {
        self.size() >= self.options.memtable_size as u64
    }

    /// The path the flush output is written to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serializes the buffer into an immutable segment file at the bound
    /// path and returns the file size in bytes.
    ///
    /// Takes only a shared lock for the traversal. The owning engine must
    /// guarantee no concurrent `put` and must not reuse the memtable after
    /// a flush; neither is enforced here.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use segstore::Memtable;
    ///
    /// # fn main() -> segstore::Result<()> {
    /// let memtable = Memtable::new("segment_000001.db");
    /// memtable.put(b"apple", b"red")?;
    /// memtable.flush()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn flush(&self) -> Result<u64> {
        let state = self.state.read();

        log::info!(
            "Starting flush of memtable to segment: {:?} ({} entries, {} bytes written)",
            self.path,
            state.buffer.len(),
            state.size
        );

        let mut writer = SegmentWriter::new(&self.path);
        writer.set_sync(self.options.sync_on_flush);
        let file_size = writer.write(state.buffer.iter())?;

        log::info!("Flush completed: {:?}, file size: {} bytes", self.path, file_size);

        Ok(file_size)
    }
}
