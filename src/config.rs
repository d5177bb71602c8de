//! Configuration options for the segstore storage core.

/// Configuration options for a memtable.
#[derive(Debug, Clone)]
pub struct Options {
    /// Size threshold for flushing the memtable to a segment file (in bytes).
    ///
    /// The memtable does not flush itself when the threshold is reached;
    /// the owning engine polls [`should_flush`](crate::Memtable::should_flush)
    /// and decides when to rotate.
    /// Default: 4MB
    pub memtable_size: usize,

    /// Sync the segment file to disk before publishing it at its final path.
    ///
    /// Disabling reduces durability but speeds up flushes.
    /// Default: true
    pub sync_on_flush: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            memtable_size: 4 * 1024 * 1024, // 4MB
            sync_on_flush: true,
        }
    }
}
