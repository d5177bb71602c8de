//! Error types for the segstore storage core.

use std::fmt;
use std::io;

/// The result type used throughout segstore.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for segstore operations.
#[derive(Debug)]
pub enum Error {
    /// An I/O error occurred while writing or reading a segment file.
    Io(io::Error),

    /// A segment file failed structural validation.
    Corruption(String),
}

impl Error {
    /// Creates a new corruption error.
    pub fn corruption(msg: impl Into<String>) -> Self {
        Error::Corruption(msg.into())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "IO error: {}", e),
            Error::Corruption(msg) => write!(f, "Segment corruption: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}
