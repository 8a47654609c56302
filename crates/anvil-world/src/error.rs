use std::error::Error;
use std::fmt;
use std::io;

/// Errors surfaced by world operations.
#[derive(Debug)]
pub enum WorldError {
    /// An underlying I/O failure.
    Io(io::Error),
    /// Writing an evicted region back to disk failed. The region is gone
    /// from the cache at this point, so the data cannot be recovered.
    CacheWriteBack { x: i32, z: i32, source: io::Error },
}

impl fmt::Display for WorldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorldError::Io(e) => write!(f, "I/O error: {}", e),
            WorldError::CacheWriteBack { x, z, source } => write!(
                f,
                "failed to write back evicted region ({}, {}): {}",
                x, z, source
            ),
        }
    }
}

impl Error for WorldError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            WorldError::Io(e) => Some(e),
            WorldError::CacheWriteBack { source, .. } => Some(source),
        }
    }
}

impl From<io::Error> for WorldError {
    fn from(error: io::Error) -> Self {
        WorldError::Io(error)
    }
}
