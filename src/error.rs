use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CueError {
    #[error("File not found: '{}'", path.display())]
    FileNotFound { path: PathBuf },

    #[error("Failed to read '{}'", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed timestamp '{timestamp}' on line {line}")]
    MalformedTimestamp { line: usize, timestamp: String },

    #[error("Failed to remove '{}'", path.display())]
    DeletionFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid tag pattern")]
    Pattern(#[from] regex::Error),
}
