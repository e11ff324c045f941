//! Errors raised while scanning the pins directory.

use std::path::PathBuf;
use thiserror::Error;

/// A failure to list part of the pins directory.
///
/// Every variant aborts the whole scan; callers never see a partial count.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The pins directory itself could not be listed.
    #[error("Failed to read pins directory {path}: {source}")]
    ReadRoot {
        /// The pins directory.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A user folder inside the pins directory could not be listed.
    #[error("Failed to read user folder {path}: {source}")]
    ReadUserDir {
        /// The user folder.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Iterating over the entries of a directory failed midway.
    #[error("Failed to read directory entry in {path}: {source}")]
    ReadEntry {
        /// The directory being iterated.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl ScanError {
    /// Returns the path the failure relates to.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::ReadRoot { path, .. }
            | Self::ReadUserDir { path, .. }
            | Self::ReadEntry { path, .. } => path,
        }
    }
}
