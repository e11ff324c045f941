//! Registered user counting.
//!
//! Mirrors the CryptPad admin dashboard: every entry inside a user folder of
//! the pins directory counts as one registered user. Top-level entries that
//! are not directories are ignored, while entries inside a user folder count
//! regardless of their type.

use crate::error::ScanError;
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

/// Outcome of a complete walk over the pins directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanSummary {
    /// Sum of the entries found in all user folders.
    pub entries: u64,
    /// Number of user folders seen at the top level.
    pub user_folders: u64,
    /// Wall-clock time spent walking the tree.
    pub elapsed: Duration,
}

/// Walks the pins directory and reports entry and folder counts.
///
/// # Errors
///
/// Returns a [`ScanError`] as soon as the root or any user folder cannot be
/// listed. No partial result is returned.
pub fn scan_summary(root: &Path) -> Result<ScanSummary, ScanError> {
    let started = Instant::now();

    let top = fs::read_dir(root).map_err(|source| ScanError::ReadRoot {
        path: root.to_path_buf(),
        source,
    })?;

    let mut entries = 0u64;
    let mut user_folders = 0u64;

    for entry in top {
        let entry = entry.map_err(|source| ScanError::ReadEntry {
            path: root.to_path_buf(),
            source,
        })?;
        let folder = entry.path();

        // Follows symlinks; dangling links count as non-directories.
        if !folder.is_dir() {
            continue;
        }

        user_folders += 1;
        entries += count_entries(&folder)?;
    }

    Ok(ScanSummary {
        entries,
        user_folders,
        elapsed: started.elapsed(),
    })
}

/// Returns the number of registered users found under `root`.
///
/// # Errors
///
/// Returns a [`ScanError`] if the root or any user folder cannot be listed.
pub fn scan_registered_users(root: &Path) -> Result<u64, ScanError> {
    scan_summary(root).map(|summary| summary.entries)
}

/// Returns the number of registered users, or 0 if the scan fails.
///
/// The failure is logged and swallowed, so an unreadable pins directory is
/// indistinguishable from an empty one. Use [`scan_registered_users`] when the
/// caller needs to tell the two apart.
#[must_use]
pub fn count_registered_users(root: &Path) -> u64 {
    match scan_registered_users(root) {
        Ok(count) => count,
        Err(e) => {
            tracing::error!(error = %e, path = %root.display(), "Error counting registered users");
            0
        }
    }
}

fn count_entries(folder: &Path) -> Result<u64, ScanError> {
    let listing = fs::read_dir(folder).map_err(|source| ScanError::ReadUserDir {
        path: folder.to_path_buf(),
        source,
    })?;

    let mut count = 0u64;
    for entry in listing {
        entry.map_err(|source| ScanError::ReadEntry {
            path: folder.to_path_buf(),
            source,
        })?;
        count += 1;
    }
    Ok(count)
}
