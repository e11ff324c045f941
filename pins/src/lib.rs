//! CryptPad Pins Library
//!
//! Counts registered CryptPad users by walking the on-disk pins directory.
//! The pins directory holds one subdirectory per user, and each entry inside a
//! user folder is one retained pin record. The total number of records across
//! all user folders is what the CryptPad admin dashboard reports as the number
//! of registered users.
//!
//! # Modules
//!
//! - [`counter`] - Directory walk and counting
//! - [`error`] - Scan error types
//!
//! # Example
//!
//! ```
//! use pins::{count_registered_users, scan_registered_users};
//!
//! let dir = std::env::temp_dir().join("pins-doc-example-missing");
//! assert!(scan_registered_users(&dir).is_err());
//! assert_eq!(count_registered_users(&dir), 0);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod counter;
pub mod error;

pub use counter::{count_registered_users, scan_registered_users, scan_summary, ScanSummary};
pub use error::ScanError;
