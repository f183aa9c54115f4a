//! Shared helpers for integration tests across the workspace.
//!
//! - [`logging::init`] installs the test subscriber once per binary.
//! - [`unique_str`] and [`scratch_dir`] keep file-producing tests isolated
//!   from each other and from earlier runs.

use std::path::PathBuf;

use ulid::Ulid;

pub mod logging;

/// Generate a unique string with the given prefix
///
/// # Examples
/// ```
/// use test_support::unique_str;
///
/// let id1 = unique_str("sim");
/// let id2 = unique_str("sim");
/// assert_ne!(id1, id2);
/// assert!(id1.starts_with("sim-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// A fresh, not yet created directory path under the system temp dir.
pub fn scratch_dir(prefix: &str) -> PathBuf {
    std::env::temp_dir().join(unique_str(prefix))
}
