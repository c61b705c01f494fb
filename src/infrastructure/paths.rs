//! Filesystem locations for favorites storage and trace files.

use std::path::PathBuf;

/// File name of the durable key-value store inside the data directory.
pub const STORAGE_FILE: &str = "storage.json";

/// File name of the exported trace log inside the data directory.
pub const TRACE_FILE: &str = "bookshelf-otlp.json";

/// Platform data directory for bookshelf.
///
/// `~/.local/share/bookshelf` on Linux, the matching application-support
/// directory elsewhere. Falls back to `./bookshelf_data` when no home directory
/// can be determined.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "bookshelf")
        .map_or_else(|| PathBuf::from("bookshelf_data"), |dirs| dirs.data_dir().to_path_buf())
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a leading `~`, and all paths when no home directory is known,
/// are returned unchanged.
///
/// # Examples
///
/// ```
/// use bookshelf::infrastructure::expand_tilde;
/// use std::path::PathBuf;
///
/// assert_eq!(expand_tilde("/absolute/path"), PathBuf::from("/absolute/path"));
/// assert_eq!(expand_tilde("~user/x"), PathBuf::from("~user/x"));
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    let rest = if path == "~" {
        Some("")
    } else {
        path.strip_prefix("~/")
    };

    match (rest, directories::BaseDirs::new()) {
        (Some(rest), Some(base)) => base.home_dir().join(rest),
        _ => PathBuf::from(path),
    }
}

/// The configured data directory with `~` expanded, or the platform default.
#[must_use]
pub fn resolve_data_dir(configured: Option<&str>) -> PathBuf {
    configured
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map_or_else(get_data_dir, expand_tilde)
}
