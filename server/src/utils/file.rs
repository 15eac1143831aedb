//! File utility functions

use std::path::PathBuf;

/// Expand a leading `~` to the home directory.
///
/// Other paths are returned as given (trimmed). If no home directory is
/// known the path is left untouched.
pub fn expand_path(path: &str) -> PathBuf {
    let path = path.trim();
    let home_relative = match path.strip_prefix('~') {
        Some("") => Some(""),
        Some(rest) => rest.strip_prefix('/').or_else(|| rest.strip_prefix('\\')),
        None => None,
    };

    match (home_relative, dirs::home_dir()) {
        (Some(""), Some(home)) => home,
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
