//! Filesystem path helpers

use std::path::{Path, PathBuf};

/// Resolve a user-supplied path to an absolute one.
///
/// A leading `~` is replaced with the home directory; anything still
/// relative is anchored at the current working directory. Components are
/// not normalized, so `./a/../b` stays as written under the cwd.
pub fn expand_path(raw: &str) -> PathBuf {
    let raw = raw.trim();
    let path = match raw.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with(['/', '\\']) => match dirs::home_dir() {
            Some(home) => home.join(rest.trim_start_matches(['/', '\\'])),
            None => PathBuf::from(raw),
        },
        _ => PathBuf::from(raw),
    };
    absolutize(&path)
}

fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    match std::env::current_dir() {
        Ok(cwd) if path.as_os_str().is_empty() => cwd,
        Ok(cwd) => cwd.join(path),
        Err(_) => path.to_path_buf(),
    }
}
