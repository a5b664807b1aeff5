//! Config file lookup.

use std::path::{Path, PathBuf};

/// Locate `name`, walking from the working directory towards the root.
///
/// An absolute `name` is only checked where it points.
pub fn find_config_file(name: &Path) -> Option<PathBuf> {
    if name.is_absolute() {
        return name.is_file().then(|| name.to_path_buf());
    }
    let cwd = std::env::current_dir().ok()?;
    cwd.ancestors()
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_file())
}
