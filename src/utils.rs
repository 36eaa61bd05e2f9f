//! Small helpers shared across the toolchain layer and backends.

use std::path::{Component, Path, PathBuf};

/// Expresses `path` relative to `base`, both taken as-is without touching the filesystem.
///
/// The shared prefix is stripped and every remaining `base` component becomes a `..`. When
/// the two are the same path the result is `.`, which is what command lines want.
pub(crate) fn relative_to(path: &Path, base: &Path) -> PathBuf {
    let mut path_components = path.components().peekable();
    let mut base_components = base.components().peekable();

    while let (Some(p), Some(b)) = (path_components.peek(), base_components.peek()) {
        if p != b {
            break;
        }
        path_components.next();
        base_components.next();
    }

    let mut relative = PathBuf::new();
    for component in base_components {
        if component != Component::CurDir {
            relative.push("..");
        }
    }
    for component in path_components {
        relative.push(component);
    }

    if relative.as_os_str().is_empty() {
        relative.push(".");
    }
    relative
}
