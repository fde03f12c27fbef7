use std::path::{Component, Path, PathBuf};

/// Resolves `path` to an absolute path with symlinks, `.` and `..` removed.
///
/// Unlike [`std::fs::canonicalize`] the path does not have to exist: every
/// existing prefix is canonicalized and whatever cannot be resolved is kept
/// lexically. Relative paths are taken relative to the current directory.
pub fn resolve_path(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(path),
            Err(_) => Path::new("/").join(path),
        }
    };

    let mut resolved = PathBuf::from("/");
    for component in absolute.components() {
        match component {
            Component::Prefix(_) | Component::RootDir | Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            Component::Normal(name) => {
                resolved.push(name);
                if let Ok(real) = resolved.canonicalize() {
                    resolved = real;
                }
            }
        }
    }

    resolved
}
