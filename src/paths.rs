use crate::error::{PackBoxError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

/// Mode used for every directory packbox creates.
#[cfg(unix)]
pub const DIR_MODE: u32 = 0o755;

/// Resolve `path` against the current directory and drop `.`/`..` components
/// lexically. Symlinks are not resolved, so the target need not exist.
pub fn absolute<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
    let path = path.as_ref();
    let joined = std::path::absolute(path).map_err(|e| PackBoxError::io(path, e))?;

    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `pop` on the root is a no-op, matching `/..` == `/`
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }

    Ok(normalized)
}

/// Turn a resource name into a relative path that cannot leave its root.
pub fn resource_path(name: &str) -> Result<PathBuf> {
    let invalid = |reason: &str| PackBoxError::InvalidName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if name.trim().is_empty() {
        return Err(invalid("name is empty"));
    }

    let mut relative = PathBuf::new();
    for component in Path::new(name).components() {
        match component {
            Component::Normal(part) => relative.push(part),
            Component::CurDir => {}
            Component::ParentDir => return Err(invalid("parent directory references are not allowed")),
            Component::RootDir | Component::Prefix(_) => {
                return Err(invalid("absolute names are not allowed"))
            }
        }
    }

    if relative.as_os_str().is_empty() {
        return Err(invalid("name does not refer to a file"));
    }

    Ok(relative)
}

/// `create_dir_all` with [`DIR_MODE`] applied on Unix.
pub fn create_dir_all<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(DIR_MODE);
    }

    builder.create(path).map_err(|e| PackBoxError::io(path, e))
}

/// Recursively remove the directory at `path`. Creates nothing.
///
/// A path that does not exist, including one whose ancestor is a regular
/// file, counts as already removed.
pub fn remove_dir_all<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();

    match fs::symlink_metadata(path) {
        Ok(_) => {}
        Err(e) if is_absent(&e) => return Ok(()),
        Err(e) => return Err(PackBoxError::io(path, e)),
    }

    match fs::remove_dir_all(path) {
        Ok(()) => Ok(()),
        // raced with another remover
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(PackBoxError::io(path, e)),
    }
}

fn is_absent(error: &std::io::Error) -> bool {
    matches!(error.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory)
}
