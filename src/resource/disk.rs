use crate::error::{PackBoxError, Result};
use crate::paths;
use crate::resource::ResourceBox;
use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A directory on disk served as a box.
///
/// This is the "development mode" of embedded assets: the files are read from
/// their source folder at runtime instead of being compiled in.
#[derive(Debug, Clone)]
pub struct DirBox {
    name: String,
    root: PathBuf,
}

impl DirBox {
    /// Open `root` as a box named after its final path component.
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = paths::absolute(root)?;

        if !root.is_dir() {
            return Err(PackBoxError::io(
                &root,
                std::io::Error::new(std::io::ErrorKind::NotFound, "box root is not a directory"),
            ));
        }

        let name = root
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| root.display().to_string());

        Ok(Self { name, root })
    }

    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ResourceBox for DirBox {
    fn name(&self) -> &str {
        &self.name
    }

    fn find(&self, name: &str) -> Result<Cow<'_, [u8]>> {
        // names that would leave the root simply aren't in the box
        let relative = paths::resource_path(name).map_err(|_| PackBoxError::not_found(name))?;
        let path = self.root.join(relative);

        if !path.is_file() {
            return Err(PackBoxError::not_found(name));
        }

        match fs::read(&path) {
            Ok(bytes) => Ok(Cow::Owned(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(PackBoxError::not_found(name)),
            Err(e) => Err(PackBoxError::io(&path, e)),
        }
    }

    fn list(&self) -> Vec<String> {
        let mut names: Vec<String> = WalkDir::new(&self.root)
            .follow_links(false)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                let relative = entry.path().strip_prefix(&self.root).ok()?;
                let parts: Vec<String> = relative
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy().to_string())
                    .collect();
                Some(parts.join("/"))
            })
            .collect();

        names.sort();
        names
    }

    fn has(&self, name: &str) -> bool {
        paths::resource_path(name)
            .map(|relative| self.root.join(relative).is_file())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_box() -> (TempDir, DirBox) {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.txt"), "hello").unwrap();
        fs::create_dir_all(temp_dir.path().join("css")).unwrap();
        fs::write(temp_dir.path().join("css").join("site.css"), "body {}").unwrap();

        let resources = DirBox::new(temp_dir.path()).unwrap();
        (temp_dir, resources)
    }

    #[test]
    fn test_dir_box_creation() {
        let (temp_dir, resources) = create_test_box();
        assert!(resources.root().is_absolute());
        assert_eq!(
            resources.name(),
            temp_dir.path().file_name().unwrap().to_string_lossy()
        );

        let renamed = resources.with_name("assets");
        assert_eq!(renamed.name(), "assets");
    }

    #[test]
    fn test_missing_root_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = DirBox::new(temp_dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, PackBoxError::Io { .. }));
    }

    #[test]
    fn test_find_reads_files() {
        let (_temp_dir, resources) = create_test_box();
        assert_eq!(resources.find("a.txt").unwrap().as_ref(), b"hello");
        assert_eq!(resources.find("css/site.css").unwrap().as_ref(), b"body {}");
    }

    #[test]
    fn test_find_missing_and_escaping_names() {
        let (_temp_dir, resources) = create_test_box();
        assert!(resources.find("missing.txt").unwrap_err().is_not_found());
        assert!(resources.find("css").unwrap_err().is_not_found());
        assert!(resources.find("../a.txt").unwrap_err().is_not_found());
        assert!(!resources.has("/etc/passwd"));
    }

    #[test]
    fn test_has_checks_files_only() {
        let (_temp_dir, resources) = create_test_box();
        assert!(resources.has("a.txt"));
        assert!(resources.has("./css/site.css"));
        assert!(!resources.has("css"));
        assert!(!resources.has("missing.txt"));
        assert!(!resources.has("../a.txt"));
    }

    #[test]
    fn test_list_is_sorted_and_slash_separated() {
        let (_temp_dir, resources) = create_test_box();
        assert_eq!(resources.list(), vec!["a.txt", "css/site.css"]);
    }
}
