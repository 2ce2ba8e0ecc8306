use crate::error::{PackBoxError, Result};
use crate::resource::ResourceBox;
use include_dir::{Dir, DirEntry};
use std::borrow::Cow;
use std::path::Path;

/// Box over a directory compiled into the binary with `include_dir!`.
///
/// ```ignore
/// static ASSETS: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/assets");
/// let resources = EmbeddedBox::new("assets", &ASSETS);
/// ```
#[derive(Debug, Clone)]
pub struct EmbeddedBox {
    name: String,
    dir: &'static Dir<'static>,
}

impl EmbeddedBox {
    pub fn new<S: Into<String>>(name: S, dir: &'static Dir<'static>) -> Self {
        Self {
            name: name.into(),
            dir,
        }
    }
}

impl ResourceBox for EmbeddedBox {
    fn name(&self) -> &str {
        &self.name
    }

    fn find(&self, name: &str) -> Result<Cow<'_, [u8]>> {
        let name = name.trim_start_matches("./");
        self.dir
            .get_file(name)
            .map(|file| Cow::Borrowed(file.contents()))
            .ok_or_else(|| PackBoxError::not_found(name))
    }

    fn list(&self) -> Vec<String> {
        let mut names = Vec::new();
        collect_files(self.dir, &mut names);
        names.sort();
        names
    }
}

fn collect_files(dir: &Dir<'_>, names: &mut Vec<String>) {
    for entry in dir.entries() {
        match entry {
            DirEntry::Dir(sub) => collect_files(sub, names),
            DirEntry::File(file) => names.push(slash_path(file.path())),
        }
    }
}

fn slash_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy().to_string())
        .collect::<Vec<_>>()
        .join("/")
}
