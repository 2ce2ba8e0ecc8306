pub mod disk;
pub mod embedded;
pub mod memory;

pub use disk::DirBox;
pub use embedded::EmbeddedBox;
pub use memory::MemoryBox;

use crate::error::Result;
use std::borrow::Cow;

/// A store of named byte payloads, queryable at runtime.
///
/// Names are `/`-separated relative paths. Implementations must be cheap to
/// share behind an `Arc`; the extractor never mutates them.
pub trait ResourceBox: Send + Sync {
    /// Identity used in log fields.
    fn name(&self) -> &str;

    /// Bytes stored under `name`, or [`PackBoxError::NotFound`](crate::PackBoxError::NotFound).
    fn find(&self, name: &str) -> Result<Cow<'_, [u8]>>;

    /// Every resource name, sorted.
    fn list(&self) -> Vec<String>;

    fn has(&self, name: &str) -> bool {
        self.find(name).is_ok()
    }
}

impl std::fmt::Debug for dyn ResourceBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceBox")
            .field("name", &self.name())
            .finish()
    }
}
