use crate::error::{PackBoxError, Result};
use crate::resource::ResourceBox;
use std::borrow::Cow;
use std::collections::BTreeMap;

/// In-memory box, mostly useful for tests and programmatically built assets.
#[derive(Debug, Clone, Default)]
pub struct MemoryBox {
    name: String,
    resources: BTreeMap<String, Vec<u8>>,
}

impl MemoryBox {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            resources: BTreeMap::new(),
        }
    }

    pub fn with_resource<S: Into<String>, B: Into<Vec<u8>>>(mut self, name: S, bytes: B) -> Self {
        self.insert(name, bytes);
        self
    }

    /// Store `bytes` under `name`, returning the previous payload if any.
    pub fn insert<S: Into<String>, B: Into<Vec<u8>>>(&mut self, name: S, bytes: B) -> Option<Vec<u8>> {
        self.resources.insert(name.into(), bytes.into())
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

impl ResourceBox for MemoryBox {
    fn name(&self) -> &str {
        &self.name
    }

    fn find(&self, name: &str) -> Result<Cow<'_, [u8]>> {
        self.resources
            .get(name)
            .map(|bytes| Cow::Borrowed(bytes.as_slice()))
            .ok_or_else(|| PackBoxError::not_found(name))
    }

    fn list(&self) -> Vec<String> {
        self.resources.keys().cloned().collect()
    }

    fn has(&self, name: &str) -> bool {
        self.resources.contains_key(name)
    }
}
