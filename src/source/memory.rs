use std::collections::BTreeMap;
use std::io;

use async_trait::async_trait;

use crate::error::{ContentError, Result};
use crate::source::component::component_export;
use crate::source::document::document_export;
use crate::source::{ContentSource, GlobPattern, ModuleExport};

enum MemoryModule {
    Loaded(ModuleExport),
    Failing(String),
}

/// A fixed key -> module mapping, for content compiled into the binary.
#[derive(Default)]
pub struct MemorySource {
    modules: BTreeMap<String, MemoryModule>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_export(mut self, key: &str, export: ModuleExport) -> Self {
        self.modules.insert(key.to_string(), MemoryModule::Loaded(export));
        self
    }

    /// Adds a document from its full source text.
    pub fn with_document(self, key: &str, content: &str) -> Self {
        self.with_export(key, document_export(content))
    }

    /// Adds a component page from the text of its manifest.
    pub fn with_page(self, key: &str, manifest: &str, export_name: &str) -> Self {
        self.with_export(key, component_export(manifest, export_name))
    }

    /// Adds a module whose load fails with `message`.
    pub fn with_failing(mut self, key: &str, message: &str) -> Self {
        self.modules.insert(key.to_string(), MemoryModule::Failing(message.to_string()));
        self
    }
}

#[async_trait]
impl ContentSource for MemorySource {
    fn enumerate(&self, pattern: &GlobPattern) -> Vec<String> {
        self.modules.keys()
            .filter(|key| pattern.is_match(key))
            .cloned()
            .collect()
    }

    async fn load(&self, key: &str) -> Result<ModuleExport> {
        match self.modules.get(key) {
            Some(MemoryModule::Loaded(export)) => Ok(export.clone()),
            Some(MemoryModule::Failing(message)) => Err(ContentError::load_failure(
                key, io::Error::new(io::ErrorKind::Other, message.clone()))),
            None => Err(ContentError::UnknownModule { key: key.to_string() }),
        }
    }
}
