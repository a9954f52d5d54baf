use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use crate::content::meta::RawPostMeta;
use crate::error::{MetadataError, Result};

pub mod component;
pub mod document;
pub mod glob;
pub mod memory;
pub mod registry;

pub use component::ComponentSource;
pub use document::DocumentSource;
pub use glob::GlobPattern;
pub use memory::MemorySource;
pub use registry::ModuleRegistry;

/// Outcome of loading a module that could be read.
#[derive(Debug, Clone, PartialEq)]
pub enum ModuleExport {
    /// The module exposes the expected metadata object.
    Conforming(RawPostMeta),
    /// The module loaded but has no export under the well-known name.
    MissingExport { export: String },
    /// The export exists but cannot be read as post metadata.
    Malformed(MetadataError),
}

/// An enumerable set of loadable modules keyed by `./`-prefixed paths.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Keys matching `pattern`, in lexical order.
    fn enumerate(&self, pattern: &GlobPattern) -> Vec<String>;

    /// Loads one module. An `Err` means the module could not be read and aborts
    /// the caller; a module with the wrong shape is reported through `ModuleExport`.
    async fn load(&self, key: &str) -> Result<ModuleExport>;
}

/// Scans `src_dir` once and builds the document and component sources over it.
pub fn filesystem_sources(src_dir: &Path, page_export: &str) -> Result<(DocumentSource, ComponentSource)> {
    let registry = Arc::new(ModuleRegistry::scan(src_dir)?);
    let documents = DocumentSource::new(registry.clone());
    let pages = ComponentSource::new(registry, page_export);
    Ok((documents, pages))
}
