use std::io::ErrorKind;
use std::sync::Arc;

use async_trait::async_trait;

use crate::content::meta::RawPostMeta;
use crate::error::{ContentError, MetadataError, Result};
use crate::source::{ContentSource, GlobPattern, ModuleExport, ModuleRegistry};

/// Component pages (`<dir>/+page.svelte`).
///
/// A page's named exports live in the sibling manifest `<dir>/+page.toml`, one
/// table per export. The post metadata is the table named by `export_name`:
///
/// ```toml
/// [PostData]
/// title = "Interactive sorting"
/// date = 2024-03-01
/// ```
pub struct ComponentSource {
    registry: Arc<ModuleRegistry>,
    export_name: String,
}

impl ComponentSource {
    pub fn new(registry: Arc<ModuleRegistry>, export_name: &str) -> Self {
        ComponentSource {
            registry,
            export_name: export_name.to_string(),
        }
    }
}

#[async_trait]
impl ContentSource for ComponentSource {
    fn enumerate(&self, pattern: &GlobPattern) -> Vec<String> {
        self.registry.glob(pattern)
    }

    async fn load(&self, key: &str) -> Result<ModuleExport> {
        let page = self.registry.resolve(key)
            .ok_or_else(|| ContentError::UnknownModule { key: key.to_string() })?;
        let manifest = page.with_extension("toml");

        let content = match tokio::fs::read_to_string(&manifest).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(self.missing()),
            Err(e) => return Err(ContentError::load_failure(key, e)),
        };

        Ok(component_export(&content, &self.export_name))
    }
}

impl ComponentSource {
    fn missing(&self) -> ModuleExport {
        ModuleExport::MissingExport { export: self.export_name.clone() }
    }
}

/// Reads the export named `export_name` out of a page manifest.
pub fn component_export(manifest: &str, export_name: &str) -> ModuleExport {
    let mut exports: toml::Table = match toml::from_str(manifest) {
        Ok(exports) => exports,
        Err(e) => return ModuleExport::Malformed(MetadataError::parse("toml", e)),
    };

    match exports.remove(export_name) {
        Some(toml::Value::Table(post_data)) => match RawPostMeta::from_toml(post_data) {
            Ok(raw) => ModuleExport::Conforming(raw),
            Err(e) => ModuleExport::Malformed(e),
        },
        // Present but not an object counts as absent
        _ => ModuleExport::MissingExport { export: export_name.to_string() },
    }
}
