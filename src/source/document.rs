use std::sync::Arc;

use async_trait::async_trait;

use crate::content::frontmatter::{split_frontmatter, FrontmatterFormat};
use crate::content::meta::RawPostMeta;
use crate::error::{ContentError, MetadataError, Result};
use crate::source::{ContentSource, GlobPattern, ModuleExport, ModuleRegistry};

/// Name of the export documents carry their metadata in.
pub const DOCUMENT_EXPORT: &str = "metadata";

/// Markdown documents whose `metadata` export is the frontmatter block.
pub struct DocumentSource {
    registry: Arc<ModuleRegistry>,
}

impl DocumentSource {
    pub fn new(registry: Arc<ModuleRegistry>) -> Self {
        DocumentSource { registry }
    }
}

#[async_trait]
impl ContentSource for DocumentSource {
    fn enumerate(&self, pattern: &GlobPattern) -> Vec<String> {
        self.registry.glob(pattern)
    }

    async fn load(&self, key: &str) -> Result<ModuleExport> {
        let path = self.registry.resolve(key)
            .ok_or_else(|| ContentError::UnknownModule { key: key.to_string() })?;
        let content = tokio::fs::read_to_string(&path).await
            .map_err(|e| ContentError::load_failure(key, e))?;
        Ok(document_export(&content))
    }
}

/// Reads the metadata export of a document's source text.
pub fn document_export(content: &str) -> ModuleExport {
    let (format, frontmatter) = match split_frontmatter(content) {
        Ok(Some((format, frontmatter, _body))) => (format, frontmatter),
        Ok(None) => return ModuleExport::MissingExport { export: DOCUMENT_EXPORT.to_string() },
        Err(e) => return ModuleExport::Malformed(e),
    };

    let raw = match format {
        FrontmatterFormat::Yaml => RawPostMeta::from_yaml(frontmatter),
        FrontmatterFormat::Toml => toml::from_str::<toml::Table>(frontmatter)
            .map_err(|e| MetadataError::parse("toml", e))
            .and_then(RawPostMeta::from_toml),
    };

    match raw {
        Ok(raw) => ModuleExport::Conforming(raw),
        Err(e) => ModuleExport::Malformed(e),
    }
}

#[cfg(test)]
mod tests {
    use crate::content::meta::DateValue;
    use crate::test_data::{POST_DATA_MDX, POST_DATA_TOML_FRONTMATTER};

    use super::*;

    #[test]
    fn test_yaml_document() {
        let ModuleExport::Conforming(raw) = document_export(POST_DATA_MDX) else {
            panic!("expected metadata");
        };
        assert_eq!(raw.title.as_deref(), Some("Running ERPNext behind Let's Encrypt"));
        assert_eq!(raw.date, Some(DateValue::Text("2023-12-01".to_string())));
        assert_eq!(raw.tags, Some(vec!["erpnext".to_string(), "self-hosting".to_string()]));
    }

    #[test]
    fn test_toml_document() {
        let ModuleExport::Conforming(raw) = document_export(POST_DATA_TOML_FRONTMATTER) else {
            panic!("expected metadata");
        };
        assert_eq!(raw.series.as_deref(), Some("reading-list"));
        assert_eq!(raw.part, Some(3));
        assert!(matches!(raw.date, Some(DateValue::Value(_))));
    }

    #[test]
    fn test_document_without_frontmatter() {
        assert_eq!(
            document_export("# Just a title\n\nNo metadata here."),
            ModuleExport::MissingExport { export: "metadata".to_string() },
        );
    }

    #[test]
    fn test_broken_frontmatter() {
        let export = document_export("---\ntitle: [unclosed\n---\nBody");
        assert!(matches!(export, ModuleExport::Malformed(MetadataError::Parse { format: "yaml", .. })));
    }
}
