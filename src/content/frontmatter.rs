//! Frontmatter splitting for document modules.

use crate::error::MetadataError;

/// Delimiter types for frontmatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontmatterFormat {
    /// YAML frontmatter delimited by `---`.
    Yaml,
    /// TOML frontmatter delimited by `+++`.
    Toml,
}

impl FrontmatterFormat {
    pub fn delimiter(&self) -> &'static str {
        match self {
            Self::Yaml => "---",
            Self::Toml => "+++",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Toml => "toml",
        }
    }
}

/// Split a document into its frontmatter block and body.
///
/// Delimiters must sit on their own line. `Ok(None)` means the document has no
/// frontmatter at all; an opening delimiter without a closing one is an error.
pub fn split_frontmatter(content: &str) -> Result<Option<(FrontmatterFormat, &str, &str)>, MetadataError> {
    let content = content.trim_start_matches('\u{feff}').trim_start();
    let (first, rest) = content.split_once('\n').unwrap_or((content, ""));

    let format = match first.trim_end() {
        "---" => FrontmatterFormat::Yaml,
        "+++" => FrontmatterFormat::Toml,
        _ => return Ok(None),
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == format.delimiter() {
            let frontmatter = &rest[..offset];
            let body = rest[offset + line.len()..].trim_start();
            return Ok(Some((format, frontmatter, body)));
        }
        offset += line.len();
    }

    Err(MetadataError::parse(format.name(), "closing delimiter is missing"))
}
