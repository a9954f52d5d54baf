//! Error types for content discovery.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using `ContentError`.
pub type Result<T> = std::result::Result<T, ContentError>;

/// Errors raised while discovering and loading posts.
#[derive(Error, Debug)]
pub enum ContentError {
    /// The module could not be read at all. Always aborts the aggregation.
    #[error("Error loading module {key}: {source}")]
    LoadFailure {
        key: String,
        #[source]
        source: io::Error,
    },

    /// The module loaded but its metadata cannot become a post.
    #[error("Malformed metadata in {key}: {reason}")]
    MalformedMetadata {
        key: String,
        #[source]
        reason: MetadataError,
    },

    #[error("Module {key} is not registered")]
    UnknownModule { key: String },

    #[error("Module key {key} does not start with {search_location}")]
    InvalidKey { key: String, search_location: String },

    #[error("Invalid glob pattern {pattern}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Error scanning {}: {source}", path.display())]
    Scan {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

impl ContentError {
    pub fn load_failure(key: impl Into<String>, source: io::Error) -> Self {
        Self::LoadFailure {
            key: key.into(),
            source,
        }
    }

    pub fn malformed(key: impl Into<String>, reason: MetadataError) -> Self {
        Self::MalformedMetadata {
            key: key.into(),
            reason,
        }
    }
}

/// Why a loaded metadata export was rejected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MetadataError {
    #[error("date is missing")]
    MissingDate,

    #[error("unparseable date '{0}'")]
    InvalidDate(String),

    #[error("unparseable lastUpdated '{0}'")]
    InvalidLastUpdated(String),

    #[error("invalid {format} metadata: {message}")]
    Parse {
        format: &'static str,
        message: String,
    },
}

impl MetadataError {
    pub fn parse(format: &'static str, message: impl ToString) -> Self {
        Self::Parse {
            format,
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_failure() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err = ContentError::load_failure("./routes/posts/a.mdx", io_err);
        assert_eq!(err.to_string(), "Error loading module ./routes/posts/a.mdx: file not found");
    }

    #[test]
    fn test_malformed() {
        let err = ContentError::malformed("./routes/posts/a.mdx", MetadataError::InvalidDate("soon".to_string()));
        assert_eq!(err.to_string(), "Malformed metadata in ./routes/posts/a.mdx: unparseable date 'soon'");
    }

    #[test]
    fn test_parse_error() {
        let err = MetadataError::parse("yaml", "did not find expected key");
        assert_eq!(err.to_string(), "invalid yaml metadata: did not find expected key");
    }
}
