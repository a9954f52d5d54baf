pub mod aggregator;
pub mod config;
pub mod content;
pub mod error;
pub mod logger;
pub mod paginator;
pub mod post_list;
pub mod query_string;
pub mod source;
pub mod text_utils;
mod test_data;
mod util;

pub use aggregator::{Aggregator, Collection, Diagnostic, DiagnosticKind, FilterMode, PostFilter, PostParams};
pub use content::{PostItem, PostMeta};
pub use error::{ContentError, MetadataError};
