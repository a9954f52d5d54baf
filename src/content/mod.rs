use chrono::NaiveDateTime;
use serde::Serialize;

pub mod frontmatter;
pub mod meta;
pub mod route;

/// Metadata of a post once every default has been applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostMeta {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub date: NaiveDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<NaiveDateTime>,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series: Option<String>,
    pub draft: bool,
}

/// A listed post. `url` is root relative and never empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostItem {
    pub url: String,
    #[serde(flatten)]
    pub meta: PostMeta,
}
