//! Post discovery, filtering and ordering.
//!
//! Posts come from two sources: documents carrying their metadata in a
//! frontmatter block, and component pages exporting a `PostData` object. Both
//! are merged into `PostItem`s, filtered with the same policy and returned most
//! recent first.

use std::fmt;

use futures::future::try_join_all;
use spdlog::{debug, info, warn};

use crate::config::{Discovery, MalformedPolicy};
use crate::content::route::derive_url;
use crate::content::{PostItem, PostMeta};
use crate::error::{ContentError, MetadataError, Result};
use crate::query_string::QueryString;
use crate::source::{ContentSource, GlobPattern, ModuleExport};

/// A caller supplied predicate over posts.
pub type PostFilter<'f> = dyn Fn(&PostItem) -> bool + Sync + 'f;

/// The request a listing is rendered for.
#[derive(Debug, Clone)]
pub struct PostParams {
    url: String,
    query: QueryString,
}

impl PostParams {
    /// Accepts absolute or root relative urls, `/posts?series=rust&page=2`.
    pub fn from_url(url: &str) -> Self {
        let without_fragment = url.split('#').next().unwrap_or_default();
        let query = without_fragment.split_once('?').map_or("", |(_, query)| query);
        PostParams {
            url: url.to_string(),
            query: QueryString::from(query),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn series(&self) -> Option<&str> {
        self.query.get("series")
    }

    pub fn page(&self) -> u32 {
        self.query.get_page()
    }
}

/// How the built-in filters and a custom filter combine.
#[derive(Clone, Copy)]
pub enum FilterMode<'f> {
    /// Draft exclusion and series match only
    BuiltIn,
    /// Built-in filters AND the custom filter
    Additive(&'f PostFilter<'f>),
    /// The custom filter alone, drafts and series are not looked at
    Custom(&'f PostFilter<'f>),
}

impl<'f> FilterMode<'f> {
    pub fn new(filter_function: Option<&'f PostFilter<'f>>, additive_filter: Option<bool>) -> Self {
        match (filter_function, additive_filter.unwrap_or(false)) {
            (None, _) => FilterMode::BuiltIn,
            (Some(filter), true) => FilterMode::Additive(filter),
            (Some(filter), false) => FilterMode::Custom(filter),
        }
    }

    fn keep(&self, built_in: &BuiltInFilter, post: &PostItem) -> bool {
        match self {
            FilterMode::BuiltIn => built_in.keep(post),
            FilterMode::Additive(filter) => built_in.keep(post) && filter(post),
            FilterMode::Custom(filter) => filter(post),
        }
    }
}

struct BuiltInFilter<'p> {
    series: Option<&'p str>,
}

impl<'p> BuiltInFilter<'p> {
    fn from_params(params: &'p PostParams) -> Self {
        BuiltInFilter {
            series: params.series(),
        }
    }

    fn keep(&self, post: &PostItem) -> bool {
        if post.meta.draft {
            return false;
        }
        match self.series {
            Some(series) => post.meta.series.as_deref() == Some(series),
            None => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DiagnosticKind {
    MissingExport { export: String },
    Malformed(MetadataError),
}

/// A module that was skipped, and why.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub key: String,
    pub kind: DiagnosticKind,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DiagnosticKind::MissingExport { export } => write!(f, "{} not found in {}", export, self.key),
            DiagnosticKind::Malformed(reason) => write!(f, "{}: {}", self.key, reason),
        }
    }
}

/// The posts of one aggregation together with the modules it skipped.
#[derive(Debug, Default)]
pub struct Collection {
    pub posts: Vec<PostItem>,
    pub diagnostics: Vec<Diagnostic>,
}

pub struct Aggregator<D, P> {
    documents: D,
    pages: P,
    discovery: Discovery,
    document_pattern: GlobPattern,
    page_pattern: GlobPattern,
}

impl<D: ContentSource, P: ContentSource> Aggregator<D, P> {
    pub fn new(documents: D, pages: P, discovery: Discovery) -> Result<Self> {
        let document_pattern = GlobPattern::new(&discovery.document_pattern)?;
        let page_pattern = GlobPattern::new(&discovery.page_pattern)?;
        Ok(Aggregator {
            documents,
            pages,
            discovery,
            document_pattern,
            page_pattern,
        })
    }

    pub fn discovery(&self) -> &Discovery {
        &self.discovery
    }

    /// Every post visible under `params`, most recent first.
    ///
    /// Without `filter_function` only the built-in filters apply. With it, the
    /// built-in filters are kept only when `additive_filter` is `Some(true)`.
    pub async fn get_filtered_posts(
        &self,
        params: &PostParams,
        filter_function: Option<&PostFilter<'_>>,
        additive_filter: Option<bool>,
    ) -> Result<Vec<PostItem>> {
        let mode = FilterMode::new(filter_function, additive_filter);
        Ok(self.collect(params, mode).await?.posts)
    }

    pub async fn collect(&self, params: &PostParams, mode: FilterMode<'_>) -> Result<Collection> {
        let built_in = BuiltInFilter::from_params(params);
        let mut collection = Collection::default();

        let documents = Self::load_all(&self.documents, &self.document_pattern).await?;
        for (key, export) in documents {
            self.admit(key, export, mode, &built_in, &mut collection)?;
        }

        let pages = Self::load_all(&self.pages, &self.page_pattern).await?;
        for (key, export) in pages {
            self.admit(key, export, mode, &built_in, &mut collection)?;
        }

        collection.posts.sort_by(|a, b| {
            b.meta.date.cmp(&a.meta.date)
                .then_with(|| a.url.cmp(&b.url))
        });

        info!("Listed {} posts for {} ({} modules skipped)",
            collection.posts.len(), params.url(), collection.diagnostics.len());

        Ok(collection)
    }

    /// Loads every module matching `pattern` concurrently, keeping key order.
    async fn load_all<S: ContentSource>(source: &S, pattern: &GlobPattern) -> Result<Vec<(String, ModuleExport)>> {
        let keys = source.enumerate(pattern);
        debug!("{} modules match {}", keys.len(), pattern.as_str());

        let exports = try_join_all(keys.iter().map(|key| source.load(key))).await?;
        Ok(keys.into_iter().zip(exports).collect())
    }

    fn admit(
        &self,
        key: String,
        export: ModuleExport,
        mode: FilterMode<'_>,
        built_in: &BuiltInFilter,
        collection: &mut Collection,
    ) -> Result<()> {
        let raw = match export {
            ModuleExport::Conforming(raw) => raw,
            ModuleExport::MissingExport { export } => {
                warn!("{} not found in {}. Post will be skipped.", export, key);
                collection.diagnostics.push(Diagnostic {
                    key,
                    kind: DiagnosticKind::MissingExport { export },
                });
                return Ok(());
            }
            ModuleExport::Malformed(reason) => return self.malformed(key, reason, collection),
        };

        let url = derive_url(&self.discovery, &key)?;
        let meta = match PostMeta::merge(&url, raw) {
            Ok(meta) => meta,
            Err(reason) => return self.malformed(key, reason, collection),
        };

        let post = PostItem { url, meta };
        if mode.keep(built_in, &post) {
            collection.posts.push(post);
        } else {
            debug!("Filtered out {}", post.url);
        }
        Ok(())
    }

    fn malformed(&self, key: String, reason: MetadataError, collection: &mut Collection) -> Result<()> {
        match self.discovery.malformed {
            MalformedPolicy::Fail => Err(ContentError::malformed(key, reason)),
            MalformedPolicy::Skip => {
                warn!("Malformed metadata in {}: {}. Post will be skipped.", key, reason);
                collection.diagnostics.push(Diagnostic {
                    key,
                    kind: DiagnosticKind::Malformed(reason),
                });
                Ok(())
            }
        }
    }
}
