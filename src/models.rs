//! Data models for scraped articles and the feed built from them.
//!
//! This module defines the core data structures that flow through the pipeline:
//! - [`ArticleRecord`]: One article extracted from its page
//! - [`FeedDocument`]: The channel metadata plus the ordered article entries
//!
//! Nothing here outlives a single run; the only persisted artifact is the
//! serialized feed file.

/// A single article as extracted from its page.
///
/// Built once by the article extractor and consumed by the feed builder.
/// The `link` is the unique key of the record and doubles as the feed `guid`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleRecord {
    /// Headline of the article, or the article URL when no headline was found.
    pub title: String,
    /// Absolute URL the article was fetched from.
    pub link: String,
    /// Summary and full body joined by a newline. May be empty.
    pub description: String,
    /// Raw `article:published_time` value, if the page declared one.
    pub pub_date: Option<String>,
}

/// Channel-level metadata of the generated feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelInfo {
    pub title: String,
    pub link: String,
    pub description: String,
    pub language: String,
}

/// The aggregated output of one run.
///
/// Entries keep the order in which the articles were discovered.
#[derive(Debug, Clone)]
pub struct FeedDocument {
    /// Feed-level metadata written into `<channel>`.
    pub channel: ChannelInfo,
    /// One entry per successfully extracted article.
    pub items: Vec<ArticleRecord>,
}

impl FeedDocument {
    pub fn new(channel: ChannelInfo, items: Vec<ArticleRecord>) -> Self {
        Self { channel, items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
