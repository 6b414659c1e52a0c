//! Scraping of the news site.
//!
//! Scraping follows a two-phase pattern:
//!
//! 1. **Indexing**: [`discovery`] turns the index page into an ordered,
//!    deduplicated, capped list of absolute article URLs
//! 2. **Extraction**: [`article`] turns one article page into an
//!    [`ArticleRecord`](crate::models::ArticleRecord)
//!
//! Both phases are pure functions over HTML text; fetching lives in
//! [`crate::fetcher`] and sequencing in [`crate::pipeline`]. Neither phase
//! fails on odd markup: missing elements simply produce fewer links or
//! empty fields.

pub mod article;
pub mod discovery;
