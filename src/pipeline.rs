//! The feed generation run, end to end.
//!
//! ```text
//! fetch index ─► discover links ─► (fetch article ─► extract)* ─► build feed ─► write
//! ```
//!
//! Everything runs sequentially on one task. A failure to fetch the index page
//! aborts the run; a failure on any single article is logged and that article
//! is left out of the feed.

use crate::config::Config;
use crate::fetcher::Fetch;
use crate::models::ArticleRecord;
use crate::outputs::rss::{build_feed, render_rss, write_feed};
use crate::scrapers::article::extract_article;
use crate::scrapers::discovery::discover_links;
use crate::utils::truncate_for_log;
use chrono::{DateTime, Utc};
use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, instrument, warn};

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Links found on the index page.
    pub discovered: usize,
    /// Articles that made it into the feed.
    pub extracted: usize,
    /// Articles skipped because they could not be fetched.
    pub failed: usize,
    /// Where the feed was written.
    pub output: PathBuf,
}

/// Run the whole pipeline once and write the feed to `config.output_path`.
///
/// # Arguments
///
/// * `config` - Run configuration
/// * `fetcher` - Page source used for the index and every article
/// * `built_at` - Timestamp recorded as the feed build date
///
/// # Errors
///
/// Returns an error if the index page cannot be fetched, or if the feed
/// cannot be rendered or written. Per-article failures are not errors.
#[instrument(level = "info", skip_all, fields(base = %config.base_url))]
pub async fn run<F: Fetch>(
    config: &Config,
    fetcher: &F,
    built_at: DateTime<Utc>,
) -> Result<RunReport, Box<dyn Error>> {
    info!("Fetching index page");
    let index_html = fetcher.fetch_text(config.base_url.as_str()).await?;

    let links = discover_links(&index_html, &config.base_url, config.max_links);
    info!(count = links.len(), "Found article links");

    let records = collect_articles(fetcher, &links, config.request_delay).await;

    let feed = build_feed(config, records);
    if feed.is_empty() {
        warn!("No articles extracted; writing an empty feed");
    }
    let extracted = feed.len();
    let xml = render_rss(&feed, built_at)?;
    write_feed(&xml, &config.output_path).await?;

    Ok(RunReport {
        discovered: links.len(),
        extracted,
        failed: links.len() - extracted,
        output: config.output_path.clone(),
    })
}

/// Fetch and extract every link in order, skipping the ones that fail.
///
/// Waits `delay` between consecutive fetches, whatever the outcome of the
/// previous one.
#[instrument(level = "info", skip_all, fields(total = links.len()))]
pub async fn collect_articles<F: Fetch>(
    fetcher: &F,
    links: &[String],
    delay: Duration,
) -> Vec<ArticleRecord> {
    let total = links.len();
    let mut records = Vec::with_capacity(total);

    for (i, link) in links.iter().enumerate() {
        if i > 0 && !delay.is_zero() {
            sleep(delay).await;
        }
        info!("({}/{}) {}", i + 1, total, link);

        match fetcher.fetch_text(link).await {
            Ok(html) => {
                let record = extract_article(&html, link);
                debug!(
                    %link,
                    title = %record.title,
                    preview = %truncate_for_log(&record.description, 120),
                    "Extracted article"
                );
                records.push(record);
            }
            Err(e) => {
                error!(error = %e, %link, "Article fetch failed; skipping");
            }
        }
    }

    info!(
        total,
        extracted = records.len(),
        failed = total - records.len(),
        "Finished fetching articles"
    );
    records
}
