//! # gazzettino_rss
//!
//! Builds a full-text RSS feed for the Nordest section of Il Gazzettino by
//! scraping the site directly.
//!
//! ## Features
//!
//! - Discovers article links on the section index page (capped, deduplicated)
//! - Downloads every article and extracts title, summary, full body and
//!   publish date
//! - Writes a pretty-printed RSS 2.0 document whose items carry the complete
//!   article text
//!
//! ## Usage
//!
//! ```sh
//! gazzettino_rss
//! gazzettino_rss --config gazzettino.yaml --output /var/www/feeds/nordest.xml
//! ```
//!
//! ## Architecture
//!
//! The application is a single sequential pipeline:
//! 1. **Indexing**: Fetch the index page and discover article URLs
//! 2. **Fetching**: Download each article, pausing between requests
//! 3. **Extraction**: Pull title/description/body/date out of each page
//! 4. **Output**: Render the RSS document and overwrite the output file

use chrono::Utc;
use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod dom;
mod fetcher;
mod models;
mod outputs;
mod pipeline;
mod scrapers;
mod utils;

use cli::Cli;
use config::Config;
use fetcher::HttpFetcher;
use utils::ensure_writable_parent;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("gazzettino_rss starting up");

    // Parse CLI
    let args = Cli::parse();
    debug!(?args.config, ?args.output, "Parsed CLI arguments");

    let mut config = match Config::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return Err(e.into());
        }
    };
    if let Some(output) = args.output {
        config = config.with_output_path(output);
    }
    info!(
        base_url = %config.base_url,
        max_links = config.max_links,
        delay = ?config.request_delay,
        timeout = ?config.timeout,
        output = %config.output_path.display(),
        "Configuration ready"
    );

    // Early check: fail before any network work if the feed cannot be written
    if let Err(e) = ensure_writable_parent(&config.output_path).await {
        error!(
            path = %config.output_path.display(),
            error = %e,
            "Output location is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    let fetcher = match HttpFetcher::new(&config) {
        Ok(fetcher) => fetcher,
        Err(e) => {
            error!(error = %e, "Failed to build HTTP client");
            return Err(e.into());
        }
    };

    let report = match pipeline::run(&config, &fetcher, Utc::now()).await {
        Ok(report) => report,
        Err(e) => {
            error!(error = %e, "Feed generation failed");
            return Err(e);
        }
    };
    info!(
        path = %report.output.display(),
        discovered = report.discovered,
        items = report.extracted,
        failed = report.failed,
        "Feed updated"
    );

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
