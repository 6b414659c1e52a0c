//! RSS 2.0 feed generation.
//!
//! Serializes a [`FeedDocument`] to a pretty-printed UTF-8 RSS 2.0 document:
//!
//! ```text
//! <?xml version="1.0" encoding="UTF-8"?>
//! <rss version="2.0">
//!   <channel>
//!     <title/> <link/> <description/> <language/>
//!     <lastBuildDate/> <generator/> <docs/>
//!     <item>
//!       <guid isPermaLink="false"/> <title/> <link/> <description/> <pubDate/>
//!     </item>
//!   </channel>
//! </rss>
//! ```
//!
//! Items appear in the order the articles were discovered.

use crate::config::Config;
use crate::models::{ArticleRecord, ChannelInfo, FeedDocument};
use chrono::{DateTime, Utc};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::error::Error;
use std::io::Write;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

const RSS_DOCS: &str = "http://www.rssboard.org/rss-specification";
const GENERATOR: &str = concat!("gazzettino_rss ", env!("CARGO_PKG_VERSION"));

/// Aggregate extracted articles into a feed with the configured channel metadata.
pub fn build_feed(config: &Config, items: Vec<ArticleRecord>) -> FeedDocument {
    let channel = ChannelInfo {
        title: config.feed_title.clone(),
        link: config.base_url.to_string(),
        description: config.feed_description.clone(),
        language: config.feed_language.clone(),
    };
    FeedDocument::new(channel, items)
}

/// Serialize `feed` to an RSS 2.0 XML string.
///
/// # Arguments
///
/// * `feed` - The channel metadata and items to serialize
/// * `built_at` - Timestamp written as the channel `lastBuildDate`
pub fn render_rss(feed: &FeedDocument, built_at: DateTime<Utc>) -> Result<String, Box<dyn Error>> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut rss = BytesStart::new("rss");
    rss.push_attribute(("version", "2.0"));
    writer.write_event(Event::Start(rss))?;
    writer.write_event(Event::Start(BytesStart::new("channel")))?;

    let channel = &feed.channel;
    write_text_element(&mut writer, "title", &channel.title)?;
    write_text_element(&mut writer, "link", &channel.link)?;
    write_text_element(&mut writer, "description", &channel.description)?;
    write_text_element(&mut writer, "language", &channel.language)?;
    write_text_element(&mut writer, "lastBuildDate", &built_at.to_rfc2822())?;
    write_text_element(&mut writer, "generator", GENERATOR)?;
    write_text_element(&mut writer, "docs", RSS_DOCS)?;

    for item in &feed.items {
        write_item(&mut writer, item)?;
    }

    writer.write_event(Event::End(BytesEnd::new("channel")))?;
    writer.write_event(Event::End(BytesEnd::new("rss")))?;

    let mut xml = String::from_utf8(writer.into_inner())?;
    xml.push('\n');
    Ok(xml)
}

fn write_item<W: Write>(writer: &mut Writer<W>, item: &ArticleRecord) -> Result<(), Box<dyn Error>> {
    writer.write_event(Event::Start(BytesStart::new("item")))?;

    let mut guid = BytesStart::new("guid");
    guid.push_attribute(("isPermaLink", "false"));
    writer.write_event(Event::Start(guid))?;
    writer.write_event(Event::Text(BytesText::new(&sanitize_text(&item.link))))?;
    writer.write_event(Event::End(BytesEnd::new("guid")))?;

    write_text_element(writer, "title", &item.title)?;
    write_text_element(writer, "link", &item.link)?;
    write_text_element(writer, "description", &item.description)?;
    if let Some(date) = &item.pub_date {
        write_text_element(writer, "pubDate", &format_pub_date(date))?;
    }

    writer.write_event(Event::End(BytesEnd::new("item")))?;
    Ok(())
}

fn write_text_element<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    text: &str,
) -> Result<(), Box<dyn Error>> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(&sanitize_text(text))))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// Drop control characters that XML 1.0 does not allow. Tab, LF and CR stay.
fn sanitize_text(input: &str) -> String {
    input
        .chars()
        .filter(|&c| matches!(c, '\t' | '\n' | '\r') || c >= '\u{20}')
        .collect()
}

/// Render a publish timestamp as RFC 2822, the format RSS expects.
///
/// RFC 3339 / ISO 8601 values with an offset and RFC 2822 values are
/// normalized; anything else is passed through unchanged.
pub fn format_pub_date(raw: &str) -> String {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.to_rfc2822();
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return dt.to_rfc2822();
    }
    raw.to_string()
}

/// Write the rendered feed to `path`, replacing any previous content.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_feed(xml: &str, path: &Path) -> Result<(), Box<dyn Error>> {
    fs::write(path, xml).await?;
    info!(bytes = xml.len(), "Wrote RSS feed");
    Ok(())
}
