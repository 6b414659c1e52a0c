//! Article page extraction.
//!
//! Turns one article page into an [`ArticleRecord`]:
//!
//! | Field | Source | Fallback |
//! |-------|--------|----------|
//! | title | first `<h1>` | the article URL when the page has no `<h1>` |
//! | description | `og:description` meta, then `description` meta, then body paragraphs | empty |
//! | pub_date | `article:published_time` meta | none |
//!
//! The summary and the full body are deliberately merged into the single
//! `description` field so that each feed item carries the complete text.

use crate::dom::{Document, Element, Matcher};
use crate::models::ArticleRecord;
use tracing::{debug, instrument};

const HEADLINE: Matcher = Matcher::Tag("h1");
const PARAGRAPH: Matcher = Matcher::Tag("p");

const OG_DESCRIPTION: Matcher = Matcher::TagWithAttrValue {
    tag: "meta",
    attr: "property",
    value: "og:description",
};
const META_DESCRIPTION: Matcher = Matcher::TagWithAttrValue {
    tag: "meta",
    attr: "name",
    value: "description",
};
const PUBLISHED_TIME: Matcher = Matcher::TagWithAttrValue {
    tag: "meta",
    attr: "property",
    value: "article:published_time",
};

/// Containers that hold the article body, most specific first.
pub const BODY_CONTAINERS: [Matcher; 4] = [
    Matcher::Tag("article"),
    Matcher::Class("article-body"),
    Matcher::Class("news-content"),
    Matcher::Class("content"),
];

/// Extract an [`ArticleRecord`] from an article page.
///
/// Never fails: every missing element degrades to a fallback value.
///
/// # Arguments
///
/// * `html` - The article page markup
/// * `url` - The URL the page was fetched from; becomes the record link
#[instrument(level = "debug", skip(html))]
pub fn extract_article(html: &str, url: &str) -> ArticleRecord {
    let document = Document::parse(html);

    let title = extract_title(&document).unwrap_or_else(|| url.to_string());
    let summary = extract_summary(&document);
    let body = extract_body(&document);
    let description = format!("{summary}\n{body}").trim().to_string();
    let pub_date = meta_content(&document, &PUBLISHED_TIME).map(str::to_string);

    debug!(
        %title,
        summary_bytes = summary.len(),
        body_bytes = body.len(),
        has_pub_date = pub_date.is_some(),
        "Extracted article"
    );

    ArticleRecord {
        title,
        link: url.to_string(),
        description,
        pub_date,
    }
}

/// Text of the first headline, even when it is blank.
fn extract_title(document: &Document) -> Option<String> {
    document.find(&HEADLINE).map(|h1| h1.text())
}

/// `og:description`, else the plain `description` meta, else empty.
///
/// The first `og:description` tag wins even when its content is empty.
fn extract_summary(document: &Document) -> String {
    document
        .find(&OG_DESCRIPTION)
        .or_else(|| document.find(&META_DESCRIPTION))
        .and_then(|meta| meta.attr("content"))
        .unwrap_or_default()
        .to_string()
}

/// Paragraph texts of the first body container, one per line.
fn extract_body(document: &Document) -> String {
    document
        .first_of(&BODY_CONTAINERS)
        .map(paragraphs)
        .unwrap_or_default()
}

fn paragraphs(container: Element<'_>) -> String {
    container
        .find_all(&PARAGRAPH)
        .map(|p| p.text())
        .collect::<Vec<_>>()
        .join("\n")
}

fn meta_content<'a>(document: &'a Document, matcher: &Matcher) -> Option<&'a str> {
    document
        .find(matcher)
        .and_then(|meta| meta.attr("content"))
        .filter(|content| !content.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const URL: &str = "https://www.ilgazzettino.it/nordest/venezia/acqua_alta-1234.html";

    #[test]
    fn test_full_article_page() {
        let html = r#"
            <html><head>
                <meta property="og:description" content="Marea a 120 centimetri">
                <meta property="article:published_time" content="2024-11-03T08:15:00+01:00">
            </head><body>
                <article>
                    <h1>Acqua alta a Venezia</h1>
                    <p>La marea ha raggiunto il picco alle 9.</p>
                    <p>Il Mose è stato <b>attivato</b>.</p>
                </article>
            </body></html>
        "#;
        let record = extract_article(html, URL);

        assert_eq!(record.title, "Acqua alta a Venezia");
        assert_eq!(record.link, URL);
        assert_eq!(
            record.description,
            "Marea a 120 centimetri\nLa marea ha raggiunto il picco alle 9.\nIl Mose è stato attivato."
        );
        assert_eq!(record.pub_date.as_deref(), Some("2024-11-03T08:15:00+01:00"));
    }

    #[test]
    fn test_missing_headline_falls_back_to_url() {
        let html = "<html><body><p>Solo testo</p></body></html>";
        let record = extract_article(html, URL);
        assert_eq!(record.title, URL);
    }

    #[test]
    fn test_blank_headline_gives_empty_title() {
        let html = "<html><body><h1>   </h1></body></html>";
        assert_eq!(extract_article(html, URL).title, "");
    }

    #[test]
    fn test_first_headline_wins_even_when_blank() {
        let html = "<html><body><h1></h1><h1>Secondo titolo</h1></body></html>";
        assert_eq!(extract_article(html, URL).title, "");
    }

    #[test]
    fn test_description_and_body_are_combined() {
        let html = r#"
            <html><head><meta name="description" content="D"></head>
            <body><article><p>A</p><p>B</p></article></body></html>
        "#;
        assert_eq!(extract_article(html, URL).description, "D\nA\nB");
    }

    #[test]
    fn test_og_description_preferred_over_meta_description() {
        let html = r#"
            <html><head>
                <meta name="description" content="generica">
                <meta property="og:description" content="social">
            </head><body></body></html>
        "#;
        assert_eq!(extract_article(html, URL).description, "social");
    }

    #[test]
    fn test_body_only_when_no_meta_description() {
        let html = "<html><body><article><p>Corpo</p></article></body></html>";
        assert_eq!(extract_article(html, URL).description, "Corpo");
    }

    #[test]
    fn test_body_container_priority() {
        let html = r#"
            <html><body>
                <div class="content"><p>Sidebar</p></div>
                <div class="article-body"><p>Testo vero</p></div>
            </body></html>
        "#;
        assert_eq!(extract_article(html, URL).description, "Testo vero");
    }

    #[test]
    fn test_news_content_container() {
        let html = r#"<div class="news-content"><p>Uno</p><div><p>Due</p></div></div>"#;
        assert_eq!(extract_article(html, URL).description, "Uno\nDue");
    }

    #[test]
    fn test_paragraphs_outside_containers_are_ignored() {
        let html = "<html><body><p>Fuori</p><div><p>Ancora fuori</p></div></body></html>";
        assert_eq!(extract_article(html, URL).description, "");
    }

    #[test]
    fn test_missing_pub_date_is_none() {
        let html = r#"<meta property="article:published_time" content="">"#;
        assert_eq!(extract_article(html, URL).pub_date, None);
        assert_eq!(extract_article("<html></html>", URL).pub_date, None);
    }

    #[test]
    fn test_malformed_html_degrades_gracefully() {
        let html = "<h1>Titolo <p>non chiuso <article><p>testo";
        let record = extract_article(html, URL);
        assert!(record.title.starts_with("Titolo"));
        assert_eq!(record.link, URL);
    }
}
