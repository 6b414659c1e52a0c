//! Article link discovery on the index page.
//!
//! Links are collected in two passes over the anchors of the page:
//!
//! 1. Anchors nested inside an `<article>` element, in document order
//! 2. Any anchor whose URL looks like a dated or news/cronaca article path,
//!    only consulted while the cap has not been reached
//!
//! Root-relative hrefs (`/...`) are resolved against the site base URL and only
//! absolute `http(s)` links are kept. The result is deduplicated by exact string
//! match, keeps first-seen order, and never exceeds the configured cap.
//!
//! This is a heuristic: nothing checks that a discovered URL really is an article.

use crate::dom::{Document, Element, Matcher};
use itertools::Itertools;
use tracing::{debug, info, instrument};
use url::Url;

const ANCHOR: Matcher = Matcher::TagWithAttr {
    tag: "a",
    attr: "href",
};
const ARTICLE: Matcher = Matcher::Tag("article");

/// Substrings of the site's URL layout that mark article pages: dated paths
/// (`/2024/...`) and the news/cronaca sections. Matched against the lowercased URL.
pub const FALLBACK_MARKERS: [&str; 3] = ["/20", "/news/", "/cronaca/"];

/// Extract up to `max_links` absolute article URLs from the index page.
///
/// # Arguments
///
/// * `html` - The index page markup
/// * `base` - URL used to resolve root-relative hrefs
/// * `max_links` - Cap on the number of returned links
///
/// # Returns
///
/// The discovered URLs in first-seen order, each at most once. May be empty.
#[instrument(level = "info", skip(html, base), fields(base = %base))]
pub fn discover_links(html: &str, base: &Url, max_links: usize) -> Vec<String> {
    let document = Document::parse(html);
    let anchors: Vec<Element<'_>> = document.find_all(&ANCHOR).collect();

    let in_articles = anchors
        .iter()
        .filter(|a| a.has_ancestor(&ARTICLE))
        .filter_map(|a| resolve_href(a.attr("href")?, base));

    let by_url_shape = anchors
        .iter()
        .filter_map(|a| resolve_href(a.attr("href")?, base))
        .filter(|href| looks_like_article(href));

    let links: Vec<String> = in_articles
        .chain(by_url_shape)
        .unique()
        .take(max_links)
        .collect();

    info!(
        count = links.len(),
        anchors = anchors.len(),
        max_links,
        "Discovered article links"
    );
    debug!(urls = ?links, "Discovered URLs");
    links
}

/// Turn an href into an absolute `http(s)` URL, or `None` if it should be ignored.
///
/// Hrefs starting with `/` are joined onto `base`; hrefs already starting with
/// `http://` or `https://` are kept verbatim. Everything else (fragments,
/// `mailto:`, `javascript:`, page-relative paths) is dropped.
///
/// Resolution follows standard URL joining rather than appending the href to
/// the base string: `/cronaca/x` lands on the site root, not under `/nordest/`,
/// and protocol-relative `//host/path` hrefs keep their own host.
pub fn resolve_href(href: &str, base: &Url) -> Option<String> {
    if href.starts_with('/') {
        let resolved = base.join(href).ok()?;
        return matches!(resolved.scheme(), "http" | "https").then(|| resolved.to_string());
    }
    if href.starts_with("http://") || href.starts_with("https://") {
        return Some(href.to_string());
    }
    None
}

/// Whether `url` matches one of the [`FALLBACK_MARKERS`], ignoring case.
pub fn looks_like_article(url: &str) -> bool {
    let lower = url.to_lowercase();
    FALLBACK_MARKERS.iter().any(|marker| lower.contains(marker))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn base() -> Url {
        Url::parse("https://www.ilgazzettino.it/nordest/").unwrap()
    }

    #[test]
    fn test_article_anchors_in_document_order() {
        let html = r#"
            <article><a href="https://www.ilgazzettino.it/nordest/venezia/a.html">A</a></article>
            <article><a href="https://www.ilgazzettino.it/nordest/treviso/b.html">B</a></article>
        "#;
        let links = discover_links(html, &base(), 50);
        assert_eq!(
            links,
            vec![
                "https://www.ilgazzettino.it/nordest/venezia/a.html".to_string(),
                "https://www.ilgazzettino.it/nordest/treviso/b.html".to_string(),
            ]
        );
    }

    #[test]
    fn test_repeated_hrefs_are_deduplicated() {
        let html = r#"
            <article>
                <a href="https://example.com/x">img</a>
                <a href="https://example.com/x">title</a>
            </article>
            <article><a href="https://example.com/x">again</a></article>
            <a href="https://example.com/2024/x">dated</a>
            <a href="https://example.com/2024/x">dated again</a>
        "#;
        let links = discover_links(html, &base(), 50);
        assert_eq!(
            links,
            vec![
                "https://example.com/x".to_string(),
                "https://example.com/2024/x".to_string(),
            ]
        );
    }

    #[test]
    fn test_cap_is_enforced() {
        let html: String = (0..80)
            .map(|i| format!(r#"<article><a href="/nordest/pezzo-{i}.html">{i}</a></article>"#))
            .collect();
        let links = discover_links(&html, &base(), 50);
        assert_eq!(links.len(), 50);
        assert_eq!(links[0], "https://www.ilgazzettino.it/nordest/pezzo-0.html");
        assert_eq!(links[49], "https://www.ilgazzettino.it/nordest/pezzo-49.html");
    }

    #[test]
    fn test_cap_reached_in_primary_pass_skips_fallback() {
        let html = r#"
            <a href="/cronaca/2024/early">early</a>
            <article><a href="/nordest/a">a</a><a href="/nordest/b">b</a></article>
        "#;
        let links = discover_links(html, &base(), 2);
        assert_eq!(
            links,
            vec![
                "https://www.ilgazzettino.it/nordest/a".to_string(),
                "https://www.ilgazzettino.it/nordest/b".to_string(),
            ]
        );
    }

    #[test]
    fn test_fallback_finds_cronaca_link_without_articles() {
        let html = r#"
            <nav><a href="/privacy">Privacy</a></nav>
            <div class="lista"><a href="/cronaca/2024/x">Notizia</a></div>
        "#;
        let links = discover_links(html, &base(), 50);
        assert_eq!(links, vec!["https://www.ilgazzettino.it/cronaca/2024/x".to_string()]);
    }

    #[test]
    fn test_fallback_runs_after_primary_pass() {
        let html = r#"
            <a href="https://example.com/news/first-in-page">fallback</a>
            <article><a href="https://example.com/sport/primary">primary</a></article>
            <a href="https://example.com/contatti">ignored</a>
        "#;
        let links = discover_links(html, &base(), 50);
        assert_eq!(
            links,
            vec![
                "https://example.com/sport/primary".to_string(),
                "https://example.com/news/first-in-page".to_string(),
            ]
        );
    }

    #[test]
    fn test_non_http_links_are_dropped() {
        let html = r##"
            <article>
                <a href="#top">top</a>
                <a href="mailto:redazione@example.com">mail</a>
                <a href="javascript:void(0)">js</a>
                <a href="relativo/pagina">relative</a>
                <a href="">empty</a>
                <a>no href</a>
            </article>
        "##;
        assert!(discover_links(html, &base(), 50).is_empty());
    }

    #[test]
    fn test_zero_cap_yields_nothing() {
        let html = r#"<article><a href="https://example.com/2024/x">x</a></article>"#;
        assert!(discover_links(html, &base(), 0).is_empty());
    }

    #[test]
    fn test_empty_page_yields_nothing() {
        assert!(discover_links("", &base(), 50).is_empty());
    }

    #[test]
    fn test_resolve_href() {
        assert_eq!(
            resolve_href("/nordest/pordenone/x.html", &base()).as_deref(),
            Some("https://www.ilgazzettino.it/nordest/pordenone/x.html")
        );
        assert_eq!(
            resolve_href("http://example.com/a", &base()).as_deref(),
            Some("http://example.com/a")
        );
        assert_eq!(
            resolve_href("/cronaca/2024/x", &base()).as_deref(),
            Some("https://www.ilgazzettino.it/cronaca/2024/x")
        );
        assert_eq!(
            resolve_href("//cdn.example.com/2024/y", &base()).as_deref(),
            Some("https://cdn.example.com/2024/y")
        );
        assert_eq!(resolve_href("ftp://example.com/a", &base()), None);
        assert_eq!(resolve_href("x.html", &base()), None);
    }

    #[test]
    fn test_looks_like_article_is_case_insensitive() {
        assert!(looks_like_article("https://example.com/NEWS/item"));
        assert!(looks_like_article("https://example.com/Cronaca/item"));
        assert!(looks_like_article("https://example.com/2023/05/item"));
        assert!(!looks_like_article("https://example.com/sport/item"));
    }
}
