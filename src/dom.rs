//! A small, parser-agnostic view over an HTML document.
//!
//! The scraping code never touches `scraper` types directly. It works with a
//! [`Document`] made of [`Element`]s (tag name, attributes, descendants, text)
//! and selects elements with [`Matcher`] predicates. Selection with several
//! candidates is an explicit priority list: the first matcher that finds
//! anything wins.

use crate::utils::normalize_whitespace;
use scraper::{ElementRef, Html};

/// A structural predicate over a single element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    /// Element with the given tag name, e.g. `article`.
    Tag(&'static str),
    /// Any element carrying the given class, e.g. `.article-body`.
    Class(&'static str),
    /// Element with the given tag that has the attribute at all, e.g. `a[href]`.
    TagWithAttr {
        tag: &'static str,
        attr: &'static str,
    },
    /// Element with the given tag whose attribute equals `value` exactly,
    /// e.g. `meta[property="og:description"]`.
    TagWithAttrValue {
        tag: &'static str,
        attr: &'static str,
        value: &'static str,
    },
}

impl Matcher {
    pub fn matches(&self, element: &Element<'_>) -> bool {
        match *self {
            Matcher::Tag(tag) => element.tag() == tag,
            Matcher::Class(class) => element.has_class(class),
            Matcher::TagWithAttr { tag, attr } => {
                element.tag() == tag && element.attr(attr).is_some()
            }
            Matcher::TagWithAttrValue { tag, attr, value } => {
                element.tag() == tag && element.attr(attr) == Some(value)
            }
        }
    }
}

/// A parsed HTML page.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parse a full HTML document. Parsing is lenient and never fails.
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    /// Every element of the document, in document order.
    pub fn elements(&self) -> impl Iterator<Item = Element<'_>> {
        Element(self.html.root_element()).descendants()
    }

    /// Every element matching `matcher`, in document order.
    pub fn find_all<'a>(&'a self, matcher: &'a Matcher) -> impl Iterator<Item = Element<'a>> {
        self.elements().filter(move |e| matcher.matches(e))
    }

    /// The first element matching `matcher`.
    pub fn find(&self, matcher: &Matcher) -> Option<Element<'_>> {
        self.elements().find(|e| matcher.matches(e))
    }

    /// The first element found by the earliest matcher in `priority` that
    /// finds anything at all.
    pub fn first_of(&self, priority: &[Matcher]) -> Option<Element<'_>> {
        priority.iter().find_map(|m| self.find(m))
    }
}

/// A single element node borrowed from a [`Document`].
#[derive(Debug, Clone, Copy)]
pub struct Element<'a>(ElementRef<'a>);

impl<'a> Element<'a> {
    /// Lowercase tag name.
    pub fn tag(&self) -> &'a str {
        self.0.value().name()
    }

    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.0.value().attr(name)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.0.value().classes().any(|c| c == class)
    }

    /// Visible text of the element and its descendants, with whitespace runs
    /// collapsed to a single space and the ends trimmed.
    pub fn text(&self) -> String {
        normalize_whitespace(&self.0.text().collect::<String>())
    }

    /// This element followed by all of its descendant elements, in document order.
    pub fn descendants(self) -> impl Iterator<Item = Element<'a>> {
        self.0.descendants().filter_map(ElementRef::wrap).map(Element)
    }

    /// Descendant elements (excluding `self`) matching `matcher`.
    pub fn find_all(self, matcher: &Matcher) -> impl Iterator<Item = Element<'a>> {
        self.descendants()
            .skip(1)
            .filter(move |e| matcher.matches(e))
    }

    /// Whether any enclosing element matches `matcher`.
    pub fn has_ancestor(&self, matcher: &Matcher) -> bool {
        self.0
            .ancestors()
            .filter_map(ElementRef::wrap)
            .map(Element)
            .any(|e| matcher.matches(&e))
    }
}
