//! HTML parser for extracting text, title and links
//!
//! This module turns fetched HTML into the three things the crawl engine
//! needs:
//! - The full text content, searched for the keyword
//! - The page title, reported for matching pages
//! - The absolute links to consider for recursion

use crate::url::is_valid_url;
use scraper::{Html, Selector};
use std::collections::BTreeSet;
use url::Url;

/// Extracted information from an HTML page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedPage {
    /// The page title (from the first <title> tag), empty if absent
    pub title: String,

    /// All text content of the document, title included
    pub text: String,

    /// All links found on the page (absolute URLs, sorted)
    pub links: BTreeSet<String>,
}

/// Parses HTML content and extracts text, title and links
///
/// Parsing never fails: malformed markup is recovered by the HTML5 parser and
/// at worst yields less text and fewer links.
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `base_url` - The URL of the page itself, used to resolve relative links
///
/// # Example
///
/// ```
/// use keyword_scout::crawler::parse_html;
/// use url::Url;
///
/// let html = r#"<html><head><title>Test</title></head><body><a href="/page">Link</a></body></html>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// let parsed = parse_html(html, &base_url);
/// assert_eq!(parsed.title, "Test");
/// assert!(parsed.links.contains("https://example.com/page"));
/// ```
pub fn parse_html(html: &str, base_url: &Url) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        title: extract_title(&document),
        text: document.root_element().text().collect(),
        links: collect_links(&document, base_url),
    }
}

/// Extracts the set of absolute links referenced by an HTML document
///
/// Every `<a href>` is resolved against `base_url`, stripped of its fragment,
/// and kept only if the result has a scheme and a network location.
pub fn extract_links(html: &str, base_url: &Url) -> BTreeSet<String> {
    collect_links(&Html::parse_document(html), base_url)
}

/// Case-insensitive substring test of `keyword` in `text`
pub fn contains_keyword(text: &str, keyword: &str) -> bool {
    text.to_lowercase().contains(&keyword.to_lowercase())
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> String {
    let Ok(title_selector) = Selector::parse("title") else {
        return String::new();
    };

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

fn collect_links(document: &Html, base_url: &Url) -> BTreeSet<String> {
    let mut links = BTreeSet::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            if let Some(href) = element.value().attr("href") {
                if let Some(absolute_url) = resolve_link(href, base_url) {
                    links.insert(absolute_url);
                }
            }
        }
    }

    links
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None if the link cannot be resolved or has no network location
/// (`mailto:`, `javascript:`, `data:` and similar).
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let mut absolute_url = base_url.join(href.trim()).ok()?;

    // Same-page anchors point at a page we already have
    absolute_url.set_fragment(None);

    is_valid_url(&absolute_url).then(|| absolute_url.to_string())
}
