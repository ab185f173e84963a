use scraper::{Html, Selector};

/// Substring an anchor's `href` must contain to count as a post link.
pub const POST_DOMAIN: &str = "https://twitter.com";

/// Distinct post links from every `<a>` whose `href` contains [`POST_DOMAIN`].
///
/// Order is first occurrence in the document. Deduplication compares the raw
/// attribute strings, so `.../status/1` and `.../status/1?s=20` are distinct.
pub fn extract_post_links(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let Ok(selector) = Selector::parse(&format!("a[href*=\"{POST_DOMAIN}\"]")) else {
        return Vec::new();
    };

    let mut links: Vec<String> = Vec::new();
    for href in document
        .select(&selector)
        .filter_map(|el| el.value().attr("href"))
    {
        if !links.iter().any(|seen| seen == href) {
            links.push(href.to_string());
        }
    }
    links
}
