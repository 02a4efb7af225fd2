use std::collections::HashSet;

use scraper::{Html, Selector};
use url::Url;

use crate::config::ScrapeConfig;

/// Collect country profile links from index page HTML.
///
/// Only anchor `href` values matter; no other markup structure is relied
/// on. A matching href starts with the profile path prefix and contains at
/// least the expected number of path segments. Output is absolute URLs,
/// deduplicated, in first-occurrence document order. Zero matches is a
/// valid result.
pub fn profile_links(html: &str, config: &ScrapeConfig) -> Vec<String> {
    let Ok(base) = Url::parse(&config.base_url) else {
        return Vec::new();
    };
    let selector = match Selector::parse("a[href]") {
        Ok(s) => s,
        Err(_) => return Vec::new(),
    };

    let doc = Html::parse_document(html);
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for el in doc.select(&selector) {
        let Some(href) = el.value().attr("href") else {
            continue;
        };
        let href = href.trim();
        if !href.starts_with(config.profile_prefix.as_str()) {
            continue;
        }
        if href.matches('/').count() < config.min_href_slashes {
            continue;
        }
        let Ok(absolute) = base.join(href) else {
            continue;
        };
        let absolute = absolute.to_string();
        if seen.insert(absolute.clone()) {
            out.push(absolute);
        }
    }

    out
}
