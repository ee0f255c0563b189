//! Anchor extraction from email HTML.

use crate::error::{Error, Result};
use scraper::{Html, Selector};

/// Returns every anchor `href` containing `needle`, in document order.
///
/// `needle` is matched as a plain substring. Anchors without an `href` are
/// treated as an empty string, so they only match an empty needle. Finding no
/// anchor is not an error.
pub fn extract_links(html: &str, needle: &str) -> Result<Vec<String>> {
    let doc = Html::parse_document(html);
    let selector = Selector::parse("a").map_err(|e| Error::Parse(format!("{e:?}")))?;

    let links = doc
        .select(&selector)
        .map(|node| node.value().attr("href").unwrap_or_default())
        .filter(|href| href.contains(needle))
        .map(str::to_string)
        .collect();
    Ok(links)
}
