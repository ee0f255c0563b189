//! Marker-bounded snippet isolation.
//!
//! Alert emails carry the listing summary somewhere between two stable
//! markers (an HTML comment or a distinctive inline style). The text between
//! them is parsed on its own, the text of the configured tag is taken, and the
//! source cleaner turns it into a snippet.

use crate::clean::Cleaner;
use crate::error::{Error, Result};
use scraper::{Html, Selector};

/// Which matches of the snippet tag contribute text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextScope {
    /// Text of the first matching element only.
    First,
    /// Text of every matching element, space separated.
    All,
}

/// Where a source keeps its snippet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnippetSpec {
    pub start: &'static str,
    pub end: &'static str,
    pub tag: &'static str,
    pub scope: TextScope,
}

/// Returns the text between the first `start` and the next `end`.
///
/// `Ok(None)` when `start` is absent; many alerts simply lack the block.
/// A present `start` without a following `end` is a broken fragment.
pub fn isolate<'a>(html: &'a str, start: &str, end: &str) -> Result<Option<&'a str>> {
    let Some((_, rest)) = html.split_once(start) else {
        return Ok(None);
    };
    match rest.split_once(end) {
        Some((inner, _)) => Ok(Some(inner)),
        None => Err(Error::MarkerNotFound {
            marker: end.to_string(),
        }),
    }
}

/// Text content of `tag` inside `fragment`.
pub fn tag_text(fragment: &str, tag: &str, scope: TextScope) -> Result<String> {
    let doc = Html::parse_document(fragment);
    let selector =
        Selector::parse(tag).map_err(|e| Error::Parse(format!("invalid tag {tag:?}: {e:?}")))?;

    let mut texts = doc
        .select(&selector)
        .map(|node| node.text().collect::<String>());
    let text = match scope {
        TextScope::First => texts.next().unwrap_or_default(),
        TextScope::All => texts.collect::<Vec<_>>().join(" "),
    };
    Ok(text)
}

/// Extracts and cleans the snippet described by `spec`.
///
/// Returns `Ok(None)` when the start marker is missing.
pub fn extract_snippet(html: &str, spec: &SnippetSpec, cleaner: &Cleaner) -> Result<Option<String>> {
    let Some(fragment) = isolate(html, spec.start, spec.end)? else {
        return Ok(None);
    };
    let raw = tag_text(fragment, spec.tag, spec.scope)?;
    cleaner.clean(&raw).map(Some)
}
