//! Source rule table: how each alert sender is parsed.

use crate::clean::Cleaner;
use crate::constants::*;
use crate::error::Result;
use crate::snippet::{SnippetSpec, TextScope};
use std::collections::HashMap;

/// Which of the matching anchors is the listing link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkPick {
    First,
    /// CasaYes wraps its header logo in the same tracking redirect, so the
    /// listing is the second match. A lone match is still used.
    Second,
}

impl LinkPick {
    pub fn pick(self, links: &[String]) -> Option<&String> {
        match self {
            LinkPick::First => links.first(),
            LinkPick::Second => links.get(1).or_else(|| links.first()),
        }
    }
}

/// Extraction rule for one sender.
#[derive(Debug, Clone)]
pub struct SourceRule {
    pub id: &'static str,
    /// Literal substring a listing `href` must contain.
    pub link_match: &'static str,
    pub link_pick: LinkPick,
    pub snippet: SnippetSpec,
    pub cleaner: Cleaner,
}

/// Outcome of a rule lookup.
#[derive(Debug, Clone, Copy)]
pub enum RuleLookup<'a> {
    Rule(&'a SourceRule),
    /// Unknown sender; link and snippet stay unset.
    NoRule,
}

/// Immutable table of source rules keyed by source identifier.
#[derive(Debug, Clone)]
pub struct SourceRules {
    rules: HashMap<&'static str, SourceRule>,
}

impl SourceRules {
    pub fn new(rules: impl IntoIterator<Item = SourceRule>) -> Self {
        Self {
            rules: rules.into_iter().map(|rule| (rule.id, rule)).collect(),
        }
    }

    /// The rules for every supported portal.
    pub fn builtin() -> Result<Self> {
        let spec = |(start, end): (&'static str, &'static str), tag, scope| SnippetSpec {
            start,
            end,
            tag,
            scope,
        };

        Ok(Self::new([
            SourceRule {
                id: IDEALISTA,
                link_match: IDEALISTA_LINK,
                link_pick: LinkPick::First,
                snippet: spec(IDEALISTA_MARKERS, "span", TextScope::All),
                cleaner: Cleaner::StripAndSuffix { symbol: EURO },
            },
            SourceRule {
                id: SUPERCASA,
                link_match: SUPERCASA_LINK,
                link_pick: LinkPick::First,
                snippet: spec(SUPERCASA_MARKERS, "div", TextScope::First),
                cleaner: Cleaner::StripOnly,
            },
            SourceRule {
                id: CASA_SAPO,
                link_match: CASA_SAPO_LINK,
                link_pick: LinkPick::First,
                snippet: spec(CASA_SAPO_MARKERS, "span", TextScope::All),
                cleaner: Cleaner::fields(CASA_SAPO_FIELDS)?,
            },
            SourceRule {
                id: IMOVIRTUAL,
                link_match: IMOVIRTUAL_LINK,
                link_pick: LinkPick::First,
                snippet: spec(IMOVIRTUAL_MARKERS, "h2", TextScope::First),
                cleaner: Cleaner::StripOnly,
            },
            SourceRule {
                id: CASAYES,
                link_match: CASAYES_LINK,
                link_pick: LinkPick::Second,
                snippet: spec(CASAYES_MARKERS, "b", TextScope::All),
                cleaner: Cleaner::StripOnly,
            },
        ]))
    }

    /// Exact, case-sensitive lookup.
    pub fn lookup(&self, source: &str) -> RuleLookup<'_> {
        match self.rules.get(source) {
            Some(rule) => RuleLookup::Rule(rule),
            None => RuleLookup::NoRule,
        }
    }

    pub fn sources(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.keys().copied()
    }
}

/// Source identifier for a sender display name: its first token.
pub fn source_id(display_name: &str) -> &str {
    display_name.split_whitespace().next().unwrap_or_default()
}
