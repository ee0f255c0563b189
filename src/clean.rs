//! Per-source text cleaners applied to raw snippet text.

use crate::error::{Error, Result};
use regex::Regex;
use std::sync::LazyLock;

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("WHITESPACE_RE should compile"));

// Amount written right after a prefix currency symbol: "160000", "160.000", "160 000".
static LEADING_AMOUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d{1,3}(?:[ .,\u{a0}]\d{3})+|\d+)").expect("LEADING_AMOUNT_RE should compile")
});

/// A named capture that must be present for field assembly.
#[derive(Debug, Clone)]
pub struct Field {
    pub label: &'static str,
    pub pattern: Regex,
}

/// How raw tag text is turned into a snippet.
#[derive(Debug, Clone)]
pub enum Cleaner {
    /// Keep the text before the first `symbol`, strip it, then append `symbol`.
    StripAndSuffix { symbol: char },
    /// Keep ASCII letters, digits and whitespace only.
    StripOnly,
    /// Compose `label: value` pairs from mandatory captures.
    FieldAssembly { fields: Vec<Field> },
}

impl Cleaner {
    /// Builds a field-assembly cleaner from `(label, pattern)` pairs.
    pub fn fields(specs: &[(&'static str, &str)]) -> Result<Self> {
        let fields = specs
            .iter()
            .map(|&(label, pattern)| {
                Regex::new(pattern)
                    .map(|pattern| Field { label, pattern })
                    .map_err(|e| Error::Parse(format!("field {label}: {e}")))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Cleaner::FieldAssembly { fields })
    }

    pub fn clean(&self, raw: &str) -> Result<String> {
        let cleaned = match self {
            Cleaner::StripAndSuffix { symbol } => strip_and_suffix(raw, *symbol)?,
            Cleaner::StripOnly => strip_non_alphanumeric(raw),
            Cleaner::FieldAssembly { fields } => assemble_fields(raw, fields)?,
        };
        if cleaned.trim().is_empty() {
            return Err(Error::EmptyAfterClean);
        }
        Ok(cleaned)
    }
}

/// Collapses every whitespace run into a single space.
pub fn normalize_snippet(snippet: &str) -> String {
    WHITESPACE_RE.replace_all(snippet, " ").into_owned()
}

fn strip_non_alphanumeric(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .trim()
        .to_string()
}

fn strip_and_suffix(raw: &str, symbol: char) -> Result<String> {
    let head = match raw.split_once(symbol) {
        Some((before, after)) => {
            let before = before.trim_end();
            let priced = before.split_whitespace().last().is_some_and(is_amount);
            match LEADING_AMOUNT_RE.captures(after).and_then(|c| c.get(1)) {
                Some(amount) if !priced => format!("{before} {}", amount.as_str()),
                _ => before.to_string(),
            }
        }
        None => raw.to_string(),
    };

    let stripped = strip_non_alphanumeric(&head);
    if stripped.is_empty() {
        return Err(Error::EmptyAfterClean);
    }
    Ok(format!("{stripped}{symbol}"))
}

fn is_amount(token: &str) -> bool {
    token.chars().any(|c| c.is_ascii_digit())
        && token.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',')
}

fn assemble_fields(raw: &str, fields: &[Field]) -> Result<String> {
    let parts = fields
        .iter()
        .map(|field| {
            field
                .pattern
                .captures(raw)
                .and_then(|caps| caps.get(1))
                .map(|m| format!("{}: {}", field.label, m.as_str()))
                .ok_or(Error::FieldMissing { field: field.label })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(parts.join(" - "))
}
