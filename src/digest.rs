//! Daily HTML digest of extracted listings.

use crate::constants::*;
use crate::error::{Error, Result};
use crate::models::ListingEmail;
use chrono::NaiveDate;
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::fs;
use std::path::{Path, PathBuf};

/// Listings of one run, in processing order.
#[derive(Debug, Clone)]
pub struct Digest {
    pub date: NaiveDate,
    /// Messages seen during the run, listings or not.
    pub processed: usize,
    pub entries: Vec<ListingEmail>,
}

impl Digest {
    pub fn new(date: NaiveDate, processed: usize, entries: Vec<ListingEmail>) -> Self {
        Self {
            date,
            processed,
            entries,
        }
    }

    pub fn file_name(&self) -> String {
        digest_file_name(self.date)
    }

    pub fn render(&self) -> String {
        let date = self.date.format(DIGEST_DATE_FORMAT);
        let mut html = String::with_capacity(1024 + self.entries.len() * 256);
        html.push_str("<!DOCTYPE html>\n<html lang=\"pt\">\n<head>\n<meta charset=\"utf-8\">\n");
        html.push_str(&format!("<title>Casas {date}</title>\n</head>\n<body>\n"));
        html.push_str(&format!("<h1>Casas {date}</h1>\n"));
        html.push_str(&format!(
            "<p class=\"count\">{} new message(s), {} listing(s)</p>\n<ul>\n",
            self.processed,
            self.entries.len()
        ));
        for entry in &self.entries {
            html.push_str(&render_entry(entry));
        }
        html.push_str("</ul>\n</body>\n</html>\n");
        html
    }

    /// Writes the digest to `<dir>/<date>_serve.html`.
    pub fn write_to(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let path = dir.join(self.file_name());
        fs::write(&path, self.render())?;
        Ok(path)
    }
}

fn render_entry(entry: &ListingEmail) -> String {
    let subject = encode_text(&entry.subject);
    let title = match &entry.link {
        Some(link) => format!(
            "<a href=\"{}\">{subject}</a>",
            encode_double_quoted_attribute(link)
        ),
        None => format!("<span class=\"subject\">{subject}</span>"),
    };
    let snippet = entry
        .snippet
        .as_deref()
        .map(|snippet| format!("<p>{}</p>\n", encode_text(snippet)))
        .unwrap_or_default();
    format!(
        "<li>\n<span class=\"source\">{}</span>\n{title}\n{snippet}</li>\n",
        encode_text(&entry.source)
    )
}

pub fn digest_file_name(date: NaiveDate) -> String {
    format!("{}{DIGEST_FILE_SUFFIX}", date.format(DIGEST_DATE_FORMAT))
}

/// Parses a lookup date in the bot's `DD/MM/YYYY` form.
pub fn parse_lookup_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), LOOKUP_DATE_FORMAT)
        .map_err(|e| Error::Config(format!("invalid lookup date {input:?}: {e}")))
}

/// Path of an existing digest for `date`.
pub fn find_digest(dir: impl AsRef<Path>, date: NaiveDate) -> Result<PathBuf> {
    let path = dir.as_ref().join(digest_file_name(date));
    if path.is_file() {
        Ok(path)
    } else {
        Err(Error::DigestNotFound(date.format(DIGEST_DATE_FORMAT).to_string()))
    }
}
