//! Turns raw alert emails into listing records.

use crate::clean::normalize_snippet;
use crate::error::Result;
use crate::links::extract_links;
use crate::models::{ListingEmail, RawMessage};
use crate::rules::{source_id, RuleLookup, SourceRule, SourceRules};
use crate::snippet::extract_snippet;
use mailparse::{MailAddr, MailHeaderMap, ParsedMail};
use tracing::{debug, warn};

/// Link and snippet found in one HTML body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BodyExtraction {
    pub link: Option<String>,
    pub snippet: Option<String>,
}

/// Listings gathered during a run plus the number of messages seen.
#[derive(Debug, Clone, Default)]
pub struct ProcessOutcome {
    pub listings: Vec<ListingEmail>,
    /// Every message handed to the processor, including excluded and
    /// unreadable ones.
    pub processed: usize,
}

impl ProcessOutcome {
    /// Accounts for one message result.
    pub fn record(&mut self, result: Result<Option<ListingEmail>>) {
        self.processed += 1;
        match result {
            Ok(Some(listing)) => self.listings.push(listing),
            Ok(None) => {}
            Err(err) => warn!(error = %err, "discarding unreadable message"),
        }
    }
}

/// Per-message extraction using the source rule table.
#[derive(Debug, Clone)]
pub struct EmailProcessor {
    rules: SourceRules,
    excluded_subjects: Vec<String>,
}

impl EmailProcessor {
    pub fn new(rules: SourceRules, excluded_subjects: Vec<String>) -> Self {
        Self {
            rules,
            excluded_subjects,
        }
    }

    /// Processor with the built-in rules.
    pub fn builtin(excluded_subjects: Vec<String>) -> Result<Self> {
        Ok(Self::new(SourceRules::builtin()?, excluded_subjects))
    }

    pub fn is_excluded(&self, subject: &str) -> bool {
        self.excluded_subjects.iter().any(|s| s == subject)
    }

    /// Processes messages one at a time, preserving order.
    pub fn process_all<I>(&self, messages: I) -> ProcessOutcome
    where
        I: IntoIterator<Item = RawMessage>,
    {
        let mut outcome = ProcessOutcome::default();
        for message in messages {
            outcome.record(self.process_message(&message.bytes));
        }
        outcome
    }

    /// Parses one raw message.
    ///
    /// `Ok(None)` for excluded subjects; `Err` only when the MIME envelope
    /// itself cannot be read.
    pub fn process_message(&self, raw: &[u8]) -> Result<Option<ListingEmail>> {
        let mail = mailparse::parse_mail(raw)?;
        let sender = sender_name(&mail);
        let subject = mail.headers.get_first_value("Subject").unwrap_or_default();

        if self.is_excluded(&subject) {
            debug!(%subject, "skipping excluded subject");
            return Ok(None);
        }

        let mut listing = ListingEmail {
            source: source_id(&sender).to_string(),
            sender,
            subject,
            link: None,
            snippet: None,
        };

        for part in html_parts(&mail) {
            let body = match part.get_body() {
                Ok(body) => body,
                Err(err) => {
                    warn!(source = %listing.source, error = %err, "cannot decode html part");
                    continue;
                }
            };
            let found = self.process_body(&listing.source, &body);
            if found.link.is_some() {
                listing.link = found.link;
            }
            if found.snippet.is_some() {
                listing.snippet = found.snippet;
            }
        }

        Ok(Some(listing))
    }

    /// Extracts link and snippet from one HTML body. Failures are logged and
    /// leave the field empty.
    pub fn process_body(&self, source: &str, html: &str) -> BodyExtraction {
        let rule = match self.rules.lookup(source) {
            RuleLookup::Rule(rule) => rule,
            RuleLookup::NoRule => {
                debug!(source, "no extraction rule for sender");
                return BodyExtraction::default();
            }
        };

        let link = match find_link(rule, html) {
            Ok(link) => link,
            Err(err) => {
                warn!(source, error = %err, "link extraction failed");
                None
            }
        };

        let snippet = match extract_snippet(html, &rule.snippet, &rule.cleaner) {
            Ok(snippet) => snippet.map(|s| normalize_snippet(&s)),
            Err(err) => {
                warn!(source, error = %err, field_level = err.is_field_level(), "snippet extraction failed");
                None
            }
        };

        BodyExtraction { link, snippet }
    }
}

fn find_link(rule: &SourceRule, html: &str) -> Result<Option<String>> {
    let links = extract_links(html, rule.link_match)?;
    Ok(rule.link_pick.pick(&links).cloned())
}

/// Display name of the first `From` address, falling back to the raw header.
fn sender_name(mail: &ParsedMail) -> String {
    let Some(header) = mail.headers.get_first_header("From") else {
        return String::new();
    };
    let from_list = match mailparse::addrparse_header(header) {
        Ok(list) => list,
        Err(err) => {
            debug!(error = %err, "unparsable From header");
            return header.get_value().trim().to_string();
        }
    };
    match from_list.iter().next() {
        Some(MailAddr::Single(info)) => info.display_name.clone().unwrap_or_default(),
        Some(MailAddr::Group(group)) => group.group_name.clone(),
        None => String::new(),
    }
}

/// Leaf `text/html` parts in MIME order.
fn html_parts<'a, 'b>(mail: &'a ParsedMail<'b>) -> Vec<&'a ParsedMail<'b>> {
    let mut parts = Vec::new();
    collect_html(mail, &mut parts);
    parts
}

fn collect_html<'a, 'b>(part: &'a ParsedMail<'b>, out: &mut Vec<&'a ParsedMail<'b>>) {
    if part.subparts.is_empty() {
        if part.ctype.mimetype.eq_ignore_ascii_case("text/html") {
            out.push(part);
        }
        return;
    }
    for sub in &part.subparts {
        collect_html(sub, out);
    }
}
