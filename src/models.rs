//! Public data models shared by the processor, digest and notifier.

use crate::constants::*;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// One listing extracted from an alert email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingEmail {
    /// Source identifier (first token of the sender display name).
    pub source: String,
    /// Full sender display name.
    pub sender: String,
    /// Message subject line.
    pub subject: String,
    /// Canonical listing link, if the source rule found one.
    pub link: Option<String>,
    /// Cleaned, whitespace-collapsed description.
    pub snippet: Option<String>,
}

/// An unparsed message as handed over by the mailbox.
#[derive(Debug, Clone)]
pub struct RawMessage {
    /// Mailbox-specific identifier (the Maildir file name).
    pub id: String,
    /// Full RFC 5322 message bytes.
    pub bytes: Vec<u8>,
}

/// JSON body posted to the notification webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotifyPayload {
    /// `"true"` when answering a date lookup, `"false"` for the daily run.
    pub lookup: String,
    pub date: String,
    /// Public link to the digest page.
    pub link: String,
    /// Number of messages seen during the run, empty for lookups.
    pub count: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Runtime configuration, loadable from TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Maildir holding the alert emails.
    pub maildir: PathBuf,
    /// Directory the dated digest files are written to.
    pub dump_dir: PathBuf,
    pub webhook_url: String,
    /// Base URL the dump directory is reachable under.
    pub public_base_url: String,
    /// Subjects of automated emails that never carry a listing.
    pub excluded_subjects: Vec<String>,
    pub timeout_secs: u64,
    pub proxy_url: Option<String>,
    /// Move processed messages from `new/` to `cur/`.
    pub mark_seen: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            maildir: PathBuf::from(DEFAULT_MAILDIR),
            dump_dir: PathBuf::from(DEFAULT_DUMP_DIR),
            webhook_url: DEFAULT_WEBHOOK_URL.to_string(),
            public_base_url: DEFAULT_PUBLIC_BASE_URL.to_string(),
            excluded_subjects: DEFAULT_EXCLUDED_SUBJECTS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            proxy_url: None,
            mark_seen: true,
        }
    }
}

impl Config {
    pub fn from_toml(input: &str) -> Result<Self> {
        Ok(toml::from_str(input)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let body = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_toml(&body)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
