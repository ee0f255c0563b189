pub mod clean;
pub mod client;
pub mod constants;
pub mod digest;
pub mod error;
pub mod links;
pub mod logging;
pub mod mailbox;
pub mod models;
pub mod processor;
pub mod rules;
pub mod runner;
pub mod snippet;

pub use clean::{normalize_snippet, Cleaner};
pub use client::{digest_link, NotifyClient, NotifyClientBuilder};
pub use constants::{default_timeout, DEFAULT_EXCLUDED_SUBJECTS, DEFAULT_TIMEOUT_SECS};
pub use digest::{digest_file_name, find_digest, parse_lookup_date, Digest};
pub use error::{Error, Result};
pub use links::extract_links;
pub use mailbox::Maildir;
pub use models::{Config, ListingEmail, NotifyPayload, RawMessage};
pub use processor::{BodyExtraction, EmailProcessor, ProcessOutcome};
pub use rules::{source_id, LinkPick, RuleLookup, SourceRule, SourceRules};
pub use runner::{Collected, RunReport, Runner};
pub use snippet::{extract_snippet, SnippetSpec, TextScope};
