//! One digest run: read unread mail, extract, write the digest, notify.

use crate::client::{digest_link, NotifyClient};
use crate::digest::{find_digest, parse_lookup_date, Digest};
use crate::error::{Error, Result};
use crate::mailbox::Maildir;
use crate::models::{Config, NotifyPayload};
use crate::processor::{EmailProcessor, ProcessOutcome};
use chrono::NaiveDate;
use std::path::PathBuf;
use tracing::{error, info, warn};

/// Summary of a finished run.
#[derive(Debug)]
pub struct RunReport {
    pub date: NaiveDate,
    pub processed: usize,
    pub listings: usize,
    /// `None` when the run failed before the digest was written.
    pub digest_path: Option<PathBuf>,
    /// Why the run failed; its text is sent to the bot.
    pub error: Option<Error>,
    pub notified: bool,
}

/// Messages read during a run, not yet marked seen.
#[derive(Debug, Default)]
pub struct Collected {
    pub outcome: ProcessOutcome,
    /// Maildir ids of every message handed to the processor.
    pub ids: Vec<String>,
}

pub struct Runner {
    config: Config,
    processor: EmailProcessor,
    notifier: Option<NotifyClient>,
}

impl Runner {
    pub fn new(config: Config) -> Result<Self> {
        let processor = EmailProcessor::builtin(config.excluded_subjects.clone())?;
        let notifier = NotifyClient::new(&config)?;
        Ok(Self {
            config,
            processor,
            notifier: Some(notifier),
        })
    }

    /// Runner that writes digests but never calls the webhook.
    pub fn without_notifier(config: Config) -> Result<Self> {
        let processor = EmailProcessor::builtin(config.excluded_subjects.clone())?;
        Ok(Self {
            config,
            processor,
            notifier: None,
        })
    }

    /// Processes unread mail into the digest for `date`.
    ///
    /// Messages are marked seen only once the digest is on disk. A failure
    /// before that is reported to the bot as the payload error; the
    /// notification is still sent with the number of messages read.
    pub async fn run(&self, date: NaiveDate) -> RunReport {
        let mut processed = 0;
        let mut listings = 0;
        let built = self.collect().and_then(|Collected { outcome, ids }| {
            processed = outcome.processed;
            listings = outcome.listings.len();
            let path = Digest::new(date, outcome.processed, outcome.listings)
                .write_to(&self.config.dump_dir)?;
            Ok((path, ids))
        });

        let (digest_path, error) = match built {
            Ok((path, ids)) => {
                info!(path = %path.display(), processed, listings, "digest written");
                if self.config.mark_seen {
                    self.mark_seen(&ids);
                }
                (Some(path), None)
            }
            Err(err) => {
                error!(error = %err, processed, "digest run failed");
                (None, Some(err))
            }
        };

        let error_text = error.as_ref().map(ToString::to_string);
        let notified = match &self.notifier {
            Some(notifier) => match notifier.notify_daily(date, processed, error_text).await {
                Ok(_) => true,
                Err(err) => {
                    warn!(error = %err, "notifying bot failed");
                    false
                }
            },
            None => false,
        };

        RunReport {
            date,
            processed,
            listings,
            digest_path,
            error,
            notified,
        }
    }

    /// Streams the unread messages through the processor.
    pub fn collect(&self) -> Result<Collected> {
        let maildir = Maildir::new(&self.config.maildir);
        let mut collected = Collected::default();
        for message in maildir.unread()? {
            let message = match message {
                Ok(message) => message,
                Err(err) => {
                    warn!(error = %err, "skipping unreadable mail file");
                    continue;
                }
            };
            collected
                .outcome
                .record(self.processor.process_message(&message.bytes));
            collected.ids.push(message.id);
        }
        info!(
            processed = collected.outcome.processed,
            listings = collected.outcome.listings.len(),
            "processed unread messages"
        );
        Ok(collected)
    }

    /// Moves every id to `cur/`; a message that cannot be moved stays unread.
    fn mark_seen(&self, ids: &[String]) {
        let maildir = Maildir::new(&self.config.maildir);
        for id in ids {
            if let Err(err) = maildir.mark_seen(id) {
                warn!(id = %id, error = %err, "cannot mark message seen");
            }
        }
    }

    /// Looks up the digest for a `DD/MM/YYYY` date and tells the bot.
    pub async fn lookup(&self, requested: &str) -> Result<NotifyPayload> {
        let found =
            parse_lookup_date(requested).and_then(|date| find_digest(&self.config.dump_dir, date));
        let (file_name, error) = match &found {
            Ok(path) => (
                path.file_name().map(|name| name.to_string_lossy().into_owned()),
                None,
            ),
            Err(err) => {
                warn!(date = requested, error = %err, "digest lookup failed");
                (None, Some(err.to_string()))
            }
        };

        match &self.notifier {
            Some(notifier) => {
                notifier
                    .notify_lookup(requested, file_name.as_deref(), error)
                    .await
            }
            None => {
                found?;
                Ok(NotifyPayload {
                    lookup: "true".to_string(),
                    date: requested.to_string(),
                    link: digest_link(&self.config.public_base_url, &file_name.unwrap_or_default()),
                    count: String::new(),
                    error: None,
                })
            }
        }
    }
}
