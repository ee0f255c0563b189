//! Error types for extraction and the digest plumbing around it.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
/// Error type for all listing-digest operations.
///
/// The first four variants are field-level extraction failures: the email
/// processor logs them and leaves the affected field empty. Senders without an
/// extraction rule are not an error at all.
pub enum Error {
    /// HTML fragment or tag selector could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),
    /// Start marker was found but the end marker never follows it.
    #[error("end marker {marker:?} not found after start marker")]
    MarkerNotFound { marker: String },
    /// A mandatory capture of a field-assembly template did not match.
    #[error("required field {field:?} missing from snippet text")]
    FieldMissing { field: &'static str },
    /// Cleaning left nothing but whitespace.
    #[error("snippet is empty after cleaning")]
    EmptyAfterClean,
    /// MIME envelope could not be read.
    #[error("mail error: {0}")]
    Mail(#[from] mailparse::MailParseError),
    /// Underlying HTTP client error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    /// IO error when reading messages or writing digests.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Invalid configuration file or command line input.
    #[error("config error: {0}")]
    Config(String),
    /// No digest file exists for the requested date.
    #[error("no digest found for {0}")]
    DigestNotFound(String),
    /// HTTP response returned a non-success status with body.
    #[error("unexpected status {status}: {body}")]
    Status { status: StatusCode, body: String },
}

impl Error {
    /// Whether this error only invalidates a single extracted field.
    pub fn is_field_level(&self) -> bool {
        matches!(
            self,
            Error::Parse(_)
                | Error::MarkerNotFound { .. }
                | Error::FieldMissing { .. }
                | Error::EmptyAfterClean
        )
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

/// Result type for listing-digest operations.
pub type Result<T> = std::result::Result<T, Error>;
