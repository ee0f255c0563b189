use crate::constants::*;
use crate::digest::digest_file_name;
use crate::error::{Error, Result};
use crate::models::{Config, NotifyPayload};
use chrono::NaiveDate;
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE},
    Client, ClientBuilder,
};
use std::time::Duration;
use tracing::{debug, warn};

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json, */*"));
    headers
}

/// Public URL of the digest file `file_name`.
pub fn digest_link(base_url: &str, file_name: &str) -> String {
    format!("{}/{DUMP_ROUTE}/{}", base_url.trim_end_matches('/'), file_name)
}

/// Posts digest notifications to the chat bot webhook.
pub struct NotifyClient {
    webhook_url: String,
    public_base_url: String,
    client: Client,
}

impl NotifyClient {
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = NotifyClientBuilder::new(&config.webhook_url)
            .public_base_url(&config.public_base_url)
            .timeout(config.timeout());
        if let Some(proxy) = &config.proxy_url {
            builder = builder.proxy(proxy);
        }
        builder.build()
    }

    /// Announces the digest of a daily run.
    pub async fn notify_daily(
        &self,
        date: NaiveDate,
        count: usize,
        error: Option<String>,
    ) -> Result<NotifyPayload> {
        let payload = NotifyPayload {
            lookup: "false".to_string(),
            date: date.format(DIGEST_DATE_FORMAT).to_string(),
            link: digest_link(&self.public_base_url, &digest_file_name(date)),
            count: count.to_string(),
            error,
        };
        self.send(&payload).await?;
        Ok(payload)
    }

    /// Answers a lookup for an older digest. `file_name` is `None` when no
    /// digest exists for the requested date.
    pub async fn notify_lookup(
        &self,
        requested_date: &str,
        file_name: Option<&str>,
        error: Option<String>,
    ) -> Result<NotifyPayload> {
        let payload = NotifyPayload {
            lookup: "true".to_string(),
            date: requested_date.to_string(),
            link: digest_link(&self.public_base_url, file_name.unwrap_or_default()),
            count: String::new(),
            error,
        };
        self.send(&payload).await?;
        Ok(payload)
    }

    async fn send(&self, payload: &NotifyPayload) -> Result<()> {
        debug!(url = %self.webhook_url, lookup = %payload.lookup, date = %payload.date, "notifying bot");
        let resp = self
            .client
            .post(&self.webhook_url)
            .json(payload)
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!(%status, "bot rejected notification");
            return Err(Error::Status { status, body });
        }
        Ok(())
    }
}

pub struct NotifyClientBuilder {
    webhook_url: String,
    public_base_url: String,
    timeout: Duration,
    proxy_url: Option<String>,
}

impl NotifyClientBuilder {
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self {
            webhook_url: webhook_url.into(),
            public_base_url: DEFAULT_PUBLIC_BASE_URL.to_string(),
            timeout: default_timeout(),
            proxy_url: None,
        }
    }

    pub fn public_base_url(mut self, url: impl Into<String>) -> Self {
        self.public_base_url = url.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn proxy(mut self, url: impl Into<String>) -> Self {
        self.proxy_url = Some(url.into());
        self
    }

    pub fn build(self) -> Result<NotifyClient> {
        let mut builder = ClientBuilder::new()
            .timeout(self.timeout)
            .default_headers(default_headers());

        if let Some(proxy) = &self.proxy_url {
            builder = builder.proxy(reqwest::Proxy::all(proxy).map_err(Error::Http)?);
        }

        let client = builder.build().map_err(Error::Http)?;
        Ok(NotifyClient {
            webhook_url: self.webhook_url,
            public_base_url: self.public_base_url,
            client,
        })
    }
}
