use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_INGEST_URL: &str =
    "https://pds-workflow.tekclansolutions.com/api/v1/webhooks/HF7SiXi5FLcoSDI4uzTrQ/sync";
pub const DEFAULT_QA_URL: &str =
    "https://pds-workflow.tekclansolutions.com/api/v1/webhooks/RqUaUz14jOMRqQiLdJdqq/sync";

#[derive(Debug, Clone)]
pub struct Config {
    pub ingest_url: String,
    pub qa_url: String,
    pub ingest_timeout: Duration,
    pub qa_timeout: Duration,
    /// Pause between two consecutive uploads of the same batch.
    pub upload_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ingest_url: DEFAULT_INGEST_URL.to_string(),
            qa_url: DEFAULT_QA_URL.to_string(),
            ingest_timeout: Duration::from_secs(120),
            qa_timeout: Duration::from_secs(60),
            upload_delay: Duration::from_secs(1),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            ingest_url: env::var("PDF_CHAT_INGEST_URL").unwrap_or(defaults.ingest_url),
            qa_url: env::var("PDF_CHAT_QA_URL").unwrap_or(defaults.qa_url),
            ingest_timeout: env_number("PDF_CHAT_INGEST_TIMEOUT_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.ingest_timeout),
            qa_timeout: env_number("PDF_CHAT_QA_TIMEOUT_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.qa_timeout),
            upload_delay: env_number("PDF_CHAT_UPLOAD_DELAY_MS")?
                .map(Duration::from_millis)
                .unwrap_or(defaults.upload_delay),
        })
    }
}

fn env_number<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("{} must be a whole number, got {:?}", key, raw)),
        Err(_) => Ok(None),
    }
}
