use std::error::Error as _;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("could not read {}: {source}", path.display())]
pub struct EncodeError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

#[derive(Debug, Error)]
pub enum IngestError {
    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error("{}", status_reason(.status, .message))]
    Status { status: u16, message: Option<String> },

    #[error("{}", transport_reason(.0))]
    Transport(#[from] reqwest::Error),
}

#[derive(Debug, Error)]
pub enum QaError {
    #[error("{}", status_reason(.status, .message))]
    Status { status: u16, message: Option<String> },

    #[error("{}", transport_reason(.0))]
    Transport(#[from] reqwest::Error),
}

fn status_reason(status: &u16, message: &Option<String>) -> String {
    match message {
        Some(message) => message.clone(),
        None => format!("Webhook returned status: {}", status),
    }
}

/// reqwest's own text hides the cause, so the source chain is spelled out.
fn transport_reason(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        return "request timed out".to_string();
    }

    let mut reason = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !reason.contains(&text) {
            reason.push_str(": ");
            reason.push_str(&text);
        }
        source = cause.source();
    }
    reason
}

/// Pulls a `message` string out of a JSON error body, if there is one.
pub fn extract_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("message")?
        .as_str()
        .filter(|m| !m.trim().is_empty())
        .map(str::to_string)
}
