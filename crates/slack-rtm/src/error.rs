//! Error types for the Slack client layer.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, SlackError>;

#[derive(Debug, Error)]
pub enum SlackError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The Web API answered with `ok: false`; `code` is Slack's `error` field.
    #[error("Slack API error on {method}: {code}")]
    Api { method: &'static str, code: String },

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Websocket error: {0}")]
    Socket(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("RTM connection closed")]
    Closed,
}
