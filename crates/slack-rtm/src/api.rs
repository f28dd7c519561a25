//! Thin Slack Web API client.
//!
//! Every call is `GET {base}/api/<method>` with a bearer token and an
//! `ok`/`error` JSON envelope. List methods follow cursor pagination until
//! Slack returns an empty `next_cursor`.
//!
//! `base` should be `"https://slack.com"` in production; it is exposed for
//! testing against a local mock server.

use serde::Deserialize;

use crate::error::{Result, SlackError};

pub const DEFAULT_API_BASE: &str = "https://slack.com";

/// Page size for cursor-paginated list methods.
const PAGE_LIMIT: &str = "200";

// ── Wire models ───────────────────────────────────────────────────────────────

/// One entry from `users.list`.
#[derive(Debug, Clone, Deserialize)]
pub struct SlackUser {
    pub id: String,
    /// Legacy username — what people type, not the display id.
    #[serde(default)]
    pub name: String,
}

/// One entry from `conversations.list`.
#[derive(Debug, Clone, Deserialize)]
pub struct SlackChannel {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub is_archived: bool,
}

/// Result of `conversations.info` for a single conversation id.
#[derive(Debug, Clone, Deserialize)]
pub struct Conversation {
    pub id: String,
    /// Display name. Absent for DMs.
    #[serde(default)]
    pub name: Option<String>,
    /// True only for public channels; DMs and private groups report false.
    #[serde(default)]
    pub is_channel: bool,
}

#[derive(Debug, Default, Deserialize)]
struct ResponseMetadata {
    #[serde(default)]
    next_cursor: String,
}

// ── Client ────────────────────────────────────────────────────────────────────

pub struct WebApi {
    http: reqwest::Client,
    token: String,
    base: String,
}

impl WebApi {
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_base(token, DEFAULT_API_BASE)
    }

    /// Point the client at a non-default API base (local mock server).
    pub fn with_base(token: impl Into<String>, base: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            token: token.into(),
            base: base.into(),
        }
    }

    fn url(&self, method: &str) -> String {
        format!("{}/api/{}", self.base, method)
    }

    /// All known workspace users, across every page.
    pub async fn users_list(&self) -> Result<Vec<SlackUser>> {
        #[derive(Deserialize)]
        struct Envelope {
            ok: bool,
            error: Option<String>,
            #[serde(default)]
            members: Vec<SlackUser>,
            response_metadata: Option<ResponseMetadata>,
        }

        let mut members = Vec::new();
        let mut cursor = String::new();
        loop {
            let mut request = self
                .http
                .get(self.url("users.list"))
                .bearer_auth(&self.token)
                .query(&[("limit", PAGE_LIMIT)]);
            if !cursor.is_empty() {
                request = request.query(&[("cursor", cursor.as_str())]);
            }
            let envelope: Envelope = request.send().await?.json().await?;
            check("users.list", envelope.ok, envelope.error)?;
            members.extend(envelope.members);
            cursor = envelope
                .response_metadata
                .map(|m| m.next_cursor)
                .unwrap_or_default();
            if cursor.is_empty() {
                break;
            }
        }
        Ok(members)
    }

    /// Public channels visible to the token, across every page.
    ///
    /// Public only: `conversations.info` reports `is_channel = false` for
    /// private groups, so a private target could never match afterwards —
    /// it must fail resolution instead.
    pub async fn conversations_list(&self, exclude_archived: bool) -> Result<Vec<SlackChannel>> {
        #[derive(Deserialize)]
        struct Envelope {
            ok: bool,
            error: Option<String>,
            #[serde(default)]
            channels: Vec<SlackChannel>,
            response_metadata: Option<ResponseMetadata>,
        }

        let mut channels = Vec::new();
        let mut cursor = String::new();
        loop {
            let mut request = self
                .http
                .get(self.url("conversations.list"))
                .bearer_auth(&self.token)
                .query(&[
                    ("limit", PAGE_LIMIT),
                    ("types", "public_channel"),
                    ("exclude_archived", if exclude_archived { "true" } else { "false" }),
                ]);
            if !cursor.is_empty() {
                request = request.query(&[("cursor", cursor.as_str())]);
            }
            let envelope: Envelope = request.send().await?.json().await?;
            check("conversations.list", envelope.ok, envelope.error)?;
            channels.extend(envelope.channels);
            cursor = envelope
                .response_metadata
                .map(|m| m.next_cursor)
                .unwrap_or_default();
            if cursor.is_empty() {
                break;
            }
        }
        Ok(channels)
    }

    /// Look up a single conversation by id. No caching — callers that want
    /// fresh channel-ness/name must call this per event.
    pub async fn conversations_info(&self, channel: &str) -> Result<Conversation> {
        #[derive(Deserialize)]
        struct Envelope {
            ok: bool,
            error: Option<String>,
            channel: Option<Conversation>,
        }

        let envelope: Envelope = self
            .http
            .get(self.url("conversations.info"))
            .bearer_auth(&self.token)
            .query(&[("channel", channel)])
            .send()
            .await?
            .json()
            .await?;
        check("conversations.info", envelope.ok, envelope.error)?;
        envelope.channel.ok_or(SlackError::Api {
            method: "conversations.info",
            code: "missing_channel".to_string(),
        })
    }

    /// Obtain the websocket URL for an RTM session.
    pub async fn rtm_connect(&self) -> Result<String> {
        #[derive(Deserialize)]
        struct Envelope {
            ok: bool,
            error: Option<String>,
            url: Option<String>,
        }

        let envelope: Envelope = self
            .http
            .get(self.url("rtm.connect"))
            .bearer_auth(&self.token)
            .send()
            .await?
            .json()
            .await?;
        check("rtm.connect", envelope.ok, envelope.error)?;
        envelope.url.ok_or(SlackError::Api {
            method: "rtm.connect",
            code: "missing_url".to_string(),
        })
    }
}

fn check(method: &'static str, ok: bool, error: Option<String>) -> Result<()> {
    if ok {
        Ok(())
    } else {
        Err(SlackError::Api {
            method,
            code: error.unwrap_or_else(|| "unknown".to_string()),
        })
    }
}
