//! Target resolution: turn `alice` or `#general` into an [`AnnoySubject`].
//!
//! Runs exactly once at startup. Lookup failure and "no such name" share
//! one fatal path — the caller never enters the event loop either way —
//! but the error variants keep the two distinguishable in the message.

use std::future::Future;

use slack_rtm::{Result as SlackResult, SlackChannel, SlackError, SlackUser, WebApi};
use thiserror::Error;

/// The resolved target. Built once, immutable for the life of the reactor.
///
/// For a user target `name` holds the platform's stable user id. For a
/// channel target it holds the *display name* — a channel renamed mid-run
/// stops matching. Asymmetric on purpose; it mirrors the original behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnoySubject {
    pub name: String,
    pub is_channel: bool,
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("no user or channel named '{0}'")]
    NotFound(String),
    #[error(transparent)]
    Client(#[from] SlackError),
}

/// The two directory queries resolution needs. Implement this to replace
/// the Web API in tests.
pub trait DirectoryLookup {
    fn users_list(&self) -> impl Future<Output = SlackResult<Vec<SlackUser>>> + Send;

    fn conversations_list(
        &self,
        exclude_archived: bool,
    ) -> impl Future<Output = SlackResult<Vec<SlackChannel>>> + Send;
}

impl DirectoryLookup for WebApi {
    async fn users_list(&self) -> SlackResult<Vec<SlackUser>> {
        WebApi::users_list(self).await
    }

    async fn conversations_list(&self, exclude_archived: bool) -> SlackResult<Vec<SlackChannel>> {
        WebApi::conversations_list(self, exclude_archived).await
    }
}

/// Resolve a raw target name. A `#` prefix selects channel lookup over the
/// non-archived channel directory; anything else is a username lookup.
pub async fn resolve<D: DirectoryLookup>(
    directory: &D,
    raw: &str,
) -> Result<AnnoySubject, ResolveError> {
    if let Some(channel) = raw.strip_prefix('#') {
        let channels = directory.conversations_list(true).await?;
        resolve_channel(&channels, channel).ok_or_else(|| ResolveError::NotFound(raw.to_string()))
    } else {
        let users = directory.users_list().await?;
        resolve_user(&users, raw).ok_or_else(|| ResolveError::NotFound(raw.to_string()))
    }
}

/// Exact username match. The subject keeps the user *id*.
pub fn resolve_user(users: &[SlackUser], name: &str) -> Option<AnnoySubject> {
    users.iter().find(|u| u.name == name).map(|u| AnnoySubject {
        name: u.id.clone(),
        is_channel: false,
    })
}

/// Exact display-name match over non-archived channels. The subject keeps
/// the display *name*, not the id.
pub fn resolve_channel(channels: &[SlackChannel], name: &str) -> Option<AnnoySubject> {
    channels
        .iter()
        .filter(|c| !c.is_archived)
        .find(|c| c.name == name)
        .map(|c| AnnoySubject {
            name: c.name.clone(),
            is_channel: true,
        })
}
