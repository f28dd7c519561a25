//! Slack client layer for typeback.
//!
//! Two halves, matching the two ways the bot talks to Slack:
//!
//! - [`api`] — Web API lookups over HTTPS (`users.list`,
//!   `conversations.list`, `conversations.info`, `rtm.connect`).
//! - [`socket`] — the RTM websocket: an ordered inbound [`RtmEvent`]
//!   stream plus an outbound handle for typing indicators.

pub mod api;
pub mod error;
pub mod event;
pub mod socket;

pub use api::{Conversation, SlackChannel, SlackUser, WebApi};
pub use error::{Result, SlackError};
pub use event::RtmEvent;
pub use socket::{RtmClient, RtmSender};
