//! The event reactor: consume the RTM stream forever, and whenever the
//! target is typing, type back.
//!
//! Strictly single-threaded and in-order: one event at a time, each
//! conversation lookup awaited before the next event is considered. Slow
//! lookups delay later events; that is acceptable here — no throughput
//! promise is made.

use std::future::Future;

use slack_rtm::{Conversation, Result as SlackResult, RtmEvent, RtmSender, WebApi};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::resolver::AnnoySubject;

/// Per-event conversation lookup. Implement this to replace the Web API in
/// tests.
pub trait ConversationLookup {
    fn conversation_info(
        &self,
        channel: &str,
    ) -> impl Future<Output = SlackResult<Conversation>> + Send;
}

impl ConversationLookup for WebApi {
    async fn conversation_info(&self, channel: &str) -> SlackResult<Conversation> {
        WebApi::conversations_info(self, channel).await
    }
}

/// Fire-and-forget typing indicator. Synchronous: the real implementation
/// only enqueues a frame.
pub trait TypingSender {
    fn send_typing(&self, channel: &str) -> SlackResult<()>;
}

impl TypingSender for RtmSender {
    fn send_typing(&self, channel: &str) -> SlackResult<()> {
        RtmSender::send_typing(self, channel)
    }
}

/// Body of the consumption loop. Returns only when the event stream ends
/// (connection closed); there is no internal stop condition.
pub async fn run<L, S>(
    target: &AnnoySubject,
    lookup: &L,
    typing: &S,
    mut events: UnboundedReceiver<RtmEvent>,
) where
    L: ConversationLookup,
    S: TypingSender,
{
    while let Some(event) = events.recv().await {
        let RtmEvent::UserTyping { channel, user } = event else {
            continue;
        };

        // Fresh lookup per event, never cached; a failed lookup drops
        // just this event.
        let conversation = match lookup.conversation_info(&channel).await {
            Ok(c) => c,
            Err(e) => {
                tracing::debug!(
                    error = %e,
                    channel = %channel,
                    "conversation lookup failed, dropping event"
                );
                continue;
            }
        };

        if !matches(target, &conversation, &user) {
            continue;
        }

        tracing::info!(channel = %channel, "target is typing, annoying them now");
        if let Err(e) = typing.send_typing(&channel) {
            tracing::debug!(error = %e, "failed to send typing indicator");
        }
    }
}

/// All conditions must hold: the conversation's channel-ness equals the
/// target's, then channel targets compare display names while user targets
/// compare the typing user's id.
pub fn matches(target: &AnnoySubject, conversation: &Conversation, typing_user: &str) -> bool {
    if conversation.is_channel != target.is_channel {
        return false;
    }
    if target.is_channel {
        conversation.name.as_deref() == Some(target.name.as_str())
    } else {
        typing_user == target.name
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use slack_rtm::SlackError;
    use tokio::sync::mpsc;

    use super::*;

    fn user_target(id: &str) -> AnnoySubject {
        AnnoySubject {
            name: id.to_string(),
            is_channel: false,
        }
    }

    fn channel_target(name: &str) -> AnnoySubject {
        AnnoySubject {
            name: name.to_string(),
            is_channel: true,
        }
    }

    fn dm(id: &str) -> Conversation {
        Conversation {
            id: id.to_string(),
            name: None,
            is_channel: false,
        }
    }

    fn channel(id: &str, name: &str) -> Conversation {
        Conversation {
            id: id.to_string(),
            name: Some(name.to_string()),
            is_channel: true,
        }
    }

    fn typing(channel: &str, user: &str) -> RtmEvent {
        RtmEvent::UserTyping {
            channel: channel.to_string(),
            user: user.to_string(),
        }
    }

    // ── Match predicate truth table ───────────────────────────────────────────

    #[test]
    fn channel_target_matches_only_the_named_channel() {
        let target = channel_target("general");
        assert!(matches(&target, &channel("C1", "general"), "U1"));
        assert!(!matches(&target, &channel("C2", "random"), "U1"));
    }

    #[test]
    fn user_target_matches_only_the_user_in_a_dm() {
        let target = user_target("U1");
        assert!(matches(&target, &dm("D1"), "U1"));
        assert!(!matches(&target, &dm("D1"), "U2"));
    }

    #[test]
    fn channel_target_never_matches_a_dm() {
        // Even a DM "named" like the channel must not match.
        let target = channel_target("general");
        assert!(!matches(&target, &dm("D1"), "U1"));
        let named_dm = Conversation {
            id: "D1".to_string(),
            name: Some("general".to_string()),
            is_channel: false,
        };
        assert!(!matches(&target, &named_dm, "U1"));
    }

    #[test]
    fn user_target_never_matches_a_channel() {
        let target = user_target("U1");
        assert!(!matches(&target, &channel("C1", "general"), "U1"));
    }

    // ── Reactor loop ──────────────────────────────────────────────────────────

    /// Serves a fixed conversation table; unknown ids fail the lookup.
    struct FakeLookup {
        conversations: HashMap<String, Conversation>,
    }

    impl FakeLookup {
        fn new(conversations: &[Conversation]) -> Self {
            Self {
                conversations: conversations
                    .iter()
                    .map(|c| (c.id.clone(), c.clone()))
                    .collect(),
            }
        }
    }

    impl ConversationLookup for FakeLookup {
        async fn conversation_info(&self, channel: &str) -> SlackResult<Conversation> {
            self.conversations
                .get(channel)
                .cloned()
                .ok_or(SlackError::Api {
                    method: "conversations.info",
                    code: "channel_not_found".to_string(),
                })
        }
    }

    /// Records every typing indicator sent.
    #[derive(Clone, Default)]
    struct RecordingTyper {
        sent: Arc<Mutex<Vec<String>>>,
        fail: bool,
    }

    impl RecordingTyper {
        fn sent(&self) -> Vec<String> {
            self.sent.lock().unwrap().clone()
        }
    }

    impl TypingSender for RecordingTyper {
        fn send_typing(&self, channel: &str) -> SlackResult<()> {
            if self.fail {
                return Err(SlackError::Closed);
            }
            self.sent.lock().unwrap().push(channel.to_string());
            Ok(())
        }
    }

    /// Queue `events`, close the stream, and run the reactor to completion.
    async fn run_reactor(
        target: &AnnoySubject,
        lookup: &FakeLookup,
        typer: &RecordingTyper,
        events: Vec<RtmEvent>,
    ) {
        let (tx, rx) = mpsc::unbounded_channel();
        for event in events {
            tx.send(event).unwrap();
        }
        drop(tx);
        run(target, lookup, typer, rx).await;
    }

    #[tokio::test]
    async fn target_user_typing_in_a_dm_fires() {
        let target = user_target("U1");
        let lookup = FakeLookup::new(&[dm("D1")]);
        let typer = RecordingTyper::default();

        run_reactor(&target, &lookup, &typer, vec![typing("D1", "U1")]).await;

        assert_eq!(typer.sent(), ["D1"]);
    }

    #[tokio::test]
    async fn wrong_user_in_the_same_dm_does_not_fire() {
        let target = user_target("U1");
        let lookup = FakeLookup::new(&[dm("D1")]);
        let typer = RecordingTyper::default();

        run_reactor(&target, &lookup, &typer, vec![typing("D1", "U2")]).await;

        assert!(typer.sent().is_empty());
    }

    #[tokio::test]
    async fn anyone_typing_in_the_target_channel_fires() {
        let target = channel_target("general");
        let lookup = FakeLookup::new(&[channel("C1", "general"), channel("C2", "random")]);
        let typer = RecordingTyper::default();

        run_reactor(
            &target,
            &lookup,
            &typer,
            vec![
                typing("C1", "U7"),
                typing("C2", "U7"),
                typing("C1", "U8"),
            ],
        )
        .await;

        // The indicator goes back into the conversation the event came from.
        assert_eq!(typer.sent(), ["C1", "C1"]);
    }

    #[tokio::test]
    async fn non_typing_events_are_ignored() {
        let target = user_target("U1");
        let lookup = FakeLookup::new(&[dm("D1")]);
        let typer = RecordingTyper::default();

        run_reactor(
            &target,
            &lookup,
            &typer,
            vec![RtmEvent::Hello, RtmEvent::Other, typing("D1", "U1")],
        )
        .await;

        assert_eq!(typer.sent(), ["D1"]);
    }

    #[tokio::test]
    async fn failed_conversation_lookup_drops_only_that_event() {
        let target = user_target("U1");
        // D9 is unknown to the lookup table.
        let lookup = FakeLookup::new(&[dm("D1")]);
        let typer = RecordingTyper::default();

        run_reactor(
            &target,
            &lookup,
            &typer,
            vec![typing("D9", "U1"), typing("D1", "U1")],
        )
        .await;

        assert_eq!(typer.sent(), ["D1"]);
    }

    #[tokio::test]
    async fn send_failure_does_not_stop_the_loop() {
        let target = user_target("U1");
        let lookup = FakeLookup::new(&[dm("D1")]);
        let typer = RecordingTyper {
            fail: true,
            ..Default::default()
        };

        // Two qualifying events; the loop must survive both failed sends.
        run_reactor(
            &target,
            &lookup,
            &typer,
            vec![typing("D1", "U1"), typing("D1", "U1")],
        )
        .await;

        assert!(typer.sent().is_empty());
    }

    #[tokio::test]
    async fn repeated_typing_fires_every_time() {
        let target = user_target("U1");
        let lookup = FakeLookup::new(&[dm("D1")]);
        let typer = RecordingTyper::default();

        let events = vec![typing("D1", "U1"); 5];
        run_reactor(&target, &lookup, &typer, events).await;

        assert_eq!(typer.sent().len(), 5);
    }
}
