//! Inbound RTM frame model.
//!
//! Slack tags every RTM frame with a `type` field. Only `user_typing`
//! matters to this bot; everything else collapses into [`RtmEvent::Other`].
//! Frames without a `type` at all (reply acks to our own sends) fail to
//! parse and are dropped by the socket reader.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "type")]
#[serde(rename_all = "snake_case")]
pub enum RtmEvent {
    /// First frame after the websocket opens.
    Hello,
    /// Someone started composing a message in a conversation.
    UserTyping { channel: String, user: String },
    #[serde(other)]
    Other,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_user_typing() {
        let frame = r#"{"type":"user_typing","channel":"D024BE91L","user":"U2147483697"}"#;
        let event: RtmEvent = serde_json::from_str(frame).unwrap();
        match event {
            RtmEvent::UserTyping { channel, user } => {
                assert_eq!(channel, "D024BE91L");
                assert_eq!(user, "U2147483697");
            }
            other => panic!("expected UserTyping, got {other:?}"),
        }
    }

    #[test]
    fn parses_hello() {
        let event: RtmEvent = serde_json::from_str(r#"{"type":"hello"}"#).unwrap();
        assert!(matches!(event, RtmEvent::Hello));
    }

    #[test]
    fn unknown_type_is_other() {
        let frame = r#"{"type":"presence_change","user":"U1","presence":"away"}"#;
        let event: RtmEvent = serde_json::from_str(frame).unwrap();
        assert!(matches!(event, RtmEvent::Other));
    }

    #[test]
    fn message_event_is_other() {
        let frame = r#"{"type":"message","channel":"C1","user":"U1","text":"hi","ts":"1.2"}"#;
        let event: RtmEvent = serde_json::from_str(frame).unwrap();
        assert!(matches!(event, RtmEvent::Other));
    }

    #[test]
    fn untyped_frame_fails_to_parse() {
        // Reply acks look like {"ok":true,"reply_to":1,...} — no "type" tag.
        assert!(serde_json::from_str::<RtmEvent>(r#"{"ok":true,"reply_to":1}"#).is_err());
    }
}
