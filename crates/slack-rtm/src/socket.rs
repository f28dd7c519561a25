//! RTM websocket connection.
//!
//! [`RtmClient::connect`] opens the socket returned by `rtm.connect` and
//! spawns a connection-management task. The caller gets back two handles:
//! an ordered, unbounded event receiver (single producer, single consumer)
//! and an [`RtmSender`] for outbound typing frames. Sends are
//! fire-and-forget: they enqueue a frame and never wait for an ack.
//!
//! There is no reconnection. When Slack closes the socket the management
//! task exits and the event receiver runs dry, which is the consumer's
//! signal to stop.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

use crate::error::{Result, SlackError};
use crate::event::RtmEvent;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

pub struct RtmClient {
    events: mpsc::UnboundedReceiver<RtmEvent>,
    sender: RtmSender,
}

/// Outbound half of the RTM connection. Cheap to clone.
#[derive(Clone)]
pub struct RtmSender {
    outbound: mpsc::UnboundedSender<String>,
    next_id: Arc<AtomicU64>,
}

impl RtmClient {
    pub async fn connect(wss_url: &str) -> Result<Self> {
        let (socket, _response) = connect_async(wss_url).await?;
        Ok(Self::from_socket(socket))
    }

    fn from_socket(socket: WsStream) -> Self {
        let (event_tx, events) = mpsc::unbounded_channel();
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        tokio::spawn(manage_connection(socket, event_tx, outbound_rx));
        Self {
            events,
            sender: RtmSender {
                outbound: outbound_tx,
                next_id: Arc::new(AtomicU64::new(1)),
            },
        }
    }

    /// Consume the client, yielding the outbound handle and the event
    /// receiver for the consumption loop.
    pub fn split(self) -> (RtmSender, mpsc::UnboundedReceiver<RtmEvent>) {
        (self.sender, self.events)
    }
}

impl RtmSender {
    /// Enqueue a typing indicator for `channel`. Errors only when the
    /// connection-management task is already gone.
    pub fn send_typing(&self, channel: &str) -> Result<()> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let frame = serde_json::json!({
            "id": id,
            "type": "typing",
            "channel": channel,
        })
        .to_string();
        self.outbound.send(frame).map_err(|_| SlackError::Closed)
    }
}

/// Runs concurrently with the consumer: pumps inbound frames into the
/// event channel, writes queued outbound frames, answers pings.
async fn manage_connection(
    socket: WsStream,
    events: mpsc::UnboundedSender<RtmEvent>,
    mut outbound: mpsc::UnboundedReceiver<String>,
) {
    let (mut write, mut read) = socket.split();
    loop {
        tokio::select! {
            frame = read.next() => match frame {
                Some(Ok(Message::Text(text))) => {
                    match serde_json::from_str::<RtmEvent>(text.as_str()) {
                        Ok(event) => {
                            if events.send(event).is_err() {
                                // Consumer dropped the receiver.
                                break;
                            }
                        }
                        // Reply acks carry no "type" tag.
                        Err(e) => tracing::trace!(error = %e, "ignoring untyped RTM frame"),
                    }
                }
                Some(Ok(Message::Ping(payload))) => {
                    if write.send(Message::Pong(payload)).await.is_err() {
                        break;
                    }
                }
                Some(Ok(Message::Close(_))) | None => {
                    tracing::info!("RTM connection closed");
                    break;
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    tracing::warn!(error = %e, "RTM read error");
                    break;
                }
            },
            frame = outbound.recv() => match frame {
                Some(text) => {
                    if let Err(e) = write.send(Message::Text(text.into())).await {
                        tracing::warn!(error = %e, "RTM write error");
                        break;
                    }
                }
                // Every RtmSender dropped.
                None => break,
            },
        }
    }
}
