// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.

//! Best-effort relay of "entity updated" events between connected UIs.
//! The payload is an opaque refresh hint, never authoritative data, and
//! there is no delivery or ordering guarantee: consumers re-fetch from the
//! store.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

/// Event names clients may relay. Anything else is dropped.
const RELAYED_EVENTS: [&str; 3] = ["task-updated", "client-updated", "employee-updated"];

/// How far a slow consumer may lag before the channel drops its oldest
/// events. Consumers re-fetch on the next hint anyway.
const CHANNEL_CAPACITY: usize = 64;

/// The envelope of a client event; the rest of the message is opaque.
#[derive(Deserialize, Debug)]
pub struct UpdateEvent {
    pub event: String,
}

/// A validated client event queued for every other connection.
#[derive(Clone, Debug)]
pub struct RelayedMessage {
    pub origin: u64,
    pub text: String,
}

/// Fan-out hub connecting every WebSocket session.
#[derive(Clone)]
pub struct EventHub {
    sender: broadcast::Sender<RelayedMessage>,
    connection_seq: Arc<AtomicU64>,
}

impl EventHub {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            sender,
            connection_seq: Arc::new(AtomicU64::new(1)),
        }
    }

    fn next_connection_id(&self) -> u64 {
        self.connection_seq.fetch_add(1, Ordering::Relaxed)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RelayedMessage> {
        self.sender.subscribe()
    }

    /// Fire-and-forget: an event with no listeners is simply dropped.
    pub fn publish(&self, origin: u64, text: String) {
        let _ = self.sender.send(RelayedMessage { origin, text });
    }
}

impl Default for EventHub {
    fn default() -> Self {
        Self::new()
    }
}

/// Accepts a text frame when it is one of the relayable update events.
pub fn parse_update_event(text: &str) -> Option<UpdateEvent> {
    let event: UpdateEvent = serde_json::from_str(text).ok()?;
    RELAYED_EVENTS
        .contains(&event.event.as_str())
        .then_some(event)
}

/// Handler for the `/ws` upgrade.
pub async fn ws_handler(ws: WebSocketUpgrade, State(hub): State<EventHub>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, hub))
}

async fn handle_socket(socket: WebSocket, hub: EventHub) {
    let connection_id = hub.next_connection_id();
    info!("WebSocket client {} connected.", connection_id);

    let mut events = hub.subscribe();
    let (mut sink, mut stream) = socket.split();

    loop {
        tokio::select! {
            incoming = stream.next() => match incoming {
                Some(Ok(Message::Text(text))) => match parse_update_event(&text) {
                    Some(event) => {
                        debug!("Relaying '{}' from client {}.", event.event, connection_id);
                        hub.publish(connection_id, text.to_string());
                    }
                    None => {
                        debug!("Ignoring unrecognized message from client {}.", connection_id);
                    }
                },
                Some(Ok(Message::Close(_))) | None => break,
                // Binary, ping and pong frames carry nothing to relay.
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    warn!("WebSocket error on client {}: {:?}", connection_id, e);
                    break;
                }
            },
            relayed = events.recv() => match relayed {
                // Every connection except the originator gets the event.
                Ok(message) if message.origin != connection_id => {
                    if sink.send(Message::Text(message.text.into())).await.is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    debug!(
                        "Client {} lagged behind by {} events.",
                        connection_id, skipped
                    );
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
        }
    }

    info!("WebSocket client {} disconnected.", connection_id);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_the_three_update_events() {
        for name in RELAYED_EVENTS {
            let text = format!(r#"{{"event":"{name}","data":{{"id":7}}}}"#);
            let event = parse_update_event(&text).unwrap();
            assert_eq!(event.event, name);
        }
    }

    #[test]
    fn test_parse_rejects_unknown_events_and_junk() {
        assert!(parse_update_event(r#"{"event":"user-updated"}"#).is_none());
        assert!(parse_update_event("not json at all").is_none());
        assert!(parse_update_event(r#"{"data":{}}"#).is_none());
    }

    #[tokio::test]
    async fn test_publish_reaches_every_subscriber() {
        let hub = EventHub::new();
        let mut first = hub.subscribe();
        let mut second = hub.subscribe();

        hub.publish(1, r#"{"event":"task-updated"}"#.to_string());

        let received = first.recv().await.unwrap();
        assert_eq!(received.origin, 1);
        assert_eq!(received.text, r#"{"event":"task-updated"}"#);
        assert_eq!(second.recv().await.unwrap().origin, 1);
    }

    #[tokio::test]
    async fn test_publish_without_listeners_is_dropped() {
        let hub = EventHub::new();
        // Must not error or block.
        hub.publish(1, r#"{"event":"client-updated"}"#.to_string());
    }

    #[test]
    fn test_connection_ids_are_unique() {
        let hub = EventHub::new();
        let first = hub.next_connection_id();
        let second = hub.next_connection_id();
        assert_ne!(first, second);
    }
}
