//! Owned STOMP-over-WebSocket session.
//!
//! A session is opened once per connect and closed explicitly. The socket is
//! driven by a background tokio task; the UI talks to it through channels:
//! frames go out through an unbounded sender, and everything the broker says
//! comes back as [`SessionEvent`]s which the main loop drains with
//! `try_recv()`.

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::Message as WsMessage};
use tracing::{debug, info, warn};
use url::Url;

use super::error::{Result, StompError};
use super::frame::{Frame, FrameCommand};

/// STOMP versions offered in the CONNECT frame.
const ACCEPT_VERSION: &str = "1.2,1.1,1.0";

/// Identifier of a subscription within a session.
pub type SubscriptionId = String;

/// Something that happened on the connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The broker accepted the CONNECT frame.
    Connected { headers: Vec<(String, String)> },
    /// A MESSAGE frame arrived for a subscription.
    Message {
        subscription: String,
        destination: String,
        body: String,
    },
    /// A RECEIPT frame arrived.
    Receipt { receipt_id: String },
    /// The broker sent an ERROR frame, or sent something unreadable.
    ServerError { message: String, body: String },
    /// The WebSocket failed.
    WebSocketError { reason: String },
    /// The connection is gone.
    Disconnected { headers: Vec<(String, String)> },
}

/// Commands for the connection task.
#[derive(Debug)]
enum Outgoing {
    Frame(Frame),
    Close,
}

/// Parse and check a broker URL.
pub fn parse_broker_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url.trim()).map_err(|e| StompError::InvalidUrl(e.to_string()))?;
    match parsed.scheme() {
        "ws" | "wss" => Ok(parsed),
        other => Err(StompError::InvalidUrl(format!(
            "unsupported scheme '{}', expected ws or wss",
            other
        ))),
    }
}

/// A live STOMP session.
#[derive(Debug)]
pub struct StompSession {
    url: Url,
    tx: mpsc::UnboundedSender<Outgoing>,
    next_subscription: u64,
    closed: bool,
}

impl StompSession {
    /// Open a session to `url`.
    ///
    /// Returns as soon as the URL is validated. Connection progress is
    /// reported on `events`; a successful handshake yields
    /// [`SessionEvent::Connected`]. Must be called inside a tokio runtime.
    pub fn open(
        url: &str,
        connect_timeout: Duration,
        events: mpsc::UnboundedSender<SessionEvent>,
    ) -> Result<Self> {
        let url = parse_broker_url(url)?;
        let (tx, rx) = mpsc::unbounded_channel();

        info!(url = %url, "Opening STOMP session");
        tokio::spawn(run_connection(url.clone(), connect_timeout, rx, events));

        Ok(Self {
            url,
            tx,
            next_subscription: 0,
            closed: false,
        })
    }

    /// The broker URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Whether `close` has been called.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn send_frame(&self, frame: Frame) -> Result<()> {
        if self.closed {
            return Err(StompError::Closed);
        }
        self.tx
            .send(Outgoing::Frame(frame))
            .map_err(|_| StompError::Closed)
    }

    /// Send `body` to `destination`.
    pub fn publish(&self, destination: &str, body: &str) -> Result<()> {
        debug!(destination, bytes = body.len(), "Publishing");
        self.send_frame(
            Frame::new(FrameCommand::Send)
                .header("destination", destination)
                .header("content-length", body.len().to_string())
                .body(body),
        )
    }

    /// Subscribe to `destination` and return the new subscription id.
    pub fn subscribe(&mut self, destination: &str) -> Result<SubscriptionId> {
        let id = format!("sub-{}", self.next_subscription);
        self.send_frame(
            Frame::new(FrameCommand::Subscribe)
                .header("id", id.as_str())
                .header("destination", destination)
                .header("ack", "auto"),
        )?;
        self.next_subscription += 1;
        debug!(id = %id, destination, "Subscribed");
        Ok(id)
    }

    /// Drop a subscription.
    pub fn unsubscribe(&self, id: &str) -> Result<()> {
        debug!(id, "Unsubscribing");
        self.send_frame(Frame::new(FrameCommand::Unsubscribe).header("id", id))
    }

    /// Send DISCONNECT and close the socket. Calling it twice is harmless.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        info!(url = %self.url, "Closing STOMP session");
        let _ = self.tx.send(Outgoing::Frame(Frame::new(FrameCommand::Disconnect)));
        let _ = self.tx.send(Outgoing::Close);
        self.closed = true;
    }
}

impl Drop for StompSession {
    fn drop(&mut self) {
        self.close();
    }
}

/// Drive one WebSocket connection until either side closes it.
async fn run_connection(
    url: Url,
    connect_timeout: Duration,
    mut outgoing: mpsc::UnboundedReceiver<Outgoing>,
    events: mpsc::UnboundedSender<SessionEvent>,
) {
    let stream = match tokio::time::timeout(connect_timeout, connect_async(url.as_str())).await {
        Ok(Ok((stream, _response))) => stream,
        Ok(Err(e)) => {
            warn!(error = %e, "WebSocket connect failed");
            let _ = events.send(SessionEvent::WebSocketError {
                reason: e.to_string(),
            });
            return;
        }
        Err(_) => {
            warn!(timeout = ?connect_timeout, "WebSocket connect timed out");
            let _ = events.send(SessionEvent::WebSocketError {
                reason: format!("connection timed out after {:?}", connect_timeout),
            });
            return;
        }
    };

    let (mut write, mut read) = stream.split();

    let connect = Frame::new(FrameCommand::Connect)
        .header("accept-version", ACCEPT_VERSION)
        .header("host", url.host_str().unwrap_or_default())
        .header("heart-beat", "0,0");
    if let Err(e) = write.send(WsMessage::text(connect.encode())).await {
        let _ = events.send(SessionEvent::WebSocketError {
            reason: e.to_string(),
        });
        return;
    }

    // The broker gets the same timeout to answer CONNECT
    let handshake = tokio::time::sleep(connect_timeout);
    tokio::pin!(handshake);
    let mut stomp_connected = false;

    loop {
        tokio::select! {
            biased;

            _ = &mut handshake, if !stomp_connected => {
                warn!(timeout = ?connect_timeout, "Broker did not answer CONNECT");
                let _ = write.close().await;
                let _ = events.send(SessionEvent::WebSocketError {
                    reason: format!("no CONNECTED frame within {:?}", connect_timeout),
                });
                break;
            }

            command = outgoing.recv() => match command {
                Some(Outgoing::Frame(frame)) => {
                    if let Err(e) = write.send(WsMessage::text(frame.encode())).await {
                        warn!(error = %e, "WebSocket send failed");
                        let _ = events.send(SessionEvent::WebSocketError { reason: e.to_string() });
                        break;
                    }
                }
                Some(Outgoing::Close) | None => {
                    let _ = write.close().await;
                    let _ = events.send(SessionEvent::Disconnected { headers: Vec::new() });
                    break;
                }
            },
            incoming = read.next() => match incoming {
                Some(Ok(WsMessage::Text(text))) => {
                    stomp_connected |= dispatch(text.as_str(), &events);
                }
                Some(Ok(WsMessage::Binary(data))) => {
                    stomp_connected |= dispatch(&String::from_utf8_lossy(&data), &events);
                }
                Some(Ok(WsMessage::Close(reason))) => {
                    debug!(reason = ?reason, "Broker closed the WebSocket");
                    let _ = events.send(SessionEvent::Disconnected { headers: Vec::new() });
                    break;
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    warn!(error = %e, "WebSocket read failed");
                    let _ = events.send(SessionEvent::WebSocketError { reason: e.to_string() });
                    break;
                }
                None => {
                    let _ = events.send(SessionEvent::Disconnected { headers: Vec::new() });
                    break;
                }
            },
        }
    }
}

/// Turn broker frames into session events.
///
/// Returns true if a CONNECTED frame was among them.
fn dispatch(text: &str, events: &mpsc::UnboundedSender<SessionEvent>) -> bool {
    let frames = match Frame::decode_all(text) {
        Ok(frames) => frames,
        Err(e) => {
            warn!(error = %e, "Dropping unreadable broker data");
            let _ = events.send(SessionEvent::ServerError {
                message: e.to_string(),
                body: text.to_string(),
            });
            return false;
        }
    };

    let mut connected = false;
    for frame in frames {
        let event = match frame.command {
            FrameCommand::Connected => {
                connected = true;
                SessionEvent::Connected {
                    headers: frame.headers,
                }
            }
            FrameCommand::Message => SessionEvent::Message {
                subscription: frame.get_header("subscription").unwrap_or_default().to_string(),
                destination: frame.get_header("destination").unwrap_or_default().to_string(),
                body: frame.body,
            },
            FrameCommand::Receipt => SessionEvent::Receipt {
                receipt_id: frame.get_header("receipt-id").unwrap_or_default().to_string(),
            },
            FrameCommand::Error => SessionEvent::ServerError {
                message: frame.get_header("message").unwrap_or_default().to_string(),
                body: frame.body,
            },
            other => {
                debug!(command = %other, "Ignoring unexpected frame from broker");
                continue;
            }
        };
        if events.send(event).is_err() {
            break;
        }
    }
    connected
}
