use std::cell::Cell;
use std::rc::Rc;

use futures::channel::mpsc;
use futures::{SinkExt, StreamExt};
use gloo_net::websocket::{futures::WebSocket, Message};
use gloo_timers::callback::Timeout;
use wasm_bindgen_futures::spawn_local;

use super::packet::Packet;
use crate::error::{DashboardError, Result};
use crate::models::{ClientEvent, ServerEvent};

/// Callback receiving every event produced by one socket
pub type EventHandler = Rc<dyn Fn(ServerEvent)>;

enum Outbound {
    Frame(String),
    Close,
}

/// Handle to one WebSocket connection to the backend
#[derive(Clone)]
pub struct Channel {
    tx: mpsc::UnboundedSender<Outbound>,
}

impl Channel {
    /// Open the socket and start the reader and writer tasks
    pub fn open(url: &str, on_event: EventHandler) -> Result<Self> {
        let ws = WebSocket::open(url).map_err(|e| DashboardError::WebSocket(e.to_string()))?;
        let (mut sink, mut stream) = ws.split();
        let (tx, mut rx) = mpsc::unbounded::<Outbound>();

        spawn_local(async move {
            while let Some(outbound) = rx.next().await {
                match outbound {
                    Outbound::Frame(frame) => {
                        log::debug!("-> {}", frame);
                        if let Err(e) = sink.send(Message::Text(frame)).await {
                            log::warn!("Failed to send frame: {}", e);
                            break;
                        }
                    }
                    Outbound::Close => break,
                }
            }
            let _ = sink.close().await;
        });

        let reply = tx.clone();
        spawn_local(async move {
            let liveness = Liveness::new(reply.clone(), on_event);
            let mut watchdog: Option<Timeout> = None;
            let mut deadline_ms: Option<u32> = None;

            while let Some(message) = stream.next().await {
                if liveness.finished.get() {
                    return;
                }
                let text = match message {
                    Ok(Message::Text(text)) => text,
                    Ok(Message::Bytes(_)) => {
                        log::warn!("Ignoring binary frame");
                        continue;
                    }
                    Err(e) => {
                        log::warn!("WebSocket error: {}", e);
                        break;
                    }
                };
                log::debug!("<- {}", text);

                let packet = match Packet::decode(&text) {
                    Ok(packet) => packet,
                    Err(e) => {
                        log::warn!("Dropping frame: {}", e);
                        continue;
                    }
                };

                match packet {
                    Packet::Open(handshake) => {
                        log::debug!(
                            "Engine session {} (ping interval {}ms)",
                            handshake.sid,
                            handshake.ping_interval
                        );
                        deadline_ms = handshake.liveness_timeout_ms();
                        watchdog = liveness.arm(deadline_ms);
                        send_packet(&reply, &Packet::Connect);
                    }
                    Packet::Ping => {
                        watchdog = liveness.arm(deadline_ms);
                        send_packet(&reply, &Packet::Pong);
                    }
                    Packet::Close => break,
                    packet => match packet.into_event() {
                        Some(Ok(ServerEvent::Disconnect)) => {
                            drop(watchdog.take());
                            liveness.finish(ServerEvent::Disconnect);
                            return;
                        }
                        Some(Ok(event)) => {
                            if matches!(event, ServerEvent::Connect) {
                                liveness.connected.set(true);
                            }
                            (liveness.on_event)(event);
                        }
                        Some(Err(e)) => log::warn!("Dropping event: {}", e),
                        None => {}
                    },
                }
            }

            drop(watchdog.take());
            let event = if liveness.connected.get() {
                ServerEvent::Disconnect
            } else {
                ServerEvent::ConnectError("Connection closed before handshake".to_string())
            };
            liveness.finish(event);
        });

        Ok(Self { tx })
    }

    /// Emit a client event on the channel
    pub fn emit(&self, event: &ClientEvent) -> Result<()> {
        let frame = Packet::try_from(event)?.encode()?;
        self.tx
            .unbounded_send(Outbound::Frame(frame))
            .map_err(|e| DashboardError::WebSocket(e.to_string()))
    }

    /// Leave the namespace and close the socket
    pub fn close(&self) {
        send_packet(&self.tx, &Packet::Disconnect);
        let _ = self.tx.unbounded_send(Outbound::Close);
    }
}

/// Ends one socket exactly once, either when the stream closes or when the
/// server stops pinging
#[derive(Clone)]
struct Liveness {
    reply: mpsc::UnboundedSender<Outbound>,
    on_event: EventHandler,
    connected: Rc<Cell<bool>>,
    finished: Rc<Cell<bool>>,
}

impl Liveness {
    fn new(reply: mpsc::UnboundedSender<Outbound>, on_event: EventHandler) -> Self {
        Self {
            reply,
            on_event,
            connected: Rc::new(Cell::new(false)),
            finished: Rc::new(Cell::new(false)),
        }
    }

    /// Start (or restart) the ping deadline; replacing the previous
    /// `Timeout` cancels it
    fn arm(&self, deadline_ms: Option<u32>) -> Option<Timeout> {
        let deadline_ms = deadline_ms?;
        let liveness = self.clone();
        Some(Timeout::new(deadline_ms, move || {
            log::warn!("No ping from server for {}ms, dropping connection", deadline_ms);
            let event = if liveness.connected.get() {
                ServerEvent::Disconnect
            } else {
                ServerEvent::ConnectError("Handshake timed out".to_string())
            };
            liveness.finish(event);
        }))
    }

    fn finish(&self, event: ServerEvent) {
        if self.finished.replace(true) {
            return;
        }
        let _ = self.reply.unbounded_send(Outbound::Close);
        (self.on_event)(event);
    }
}

fn send_packet(tx: &mpsc::UnboundedSender<Outbound>, packet: &Packet) {
    match packet.encode() {
        Ok(frame) => {
            let _ = tx.unbounded_send(Outbound::Frame(frame));
        }
        Err(e) => log::warn!("Failed to encode packet: {}", e),
    }
}
