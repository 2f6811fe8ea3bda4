//! Engine.IO v4 / Socket.IO v5 text frame codec.
//!
//! Only the subset spoken by the dashboard backend over the WebSocket
//! transport is supported: no binary attachments, no acknowledgements.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{DashboardError, Result};
use crate::models::{ClientEvent, ServerEvent};

/// Engine.IO open handshake
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenHandshake {
    pub sid: String,
    #[serde(default)]
    pub ping_interval: u64,
    #[serde(default)]
    pub ping_timeout: u64,
}

impl OpenHandshake {
    /// How long to wait for the next server ping before treating the
    /// connection as dead; `None` when the server advertised no interval
    pub fn liveness_timeout_ms(&self) -> Option<u32> {
        if self.ping_interval == 0 {
            return None;
        }
        let total = self.ping_interval.saturating_add(self.ping_timeout);
        // browser timers fire immediately past i32::MAX
        Some(total.min(i32::MAX as u64) as u32)
    }
}

/// A decoded text frame
#[derive(Debug, Clone, PartialEq)]
pub enum Packet {
    Open(OpenHandshake),
    Close,
    Ping,
    Pong,
    Noop,
    Connect,
    Disconnect,
    Event {
        name: String,
        payload: Option<Value>,
    },
    ConnectError(String),
}

impl Packet {
    /// Decode one WebSocket text frame
    pub fn decode(frame: &str) -> Result<Self> {
        let mut chars = frame.chars();
        let engine_type = chars
            .next()
            .ok_or_else(|| DashboardError::Packet("empty frame".to_string()))?;
        let rest = chars.as_str();

        match engine_type {
            '0' => Ok(Packet::Open(serde_json::from_str(rest)?)),
            '1' => Ok(Packet::Close),
            '2' => Ok(Packet::Ping),
            '3' => Ok(Packet::Pong),
            '4' => decode_message(rest),
            '6' => Ok(Packet::Noop),
            other => Err(DashboardError::Packet(format!(
                "unsupported engine packet type '{}'",
                other
            ))),
        }
    }

    /// Encode as a WebSocket text frame
    pub fn encode(&self) -> Result<String> {
        let frame = match self {
            Packet::Close => "1".to_string(),
            Packet::Ping => "2".to_string(),
            Packet::Pong => "3".to_string(),
            Packet::Noop => "6".to_string(),
            Packet::Connect => "40".to_string(),
            Packet::Disconnect => "41".to_string(),
            Packet::Event { name, payload } => {
                let mut args = vec![Value::String(name.clone())];
                if let Some(payload) = payload {
                    args.push(payload.clone());
                }
                format!("42{}", serde_json::to_string(&args)?)
            }
            Packet::Open(_) | Packet::ConnectError(_) => {
                return Err(DashboardError::Packet(
                    "server-only packet cannot be encoded".to_string(),
                ))
            }
        };

        Ok(frame)
    }

    /// Translate a server packet into a dashboard event, if it carries one
    pub fn into_event(self) -> Option<Result<ServerEvent>> {
        match self {
            Packet::Connect => Some(Ok(ServerEvent::Connect)),
            Packet::Disconnect => Some(Ok(ServerEvent::Disconnect)),
            Packet::ConnectError(message) => Some(Ok(ServerEvent::ConnectError(message))),
            Packet::Event { name, payload } => Some(ServerEvent::decode(&name, payload)),
            _ => None,
        }
    }
}

impl TryFrom<&ClientEvent> for Packet {
    type Error = DashboardError;

    fn try_from(event: &ClientEvent) -> Result<Self> {
        Ok(Packet::Event {
            name: event.name().to_string(),
            payload: event.payload()?,
        })
    }
}

fn decode_message(body: &str) -> Result<Packet> {
    let mut chars = body.chars();
    let socket_type = chars
        .next()
        .ok_or_else(|| DashboardError::Packet("empty message packet".to_string()))?;
    let data = skip_ack_id(skip_namespace(chars.as_str()));

    match socket_type {
        '0' => Ok(Packet::Connect),
        '1' => Ok(Packet::Disconnect),
        '2' => decode_event(data),
        '4' => Ok(Packet::ConnectError(decode_connect_error(data))),
        other => Err(DashboardError::Packet(format!(
            "unsupported socket packet type '{}'",
            other
        ))),
    }
}

/// Strip a `/namespace,` prefix
fn skip_namespace(data: &str) -> &str {
    if data.starts_with('/') {
        match data.find(',') {
            Some(idx) => &data[idx + 1..],
            None => "",
        }
    } else {
        data
    }
}

fn skip_ack_id(data: &str) -> &str {
    data.trim_start_matches(|c: char| c.is_ascii_digit())
}

fn decode_event(data: &str) -> Result<Packet> {
    let args: Vec<Value> = serde_json::from_str(data)?;
    let mut args = args.into_iter();

    let name = match args.next() {
        Some(Value::String(name)) => name,
        _ => {
            return Err(DashboardError::Packet(
                "event name must be a string".to_string(),
            ))
        }
    };

    Ok(Packet::Event {
        name,
        payload: args.next(),
    })
}

fn decode_connect_error(data: &str) -> String {
    match serde_json::from_str::<Value>(data) {
        Ok(Value::Object(map)) => map
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("Connection refused")
            .to_string(),
        Ok(Value::String(message)) => message,
        _ => "Connection refused".to_string(),
    }
}
