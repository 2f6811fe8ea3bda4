use thiserror::Error;

/// Dashboard error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DashboardError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Malformed packet: {0}")]
    Packet(String),
    #[error("Unknown event: {0}")]
    UnknownEvent(String),
    #[error("Invalid payload for {event}: {message}")]
    Payload { event: String, message: String },
    #[error("WebSocket error: {0}")]
    WebSocket(String),
    #[error("Not connected to server")]
    NotConnected,
}

impl From<serde_json::Error> for DashboardError {
    fn from(err: serde_json::Error) -> Self {
        DashboardError::Packet(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
