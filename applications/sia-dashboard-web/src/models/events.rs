use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use super::snapshot::Snapshot;
use crate::error::{DashboardError, Result};

/// Events delivered to the dashboard by the channel
#[derive(Debug, Clone, PartialEq)]
pub enum ServerEvent {
    Connect,
    Disconnect,
    ConnectError(String),
    DataUpdate(Snapshot),
    Heartbeat(Heartbeat),
    Error(ErrorReport),
    PumpSelectionChanged(SelectionReport),
    ValveControlPopup,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Heartbeat {
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorReport {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionReport {
    pub selected_pump: i64,
}

impl ServerEvent {
    /// Decode a named channel event and its optional payload
    pub fn decode(name: &str, payload: Option<Value>) -> Result<Self> {
        let event = match name {
            "data_update" => ServerEvent::DataUpdate(required(name, payload)?),
            "heartbeat" => ServerEvent::Heartbeat(optional(name, payload)?),
            "error" => ServerEvent::Error(optional(name, payload)?),
            "pump_selection_changed" => {
                ServerEvent::PumpSelectionChanged(required(name, payload)?)
            }
            "valve_control_popup" => ServerEvent::ValveControlPopup,
            other => return Err(DashboardError::UnknownEvent(other.to_string())),
        };

        Ok(event)
    }

    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            ServerEvent::Connect => "connect",
            ServerEvent::Disconnect => "disconnect",
            ServerEvent::ConnectError(_) => "connect_error",
            ServerEvent::DataUpdate(_) => "data_update",
            ServerEvent::Heartbeat(_) => "heartbeat",
            ServerEvent::Error(_) => "error",
            ServerEvent::PumpSelectionChanged(_) => "pump_selection_changed",
            ServerEvent::ValveControlPopup => "valve_control_popup",
        }
    }
}

fn required<T: DeserializeOwned>(event: &str, payload: Option<Value>) -> Result<T> {
    let payload = payload.ok_or_else(|| DashboardError::Payload {
        event: event.to_string(),
        message: "missing payload".to_string(),
    })?;

    serde_json::from_value(payload).map_err(|e| DashboardError::Payload {
        event: event.to_string(),
        message: e.to_string(),
    })
}

fn optional<T: DeserializeOwned + Default>(event: &str, payload: Option<Value>) -> Result<T> {
    match payload {
        None | Some(Value::Null) => Ok(T::default()),
        Some(payload) => required(event, Some(payload)),
    }
}

/// Commands sent from the dashboard to the backend
#[derive(Debug, Clone, PartialEq)]
pub enum ClientEvent {
    RequestData,
    SetPumpState { state: String },
    PumpSelectionChanged { selected_pump: u8, timestamp: i64 },
}

#[derive(Serialize)]
struct PumpStatePayload<'a> {
    state: &'a str,
}

#[derive(Serialize)]
struct SelectionPayload {
    selected_pump: u8,
    timestamp: i64,
}

impl ClientEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ClientEvent::RequestData => "request_data",
            ClientEvent::SetPumpState { .. } => "set_pump_state",
            ClientEvent::PumpSelectionChanged { .. } => "pump_selection_changed",
        }
    }

    /// Event payload, `None` for payload-less events
    pub fn payload(&self) -> Result<Option<Value>> {
        let payload = match self {
            ClientEvent::RequestData => None,
            ClientEvent::SetPumpState { state } => {
                Some(serde_json::to_value(PumpStatePayload { state })?)
            }
            ClientEvent::PumpSelectionChanged {
                selected_pump,
                timestamp,
            } => Some(serde_json::to_value(SelectionPayload {
                selected_pump: *selected_pump,
                timestamp: *timestamp,
            })?),
        };

        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_data_update() {
        let event = ServerEvent::decode(
            "data_update",
            Some(json!({"pump": {"target_rate": 12.34, "pump_state": "Run"}})),
        )
        .unwrap();

        match event {
            ServerEvent::DataUpdate(snapshot) => {
                let pump = snapshot.pump.unwrap();
                assert_eq!(pump.target_rate, Some(12.34));
                assert_eq!(pump.pump_state.as_deref(), Some("Run"));
            }
            other => panic!("Expected DataUpdate, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_heartbeat_without_payload() {
        let event = ServerEvent::decode("heartbeat", None).unwrap();

        assert_eq!(event, ServerEvent::Heartbeat(Heartbeat::default()));
    }

    #[test]
    fn test_decode_selection_requires_payload() {
        let err = ServerEvent::decode("pump_selection_changed", None).unwrap_err();

        assert!(matches!(err, DashboardError::Payload { .. }));
    }

    #[test]
    fn test_decode_unknown_event() {
        let err = ServerEvent::decode("reboot", None).unwrap_err();

        assert_eq!(err, DashboardError::UnknownEvent("reboot".to_string()));
    }

    #[test]
    fn test_client_event_payloads() {
        assert_eq!(ClientEvent::RequestData.payload().unwrap(), None);

        let set = ClientEvent::SetPumpState {
            state: "Stop".to_string(),
        };
        assert_eq!(set.name(), "set_pump_state");
        assert_eq!(set.payload().unwrap(), Some(json!({"state": "Stop"})));

        let select = ClientEvent::PumpSelectionChanged {
            selected_pump: 3,
            timestamp: 1_700_000_000_000,
        };
        assert_eq!(
            select.payload().unwrap(),
            Some(json!({"selected_pump": 3, "timestamp": 1_700_000_000_000i64}))
        );
    }
}
