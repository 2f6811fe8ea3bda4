use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// One full telemetry payload pushed by the control backend.
///
/// Every sub-record is optional: an absent sub-record means "no update for
/// that area", never "cleared".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub pump: Option<PumpRecord>,
    #[serde(default)]
    pub pump2: Option<PumpRecord>,
    #[serde(default)]
    pub valve: Option<ValveRecord>,
    #[serde(default)]
    pub solar: Option<SolarRecord>,
    #[serde(default)]
    pub tank: Option<TankRecord>,
    #[serde(default)]
    pub skid: Option<SkidRecord>,
    #[serde(default)]
    pub system: Option<SystemRecord>,
    #[serde(default)]
    pub selector: Option<SelectorRecord>,
    #[serde(default)]
    pub faults: Option<FaultsRecord>,
}

/// Pump controller readings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PumpRecord {
    #[serde(default, deserialize_with = "lenient_option_f64")]
    pub target_rate: Option<f64>,
    #[serde(default, deserialize_with = "lenient_option_f64")]
    pub flow_rate: Option<f64>,
    #[serde(default)]
    pub pump_state: Option<String>,
}

/// Valve output state. `true` means the valve is closed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValveRecord {
    #[serde(default, deserialize_with = "lenient_option_bool")]
    pub state: Option<bool>,
}

/// Aggregated solar controller readings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SolarRecord {
    #[serde(default, deserialize_with = "lenient_option_f64")]
    pub battery_voltage: Option<f64>,
    #[serde(default, deserialize_with = "lenient_option_f64")]
    pub battery_percentage: Option<f64>,
    #[serde(default, deserialize_with = "lenient_option_f64")]
    pub panel_power: Option<f64>,
    #[serde(default, deserialize_with = "lenient_option_f64")]
    pub battery_ah: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TankRecord {
    #[serde(default, deserialize_with = "lenient_option_f64")]
    pub tank_level_mm: Option<f64>,
    #[serde(default, deserialize_with = "lenient_option_f64")]
    pub tank_level_percent: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkidRecord {
    #[serde(default, deserialize_with = "lenient_option_f64")]
    pub skid_flow: Option<f64>,
    #[serde(default, deserialize_with = "lenient_option_f64")]
    pub skid_pressure: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemRecord {
    #[serde(default)]
    pub status: Option<String>,
    /// Backend clock at the time the record was produced (ISO-8601, no zone)
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Physical selector position: 1 = pump 1, 2 = pump 2, 3 = valve.
/// The backend reports 0 when the selector inputs disagree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectorRecord {
    #[serde(default, deserialize_with = "lenient_option_i64")]
    pub state: Option<i64>,
}

/// Named fault flags. Values are coerced the same way the backend does.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, Value>", into = "BTreeMap<String, bool>")]
pub struct FaultsRecord(BTreeMap<String, bool>);

impl FaultsRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder used mostly by tests and the in-memory view
    pub fn with(mut self, flag: impl Into<String>, active: bool) -> Self {
        self.0.insert(flag.into(), active);
        self
    }

    pub fn is_active(&self, flag: &str) -> bool {
        self.0.get(flag).copied().unwrap_or(false)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<BTreeMap<String, Value>> for FaultsRecord {
    fn from(raw: BTreeMap<String, Value>) -> Self {
        Self(
            raw.into_iter()
                .map(|(flag, value)| (flag, to_bool(&value)))
                .collect(),
        )
    }
}

impl From<FaultsRecord> for BTreeMap<String, bool> {
    fn from(record: FaultsRecord) -> Self {
        record.0
    }
}

/// Coerce a loosely-typed JSON value to a boolean
pub fn to_bool(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|v| v != 0.0).unwrap_or(false),
        Value::String(s) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "true" | "1" | "yes" | "on"
        ),
        _ => false,
    }
}

fn lenient_option_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(v) => Some(to_bool(&v)),
    })
}

/// Numbers as-is, numeric strings parsed; anything else is treated as absent
/// so one bad field does not reject the whole snapshot
pub fn to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

fn lenient_option_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(to_f64))
}

fn lenient_option_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(to_f64)
        .filter(|v| v.fract() == 0.0)
        .map(|v| v as i64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_partial_snapshot_leaves_other_records_absent() {
        let snapshot: Snapshot =
            serde_json::from_value(json!({"tank": {"tank_level_percent": 42.0}})).unwrap();

        assert!(snapshot.pump.is_none());
        assert!(snapshot.faults.is_none());
        let tank = snapshot.tank.unwrap();
        assert_eq!(tank.tank_level_percent, Some(42.0));
        assert_eq!(tank.tank_level_mm, None);
    }

    #[test]
    fn test_null_fields_are_absent() {
        let snapshot: Snapshot = serde_json::from_value(json!({
            "pump": {"target_rate": null, "flow_rate": 3.5, "pump_state": null},
            "valve": {"state": null}
        }))
        .unwrap();

        let pump = snapshot.pump.unwrap();
        assert_eq!(pump.target_rate, None);
        assert_eq!(pump.flow_rate, Some(3.5));
        assert_eq!(snapshot.valve.unwrap().state, None);
    }

    #[test]
    fn test_valve_state_accepts_digital_output_levels() {
        let closed: ValveRecord = serde_json::from_value(json!({"state": 1})).unwrap();
        let opened: ValveRecord = serde_json::from_value(json!({"state": 0})).unwrap();

        assert_eq!(closed.state, Some(true));
        assert_eq!(opened.state, Some(false));
    }

    #[test]
    fn test_fault_flags_are_coerced() {
        let faults: FaultsRecord = serde_json::from_value(json!({
            "hh_pressure": "Yes",
            "ll_tank_level": 0,
            "spare": "nope"
        }))
        .unwrap();

        assert!(faults.is_active("hh_pressure"));
        assert!(!faults.is_active("ll_tank_level"));
        assert!(!faults.is_active("spare"));
        assert!(!faults.is_active("missing"));
    }

    #[test]
    fn test_unknown_top_level_keys_are_ignored() {
        let snapshot: Snapshot =
            serde_json::from_value(json!({"future_area": {"x": 1}, "system": {"status": "running"}}))
                .unwrap();

        assert_eq!(snapshot.system.unwrap().status.as_deref(), Some("running"));
    }

    #[test]
    fn test_mistyped_number_keeps_rest_of_snapshot() {
        let snapshot: Snapshot = serde_json::from_value(json!({
            "pump": {"target_rate": "12.3", "flow_rate": "n/a", "pump_state": "Run"},
            "skid": {"skid_flow": 4.2, "skid_pressure": [1]},
            "selector": {"state": "2"}
        }))
        .unwrap();

        let pump = snapshot.pump.unwrap();
        assert_eq!(pump.target_rate, Some(12.3));
        assert_eq!(pump.flow_rate, None);
        assert_eq!(pump.pump_state.as_deref(), Some("Run"));
        let skid = snapshot.skid.unwrap();
        assert_eq!(skid.skid_flow, Some(4.2));
        assert_eq!(skid.skid_pressure, None);
        assert_eq!(snapshot.selector.unwrap().state, Some(2));
    }

    #[test]
    fn test_fractional_selector_is_absent() {
        let selector: SelectorRecord = serde_json::from_value(json!({"state": 1.5})).unwrap();

        assert_eq!(selector.state, None);
    }
}
