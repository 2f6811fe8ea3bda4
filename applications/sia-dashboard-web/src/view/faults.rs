use crate::models::FaultsRecord;

/// Maps a backend fault flag to the message shown to the operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaultDescriptor {
    pub flag: &'static str,
    pub message: &'static str,
}

/// Known faults in display order. Add a row to surface a new flag.
pub const FAULT_TABLE: &[FaultDescriptor] = &[
    FaultDescriptor {
        flag: "hh_pressure",
        message: "High-high pressure detected: pumps stopped",
    },
    FaultDescriptor {
        flag: "ll_tank_level",
        message: "Low-low tank level detected: pumps stopped",
    },
];

/// Shown below the fault list whenever a fault is active
pub const FAULT_INSTRUCTION: &str =
    "Clear the fault condition, then reset the system at the local control panel.";

/// Messages for every active flag, in table order
pub fn active_messages(
    table: &[FaultDescriptor],
    faults: Option<&FaultsRecord>,
) -> Vec<&'static str> {
    let Some(faults) = faults else {
        return Vec::new();
    };

    table
        .iter()
        .filter(|fault| faults.is_active(fault.flag))
        .map(|fault| fault.message)
        .collect()
}
