pub mod events;
pub mod snapshot;

pub use events::{ClientEvent, ErrorReport, Heartbeat, SelectionReport, ServerEvent};
pub use snapshot::{
    FaultsRecord, PumpRecord, SelectorRecord, SkidRecord, Snapshot, SolarRecord, SystemRecord,
    TankRecord, ValveRecord,
};
