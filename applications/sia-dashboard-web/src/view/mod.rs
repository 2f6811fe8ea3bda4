pub mod binder;
pub mod faults;
pub mod format;
pub mod memory;
pub mod model;
pub mod target;

pub use binder::{render_faults, render_snapshot, Painter};
pub use faults::{FaultDescriptor, FAULT_INSTRUCTION, FAULT_TABLE};
pub use memory::MemoryView;
pub use model::{TargetSignals, ViewModel};
pub use target::{DashboardView, PumpId, Target, ACTIVE, PUMP_CONTROLS, SELECTED, UPDATING};
