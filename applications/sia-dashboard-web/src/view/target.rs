use crate::dashboard::notify::{Notification, NotificationId};
use crate::dashboard::selection::Selection;

/// Pump-state command labels offered on the pump 1 panel, in display order
pub const PUMP_CONTROLS: [&str; 3] = ["Run", "Stop", "Standby"];

/// Transient class applied to a value that just changed
pub const UPDATING: &str = "updating";
/// Class marking the active control region
pub const SELECTED: &str = "selected";
/// Class marking the pump-state control matching the reported state
pub const ACTIVE: &str = "active";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PumpId {
    One,
    Two,
}

impl PumpId {
    pub const ALL: [PumpId; 2] = [PumpId::One, PumpId::Two];

    pub fn label(&self) -> &'static str {
        match self {
            PumpId::One => "Pump 1",
            PumpId::Two => "Pump 2",
        }
    }
}

/// A named element the dashboard can update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Target {
    TargetRate(PumpId),
    FlowRate(PumpId),
    PumpState(PumpId),
    /// Pump-state command button, by label from [`PUMP_CONTROLS`]
    PumpControl(&'static str),
    ValveState,
    BatteryVoltage,
    BatteryPercentage,
    BatteryBar,
    PanelPower,
    BatteryAh,
    TankLevelMm,
    TankLevelPercent,
    TankBar,
    SkidFlow,
    SkidPressure,
    SystemStatus,
    ConnectionStatus,
    LastUpdate,
    ControlRegion(Selection),
    FaultPanel,
    ValvePopup,
    LoadingOverlay,
}

impl Target {
    /// Every target, used to build signal-backed views eagerly
    pub fn all() -> Vec<Target> {
        let mut targets = Vec::new();
        for pump in PumpId::ALL {
            targets.push(Target::TargetRate(pump));
            targets.push(Target::FlowRate(pump));
            targets.push(Target::PumpState(pump));
        }
        targets.extend(PUMP_CONTROLS.map(Target::PumpControl));
        targets.extend([
            Target::ValveState,
            Target::BatteryVoltage,
            Target::BatteryPercentage,
            Target::BatteryBar,
            Target::PanelPower,
            Target::BatteryAh,
            Target::TankLevelMm,
            Target::TankLevelPercent,
            Target::TankBar,
            Target::SkidFlow,
            Target::SkidPressure,
            Target::SystemStatus,
            Target::ConnectionStatus,
            Target::LastUpdate,
            Target::FaultPanel,
            Target::ValvePopup,
            Target::LoadingOverlay,
        ]);
        targets.extend(Selection::ALL.map(Target::ControlRegion));
        targets
    }
}

/// Capability set the binder and controller use to update the page.
///
/// Each target has a text, a replaceable state class, a set of flag classes,
/// a width (percent) and a visibility.
pub trait DashboardView {
    /// Currently displayed text, if the target shows any
    fn text(&self, target: Target) -> Option<String>;
    fn set_text(&mut self, target: Target, text: &str);
    /// Replace the state-derived class; `None` removes it
    fn set_class(&mut self, target: Target, class: Option<&str>);
    fn toggle_class(&mut self, target: Target, class: &'static str, on: bool);
    fn set_width(&mut self, target: Target, percent: f64);
    fn set_visible(&mut self, target: Target, visible: bool);
    fn set_fault_messages(&mut self, messages: &[&'static str]);
    fn push_notification(&mut self, notification: &Notification);
    fn remove_notification(&mut self, id: NotificationId);
}
