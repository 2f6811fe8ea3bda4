//! Projection of snapshot sub-records onto the dashboard view.
//!
//! Only fields present in the snapshot are written. A text target whose
//! displayed value changes receives the [`UPDATING`] class; the caller is
//! responsible for removing it again after the pulse duration.

use super::faults::{active_messages, FaultDescriptor};
use super::format::{clamp_percent, one_decimal, rounded, state_class, valve_text, Tier};
use super::target::{DashboardView, PumpId, Target, ACTIVE, PUMP_CONTROLS, UPDATING};
use crate::models::{
    FaultsRecord, PumpRecord, SkidRecord, Snapshot, SolarRecord, SystemRecord, TankRecord,
    ValveRecord,
};

/// Writes values to a view and remembers which targets changed
pub struct Painter<'a, V: DashboardView> {
    view: &'a mut V,
    pulsed: Vec<Target>,
}

impl<'a, V: DashboardView> Painter<'a, V> {
    pub fn new(view: &'a mut V) -> Self {
        Self {
            view,
            pulsed: Vec::new(),
        }
    }

    /// Targets whose text changed, in paint order
    pub fn finish(self) -> Vec<Target> {
        self.pulsed
    }

    /// Set text if it differs from what is displayed
    pub fn text(&mut self, target: Target, text: &str) {
        if self.view.text(target).as_deref() == Some(text) {
            return;
        }
        self.view.set_text(target, text);
        self.view.toggle_class(target, UPDATING, true);
        if !self.pulsed.contains(&target) {
            self.pulsed.push(target);
        }
    }

    /// Set text plus the lowercased state class
    pub fn state(&mut self, target: Target, value: &str) {
        self.text(target, value);
        let class = state_class(value);
        self.view
            .set_class(target, if class.is_empty() { None } else { Some(class.as_str()) });
    }

    /// Clamped width and tier class of a progress bar
    pub fn bar(&mut self, target: Target, percent: f64) {
        let percent = clamp_percent(percent);
        self.view.set_width(target, percent);
        self.view.set_class(target, Tier::for_percent(percent).class());
    }
}

/// Render every sub-record present in the snapshot, except selection and
/// faults which the controller owns. Returns the targets to pulse.
pub fn render_snapshot<V: DashboardView>(view: &mut V, snapshot: &Snapshot) -> Vec<Target> {
    let mut painter = Painter::new(view);

    if let Some(pump) = &snapshot.pump {
        render_pump(&mut painter, PumpId::One, pump);
    }
    if let Some(pump) = &snapshot.pump2 {
        render_pump(&mut painter, PumpId::Two, pump);
    }
    if let Some(valve) = &snapshot.valve {
        render_valve(&mut painter, valve);
    }
    if let Some(solar) = &snapshot.solar {
        render_solar(&mut painter, solar);
    }
    if let Some(tank) = &snapshot.tank {
        render_tank(&mut painter, tank);
    }
    if let Some(skid) = &snapshot.skid {
        render_skid(&mut painter, skid);
    }
    if let Some(system) = &snapshot.system {
        render_system(&mut painter, system);
    }

    painter.finish()
}

fn render_pump<V: DashboardView>(painter: &mut Painter<'_, V>, pump_id: PumpId, pump: &PumpRecord) {
    if let Some(rate) = pump.target_rate {
        painter.text(Target::TargetRate(pump_id), &one_decimal(rate));
    }
    if let Some(rate) = pump.flow_rate {
        painter.text(Target::FlowRate(pump_id), &one_decimal(rate));
    }
    if let Some(state) = &pump.pump_state {
        painter.state(Target::PumpState(pump_id), state);

        // Commands only address pump 1
        if pump_id == PumpId::One {
            for label in PUMP_CONTROLS {
                painter.view.toggle_class(
                    Target::PumpControl(label),
                    ACTIVE,
                    label.eq_ignore_ascii_case(state.trim()),
                );
            }
        }
    }
}

fn render_valve<V: DashboardView>(painter: &mut Painter<'_, V>, valve: &ValveRecord) {
    if let Some(closed) = valve.state {
        painter.state(Target::ValveState, valve_text(closed));
    }
}

fn render_solar<V: DashboardView>(painter: &mut Painter<'_, V>, solar: &SolarRecord) {
    if let Some(voltage) = solar.battery_voltage {
        painter.text(Target::BatteryVoltage, &one_decimal(voltage));
    }
    if let Some(percentage) = solar.battery_percentage {
        painter.text(Target::BatteryPercentage, &rounded(clamp_percent(percentage)));
        painter.bar(Target::BatteryBar, percentage);
    }
    if let Some(power) = solar.panel_power {
        painter.text(Target::PanelPower, &one_decimal(power));
    }
    if let Some(ah) = solar.battery_ah {
        painter.text(Target::BatteryAh, &one_decimal(ah));
    }
}

fn render_tank<V: DashboardView>(painter: &mut Painter<'_, V>, tank: &TankRecord) {
    if let Some(mm) = tank.tank_level_mm {
        painter.text(Target::TankLevelMm, &rounded(mm));
    }
    if let Some(percent) = tank.tank_level_percent {
        painter.text(Target::TankLevelPercent, &rounded(clamp_percent(percent)));
        painter.bar(Target::TankBar, percent);
    }
}

fn render_skid<V: DashboardView>(painter: &mut Painter<'_, V>, skid: &SkidRecord) {
    if let Some(flow) = skid.skid_flow {
        painter.text(Target::SkidFlow, &one_decimal(flow));
    }
    if let Some(pressure) = skid.skid_pressure {
        painter.text(Target::SkidPressure, &one_decimal(pressure));
    }
}

fn render_system<V: DashboardView>(painter: &mut Painter<'_, V>, system: &SystemRecord) {
    if let Some(status) = &system.status {
        painter.state(Target::SystemStatus, status);
    }
}

/// Show the fault panel with every active message, or hide it.
/// Returns the messages displayed.
pub fn render_faults<V: DashboardView>(
    view: &mut V,
    table: &[FaultDescriptor],
    faults: Option<&FaultsRecord>,
) -> Vec<&'static str> {
    let messages = active_messages(table, faults);
    view.set_fault_messages(&messages);
    view.set_visible(Target::FaultPanel, !messages.is_empty());
    messages
}
