use leptos::*;

use super::reading::{ProgressBar, Reading};
use crate::view::Target;

#[component]
pub fn SolarCard() -> impl IntoView {
    view! {
        <div class="card">
            <h3>"Solar"</h3>
            <Reading label="Battery" target=Target::BatteryPercentage unit="%" />
            <ProgressBar target=Target::BatteryBar />
            <Reading label="Voltage" target=Target::BatteryVoltage unit="V" />
            <Reading label="Panel Power" target=Target::PanelPower unit="W" />
            <Reading label="Remaining" target=Target::BatteryAh unit="Ah" />
        </div>
    }
}

#[component]
pub fn TankCard() -> impl IntoView {
    view! {
        <div class="card">
            <h3>"Tank"</h3>
            <Reading label="Level" target=Target::TankLevelPercent unit="%" />
            <ProgressBar target=Target::TankBar />
            <Reading label="Depth" target=Target::TankLevelMm unit="mm" />
        </div>
    }
}

#[component]
pub fn SkidCard() -> impl IntoView {
    view! {
        <div class="card">
            <h3>"Skid"</h3>
            <Reading label="Flow" target=Target::SkidFlow unit="L/min" />
            <Reading label="Pressure" target=Target::SkidPressure unit="bar" />
        </div>
    }
}
