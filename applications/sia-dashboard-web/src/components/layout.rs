use leptos::*;

use super::faults::FaultPanel;
use super::notifications::{LoadingOverlay, NotificationStack, ValvePopup};
use super::panels::{SkidCard, SolarCard, TankCard};
use super::pump_card::PumpCard;
use super::use_view_model;
use super::valve_card::ValveCard;
use crate::view::{PumpId, Target};

/// Page layout with status bar and control grid
#[component]
pub fn Layout() -> impl IntoView {
    view! {
        <div class="layout">
            <StatusBar />
            <NotificationStack />
            <main class="main-content">
                <FaultPanel />
                <div class="dashboard-grid">
                    <PumpCard pump=PumpId::One />
                    <PumpCard pump=PumpId::Two />
                    <ValveCard />
                    <SolarCard />
                    <TankCard />
                    <SkidCard />
                </div>
            </main>
            <ValvePopup />
            <LoadingOverlay />
        </div>
    }
}

/// Title, system status, connection status and last update time
#[component]
fn StatusBar() -> impl IntoView {
    let vm = use_view_model();
    let system = vm.target(Target::SystemStatus);
    let connection = vm.target(Target::ConnectionStatus);
    let last_update = vm.target(Target::LastUpdate);

    view! {
        <nav class="navbar">
            <div class="navbar-content">
                <h1 class="navbar-title">"SIA Local Control"</h1>
                <div class="navbar-actions">
                    <span class=move || system.class_attr("system-status")>
                        {move || system.text.get()}
                    </span>
                    <span class=move || connection.class_attr("connection-status")>
                        {move || connection.text.get()}
                    </span>
                    <span class="last-update">
                        "Last update: " {move || last_update.text.get()}
                    </span>
                </div>
            </div>
        </nav>
    }
}
