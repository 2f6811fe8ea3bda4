use leptos::*;

use super::reading::Reading;
use super::{use_controls, use_view_model};
use crate::dashboard::{Selection, UserAction};
use crate::view::{PumpId, Target, PUMP_CONTROLS};

#[component]
pub fn PumpCard(pump: PumpId) -> impl IntoView {
    let vm = use_view_model();
    let controls = use_controls();
    let selection = match pump {
        PumpId::One => Selection::Pump1,
        PumpId::Two => Selection::Pump2,
    };
    let region = vm.target(Target::ControlRegion(selection));
    let state = vm.target(Target::PumpState(pump));

    view! {
        <div class=move || region.class_attr("card control-region")>
            <div class="card-header">
                <h3>{pump.label()}</h3>
                <button
                    class="select-button"
                    aria-label=format!("Select {}", selection.label())
                    on:click=move |_| controls.send(UserAction::Select(selection))
                >
                    "Select"
                </button>
            </div>
            <Reading label="Target Rate" target=Target::TargetRate(pump) unit="L/min" />
            <Reading label="Flow Rate" target=Target::FlowRate(pump) unit="L/min" />
            <div class="reading">
                <span class="reading-label">"State"</span>
                <span class=move || state.class_attr("pump-state")>
                    {move || state.text.get()}
                </span>
            </div>
            {(pump == PumpId::One).then(|| view! { <PumpControls /> })}
        </div>
    }
}

/// Pump-state command buttons
#[component]
fn PumpControls() -> impl IntoView {
    let vm = use_view_model();
    let controls = use_controls();

    view! {
        <div class="pump-controls">
            {PUMP_CONTROLS
                .into_iter()
                .map(|label| {
                    let button = vm.target(Target::PumpControl(label));
                    let controls = controls.clone();
                    view! {
                        <button
                            class=move || button.class_attr("control-button")
                            on:click=move |_| controls.send(UserAction::SetPumpState(label.to_string()))
                        >
                            {label}
                        </button>
                    }
                })
                .collect_view()}
        </div>
    }
}
