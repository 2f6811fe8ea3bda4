use leptos::*;

use super::use_view_model;
use crate::view::{Target, FAULT_INSTRUCTION};

/// Active fault list; hidden when no fault is active
#[component]
pub fn FaultPanel() -> impl IntoView {
    let vm = use_view_model();
    let panel = vm.target(Target::FaultPanel);
    let faults = vm.faults;

    view! {
        <Show when=move || panel.visible.get()>
            <div class="fault-panel" role="alert">
                <h3>"Active Faults"</h3>
                <ul class="fault-list">
                    {move || {
                        faults
                            .get()
                            .into_iter()
                            .map(|message| view! { <li>{message}</li> })
                            .collect_view()
                    }}
                </ul>
                <p class="fault-instruction">{FAULT_INSTRUCTION}</p>
            </div>
        </Show>
    }
}
