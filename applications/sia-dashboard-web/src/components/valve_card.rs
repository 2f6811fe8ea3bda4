use leptos::*;

use super::{use_controls, use_view_model};
use crate::dashboard::{Selection, UserAction};
use crate::view::Target;

#[component]
pub fn ValveCard() -> impl IntoView {
    let vm = use_view_model();
    let controls = use_controls();
    let region = vm.target(Target::ControlRegion(Selection::Valve));
    let state = vm.target(Target::ValveState);

    view! {
        <div class=move || region.class_attr("card control-region")>
            <div class="card-header">
                <h3>"Valve"</h3>
                <button
                    class="select-button"
                    aria-label="Select Valve"
                    on:click=move |_| controls.send(UserAction::Select(Selection::Valve))
                >
                    "Select"
                </button>
            </div>
            <div class="reading">
                <span class="reading-label">"State"</span>
                <span class=move || state.class_attr("valve-state")>
                    {move || state.text.get()}
                </span>
            </div>
        </div>
    }
}
