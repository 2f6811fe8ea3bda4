use leptos::*;

use super::use_view_model;
use crate::view::Target;

/// Labelled value bound to a target
#[component]
pub fn Reading(label: &'static str, target: Target, unit: &'static str) -> impl IntoView {
    let signals = use_view_model().target(target);

    view! {
        <div class="reading">
            <span class="reading-label">{label}</span>
            <span class="reading-figure">
                <span class=move || signals.class_attr("reading-value")>
                    {move || signals.text.get()}
                </span>
                <span class="unit">{unit}</span>
            </span>
        </div>
    }
}

/// Percentage bar; width and tier class come from the target
#[component]
pub fn ProgressBar(target: Target) -> impl IntoView {
    let signals = use_view_model().target(target);

    view! {
        <div class="progress">
            <div
                class=move || signals.class_attr("progress-fill")
                style:width=move || signals.width_style()
            ></div>
        </div>
    }
}
