use leptos::*;

use super::{use_controls, use_view_model};
use crate::dashboard::{NotificationKind, UserAction};
use crate::view::Target;

/// Error notifications; click to dismiss
#[component]
pub fn NotificationStack() -> impl IntoView {
    let notifications = use_view_model().notifications;
    let controls = use_controls();

    view! {
        <div class="notifications">
            <For
                each=move || notifications.get()
                key=|notification| notification.id
                children=move |notification| {
                    let controls = controls.clone();
                    let id = notification.id;
                    let class = match notification.kind {
                        NotificationKind::Connection => "notification connection-error",
                        NotificationKind::Error => "notification error",
                    };
                    view! {
                        <div
                            class=class
                            role="alert"
                            on:click=move |_| controls.send(UserAction::DismissNotification(id))
                        >
                            {notification.message}
                        </div>
                    }
                }
            />
        </div>
    }
}

/// Raised by the backend when a local valve command is refused
#[component]
pub fn ValvePopup() -> impl IntoView {
    let popup = use_view_model().target(Target::ValvePopup);
    let controls = use_controls();

    view! {
        <Show when=move || popup.visible.get()>
            {
                let controls = controls.clone();
                view! {
                    <div class="popup-backdrop" on:click=move |_| controls.send(UserAction::DismissPopup)>
                        <div class="popup">
                            <h3>"Valve Control Unavailable"</h3>
                            <p>"The valve cannot be operated while a pump is calibrating."</p>
                        </div>
                    </div>
                }
            }
        </Show>
    }
}

#[component]
pub fn LoadingOverlay() -> impl IntoView {
    let overlay = use_view_model().target(Target::LoadingOverlay);

    view! {
        <Show when=move || overlay.visible.get()>
            <div class="loading-overlay">
                <div class="loading">"Connecting to control system..."</div>
            </div>
        </Show>
    }
}
