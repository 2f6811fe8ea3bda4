pub mod layout;

mod faults;
mod notifications;
mod panels;
mod pump_card;
mod reading;
mod valve_card;

use leptos::*;

use crate::dashboard::Controls;
use crate::view::ViewModel;

pub use layout::Layout;

/// Hook to access the view model provided by the app root
pub fn use_view_model() -> ViewModel {
    use_context::<ViewModel>().expect("ViewModel must be provided by a parent component")
}

/// Hook to access operator controls; without a connected shell actions are logged and dropped
pub fn use_controls() -> Controls {
    use_context::<Controls>().unwrap_or_else(|| {
        Controls::new(|action| log::warn!("No dashboard shell for {:?}", action))
    })
}
