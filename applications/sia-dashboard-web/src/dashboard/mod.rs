pub mod controller;
pub mod notify;
pub mod reconnect;
pub mod selection;

use std::rc::Rc;

pub use controller::{ConnectionState, Dashboard, Effect, TimerKey, UserAction};
pub use notify::{Notification, NotificationId, NotificationKind};
pub use reconnect::ReconnectPolicy;
pub use selection::{Selection, SelectionChange};

/// Handle the components use to forward operator input
#[derive(Clone)]
pub struct Controls(Rc<dyn Fn(UserAction)>);

impl Controls {
    pub fn new(dispatch: impl Fn(UserAction) + 'static) -> Self {
        Self(Rc::new(dispatch))
    }

    pub fn send(&self, action: UserAction) {
        (self.0)(action)
    }
}
