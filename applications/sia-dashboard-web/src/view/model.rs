use std::collections::HashMap;
use std::rc::Rc;

use leptos::*;

use super::target::{DashboardView, Target};
use crate::dashboard::notify::{Notification, NotificationId};

/// Placeholder shown before the first value arrives
pub const PLACEHOLDER: &str = "--";

/// Reactive state of one target
#[derive(Clone, Copy)]
pub struct TargetSignals {
    pub text: RwSignal<String>,
    pub class: RwSignal<Option<String>>,
    pub flags: RwSignal<Vec<&'static str>>,
    pub width: RwSignal<f64>,
    pub visible: RwSignal<bool>,
}

impl TargetSignals {
    fn new() -> Self {
        Self {
            text: create_rw_signal(PLACEHOLDER.to_string()),
            class: create_rw_signal(None),
            flags: create_rw_signal(Vec::new()),
            width: create_rw_signal(0.0),
            visible: create_rw_signal(false),
        }
    }

    /// Class attribute made of the base class, the state class and flags
    pub fn class_attr(&self, base: &'static str) -> String {
        let mut classes = vec![base.to_string()];
        if let Some(class) = self.class.get() {
            classes.push(class);
        }
        classes.extend(self.flags.get().into_iter().map(str::to_string));
        classes.join(" ")
    }

    pub fn width_style(&self) -> String {
        format!("{}%", self.width.get())
    }
}

/// Signal-backed view rendered by the Leptos components
#[derive(Clone)]
pub struct ViewModel {
    targets: Rc<HashMap<Target, TargetSignals>>,
    pub faults: RwSignal<Vec<&'static str>>,
    pub notifications: RwSignal<Vec<Notification>>,
}

impl ViewModel {
    /// Create signals for every target. Call inside a reactive owner.
    pub fn new() -> Self {
        let targets = Target::all()
            .into_iter()
            .map(|target| (target, TargetSignals::new()))
            .collect();

        Self {
            targets: Rc::new(targets),
            faults: create_rw_signal(Vec::new()),
            notifications: create_rw_signal(Vec::new()),
        }
    }

    pub fn target(&self, target: Target) -> TargetSignals {
        self.targets
            .get(&target)
            .copied()
            .unwrap_or_else(TargetSignals::new)
    }
}

impl Default for ViewModel {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardView for ViewModel {
    fn text(&self, target: Target) -> Option<String> {
        Some(self.target(target).text.get_untracked())
    }

    fn set_text(&mut self, target: Target, text: &str) {
        self.target(target).text.set(text.to_string());
    }

    fn set_class(&mut self, target: Target, class: Option<&str>) {
        let signal = self.target(target).class;
        let class = class.map(str::to_string);
        if signal.get_untracked() != class {
            signal.set(class);
        }
    }

    fn toggle_class(&mut self, target: Target, class: &'static str, on: bool) {
        let flags = self.target(target).flags;
        let present = flags.with_untracked(|f| f.contains(&class));
        if on && !present {
            flags.update(|f| f.push(class));
        } else if !on && present {
            flags.update(|f| f.retain(|c| *c != class));
        }
    }

    fn set_width(&mut self, target: Target, percent: f64) {
        self.target(target).width.set(percent);
    }

    fn set_visible(&mut self, target: Target, visible: bool) {
        self.target(target).visible.set(visible);
    }

    fn set_fault_messages(&mut self, messages: &[&'static str]) {
        if self.faults.with_untracked(|f| f.as_slice() != messages) {
            self.faults.set(messages.to_vec());
        }
    }

    fn push_notification(&mut self, notification: &Notification) {
        let notification = notification.clone();
        self.notifications.update(|n| n.push(notification));
    }

    fn remove_notification(&mut self, id: NotificationId) {
        self.notifications.update(|n| n.retain(|item| item.id != id));
    }
}
