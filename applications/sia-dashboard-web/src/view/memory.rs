//! Headless view that records every update in memory.

use std::collections::{BTreeSet, HashMap};

use super::target::{DashboardView, Target};
use crate::dashboard::notify::{Notification, NotificationId};

#[derive(Debug, Clone, Default)]
struct TargetState {
    text: Option<String>,
    class: Option<String>,
    flags: BTreeSet<&'static str>,
    width: f64,
    visible: bool,
}

/// In-memory [`DashboardView`] used by tests and tooling
#[derive(Debug, Clone, Default)]
pub struct MemoryView {
    targets: HashMap<Target, TargetState>,
    faults: Vec<&'static str>,
    notifications: Vec<Notification>,
    writes: usize,
}

impl MemoryView {
    pub fn new() -> Self {
        Self::default()
    }

    fn entry(&mut self, target: Target) -> &mut TargetState {
        self.writes += 1;
        self.targets.entry(target).or_default()
    }

    /// Displayed text, empty when never set
    pub fn text_of(&self, target: Target) -> &str {
        self.targets
            .get(&target)
            .and_then(|t| t.text.as_deref())
            .unwrap_or("")
    }

    pub fn class_of(&self, target: Target) -> Option<&str> {
        self.targets.get(&target).and_then(|t| t.class.as_deref())
    }

    pub fn has_flag(&self, target: Target, flag: &str) -> bool {
        self.targets
            .get(&target)
            .map(|t| t.flags.contains(flag))
            .unwrap_or(false)
    }

    pub fn width_of(&self, target: Target) -> f64 {
        self.targets.get(&target).map(|t| t.width).unwrap_or(0.0)
    }

    pub fn is_visible(&self, target: Target) -> bool {
        self.targets.get(&target).map(|t| t.visible).unwrap_or(false)
    }

    pub fn fault_messages(&self) -> &[&'static str] {
        &self.faults
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Number of target writes so far
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl DashboardView for MemoryView {
    fn text(&self, target: Target) -> Option<String> {
        self.targets.get(&target).and_then(|t| t.text.clone())
    }

    fn set_text(&mut self, target: Target, text: &str) {
        self.entry(target).text = Some(text.to_string());
    }

    fn set_class(&mut self, target: Target, class: Option<&str>) {
        self.entry(target).class = class.map(str::to_string);
    }

    fn toggle_class(&mut self, target: Target, class: &'static str, on: bool) {
        let state = self.entry(target);
        if on {
            state.flags.insert(class);
        } else {
            state.flags.remove(class);
        }
    }

    fn set_width(&mut self, target: Target, percent: f64) {
        self.entry(target).width = percent;
    }

    fn set_visible(&mut self, target: Target, visible: bool) {
        self.entry(target).visible = visible;
    }

    fn set_fault_messages(&mut self, messages: &[&'static str]) {
        self.faults = messages.to_vec();
    }

    fn push_notification(&mut self, notification: &Notification) {
        self.notifications.push(notification.clone());
    }

    fn remove_notification(&mut self, id: NotificationId) {
        self.notifications.retain(|n| n.id != id);
    }
}
