//! Dashboard state and event handling.
//!
//! `Dashboard` owns the application state and a [`DashboardView`]. Every
//! handler updates the view synchronously and returns the side effects the
//! shell must perform (emitting on the channel, scheduling timers,
//! reconnecting). Nothing here touches the browser directly.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};

use super::notify::{NotificationId, Notifications};
use super::reconnect::{Reconnect, ReconnectPolicy};
use super::selection::{mark_selected, Selection, SelectionChange};
use crate::error::DashboardError;
use crate::models::{ClientEvent, ErrorReport, Heartbeat, ServerEvent, Snapshot};
use crate::view::{
    render_faults, render_snapshot, DashboardView, FaultDescriptor, Target, FAULT_TABLE, UPDATING,
};

pub const INITIAL_REQUEST_DELAY_MS: u32 = 1_000;
pub const LOADING_OVERLAY_DELAY_MS: u32 = 500;
pub const PULSE_MS: u32 = 1_000;
pub const VALVE_POPUP_MS: u32 = 5_000;
pub const ERROR_NOTIFICATION_MS: u32 = 5_000;

pub const CONNECT_ERROR_MESSAGE: &str = "Unable to connect to the control system";
pub const RECONNECT_EXHAUSTED_MESSAGE: &str =
    "Connection to the control system lost. Reload the page to reconnect.";
const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Connected,
    Disconnected,
}

impl ConnectionState {
    pub fn label(&self) -> &'static str {
        match self {
            ConnectionState::Connecting => "Connecting...",
            ConnectionState::Connected => "Connected",
            ConnectionState::Disconnected => "Disconnected",
        }
    }

    pub fn class(&self) -> &'static str {
        match self {
            ConnectionState::Connecting => "connecting",
            ConnectionState::Connected => "connected",
            ConnectionState::Disconnected => "disconnected",
        }
    }
}

/// Pending timer, keyed by the resource it affects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKey {
    Reconnect,
    InitialRequest,
    LoadingOverlay,
    ValvePopup,
    Pulse(Target),
    Notification(NotificationId),
}

/// Side effects requested by the dashboard
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Emit(ClientEvent),
    /// Schedule `key`, replacing a pending timer with the same key
    Schedule { key: TimerKey, delay_ms: u32 },
    Cancel(TimerKey),
    /// Open a fresh channel
    Connect,
    /// Close the channel cleanly
    Close,
}

/// Operator input
#[derive(Debug, Clone, PartialEq)]
pub enum UserAction {
    SetPumpState(String),
    Select(Selection),
    Refresh,
    VisibilityChanged(bool),
    DismissNotification(NotificationId),
    DismissPopup,
    Unload,
}

pub struct Dashboard<V: DashboardView> {
    view: V,
    fault_table: &'static [FaultDescriptor],
    connection: ConnectionState,
    reconnect: Reconnect,
    notifications: Notifications,
    snapshot: Option<Snapshot>,
    selection: Option<Selection>,
    last_update: Option<DateTime<Local>>,
    unloading: bool,
}

impl<V: DashboardView> Dashboard<V> {
    pub fn new(view: V, policy: ReconnectPolicy) -> Self {
        Self {
            view,
            fault_table: FAULT_TABLE,
            connection: ConnectionState::Connecting,
            reconnect: Reconnect::new(policy),
            notifications: Notifications::new(),
            snapshot: None,
            selection: None,
            last_update: None,
            unloading: false,
        }
    }

    /// Use a different fault table
    pub fn with_fault_table(mut self, table: &'static [FaultDescriptor]) -> Self {
        self.fault_table = table;
        self
    }

    /// Show the initial connecting state; the shell opens the channel
    pub fn start(&mut self) -> Vec<Effect> {
        self.view.set_visible(Target::LoadingOverlay, true);
        self.set_connection(ConnectionState::Connecting);
        vec![Effect::Connect]
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn connection(&self) -> ConnectionState {
        self.connection
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    pub fn last_update(&self) -> Option<DateTime<Local>> {
        self.last_update
    }

    pub fn reconnect_attempts(&self) -> u32 {
        self.reconnect.attempts()
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    /// Handle an event delivered by the channel
    pub fn handle(&mut self, event: ServerEvent, now: DateTime<Local>) -> Vec<Effect> {
        log::debug!("Handling {}", event.name());

        match event {
            ServerEvent::Connect => self.on_connect(),
            ServerEvent::Disconnect => self.on_disconnect(),
            ServerEvent::ConnectError(message) => self.on_connect_error(&message),
            ServerEvent::DataUpdate(snapshot) => self.on_data_update(snapshot, now),
            ServerEvent::Heartbeat(heartbeat) => {
                self.on_heartbeat(heartbeat, now);
                Vec::new()
            }
            ServerEvent::Error(report) => self.on_error(report),
            ServerEvent::PumpSelectionChanged(report) => {
                match Selection::from_id(report.selected_pump) {
                    Some(selection) => self.apply_selection(SelectionChange::Remote(selection), now),
                    None => {
                        log::warn!("Ignoring invalid selection {}", report.selected_pump);
                        Vec::new()
                    }
                }
            }
            ServerEvent::ValveControlPopup => {
                self.view.set_visible(Target::ValvePopup, true);
                vec![Effect::Schedule {
                    key: TimerKey::ValvePopup,
                    delay_ms: VALVE_POPUP_MS,
                }]
            }
        }
    }

    /// Handle a timer firing. Each timer re-checks current state first.
    pub fn on_timer(&mut self, key: TimerKey) -> Vec<Effect> {
        match key {
            TimerKey::Reconnect => {
                if self.connection == ConnectionState::Disconnected && !self.unloading {
                    log::info!("Reconnect attempt {}", self.reconnect.attempts());
                    self.set_connection(ConnectionState::Connecting);
                    return vec![Effect::Connect];
                }
            }
            TimerKey::InitialRequest => {
                if self.connection == ConnectionState::Connected {
                    return vec![Effect::Emit(ClientEvent::RequestData)];
                }
            }
            TimerKey::LoadingOverlay => self.view.set_visible(Target::LoadingOverlay, false),
            TimerKey::ValvePopup => self.view.set_visible(Target::ValvePopup, false),
            TimerKey::Pulse(target) => self.view.toggle_class(target, UPDATING, false),
            TimerKey::Notification(id) => self.remove_notification(id),
        }
        Vec::new()
    }

    /// Handle operator input
    pub fn act(&mut self, action: UserAction, now: DateTime<Local>) -> Vec<Effect> {
        match action {
            UserAction::SetPumpState(state) => self.set_pump_state(state),
            UserAction::Select(selection) => {
                self.apply_selection(SelectionChange::Local(selection), now)
            }
            UserAction::Refresh => self.request_data(),
            UserAction::VisibilityChanged(visible) => {
                if visible {
                    self.request_data()
                } else {
                    Vec::new()
                }
            }
            UserAction::DismissNotification(id) => {
                self.remove_notification(id);
                vec![Effect::Cancel(TimerKey::Notification(id))]
            }
            UserAction::DismissPopup => {
                self.view.set_visible(Target::ValvePopup, false);
                vec![Effect::Cancel(TimerKey::ValvePopup)]
            }
            UserAction::Unload => {
                self.unloading = true;
                vec![Effect::Cancel(TimerKey::Reconnect), Effect::Close]
            }
        }
    }

    fn on_connect(&mut self) -> Vec<Effect> {
        log::info!("Connected to control system");
        self.set_connection(ConnectionState::Connected);
        self.reconnect.reset();
        if let Some(id) = self.notifications.connection_error_id() {
            self.remove_notification(id);
        }

        vec![
            Effect::Cancel(TimerKey::Reconnect),
            Effect::Schedule {
                key: TimerKey::LoadingOverlay,
                delay_ms: LOADING_OVERLAY_DELAY_MS,
            },
            Effect::Schedule {
                key: TimerKey::InitialRequest,
                delay_ms: INITIAL_REQUEST_DELAY_MS,
            },
        ]
    }

    fn on_disconnect(&mut self) -> Vec<Effect> {
        self.set_connection(ConnectionState::Disconnected);
        if self.unloading {
            return Vec::new();
        }
        log::warn!("Disconnected from control system");
        self.schedule_reconnect()
    }

    fn on_connect_error(&mut self, message: &str) -> Vec<Effect> {
        log::warn!("Connection error: {}", message);
        self.set_connection(ConnectionState::Disconnected);
        if self.unloading {
            return Vec::new();
        }
        self.show_connection_error(CONNECT_ERROR_MESSAGE);
        self.schedule_reconnect()
    }

    fn schedule_reconnect(&mut self) -> Vec<Effect> {
        match self.reconnect.next_delay() {
            Some(delay_ms) => {
                log::info!(
                    "Reconnecting in {}ms (attempt {})",
                    delay_ms,
                    self.reconnect.attempts()
                );
                vec![Effect::Schedule {
                    key: TimerKey::Reconnect,
                    delay_ms,
                }]
            }
            None => {
                log::warn!("Giving up after {} reconnect attempts", self.reconnect.attempts());
                if let Some(id) = self.notifications.connection_error_id() {
                    self.remove_notification(id);
                }
                self.show_connection_error(RECONNECT_EXHAUSTED_MESSAGE);
                Vec::new()
            }
        }
    }

    fn on_data_update(&mut self, snapshot: Snapshot, now: DateTime<Local>) -> Vec<Effect> {
        let mut effects: Vec<Effect> = render_snapshot(&mut self.view, &snapshot)
            .into_iter()
            .map(|target| Effect::Schedule {
                key: TimerKey::Pulse(target),
                delay_ms: PULSE_MS,
            })
            .collect();

        render_faults(&mut self.view, self.fault_table, snapshot.faults.as_ref());

        if let Some(state) = snapshot.selector.as_ref().and_then(|s| s.state) {
            match Selection::from_id(state) {
                Some(selection) => {
                    effects.extend(self.apply_selection(SelectionChange::Remote(selection), now))
                }
                None => log::debug!("Selector reports no valid position ({})", state),
            }
        }

        self.snapshot = Some(snapshot);
        self.show_last_update(now);
        effects
    }

    fn on_heartbeat(&mut self, heartbeat: Heartbeat, now: DateTime<Local>) {
        let reported = heartbeat
            .timestamp
            .as_deref()
            .and_then(parse_timestamp)
            .and_then(|ts| Local.from_local_datetime(&ts).earliest());
        self.show_last_update(reported.unwrap_or(now));
    }

    fn on_error(&mut self, report: ErrorReport) -> Vec<Effect> {
        let message = report
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_ERROR_MESSAGE.to_string());
        log::warn!("Backend error: {}", message);
        self.show_error(message)
    }

    fn set_pump_state(&mut self, state: String) -> Vec<Effect> {
        if self.connection != ConnectionState::Connected {
            log::warn!("Rejected pump state {}: not connected", state);
            return self.show_error(DashboardError::NotConnected.to_string());
        }
        log::info!("Requesting pump state {}", state);
        vec![Effect::Emit(ClientEvent::SetPumpState { state })]
    }

    fn request_data(&mut self) -> Vec<Effect> {
        if self.connection == ConnectionState::Connected {
            vec![Effect::Emit(ClientEvent::RequestData)]
        } else {
            Vec::new()
        }
    }

    fn apply_selection(&mut self, change: SelectionChange, now: DateTime<Local>) -> Vec<Effect> {
        let selection = change.selection();
        self.selection = Some(selection);
        mark_selected(&mut self.view, selection);

        if change.should_propagate() {
            vec![Effect::Emit(ClientEvent::PumpSelectionChanged {
                selected_pump: selection.id(),
                timestamp: now.timestamp_millis(),
            })]
        } else {
            Vec::new()
        }
    }

    fn show_error(&mut self, message: String) -> Vec<Effect> {
        let notification = self.notifications.error(message);
        self.view.push_notification(&notification);
        vec![Effect::Schedule {
            key: TimerKey::Notification(notification.id),
            delay_ms: ERROR_NOTIFICATION_MS,
        }]
    }

    fn show_connection_error(&mut self, message: &str) {
        if let Some(notification) = self.notifications.connection_error(message) {
            self.view.push_notification(&notification);
        }
    }

    fn remove_notification(&mut self, id: NotificationId) {
        if self.notifications.remove(id) {
            self.view.remove_notification(id);
        }
    }

    fn set_connection(&mut self, state: ConnectionState) {
        self.connection = state;
        self.view.set_text(Target::ConnectionStatus, state.label());
        self.view.set_class(Target::ConnectionStatus, Some(state.class()));
    }

    fn show_last_update(&mut self, now: DateTime<Local>) {
        self.last_update = Some(now);
        self.view
            .set_text(Target::LastUpdate, &now.format("%H:%M:%S").to_string());
    }
}

/// Backend timestamps are ISO-8601 without a zone, optionally with an offset
fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.naive_local());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok()
}
