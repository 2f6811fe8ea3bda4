//! Browser side of the dashboard: runs the effects the controller asks for.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use chrono::Local;
use gloo_timers::callback::Timeout;
use leptos::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::channel::socket::{Channel, EventHandler};
use crate::config::DashboardConfig;
use crate::dashboard::{Controls, Dashboard, Effect, TimerKey, UserAction};
use crate::models::{ClientEvent, ServerEvent};
use crate::view::ViewModel;

pub struct Shell {
    config: DashboardConfig,
    dashboard: RefCell<Dashboard<ViewModel>>,
    channel: RefCell<Option<Channel>>,
    timers: RefCell<HashMap<TimerKey, Timeout>>,
    /// Bumped for every socket; events from older sockets are dropped
    generation: Cell<u64>,
}

impl Shell {
    pub fn new(config: DashboardConfig, view: ViewModel) -> Rc<Self> {
        let dashboard = Dashboard::new(view, config.reconnect);
        Rc::new(Self {
            config,
            dashboard: RefCell::new(dashboard),
            channel: RefCell::new(None),
            timers: RefCell::new(HashMap::new()),
            generation: Cell::new(0),
        })
    }

    pub fn start(self: &Rc<Self>) {
        let effects = self.dashboard.borrow_mut().start();
        self.run(effects);
    }

    pub fn controls(self: &Rc<Self>) -> Controls {
        let weak = Rc::downgrade(self);
        Controls::new(move |action| {
            if let Some(shell) = weak.upgrade() {
                shell.act(action);
            }
        })
    }

    pub fn act(self: &Rc<Self>, action: UserAction) {
        let effects = self.dashboard.borrow_mut().act(action, Local::now());
        self.run(effects);
    }

    /// Refresh shortcut, tab refocus and clean close on unload
    pub fn install_listeners(self: &Rc<Self>) {
        let weak = Rc::downgrade(self);
        let _ = window_event_listener(ev::keydown, move |ev| {
            let shortcut = (ev.ctrl_key() || ev.meta_key()) && ev.key().eq_ignore_ascii_case("r");
            if shortcut {
                ev.prevent_default();
                if let Some(shell) = weak.upgrade() {
                    shell.act(UserAction::Refresh);
                }
            }
        });

        let weak = Rc::downgrade(self);
        let on_visibility = Closure::<dyn FnMut()>::new(move || {
            let visible = web_sys::window()
                .and_then(|w| w.document())
                .map(|d| d.visibility_state() == web_sys::VisibilityState::Visible)
                .unwrap_or(false);
            if let Some(shell) = weak.upgrade() {
                shell.act(UserAction::VisibilityChanged(visible));
            }
        });

        let weak = Rc::downgrade(self);
        let on_unload = Closure::<dyn FnMut()>::new(move || {
            if let Some(shell) = weak.upgrade() {
                shell.act(UserAction::Unload);
            }
        });

        if let Some(window) = web_sys::window() {
            if let Some(document) = window.document() {
                let _ = document.add_event_listener_with_callback(
                    "visibilitychange",
                    on_visibility.as_ref().unchecked_ref(),
                );
            }
            let _ = window
                .add_event_listener_with_callback("beforeunload", on_unload.as_ref().unchecked_ref());
        }

        // Listeners live as long as the page
        on_visibility.forget();
        on_unload.forget();
    }

    fn dispatch(self: &Rc<Self>, generation: u64, event: ServerEvent) {
        if generation != self.generation.get() {
            log::debug!("Dropping {} from a superseded socket", event.name());
            return;
        }
        let effects = self.dashboard.borrow_mut().handle(event, Local::now());
        self.run(effects);
    }

    fn fire(self: &Rc<Self>, key: TimerKey) {
        self.timers.borrow_mut().remove(&key);
        let effects = self.dashboard.borrow_mut().on_timer(key);
        self.run(effects);
    }

    fn run(self: &Rc<Self>, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Emit(event) => self.emit(&event),
                Effect::Schedule { key, delay_ms } => self.schedule(key, delay_ms),
                Effect::Cancel(key) => {
                    // dropping a Timeout clears it
                    self.timers.borrow_mut().remove(&key);
                }
                Effect::Connect => self.connect(),
                Effect::Close => self.close(),
            }
        }
    }

    fn schedule(self: &Rc<Self>, key: TimerKey, delay_ms: u32) {
        let weak = Rc::downgrade(self);
        let timeout = Timeout::new(delay_ms, move || {
            if let Some(shell) = weak.upgrade() {
                shell.fire(key);
            }
        });
        // replaces and cancels any pending timer for the same key
        let previous = self.timers.borrow_mut().insert(key, timeout);
        drop(previous);
    }

    fn emit(&self, event: &ClientEvent) {
        match self.channel.borrow().as_ref() {
            Some(channel) => {
                if let Err(e) = channel.emit(event) {
                    log::warn!("Failed to emit {}: {}", event.name(), e);
                }
            }
            None => log::warn!("Dropping {}: no channel", event.name()),
        }
    }

    fn connect(self: &Rc<Self>) {
        let generation = self.generation.get() + 1;
        self.generation.set(generation);

        if let Some(previous) = self.channel.borrow_mut().take() {
            previous.close();
        }

        let weak = Rc::downgrade(self);
        let handler: EventHandler = Rc::new(move |event| {
            if let Some(shell) = weak.upgrade() {
                shell.dispatch(generation, event);
            }
        });

        log::info!("Opening channel to {}", self.config.socket_url);
        match Channel::open(&self.config.socket_url, handler) {
            Ok(channel) => {
                *self.channel.borrow_mut() = Some(channel);
            }
            Err(e) => {
                log::error!("Failed to open channel: {}", e);
                self.dispatch(generation, ServerEvent::ConnectError(e.to_string()));
            }
        }
    }

    fn close(&self) {
        self.generation.set(self.generation.get() + 1);
        if let Some(channel) = self.channel.borrow_mut().take() {
            channel.close();
        }
    }
}
