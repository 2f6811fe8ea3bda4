use crate::dashboard::reconnect::ReconnectPolicy;
use crate::error::{DashboardError, Result};

/// Port the control backend serves the dashboard channel on
pub const DEFAULT_PORT: u16 = 8091;
/// Engine.IO v4 WebSocket transport path
pub const SOCKET_PATH: &str = "/socket.io/?EIO=4&transport=websocket";

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub socket_url: String,
    pub reconnect: ReconnectPolicy,
}

impl DashboardConfig {
    /// Load configuration from window.ENV, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let config = Self {
            socket_url: env_string("SOCKET_URL").unwrap_or_else(|| defaults.socket_url.clone()),
            reconnect: ReconnectPolicy {
                base_delay_ms: env_number("RECONNECT_BASE_MS")
                    .unwrap_or(defaults.reconnect.base_delay_ms),
                max_attempts: env_number("RECONNECT_MAX_ATTEMPTS")
                    .unwrap_or(defaults.reconnect.max_attempts),
            },
        };

        match config.validate() {
            Ok(()) => config,
            Err(e) => {
                log::warn!("{}; using defaults", e);
                defaults
            }
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if !(self.socket_url.starts_with("ws://") || self.socket_url.starts_with("wss://")) {
            return Err(DashboardError::Config(format!(
                "socket URL must use ws:// or wss://, got {}",
                self.socket_url
            )));
        }

        if self.reconnect.max_attempts == 0 {
            return Err(DashboardError::Config(
                "reconnect attempts cannot be 0".to_string(),
            ));
        }

        if self.reconnect.base_delay_ms == 0 {
            return Err(DashboardError::Config(
                "reconnect delay cannot be 0".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            socket_url: default_socket_url(),
            reconnect: ReconnectPolicy::default(),
        }
    }
}

/// Build the socket URL from the page location, matching its scheme
pub fn socket_url_for(secure: bool, hostname: &str) -> String {
    let scheme = if secure { "wss" } else { "ws" };
    let host = if hostname.is_empty() { "localhost" } else { hostname };
    format!("{}://{}:{}{}", scheme, host, DEFAULT_PORT, SOCKET_PATH)
}

fn default_socket_url() -> String {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let location = window.location();
            if let (Ok(protocol), Ok(hostname)) = (location.protocol(), location.hostname()) {
                return socket_url_for(protocol == "https:", &hostname);
            }
        }
    }

    socket_url_for(false, "localhost")
}

fn env_value(key: &str) -> Option<wasm_bindgen::JsValue> {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsValue;

        let window = web_sys::window()?;
        let env = js_sys::Reflect::get(&window, &JsValue::from_str("ENV")).ok()?;
        if env.is_undefined() {
            return None;
        }
        let value = js_sys::Reflect::get(&env, &JsValue::from_str(key)).ok()?;
        if value.is_undefined() || value.is_null() {
            return None;
        }
        return Some(value);
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = key;
        None
    }
}

fn env_string(key: &str) -> Option<String> {
    env_value(key)?.as_string()
}

/// Accepts numbers and numeric strings
fn env_number(key: &str) -> Option<u32> {
    let value = env_value(key)?;
    if let Some(n) = value.as_f64() {
        if n >= 0.0 && n <= u32::MAX as f64 {
            return Some(n as u32);
        }
        return None;
    }
    value.as_string()?.trim().parse().ok()
}
