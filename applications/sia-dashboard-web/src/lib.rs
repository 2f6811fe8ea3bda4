use leptos::*;
use wasm_bindgen::prelude::*;

pub mod app;
pub mod channel;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod models;
pub mod view;

mod components;
#[cfg(target_arch = "wasm32")]
mod shell;

/// WASM entry point - called when the WASM module loads
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();

    _ = console_log::init_with_level(log::Level::Debug);

    log::info!("Starting SIA Dashboard");

    mount_to_body(|| view! { <app::App /> });
}
