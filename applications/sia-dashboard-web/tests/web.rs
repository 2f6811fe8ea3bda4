#![cfg(target_arch = "wasm32")]

use leptos::*;
use sia_dashboard_web::app::App;
use sia_dashboard_web::dashboard::{Notification, NotificationId, NotificationKind};
use sia_dashboard_web::view::{DashboardView, PumpId, Target, ViewModel, UPDATING};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn test_view_model_starts_with_placeholders() {
    let runtime = create_runtime();
    let vm = ViewModel::new();

    let flow = vm.target(Target::FlowRate(PumpId::Two));
    assert_eq!(flow.text.get_untracked(), "--");
    assert!(!vm.target(Target::FaultPanel).visible.get_untracked());

    runtime.dispose();
}

#[wasm_bindgen_test]
fn test_view_model_class_attr() {
    let runtime = create_runtime();
    let mut vm = ViewModel::new();

    vm.set_text(Target::PumpState(PumpId::One), "Run");
    vm.set_class(Target::PumpState(PumpId::One), Some("run"));
    vm.toggle_class(Target::PumpState(PumpId::One), UPDATING, true);
    vm.toggle_class(Target::PumpState(PumpId::One), UPDATING, true);

    let state = vm.target(Target::PumpState(PumpId::One));
    assert_eq!(state.text.get_untracked(), "Run");
    assert_eq!(state.class_attr("pump-state"), "pump-state run updating");

    vm.toggle_class(Target::PumpState(PumpId::One), UPDATING, false);
    assert_eq!(state.class_attr("pump-state"), "pump-state run");

    runtime.dispose();
}

#[wasm_bindgen_test]
fn test_view_model_notifications() {
    let runtime = create_runtime();
    let mut vm = ViewModel::new();

    vm.push_notification(&Notification {
        id: NotificationId(1),
        kind: NotificationKind::Error,
        message: "Pump 1 not responding".to_string(),
    });
    assert_eq!(vm.notifications.get_untracked().len(), 1);

    vm.remove_notification(NotificationId(1));
    assert!(vm.notifications.get_untracked().is_empty());

    runtime.dispose();
}

#[wasm_bindgen_test]
fn test_mounted_app_keeps_reacting_to_clicks() {
    let document = document();
    let root = document
        .create_element("div")
        .unwrap()
        .dyn_into::<web_sys::HtmlElement>()
        .unwrap();
    document.body().unwrap().append_child(&root).unwrap();

    mount_to(root.clone(), || view! { <App /> });

    let status = root.query_selector(".connection-status").unwrap().unwrap();
    assert_eq!(status.text_content().unwrap(), "Connecting...");

    // pump 1 card comes first
    let select = root
        .query_selector(".select-button")
        .unwrap()
        .unwrap()
        .dyn_into::<web_sys::HtmlElement>()
        .unwrap();
    select.click();

    let region = root.query_selector(".control-region").unwrap().unwrap();
    assert!(region
        .class_name()
        .split_whitespace()
        .any(|class| class == "selected"));
}

