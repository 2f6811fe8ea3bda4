use chrono::{DateTime, Local, TimeZone};
use sia_dashboard_web::channel::Packet;
use sia_dashboard_web::dashboard::{
    ConnectionState, Dashboard, Effect, ReconnectPolicy, Selection, TimerKey, UserAction,
};
use sia_dashboard_web::models::{ClientEvent, ServerEvent};
use sia_dashboard_web::view::{MemoryView, PumpId, Target, ACTIVE, SELECTED, UPDATING};

fn now() -> DateTime<Local> {
    Local.with_ymd_and_hms(2024, 5, 1, 14, 5, 9).unwrap()
}

/// Decode a raw frame the way the socket reader does
fn server_event(frame: &str) -> ServerEvent {
    Packet::decode(frame)
        .expect("frame should decode")
        .into_event()
        .expect("frame should carry an event")
        .expect("event should decode")
}

fn connected() -> Dashboard<MemoryView> {
    let mut dashboard = Dashboard::new(MemoryView::new(), ReconnectPolicy::default());
    dashboard.start();
    dashboard.handle(server_event("40"), now());
    dashboard
}

#[test]
fn test_data_update_frame_renders_pump() {
    let mut dashboard = connected();

    let effects = dashboard.handle(
        server_event(
            r#"42["data_update",{"pump":{"target_rate":12.34,"flow_rate":5.0,"pump_state":"Run"}}]"#,
        ),
        now(),
    );

    let view = dashboard.view();
    assert_eq!(view.text_of(Target::TargetRate(PumpId::One)), "12.3");
    assert_eq!(view.text_of(Target::FlowRate(PumpId::One)), "5.0");
    assert_eq!(view.text_of(Target::PumpState(PumpId::One)), "Run");
    assert_eq!(view.class_of(Target::PumpState(PumpId::One)), Some("run"));
    assert!(view.has_flag(Target::PumpControl("Run"), ACTIVE));
    assert!(!view.has_flag(Target::PumpControl("Stop"), ACTIVE));
    assert_eq!(view.text_of(Target::LastUpdate), "14:05:09");

    // changed values pulse for a second
    assert!(view.has_flag(Target::TargetRate(PumpId::One), UPDATING));
    assert!(effects.contains(&Effect::Schedule {
        key: TimerKey::Pulse(Target::TargetRate(PumpId::One)),
        delay_ms: 1_000,
    }));
    dashboard.on_timer(TimerKey::Pulse(Target::TargetRate(PumpId::One)));
    assert!(!dashboard
        .view()
        .has_flag(Target::TargetRate(PumpId::One), UPDATING));
}

#[test]
fn test_partial_update_leaves_other_sections() {
    let mut dashboard = connected();
    dashboard.handle(
        server_event(r#"42["data_update",{"tank":{"tank_level_mm":812,"tank_level_percent":64.6}}]"#),
        now(),
    );
    dashboard.handle(
        server_event(r#"42["data_update",{"skid":{"skid_flow":3.14,"skid_pressure":1.5}}]"#),
        now(),
    );

    let view = dashboard.view();
    assert_eq!(view.text_of(Target::TankLevelMm), "812");
    assert_eq!(view.text_of(Target::TankLevelPercent), "65");
    assert_eq!(view.width_of(Target::TankBar), 64.6);
    assert_eq!(view.text_of(Target::SkidFlow), "3.1");
    assert_eq!(view.text_of(Target::SkidPressure), "1.5");
    assert_eq!(view.text_of(Target::TargetRate(PumpId::One)), "");
}

#[test]
fn test_valve_and_lenient_values() {
    let mut dashboard = connected();

    dashboard.handle(
        server_event(r#"42["data_update",{"valve":{"state":"true"}}]"#),
        now(),
    );
    assert_eq!(dashboard.view().text_of(Target::ValveState), "closed");

    dashboard.handle(
        server_event(r#"42["data_update",{"valve":{"state":0}}]"#),
        now(),
    );
    assert_eq!(dashboard.view().text_of(Target::ValveState), "opened");
}

#[test]
fn test_selector_update_is_not_echoed() {
    let mut dashboard = connected();

    let effects = dashboard.handle(
        server_event(r#"42["data_update",{"selector":{"state":2}}]"#),
        now(),
    );
    assert!(!effects
        .iter()
        .any(|effect| matches!(effect, Effect::Emit(_))));
    assert!(dashboard
        .view()
        .has_flag(Target::ControlRegion(Selection::Pump2), SELECTED));

    let effects = dashboard.handle(
        server_event(r#"42["pump_selection_changed",{"selected_pump":3}]"#),
        now(),
    );
    assert!(effects.is_empty());
    assert_eq!(dashboard.selection(), Some(Selection::Valve));
    assert!(!dashboard
        .view()
        .has_flag(Target::ControlRegion(Selection::Pump2), SELECTED));

    // a local click is the only thing that reaches the server
    let effects = dashboard.act(UserAction::Select(Selection::Pump1), now());
    let frame = match &effects[..] {
        [Effect::Emit(event)] => Packet::try_from(event).unwrap().encode().unwrap(),
        other => panic!("unexpected effects {:?}", other),
    };
    assert_eq!(
        frame,
        format!(
            r#"42["pump_selection_changed",{{"selected_pump":1,"timestamp":{}}}]"#,
            now().timestamp_millis()
        )
    );
}

#[test]
fn test_reconnect_gives_up_after_max_attempts() {
    let mut dashboard = Dashboard::new(MemoryView::new(), ReconnectPolicy::default());
    dashboard.start();

    let mut delays = Vec::new();
    for _ in 0..10 {
        let effects = dashboard.handle(server_event(r#"44{"message":"refused"}"#), now());
        match &effects[..] {
            [Effect::Schedule {
                key: TimerKey::Reconnect,
                delay_ms,
            }] => delays.push(*delay_ms),
            other => panic!("expected a reconnect, got {:?}", other),
        }
        assert_eq!(dashboard.on_timer(TimerKey::Reconnect), vec![Effect::Connect]);
    }

    assert_eq!(delays.len(), 10);
    assert!(delays.windows(2).all(|pair| pair[0] <= pair[1]));
    assert_eq!(delays[0], 2_000);

    let effects = dashboard.handle(ServerEvent::ConnectError("refused".to_string()), now());
    assert!(effects.is_empty());
    assert_eq!(dashboard.connection(), ConnectionState::Disconnected);

    let notifications = dashboard.view().notifications();
    assert_eq!(notifications.len(), 1);
    assert!(notifications[0].message.contains("Reload the page"));
}

#[test]
fn test_successful_connect_resets_attempts() {
    let mut dashboard = connected();
    dashboard.handle(ServerEvent::Disconnect, now());
    dashboard.handle(ServerEvent::ConnectError("refused".to_string()), now());
    assert_eq!(dashboard.reconnect_attempts(), 2);
    assert_eq!(dashboard.view().notifications().len(), 1);

    dashboard.handle(ServerEvent::Connect, now());

    assert_eq!(dashboard.reconnect_attempts(), 0);
    assert!(dashboard.view().notifications().is_empty());
    assert_eq!(dashboard.view().text_of(Target::ConnectionStatus), "Connected");
}

#[test]
fn test_connection_error_shown_once() {
    let mut dashboard = Dashboard::new(MemoryView::new(), ReconnectPolicy::default());
    dashboard.start();

    dashboard.handle(ServerEvent::ConnectError("refused".to_string()), now());
    dashboard.on_timer(TimerKey::Reconnect);
    dashboard.handle(ServerEvent::ConnectError("refused".to_string()), now());

    assert_eq!(dashboard.view().notifications().len(), 1);
}

#[test]
fn test_pump_command_requires_connection() {
    let mut dashboard = connected();

    assert_eq!(
        dashboard.act(UserAction::SetPumpState("Stop".to_string()), now()),
        vec![Effect::Emit(ClientEvent::SetPumpState {
            state: "Stop".to_string()
        })]
    );

    dashboard.handle(server_event("41"), now());
    let effects = dashboard.act(UserAction::SetPumpState("Run".to_string()), now());

    assert!(!effects
        .iter()
        .any(|effect| matches!(effect, Effect::Emit(_))));
    let notifications = dashboard.view().notifications();
    assert_eq!(notifications.last().unwrap().message, "Not connected to server");
}

#[test]
fn test_fault_panel_follows_faults() {
    let mut dashboard = connected();

    dashboard.handle(
        server_event(r#"42["data_update",{"faults":{"hh_pressure":true,"ll_tank_level":"false"}}]"#),
        now(),
    );
    assert!(dashboard.view().is_visible(Target::FaultPanel));
    assert_eq!(
        dashboard.view().fault_messages(),
        &["High-high pressure detected: pumps stopped"]
    );

    dashboard.handle(server_event(r#"42["data_update",{"faults":{}}]"#), now());
    assert!(!dashboard.view().is_visible(Target::FaultPanel));
    assert!(dashboard.view().fault_messages().is_empty());

    dashboard.handle(
        server_event(r#"42["data_update",{"faults":{"ll_tank_level":1}}]"#),
        now(),
    );
    dashboard.handle(server_event(r#"42["data_update",{"pump":{}}]"#), now());
    assert!(!dashboard.view().is_visible(Target::FaultPanel));
}

#[test]
fn test_unknown_event_is_rejected() {
    let result = Packet::decode(r#"42["firmware_update",{}]"#)
        .unwrap()
        .into_event()
        .unwrap();

    assert!(result.is_err());
}
