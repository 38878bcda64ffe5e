//! End-to-end view switching over the in-memory drivers

use std::rc::Rc;

use tessel_core::config::UiConfig;
use tessel_core::{
    install_default_handlers, DisplaySession, Handler, SwitchError, ViewRegistry,
};
use tessel_display::{SurfaceDriver, SurfaceStore};
use tessel_hal::{Button, CallbackSlots, ClickDevice, BUTTON_COUNT};

type Session = DisplaySession<SurfaceStore<4>, CallbackSlots<Handler, BUTTON_COUNT>>;

fn booted() -> Session {
    let mut session = DisplaySession::new(
        SurfaceStore::new(),
        CallbackSlots::new(),
        ViewRegistry::with_builtin(),
        UiConfig::default(),
    );
    install_default_handlers(session.handlers_mut());
    session
}

fn has_view_handler(session: &Session, button: Button) -> bool {
    session
        .handlers()
        .binding(button.index())
        .and_then(|b| b.view_handler())
        .is_some()
}

/// Bound callback is the view handler recorded in the table
fn view_handler_bound(session: &Session, button: Button) -> bool {
    let binding = session.handlers().binding(button.index()).unwrap();
    match (binding.view_handler(), session.handlers().device().bound(button.index())) {
        (Some(view), Some(bound)) => Rc::ptr_eq(view, bound),
        _ => false,
    }
}

/// Bound callback is the default handler recorded in the table
fn default_bound(session: &Session, button: Button) -> bool {
    let binding = session.handlers().binding(button.index()).unwrap();
    match (binding.default_handler(), session.handlers().device().bound(button.index())) {
        (Some(default), Some(bound)) => binding.view_handler().is_none() && Rc::ptr_eq(default, bound),
        _ => false,
    }
}

fn loaded_name(session: &Session) -> Option<&str> {
    session.surfaces().loaded().map(|s| s.name())
}

#[test]
fn test_boot_then_clock_after_delay() {
    let mut session = booted();
    session.switch_to("Boot").unwrap();

    assert_eq!(session.current_view_name(), Some("Boot"));
    assert_eq!(loaded_name(&session), Some("Boot"));
    assert!(!session.handlers().has_view_handlers());
    for button in Button::ALL {
        assert!(default_bound(&session, button));
    }

    session.run_timers(1999).unwrap();
    assert_eq!(session.current_view_name(), Some("Boot"));

    session.run_timers(1).unwrap();
    assert_eq!(session.current_view_name(), Some("Clock"));
    assert_eq!(loaded_name(&session), Some("Clock"));

    for button in [Button::One, Button::Three, Button::Four] {
        assert!(view_handler_bound(&session, button));
    }
    assert!(default_bound(&session, Button::Two));

    // The boot timer was one-shot and is gone with its view
    session.run_timers(5000).unwrap();
    assert_eq!(session.current_view_name(), Some("Clock"));
}

#[test]
fn test_clock_button_four_opens_settings() {
    let mut session = booted();
    session.switch_to("Clock").unwrap();

    session.handle_click(Button::Four.index()).unwrap();

    assert_eq!(session.current_view_name(), Some("Settings"));
    assert!(view_handler_bound(&session, Button::One));
    assert!(view_handler_bound(&session, Button::Two));
    assert!(default_bound(&session, Button::Three));
    assert!(default_bound(&session, Button::Four));
}

#[test]
fn test_unknown_view_leaves_current() {
    let mut session = booted();
    session.switch_to("Clock").unwrap();
    let surface = session.surfaces().loaded_handle();

    assert_eq!(
        session.switch_to("Nonexistent"),
        Err(SwitchError::ViewNotFound)
    );

    assert_eq!(session.current_view_name(), Some("Clock"));
    assert_eq!(session.surfaces().loaded_handle(), surface);
    for button in [Button::One, Button::Three, Button::Four] {
        assert!(view_handler_bound(&session, button));
    }
    assert_eq!(session.timers().active_count(), 1);
}

#[test]
fn test_unknown_view_from_empty() {
    let mut session = booted();
    assert_eq!(
        session.switch_to("Nonexistent"),
        Err(SwitchError::ViewNotFound)
    );
    assert!(!session.is_active());
    assert!(session.surfaces().loaded().is_none());
}

#[test]
fn test_repeated_switches_keep_one_view() {
    let mut session = booted();
    let names = ["Boot", "Clock", "Settings", "System Info"];

    for round in 0..20 {
        let name = names[round % names.len()];
        session.switch_to(name).unwrap();

        assert_eq!(session.current_view_name(), Some(name));
        assert_eq!(session.surfaces().live_count(), 1);
        assert_eq!(loaded_name(&session), Some(name));
    }

    // Same view twice in a row yields a fresh instance
    session.switch_to("Clock").unwrap();
    let first = session.surfaces().loaded_handle().unwrap();
    session.switch_to("Clock").unwrap();
    let second = session.surfaces().loaded_handle().unwrap();
    assert_ne!(first, second);
    assert!(!session.surfaces().is_live(first));
    assert_eq!(session.surfaces().live_count(), 1);
}

#[test]
fn test_leaving_clock_cancels_its_timer() {
    let mut session = booted();
    session.switch_to("Clock").unwrap();
    let clock_surface = session.surfaces().loaded_handle().unwrap();
    assert_eq!(session.timers().active_count(), 1);

    session.handle_click(Button::Four.index()).unwrap();

    assert_eq!(session.timers().active_count(), 0);
    assert!(!session.surfaces().is_live(clock_surface));

    // Later ticks never reach the destroyed clock
    session.run_timers(10_000).unwrap();
    assert_eq!(session.current_view_name(), Some("Settings"));
}

#[test]
fn test_navigation_round_trip() {
    let mut session = booted();
    session.switch_to("Settings").unwrap();

    session.handle_click(Button::Two.index()).unwrap();
    assert_eq!(session.current_view_name(), Some("System Info"));
    assert!(view_handler_bound(&session, Button::Three));
    assert!(default_bound(&session, Button::One));
    assert!(default_bound(&session, Button::Two));

    session.handle_click(Button::Three.index()).unwrap();
    assert_eq!(session.current_view_name(), Some("Settings"));

    session.handle_click(Button::One.index()).unwrap();
    assert_eq!(session.current_view_name(), Some("Clock"));

    // Clock's button 3 changes the palette without switching
    session.handle_click(Button::Three.index()).unwrap();
    assert_eq!(session.current_view_name(), Some("Clock"));
}

#[test]
fn test_clock_ticks_update_surface() {
    let mut session = booted();
    session.switch_to("Clock").unwrap();

    for _ in 0..3 {
        session.run_timers(1000).unwrap();
    }

    let surface = session.surfaces().loaded().unwrap();
    assert_eq!(surface.label(0).unwrap().text(), "12:00:03");
}

#[test]
fn test_handlers_without_defaults() {
    let mut session: Session = DisplaySession::new(
        SurfaceStore::new(),
        CallbackSlots::new(),
        ViewRegistry::with_builtin(),
        UiConfig::default(),
    );
    session.switch_to("Clock").unwrap();
    session.switch_to("Boot").unwrap();

    for button in Button::ALL {
        assert!(session.handlers().device().bound(button.index()).is_none());
    }
}
