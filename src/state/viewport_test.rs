use super::*;

const BREAKPOINT: u32 = 1024;

// =============================================================
// Defaults
// =============================================================

#[test]
fn new_state_is_desktop_with_panel_shown() {
    let state = ViewportState::new(BREAKPOINT);
    assert!(!state.is_mobile());
    assert!(state.panel_visible());
    assert_eq!(state.width_px(), None);
    assert!(!state.show_mobile_chrome());
}

// =============================================================
// evaluate
// =============================================================

#[test]
fn desktop_width_keeps_panel() {
    let mut state = ViewportState::new(BREAKPOINT);
    let change = state.evaluate(1280);
    assert!(!change.is_mobile);
    assert!(change.panel_visible);
    assert!(!change.panel_forced_hidden);
}

#[test]
fn breakpoint_width_is_desktop() {
    let mut state = ViewportState::new(BREAKPOINT);
    assert!(!state.evaluate(1024).is_mobile);
    assert!(state.evaluate(1023).is_mobile);
}

#[test]
fn entering_mobile_hides_visible_panel() {
    let mut state = ViewportState::new(BREAKPOINT);
    state.evaluate(1280);
    let change = state.evaluate(800);
    assert!(change.is_mobile);
    assert!(!change.panel_visible);
    assert!(change.panel_forced_hidden);
    assert!(state.show_mobile_chrome());
}

#[test]
fn mobile_on_mount_hides_panel() {
    let mut state = ViewportState::new(BREAKPOINT);
    let change = state.evaluate(375);
    assert!(change.panel_forced_hidden);
    assert!(!state.panel_visible());
}

#[test]
fn entering_mobile_with_hidden_panel_keeps_it_hidden() {
    let mut state = ViewportState::new(BREAKPOINT);
    state.close_panel();
    let change = state.evaluate(600);
    assert!(!change.panel_visible);
    assert!(!change.panel_forced_hidden);
}

#[test]
fn leaving_mobile_does_not_reopen_panel() {
    let mut state = ViewportState::new(BREAKPOINT);
    state.evaluate(600);
    let change = state.evaluate(1440);
    assert!(!change.is_mobile);
    assert!(!change.panel_visible);
}

#[test]
fn mobile_reevaluation_rehides_user_opened_panel() {
    let mut state = ViewportState::new(BREAKPOINT);
    state.evaluate(600);
    state.toggle_panel();
    assert!(state.panel_visible());
    state.evaluate(700);
    assert!(!state.panel_visible());
}

// =============================================================
// Panel controls
// =============================================================

#[test]
fn toggle_flips_visibility() {
    let mut state = ViewportState::new(BREAKPOINT);
    assert!(!state.toggle_panel());
    assert!(state.toggle_panel());
}

#[test]
fn backdrop_active_only_on_mobile_with_open_panel() {
    let mut state = ViewportState::new(BREAKPOINT);
    assert!(!state.backdrop_active());
    state.evaluate(500);
    assert!(!state.backdrop_active());
    state.toggle_panel();
    assert!(state.backdrop_active());
    state.close_panel();
    assert!(!state.backdrop_active());
}
