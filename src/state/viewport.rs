//! Viewport mode and AI panel visibility.
//!
//! DESIGN
//! ======
//! Two booleans with one coupling rule: any evaluation that lands in mobile
//! mode hides the panel. Leaving mobile mode never shows it again; only the
//! user does that. Debouncing of resize events lives in the view, which
//! calls [`ViewportState::evaluate`] once per quiet period.

use serde::Serialize;

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

/// What an evaluation changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewportChange {
    pub is_mobile: bool,
    pub panel_visible: bool,
    /// True when the evaluation forced the panel closed.
    pub panel_forced_hidden: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ViewportState {
    breakpoint_px: u32,
    width_px: Option<u32>,
    is_mobile: bool,
    panel_visible: bool,
}

impl ViewportState {
    /// Desktop defaults: not mobile, panel shown, width unknown until mount.
    #[must_use]
    pub fn new(breakpoint_px: u32) -> Self {
        Self { breakpoint_px, width_px: None, is_mobile: false, panel_visible: true }
    }

    /// Recompute mobile mode for `width_px` and apply the coupling rule.
    pub fn evaluate(&mut self, width_px: u32) -> ViewportChange {
        let mobile = width_px < self.breakpoint_px;
        let was_visible = self.panel_visible;
        self.width_px = Some(width_px);
        self.is_mobile = mobile;
        if mobile {
            self.panel_visible = false;
        }
        ViewportChange {
            is_mobile: mobile,
            panel_visible: self.panel_visible,
            panel_forced_hidden: mobile && was_visible,
        }
    }

    pub fn toggle_panel(&mut self) -> bool {
        self.panel_visible = !self.panel_visible;
        self.panel_visible
    }

    /// Backdrop click or close button.
    pub fn close_panel(&mut self) {
        self.panel_visible = false;
    }

    #[must_use]
    pub fn is_mobile(&self) -> bool {
        self.is_mobile
    }

    #[must_use]
    pub fn panel_visible(&self) -> bool {
        self.panel_visible
    }

    #[must_use]
    pub fn width_px(&self) -> Option<u32> {
        self.width_px
    }

    /// Backdrop, close button and floating toggle only exist on mobile.
    #[must_use]
    pub fn show_mobile_chrome(&self) -> bool {
        self.is_mobile
    }

    /// The backdrop is rendered on mobile but only dims while the panel is open.
    #[must_use]
    pub fn backdrop_active(&self) -> bool {
        self.is_mobile && self.panel_visible
    }
}
