//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (pointer, touch, keyboard) folded into player intents
//! - Viewport resizes (trailing debounce, screen classification)
//!
//! Everything here is plain data so it can be tested without a browser.

use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH, RESIZE_DEBOUNCE_MS};
use crate::sim::ScreenType;

/// Discrete player intents delivered to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Jump / start / restart depending on phase
    Primary,
    /// Sound on/off (handled by the host, not the simulation)
    ToggleMute,
}

/// Map a `KeyboardEvent.code`; auto-repeat never triggers an action
pub fn map_key(code: &str, repeat: bool) -> Option<InputAction> {
    if repeat {
        return None;
    }
    match code {
        "Space" => Some(InputAction::Primary),
        "KeyM" => Some(InputAction::ToggleMute),
        _ => None,
    }
}

/// Map a mouse button press (`MouseEvent.button`); only the main button counts
pub fn map_pointer(button: i16) -> Option<InputAction> {
    (button == 0).then_some(InputAction::Primary)
}

/// Touch start always maps to the primary action
pub fn map_touch_start() -> Option<InputAction> {
    Some(InputAction::Primary)
}

/// How the logical canvas is fitted into the viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportLayout {
    /// CSS pixel size of the displayed canvas
    pub display_width: f32,
    pub display_height: f32,
    pub screen: ScreenType,
}

/// Fit the fixed-size playfield into a viewport, keeping its aspect ratio
pub fn layout_for_viewport(viewport_width: f32, viewport_height: f32) -> ViewportLayout {
    let scale = (viewport_width / CANVAS_WIDTH)
        .min(viewport_height / CANVAS_HEIGHT)
        .clamp(0.25, 1.0);
    ViewportLayout {
        display_width: CANVAS_WIDTH * scale,
        display_height: CANVAS_HEIGHT * scale,
        screen: ScreenType::from_viewport_width(viewport_width),
    }
}

/// Trailing debounce for resize events
///
/// Each `request` pushes the deadline out; `poll` yields the latest size once
/// the viewport has been quiet for the debounce period.
#[derive(Debug, Clone, Default)]
pub struct ResizeDebouncer {
    pending: Option<(f32, f32)>,
    deadline_ms: f64,
}

impl ResizeDebouncer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&mut self, width: f32, height: f32, now_ms: f64) {
        self.pending = Some((width, height));
        self.deadline_ms = now_ms + RESIZE_DEBOUNCE_MS;
    }

    pub fn poll(&mut self, now_ms: f64) -> Option<(f32, f32)> {
        if self.pending.is_some() && now_ms >= self.deadline_ms {
            return self.pending.take();
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(map_key("Space", false), Some(InputAction::Primary));
        assert_eq!(map_key("Space", true), None);
        assert_eq!(map_key("KeyM", false), Some(InputAction::ToggleMute));
        assert_eq!(map_key("KeyM", true), None);
        assert_eq!(map_key("KeyA", false), None);
        assert_eq!(map_pointer(0), Some(InputAction::Primary));
        assert_eq!(map_pointer(2), None);
        assert_eq!(map_touch_start(), Some(InputAction::Primary));
    }

    #[test]
    fn test_debounce_fires_once_after_quiet_period() {
        let mut d = ResizeDebouncer::new();
        d.request(500.0, 400.0, 0.0);
        d.request(520.0, 410.0, 40.0);
        d.request(540.0, 420.0, 80.0);
        assert_eq!(d.poll(150.0), None);
        assert_eq!(d.poll(180.0), Some((540.0, 420.0)));
        assert_eq!(d.poll(500.0), None);
    }

    #[test]
    fn test_layout_keeps_aspect_and_classifies() {
        let phone = layout_for_viewport(375.0, 667.0);
        assert_eq!(phone.screen, ScreenType::Mobile);
        assert!((phone.display_width / phone.display_height - 4.0 / 3.0).abs() < 1e-4);
        assert!(phone.display_width <= 375.0);

        let desktop = layout_for_viewport(1920.0, 1080.0);
        assert_eq!(desktop.screen, ScreenType::Desktop);
        assert_eq!(desktop.display_width, CANVAS_WIDTH);
    }
}
