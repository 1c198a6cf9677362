//! Pointer-drag state.

use glam::Vec2;

/// Records whether a drag is in progress and the last pointer position
/// seen during it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputTracker {
    dragging: bool,
    last_pos: Vec2,
}

impl InputTracker {
    /// A tracker with no drag in progress.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a drag with `(x, y)` as the reference point.
    pub fn press(&mut self, x: f32, y: f32) {
        self.dragging = true;
        self.last_pos = Vec2::new(x, y);
    }

    /// Movement since the reference point, moving the reference to
    /// `(x, y)`. `None` when no drag is in progress.
    pub fn drag_to(&mut self, x: f32, y: f32) -> Option<Vec2> {
        if !self.dragging {
            return None;
        }
        let pos = Vec2::new(x, y);
        let delta = pos - self.last_pos;
        self.last_pos = pos;
        Some(delta)
    }

    /// End the drag.
    pub fn release(&mut self) {
        self.dragging = false;
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Reference point of the current (or last) drag.
    #[must_use]
    pub fn last_pos(&self) -> Vec2 {
        self.last_pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_without_press_yields_nothing() {
        let mut tracker = InputTracker::new();
        assert_eq!(tracker.drag_to(10.0, 10.0), None);
        assert_eq!(tracker.last_pos(), Vec2::ZERO);
    }

    #[test]
    fn deltas_are_relative_to_previous_move() {
        let mut tracker = InputTracker::new();
        tracker.press(5.0, 5.0);
        assert_eq!(tracker.drag_to(8.0, 1.0), Some(Vec2::new(3.0, -4.0)));
        assert_eq!(tracker.drag_to(8.0, 2.0), Some(Vec2::new(0.0, 1.0)));
        tracker.release();
        assert!(!tracker.is_dragging());
        assert_eq!(tracker.drag_to(100.0, 100.0), None);
    }
}
