use tracing::debug;

/// Pointer-drag tracker for interactive watermark placement.
///
/// Converts absolute pointer positions into per-move deltas. The caller adds
/// each delta to its [`PlacementConfig`](crate::placement::PlacementConfig)
/// and recomposes.
#[derive(Debug, Clone, Default)]
pub struct DragSession {
    enabled: bool,
    active: bool,
    last: (i32, i32),
}

impl DragSession {
    pub fn new(enabled: bool) -> Self {
        Self { enabled, active: false, last: (0, 0) }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Enable or disable dragging. Disabling ends any drag in progress.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.active = false;
        }
    }

    /// Start dragging at `(x, y)`. Ignored while dragging is disabled.
    pub fn pointer_down(&mut self, x: i32, y: i32) {
        if !self.enabled {
            return;
        }
        self.active = true;
        self.last = (x, y);
        debug!("Drag started at ({}, {})", x, y);
    }

    /// Movement since the previous pointer event, or `None` when no drag is
    /// in progress.
    pub fn pointer_move(&mut self, x: i32, y: i32) -> Option<(i32, i32)> {
        if !self.active {
            return None;
        }
        let delta = (x.saturating_sub(self.last.0), y.saturating_sub(self.last.1));
        self.last = (x, y);
        Some(delta)
    }

    pub fn pointer_up(&mut self) {
        self.active = false;
    }

    pub fn pointer_cancel(&mut self) {
        self.active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_session_ignores_pointer() {
        let mut drag = DragSession::new(false);
        drag.pointer_down(10, 10);
        assert!(!drag.is_active());
        assert_eq!(drag.pointer_move(20, 20), None);
    }

    #[test]
    fn test_deltas_are_relative_to_previous_move() {
        let mut drag = DragSession::new(true);
        drag.pointer_down(100, 100);
        assert_eq!(drag.pointer_move(105, 98), Some((5, -2)));
        assert_eq!(drag.pointer_move(110, 98), Some((5, 0)));
        drag.pointer_up();
        assert_eq!(drag.pointer_move(200, 200), None);
    }

    #[test]
    fn test_cancel_and_disable_end_drag() {
        let mut drag = DragSession::new(true);
        drag.pointer_down(0, 0);
        drag.pointer_cancel();
        assert!(!drag.is_active());

        drag.pointer_down(0, 0);
        drag.set_enabled(false);
        assert!(!drag.is_active());
    }
}
