//! Input handling
//!
//! Raw key/pointer events are folded into a single jump latch. The latch is
//! consumed by the next tick whether or not the jump can be applied, so a
//! press made mid-air is dropped rather than buffered until landing.

/// A raw input event forwarded by the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Key pressed, identified by `KeyboardEvent.code`
    KeyDown { code: String },
    /// Mouse button / touch / pen pressed on the playfield
    PointerDown,
}

/// Records jump requests between ticks
#[derive(Debug, Clone)]
pub struct InputHandler {
    jump_code: String,
    pending: bool,
}

impl InputHandler {
    pub fn new(jump_code: impl Into<String>) -> Self {
        Self {
            jump_code: jump_code.into(),
            pending: false,
        }
    }

    /// Whether `event` is a jump command
    pub fn is_jump(&self, event: &InputEvent) -> bool {
        match event {
            InputEvent::KeyDown { code } => *code == self.jump_code,
            InputEvent::PointerDown => true,
        }
    }

    /// Record an event. Returns true if it was a jump.
    pub fn handle(&mut self, event: &InputEvent) -> bool {
        let jump = self.is_jump(event);
        if jump {
            self.pending = true;
        }
        jump
    }

    /// Consume the pending jump request
    pub fn take_jump(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    /// Drop any pending request
    pub fn clear(&mut self) {
        self.pending = false;
    }

    pub fn has_pending_jump(&self) -> bool {
        self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: &str) -> InputEvent {
        InputEvent::KeyDown {
            code: code.to_string(),
        }
    }

    #[test]
    fn test_jump_sources() {
        let handler = InputHandler::new("Space");
        assert!(handler.is_jump(&key("Space")));
        assert!(handler.is_jump(&InputEvent::PointerDown));
        assert!(!handler.is_jump(&key("KeyA")));
        assert!(!handler.is_jump(&key("Enter")));
    }

    #[test]
    fn test_custom_jump_code() {
        let handler = InputHandler::new("ArrowUp");
        assert!(handler.is_jump(&key("ArrowUp")));
        assert!(!handler.is_jump(&key("Space")));
    }

    #[test]
    fn test_latch_is_consumed_once() {
        let mut handler = InputHandler::new("Space");
        assert!(!handler.take_jump());

        // Repeated presses collapse into one request
        handler.handle(&key("Space"));
        handler.handle(&InputEvent::PointerDown);
        assert!(handler.has_pending_jump());
        assert!(handler.take_jump());
        assert!(!handler.take_jump());
    }

    #[test]
    fn test_non_jump_keys_leave_latch_alone() {
        let mut handler = InputHandler::new("Space");
        assert!(!handler.handle(&key("Escape")));
        assert!(!handler.has_pending_jump());

        handler.handle(&key("Space"));
        handler.clear();
        assert!(!handler.take_jump());
    }
}
