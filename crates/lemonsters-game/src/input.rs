use crate::config::InputConfig;

/// Jump input buffering and coyote-time tracking.
///
/// The host samples its keyboard and feeds edges in; this struct owns
/// the timing windows so a jump pressed a few frames early (buffer) or
/// a few ms after walking off a ledge (coyote) still lands. Disabling
/// the buffer freezes it; death and pause windows disable input.
#[derive(Debug, Clone)]
pub struct InputBuffer {
    jump_buffer_ms: f32,
    coyote_ms: f32,
    enabled: bool,
    buffer_window_ms: f32,
    coyote_window_ms: f32,
}

impl InputBuffer {
    pub fn new(config: &InputConfig) -> Self {
        Self {
            jump_buffer_ms: 0.0,
            coyote_ms: 0.0,
            enabled: true,
            buffer_window_ms: config.jump_buffer_frames as f32 * (1000.0 / config.target_fps),
            coyote_window_ms: config.coyote_time_ms,
        }
    }

    /// Advance the timing windows by one frame.
    ///
    /// `jump_just_pressed` is the key-down edge from the host;
    /// `grounded` is the player's current ground contact.
    pub fn update(&mut self, delta_ms: f32, jump_just_pressed: bool, grounded: bool) {
        if !self.enabled {
            return;
        }

        if self.jump_buffer_ms > 0.0 {
            self.jump_buffer_ms -= delta_ms;
        }
        if jump_just_pressed {
            self.jump_buffer_ms = self.buffer_window_ms;
        }

        if grounded {
            self.coyote_ms = self.coyote_window_ms;
        } else if self.coyote_ms > 0.0 {
            self.coyote_ms = (self.coyote_ms - delta_ms).max(0.0);
        }
    }

    /// Whether a buffered jump press is pending.
    pub fn is_jump_pressed(&self) -> bool {
        self.enabled && self.jump_buffer_ms > 0.0
    }

    /// Whether the player left the ground recently enough to still jump.
    pub fn can_coyote_jump(&self) -> bool {
        self.enabled && self.coyote_ms > 0.0
    }

    /// Spend the buffered press after a successful jump. Also closes
    /// the coyote window so one ledge grants one jump.
    pub fn consume_jump(&mut self) {
        self.jump_buffer_ms = 0.0;
        self.coyote_ms = 0.0;
    }

    pub fn clear(&mut self) {
        self.jump_buffer_ms = 0.0;
        self.coyote_ms = 0.0;
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Horizontal movement axis from raw key states. Opposing keys
    /// cancel; disabled input reads as neutral.
    pub fn movement_x(&self, left: bool, right: bool) -> f32 {
        if !self.enabled {
            return 0.0;
        }
        match (left, right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}
