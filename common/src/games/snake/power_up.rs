use super::settings::POWER_UP_DURATION_TICKS;

/// Countdown started by a power-up pickup. Purely informational: no rule reads `active`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PowerUpState {
    pub active: bool,
    pub ticks_remaining: u32,
}

impl PowerUpState {
    pub fn activate(&mut self) {
        self.active = true;
        self.ticks_remaining = POWER_UP_DURATION_TICKS;
    }

    /// One tick of decay; deactivates once the counter reaches zero.
    pub fn decay(&mut self) {
        if !self.active {
            return;
        }
        self.ticks_remaining = self.ticks_remaining.saturating_sub(1);
        if self.ticks_remaining == 0 {
            self.active = false;
        }
    }
}
