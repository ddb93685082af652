//! Divider that fires once every `period + 1` clocks

#[derive(Debug, Clone, Default)]
pub struct Timer {
    pub(crate) period: u16,
    counter: u16,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clock the timer
    /// Returns true when the timer reaches 0 and reloads
    pub fn clock(&mut self) -> bool {
        if self.counter == 0 {
            self.counter = self.period;
            true
        } else {
            self.counter -= 1;
            false
        }
    }

    /// Set the period and restart the countdown from it
    pub fn reload(&mut self, period: u16) {
        self.period = period;
        self.counter = period;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_fires_after_period_plus_one() {
        let mut timer = Timer::new();
        timer.reload(2);
        assert!(!timer.clock());
        assert!(!timer.clock());
        assert!(timer.clock());
        assert!(!timer.clock(), "Counter reloaded");
    }
}
