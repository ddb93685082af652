//! Sweep unit for pitch bending

use crate::apu::constants::{SWEEP_MAX_PERIOD, SWEEP_MIN_PERIOD};

/// Result of a sweep clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepUpdate {
    /// The timer period moves to this value
    Period(u16),
    /// The target left the audible range; the channel halts with the
    /// period clamped to the nearest bound
    Halt(u16),
}

/// Sweep unit (`$4001`/`$4005`)
///
/// ```text
/// EPPP NSSS
/// |||| |+++- Shift
/// |||| +---- Negate
/// |+++------ Divider period
/// +--------- Enabled
/// ```
#[derive(Debug, Clone)]
pub struct Sweep {
    enabled: bool,
    divider: u8,
    period: u8,
    negate: bool,
    shift: u8,
    reload: bool,
    /// Channel number (1 or 2) - pulse 1 subtracts one extra when negating
    pub(crate) channel: u8,
}

impl Sweep {
    pub fn new(channel: u8) -> Self {
        Self {
            enabled: false,
            divider: 0,
            period: 0,
            negate: false,
            shift: 0,
            reload: false,
            channel,
        }
    }

    /// Target period: timer ± (timer >> shift)
    ///
    /// Signed so that a negated target below zero stays out of range.
    pub fn target_period(&self, current_period: u16) -> i32 {
        let current = current_period as i32;
        let change = current >> self.shift;
        if self.negate {
            let extra = if self.channel == 1 { 1 } else { 0 };
            current - change - extra
        } else {
            current + change
        }
    }

    /// Clock the sweep unit (half frame)
    pub fn clock(&mut self, current_period: u16) -> Option<SweepUpdate> {
        let mut update = None;

        if self.divider == 0 && self.enabled && self.shift > 0 {
            let target = self.target_period(current_period);
            update = Some(if target < SWEEP_MIN_PERIOD as i32 {
                SweepUpdate::Halt(SWEEP_MIN_PERIOD)
            } else if target > SWEEP_MAX_PERIOD as i32 {
                SweepUpdate::Halt(SWEEP_MAX_PERIOD)
            } else {
                SweepUpdate::Period(target as u16)
            });
        }

        if self.divider == 0 || self.reload {
            self.divider = self.period;
            self.reload = false;
        } else {
            self.divider -= 1;
        }

        update
    }

    /// Reload the divider on the next clock without changing the settings
    pub fn restart(&mut self) {
        self.reload = true;
    }

    pub fn write_control(&mut self, data: u8) {
        self.enabled = (data & 0x80) != 0;
        self.period = (data >> 4) & 0x07;
        self.negate = (data & 0x08) != 0;
        self.shift = data & 0x07;
        self.reload = true;
    }
}
