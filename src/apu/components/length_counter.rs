//! Length counter for controlling note duration

use crate::apu::constants::LENGTH_COUNTER_TABLE;

#[derive(Debug, Clone, Default)]
pub struct LengthCounter {
    pub(crate) counter: u8,
    /// Halt flag (envelope loop / triangle control bit)
    pub(crate) halt: bool,
}

impl LengthCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clock the length counter (half frame)
    ///
    /// Returns true on the clock that brings the counter to zero.
    pub fn clock(&mut self) -> bool {
        if self.halt || self.counter == 0 {
            return false;
        }
        self.counter -= 1;
        self.counter == 0
    }

    /// Load from the length table using the 5-bit index in bits 7-3 of `data`
    pub fn load(&mut self, data: u8) {
        self.counter = LENGTH_COUNTER_TABLE[((data >> 3) & 0x1F) as usize];
    }

    pub fn clear(&mut self) {
        self.counter = 0;
    }

    pub fn is_active(&self) -> bool {
        self.counter > 0
    }

    pub fn set_halt(&mut self, halt: bool) {
        self.halt = halt;
    }
}
