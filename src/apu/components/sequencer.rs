//! Frame sequencer for the APU
//!
//! A divider clocked every CPU cycle that generates the low-frequency
//! clocks driving the envelope, sweep, linear and length counter units.
//!
//! ```text
//! cycle:  q        2q       3q       4q
//!         Quarter  Half     Quarter  Half (restart)
//! ```
//!
//! Half ticks also clock everything a quarter tick does.

use crate::apu::constants::QUARTER_FRAME;

/// Events that the sequencer can generate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameEvent {
    /// Clock envelopes and the triangle linear counter
    QuarterFrame,
    /// Quarter frame plus length counters and sweep units
    HalfFrame,
}

#[derive(Debug, Clone, Default)]
pub struct Sequencer {
    /// Cycle position within the current frame
    cycle: u32,
}

impl Sequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.cycle = 0;
    }

    /// Clock the sequencer (called every CPU cycle)
    pub fn clock(&mut self) -> Option<FrameEvent> {
        let position = self.cycle;
        self.cycle += 1;

        match position {
            p if p == QUARTER_FRAME || p == QUARTER_FRAME * 3 => Some(FrameEvent::QuarterFrame),
            p if p == QUARTER_FRAME * 2 => Some(FrameEvent::HalfFrame),
            p if p == QUARTER_FRAME * 4 => {
                self.cycle = 0;
                Some(FrameEvent::HalfFrame)
            }
            _ => None,
        }
    }
}
