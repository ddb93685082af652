//! APU integration tests driven through the register interface

mod triangle_tests;

use std::cell::RefCell;
use std::rc::Rc;

use crate::apu::{Apu, AudioSink, Channel, ChannelState};
use crate::interrupts::Interrupts;

/// Sink that records every update for inspection
#[derive(Clone, Default)]
pub(super) struct RecordingSink {
    pub updates: Rc<RefCell<Vec<(Channel, ChannelState)>>>,
}

impl RecordingSink {
    /// Most recent state reported for `channel`
    pub fn last(&self, channel: Channel) -> Option<ChannelState> {
        self.updates
            .borrow()
            .iter()
            .rev()
            .find(|(c, _)| *c == channel)
            .map(|(_, state)| *state)
    }

    pub fn count(&self) -> usize {
        self.updates.borrow().len()
    }
}

impl AudioSink for RecordingSink {
    fn update(&mut self, channel: Channel, state: ChannelState) {
        self.updates.borrow_mut().push((channel, state));
    }
}

/// APU with a recording sink and its shared interrupt lines
pub(super) fn recording_apu() -> (Apu, RecordingSink, Rc<Interrupts>) {
    let interrupts = Rc::new(Interrupts::new());
    let sink = RecordingSink::default();
    let apu = Apu::with_sink(Rc::clone(&interrupts), Box::new(sink.clone()));
    (apu, sink, interrupts)
}

/// APU with all four channels enabled
pub(super) fn enabled_apu() -> (Apu, RecordingSink) {
    let (mut apu, sink, _) = recording_apu();
    apu.write_register(0x15, 0x0F);
    (apu, sink)
}
