// APU module - Audio Processing Unit implementation
//
// Register writes and frame-sequencer ticks update the channel models, and
// every change is reported to the installed `AudioSink` as a `ChannelState`.
// Sample generation is left to the sink.

mod channels;
mod components;
mod constants;
mod sink;

#[cfg(test)]
mod tests;

use std::rc::Rc;

pub use channels::NoiseMode;
pub use constants::{CLOCKS_PER_FRAME, CPU_CLOCKS};
pub use sink::{AudioSink, Channel, ChannelState, NullSink, Waveform};

use crate::interrupts::Interrupts;
use channels::{NoiseChannel, PulseChannel, TriangleChannel};
use components::{FrameEvent, Sequencer};

/// APU structure representing the Audio Processing Unit state
pub struct Apu {
    pub(crate) pulse1: PulseChannel,
    pub(crate) pulse2: PulseChannel,
    pub(crate) triangle: TriangleChannel,
    pub(crate) noise: NoiseChannel,
    sequencer: Sequencer,
    master_volume: f32,
    sink: Box<dyn AudioSink>,
    interrupts: Rc<Interrupts>,
}

impl Apu {
    /// Create an APU that discards its output
    pub fn new(interrupts: Rc<Interrupts>) -> Self {
        Self::with_sink(interrupts, Box::new(NullSink))
    }

    pub fn with_sink(interrupts: Rc<Interrupts>, sink: Box<dyn AudioSink>) -> Self {
        Apu {
            pulse1: PulseChannel::new(1),
            pulse2: PulseChannel::new(2),
            triangle: TriangleChannel::new(),
            noise: NoiseChannel::new(),
            sequencer: Sequencer::new(),
            master_volume: 1.0,
            sink,
            interrupts,
        }
    }

    /// Replace the output sink and bring it up to date
    pub fn set_sink(&mut self, sink: Box<dyn AudioSink>) {
        self.sink = sink;
        self.publish_all();
    }

    pub fn master_volume(&self) -> f32 {
        self.master_volume
    }

    /// Set the gain applied to every channel, clamped to 0.0..=1.0
    pub fn set_master_volume(&mut self, volume: f32) {
        self.master_volume = volume.clamp(0.0, 1.0);
        self.publish_all();
    }

    /// Silence every channel and restart the frame sequencer
    pub fn reset(&mut self) {
        self.write_register(0x15, 0x00);
        self.sequencer.reset();
    }

    /// Write an APU register
    ///
    /// `addr` is the offset from $4000: $00-$0F for the channels, $15 for
    /// channel enables and $17 for the frame counter. Other offsets are
    /// ignored.
    pub fn write_register(&mut self, addr: u16, data: u8) {
        match addr {
            // Pulse 1
            0x00 => self.pulse1.write_register_0(data),
            0x01 => self.pulse1.write_register_1(data),
            0x02 => self.pulse1.write_register_2(data),
            0x03 => self.pulse1.write_register_3(data),

            // Pulse 2
            0x04 => self.pulse2.write_register_0(data),
            0x05 => self.pulse2.write_register_1(data),
            0x06 => self.pulse2.write_register_2(data),
            0x07 => self.pulse2.write_register_3(data),

            // Triangle ($4009 is unused)
            0x08 => self.triangle.write_linear_counter(data),
            0x0A => self.triangle.write_timer_low(data),
            0x0B => self.triangle.write_timer_high(data),

            // Noise ($400D is unused)
            0x0C => self.noise.write_envelope(data),
            0x0E => self.noise.write_mode_and_period(data),
            0x0F => self.noise.write_length(data),

            0x15 => {
                self.pulse1.set_enabled(data & 0x01 != 0);
                self.pulse2.set_enabled(data & 0x02 != 0);
                self.triangle.set_enabled(data & 0x04 != 0);
                self.noise.set_enabled(data & 0x08 != 0);
                self.publish_all();
                return;
            }

            // Frame counter: mode 0 with IRQ enabled raises the line
            0x17 => {
                self.interrupts.set_irq(data & 0xC0 == 0);
                return;
            }

            _ => return,
        }

        let channel = match addr {
            0x00..=0x03 => Channel::Pulse1,
            0x04..=0x07 => Channel::Pulse2,
            0x08..=0x0B => Channel::Triangle,
            _ => Channel::Noise,
        };
        self.publish(channel);
    }

    /// Read $4015: one bit per channel whose length counter is non-zero
    pub fn read_status(&self) -> u8 {
        let mut status = 0;
        if self.pulse1.length_counter.is_active() {
            status |= 0x01;
        }
        if self.pulse2.length_counter.is_active() {
            status |= 0x02;
        }
        if self.triangle.length_counter.is_active() {
            status |= 0x04;
        }
        if self.noise.length_counter.is_active() {
            status |= 0x08;
        }
        status
    }

    /// Advance one CPU cycle
    pub fn step(&mut self) {
        match self.sequencer.clock() {
            Some(FrameEvent::QuarterFrame) => {
                self.clock_quarter_frame();
                self.publish_all();
            }
            Some(FrameEvent::HalfFrame) => {
                self.clock_quarter_frame();
                self.clock_half_frame();
                self.publish_all();
            }
            None => {}
        }
        self.noise.clock_timer();
    }

    /// Clock envelopes and the triangle linear counter
    pub(crate) fn clock_quarter_frame(&mut self) {
        self.pulse1.clock_envelope();
        self.pulse2.clock_envelope();
        self.noise.clock_envelope();
        self.triangle.clock_linear_counter();
    }

    /// Clock length counters and sweep units
    pub(crate) fn clock_half_frame(&mut self) {
        self.pulse1.clock_length_and_sweep();
        self.pulse2.clock_length_and_sweep();
        self.triangle.clock_length_counter();
        self.noise.clock_length_counter();
    }

    /// Current output parameters of a channel
    pub fn channel_state(&self, channel: Channel) -> ChannelState {
        match channel {
            Channel::Pulse1 => self.pulse1.state(self.master_volume),
            Channel::Pulse2 => self.pulse2.state(self.master_volume),
            Channel::Triangle => self.triangle.state(self.master_volume),
            Channel::Noise => self.noise.state(self.master_volume),
        }
    }

    fn publish(&mut self, channel: Channel) {
        let state = self.channel_state(channel);
        self.sink.update(channel, state);
    }

    fn publish_all(&mut self) {
        for channel in Channel::ALL {
            self.publish(channel);
        }
    }
}
