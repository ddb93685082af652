//! Pulse wave channel implementation

use crate::apu::components::{Envelope, LengthCounter, Sweep, SweepUpdate};
use crate::apu::constants::{CPU_CLOCKS, DUTY_RATIOS};
use crate::apu::sink::{envelope_gain, ChannelState, Waveform};

/// Pulse wave channel (used for both Pulse 1 and Pulse 2)
#[derive(Debug, Clone)]
pub struct PulseChannel {
    /// Enabled flag (from $4015)
    pub(crate) enabled: bool,
    /// Set by a $4003/$4007 write, cleared when the note ends
    pub(crate) playing: bool,
    /// Duty cycle (0-3)
    pub(crate) duty: u8,
    pub(crate) envelope: Envelope,
    pub(crate) sweep: Sweep,
    pub(crate) length_counter: LengthCounter,
    /// 11-bit timer period
    pub(crate) timer_period: u16,
}

impl PulseChannel {
    /// Create a new pulse channel
    /// `channel_number` should be 1 or 2 and affects the sweep unit's negate behavior
    pub fn new(channel_number: u8) -> Self {
        Self {
            enabled: false,
            playing: false,
            duty: 0,
            envelope: Envelope::new(),
            sweep: Sweep::new(channel_number),
            length_counter: LengthCounter::new(),
            timer_period: 0,
        }
    }

    /// Write to register 0 (duty cycle and envelope)
    pub fn write_register_0(&mut self, data: u8) {
        self.duty = (data >> 6) & 0x03;
        self.length_counter.set_halt((data & 0x20) != 0);
        self.envelope.write_control(data);
    }

    /// Write to register 1 (sweep unit)
    pub fn write_register_1(&mut self, data: u8) {
        self.sweep.write_control(data);
    }

    /// Write to register 2 (timer low byte)
    pub fn write_register_2(&mut self, data: u8) {
        self.timer_period = (self.timer_period & 0x0700) | data as u16;
    }

    /// Write to register 3 (length counter and timer high)
    ///
    /// Starts a new note. Ignored apart from the timer while disabled.
    pub fn write_register_3(&mut self, data: u8) {
        self.timer_period = (self.timer_period & 0x00FF) | (((data & 0x07) as u16) << 8);
        if !self.enabled {
            return;
        }
        self.length_counter.load(data);
        self.envelope.restart();
        self.sweep.restart();
        self.playing = true;
    }

    /// Set the enabled flag (from $4015)
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.length_counter.clear();
            self.playing = false;
        }
    }

    /// Whether the channel is currently producing sound
    pub fn is_audible(&self) -> bool {
        self.enabled && self.playing && self.length_counter.is_active()
    }

    /// Clock the envelope (quarter frame)
    pub fn clock_envelope(&mut self) {
        self.envelope.clock();
    }

    /// Clock the length counter and sweep unit (half frame)
    pub fn clock_length_and_sweep(&mut self) {
        if self.length_counter.clock() {
            self.playing = false;
        }

        match self.sweep.clock(self.timer_period) {
            Some(SweepUpdate::Period(period)) => self.timer_period = period,
            Some(SweepUpdate::Halt(period)) => {
                self.timer_period = period;
                self.playing = false;
            }
            None => {}
        }
    }

    pub fn frequency(&self) -> f32 {
        CPU_CLOCKS / (16.0 * (self.timer_period as f32 + 1.0))
    }

    pub fn state(&self, master_volume: f32) -> ChannelState {
        let volume = if self.is_audible() {
            envelope_gain(self.envelope.volume(), master_volume)
        } else {
            0.0
        };
        ChannelState {
            frequency: self.frequency(),
            waveform: Waveform::Pulse {
                duty: DUTY_RATIOS[self.duty as usize],
            },
            volume,
        }
    }
}
