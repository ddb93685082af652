//! Triangle wave channel implementation

use crate::apu::components::{LengthCounter, LinearCounter};
use crate::apu::constants::{CPU_CLOCKS, TRIANGLE_VOLUME};
use crate::apu::sink::{ChannelState, Waveform};

/// Triangle wave channel
///
/// Has no volume control; it is either on at a fixed level or silent.
#[derive(Debug, Clone, Default)]
pub struct TriangleChannel {
    pub(crate) enabled: bool,
    pub(crate) playing: bool,
    pub(crate) linear_counter: LinearCounter,
    pub(crate) length_counter: LengthCounter,
    pub(crate) timer_period: u16,
}

impl TriangleChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write to $4008 (control flag and linear counter reload)
    ///
    /// Bit 7 is both the linear counter control and the length halt.
    pub fn write_linear_counter(&mut self, data: u8) {
        self.linear_counter.write_control(data);
        self.length_counter.set_halt((data & 0x80) != 0);
    }

    /// Write to $400A (timer low byte)
    pub fn write_timer_low(&mut self, data: u8) {
        self.timer_period = (self.timer_period & 0x0700) | data as u16;
    }

    /// Write to $400B (length counter load and timer high)
    pub fn write_timer_high(&mut self, data: u8) {
        self.timer_period = (self.timer_period & 0x00FF) | (((data & 0x07) as u16) << 8);
        self.linear_counter.set_reload_flag();
        if !self.enabled {
            return;
        }
        self.length_counter.load(data);
        self.playing = true;
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.length_counter.clear();
            self.playing = false;
        }
    }

    pub fn is_audible(&self) -> bool {
        self.enabled
            && self.playing
            && self.length_counter.is_active()
            && self.linear_counter.is_active()
    }

    /// Clock the linear counter (quarter frame)
    pub fn clock_linear_counter(&mut self) {
        self.linear_counter.clock();
    }

    /// Clock the length counter (half frame)
    pub fn clock_length_counter(&mut self) {
        if self.length_counter.clock() {
            self.playing = false;
        }
    }

    pub fn frequency(&self) -> f32 {
        CPU_CLOCKS / (32.0 * (self.timer_period as f32 + 1.0))
    }

    pub fn state(&self, master_volume: f32) -> ChannelState {
        let volume = if self.is_audible() {
            TRIANGLE_VOLUME * master_volume
        } else {
            0.0
        };
        ChannelState {
            frequency: self.frequency(),
            waveform: Waveform::Triangle,
            volume,
        }
    }
}
