//! Noise channel implementation

use crate::apu::components::{Envelope, LengthCounter, Timer};
use crate::apu::constants::{CPU_CLOCKS, LFSR_INITIAL, NOISE_PERIOD_TABLE};
use crate::apu::sink::{envelope_gain, ChannelState, Waveform};

/// Feedback tap selection for the shift register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoiseMode {
    /// Bit 14 XOR bit 13 (32767-step sequence)
    Long,
    /// Bit 14 XOR bit 8 (93-step sequence)
    Short,
}

/// Noise channel
///
/// The 15-bit shift register only runs once a mode has been written to
/// $400E.
#[derive(Debug, Clone)]
pub struct NoiseChannel {
    pub(crate) enabled: bool,
    pub(crate) playing: bool,
    pub(crate) mode: Option<NoiseMode>,
    pub(crate) envelope: Envelope,
    pub(crate) length_counter: LengthCounter,
    pub(crate) timer: Timer,
    pub(crate) shift_register: u16,
}

impl NoiseChannel {
    pub fn new() -> Self {
        Self {
            enabled: false,
            playing: false,
            mode: None,
            envelope: Envelope::new(),
            length_counter: LengthCounter::new(),
            timer: Timer::new(),
            shift_register: LFSR_INITIAL,
        }
    }

    /// Write to $400C (envelope)
    pub fn write_envelope(&mut self, data: u8) {
        self.length_counter.set_halt((data & 0x20) != 0);
        self.envelope.write_control(data);
    }

    /// Write to $400E (mode and period)
    pub fn write_mode_and_period(&mut self, data: u8) {
        self.mode = Some(if data & 0x80 != 0 {
            NoiseMode::Short
        } else {
            NoiseMode::Long
        });
        self.timer.reload(NOISE_PERIOD_TABLE[(data & 0x0F) as usize]);
    }

    /// Write to $400F (length counter load)
    pub fn write_length(&mut self, data: u8) {
        if !self.enabled {
            return;
        }
        self.length_counter.load(data);
        self.envelope.restart();
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
        self.enabled && self.playing && self.length_counter.is_active()
    }

    /// Clock the timer (every CPU cycle); shifts the register when it expires
    pub fn clock_timer(&mut self) {
        let Some(mode) = self.mode else {
            return;
        };
        if self.timer.clock() {
            self.shift(mode);
        }
    }

    fn shift(&mut self, mode: NoiseMode) {
        let tap = match mode {
            NoiseMode::Long => 13,
            NoiseMode::Short => 8,
        };
        let feedback = ((self.shift_register >> 14) ^ (self.shift_register >> tap)) & 0x01;
        self.shift_register = ((self.shift_register << 1) | feedback) & 0x7FFF;
    }

    pub fn clock_envelope(&mut self) {
        self.envelope.clock();
    }

    pub fn clock_length_counter(&mut self) {
        if self.length_counter.clock() {
            self.playing = false;
        }
    }

    /// Rate at which the shift register advances
    pub fn frequency(&self) -> f32 {
        match self.mode {
            Some(_) => CPU_CLOCKS / (self.timer.period as f32 + 1.0),
            None => 0.0,
        }
    }

    pub fn state(&self, master_volume: f32) -> ChannelState {
        let volume = if self.is_audible() {
            envelope_gain(self.envelope.volume(), master_volume)
        } else {
            0.0
        };
        ChannelState {
            frequency: self.frequency(),
            waveform: Waveform::Noise {
                short_mode: self.mode == Some(NoiseMode::Short),
            },
            volume,
        }
    }
}

impl Default for NoiseChannel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Clock until the shift register changes `count` times
    fn shifts(noise: &mut NoiseChannel, count: usize) -> Vec<u16> {
        let mut states = Vec::with_capacity(count);
        let mut last = noise.shift_register;
        while states.len() < count {
            noise.clock_timer();
            if noise.shift_register != last {
                last = noise.shift_register;
                states.push(last);
            }
        }
        states
    }

    #[test]
    fn test_noise_idle_until_mode_written() {
        let mut noise = NoiseChannel::new();
        for _ in 0..100 {
            noise.clock_timer();
        }
        assert_eq!(noise.shift_register, 0x4000);
    }

    #[test]
    fn test_noise_timer_uses_period_table() {
        let mut noise = NoiseChannel::new();
        noise.write_mode_and_period(0x00); // period 4

        for _ in 0..4 {
            noise.clock_timer();
        }
        assert_eq!(noise.shift_register, 0x4000);
        noise.clock_timer();
        assert_eq!(noise.shift_register, 0x0001, "Shifted on the fifth clock");
    }

    #[test]
    fn test_noise_long_mode_reference_sequence() {
        let mut noise = NoiseChannel::new();
        noise.write_mode_and_period(0x00);

        let expected = [
            0x0001, 0x0002, 0x0004, 0x0008, 0x0010, 0x0020, 0x0040, 0x0080, 0x0100, 0x0200,
            0x0400, 0x0800, 0x1000, 0x2000, 0x4001, 0x0003, 0x0006, 0x000C, 0x0018, 0x0030,
            0x0060, 0x00C0, 0x0180, 0x0300,
        ];
        assert_eq!(shifts(&mut noise, expected.len()), expected);
    }

    #[test]
    fn test_noise_short_mode_taps_bit_8() {
        let mut noise = NoiseChannel::new();
        noise.write_mode_and_period(0x80);

        let states = shifts(&mut noise, 12);
        assert_eq!(&states[8..], &[0x0100, 0x0201, 0x0402, 0x0804]);
    }

    #[test]
    fn test_noise_state() {
        let mut noise = NoiseChannel::new();
        noise.set_enabled(true);
        noise.write_envelope(0x1F);
        noise.write_mode_and_period(0x83);
        noise.write_length(0x08);

        let state = noise.state(1.0);
        assert_eq!(state.waveform, Waveform::Noise { short_mode: true });
        assert_eq!(state.volume, 15.0 / 16.0);
        assert!((state.frequency - 1_789_773.0 / 33.0).abs() < 1.0);
    }

    #[test]
    fn test_noise_length_expiry() {
        let mut noise = NoiseChannel::new();
        noise.set_enabled(true);
        noise.write_envelope(0x1F);
        noise.write_length(0x18); // length 2
        noise.clock_length_counter();
        noise.clock_length_counter();
        assert!(!noise.is_audible());
    }
}
