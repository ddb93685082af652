//! Audio output boundary
//!
//! The APU does not synthesize samples. It describes what each channel
//! should be playing and hands that description to an [`AudioSink`], which
//! owns the actual oscillators.

use std::fmt;

/// APU sound channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Pulse1,
    Pulse2,
    Triangle,
    Noise,
}

impl Channel {
    pub const ALL: [Channel; 4] = [
        Channel::Pulse1,
        Channel::Pulse2,
        Channel::Triangle,
        Channel::Noise,
    ];
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Channel::Pulse1 => "pulse1",
            Channel::Pulse2 => "pulse2",
            Channel::Triangle => "triangle",
            Channel::Noise => "noise",
        };
        f.write_str(name)
    }
}

/// Shape of the tone a channel produces
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Waveform {
    /// Square wave with the given duty ratio (0.125, 0.25, 0.5 or 0.75)
    Pulse { duty: f32 },
    Triangle,
    /// Pseudo-random noise; `short_mode` is the 93-step loop
    Noise { short_mode: bool },
}

/// Snapshot of one channel's output parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelState {
    /// Tone frequency in Hz (LFSR clock rate for noise)
    pub frequency: f32,
    pub waveform: Waveform,
    /// Output gain in 0.0..=1.0, master volume applied; 0 when silenced
    pub volume: f32,
}

impl ChannelState {
    pub fn is_silent(&self) -> bool {
        self.volume == 0.0
    }
}

/// Receiver for channel updates
///
/// Called whenever a register write or sequencer tick may have changed a
/// channel's output.
pub trait AudioSink {
    fn update(&mut self, channel: Channel, state: ChannelState);
}

/// Sink that discards every update
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl AudioSink for NullSink {
    fn update(&mut self, _channel: Channel, _state: ChannelState) {}
}

/// Scale a 4-bit envelope volume into a gain
pub(crate) fn envelope_gain(volume: u8, master_volume: f32) -> f32 {
    (volume as f32 / 16.0).clamp(0.0, 1.0) * master_volume
}
