//! APU constants and lookup tables

/// NTSC CPU clock rate in Hz
pub const CPU_CLOCKS: f32 = 1_789_773.0;

/// CPU cycles per video frame; the sequencer spans one frame
pub const CLOCKS_PER_FRAME: u32 = 29_781;

/// Sequencer step length (one quarter of a frame)
pub const QUARTER_FRAME: u32 = CLOCKS_PER_FRAME / 4;

/// Triangle output level relative to master volume
pub const TRIANGLE_VOLUME: f32 = 0.1;

/// Noise shift register power-on value (bit 14 set)
pub const LFSR_INITIAL: u16 = 0x4000;

/// Sweep targets outside this range halt the pulse channel
pub const SWEEP_MIN_PERIOD: u16 = 0x10;
pub const SWEEP_MAX_PERIOD: u16 = 0xFFF;

/// Length counter lookup table
/// Maps the 5-bit length counter load value to the actual counter value
pub const LENGTH_COUNTER_TABLE: [u8; 32] = [
    10, 254, 20, 2, 40, 4, 80, 6, 160, 8, 60, 10, 14, 12, 26, 14, 12, 16, 24, 18, 48, 20, 96, 22,
    192, 24, 72, 26, 16, 28, 32, 30,
];

/// Pulse duty ratios indexed by the 2-bit duty field
pub const DUTY_RATIOS: [f32; 4] = [0.125, 0.25, 0.5, 0.75];

/// Noise channel period lookup table
/// Maps the 4-bit period value to the actual timer period (in CPU cycles)
/// NTSC values
pub const NOISE_PERIOD_TABLE: [u16; 16] = [
    4, 8, 16, 32, 64, 96, 128, 160, 202, 254, 380, 508, 762, 1016, 2034, 4068,
];
