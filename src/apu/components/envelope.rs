//! Envelope generator for controlling volume over time

/// Envelope generator shared by the pulse and noise channels
///
/// Register layout (`$4000`/`$4004`/`$400C`):
/// ```text
/// --LC VVVV
///   || ++++- Envelope period / constant volume
///   |+------ Constant volume
///   +------- Loop (also length counter halt)
/// ```
#[derive(Debug, Clone, Default)]
pub struct Envelope {
    /// Start flag - set when the channel's length counter is loaded
    pub(crate) start: bool,
    divider: u8,
    /// Decay level counter (0-15)
    pub(crate) decay_level: u8,
    /// Divider period, or the volume in constant mode
    pub(crate) period: u8,
    pub(crate) loop_flag: bool,
    pub(crate) constant_volume: bool,
}

impl Envelope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clock the envelope generator (quarter frame)
    pub fn clock(&mut self) {
        if self.start {
            self.start = false;
            self.decay_level = 15;
            self.divider = self.period;
            return;
        }

        if self.divider > 0 {
            self.divider -= 1;
            return;
        }

        self.divider = self.period;
        if self.decay_level > 0 {
            self.decay_level -= 1;
        } else if self.loop_flag {
            self.decay_level = 15;
        }
    }

    /// Current volume (0-15)
    pub fn volume(&self) -> u8 {
        if self.constant_volume {
            self.period
        } else {
            self.decay_level
        }
    }

    pub fn write_control(&mut self, data: u8) {
        self.loop_flag = (data & 0x20) != 0;
        self.constant_volume = (data & 0x10) != 0;
        self.period = data & 0x0F;
    }

    pub fn restart(&mut self) {
        self.start = true;
    }
}
