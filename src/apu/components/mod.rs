//! Common APU components used by multiple channels

pub mod envelope;
pub mod length_counter;
pub mod linear_counter;
pub mod sequencer;
pub mod sweep;
pub mod timer;

pub use envelope::Envelope;
pub use length_counter::LengthCounter;
pub use linear_counter::LinearCounter;
pub use sequencer::{FrameEvent, Sequencer};
pub use sweep::{Sweep, SweepUpdate};
pub use timer::Timer;
