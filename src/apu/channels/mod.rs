//! APU channel implementations

pub mod noise;
pub mod pulse;
pub mod triangle;

pub use noise::{NoiseChannel, NoiseMode};
pub use pulse::PulseChannel;
pub use triangle::TriangleChannel;
