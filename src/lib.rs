// NES Emulator Library
// Core library: CPU, PPU, APU, buses, cartridge mappers and the frame driver

// Public modules
pub mod apu;
pub mod bus;
pub mod cartridge;
pub mod cpu;
pub mod display;
pub mod emulator;
pub mod input;
pub mod interrupts;
pub mod logger;
pub mod memory;
pub mod ppu;

// Re-export main types for convenience
pub use apu::{Apu, AudioSink, Channel, ChannelState, NullSink};
pub use bus::{BusError, CpuBus};
pub use cartridge::{Cartridge, INesHeader, LoadError, Mapper, Mirroring};
pub use cpu::{Cpu, CpuError};
pub use emulator::{EmulationError, EmulatorConfig, Nes};
pub use input::{Button, ControllerPort, InputConfig, StandardController};
pub use interrupts::Interrupts;
pub use logger::{LogLevel, Logger};
pub use memory::Memory;
pub use ppu::{FrameObj, Ppu};
