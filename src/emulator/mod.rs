// Emulator module - Main emulator coordinator
//
// `Nes` owns the CPU and the CPU bus (which in turn owns the PPU, APU and
// controller) and advances them in lockstep: every CPU instruction of N
// cycles is followed by 3N PPU dots and N APU cycles. Frame pacing, audio
// playback and input polling belong to the host.

mod config;
mod screenshot;

pub use config::{AudioConfig, EmulatorConfig, LogConfig, ScreenshotConfig, CONFIG_FILE};
pub use screenshot::{save_screenshot, write_png, ScreenshotError};

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::apu::{Apu, AudioSink};
use crate::bus::CpuBus;
use crate::cartridge::Cartridge;
use crate::cpu::{Cpu, CpuError};
use crate::input::{BoundController, Button, ControllerPort, InputConfig, InputSource};
use crate::interrupts::Interrupts;
use crate::ppu::{FrameObj, Ppu, PpuBus};

/// Errors returned while running frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmulationError {
    /// The CPU hit a fatal error
    Cpu(CpuError),
    /// `Nes::stop` was called
    Stopped,
}

impl fmt::Display for EmulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmulationError::Cpu(err) => write!(f, "CPU error: {}", err),
            EmulationError::Stopped => write!(f, "emulation stopped"),
        }
    }
}

impl std::error::Error for EmulationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EmulationError::Cpu(err) => Some(err),
            EmulationError::Stopped => None,
        }
    }
}

impl From<CpuError> for EmulationError {
    fn from(err: CpuError) -> Self {
        EmulationError::Cpu(err)
    }
}

/// The whole console
pub struct Nes {
    cpu: Cpu,
    bus: CpuBus,
    stopped: bool,
    frame_count: u64,
}

impl Nes {
    /// Build a console around a cartridge and a controller, then reset it
    ///
    /// # Errors
    /// A CPU error if the reset vector cannot be read
    ///
    /// # Example
    ///
    /// ```no_run
    /// use nes_core::cartridge::Cartridge;
    /// use nes_core::emulator::Nes;
    /// use nes_core::input::StandardController;
    ///
    /// let cartridge = Cartridge::from_file("game.nes")?;
    /// let mut nes = Nes::new(cartridge, Box::new(StandardController::new()))?;
    /// let frame = nes.advance_one_frame()?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(
        cartridge: Cartridge,
        controller: Box<dyn ControllerPort>,
    ) -> Result<Self, EmulationError> {
        let interrupts = Rc::new(Interrupts::new());
        let mirroring = cartridge.header.mirroring;
        let mapper = Rc::new(RefCell::new(cartridge.into_mapper()));

        let ppu = Ppu::new(
            PpuBus::new(Rc::clone(&mapper), mirroring),
            Rc::clone(&interrupts),
        );
        let apu = Apu::new(Rc::clone(&interrupts));
        let bus = CpuBus::new(mapper, ppu, apu, controller, Rc::clone(&interrupts));

        let mut nes = Nes {
            cpu: Cpu::new(interrupts),
            bus,
            stopped: false,
            frame_count: 0,
        };
        nes.cpu.reset(&mut nes.bus)?;
        Ok(nes)
    }

    /// Build a console from configuration
    ///
    /// Uses a keyboard-bound controller and the configured master volume.
    /// Disabled audio is a master volume of zero.
    pub fn from_config(
        cartridge: Cartridge,
        config: &EmulatorConfig,
    ) -> Result<Self, EmulationError> {
        let controller = BoundController::new(InputSource::Keyboard, &config.input);
        let mut nes = Self::new(cartridge, Box::new(controller))?;
        let volume = if config.audio.enabled {
            config.audio.master_volume
        } else {
            0.0
        };
        nes.set_master_volume(volume);
        Ok(nes)
    }

    /// Run until the PPU completes a frame
    ///
    /// # Errors
    /// `EmulationError::Stopped` once `stop` has been called, or the CPU
    /// error that ended the frame
    pub fn advance_one_frame(&mut self) -> Result<FrameObj, EmulationError> {
        if self.stopped {
            return Err(EmulationError::Stopped);
        }

        loop {
            if let Some(frame) = self.step_instruction()? {
                self.frame_count += 1;
                return Ok(frame);
            }
        }
    }

    /// Execute one CPU instruction and clock the PPU and APU to match
    ///
    /// Returns the frame the PPU completed during the instruction, if any.
    /// Frames produced here are not counted by `frame_count`.
    pub fn step_instruction(&mut self) -> Result<Option<FrameObj>, EmulationError> {
        let cycles = self.cpu.step(&mut self.bus)?;

        let mut finished = None;
        for _ in 0..cycles as u32 * 3 {
            if let Some(frame) = self.bus.ppu_mut().step() {
                finished = Some(frame);
            }
        }
        let apu = self.bus.apu_mut();
        for _ in 0..cycles {
            apu.step();
        }
        Ok(finished)
    }

    /// Press the reset button
    ///
    /// The CPU reloads the reset vector and the APU is silenced. A stopped
    /// console stays stopped.
    pub fn reset(&mut self) -> Result<(), EmulationError> {
        self.bus.apu_mut().reset();
        self.cpu.reset(&mut self.bus)?;
        log::info!("Reset to PC={:04X}", self.cpu.pc);
        Ok(())
    }

    /// Ask the next `advance_one_frame` to return `Stopped`
    pub fn stop(&mut self) {
        self.stopped = true;
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Frames completed since power-on
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Replace the device on controller port 1
    pub fn swap_controller(&mut self, controller: Box<dyn ControllerPort>) {
        self.bus.swap_controller(controller);
    }

    pub fn controller_mut(&mut self) -> &mut dyn ControllerPort {
        self.bus.controller_mut()
    }

    /// Forward a host key event to the controller
    pub fn key_event(&mut self, key: &str, pressed: bool) -> Option<Button> {
        self.bus.controller_mut().key_event(key, pressed)
    }

    pub fn set_button(&mut self, button: Button, pressed: bool) {
        self.bus.controller_mut().set_button(button, pressed);
    }

    /// Rebuild the controller's key bindings after a settings change
    pub fn reload_bindings(&mut self, config: &InputConfig) {
        self.bus.controller_mut().reload_bindings(config);
    }

    pub fn set_master_volume(&mut self, volume: f32) {
        self.bus.apu_mut().set_master_volume(volume);
    }

    /// Route channel updates to `sink`
    pub fn set_audio_sink(&mut self, sink: Box<dyn AudioSink>) {
        self.bus.apu_mut().set_sink(sink);
    }

    /// nestest-format line for the next instruction
    pub fn trace(&self) -> String {
        self.cpu.trace(&self.bus)
    }

    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.cpu
    }

    pub fn bus(&self) -> &CpuBus {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut CpuBus {
        &mut self.bus
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::StandardController;

    /// NROM image: 32KB PRG with `program` at $8000, 8KB CHR-RAM
    fn nrom_image(program: &[u8]) -> Vec<u8> {
        let mut image = vec![0x4E, 0x45, 0x53, 0x1A, 2, 0, 0, 0];
        image.resize(16, 0);

        let mut prg = vec![0xEA; 0x8000];
        prg[..program.len()].copy_from_slice(program);
        // NMI, RESET and IRQ all point at $8000
        for offset in [0x7FFA, 0x7FFC, 0x7FFE] {
            prg[offset] = 0x00;
            prg[offset + 1] = 0x80;
        }
        image.extend_from_slice(&prg);
        image
    }

    fn nes_with(program: &[u8]) -> Nes {
        let cartridge = Cartridge::from_bytes(&nrom_image(program)).unwrap();
        Nes::new(cartridge, Box::new(StandardController::new())).unwrap()
    }

    /// JMP $8000
    const SPIN: [u8; 3] = [0x4C, 0x00, 0x80];

    #[test]
    fn test_power_on_reset() {
        let nes = nes_with(&SPIN);
        assert_eq!(nes.cpu().pc, 0x8000, "PC loaded from reset vector");
        assert_eq!(nes.cpu().sp, 0xFD);
        assert_eq!(nes.frame_count(), 0);
    }

    #[test]
    fn test_frame_takes_one_frame_of_cycles() {
        let mut nes = nes_with(&SPIN);
        nes.advance_one_frame().unwrap();
        let start = nes.cpu().cycles;
        let frame = nes.advance_one_frame().unwrap();
        let elapsed = nes.cpu().cycles - start;

        assert_eq!(frame.rows.len(), 240);
        assert_eq!(nes.frame_count(), 2);
        assert!(
            (29_770..=29_790).contains(&elapsed),
            "About 89342 / 3 CPU cycles per frame, got {}",
            elapsed
        );
    }

    #[test]
    fn test_stop_is_observed_next_frame() {
        let mut nes = nes_with(&SPIN);
        nes.advance_one_frame().unwrap();
        nes.stop();
        assert!(nes.is_stopped());
        assert_eq!(nes.advance_one_frame(), Err(EmulationError::Stopped));
        assert_eq!(nes.frame_count(), 1, "No frame after stop");
    }

    #[test]
    fn test_cpu_error_ends_frame() {
        // NOP, then an opcode with no table entry
        let mut nes = nes_with(&[0xEA, 0x93]);
        let err = nes.advance_one_frame().unwrap_err();
        assert_eq!(
            err,
            EmulationError::Cpu(CpuError::UnknownOpcode {
                opcode: 0x93,
                pc: 0x8001
            })
        );
    }

    #[test]
    fn test_reset_reloads_vector() {
        // LDA #$42; STA $00; JMP $8004
        let mut nes = nes_with(&[0xA9, 0x42, 0x85, 0x00, 0x4C, 0x04, 0x80]);
        nes.advance_one_frame().unwrap();
        assert_eq!(nes.bus_mut().read(0x0000), Ok(0x42));
        assert_ne!(nes.cpu().pc, 0x8000);

        nes.reset().unwrap();
        assert_eq!(nes.cpu().pc, 0x8000);
        assert_eq!(nes.cpu().a, 0);
        assert_eq!(nes.bus_mut().read(0x0000), Ok(0x42), "RAM survives reset");
    }

    #[test]
    fn test_key_events_reach_port() {
        let cartridge = Cartridge::from_bytes(&nrom_image(&SPIN)).unwrap();
        let mut nes = Nes::from_config(cartridge, &EmulatorConfig::default()).unwrap();

        assert_eq!(nes.key_event("KeyS", true), Some(Button::Start));
        let bus = nes.bus_mut();
        bus.write(0x4016, 1).unwrap();
        bus.write(0x4016, 0).unwrap();
        let bits: Vec<u8> = (0..8).map(|_| bus.read(0x4016).unwrap()).collect();
        assert_eq!(bits, vec![0, 0, 0, 1, 0, 0, 0, 0]);
    }

    #[test]
    fn test_reload_bindings_through_nes() {
        let cartridge = Cartridge::from_bytes(&nrom_image(&SPIN)).unwrap();
        let mut config = EmulatorConfig::default();
        let mut nes = Nes::from_config(cartridge, &config).unwrap();

        config.input.keyboard.button_a = "KeyK".to_string();
        nes.reload_bindings(&config.input);
        assert_eq!(nes.key_event("KeyX", true), None);
        assert_eq!(nes.key_event("KeyK", true), Some(Button::A));
    }

    #[test]
    fn test_swap_controller() {
        let mut nes = nes_with(&SPIN);
        assert_eq!(nes.key_event("KeyX", true), None, "Plain controller has no bindings");

        let config = InputConfig::new();
        nes.swap_controller(Box::new(BoundController::new(InputSource::Gamepad, &config)));
        assert_eq!(nes.key_event("South", true), Some(Button::B));
    }

    #[test]
    fn test_master_volume_from_config() {
        let mut config = EmulatorConfig::default();
        config.audio.master_volume = 0.75;
        let cartridge = Cartridge::from_bytes(&nrom_image(&SPIN)).unwrap();
        let nes = Nes::from_config(cartridge, &config).unwrap();
        assert_eq!(nes.bus().apu().master_volume(), 0.75);

        config.audio.enabled = false;
        let cartridge = Cartridge::from_bytes(&nrom_image(&SPIN)).unwrap();
        let mut nes = Nes::from_config(cartridge, &config).unwrap();
        assert_eq!(nes.bus().apu().master_volume(), 0.0, "Disabled audio is muted");

        nes.set_master_volume(3.0);
        assert_eq!(nes.bus().apu().master_volume(), 1.0, "Volume is clamped");
    }

    #[test]
    fn test_step_instruction_clocks_ppu() {
        let mut nes = nes_with(&SPIN);
        let dot = nes.bus().ppu().cycle();
        assert_eq!(nes.step_instruction(), Ok(None));
        assert_eq!(nes.bus().ppu().cycle(), dot + 9, "3 dots per CPU cycle");
    }

    #[test]
    fn test_trace_shows_next_instruction() {
        let nes = nes_with(&SPIN);
        assert!(nes.trace().starts_with("8000  4C 00 80  JMP $8000"));
    }
}
