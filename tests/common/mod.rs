// Common test utilities for integration tests
//
// Cartridge images are assembled in memory: an iNES header, PRG banks and
// optional CHR banks. `Program` emits the handful of 6502 sequences the
// tests need, so no ROM files are required.

#![allow(dead_code)]

use nes_core::cartridge::Cartridge;
use nes_core::emulator::Nes;
use nes_core::input::StandardController;
use std::fs;
use std::path::Path;

/// Program load address
pub const PROGRAM_START: u16 = 0x8000;

/// NMI handler address
pub const NMI_HANDLER: u16 = 0x9000;

/// Maximum number of frames to run a test ROM before timing out
pub const MAX_TEST_FRAMES: u32 = 1200;

/// Build an iNES image
///
/// `prg` must be a multiple of 16KB and `chr` a multiple of 8KB (empty for
/// CHR-RAM).
pub fn ines_image(mapper: u8, flags6: u8, prg: &[u8], chr: &[u8]) -> Vec<u8> {
    let mut image = vec![
        0x4E,
        0x45,
        0x53,
        0x1A,
        (prg.len() / 0x4000) as u8,
        (chr.len() / 0x2000) as u8,
        (mapper << 4) | (flags6 & 0x0F),
        mapper & 0xF0,
    ];
    image.resize(16, 0);
    image.extend_from_slice(prg);
    image.extend_from_slice(chr);
    image
}

/// 32KB PRG with `main` at $8000, `nmi` at $9000 and the vectors set
///
/// RESET and IRQ point at $8000.
pub fn program_prg(main: &[u8], nmi: &[u8]) -> Vec<u8> {
    let mut prg = vec![0xEA; 0x8000];
    prg[..main.len()].copy_from_slice(main);
    let nmi_offset = (NMI_HANDLER - PROGRAM_START) as usize;
    prg[nmi_offset..nmi_offset + nmi.len()].copy_from_slice(nmi);

    let vectors = [NMI_HANDLER, PROGRAM_START, PROGRAM_START];
    for (i, vector) in vectors.iter().enumerate() {
        let offset = 0x7FFA + i * 2;
        prg[offset..offset + 2].copy_from_slice(&vector.to_le_bytes());
    }
    prg
}

/// One PRG region of `banks` banks of `bank_size` bytes, each filled with its index
pub fn numbered_banks(banks: usize, bank_size: usize) -> Vec<u8> {
    (0..banks)
        .flat_map(|bank| std::iter::repeat(bank as u8).take(bank_size))
        .collect()
}

pub fn nes_from_image(image: &[u8]) -> Nes {
    let cartridge = Cartridge::from_bytes(image).expect("valid test image");
    Nes::new(cartridge, Box::new(StandardController::new())).expect("reset vector readable")
}

/// NROM console running `main`, with CHR-RAM and horizontal mirroring
pub fn nrom_nes(main: &[u8], nmi: &[u8]) -> Nes {
    nes_from_image(&ines_image(0, 0, &program_prg(main, nmi), &[]))
}

/// Minimal 6502 program builder
#[derive(Debug, Default, Clone)]
pub struct Program {
    bytes: Vec<u8>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    /// Address the next byte lands at, for code placed at `origin`
    pub fn here(&self, origin: u16) -> u16 {
        origin + self.bytes.len() as u16
    }

    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.bytes.extend_from_slice(bytes);
        self
    }

    /// LDA #value; STA addr
    pub fn store(self, addr: u16, value: u8) -> Self {
        let [lo, hi] = addr.to_le_bytes();
        self.raw(&[0xA9, value, 0x8D, lo, hi])
    }

    /// LDA addr
    pub fn load(self, addr: u16) -> Self {
        let [lo, hi] = addr.to_le_bytes();
        self.raw(&[0xAD, lo, hi])
    }

    /// Write `data` to PPU memory starting at `addr` through $2006/$2007
    pub fn ppu_write(self, addr: u16, data: &[u8]) -> Self {
        let mut program = self
            .load(0x2002)
            .store(0x2006, (addr >> 8) as u8)
            .store(0x2006, addr as u8);
        for &byte in data {
            program = program.store(0x2007, byte);
        }
        program
    }

    /// BIT $2002; BPL back
    pub fn wait_vblank(self) -> Self {
        self.raw(&[0x2C, 0x02, 0x20, 0x10, 0xFB])
    }

    /// JMP to itself, for code placed at `origin`
    pub fn spin(self, origin: u16) -> Self {
        let [lo, hi] = self.here(origin).to_le_bytes();
        self.raw(&[0x4C, lo, hi])
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Run frames until `done` holds or `max_frames` pass; returns frames run
pub fn run_until<F>(nes: &mut Nes, max_frames: u32, mut done: F) -> Option<u32>
where
    F: FnMut(&mut Nes) -> bool,
{
    for frame in 1..=max_frames {
        nes.advance_one_frame().expect("frame runs");
        if done(nes) {
            return Some(frame);
        }
    }
    None
}

/// Result of running a test ROM that reports through $6000
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestResult {
    /// Status byte 0
    Passed,
    /// Non-zero status byte
    Failed(u8),
    /// Still running after `MAX_TEST_FRAMES`
    Timeout,
}

/// Run a ROM that follows the $6000 status protocol
///
/// $6001-$6003 hold DE B0 61 once the ROM is reporting, $6000 is $80 while
/// running and the result code afterwards, and $6004 holds the message.
pub fn run_status_rom(path: &Path) -> Result<(TestResult, String), String> {
    let bytes =
        fs::read(path).map_err(|e| format!("Failed to load ROM from {}: {}", path.display(), e))?;
    let cartridge = Cartridge::from_bytes(&bytes).map_err(|e| e.to_string())?;
    let mut nes = Nes::new(cartridge, Box::new(StandardController::new()))
        .map_err(|e| e.to_string())?;

    let mut reset_pending = false;
    for _ in 0..MAX_TEST_FRAMES {
        nes.advance_one_frame().map_err(|e| e.to_string())?;

        let bus = nes.bus_mut();
        let signature = [bus.read(0x6001), bus.read(0x6002), bus.read(0x6003)];
        if signature != [Ok(0xDE), Ok(0xB0), Ok(0x61)] {
            continue;
        }

        match bus.read(0x6000).map_err(|e| e.to_string())? {
            0x80 => {}
            0x81 => reset_pending = true,
            status => {
                let message = read_string(&mut nes, 0x6004, 512);
                let result = if status == 0 {
                    TestResult::Passed
                } else {
                    TestResult::Failed(status)
                };
                return Ok((result, message));
            }
        }

        if reset_pending {
            nes.reset().map_err(|e| e.to_string())?;
            reset_pending = false;
        }
    }

    Ok((TestResult::Timeout, read_string(&mut nes, 0x6004, 512)))
}

/// Read a NUL-terminated printable string from CPU memory
pub fn read_string(nes: &mut Nes, addr: u16, max_len: usize) -> String {
    let bus = nes.bus_mut();
    let mut result = String::new();
    for offset in 0..max_len as u16 {
        let byte = bus.read(addr.wrapping_add(offset)).unwrap_or(0);
        if byte == 0 {
            break;
        }
        if (0x20..=0x7E).contains(&byte) || byte == b'\n' {
            result.push(byte as char);
        }
    }
    result
}
