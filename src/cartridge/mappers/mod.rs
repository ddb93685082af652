// Mappers module - Cartridge bank switching
//
// The mapper owns the cartridge's PRG-ROM and CHR-ROM/RAM. The board variant
// (`Board`) holds only its own bank-select registers; every access goes
// through one `match` on the variant.
//
// Offsets seen by the mapper:
// - PRG: CPU $8000-$FFFF minus $8000 (0x0000-0x7FFF)
// - CHR: PPU $0000-$1FFF (0x0000-0x1FFF)
//
// Supported boards:
// - 0           NROM    (no switching)
// - 2, 94, 180  UxROM   (16KB PRG switch, upper half fixed to last bank)
// - 3, 185      CNROM   (8KB CHR switch)
// - 7           AxROM   (32KB PRG switch, single-screen mirroring)
// - MMC1/MMC3/MMC5 numbers are refused at load time
// - anything else runs as NROM ("ROM-only" degraded mode)

mod mapper0;
mod mapper2;
mod mapper3;
mod mapper7;

pub use mapper0::Nrom;
pub use mapper2::Uxrom;
pub use mapper3::Cnrom;
pub use mapper7::Axrom;

use log::warn;

use super::{LoadError, Mirroring};
use crate::memory::Memory;

/// ROM/RAM buffers owned by a mapper
#[derive(Debug, Clone)]
pub struct CartridgeMemory {
    pub prg: Memory,
    pub chr: Memory,
    pub chr_is_ram: bool,
}

impl CartridgeMemory {
    /// Number of `bank_size` banks in PRG-ROM (at least one)
    pub fn prg_banks(&self, bank_size: usize) -> usize {
        (self.prg.size() / bank_size).max(1)
    }

    /// Number of `bank_size` banks in CHR (at least one)
    pub fn chr_banks(&self, bank_size: usize) -> usize {
        (self.chr.size() / bank_size).max(1)
    }

    /// Read PRG at an absolute ROM offset, wrapping short images
    #[inline]
    pub fn prg_at(&self, offset: usize) -> u8 {
        self.prg.read(offset % self.prg.size())
    }

    /// Read CHR at an absolute offset, wrapping short images
    #[inline]
    pub fn chr_at(&self, offset: usize) -> u8 {
        self.chr.read(offset % self.chr.size())
    }

    /// Write CHR at an absolute offset; ignored for CHR-ROM
    pub fn write_chr_at(&mut self, offset: usize, value: u8) {
        if self.chr_is_ram {
            let size = self.chr.size();
            self.chr.write(offset % size, value);
        } else {
            log::debug!(
                "Ignoring CHR-ROM write at 0x{:04X} (value 0x{:02X})",
                offset,
                value
            );
        }
    }
}

/// Board variant with its bank-select state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Board {
    Nrom(Nrom),
    Uxrom(Uxrom),
    Cnrom(Cnrom),
    Axrom(Axrom),
    /// Unknown mapper number running with NROM behaviour
    Unsupported(u8),
}

impl Board {
    /// Human-readable board name
    pub fn name(&self) -> &'static str {
        match self {
            Board::Nrom(_) => "NROM",
            Board::Uxrom(_) => "UxROM",
            Board::Cnrom(_) => "CNROM",
            Board::Axrom(_) => "AxROM",
            Board::Unsupported(_) => "ROM-only",
        }
    }
}

/// Resolve a header mapper number into a board
///
/// # Errors
/// Returns `LoadError::UnsupportedMapper` for MMC1 (1, 105, 155),
/// MMC3 (4, 118, 119) and MMC5 (5).
pub fn resolve(number: u8) -> Result<Board, LoadError> {
    match number {
        0 => Ok(Board::Nrom(Nrom)),
        2 | 94 | 180 => Ok(Board::Uxrom(Uxrom::new())),
        3 | 185 => Ok(Board::Cnrom(Cnrom::new())),
        7 => Ok(Board::Axrom(Axrom::new())),
        1 | 105 | 155 => Err(LoadError::UnsupportedMapper {
            number,
            family: "MMC1",
        }),
        4 | 118 | 119 => Err(LoadError::UnsupportedMapper {
            number,
            family: "MMC3",
        }),
        5 => Err(LoadError::UnsupportedMapper {
            number,
            family: "MMC5",
        }),
        other => {
            warn!(
                "Unsupported mapper {}: falling back to NROM behaviour",
                other
            );
            Ok(Board::Unsupported(other))
        }
    }
}

/// A cartridge mapper: board state plus the ROM buffers it switches over
#[derive(Debug, Clone)]
pub struct Mapper {
    board: Board,
    memory: CartridgeMemory,
    /// Set once an ignored PRG write has been reported at warn level
    prg_write_warned: bool,
}

impl Mapper {
    /// Build a mapper over the given PRG/CHR buffers
    ///
    /// # Arguments
    /// * `board` - Resolved board variant
    /// * `prg_rom` - PRG-ROM contents
    /// * `chr` - CHR-ROM contents or zeroed CHR-RAM
    /// * `chr_is_ram` - Whether CHR writes should land
    pub fn new(board: Board, prg_rom: Vec<u8>, chr: Vec<u8>, chr_is_ram: bool) -> Self {
        Mapper {
            board,
            memory: CartridgeMemory {
                prg: Memory::from_vec(prg_rom),
                chr: Memory::from_vec(chr),
                chr_is_ram,
            },
            prg_write_warned: false,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Read PRG space (offset 0x0000-0x7FFF)
    pub fn read_prg(&self, addr: u16) -> u8 {
        match &self.board {
            Board::Nrom(nrom) => nrom.read_prg(&self.memory, addr),
            Board::Uxrom(uxrom) => uxrom.read_prg(&self.memory, addr),
            Board::Cnrom(_) | Board::Unsupported(_) => mapper0::read_prg(&self.memory, addr),
            Board::Axrom(axrom) => axrom.read_prg(&self.memory, addr),
        }
    }

    /// Write PRG space: bank-select registers, or a logged no-op
    pub fn write_prg(&mut self, addr: u16, value: u8) {
        match &mut self.board {
            Board::Nrom(_) => {
                mapper0::ignore_prg_write(&mut self.prg_write_warned, "NROM", addr, value)
            }
            Board::Unsupported(number) => {
                let name = format!("Mapper {}", number);
                mapper0::ignore_prg_write(&mut self.prg_write_warned, &name, addr, value);
            }
            Board::Uxrom(uxrom) => uxrom.select(&self.memory, value),
            Board::Cnrom(cnrom) => cnrom.select(&self.memory, value),
            Board::Axrom(axrom) => axrom.select(&self.memory, value),
        }
    }

    /// Read CHR space (offset 0x0000-0x1FFF)
    pub fn read_chr(&self, addr: u16) -> u8 {
        match &self.board {
            Board::Cnrom(cnrom) => cnrom.read_chr(&self.memory, addr),
            _ => self.memory.chr_at(addr as usize),
        }
    }

    /// Write CHR space; only CHR-RAM accepts the byte
    pub fn write_chr(&mut self, addr: u16, value: u8) {
        match &self.board {
            Board::Cnrom(cnrom) => cnrom.write_chr(&mut self.memory, addr, value),
            _ => self.memory.write_chr_at(addr as usize, value),
        }
    }

    /// Mirroring driven by the mapper, if it overrides the header
    pub fn mirroring(&self) -> Option<Mirroring> {
        match &self.board {
            Board::Axrom(axrom) => Some(axrom.mirroring()),
            _ => None,
        }
    }
}
