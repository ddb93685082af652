// Mapper 7 (AxROM) - 32KB PRG banking and one-screen mirroring
//
// Memory Layout:
// - CPU $8000-$FFFF: 32KB switchable PRG-ROM bank
// - PPU $0000-$1FFF: 8KB CHR-RAM
//
// Register Interface:
// - $8000-$FFFF (write): Bank select and mirroring
//   Bits 0-2: Select 32KB PRG-ROM bank (mod bank count)
//   Bit 4: One-screen mirroring (0 = lower page, 1 = upper page)

use super::CartridgeMemory;
use crate::cartridge::Mirroring;

/// PRG-ROM bank size (32KB)
const PRG_BANK_SIZE: usize = 0x8000;

/// AxROM bank-select state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Axrom {
    bank_select: usize,
    upper_screen: bool,
}

impl Axrom {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bank_select(&self) -> usize {
        self.bank_select
    }

    pub fn select(&mut self, memory: &CartridgeMemory, value: u8) {
        self.bank_select = (value & 0x07) as usize % memory.prg_banks(PRG_BANK_SIZE);
        self.upper_screen = value & 0x10 != 0;
    }

    pub fn read_prg(&self, memory: &CartridgeMemory, addr: u16) -> u8 {
        memory.prg_at(self.bank_select * PRG_BANK_SIZE + addr as usize)
    }

    pub fn mirroring(&self) -> Mirroring {
        if self.upper_screen {
            Mirroring::SingleScreenUpper
        } else {
            Mirroring::SingleScreenLower
        }
    }
}
