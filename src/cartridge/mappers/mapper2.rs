// Mapper 2 (UxROM) - Switchable PRG-ROM, fixed last bank
//
// Memory Layout:
// - CPU $8000-$BFFF: 16KB switchable PRG-ROM bank
// - CPU $C000-$FFFF: 16KB fixed PRG-ROM bank (last bank)
// - PPU $0000-$1FFF: 8KB CHR (usually RAM)
//
// Bank Switching:
// - Any write to $8000-$FFFF selects the bank for $8000-$BFFF
// - The value is reduced modulo the number of 16KB banks
//
// Also answers to mapper numbers 94 and 180 (same PRG behaviour).

use super::CartridgeMemory;

/// PRG-ROM bank size (16KB)
const PRG_BANK_SIZE: usize = 0x4000;

/// UxROM bank-select state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Uxrom {
    /// Bank mapped at $8000-$BFFF, always < bank count
    bank_select: usize,
}

impl Uxrom {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently selected lower bank
    pub fn bank_select(&self) -> usize {
        self.bank_select
    }

    pub fn select(&mut self, memory: &CartridgeMemory, value: u8) {
        self.bank_select = value as usize % memory.prg_banks(PRG_BANK_SIZE);
    }

    pub fn read_prg(&self, memory: &CartridgeMemory, addr: u16) -> u8 {
        let addr = addr as usize;
        if addr < PRG_BANK_SIZE {
            memory.prg_at(self.bank_select * PRG_BANK_SIZE + addr)
        } else {
            let last_bank = memory.prg_banks(PRG_BANK_SIZE) - 1;
            memory.prg_at(last_bank * PRG_BANK_SIZE + addr - PRG_BANK_SIZE)
        }
    }
}
