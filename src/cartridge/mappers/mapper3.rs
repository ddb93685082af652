// Mapper 3 (CNROM) - Fixed PRG-ROM, switchable 8KB CHR bank
//
// Memory Layout:
// - CPU $8000-$FFFF: 16KB or 32KB PRG-ROM (fixed, NROM layout)
// - PPU $0000-$1FFF: 8KB switchable CHR-ROM bank
//
// Bank Switching:
// - Any write to $8000-$FFFF selects the CHR bank (value mod CHR bank count)

use super::CartridgeMemory;

/// CHR bank size (8KB)
const CHR_BANK_SIZE: usize = 0x2000;

/// CNROM bank-select state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cnrom {
    bank_select: usize,
}

impl Cnrom {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bank_select(&self) -> usize {
        self.bank_select
    }

    pub fn select(&mut self, memory: &CartridgeMemory, value: u8) {
        self.bank_select = value as usize % memory.chr_banks(CHR_BANK_SIZE);
    }

    pub fn read_chr(&self, memory: &CartridgeMemory, addr: u16) -> u8 {
        memory.chr_at(self.bank_select * CHR_BANK_SIZE + addr as usize)
    }

    pub fn write_chr(&self, memory: &mut CartridgeMemory, addr: u16, value: u8) {
        memory.write_chr_at(self.bank_select * CHR_BANK_SIZE + addr as usize, value);
    }
}
