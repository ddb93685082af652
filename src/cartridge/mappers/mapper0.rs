// Mapper 0 (NROM) - No bank switching
//
// Memory Layout:
// - CPU $8000-$BFFF: First 16KB of PRG-ROM
// - CPU $C000-$FFFF: Last 16KB of PRG-ROM (mirror of the first for NROM-128)
// - PPU $0000-$1FFF: 8KB CHR-ROM or CHR-RAM
//
// The PRG read path here is also the base behaviour for CNROM (fixed PRG) and
// for unknown mapper numbers running in degraded mode.

use log::{debug, warn};

use super::CartridgeMemory;

/// NROM board (no registers)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Nrom;

impl Nrom {
    pub fn read_prg(&self, memory: &CartridgeMemory, addr: u16) -> u8 {
        read_prg(memory, addr)
    }
}

/// Fixed PRG read: 16KB images appear twice, 32KB images once
#[inline]
pub(super) fn read_prg(memory: &CartridgeMemory, addr: u16) -> u8 {
    memory.prg_at(addr as usize)
}

/// Log an ignored PRG write: `warn!` the first time per board, `debug!` after
pub(super) fn ignore_prg_write(warned: &mut bool, board: &str, addr: u16, value: u8) {
    if *warned {
        debug!(
            "{}: ignoring PRG write 0x{:04X} <= 0x{:02X}",
            board, addr, value
        );
    } else {
        *warned = true;
        warn!(
            "{}: PRG-ROM is read-only, ignoring write 0x{:04X} <= 0x{:02X} (further writes logged at debug)",
            board, addr, value
        );
    }
}

#[cfg(test)]
mod tests {
    use super::super::{Board, Mapper};
    use super::*;

    fn nrom(prg_size: usize) -> Mapper {
        let prg: Vec<u8> = (0..prg_size).map(|i| (i >> 8) as u8 ^ i as u8).collect();
        Mapper::new(Board::Nrom(Nrom), prg, vec![0xBB; 0x2000], false)
    }

    #[test]
    fn test_16kb_prg_is_mirrored() {
        let mapper = nrom(0x4000);
        for addr in [0x0000u16, 0x0001, 0x1234, 0x3FFF] {
            assert_eq!(
                mapper.read_prg(addr),
                mapper.read_prg(addr + 0x4000),
                "0x{:04X} should mirror into the upper 16KB",
                addr
            );
        }
    }

    #[test]
    fn test_32kb_prg_is_linear() {
        let prg: Vec<u8> = (0..0x8000).map(|i| if i < 0x4000 { 0x11 } else { 0x22 }).collect();
        let mapper = Mapper::new(Board::Nrom(Nrom), prg, vec![0; 0x2000], false);
        assert_eq!(mapper.read_prg(0x0000), 0x11);
        assert_eq!(mapper.read_prg(0x4000), 0x22);
        assert_eq!(mapper.read_prg(0x7FFF), 0x22);
    }

    #[test]
    fn test_prg_write_is_ignored() {
        let mut mapper = nrom(0x4000);
        let before = mapper.read_prg(0x0000);
        mapper.write_prg(0x0000, 0xFF);
        assert_eq!(mapper.read_prg(0x0000), before);
    }

    #[test]
    fn test_chr_read() {
        let mapper = nrom(0x4000);
        assert_eq!(mapper.read_chr(0x0000), 0xBB);
        assert_eq!(mapper.read_chr(0x1FFF), 0xBB);
    }
}
