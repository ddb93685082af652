//! PPU unit tests
//!
//! Organized by functionality: registers, memory, timing and rendering.

use super::*;
use crate::cartridge::{Board, Mapper, Mirroring, Nrom};
use std::cell::RefCell;

// ========================================
// Test Constants (PPU Register Addresses)
// ========================================

/// PPU Control Register ($2000) - Write only
pub(crate) const PPUCTRL: u16 = 0x2000;
/// PPU Mask Register ($2001) - Write only
pub(crate) const PPUMASK: u16 = 0x2001;
/// PPU Status Register ($2002) - Read only
pub(crate) const PPUSTATUS: u16 = 0x2002;
/// OAM Address Port ($2003) - Write only
pub(crate) const OAMADDR: u16 = 0x2003;
/// OAM Data Port ($2004) - Read/Write
pub(crate) const OAMDATA: u16 = 0x2004;
/// Scroll Position Register ($2005) - Write×2
pub(crate) const PPUSCROLL: u16 = 0x2005;
/// PPU Address Register ($2006) - Write×2
pub(crate) const PPUADDR: u16 = 0x2006;
/// PPU Data Port ($2007) - Read/Write
pub(crate) const PPUDATA: u16 = 0x2007;

// ========================================
// Test Helper Functions
// ========================================

/// PPU over an NROM board with the given CHR contents
pub(crate) fn create_ppu(
    mirroring: Mirroring,
    chr: Vec<u8>,
    chr_is_ram: bool,
) -> (Ppu, Rc<Interrupts>) {
    let interrupts = Rc::new(Interrupts::new());
    let mapper = Rc::new(RefCell::new(Mapper::new(
        Board::Nrom(Nrom),
        vec![0xAA; 0x4000],
        chr,
        chr_is_ram,
    )));
    let ppu = Ppu::new(PpuBus::new(mapper, mirroring), Rc::clone(&interrupts));
    (ppu, interrupts)
}

/// PPU with 8KB CHR-RAM and horizontal mirroring
pub(crate) fn create_test_ppu() -> (Ppu, Rc<Interrupts>) {
    create_ppu(Mirroring::Horizontal, vec![0; 0x2000], true)
}

/// Write a byte to PPU memory through PPUADDR/PPUDATA
pub(crate) fn write_vram(ppu: &mut Ppu, addr: u16, data: u8) {
    ppu.write_register(PPUADDR, (addr >> 8) as u8);
    ppu.write_register(PPUADDR, addr as u8);
    ppu.write_register(PPUDATA, data);
}

/// Step until the PPU sits at (scanline, cycle)
pub(crate) fn run_until(ppu: &mut Ppu, scanline: u16, cycle: u16) {
    while ppu.scanline() != scanline || ppu.cycle() != cycle {
        ppu.step();
    }
}

/// Step until a frame comes out
pub(crate) fn run_frame(ppu: &mut Ppu) -> FrameObj {
    loop {
        if let Some(frame) = ppu.step() {
            return frame;
        }
    }
}

// ========================================
// Test Modules
// ========================================

mod registers;
