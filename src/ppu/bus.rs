// PPU memory bus
//
// # PPU Address Space (14-bit)
//
// ```text
// $0000-$1FFF: Pattern tables (cartridge CHR via mapper)
// $2000-$2FFF: Nametables (internal VRAM, mirrored per cartridge)
// $3000-$3EFF: Mirror of $2000-$2EFF
// $3F00-$3F1F: Palette RAM
// $3F20-$3FFF: Mirrors of palette RAM
// ```

use std::cell::RefCell;
use std::rc::Rc;

use super::constants::{
    FOUR_SCREEN_VRAM_SIZE, MASTER_PALETTE_SIZE, NAMETABLE_SIZE, PALETTE_SIZE, VRAM_SIZE,
};
use super::frame::FrameObj;
use crate::cartridge::{Mapper, Mirroring};
use crate::memory::Memory;

/// PPU-side bus: CHR through the shared mapper, VRAM and palette RAM owned here
pub struct PpuBus {
    mapper: Rc<RefCell<Mapper>>,
    /// Header mirroring; a mapper that drives mirroring overrides it
    mirroring: Mirroring,
    vram: Memory,
    palette: Memory,
}

impl PpuBus {
    pub fn new(mapper: Rc<RefCell<Mapper>>, mirroring: Mirroring) -> Self {
        let vram_size = match mirroring {
            Mirroring::FourScreen => FOUR_SCREEN_VRAM_SIZE,
            _ => VRAM_SIZE,
        };
        PpuBus {
            mapper,
            mirroring,
            vram: Memory::new(vram_size),
            palette: Memory::new(PALETTE_SIZE),
        }
    }

    /// Mirroring in effect right now
    pub fn mirroring(&self) -> Mirroring {
        self.mapper.borrow().mirroring().unwrap_or(self.mirroring)
    }

    /// Read from PPU memory
    pub fn read(&self, addr: u16) -> u8 {
        let addr = addr & 0x3FFF;
        match addr {
            0x0000..=0x1FFF => self.mapper.borrow().read_chr(addr),
            0x2000..=0x3EFF => self.vram.read(self.nametable_offset(addr)),
            _ => self.palette.read(palette_index(addr)),
        }
    }

    /// Write to PPU memory
    pub fn write(&mut self, addr: u16, data: u8) {
        let addr = addr & 0x3FFF;
        match addr {
            0x0000..=0x1FFF => self.mapper.borrow_mut().write_chr(addr, data),
            0x2000..=0x3EFF => {
                let offset = self.nametable_offset(addr);
                self.vram.write(offset, data);
            }
            _ => self.palette.write(palette_index(addr), data),
        }
    }

    /// Map a nametable address ($2000-$3EFF) to a VRAM offset
    ///
    /// # Mirroring
    ///
    /// - Horizontal: $2000=$2400, $2800=$2C00
    /// - Vertical: $2000=$2800, $2400=$2C00
    /// - Four-screen: all four tables distinct (4KB VRAM)
    /// - Single-screen: every table maps to the lower or upper 1KB page
    pub fn nametable_offset(&self, addr: u16) -> usize {
        let offset = (addr.wrapping_sub(0x2000) as usize) & 0x0FFF;
        match self.mirroring() {
            Mirroring::Horizontal => {
                if offset < 0x0800 {
                    offset % NAMETABLE_SIZE
                } else {
                    (NAMETABLE_SIZE + offset % NAMETABLE_SIZE) & 0x07FF
                }
            }
            Mirroring::Vertical => {
                if offset >= 0x0800 {
                    offset - 0x0800
                } else {
                    offset
                }
            }
            Mirroring::FourScreen => offset % self.vram.size(),
            Mirroring::SingleScreenLower => offset % NAMETABLE_SIZE,
            Mirroring::SingleScreenUpper => NAMETABLE_SIZE + offset % NAMETABLE_SIZE,
        }
    }

    /// Start a frame with the palettes as they are now
    pub fn new_frame(&self) -> FrameObj {
        let mut bg_palette = [0u8; 16];
        let mut sprite_palette = [0u8; 16];
        for i in 0..16u16 {
            bg_palette[i as usize] = self.read(0x3F00 + i) % MASTER_PALETTE_SIZE;
            sprite_palette[i as usize] = self.read(0x3F10 + i) % MASTER_PALETTE_SIZE;
        }
        FrameObj::new(bg_palette, sprite_palette)
    }
}

/// Palette RAM index for a $3F00-$3FFF address
///
/// $3F10, $3F14, $3F18 and $3F1C mirror $3F00, $3F04, $3F08 and $3F0C.
pub fn palette_index(addr: u16) -> usize {
    let index = (addr & 0x001F) as usize;
    if index >= 0x10 && index % 4 == 0 {
        index - 0x10
    } else {
        index
    }
}
