// PPU register handling

use super::constants::{
    CTRL_NMI_ENABLE, CTRL_VRAM_INCREMENT, OAM_SIZE, PPU_REGISTER_MASK, STATUS_VBLANK,
};
use super::Ppu;

impl Ppu {
    /// Read from a PPU register
    ///
    /// # Arguments
    ///
    /// * `addr` - CPU address in $2000-$3FFF (mirrored every 8 bytes)
    ///
    /// # Register Behaviors
    ///
    /// - PPUSTATUS ($2002): Returns status, clears VBlank flag and address latch
    /// - OAMDATA ($2004): Returns OAM data at current OAM address
    /// - PPUDATA ($2007): Returns buffered PPU data (palette reads are immediate)
    /// - Write-only registers: Return 0
    pub fn read_register(&mut self, addr: u16) -> u8 {
        match addr.wrapping_sub(0x2000) & PPU_REGISTER_MASK {
            2 => {
                // $2002: PPUSTATUS
                let status = self.ppustatus & 0xE0;
                self.ppustatus &= !STATUS_VBLANK;
                self.write_latch = false;
                status
            }
            4 => self.oam[self.oam_addr as usize],
            7 => {
                // $2007: PPUDATA
                let addr = self.v & 0x3FFF;
                let value = if addr >= 0x3F00 {
                    // Palette reads are immediate; the buffer gets the
                    // nametable byte "underneath"
                    self.read_buffer = self.bus.read(addr & 0x2FFF);
                    self.bus.read(addr)
                } else {
                    let buffered = self.read_buffer;
                    self.read_buffer = self.bus.read(addr);
                    buffered
                };
                self.increment_vram_addr();
                value
            }
            _ => 0,
        }
    }

    /// Register value without read side effects (for tracing)
    pub fn peek_register(&self, addr: u16) -> u8 {
        match addr.wrapping_sub(0x2000) & PPU_REGISTER_MASK {
            2 => self.ppustatus & 0xE0,
            4 => self.oam[self.oam_addr as usize],
            7 => self.read_buffer,
            _ => 0,
        }
    }

    /// Write to a PPU register
    ///
    /// # Arguments
    ///
    /// * `addr` - CPU address in $2000-$3FFF (mirrored every 8 bytes)
    /// * `data` - The value to write
    ///
    /// # Register Behaviors
    ///
    /// - PPUCTRL ($2000): Stores control flags and updates nametable select in t
    /// - PPUMASK ($2001): Stores mask flags
    /// - OAMADDR ($2003): Sets OAM address
    /// - OAMDATA ($2004): Writes to OAM and increments address
    /// - PPUSCROLL ($2005): Sets scroll position (requires 2 writes, updates t and x)
    /// - PPUADDR ($2006): Sets PPU address (requires 2 writes, updates t then v)
    /// - PPUDATA ($2007): Writes to PPU memory and increments v
    /// - PPUSTATUS ($2002): Writes are ignored
    pub fn write_register(&mut self, addr: u16, data: u8) {
        match addr.wrapping_sub(0x2000) & PPU_REGISTER_MASK {
            0 => {
                let was_enabled = self.ppuctrl & CTRL_NMI_ENABLE != 0;
                self.ppuctrl = data;

                // t: ...GH.. ........ <- d: ......GH
                self.t = (self.t & 0xF3FF) | (((data as u16) & 0x03) << 10);

                // Enabling NMI in the middle of VBlank fires it immediately
                if !was_enabled && data & CTRL_NMI_ENABLE != 0 && self.in_vblank() {
                    self.interrupts.set_nmi(true);
                }
            }
            1 => self.ppumask = data,
            2 => {}
            3 => self.oam_addr = data,
            4 => {
                self.oam[self.oam_addr as usize] = data;
                self.oam_addr = self.oam_addr.wrapping_add(1);
            }
            5 => {
                if !self.write_latch {
                    // First write: X scroll
                    // t: ....... ...ABCDE <- d: ABCDEFGH
                    // x:              FGH <- d: ABCDEFGH
                    self.t = (self.t & 0xFFE0) | ((data as u16) >> 3);
                    self.fine_x = data & 0x07;
                } else {
                    // Second write: Y scroll
                    // t: FGH..AB CDE..... <- d: ABCDEFGH
                    self.t = (self.t & 0x8FFF) | (((data as u16) & 0x07) << 12);
                    self.t = (self.t & 0xFC1F) | (((data as u16) & 0xF8) << 2);
                }
                self.write_latch = !self.write_latch;
            }
            6 => {
                if !self.write_latch {
                    // First write: high byte
                    // t: .CDEFGH ........ <- d: ..CDEFGH
                    // t: X...... ........ <- 0
                    self.t = (self.t & 0x00FF) | (((data as u16) & 0x3F) << 8);
                } else {
                    // Second write: low byte
                    // t: ....... ABCDEFGH <- d: ABCDEFGH
                    // v: <...all bits...> <- t: <...all bits...>
                    self.t = (self.t & 0xFF00) | (data as u16);
                    self.v = self.t;
                }
                self.write_latch = !self.write_latch;
            }
            _ => {
                self.bus.write(self.v & 0x3FFF, data);
                self.increment_vram_addr();
            }
        }
    }

    /// OAM DMA: copy a CPU page into OAM starting at OAMADDR
    pub fn dma(&mut self, page: &[u8; OAM_SIZE]) {
        for (i, &byte) in page.iter().enumerate() {
            let index = (self.oam_addr as usize + i) % OAM_SIZE;
            self.oam[index] = byte;
        }
        self.interrupts.set_dma_processed(true);
    }

    /// Advance v after a PPUDATA access (by 1 or 32, PPUCTRL bit 2)
    fn increment_vram_addr(&mut self) {
        let increment = if self.ppuctrl & CTRL_VRAM_INCREMENT != 0 {
            32
        } else {
            1
        };
        self.v = self.v.wrapping_add(increment) & 0x7FFF;
    }
}
