// PPU module - Picture Processing Unit (2C02) implementation
//
// The PPU is a (scanline, cycle) state machine stepped once per dot:
//
// ```text
// Scanline 0-239:   visible (background + sprite rendering)
// Scanline 240:     post-render (idle)
// Scanline 241-260: VBlank (NMI at 241, dot 1)
// Scanline 261:     pre-render (flags cleared at dot 1)
// ```
//
// A finished `FrameObj` is handed back on the wrap from 261/340 to 0/0.

mod bus;
mod constants;
mod frame;
mod registers;
mod rendering;

#[cfg(test)]
mod tests;

use std::rc::Rc;

pub use bus::{palette_index, PpuBus};
pub use constants::{CYCLES_PER_FRAME, SCREEN_HEIGHT, SCREEN_WIDTH};
pub use frame::FrameObj;
pub use rendering::SpriteLine;

use constants::{
    CTRL_NMI_ENABLE, CYCLES_PER_SCANLINE, END_OF_LINE_CYCLE, FIRST_SPRITE_FETCH_CYCLE,
    FIRST_VBLANK_SCANLINE, LAST_BACKGROUND_CYCLE, LAST_SPRITE_FETCH_CYCLE, LAST_VISIBLE_SCANLINE,
    MAX_SPRITES_PER_LINE, OAM_SIZE, PRERENDER_SCANLINE, SCANLINES_PER_FRAME,
    STATUS_SPRITE_OVERFLOW, STATUS_SPRITE_ZERO_HIT, STATUS_VBLANK,
};
use crate::interrupts::Interrupts;

/// PPU structure representing the Picture Processing Unit state
pub struct Ppu {
    bus: PpuBus,
    interrupts: Rc<Interrupts>,

    // ========================================
    // CPU-visible registers
    // ========================================
    /// $2000 PPUCTRL
    ppuctrl: u8,
    /// $2001 PPUMASK
    ppumask: u8,
    /// $2002 PPUSTATUS (V, S and O in bits 7-5)
    ppustatus: u8,
    /// $2003 OAMADDR
    oam_addr: u8,
    /// PPUDATA read buffer
    read_buffer: u8,

    // ========================================
    // Internal scroll registers (15-bit v/t, 3-bit x, w latch)
    // ========================================
    v: u16,
    t: u16,
    fine_x: u8,
    write_latch: bool,

    /// Object attribute memory: 64 sprites × 4 bytes
    oam: [u8; OAM_SIZE],

    // ========================================
    // Timing
    // ========================================
    scanline: u16,
    cycle: u16,

    // ========================================
    // Rendering state
    // ========================================
    frame: FrameObj,
    /// Sprites drawn on the current scanline
    sprite_lines: Vec<SpriteLine>,
    /// Sprites being fetched for the next scanline
    next_sprite_lines: Vec<SpriteLine>,
    /// OAM indices chosen by sprite evaluation
    selected_sprites: Vec<u8>,
}

impl Ppu {
    /// Create a new PPU over its memory bus
    pub fn new(bus: PpuBus, interrupts: Rc<Interrupts>) -> Self {
        let frame = bus.new_frame();
        Ppu {
            bus,
            interrupts,
            ppuctrl: 0,
            ppumask: 0,
            ppustatus: 0,
            oam_addr: 0,
            read_buffer: 0,
            v: 0,
            t: 0,
            fine_x: 0,
            write_latch: false,
            oam: [0; OAM_SIZE],
            scanline: 0,
            cycle: 0,
            frame,
            sprite_lines: Vec::with_capacity(MAX_SPRITES_PER_LINE),
            next_sprite_lines: Vec::with_capacity(MAX_SPRITES_PER_LINE),
            selected_sprites: Vec::with_capacity(MAX_SPRITES_PER_LINE),
        }
    }

    /// Advance one dot
    ///
    /// # Returns
    ///
    /// The finished frame on the wrap from scanline 261 to scanline 0
    pub fn step(&mut self) -> Option<FrameObj> {
        match self.scanline {
            0..=LAST_VISIBLE_SCANLINE => self.visible_dot(),
            FIRST_VBLANK_SCANLINE if self.cycle == 1 => self.start_vblank(),
            PRERENDER_SCANLINE if self.cycle == 1 => self.end_vblank(),
            _ => {}
        }
        self.advance()
    }

    /// Work done on one dot of a visible scanline
    fn visible_dot(&mut self) {
        if !self.rendering_enabled() {
            return;
        }
        match self.cycle {
            c @ 8..=LAST_BACKGROUND_CYCLE if c % 8 == 0 => {
                self.render_background_tile((c / 8 - 1) as usize);
            }
            END_OF_LINE_CYCLE => {
                if self.fine_x > 0 {
                    self.render_background_tile(32);
                }
                self.end_of_line_scroll();
                self.evaluate_sprites();
            }
            c @ FIRST_SPRITE_FETCH_CYCLE..=LAST_SPRITE_FETCH_CYCLE if c % 8 == 0 => {
                self.fetch_sprite_line(((c - FIRST_SPRITE_FETCH_CYCLE) / 8) as usize);
            }
            _ => {}
        }
    }

    fn start_vblank(&mut self) {
        self.ppustatus |= STATUS_VBLANK;
        if self.ppuctrl & CTRL_NMI_ENABLE != 0 {
            self.interrupts.set_nmi(true);
        }
    }

    fn end_vblank(&mut self) {
        self.ppustatus &= !(STATUS_VBLANK | STATUS_SPRITE_ZERO_HIT | STATUS_SPRITE_OVERFLOW);
        self.interrupts.set_nmi(false);
        self.write_latch = false;
    }

    /// Move to the next dot, handing back the frame on the 261 -> 0 wrap
    fn advance(&mut self) -> Option<FrameObj> {
        self.cycle += 1;
        if self.cycle < CYCLES_PER_SCANLINE {
            return None;
        }

        self.cycle = 0;
        std::mem::swap(&mut self.sprite_lines, &mut self.next_sprite_lines);
        self.next_sprite_lines.clear();
        self.selected_sprites.clear();
        self.scanline += 1;
        if self.scanline < SCANLINES_PER_FRAME {
            return None;
        }

        self.scanline = 0;
        if self.rendering_enabled() {
            self.v = self.t;
        }
        let next = self.bus.new_frame();
        Some(std::mem::replace(&mut self.frame, next))
    }

    pub fn scanline(&self) -> u16 {
        self.scanline
    }

    pub fn cycle(&self) -> u16 {
        self.cycle
    }

    pub fn in_vblank(&self) -> bool {
        self.ppustatus & STATUS_VBLANK != 0
    }

    pub fn oam(&self) -> &[u8; OAM_SIZE] {
        &self.oam
    }

    pub fn bus(&self) -> &PpuBus {
        &self.bus
    }

    /// Frame being drawn (not yet complete)
    pub fn current_frame(&self) -> &FrameObj {
        &self.frame
    }
}
