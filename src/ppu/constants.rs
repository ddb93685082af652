// PPU constants

/// PPU register address mask for mirroring
///
/// PPU registers are 8 bytes ($2000-$2007) but mirrored throughout $2000-$3FFF.
pub(super) const PPU_REGISTER_MASK: u16 = 0x0007;

/// Size of one nametable in bytes (1KB)
pub(super) const NAMETABLE_SIZE: usize = 0x0400;

/// Internal nametable VRAM (two nametables)
pub(super) const VRAM_SIZE: usize = 0x0800;

/// Nametable VRAM with a four-screen cartridge
pub(super) const FOUR_SCREEN_VRAM_SIZE: usize = 0x1000;

/// Size of palette RAM in bytes
pub(super) const PALETTE_SIZE: usize = 32;

/// Number of colors in the NES master palette
pub(super) const MASTER_PALETTE_SIZE: u8 = 64;

/// Sprite attribute memory
pub(super) const OAM_SIZE: usize = 256;

/// Screen width in pixels
pub const SCREEN_WIDTH: usize = 256;

/// Screen height in pixels
pub const SCREEN_HEIGHT: usize = 240;

/// Sprites the PPU can draw on one scanline
pub(super) const MAX_SPRITES_PER_LINE: usize = 8;

/// OAM Y bytes at or past this value never appear on screen
pub(super) const SPRITE_Y_HIDDEN: u8 = 0xEF;

// ========================================
// PPUCTRL / PPUMASK / PPUSTATUS bits
// ========================================

pub(super) const CTRL_VRAM_INCREMENT: u8 = 0x04;
pub(super) const CTRL_SPRITE_TABLE: u8 = 0x08;
pub(super) const CTRL_BACKGROUND_TABLE: u8 = 0x10;
pub(super) const CTRL_SPRITE_SIZE: u8 = 0x20;
pub(super) const CTRL_NMI_ENABLE: u8 = 0x80;

pub(super) const MASK_BACKGROUND_LEFT: u8 = 0x02;
pub(super) const MASK_SPRITES_LEFT: u8 = 0x04;
pub(super) const MASK_BACKGROUND: u8 = 0x08;
pub(super) const MASK_SPRITES: u8 = 0x10;

pub(super) const STATUS_SPRITE_OVERFLOW: u8 = 0x20;
pub(super) const STATUS_SPRITE_ZERO_HIT: u8 = 0x40;
pub(super) const STATUS_VBLANK: u8 = 0x80;

// ========================================
// PPU Timing Constants (NTSC)
// ========================================

/// Number of PPU cycles per scanline
pub(super) const CYCLES_PER_SCANLINE: u16 = 341;

/// Number of scanlines per frame (NTSC)
pub(super) const SCANLINES_PER_FRAME: u16 = 262;

/// Total PPU cycles per frame (NTSC)
/// 341 cycles/scanline × 262 scanlines = 89,342 cycles
pub const CYCLES_PER_FRAME: u32 = (CYCLES_PER_SCANLINE as u32) * (SCANLINES_PER_FRAME as u32);

/// Last visible scanline
pub(super) const LAST_VISIBLE_SCANLINE: u16 = 239;

/// First VBlank scanline
pub(super) const FIRST_VBLANK_SCANLINE: u16 = 241;

/// Pre-render scanline number
/// This is scanline 261 (or -1 in some documentation)
pub(super) const PRERENDER_SCANLINE: u16 = 261;

/// Last dot of the visible background fetches
pub(super) const LAST_BACKGROUND_CYCLE: u16 = 256;

/// Dot where the line ends: extra fine-X tile, scroll reload, sprite evaluation
pub(super) const END_OF_LINE_CYCLE: u16 = 257;

/// First and last sprite pattern fetch dots (one every 8 dots)
pub(super) const FIRST_SPRITE_FETCH_CYCLE: u16 = 264;
pub(super) const LAST_SPRITE_FETCH_CYCLE: u16 = 320;
