// PPU rendering logic
//
// Background: one tile line is fetched every 8 dots (cycles 8, 16, ..., 256)
// from the address in v, then composited against the sprites cached for the
// current scanline. With fine X scroll the first tile is partially off-screen
// and one extra tile is fetched at dot 257 to complete the row.
//
// Sprites: at dot 257 OAM is scanned for sprites on the next scanline. Their
// pattern lines are fetched at dots 264, 272, ..., 320 and become the cache
// for the next line.

use super::constants::{
    CTRL_BACKGROUND_TABLE, CTRL_SPRITE_SIZE, CTRL_SPRITE_TABLE, MASK_BACKGROUND,
    MASK_BACKGROUND_LEFT, MASK_SPRITES, MASK_SPRITES_LEFT, MAX_SPRITES_PER_LINE, SCREEN_WIDTH,
    SPRITE_Y_HIDDEN, STATUS_SPRITE_OVERFLOW, STATUS_SPRITE_ZERO_HIT,
};
use super::Ppu;

/// One sprite's pixels for the scanline being drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteLine {
    /// OAM slot (0-63); slot 0 drives sprite-zero hit
    pub oam_index: u8,
    /// Left edge on screen
    pub x: u8,
    pub behind_background: bool,
    /// Sprite palette id (0-3)
    pub palette: u8,
    /// 2-bit colors in screen order (horizontal flip already applied)
    pub pixels: [u8; 8],
}

impl SpriteLine {
    /// Color at screen column `x`, if this sprite covers it
    fn color_at(&self, x: usize) -> Option<u8> {
        let offset = x.checked_sub(self.x as usize)?;
        self.pixels.get(offset).copied()
    }
}

/// Combine two bitplane bytes into eight 2-bit colors (MSB is leftmost)
fn decode_tile_line(low: u8, high: u8) -> [u8; 8] {
    let mut pixels = [0u8; 8];
    for (j, pixel) in pixels.iter_mut().enumerate() {
        let bit = 7 - j;
        *pixel = (((high >> bit) & 0x01) << 1) | ((low >> bit) & 0x01);
    }
    pixels
}

impl Ppu {
    /// Background or sprite rendering turned on in PPUMASK
    pub fn rendering_enabled(&self) -> bool {
        self.ppumask & (MASK_BACKGROUND | MASK_SPRITES) != 0
    }

    /// Sprite height in pixels (8 for 8x8 mode, 16 for 8x16 mode)
    fn sprite_height(&self) -> u16 {
        if self.ppuctrl & CTRL_SPRITE_SIZE != 0 {
            16
        } else {
            8
        }
    }

    /// Read the two bitplanes of one tile row
    fn fetch_pattern_line(&self, table: u16, tile: u8, row: u16) -> (u8, u8) {
        let addr = table + (tile as u16) * 16 + row;
        (self.bus.read(addr), self.bus.read(addr + 8))
    }

    /// Fetch the tile at v and draw it as the `k`-th tile of this scanline
    ///
    /// Pixel `j` lands at screen x = 8k + j - fine_x; pixels outside the
    /// screen are dropped.
    pub(super) fn render_background_tile(&mut self, k: usize) {
        let v = self.v;

        let tile = self.bus.read(0x2000 | (v & 0x0FFF));

        // Attribute byte covers a 4x4 tile area; pick the 2x2 quadrant
        let attr_addr = 0x23C0 | (v & 0x0C00) | ((v >> 4) & 0x38) | ((v >> 2) & 0x07);
        let shift = (((v >> 4) & 0x04) | (v & 0x02)) as u8;
        let palette = (self.bus.read(attr_addr) >> shift) & 0x03;

        let fine_y = (self.t >> 12) & 0x07;
        let row = (fine_y + self.scanline) % 8;
        let table = if self.ppuctrl & CTRL_BACKGROUND_TABLE != 0 {
            0x1000
        } else {
            0x0000
        };
        let (low, high) = self.fetch_pattern_line(table, tile, row);
        let pixels = decode_tile_line(low, high);

        for (j, &color) in pixels.iter().enumerate() {
            let Some(x) = (k * 8 + j).checked_sub(self.fine_x as usize) else {
                continue;
            };
            if x >= SCREEN_WIDTH {
                continue;
            }
            let pixel = self.composite(x, color, palette);
            self.frame.set_pixel(x, self.scanline as usize, pixel);
        }

        self.increment_coarse_x();
    }

    /// Resolve one screen pixel from the background color and cached sprites
    ///
    /// Returns the packed pixel: `(is_sprite << 4) | (palette << 2) | color`,
    /// or 0 when both layers are transparent.
    fn composite(&mut self, x: usize, bg_color: u8, bg_palette: u8) -> u8 {
        let show_bg =
            self.ppumask & MASK_BACKGROUND != 0 && (x >= 8 || self.ppumask & MASK_BACKGROUND_LEFT != 0);
        let show_sprites =
            self.ppumask & MASK_SPRITES != 0 && (x >= 8 || self.ppumask & MASK_SPRITES_LEFT != 0);

        let bg_color = if show_bg { bg_color } else { 0 };

        // Lowest OAM index with an opaque pixel wins, even when it sits
        // behind the background
        let sprite = if show_sprites {
            self.sprite_lines.iter().find_map(|line| match line.color_at(x) {
                Some(color) if color != 0 => Some((*line, color)),
                _ => None,
            })
        } else {
            None
        };

        match sprite {
            Some((line, color)) => {
                if line.oam_index == 0 && bg_color != 0 && x != SCREEN_WIDTH - 1 {
                    self.ppustatus |= STATUS_SPRITE_ZERO_HIT;
                }
                if bg_color == 0 || !line.behind_background {
                    0x10 | (line.palette << 2) | color
                } else {
                    (bg_palette << 2) | bg_color
                }
            }
            None if bg_color != 0 => (bg_palette << 2) | bg_color,
            None => 0,
        }
    }

    /// Coarse X increment, wrapping into the horizontal nametable
    fn increment_coarse_x(&mut self) {
        if self.v & 0x001F == 31 {
            self.v &= !0x001F;
            self.v ^= 0x0400;
        } else {
            self.v += 1;
        }
    }

    /// Coarse Y increment, wrapping into the vertical nametable at row 29
    fn increment_coarse_y(&mut self) {
        let mut coarse_y = (self.v & 0x03E0) >> 5;
        if coarse_y == 29 {
            coarse_y = 0;
            self.v ^= 0x0800;
        } else if coarse_y == 31 {
            // Rows 30-31 hold attributes; wrap without switching tables
            coarse_y = 0;
        } else {
            coarse_y += 1;
        }
        self.v = (self.v & !0x03E0) | (coarse_y << 5);
    }

    /// End-of-scanline scroll update: reload horizontal bits, step coarse Y
    pub(super) fn end_of_line_scroll(&mut self) {
        self.v = (self.v & !0x041F) | (self.t & 0x041F);
        let fine_y = (self.t >> 12) & 0x07;
        if (fine_y + self.scanline) % 8 == 7 {
            self.increment_coarse_y();
        }
    }

    /// Select up to 8 sprites for the next scanline, in OAM order
    ///
    /// A 9th qualifying sprite sets the overflow flag and ends the scan.
    pub(super) fn evaluate_sprites(&mut self) {
        self.selected_sprites.clear();
        let height = self.sprite_height();

        for index in 0..64u8 {
            let y = self.oam[index as usize * 4];
            if y >= SPRITE_Y_HIDDEN {
                continue;
            }
            // OAM Y is the top row minus one, so a sprite evaluated on this
            // line is drawn from the next one
            let Some(row) = self.scanline.checked_sub(y as u16) else {
                continue;
            };
            if row >= height {
                continue;
            }
            if self.selected_sprites.len() == MAX_SPRITES_PER_LINE {
                self.ppustatus |= STATUS_SPRITE_OVERFLOW;
                break;
            }
            self.selected_sprites.push(index);
        }
    }

    /// Fetch the pattern line of the `slot`-th selected sprite
    pub(super) fn fetch_sprite_line(&mut self, slot: usize) {
        let Some(&index) = self.selected_sprites.get(slot) else {
            return;
        };
        let base = index as usize * 4;
        let y = self.oam[base];
        let tile = self.oam[base + 1];
        let attributes = self.oam[base + 2];
        let x = self.oam[base + 3];

        let height = self.sprite_height();
        let mut row = match self.scanline.checked_sub(y as u16) {
            Some(row) if row < height => row,
            // PPUCTRL changed size since evaluation
            _ => return,
        };
        if attributes & 0x80 != 0 {
            row = height - 1 - row;
        }

        let (table, tile, row) = if height == 16 {
            // Bit 0 picks the table, the pair is (tile & 0xFE, tile | 1)
            let table = if tile & 0x01 != 0 { 0x1000 } else { 0x0000 };
            let top = tile & 0xFE;
            if row < 8 {
                (table, top, row)
            } else {
                (table, top + 1, row - 8)
            }
        } else {
            let table = if self.ppuctrl & CTRL_SPRITE_TABLE != 0 {
                0x1000
            } else {
                0x0000
            };
            (table, tile, row)
        };

        let (low, high) = self.fetch_pattern_line(table, tile, row);
        let mut pixels = decode_tile_line(low, high);
        if attributes & 0x40 != 0 {
            pixels.reverse();
        }

        self.next_sprite_lines.push(SpriteLine {
            oam_index: index,
            x,
            behind_background: attributes & 0x20 != 0,
            palette: attributes & 0x03,
            pixels,
        });
    }
}
