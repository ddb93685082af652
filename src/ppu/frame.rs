// Frame output
//
// A frame stores one packed palette reference per pixel rather than an RGB
// value, so the host decides how colors are displayed.
//
// Pixel byte layout:
//
// ```text
// 7  bit  0
// ---- ----
// ...S PPCC
//    | ||||
//    | ||++- Color within the palette (0 = transparent / backdrop)
//    | ++--- Palette id (0-3)
//    +------ 1 = sprite palette, 0 = background palette
// ```

use super::constants::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// One rendered frame: 240 rows of 256 packed pixels plus the palettes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameObj {
    pub rows: Vec<Vec<u8>>,
    /// $3F00-$3F0F at frame start, each entry a master palette index
    pub bg_palette: [u8; 16],
    /// $3F10-$3F1F at frame start, each entry a master palette index
    pub sprite_palette: [u8; 16],
}

impl FrameObj {
    /// Blank frame (all backdrop) with the given palettes
    pub fn new(bg_palette: [u8; 16], sprite_palette: [u8; 16]) -> Self {
        FrameObj {
            rows: vec![vec![0; SCREEN_WIDTH]; SCREEN_HEIGHT],
            bg_palette,
            sprite_palette,
        }
    }

    pub fn width(&self) -> usize {
        SCREEN_WIDTH
    }

    pub fn height(&self) -> usize {
        SCREEN_HEIGHT
    }

    /// Packed pixel at (x, y)
    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        self.rows[y][x]
    }

    pub(super) fn set_pixel(&mut self, x: usize, y: usize, value: u8) {
        self.rows[y][x] = value;
    }

    /// Resolve the pixel at (x, y) to a master palette index (0-63)
    pub fn color_index(&self, x: usize, y: usize) -> u8 {
        let pixel = self.rows[y][x];
        let entry = (pixel & 0x0F) as usize;
        if pixel & 0x10 != 0 {
            self.sprite_palette[entry]
        } else {
            self.bg_palette[entry]
        }
    }
}

impl Default for FrameObj {
    fn default() -> Self {
        Self::new([0; 16], [0; 16])
    }
}
