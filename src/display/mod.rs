// Display module - turns frames into host pixels
//
// A `FrameObj` only carries palette references, so converting it to RGB
// happens here for anything that shows or stores a frame.

pub mod palette;

pub use palette::{palette_to_rgb, rgb_channels, NES_PALETTE};

use crate::ppu::FrameObj;

/// Convert a frame to packed RGB888, row-major
pub fn frame_to_rgb(frame: &FrameObj) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(frame.width() * frame.height() * 3);
    for y in 0..frame.height() {
        for x in 0..frame.width() {
            rgb.extend_from_slice(&rgb_channels(palette_to_rgb(frame.color_index(x, y))));
        }
    }
    rgb
}
