// src/rasterizer.rs

//! Glyph rasterizer: expands one 8x8 monochrome glyph into a scaled block
//! of pixels in a `PixelBuffer`.

use crate::color::Rgba;
use crate::font::{Font, GLYPH_HEIGHT, GLYPH_WIDTH};
use crate::frame::PixelBuffer;

/// Supplies the fill color for each destination scanline.
///
/// The rasterizer asks once per output row, never per pixel, so a
/// per-row source (a gradient) stays constant across a row and varies
/// down the buffer.
pub trait ColorSource {
    fn color_for_row(&self, scanline: usize) -> Rgba;
}

impl ColorSource for Rgba {
    fn color_for_row(&self, _scanline: usize) -> Rgba {
        *self
    }
}

/// Where a glyph lands and how big each of its cells is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphPlacement {
    pub x: i64,
    pub y: i64,
    pub scale_x: u32,
    pub scale_y: u32,
}

/// Draw glyph `code` with its top-left corner at the placement origin.
///
/// Every set bit becomes a `scale_x` x `scale_y` block. Pixels outside the
/// buffer are dropped. Returns the number of pixels written.
pub fn blit_glyph<C: ColorSource + ?Sized>(
    buffer: &mut PixelBuffer,
    font: &Font,
    code: u8,
    at: GlyphPlacement,
    color: &C,
) -> usize {
    let rows = font.glyph(code);
    let scale_x = at.scale_x as i64;
    let scale_y = at.scale_y as i64;
    let height = buffer.height() as i64;
    let mut written = 0;

    for (row, &bits) in rows.iter().enumerate().take(GLYPH_HEIGHT) {
        if bits == 0 {
            continue;
        }
        let cell_top = at.y.saturating_add(row as i64 * scale_y);
        for dy in 0..scale_y {
            let y = cell_top.saturating_add(dy);
            if y < 0 || y >= height {
                continue;
            }
            let row_color = color.color_for_row(y as usize);
            for col in 0..GLYPH_WIDTH {
                if bits & (0x80 >> col) == 0 {
                    continue;
                }
                let cell_left = at.x.saturating_add(col as i64 * scale_x);
                for dx in 0..scale_x {
                    if buffer.put_pixel(cell_left.saturating_add(dx), y, row_color) {
                        written += 1;
                    }
                }
            }
        }
    }
    written
}
