// src/gradient.rs

//! Cyclic vertical gradients.
//!
//! A palette is treated as a closed loop: after the last color the gradient
//! interpolates back to the first. The offset shifts the phase along that
//! loop, so animating it scrolls the gradient through the glyphs.

use crate::color::Rgba;
use crate::rasterizer::ColorSource;

/// Color used when a gradient has no palette at all.
pub const EMPTY_PALETTE_COLOR: Rgba = Rgba::WHITE;

/// Palette positions are snapped to this grid so offsets that differ by a
/// whole number of palette lengths sample identically.
const POSITION_GRID: f64 = 1e9;

/// Sample the gradient color for one scanline.
///
/// `scanline` is normalized against `total_height - 1` (at least 1), mapped
/// onto the palette, shifted by `offset` and wrapped into `[0, len)`. The
/// offset is wrapped on its own first, so `offset` and `offset + len` give
/// the same color.
pub fn sample(scanline: usize, total_height: usize, palette: &[Rgba], offset: f64) -> Rgba {
    match palette {
        [] => return EMPTY_PALETTE_COLOR,
        [only] => return *only,
        _ => {}
    }

    let len = palette.len() as f64;
    let span = total_height.saturating_sub(1).max(1) as f64;
    let normalized = scanline as f64 / span;
    let mut phase = snap(offset.rem_euclid(len));
    if phase >= len {
        phase = 0.0;
    }
    let mut pos = snap((normalized * (len - 1.0) + phase).rem_euclid(len));
    // rem_euclid and snapping can both land exactly on `len`.
    if pos >= len {
        pos = 0.0;
    }

    let i = (pos.floor() as usize).min(palette.len() - 1);
    let j = (i + 1) % palette.len();
    let frac = pos - i as f64;
    lerp(palette[i], palette[j], frac)
}

fn snap(v: f64) -> f64 {
    (v * POSITION_GRID).round() / POSITION_GRID
}

fn lerp(from: Rgba, to: Rgba, t: f64) -> Rgba {
    let channel = |a: u8, b: u8| -> u8 {
        let v = a as f64 + (b as f64 - a as f64) * t;
        v.round().clamp(0.0, 255.0) as u8
    };
    Rgba::new(
        channel(from.r, to.r),
        channel(from.g, to.g),
        channel(from.b, to.b),
        channel(from.a, to.a),
    )
}

/// A gradient bound to a buffer height and phase, usable as a per-row
/// color source for the rasterizer.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientSource {
    palette: Vec<Rgba>,
    total_height: usize,
    offset: f64,
}

impl GradientSource {
    pub fn new(palette: Vec<Rgba>, total_height: usize, offset: f64) -> Self {
        Self {
            palette,
            total_height,
            offset,
        }
    }

    pub fn palette(&self) -> &[Rgba] {
        &self.palette
    }
}

impl ColorSource for GradientSource {
    fn color_for_row(&self, scanline: usize) -> Rgba {
        sample(scanline, self.total_height, &self.palette, self.offset)
    }
}
