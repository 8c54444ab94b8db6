// src/compositor.rs

//! Text compositor: sizes the output buffer from the text and its effects,
//! then layers outline, shadow and foreground for every character.
//!
//! ```text
//!   per character, back to front:
//!     outline    every (ox, oy) in [-t, t]^2 except (0, 0)
//!     shadow     base + (offset_x, offset_y)
//!     foreground base, flat color or gradient
//! ```
//!
//! Padding per axis is the larger of the shadow and outline extents, not
//! their sum. A large shadow and a thick outline in the same direction can
//! therefore clip at the buffer edge.

use crate::color::{ColorResolver, Rgba};
use crate::font::{Font, GLYPH_HEIGHT, GLYPH_WIDTH};
use crate::frame::PixelBuffer;
use crate::gradient::GradientSource;
use crate::options::TextOptions;
use crate::rasterizer::{blit_glyph, ColorSource, GlyphPlacement};
use log::{debug, trace, warn};

/// Extra pixels added to the buffer for effects, per axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Padding {
    pub x: usize,
    pub y: usize,
}

/// Padding required by the shadow and outline in `options`.
pub fn effect_padding(options: &TextOptions) -> Padding {
    let scale_x = options.scale_x as usize;
    let scale_y = options.scale_y as usize;

    let (shadow_x, shadow_y) = options.shadow.as_ref().map_or((0, 0), |s| {
        (
            (s.offset_x.unsigned_abs() as usize).saturating_mul(scale_x),
            (s.offset_y.unsigned_abs() as usize).saturating_mul(scale_y),
        )
    });
    let thickness = options.outline_thickness() as usize;
    let outline_x = thickness.saturating_mul(scale_x).saturating_mul(2);
    let outline_y = thickness.saturating_mul(scale_y).saturating_mul(2);

    Padding {
        x: shadow_x.max(outline_x),
        y: shadow_y.max(outline_y),
    }
}

/// Buffer size `draw` would allocate for `text`, without drawing.
///
/// Dimensions saturate at `usize::MAX` instead of overflowing.
pub fn measure(text: &str, options: &TextOptions) -> (usize, usize) {
    let padding = effect_padding(options);
    let chars = text.chars().count();
    let width = chars
        .saturating_mul(GLYPH_WIDTH)
        .saturating_mul(options.scale_x as usize)
        .saturating_add(padding.x);
    let height = GLYPH_HEIGHT
        .saturating_mul(options.scale_y as usize)
        .saturating_add(padding.y);
    (width, height)
}

/// Character code used for glyph lookup.
pub fn glyph_code(ch: char) -> u8 {
    (ch as u32 % 256) as u8
}

enum Foreground {
    Flat(Rgba),
    Gradient(GradientSource),
}

impl ColorSource for Foreground {
    fn color_for_row(&self, scanline: usize) -> Rgba {
        match self {
            Foreground::Flat(c) => *c,
            Foreground::Gradient(g) => g.color_for_row(scanline),
        }
    }
}

/// Render `text` into a fresh buffer sized by `measure`.
///
/// Returns `None` when either dimension is zero; that is a no-op, not an
/// error, since empty text is valid input. A buffer whose byte size does not
/// fit in `usize` is skipped the same way.
pub fn compose<R: ColorResolver + ?Sized>(
    font: &Font,
    text: &str,
    options: &TextOptions,
    resolver: &R,
) -> Option<PixelBuffer> {
    let (width, height) = measure(text, options);
    if width == 0 || height == 0 {
        debug!(
            "Compositor: skipping draw of {:?}, buffer would be {}x{}",
            text, width, height
        );
        return None;
    }
    if PixelBuffer::byte_len(width, height).is_none() {
        warn!(
            "Compositor: skipping draw of {:?}, {}x{} buffer is too large",
            text, width, height
        );
        return None;
    }

    let mut buffer = PixelBuffer::new(width, height);
    if let Some(bg) = options.background.as_ref() {
        buffer.fill(resolver.resolve(Some(bg)));
    }

    let foreground = match options.gradient.as_ref() {
        Some(g) if g.colors.len() >= 2 => {
            let palette: Vec<Rgba> = g
                .colors
                .iter()
                .map(|spec| resolver.resolve(Some(spec)))
                .collect();
            Foreground::Gradient(GradientSource::new(palette, height, g.offset))
        }
        _ => Foreground::Flat(resolver.resolve(options.color.as_ref())),
    };

    let outline = options
        .outline
        .as_ref()
        .filter(|o| o.thickness > 0)
        .map(|o| (o.thickness as i64, resolver.resolve(o.color.as_ref())));
    let shadow = options.shadow.as_ref().map(|s| {
        (
            s.offset_x as i64,
            s.offset_y as i64,
            resolver.resolve(s.color.as_ref()),
        )
    });

    let scale_x = options.scale_x as i64;
    let scale_y = options.scale_y as i64;
    let thickness = options.outline_thickness() as i64;
    let inset_x = thickness.saturating_mul(scale_x);
    let inset_y = thickness.saturating_mul(scale_y);
    let advance = (GLYPH_WIDTH as i64).saturating_mul(scale_x);

    let place = |x: i64, y: i64| GlyphPlacement {
        x,
        y,
        scale_x: options.scale_x,
        scale_y: options.scale_y,
    };

    for (index, ch) in text.chars().enumerate() {
        let code = glyph_code(ch);
        let base_x = inset_x.saturating_add((index as i64).saturating_mul(advance));
        let base_y = inset_y;
        trace!(
            "Compositor: '{}' (code {}) at ({}, {})",
            ch,
            code,
            base_x,
            base_y
        );

        if let Some((t, color)) = outline {
            for oy in -t..=t {
                for ox in -t..=t {
                    if ox == 0 && oy == 0 {
                        continue;
                    }
                    blit_glyph(
                        &mut buffer,
                        font,
                        code,
                        place(
                            base_x.saturating_add(ox.saturating_mul(scale_x)),
                            base_y.saturating_add(oy.saturating_mul(scale_y)),
                        ),
                        &color,
                    );
                }
            }
        }

        if let Some((dx, dy, color)) = shadow {
            blit_glyph(
                &mut buffer,
                font,
                code,
                place(
                    base_x.saturating_add(dx.saturating_mul(scale_x)),
                    base_y.saturating_add(dy.saturating_mul(scale_y)),
                ),
                &color,
            );
        }

        blit_glyph(&mut buffer, font, code, place(base_x, base_y), &foreground);
    }

    Some(buffer)
}
