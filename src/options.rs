// src/options.rs

//! Per-call render options.
//!
//! Every recognized option lives here with its default, so the compositor
//! can match on effects exhaustively instead of probing a loose bag of
//! settings. All structs deserialize from JSON with missing fields filled
//! in from `Default`.

use crate::color::ColorSpec;
use serde::{Deserialize, Serialize};

/// Options for one `draw_text` / `measure_text` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextOptions {
    /// Font name; `None` uses the default font.
    pub font: Option<String>,
    /// Horizontal pixels per glyph cell.
    pub scale_x: u32,
    /// Vertical pixels per glyph cell.
    pub scale_y: u32,
    /// Foreground color. Absent means opaque white.
    pub color: Option<ColorSpec>,
    /// Fill for the whole buffer before any glyph is drawn.
    pub background: Option<ColorSpec>,
    pub shadow: Option<ShadowOptions>,
    pub outline: Option<OutlineOptions>,
    pub gradient: Option<GradientOptions>,
}

impl Default for TextOptions {
    fn default() -> Self {
        TextOptions {
            font: None,
            scale_x: 1,
            scale_y: 1,
            color: None,
            background: None,
            shadow: None,
            outline: None,
            gradient: None,
        }
    }
}

impl TextOptions {
    /// Default options with the same scale on both axes.
    pub fn scaled(scale: u32) -> Self {
        TextOptions {
            scale_x: scale,
            scale_y: scale,
            ..Default::default()
        }
    }

    /// Outline thickness in glyph cells, or 0 when no outline is drawn.
    pub fn outline_thickness(&self) -> u32 {
        self.outline.as_ref().map_or(0, |o| o.thickness)
    }
}

/// Drop shadow, offset in glyph cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadowOptions {
    pub offset_x: i32,
    pub offset_y: i32,
    pub color: Option<ColorSpec>,
}

impl Default for ShadowOptions {
    fn default() -> Self {
        ShadowOptions {
            offset_x: 1,
            offset_y: 1,
            color: None,
        }
    }
}

/// Filled halo around each glyph, `thickness` glyph cells wide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlineOptions {
    pub thickness: u32,
    pub color: Option<ColorSpec>,
}

impl Default for OutlineOptions {
    fn default() -> Self {
        OutlineOptions {
            thickness: 1,
            color: None,
        }
    }
}

/// Cyclic vertical gradient for the foreground.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GradientOptions {
    /// Palette in gradient order. Fewer than two entries disables the gradient.
    pub colors: Vec<ColorSpec>,
    /// Phase shift in palette positions.
    pub offset: f64,
}
