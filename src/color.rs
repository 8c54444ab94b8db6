// src/color.rs

//! Color values and the resolver that turns user-facing color specs into
//! concrete RGBA quadruples.
//!
//! A `ColorSpec` is what callers write in options: either a raw
//! `[r, g, b, a]` array or a CSS-style string. The `ColorResolver` trait is
//! the seam where a host could plug in its own parser; `CssColorResolver`
//! is the native implementation used by default.

use log::warn;
use serde::{Deserialize, Serialize};

/// RGBA color in 32-bit format (8 bits per channel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::opaque(255, 255, 255);
    pub const BLACK: Rgba = Rgba::opaque(0, 0, 0);
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Convert to RGBA byte array
    pub fn to_bytes(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn from_bytes(bytes: [u8; 4]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2], bytes[3])
    }
}

impl From<[u8; 4]> for Rgba {
    fn from(bytes: [u8; 4]) -> Self {
        Rgba::from_bytes(bytes)
    }
}

/// A color as written in render options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Explicit `[r, g, b, a]` channels.
    Channels([u8; 4]),
    /// Named color, hex notation, or `rgb()`/`rgba()` functional notation.
    Css(String),
}

impl From<[u8; 4]> for ColorSpec {
    fn from(channels: [u8; 4]) -> Self {
        ColorSpec::Channels(channels)
    }
}

impl From<&str> for ColorSpec {
    fn from(s: &str) -> Self {
        ColorSpec::Css(s.to_string())
    }
}

impl From<Rgba> for ColorSpec {
    fn from(c: Rgba) -> Self {
        ColorSpec::Channels(c.to_bytes())
    }
}

/// Converts color specs into concrete colors.
///
/// An absent color spec resolves to opaque white.
pub trait ColorResolver {
    fn resolve(&self, spec: Option<&ColorSpec>) -> Rgba;
}

/// Native CSS-style color parser.
#[derive(Debug, Clone, Copy, Default)]
pub struct CssColorResolver;

impl CssColorResolver {
    pub fn new() -> Self {
        Self
    }
}

impl ColorResolver for CssColorResolver {
    fn resolve(&self, spec: Option<&ColorSpec>) -> Rgba {
        match spec {
            None => Rgba::WHITE,
            Some(ColorSpec::Channels(c)) => Rgba::from_bytes(*c),
            Some(ColorSpec::Css(s)) => parse_css_color(s).unwrap_or_else(|| {
                // An unparseable fill style leaves a canvas on its initial black.
                warn!("Unrecognized color '{}', falling back to black", s);
                Rgba::BLACK
            }),
        }
    }
}

/// Parse a CSS color string. Returns `None` if the string is not understood.
pub fn parse_css_color(input: &str) -> Option<Rgba> {
    let s = input.trim().to_ascii_lowercase();
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex);
    }
    if let Some(args) = s.strip_prefix("rgba(").and_then(|r| r.strip_suffix(')')) {
        return parse_functional(args, true);
    }
    if let Some(args) = s.strip_prefix("rgb(").and_then(|r| r.strip_suffix(')')) {
        return parse_functional(args, false);
    }
    named_color(&s)
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match hex.len() {
        3 => Some(Rgba::opaque(nibble(0)?, nibble(1)?, nibble(2)?)),
        4 => Some(Rgba::new(nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?)),
        6 => Some(Rgba::opaque(byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(Rgba::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
        _ => None,
    }
}

fn parse_functional(args: &str, with_alpha: bool) -> Option<Rgba> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    let expected = if with_alpha { 4 } else { 3 };
    if parts.len() != expected {
        return None;
    }
    let channel = |p: &str| -> Option<u8> {
        let v: f64 = p.parse().ok()?;
        Some(v.round().clamp(0.0, 255.0) as u8)
    };
    let r = channel(parts[0])?;
    let g = channel(parts[1])?;
    let b = channel(parts[2])?;
    let a = if with_alpha {
        let alpha: f64 = parts[3].parse().ok()?;
        (alpha.clamp(0.0, 1.0) * 255.0).round() as u8
    } else {
        255
    };
    Some(Rgba::new(r, g, b, a))
}

/// CSS named colors (the basic set plus the common extended names).
fn named_color(name: &str) -> Option<Rgba> {
    let c = match name {
        "transparent" => Rgba::TRANSPARENT,
        "black" => Rgba::opaque(0, 0, 0),
        "silver" => Rgba::opaque(192, 192, 192),
        "gray" | "grey" => Rgba::opaque(128, 128, 128),
        "white" => Rgba::opaque(255, 255, 255),
        "maroon" => Rgba::opaque(128, 0, 0),
        "red" => Rgba::opaque(255, 0, 0),
        "purple" => Rgba::opaque(128, 0, 128),
        "fuchsia" | "magenta" => Rgba::opaque(255, 0, 255),
        "green" => Rgba::opaque(0, 128, 0),
        "lime" => Rgba::opaque(0, 255, 0),
        "olive" => Rgba::opaque(128, 128, 0),
        "yellow" => Rgba::opaque(255, 255, 0),
        "navy" => Rgba::opaque(0, 0, 128),
        "blue" => Rgba::opaque(0, 0, 255),
        "teal" => Rgba::opaque(0, 128, 128),
        "aqua" | "cyan" => Rgba::opaque(0, 255, 255),
        "orange" => Rgba::opaque(255, 165, 0),
        "gold" => Rgba::opaque(255, 215, 0),
        "pink" => Rgba::opaque(255, 192, 203),
        "hotpink" => Rgba::opaque(255, 105, 180),
        "brown" => Rgba::opaque(165, 42, 42),
        "indigo" => Rgba::opaque(75, 0, 130),
        "violet" => Rgba::opaque(238, 130, 238),
        "crimson" => Rgba::opaque(220, 20, 60),
        "coral" => Rgba::opaque(255, 127, 80),
        "salmon" => Rgba::opaque(250, 128, 114),
        "skyblue" => Rgba::opaque(135, 206, 235),
        "darkgray" | "darkgrey" => Rgba::opaque(169, 169, 169),
        "lightgray" | "lightgrey" => Rgba::opaque(211, 211, 211),
        _ => return None,
    };
    Some(c)
}
