// src/lib.rs

//! Fixed-format 8x8 bitmap font decoding and text rasterization with
//! outline, shadow and gradient effects.

pub mod color;
pub mod compositor;
pub mod config;
pub mod error;
pub mod font;
pub mod frame;
pub mod gradient;
pub mod loader;
pub mod options;
pub mod rasterizer;
pub mod renderer;
pub mod surface;

pub use color::{ColorResolver, ColorSpec, CssColorResolver, Rgba};
pub use error::FontError;
pub use font::{Font, FontStore};
pub use frame::PixelBuffer;
pub use loader::{FileLoader, FontLoader, MemoryLoader};
pub use options::{GradientOptions, OutlineOptions, ShadowOptions, TextOptions};
pub use renderer::TextRenderer;
pub use surface::{ClearRect, MemorySurface, Surface};
