// src/renderer.rs

//! This module defines the `TextRenderer`.
//!
//! The `TextRenderer` is the long-lived owner of the font store. It exposes
//! the public operations (`load_font`, `measure_text`, `draw_text`, `clear`,
//! `list_fonts`) and wires the pieces together:
//!
//! ```text
//! loader bytes -> FontStore -> compositor (rasterizer per layer) -> Surface
//! ```
//!
//! Font insertion and lookup are the only ways the store changes. Loading a
//! font under a name that already exists replaces it; callers that load the
//! same name from several places must order those loads themselves.

use crate::color::{ColorResolver, CssColorResolver};
use crate::compositor;
use crate::error::FontError;
use crate::font::{font_name_from_source, FontStore};
use crate::loader::FontLoader;
use crate::options::TextOptions;
use crate::surface::{ClearRect, Surface};
use log::{debug, warn};


/// Draws bitmap text onto a surface.
pub struct TextRenderer<S: Surface, R: ColorResolver = CssColorResolver> {
    fonts: FontStore,
    resolver: R,
    surface: S,
}

impl<S: Surface> TextRenderer<S, CssColorResolver> {
    /// Renderer with the built-in CSS color parser.
    pub fn new(surface: S) -> Self {
        Self::with_resolver(surface, CssColorResolver)
    }
}

impl<S: Surface, R: ColorResolver> TextRenderer<S, R> {
    pub fn with_resolver(surface: S, resolver: R) -> Self {
        Self {
            fonts: FontStore::new(),
            resolver,
            surface,
        }
    }

    /// Fetch a font through `loader` and store it.
    ///
    /// The name is `name` if given, otherwise derived from `source`.
    /// Returns the name the font was stored under.
    pub async fn load_font<L: FontLoader>(
        &mut self,
        loader: &L,
        source: &str,
        name: Option<&str>,
    ) -> Result<String, FontError> {
        let bytes = loader.fetch(source).await.map_err(|cause| {
            warn!("TextRenderer: failed to fetch font '{}': {}", source, cause);
            FontError::RetrievalFailed {
                source_id: source.to_string(),
                cause,
            }
        })?;
        let name = name.map_or_else(|| font_name_from_source(source), str::to_string);
        self.load_font_bytes(&bytes, &name)
    }

    /// Validate and store already-fetched font bytes under `name`.
    pub fn load_font_bytes(&mut self, bytes: &[u8], name: &str) -> Result<String, FontError> {
        let font = self.fonts.insert(name, bytes)?;
        Ok(font.name().to_string())
    }

    /// Size of the buffer `draw_text` would produce for the same inputs.
    pub fn measure_text(&self, text: &str, options: &TextOptions) -> (usize, usize) {
        compositor::measure(text, options)
    }

    /// Render `text` and present it on the surface at `(x, y)`.
    ///
    /// A zero-sized result (empty text with no effects, or a zero scale)
    /// is a no-op.
    pub fn draw_text(
        &mut self,
        text: &str,
        x: i64,
        y: i64,
        options: &TextOptions,
    ) -> Result<(), FontError> {
        let font = self.fonts.lookup(options.font.as_deref())?;
        match compositor::compose(font, text, options, &self.resolver) {
            Some(buffer) => {
                debug!(
                    "TextRenderer: drawing {:?} with '{}' as {}x{} at ({}, {})",
                    text,
                    font.name(),
                    buffer.width(),
                    buffer.height(),
                    x,
                    y
                );
                self.surface.present(buffer, x, y);
            }
            None => debug!("TextRenderer: nothing to draw for {:?}", text),
        }
        Ok(())
    }

    /// Clear a rectangle of the surface.
    pub fn clear(&mut self, x: i64, y: i64, width: usize, height: usize) {
        self.surface.clear(ClearRect::new(x, y, width, height));
    }

    /// Names of all loaded fonts, sorted.
    pub fn list_fonts(&self) -> Vec<&str> {
        self.fonts.names()
    }

    pub fn default_font(&self) -> Option<&str> {
        self.fonts.default_name()
    }

    pub fn fonts(&self) -> &FontStore {
        &self.fonts
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }
}
