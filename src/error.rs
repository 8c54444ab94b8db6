// src/error.rs

//! Error taxonomy for font loading and text drawing.

use std::io;
use thiserror::Error;

/// Errors surfaced by the font store and the renderer.
///
/// Every variant is terminal for the call that produced it. Validation runs
/// to completion before the font store is touched, so a failed load never
/// leaves a partial entry behind.
#[derive(Error, Debug)]
pub enum FontError {
    /// The 8-byte header is missing or one of its fields does not match.
    #[error("invalid font format: {0}")]
    InvalidFormat(String),

    /// The header is valid but the glyph table is incomplete.
    #[error("truncated font data: expected at least {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },

    /// The loader could not produce the font bytes.
    #[error("failed to retrieve font from '{source_id}'")]
    RetrievalFailed {
        source_id: String,
        #[source]
        cause: io::Error,
    },

    /// No font under the requested name, and no default to fall back on.
    #[error("font not found: {}", .0.as_deref().unwrap_or("<default>"))]
    FontNotFound(Option<String>),
}
