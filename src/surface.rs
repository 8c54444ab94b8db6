// src/surface.rs

//! Output surfaces that finished pixel buffers are handed to.
//!
//! A `Surface` is the last stop of a draw call: it receives ownership of the
//! buffer along with destination coordinates. `MemorySurface` is the
//! in-process implementation used by the binary and the tests.

use crate::color::Rgba;
use crate::frame::PixelBuffer;
use log::trace;
use std::io::{self, Write};

/// Rectangle in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearRect {
    pub x: i64,
    pub y: i64,
    pub width: usize,
    pub height: usize,
}

impl ClearRect {
    pub fn new(x: i64, y: i64, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Destination for rendered text.
pub trait Surface {
    /// Commit `buffer` with its top-left corner at `(x, y)`.
    fn present(&mut self, buffer: PixelBuffer, x: i64, y: i64);

    /// Reset a rectangle to transparent.
    fn clear(&mut self, rect: ClearRect);
}

/// Fixed-size RGBA canvas held in memory.
#[derive(Debug, Clone)]
pub struct MemorySurface {
    canvas: PixelBuffer,
    presents: usize,
}

impl MemorySurface {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            canvas: PixelBuffer::new(width, height),
            presents: 0,
        }
    }

    pub fn canvas(&self) -> &PixelBuffer {
        &self.canvas
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgba> {
        self.canvas.pixel(x, y)
    }

    /// Number of buffers presented so far.
    pub fn present_count(&self) -> usize {
        self.presents
    }

    /// Write the canvas as binary PPM (P6), compositing alpha over black.
    pub fn write_ppm<W: Write>(&self, mut out: W) -> io::Result<()> {
        writeln!(out, "P6")?;
        writeln!(out, "{} {}", self.canvas.width(), self.canvas.height())?;
        writeln!(out, "255")?;
        let mut rgb = Vec::with_capacity(self.canvas.width() * self.canvas.height() * 3);
        for px in self.canvas.as_bytes().chunks_exact(4) {
            let a = px[3] as u32;
            for &c in &px[..3] {
                rgb.push(((c as u32 * a + 127) / 255) as u8);
            }
        }
        out.write_all(&rgb)?;
        out.flush()
    }
}

impl Surface for MemorySurface {
    fn present(&mut self, buffer: PixelBuffer, x: i64, y: i64) {
        trace!(
            "MemorySurface: present {}x{} at ({}, {})",
            buffer.width(),
            buffer.height(),
            x,
            y
        );
        self.canvas.copy_from(&buffer, x, y);
        self.presents += 1;
    }

    fn clear(&mut self, rect: ClearRect) {
        trace!("MemorySurface: clear {:?}", rect);
        self.canvas
            .fill_rect(rect.x, rect.y, rect.width, rect.height, Rgba::TRANSPARENT);
    }
}
