// src/frame.rs

//! RGBA pixel buffer used as the render target for one draw call.

use crate::color::Rgba;

const BYTES_PER_PIXEL: usize = 4;

/// A row-major RGBA8 raster with a top-left origin.
///
/// Writes take signed coordinates and are clipped per pixel, so callers can
/// blit glyphs that hang off any edge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Create a fully transparent buffer.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0u8; width * height * BYTES_PER_PIXEL],
        }
    }

    /// Byte size of a `width` x `height` buffer, or `None` if it overflows.
    pub fn byte_len(width: usize, height: usize) -> Option<usize> {
        width.checked_mul(height)?.checked_mul(BYTES_PER_PIXEL)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw bytes, 4 per pixel.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Fill every pixel with `color`.
    pub fn fill(&mut self, color: Rgba) {
        let bytes = color.to_bytes();
        for pixel in self.data.chunks_exact_mut(BYTES_PER_PIXEL) {
            pixel.copy_from_slice(&bytes);
        }
    }

    /// Read a pixel, or `None` outside the buffer.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgba> {
        let idx = self.index(x, y)?;
        let mut bytes = [0u8; BYTES_PER_PIXEL];
        bytes.copy_from_slice(&self.data[idx..idx + BYTES_PER_PIXEL]);
        Some(Rgba::from_bytes(bytes))
    }

    /// Write a pixel; out-of-bounds coordinates are silently dropped.
    ///
    /// Returns whether the pixel landed inside the buffer.
    pub fn put_pixel(&mut self, x: i64, y: i64, color: Rgba) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        match self.index(x as usize, y as usize) {
            Some(idx) => {
                self.data[idx..idx + BYTES_PER_PIXEL].copy_from_slice(&color.to_bytes());
                true
            }
            None => false,
        }
    }

    /// Fill the intersection of a rectangle with the buffer.
    pub fn fill_rect(&mut self, x: i64, y: i64, width: usize, height: usize, color: Rgba) {
        let x0 = x.max(0) as usize;
        let y0 = y.max(0) as usize;
        let x1 = (x + width as i64).clamp(0, self.width as i64) as usize;
        let y1 = (y + height as i64).clamp(0, self.height as i64) as usize;
        if x0 >= x1 || y0 >= y1 {
            return;
        }
        let bytes = color.to_bytes();
        for row in y0..y1 {
            let start = (row * self.width + x0) * BYTES_PER_PIXEL;
            let end = (row * self.width + x1) * BYTES_PER_PIXEL;
            for pixel in self.data[start..end].chunks_exact_mut(BYTES_PER_PIXEL) {
                pixel.copy_from_slice(&bytes);
            }
        }
    }

    /// Copy `src` in with its top-left corner at `(x, y)`, clipping to bounds.
    pub fn copy_from(&mut self, src: &PixelBuffer, x: i64, y: i64) {
        for src_y in 0..src.height {
            let dest_y = y + src_y as i64;
            if dest_y < 0 || dest_y >= self.height as i64 {
                continue;
            }
            // Clip the horizontal span once per row.
            let src_x0 = (-x).max(0) as usize;
            let dest_x0 = x.max(0) as usize;
            if src_x0 >= src.width || dest_x0 >= self.width {
                continue;
            }
            let span = (src.width - src_x0).min(self.width - dest_x0);
            let s = (src_y * src.width + src_x0) * BYTES_PER_PIXEL;
            let d = (dest_y as usize * self.width + dest_x0) * BYTES_PER_PIXEL;
            let n = span * BYTES_PER_PIXEL;
            self.data[d..d + n].copy_from_slice(&src.data[s..s + n]);
        }
    }

    fn index(&self, x: usize, y: usize) -> Option<usize> {
        if x < self.width && y < self.height {
            Some((y * self.width + x) * BYTES_PER_PIXEL)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_buffer_is_transparent() {
        let buf = PixelBuffer::new(3, 2);
        assert_eq!(buf.as_bytes().len(), 3 * 2 * 4);
        assert!(buf.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_byte_len_detects_overflow() {
        assert_eq!(PixelBuffer::byte_len(3, 2), Some(24));
        assert_eq!(PixelBuffer::byte_len(usize::MAX, 2), None);
        assert_eq!(PixelBuffer::byte_len(usize::MAX / 2, 1), None);
    }

    #[test]
    fn test_into_bytes_is_row_major() {
        let mut buf = PixelBuffer::new(2, 2);
        buf.put_pixel(1, 0, Rgba::new(1, 2, 3, 4));
        buf.put_pixel(0, 1, Rgba::new(5, 6, 7, 8));
        let bytes = buf.into_bytes();
        assert_eq!(&bytes[4..8], &[1, 2, 3, 4]);
        assert_eq!(&bytes[8..12], &[5, 6, 7, 8]);
    }

    #[test]
    fn test_put_pixel_clips() {
        let mut buf = PixelBuffer::new(2, 2);
        let red = Rgba::opaque(255, 0, 0);
        assert!(buf.put_pixel(1, 1, red));
        assert!(!buf.put_pixel(-1, 0, red));
        assert!(!buf.put_pixel(0, 2, red));
        assert_eq!(buf.pixel(1, 1), Some(red));
        assert_eq!(buf.pixel(0, 0), Some(Rgba::TRANSPARENT));
        assert_eq!(buf.pixel(2, 0), None);
    }

    #[test]
    fn test_fill_rect_is_clipped() {
        let mut buf = PixelBuffer::new(4, 4);
        let blue = Rgba::opaque(0, 0, 255);
        buf.fill_rect(-1, 2, 3, 5, blue);
        for y in 0..4 {
            for x in 0..4 {
                let expected = if x < 2 && y >= 2 { blue } else { Rgba::TRANSPARENT };
                assert_eq!(buf.pixel(x, y), Some(expected), "pixel ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_copy_from_with_negative_origin() {
        let mut src = PixelBuffer::new(2, 2);
        src.fill(Rgba::opaque(9, 9, 9));
        src.put_pixel(1, 1, Rgba::opaque(1, 2, 3));
        let mut dest = PixelBuffer::new(3, 3);
        dest.copy_from(&src, -1, -1);
        assert_eq!(dest.pixel(0, 0), Some(Rgba::opaque(1, 2, 3)));
        assert_eq!(dest.pixel(1, 0), Some(Rgba::TRANSPARENT));
        assert_eq!(dest.pixel(0, 1), Some(Rgba::TRANSPARENT));
    }
}
