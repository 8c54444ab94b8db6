// src/font.rs

//! Fixed-format 8x8 bitmap fonts and the name-keyed store that owns them.
//!
//! File layout:
//!
//! ```text
//! offset  size  field
//! 0       3     magic "FNT"
//! 3       1     version (0)
//! 4       1     glyph cell width (8)
//! 5       1     glyph cell height (8)
//! 6       2     glyph count, little-endian (256)
//! 8       2048  256 glyphs x 8 rows, one byte per row, bit 7 = leftmost column
//! ```

use crate::error::FontError;
use log::{debug, info};
use std::collections::HashMap;

pub const MAGIC: [u8; 3] = *b"FNT";
pub const FORMAT_VERSION: u8 = 0;
pub const GLYPH_WIDTH: usize = 8;
pub const GLYPH_HEIGHT: usize = 8;
pub const GLYPH_COUNT: usize = 256;
pub const HEADER_LEN: usize = 8;
pub const GLYPH_TABLE_LEN: usize = GLYPH_COUNT * GLYPH_HEIGHT; // 2048
pub const FONT_FILE_LEN: usize = HEADER_LEN + GLYPH_TABLE_LEN; // 2056

/// A decoded font: a name plus its 2048-byte glyph table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Font {
    name: String,
    glyphs: Box<[u8; GLYPH_TABLE_LEN]>,
}

impl Font {
    /// Validate a raw font file and decode its glyph table.
    pub fn parse(name: &str, bytes: &[u8]) -> Result<Self, FontError> {
        validate_header(bytes)?;
        if bytes.len() < FONT_FILE_LEN {
            return Err(FontError::Truncated {
                expected: FONT_FILE_LEN,
                actual: bytes.len(),
            });
        }

        let mut glyphs = Box::new([0u8; GLYPH_TABLE_LEN]);
        glyphs.copy_from_slice(&bytes[HEADER_LEN..FONT_FILE_LEN]);
        Ok(Self {
            name: name.to_string(),
            glyphs,
        })
    }

    /// Build a font straight from a glyph table, skipping the header.
    pub fn from_glyph_table(name: &str, table: [u8; GLYPH_TABLE_LEN]) -> Self {
        Self {
            name: name.to_string(),
            glyphs: Box::new(table),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The 8 row bytes of a glyph.
    pub fn glyph(&self, code: u8) -> &[u8] {
        let start = code as usize * GLYPH_HEIGHT;
        &self.glyphs[start..start + GLYPH_HEIGHT]
    }

    pub fn glyph_table(&self) -> &[u8] {
        &self.glyphs[..]
    }
}

fn validate_header(bytes: &[u8]) -> Result<(), FontError> {
    if bytes.len() < HEADER_LEN {
        return Err(FontError::InvalidFormat(format!(
            "header needs {} bytes, got {}",
            HEADER_LEN,
            bytes.len()
        )));
    }
    if bytes[0..3] != MAGIC {
        return Err(FontError::InvalidFormat(format!(
            "bad magic {:02X?}",
            &bytes[0..3]
        )));
    }
    if bytes[3] != FORMAT_VERSION {
        return Err(FontError::InvalidFormat(format!(
            "unsupported version {}",
            bytes[3]
        )));
    }
    if bytes[4] as usize != GLYPH_WIDTH || bytes[5] as usize != GLYPH_HEIGHT {
        return Err(FontError::InvalidFormat(format!(
            "glyph cell must be {}x{}, got {}x{}",
            GLYPH_WIDTH, GLYPH_HEIGHT, bytes[4], bytes[5]
        )));
    }
    let count = u16::from_le_bytes([bytes[6], bytes[7]]) as usize;
    if count != GLYPH_COUNT {
        return Err(FontError::InvalidFormat(format!(
            "glyph count must be {}, got {}",
            GLYPH_COUNT, count
        )));
    }
    Ok(())
}

/// Build the 8-byte header for a valid font file.
pub fn header_bytes() -> [u8; HEADER_LEN] {
    let count = (GLYPH_COUNT as u16).to_le_bytes();
    [
        MAGIC[0],
        MAGIC[1],
        MAGIC[2],
        FORMAT_VERSION,
        GLYPH_WIDTH as u8,
        GLYPH_HEIGHT as u8,
        count[0],
        count[1],
    ]
}

/// Derive a font name from a source identifier (path or URL):
/// last path segment without query, fragment or extension.
pub fn font_name_from_source(source: &str) -> String {
    let without_query = source.split(['?', '#']).next().unwrap_or(source);
    let segment = without_query
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(without_query);
    let stem = match segment.rfind('.') {
        Some(idx) if idx > 0 => &segment[..idx],
        _ => segment,
    };
    if stem.is_empty() {
        source.to_string()
    } else {
        stem.to_string()
    }
}

/// Name-keyed mapping of loaded fonts.
///
/// Inserting under an existing name replaces that font. The first font ever
/// inserted becomes the default and stays the default.
#[derive(Debug, Default)]
pub struct FontStore {
    fonts: HashMap<String, Font>,
    default_name: Option<String>,
}

impl FontStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `bytes` and store the result under `name`.
    ///
    /// Nothing is stored unless validation succeeds.
    pub fn insert(&mut self, name: &str, bytes: &[u8]) -> Result<&Font, FontError> {
        let font = Font::parse(name, bytes)?;
        let replaced = self.fonts.insert(name.to_string(), font).is_some();
        if self.default_name.is_none() {
            debug!("FontStore: '{}' is now the default font", name);
            self.default_name = Some(name.to_string());
        }
        info!(
            "FontStore: {} font '{}'",
            if replaced { "Replaced" } else { "Loaded" },
            name
        );
        self.fonts
            .get(name)
            .ok_or_else(|| FontError::FontNotFound(Some(name.to_string())))
    }

    /// Look up a font by name, or the default font when `name` is `None`.
    pub fn lookup(&self, name: Option<&str>) -> Result<&Font, FontError> {
        let key = name.or(self.default_name.as_deref());
        key.and_then(|k| self.fonts.get(k))
            .ok_or_else(|| FontError::FontNotFound(name.map(str::to_string)))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fonts.contains_key(name)
    }

    pub fn default_name(&self) -> Option<&str> {
        self.default_name.as_deref()
    }

    /// Names of all loaded fonts, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.fonts.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn font_file(fill: impl Fn(usize) -> u8) -> Vec<u8> {
        let mut bytes = header_bytes().to_vec();
        bytes.extend((0..GLYPH_TABLE_LEN).map(fill));
        bytes
    }

    #[test]
    fn test_parse_valid_font() {
        let bytes = font_file(|i| (i / GLYPH_HEIGHT) as u8);
        let font = Font::parse("test", &bytes).unwrap();
        assert_eq!(font.name(), "test");
        assert_eq!(font.glyph(65), &[65u8; 8]);
        assert_eq!(font.glyph(255), &[255u8; 8]);
    }

    #[test]
    fn test_trailing_bytes_are_ignored() {
        let mut bytes = font_file(|_| 0x18);
        bytes.extend_from_slice(&[0xAA; 32]);
        let font = Font::parse("padded", &bytes).unwrap();
        assert_eq!(font.glyph_table().len(), GLYPH_TABLE_LEN);
        assert!(font.glyph_table().iter().all(|&b| b == 0x18));
    }

    #[test]
    fn test_short_header_is_invalid_format() {
        let err = Font::parse("x", b"FNT").unwrap_err();
        assert!(matches!(err, FontError::InvalidFormat(_)));
    }

    #[test]
    fn test_each_header_field_is_checked() {
        // (byte index, bad value)
        for (idx, bad) in [(0, b'X'), (2, b'Z'), (3, 1), (4, 16), (5, 7), (6, 1), (7, 0)] {
            let mut bytes = font_file(|_| 0);
            bytes[idx] = bad;
            let err = Font::parse("x", &bytes).unwrap_err();
            assert!(
                matches!(err, FontError::InvalidFormat(_)),
                "byte {} = {} should be rejected, got {:?}",
                idx,
                bad,
                err
            );
        }
    }

    #[test]
    fn test_truncated_glyph_table() {
        let bytes = font_file(|_| 0);
        let err = Font::parse("x", &bytes[..FONT_FILE_LEN - 1]).unwrap_err();
        match err {
            FontError::Truncated { expected, actual } => {
                assert_eq!(expected, FONT_FILE_LEN);
                assert_eq!(actual, FONT_FILE_LEN - 1);
            }
            other => panic!("Expected Truncated, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_header_wins_over_truncation() {
        let mut bytes = font_file(|_| 0);
        bytes.truncate(100);
        bytes[3] = 9;
        assert!(matches!(
            Font::parse("x", &bytes),
            Err(FontError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_failed_insert_leaves_store_untouched() {
        let mut store = FontStore::new();
        let bytes = font_file(|_| 0);
        assert!(store.insert("broken", &bytes[..2000]).is_err());
        assert!(!store.contains("broken"));
        assert!(store.default_name().is_none());
        assert!(matches!(
            store.lookup(None),
            Err(FontError::FontNotFound(None))
        ));
    }

    #[test]
    fn test_first_font_becomes_default() {
        let mut store = FontStore::new();
        store.insert("first", &font_file(|_| 1)).unwrap();
        store.insert("second", &font_file(|_| 2)).unwrap();
        assert_eq!(store.default_name(), Some("first"));
        assert_eq!(store.lookup(None).unwrap().name(), "first");
        assert_eq!(store.lookup(Some("second")).unwrap().glyph(0)[0], 2);
    }

    #[test]
    fn test_reload_overwrites() {
        let mut store = FontStore::new();
        store.insert("f", &font_file(|_| 1)).unwrap();
        store.insert("f", &font_file(|_| 9)).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.lookup(Some("f")).unwrap().glyph(3)[0], 9);
    }

    #[test]
    fn test_unknown_name_is_not_found_even_with_default() {
        let mut store = FontStore::new();
        store.insert("f", &font_file(|_| 0)).unwrap();
        match store.lookup(Some("missing")) {
            Err(FontError::FontNotFound(Some(name))) => assert_eq!(name, "missing"),
            other => panic!("Expected FontNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_names_are_sorted() {
        let mut store = FontStore::new();
        for name in ["zeta", "alpha", "mid"] {
            store.insert(name, &font_file(|_| 0)).unwrap();
        }
        assert_eq!(store.names(), vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_font_name_from_source() {
        assert_eq!(font_name_from_source("fonts/retro.fnt"), "retro");
        assert_eq!(
            font_name_from_source("https://cdn.example.com/a/b/c64.bin?v=2#x"),
            "c64"
        );
        assert_eq!(font_name_from_source("C:\\fonts\\big.font.fnt"), "big.font");
        assert_eq!(font_name_from_source("plain"), "plain");
        assert_eq!(font_name_from_source(".hidden"), ".hidden");
        assert_eq!(font_name_from_source("dir/"), "dir/");
    }
}
