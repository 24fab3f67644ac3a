//! Font metrics for glyph-quad text layout
//!
//! Rasterization happens elsewhere; a `Font` here is just the per-character
//! metrics and the name of each glyph's coverage texture.

use glam::Vec2;
use std::collections::HashMap;

/// Metrics for a single rasterized character
#[derive(Clone, Debug, PartialEq)]
pub struct Glyph {
    /// Bitmap size in pixels at scale 1
    pub dimensions: Vec2,
    /// Offset from the pen position to the bitmap's top-left
    pub bearing: Vec2,
    /// Horizontal pen advance to the next glyph
    pub advance: f32,
    /// Name of the glyph's coverage texture
    pub texture: String,
}

/// A set of glyphs plus the aggregate bearing extrema used for vertical
/// alignment
#[derive(Clone, Debug, Default)]
pub struct Font {
    glyphs: HashMap<char, Glyph>,
    /// Deepest descender seen, as a positive distance below the baseline
    min_bearing: f32,
    /// Tallest ascender seen
    max_bearing: f32,
}

impl Font {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a glyph, keeping the bearing extrema current. Re-adding a
    /// character is ignored.
    pub fn add_glyph(&mut self, character: char, glyph: Glyph) {
        if self.glyphs.contains_key(&character) {
            return;
        }
        let descender = glyph.dimensions.y - glyph.bearing.y;
        if descender > self.min_bearing {
            self.min_bearing = descender;
        }
        if glyph.bearing.y > self.max_bearing {
            self.max_bearing = glyph.bearing.y;
        }
        self.glyphs.insert(character, glyph);
    }

    pub fn glyph(&self, character: char) -> Option<&Glyph> {
        self.glyphs.get(&character)
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn min_bearing(&self) -> f32 {
        self.min_bearing
    }

    pub fn max_bearing(&self) -> f32 {
        self.max_bearing
    }

    /// Width of `text` at the given scale, from glyph advances. Characters
    /// without a glyph contribute nothing.
    pub fn text_width(&self, text: &str, scale: f32) -> f32 {
        text.chars()
            .filter_map(|c| self.glyphs.get(&c))
            .map(|g| g.advance)
            .sum::<f32>()
            * scale
    }
}

/// Fonts keyed by name; lookup misses are the caller's silent-skip case
#[derive(Debug, Default)]
pub struct FontLibrary {
    fonts: HashMap<String, Font>,
}

impl FontLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_font(&mut self, name: &str, font: Font) {
        self.fonts.insert(name.to_owned(), font);
    }

    pub fn font(&self, name: &str) -> Option<&Font> {
        self.fonts.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glyph(w: f32, h: f32, bx: f32, by: f32, advance: f32) -> Glyph {
        Glyph {
            dimensions: Vec2::new(w, h),
            bearing: Vec2::new(bx, by),
            advance,
            texture: "glyph".into(),
        }
    }

    #[test]
    fn test_bearing_extrema_track_added_glyphs() {
        let mut font = Font::new();
        // Ascender-only glyph
        font.add_glyph('A', glyph(8.0, 10.0, 0.0, 10.0, 9.0));
        assert_eq!(font.min_bearing(), 0.0);
        assert_eq!(font.max_bearing(), 10.0);
        // Glyph with a 4px descender
        font.add_glyph('g', glyph(8.0, 12.0, 0.0, 8.0, 9.0));
        assert_eq!(font.min_bearing(), 4.0);
        assert_eq!(font.max_bearing(), 10.0);
    }

    #[test]
    fn test_readd_ignored() {
        let mut font = Font::new();
        font.add_glyph('A', glyph(8.0, 10.0, 0.0, 10.0, 9.0));
        font.add_glyph('A', glyph(1.0, 1.0, 0.0, 1.0, 1.0));
        assert_eq!(font.glyph('A').unwrap().advance, 9.0);
    }

    #[test]
    fn test_text_width_skips_missing() {
        let mut font = Font::new();
        font.add_glyph('a', glyph(8.0, 10.0, 0.0, 10.0, 10.0));
        assert_eq!(font.text_width("aa?a", 2.0), 60.0);
    }
}
