//! Depth-sorted sprite batching over a pluggable raster backend

use crate::font::FontLibrary;
use ember_core::{Alignment, Color};
use ember_entity::{Sprite, SpriteVertex, MODE_GLYPH, QUAD_INDICES};
use glam::{Vec3, Vec4};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Opaque handle to a compiled shader program
pub type ShaderId = u32;

/// The shader every submission uses unless told otherwise
pub const DEFAULT_SHADER: ShaderId = 0;

/// The seam to the platform graphics API
pub trait RasterBackend {
    fn clear(&mut self, color: Color);
    fn draw(
        &mut self,
        shader: ShaderId,
        texture: Option<&str>,
        vertices: &[SpriteVertex],
        indices: &[u32],
    );
}

/// One recorded `draw` invocation
#[derive(Clone, Debug, PartialEq)]
pub struct DrawCall {
    pub shader: ShaderId,
    pub texture: Option<String>,
    pub vertices: Vec<SpriteVertex>,
    pub indices: Vec<u32>,
}

/// Backend that records every call; clones share the same recording
#[derive(Clone, Default)]
pub struct RecordingBackend {
    calls: Rc<RefCell<Vec<DrawCall>>>,
    clear_count: Rc<RefCell<u32>>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<DrawCall> {
        self.calls.borrow().clone()
    }

    pub fn clear_count(&self) -> u32 {
        *self.clear_count.borrow()
    }
}

impl RasterBackend for RecordingBackend {
    fn clear(&mut self, _color: Color) {
        *self.clear_count.borrow_mut() += 1;
        self.calls.borrow_mut().clear();
    }

    fn draw(
        &mut self,
        shader: ShaderId,
        texture: Option<&str>,
        vertices: &[SpriteVertex],
        indices: &[u32],
    ) {
        self.calls.borrow_mut().push(DrawCall {
            shader,
            texture: texture.map(str::to_owned),
            vertices: vertices.to_vec(),
            indices: indices.to_vec(),
        });
    }
}

struct Submission {
    shader: ShaderId,
    z: f32,
    texture: Option<String>,
    quad: [SpriteVertex; 4],
}

/// Queues sprite and glyph quads between `begin` and `end`, then streams
/// them to the backend in depth order
pub struct Renderer {
    backend: Box<dyn RasterBackend>,
    pub clear_color: Color,
    fonts: FontLibrary,
    sprites: Vec<Submission>,
    glyphs: BTreeMap<ShaderId, Vec<Submission>>,
}

impl Renderer {
    pub fn new(backend: Box<dyn RasterBackend>) -> Self {
        Self {
            backend,
            clear_color: Color::BLACK,
            fonts: FontLibrary::new(),
            sprites: Vec::new(),
            glyphs: BTreeMap::new(),
        }
    }

    pub fn fonts(&self) -> &FontLibrary {
        &self.fonts
    }

    pub fn fonts_mut(&mut self) -> &mut FontLibrary {
        &mut self.fonts
    }

    /// Start a frame: clear the target and drop last frame's submissions
    pub fn begin(&mut self) {
        self.backend.clear(self.clear_color);
        self.sprites.clear();
        self.glyphs.clear();
    }

    pub fn submit(&mut self, sprite: &Sprite) {
        self.submit_with_shader(sprite, DEFAULT_SHADER);
    }

    pub fn submit_with_shader(&mut self, sprite: &Sprite, shader: ShaderId) {
        self.sprites.push(Submission {
            shader,
            z: sprite.position().z,
            texture: sprite.texture.clone(),
            quad: sprite.build_quad(),
        });
    }

    /// Lay out `text` as glyph quads inside `bounds` (`x, y, w, h`)
    ///
    /// Alignment::None takes `position` literally on that axis. Glyphs that
    /// would land outside the bounds are dropped. An unknown font or an
    /// empty font skips the whole submission.
    #[allow(clippy::too_many_arguments)]
    pub fn submit_text(
        &mut self,
        text: &str,
        position: Vec3,
        bounds: Vec4,
        scale: f32,
        color: Color,
        font_name: &str,
        horizontal: Alignment,
        vertical: Alignment,
        shader: ShaderId,
    ) {
        if text.is_empty() {
            return;
        }
        let Some(font) = self.fonts.font(font_name) else {
            log::warn!("submit_text: unknown font {font_name:?}");
            return;
        };
        if font.is_empty() {
            return;
        }

        let label_width = font.text_width(text, scale);
        let mut x = match horizontal {
            Alignment::Left => bounds.x,
            Alignment::Right => (bounds.x + bounds.z) - label_width,
            Alignment::Center => bounds.x + bounds.z / 2.0 - label_width / 2.0,
            _ => position.x,
        };
        if let Some(first) = text.chars().next().and_then(|c| font.glyph(c)) {
            x -= first.bearing.x * scale;
        }
        let label_height = (font.min_bearing() + font.max_bearing()) * scale;
        let y = match vertical {
            Alignment::Bottom => bounds.y + font.min_bearing() * scale,
            Alignment::Top => (bounds.y + bounds.w) - label_height,
            Alignment::Center => bounds.y + bounds.w / 2.0 - label_height / 2.0,
            _ => position.y,
        };

        let mut quads = Vec::new();
        for character in text.chars() {
            let Some(glyph) = font.glyph(character) else {
                continue;
            };
            let glyph_position = Vec3::new(
                x + glyph.bearing.x * scale,
                y - (glyph.dimensions.y - glyph.bearing.y) * scale,
                position.z,
            );
            let dimensions = glyph.dimensions * scale;
            x += glyph.advance * scale;
            if glyph_position.x < bounds.x
                || glyph_position.x + dimensions.x > bounds.x + bounds.z
                || glyph_position.y < bounds.y
                || glyph_position.y + dimensions.y > bounds.y + bounds.w
            {
                continue;
            }
            let mut sprite = Sprite::new(glyph_position, dimensions, Some(&glyph.texture));
            sprite.color = color;
            let mut quad = sprite.build_quad();
            for vertex in &mut quad {
                vertex.mode = MODE_GLYPH;
            }
            quads.push(Submission {
                shader,
                z: position.z,
                texture: sprite.texture,
                quad,
            });
        }
        self.glyphs.entry(shader).or_default().extend(quads);
    }

    /// Finish the frame: merge glyphs, depth-sort, and stream batches
    ///
    /// A batch flushes whenever the shader or the texture changes; indices
    /// are rebased by four vertices per quad already in the batch.
    pub fn end(&mut self) {
        let glyphs = std::mem::take(&mut self.glyphs);
        for (_, list) in glyphs {
            self.sprites.extend(list);
        }
        if self.sprites.is_empty() {
            return;
        }
        self.sprites.sort_by(|a, b| a.z.total_cmp(&b.z));

        let mut vertices: Vec<SpriteVertex> = Vec::new();
        let mut indices: Vec<u32> = Vec::new();
        let mut count: u32 = 0;
        let mut shader = self.sprites[0].shader;
        let mut texture = self.sprites[0].texture.clone();
        for submission in &self.sprites {
            if submission.shader != shader || submission.texture != texture {
                if count > 0 {
                    self.backend
                        .draw(shader, texture.as_deref(), &vertices, &indices);
                    vertices.clear();
                    indices.clear();
                    count = 0;
                }
                shader = submission.shader;
                texture = submission.texture.clone();
            }
            indices.extend(QUAD_INDICES.iter().map(|i| i + 4 * count));
            vertices.extend_from_slice(&submission.quad);
            count += 1;
        }
        if count > 0 {
            self.backend
                .draw(shader, texture.as_deref(), &vertices, &indices);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::{Font, Glyph};
    use glam::Vec2;

    fn sprite_at(z: f32, texture: Option<&str>) -> Sprite {
        Sprite::new(Vec3::new(0.0, 0.0, z), Vec2::ONE, texture)
    }

    fn test_font() -> Font {
        let mut font = Font::new();
        for c in 'a'..='z' {
            font.add_glyph(
                c,
                Glyph {
                    dimensions: Vec2::new(8.0, 10.0),
                    bearing: Vec2::new(1.0, 10.0),
                    advance: 10.0,
                    texture: format!("glyph-{c}"),
                },
            );
        }
        font
    }

    fn renderer() -> (Renderer, RecordingBackend) {
        let backend = RecordingBackend::new();
        let mut renderer = Renderer::new(Box::new(backend.clone()));
        renderer.fonts_mut().add_font("test", test_font());
        (renderer, backend)
    }

    #[test]
    fn test_depth_sort_orders_draws() {
        let (mut renderer, backend) = renderer();
        renderer.begin();
        renderer.submit(&sprite_at(3.0, Some("c")));
        renderer.submit(&sprite_at(1.0, Some("a")));
        renderer.submit(&sprite_at(2.0, Some("b")));
        renderer.end();
        let calls = backend.calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[0].texture.as_deref(), Some("a"));
        assert_eq!(calls[1].texture.as_deref(), Some("b"));
        assert_eq!(calls[2].texture.as_deref(), Some("c"));
    }

    #[test]
    fn test_equal_depth_keeps_submission_order() {
        let (mut renderer, backend) = renderer();
        renderer.begin();
        renderer.submit(&sprite_at(1.0, Some("first")));
        renderer.submit(&sprite_at(1.0, Some("second")));
        renderer.end();
        let calls = backend.calls();
        assert_eq!(calls[0].texture.as_deref(), Some("first"));
        assert_eq!(calls[1].texture.as_deref(), Some("second"));
    }

    #[test]
    fn test_same_texture_merges_into_one_batch() {
        let (mut renderer, backend) = renderer();
        renderer.begin();
        renderer.submit(&sprite_at(1.0, Some("atlas")));
        renderer.submit(&sprite_at(2.0, Some("atlas")));
        renderer.submit(&sprite_at(3.0, Some("atlas")));
        renderer.end();
        let calls = backend.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].vertices.len(), 12);
        // Second quad's indices are rebased by 4, third by 8
        assert_eq!(&calls[0].indices[0..6], &[0, 2, 1, 1, 2, 3]);
        assert_eq!(&calls[0].indices[6..12], &[4, 6, 5, 5, 6, 7]);
        assert_eq!(&calls[0].indices[12..18], &[8, 10, 9, 9, 10, 11]);
    }

    #[test]
    fn test_shader_change_splits_batch() {
        let (mut renderer, backend) = renderer();
        renderer.begin();
        renderer.submit_with_shader(&sprite_at(1.0, Some("atlas")), 0);
        renderer.submit_with_shader(&sprite_at(2.0, Some("atlas")), 7);
        renderer.end();
        let calls = backend.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].shader, 0);
        assert_eq!(calls[1].shader, 7);
    }

    #[test]
    fn test_begin_discards_previous_frame() {
        let (mut renderer, backend) = renderer();
        renderer.begin();
        renderer.submit(&sprite_at(1.0, Some("stale")));
        renderer.begin();
        renderer.end();
        assert!(backend.calls().is_empty());
        assert_eq!(backend.clear_count(), 2);
    }

    #[test]
    fn test_text_layout_advances_pen() {
        let (mut renderer, backend) = renderer();
        renderer.begin();
        renderer.submit_text(
            "ab",
            Vec3::new(0.0, 0.0, 0.5),
            Vec4::new(-100.0, -100.0, 400.0, 400.0),
            1.0,
            Color::WHITE,
            "test",
            Alignment::None,
            Alignment::None,
            DEFAULT_SHADER,
        );
        renderer.end();
        let calls = backend.calls();
        assert_eq!(calls.len(), 2);
        // First glyph starts at the pen minus its own x bearing plus it back
        let x0 = calls[0].vertices[0].position[0];
        let x1 = calls[1].vertices[0].position[0];
        assert!((x0 - 0.0).abs() < 1e-5);
        assert!((x1 - 10.0).abs() < 1e-5);
    }

    #[test]
    fn test_text_clipped_outside_bounds() {
        let (mut renderer, backend) = renderer();
        renderer.begin();
        // Bounds fit roughly two glyphs
        renderer.submit_text(
            "abcdef",
            Vec3::ZERO,
            Vec4::new(0.0, -10.0, 21.0, 40.0),
            1.0,
            Color::WHITE,
            "test",
            Alignment::Left,
            Alignment::None,
            DEFAULT_SHADER,
        );
        renderer.end();
        assert_eq!(backend.calls().len(), 2);
    }

    #[test]
    fn test_unknown_font_is_skipped() {
        let (mut renderer, backend) = renderer();
        renderer.begin();
        renderer.submit_text(
            "hello",
            Vec3::ZERO,
            Vec4::new(0.0, 0.0, 100.0, 100.0),
            1.0,
            Color::WHITE,
            "missing",
            Alignment::Left,
            Alignment::Bottom,
            DEFAULT_SHADER,
        );
        renderer.end();
        assert!(backend.calls().is_empty());
    }

    #[test]
    fn test_glyph_quads_marked_glyph_mode() {
        let (mut renderer, backend) = renderer();
        renderer.begin();
        renderer.submit_text(
            "a",
            Vec3::ZERO,
            Vec4::new(-50.0, -50.0, 100.0, 100.0),
            1.0,
            Color::WHITE,
            "test",
            Alignment::None,
            Alignment::None,
            DEFAULT_SHADER,
        );
        renderer.end();
        let calls = backend.calls();
        assert_eq!(calls[0].vertices[0].mode, MODE_GLYPH);
    }
}
