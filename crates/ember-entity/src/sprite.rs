//! Entities and sprites

use bytemuck::{Pod, Zeroable};
use ember_core::Color;
use glam::{Vec2, Vec3, Vec4};

/// Shade mode for an untextured, flat-color quad
pub const MODE_COLOR: f32 = 1.0;
/// Shade mode for a regular textured quad
pub const MODE_TEXTURED: f32 = 0.0;
/// Shade mode for a glyph quad (coverage in the red channel)
pub const MODE_GLYPH: f32 = 2.0;

/// Index pattern for one quad; offset by 4 per preceding quad in a batch
pub const QUAD_INDICES: [u32; 6] = [0, 2, 1, 1, 2, 3];

/// A positioned object with 2D velocity
///
/// The z component of the position is the depth sort key and is never
/// integrated.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Entity {
    pub position: Vec3,
    pub velocity: Vec2,
}

impl Entity {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
        }
    }

    /// Advance the position by one explicit Euler step
    pub fn update(&mut self, time_step: f32) {
        self.position.x += self.velocity.x * time_step;
        self.position.y += self.velocity.y * time_step;
    }
}

/// One vertex of a sprite quad as handed to the raster backend
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct SpriteVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
    pub color: [f32; 4],
    /// One of `MODE_TEXTURED`, `MODE_COLOR`, `MODE_GLYPH`
    pub mode: f32,
}

/// A drawable quad with texture, tint, rotation, and reflection
///
/// Position is the bottom-left corner; `texture_box` is `(x, y, w, h)` in
/// normalized texture coordinates. Vertices are derived on every draw and
/// never cached.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Sprite {
    pub body: Entity,
    pub dimensions: Vec2,
    /// Rotation about the sprite center in degrees
    pub rotation: f32,
    /// Rotation change in degrees per tick
    pub rotation_velocity: f32,
    pub texture: Option<String>,
    pub texture_box: Vec4,
    pub color: Color,
    pub reflect_horizontal: bool,
    pub reflect_vertical: bool,
}

impl Sprite {
    pub fn new(position: Vec3, dimensions: Vec2, texture: Option<&str>) -> Self {
        Self {
            body: Entity::new(position),
            dimensions,
            rotation: 0.0,
            rotation_velocity: 0.0,
            texture: texture.map(str::to_owned),
            texture_box: Vec4::new(0.0, 0.0, 1.0, 1.0),
            color: Color::WHITE,
            reflect_horizontal: false,
            reflect_vertical: false,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.body.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.body.position = position;
    }

    pub fn update(&mut self, time_step: f32) {
        self.body.update(time_step);
        self.rotation += self.rotation_velocity * time_step;
    }

    /// Closed-interval overlap test against another sprite's bounds
    pub fn intersects(&self, other: &Sprite) -> bool {
        let a = self.body.position;
        let b = other.body.position;
        a.x <= b.x + other.dimensions.x
            && a.x + self.dimensions.x >= b.x
            && a.y <= b.y + other.dimensions.y
            && a.y + self.dimensions.y >= b.y
    }

    /// Derive the four corner vertices for this frame
    pub fn build_quad(&self) -> [SpriteVertex; 4] {
        let p = self.body.position;
        let d = self.dimensions;
        let tb = self.texture_box;

        let mut corners = [
            Vec2::new(p.x, p.y),
            Vec2::new(p.x + d.x, p.y),
            Vec2::new(p.x, p.y + d.y),
            Vec2::new(p.x + d.x, p.y + d.y),
        ];
        if self.rotation % 360.0 != 0.0 {
            let center = Vec2::new(p.x + d.x / 2.0, p.y + d.y / 2.0);
            let (sin, cos) = self.rotation.to_radians().sin_cos();
            for corner in &mut corners {
                let rel = *corner - center;
                *corner = center + Vec2::new(rel.x * cos - rel.y * sin, rel.x * sin + rel.y * cos);
            }
        }

        let (mut u0, mut u1) = (tb.x, tb.x + tb.z);
        if self.reflect_horizontal {
            std::mem::swap(&mut u0, &mut u1);
        }
        let (mut v0, mut v1) = (tb.y, tb.y + tb.w);
        if self.reflect_vertical {
            std::mem::swap(&mut v0, &mut v1);
        }

        let mode = if self.texture.is_none() {
            MODE_COLOR
        } else {
            MODE_TEXTURED
        };
        let color = self.color.to_array();
        let uvs = [[u0, v0], [u1, v0], [u0, v1], [u1, v1]];

        let mut quad = [SpriteVertex::default(); 4];
        for (vertex, (corner, uv)) in quad.iter_mut().zip(corners.iter().zip(uvs.iter())) {
            *vertex = SpriteVertex {
                position: [corner.x, corner.y, p.z],
                uv: *uv,
                color,
                mode,
            };
        }
        quad
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_euler_step() {
        let mut e = Entity::new(Vec3::new(1.0, 2.0, 0.5));
        e.velocity = Vec2::new(2.0, -1.0);
        e.update(0.5);
        assert_eq!(e.position, Vec3::new(2.0, 1.5, 0.5));
    }

    #[test]
    fn test_depth_not_integrated() {
        let mut e = Entity::new(Vec3::new(0.0, 0.0, 3.0));
        e.velocity = Vec2::new(1.0, 1.0);
        e.update(1.0);
        assert_eq!(e.position.z, 3.0);
    }

    #[test]
    fn test_intersects_overlap_and_touch() {
        let a = Sprite::new(Vec3::ZERO, Vec2::new(10.0, 10.0), None);
        let b = Sprite::new(Vec3::new(5.0, 5.0, 0.0), Vec2::new(10.0, 10.0), None);
        let c = Sprite::new(Vec3::new(10.0, 0.0, 0.0), Vec2::new(10.0, 10.0), None);
        let d = Sprite::new(Vec3::new(21.0, 0.0, 0.0), Vec2::new(10.0, 10.0), None);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        // Shared edge counts as contact
        assert!(a.intersects(&c));
        assert!(!a.intersects(&d));
    }

    #[test]
    fn test_quad_corners_unrotated() {
        let s = Sprite::new(Vec3::new(1.0, 2.0, 0.3), Vec2::new(4.0, 6.0), Some("t"));
        let q = s.build_quad();
        assert_eq!(q[0].position, [1.0, 2.0, 0.3]);
        assert_eq!(q[1].position, [5.0, 2.0, 0.3]);
        assert_eq!(q[2].position, [1.0, 8.0, 0.3]);
        assert_eq!(q[3].position, [5.0, 8.0, 0.3]);
        assert_eq!(q[0].mode, MODE_TEXTURED);
    }

    #[test]
    fn test_quad_untextured_is_color_mode() {
        let s = Sprite::new(Vec3::ZERO, Vec2::ONE, None);
        assert_eq!(s.build_quad()[0].mode, MODE_COLOR);
    }

    #[test]
    fn test_full_rotation_is_identity() {
        let mut s = Sprite::new(Vec3::ZERO, Vec2::new(2.0, 2.0), None);
        s.rotation = 720.0;
        let q = s.build_quad();
        assert_eq!(q[0].position, [0.0, 0.0, 0.0]);
        assert_eq!(q[3].position, [2.0, 2.0, 0.0]);
    }

    #[test]
    fn test_rotation_about_center() {
        let mut s = Sprite::new(Vec3::ZERO, Vec2::new(2.0, 2.0), None);
        s.rotation = 180.0;
        let q = s.build_quad();
        // Bottom-left corner lands on the original top-right
        assert!((q[0].position[0] - 2.0).abs() < 1e-5);
        assert!((q[0].position[1] - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_horizontal_reflection_swaps_u() {
        let mut s = Sprite::new(Vec3::ZERO, Vec2::ONE, Some("t"));
        s.reflect_horizontal = true;
        let q = s.build_quad();
        assert_eq!(q[0].uv, [1.0, 0.0]);
        assert_eq!(q[1].uv, [0.0, 0.0]);
    }

    #[test]
    fn test_vertical_reflection_swaps_v() {
        let mut s = Sprite::new(Vec3::ZERO, Vec2::ONE, Some("t"));
        s.reflect_vertical = true;
        let q = s.build_quad();
        assert_eq!(q[0].uv, [0.0, 1.0]);
        assert_eq!(q[2].uv, [0.0, 0.0]);
    }
}
