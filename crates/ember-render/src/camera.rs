//! 2D camera with centered orthographic projection

use ember_entity::Entity;
use glam::{Mat4, Vec2, Vec3};

/// A movable, zoomable camera
///
/// The projection is centered on the camera position and covers the window
/// dimensions at scale 1. The matrix is rebuilt lazily, only when position,
/// scale, or window dimensions have changed since the last update.
#[derive(Clone, Debug)]
pub struct Camera {
    pub body: Entity,
    scale: f32,
    /// Proportional zoom rate per tick
    pub scale_velocity: f32,
    matrix: Mat4,
    last_position: Vec3,
    last_scale: f32,
    last_window: Vec2,
}

impl Camera {
    pub fn new(window: Vec2) -> Self {
        let mut camera = Self {
            body: Entity::default(),
            scale: 1.0,
            scale_velocity: 0.0,
            matrix: Mat4::IDENTITY,
            last_position: Vec3::ZERO,
            last_scale: 1.0,
            last_window: window,
        };
        camera.rebuild(window);
        camera
    }

    pub fn position(&self) -> Vec3 {
        self.body.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.body.position = position;
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
    }

    pub fn matrix(&self) -> &Mat4 {
        &self.matrix
    }

    pub fn update(&mut self, time_step: f32, window: Vec2) {
        self.body.update(time_step);
        self.scale += self.scale_velocity * self.scale * time_step;
        if self.scale < 0.0 {
            self.scale = 0.0;
        }
        if self.body.position != self.last_position
            || self.scale != self.last_scale
            || window != self.last_window
        {
            self.rebuild(window);
        }
    }

    /// Convert a window-space point (origin bottom-left) to world space
    pub fn screen_to_world(&self, screen: Vec2, window: Vec2) -> Vec2 {
        (screen - window / 2.0) / self.scale
            + Vec2::new(self.body.position.x, self.body.position.y)
    }

    fn rebuild(&mut self, window: Vec2) {
        // Keep the view anchored through window resizes
        let ratio = window / self.last_window;
        self.body.position.x *= ratio.x;
        self.body.position.y *= ratio.y;
        let ortho = Mat4::orthographic_rh_gl(
            -window.x / 2.0,
            window.x / 2.0,
            -window.y / 2.0,
            window.y / 2.0,
            -1.0,
            1.0,
        );
        let view = Mat4::from_translation(Vec3::new(
            -self.body.position.x,
            -self.body.position.y,
            0.0,
        ));
        self.matrix = Mat4::from_scale(Vec3::new(self.scale, self.scale, 1.0)) * ortho * view;
        self.last_position = self.body.position;
        self.last_scale = self.scale;
        self.last_window = window;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Vec2 = Vec2::new(800.0, 600.0);

    #[test]
    fn test_scale_clamps_at_zero() {
        let mut camera = Camera::new(WINDOW);
        camera.set_scale(0.5);
        camera.scale_velocity = -10.0;
        camera.update(1.0, WINDOW);
        assert_eq!(camera.scale(), 0.0);
    }

    #[test]
    fn test_proportional_zoom() {
        let mut camera = Camera::new(WINDOW);
        camera.set_scale(2.0);
        camera.scale_velocity = 0.5;
        camera.update(1.0, WINDOW);
        assert!((camera.scale() - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_resize_rescales_position() {
        let mut camera = Camera::new(WINDOW);
        camera.set_position(Vec3::new(400.0, 300.0, 0.0));
        camera.update(1.0, WINDOW);
        camera.update(1.0, Vec2::new(1600.0, 600.0));
        assert!((camera.position().x - 800.0).abs() < 1e-4);
        assert!((camera.position().y - 300.0).abs() < 1e-4);
    }

    #[test]
    fn test_screen_to_world_centered() {
        let mut camera = Camera::new(WINDOW);
        camera.set_position(Vec3::new(100.0, 50.0, 0.0));
        let world = camera.screen_to_world(Vec2::new(400.0, 300.0), WINDOW);
        assert_eq!(world, Vec2::new(100.0, 50.0));
    }

    #[test]
    fn test_screen_to_world_descaled() {
        let mut camera = Camera::new(WINDOW);
        camera.set_scale(2.0);
        camera.update(0.0, WINDOW);
        let world = camera.screen_to_world(Vec2::new(500.0, 300.0), WINDOW);
        assert_eq!(world, Vec2::new(50.0, 0.0));
    }
}
