//! Static text over an optional background

use crate::component::{UiBase, UiStyle};
use ember_core::Alignment;
use ember_entity::Sprite;
use ember_render::Renderer;
use glam::{Vec2, Vec3};

/// A non-interactive piece of text, optionally backed by a sprite
#[derive(Debug)]
pub struct UiLabel {
    pub base: UiBase,
    pub texture: Option<String>,
    pub text: String,
    pub horizontal_alignment: Alignment,
    pub vertical_alignment: Alignment,
}

impl UiLabel {
    pub fn new(position: Vec2, dimensions: Vec2, texture: Option<&str>, text: &str) -> Self {
        Self {
            base: UiBase::new(position, dimensions),
            texture: texture.map(str::to_owned),
            text: text.to_owned(),
            horizontal_alignment: Alignment::Center,
            vertical_alignment: Alignment::Center,
        }
    }

    pub(crate) fn draw(&self, renderer: &mut Renderer, style: &UiStyle, window: Vec2) {
        let rect = self.base.rect(window);
        if let Some(texture) = &self.texture {
            let sprite = Sprite::new(
                Vec3::new(rect.x, rect.y, self.base.depth),
                Vec2::new(rect.z, rect.w),
                Some(texture),
            );
            renderer.submit_with_shader(&sprite, style.shader);
        }
        renderer.submit_text(
            &self.text,
            Vec3::new(rect.x, rect.y, self.base.depth),
            rect,
            style.text_scale,
            style.text_color,
            &style.font,
            self.horizontal_alignment,
            self.vertical_alignment,
            style.shader,
        );
    }
}
