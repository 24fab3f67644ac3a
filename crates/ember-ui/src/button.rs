//! Clickable button with hover, press, and gamepad accept handling

use crate::component::{
    UiBase, UiFrame, UiStyle, CLICKED_EVENT, HIGHLIGHTED_EVENT, SELECTED_EVENT,
    UNHIGHLIGHTED_EVENT, UNSELECTED_EVENT,
};
use ember_core::Alignment;
use ember_entity::Sprite;
use ember_input::{Button, MouseButton};
use ember_render::Renderer;
use glam::{Vec2, Vec3, Vec4};

/// A push button
///
/// The texture holds three stacked frames: unhighlighted at the bottom,
/// highlighted in the middle, selected on top. A click is a press and a
/// release that both land on the button.
#[derive(Debug)]
pub struct UiButton {
    pub base: UiBase,
    pub texture: Option<String>,
    pub text: String,
    pub reflect_horizontal: bool,
    pub reflect_vertical: bool,
    pub(crate) selected: bool,
    /// Mouse-over state; `base.highlighted` is reserved for gamepad focus
    pub(crate) hovered: bool,
}

impl UiButton {
    pub fn new(position: Vec2, dimensions: Vec2, texture: Option<&str>, text: &str) -> Self {
        Self {
            base: UiBase::new(position, dimensions),
            texture: texture.map(str::to_owned),
            text: text.to_owned(),
            reflect_horizontal: false,
            reflect_vertical: false,
            selected: false,
            hovered: false,
        }
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub(crate) fn process_input(&mut self, frame: &mut UiFrame, events: &mut Vec<u32>) {
        if self.base.is_mouse_over(frame) {
            if !self.hovered {
                self.hovered = true;
                events.push(HIGHLIGHTED_EVENT);
            }
            if frame.input.is_mouse_button_pressed(MouseButton::Left) && !self.selected {
                self.selected = true;
                events.push(SELECTED_EVENT);
            }
            if frame.input.is_mouse_button_released(MouseButton::Left) && self.selected {
                self.selected = false;
                events.push(UNSELECTED_EVENT);
                events.push(CLICKED_EVENT);
            }
        } else {
            if self.hovered {
                self.hovered = false;
                events.push(UNHIGHLIGHTED_EVENT);
            }
            // A press that wanders off the button is not a click
            if self.selected && frame.input.is_mouse_button_released(MouseButton::Left) {
                self.selected = false;
                events.push(UNSELECTED_EVENT);
            }
        }

        if self.base.highlighted {
            for pad in frame.input.connected_controllers() {
                if frame.input.is_controller_button_pressed(pad, Button::South) && !self.selected {
                    self.selected = true;
                    events.push(SELECTED_EVENT);
                }
                if frame.input.is_controller_button_released(pad, Button::South) && self.selected {
                    self.selected = false;
                    events.push(UNSELECTED_EVENT);
                    events.push(CLICKED_EVENT);
                }
            }
        }
    }

    pub(crate) fn draw(&self, renderer: &mut Renderer, style: &UiStyle, window: Vec2) {
        let rect = self.base.rect(window);
        if let Some(texture) = &self.texture {
            let frame = if self.selected {
                2.0
            } else if self.base.highlighted || self.hovered {
                1.0
            } else {
                0.0
            };
            let mut sprite = Sprite::new(
                Vec3::new(rect.x, rect.y, self.base.depth),
                Vec2::new(rect.z, rect.w),
                Some(texture),
            );
            sprite.texture_box = Vec4::new(0.0, frame / 3.0, 1.0, 1.0 / 3.0);
            sprite.reflect_horizontal = self.reflect_horizontal;
            sprite.reflect_vertical = self.reflect_vertical;
            renderer.submit_with_shader(&sprite, style.shader);
        }
        renderer.submit_text(
            &self.text,
            Vec3::new(rect.x, rect.y, self.base.depth),
            rect,
            style.text_scale,
            style.text_color,
            &style.font,
            Alignment::Center,
            Alignment::Center,
            style.shader,
        );
    }
}
