//! Two-state toggle

use crate::component::{UiBase, UiFrame, UiStyle, SWITCH_OFF_EVENT, SWITCH_ON_EVENT};
use ember_core::Alignment;
use ember_entity::Sprite;
use ember_input::{Button, MouseButton};
use ember_render::Renderer;
use glam::{Vec2, Vec3, Vec4};

/// An on/off toggle
///
/// The texture holds two stacked frames: off at the bottom, on at the
/// top. Clicking anywhere on the switch flips it, as does the gamepad
/// accept button while focused.
#[derive(Debug)]
pub struct UiSwitch {
    pub base: UiBase,
    pub texture: Option<String>,
    pub text: String,
    on: bool,
}

impl UiSwitch {
    pub fn new(position: Vec2, dimensions: Vec2, texture: Option<&str>, text: &str) -> Self {
        Self {
            base: UiBase::new(position, dimensions),
            texture: texture.map(str::to_owned),
            text: text.to_owned(),
            on: false,
        }
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    /// Set the state without emitting an event
    pub fn set_on(&mut self, on: bool) {
        self.on = on;
    }

    fn toggle(&mut self, events: &mut Vec<u32>) {
        self.on = !self.on;
        events.push(if self.on {
            SWITCH_ON_EVENT
        } else {
            SWITCH_OFF_EVENT
        });
    }

    pub(crate) fn process_input(&mut self, frame: &mut UiFrame, events: &mut Vec<u32>) {
        if frame.input.is_mouse_button_pressed(MouseButton::Left) && self.base.is_mouse_over(frame)
        {
            self.toggle(events);
        }
        if self.base.highlighted {
            for pad in frame.input.connected_controllers() {
                if frame.input.is_controller_button_pressed(pad, Button::South) {
                    self.toggle(events);
                }
            }
        }
    }

    pub(crate) fn draw(&self, renderer: &mut Renderer, style: &UiStyle, window: Vec2) {
        let rect = self.base.rect(window);
        if let Some(texture) = &self.texture {
            let mut sprite = Sprite::new(
                Vec3::new(rect.x, rect.y, self.base.depth),
                Vec2::new(rect.z, rect.w),
                Some(texture),
            );
            sprite.texture_box = Vec4::new(0.0, if self.on { 0.5 } else { 0.0 }, 1.0, 0.5);
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
