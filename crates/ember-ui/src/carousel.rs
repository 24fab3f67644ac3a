//! Value carousel with browse buttons

use crate::component::{UiBase, UiFrame, UiStyle, CLICKED_EVENT, VALUE_SET_EVENT};
use crate::UiButton;
use ember_core::Alignment;
use ember_entity::Sprite;
use ember_input::{Axis, InputManager};
use ember_render::Renderer;
use glam::{Vec2, Vec3, Vec4};

/// Cycles through a fixed list of values with previous/next buttons
///
/// Both ends wrap around. `alignment` places the buttons: `Center` puts
/// one on each side of the value, `Left` and `Right` stack both on that
/// side, with the upper button browsing forward. A focused carousel also
/// browses with the left stick, along the axis matching its layout.
#[derive(Debug)]
pub struct UiCarousel {
    pub base: UiBase,
    pub texture: Option<String>,
    pub alignment: Alignment,
    values: Vec<String>,
    current: usize,
    /// Browse button width as a window fraction
    button_width: f32,
    pub(crate) last_button: UiButton,
    pub(crate) next_button: UiButton,
    timer: f32,
}

impl UiCarousel {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        position: Vec2,
        dimensions: Vec2,
        texture: Option<&str>,
        button_texture: Option<&str>,
        button_width: f32,
        alignment: Alignment,
        values: Vec<String>,
    ) -> Self {
        let mut last_button = UiButton::new(Vec2::ZERO, Vec2::ZERO, button_texture, "");
        let mut next_button = UiButton::new(Vec2::ZERO, Vec2::ZERO, button_texture, "");
        last_button.base.id = 0;
        next_button.base.id = 1;
        let mut carousel = Self {
            base: UiBase::new(position, dimensions),
            texture: texture.map(str::to_owned),
            alignment,
            values,
            current: 0,
            button_width,
            last_button,
            next_button,
            timer: 0.0,
        };
        carousel.layout();
        carousel
    }

    /// Recompute button placement from the carousel's own rect
    pub fn layout(&mut self) {
        let position = self.base.position;
        let dimensions = self.base.dimensions;
        let width = self.button_width;
        match self.alignment {
            Alignment::Left => {
                let half = dimensions.y / 2.0;
                self.last_button.base.position = position;
                self.last_button.base.dimensions = Vec2::new(width, half);
                self.next_button.base.position = Vec2::new(position.x, position.y + half);
                self.next_button.base.dimensions = Vec2::new(width, half);
                self.next_button.reflect_vertical = true;
            }
            Alignment::Right => {
                let half = dimensions.y / 2.0;
                let x = position.x + dimensions.x - width;
                self.last_button.base.position = Vec2::new(x, position.y);
                self.last_button.base.dimensions = Vec2::new(width, half);
                self.next_button.base.position = Vec2::new(x, position.y + half);
                self.next_button.base.dimensions = Vec2::new(width, half);
                self.next_button.reflect_vertical = true;
            }
            _ => {
                self.last_button.base.position = position;
                self.last_button.base.dimensions = Vec2::new(width, dimensions.y);
                self.next_button.base.position =
                    Vec2::new(position.x + dimensions.x - width, position.y);
                self.next_button.base.dimensions = Vec2::new(width, dimensions.y);
                self.next_button.reflect_horizontal = true;
            }
        }
        self.last_button.base.depth = self.base.depth + 0.1;
        self.next_button.base.depth = self.base.depth + 0.1;
    }

    /// The rect left for the value text once buttons take their share
    fn label_rect(&self, window: Vec2) -> Vec4 {
        let rect = self.base.rect(window);
        let width = self.button_width * window.x;
        match self.alignment {
            Alignment::Left => Vec4::new(rect.x + width, rect.y, rect.z - width, rect.w),
            Alignment::Right => Vec4::new(rect.x, rect.y, rect.z - width, rect.w),
            _ => Vec4::new(rect.x + width, rect.y, rect.z - 2.0 * width, rect.w),
        }
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn value(&self) -> &str {
        self.values.get(self.current).map_or("", String::as_str)
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Jump to a value; indices past the end are refused
    pub fn set_current_index(&mut self, index: usize) {
        if index < self.values.len() {
            self.current = index;
        }
    }

    pub fn select_previous(&mut self) {
        if self.values.is_empty() {
            return;
        }
        self.current = if self.current >= 1 {
            self.current - 1
        } else {
            self.values.len() - 1
        };
    }

    pub fn select_next(&mut self) {
        if self.values.is_empty() {
            return;
        }
        self.current = (self.current + 1) % self.values.len();
    }

    pub(crate) fn set_enabled(&mut self, enabled: bool, input: &mut InputManager) {
        self.base.set_enabled(enabled, input);
        self.last_button.base.set_enabled(enabled, input);
        self.next_button.base.set_enabled(enabled, input);
    }

    pub(crate) fn set_visible(&mut self, visible: bool, input: &mut InputManager) {
        self.base.set_visible(visible, input);
        self.last_button.base.set_visible(visible, input);
        self.next_button.base.set_visible(visible, input);
    }

    pub(crate) fn process_input(&mut self, frame: &mut UiFrame, events: &mut Vec<u32>) {
        // Button clicks stay internal; only value changes bubble out
        let mut child = Vec::new();
        self.last_button.process_input(frame, &mut child);
        let browse_back = child.contains(&CLICKED_EVENT);
        child.clear();
        self.next_button.process_input(frame, &mut child);
        let browse_forward = child.contains(&CLICKED_EVENT);
        if browse_back {
            self.select_previous();
            events.push(VALUE_SET_EVENT);
        }
        if browse_forward {
            self.select_next();
            events.push(VALUE_SET_EVENT);
        }

        if self.base.highlighted && self.timer > frame.target_ups / 6.0 {
            let axis = match self.alignment {
                Alignment::Left | Alignment::Right => Axis::LeftStickY,
                _ => Axis::LeftStickX,
            };
            for pad in frame.input.connected_controllers() {
                let stick = frame.input.controller_axis(pad, axis);
                if stick > 0.5 {
                    self.next_button.selected = true;
                    self.select_next();
                    events.push(VALUE_SET_EVENT);
                    self.timer = 0.0;
                } else if stick < -0.5 {
                    self.last_button.selected = true;
                    self.select_previous();
                    events.push(VALUE_SET_EVENT);
                    self.timer = 0.0;
                }
            }
        }
    }

    pub(crate) fn update(&mut self, time_step: f32, target_ups: f32) {
        self.timer += time_step;
        // Release the pressed look a moment after a stick-driven browse
        if self.timer > target_ups / 4.0 {
            self.last_button.selected = false;
            self.next_button.selected = false;
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
        let label = self.label_rect(window);
        renderer.submit_text(
            self.value(),
            Vec3::new(label.x, label.y, self.base.depth),
            label,
            style.text_scale,
            style.text_color,
            &style.font,
            Alignment::Center,
            Alignment::Center,
            style.shader,
        );
        self.last_button.draw(renderer, style, window);
        self.next_button.draw(renderer, style, window);
    }
}
