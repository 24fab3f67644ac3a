//! Draggable value slider

use crate::component::{UiBase, UiFrame, UiStyle, VALUE_SET_EVENT};
use ember_core::Alignment;
use ember_entity::Sprite;
use ember_input::{Axis, MouseButton};
use ember_render::Renderer;
use glam::{Vec2, Vec3, Vec4};

/// How far a focused slider moves per frame while the stick is held
const STICK_STEP: f32 = 0.01;

/// A horizontal slider holding a value in `[0, 1]`
///
/// The cursor texture holds two stacked frames: idle at the bottom,
/// selected at the top. Dragging anywhere along the track moves the
/// cursor; a focused slider follows the left stick's x axis.
#[derive(Debug)]
pub struct UiSlider {
    pub base: UiBase,
    pub texture: Option<String>,
    pub cursor_texture: Option<String>,
    /// Cursor size as window fractions
    pub cursor_dimensions: Vec2,
    pub cursor_alignment: Alignment,
    value: f32,
    selected: bool,
}

impl UiSlider {
    pub fn new(
        position: Vec2,
        dimensions: Vec2,
        texture: Option<&str>,
        cursor_texture: Option<&str>,
        cursor_dimensions: Vec2,
    ) -> Self {
        Self {
            base: UiBase::new(position, dimensions),
            texture: texture.map(str::to_owned),
            cursor_texture: cursor_texture.map(str::to_owned),
            cursor_dimensions,
            cursor_alignment: Alignment::Center,
            value: 0.0,
            selected: false,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn set_value(&mut self, value: f32) {
        self.value = value.clamp(0.0, 1.0);
    }

    /// A focused slider always reads as grabbed
    pub fn is_selected(&self) -> bool {
        self.selected || self.base.highlighted
    }

    pub(crate) fn process_input(&mut self, frame: &mut UiFrame, events: &mut Vec<u32>) {
        if frame.input.is_mouse_button_pressed(MouseButton::Left) && self.base.is_mouse_over(frame)
        {
            self.selected = true;
        }
        if self.selected && frame.input.is_mouse_button_down(MouseButton::Left) {
            let rect = self.base.rect(frame.window);
            let cursor_width = self.cursor_dimensions.x * frame.window.x;
            let mouse_x = frame.input.mouse_position().x;
            // Snap to the ends once the pointer passes the cursor's midline
            let value = if mouse_x < rect.x + cursor_width / 2.0 {
                0.0
            } else if mouse_x > rect.x + rect.z - cursor_width / 2.0 {
                1.0
            } else {
                ((mouse_x - rect.x) / (rect.z - cursor_width)).clamp(0.0, 1.0)
            };
            if value != self.value {
                self.value = value;
                events.push(VALUE_SET_EVENT);
            }
        }
        if frame.input.is_mouse_button_released(MouseButton::Left) {
            self.selected = false;
        }

        if self.base.highlighted {
            for pad in frame.input.connected_controllers() {
                let stick = frame.input.controller_axis(pad, Axis::LeftStickX);
                let step = if stick > 0.5 {
                    STICK_STEP
                } else if stick < -0.5 {
                    -STICK_STEP
                } else {
                    continue;
                };
                let value = (self.value + step).clamp(0.0, 1.0);
                if value != self.value {
                    self.value = value;
                    events.push(VALUE_SET_EVENT);
                }
            }
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
        if let Some(cursor_texture) = &self.cursor_texture {
            let cursor = self.cursor_dimensions * window;
            let x = rect.x + (rect.z - cursor.x) * self.value;
            let y = match self.cursor_alignment {
                Alignment::Bottom => rect.y,
                Alignment::Center => rect.y + (rect.w - cursor.y) / 2.0,
                _ => rect.y + rect.w - cursor.y,
            };
            let mut sprite = Sprite::new(
                Vec3::new(x, y, self.base.depth + 0.1),
                cursor,
                Some(cursor_texture),
            );
            sprite.texture_box = Vec4::new(0.0, if self.is_selected() { 0.5 } else { 0.0 }, 1.0, 0.5);
            renderer.submit_with_shader(&sprite, style.shader);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_input::InputManager;
    use ember_render::FontLibrary;

    fn slider() -> UiSlider {
        UiSlider::new(
            Vec2::new(0.25, 0.5),
            Vec2::new(0.5, 0.05),
            Some("track"),
            Some("knob"),
            Vec2::new(0.025, 0.05),
        )
    }

    #[test]
    fn test_set_value_clamps() {
        let mut slider = slider();
        slider.set_value(-0.3);
        assert_eq!(slider.value(), 0.0);
        slider.set_value(1.7);
        assert_eq!(slider.value(), 1.0);
        slider.set_value(0.42);
        assert_eq!(slider.value(), 0.42);
    }

    #[test]
    fn test_drag_tracks_pointer() {
        let mut input = InputManager::new();
        let fonts = FontLibrary::new();
        let mut slider = slider();

        // Track rect is (200, 300, 400, 30) in an 800x600 window; click
        // dead center
        input.begin_frame();
        input.process_mouse_move(Vec2::new(400.0, 285.0), 600.0);
        input.process_mouse_button_down(MouseButton::Left);
        let mut events = Vec::new();
        let mut frame = UiFrame {
            input: &mut input,
            fonts: &fonts,
            window: Vec2::new(800.0, 600.0),
            target_ups: 60.0,
        };
        slider.process_input(&mut frame, &mut events);
        assert_eq!(events, vec![VALUE_SET_EVENT]);
        let expected = (400.0 - 200.0) / (400.0 - 20.0);
        assert!((slider.value() - expected).abs() < 1e-5);
    }

    #[test]
    fn test_drag_snaps_to_ends() {
        let mut input = InputManager::new();
        let fonts = FontLibrary::new();
        let mut slider = slider();
        slider.set_value(0.5);

        input.begin_frame();
        input.process_mouse_move(Vec2::new(205.0, 285.0), 600.0);
        input.process_mouse_button_down(MouseButton::Left);
        let mut events = Vec::new();
        let mut frame = UiFrame {
            input: &mut input,
            fonts: &fonts,
            window: Vec2::new(800.0, 600.0),
            target_ups: 60.0,
        };
        slider.process_input(&mut frame, &mut events);
        assert_eq!(slider.value(), 0.0);
    }

    #[test]
    fn test_stick_nudges_focused_slider() {
        let mut input = InputManager::new();
        let fonts = FontLibrary::new();
        let mut slider = slider();
        slider.set_value(0.5);
        slider.base.highlighted = true;
        input.process_controller_connected(0);
        input.process_controller_axis(0, Axis::LeftStickX, 1.0);

        let mut events = Vec::new();
        let mut frame = UiFrame {
            input: &mut input,
            fonts: &fonts,
            window: Vec2::new(800.0, 600.0),
            target_ups: 60.0,
        };
        slider.process_input(&mut frame, &mut events);
        assert!((slider.value() - 0.51).abs() < 1e-5);
        assert_eq!(events, vec![VALUE_SET_EVENT]);
    }

    #[test]
    fn test_focused_slider_reads_selected() {
        let mut slider = slider();
        assert!(!slider.is_selected());
        slider.base.highlighted = true;
        assert!(slider.is_selected());
    }
}
