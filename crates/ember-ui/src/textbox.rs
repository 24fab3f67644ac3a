//! Single-line text entry

use crate::component::{UiBase, UiFrame, UiStyle, TEXT_ENTERED_EVENT};
use ember_core::Alignment;
use ember_entity::Sprite;
use ember_input::{Axis, InputManager, KeyCode, MouseButton};
use ember_render::{Font, FontLibrary, Renderer};
use glam::{Vec2, Vec3};
use std::borrow::Cow;

/// A single-line editable text field
///
/// Clicking in the field focuses it and drops the caret between the two
/// glyphs nearest the pointer. Text longer than the field scrolls in
/// fifths of the field width to keep the caret visible. Arrow keys,
/// backspace, and delete repeat while held, gated by an update-rate
/// timer.
#[derive(Debug)]
pub struct UiTextBox {
    pub base: UiBase,
    pub texture: Option<String>,
    pub cursor_texture: Option<String>,
    /// Caret size as window fractions
    pub cursor_dimensions: Vec2,
    /// Maximum content length in characters; zero means unlimited
    pub max_characters: usize,
    /// Characters accepted when typing; empty accepts everything
    pub allowed_characters: String,
    pub(crate) text: String,
    pub(crate) cursor: usize,
    /// Horizontal scroll of the content in pixels, zero or negative
    text_offset: f32,
    pub(crate) mask: Option<char>,
    selected: bool,
    last_highlighted: bool,
    timer: f32,
}

impl UiTextBox {
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
            max_characters: 0,
            allowed_characters: String::new(),
            text: String::new(),
            cursor: 0,
            text_offset: 0.0,
            mask: None,
            selected: false,
            last_highlighted: false,
            timer: 0.0,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_owned();
        self.cursor = self.text.chars().count();
        self.text_offset = 0.0;
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub(crate) fn rescale_offset(&mut self, ratio: f32) {
        self.text_offset *= ratio;
    }

    /// What the field shows; password fields substitute their mask
    fn display_text(&self) -> Cow<'_, str> {
        match self.mask {
            Some(mask) => Cow::Owned(mask.to_string().repeat(self.text.chars().count())),
            None => Cow::Borrowed(self.text.as_str()),
        }
    }

    fn byte_index(&self, character_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(character_index)
            .map_or(self.text.len(), |(i, _)| i)
    }

    fn type_character(&mut self, character: char) {
        if character.is_control() {
            return;
        }
        if !self.allowed_characters.is_empty() && !self.allowed_characters.contains(character) {
            return;
        }
        if self.max_characters > 0 && self.text.chars().count() >= self.max_characters {
            return;
        }
        let at = self.byte_index(self.cursor);
        self.text.insert(at, character);
        self.cursor += 1;
    }

    /// Edge press always steps; a held key steps only past the repeat
    /// delay
    fn key_step(&mut self, input: &InputManager, key: KeyCode, target_ups: f32) -> bool {
        if input.is_key_pressed(key) {
            self.timer = 0.0;
            return true;
        }
        input.is_key_down(key) && self.timer > target_ups / 6.0
    }

    fn put_cursor_in_view(&mut self, fonts: &FontLibrary, style: &UiStyle, rect: glam::Vec4) {
        let Some(font) = fonts.font(&style.font) else {
            return;
        };
        let step = rect.z / 5.0;
        if step <= 0.0 {
            return;
        }
        let prefix: String = self.display_text().chars().take(self.cursor).collect();
        let mut x = rect.x + self.text_offset + font.text_width(&prefix, style.text_scale);
        while x < rect.x {
            self.text_offset += step;
            x += step;
        }
        while x > rect.x + rect.z {
            self.text_offset -= step;
            x -= step;
        }
    }

    pub(crate) fn process_input(
        &mut self,
        frame: &mut UiFrame,
        style: &UiStyle,
        events: &mut Vec<u32>,
    ) {
        let rect = self.base.rect(frame.window);

        if frame.input.is_mouse_button_pressed(MouseButton::Left) {
            if self.base.is_mouse_over(frame) {
                self.selected = true;
                if let Some(font) = frame.fonts.font(&style.font) {
                    let local = frame.input.mouse_position().x - (rect.x + self.text_offset);
                    self.cursor =
                        index_at_offset(font, &self.display_text(), style.text_scale, local);
                }
            } else {
                self.selected = false;
            }
        }

        // Gamepad focus doubles as selection
        if self.base.highlighted && !self.last_highlighted {
            self.selected = true;
        } else if !self.base.highlighted && self.last_highlighted {
            self.selected = false;
        }
        self.last_highlighted = self.base.highlighted;

        if !self.selected {
            return;
        }

        let typed: String = frame.input.typed_characters().to_owned();
        let mut edited = !typed.is_empty();
        for character in typed.chars() {
            self.type_character(character);
        }

        if frame.input.is_key_pressed(KeyCode::Enter) {
            events.push(TEXT_ENTERED_EVENT);
        }

        let length = self.text.chars().count();
        if self.key_step(frame.input, KeyCode::ArrowLeft, frame.target_ups) && self.cursor > 0 {
            self.cursor -= 1;
            edited = true;
        }
        if self.key_step(frame.input, KeyCode::ArrowRight, frame.target_ups)
            && self.cursor < length
        {
            self.cursor += 1;
            edited = true;
        }
        if self.key_step(frame.input, KeyCode::Backspace, frame.target_ups) && self.cursor > 0 {
            let at = self.byte_index(self.cursor - 1);
            self.text.remove(at);
            self.cursor -= 1;
            edited = true;
        }
        if self.key_step(frame.input, KeyCode::Delete, frame.target_ups)
            && self.cursor < self.text.chars().count()
        {
            let at = self.byte_index(self.cursor);
            self.text.remove(at);
            edited = true;
        }

        if self.base.highlighted && self.timer > frame.target_ups / 6.0 {
            for pad in frame.input.connected_controllers() {
                let stick = frame.input.controller_axis(pad, Axis::LeftStickX);
                if stick > 0.5 && self.cursor < self.text.chars().count() {
                    self.cursor += 1;
                    self.timer = 0.0;
                    edited = true;
                } else if stick < -0.5 && self.cursor > 0 {
                    self.cursor -= 1;
                    self.timer = 0.0;
                    edited = true;
                }
            }
        }

        if edited {
            self.put_cursor_in_view(frame.fonts, style, rect);
        }
    }

    pub(crate) fn update(&mut self, time_step: f32, target_ups: f32) {
        self.timer += time_step;
        if self.timer > target_ups {
            self.timer = 0.0;
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
        let display = self.display_text().into_owned();
        if self.selected {
            if let Some(cursor_texture) = &self.cursor_texture {
                let prefix: String = display.chars().take(self.cursor).collect();
                let prefix_width = renderer
                    .fonts()
                    .font(&style.font)
                    .map_or(0.0, |font| font.text_width(&prefix, style.text_scale));
                let cursor = self.cursor_dimensions * window;
                let sprite = Sprite::new(
                    Vec3::new(
                        rect.x + self.text_offset + prefix_width,
                        rect.y + (rect.w - cursor.y) / 2.0,
                        self.base.depth + 0.1,
                    ),
                    cursor,
                    Some(cursor_texture),
                );
                renderer.submit_with_shader(&sprite, style.shader);
            }
        }
        renderer.submit_text(
            &display,
            Vec3::new(rect.x + self.text_offset, rect.y, self.base.depth),
            rect,
            style.text_scale,
            style.text_color,
            &style.font,
            Alignment::None,
            Alignment::Center,
            style.shader,
        );
    }
}

/// Find the caret slot nearest a pixel offset into the content, splitting
/// each glyph at its advance midpoint
fn index_at_offset(font: &Font, text: &str, scale: f32, offset: f32) -> usize {
    let mut accumulated = 0.0;
    for (index, character) in text.chars().enumerate() {
        let advance = font.glyph(character).map_or(0.0, |g| g.advance) * scale;
        if offset < accumulated + advance / 2.0 {
            return index;
        }
        accumulated += advance;
    }
    text.chars().count()
}

/// A text field that renders its content as mask characters
///
/// The backing text is scrubbed in place when the control is destroyed.
#[derive(Debug)]
pub struct UiPasswordBox {
    pub text_box: UiTextBox,
}

impl UiPasswordBox {
    pub fn new(
        position: Vec2,
        dimensions: Vec2,
        texture: Option<&str>,
        cursor_texture: Option<&str>,
        cursor_dimensions: Vec2,
    ) -> Self {
        let mut text_box =
            UiTextBox::new(position, dimensions, texture, cursor_texture, cursor_dimensions);
        text_box.mask = Some('*');
        Self { text_box }
    }

    pub fn text(&self) -> &str {
        self.text_box.text()
    }

    pub fn set_text(&mut self, text: &str) {
        self.text_box.set_text(text);
    }

    /// Overwrite the content before releasing it; `clear` keeps the
    /// allocation, so the zero fill lands on the old bytes
    pub(crate) fn scrub(&mut self) {
        let length = self.text_box.text.len();
        self.text_box.text.clear();
        for _ in 0..length {
            self.text_box.text.push('\0');
        }
        self.text_box.text.clear();
        self.text_box.cursor = 0;
    }
}
