//! Multi-line text entry

use crate::component::{UiBase, UiFrame, UiStyle};
use ember_core::Alignment;
use ember_entity::Sprite;
use ember_input::{Axis, InputManager, KeyCode, MouseButton};
use ember_render::{Font, Renderer};
use glam::{Vec2, Vec3, Vec4};

/// A multi-line editable text field
///
/// Shows `line_count` rows of content starting at `top_line`; the view
/// follows the caret both vertically and horizontally. Enter inserts a
/// line break. The mouse wheel scrolls the view when the pointer is over
/// the field.
#[derive(Debug)]
pub struct UiTextArea {
    pub base: UiBase,
    pub texture: Option<String>,
    pub cursor_texture: Option<String>,
    /// Caret size as window fractions
    pub cursor_dimensions: Vec2,
    pub max_characters: usize,
    pub allowed_characters: String,
    text: String,
    cursor: usize,
    /// Horizontal scroll of the content in pixels, zero or negative
    text_offset: f32,
    line_count: usize,
    top_line: usize,
    selected: bool,
    last_highlighted: bool,
    timer: f32,
}

impl UiTextArea {
    pub fn new(
        position: Vec2,
        dimensions: Vec2,
        texture: Option<&str>,
        cursor_texture: Option<&str>,
        cursor_dimensions: Vec2,
        line_count: usize,
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
            line_count: line_count.max(1),
            top_line: 0,
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
        self.top_line = 0;
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn line_count(&self) -> usize {
        self.line_count
    }

    pub fn top_line(&self) -> usize {
        self.top_line
    }

    /// Move the view; indices past the content are refused
    pub fn set_top_line(&mut self, line: usize) {
        if line < self.content_lines().len().max(1) {
            self.top_line = line;
        }
    }

    /// Content split into display lines; a trailing line break does not
    /// produce an empty final line
    pub fn content_lines(&self) -> Vec<&str> {
        let mut lines: Vec<&str> = self.text.split('\n').collect();
        if lines.last() == Some(&"") {
            lines.pop();
        }
        lines
    }

    pub(crate) fn rescale_offset(&mut self, ratio: f32) {
        self.text_offset *= ratio;
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

    fn insert_line_break(&mut self) {
        if self.max_characters > 0 && self.text.chars().count() >= self.max_characters {
            return;
        }
        let at = self.byte_index(self.cursor);
        self.text.insert(at, '\n');
        self.cursor += 1;
    }

    /// Advance of one glyph, with the first glyph of a line pulled back
    /// by its own x bearing as the renderer draws it
    fn glyph_advance(font: &Font, character: char, line_start: bool, scale: f32) -> f32 {
        font.glyph(character).map_or(0.0, |glyph| {
            let mut advance = glyph.advance;
            if line_start {
                advance -= glyph.bearing.x;
            }
            advance * scale
        })
    }

    /// Line index and pixel offset within that line at the caret
    fn cursor_line_and_x(&self, font: &Font, scale: f32) -> (usize, f32) {
        let mut line = 0;
        let mut x = 0.0;
        let mut line_start = true;
        for character in self.text.chars().take(self.cursor) {
            if character == '\n' {
                line += 1;
                x = 0.0;
                line_start = true;
            } else {
                x += Self::glyph_advance(font, character, line_start, scale);
                line_start = false;
            }
        }
        (line, x)
    }

    /// Caret index on `line` nearest the pixel offset `target_x`
    fn index_for_line_x(&self, font: &Font, scale: f32, line: usize, target_x: f32) -> usize {
        let characters: Vec<char> = self.text.chars().collect();
        let mut index = 0;
        let mut current = 0;
        while current < line && index < characters.len() {
            if characters[index] == '\n' {
                current += 1;
            }
            index += 1;
        }
        let mut x = 0.0;
        let mut line_start = true;
        while index < characters.len() && characters[index] != '\n' {
            let advance = Self::glyph_advance(font, characters[index], line_start, scale);
            if target_x < x + advance / 2.0 {
                break;
            }
            x += advance;
            line_start = false;
            index += 1;
        }
        index
    }

    fn move_cursor_up(&mut self, font: &Font, scale: f32) {
        let (line, x) = self.cursor_line_and_x(font, scale);
        if line == 0 {
            self.cursor = 0;
        } else {
            self.cursor = self.index_for_line_x(font, scale, line - 1, x);
        }
    }

    fn move_cursor_down(&mut self, font: &Font, scale: f32) {
        let (line, x) = self.cursor_line_and_x(font, scale);
        let lines = self.text.split('\n').count();
        if line + 1 < lines {
            self.cursor = self.index_for_line_x(font, scale, line + 1, x);
        } else {
            self.cursor = self.text.chars().count();
        }
    }

    fn put_cursor_in_view(&mut self, font: &Font, scale: f32, rect: Vec4) {
        let (line, mut x) = self.cursor_line_and_x(font, scale);
        while line < self.top_line {
            self.top_line -= 1;
        }
        while line >= self.top_line + self.line_count {
            self.top_line += 1;
        }
        let step = rect.z / 5.0;
        if step <= 0.0 {
            return;
        }
        x += rect.x + self.text_offset;
        while x < rect.x {
            self.text_offset += step;
            x += step;
        }
        while x > rect.x + rect.z {
            self.text_offset -= step;
            x -= step;
        }
    }

    fn key_step(&mut self, input: &InputManager, key: KeyCode, delay: f32) -> bool {
        if input.is_key_pressed(key) {
            self.timer = 0.0;
            return true;
        }
        input.is_key_down(key) && self.timer > delay
    }

    pub(crate) fn process_input(
        &mut self,
        frame: &mut UiFrame,
        style: &UiStyle,
        _events: &mut Vec<u32>,
    ) {
        let rect = self.base.rect(frame.window);
        let over = self.base.is_mouse_over(frame);

        if frame.input.is_mouse_button_pressed(MouseButton::Left) {
            if over {
                self.selected = true;
                if let Some(font) = frame.fonts.font(&style.font) {
                    let line_height = rect.w / self.line_count as f32;
                    let mouse = frame.input.mouse_position();
                    let row = ((rect.y + rect.w - mouse.y) / line_height).floor().max(0.0) as usize;
                    let line = (self.top_line + row)
                        .min(self.content_lines().len().saturating_sub(1));
                    let local = mouse.x - (rect.x + self.text_offset);
                    self.cursor =
                        self.index_for_line_x(font, style.text_scale, line, local.max(0.0));
                }
            } else {
                self.selected = false;
            }
        }

        if self.base.highlighted && !self.last_highlighted {
            self.selected = true;
        } else if !self.base.highlighted && self.last_highlighted {
            self.selected = false;
        }
        self.last_highlighted = self.base.highlighted;

        // Wheel scrolling works without focus as long as the pointer is
        // over the field
        let scroll = frame.input.scroll();
        if over && scroll != 0.0 && self.timer > frame.target_ups / 10.0 {
            if scroll > 0.0 {
                self.top_line = self.top_line.saturating_sub(1);
            } else {
                self.set_top_line(self.top_line + 1);
            }
            self.timer = 0.0;
        }

        if !self.selected {
            return;
        }

        let typed: String = frame.input.typed_characters().to_owned();
        let mut edited = !typed.is_empty();
        for character in typed.chars() {
            self.type_character(character);
        }

        if frame.input.is_key_pressed(KeyCode::Enter) {
            self.insert_line_break();
            edited = true;
        }

        let step_delay = frame.target_ups / 10.0;
        let length = self.text.chars().count();
        if self.key_step(frame.input, KeyCode::ArrowLeft, step_delay) && self.cursor > 0 {
            self.cursor -= 1;
            edited = true;
        }
        if self.key_step(frame.input, KeyCode::ArrowRight, step_delay) && self.cursor < length {
            self.cursor += 1;
            edited = true;
        }
        if self.key_step(frame.input, KeyCode::Backspace, step_delay) && self.cursor > 0 {
            let at = self.byte_index(self.cursor - 1);
            self.text.remove(at);
            self.cursor -= 1;
            edited = true;
        }
        if self.key_step(frame.input, KeyCode::Delete, step_delay)
            && self.cursor < self.text.chars().count()
        {
            let at = self.byte_index(self.cursor);
            self.text.remove(at);
            edited = true;
        }

        let line_delay = frame.target_ups / 6.0;
        let up = self.key_step(frame.input, KeyCode::ArrowUp, line_delay);
        let down = self.key_step(frame.input, KeyCode::ArrowDown, line_delay);
        let mut stick_x = 0.0;
        let mut stick_y = 0.0;
        if self.base.highlighted && self.timer > line_delay {
            for pad in frame.input.connected_controllers() {
                stick_x += frame.input.controller_axis(pad, Axis::LeftStickX);
                stick_y += frame.input.controller_axis(pad, Axis::LeftStickY);
            }
        }
        if let Some(font) = frame.fonts.font(&style.font) {
            if up || stick_y > 0.5 {
                self.move_cursor_up(font, style.text_scale);
                self.timer = 0.0;
                edited = true;
            } else if down || stick_y < -0.5 {
                self.move_cursor_down(font, style.text_scale);
                self.timer = 0.0;
                edited = true;
            }
            if stick_x > 0.5 && self.cursor < self.text.chars().count() {
                self.cursor += 1;
                self.timer = 0.0;
                edited = true;
            } else if stick_x < -0.5 && self.cursor > 0 {
                self.cursor -= 1;
                self.timer = 0.0;
                edited = true;
            }
            if edited {
                self.put_cursor_in_view(font, style.text_scale, rect);
            }
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

        let line_height = rect.w / self.line_count as f32;
        if self.selected {
            if let Some(cursor_texture) = &self.cursor_texture {
                let placement = renderer
                    .fonts()
                    .font(&style.font)
                    .map(|font| self.cursor_line_and_x(font, style.text_scale));
                if let Some((line, x)) = placement {
                    if line >= self.top_line && line < self.top_line + self.line_count {
                        let row = line - self.top_line;
                        let row_y = rect.y + rect.w - (row as f32 + 1.0) * line_height;
                        let cursor = self.cursor_dimensions * window;
                        let sprite = Sprite::new(
                            Vec3::new(
                                rect.x + self.text_offset + x,
                                row_y + (line_height - cursor.y) / 2.0,
                                self.base.depth + 0.1,
                            ),
                            cursor,
                            Some(cursor_texture),
                        );
                        renderer.submit_with_shader(&sprite, style.shader);
                    }
                }
            }
        }

        let lines: Vec<String> = self
            .content_lines()
            .iter()
            .map(|line| line.to_string())
            .collect();
        let last = lines.len().min(self.top_line + self.line_count);
        for (row, line) in lines[self.top_line.min(lines.len())..last].iter().enumerate() {
            let row_bounds = Vec4::new(
                rect.x,
                rect.y + rect.w - (row as f32 + 1.0) * line_height,
                rect.z,
                line_height,
            );
            renderer.submit_text(
                line,
                Vec3::new(rect.x + self.text_offset, row_bounds.y, self.base.depth),
                row_bounds,
                style.text_scale,
                style.text_color,
                &style.font,
                Alignment::None,
                Alignment::Center,
                style.shader,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_render::{FontLibrary, Glyph};

    fn fixed_font() -> Font {
        let mut font = Font::new();
        for c in ('a'..='z').chain(['.', ' ']) {
            font.add_glyph(
                c,
                Glyph {
                    dimensions: Vec2::new(8.0, 10.0),
                    bearing: Vec2::new(0.0, 10.0),
                    advance: 10.0,
                    texture: format!("glyph-{c}"),
                },
            );
        }
        font
    }

    fn area() -> UiTextArea {
        UiTextArea::new(
            Vec2::new(0.25, 0.25),
            Vec2::new(0.5, 0.5),
            Some("field"),
            Some("caret"),
            Vec2::new(0.0025, 0.05),
            3,
        )
    }

    #[test]
    fn test_content_lines_drop_trailing_break() {
        let mut area = area();
        area.set_text("one\ntwo\n");
        assert_eq!(area.content_lines(), vec!["one", "two"]);
        area.set_text("one\n\ntwo");
        assert_eq!(area.content_lines(), vec!["one", "", "two"]);
    }

    #[test]
    fn test_enter_inserts_line_break() {
        let mut input = InputManager::new();
        let mut fonts = FontLibrary::new();
        fonts.add_font("fixed", fixed_font());
        let mut area = area();
        area.set_text("ab");
        area.cursor = 1;
        area.selected = true;

        input.begin_frame();
        input.process_key_down(KeyCode::Enter);
        let mut frame = UiFrame {
            input: &mut input,
            fonts: &fonts,
            window: Vec2::new(800.0, 600.0),
            target_ups: 60.0,
        };
        let style = UiStyle {
            font: "fixed".into(),
            ..UiStyle::default()
        };
        area.process_input(&mut frame, &style, &mut Vec::new());
        assert_eq!(area.text(), "a\nb");
        assert_eq!(area.cursor(), 2);
    }

    #[test]
    fn test_vertical_cursor_motion_keeps_column() {
        let font = fixed_font();
        let mut area = area();
        area.set_text("abcdef\nxy\nlongerline");
        // Caret after the 'd' on the first line, four glyphs in
        area.cursor = 4;

        area.move_cursor_down(&font, 1.0);
        // Second line has only two glyphs; caret lands at its end
        assert_eq!(area.cursor(), 9);

        // From "lo|ngerline", two glyphs into the third line
        area.cursor = 12;
        area.move_cursor_up(&font, 1.0);
        assert_eq!(area.cursor(), 9);
        area.move_cursor_up(&font, 1.0);
        assert_eq!(area.cursor(), 2);
    }

    #[test]
    fn test_top_line_setter_refuses_out_of_range() {
        let mut area = area();
        area.set_text("one\ntwo\nthree\nfour");
        area.set_top_line(3);
        assert_eq!(area.top_line(), 3);
        area.set_top_line(4);
        assert_eq!(area.top_line(), 3);
    }

    #[test]
    fn test_view_follows_cursor_down() {
        let font = fixed_font();
        let mut area = area();
        area.set_text("a\nb\nc\nd\ne");
        area.cursor = 8; // on the fifth line
        area.put_cursor_in_view(&font, 1.0, Vec4::new(200.0, 150.0, 400.0, 300.0));
        // Five lines, three visible; line index 4 needs top_line 2
        assert_eq!(area.top_line(), 2);
    }
}
