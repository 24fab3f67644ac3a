//! Scrollable single-selection list

use crate::component::{UiBase, UiFrame, UiStyle, SWITCH_OFF_EVENT, SWITCH_ON_EVENT, VALUE_SET_EVENT};
use crate::UiSwitch;
use ember_entity::Sprite;
use ember_input::{Axis, InputManager};
use ember_render::Renderer;
use glam::{Vec2, Vec3};

/// A list of values where exactly one row is selected at a time
///
/// Rows are toggles acting as a radio set: turning one on turns the
/// others off, and the active row cannot be clicked off. `value_count`
/// rows are visible; the wheel scrolls the view and a focused list
/// steps the selection with the left stick, wrapping at both ends.
#[derive(Debug)]
pub struct UiListBox {
    pub base: UiBase,
    pub texture: Option<String>,
    row_texture: Option<String>,
    rows: Vec<UiSwitch>,
    current: usize,
    value_count: usize,
    top_value: usize,
    timer: f32,
}

impl UiListBox {
    pub fn new(
        position: Vec2,
        dimensions: Vec2,
        texture: Option<&str>,
        row_texture: Option<&str>,
        value_count: usize,
        values: Vec<String>,
    ) -> Self {
        let mut list = Self {
            base: UiBase::new(position, dimensions),
            texture: texture.map(str::to_owned),
            row_texture: row_texture.map(str::to_owned),
            rows: Vec::new(),
            current: 0,
            value_count: value_count.max(1),
            top_value: 0,
            timer: 0.0,
        };
        list.set_values(values);
        list
    }

    /// Replace the rows; selection and view reset to the top
    pub fn set_values(&mut self, values: Vec<String>) {
        self.rows = values
            .into_iter()
            .enumerate()
            .map(|(index, value)| {
                let mut row =
                    UiSwitch::new(Vec2::ZERO, Vec2::ZERO, self.row_texture.as_deref(), &value);
                row.base.id = index as u32;
                row.base.depth = self.base.depth + 0.1;
                row.set_on(index == 0);
                row
            })
            .collect();
        self.current = 0;
        self.top_value = 0;
        self.layout();
    }

    /// Recompute row placement from the list's rect and scroll position
    fn layout(&mut self) {
        let position = self.base.position;
        let dimensions = self.base.dimensions;
        let row_height = dimensions.y / self.value_count as f32;
        let top = self.top_value as f32;
        for (index, row) in self.rows.iter_mut().enumerate() {
            let slot = index as f32 - top;
            row.base.position = Vec2::new(
                position.x,
                position.y + dimensions.y - (slot + 1.0) * row_height,
            );
            row.base.dimensions = Vec2::new(dimensions.x, row_height);
        }
    }

    fn visible_range(&self) -> std::ops::Range<usize> {
        self.top_value..self.rows.len().min(self.top_value + self.value_count)
    }

    fn apply_selection(&mut self, index: usize) {
        self.current = index;
        for (i, row) in self.rows.iter_mut().enumerate() {
            row.set_on(i == index);
        }
    }

    pub fn value(&self) -> &str {
        self.rows.get(self.current).map_or("", |row| &row.text)
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Jump the selection; indices past the end are refused
    pub fn set_current_index(&mut self, index: usize) {
        if index < self.rows.len() {
            self.apply_selection(index);
        }
    }

    pub fn top_value(&self) -> usize {
        self.top_value
    }

    /// Scroll the view; positions that would run past the last row are
    /// refused
    pub fn set_top_value(&mut self, top: usize) {
        if top + self.value_count <= self.rows.len().max(self.value_count) {
            self.top_value = top;
            self.layout();
        }
    }

    pub fn select_previous(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        let index = if self.current >= 1 {
            self.current - 1
        } else {
            self.rows.len() - 1
        };
        self.apply_selection(index);
        self.show_current();
    }

    pub fn select_next(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        self.apply_selection((self.current + 1) % self.rows.len());
        self.show_current();
    }

    fn show_current(&mut self) {
        let limit = self.rows.len().saturating_sub(self.value_count);
        self.top_value = self.current.min(limit);
        self.layout();
    }

    pub(crate) fn set_enabled(&mut self, enabled: bool, input: &mut InputManager) {
        self.base.set_enabled(enabled, input);
        for row in &mut self.rows {
            row.base.set_enabled(enabled, input);
        }
    }

    pub(crate) fn set_visible(&mut self, visible: bool, input: &mut InputManager) {
        self.base.set_visible(visible, input);
        for row in &mut self.rows {
            row.base.set_visible(visible, input);
        }
    }

    pub(crate) fn process_input(&mut self, frame: &mut UiFrame, events: &mut Vec<u32>) {
        let mut chosen = None;
        for index in self.visible_range() {
            let mut child = Vec::new();
            self.rows[index].process_input(frame, &mut child);
            if child.contains(&SWITCH_ON_EVENT) {
                chosen = Some(index);
            } else if child.contains(&SWITCH_OFF_EVENT) && index == self.current {
                // The active row cannot be deselected
                self.rows[index].set_on(true);
            }
        }
        if let Some(index) = chosen {
            if index != self.current {
                self.apply_selection(index);
                events.push(VALUE_SET_EVENT);
            } else {
                self.rows[index].set_on(true);
            }
        }

        let scroll = frame.input.scroll();
        if self.base.is_mouse_over(frame)
            && scroll != 0.0
            && self.timer > frame.target_ups / 10.0
        {
            if scroll > 0.0 {
                if let Some(top) = self.top_value.checked_sub(1) {
                    self.set_top_value(top);
                }
            } else {
                self.set_top_value(self.top_value + 1);
            }
            self.timer = 0.0;
        }

        if self.base.highlighted && self.timer > frame.target_ups / 6.0 {
            for pad in frame.input.connected_controllers() {
                let stick = frame.input.controller_axis(pad, Axis::LeftStickY);
                if stick > 0.5 {
                    self.select_previous();
                    events.push(VALUE_SET_EVENT);
                    self.timer = 0.0;
                } else if stick < -0.5 {
                    self.select_next();
                    events.push(VALUE_SET_EVENT);
                    self.timer = 0.0;
                }
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
        for index in self.visible_range() {
            self.rows[index].draw(renderer, style, window);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_input::{InputManager, MouseButton};
    use ember_render::FontLibrary;

    fn list() -> UiListBox {
        UiListBox::new(
            Vec2::new(0.25, 0.25),
            Vec2::new(0.5, 0.5),
            Some("list"),
            Some("row"),
            3,
            vec!["easy".into(), "normal".into(), "hard".into(), "brutal".into()],
        )
    }

    fn frame<'a>(input: &'a mut InputManager, fonts: &'a FontLibrary) -> UiFrame<'a> {
        UiFrame {
            input,
            fonts,
            window: Vec2::new(800.0, 600.0),
            target_ups: 60.0,
        }
    }

    #[test]
    fn test_selection_wraps_both_ways() {
        let mut list = list();
        assert_eq!(list.current_index(), 0);
        list.select_previous();
        assert_eq!(list.current_index(), 3);
        list.select_next();
        assert_eq!(list.current_index(), 0);
    }

    #[test]
    fn test_rows_act_as_radio_set() {
        let mut input = InputManager::new();
        let fonts = FontLibrary::new();
        let mut list = list();

        // Third visible row occupies (200, 150)..(600, 250) in pixels
        input.begin_frame();
        input.process_mouse_move(Vec2::new(300.0, 400.0), 600.0);
        input.process_mouse_button_down(MouseButton::Left);
        let mut events = Vec::new();
        list.process_input(&mut frame(&mut input, &fonts), &mut events);
        assert_eq!(events, vec![VALUE_SET_EVENT]);
        assert_eq!(list.current_index(), 2);
        assert_eq!(list.value(), "hard");
        assert!(!list.rows[0].is_on());
        assert!(list.rows[2].is_on());
    }

    #[test]
    fn test_active_row_cannot_be_clicked_off() {
        let mut input = InputManager::new();
        let fonts = FontLibrary::new();
        let mut list = list();

        // Top row occupies (200, 350)..(600, 450) in pixels
        input.begin_frame();
        input.process_mouse_move(Vec2::new(300.0, 200.0), 600.0);
        input.process_mouse_button_down(MouseButton::Left);
        let mut events = Vec::new();
        list.process_input(&mut frame(&mut input, &fonts), &mut events);
        assert!(events.is_empty());
        assert_eq!(list.current_index(), 0);
        assert!(list.rows[0].is_on());
    }

    #[test]
    fn test_scroll_cannot_run_past_last_row() {
        let mut list = list();
        list.set_top_value(1);
        assert_eq!(list.top_value(), 1);
        list.set_top_value(2);
        assert_eq!(list.top_value(), 1);
    }

    #[test]
    fn test_stick_selection_pulls_view_along() {
        let mut input = InputManager::new();
        let fonts = FontLibrary::new();
        let mut list = list();
        list.base.highlighted = true;
        input.process_controller_connected(0);
        input.process_controller_axis(0, Axis::LeftStickY, -1.0);

        for _ in 0..3 {
            list.update(11.0, 60.0);
            let mut events = Vec::new();
            list.process_input(&mut frame(&mut input, &fonts), &mut events);
            assert_eq!(events, vec![VALUE_SET_EVENT]);
        }
        assert_eq!(list.current_index(), 3);
        // Four rows, three visible; the view bottoms out at row 1
        assert_eq!(list.top_value(), 1);
    }
}
