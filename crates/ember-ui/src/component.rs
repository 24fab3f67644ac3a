//! Shared control state, the control sum type, and UI events

use crate::{
    UiButton, UiCarousel, UiLabel, UiListBox, UiPasswordBox, UiSlider, UiSwitch, UiTextArea,
    UiTextBox,
};
use ember_core::Color;
use ember_input::{InputManager, ListenerId};
use ember_render::{FontLibrary, Renderer, ShaderId, DEFAULT_SHADER};
use glam::{Vec2, Vec4};

/// A control stopped being hovered
pub const UNHIGHLIGHTED_EVENT: u32 = 0;
/// A control became hovered or focused
pub const HIGHLIGHTED_EVENT: u32 = 1;
/// A press on a control was let go
pub const UNSELECTED_EVENT: u32 = 2;
/// A control was pressed down
pub const SELECTED_EVENT: u32 = 3;
/// A full press-and-release landed on a control
pub const CLICKED_EVENT: u32 = 4;
/// A switch turned off
pub const SWITCH_OFF_EVENT: u32 = 5;
/// A switch turned on
pub const SWITCH_ON_EVENT: u32 = 6;
/// A slider, carousel, or list box changed value
pub const VALUE_SET_EVENT: u32 = 7;
/// Enter was pressed in a text box
pub const TEXT_ENTERED_EVENT: u32 = 8;

/// One control event bubbled out of a group
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UiEvent {
    pub group: u32,
    pub component: u32,
    pub event: u32,
}

/// Per-frame context handed to controls while they process input
pub struct UiFrame<'a> {
    pub input: &'a mut InputManager,
    pub fonts: &'a FontLibrary,
    /// Window dimensions in pixels
    pub window: Vec2,
    /// Updates per second the application targets; drives repeat gates
    pub target_ups: f32,
}

/// Text and shader styling shared by every control in a group
#[derive(Clone, Debug)]
pub struct UiStyle {
    pub shader: ShaderId,
    pub font: String,
    pub text_scale: f32,
    pub text_color: Color,
}

impl Default for UiStyle {
    fn default() -> Self {
        Self {
            shader: DEFAULT_SHADER,
            font: String::new(),
            text_scale: 1.0,
            text_color: Color::WHITE,
        }
    }
}

/// State every control carries
///
/// `position` and `dimensions` are fractions of the window; pixel rects
/// are derived per frame. Neighbour links are component ids within the
/// owning group and drive gamepad focus movement.
#[derive(Debug, Default)]
pub struct UiBase {
    pub id: u32,
    pub position: Vec2,
    pub dimensions: Vec2,
    pub depth: f32,
    pub enabled: bool,
    pub visible: bool,
    pub highlighted: bool,
    pub neighbor_left: Option<u32>,
    pub neighbor_right: Option<u32>,
    pub neighbor_below: Option<u32>,
    pub neighbor_above: Option<u32>,
    listener: Option<ListenerId>,
}

impl UiBase {
    pub fn new(position: Vec2, dimensions: Vec2) -> Self {
        Self {
            position,
            dimensions,
            enabled: true,
            visible: true,
            ..Self::default()
        }
    }

    /// Pixel rect `(x, y, w, h)` for the given window dimensions
    pub fn rect(&self, window: Vec2) -> Vec4 {
        Vec4::new(
            self.position.x * window.x,
            self.position.y * window.y,
            self.dimensions.x * window.x,
            self.dimensions.y * window.y,
        )
    }

    pub fn is_mouse_over(&self, frame: &UiFrame) -> bool {
        let rect = self.rect(frame.window);
        let mouse = frame.input.mouse_position();
        mouse.x >= rect.x
            && mouse.x <= rect.x + rect.z
            && mouse.y >= rect.y
            && mouse.y <= rect.y + rect.w
    }

    /// Enable or disable the control, keeping its listener registration
    /// in step
    pub fn set_enabled(&mut self, enabled: bool, input: &mut InputManager) {
        if self.enabled && !enabled {
            if let Some(listener) = self.listener {
                input.remove_listener(listener);
            }
        } else if !self.enabled && enabled {
            let listener = match self.listener {
                Some(listener) => listener,
                None => {
                    let listener = input.allocate_listener();
                    self.listener = Some(listener);
                    listener
                }
            };
            input.add_listener(listener);
        }
        self.enabled = enabled;
    }

    /// Hiding a control also disables it; showing it does not re-enable
    pub fn set_visible(&mut self, visible: bool, input: &mut InputManager) {
        if self.visible && !visible {
            self.set_enabled(false, input);
        }
        self.visible = visible;
    }
}

/// Any control a group can hold
#[derive(Debug)]
pub enum UiControl {
    Label(UiLabel),
    Button(UiButton),
    Switch(UiSwitch),
    Slider(UiSlider),
    TextBox(UiTextBox),
    PasswordBox(UiPasswordBox),
    TextArea(UiTextArea),
    Carousel(UiCarousel),
    ListBox(UiListBox),
}

impl UiControl {
    pub fn base(&self) -> &UiBase {
        match self {
            Self::Label(c) => &c.base,
            Self::Button(c) => &c.base,
            Self::Switch(c) => &c.base,
            Self::Slider(c) => &c.base,
            Self::TextBox(c) => &c.base,
            Self::PasswordBox(c) => &c.text_box.base,
            Self::TextArea(c) => &c.base,
            Self::Carousel(c) => &c.base,
            Self::ListBox(c) => &c.base,
        }
    }

    pub fn base_mut(&mut self) -> &mut UiBase {
        match self {
            Self::Label(c) => &mut c.base,
            Self::Button(c) => &mut c.base,
            Self::Switch(c) => &mut c.base,
            Self::Slider(c) => &mut c.base,
            Self::TextBox(c) => &mut c.base,
            Self::PasswordBox(c) => &mut c.text_box.base,
            Self::TextArea(c) => &mut c.base,
            Self::Carousel(c) => &mut c.base,
            Self::ListBox(c) => &mut c.base,
        }
    }

    pub(crate) fn process_input(
        &mut self,
        frame: &mut UiFrame,
        style: &UiStyle,
        events: &mut Vec<u32>,
    ) {
        match self {
            Self::Label(_) => {}
            Self::Button(c) => c.process_input(frame, events),
            Self::Switch(c) => c.process_input(frame, events),
            Self::Slider(c) => c.process_input(frame, events),
            Self::TextBox(c) => c.process_input(frame, style, events),
            Self::PasswordBox(c) => c.text_box.process_input(frame, style, events),
            Self::TextArea(c) => c.process_input(frame, style, events),
            Self::Carousel(c) => c.process_input(frame, events),
            Self::ListBox(c) => c.process_input(frame, events),
        }
    }

    pub(crate) fn update(&mut self, time_step: f32, target_ups: f32) {
        match self {
            Self::TextBox(c) => c.update(time_step, target_ups),
            Self::PasswordBox(c) => c.text_box.update(time_step, target_ups),
            Self::TextArea(c) => c.update(time_step, target_ups),
            Self::Carousel(c) => c.update(time_step, target_ups),
            Self::ListBox(c) => c.update(time_step, target_ups),
            _ => {}
        }
    }

    pub(crate) fn draw(&self, renderer: &mut Renderer, style: &UiStyle, window: Vec2) {
        match self {
            Self::Label(c) => c.draw(renderer, style, window),
            Self::Button(c) => c.draw(renderer, style, window),
            Self::Switch(c) => c.draw(renderer, style, window),
            Self::Slider(c) => c.draw(renderer, style, window),
            Self::TextBox(c) => c.draw(renderer, style, window),
            Self::PasswordBox(c) => c.text_box.draw(renderer, style, window),
            Self::TextArea(c) => c.draw(renderer, style, window),
            Self::Carousel(c) => c.draw(renderer, style, window),
            Self::ListBox(c) => c.draw(renderer, style, window),
        }
    }

    pub fn set_enabled(&mut self, enabled: bool, input: &mut InputManager) {
        match self {
            Self::Carousel(c) => c.set_enabled(enabled, input),
            Self::ListBox(c) => c.set_enabled(enabled, input),
            _ => self.base_mut().set_enabled(enabled, input),
        }
    }

    pub fn set_visible(&mut self, visible: bool, input: &mut InputManager) {
        match self {
            Self::Carousel(c) => c.set_visible(visible, input),
            Self::ListBox(c) => c.set_visible(visible, input),
            _ => self.base_mut().set_visible(visible, input),
        }
    }

    /// Tear the control down; sensitive controls scrub their contents
    pub(crate) fn destroy(&mut self, input: &mut InputManager) {
        if let Self::PasswordBox(c) = self {
            c.scrub();
        }
        self.set_enabled(false, input);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_scales_with_window() {
        let base = UiBase::new(Vec2::new(0.25, 0.5), Vec2::new(0.5, 0.25));
        let rect = base.rect(Vec2::new(800.0, 600.0));
        assert_eq!(rect, Vec4::new(200.0, 300.0, 400.0, 150.0));
    }

    #[test]
    fn test_enable_toggles_listener_registration() {
        let mut input = InputManager::new();
        let mut base = UiBase::new(Vec2::ZERO, Vec2::ONE);
        base.enabled = false;
        base.set_enabled(true, &mut input);
        let listener = base.listener.unwrap();
        assert!(input.is_listener(listener));
        base.set_enabled(false, &mut input);
        assert!(!input.is_listener(listener));
    }

    #[test]
    fn test_hiding_disables() {
        let mut input = InputManager::new();
        let mut base = UiBase::new(Vec2::ZERO, Vec2::ONE);
        base.set_visible(false, &mut input);
        assert!(!base.visible);
        assert!(!base.enabled);
        base.set_visible(true, &mut input);
        assert!(base.visible);
        assert!(!base.enabled);
    }
}
