//! Control ownership, focus movement, and event bubbling

use crate::component::{UiControl, UiEvent, UiFrame, UiStyle};
use ember_entity::Sprite;
use ember_input::{Button, InputManager};
use ember_render::Renderer;
use glam::{Vec2, Vec3};

#[derive(Clone, Copy)]
enum Direction {
    Left,
    Right,
    Below,
    Above,
}

/// A set of controls sharing style, input routing, and gamepad focus
///
/// Components get sequential ids as they are added; the first one added
/// is where focus lands when a D-pad press arrives with nothing
/// highlighted. Focus then travels along the neighbour links wired by
/// the caller. Events come back as values tagged with the group and
/// component ids.
pub struct UiGroup {
    pub id: u32,
    pub style: UiStyle,
    pub highlight_texture: Option<String>,
    /// Extra pixels around the focused control's rect
    pub highlight_margins: Vec2,
    components: Vec<UiControl>,
    next_id: u32,
    initial: Option<u32>,
    controller_active: bool,
    enabled: bool,
    visible: bool,
    initialized: bool,
    last_window: Vec2,
}

impl UiGroup {
    pub fn new(id: u32, style: UiStyle) -> Self {
        Self {
            id,
            style,
            highlight_texture: None,
            highlight_margins: Vec2::ZERO,
            components: Vec::new(),
            next_id: 0,
            initial: None,
            controller_active: false,
            enabled: true,
            visible: true,
            initialized: false,
            last_window: Vec2::ZERO,
        }
    }

    /// Add a control; it takes the next id, inherits the group's enabled
    /// and visible state, and becomes the initial focus target if it is
    /// the first
    pub fn add_component(&mut self, mut component: UiControl) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        component.base_mut().id = id;
        component.base_mut().enabled = self.enabled;
        component.base_mut().visible = self.visible;
        if self.initial.is_none() {
            self.initial = Some(id);
        }
        self.components.push(component);
        id
    }

    pub fn component(&self, id: u32) -> Option<&UiControl> {
        self.components.iter().find(|c| c.base().id == id)
    }

    pub fn component_mut(&mut self, id: u32) -> Option<&mut UiControl> {
        self.components.iter_mut().find(|c| c.base().id == id)
    }

    pub fn set_initial_component(&mut self, id: u32) {
        self.initial = Some(id);
    }

    /// Make two controls horizontal neighbours of each other
    pub fn link_horizontal(&mut self, left_id: u32, right_id: u32) {
        if let Some(left) = self.component_mut(left_id) {
            left.base_mut().neighbor_right = Some(right_id);
        }
        if let Some(right) = self.component_mut(right_id) {
            right.base_mut().neighbor_left = Some(left_id);
        }
    }

    /// Make two controls vertical neighbours of each other
    pub fn link_vertical(&mut self, lower_id: u32, upper_id: u32) {
        if let Some(lower) = self.component_mut(lower_id) {
            lower.base_mut().neighbor_above = Some(upper_id);
        }
        if let Some(upper) = self.component_mut(upper_id) {
            upper.base_mut().neighbor_below = Some(lower_id);
        }
    }

    /// Register every component with the input manager. Initializing an
    /// already-initialized group is a warned no-op returning false.
    pub fn initialize(&mut self, input: &mut InputManager) -> bool {
        if self.initialized {
            log::warn!("UI group {} already initialized", self.id);
            return false;
        }
        let enabled = self.enabled;
        for component in &mut self.components {
            component.base_mut().enabled = false;
            component.set_enabled(enabled, input);
        }
        self.initialized = true;
        true
    }

    /// Disable and scrub every component. Destroying a group that was
    /// never initialized is a warned no-op returning false.
    pub fn destroy(&mut self, input: &mut InputManager) -> bool {
        if !self.initialized {
            log::warn!("UI group {} not initialized", self.id);
            return false;
        }
        for component in &mut self.components {
            component.base_mut().highlighted = false;
            component.destroy(input);
        }
        self.next_id = 0;
        self.initialized = false;
        true
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool, input: &mut InputManager) {
        self.enabled = enabled;
        for component in &mut self.components {
            component.set_enabled(enabled, input);
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool, input: &mut InputManager) {
        self.visible = visible;
        for component in &mut self.components {
            component.set_visible(visible, input);
        }
    }

    pub fn highlighted_component(&self) -> Option<u32> {
        self.components
            .iter()
            .find(|c| c.base().highlighted)
            .map(|c| c.base().id)
    }

    /// Move focus to one control, clearing it from the others
    pub fn highlight(&mut self, id: u32) {
        for component in &mut self.components {
            let base = component.base_mut();
            base.highlighted = base.id == id;
        }
    }

    fn move_focus(&mut self, direction: Direction) {
        let focused = self.components.iter().find(|c| c.base().highlighted);
        let target = match focused {
            None => self.initial,
            Some(component) => {
                let base = component.base();
                let neighbor = match direction {
                    Direction::Left => base.neighbor_left,
                    Direction::Right => base.neighbor_right,
                    Direction::Below => base.neighbor_below,
                    Direction::Above => base.neighbor_above,
                };
                Some(neighbor.unwrap_or(base.id))
            }
        };
        if let Some(id) = target {
            self.highlight(id);
        }
    }

    /// Route input to every enabled component and collect their events,
    /// then apply D-pad focus movement
    pub fn process_input(&mut self, frame: &mut UiFrame) -> Vec<UiEvent> {
        if !self.enabled {
            return Vec::new();
        }
        self.controller_active = !frame.input.connected_controllers().is_empty();

        let mut out = Vec::new();
        for component in &mut self.components {
            if !component.base().enabled {
                continue;
            }
            let mut events = Vec::new();
            component.process_input(frame, &self.style, &mut events);
            let component_id = component.base().id;
            out.extend(events.into_iter().map(|event| UiEvent {
                group: self.id,
                component: component_id,
                event,
            }));
        }

        if self.controller_active {
            const MOVES: [(Button, Direction); 4] = [
                (Button::DPadLeft, Direction::Left),
                (Button::DPadRight, Direction::Right),
                (Button::DPadDown, Direction::Below),
                (Button::DPadUp, Direction::Above),
            ];
            for pad in frame.input.connected_controllers() {
                for (button, direction) in MOVES {
                    if frame.input.is_controller_button_pressed(pad, button) {
                        self.move_focus(direction);
                    }
                }
            }
        }
        out
    }

    /// Advance component timers and rescale pixel-space scroll offsets
    /// when the window changes
    pub fn update(&mut self, time_step: f32, window: Vec2, target_ups: f32) {
        if self.last_window == Vec2::ZERO {
            self.last_window = window;
        }
        if window != self.last_window {
            let ratio = window.x / self.last_window.x;
            for component in &mut self.components {
                match component {
                    UiControl::TextBox(c) => c.rescale_offset(ratio),
                    UiControl::PasswordBox(c) => c.text_box.rescale_offset(ratio),
                    UiControl::TextArea(c) => c.rescale_offset(ratio),
                    _ => {}
                }
            }
            self.last_window = window;
        }
        for component in &mut self.components {
            component.update(time_step, target_ups);
        }
    }

    /// Draw every visible component, plus the focus indicator when a
    /// controller is connected. With nothing focused the indicator is
    /// still submitted as a zero-size quad.
    pub fn draw(&self, renderer: &mut Renderer, window: Vec2) {
        if !self.visible {
            return;
        }
        for component in &self.components {
            if component.base().visible {
                component.draw(renderer, &self.style, window);
            }
        }
        if !self.controller_active {
            return;
        }
        let Some(texture) = &self.highlight_texture else {
            return;
        };
        let sprite = match self.components.iter().find(|c| c.base().highlighted) {
            Some(component) => {
                let rect = component.base().rect(window);
                let margins = self.highlight_margins;
                Sprite::new(
                    Vec3::new(
                        rect.x - margins.x,
                        rect.y - margins.y,
                        component.base().depth - 0.1,
                    ),
                    Vec2::new(rect.z + 2.0 * margins.x, rect.w + 2.0 * margins.y),
                    Some(texture),
                )
            }
            None => Sprite::new(Vec3::ZERO, Vec2::ZERO, Some(texture)),
        };
        renderer.submit_with_shader(&sprite, self.style.shader);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::CLICKED_EVENT;
    use crate::UiButton;
    use ember_input::MouseButton;
    use ember_render::{FontLibrary, RecordingBackend};

    fn button(x: f32) -> UiControl {
        UiControl::Button(UiButton::new(
            Vec2::new(x, 0.4),
            Vec2::new(0.2, 0.2),
            Some("button"),
            "",
        ))
    }

    fn frame<'a>(input: &'a mut InputManager, fonts: &'a FontLibrary) -> UiFrame<'a> {
        UiFrame {
            input,
            fonts,
            window: Vec2::new(800.0, 600.0),
            target_ups: 60.0,
        }
    }

    fn press_dpad(input: &mut InputManager, button: Button) {
        input.begin_frame();
        input.process_controller_button_down(0, button);
    }

    fn release_dpad(input: &mut InputManager, button: Button) {
        input.begin_frame();
        input.process_controller_button_up(0, button);
    }

    #[test]
    fn test_ids_are_sequential_and_first_is_initial() {
        let mut group = UiGroup::new(0, UiStyle::default());
        let a = group.add_component(button(0.1));
        let b = group.add_component(button(0.5));
        assert_eq!(a, 0);
        assert_eq!(b, 1);
        assert_eq!(group.initial, Some(a));
    }

    #[test]
    fn test_first_dpad_press_lands_on_initial() {
        let mut input = InputManager::new();
        let fonts = FontLibrary::new();
        let mut group = UiGroup::new(0, UiStyle::default());
        let a = group.add_component(button(0.1));
        group.add_component(button(0.5));
        input.process_controller_connected(0);

        press_dpad(&mut input, Button::DPadRight);
        group.process_input(&mut frame(&mut input, &fonts));
        assert_eq!(group.highlighted_component(), Some(a));
    }

    #[test]
    fn test_focus_travels_linked_neighbours_and_back() {
        let mut input = InputManager::new();
        let fonts = FontLibrary::new();
        let mut group = UiGroup::new(0, UiStyle::default());
        let a = group.add_component(button(0.1));
        let b = group.add_component(button(0.5));
        group.link_horizontal(a, b);
        group.highlight(a);
        input.process_controller_connected(0);

        press_dpad(&mut input, Button::DPadRight);
        group.process_input(&mut frame(&mut input, &fonts));
        assert_eq!(group.highlighted_component(), Some(b));

        release_dpad(&mut input, Button::DPadRight);
        press_dpad(&mut input, Button::DPadLeft);
        group.process_input(&mut frame(&mut input, &fonts));
        assert_eq!(group.highlighted_component(), Some(a));
    }

    #[test]
    fn test_focus_stays_put_without_a_neighbour() {
        let mut input = InputManager::new();
        let fonts = FontLibrary::new();
        let mut group = UiGroup::new(0, UiStyle::default());
        let a = group.add_component(button(0.1));
        group.highlight(a);
        input.process_controller_connected(0);

        press_dpad(&mut input, Button::DPadUp);
        group.process_input(&mut frame(&mut input, &fonts));
        assert_eq!(group.highlighted_component(), Some(a));
    }

    #[test]
    fn test_events_carry_group_and_component_ids() {
        let mut input = InputManager::new();
        let fonts = FontLibrary::new();
        let mut group = UiGroup::new(7, UiStyle::default());
        group.add_component(button(0.1));
        let b = group.add_component(button(0.5));

        // Click inside the second button at (480, 300) from the top
        input.begin_frame();
        input.process_mouse_move(Vec2::new(480.0, 300.0), 600.0);
        group.process_input(&mut frame(&mut input, &fonts));
        input.begin_frame();
        input.process_mouse_button_down(MouseButton::Left);
        group.process_input(&mut frame(&mut input, &fonts));
        input.begin_frame();
        input.process_mouse_button_up(MouseButton::Left);
        let events = group.process_input(&mut frame(&mut input, &fonts));
        assert!(events.contains(&UiEvent {
            group: 7,
            component: b,
            event: CLICKED_EVENT
        }));
    }

    #[test]
    fn test_disabled_group_emits_nothing() {
        let mut input = InputManager::new();
        let fonts = FontLibrary::new();
        let mut group = UiGroup::new(0, UiStyle::default());
        group.add_component(button(0.1));
        group.set_enabled(false, &mut input);

        input.begin_frame();
        input.process_mouse_move(Vec2::new(160.0, 300.0), 600.0);
        let events = group.process_input(&mut frame(&mut input, &fonts));
        assert!(events.is_empty());
    }

    #[test]
    fn test_initialize_and_destroy_are_idempotent() {
        let mut input = InputManager::new();
        let mut group = UiGroup::new(0, UiStyle::default());
        group.add_component(button(0.1));
        assert!(group.initialize(&mut input));
        assert!(!group.initialize(&mut input));
        assert!(group.destroy(&mut input));
        assert!(!group.destroy(&mut input));
    }

    #[test]
    fn test_destroy_resets_the_id_counter() {
        let mut input = InputManager::new();
        let mut group = UiGroup::new(0, UiStyle::default());
        group.add_component(button(0.1));
        group.add_component(button(0.5));
        group.initialize(&mut input);
        group.destroy(&mut input);
        assert_eq!(group.next_id, 0);
    }

    #[test]
    fn test_resting_cursor_does_not_duplicate_dpad_focus() {
        let mut input = InputManager::new();
        let fonts = FontLibrary::new();
        let mut group = UiGroup::new(0, UiStyle::default());
        let a = group.add_component(button(0.1));
        let b = group.add_component(button(0.5));
        group.link_horizontal(a, b);
        input.process_controller_connected(0);

        // The cursor comes to rest over the first button and stays there
        input.begin_frame();
        input.process_mouse_move(Vec2::new(160.0, 300.0), 600.0);
        group.process_input(&mut frame(&mut input, &fonts));

        // First press lands on the initial component, the second moves on
        press_dpad(&mut input, Button::DPadRight);
        group.process_input(&mut frame(&mut input, &fonts));
        release_dpad(&mut input, Button::DPadRight);
        group.process_input(&mut frame(&mut input, &fonts));
        press_dpad(&mut input, Button::DPadRight);
        group.process_input(&mut frame(&mut input, &fonts));

        let highlighted: Vec<u32> = group
            .components
            .iter()
            .filter(|c| c.base().highlighted)
            .map(|c| c.base().id)
            .collect();
        assert_eq!(highlighted, vec![b]);

        // Accept clicks only the focused button, not the hovered one
        input.begin_frame();
        input.process_controller_button_down(0, Button::South);
        group.process_input(&mut frame(&mut input, &fonts));
        input.begin_frame();
        input.process_controller_button_up(0, Button::South);
        let events = group.process_input(&mut frame(&mut input, &fonts));
        let clicks: Vec<u32> = events
            .iter()
            .filter(|e| e.event == CLICKED_EVENT)
            .map(|e| e.component)
            .collect();
        assert_eq!(clicks, vec![b]);
    }

    #[test]
    fn test_focus_indicator_drawn_when_controller_present() {
        let mut input = InputManager::new();
        let fonts = FontLibrary::new();
        let mut group = UiGroup::new(0, UiStyle::default());
        group.highlight_texture = Some("highlight".into());
        let a = group.add_component(button(0.1));
        group.highlight(a);
        input.process_controller_connected(0);

        input.begin_frame();
        group.process_input(&mut frame(&mut input, &fonts));

        let backend = RecordingBackend::new();
        let mut renderer = Renderer::new(Box::new(backend.clone()));
        renderer.begin();
        group.draw(&mut renderer, Vec2::new(800.0, 600.0));
        renderer.end();
        assert!(backend
            .calls()
            .iter()
            .any(|call| call.texture.as_deref() == Some("highlight")));
    }

    #[test]
    fn test_focus_indicator_collapses_when_nothing_is_focused() {
        let mut input = InputManager::new();
        let fonts = FontLibrary::new();
        let mut group = UiGroup::new(0, UiStyle::default());
        group.highlight_texture = Some("highlight".into());
        group.add_component(button(0.1));
        input.process_controller_connected(0);

        input.begin_frame();
        group.process_input(&mut frame(&mut input, &fonts));
        assert_eq!(group.highlighted_component(), None);

        let backend = RecordingBackend::new();
        let mut renderer = Renderer::new(Box::new(backend.clone()));
        renderer.begin();
        group.draw(&mut renderer, Vec2::new(800.0, 600.0));
        renderer.end();
        let calls = backend.calls();
        let indicator = calls
            .iter()
            .find(|call| call.texture.as_deref() == Some("highlight"))
            .unwrap();
        // All four corners of a zero-size quad land on the same point
        assert_eq!(indicator.vertices[0].position, indicator.vertices[2].position);
    }
}
