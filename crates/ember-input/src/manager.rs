//! Input manager

use crate::event::{InputEvent, ListenerId};
use gilrs::{Axis, Button, Gilrs};
use glam::Vec2;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use winit::event::MouseButton;
use winit::keyboard::KeyCode;

#[derive(Debug, Default)]
struct ControllerState {
    buttons: HashMap<Button, (bool, bool)>,
    axes: HashMap<Axis, f32>,
}

/// Central input state for one window
///
/// All queries are O(1) and default to not-down / zero for codes that have
/// never been seen. Edges are defined against the previous frame: pressed
/// means down now and up last frame, released the reverse.
pub struct InputManager {
    keys: HashMap<KeyCode, (bool, bool)>,
    mouse_buttons: HashMap<MouseButton, (bool, bool)>,
    mouse_position: Vec2,
    last_mouse_position: Vec2,
    scroll: f32,
    mouse_enabled: bool,
    mouse_visible: bool,
    typed: String,
    controllers: HashMap<usize, ControllerState>,
    /// Disconnect callbacks may fire off the update path; removals are
    /// queued here and applied at the next `begin_frame`
    pending_disconnects: Mutex<Vec<usize>>,
    gilrs: Option<Gilrs>,
    listeners: HashSet<ListenerId>,
    next_listener: u32,
    events: Vec<InputEvent>,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    /// Create a manager with no gamepad backend; pads can still be driven
    /// through the `process_controller_*` methods
    pub fn new() -> Self {
        Self {
            keys: HashMap::new(),
            mouse_buttons: HashMap::new(),
            mouse_position: Vec2::ZERO,
            last_mouse_position: Vec2::ZERO,
            scroll: 0.0,
            mouse_enabled: true,
            mouse_visible: true,
            typed: String::new(),
            controllers: HashMap::new(),
            pending_disconnects: Mutex::new(Vec::new()),
            gilrs: None,
            listeners: HashSet::new(),
            next_listener: 0,
            events: Vec::new(),
        }
    }

    /// Create a manager polling real gamepads; degrades to keyboard and
    /// mouse only when the backend is unavailable
    pub fn with_gamepads() -> Self {
        let gilrs = Gilrs::new()
            .map_err(|e| log::warn!("gamepad backend unavailable ({e}), pads disabled"))
            .ok();
        Self {
            gilrs,
            ..Self::new()
        }
    }

    /// Roll state over to a new frame, flush deferred controller removals,
    /// and pump the gamepad backend
    pub fn begin_frame(&mut self) {
        self.events.clear();
        self.typed.clear();

        let pending: Vec<usize> = match self.pending_disconnects.lock() {
            Ok(mut queue) => queue.drain(..).collect(),
            Err(poisoned) => poisoned.into_inner().drain(..).collect(),
        };
        for index in pending {
            self.controllers.remove(&index);
        }

        for state in self.keys.values_mut() {
            state.1 = state.0;
        }
        for state in self.mouse_buttons.values_mut() {
            state.1 = state.0;
        }
        for controller in self.controllers.values_mut() {
            for state in controller.buttons.values_mut() {
                state.1 = state.0;
            }
        }
        self.last_mouse_position = self.mouse_position;
        self.scroll = 0.0;

        self.pump_gamepads();
    }

    fn pump_gamepads(&mut self) {
        let mut gilrs = self.gilrs.take();
        if let Some(backend) = &mut gilrs {
            while let Some(gilrs::Event { id, event, .. }) = backend.next_event() {
                let index: usize = id.into();
                match event {
                    gilrs::EventType::Connected => self.process_controller_connected(index),
                    gilrs::EventType::Disconnected => self.process_controller_disconnected(index),
                    gilrs::EventType::ButtonPressed(button, _) => {
                        self.process_controller_button_down(index, button)
                    }
                    gilrs::EventType::ButtonReleased(button, _) => {
                        self.process_controller_button_up(index, button)
                    }
                    gilrs::EventType::AxisChanged(axis, value, _) => {
                        self.process_controller_axis(index, axis, value)
                    }
                    _ => {}
                }
            }
        }
        self.gilrs = gilrs;
    }

    // --- Platform event intake ---

    pub fn process_key_down(&mut self, key: KeyCode) {
        self.keys.entry(key).or_default().0 = true;
        self.events.push(InputEvent::KeyPressed(key));
    }

    pub fn process_key_up(&mut self, key: KeyCode) {
        self.keys.entry(key).or_default().0 = false;
        self.events.push(InputEvent::KeyReleased(key));
    }

    pub fn process_character(&mut self, character: char) {
        self.typed.push(character);
        self.events.push(InputEvent::CharacterTyped(character));
    }

    pub fn process_mouse_button_down(&mut self, button: MouseButton) {
        if !self.mouse_enabled {
            return;
        }
        self.mouse_buttons.entry(button).or_default().0 = true;
        self.events.push(InputEvent::MouseButtonPressed(button));
    }

    pub fn process_mouse_button_up(&mut self, button: MouseButton) {
        if !self.mouse_enabled {
            return;
        }
        self.mouse_buttons.entry(button).or_default().0 = false;
        self.events.push(InputEvent::MouseButtonReleased(button));
    }

    /// Record the cursor at `position` in window coordinates with a
    /// top-left origin; stored y-up to match world orientation
    pub fn process_mouse_move(&mut self, position: Vec2, window_height: f32) {
        if !self.mouse_enabled {
            return;
        }
        self.mouse_position = Vec2::new(position.x, window_height - position.y);
        self.events.push(InputEvent::MouseMoved(self.mouse_position));
    }

    pub fn process_scroll(&mut self, delta: f32) {
        if !self.mouse_enabled {
            return;
        }
        self.scroll += delta;
        self.events.push(InputEvent::MouseScrolled(delta));
    }

    pub fn process_controller_connected(&mut self, index: usize) {
        self.controllers.entry(index).or_default();
        self.events.push(InputEvent::ControllerConnected(index));
    }

    /// Queue the controller for removal at the next frame boundary
    pub fn process_controller_disconnected(&mut self, index: usize) {
        match self.pending_disconnects.lock() {
            Ok(mut queue) => queue.push(index),
            Err(poisoned) => poisoned.into_inner().push(index),
        }
        self.events.push(InputEvent::ControllerDisconnected(index));
    }

    pub fn process_controller_button_down(&mut self, index: usize, button: Button) {
        let controller = self.controllers.entry(index).or_default();
        controller.buttons.entry(button).or_default().0 = true;
        self.events
            .push(InputEvent::ControllerButtonPressed(index, button));
    }

    pub fn process_controller_button_up(&mut self, index: usize, button: Button) {
        let controller = self.controllers.entry(index).or_default();
        controller.buttons.entry(button).or_default().0 = false;
        self.events
            .push(InputEvent::ControllerButtonReleased(index, button));
    }

    pub fn process_controller_axis(&mut self, index: usize, axis: Axis, value: f32) {
        let controller = self.controllers.entry(index).or_default();
        controller.axes.insert(axis, value);
        self.events
            .push(InputEvent::ControllerAxisMoved(index, axis, value));
    }

    // --- Queries ---

    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys.get(&key).is_some_and(|s| s.0)
    }

    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys.get(&key).is_some_and(|s| s.0 && !s.1)
    }

    pub fn is_key_released(&self, key: KeyCode) -> bool {
        self.keys.get(&key).is_some_and(|s| !s.0 && s.1)
    }

    pub fn is_mouse_button_down(&self, button: MouseButton) -> bool {
        self.mouse_buttons.get(&button).is_some_and(|s| s.0)
    }

    pub fn is_mouse_button_pressed(&self, button: MouseButton) -> bool {
        self.mouse_buttons.get(&button).is_some_and(|s| s.0 && !s.1)
    }

    pub fn is_mouse_button_released(&self, button: MouseButton) -> bool {
        self.mouse_buttons.get(&button).is_some_and(|s| !s.0 && s.1)
    }

    /// Cursor position in window space, y-up
    pub fn mouse_position(&self) -> Vec2 {
        self.mouse_position
    }

    /// Cursor movement since the last frame boundary
    pub fn mouse_movement(&self) -> Vec2 {
        self.mouse_position - self.last_mouse_position
    }

    /// Scroll accumulated this frame; reset at every frame boundary
    pub fn scroll(&self) -> f32 {
        self.scroll
    }

    pub fn is_mouse_enabled(&self) -> bool {
        self.mouse_enabled
    }

    pub fn set_mouse_enabled(&mut self, enabled: bool) {
        self.mouse_enabled = enabled;
    }

    pub fn is_mouse_visible(&self) -> bool {
        self.mouse_visible
    }

    pub fn set_mouse_visible(&mut self, visible: bool) {
        self.mouse_visible = visible;
    }

    /// Characters typed this frame, in order
    pub fn typed_characters(&self) -> &str {
        &self.typed
    }

    pub fn is_controller_connected(&self, index: usize) -> bool {
        self.controllers.contains_key(&index)
    }

    pub fn connected_controllers(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = self.controllers.keys().copied().collect();
        indices.sort_unstable();
        indices
    }

    pub fn is_controller_button_down(&self, index: usize, button: Button) -> bool {
        self.controllers
            .get(&index)
            .and_then(|c| c.buttons.get(&button))
            .is_some_and(|s| s.0)
    }

    pub fn is_controller_button_pressed(&self, index: usize, button: Button) -> bool {
        self.controllers
            .get(&index)
            .and_then(|c| c.buttons.get(&button))
            .is_some_and(|s| s.0 && !s.1)
    }

    pub fn is_controller_button_released(&self, index: usize, button: Button) -> bool {
        self.controllers
            .get(&index)
            .and_then(|c| c.buttons.get(&button))
            .is_some_and(|s| !s.0 && s.1)
    }

    pub fn controller_axis(&self, index: usize, axis: Axis) -> f32 {
        self.controllers
            .get(&index)
            .and_then(|c| c.axes.get(&axis))
            .copied()
            .unwrap_or(0.0)
    }

    /// Events collected since the last frame boundary
    pub fn events(&self) -> &[InputEvent] {
        &self.events
    }

    // --- Listener registry ---

    /// Hand out a fresh listener handle; it starts unregistered
    pub fn allocate_listener(&mut self) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        id
    }

    /// Register a listener. Registering one that is already present is a
    /// warned no-op returning false.
    pub fn add_listener(&mut self, listener: ListenerId) -> bool {
        if !self.listeners.insert(listener) {
            log::warn!("listener {listener:?} already registered");
            return false;
        }
        true
    }

    /// Unregister a listener. Removing one that is absent is a warned
    /// no-op returning false.
    pub fn remove_listener(&mut self, listener: ListenerId) -> bool {
        if !self.listeners.remove(&listener) {
            log::warn!("listener {listener:?} not registered");
            return false;
        }
        true
    }

    pub fn is_listener(&self, listener: ListenerId) -> bool {
        self.listeners.contains(&listener)
    }
}
