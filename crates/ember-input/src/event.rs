//! Discrete input events and listener handles

use gilrs::{Axis, Button};
use glam::Vec2;
use winit::event::MouseButton;
use winit::keyboard::KeyCode;

/// Opaque handle identifying a registered input listener
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u32);

/// A discrete input occurrence collected during one frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    KeyPressed(KeyCode),
    KeyReleased(KeyCode),
    CharacterTyped(char),
    MouseButtonPressed(MouseButton),
    MouseButtonReleased(MouseButton),
    MouseMoved(Vec2),
    MouseScrolled(f32),
    ControllerConnected(usize),
    ControllerDisconnected(usize),
    ControllerButtonPressed(usize, Button),
    ControllerButtonReleased(usize, Button),
    ControllerAxisMoved(usize, Axis, f32),
}
