//! Ember Input - Edge-triggered input state
//!
//! Tracks a (current, previous) pair per key, mouse button, and gamepad
//! button so scenes can ask "down", "just pressed", or "just released" in
//! O(1) at any point in the frame. `begin_frame` rolls current state into
//! previous, pumps the gamepad backend, and drains the frame's discrete
//! events for registered listeners.
//!
//! Key and mouse-button codes are winit's; gamepad codes are gilrs's.

mod event;
mod manager;

pub use event::{InputEvent, ListenerId};
pub use manager::InputManager;

pub use gilrs::{Axis, Button};
pub use winit::event::MouseButton;
pub use winit::keyboard::KeyCode;
