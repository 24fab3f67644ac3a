//! The seam to the windowing system

use crate::WindowSettings;
use ember_input::InputManager;

/// Pumps OS events into the input manager and presents frames
pub trait Platform {
    /// Forward pending window events; returning false asks the
    /// application to shut down
    fn pump(&mut self, input: &mut InputManager, window: &WindowSettings) -> bool;

    /// Show the finished frame
    fn present(&mut self);
}

/// Platform with no window that runs a fixed number of frames
///
/// Useful for tests and tools; input can still be driven through the
/// manager's `process_*` methods.
pub struct HeadlessPlatform {
    frames_left: u64,
}

impl HeadlessPlatform {
    pub fn new(frames: u64) -> Self {
        Self {
            frames_left: frames,
        }
    }
}

impl Platform for HeadlessPlatform {
    fn pump(&mut self, _input: &mut InputManager, _window: &WindowSettings) -> bool {
        if self.frames_left == 0 {
            return false;
        }
        self.frames_left -= 1;
        true
    }

    fn present(&mut self) {}
}
