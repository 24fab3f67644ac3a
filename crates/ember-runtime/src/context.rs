//! Shared application state handed to scene hooks

use ember_audio::AudioPlayer;
use ember_input::InputManager;
use ember_render::{Camera, RasterBackend, Renderer};
use glam::Vec2;

/// Window configuration; `dimensions` is in pixels
#[derive(Clone, Debug)]
pub struct WindowSettings {
    pub title: String,
    pub dimensions: Vec2,
    pub fullscreen: bool,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "Ember".to_owned(),
            dimensions: Vec2::new(800.0, 600.0),
            fullscreen: false,
        }
    }
}

/// Everything scenes share: window settings, input, rendering, cameras,
/// and audio
///
/// Scene swaps are requested here and applied by the application once
/// per frame, after input processing.
pub struct Ctx {
    pub window: WindowSettings,
    pub input: InputManager,
    pub renderer: Renderer,
    /// World-space camera
    pub camera: Camera,
    /// Screen-space camera for UI drawing
    pub ui_camera: Camera,
    pub audio: AudioPlayer,
    /// Simulation updates per second the main loop targets
    pub target_ups: f32,
    /// Most whole ticks one frame may run before shedding the excess
    pub max_ticks_per_frame: u32,
    next_scene: Option<usize>,
    running: bool,
}

impl Ctx {
    pub fn new(window: WindowSettings, backend: Box<dyn RasterBackend>) -> Self {
        let camera = Camera::new(window.dimensions);
        let ui_camera = Camera::new(window.dimensions);
        Self {
            window,
            input: InputManager::new(),
            renderer: Renderer::new(backend),
            camera,
            ui_camera,
            audio: AudioPlayer::new(),
            target_ups: 60.0,
            max_ticks_per_frame: 10,
            next_scene: None,
            running: true,
        }
    }

    /// Ask for a scene swap; it is applied after this frame's input
    /// processing, and a later request in the same frame wins
    pub fn request_scene(&mut self, index: usize) {
        self.next_scene = Some(index);
    }

    pub(crate) fn take_scene_request(&mut self) -> Option<usize> {
        self.next_scene.take()
    }

    /// Ask the main loop to finish after the current frame
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}
