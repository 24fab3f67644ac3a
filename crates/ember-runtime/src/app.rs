//! Application shell: scene registry and the main loop

use crate::{Ctx, Platform, Scene};
use ember_input::ListenerId;
use std::time::Instant;

/// Split owed simulation time into whole ticks and a fractional rest
///
/// At most `cap` whole ticks are granted; anything beyond the cap joins
/// the fractional excess so a slow frame cannot spiral.
pub fn split_ticks(owed: f32, cap: u32) -> (u32, f32) {
    let whole = (owed.max(0.0).floor() as u32).min(cap);
    (whole, owed.max(0.0) - whole as f32)
}

struct SceneSlot {
    scene: Box<dyn Scene>,
    initialized: bool,
    listener: Option<ListenerId>,
}

/// Owns the context and the scene registry, and drives the main loop
///
/// Exactly one scene is current at a time, except after a scene is
/// swapped for itself, which leaves no scene current and ends the run
/// at the next frame.
pub struct App {
    pub ctx: Ctx,
    scenes: Vec<SceneSlot>,
    current: Option<usize>,
}

impl App {
    pub fn new(ctx: Ctx) -> Self {
        Self {
            ctx,
            scenes: Vec::new(),
            current: None,
        }
    }

    /// Register a scene and get its index
    pub fn add_scene(&mut self, scene: Box<dyn Scene>) -> usize {
        self.scenes.push(SceneSlot {
            scene,
            initialized: false,
            listener: None,
        });
        self.scenes.len() - 1
    }

    pub fn current_scene(&self) -> Option<usize> {
        self.current
    }

    /// Run a scene's one-time setup. Initializing an already-initialized
    /// scene is a warned no-op returning false.
    fn initialize_scene(&mut self, index: usize) -> bool {
        if self.scenes[index].initialized {
            log::warn!("scene {index} already initialized");
            return false;
        }
        if !self.scenes[index].scene.initialize(&mut self.ctx) {
            log::warn!("scene {index} failed to initialize");
            return false;
        }
        self.scenes[index].initialized = true;
        true
    }

    /// Swap the current scene
    ///
    /// The departing scene's listener is removed and its `leave` runs
    /// first. Swapping a scene for itself stops there: a warning is
    /// logged and no scene is current afterwards. Otherwise the arriving
    /// scene is lazily initialized, entered, made current, and given a
    /// fresh listener.
    pub fn set_current_scene(&mut self, next: usize) -> bool {
        if next >= self.scenes.len() {
            log::warn!("no scene {next} registered");
            return false;
        }
        let previous = self.current;
        if let Some(index) = previous {
            if let Some(listener) = self.scenes[index].listener.take() {
                self.ctx.input.remove_listener(listener);
            }
            self.scenes[index].scene.leave(&mut self.ctx, next);
            if index == next {
                log::warn!("scene {next} swapped for itself; no scene is current");
                self.current = None;
                return false;
            }
        }
        if !self.initialize_scene(next) && !self.scenes[next].initialized {
            return false;
        }
        self.scenes[next]
            .scene
            .enter(&mut self.ctx, previous.unwrap_or(next));
        self.current = Some(next);
        let listener = self.ctx.input.allocate_listener();
        self.ctx.input.add_listener(listener);
        self.scenes[next].listener = Some(listener);
        true
    }

    /// Tear down a scene that is not current. Destroying the current
    /// scene or one that was never initialized is a warned no-op
    /// returning false.
    pub fn destroy_scene(&mut self, index: usize) -> bool {
        if index >= self.scenes.len() {
            log::warn!("no scene {index} registered");
            return false;
        }
        if self.current == Some(index) {
            log::warn!("scene {index} is current and cannot be destroyed");
            return false;
        }
        if !self.scenes[index].initialized {
            log::warn!("scene {index} not initialized");
            return false;
        }
        self.scenes[index].scene.destroy(&mut self.ctx);
        self.scenes[index].initialized = false;
        true
    }

    /// One pass of the main loop with `owed` simulation ticks to drain
    fn frame(&mut self, platform: &mut dyn Platform, owed: f32) {
        let Some(index) = self.current else {
            self.ctx.stop();
            return;
        };

        self.ctx.renderer.begin();
        self.scenes[index].scene.draw(&mut self.ctx);
        self.ctx.renderer.end();
        platform.present();

        self.ctx.input.begin_frame();
        if !platform.pump(&mut self.ctx.input, &self.ctx.window) {
            self.ctx.stop();
        }
        self.scenes[index].scene.process_input(&mut self.ctx);

        if let Some(next) = self.ctx.take_scene_request() {
            self.set_current_scene(next);
        }
        let Some(index) = self.current else {
            self.ctx.stop();
            return;
        };

        let (whole, remainder) = split_ticks(owed, self.ctx.max_ticks_per_frame);
        for _ in 0..whole {
            self.scenes[index].scene.update(&mut self.ctx, 1.0);
        }
        self.scenes[index].scene.update(&mut self.ctx, remainder);

        let window = self.ctx.window.dimensions;
        let time_step = whole as f32 + remainder;
        self.ctx.camera.update(time_step, window);
        self.ctx.ui_camera.update(time_step, window);
    }

    /// Drive frames until the context stops, then tear everything down
    pub fn run(&mut self, platform: &mut dyn Platform) {
        let mut last = Instant::now();
        while self.ctx.is_running() {
            let now = Instant::now();
            let owed = now.duration_since(last).as_secs_f32() * self.ctx.target_ups;
            last = now;
            self.frame(platform, owed);
        }
        self.shutdown();
    }

    /// Leave the current scene and destroy every initialized one
    fn shutdown(&mut self) {
        if let Some(index) = self.current.take() {
            if let Some(listener) = self.scenes[index].listener.take() {
                self.ctx.input.remove_listener(listener);
            }
            self.scenes[index].scene.leave(&mut self.ctx, index);
        }
        for index in 0..self.scenes.len() {
            if self.scenes[index].initialized {
                self.scenes[index].scene.destroy(&mut self.ctx);
                self.scenes[index].initialized = false;
            }
        }
    }
}
