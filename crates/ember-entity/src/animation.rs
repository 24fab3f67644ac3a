//! Frame-grid sprite animation

use glam::{UVec2, Vec4};

/// Steps a sprite's texture box through a grid of equally sized frames
///
/// Frames advance on accumulated update time, so the animation rate is
/// independent of how often the sprite is drawn.
#[derive(Clone, Debug, PartialEq)]
pub struct Animation {
    /// Grid size as (columns, rows)
    frame_dimensions: UVec2,
    /// Ticks a frame stays visible before advancing
    frame_time: f32,
    timer: f32,
    current: u32,
    playing: bool,
}

impl Animation {
    pub fn new(frame_dimensions: UVec2, frame_time: f32) -> Self {
        Self {
            frame_dimensions: frame_dimensions.max(UVec2::ONE),
            frame_time,
            timer: 0.0,
            current: 0,
            playing: false,
        }
    }

    pub fn frame_count(&self) -> u32 {
        self.frame_dimensions.x * self.frame_dimensions.y
    }

    pub fn current_frame(&self) -> u32 {
        self.current
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Texture box of the current frame, `(x, y, w, h)` normalized
    pub fn frame_box(&self) -> Vec4 {
        let w = 1.0 / self.frame_dimensions.x as f32;
        let h = 1.0 / self.frame_dimensions.y as f32;
        let col = self.current % self.frame_dimensions.x;
        let row = self.current / self.frame_dimensions.x;
        Vec4::new(col as f32 * w, row as f32 * h, w, h)
    }

    pub fn update(&mut self, time_step: f32) {
        if !self.playing {
            return;
        }
        self.timer += time_step;
        if self.timer > self.frame_time {
            self.current = (self.current + 1) % self.frame_count();
            self.timer = 0.0;
        }
    }

    pub fn play(&mut self) {
        self.playing = true;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Stop and rewind to the first frame
    pub fn stop(&mut self) {
        self.playing = false;
        self.current = 0;
        self.timer = 0.0;
    }
}
