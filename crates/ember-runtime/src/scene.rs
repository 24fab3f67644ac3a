//! The scene trait

use crate::Ctx;

/// One screen of the application: a menu, the game itself, an overlay
///
/// Scenes are registered with the `App` and addressed by index.
/// `initialize` runs once, lazily, the first time the scene becomes
/// current; `enter` and `leave` run on every swap; `destroy` runs at
/// teardown or on explicit request. `draw` happens inside the
/// renderer's begin/end bracket, `process_input` after the frame's
/// input rollover, and `update` once per owed simulation tick.
pub trait Scene {
    /// One-time setup; returning false keeps the scene unusable and
    /// aborts the swap that triggered it
    fn initialize(&mut self, ctx: &mut Ctx) -> bool;

    /// The scene became current; `previous` is the index of the scene
    /// that was left, or this scene's own index at startup
    fn enter(&mut self, ctx: &mut Ctx, previous: usize);

    /// Queue this frame's sprites and text
    fn draw(&mut self, ctx: &mut Ctx);

    /// React to this frame's input state
    fn process_input(&mut self, ctx: &mut Ctx);

    /// A UI control in one of the scene's groups raised an event
    fn ui_event(&mut self, _ctx: &mut Ctx, _group: u32, _component: u32, _event: u32) {}

    /// Advance the simulation; `time_step` is 1.0 for whole ticks and
    /// the fractional excess for the frame's final partial tick
    fn update(&mut self, ctx: &mut Ctx, time_step: f32);

    /// The scene stops being current; `next` is the incoming scene's
    /// index
    fn leave(&mut self, ctx: &mut Ctx, next: usize);

    /// Final teardown, the inverse of `initialize`
    fn destroy(&mut self, ctx: &mut Ctx);
}
