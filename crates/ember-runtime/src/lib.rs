//! Ember Runtime - Application shell and scene management
//!
//! An `App` owns a shared `Ctx` (window settings, input, renderer,
//! cameras, audio) and a registry of scenes. One scene is current at a
//! time; swaps run the departing scene's `leave`, the arriving scene's
//! lazy `initialize` and `enter`, and move the input listener over.
//!
//! The main loop draws, pumps input, applies at most one requested
//! scene swap per frame, then drains owed simulation ticks: whole ticks
//! at `update(1.0)` up to a per-frame cap, with the excess handed to a
//! single fractional update.

mod app;
mod context;
mod platform;
mod scene;

pub use app::{split_ticks, App};
pub use context::{Ctx, WindowSettings};
pub use platform::{HeadlessPlatform, Platform};
pub use scene::Scene;
