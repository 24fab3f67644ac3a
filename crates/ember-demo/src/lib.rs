//! Ember Demo - A coin-collecting sample game
//!
//! Three scenes: a title menu, an options menu persisted to a flat
//! text file, and the game itself, whose world is read from a text
//! tile map. Exercises the full engine surface: scene swaps, UI
//! groups with gamepad focus, sprite animation, and audio.

pub mod map;
pub mod options;
pub mod rand;
pub mod sprites;

mod game;
mod options_menu;
mod title;

pub use game::GameScene;
pub use options_menu::OptionsMenuScene;
pub use title::TitleScene;

/// Scene registry order used by the binary
pub const TITLE: usize = 0;
pub const OPTIONS: usize = 1;
pub const GAME: usize = 2;

/// Where settings are saved between runs
pub const OPTIONS_FILE: &str = "options.txt";

use ember_runtime::Ctx;
use ember_ui::UiFrame;

/// Play a one-shot effect; a missing sound only logs a warning
pub(crate) fn play_effect(ctx: &mut Ctx, name: &str) {
    if let Err(e) = ctx.audio.play_effect(name) {
        log::warn!("{e}");
    }
}

/// Swap the looping music track; a missing sound only logs a warning
pub(crate) fn play_music(ctx: &mut Ctx, name: &str) {
    if let Err(e) = ctx.audio.play_music(name) {
        log::warn!("{e}");
    }
}

/// Borrow the pieces of the context that UI groups process input with
pub(crate) fn ui_frame(ctx: &mut Ctx) -> UiFrame<'_> {
    UiFrame {
        window: ctx.window.dimensions,
        target_ups: ctx.target_ups,
        input: &mut ctx.input,
        fonts: ctx.renderer.fonts(),
    }
}
