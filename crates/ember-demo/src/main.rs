//! Ember Demo binary
//!
//! Loads saved options, registers the three scenes, and runs the main
//! loop headless. An optional first argument caps the number of frames
//! (default 600), which keeps scripted runs finite.

use ember_demo::options::Options;
use ember_demo::{GameScene, OptionsMenuScene, TitleScene, OPTIONS_FILE, TITLE};
use ember_render::{Font, RecordingBackend};
use ember_runtime::{App, Ctx, HeadlessPlatform, WindowSettings};
use std::path::Path;

const SOUNDS: [&str; 6] = ["click", "coin", "crunch", "trumpet", "waiting", "playing"];

fn main() {
    env_logger::init();

    let options = Options::load(Path::new(OPTIONS_FILE));
    let settings = WindowSettings {
        title: "Coin Chase".to_owned(),
        dimensions: options.window_dimensions,
        fullscreen: options.fullscreen,
    };
    let mut ctx = Ctx::new(settings, Box::new(RecordingBackend::new()));
    ctx.renderer
        .fonts_mut()
        .add_font("OpenSans-Regular", Font::new());
    ctx.audio.set_effect_volume(options.effect_volume as f64);
    ctx.audio.set_music_volume(options.music_volume as f64);
    for name in SOUNDS {
        let path = Path::new("assets/audio").join(format!("{name}.ogg"));
        if let Err(e) = ctx.audio.load_sound(name, &path) {
            log::warn!("{e}");
        }
    }

    let mut app = App::new(ctx);
    app.add_scene(Box::new(TitleScene::new()));
    app.add_scene(Box::new(OptionsMenuScene::new()));
    app.add_scene(Box::new(GameScene::new()));
    if !app.set_current_scene(TITLE) {
        log::error!("failed to bring up the title scene");
        return;
    }

    let frames = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(600);
    let mut platform = HeadlessPlatform::new(frames);
    app.run(&mut platform);
}
