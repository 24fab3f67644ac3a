//! Options menu backed by the saved options file

use crate::options::{parse_dimensions, Options};
use crate::rand::GameRng;
use crate::sprites::Spark;
use crate::{play_effect, play_music, ui_frame, OPTIONS_FILE};
use ember_core::{Alignment, Color};
use ember_render::DEFAULT_SHADER;
use ember_runtime::{Ctx, Scene};
use ember_ui::{
    UiButton, UiCarousel, UiControl, UiGroup, UiSlider, UiStyle, UiSwitch, UiTextBox,
    CLICKED_EVENT,
};
use glam::{Vec2, Vec3};
use std::path::PathBuf;

/// Cursor sprite size for sliders and the username box, as window
/// fractions
const CURSOR_DIMENSIONS: Vec2 = Vec2::new(0.004, 0.05);

pub struct OptionsMenuScene {
    ui: UiGroup,
    back_button: u32,
    defaults_button: u32,
    apply_button: u32,
    dimensions_carousel: u32,
    fullscreen_switch: u32,
    effect_slider: u32,
    music_slider: u32,
    username_box: u32,
    sparks: Vec<Spark>,
    spark_timer: f32,
    rng: GameRng,
    last_scene: usize,
    options_path: PathBuf,
}

impl OptionsMenuScene {
    pub fn new() -> Self {
        let style = UiStyle {
            shader: DEFAULT_SHADER,
            font: "OpenSans-Regular".to_owned(),
            text_scale: 0.25,
            text_color: Color::WHITE,
        };
        let mut ui = UiGroup::new(0, style);
        ui.highlight_texture = Some("options-highlight".to_owned());
        ui.highlight_margins = Vec2::new(2.0, 2.0);

        let back_button = ui.add_component(bottom_button(0.0, "BACK"));
        let defaults_button = ui.add_component(bottom_button(0.375, "DEFAULTS"));
        let apply_button = ui.add_component(bottom_button(0.75, "APPLY"));

        let mut carousel = UiCarousel::new(
            Vec2::new(0.05, 0.9),
            Vec2::new(0.4, 0.05),
            Some("options-carousel"),
            Some("options-carousel-button"),
            0.1,
            Alignment::Center,
            vec![
                "960x540".to_owned(),
                "1280x720".to_owned(),
                "1920x1080".to_owned(),
            ],
        );
        carousel.base.depth = 1.0;
        carousel.layout();
        let dimensions_carousel = ui.add_component(UiControl::Carousel(carousel));

        let mut switch = UiSwitch::new(
            Vec2::new(0.05, 0.8),
            Vec2::new(0.1, 0.05),
            Some("options-switch"),
            "FULLSCREEN",
        );
        switch.base.depth = 1.0;
        let fullscreen_switch = ui.add_component(UiControl::Switch(switch));

        let effect_slider = ui.add_component(volume_slider(0.6));
        let music_slider = ui.add_component(volume_slider(0.5));

        let mut username = UiTextBox::new(
            Vec2::new(0.55, 0.9),
            Vec2::new(0.4, 0.05),
            Some("options-text-box"),
            Some("options-cursor"),
            CURSOR_DIMENSIONS,
        );
        username.base.depth = 1.0;
        let username_box = ui.add_component(UiControl::TextBox(username));

        // Bottom row cycles left to right; the left column cycles top
        // to bottom and wraps through the buttons.
        ui.link_horizontal(back_button, defaults_button);
        ui.link_horizontal(defaults_button, apply_button);
        ui.link_horizontal(apply_button, back_button);
        ui.link_vertical(fullscreen_switch, dimensions_carousel);
        ui.link_vertical(effect_slider, fullscreen_switch);
        ui.link_vertical(music_slider, effect_slider);
        ui.link_vertical(back_button, music_slider);
        ui.link_vertical(dimensions_carousel, back_button);
        ui.link_vertical(apply_button, username_box);
        ui.link_vertical(username_box, apply_button);
        // Left and right from either column jumps to the other.
        for id in [
            dimensions_carousel,
            fullscreen_switch,
            effect_slider,
            music_slider,
        ] {
            if let Some(component) = ui.component_mut(id) {
                component.base_mut().neighbor_left = Some(username_box);
                component.base_mut().neighbor_right = Some(username_box);
            }
        }
        if let Some(component) = ui.component_mut(username_box) {
            component.base_mut().neighbor_left = Some(dimensions_carousel);
            component.base_mut().neighbor_right = Some(dimensions_carousel);
        }
        ui.set_initial_component(back_button);

        Self {
            ui,
            back_button,
            defaults_button,
            apply_button,
            dimensions_carousel,
            fullscreen_switch,
            effect_slider,
            music_slider,
            username_box,
            sparks: Vec::new(),
            spark_timer: 0.0,
            rng: GameRng::new(0xca11),
            last_scene: 0,
            options_path: PathBuf::from(OPTIONS_FILE),
        }
    }

    /// Push saved options into the controls
    fn sync_controls(&mut self, options: &Options) {
        let dimensions = format!(
            "{}x{}",
            options.window_dimensions.x as u32, options.window_dimensions.y as u32
        );
        if let Some(UiControl::Carousel(carousel)) = self.ui.component_mut(self.dimensions_carousel)
        {
            if let Some(index) = carousel.values().iter().position(|v| *v == dimensions) {
                carousel.set_current_index(index);
            }
        }
        if let Some(UiControl::Switch(switch)) = self.ui.component_mut(self.fullscreen_switch) {
            switch.set_on(options.fullscreen);
        }
        if let Some(UiControl::Slider(slider)) = self.ui.component_mut(self.effect_slider) {
            slider.set_value(options.effect_volume);
        }
        if let Some(UiControl::Slider(slider)) = self.ui.component_mut(self.music_slider) {
            slider.set_value(options.music_volume);
        }
        if let Some(UiControl::TextBox(text_box)) = self.ui.component_mut(self.username_box) {
            text_box.set_text(&options.username);
        }
    }

    /// Read the controls back into an options value
    fn read_controls(&self) -> Options {
        let mut options = Options::default();
        if let Some(UiControl::Carousel(carousel)) = self.ui.component(self.dimensions_carousel) {
            if let Some(dimensions) = parse_dimensions(carousel.value()) {
                options.window_dimensions = dimensions;
            }
        }
        if let Some(UiControl::Switch(switch)) = self.ui.component(self.fullscreen_switch) {
            options.fullscreen = switch.is_on();
        }
        if let Some(UiControl::Slider(slider)) = self.ui.component(self.effect_slider) {
            options.effect_volume = slider.value();
        }
        if let Some(UiControl::Slider(slider)) = self.ui.component(self.music_slider) {
            options.music_volume = slider.value();
        }
        if let Some(UiControl::TextBox(text_box)) = self.ui.component(self.username_box) {
            options.username = text_box.text().to_owned();
        }
        options
    }

    fn apply(&mut self, ctx: &mut Ctx) {
        log::info!("applying options");
        let options = self.read_controls();
        if let Err(e) = options.save(&self.options_path) {
            log::warn!("failed to save options: {e}");
        }
        ctx.window.dimensions = options.window_dimensions;
        ctx.window.fullscreen = options.fullscreen;
        ctx.audio.set_effect_volume(options.effect_volume as f64);
        ctx.audio.set_music_volume(options.music_volume as f64);
    }
}

impl Default for OptionsMenuScene {
    fn default() -> Self {
        Self::new()
    }
}

fn bottom_button(x: f32, text: &str) -> UiControl {
    let mut button = UiButton::new(
        Vec2::new(x, 0.0),
        Vec2::new(0.25, 0.05),
        Some("options-button"),
        text,
    );
    button.base.depth = 1.0;
    UiControl::Button(button)
}

fn volume_slider(y: f32) -> UiControl {
    let mut slider = UiSlider::new(
        Vec2::new(0.05, y),
        Vec2::new(0.4, 0.05),
        Some("options-slider"),
        Some("options-cursor"),
        CURSOR_DIMENSIONS,
    );
    slider.base.depth = 1.0;
    UiControl::Slider(slider)
}

impl Scene for OptionsMenuScene {
    fn initialize(&mut self, ctx: &mut Ctx) -> bool {
        log::info!("initializing options scene");
        self.ui.initialize(&mut ctx.input)
    }

    fn enter(&mut self, ctx: &mut Ctx, previous: usize) {
        log::info!("entering options scene from scene {previous}");
        self.last_scene = previous;
        play_music(ctx, "waiting");
        let window = ctx.window.dimensions;
        ctx.camera
            .set_position(Vec3::new(window.x / 2.0, window.y / 2.0, 0.0));
        ctx.camera.set_scale(1.0);
        let options = Options::load(&self.options_path);
        self.sync_controls(&options);
        self.sparks.clear();
        self.spark_timer = 0.0;
    }

    fn draw(&mut self, ctx: &mut Ctx) {
        self.ui.draw(&mut ctx.renderer, ctx.window.dimensions);
        for spark in &self.sparks {
            ctx.renderer.submit(&spark.sprite);
        }
    }

    fn process_input(&mut self, ctx: &mut Ctx) {
        let events = {
            let mut frame = ui_frame(ctx);
            self.ui.process_input(&mut frame)
        };
        for event in events {
            self.ui_event(ctx, event.group, event.component, event.event);
        }
    }

    fn ui_event(&mut self, ctx: &mut Ctx, group: u32, component: u32, event: u32) {
        if group != self.ui.id || event != CLICKED_EVENT {
            return;
        }
        if component == self.back_button {
            play_effect(ctx, "click");
            ctx.request_scene(self.last_scene);
        } else if component == self.defaults_button {
            play_effect(ctx, "click");
            self.sync_controls(&Options::default());
        } else if component == self.apply_button {
            play_effect(ctx, "click");
            self.apply(ctx);
        }
    }

    fn update(&mut self, ctx: &mut Ctx, time_step: f32) {
        let window = ctx.window.dimensions;
        self.ui.update(time_step, window, ctx.target_ups);
        for spark in &mut self.sparks {
            spark.update(time_step, ctx.target_ups);
        }
        self.spark_timer += time_step;
        if self.spark_timer > ctx.target_ups / 50.0 {
            self.sparks
                .push(Spark::new(&mut self.rng, window, ctx.target_ups));
            self.spark_timer = 0.0;
        }
        self.sparks.retain(Spark::is_alive);
    }

    fn leave(&mut self, _ctx: &mut Ctx, next: usize) {
        log::info!("leaving options scene for scene {next}");
    }

    fn destroy(&mut self, ctx: &mut Ctx) {
        log::info!("destroying options scene");
        self.ui.destroy(&mut ctx.input);
        self.sparks.clear();
        self.spark_timer = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_input::MouseButton;
    use ember_render::RecordingBackend;
    use ember_runtime::WindowSettings;

    fn ctx() -> Ctx {
        Ctx::new(WindowSettings::default(), Box::new(RecordingBackend::new()))
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("ember-options-menu-{name}-{}.txt", std::process::id()))
    }

    fn click(ctx: &mut Ctx, scene: &mut OptionsMenuScene, window_position: Vec2) {
        ctx.input.begin_frame();
        ctx.input.process_mouse_move(window_position, 600.0);
        scene.process_input(ctx);
        ctx.input.begin_frame();
        ctx.input.process_mouse_button_down(MouseButton::Left);
        scene.process_input(ctx);
        ctx.input.begin_frame();
        ctx.input.process_mouse_button_up(MouseButton::Left);
        scene.process_input(ctx);
    }

    #[test]
    fn test_apply_saves_and_configures() {
        let path = temp_path("apply");
        let mut ctx = ctx();
        let mut scene = OptionsMenuScene::new();
        scene.options_path = path.clone();
        assert!(scene.initialize(&mut ctx));
        scene.enter(&mut ctx, 0);
        scene.sync_controls(&Options {
            effect_volume: 0.5,
            music_volume: 0.25,
            username: "keegan".to_owned(),
            ..Options::default()
        });

        // The apply button spans x 600..800, y 570..600 from the top.
        click(&mut ctx, &mut scene, Vec2::new(700.0, 585.0));

        let saved = Options::load(&path);
        let _ = std::fs::remove_file(&path);
        assert_eq!(saved.effect_volume, 0.5);
        assert_eq!(saved.music_volume, 0.25);
        assert_eq!(saved.username, "keegan");
        assert_eq!(ctx.audio.effect_volume(), 0.5);
        assert_eq!(ctx.audio.music_volume(), 0.25);
    }

    #[test]
    fn test_clicking_fullscreen_switch_toggles_it() {
        let mut ctx = ctx();
        let mut scene = OptionsMenuScene::new();
        scene.options_path = temp_path("switch");
        assert!(scene.initialize(&mut ctx));
        scene.enter(&mut ctx, 0);
        assert!(!scene.read_controls().fullscreen);

        // The switch spans x 40..120, y 90..120 from the top.
        click(&mut ctx, &mut scene, Vec2::new(80.0, 105.0));
        assert!(scene.read_controls().fullscreen);
    }

    #[test]
    fn test_defaults_resets_controls() {
        let mut ctx = ctx();
        let mut scene = OptionsMenuScene::new();
        scene.options_path = temp_path("defaults");
        assert!(scene.initialize(&mut ctx));
        scene.enter(&mut ctx, 0);
        scene.sync_controls(&Options {
            fullscreen: true,
            effect_volume: 0.1,
            ..Options::default()
        });

        let defaults_button = scene.defaults_button;
        scene.ui_event(&mut ctx, 0, defaults_button, CLICKED_EVENT);
        let options = scene.read_controls();
        assert_eq!(options, Options::default());
    }
}
