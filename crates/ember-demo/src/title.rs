//! Title menu with floating sparks

use crate::rand::GameRng;
use crate::sprites::Spark;
use crate::{play_effect, play_music, ui_frame, GAME, OPTIONS};
use ember_core::Color;
use ember_render::DEFAULT_SHADER;
use ember_runtime::{Ctx, Scene};
use ember_ui::{UiButton, UiControl, UiGroup, UiLabel, UiStyle, CLICKED_EVENT};
use glam::{Vec2, Vec3};

pub struct TitleScene {
    ui: UiGroup,
    start_button: u32,
    options_button: u32,
    quit_button: u32,
    sparks: Vec<Spark>,
    spark_timer: f32,
    rng: GameRng,
}

impl TitleScene {
    pub fn new() -> Self {
        let style = UiStyle {
            shader: DEFAULT_SHADER,
            font: "OpenSans-Regular".to_owned(),
            text_scale: 0.5,
            text_color: Color::WHITE,
        };
        let mut ui = UiGroup::new(0, style);
        ui.highlight_texture = Some("title-highlight".to_owned());
        ui.highlight_margins = Vec2::new(2.0, 2.0);

        let mut title = UiLabel::new(
            Vec2::new(0.0, 0.7),
            Vec2::new(1.0, 0.15),
            None,
            "EMBER PRESENTS: COIN CHASE",
        );
        title.base.depth = 1.0;
        ui.add_component(UiControl::Label(title));

        let start_button = ui.add_component(menu_button(0.6, "START"));
        let options_button = ui.add_component(menu_button(0.4, "OPTIONS"));
        let quit_button = ui.add_component(menu_button(0.2, "QUIT"));
        ui.set_initial_component(start_button);
        ui.link_vertical(options_button, start_button);
        ui.link_vertical(quit_button, options_button);
        ui.link_vertical(start_button, quit_button);

        Self {
            ui,
            start_button,
            options_button,
            quit_button,
            sparks: Vec::new(),
            spark_timer: 0.0,
            rng: GameRng::new(0x5eed),
        }
    }
}

impl Default for TitleScene {
    fn default() -> Self {
        Self::new()
    }
}

fn menu_button(y: f32, text: &str) -> UiControl {
    let mut button = UiButton::new(
        Vec2::new(0.25, y),
        Vec2::new(0.5, 0.1),
        Some("title-button"),
        text,
    );
    button.base.depth = 1.0;
    UiControl::Button(button)
}

impl Scene for TitleScene {
    fn initialize(&mut self, ctx: &mut Ctx) -> bool {
        log::info!("initializing title scene");
        self.ui.initialize(&mut ctx.input)
    }

    fn enter(&mut self, ctx: &mut Ctx, previous: usize) {
        log::info!("entering title scene from scene {previous}");
        play_music(ctx, "waiting");
        let window = ctx.window.dimensions;
        ctx.camera
            .set_position(Vec3::new(window.x / 2.0, window.y / 2.0, 0.0));
        ctx.camera.set_scale(1.0);
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
        if component == self.start_button {
            play_effect(ctx, "click");
            ctx.request_scene(GAME);
        } else if component == self.options_button {
            play_effect(ctx, "click");
            ctx.request_scene(OPTIONS);
        } else if component == self.quit_button {
            play_effect(ctx, "click");
            ctx.stop();
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
        log::info!("leaving title scene for scene {next}");
    }

    fn destroy(&mut self, ctx: &mut Ctx) {
        log::info!("destroying title scene");
        self.ui.destroy(&mut ctx.input);
        self.sparks.clear();
        self.spark_timer = 0.0;
    }
}
