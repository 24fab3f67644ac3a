//! The playable scene: collect every coin, avoid the enemies

use crate::map::Map;
use crate::options::Options;
use crate::rand::GameRng;
use crate::sprites::{make_floor, make_wall, Coin, Enemy, Player};
use crate::{play_effect, play_music, ui_frame, OPTIONS, OPTIONS_FILE, TITLE};
use ember_core::{Alignment, Color};
use ember_entity::Sprite;
use ember_input::{Button, KeyCode};
use ember_render::DEFAULT_SHADER;
use ember_runtime::{Ctx, Scene};
use ember_ui::{UiButton, UiControl, UiGroup, UiLabel, UiStyle, CLICKED_EVENT};
use glam::{Vec2, Vec3};
use std::path::{Path, PathBuf};

pub struct GameScene {
    floors: Vec<Sprite>,
    walls: Vec<Sprite>,
    coins: Vec<Coin>,
    enemies: Vec<Enemy>,
    player: Player,
    coin_count: u32,
    dead: bool,
    rng: GameRng,
    username_ui: UiGroup,
    username_label: u32,
    coins_ui: UiGroup,
    coins_label: u32,
    pause_ui: UiGroup,
    resume_button: u32,
    restart_button: u32,
    options_button: u32,
    quit_button: u32,
    map_path: PathBuf,
}

impl GameScene {
    pub fn new() -> Self {
        let cyan = Color::new(0.0, 1.0, 1.0, 1.0);
        let mut username_ui = UiGroup::new(
            0,
            UiStyle {
                shader: DEFAULT_SHADER,
                font: "OpenSans-Regular".to_owned(),
                text_scale: 0.15,
                text_color: cyan,
            },
        );
        let mut label = UiLabel::new(Vec2::ZERO, Vec2::ONE, None, "");
        label.base.depth = 1.0;
        label.vertical_alignment = Alignment::Bottom;
        let username_label = username_ui.add_component(UiControl::Label(label));

        let mut coins_ui = UiGroup::new(
            1,
            UiStyle {
                shader: DEFAULT_SHADER,
                font: "OpenSans-Regular".to_owned(),
                text_scale: 0.5,
                text_color: cyan,
            },
        );
        let mut label = UiLabel::new(Vec2::new(0.0, 0.9), Vec2::new(0.5, 0.1), None, "");
        label.base.depth = 1.1;
        label.horizontal_alignment = Alignment::Left;
        let coins_label = coins_ui.add_component(UiControl::Label(label));

        let mut pause_ui = UiGroup::new(
            2,
            UiStyle {
                shader: DEFAULT_SHADER,
                font: "OpenSans-Regular".to_owned(),
                text_scale: 0.25,
                text_color: Color::WHITE,
            },
        );
        pause_ui.highlight_texture = Some("game-highlight".to_owned());
        pause_ui.highlight_margins = Vec2::new(2.0, 2.0);
        let mut background = UiLabel::new(
            Vec2::new(0.34, 0.29),
            Vec2::new(0.32, 0.37),
            Some("game-label"),
            "",
        );
        background.base.depth = 1.9;
        pause_ui.add_component(UiControl::Label(background));
        let resume_button = pause_ui.add_component(pause_button(0.6, "RESUME"));
        let restart_button = pause_ui.add_component(pause_button(0.5, "RESTART"));
        let options_button = pause_ui.add_component(pause_button(0.4, "OPTIONS"));
        let quit_button = pause_ui.add_component(pause_button(0.3, "QUIT"));
        pause_ui.set_initial_component(resume_button);
        pause_ui.link_vertical(restart_button, resume_button);
        pause_ui.link_vertical(options_button, restart_button);
        pause_ui.link_vertical(quit_button, options_button);
        pause_ui.link_vertical(resume_button, quit_button);

        Self {
            floors: Vec::new(),
            walls: Vec::new(),
            coins: Vec::new(),
            enemies: Vec::new(),
            player: Player::new(Vec3::new(32.0, 32.0, 0.4), 60.0),
            coin_count: 0,
            dead: false,
            rng: GameRng::new(0xfee1),
            username_ui,
            username_label,
            coins_ui,
            coins_label,
            pause_ui,
            resume_button,
            restart_button,
            options_button,
            quit_button,
            map_path: PathBuf::from("assets/map.txt"),
        }
    }

    /// Populate the world from the map file
    fn load_map(&mut self, ctx: &mut Ctx) -> bool {
        log::info!("loading map");
        let map = match Map::from_file(&self.map_path) {
            Ok(map) => map,
            Err(e) => {
                log::error!("{e}");
                return false;
            }
        };
        self.floors = map.floors.into_iter().map(make_floor).collect();
        self.walls = map.walls.into_iter().map(make_wall).collect();
        self.coins = map
            .coins
            .into_iter()
            .map(|position| Coin::new(position, ctx.target_ups))
            .collect();
        self.enemies = map
            .enemies
            .into_iter()
            .map(|position| Enemy::new(position, ctx.target_ups))
            .collect();
        let spawn = map.player.unwrap_or_else(|| {
            log::warn!("map has no player spawn");
            Vec3::new(32.0, 32.0, 0.4)
        });
        self.player = Player::new(spawn, ctx.target_ups);
        true
    }

    fn set_pause_shown(&mut self, ctx: &mut Ctx, shown: bool) {
        self.pause_ui.set_enabled(shown, &mut ctx.input);
        self.pause_ui.set_visible(shown, &mut ctx.input);
    }

    /// Freeze the game on the pause menu with resume unavailable
    fn die(&mut self, ctx: &mut Ctx) {
        self.set_pause_shown(ctx, true);
        if let Some(resume) = self.pause_ui.component_mut(self.resume_button) {
            resume.base_mut().highlighted = false;
            resume.set_enabled(false, &mut ctx.input);
            resume.set_visible(false, &mut ctx.input);
        }
        if let Some(restart) = self.pause_ui.component_mut(self.restart_button) {
            restart.base_mut().neighbor_above = Some(self.quit_button);
        }
        if let Some(quit) = self.pause_ui.component_mut(self.quit_button) {
            quit.base_mut().neighbor_below = Some(self.restart_button);
        }
        self.pause_ui.set_initial_component(self.restart_button);
        self.dead = true;
    }

    /// Tear the world down and rebuild it from the map file
    fn restart(&mut self, ctx: &mut Ctx) {
        self.floors.clear();
        self.walls.clear();
        self.coins.clear();
        self.enemies.clear();
        self.coin_count = 0;
        self.dead = false;
        self.load_map(ctx);
        self.set_pause_shown(ctx, false);
        if let Some(restart) = self.pause_ui.component_mut(self.restart_button) {
            restart.base_mut().neighbor_above = Some(self.resume_button);
        }
        if let Some(quit) = self.pause_ui.component_mut(self.quit_button) {
            quit.base_mut().neighbor_below = Some(self.resume_button);
        }
        self.pause_ui.set_initial_component(self.resume_button);
    }
}

impl Default for GameScene {
    fn default() -> Self {
        Self::new()
    }
}

fn pause_button(y: f32, text: &str) -> UiControl {
    let mut button = UiButton::new(
        Vec2::new(0.35, y),
        Vec2::new(0.3, 0.05),
        Some("game-button"),
        text,
    );
    button.base.depth = 2.0;
    UiControl::Button(button)
}

impl Scene for GameScene {
    fn initialize(&mut self, ctx: &mut Ctx) -> bool {
        log::info!("initializing game scene");
        if !self.username_ui.initialize(&mut ctx.input)
            || !self.coins_ui.initialize(&mut ctx.input)
            || !self.pause_ui.initialize(&mut ctx.input)
        {
            return false;
        }
        self.set_pause_shown(ctx, false);
        self.dead = false;
        self.load_map(ctx)
    }

    fn enter(&mut self, ctx: &mut Ctx, previous: usize) {
        log::info!("entering game scene from scene {previous}");
        play_music(ctx, "playing");
        ctx.camera.set_scale(2.0);
        let username = Options::load(Path::new(OPTIONS_FILE)).username;
        if let Some(UiControl::Label(label)) = self.username_ui.component_mut(self.username_label) {
            label.text = username;
        }
    }

    fn draw(&mut self, ctx: &mut Ctx) {
        for floor in &self.floors {
            ctx.renderer.submit(floor);
        }
        for wall in &self.walls {
            ctx.renderer.submit(wall);
        }
        for coin in &self.coins {
            ctx.renderer.submit(&coin.sprite);
        }
        for enemy in &self.enemies {
            ctx.renderer.submit(&enemy.sprite);
        }
        ctx.renderer.submit(&self.player.sprite);
        let window = ctx.window.dimensions;
        self.username_ui.draw(&mut ctx.renderer, window);
        self.coins_ui.draw(&mut ctx.renderer, window);
        self.pause_ui.draw(&mut ctx.renderer, window);
    }

    fn process_input(&mut self, ctx: &mut Ctx) {
        if !self.pause_ui.is_enabled() {
            self.player.process_input(&ctx.input);
        }
        let events = {
            let mut frame = ui_frame(ctx);
            self.pause_ui.process_input(&mut frame)
        };
        for event in events {
            self.ui_event(ctx, event.group, event.component, event.event);
        }
        let pause_pressed = ctx.input.is_key_pressed(KeyCode::Escape)
            || ctx.input.is_controller_button_pressed(0, Button::Start);
        if pause_pressed && !self.dead {
            let shown = !self.pause_ui.is_enabled();
            self.set_pause_shown(ctx, shown);
        }
    }

    fn ui_event(&mut self, ctx: &mut Ctx, group: u32, component: u32, event: u32) {
        if group != self.pause_ui.id || event != CLICKED_EVENT {
            return;
        }
        if component == self.resume_button {
            play_effect(ctx, "click");
            self.set_pause_shown(ctx, false);
        } else if component == self.restart_button {
            play_effect(ctx, "click");
            self.restart(ctx);
        } else if component == self.options_button {
            play_effect(ctx, "click");
            ctx.request_scene(OPTIONS);
        } else if component == self.quit_button {
            play_effect(ctx, "click");
            self.restart(ctx);
            ctx.request_scene(TITLE);
        }
    }

    fn update(&mut self, ctx: &mut Ctx, time_step: f32) {
        let window = ctx.window.dimensions;
        if !self.pause_ui.is_enabled() {
            for enemy in &mut self.enemies {
                enemy.update(time_step, &self.walls, &mut self.rng, ctx.target_ups);
            }
            self.player.update(time_step, &self.walls);
            let mut collected = 0;
            for coin in &mut self.coins {
                coin.update(time_step);
                if coin.sprite.intersects(&self.player.sprite) {
                    coin.collected = true;
                    collected += 1;
                }
            }
            if collected > 0 {
                play_effect(ctx, "coin");
                self.coin_count += collected;
                self.coins.retain(|coin| !coin.collected);
            }
            if self.coins.is_empty() && !self.dead {
                play_effect(ctx, "trumpet");
                self.die(ctx);
            }
            let touched_enemy = self
                .enemies
                .iter()
                .any(|enemy| enemy.sprite.intersects(&self.player.sprite));
            if touched_enemy && !self.dead {
                play_effect(ctx, "crunch");
                self.die(ctx);
            }
        }
        ctx.camera
            .set_position(self.player.sprite.position() + Vec3::new(32.0, 32.0, 0.0));
        // Keep the username label floating just above the player's head.
        let player_position = self.player.sprite.position();
        let label_position = Vec2::new(
            (player_position.x + self.player.sprite.dimensions.x / 2.0 - window.x / 2.0) / window.x,
            (player_position.y + self.player.sprite.dimensions.y) / window.y,
        );
        if let Some(UiControl::Label(label)) = self.username_ui.component_mut(self.username_label) {
            label.base.position = label_position;
        }
        if let Some(UiControl::Label(label)) = self.coins_ui.component_mut(self.coins_label) {
            label.text = format!("Coins: {}", self.coin_count);
        }
        self.username_ui.update(time_step, window, ctx.target_ups);
        self.coins_ui.update(time_step, window, ctx.target_ups);
        self.pause_ui.update(time_step, window, ctx.target_ups);
    }

    fn leave(&mut self, _ctx: &mut Ctx, next: usize) {
        log::info!("leaving game scene for scene {next}");
    }

    fn destroy(&mut self, ctx: &mut Ctx) {
        log::info!("destroying game scene");
        self.floors.clear();
        self.walls.clear();
        self.coins.clear();
        self.enemies.clear();
        self.coin_count = 0;
        self.username_ui.destroy(&mut ctx.input);
        self.coins_ui.destroy(&mut ctx.input);
        self.pause_ui.destroy(&mut ctx.input);
    }
}
