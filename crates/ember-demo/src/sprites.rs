//! The game's cast: player, enemies, coins, scenery, and menu sparks

use crate::rand::GameRng;
use crate::map::TILE_SIZE;
use ember_entity::{Animation, Sprite};
use ember_input::{Axis, InputManager, KeyCode};
use glam::{UVec2, Vec2, Vec3};

/// Player and enemy movement speed in pixels per tick
const MOVE_SPEED: f32 = 4.0;

/// Stick deflection below this does not move the player
const STICK_DEADZONE: f32 = 0.4;

pub fn make_floor(position: Vec3) -> Sprite {
    Sprite::new(position, Vec2::splat(TILE_SIZE), Some("floor"))
}

pub fn make_wall(position: Vec3) -> Sprite {
    Sprite::new(position, Vec2::splat(TILE_SIZE), Some("wall"))
}

/// Move `sprite` by its velocity for one tick, sliding along walls
///
/// Each axis is tested separately against every wall so the sprite can
/// keep moving along one axis while the other is blocked. A blocked
/// axis snaps the sprite just clear of the wall and zeroes that
/// velocity component.
fn move_against_walls(sprite: &mut Sprite, time_step: f32, walls: &[Sprite]) {
    let mut position = sprite.position();
    let mut velocity = sprite.body.velocity;
    for wall in walls {
        sprite.set_position(Vec3::new(
            position.x + velocity.x * time_step,
            position.y,
            position.z,
        ));
        let hit_x = sprite.intersects(wall);
        sprite.set_position(Vec3::new(
            position.x,
            position.y + velocity.y * time_step,
            position.z,
        ));
        let hit_y = sprite.intersects(wall);
        if hit_x {
            if velocity.x < 0.0 {
                position.x = wall.position().x + wall.dimensions.x + 0.1;
            } else if velocity.x > 0.0 {
                position.x = wall.position().x - sprite.dimensions.x - 0.1;
            }
            velocity.x = 0.0;
        }
        if hit_y {
            if velocity.y < 0.0 {
                position.y = wall.position().y + wall.dimensions.y + 0.1;
            } else if velocity.y > 0.0 {
                position.y = wall.position().y - sprite.dimensions.y - 0.1;
            }
            velocity.y = 0.0;
        }
    }
    position.x += velocity.x * time_step;
    position.y += velocity.y * time_step;
    sprite.set_position(position);
    sprite.body.velocity = velocity;
}

/// The player-controlled character
pub struct Player {
    pub sprite: Sprite,
    animation: Animation,
}

impl Player {
    pub fn new(position: Vec3, target_ups: f32) -> Self {
        Self {
            sprite: Sprite::new(position, Vec2::splat(64.0), Some("player")),
            animation: Animation::new(UVec2::new(5, 1), target_ups / 6.0),
        }
    }

    /// Read WASD and the first controller's left stick into velocity
    pub fn process_input(&mut self, input: &InputManager) {
        let stick_x = input.controller_axis(0, Axis::LeftStickX);
        let stick_y = input.controller_axis(0, Axis::LeftStickY);
        self.sprite.body.velocity.x = if input.is_key_down(KeyCode::KeyA) || stick_x < -STICK_DEADZONE
        {
            -MOVE_SPEED
        } else if input.is_key_down(KeyCode::KeyD) || stick_x > STICK_DEADZONE {
            MOVE_SPEED
        } else {
            0.0
        };
        self.sprite.body.velocity.y = if input.is_key_down(KeyCode::KeyS) || stick_y < -STICK_DEADZONE
        {
            -MOVE_SPEED
        } else if input.is_key_down(KeyCode::KeyW) || stick_y > STICK_DEADZONE {
            MOVE_SPEED
        } else {
            0.0
        };
    }

    pub fn update(&mut self, time_step: f32, walls: &[Sprite]) {
        let velocity = self.sprite.body.velocity;
        if velocity.x < 0.0 {
            self.sprite.reflect_horizontal = false;
        } else if velocity.x > 0.0 {
            self.sprite.reflect_horizontal = true;
        }
        if velocity == Vec2::ZERO {
            self.animation.stop();
        } else {
            self.animation.play();
        }
        self.animation.update(time_step);
        self.sprite.texture_box = self.animation.frame_box();
        move_against_walls(&mut self.sprite, time_step, walls);
    }
}

/// A wandering hazard that picks a fresh random velocity every second
pub struct Enemy {
    pub sprite: Sprite,
    animation: Animation,
    velocity_timer: f32,
}

impl Enemy {
    pub fn new(position: Vec3, target_ups: f32) -> Self {
        Self {
            sprite: Sprite::new(position, Vec2::splat(64.0), Some("enemy")),
            animation: Animation::new(UVec2::new(5, 1), target_ups / 4.0),
            velocity_timer: 0.0,
        }
    }

    pub fn update(&mut self, time_step: f32, walls: &[Sprite], rng: &mut GameRng, target_ups: f32) {
        self.velocity_timer += time_step;
        if self.velocity_timer > target_ups {
            self.sprite.body.velocity = Vec2::new(random_step(rng), random_step(rng));
            self.velocity_timer = 0.0;
        }
        self.sprite.reflect_horizontal = self.sprite.body.velocity.x > 0.0;
        if self.sprite.body.velocity == Vec2::ZERO {
            self.animation.stop();
        } else {
            self.animation.play();
        }
        self.animation.update(time_step);
        self.sprite.texture_box = self.animation.frame_box();
        move_against_walls(&mut self.sprite, time_step, walls);
    }
}

/// A signed velocity component in thirds, up to 5/3 either way
fn random_step(rng: &mut GameRng) -> f32 {
    let sign = if rng.next_below(2) == 0 { -1.0 } else { 1.0 };
    sign * rng.next_below(6) as f32 / 3.0
}

/// A collectible that spins in place until the player touches it
pub struct Coin {
    pub sprite: Sprite,
    animation: Animation,
    pub collected: bool,
}

impl Coin {
    pub fn new(position: Vec3, target_ups: f32) -> Self {
        let mut animation = Animation::new(UVec2::new(8, 1), target_ups / 4.0);
        animation.play();
        Self {
            sprite: Sprite::new(position, Vec2::splat(64.0), Some("coin")),
            animation,
            collected: false,
        }
    }

    pub fn update(&mut self, time_step: f32) {
        self.animation.update(time_step);
        self.sprite.texture_box = self.animation.frame_box();
    }
}

/// Decorative ember that floats up across the menu screens
pub struct Spark {
    pub sprite: Sprite,
    animation: Animation,
    life_time: f32,
    flip_timer: f32,
}

impl Spark {
    /// Spawn below the bottom edge at a random column
    pub fn new(rng: &mut GameRng, window: Vec2, target_ups: f32) -> Self {
        let life_time = 3.0 * target_ups + rng.next_below(160) as f32;
        let dimension = 5.0 + rng.next_below(6) as f32;
        let position = Vec3::new(
            rng.next_below((window.x - dimension).max(1.0) as u32) as f32,
            -10.0,
            0.0,
        );
        let mut sprite = Sprite::new(position, Vec2::splat(dimension), Some("spark"));
        let drift = if rng.next_below(2) == 0 { -1.0 } else { 1.0 };
        sprite.body.velocity.x = drift * 3.0 * rng.next_below(2) as f32 / 2.0;
        sprite.body.velocity.y = 4.0 + rng.next_below(5) as f32;
        let mut animation = Animation::new(UVec2::new(5, 1), life_time / 5.0);
        animation.play();
        Self {
            sprite,
            animation,
            life_time,
            flip_timer: 0.0,
        }
    }

    pub fn update(&mut self, time_step: f32, target_ups: f32) {
        self.sprite.update(time_step);
        self.animation.update(time_step);
        self.sprite.texture_box = self.animation.frame_box();
        self.life_time -= time_step;
        self.flip_timer += time_step;
        if self.flip_timer > target_ups {
            self.flip_timer = 0.0;
            self.sprite.body.velocity.x = -self.sprite.body.velocity.x;
        }
    }

    pub fn is_alive(&self) -> bool {
        self.life_time > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_moves_freely_without_walls() {
        let mut player = Player::new(Vec3::ZERO, 60.0);
        player.sprite.body.velocity = Vec2::new(MOVE_SPEED, 0.0);
        player.update(1.0, &[]);
        assert_eq!(player.sprite.position().x, MOVE_SPEED);
    }

    #[test]
    fn test_player_blocked_by_wall() {
        let wall = make_wall(Vec3::new(TILE_SIZE, 0.0, 0.1));
        let mut player = Player::new(Vec3::new(70.0, 0.0, 0.4), 60.0);
        player.sprite.body.velocity = Vec2::new(MOVE_SPEED, 0.0);
        player.update(1.0, &[wall]);
        // Snapped just left of the wall with the x velocity killed.
        assert_eq!(player.sprite.position().x, TILE_SIZE - 64.0 - 0.1);
        assert_eq!(player.sprite.body.velocity.x, 0.0);
    }

    #[test]
    fn test_player_slides_along_wall() {
        let wall = make_wall(Vec3::new(TILE_SIZE, 0.0, 0.1));
        let mut player = Player::new(Vec3::new(70.0, 0.0, 0.4), 60.0);
        player.sprite.body.velocity = Vec2::new(MOVE_SPEED, MOVE_SPEED);
        player.update(1.0, &[wall]);
        assert_eq!(player.sprite.body.velocity.x, 0.0);
        assert_eq!(player.sprite.position().y, MOVE_SPEED);
    }

    #[test]
    fn test_enemy_retunes_velocity_after_a_second() {
        let mut rng = GameRng::new(42);
        let mut enemy = Enemy::new(Vec3::ZERO, 60.0);
        enemy.update(30.0, &[], &mut rng, 60.0);
        assert_eq!(enemy.sprite.body.velocity, Vec2::ZERO);
        enemy.update(31.0, &[], &mut rng, 60.0);
        let velocity = enemy.sprite.body.velocity;
        assert!(velocity.x.abs() <= 5.0 / 3.0 + f32::EPSILON);
        assert!(velocity.y.abs() <= 5.0 / 3.0 + f32::EPSILON);
    }

    #[test]
    fn test_spark_expires_and_flips_drift() {
        let mut rng = GameRng::new(7);
        let mut spark = Spark::new(&mut rng, Vec2::new(800.0, 600.0), 60.0);
        let drift = spark.sprite.body.velocity.x;
        assert!(spark.is_alive());
        spark.update(61.0, 60.0);
        assert_eq!(spark.sprite.body.velocity.x, -drift);
        for _ in 0..20 {
            spark.update(60.0, 60.0);
        }
        assert!(!spark.is_alive());
    }

    #[test]
    fn test_coin_spins() {
        let mut coin = Coin::new(Vec3::ZERO, 60.0);
        let first = coin.sprite.texture_box;
        coin.update(16.0);
        assert_ne!(coin.sprite.texture_box, first);
    }
}
