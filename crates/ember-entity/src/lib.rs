//! Ember Entity - Drawable primitives
//!
//! Provides the building blocks scenes draw and move:
//! - `Entity` — position plus velocity with explicit Euler integration
//! - `Sprite` — a textured, tinted, rotatable quad built fresh every draw
//! - `Animation` — frame-grid animation advanced by accumulated time

mod animation;
mod sprite;

pub use animation::Animation;
pub use sprite::{Entity, Sprite, SpriteVertex, MODE_COLOR, MODE_GLYPH, MODE_TEXTURED, QUAD_INDICES};
