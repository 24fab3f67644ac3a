//! Text tile map parsing

use ember_core::{EmberError, Result};
use glam::Vec3;
use std::path::Path;

/// World size of one map cell in pixels
pub const TILE_SIZE: f32 = 128.0;

/// Entity centers sit this far into their cell
const SPAWN_OFFSET: f32 = 32.0;

/// Spawn positions read from a map file
///
/// Each character is one 128-pixel cell. The first line of the file is
/// the top row of the world, so it gets the highest y coordinate. Every
/// cell gets a floor; `#` adds a wall, `@` a coin, `!` an enemy, and
/// `P` moves the player spawn. Any other character is bare floor. When
/// several `P` cells appear the last one wins.
#[derive(Clone, Debug, Default)]
pub struct Map {
    pub floors: Vec<Vec3>,
    pub walls: Vec<Vec3>,
    pub coins: Vec<Vec3>,
    pub enemies: Vec<Vec3>,
    pub player: Option<Vec3>,
}

impl Map {
    /// Parse map text; never fails, unknown characters are floor
    pub fn parse(text: &str) -> Self {
        let lines: Vec<&str> = text.lines().collect();
        let mut map = Self::default();
        for (row, line) in lines.iter().enumerate() {
            let ty = (lines.len() - 1 - row) as f32 * TILE_SIZE;
            for (col, cell) in line.chars().enumerate() {
                let tx = col as f32 * TILE_SIZE;
                map.floors.push(Vec3::new(tx, ty, 0.0));
                match cell {
                    '#' => map.walls.push(Vec3::new(tx, ty, 0.1)),
                    '@' => map
                        .coins
                        .push(Vec3::new(tx + SPAWN_OFFSET, ty + SPAWN_OFFSET, 0.2)),
                    '!' => map
                        .enemies
                        .push(Vec3::new(tx + SPAWN_OFFSET, ty + SPAWN_OFFSET, 0.3)),
                    'P' => {
                        map.player = Some(Vec3::new(tx + SPAWN_OFFSET, ty + SPAWN_OFFSET, 0.4));
                    }
                    _ => {}
                }
            }
        }
        map
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            EmberError::ParseError(format!("failed to read map {}: {e}", path.display()))
        })?;
        Ok(Self::parse(&text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_per_cell_kind() {
        let map = Map::parse("#@#\n#P#\n###");
        assert_eq!(map.floors.len(), 9);
        assert_eq!(map.walls.len(), 7);
        assert_eq!(map.coins.len(), 1);
        assert!(map.enemies.is_empty());
        assert!(map.player.is_some());
    }

    #[test]
    fn test_first_line_is_top_row() {
        let map = Map::parse("#@#\n#P#\n###");
        // The coin is on the first line, two rows above the bottom.
        assert_eq!(
            map.coins[0],
            Vec3::new(TILE_SIZE + 32.0, 2.0 * TILE_SIZE + 32.0, 0.2)
        );
        let player = map.player.unwrap();
        assert_eq!(player, Vec3::new(TILE_SIZE + 32.0, TILE_SIZE + 32.0, 0.4));
    }

    #[test]
    fn test_walls_on_tile_corners() {
        let map = Map::parse("#\n!");
        assert_eq!(map.walls[0], Vec3::new(0.0, TILE_SIZE, 0.1));
        assert_eq!(map.enemies[0], Vec3::new(32.0, 32.0, 0.3));
    }

    #[test]
    fn test_last_player_spawn_wins() {
        let map = Map::parse("P.\n.P");
        assert_eq!(map.player.unwrap(), Vec3::new(TILE_SIZE + 32.0, 32.0, 0.4));
        assert_eq!(map.floors.len(), 4);
    }

    #[test]
    fn test_ragged_rows_allowed() {
        let map = Map::parse("##\n#");
        assert_eq!(map.floors.len(), 3);
        assert_eq!(map.walls.len(), 3);
    }
}
