//! Level generation
//!
//! Levels grow with the level number: more room and more enemies. Layout is a
//! solid border with random interior walls; the player always starts in the
//! top-left interior tile.

use glam::Vec2;
use rand::Rng;

use super::enemy::EnemyKind;
use super::grid::{EMPTY_TILE, Grid, SOLID_TILE};
use crate::consts::{ENEMY_SIZE, MAX_ENEMIES, PLAYER_SIZE, TILE_SIZE};

/// Base map size at level 0
pub const BASE_WIDTH: usize = 30;
pub const BASE_HEIGHT: usize = 20;
/// Extra columns/rows per level
pub const WIDTH_PER_LEVEL: usize = 3;
pub const HEIGHT_PER_LEVEL: usize = 2;
/// One interior wall per this many interior tiles
pub const OBSTACLE_DENSITY: usize = 16;
/// Tries per enemy before giving up on a placement
const PLACEMENT_ATTEMPTS: u32 = 100;

/// Tile the player starts on
pub const PLAYER_SPAWN_TILE: (i64, i64) = (1, 1);

/// A generated level, ready to be installed into a `GameState`
#[derive(Debug, Clone)]
pub struct Level {
    pub number: u32,
    pub grid: Grid,
    pub player_spawn: Vec2,
    pub enemies: Vec<(EnemyKind, Vec2)>,
}

/// Map size in tiles for a level
pub fn level_dimensions(level: u32) -> (usize, usize) {
    let level = level as usize;
    (
        BASE_WIDTH + level * WIDTH_PER_LEVEL,
        BASE_HEIGHT + level * HEIGHT_PER_LEVEL,
    )
}

/// Enemies placed at level start
pub fn enemy_count(level: u32) -> usize {
    (2 + level as usize).min(MAX_ENEMIES)
}

/// Top-left pixel that centers a box of `size` inside a tile
fn centered_in_tile((x, y): (i64, i64), size: f32) -> Vec2 {
    let inset = (TILE_SIZE - size) * 0.5;
    Vec2::new(x as f32 * TILE_SIZE + inset, y as f32 * TILE_SIZE + inset)
}

/// Scatter `count` interior walls (may repeat tiles)
fn scatter_walls<R: Rng + ?Sized>(grid: &mut Grid, count: usize, rng: &mut R) {
    let (w, h) = (grid.width() as i64, grid.height() as i64);
    if w < 3 || h < 3 {
        return;
    }
    for _ in 0..count {
        let x = rng.random_range(1..w - 1);
        let y = rng.random_range(1..h - 1);
        let _ = grid.set_tile(x, y, SOLID_TILE);
    }
}

/// A random empty interior tile other than `avoid`
fn random_empty_tile<R: Rng + ?Sized>(
    grid: &Grid,
    avoid: (i64, i64),
    rng: &mut R,
) -> Option<(i64, i64)> {
    let (w, h) = (grid.width() as i64, grid.height() as i64);
    if w < 3 || h < 3 {
        return None;
    }
    (0..PLACEMENT_ATTEMPTS)
        .map(|_| (rng.random_range(1..w - 1), rng.random_range(1..h - 1)))
        .find(|&tile| tile != avoid && grid.tile_at(tile.0, tile.1) == Ok(EMPTY_TILE))
}

fn build_level<R: Rng + ?Sized>(
    number: u32,
    width: usize,
    height: usize,
    walls: usize,
    enemies: usize,
    roll_kinds: bool,
    rng: &mut R,
) -> Level {
    let mut grid = Grid::new(width, height);
    grid.fill_border(SOLID_TILE);
    scatter_walls(&mut grid, walls, rng);
    let _ = grid.set_tile(PLAYER_SPAWN_TILE.0, PLAYER_SPAWN_TILE.1, EMPTY_TILE);

    let mut placed = Vec::with_capacity(enemies);
    for _ in 0..enemies {
        let Some(tile) = random_empty_tile(&grid, PLAYER_SPAWN_TILE, rng) else {
            log::warn!("No room for another enemy on level {}", number);
            break;
        };
        let kind = if roll_kinds {
            EnemyKind::roll(rng)
        } else {
            EnemyKind::Regular
        };
        placed.push((kind, centered_in_tile(tile, ENEMY_SIZE)));
    }

    Level {
        number,
        grid,
        player_spawn: centered_in_tile(PLAYER_SPAWN_TILE, PLAYER_SIZE),
        enemies: placed,
    }
}

/// Generate a level sized and populated for `number`
pub fn generate_level<R: Rng + ?Sized>(number: u32, rng: &mut R) -> Level {
    let (width, height) = level_dimensions(number);
    let walls = (width - 2) * (height - 2) / OBSTACLE_DENSITY;
    log::debug!("Generating level {} ({}x{}, {} walls)", number, width, height, walls);
    build_level(number, width, height, walls, enemy_count(number), true, rng)
}

/// Fixed 30x30 test map: border, 50 random walls and 5 regular enemies
pub fn create_test_map<R: Rng + ?Sized>(rng: &mut R) -> Level {
    build_level(0, 30, 30, 50, 5, false, rng)
}
