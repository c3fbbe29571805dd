//! Frame-stepped simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering and
//! platform dependencies:
//! - One update per frame, fixed timestep
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)

pub mod camera;
pub mod collision;
pub mod enemy;
pub mod entity;
pub mod grid;
pub mod level;
pub mod state;
pub mod tick;

pub use camera::Camera;
pub use collision::{Axis, resolve, resolve_axis, tile_span};
pub use enemy::{Enemy, EnemyKind};
pub use entity::MovableEntity;
pub use grid::{Grid, GridError, TileCode};
pub use level::{Level, create_test_map, enemy_count, generate_level, level_dimensions};
pub use state::{Corpse, DebugState, GameState, Player};
pub use tick::{TickInput, spawn_enemies, tick};
