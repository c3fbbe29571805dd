//! Tile Crawl - a tile-based dungeon crawler core
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (grid, collision, camera, enemies, game state)
//! - `renderer`: Screen-space frame description for an external renderer
//! - `settings`: Data-driven configuration loaded from JSON

pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};
pub use sim::camera::FollowMode;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Pixels per tile edge. Shared by the grid, entities and camera.
    pub const TILE_SIZE: f32 = 32.0;

    /// Fixed simulation timestep (60 Hz, one tick per frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Camera zoom (>1 magnifies)
    pub const DEFAULT_ZOOM: f32 = 1.5;
    pub const MIN_ZOOM: f32 = 0.5;
    pub const MAX_ZOOM: f32 = 4.0;
    /// Zoom change per key press
    pub const ZOOM_STEP: f32 = 0.1;
    /// Fraction of the remaining distance covered per follow in smooth mode
    pub const CAMERA_SMOOTHING: f32 = 0.1;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 24.0;
    /// Player speed in pixels per second
    pub const PLAYER_SPEED: f32 = 180.0;
    pub const PLAYER_MAX_HEALTH: i32 = 100;
    pub const PLAYER_MAX_SANITY: i32 = 100;
    /// Melee attack reach measured between box centers (pixels)
    pub const PLAYER_ATTACK_RANGE: f32 = 48.0;
    pub const PLAYER_ATTACK_DAMAGE: i32 = 25;
    /// Ticks between two player attacks
    pub const PLAYER_ATTACK_COOLDOWN: u32 = 30;

    /// Enemy box edge
    pub const ENEMY_SIZE: f32 = TILE_SIZE - 10.0;
    /// Enemy speeds are authored in pixels per 1/60 s frame
    pub const ENEMY_SPEED_SCALE: f32 = 60.0;
    /// Hard cap on live enemies
    pub const MAX_ENEMIES: usize = 12;
    /// Ticks between two contact attacks of the same enemy
    pub const ENEMY_ATTACK_COOLDOWN: u32 = 60;
    /// Ticks a corpse stays on the floor
    pub const CORPSE_TICKS: u32 = 300;
    /// Minimum spawn distance from the player (pixels)
    pub const SPAWN_MIN_DISTANCE: f32 = 300.0;
    pub const SPAWN_ATTEMPTS: u32 = 10;
}

/// Length of `a - b`
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (a - b).length()
}

/// Unit vector from `from` toward `to`, zero when the points coincide
#[inline]
pub fn direction_to(from: Vec2, to: Vec2) -> Vec2 {
    (to - from).normalize_or_zero()
}
