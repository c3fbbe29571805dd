//! Game state and core simulation types
//!
//! One `GameState` owns the grid, the player, the camera and the enemies. It is
//! mutated only by `tick` and read by the renderer afterwards.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::camera::Camera;
use super::enemy::{BLOODBOUND_RADIUS, Enemy};
use super::entity::MovableEntity;
use super::grid::Grid;
use super::level::{Level, create_test_map, generate_level};
use crate::consts::*;
use crate::settings::Settings;

/// Presentation/debug toggles, kept apart from the simulation rules
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebugState {
    /// Player ignores all damage
    pub immortal: bool,
    /// Renderer shows the camera/player/zoom overlay
    pub overlay: bool,
}

impl DebugState {
    pub fn toggle_immortal(&mut self) {
        self.immortal = !self.immortal;
        log::info!("Debug immortal mode: {}", if self.immortal { "ON" } else { "OFF" });
    }

    pub fn toggle_overlay(&mut self) {
        self.overlay = !self.overlay;
        log::info!("Debug overlay: {}", if self.overlay { "ON" } else { "OFF" });
    }
}

/// The player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: MovableEntity,
    /// Pixels per second
    pub speed: f32,
    pub health: f32,
    pub max_health: f32,
    pub sanity: i32,
    pub alive: bool,
    /// Ticks until the next attack is allowed
    pub attack_cooldown: u32,
}

impl Player {
    pub fn new(pos: Vec2, speed: f32) -> Self {
        Self {
            body: MovableEntity::new(pos.x, pos.y, PLAYER_SIZE, PLAYER_SIZE),
            speed,
            health: PLAYER_MAX_HEALTH as f32,
            max_health: PLAYER_MAX_HEALTH as f32,
            sanity: PLAYER_MAX_SANITY,
            alive: true,
            attack_cooldown: 0,
        }
    }

    pub fn pos(&self) -> Vec2 {
        self.body.pos
    }

    /// Apply damage unless debug immortality is on. Returns true if it killed.
    pub fn take_damage(&mut self, amount: f32, debug: &DebugState) -> bool {
        if debug.immortal || !self.alive {
            return false;
        }
        self.health = (self.health - amount).max(0.0);
        if self.health <= 0.0 {
            self.alive = false;
            log::info!("Player died");
            return true;
        }
        false
    }

    /// Remove up to `amount` sanity and return how much was taken
    pub fn lose_sanity(&mut self, amount: i32) -> i32 {
        let taken = amount.min(self.sanity).max(0);
        self.sanity -= taken;
        taken
    }
}

/// Remains of a dead enemy, fading out
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Corpse {
    pub pos: Vec2,
    pub ticks_left: u32,
}

impl Corpse {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            ticks_left: CORPSE_TICKS,
        }
    }
}

fn default_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Current level number (1-based, 0 for the test map)
    pub level: u32,
    pub grid: Grid,
    pub player: Player,
    pub camera: Camera,
    /// Live enemies (sorted by id)
    pub enemies: Vec<Enemy>,
    pub corpses: Vec<Corpse>,
    /// Ticks until the next spawn attempt
    pub spawn_timer: u32,
    pub debug: DebugState,
    /// Simulation tick counter
    pub time_ticks: u64,
    #[serde(skip, default = "default_rng")]
    pub rng: Pcg32,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game from settings, generating the starting level
    pub fn new(settings: &Settings) -> Self {
        let mut rng = Pcg32::seed_from_u64(settings.seed);
        let generated = if settings.test_map {
            create_test_map(&mut rng)
        } else {
            generate_level(settings.start_level.max(1), &mut rng)
        };
        let camera = Camera::new(
            settings.viewport_width,
            settings.viewport_height,
            generated.grid.pixel_size(),
        )
        .with_mode(settings.follow_mode, settings.camera_smoothing);

        let mut state = Self {
            seed: settings.seed,
            level: generated.number,
            grid: Grid::new(0, 0),
            player: Player::new(Vec2::ZERO, settings.player_speed),
            camera,
            enemies: Vec::new(),
            corpses: Vec::new(),
            spawn_timer: 0,
            debug: DebugState {
                immortal: settings.debug_immortal,
                overlay: settings.debug_overlay,
            },
            time_ticks: 0,
            rng,
            next_id: 1,
        };
        state.camera.set_zoom(settings.zoom);
        state.install_level(generated);
        state
    }

    /// Build a state around an existing grid (for hand-made maps and tests)
    pub fn with_grid(grid: Grid, player_pos: Vec2, settings: &Settings) -> Self {
        let mut state = Self::new(settings);
        state.install_level(Level {
            number: state.level,
            grid,
            player_spawn: player_pos,
            enemies: Vec::new(),
        });
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Replace the current level with a freshly generated one
    pub fn load_level(&mut self, number: u32) {
        let generated = generate_level(number, &mut self.rng);
        self.install_level(generated);
    }

    fn install_level(&mut self, level: Level) {
        log::info!(
            "Level {}: {}x{} tiles, {} enemies",
            level.number,
            level.grid.width(),
            level.grid.height(),
            level.enemies.len()
        );
        self.level = level.number;
        self.grid = level.grid;
        self.player.body.pos = level.player_spawn;
        self.corpses.clear();
        self.enemies.clear();
        for (kind, pos) in level.enemies {
            let id = self.next_entity_id();
            let enemy = Enemy::spawn(id, kind, pos, &mut self.rng);
            self.enemies.push(enemy);
        }
        self.camera.set_world(self.grid.pixel_size());
        self.camera.snap_to(&self.player.body);
    }

    /// Corpses within reach of a bloodbound spawn at `pos`
    pub fn corpses_near(&self, pos: Vec2) -> usize {
        self.corpses
            .iter()
            .filter(|c| crate::distance(c.pos, pos) < BLOODBOUND_RADIUS)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_places_player_on_clear_ground() {
        let state = GameState::new(&Settings::default());
        assert_eq!(state.level, 1);
        assert!(state.grid.is_area_clear(state.player.pos(), state.player.body.size));
        for enemy in &state.enemies {
            assert!(state.grid.is_area_clear(enemy.pos(), enemy.body.size));
        }
    }

    #[test]
    fn test_same_seed_same_level() {
        let a = GameState::new(&Settings::default());
        let b = GameState::new(&Settings::default());
        assert_eq!(a.grid, b.grid);
        assert_eq!(a.player.pos(), b.player.pos());
        assert_eq!(a.enemies.len(), b.enemies.len());
    }

    #[test]
    fn test_load_level_resets_world() {
        let mut state = GameState::new(&Settings::default());
        state.corpses.push(Corpse::new(Vec2::ZERO));
        state.load_level(3);
        assert_eq!(state.level, 3);
        assert!(state.corpses.is_empty());
        assert_eq!(state.grid.width(), 39);
        assert_eq!(state.camera.world(), state.grid.pixel_size());
    }

    #[test]
    fn test_player_damage_respects_immortality() {
        let mut player = Player::new(Vec2::ZERO, PLAYER_SPEED);
        let mut debug = DebugState::default();
        debug.toggle_immortal();
        assert!(!player.take_damage(500.0, &debug));
        assert_eq!(player.health, player.max_health);

        debug.toggle_immortal();
        assert!(!player.take_damage(30.0, &debug));
        assert_eq!(player.health, player.max_health - 30.0);
        assert!(player.take_damage(500.0, &debug));
        assert!(!player.alive);
        assert_eq!(player.health, 0.0);
    }

    #[test]
    fn test_lose_sanity_never_negative() {
        let mut player = Player::new(Vec2::ZERO, PLAYER_SPEED);
        player.sanity = 1;
        assert_eq!(player.lose_sanity(2), 1);
        assert_eq!(player.sanity, 0);
        assert_eq!(player.lose_sanity(2), 0);
    }

    #[test]
    fn test_test_map_setting() {
        let settings = Settings {
            test_map: true,
            ..Default::default()
        };
        let state = GameState::new(&settings);
        assert_eq!(state.level, 0);
        assert_eq!(state.grid.width(), 30);
        assert_eq!(state.grid.height(), 30);
        assert_eq!(state.enemies.len(), 5);
        assert_eq!(state.camera.world(), Vec2::splat(30.0 * TILE_SIZE));
    }

    #[test]
    fn test_bad_viewport_settings_keep_camera_clamped() {
        let settings = Settings {
            viewport_width: -800.0,
            viewport_height: f32::NAN,
            ..Default::default()
        };
        let state = GameState::new(&settings);
        let camera = &state.camera;
        assert_eq!(camera.viewport(), Vec2::splat(crate::sim::camera::MIN_VIEWPORT));
        let (min, max) = camera.visible_rect();
        assert!(min.x >= 0.0 && min.y >= 0.0);
        assert!(max.x <= camera.world().x + 1e-3 && max.y <= camera.world().y + 1e-3);
    }

    #[test]
    fn test_corpses_near() {
        let mut state = GameState::new(&Settings::default());
        state.corpses.clear();
        state.corpses.push(Corpse::new(Vec2::new(0.0, 0.0)));
        state.corpses.push(Corpse::new(Vec2::new(50.0, 0.0)));
        state.corpses.push(Corpse::new(Vec2::new(500.0, 0.0)));
        assert_eq!(state.corpses_near(Vec2::new(10.0, 0.0)), 2);
    }

    #[test]
    fn test_state_serializes() {
        let state = GameState::new(&Settings::default());
        let json = serde_json::to_string(&state).unwrap();
        let back: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(back.grid, state.grid);
        assert_eq!(back.enemies.len(), state.enemies.len());
    }
}
