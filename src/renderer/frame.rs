//! Screen-space description of one frame
//!
//! Everything here is in screen pixels: positions come from
//! `Camera::world_to_screen` and sizes are scaled by the zoom. Items entirely
//! outside the viewport are culled.

use glam::Vec2;

use crate::consts::{CORPSE_TICKS, TILE_SIZE};
use crate::sim::Camera;
use crate::sim::enemy::{Enemy, EnemyKind};
use crate::sim::grid::{SOLID_TILE, TileCode};
use crate::sim::state::GameState;

/// Health bar thickness and gap above the enemy (world pixels)
const HEALTH_BAR_HEIGHT: f32 = 5.0;
const HEALTH_BAR_OFFSET: f32 = 10.0;
/// Corpse marker edge (world pixels)
const CORPSE_SIZE: f32 = 20.0;

fn rgb(r: u8, g: u8, b: u8) -> [f32; 4] {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
}

/// Fill color for a tile code; `None` for tiles that are not drawn
pub fn tile_color(code: TileCode) -> Option<[f32; 4]> {
    match code {
        0 => None,
        SOLID_TILE => Some(rgb(80, 80, 96)),
        2 => Some(rgb(40, 90, 40)),
        _ => Some(rgb(120, 100, 60)),
    }
}

/// Body color per enemy kind
pub fn enemy_color(kind: EnemyKind) -> [f32; 4] {
    match kind {
        EnemyKind::Regular => rgb(255, 0, 0),
        EnemyKind::FleeingShadow => rgb(100, 0, 100),
        EnemyKind::Mimic => rgb(255, 0, 0),
        EnemyKind::CorruptedThief => rgb(0, 100, 100),
        EnemyKind::BloodboundSpawn => rgb(150, 0, 0),
    }
}

const PLAYER_COLOR: [f32; 4] = [0.2, 0.6, 1.0, 1.0];
const CHEST_COLOR: [f32; 4] = [139.0 / 255.0, 69.0 / 255.0, 19.0 / 255.0, 1.0];
const CHEST_LID_COLOR: [f32; 4] = [1.0, 215.0 / 255.0, 0.0, 1.0];
const HEALTH_BACK_COLOR: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
const HEALTH_FRONT_COLOR: [f32; 4] = [0.0, 1.0, 0.0, 1.0];

/// What a quad depicts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuadKind {
    Tile(TileCode),
    Corpse,
    Enemy(u32),
    HealthBar(u32),
    Player,
}

/// A filled screen-space rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    pub kind: QuadKind,
    /// Top-left corner in screen pixels
    pub pos: Vec2,
    /// Extent in screen pixels
    pub size: Vec2,
    pub color: [f32; 4],
}

/// Render-side snapshot of the game, built after the update phase
#[derive(Debug, Clone, Default)]
pub struct FrameView {
    /// Draw order: tiles, corpses, enemies, player
    pub quads: Vec<Quad>,
    /// HUD text lines, not affected by zoom
    pub overlay: Vec<String>,
}

impl FrameView {
    pub fn build(state: &GameState) -> Self {
        let mut view = FrameView::default();
        let camera = &state.camera;

        let (cols, rows) = camera.visible_tile_range(&state.grid);
        for y in rows {
            for x in cols.clone() {
                let Ok(code) = state.grid.tile_at(x as i64, y as i64) else {
                    continue;
                };
                if let Some(color) = tile_color(code) {
                    let world = Vec2::new(x as f32, y as f32) * TILE_SIZE;
                    view.push(camera, QuadKind::Tile(code), world, Vec2::splat(TILE_SIZE), color);
                }
            }
        }

        for corpse in &state.corpses {
            let fade = (corpse.ticks_left as f32 / CORPSE_TICKS as f32).clamp(0.0, 1.0);
            view.push(
                camera,
                QuadKind::Corpse,
                corpse.pos,
                Vec2::splat(CORPSE_SIZE),
                [100.0 / 255.0, 0.0, 0.0, fade],
            );
        }

        for enemy in state.enemies.iter().filter(|e| e.active) {
            view.push_enemy(camera, enemy);
        }

        let player = &state.player.body;
        view.push(camera, QuadKind::Player, player.pos, player.size, PLAYER_COLOR);

        if state.debug.immortal {
            view.overlay.push("DEBUG MODE: IMMORTAL".to_string());
        }
        if state.debug.overlay {
            view.overlay.push(format!(
                "Camera: {},{}",
                camera.x().round(),
                camera.y().round()
            ));
            view.overlay.push(format!(
                "Player: {:.1},{:.1}",
                player.pos.x, player.pos.y
            ));
            view.overlay.push(format!("Zoom: {:.1}", camera.zoom()));
            view.overlay.push(format!(
                "Health: {:.0}  Sanity: {}  Enemies: {}",
                state.player.health,
                state.player.sanity,
                state.enemies.len()
            ));
        }

        view
    }

    /// Transform and cull a world rectangle
    fn push(&mut self, camera: &Camera, kind: QuadKind, world: Vec2, size: Vec2, color: [f32; 4]) {
        if !camera.is_rect_visible(world, size) {
            return;
        }
        self.quads.push(Quad {
            kind,
            pos: camera.world_to_screen(world),
            size: size * camera.zoom(),
            color,
        });
    }

    fn push_enemy(&mut self, camera: &Camera, enemy: &Enemy) {
        let body = &enemy.body;
        if enemy.disguised {
            // Mimics look like a treasure chest
            self.push(camera, QuadKind::Enemy(enemy.id), body.pos, body.size, CHEST_COLOR);
            let inset = Vec2::splat(5.0);
            self.push(
                camera,
                QuadKind::Enemy(enemy.id),
                body.pos + inset,
                (body.size - inset * 2.0).max(Vec2::ZERO),
                CHEST_LID_COLOR,
            );
            return;
        }

        self.push(camera, QuadKind::Enemy(enemy.id), body.pos, body.size, enemy_color(enemy.kind));

        let ratio = (enemy.health as f32 / enemy.max_health.max(1) as f32).clamp(0.0, 1.0);
        let bar = body.pos - Vec2::new(0.0, HEALTH_BAR_OFFSET);
        self.push(
            camera,
            QuadKind::HealthBar(enemy.id),
            bar,
            Vec2::new(body.size.x, HEALTH_BAR_HEIGHT),
            HEALTH_BACK_COLOR,
        );
        if ratio > 0.0 {
            self.push(
                camera,
                QuadKind::HealthBar(enemy.id),
                bar,
                Vec2::new(body.size.x * ratio, HEALTH_BAR_HEIGHT),
                HEALTH_FRONT_COLOR,
            );
        }
    }

    /// Quads of one kind
    pub fn count(&self, kind: QuadKind) -> usize {
        self.quads.iter().filter(|q| q.kind == kind).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::ENEMY_SIZE;
    use crate::settings::Settings;
    use crate::sim::grid::Grid;
    use crate::sim::state::Corpse;

    fn bordered_state(width: usize, height: usize, zoom: f32) -> GameState {
        let mut grid = Grid::new(width, height);
        grid.fill_border(SOLID_TILE);
        let settings = Settings {
            viewport_width: 320.0,
            viewport_height: 320.0,
            zoom,
            ..Default::default()
        };
        GameState::with_grid(grid, Vec2::splat(TILE_SIZE + 4.0), &settings)
    }

    #[test]
    fn test_small_map_draws_every_wall() {
        let state = bordered_state(5, 5, 1.0);
        let view = FrameView::build(&state);
        assert_eq!(view.count(QuadKind::Tile(SOLID_TILE)), 16);
        assert_eq!(view.count(QuadKind::Player), 1);
    }

    #[test]
    fn test_offscreen_tiles_are_culled() {
        let state = bordered_state(100, 100, 2.0);
        let view = FrameView::build(&state);
        let walls = view.count(QuadKind::Tile(SOLID_TILE));
        assert!(walls > 0);
        assert!(walls < 100);
        for quad in &view.quads {
            assert!(quad.pos.x + quad.size.x > 0.0 && quad.pos.x < 320.0);
            assert!(quad.pos.y + quad.size.y > 0.0 && quad.pos.y < 320.0);
        }
    }

    #[test]
    fn test_player_quad_matches_camera_transform() {
        let state = bordered_state(40, 40, 1.5);
        let view = FrameView::build(&state);
        let quad = view.quads.iter().find(|q| q.kind == QuadKind::Player).unwrap();
        assert_eq!(quad.pos, state.camera.world_to_screen(state.player.pos()));
        assert_eq!(quad.size, state.player.body.size * 1.5);
    }

    #[test]
    fn test_enemy_health_bar_and_mimic_disguise() {
        let mut state = bordered_state(10, 10, 1.0);
        let near = state.player.pos() + Vec2::new(60.0, 60.0);
        let id = state.next_entity_id();
        let mut hurt = Enemy::with_stats(id, EnemyKind::Regular, near, 1.0, 100, 5.0);
        hurt.take_damage(50);
        state.enemies.push(hurt);
        let mimic_id = state.next_entity_id();
        state
            .enemies
            .push(Enemy::with_stats(mimic_id, EnemyKind::Mimic, near + Vec2::X * 40.0, 1.0, 120, 20.0));

        let view = FrameView::build(&state);
        assert_eq!(view.count(QuadKind::HealthBar(id)), 2);
        assert_eq!(view.count(QuadKind::Enemy(mimic_id)), 2);
        assert_eq!(view.count(QuadKind::HealthBar(mimic_id)), 0);

        let front = view
            .quads
            .iter()
            .filter(|q| q.kind == QuadKind::HealthBar(id))
            .nth(1)
            .unwrap();
        assert!((front.size.x - ENEMY_SIZE * 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_corpse_fades() {
        let mut state = bordered_state(10, 10, 1.0);
        let mut corpse = Corpse::new(Vec2::splat(100.0));
        corpse.ticks_left = CORPSE_TICKS / 2;
        state.corpses.push(corpse);
        let view = FrameView::build(&state);
        let quad = view.quads.iter().find(|q| q.kind == QuadKind::Corpse).unwrap();
        assert!((quad.color[3] - 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_overlay_lines() {
        let mut state = bordered_state(10, 10, 1.0);
        assert!(FrameView::build(&state).overlay.is_empty());

        state.debug.overlay = true;
        state.debug.immortal = true;
        let view = FrameView::build(&state);
        assert_eq!(view.overlay[0], "DEBUG MODE: IMMORTAL");
        assert!(view.overlay.iter().any(|l| l.starts_with("Camera: ")));
        assert!(view.overlay.iter().any(|l| l == "Zoom: 1.0"));
    }
}
