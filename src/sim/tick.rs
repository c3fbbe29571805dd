//! Fixed timestep simulation tick
//!
//! Update order per tick: debug/zoom input, player move + collision, player
//! attack, enemies, corpses, spawning, then the camera follows the corrected
//! player position.

use glam::Vec2;
use rand::Rng;

use super::collision;
use super::enemy::{BLOODBOUND_RADIUS, Enemy, EnemyKind, THIEF_STEAL};
use super::state::{Corpse, GameState};
use crate::consts::*;
use crate::distance;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Desired movement direction; longer than 1 is clamped
    pub move_dir: Vec2,
    /// Melee attack on enemies in reach
    pub attack: bool,
    /// Toggle debug immortality (F1)
    pub toggle_immortal: bool,
    /// Toggle the debug overlay (F2)
    pub toggle_overlay: bool,
    pub zoom_in: bool,
    pub zoom_out: bool,
    pub reset_zoom: bool,
}

/// Turns variable frame times into a bounded number of fixed ticks
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    accumulator: f32,
}

impl FrameClock {
    /// Add a frame's elapsed time and return how many ticks to run
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        if frame_dt.is_finite() && frame_dt > 0.0 {
            self.accumulator += frame_dt.min(0.1);
        }
        let mut ticks = 0;
        while self.accumulator >= SIM_DT && ticks < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            ticks += 1;
        }
        ticks
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if input.toggle_immortal {
        state.debug.toggle_immortal();
    }
    if input.toggle_overlay {
        state.debug.toggle_overlay();
    }
    if input.zoom_in {
        state.camera.zoom_in();
    }
    if input.zoom_out {
        state.camera.zoom_out();
    }
    if input.reset_zoom {
        state.camera.reset_zoom();
    }

    // Dead players stop the world
    if !state.player.alive {
        return;
    }
    state.time_ticks += 1;

    move_player(state, input.move_dir, dt);

    state.player.attack_cooldown = state.player.attack_cooldown.saturating_sub(1);
    if input.attack && state.player.attack_cooldown == 0 {
        player_attack(state);
    }

    update_enemies(state, dt);
    update_corpses(state);
    spawn_enemies(state);

    state.camera.follow(&state.player.body);
}

fn move_player(state: &mut GameState, dir: Vec2, dt: f32) {
    let dir = dir.clamp_length_max(1.0);
    if dir == Vec2::ZERO || !dir.is_finite() {
        return;
    }
    let proposed = state.player.body.pos + dir * state.player.speed * dt;
    state.player.body.pos = collision::resolve(&state.grid, &state.player.body, proposed);
}

/// Hit every enemy whose center is within reach of the player's center
fn player_attack(state: &mut GameState) {
    state.player.attack_cooldown = PLAYER_ATTACK_COOLDOWN;
    let center = state.player.body.center();
    for enemy in state.enemies.iter_mut().filter(|e| e.active) {
        if distance(enemy.body.center(), center) <= PLAYER_ATTACK_RANGE
            && enemy.take_damage(PLAYER_ATTACK_DAMAGE)
        {
            log::info!("Killed {} #{}", enemy.kind.as_str(), enemy.id);
        }
    }
}

fn update_enemies(state: &mut GameState, dt: f32) {
    let GameState {
        grid,
        player,
        enemies,
        corpses,
        debug,
        rng,
        ..
    } = state;

    for enemy in enemies.iter_mut() {
        let nearby = corpses
            .iter()
            .filter(|c| distance(c.pos, enemy.pos()) < BLOODBOUND_RADIUS)
            .count();
        let Some(contact) = enemy.update(grid, &player.body, nearby, &mut *rng, dt) else {
            continue;
        };
        if contact.steals_sanity {
            enemy.stolen_sanity += player.lose_sanity(THIEF_STEAL);
        }
        if let Some(damage) = contact.damage {
            player.take_damage(damage, debug);
        }
    }

    for dead in enemies.iter().filter(|e| !e.active) {
        corpses.push(Corpse::new(dead.pos()));
    }
    enemies.retain(|e| e.active);
}

fn update_corpses(state: &mut GameState) {
    state.corpses.retain_mut(|corpse| {
        corpse.ticks_left = corpse.ticks_left.saturating_sub(1);
        corpse.ticks_left > 0
    });
}

/// Try to spawn one enemy away from the player.
///
/// Does nothing at the enemy cap. Otherwise counts the spawn timer down and,
/// once it has run out, makes up to `SPAWN_ATTEMPTS` tries at a clear spot at
/// least `SPAWN_MIN_DISTANCE` from the player. Returns the new enemy's id.
pub fn spawn_enemies(state: &mut GameState) -> Option<u32> {
    if state.enemies.len() >= MAX_ENEMIES {
        return None;
    }
    if state.spawn_timer > 0 {
        state.spawn_timer -= 1;
        return None;
    }

    let margin = TILE_SIZE * 2.0;
    let max = state.grid.pixel_size() - Vec2::splat(margin);
    if max.x <= margin || max.y <= margin {
        return None;
    }

    let size = Vec2::splat(ENEMY_SIZE);
    for _ in 0..SPAWN_ATTEMPTS {
        let candidate = Vec2::new(
            state.rng.random_range(margin..max.x).floor(),
            state.rng.random_range(margin..max.y).floor(),
        );
        if distance(candidate, state.player.pos()) <= SPAWN_MIN_DISTANCE
            || !state.grid.is_area_clear(candidate, size)
        {
            continue;
        }

        let kind = EnemyKind::roll(&mut state.rng);
        let id = state.next_entity_id();
        let enemy = Enemy::spawn(id, kind, candidate, &mut state.rng);
        log::debug!("Spawned {} #{} at {:?}", kind.as_str(), id, candidate);
        state.enemies.push(enemy);
        state.spawn_timer = state.rng.random_range(60..=180);
        return Some(id);
    }
    None
}
