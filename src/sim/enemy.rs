//! Enemies and their per-kind behaviour

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision;
use super::entity::MovableEntity;
use super::grid::Grid;
use crate::consts::{ENEMY_ATTACK_COOLDOWN, ENEMY_SIZE, ENEMY_SPEED_SCALE};
use crate::{direction_to, distance};

/// Mimics wake up when the player comes this close (pixels)
pub const MIMIC_TRIGGER_RANGE: f32 = 60.0;
/// Mimic speed once awake (pixels per frame)
pub const MIMIC_TRIGGERED_SPEED: f32 = 3.0;
/// Shadows may teleport below this fraction of max health
pub const SHADOW_TELEPORT_HEALTH: f32 = 0.4;
/// Per-tick teleport chance when eligible
pub const SHADOW_TELEPORT_CHANCE: f64 = 0.03;
pub const SHADOW_TELEPORT_COOLDOWN: u32 = 180;
pub const SHADOW_TELEPORT_ATTEMPTS: u32 = 50;
/// Teleport targets keep this distance from the world edge
pub const SHADOW_TELEPORT_MARGIN: f32 = 100.0;
/// Sanity stolen per contact tick by a thief
pub const THIEF_STEAL: i32 = 2;
/// Corpses within this radius strengthen bloodbound spawns
pub const BLOODBOUND_RADIUS: f32 = 100.0;
/// Damage bonus per nearby corpse
pub const BLOODBOUND_BONUS: f32 = 0.2;

/// Enemy types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    Regular,
    /// Fast, fragile, teleports away when hurt
    FleeingShadow,
    /// Sits still disguised as a chest until the player comes close
    Mimic,
    /// Steals sanity on contact
    CorruptedThief,
    /// Grows stronger near corpses
    BloodboundSpawn,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 5] = [
        EnemyKind::Regular,
        EnemyKind::FleeingShadow,
        EnemyKind::Mimic,
        EnemyKind::CorruptedThief,
        EnemyKind::BloodboundSpawn,
    ];

    /// Spawn weights, same order as [`EnemyKind::ALL`]
    pub const WEIGHTS: [f32; 5] = [0.5, 0.15, 0.1, 0.15, 0.1];

    pub fn as_str(&self) -> &'static str {
        match self {
            EnemyKind::Regular => "Regular",
            EnemyKind::FleeingShadow => "Fleeing Shadow",
            EnemyKind::Mimic => "Mimic",
            EnemyKind::CorruptedThief => "Corrupted Thief",
            EnemyKind::BloodboundSpawn => "Bloodbound Spawn",
        }
    }

    /// Pick a kind using the spawn weights
    pub fn roll<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let total: f32 = Self::WEIGHTS.iter().sum();
        let mut roll = rng.random::<f32>() * total;
        for (kind, weight) in Self::ALL.iter().zip(Self::WEIGHTS) {
            if roll < weight {
                return *kind;
            }
            roll -= weight;
        }
        EnemyKind::Regular
    }
}

/// What happened when an enemy touched the player this tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Contact {
    /// Damage dealt, if the attack was off cooldown
    pub damage: Option<f32>,
    /// Whether the enemy tries to steal sanity
    pub steals_sanity: bool,
}

/// An enemy entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    pub body: MovableEntity,
    /// Pixels per 1/60 s frame
    pub speed: f32,
    pub health: i32,
    pub max_health: i32,
    pub damage: f32,
    pub base_damage: f32,
    pub active: bool,
    pub teleport_cooldown: u32,
    pub attack_cooldown: u32,
    pub disguised: bool,
    pub triggered: bool,
    pub stolen_sanity: i32,
}

impl Enemy {
    /// Enemy with explicit stats
    pub fn with_stats(id: u32, kind: EnemyKind, pos: Vec2, speed: f32, health: i32, damage: f32) -> Self {
        let is_mimic = kind == EnemyKind::Mimic;
        Self {
            id,
            kind,
            body: MovableEntity::new(pos.x, pos.y, ENEMY_SIZE, ENEMY_SIZE),
            speed,
            health,
            max_health: health,
            damage,
            base_damage: damage,
            active: true,
            teleport_cooldown: 0,
            attack_cooldown: 0,
            disguised: is_mimic,
            triggered: !is_mimic,
            stolen_sanity: 0,
        }
    }

    /// Enemy with the standard stats for its kind (regulars are randomised)
    pub fn spawn<R: Rng + ?Sized>(id: u32, kind: EnemyKind, pos: Vec2, rng: &mut R) -> Self {
        let (speed, health, damage) = match kind {
            EnemyKind::Regular => (
                rng.random_range(1.0..2.0),
                rng.random_range(80..=120),
                rng.random_range(8..=15) as f32,
            ),
            EnemyKind::FleeingShadow => (2.5, 70, 10.0),
            EnemyKind::Mimic => (1.0, 120, 20.0),
            EnemyKind::CorruptedThief => (3.5, 60, 5.0),
            EnemyKind::BloodboundSpawn => (1.8, 100, 12.0),
        };
        Self::with_stats(id, kind, pos, speed, health, damage)
    }

    pub fn pos(&self) -> Vec2 {
        self.body.pos
    }

    pub fn distance_to(&self, point: Vec2) -> f32 {
        distance(self.body.pos, point)
    }

    /// Speed in effect right now (pixels per frame)
    pub fn current_speed(&self) -> f32 {
        if self.kind == EnemyKind::Mimic && self.triggered {
            MIMIC_TRIGGERED_SPEED
        } else {
            self.speed
        }
    }

    /// Apply damage. Returns true when this kills the enemy.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        if !self.active {
            return false;
        }
        self.health -= amount;
        if self.health <= 0 {
            self.active = false;
            log::debug!("{} #{} died", self.kind.as_str(), self.id);
            return true;
        }
        false
    }

    /// Advance one tick.
    ///
    /// `nearby_corpses` is the number of corpses within [`BLOODBOUND_RADIUS`].
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        grid: &Grid,
        player: &MovableEntity,
        nearby_corpses: usize,
        rng: &mut R,
        dt: f32,
    ) -> Option<Contact> {
        if !self.active {
            return None;
        }

        if self.kind == EnemyKind::Mimic && !self.triggered {
            if self.distance_to(player.pos) < MIMIC_TRIGGER_RANGE {
                self.disguised = false;
                self.triggered = true;
                log::debug!("Mimic #{} revealed", self.id);
            }
        } else {
            self.chase(grid, player, dt);
            match self.kind {
                EnemyKind::FleeingShadow => {
                    let hurt = (self.health as f32) <= self.max_health as f32 * SHADOW_TELEPORT_HEALTH;
                    if self.teleport_cooldown == 0 && hurt && rng.random_bool(SHADOW_TELEPORT_CHANCE) {
                        self.teleport(grid, rng);
                    }
                }
                EnemyKind::BloodboundSpawn => {
                    self.damage = self.base_damage * (1.0 + nearby_corpses as f32 * BLOODBOUND_BONUS);
                }
                _ => {}
            }
        }

        self.teleport_cooldown = self.teleport_cooldown.saturating_sub(1);
        self.attack_cooldown = self.attack_cooldown.saturating_sub(1);

        if self.disguised || !self.body.intersects(player) {
            return None;
        }

        let damage = if self.attack_cooldown == 0 {
            self.attack_cooldown = ENEMY_ATTACK_COOLDOWN;
            Some(self.damage)
        } else {
            None
        };
        Some(Contact {
            damage,
            steals_sanity: self.kind == EnemyKind::CorruptedThief,
        })
    }

    /// Step toward the player, corrected against the grid
    fn chase(&mut self, grid: &Grid, player: &MovableEntity, dt: f32) {
        let dir = direction_to(self.body.center(), player.center());
        let step = dir * self.current_speed() * ENEMY_SPEED_SCALE * dt;
        if step == Vec2::ZERO {
            return;
        }
        self.body.pos = collision::resolve(grid, &self.body, self.body.pos + step);
    }

    /// Jump to a random clear spot. Returns false when no spot was found.
    pub fn teleport<R: Rng + ?Sized>(&mut self, grid: &Grid, rng: &mut R) -> bool {
        let world = grid.pixel_size();
        let max = world - self.body.size - SHADOW_TELEPORT_MARGIN;
        if max.x <= SHADOW_TELEPORT_MARGIN || max.y <= SHADOW_TELEPORT_MARGIN {
            return false;
        }

        for _ in 0..SHADOW_TELEPORT_ATTEMPTS {
            let candidate = Vec2::new(
                rng.random_range(SHADOW_TELEPORT_MARGIN..max.x).floor(),
                rng.random_range(SHADOW_TELEPORT_MARGIN..max.y).floor(),
            );
            if grid.is_area_clear(candidate, self.body.size) {
                self.body.pos = candidate;
                self.teleport_cooldown = SHADOW_TELEPORT_COOLDOWN;
                log::debug!("Shadow #{} teleported to {:?}", self.id, candidate);
                return true;
            }
        }
        false
    }
}
