//! Axis-aligned movable boxes

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box in world pixels.
///
/// `pos` is the top-left corner. Knows nothing about the grid or camera.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovableEntity {
    pub pos: Vec2,
    pub size: Vec2,
}

impl MovableEntity {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    pub fn left(&self) -> f32 {
        self.pos.x
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    pub fn top(&self) -> f32 {
        self.pos.y
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Move so the box is centered on `center`
    pub fn set_center(&mut self, center: Vec2) {
        self.pos = center - self.size * 0.5;
    }

    /// Copy of this box at a different position
    pub fn moved_to(&self, pos: Vec2) -> Self {
        Self {
            pos,
            size: self.size,
        }
    }

    /// Strict overlap test (touching edges do not intersect)
    pub fn intersects(&self, other: &MovableEntity) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}
