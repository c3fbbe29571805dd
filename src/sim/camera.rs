//! Viewport camera
//!
//! Tracks an entity across the world and converts between world pixels and
//! screen pixels. The visible world rectangle
//! `[pos, pos + viewport / zoom]` always stays inside `[0, world]` on every
//! axis where the world is at least as large as the visible area; on smaller
//! axes the offset is pinned to 0.

use std::ops::Range;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::MovableEntity;
use super::grid::Grid;
use crate::consts::{CAMERA_SMOOTHING, DEFAULT_ZOOM, MAX_ZOOM, MIN_ZOOM, TILE_SIZE, ZOOM_STEP};

/// How `follow` moves toward its target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FollowMode {
    /// Jump straight to the target every frame
    #[default]
    Immediate,
    /// Exponential interpolation toward the target
    Smooth,
}

impl FollowMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FollowMode::Immediate => "Immediate",
            FollowMode::Smooth => "Smooth",
        }
    }
}

/// The viewport camera.
///
/// Fields are private: callers read them through accessors and mutate only
/// through the operations below, so the clamp always holds. Deserialized
/// cameras go through the same checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "CameraFields")]
pub struct Camera {
    /// World-pixel offset of the viewport's top-left corner
    pos: Vec2,
    /// Output surface size in screen pixels
    viewport: Vec2,
    /// World extent in pixels
    world: Vec2,
    /// Magnification (>1 zooms in)
    zoom: f32,
    mode: FollowMode,
    /// Fraction of the remaining distance covered per smooth follow
    smoothing: f32,
}

/// Smallest viewport edge in screen pixels
pub const MIN_VIEWPORT: f32 = 1.0;

/// Raw serialized form of a [`Camera`], checked on the way in
#[derive(Deserialize)]
struct CameraFields {
    pos: Vec2,
    viewport: Vec2,
    world: Vec2,
    zoom: f32,
    mode: FollowMode,
    smoothing: f32,
}

impl From<CameraFields> for Camera {
    fn from(fields: CameraFields) -> Self {
        let mut camera = Camera::new(fields.viewport.x, fields.viewport.y, fields.world)
            .with_mode(fields.mode, fields.smoothing);
        camera.zoom = sanitize_zoom(fields.zoom);
        camera.pos = fields.pos;
        camera.clamp();
        camera
    }
}

impl Camera {
    /// Viewport edges below [`MIN_VIEWPORT`] (or non-finite) are raised to it
    pub fn new(viewport_width: f32, viewport_height: f32, world: Vec2) -> Self {
        let mut camera = Self {
            pos: Vec2::ZERO,
            viewport: sanitize_viewport(viewport_width, viewport_height),
            world: sanitize_world(world),
            zoom: DEFAULT_ZOOM,
            mode: FollowMode::Immediate,
            smoothing: CAMERA_SMOOTHING,
        };
        camera.clamp();
        camera
    }

    /// Camera sized for a grid
    pub fn for_grid(viewport_width: f32, viewport_height: f32, grid: &Grid) -> Self {
        Self::new(viewport_width, viewport_height, grid.pixel_size())
    }

    /// Select the follow mode. `smoothing` is clamped to `(0, 1]`.
    pub fn with_mode(mut self, mode: FollowMode, smoothing: f32) -> Self {
        self.mode = mode;
        self.smoothing = if smoothing.is_finite() {
            smoothing.clamp(f32::EPSILON, 1.0)
        } else {
            CAMERA_SMOOTHING
        };
        self
    }

    pub fn x(&self) -> f32 {
        self.pos.x
    }

    pub fn y(&self) -> f32 {
        self.pos.y
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn world(&self) -> Vec2 {
        self.world
    }

    pub fn mode(&self) -> FollowMode {
        self.mode
    }

    /// World-pixel size of the area on screen
    #[inline]
    pub fn visible_size(&self) -> Vec2 {
        self.viewport / self.zoom
    }

    /// Visible world rectangle as `(min, max)`
    pub fn visible_rect(&self) -> (Vec2, Vec2) {
        (self.pos, self.pos + self.visible_size())
    }

    /// Largest allowed offset per axis (0 where the world is smaller)
    fn max_offset(&self) -> Vec2 {
        (self.world - self.visible_size()).max(Vec2::ZERO)
    }

    fn clamp(&mut self) {
        let max = self.max_offset();
        self.pos = Vec2::new(
            clamp_axis(self.pos.x, max.x),
            clamp_axis(self.pos.y, max.y),
        );
    }

    /// Offset that centers `entity` on screen (before clamping)
    pub fn target_for(&self, entity: &MovableEntity) -> Vec2 {
        entity.center() - self.visible_size() * 0.5
    }

    /// Track an entity using the configured follow mode
    pub fn follow(&mut self, entity: &MovableEntity) {
        let target = self.target_for(entity);
        if target.is_finite() {
            self.pos = match self.mode {
                FollowMode::Immediate => target,
                FollowMode::Smooth => self.pos + (target - self.pos) * self.smoothing,
            };
        }
        self.clamp();
    }

    /// Center on an entity immediately, regardless of follow mode
    pub fn snap_to(&mut self, entity: &MovableEntity) {
        let target = self.target_for(entity);
        if target.is_finite() {
            self.pos = target;
        }
        self.clamp();
    }

    /// Set the zoom factor, clamped to `[MIN_ZOOM, MAX_ZOOM]`.
    ///
    /// Non-finite factors are ignored.
    pub fn set_zoom(&mut self, factor: f32) {
        if !factor.is_finite() {
            log::warn!("Ignoring non-finite zoom factor {}", factor);
            return;
        }
        self.zoom = factor.clamp(MIN_ZOOM, MAX_ZOOM);
        self.clamp();
        log::debug!("Zoom set to {:.2}", self.zoom);
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom + ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom - ZOOM_STEP);
    }

    pub fn reset_zoom(&mut self) {
        self.set_zoom(DEFAULT_ZOOM);
    }

    /// Resize the output surface
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = sanitize_viewport(width, height);
        self.clamp();
    }

    /// Change the world extent (on level change)
    pub fn set_world(&mut self, world: Vec2) {
        self.world = sanitize_world(world);
        self.clamp();
    }

    /// World pixel to screen pixel
    #[inline]
    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        (world - self.pos) * self.zoom
    }

    /// Screen pixel to world pixel
    #[inline]
    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        screen / self.zoom + self.pos
    }

    /// Whether a world rectangle overlaps the viewport once transformed
    pub fn is_rect_visible(&self, pos: Vec2, size: Vec2) -> bool {
        let min = self.world_to_screen(pos);
        let max = min + size * self.zoom;
        max.x > 0.0 && max.y > 0.0 && min.x < self.viewport.x && min.y < self.viewport.y
    }

    /// Tile columns and rows that can appear on screen
    pub fn visible_tile_range(&self, grid: &Grid) -> (Range<usize>, Range<usize>) {
        let (min, max) = self.visible_rect();
        let span = |lo: f32, hi: f32, len: usize| {
            let start = (lo / TILE_SIZE).floor().max(0.0) as usize;
            let end = ((hi / TILE_SIZE).ceil().max(0.0) as usize).min(len);
            start.min(end)..end
        };
        (
            span(min.x, max.x, grid.width()),
            span(min.y, max.y, grid.height()),
        )
    }
}

fn sanitize_viewport(width: f32, height: f32) -> Vec2 {
    let edge = |v: f32| if v.is_finite() { v.max(MIN_VIEWPORT) } else { MIN_VIEWPORT };
    Vec2::new(edge(width), edge(height))
}

fn sanitize_world(world: Vec2) -> Vec2 {
    let edge = |v: f32| if v.is_finite() { v.max(0.0) } else { 0.0 };
    Vec2::new(edge(world.x), edge(world.y))
}

fn sanitize_zoom(zoom: f32) -> f32 {
    if zoom.is_finite() {
        zoom.clamp(MIN_ZOOM, MAX_ZOOM)
    } else {
        DEFAULT_ZOOM
    }
}

#[inline]
fn clamp_axis(value: f32, max: f32) -> f32 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, max)
}
