//! Tile collision resolution
//!
//! Axis-separated sweep against the grid: X is resolved first against the
//! entity's previous Y, then Y is resolved against the already-resolved X.
//! Each axis is reverted independently, which gives the "slide along the wall"
//! feel on diagonal moves instead of a full stop.

use glam::Vec2;

use super::entity::MovableEntity;
use super::grid::{Grid, pixel_to_tile};

/// Movement axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// Component of `v` along this axis
    #[inline]
    pub fn of(self, v: Vec2) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
        }
    }
}

/// Inclusive range of tile indices covered by `[start, start + extent)`.
///
/// The far end is the last whole pixel the box touches,
/// `ceil(start + extent) - 1`. A box flush against a tile boundary does not
/// spill into the next tile, while a fractional edge past the boundary does.
#[inline]
pub fn tile_span(start: f32, extent: f32) -> (i64, i64) {
    (
        pixel_to_tile(start),
        pixel_to_tile((start + extent).ceil() - 1.0),
    )
}

/// Resolve one axis of a move.
///
/// `proposed` must differ from `prev` only along `axis`; the other coordinate
/// is read from `prev`. Returns the proposed coordinate, or the previous one
/// when the proposed box would leave the world or cover a solid tile.
pub fn resolve_axis(
    grid: &Grid,
    axis: Axis,
    prev: &MovableEntity,
    proposed: &MovableEntity,
) -> f32 {
    let world = grid.pixel_size();
    let start = axis.of(proposed.pos);
    let extent = axis.of(proposed.size);
    let previous = axis.of(prev.pos);

    // Negated so NaN fails the check
    if !(start >= 0.0 && start + extent <= axis.of(world)) {
        return previous;
    }

    let (xs, ys) = match axis {
        Axis::X => (
            tile_span(proposed.pos.x, proposed.size.x),
            tile_span(prev.pos.y, prev.size.y),
        ),
        Axis::Y => (
            tile_span(prev.pos.x, prev.size.x),
            tile_span(proposed.pos.y, proposed.size.y),
        ),
    };

    if grid.any_solid(xs, ys) {
        previous
    } else {
        start
    }
}

/// Correct a proposed move of `prev` to `proposed` against the grid.
///
/// Total over finite and non-finite input: never indexes outside the grid and
/// never fails, it only reverts coordinates. If `prev` is a valid placement the
/// result is too.
pub fn resolve(grid: &Grid, prev: &MovableEntity, proposed: Vec2) -> Vec2 {
    let x = resolve_axis(
        grid,
        Axis::X,
        prev,
        &prev.moved_to(Vec2::new(proposed.x, prev.pos.y)),
    );

    let after_x = prev.moved_to(Vec2::new(x, prev.pos.y));
    let y = resolve_axis(
        grid,
        Axis::Y,
        &after_x,
        &after_x.moved_to(Vec2::new(x, proposed.y)),
    );

    Vec2::new(x, y)
}
