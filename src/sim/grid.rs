//! Fixed-size tile grid
//!
//! Tile codes are stored row-major (`index = y * width + x`). Only
//! [`SOLID_TILE`] blocks movement; every other code is passable.

use std::error::Error;
use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::TILE_SIZE;

/// A tile code as stored in the grid
pub type TileCode = u8;

/// Empty, passable floor
pub const EMPTY_TILE: TileCode = 0;
/// Solid, blocking wall
pub const SOLID_TILE: TileCode = 1;

/// Errors raised by direct grid access with unchecked coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    /// Tile coordinate outside `[0, width) x [0, height)`
    OutOfBounds {
        x: i64,
        y: i64,
        width: usize,
        height: usize,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds {
                x,
                y,
                width,
                height,
            } => write!(
                f,
                "tile ({x}, {y}) is outside the {width}x{height} grid"
            ),
        }
    }
}

impl Error for GridError {}

/// Convert a world pixel coordinate to a tile index.
///
/// Non-finite input maps to -1 so it always lands outside the grid.
#[inline]
pub fn pixel_to_tile(p: f32) -> i64 {
    if p.is_finite() {
        (p / TILE_SIZE).floor() as i64
    } else {
        -1
    }
}

/// Static tile storage for one level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: usize,
    height: usize,
    tiles: Vec<TileCode>,
}

impl Grid {
    /// Create a grid with every tile empty
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            tiles: vec![EMPTY_TILE; width * height],
        }
    }

    /// Build a grid from pre-populated codes.
    ///
    /// Returns `None` when `tiles.len() != width * height`.
    pub fn from_tiles(width: usize, height: usize, tiles: Vec<TileCode>) -> Option<Self> {
        if tiles.len() != width * height {
            return None;
        }
        Some(Self {
            width,
            height,
            tiles,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// World extent in pixels
    pub fn pixel_size(&self) -> Vec2 {
        Vec2::new(
            self.width as f32 * TILE_SIZE,
            self.height as f32 * TILE_SIZE,
        )
    }

    fn index(&self, x: i64, y: i64) -> Result<usize, GridError> {
        if x < 0 || y < 0 || x as u64 >= self.width as u64 || y as u64 >= self.height as u64 {
            return Err(GridError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(y as usize * self.width + x as usize)
    }

    /// Tile code at a tile coordinate
    pub fn tile_at(&self, x: i64, y: i64) -> Result<TileCode, GridError> {
        let idx = self.index(x, y)?;
        Ok(self.tiles[idx])
    }

    /// Tile code under a world pixel
    pub fn tile_at_pixel(&self, px: f32, py: f32) -> Result<TileCode, GridError> {
        self.tile_at(pixel_to_tile(px), pixel_to_tile(py))
    }

    /// Overwrite a single tile
    pub fn set_tile(&mut self, x: i64, y: i64, code: TileCode) -> Result<(), GridError> {
        let idx = self.index(x, y)?;
        self.tiles[idx] = code;
        Ok(())
    }

    /// Whether a tile blocks movement.
    ///
    /// Coordinates outside the grid count as solid: the world edge is a wall.
    pub fn is_solid(&self, x: i64, y: i64) -> bool {
        self.tile_at(x, y).map_or(true, |code| code == SOLID_TILE)
    }

    /// Whether any tile in the inclusive index rectangle is solid.
    ///
    /// An empty range (`x0 > x1` or `y0 > y1`) is never solid.
    pub fn any_solid(&self, (x0, x1): (i64, i64), (y0, y1): (i64, i64)) -> bool {
        (y0..=y1).any(|y| (x0..=x1).any(|x| self.is_solid(x, y)))
    }

    /// Whether a box lies inside the world and overlaps no solid tile
    pub fn is_area_clear(&self, pos: Vec2, size: Vec2) -> bool {
        let world = self.pixel_size();
        let inside = pos.x >= 0.0
            && pos.y >= 0.0
            && pos.x + size.x <= world.x
            && pos.y + size.y <= world.y;
        if !inside {
            return false;
        }
        let xs = super::collision::tile_span(pos.x, size.x);
        let ys = super::collision::tile_span(pos.y, size.y);
        !self.any_solid(xs, ys)
    }

    /// Set every edge tile to `code`
    pub fn fill_border(&mut self, code: TileCode) {
        let (w, h) = (self.width as i64, self.height as i64);
        for x in 0..w {
            let _ = self.set_tile(x, 0, code);
            let _ = self.set_tile(x, h - 1, code);
        }
        for y in 0..h {
            let _ = self.set_tile(0, y, code);
            let _ = self.set_tile(w - 1, y, code);
        }
    }

    /// Iterate `(x, y, code)` in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, TileCode)> + '_ {
        let width = self.width.max(1);
        self.tiles
            .iter()
            .enumerate()
            .map(move |(i, &code)| (i % width, i / width, code))
    }

    /// Number of solid tiles
    pub fn solid_count(&self) -> usize {
        self.tiles.iter().filter(|&&c| c == SOLID_TILE).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_grid_is_empty() {
        let grid = Grid::new(4, 3);
        assert_eq!(grid.solid_count(), 0);
        for (_, _, code) in grid.iter() {
            assert_eq!(code, EMPTY_TILE);
        }
        assert_eq!(grid.iter().count(), 12);
    }

    #[test]
    fn test_set_then_get() {
        let mut grid = Grid::new(5, 5);
        grid.set_tile(2, 3, SOLID_TILE).unwrap();
        assert_eq!(grid.tile_at(2, 3), Ok(SOLID_TILE));
        assert_eq!(grid.tile_at(3, 2), Ok(EMPTY_TILE));
    }

    #[test]
    fn test_out_of_bounds() {
        let mut grid = Grid::new(3, 2);
        assert_eq!(
            grid.tile_at(3, 0),
            Err(GridError::OutOfBounds {
                x: 3,
                y: 0,
                width: 3,
                height: 2
            })
        );
        assert!(grid.tile_at(-1, 0).is_err());
        assert!(grid.tile_at(0, 2).is_err());
        assert!(grid.set_tile(0, -1, SOLID_TILE).is_err());
    }

    #[test]
    fn test_error_message() {
        let err = Grid::new(3, 2).tile_at(7, 1).unwrap_err();
        assert_eq!(err.to_string(), "tile (7, 1) is outside the 3x2 grid");
    }

    #[test]
    fn test_tile_at_pixel() {
        let mut grid = Grid::new(3, 3);
        grid.set_tile(1, 2, SOLID_TILE).unwrap();
        assert_eq!(grid.tile_at_pixel(TILE_SIZE + 0.5, TILE_SIZE * 2.0), Ok(SOLID_TILE));
        assert_eq!(grid.tile_at_pixel(TILE_SIZE - 0.01, TILE_SIZE * 2.0), Ok(EMPTY_TILE));
        assert!(grid.tile_at_pixel(-0.01, 0.0).is_err());
        assert!(grid.tile_at_pixel(TILE_SIZE * 3.0, 0.0).is_err());
        assert!(grid.tile_at_pixel(f32::NAN, 0.0).is_err());
    }

    #[test]
    fn test_out_of_range_is_solid() {
        let grid = Grid::new(2, 2);
        assert!(!grid.is_solid(0, 0));
        assert!(grid.is_solid(-1, 0));
        assert!(grid.is_solid(0, 2));
    }

    #[test]
    fn test_extended_codes_are_passable() {
        let mut grid = Grid::new(2, 1);
        grid.set_tile(0, 0, 2).unwrap();
        assert!(!grid.is_solid(0, 0));
    }

    #[test]
    fn test_fill_border() {
        let mut grid = Grid::new(3, 3);
        grid.fill_border(SOLID_TILE);
        assert_eq!(grid.solid_count(), 8);
        assert_eq!(grid.tile_at(1, 1), Ok(EMPTY_TILE));
    }

    #[test]
    fn test_from_tiles_checks_length() {
        assert!(Grid::from_tiles(2, 2, vec![0, 1, 0]).is_none());
        let grid = Grid::from_tiles(2, 2, vec![0, 1, 0, 0]).unwrap();
        assert_eq!(grid.tile_at(1, 0), Ok(SOLID_TILE));
    }

    #[test]
    fn test_area_clear() {
        let mut grid = Grid::new(3, 3);
        grid.fill_border(SOLID_TILE);
        let size = Vec2::splat(TILE_SIZE - 4.0);
        assert!(grid.is_area_clear(Vec2::splat(TILE_SIZE + 1.0), size));
        assert!(!grid.is_area_clear(Vec2::splat(TILE_SIZE - 1.0), size));
        assert!(!grid.is_area_clear(Vec2::splat(-1.0), size));
    }

    proptest! {
        #[test]
        fn prop_tile_at_returns_last_set(
            width in 1usize..16,
            height in 1usize..16,
            writes in proptest::collection::vec((0usize..16, 0usize..16, 0u8..4), 0..40),
        ) {
            let mut grid = Grid::new(width, height);
            let mut expected = vec![EMPTY_TILE; width * height];
            for (x, y, code) in writes {
                let (x, y) = (x % width, y % height);
                grid.set_tile(x as i64, y as i64, code).unwrap();
                expected[y * width + x] = code;
            }
            for y in 0..height {
                for x in 0..width {
                    prop_assert_eq!(grid.tile_at(x as i64, y as i64), Ok(expected[y * width + x]));
                }
            }
        }
    }
}
