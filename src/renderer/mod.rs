//! Frame description for an external renderer
//!
//! The simulation never draws. After each update a `FrameView` is built from
//! the game state and can be triangulated into a vertex buffer.

pub mod frame;
pub mod vertex;

pub use frame::{FrameView, Quad, QuadKind, enemy_color, tile_color};
pub use vertex::{Vertex, as_bytes, triangulate};
