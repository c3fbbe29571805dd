//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use super::frame::Quad;

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Screen pixels, origin top-left
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }
}

impl Quad {
    /// Two counter-clockwise triangles covering the quad
    pub fn triangles(&self) -> [Vertex; 6] {
        let Vec2 { x: x0, y: y0 } = self.pos;
        let Vec2 { x: x1, y: y1 } = self.pos + self.size;
        let c = self.color;
        [
            Vertex::new(x0, y0, c),
            Vertex::new(x0, y1, c),
            Vertex::new(x1, y1, c),
            Vertex::new(x0, y0, c),
            Vertex::new(x1, y1, c),
            Vertex::new(x1, y0, c),
        ]
    }
}

/// Flatten quads into a triangle list in draw order
pub fn triangulate(quads: &[Quad]) -> Vec<Vertex> {
    quads.iter().flat_map(|q| q.triangles()).collect()
}

/// Raw bytes for a vertex buffer upload
pub fn as_bytes(vertices: &[Vertex]) -> &[u8] {
    bytemuck::cast_slice(vertices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::frame::QuadKind;

    #[test]
    fn test_quad_triangles_cover_corners() {
        let quad = Quad {
            kind: QuadKind::Player,
            pos: Vec2::new(10.0, 20.0),
            size: Vec2::new(4.0, 6.0),
            color: [1.0; 4],
        };
        let tris = quad.triangles();
        assert_eq!(tris[0].position, [10.0, 20.0]);
        assert_eq!(tris[2].position, [14.0, 26.0]);
        assert_eq!(tris[5].position, [14.0, 20.0]);
    }

    #[test]
    fn test_vertex_bytes() {
        let quad = Quad {
            kind: QuadKind::Corpse,
            pos: Vec2::ZERO,
            size: Vec2::ONE,
            color: [0.5; 4],
        };
        let vertices = triangulate(&[quad, quad]);
        assert_eq!(vertices.len(), 12);
        assert_eq!(as_bytes(&vertices).len(), 12 * std::mem::size_of::<Vertex>());
        assert_eq!(std::mem::size_of::<Vertex>(), 24);
    }
}
