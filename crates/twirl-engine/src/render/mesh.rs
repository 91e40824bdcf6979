//! The triangle mesh.
//!
//! Three vertices, interleaved as `(x, y, r, g, b)`, uploaded once at setup and
//! never modified. Only the transform changes from frame to frame.

use bytemuck::{Pod, Zeroable};

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 3],
}

impl Vertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x2, // position
        1 => Float32x3  // color
    ];

    pub const fn new(x: f32, y: f32, r: f32, g: f32, b: f32) -> Self {
        Self {
            position: [x, y],
            color: [r, g, b],
        }
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

pub const TRIANGLE_VERTEX_COUNT: u32 = 3;

pub const TRIANGLE_VERTICES: [Vertex; TRIANGLE_VERTEX_COUNT as usize] = [
    Vertex::new(-0.6, -0.4, 1.0, 0.0, 0.0),
    Vertex::new(0.6, -0.4, 0.0, 1.0, 0.0),
    Vertex::new(0.0, 0.6, 0.0, 0.0, 1.0),
];

static TRIANGLE: [Vertex; TRIANGLE_VERTEX_COUNT as usize] = TRIANGLE_VERTICES;

/// Bytes uploaded into the vertex buffer.
pub fn vertex_bytes() -> &'static [u8] {
    bytemuck::cast_slice(&TRIANGLE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exactly_three_vertices() {
        assert_eq!(TRIANGLE_VERTICES.len(), 3);
        assert_eq!(TRIANGLE_VERTEX_COUNT, 3);
    }

    #[test]
    fn interleaved_layout_matches_fixed_values() {
        let floats: &[f32] = bytemuck::cast_slice(&TRIANGLE_VERTICES);
        assert_eq!(
            floats,
            &[
                -0.6, -0.4, 1.0, 0.0, 0.0, //
                0.6, -0.4, 0.0, 1.0, 0.0, //
                0.0, 0.6, 0.0, 0.0, 1.0,
            ]
        );
    }

    #[test]
    fn stride_is_five_floats() {
        assert_eq!(std::mem::size_of::<Vertex>(), 20);
        let layout = Vertex::layout();
        assert_eq!(layout.array_stride, 20);
        assert_eq!(layout.attributes[1].offset, 8);
    }

    #[test]
    fn uploaded_bytes_read_back_identically() {
        let bytes = vertex_bytes();
        assert_eq!(bytes.len(), 3 * 20);

        // Copy into a fresh buffer as the GPU would hold it, then decode.
        let uploaded: Vec<u8> = bytes.to_vec();
        let read_back: Vec<Vertex> = uploaded
            .chunks_exact(std::mem::size_of::<Vertex>())
            .map(bytemuck::pod_read_unaligned::<Vertex>)
            .collect();
        assert_eq!(read_back, TRIANGLE_VERTICES);
    }
}
