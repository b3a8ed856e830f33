//! # Vertex Format
//!
//! The interleaved vertex handed to the renderer once generation finishes.

/// One interleaved vertex of the submarine mesh
///
/// `#[repr(C)]` keeps the field order the attribute offsets below rely on.
///
/// ```
/// use submarine::gfx::scene::vertex::Vertex;
///
/// let vertex = Vertex {
///     position: [0.0, 1.0, 0.0],
///     tex_coords: [0.5, 0.5],
///     normal: [0.0, 1.0, 0.0],
///     color: [1.0, 0.0, 0.0, 1.0],
/// };
/// let bytes: &[u8] = bytemuck::bytes_of(&vertex);
/// assert_eq!(bytes.len(), 48);
/// ```
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub tex_coords: [f32; 2],
    pub normal: [f32; 3],
    /// RGBA in 0..1
    pub color: [f32; 4],
}

impl Vertex {
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        0 => Float32x3,
        1 => Float32x2,
        2 => Float32x3,
        3 => Float32x4,
    ];

    /// Buffer layout for a render pipeline: position, texcoord, normal, color
    /// at shader locations 0 to 3
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}
