//! # Procedural Geometry Generation
//!
//! This module builds every mesh of the submarine procedurally. Generators
//! never own GPU resources: they append vertices into a [`GeometrySink`] and
//! bracket their contribution as a [`MeshRegion`].
//!
//! ## Generators
//!
//! - **Quad subdivider** ([`subdivide`]): recursive quad split into a triangle soup
//! - **Hull** ([`hull`]): eight spherical lobes, connecting cylinders, panels
//! - **Rooms** ([`rooms`]): nine independently drawable interior meshes
//! - **Engine** ([`engine`]): crank, piston and propeller parts plus their
//!   per-frame transforms
//!
//! ## Usage
//!
//! ```rust
//! use cgmath::{Vector2, Vector3, Vector4};
//! use submarine::gfx::geometry::{GeometrySink, VertexBuffers};
//!
//! let mut buffers = VertexBuffers::new();
//! buffers.begin_region().unwrap();
//! buffers.append_vertex(
//!     Vector3::new(0.0, 0.0, 0.0),
//!     Vector3::new(0.0, 1.0, 0.0),
//!     Vector4::new(1.0, 0.0, 0.0, 1.0),
//!     Vector2::new(0.0, 0.0),
//! );
//! let region = buffers.end_region().unwrap();
//! assert_eq!(region.count, 1);
//! ```

pub mod engine;
pub mod hull;
pub mod primitives;
pub mod rooms;
pub mod subdivide;

use std::ops::Range;

use cgmath::{Vector2, Vector3, Vector4};
use log::debug;

use crate::error::{GeometryError, Result};
use crate::gfx::scene::vertex::Vertex;

/// A contiguous slice of the shared vertex buffers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MeshRegion {
    /// Index of the first vertex
    pub start: u32,
    /// Number of vertices; zero is a valid, empty region
    pub count: u32,
}

impl MeshRegion {
    pub const EMPTY: Self = Self { start: 0, count: 0 };

    pub fn new(start: u32, count: u32) -> Self {
        Self { start, count }
    }

    /// One past the last vertex
    pub fn end(&self) -> u32 {
        self.start + self.count
    }

    /// Vertex range suitable for a non-indexed draw call
    pub fn range(&self) -> Range<u32> {
        self.start..self.end()
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// True when the two regions share at least one vertex
    pub fn overlaps(&self, other: &MeshRegion) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.start < other.end()
            && other.start < self.end()
    }
}

/// Append-only destination for generated vertices
///
/// Generators bracket their output with `begin_region` / `end_region`, which
/// hands back the `(start, count)` pair of everything appended in between.
pub trait GeometrySink {
    /// Push one vertex with all four attributes
    fn append_vertex(
        &mut self,
        position: Vector3<f32>,
        normal: Vector3<f32>,
        color: Vector4<f32>,
        tex_coord: Vector2<f32>,
    );

    /// Start recording a region at the current end of the buffers
    fn begin_region(&mut self) -> Result<()>;

    /// Close the open region, verifying the attribute streams are aligned
    fn end_region(&mut self) -> Result<MeshRegion>;

    /// Number of complete vertices appended so far
    fn vertex_count(&self) -> usize;
}

/// Four parallel, index-aligned vertex attribute streams
#[derive(Debug, Clone, Default)]
pub struct VertexBuffers {
    /// Vertex positions (x, y, z)
    pub positions: Vec<[f32; 3]>,
    /// Normal vectors (x, y, z), not necessarily unit length
    pub normals: Vec<[f32; 3]>,
    /// Colors (r, g, b, a) in 0..1
    pub colors: Vec<[f32; 4]>,
    /// Texture coordinates (u, v)
    pub tex_coords: Vec<[f32; 2]>,
    open_region: Option<usize>,
}

impl VertexBuffers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails unless all four streams have the same length
    pub fn check_lengths(&self) -> Result<usize> {
        let positions = self.positions.len();
        if self.normals.len() == positions
            && self.colors.len() == positions
            && self.tex_coords.len() == positions
        {
            Ok(positions)
        } else {
            Err(GeometryError::AttributeLengthMismatch {
                positions,
                normals: self.normals.len(),
                colors: self.colors.len(),
                tex_coords: self.tex_coords.len(),
            })
        }
    }

    /// Number of triangles in a non-indexed triangle list
    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Positions of one region
    pub fn region_positions(&self, region: MeshRegion) -> &[[f32; 3]] {
        &self.positions[region.start as usize..region.end() as usize]
    }

    pub fn region_normals(&self, region: MeshRegion) -> &[[f32; 3]] {
        &self.normals[region.start as usize..region.end() as usize]
    }

    pub fn region_colors(&self, region: MeshRegion) -> &[[f32; 4]] {
        &self.colors[region.start as usize..region.end() as usize]
    }

    /// Interleave the streams into the renderer's vertex format
    pub fn to_vertices(&self) -> Result<Vec<Vertex>> {
        let count = self.check_lengths()?;
        Ok((0..count)
            .map(|i| Vertex {
                position: self.positions[i],
                tex_coords: self.tex_coords[i],
                normal: self.normals[i],
                color: self.colors[i],
            })
            .collect())
    }
}

impl GeometrySink for VertexBuffers {
    fn append_vertex(
        &mut self,
        position: Vector3<f32>,
        normal: Vector3<f32>,
        color: Vector4<f32>,
        tex_coord: Vector2<f32>,
    ) {
        self.positions.push(position.into());
        self.normals.push(normal.into());
        self.colors.push(color.into());
        self.tex_coords.push(tex_coord.into());
    }

    fn begin_region(&mut self) -> Result<()> {
        if let Some(start) = self.open_region {
            return Err(GeometryError::RegionAlreadyOpen { start });
        }
        let start = self.check_lengths()?;
        debug!("region opened at vertex {start}");
        self.open_region = Some(start);
        Ok(())
    }

    fn end_region(&mut self) -> Result<MeshRegion> {
        let start = self.open_region.take().ok_or(GeometryError::NoOpenRegion)?;
        let end = self.check_lengths()?;
        let to_u32 = |n: usize| u32::try_from(n).map_err(|_| GeometryError::VertexCountOverflow(n));
        let region = MeshRegion::new(to_u32(start)?, to_u32(end - start)?);
        debug!("region closed: start={} count={}", region.start, region.count);
        Ok(region)
    }

    fn vertex_count(&self) -> usize {
        self.positions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push_one(buffers: &mut VertexBuffers) {
        buffers.append_vertex(
            Vector3::new(1.0, 2.0, 3.0),
            Vector3::new(0.0, 1.0, 0.0),
            Vector4::new(1.0, 0.0, 0.0, 1.0),
            Vector2::new(0.5, 0.5),
        );
    }

    #[test]
    fn test_regions_are_consecutive() {
        let mut buffers = VertexBuffers::new();
        buffers.begin_region().unwrap();
        push_one(&mut buffers);
        push_one(&mut buffers);
        let first = buffers.end_region().unwrap();

        buffers.begin_region().unwrap();
        let empty = buffers.end_region().unwrap();

        buffers.begin_region().unwrap();
        push_one(&mut buffers);
        let second = buffers.end_region().unwrap();

        assert_eq!(first, MeshRegion::new(0, 2));
        assert_eq!(empty, MeshRegion::new(2, 0));
        assert!(empty.is_empty());
        assert_eq!(second, MeshRegion::new(2, 1));
        assert!(!first.overlaps(&second));
        assert!(!empty.overlaps(&first));
    }

    #[test]
    fn test_nested_region_rejected() {
        let mut buffers = VertexBuffers::new();
        buffers.begin_region().unwrap();
        assert_eq!(
            buffers.begin_region(),
            Err(GeometryError::RegionAlreadyOpen { start: 0 })
        );
    }

    #[test]
    fn test_end_without_begin_rejected() {
        let mut buffers = VertexBuffers::new();
        assert_eq!(buffers.end_region(), Err(GeometryError::NoOpenRegion));
    }

    #[test]
    fn test_length_mismatch_detected_at_region_end() {
        let mut buffers = VertexBuffers::new();
        buffers.begin_region().unwrap();
        push_one(&mut buffers);
        buffers.positions.push([0.0, 0.0, 0.0]);
        assert_eq!(
            buffers.end_region(),
            Err(GeometryError::AttributeLengthMismatch {
                positions: 2,
                normals: 1,
                colors: 1,
                tex_coords: 1,
            })
        );
    }

    #[test]
    fn test_interleave() {
        let mut buffers = VertexBuffers::new();
        push_one(&mut buffers);
        let vertices = buffers.to_vertices().unwrap();
        assert_eq!(vertices.len(), 1);
        assert_eq!(vertices[0].position, [1.0, 2.0, 3.0]);
        assert_eq!(vertices[0].color, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(vertices[0].tex_coords, [0.5, 0.5]);
    }

    #[test]
    fn test_overlap() {
        let a = MeshRegion::new(0, 10);
        let b = MeshRegion::new(9, 3);
        let c = MeshRegion::new(10, 3);
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }
}
