//! # Graphics Module
//!
//! Everything the submarine hands to a renderer, split into two layers:
//!
//! - **Geometry** ([`geometry`]) - procedural generators appending into a
//!   shared [`GeometrySink`](geometry::GeometrySink)
//! - **Scene** ([`scene`]) - the assembled model, its vertex format,
//!   visibility and per-frame state
//!
//! No GPU resources are created here; [`scene::Vertex::desc`] and
//! [`scene::SubmarineModel::vertices`] are the whole upload contract.

pub mod geometry;
pub mod scene;

pub use geometry::{GeometrySink, MeshRegion, VertexBuffers};
pub use scene::{SubmarineModel, Vertex};
