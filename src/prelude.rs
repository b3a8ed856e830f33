//! # Submarine Prelude
//!
//! Commonly used types in one import.
//!
//! ```rust
//! use submarine::prelude::*;
//!
//! let config = SubmarineConfig::default().with_panels(false);
//! assert!(config.validate().is_ok());
//! ```

pub use crate::config::{
    EngineConfig, HullColoring, HullConfig, RoomLayout, Span, SubdivisionConfig, SubmarineConfig,
};
pub use crate::error::GeometryError;

pub use crate::gfx::geometry::engine::{EngineGenerator, EnginePart, EngineParts, PartTransform};
pub use crate::gfx::geometry::hull::{HullGenerator, HullLayout, Octant};
pub use crate::gfx::geometry::rooms::{RoomGenerator, ROOM_COUNT};
pub use crate::gfx::geometry::subdivide::{Quad, QuadSubdivider, Triangle};
pub use crate::gfx::geometry::{GeometrySink, MeshRegion, VertexBuffers};
pub use crate::gfx::scene::{
    DrawCommand, GenerationReport, Manifest, Orientation, RegionKind, SubmarineModel, Vertex,
    Visibility,
};

pub use cgmath::{InnerSpace, Matrix4, Vector2, Vector3, Vector4};
