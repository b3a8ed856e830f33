// src/lib.rs
//! Submarine model generator
//!
//! Procedurally builds a lobed submarine hull, its interior rooms and an
//! animated piston engine as plain vertex buffers, ready to upload with wgpu.

pub mod config;
pub mod error;
pub mod gfx;
pub mod prelude;

pub use config::SubmarineConfig;
pub use error::{GeometryError, Result};
pub use gfx::scene::SubmarineModel;

/// Generates the reference submarine with default dimensions
pub fn default() -> Result<SubmarineModel> {
    SubmarineModel::with_config(SubmarineConfig::default())
}
