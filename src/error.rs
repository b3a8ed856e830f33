//! # Geometry Errors
//!
//! Every failure in this crate is a precondition violation detected before or
//! right after a generator runs. Generation is a pure batch computation, so
//! none of these are retryable: the caller fixes its configuration or the code.

use thiserror::Error;

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, GeometryError>;

/// Errors raised while validating configuration or generating geometry
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// A configuration value is out of its legal range
    #[error("invalid configuration for `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    /// A quad corner is NaN or infinite, so the edge-length test never terminates
    #[error("quad corner {corner} is not finite")]
    NonFiniteQuad { corner: char },

    /// A quad is too large relative to the subdivision threshold
    #[error("quad extent {extent} needs {depth} subdivision levels (limit {limit})")]
    QuadTooDeep { extent: f32, depth: u32, limit: u32 },

    /// The color tint range cannot be sampled
    #[error("invalid tint range [{low}, {high}]")]
    InvalidTintRange { low: f32, high: f32 },

    /// The four attribute streams ended at different lengths
    #[error(
        "vertex attribute length mismatch: positions={positions}, normals={normals}, colors={colors}, tex_coords={tex_coords}"
    )]
    AttributeLengthMismatch {
        positions: usize,
        normals: usize,
        colors: usize,
        tex_coords: usize,
    },

    /// `begin_region` was called while another region was still open
    #[error("a mesh region starting at vertex {start} is already open")]
    RegionAlreadyOpen { start: usize },

    /// `end_region` was called with no open region
    #[error("no mesh region is open")]
    NoOpenRegion,

    /// The buffers grew past what a 32-bit draw range can address
    #[error("vertex count {0} exceeds the u32 draw range")]
    VertexCountOverflow(usize),

    /// A room index outside `0..ROOM_COUNT`
    #[error("room index {index} out of range (0..{count})")]
    RoomOutOfRange { index: usize, count: usize },
}

impl GeometryError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}
