//! # Scene Assembly
//!
//! Ties the generators together into one [`SubmarineModel`]: a single set of
//! vertex buffers, the manifest of regions inside it, per-region visibility,
//! and the per-tick state (clock, engine phase, spin) the renderer reads.
//!
//! ```no_run
//! use submarine::config::SubmarineConfig;
//! use submarine::gfx::scene::SubmarineModel;
//!
//! let mut model = SubmarineModel::with_config(SubmarineConfig::default()).unwrap();
//! model.toggle_room(2).unwrap();
//! model.tick();
//! for draw in model.draw_list() {
//!     // renderer issues draw(draw.region.range()) with draw.transform
//!     let _ = draw.region.range();
//! }
//! ```

pub mod model;
pub mod orientation;
pub mod vertex;

pub use model::{DrawCommand, GenerationReport, Manifest, RegionKind, SubmarineModel, Visibility};
pub use orientation::Orientation;
pub use vertex::Vertex;
