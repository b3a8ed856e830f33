//! # Submarine Configuration
//!
//! Immutable geometric constants shared by every generator. The defaults are
//! the reference submarine dimensions; tests and tools substitute their own
//! bounds through the `with_*` builders.
//!
//! ```rust
//! use submarine::config::SubmarineConfig;
//!
//! let config = SubmarineConfig::default()
//!     .with_radius(0.2)
//!     .with_panels(false);
//! assert!(config.validate().is_ok());
//! ```

use crate::error::{GeometryError, Result};

/// How hull vertices are colored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HullColoring {
    /// Keep the per-vertex tint drawn by the quad subdivider
    #[default]
    Subdivider,
    /// Flat color per lobe, from a fixed eight-entry palette
    Octant,
}

/// Controls for the recursive quad subdivider
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubdivisionConfig {
    /// Recursion stops once a corner is closer than this to another corner
    pub threshold: f32,
    /// Lower bound of the red/green tint drawn per vertex
    pub tint_low: f32,
    /// Upper bound of the red/green tint drawn per vertex
    pub tint_high: f32,
    /// Hard limit on recursion depth; quads needing more are rejected up front
    pub max_depth: u32,
}

impl Default for SubdivisionConfig {
    fn default() -> Self {
        Self {
            threshold: 0.01,
            tint_low: 0.1,
            tint_high: 0.1,
            max_depth: 10,
        }
    }
}

/// Hull dimensions: lobe radius, lobe displacement and the optional panels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HullConfig {
    /// Half extent of the cube that gets subdivided and projected
    pub cube_half_extent: f32,
    /// Radius of every spherical lobe and connecting cylinder
    pub radius: f32,
    pub x_offset: f32,
    pub y_offset: f32,
    pub z_offset: f32,
    /// Emit the six flat panels bridging the lobe pairs
    pub panels: bool,
    /// Angular samples per full turn of a connecting cylinder
    pub cylinder_segments: u32,
    /// Full turns swept per connecting cylinder (each extra turn redraws the same ring)
    pub cylinder_turns: u32,
    pub coloring: HullColoring,
}

impl Default for HullConfig {
    fn default() -> Self {
        Self {
            cube_half_extent: 0.5,
            radius: 0.17,
            x_offset: 0.05,
            y_offset: 0.08,
            z_offset: 0.55,
            panels: true,
            cylinder_segments: 400,
            cylinder_turns: 1,
            coloring: HullColoring::Subdivider,
        }
    }
}

/// Z-extent of one room along the hull axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub start: f32,
    pub end: f32,
}

impl Span {
    pub const fn new(start: f32, end: f32) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f32 {
        self.end - self.start
    }

    fn validate(&self, field: &'static str) -> Result<()> {
        if !(self.start.is_finite() && self.end.is_finite()) {
            return Err(GeometryError::invalid(field, "bounds must be finite"));
        }
        if self.start >= self.end {
            return Err(GeometryError::invalid(
                field,
                format!("start {} must be below end {}", self.start, self.end),
            ));
        }
        Ok(())
    }
}

/// Room boundaries and floor heights
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoomLayout {
    /// The three single-height rooms on the upper floor, fore to aft
    pub rooms: [Span; 3],
    /// The two tall rooms spanning the lower floors
    pub tall_rooms: [Span; 2],
    /// Floor heights, top to bottom
    pub floor_y: [f32; 3],
    /// Angular step of every swept arc
    pub arc_step: f32,
    /// Vertical squash applied to the half-cylinder room shells
    pub shell_squash: f32,
    /// Absolute height of the corridor side walls
    pub corridor_wall_height: f32,
}

impl Default for RoomLayout {
    fn default() -> Self {
        Self {
            rooms: [
                Span::new(-0.558, -0.29),
                Span::new(-0.27, 0.064),
                Span::new(0.082, 0.624),
            ],
            tall_rooms: [Span::new(-0.596, -0.154), Span::new(-0.132, 0.414)],
            floor_y: [0.072, -0.062, -0.196],
            arc_step: 0.01,
            shell_squash: 0.75,
            corridor_wall_height: 0.2,
        }
    }
}

/// Engine part dimensions and placement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Number of crank rows; limited by the phase offset table
    pub rows: usize,
    /// Axial distance between neighbouring rows
    pub row_spacing: f32,
    /// Row 0 sits at (0, base_y, base_z)
    pub base_y: f32,
    pub base_z: f32,
    /// Radii of the three crank rings
    pub crank_radii: [f32; 3],
    /// Axial thickness of each crank ring
    pub crank_width: f32,
    pub piston_radius: f32,
    /// Resting distance of a piston from its crank along the bank direction
    pub piston_rest: f32,
    /// Half stroke of the piston oscillation
    pub piston_stroke: f32,
    pub propeller_hub_radius: f32,
    pub propeller_length: f32,
    pub propeller_blade_span: f32,
    /// Distance from the last row to the propeller
    pub propeller_gap: f32,
    /// Angular samples per full turn for every swept engine part
    pub segments: u32,
    /// Phase advance per simulated tick, in radians
    pub phase_step: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rows: 4,
            row_spacing: 0.05,
            base_y: -0.13,
            base_z: 0.35,
            crank_radii: [0.012, 0.02, 0.028],
            crank_width: 0.006,
            piston_radius: 0.014,
            piston_rest: 0.025,
            piston_stroke: 0.01,
            propeller_hub_radius: 0.008,
            propeller_length: 0.06,
            propeller_blade_span: 0.05,
            propeller_gap: 0.08,
            segments: 64,
            phase_step: 0.05,
        }
    }
}

/// Everything the generators read
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SubmarineConfig {
    pub subdivision: SubdivisionConfig,
    pub hull: HullConfig,
    pub rooms: RoomLayout,
    pub engine: EngineConfig,
}

impl SubmarineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.hull.radius = radius;
        self
    }

    pub fn with_offsets(mut self, x: f32, y: f32, z: f32) -> Self {
        self.hull.x_offset = x;
        self.hull.y_offset = y;
        self.hull.z_offset = z;
        self
    }

    pub fn with_panels(mut self, panels: bool) -> Self {
        self.hull.panels = panels;
        self
    }

    pub fn with_hull_coloring(mut self, coloring: HullColoring) -> Self {
        self.hull.coloring = coloring;
        self
    }

    pub fn with_cylinder_turns(mut self, turns: u32) -> Self {
        self.hull.cylinder_turns = turns;
        self
    }

    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.subdivision.threshold = threshold;
        self
    }

    pub fn with_tint(mut self, low: f32, high: f32) -> Self {
        self.subdivision.tint_low = low;
        self.subdivision.tint_high = high;
        self
    }

    pub fn with_room_layout(mut self, layout: RoomLayout) -> Self {
        self.rooms = layout;
        self
    }

    pub fn with_engine(mut self, engine: EngineConfig) -> Self {
        self.engine = engine;
        self
    }

    /// Check every field once, before any generator runs
    pub fn validate(&self) -> Result<()> {
        self.subdivision.validate()?;
        self.hull.validate()?;
        self.rooms.validate()?;
        self.engine.validate()
    }
}

fn positive(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GeometryError::invalid(field, format!("{value} must be positive")))
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(GeometryError::invalid(field, format!("{value} must be non-negative")))
    }
}

impl SubdivisionConfig {
    pub fn validate(&self) -> Result<()> {
        positive("subdivision.threshold", self.threshold)?;
        if !(self.tint_low.is_finite() && self.tint_high.is_finite())
            || self.tint_low > self.tint_high
            || self.tint_low < 0.0
            || self.tint_high > 1.0
        {
            return Err(GeometryError::InvalidTintRange {
                low: self.tint_low,
                high: self.tint_high,
            });
        }
        if self.max_depth == 0 {
            return Err(GeometryError::invalid("subdivision.max_depth", "must be at least 1"));
        }
        Ok(())
    }
}

impl HullConfig {
    pub fn validate(&self) -> Result<()> {
        positive("hull.cube_half_extent", self.cube_half_extent)?;
        positive("hull.radius", self.radius)?;
        non_negative("hull.x_offset", self.x_offset)?;
        non_negative("hull.y_offset", self.y_offset)?;
        non_negative("hull.z_offset", self.z_offset)?;
        if self.cylinder_segments < 3 {
            return Err(GeometryError::invalid(
                "hull.cylinder_segments",
                "need at least 3 samples per turn",
            ));
        }
        if self.cylinder_turns == 0 {
            return Err(GeometryError::invalid("hull.cylinder_turns", "must be at least 1"));
        }
        Ok(())
    }
}

impl RoomLayout {
    pub fn validate(&self) -> Result<()> {
        for span in &self.rooms {
            span.validate("rooms.rooms")?;
        }
        for span in &self.tall_rooms {
            span.validate("rooms.tall_rooms")?;
        }
        if self.rooms[0].end > self.rooms[1].start || self.rooms[1].end > self.rooms[2].start {
            return Err(GeometryError::invalid("rooms.rooms", "rooms must not overlap"));
        }
        if self.floor_y.iter().any(|y| !y.is_finite()) {
            return Err(GeometryError::invalid("rooms.floor_y", "heights must be finite"));
        }
        positive("rooms.arc_step", self.arc_step)?;
        positive("rooms.shell_squash", self.shell_squash)?;
        positive("rooms.corridor_wall_height", self.corridor_wall_height)
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        let max_rows = crate::gfx::geometry::engine::PHASE_OFFSETS.len();
        if self.rows == 0 || self.rows > max_rows {
            return Err(GeometryError::invalid(
                "engine.rows",
                format!("{} rows requested, phase table has {max_rows}", self.rows),
            ));
        }
        non_negative("engine.row_spacing", self.row_spacing)?;
        if !(self.base_y.is_finite() && self.base_z.is_finite()) {
            return Err(GeometryError::invalid("engine.base", "position must be finite"));
        }
        for radius in self.crank_radii {
            positive("engine.crank_radii", radius)?;
        }
        positive("engine.crank_width", self.crank_width)?;
        positive("engine.piston_radius", self.piston_radius)?;
        non_negative("engine.piston_rest", self.piston_rest)?;
        non_negative("engine.piston_stroke", self.piston_stroke)?;
        positive("engine.propeller_hub_radius", self.propeller_hub_radius)?;
        positive("engine.propeller_length", self.propeller_length)?;
        positive("engine.propeller_blade_span", self.propeller_blade_span)?;
        non_negative("engine.propeller_gap", self.propeller_gap)?;
        if self.segments < 3 {
            return Err(GeometryError::invalid("engine.segments", "need at least 3 samples"));
        }
        if !self.phase_step.is_finite() {
            return Err(GeometryError::invalid("engine.phase_step", "must be finite"));
        }
        Ok(())
    }
}
