//! The generated submarine as one container: shared vertex streams, the
//! region manifest, visibility toggles and the per-tick animation state.

use cgmath::{Matrix4, SquareMatrix, Vector3};
use log::{debug, info, warn};
use rand::Rng;
use std::f32::consts::TAU;

use super::orientation::Orientation;
use super::vertex::Vertex;
use crate::config::SubmarineConfig;
use crate::error::{GeometryError, Result};
use crate::gfx::geometry::engine::{EngineGenerator, EnginePart, EngineParts};
use crate::gfx::geometry::hull::{HullGenerator, HullLayout};
use crate::gfx::geometry::rooms::{RoomGenerator, ROOM_COUNT};
use crate::gfx::geometry::{MeshRegion, VertexBuffers};

/// Which shading path a draw takes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionKind {
    Hull,
    Room,
    Engine,
}

impl RegionKind {
    /// Integer tag the shaders switch on
    pub fn shader_type(self) -> i32 {
        match self {
            RegionKind::Hull => 0,
            RegionKind::Room => 1,
            RegionKind::Engine => 2,
        }
    }
}

/// Every region produced by generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Manifest {
    pub hull: MeshRegion,
    pub rooms: [MeshRegion; ROOM_COUNT],
    pub engine: EngineParts,
}

impl Manifest {
    /// Regions by name, in buffer order
    pub fn named_regions(&self) -> Vec<(String, MeshRegion)> {
        let mut named = vec![("hull".to_string(), self.hull)];
        named.extend(
            self.rooms
                .iter()
                .enumerate()
                .map(|(i, region)| (format!("room[{i}]"), *region)),
        );
        named.push(("engine.crank".to_string(), self.engine.crank));
        named.push(("engine.piston".to_string(), self.engine.piston));
        named.push(("engine.propeller".to_string(), self.engine.propeller));
        named
    }
}

/// Per-region draw flags; everything starts visible
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visibility {
    pub hull: bool,
    pub rooms: [bool; ROOM_COUNT],
    pub engine: bool,
}

impl Default for Visibility {
    fn default() -> Self {
        Self {
            hull: true,
            rooms: [true; ROOM_COUNT],
            engine: true,
        }
    }
}

/// One non-indexed draw call for the renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub kind: RegionKind,
    pub region: MeshRegion,
    /// Engine parts carry their part and placement; everything else draws in place
    pub part: Option<EnginePart>,
    pub transform: Matrix4<f32>,
}

/// Vertex totals of one generation run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationReport {
    pub hull: HullLayout,
    pub room_vertices: u32,
    pub engine_vertices: u32,
    pub total_vertices: u32,
    pub total_triangles: u32,
}

/// The assembled submarine: buffers, manifest and per-frame state
#[derive(Debug, Clone)]
pub struct SubmarineModel {
    config: SubmarineConfig,
    buffers: VertexBuffers,
    manifest: Manifest,
    engine: EngineGenerator,
    report: GenerationReport,
    visibility: Visibility,
    orientation: Orientation,
    time: u32,
    phase: f32,
    light_origin: Vector3<f32>,
}

impl SubmarineModel {
    /// Generate hull, rooms and engine, in that order, into one set of buffers
    pub fn generate<R: Rng + ?Sized>(config: SubmarineConfig, rng: &mut R) -> Result<Self> {
        config.validate()?;

        let hull = HullGenerator::new(&config.hull, &config.subdivision)?;
        let rooms = RoomGenerator::new(&config.rooms, config.hull.radius)?;
        let engine = EngineGenerator::new(&config.engine)?;

        let mut buffers = VertexBuffers::new();
        let hull_layout = hull.generate(&mut buffers, rng)?;
        let room_regions = rooms.generate(&mut buffers)?;
        let engine_parts = engine.generate(&mut buffers)?;
        let total = buffers.check_lengths()?;

        let manifest = Manifest {
            hull: hull_layout.region,
            rooms: room_regions,
            engine: engine_parts,
        };
        let report = GenerationReport {
            hull: hull_layout,
            room_vertices: room_regions.iter().map(|r| r.count).sum(),
            engine_vertices: engine_parts.crank.count
                + engine_parts.piston.count
                + engine_parts.propeller.count,
            total_vertices: u32::try_from(total).map_err(|_| GeometryError::VertexCountOverflow(total))?,
            total_triangles: u32::try_from(buffers.triangle_count())
                .map_err(|_| GeometryError::VertexCountOverflow(total))?,
        };

        info!(
            "submarine generated: {} vertices, {} triangles (hull {}, rooms {}, engine {})",
            report.total_vertices,
            report.total_triangles,
            report.hull.region.count,
            report.room_vertices,
            report.engine_vertices
        );

        Ok(Self {
            config,
            buffers,
            manifest,
            engine,
            report,
            visibility: Visibility::default(),
            orientation: Orientation::default(),
            time: 0,
            phase: 0.0,
            light_origin: Vector3::new(0.0, 0.0, 0.0),
        })
    }

    /// Generate with the thread-local RNG
    pub fn with_config(config: SubmarineConfig) -> Result<Self> {
        Self::generate(config, &mut rand::rng())
    }

    pub fn config(&self) -> &SubmarineConfig {
        &self.config
    }

    pub fn buffers(&self) -> &VertexBuffers {
        &self.buffers
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    pub fn report(&self) -> &GenerationReport {
        &self.report
    }

    /// Interleaved vertices ready for upload with `bytemuck::cast_slice`
    pub fn vertices(&self) -> Result<Vec<Vertex>> {
        self.buffers.to_vertices()
    }

    pub fn visibility(&self) -> &Visibility {
        &self.visibility
    }

    /// Flip hull visibility, returning the new state
    pub fn toggle_hull(&mut self) -> bool {
        self.visibility.hull = !self.visibility.hull;
        self.visibility.hull
    }

    pub fn toggle_room(&mut self, index: usize) -> Result<bool> {
        let flag = self
            .visibility
            .rooms
            .get_mut(index)
            .ok_or(GeometryError::RoomOutOfRange {
                index,
                count: ROOM_COUNT,
            })?;
        *flag = !*flag;
        if self.manifest.rooms[index].is_empty() {
            warn!("room {index} has no geometry; toggling it changes nothing on screen");
        }
        Ok(*flag)
    }

    pub fn toggle_engine(&mut self) -> bool {
        self.visibility.engine = !self.visibility.engine;
        self.visibility.engine
    }

    pub fn orientation(&self) -> &Orientation {
        &self.orientation
    }

    pub fn orientation_mut(&mut self) -> &mut Orientation {
        &mut self.orientation
    }

    /// Advance the clock, the engine phase and the spin by one tick
    pub fn tick(&mut self) {
        self.time = self.time.wrapping_add(1);
        self.phase = (self.phase + self.config.engine.phase_step).rem_euclid(TAU);
        self.orientation.update();
    }

    pub fn time(&self) -> u32 {
        self.time
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn set_phase(&mut self, phase: f32) {
        self.phase = phase;
    }

    pub fn set_light_origin(&mut self, origin: Vector3<f32>) {
        self.light_origin = origin;
    }

    /// Light position orbiting the origin with the clock
    pub fn light_position(&self) -> Vector3<f32> {
        let t = self.time as f32;
        self.light_origin + Vector3::new(2.0 * (0.005 * t).cos(), -2.0, 2.0 * (0.01 * t).sin())
    }

    /// Draws for the current frame: hull, visible rooms, then engine parts
    pub fn draw_list(&self) -> Vec<DrawCommand> {
        let mut draws = Vec::new();
        let identity = Matrix4::identity();

        if self.visibility.hull {
            draws.push(DrawCommand {
                kind: RegionKind::Hull,
                region: self.manifest.hull,
                part: None,
                transform: identity,
            });
        } else {
            debug!("hull hidden");
        }

        for (index, (region, visible)) in self
            .manifest
            .rooms
            .iter()
            .zip(self.visibility.rooms)
            .enumerate()
        {
            if !visible {
                debug!("room {index} hidden");
            } else if region.is_empty() {
                debug!("room {index} is empty, skipping draw");
            } else {
                draws.push(DrawCommand {
                    kind: RegionKind::Room,
                    region: *region,
                    part: None,
                    transform: identity,
                });
            }
        }

        if self.visibility.engine {
            draws.extend(
                self.engine
                    .compute_draw_transforms(&self.manifest.engine, self.phase)
                    .into_iter()
                    .map(|placed| DrawCommand {
                        kind: RegionKind::Engine,
                        region: placed.region,
                        part: Some(placed.part),
                        transform: placed.model_matrix(),
                    }),
            );
        } else {
            debug!("engine hidden");
        }

        draws
    }
}
