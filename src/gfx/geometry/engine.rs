//! # Engine Parts and Animation
//!
//! The engine is drawn from three small meshes reused many times: a crank
//! (three concentric rings), a piston face (a flat disk) and a propeller (a
//! hub tube with six blade roots). Each frame, [`EngineGenerator::compute_draw_transforms`]
//! places one crank and two pistons per row plus a single propeller, all
//! driven by one phase angle.

use cgmath::{Matrix4, Rad, Vector2, Vector3, Vector4};
use log::info;
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use super::primitives::{cylinder_band, disk_fan, face_normal, triangle};
use super::{GeometrySink, MeshRegion};
use crate::config::{EngineConfig, Span};
use crate::error::Result;

/// Phase offset of each row's two pistons, in radians
///
/// Hand tuned to read like a firing order; one entry per row, left bank first.
pub const PHASE_OFFSETS: [[f32; 2]; 4] = [
    [0.0, 3.93],
    [2.36, 5.5],
    [4.71, 0.79],
    [1.57, 3.14],
];

/// Directions the two piston banks travel along, forming a V
///
/// Not normalized: piston travel is scaled by the full bank vector.
pub const BANKS: [Vector3<f32>; 2] = [
    Vector3::new(-1.0, 1.0, 0.0),
    Vector3::new(1.0, 1.0, 0.0),
];

/// Tilt about Z that stands a piston face up along its bank
const BANK_TILT: [f32; 2] = [FRAC_PI_4, -FRAC_PI_4];

const BLADE_COUNT: usize = 6;

pub const STEEL: Vector4<f32> = Vector4::new(0.45, 0.45, 0.5, 1.0);
pub const BRASS: Vector4<f32> = Vector4::new(0.7, 0.55, 0.2, 1.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnginePart {
    Crank,
    Piston,
    Propeller,
}

/// Regions of the three reusable engine meshes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EngineParts {
    pub crank: MeshRegion,
    pub piston: MeshRegion,
    pub propeller: MeshRegion,
}

impl EngineParts {
    pub fn region(&self, part: EnginePart) -> MeshRegion {
        match part {
            EnginePart::Crank => self.crank,
            EnginePart::Piston => self.piston,
            EnginePart::Propeller => self.propeller,
        }
    }
}

/// Placement of one engine part instance for the current frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PartTransform {
    pub part: EnginePart,
    pub region: MeshRegion,
    pub rotation: Matrix4<f32>,
    pub translation: Vector3<f32>,
}

impl PartTransform {
    /// Rotate about the part's own origin, then move it into place
    pub fn model_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.translation) * self.rotation
    }
}

#[derive(Debug, Clone, Copy)]
pub struct EngineGenerator {
    config: EngineConfig,
}

impl EngineGenerator {
    pub fn new(config: &EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config: *config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Append the crank, piston and propeller meshes, one region each
    pub fn generate<S: GeometrySink + ?Sized>(&self, sink: &mut S) -> Result<EngineParts> {
        let first = sink.vertex_count();

        sink.begin_region()?;
        self.add_crank(sink);
        let crank = sink.end_region()?;

        sink.begin_region()?;
        self.add_piston(sink);
        let piston = sink.end_region()?;

        sink.begin_region()?;
        self.add_propeller(sink);
        let propeller = sink.end_region()?;

        info!("engine contains {} vertices", sink.vertex_count() - first);
        Ok(EngineParts {
            crank,
            piston,
            propeller,
        })
    }

    fn add_crank<S: GeometrySink + ?Sized>(&self, sink: &mut S) {
        let half = self.config.crank_width / 2.0;
        for radius in self.config.crank_radii {
            cylinder_band(sink, radius, Span::new(-half, half), self.config.segments, STEEL);
        }
    }

    fn add_piston<S: GeometrySink + ?Sized>(&self, sink: &mut S) {
        disk_fan(
            sink,
            self.config.piston_radius,
            0.0,
            self.config.segments,
            Vector3::unit_y(),
            STEEL,
        );
    }

    fn add_propeller<S: GeometrySink + ?Sized>(&self, sink: &mut S) {
        let hub = self.config.propeller_hub_radius;
        let length = self.config.propeller_length;
        cylinder_band(sink, hub, Span::new(0.0, length), self.config.segments, BRASS);

        let root_half_width = PI / 12.0;
        let tip_radius = hub + self.config.propeller_blade_span;
        for k in 0..BLADE_COUNT {
            let angle = k as f32 * 2.0 * PI / BLADE_COUNT as f32;
            let on_hub = |a: f32| Vector3::new(hub * a.cos(), hub * a.sin(), 0.0);
            let a = on_hub(angle - root_half_width);
            let b = on_hub(angle + root_half_width);
            // Tips lean back along the hub to give the blades pitch
            let c = Vector3::new(tip_radius * angle.cos(), tip_radius * angle.sin(), 0.5 * length);

            triangle(
                sink,
                [a, b, c],
                face_normal(a, b, c),
                BRASS,
                [Vector2::new(0.0, 0.0), Vector2::new(1.0, 0.0), Vector2::new(0.5, 1.0)],
            );
        }
    }

    /// Where row `k`'s crank sits
    fn row_origin(&self, row: usize) -> Vector3<f32> {
        Vector3::new(
            0.0,
            self.config.base_y,
            self.config.base_z - row as f32 * self.config.row_spacing,
        )
    }

    /// Every part instance to draw at phase `theta`
    ///
    /// Ordered row by row (crank, left piston, right piston), then the
    /// propeller. Depends on nothing but `theta` and the part regions.
    pub fn compute_draw_transforms(&self, parts: &EngineParts, theta: f32) -> Vec<PartTransform> {
        let rows = self.config.rows.min(PHASE_OFFSETS.len());
        let mut transforms = Vec::with_capacity(rows * 3 + 1);

        for row in 0..rows {
            let origin = self.row_origin(row);
            transforms.push(PartTransform {
                part: EnginePart::Crank,
                region: parts.crank,
                rotation: Matrix4::from_angle_z(Rad(theta + row as f32 * FRAC_PI_2)),
                translation: origin,
            });

            for bank in 0..2 {
                let travel = (theta + PHASE_OFFSETS[row][bank]).cos() * self.config.piston_stroke
                    + self.config.piston_rest;
                transforms.push(PartTransform {
                    part: EnginePart::Piston,
                    region: parts.piston,
                    rotation: Matrix4::from_angle_z(Rad(BANK_TILT[bank])),
                    translation: origin + BANKS[bank] * travel,
                });
            }
        }

        let last = self.row_origin(rows.saturating_sub(1));
        transforms.push(PartTransform {
            part: EnginePart::Propeller,
            region: parts.propeller,
            rotation: Matrix4::from_angle_z(Rad(theta + FRAC_PI_2)),
            translation: last - Vector3::unit_z() * self.config.propeller_gap,
        });

        transforms
    }
}
