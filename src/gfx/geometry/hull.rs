//! # Hull Generation
//!
//! The hull starts as a finely subdivided cube. Every leaf triangle is
//! classified into an octant by the signs of its centroid, its vertices are
//! pushed onto a sphere of the hull radius, and the result is shifted out to
//! that octant's lobe. Three families of connecting cylinders join the lobes
//! along each axis, and six optional flat panels close the gaps between them.

use cgmath::{InnerSpace, Vector2, Vector3, Vector4};
use log::{debug, info};
use rand::Rng;
use std::f32::consts::PI;

use super::primitives::{triangle, BLACK};
use super::subdivide::{Quad, QuadSubdivider, Triangle};
use super::{GeometrySink, MeshRegion};
use crate::config::{HullColoring, HullConfig, SubdivisionConfig};
use crate::error::Result;

/// One of the eight lobes, identified by the sign of each coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Octant {
    pub positive_x: bool,
    pub positive_y: bool,
    pub positive_z: bool,
}

impl Octant {
    /// Classify a point; zero counts as the negative side
    pub fn classify(point: Vector3<f32>) -> Self {
        Self {
            positive_x: point.x > 0.0,
            positive_y: point.y > 0.0,
            positive_z: point.z > 0.0,
        }
    }

    pub fn all() -> impl Iterator<Item = Octant> {
        (0..8).map(|i| Octant {
            positive_x: i & 4 != 0,
            positive_y: i & 2 != 0,
            positive_z: i & 1 != 0,
        })
    }

    /// Where this octant's lobe is centered
    pub fn offset(&self, config: &HullConfig) -> Vector3<f32> {
        let sign = |positive: bool| if positive { 1.0 } else { -1.0 };
        Vector3::new(
            sign(self.positive_x) * config.x_offset,
            sign(self.positive_y) * config.y_offset,
            sign(self.positive_z) * config.z_offset,
        )
    }

    /// Flat lobe color used by [`HullColoring::Octant`]
    pub fn color(&self) -> Vector4<f32> {
        match (self.positive_x, self.positive_y, self.positive_z) {
            (true, true, true) => Vector4::new(0.5, 0.0, 0.5, 1.0),
            (true, true, false) => Vector4::new(0.15, 0.0, 0.15, 1.0),
            (true, false, true) => Vector4::new(0.1, 0.6, 0.1, 1.0),
            (true, false, false) => Vector4::new(0.03, 0.18, 0.03, 1.0),
            (false, true, true) => Vector4::new(0.1, 0.1, 0.3, 1.0),
            (false, true, false) => Vector4::new(0.03, 0.03, 0.09, 1.0),
            (false, false, true) => Vector4::new(0.5, 0.1, 0.0, 1.0),
            (false, false, false) => Vector4::new(0.15, 0.03, 0.0, 1.0),
        }
    }
}

/// Axis a connecting cylinder runs along
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Map cross-section coordinates `(u, v)` and axial coordinate `w` to world space
    fn place(self, u: f32, v: f32, w: f32) -> Vector3<f32> {
        match self {
            Axis::X => Vector3::new(w, u, v),
            Axis::Y => Vector3::new(u, w, v),
            Axis::Z => Vector3::new(u, v, w),
        }
    }

    /// Lobe offsets across the section, then the half length along the axis
    fn offsets(self, config: &HullConfig) -> (f32, f32, f32) {
        match self {
            Axis::X => (config.y_offset, config.z_offset, config.x_offset),
            Axis::Y => (config.x_offset, config.z_offset, config.y_offset),
            Axis::Z => (config.x_offset, config.y_offset, config.z_offset),
        }
    }
}

/// Vertex counts of each stage inside the hull region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HullLayout {
    pub region: MeshRegion,
    pub lobe_vertices: u32,
    pub cylinder_vertices: u32,
    pub panel_vertices: u32,
}

/// Builds the lobed hull into a [`GeometrySink`]
#[derive(Debug, Clone)]
pub struct HullGenerator {
    config: HullConfig,
    subdivider: QuadSubdivider,
}

impl HullGenerator {
    pub fn new(hull: &HullConfig, subdivision: &SubdivisionConfig) -> Result<Self> {
        hull.validate()?;
        Ok(Self {
            config: *hull,
            subdivider: QuadSubdivider::new(subdivision)?,
        })
    }

    pub fn config(&self) -> &HullConfig {
        &self.config
    }

    /// The six faces of the starting cube, with outward normals
    pub fn cube_faces(&self) -> [Quad; 6] {
        let h = self.config.cube_half_extent;
        let v = Vector3::new;
        [
            Quad::new([v(h, h, h), v(-h, h, h), v(h, -h, h), v(-h, -h, h)], Vector3::unit_z()),
            Quad::new([v(-h, -h, -h), v(-h, h, -h), v(h, -h, -h), v(h, h, -h)], -Vector3::unit_z()),
            Quad::new([v(-h, h, -h), v(-h, h, h), v(h, h, -h), v(h, h, h)], Vector3::unit_y()),
            Quad::new([v(h, -h, h), v(-h, -h, h), v(h, -h, -h), v(-h, -h, -h)], -Vector3::unit_y()),
            Quad::new([v(h, h, h), v(h, -h, h), v(h, h, -h), v(h, -h, -h)], Vector3::unit_x()),
            Quad::new([v(-h, -h, -h), v(-h, -h, h), v(-h, h, -h), v(-h, h, h)], -Vector3::unit_x()),
        ]
    }

    /// Subdivide every cube face into the transient triangle list
    pub fn subdivide_faces<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<Triangle>> {
        let mut triangles = Vec::new();
        for face in self.cube_faces() {
            self.subdivider.subdivide(&face, rng, &mut triangles)?;
        }
        debug!("cube subdivided into {} triangles", triangles.len());
        Ok(triangles)
    }

    /// Project one triangle onto its lobe and append it
    ///
    /// The octant comes from the unprojected centroid so all three vertices
    /// land on the same lobe. Normals are the radial directions; the flat
    /// face normal from the subdivider is dropped.
    pub fn project_triangle<S: GeometrySink + ?Sized>(&self, tri: &Triangle, sink: &mut S) -> Octant {
        let octant = Octant::classify(tri.centroid());
        let offset = octant.offset(&self.config);

        for i in 0..3 {
            let direction = tri.points[i].normalize();
            let color = match self.config.coloring {
                HullColoring::Subdivider => tri.colors[i],
                HullColoring::Octant => octant.color(),
            };
            sink.append_vertex(
                direction * self.config.radius + offset,
                direction,
                color,
                tri.tex_coords[i],
            );
        }

        octant
    }

    /// One family of tubes joining the lobes along `axis`
    fn connecting_cylinder<S: GeometrySink + ?Sized>(&self, axis: Axis, sink: &mut S) {
        let radius = self.config.radius;
        let segments = self.config.cylinder_segments;
        let increment = 2.0 * PI / segments as f32;
        let (across_u, across_v, half_length) = axis.offsets(&self.config);

        for k in 0..segments * self.config.cylinder_turns {
            let rot = k as f32 * increment;
            let (u_cur, v_cur) = (radius * rot.cos(), radius * rot.sin());
            let (u_prev, v_prev) = (radius * (rot - increment).cos(), radius * (rot - increment).sin());

            // The sample angle picks which pair of lobes this slat joins
            let shift_u = if u_cur > 0.0 { across_u } else { -across_u };
            let shift_v = if v_cur > 0.0 { across_v } else { -across_v };

            let point = |u: f32, v: f32, w: f32| axis.place(u + shift_u, v + shift_v, w);
            let cur_lo = point(u_cur, v_cur, -half_length);
            let cur_hi = point(u_cur, v_cur, half_length);
            let prev_lo = point(u_prev, v_prev, -half_length);
            let prev_hi = point(u_prev, v_prev, half_length);

            let normal = axis.place(rot.cos(), rot.sin(), 0.0);
            let u0 = (k % segments) as f32 / segments as f32;
            let u1 = u0 + 1.0 / segments as f32;

            triangle(
                sink,
                [cur_lo, cur_hi, prev_lo],
                normal,
                BLACK,
                [Vector2::new(u1, 0.0), Vector2::new(u1, 1.0), Vector2::new(u0, 0.0)],
            );
            triangle(
                sink,
                [prev_hi, prev_lo, cur_hi],
                normal,
                BLACK,
                [Vector2::new(u0, 1.0), Vector2::new(u0, 0.0), Vector2::new(u1, 1.0)],
            );
        }
    }

    /// Six flat panels, one per axis direction, at the outer radius
    fn panels<S: GeometrySink + ?Sized>(&self, sink: &mut S) {
        let HullConfig {
            radius,
            x_offset: x,
            y_offset: y,
            z_offset: z,
            ..
        } = self.config;
        let v = Vector3::new;
        let (px, py, pz) = (radius + x, radius + y, radius + z);

        let panels: [(Vector3<f32>, [Vector3<f32>; 6]); 6] = [
            (Vector3::unit_x(), [v(px, y, -z), v(px, y, z), v(px, -y, z), v(px, -y, z), v(px, -y, -z), v(px, y, -z)]),
            (-Vector3::unit_x(), [v(-px, y, z), v(-px, y, -z), v(-px, -y, z), v(-px, -y, -z), v(-px, -y, z), v(-px, y, -z)]),
            (Vector3::unit_y(), [v(x, py, z), v(x, py, -z), v(-x, py, z), v(-x, py, -z), v(-x, py, z), v(x, py, -z)]),
            (-Vector3::unit_y(), [v(x, -py, -z), v(x, -py, z), v(-x, -py, z), v(-x, -py, z), v(-x, -py, -z), v(x, -py, -z)]),
            (Vector3::unit_z(), [v(x, -y, pz), v(x, y, pz), v(-x, y, pz), v(-x, y, pz), v(-x, -y, pz), v(x, -y, pz)]),
            (-Vector3::unit_z(), [v(x, -y, -pz), v(-x, y, -pz), v(x, y, -pz), v(-x, y, -pz), v(x, -y, -pz), v(-x, -y, -pz)]),
        ];

        for (normal, points) in panels {
            for point in points {
                // In-plane coordinates sit at +/- offset, so their sign is the texcoord corner
                let in_plane = point - normal * point.dot(normal);
                let (u, w) = if normal.x != 0.0 {
                    (in_plane.y, in_plane.z)
                } else if normal.y != 0.0 {
                    (in_plane.x, in_plane.z)
                } else {
                    (in_plane.x, in_plane.y)
                };
                let uv = Vector2::new(
                    if u > 0.0 { 1.0 } else { 0.0 },
                    if w > 0.0 { 1.0 } else { 0.0 },
                );
                sink.append_vertex(point, normal, BLACK, uv);
            }
        }
    }

    /// Generate the whole hull as one region
    pub fn generate<S: GeometrySink + ?Sized, R: Rng + ?Sized>(
        &self,
        sink: &mut S,
        rng: &mut R,
    ) -> Result<HullLayout> {
        // Subdivide before opening the region so a rejected quad leaves the sink untouched
        let triangles = self.subdivide_faces(rng)?;

        sink.begin_region()?;
        let start = sink.vertex_count();
        for tri in &triangles {
            self.project_triangle(tri, sink);
        }
        let lobes_end = sink.vertex_count();

        for axis in [Axis::Z, Axis::Y, Axis::X] {
            self.connecting_cylinder(axis, sink);
        }
        let cylinders_end = sink.vertex_count();

        if self.config.panels {
            self.panels(sink);
        }

        let region = sink.end_region()?;
        let layout = HullLayout {
            region,
            lobe_vertices: (lobes_end - start) as u32,
            cylinder_vertices: (cylinders_end - lobes_end) as u32,
            panel_vertices: (sink.vertex_count() - cylinders_end) as u32,
        };

        info!(
            "hull starts at {} and is {} vertices ({} lobe, {} cylinder, {} panel)",
            region.start,
            region.count,
            layout.lobe_vertices,
            layout.cylinder_vertices,
            layout.panel_vertices
        );
        Ok(layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GeometryError;
    use crate::gfx::geometry::VertexBuffers;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn coarse() -> SubdivisionConfig {
        SubdivisionConfig {
            threshold: 0.1,
            ..SubdivisionConfig::default()
        }
    }

    fn generate(hull: HullConfig, subdivision: SubdivisionConfig) -> (VertexBuffers, HullLayout) {
        let generator = HullGenerator::new(&hull, &subdivision).unwrap();
        let mut buffers = VertexBuffers::new();
        let mut rng = StdRng::seed_from_u64(42);
        let layout = generator.generate(&mut buffers, &mut rng).unwrap();
        (buffers, layout)
    }

    fn leaf_triangle(points: [Vector3<f32>; 3]) -> Triangle {
        Triangle {
            points,
            tex_coords: [Vector2::new(0.0, 0.0); 3],
            colors: [Vector4::new(0.1, 0.1, 0.0, 1.0); 3],
            normals: [Vector3::unit_z(); 3],
        }
    }

    #[test]
    fn test_octant_classification() {
        let config = HullConfig::default();
        let (x, y, z) = (config.x_offset, config.y_offset, config.z_offset);

        let up = Octant::classify(Vector3::new(0.3, 0.3, 0.3));
        assert_eq!(up.offset(&config), Vector3::new(x, y, z));

        let mixed = Octant::classify(Vector3::new(-0.3, 0.2, -0.1));
        assert_eq!(mixed.offset(&config), Vector3::new(-x, y, -z));
        assert_eq!(Octant::all().count(), 8);
    }

    #[test]
    fn test_projected_triangle_shares_one_lobe() {
        let config = HullConfig::default();
        let generator = HullGenerator::new(&config, &coarse()).unwrap();
        // Centroid (0.3, 0.3, 0.3) even though one corner has a negative x
        let tri = leaf_triangle([
            Vector3::new(-0.1, 0.3, 0.3),
            Vector3::new(0.5, 0.3, 0.3),
            Vector3::new(0.5, 0.3, 0.3),
        ]);
        let mut buffers = VertexBuffers::new();
        let octant = generator.project_triangle(&tri, &mut buffers);

        let offset = Vector3::new(config.x_offset, config.y_offset, config.z_offset);
        assert_eq!(octant.offset(&config), offset);
        for (p, raw) in buffers.positions.iter().zip(tri.points) {
            let expected = raw.normalize() * config.radius + offset;
            assert!((Vector3::from(*p) - expected).magnitude() < 1e-6);
        }

        // Centroid (-0.3, 0.2, -0.1): every corner goes to the (-x, +y, -z) lobe
        let tri = leaf_triangle([
            Vector3::new(-0.5, 0.1, -0.2),
            Vector3::new(-0.3, 0.4, 0.1),
            Vector3::new(-0.1, 0.1, -0.2),
        ]);
        let mut buffers = VertexBuffers::new();
        let octant = generator.project_triangle(&tri, &mut buffers);

        let offset = Vector3::new(-config.x_offset, config.y_offset, -config.z_offset);
        assert_eq!(octant.offset(&config), offset);
        assert_eq!(buffers.vertex_count(), 3);
        for (p, raw) in buffers.positions.iter().zip(tri.points) {
            let expected = raw.normalize() * config.radius + offset;
            assert!((Vector3::from(*p) - expected).magnitude() < 1e-6);
        }
    }

    #[test]
    fn test_failed_generation_leaves_sink_usable() {
        let hull = HullConfig {
            cube_half_extent: 100.0,
            ..HullConfig::default()
        };
        let generator = HullGenerator::new(&hull, &coarse()).unwrap();
        let mut buffers = VertexBuffers::new();
        let mut rng = StdRng::seed_from_u64(42);

        let result = generator.generate(&mut buffers, &mut rng);
        assert!(matches!(result, Err(GeometryError::QuadTooDeep { .. })));
        assert_eq!(buffers.vertex_count(), 0);

        buffers.begin_region().unwrap();
        let region = buffers.end_region().unwrap();
        assert_eq!(region.count, 0);
    }

    #[test]
    fn test_lobe_vertices_lie_on_their_sphere() {
        let config = HullConfig::default();
        let (buffers, layout) = generate(config, coarse());
        let offsets: Vec<_> = Octant::all().map(|o| o.offset(&config)).collect();

        for i in 0..layout.lobe_vertices as usize {
            let p = Vector3::from(buffers.positions[i]);
            let n = Vector3::from(buffers.normals[i]);
            let origin = p - n * config.radius;
            let lobe = offsets
                .iter()
                .find(|o| (origin - **o).magnitude() < 1e-5)
                .expect("vertex is not on any lobe");
            assert!(((p - *lobe).magnitude() - config.radius).abs() < 1e-5);
        }
    }

    #[test]
    fn test_attribute_streams_stay_aligned() {
        let (buffers, layout) = generate(HullConfig::default(), coarse());
        assert_eq!(buffers.check_lengths(), Ok(layout.region.count as usize));
        assert_eq!(
            layout.lobe_vertices + layout.cylinder_vertices + layout.panel_vertices,
            layout.region.count
        );
    }

    #[test]
    fn test_coarse_lobe_count() {
        // Unit faces reach 0.0625 < 0.1 after four halvings
        let (_, layout) = generate(HullConfig::default(), coarse());
        assert_eq!(layout.lobe_vertices, 6 * 2 * 4u32.pow(4) * 3);
        assert_eq!(layout.cylinder_vertices, 3 * 400 * 6);
    }

    #[test]
    fn test_literal_five_turn_sweep() {
        let hull = HullConfig {
            cylinder_turns: 5,
            ..HullConfig::default()
        };
        let (_, layout) = generate(hull, coarse());
        assert_eq!(layout.cylinder_vertices, 5 * 3 * 400 * 6);
    }

    #[test]
    fn test_panels_add_six_axis_quads() {
        let (_, without) = generate(HullConfig { panels: false, ..HullConfig::default() }, coarse());
        let (buffers, with) = generate(HullConfig::default(), coarse());

        assert_eq!(without.panel_vertices, 0);
        assert_eq!(with.region.count - without.region.count, 36);

        let panel_normals = &buffers.normals[buffers.normals.len() - 36..];
        let axes = [
            [1.0, 0.0, 0.0],
            [-1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, -1.0, 0.0],
            [0.0, 0.0, 1.0],
            [0.0, 0.0, -1.0],
        ];
        for axis in axes {
            assert_eq!(panel_normals.iter().filter(|n| **n == axis).count(), 6);
        }
    }

    #[test]
    fn test_octant_coloring() {
        let hull = HullConfig {
            coloring: HullColoring::Octant,
            ..HullConfig::default()
        };
        let (buffers, layout) = generate(hull, coarse());
        let palette: Vec<[f32; 4]> = Octant::all().map(|o| o.color().into()).collect();

        assert!(buffers.colors[..layout.lobe_vertices as usize]
            .iter()
            .all(|c| palette.contains(c)));
        // Cylinders and panels stay black whatever the lobe coloring
        let lobes = layout.lobe_vertices as usize;
        assert!(buffers.region_colors(layout.region)[lobes..]
            .iter()
            .all(|c| *c == [0.0, 0.0, 0.0, 1.0]));
    }

    #[test]
    fn test_reference_hull_panels() {
        let subdivision = SubdivisionConfig::default();
        let hull = HullConfig {
            radius: 0.17,
            x_offset: 0.05,
            y_offset: 0.08,
            z_offset: 0.55,
            panels: true,
            ..HullConfig::default()
        };
        let (buffers, layout) = generate(hull, subdivision);

        assert_eq!(layout.lobe_vertices, 6 * 2 * 4u32.pow(7) * 3);
        assert_eq!(layout.panel_vertices, 36);
        assert_eq!(
            layout.region.count,
            layout.lobe_vertices + layout.cylinder_vertices + 36
        );
        for n in &buffers.normals[buffers.normals.len() - 36..] {
            let n = Vector3::from(*n);
            assert_eq!(n.magnitude(), 1.0);
            assert_eq!(n.x.abs() + n.y.abs() + n.z.abs(), 1.0);
        }
    }
}
