//! # Primitive Emitters
//!
//! The small vocabulary every generator is built from: flat triangles and
//! quads, swept partial cylinders, closed cylinder bands and flat disk fans.
//! Everything is emitted as a non-indexed triangle list with all four vertex
//! attributes, so no emitter can leave the streams misaligned.

use cgmath::{InnerSpace, Vector2, Vector3, Vector4};
use std::f32::consts::PI;

use super::GeometrySink;
use crate::config::Span;

pub const RED: Vector4<f32> = Vector4::new(1.0, 0.0, 0.0, 1.0);
pub const BLACK: Vector4<f32> = Vector4::new(0.0, 0.0, 0.0, 1.0);

/// Emit one triangle with a shared normal and color
pub fn triangle<S: GeometrySink + ?Sized>(
    sink: &mut S,
    points: [Vector3<f32>; 3],
    normal: Vector3<f32>,
    color: Vector4<f32>,
    tex_coords: [Vector2<f32>; 3],
) {
    for (point, uv) in points.into_iter().zip(tex_coords) {
        sink.append_vertex(point, normal, color, uv);
    }
}

/// Emit a flat quad as the triangles (a, b, c) and (b, d, c)
///
/// Corners are laid out as a strip: `a`-`b` is one edge, `c`-`d` the opposite
/// one. Texture coordinates run (0,0) at `a` to (1,1) at `d`.
pub fn quad<S: GeometrySink + ?Sized>(
    sink: &mut S,
    corners: [Vector3<f32>; 4],
    normal: Vector3<f32>,
    color: Vector4<f32>,
) {
    let [a, b, c, d] = corners;
    let [at, bt, ct, dt] = [
        Vector2::new(0.0, 0.0),
        Vector2::new(1.0, 0.0),
        Vector2::new(0.0, 1.0),
        Vector2::new(1.0, 1.0),
    ];
    triangle(sink, [a, b, c], normal, color, [at, bt, ct]);
    triangle(sink, [b, d, c], normal, color, [bt, dt, ct]);
}

/// Horizontal quad spanning `x` in `[-half_width, half_width]` and `z` over `span`
pub fn horizontal_quad<S: GeometrySink + ?Sized>(
    sink: &mut S,
    half_width: f32,
    y: f32,
    span: Span,
    normal: Vector3<f32>,
    color: Vector4<f32>,
) {
    quad(
        sink,
        [
            Vector3::new(half_width, y, span.start),
            Vector3::new(-half_width, y, span.start),
            Vector3::new(half_width, y, span.end),
            Vector3::new(-half_width, y, span.end),
        ],
        normal,
        color,
    );
}

/// Vertical quad at fixed `x`, spanning `y` in `[y_low, y_high]` and `z` over `span`
pub fn side_wall<S: GeometrySink + ?Sized>(
    sink: &mut S,
    x: f32,
    y_low: f32,
    y_high: f32,
    span: Span,
    normal: Vector3<f32>,
    color: Vector4<f32>,
) {
    quad(
        sink,
        [
            Vector3::new(x, y_high, span.start),
            Vector3::new(x, y_low, span.start),
            Vector3::new(x, y_high, span.end),
            Vector3::new(x, y_low, span.end),
        ],
        normal,
        color,
    );
}

/// A partial elliptical cylinder swept around the Z axis
///
/// The cross-section point at angle `t` is
/// `center + (radii.x * cos t, radii.y * sin t)`, extruded over `span` in Z.
/// Normals point toward the axis, `(-cos t, -sin t, 0)`, which makes the
/// inside of the shell the lit side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSweep {
    pub center: Vector2<f32>,
    pub radii: Vector2<f32>,
    pub start_angle: f32,
    pub end_angle: f32,
    /// Largest angular step; the sweep is split evenly so it lands on `end_angle`
    pub max_step: f32,
    pub span: Span,
}

impl ArcSweep {
    /// Number of angular slats emitted
    pub fn steps(&self) -> usize {
        let sweep = (self.end_angle - self.start_angle).abs();
        ((sweep / self.max_step).ceil() as usize).max(1)
    }

    /// Cross-section point at angle `t`
    pub fn point(&self, t: f32, z: f32) -> Vector3<f32> {
        Vector3::new(
            self.center.x + self.radii.x * t.cos(),
            self.center.y + self.radii.y * t.sin(),
            z,
        )
    }

    /// Vertices this sweep will emit
    pub fn vertex_count(&self) -> usize {
        self.steps() * 6
    }
}

/// Emit an [`ArcSweep`]; returns the angle the sweep ended on
pub fn arc_sweep<S: GeometrySink + ?Sized>(
    sink: &mut S,
    sweep: &ArcSweep,
    color: Vector4<f32>,
) -> f32 {
    let steps = sweep.steps();
    let delta = (sweep.end_angle - sweep.start_angle) / steps as f32;
    let (z0, z1) = (sweep.span.start, sweep.span.end);

    for k in 0..steps {
        let t = sweep.start_angle + delta * k as f32;
        let next = sweep.start_angle + delta * (k + 1) as f32;
        let normal = Vector3::new(-t.cos(), -t.sin(), 0.0);
        let u0 = k as f32 / steps as f32;
        let u1 = (k + 1) as f32 / steps as f32;

        triangle(
            sink,
            [sweep.point(t, z0), sweep.point(t, z1), sweep.point(next, z1)],
            normal,
            color,
            [Vector2::new(u0, 0.0), Vector2::new(u0, 1.0), Vector2::new(u1, 1.0)],
        );
        triangle(
            sink,
            [sweep.point(next, z0), sweep.point(t, z0), sweep.point(next, z1)],
            normal,
            color,
            [Vector2::new(u1, 0.0), Vector2::new(u0, 0.0), Vector2::new(u1, 1.0)],
        );
    }

    sweep.end_angle
}

/// Closed cylinder band around the Z axis with outward radial normals
pub fn cylinder_band<S: GeometrySink + ?Sized>(
    sink: &mut S,
    radius: f32,
    span: Span,
    segments: u32,
    color: Vector4<f32>,
) {
    let segs = segments.max(3);

    for i in 0..segs {
        let angle = i as f32 * 2.0 * PI / segs as f32;
        let next = (i + 1) as f32 * 2.0 * PI / segs as f32;
        let (c0, s0) = (angle.cos(), angle.sin());
        let (c1, s1) = (next.cos(), next.sin());
        let u0 = i as f32 / segs as f32;
        let u1 = (i + 1) as f32 / segs as f32;

        let bottom_current = Vector3::new(radius * c0, radius * s0, span.start);
        let top_current = Vector3::new(radius * c0, radius * s0, span.end);
        let bottom_next = Vector3::new(radius * c1, radius * s1, span.start);
        let top_next = Vector3::new(radius * c1, radius * s1, span.end);

        let n0 = Vector3::new(c0, s0, 0.0);
        let n1 = Vector3::new(c1, s1, 0.0);

        sink.append_vertex(bottom_current, n0, color, Vector2::new(u0, 0.0));
        sink.append_vertex(bottom_next, n1, color, Vector2::new(u1, 0.0));
        sink.append_vertex(top_current, n0, color, Vector2::new(u0, 1.0));

        sink.append_vertex(top_current, n0, color, Vector2::new(u0, 1.0));
        sink.append_vertex(bottom_next, n1, color, Vector2::new(u1, 0.0));
        sink.append_vertex(top_next, n1, color, Vector2::new(u1, 1.0));
    }
}

/// Flat disk in the XZ plane at height `y`, fanned from its center
pub fn disk_fan<S: GeometrySink + ?Sized>(
    sink: &mut S,
    radius: f32,
    y: f32,
    segments: u32,
    normal: Vector3<f32>,
    color: Vector4<f32>,
) {
    let segs = segments.max(3);
    let center = Vector3::new(0.0, y, 0.0);
    let uv_center = Vector2::new(0.5, 0.5);

    for i in 0..segs {
        let angle = i as f32 * 2.0 * PI / segs as f32;
        let next = (i + 1) as f32 * 2.0 * PI / segs as f32;
        let rim = |a: f32| Vector3::new(radius * a.cos(), y, radius * a.sin());
        let rim_uv = |a: f32| Vector2::new(0.5 + 0.5 * a.cos(), 0.5 + 0.5 * a.sin());

        triangle(
            sink,
            [center, rim(next), rim(angle)],
            normal,
            color,
            [uv_center, rim_uv(next), rim_uv(angle)],
        );
    }
}

/// Unit normal of the plane through three points, following their winding
pub fn face_normal(a: Vector3<f32>, b: Vector3<f32>, c: Vector3<f32>) -> Vector3<f32> {
    (b - a).cross(c - a).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::VertexBuffers;

    #[test]
    fn test_quad_generation() {
        let mut buffers = VertexBuffers::new();
        horizontal_quad(
            &mut buffers,
            1.0,
            0.0,
            Span::new(-1.0, 1.0),
            Vector3::unit_y(),
            RED,
        );
        assert_eq!(buffers.positions.len(), 6);
        assert_eq!(buffers.check_lengths(), Ok(6));
        assert!(buffers.normals.iter().all(|n| *n == [0.0, 1.0, 0.0]));
    }

    #[test]
    fn test_half_cylinder_sweep() {
        let sweep = ArcSweep {
            center: Vector2::new(0.0, 0.0),
            radii: Vector2::new(1.0, 0.75),
            start_angle: 0.0,
            end_angle: PI,
            max_step: 0.01,
            span: Span::new(0.0, 1.0),
        };
        let mut buffers = VertexBuffers::new();
        let end = arc_sweep(&mut buffers, &sweep, RED);

        assert_eq!(end, PI);
        assert_eq!(sweep.steps(), 315);
        assert_eq!(buffers.positions.len(), sweep.vertex_count());
        // Every point lies on the squashed ellipse
        for p in &buffers.positions {
            let e = (p[0] / 1.0).powi(2) + (p[1] / 0.75).powi(2);
            assert!((e - 1.0).abs() < 1e-4);
            assert!(p[1] >= -1e-6);
        }
    }

    #[test]
    fn test_negative_sweep_lands_on_end() {
        let sweep = ArcSweep {
            center: Vector2::new(0.5, 0.0),
            radii: Vector2::new(0.25, 0.25),
            start_angle: 0.0,
            end_angle: -PI / 2.0,
            max_step: 0.01,
            span: Span::new(0.0, 1.0),
        };
        let mut buffers = VertexBuffers::new();
        arc_sweep(&mut buffers, &sweep, RED);
        let last = buffers.positions[buffers.positions.len() - 1];
        assert!((last[0] - 0.5).abs() < 1e-5);
        assert!((last[1] + 0.25).abs() < 1e-5);
    }

    #[test]
    fn test_cylinder_band_normals_point_outward() {
        let mut buffers = VertexBuffers::new();
        cylinder_band(&mut buffers, 2.0, Span::new(0.0, 1.0), 16, BLACK);
        assert_eq!(buffers.positions.len(), 16 * 6);
        for (p, n) in buffers.positions.iter().zip(&buffers.normals) {
            let radial = Vector3::new(p[0], p[1], 0.0) / 2.0;
            assert!((radial - Vector3::from(*n)).magnitude() < 1e-5);
        }
    }

    #[test]
    fn test_disk_fan() {
        let mut buffers = VertexBuffers::new();
        disk_fan(&mut buffers, 1.0, 0.5, 12, Vector3::unit_y(), BLACK);
        assert_eq!(buffers.triangle_count(), 12);
        assert!(buffers.positions.iter().all(|p| p[1] == 0.5));
    }

    #[test]
    fn test_face_normal() {
        let n = face_normal(
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
        );
        assert!((n - Vector3::unit_z()).magnitude() < 1e-6);
    }
}
