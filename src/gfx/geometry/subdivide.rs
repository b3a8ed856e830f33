//! # Recursive Quad Subdivision
//!
//! Splits a quadrilateral into four children until one of its corners lies
//! closer than the threshold to another corner, then emits the leaf as two
//! triangles. Termination is geometric, so the depth is bounded by
//! `log2(extent / threshold)`; [`QuadSubdivider::subdivide`] computes that
//! bound before recursing and rejects quads that would exceed the limit.

use cgmath::{MetricSpace, Vector2, Vector3, Vector4};
use rand::distr::{Distribution, Uniform};
use rand::Rng;

use crate::config::SubdivisionConfig;
use crate::error::{GeometryError, Result};

/// A quad laid out as a strip: `a`-`b` top edge, `c`-`d` bottom edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    pub corners: [Vector3<f32>; 4],
    pub tex_coords: [Vector2<f32>; 4],
    /// Shared face normal, copied onto every leaf vertex
    pub normal: Vector3<f32>,
}

impl Quad {
    /// Quad with the unit texture square mapped onto its corners
    pub fn new(corners: [Vector3<f32>; 4], normal: Vector3<f32>) -> Self {
        Self {
            corners,
            tex_coords: [
                Vector2::new(0.0, 0.0),
                Vector2::new(1.0, 0.0),
                Vector2::new(0.0, 1.0),
                Vector2::new(1.0, 1.0),
            ],
            normal,
        }
    }

    /// Largest distance from corner `a` to the other three
    pub fn extent(&self) -> f32 {
        let [a, b, c, d] = self.corners;
        a.distance(b).max(a.distance(c)).max(a.distance(d))
    }

    /// Shortest distance from corner `a` to the other three; decides termination
    pub fn reach(&self) -> f32 {
        let [a, b, c, d] = self.corners;
        a.distance(b).min(a.distance(c)).min(a.distance(d))
    }

    fn is_leaf(&self, threshold: f32) -> bool {
        self.reach() < threshold
    }

    /// The four children covering this quad
    fn split(&self) -> [Quad; 4] {
        let [a, b, c, d] = self.corners;
        let [at, bt, ct, dt] = self.tex_coords;

        let center = (a + b + c + d) / 4.0;
        let center_t = (at + bt + ct + dt) / 4.0;
        let ab = (a + b) / 2.0;
        let ab_t = (at + bt) / 2.0;
        let ac = (a + c) / 2.0;
        let ac_t = (at + ct) / 2.0;
        let bd = (b + d) / 2.0;
        let bd_t = (bt + dt) / 2.0;
        let cd = (c + d) / 2.0;
        let cd_t = (ct + dt) / 2.0;

        let child = |corners, tex_coords| Quad {
            corners,
            tex_coords,
            normal: self.normal,
        };

        [
            child([ab, b, center, bd], [ab_t, bt, center_t, bd_t]),
            child([a, ab, ac, center], [at, ab_t, ac_t, center_t]),
            child([center, bd, cd, d], [center_t, bd_t, cd_t, dt]),
            child([ac, center, c, cd], [ac_t, center_t, ct, cd_t]),
        ]
    }
}

/// Transient leaf triangle produced by the subdivider
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub points: [Vector3<f32>; 3],
    pub tex_coords: [Vector2<f32>; 3],
    pub colors: [Vector4<f32>; 3],
    pub normals: [Vector3<f32>; 3],
}

impl Triangle {
    /// Mean of the three (unprojected) corners
    pub fn centroid(&self) -> Vector3<f32> {
        (self.points[0] + self.points[1] + self.points[2]) / 3.0
    }
}

/// Recursive quad subdivider with a per-vertex random tint
#[derive(Debug, Clone)]
pub struct QuadSubdivider {
    threshold: f32,
    max_depth: u32,
    tint_dist: Uniform<f32>,
}

impl QuadSubdivider {
    pub fn new(config: &SubdivisionConfig) -> Result<Self> {
        config.validate()?;
        let tint_dist = Uniform::new_inclusive(config.tint_low, config.tint_high).map_err(|_| {
            GeometryError::InvalidTintRange {
                low: config.tint_low,
                high: config.tint_high,
            }
        })?;
        Ok(Self {
            threshold: config.threshold,
            max_depth: config.max_depth,
            tint_dist,
        })
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Levels of halving needed before `quad` becomes a leaf
    pub fn depth_for(&self, quad: &Quad) -> u32 {
        let mut depth = 0;
        let mut reach = quad.reach();
        // Corner distances of a parallelogram halve exactly at each level
        while reach >= self.threshold && depth <= self.max_depth {
            reach /= 2.0;
            depth += 1;
        }
        depth
    }

    /// Subdivide `quad`, appending leaf triangles to `out`
    ///
    /// Returns the number of leaf quads; exactly twice that many triangles
    /// are appended.
    pub fn subdivide<R: Rng + ?Sized>(
        &self,
        quad: &Quad,
        rng: &mut R,
        out: &mut Vec<Triangle>,
    ) -> Result<usize> {
        for (corner, point) in ['a', 'b', 'c', 'd'].into_iter().zip(quad.corners) {
            if !(point.x.is_finite() && point.y.is_finite() && point.z.is_finite()) {
                return Err(GeometryError::NonFiniteQuad { corner });
            }
        }

        let depth = self.depth_for(quad);
        if depth > self.max_depth {
            return Err(GeometryError::QuadTooDeep {
                extent: quad.extent(),
                depth,
                limit: self.max_depth,
            });
        }

        let emitted = out.len();
        out.reserve(2 * 4usize.pow(depth));
        match self.recurse(quad, 0, rng, out) {
            Ok(leaves) => Ok(leaves),
            Err(err) => {
                out.truncate(emitted);
                Err(err)
            }
        }
    }

    fn recurse<R: Rng + ?Sized>(
        &self,
        quad: &Quad,
        depth: u32,
        rng: &mut R,
        out: &mut Vec<Triangle>,
    ) -> Result<usize> {
        if quad.is_leaf(self.threshold) {
            self.emit_leaf(quad, rng, out);
            return Ok(1);
        }
        // Skewed quads do not halve evenly, so the up-front estimate is not a guarantee
        if depth >= self.max_depth {
            return Err(GeometryError::QuadTooDeep {
                extent: quad.extent(),
                depth: depth + 1,
                limit: self.max_depth,
            });
        }

        let mut leaves = 0;
        for child in quad.split() {
            leaves += self.recurse(&child, depth + 1, rng, out)?;
        }
        Ok(leaves)
    }

    fn tint<R: Rng + ?Sized>(&self, rng: &mut R) -> Vector4<f32> {
        Vector4::new(self.tint_dist.sample(rng), self.tint_dist.sample(rng), 0.0, 1.0)
    }

    fn emit_leaf<R: Rng + ?Sized>(&self, quad: &Quad, rng: &mut R, out: &mut Vec<Triangle>) {
        let [a, b, c, d] = quad.corners;
        let [at, bt, ct, dt] = quad.tex_coords;
        let normals = [quad.normal; 3];

        let first = Triangle {
            points: [a, b, c],
            tex_coords: [at, bt, ct],
            colors: [self.tint(rng), self.tint(rng), self.tint(rng)],
            normals,
        };
        let second = Triangle {
            points: [c, b, d],
            tex_coords: [ct, bt, dt],
            colors: [self.tint(rng), self.tint(rng), self.tint(rng)],
            normals,
        };

        out.push(first);
        out.push(second);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn square(side: f32) -> Quad {
        let h = side / 2.0;
        Quad::new(
            [
                Vector3::new(h, h, 0.0),
                Vector3::new(-h, h, 0.0),
                Vector3::new(h, -h, 0.0),
                Vector3::new(-h, -h, 0.0),
            ],
            Vector3::unit_z(),
        )
    }

    fn subdivider(low: f32, high: f32) -> QuadSubdivider {
        QuadSubdivider::new(&SubdivisionConfig {
            tint_low: low,
            tint_high: high,
            ..SubdivisionConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_unit_square_leaf_count() {
        let subdivider = subdivider(0.1, 0.1);
        let mut rng = StdRng::seed_from_u64(1);
        let mut triangles = Vec::new();

        let leaves = subdivider.subdivide(&square(1.0), &mut rng, &mut triangles).unwrap();

        // 1/64 is still above 0.01, 1/128 is below: seven levels
        assert_eq!(subdivider.depth_for(&square(1.0)), 7);
        assert_eq!(leaves, 4usize.pow(7));
        assert_eq!(triangles.len(), 2 * leaves);
    }

    #[test]
    fn test_small_quad_is_single_leaf() {
        let subdivider = subdivider(0.1, 0.1);
        let mut rng = StdRng::seed_from_u64(2);
        let mut triangles = Vec::new();

        let leaves = subdivider.subdivide(&square(0.005), &mut rng, &mut triangles).unwrap();
        assert_eq!(leaves, 1);
        assert_eq!(triangles.len(), 2);
        assert_eq!(triangles[0].points[0], Vector3::new(0.0025, 0.0025, 0.0));
    }

    #[test]
    fn test_two_levels() {
        let subdivider = subdivider(0.1, 0.1);
        let mut rng = StdRng::seed_from_u64(3);
        let mut triangles = Vec::new();

        // 0.03 -> 0.015 -> 0.0075
        let leaves = subdivider.subdivide(&square(0.03), &mut rng, &mut triangles).unwrap();
        assert_eq!(leaves, 16);
        assert_eq!(triangles.len(), 32);
    }

    #[test]
    fn test_leaves_tile_the_quad() {
        let subdivider = subdivider(0.1, 0.1);
        let mut rng = StdRng::seed_from_u64(4);
        let mut triangles = Vec::new();
        subdivider.subdivide(&square(0.03), &mut rng, &mut triangles).unwrap();

        let area: f32 = triangles
            .iter()
            .map(|t| {
                let [p, q, r] = t.points;
                ((q - p).x * (r - p).y - (q - p).y * (r - p).x).abs() / 2.0
            })
            .sum();
        assert!((area - 0.0009).abs() < 1e-7);
    }

    #[test]
    fn test_tint_within_range() {
        let subdivider = subdivider(0.2, 0.6);
        let mut rng = StdRng::seed_from_u64(5);
        let mut triangles = Vec::new();
        subdivider.subdivide(&square(0.05), &mut rng, &mut triangles).unwrap();

        for color in triangles.iter().flat_map(|t| t.colors) {
            assert!((0.2..=0.6).contains(&color.x));
            assert!((0.2..=0.6).contains(&color.y));
            assert_eq!(color.z, 0.0);
            assert_eq!(color.w, 1.0);
        }
    }

    #[test]
    fn test_degenerate_tint_is_constant() {
        let subdivider = subdivider(0.1, 0.1);
        let mut rng = StdRng::seed_from_u64(6);
        let mut triangles = Vec::new();
        subdivider.subdivide(&square(0.02), &mut rng, &mut triangles).unwrap();
        assert!(triangles
            .iter()
            .flat_map(|t| t.colors)
            .all(|c| c == Vector4::new(0.1, 0.1, 0.0, 1.0)));
    }

    #[test]
    fn test_normals_and_tex_coords_follow_corners() {
        let subdivider = subdivider(0.1, 0.1);
        let mut rng = StdRng::seed_from_u64(7);
        let mut triangles = Vec::new();
        subdivider.subdivide(&square(0.005), &mut rng, &mut triangles).unwrap();

        let second = triangles[1];
        assert_eq!(second.tex_coords[0], Vector2::new(0.0, 1.0));
        assert_eq!(second.tex_coords[2], Vector2::new(1.0, 1.0));
        assert!(triangles
            .iter()
            .flat_map(|t| t.normals)
            .all(|n| n == Vector3::unit_z()));
    }

    #[test]
    fn test_non_finite_corner_rejected() {
        let subdivider = subdivider(0.1, 0.1);
        let mut rng = StdRng::seed_from_u64(8);
        let mut quad = square(1.0);
        quad.corners[2].y = f32::NAN;

        let err = subdivider.subdivide(&quad, &mut rng, &mut Vec::new());
        assert_eq!(err, Err(GeometryError::NonFiniteQuad { corner: 'c' }));
    }

    #[test]
    fn test_huge_quad_rejected_before_recursing() {
        let subdivider = subdivider(0.1, 0.1);
        let mut rng = StdRng::seed_from_u64(9);
        let mut triangles = Vec::new();

        let err = subdivider.subdivide(&square(1.0e6), &mut rng, &mut triangles);
        assert!(matches!(err, Err(GeometryError::QuadTooDeep { .. })));
        assert!(triangles.is_empty());
    }
}
