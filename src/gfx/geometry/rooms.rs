//! # Interior Rooms
//!
//! Nine independently drawable room meshes built from half-cylinder shells,
//! floor quads, walkways and L-shaped corridors. Rooms 3 and 6 are reserved
//! and produce empty regions.

use cgmath::{Vector2, Vector3};
use log::{debug, info};
use std::f32::consts::PI;

use super::primitives::{arc_sweep, horizontal_quad, side_wall, ArcSweep, RED};
use super::{GeometrySink, MeshRegion};
use crate::config::{RoomLayout, Span};
use crate::error::Result;

pub const ROOM_COUNT: usize = 9;

/// Half width of the walkways joining neighbouring upper rooms, relative to the radius
const WALKWAY_WIDTH: f32 = 0.2;
/// Half width of the narrow lower floor in room 4
const NARROW_FLOOR_WIDTH: f32 = 0.3;
/// Half width of the raised floor in room 5, and the corridor arc centers
const WIDE_FLOOR_WIDTH: f32 = 0.75;
/// Radius of the corridor's rounded corners, relative to the hull radius
const CORRIDOR_CORNER: f32 = 0.25;

/// Emits the room meshes for one hull radius and room layout
#[derive(Debug, Clone, Copy)]
pub struct RoomGenerator {
    layout: RoomLayout,
    radius: f32,
}

impl RoomGenerator {
    pub fn new(layout: &RoomLayout, radius: f32) -> Result<Self> {
        layout.validate()?;
        Ok(Self {
            layout: *layout,
            radius,
        })
    }

    pub fn layout(&self) -> &RoomLayout {
        &self.layout
    }

    /// Append all nine rooms, one region each, in index order
    pub fn generate<S: GeometrySink + ?Sized>(&self, sink: &mut S) -> Result<[MeshRegion; ROOM_COUNT]> {
        let first = sink.vertex_count();
        let mut regions = [MeshRegion::EMPTY; ROOM_COUNT];

        for (index, region) in regions.iter_mut().enumerate() {
            sink.begin_region()?;
            self.emit_room(index, sink);
            *region = sink.end_region()?;
            debug!("room {index}: start={} count={}", region.start, region.count);
        }

        info!(
            "the rooms collectively have {} vertices",
            sink.vertex_count() - first
        );
        Ok(regions)
    }

    fn emit_room<S: GeometrySink + ?Sized>(&self, index: usize, sink: &mut S) {
        let RoomLayout {
            rooms,
            tall_rooms,
            floor_y,
            ..
        } = self.layout;
        let r = self.radius;

        match index {
            0 => {
                self.shell_with_floor(sink, rooms[0]);
                horizontal_quad(
                    sink,
                    WALKWAY_WIDTH * r,
                    floor_y[0],
                    Span::new(rooms[0].end, rooms[1].start),
                    Vector3::unit_y(),
                    RED,
                );
                horizontal_quad(
                    sink,
                    WALKWAY_WIDTH * r,
                    floor_y[0],
                    Span::new(rooms[1].end, rooms[2].start),
                    Vector3::unit_y(),
                    RED,
                );
            }
            1 => self.shell_with_floor(sink, rooms[1]),
            2 => self.shell_with_floor(sink, rooms[2]),
            4 => horizontal_quad(
                sink,
                NARROW_FLOOR_WIDTH * r,
                floor_y[1],
                tall_rooms[1],
                Vector3::unit_y(),
                RED,
            ),
            5 => {
                let tall = tall_rooms[0];
                horizontal_quad(
                    sink,
                    WIDE_FLOOR_WIDTH * r,
                    floor_y[1],
                    Span::new(tall.start + WIDE_FLOOR_WIDTH * tall.length(), tall.end),
                    Vector3::unit_y(),
                    RED,
                );
            }
            7 => self.corridor(sink, tall_rooms[0]),
            8 => self.corridor(sink, tall_rooms[1]),
            // 3 and 6 are reserved
            _ => {}
        }
    }

    /// Squashed half-cylinder over the top floor plus its floor quad
    fn shell_with_floor<S: GeometrySink + ?Sized>(&self, sink: &mut S, span: Span) {
        let floor = self.layout.floor_y[0];
        let shell = ArcSweep {
            center: Vector2::new(0.0, floor),
            radii: Vector2::new(self.radius, self.radius * self.layout.shell_squash),
            start_angle: 0.0,
            end_angle: PI,
            max_step: self.layout.arc_step,
            span,
        };
        arc_sweep(sink, &shell, RED);
        horizontal_quad(sink, self.radius, floor, span, Vector3::unit_y(), RED);
    }

    /// L-shaped corridor on the bottom floor
    ///
    /// Ceiling and two side walls, with the bottom corners rounded by quarter
    /// arcs joined by a flat strip.
    fn corridor<S: GeometrySink + ?Sized>(&self, sink: &mut S, span: Span) {
        let r = self.radius;
        let corner = CORRIDOR_CORNER * r;
        let inset = WIDE_FLOOR_WIDTH * r;
        let lower = self.layout.floor_y[2] + corner;
        let upper = lower + self.layout.corridor_wall_height;

        horizontal_quad(sink, r, upper, span, -Vector3::unit_y(), RED);
        side_wall(sink, r, lower, upper, span, -Vector3::unit_x(), RED);

        let right = ArcSweep {
            center: Vector2::new(inset, lower),
            radii: Vector2::new(corner, corner),
            start_angle: 0.0,
            end_angle: -PI / 2.0,
            max_step: self.layout.arc_step,
            span,
        };
        let turn = arc_sweep(sink, &right, RED);

        let bottom = right.point(turn, 0.0).y;
        horizontal_quad(
            sink,
            inset,
            bottom,
            span,
            Vector3::new(-turn.cos(), -turn.sin(), 0.0),
            RED,
        );

        let left = ArcSweep {
            center: Vector2::new(-inset, lower),
            start_angle: turn,
            end_angle: -PI,
            ..right
        };
        arc_sweep(sink, &left, RED);

        side_wall(sink, -r, lower, upper, span, Vector3::unit_x(), RED);
    }
}
