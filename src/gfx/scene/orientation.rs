//! Attitude of the whole submarine: yaw, pitch and roll spun at per-tick
//! rates, plus a uniform display scale.

use cgmath::{Deg, Matrix4, Rad, Vector3};
use std::f32::consts::TAU;

/// Rate change of one control nudge, in degrees per tick
pub const RATE_STEP: f32 = 0.1;
/// Scale change of one control nudge
pub const SCALE_STEP: f32 = 0.01;

/// Spinning attitude of the submarine
///
/// Rates are in degrees per tick and accumulate from repeated nudges; angles
/// are in radians and stay within one turn either side of zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orientation {
    pub yaw: f32,
    pub pitch: f32,
    pub roll: f32,
    pub yaw_rate: f32,
    pub pitch_rate: f32,
    pub roll_rate: f32,
    /// Uniform display scale applied after rotation
    pub scale: f32,
}

impl Default for Orientation {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            roll: 0.0,
            yaw_rate: 0.0,
            pitch_rate: 0.0,
            roll_rate: 0.0,
            scale: 1.0,
        }
    }
}

impl Orientation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn adjust_yaw_rate(&mut self, degrees: f32) {
        self.yaw_rate += degrees;
    }

    pub fn adjust_pitch_rate(&mut self, degrees: f32) {
        self.pitch_rate += degrees;
    }

    pub fn adjust_roll_rate(&mut self, degrees: f32) {
        self.roll_rate += degrees;
    }

    /// Zero every rate, keeping the current attitude
    pub fn stop(&mut self) {
        self.yaw_rate = 0.0;
        self.pitch_rate = 0.0;
        self.roll_rate = 0.0;
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
    }

    pub fn add_scale(&mut self, delta: f32) {
        self.set_scale(self.scale + delta);
    }

    /// Advance one tick
    pub fn update(&mut self) {
        self.yaw = wrap(self.yaw + Rad::from(Deg(self.yaw_rate)).0);
        self.pitch = wrap(self.pitch + Rad::from(Deg(self.pitch_rate)).0);
        self.roll = wrap(self.roll + Rad::from(Deg(self.roll_rate)).0);
    }

    /// Yaw, pitch and roll packed as one vector
    pub fn angles(&self) -> Vector3<f32> {
        Vector3::new(self.yaw, self.pitch, self.roll)
    }

    /// Scale, then roll about Z, pitch about X and yaw about Y
    pub fn matrix(&self) -> Matrix4<f32> {
        Matrix4::from_angle_y(Rad(self.yaw))
            * Matrix4::from_angle_x(Rad(self.pitch))
            * Matrix4::from_angle_z(Rad(self.roll))
            * Matrix4::from_scale(self.scale)
    }
}

/// Pull an angle back by one turn once it passes a full turn either way
fn wrap(angle: f32) -> f32 {
    if angle > TAU {
        angle - TAU
    } else if angle < -TAU {
        angle + TAU
    } else {
        angle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_rates_integrate_in_degrees() {
        let mut orientation = Orientation::new();
        orientation.adjust_yaw_rate(1.0);
        orientation.adjust_yaw_rate(1.0);
        orientation.adjust_roll_rate(-3.0);
        orientation.update();

        let angles = orientation.angles();
        assert!((angles.x - 2.0 * PI / 180.0).abs() < 1e-6);
        assert_eq!(angles.y, 0.0);
        assert!((angles.z + 3.0 * PI / 180.0).abs() < 1e-6);
    }

    #[test]
    fn test_angles_wrap_within_a_turn() {
        let mut orientation = Orientation::new();
        orientation.adjust_pitch_rate(90.0);
        orientation.adjust_roll_rate(-90.0);
        for _ in 0..1000 {
            orientation.update();
            assert!(orientation.pitch.abs() <= TAU + 1e-4);
            assert!(orientation.roll.abs() <= TAU + 1e-4);
        }
    }

    #[test]
    fn test_stop_keeps_attitude() {
        let mut orientation = Orientation::new();
        orientation.adjust_yaw_rate(5.0);
        orientation.update();
        let yaw = orientation.yaw;
        orientation.stop();
        orientation.update();
        assert_eq!(orientation.yaw, yaw);
    }

    #[test]
    fn test_matrix_applies_scale() {
        let mut orientation = Orientation::new();
        orientation.set_scale(2.0);
        assert_eq!(orientation.matrix(), Matrix4::from_scale(2.0));
    }

    #[test]
    fn test_scale_nudges_accumulate() {
        let mut orientation = Orientation::new();
        for _ in 0..5 {
            orientation.add_scale(SCALE_STEP);
        }
        orientation.add_scale(-SCALE_STEP);
        assert!((orientation.scale - 1.04).abs() < 1e-6);
    }
}
