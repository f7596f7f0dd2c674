//! Oriented reference frame: position plus yaw, pitch and roll
use std::f64::consts::FRAC_PI_2;
use std::ops::{Add, Mul, Sub};

use nalgebra::{Matrix3, Rotation3};

use crate::vector::Vector3;

/// Distance kept from ±π/2 when pitch is clamped, keeps the interval open
pub const PITCH_MARGIN: f64 = 1e-6;

/// Position and orientation (in radians) of an object in world space.
///
/// World points enter the local frame by yaw, then pitch, then roll, so pitch
/// always turns about the frame's own right axis. [`Transform::rotate`] is the
/// exact inverse and feeds `forward()`, `right()` and `up()`, keeping camera
/// motion and projection in agreement.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Transform {
    pub position: Vector3,
    pub yaw: f64,
    pub pitch: f64,
    pub roll: f64,
}

impl Transform {
    pub fn new(position: Vector3, yaw: f64, pitch: f64, roll: f64) -> Self {
        Self {
            position,
            yaw,
            pitch,
            roll,
        }
    }

    pub fn identity() -> Self {
        Self::default()
    }

    /// Local direction to world direction: roll, pitch, yaw
    pub fn rotate(&self, v: Vector3) -> Vector3 {
        v.roll(self.roll).pitch(self.pitch).yaw(self.yaw)
    }

    /// World direction to local direction: yaw, pitch, roll with negated angles
    pub fn inverse_rotate(&self, v: Vector3) -> Vector3 {
        v.yaw(-self.yaw).pitch(-self.pitch).roll(-self.roll)
    }

    /// Local to world: rotate then translate.
    pub fn apply(&self, point: Vector3) -> Vector3 {
        self.rotate(point) + self.position
    }

    /// World to local: translate back then apply the inverse rotation.
    pub fn to_local(&self, point: Vector3) -> Vector3 {
        self.inverse_rotate(point - self.position)
    }

    /// Unit vector the frame looks along (rotated +Z)
    pub fn forward(&self) -> Vector3 {
        self.rotate(Vector3::Z_AXIS).normalize_or_default()
    }

    /// Unit vector to the right of the frame (rotated +X)
    pub fn right(&self) -> Vector3 {
        self.rotate(Vector3::X_AXIS).normalize_or_default()
    }

    pub fn up(&self) -> Vector3 {
        self.rotate(Vector3::Y_AXIS).normalize_or_default()
    }

    /// Adds look deltas, clamping pitch to the open interval (-π/2, π/2).
    ///
    /// A non-finite result leaves that angle untouched. Returns true when a
    /// stored angle changed.
    pub fn look(&mut self, delta_yaw: f64, delta_pitch: f64) -> bool {
        let limit = FRAC_PI_2 - PITCH_MARGIN;
        let yaw = self.yaw + delta_yaw;
        let pitch = (self.pitch + delta_pitch).clamp(-limit, limit);

        let before = (self.yaw, self.pitch);
        if yaw.is_finite() {
            self.yaw = yaw;
        }
        if pitch.is_finite() {
            self.pitch = pitch;
        }
        (self.yaw, self.pitch) != before
    }

    /// Rotation matrix of the same composition as [`Transform::rotate`].
    pub fn rotation_matrix(&self) -> Matrix3<f64> {
        let yaw = Rotation3::from_axis_angle(&nalgebra::Vector3::y_axis(), self.yaw);
        let pitch = Rotation3::from_axis_angle(&nalgebra::Vector3::x_axis(), self.pitch);
        let roll = Rotation3::from_axis_angle(&nalgebra::Vector3::z_axis(), self.roll);

        // Apply rotations in order: roll, pitch, yaw
        (yaw * pitch * roll).into_inner()
    }
}

/// `point + transform` places a local point in world space
impl Add<Transform> for Vector3 {
    type Output = Vector3;

    fn add(self, rhs: Transform) -> Vector3 {
        rhs.apply(self)
    }
}

/// `point - transform` brings a world point into the transform's frame
impl Sub<Transform> for Vector3 {
    type Output = Vector3;

    fn sub(self, rhs: Transform) -> Vector3 {
        rhs.to_local(self)
    }
}

/// `v * transform` rotates without translating
impl Mul<Transform> for Vector3 {
    type Output = Vector3;

    fn mul(self, rhs: Transform) -> Vector3 {
        rhs.rotate(self)
    }
}
