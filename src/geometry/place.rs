use std::ops::Mul;

use glam::{Affine3A, Vec3};

/// A rigid coordinate frame. As a transform it maps local coordinates into
/// the parent (scene) frame.
///
/// Composition follows the usual matrix convention: `a * b` applies `b`
/// first, so `position * offset` moves `position` by `offset` expressed in
/// `position`'s own local axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Place(Affine3A);

impl Default for Place {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Place {
    /// The identity frame.
    pub const IDENTITY: Self = Self(Affine3A::IDENTITY);

    /// Pure translation by `offset`.
    #[must_use]
    pub fn translation(offset: Vec3) -> Self {
        Self(Affine3A::from_translation(offset))
    }

    /// Rotation by `degrees` about `axis` through the origin.
    #[must_use]
    pub fn rotation(axis: Vec3, degrees: f32) -> Self {
        Self(Affine3A::from_axis_angle(
            axis.normalize(),
            degrees.to_radians(),
        ))
    }

    /// Frame for a camera at `eye` looking toward `target` (camera looks
    /// down its local -Z with `up` roughly along local +Y).
    #[must_use]
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        Self(Affine3A::look_at_rh(eye, target, up).inverse())
    }

    /// Origin of the frame in parent coordinates.
    #[must_use]
    pub fn origin(&self) -> Vec3 {
        self.0.translation.into()
    }

    /// Local X axis in parent coordinates.
    #[must_use]
    pub fn x_axis(&self) -> Vec3 {
        self.0.matrix3.x_axis.into()
    }

    /// Local Y axis in parent coordinates.
    #[must_use]
    pub fn y_axis(&self) -> Vec3 {
        self.0.matrix3.y_axis.into()
    }

    /// Local Z axis in parent coordinates. Cameras look along its negation.
    #[must_use]
    pub fn z_axis(&self) -> Vec3 {
        self.0.matrix3.z_axis.into()
    }

    /// Map a local point into parent coordinates.
    #[must_use]
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.0.transform_point3(point)
    }

    /// Map a local direction into parent coordinates (ignores translation).
    #[must_use]
    pub fn transform_vector(&self, vector: Vec3) -> Vec3 {
        self.0.transform_vector3(vector)
    }

    /// Inverse frame (parent to local).
    #[must_use]
    pub fn inverse(&self) -> Self {
        Self(self.0.inverse())
    }

    /// Approximate equality of every matrix element.
    #[must_use]
    pub fn abs_diff_eq(&self, other: &Self, max_abs_diff: f32) -> bool {
        self.0.abs_diff_eq(other.0, max_abs_diff)
    }
}

impl From<Affine3A> for Place {
    fn from(affine: Affine3A) -> Self {
        Self(affine)
    }
}

impl Mul for Place {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self(self.0 * rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_translation_follows_rotated_axes() {
        let frame = Place::rotation(Vec3::Y, 90.0);
        let moved = frame * Place::translation(Vec3::X);
        // Local +X of a 90° yaw points along scene -Z.
        assert!(moved.origin().abs_diff_eq(Vec3::new(0.0, 0.0, -1.0), 1e-6));
    }

    #[test]
    fn look_at_points_negative_z_toward_target() {
        let frame =
            Place::look_at(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, Vec3::Y);
        assert!(frame.origin().abs_diff_eq(Vec3::new(0.0, 0.0, 10.0), 1e-5));
        assert!((-frame.z_axis()).abs_diff_eq(Vec3::NEG_Z, 1e-6));
    }

    #[test]
    fn inverse_round_trips_points() {
        let frame = Place::translation(Vec3::new(1.0, 2.0, 3.0))
            * Place::rotation(Vec3::X, 30.0);
        let p = Vec3::new(-4.0, 0.5, 7.0);
        let back = frame.inverse().transform_point(frame.transform_point(p));
        assert!(back.abs_diff_eq(p, 1e-5));
    }
}
