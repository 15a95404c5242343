//! Rigid transforms for items and attachment points.
//!
//! Rotation is held as a quaternion. Euler angles (XYZ order, `Rx * Ry * Rz`)
//! are only used at the persistence boundary.
//!
//! The `rotated_*` helpers post-multiply, so each rotation is about the
//! frame's current local axis. `translated` moves in the parent frame.

use glam::{DMat3, DQuat, DVec3};

/// Below this `cos(y)` the X and Z axes line up and Z is pinned to zero.
const GIMBAL_EPSILON: f64 = 1e-7;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: DVec3,
    pub rotation: DQuat,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: DVec3::ZERO,
        rotation: DQuat::IDENTITY,
    };

    pub fn new(position: DVec3, rotation: DQuat) -> Self {
        Self { position, rotation }
    }

    pub fn from_translation(position: DVec3) -> Self {
        Self {
            position,
            rotation: DQuat::IDENTITY,
        }
    }

    /// Builds a transform from XYZ Euler angles in radians.
    pub fn from_euler(position: DVec3, euler: DVec3) -> Self {
        Self {
            position,
            rotation: DQuat::from_rotation_x(euler.x)
                * DQuat::from_rotation_y(euler.y)
                * DQuat::from_rotation_z(euler.z),
        }
    }

    /// XYZ Euler angles of the rotation, in radians.
    ///
    /// `y` comes from `atan2` rather than `asin` so quarter turns about Y
    /// survive a save and reload exactly.
    pub fn euler(&self) -> DVec3 {
        let m = DMat3::from_quat(self.rotation);
        // Row-major names: m13 is row 1, column 3
        let (m11, m12, m13) = (m.x_axis.x, m.y_axis.x, m.z_axis.x);
        let (m22, m23) = (m.y_axis.y, m.z_axis.y);
        let (m32, m33) = (m.y_axis.z, m.z_axis.z);

        let cos_y = m11.hypot(m12);
        let y = m13.atan2(cos_y);
        if cos_y > GIMBAL_EPSILON {
            DVec3::new((-m23).atan2(m33), y, (-m12).atan2(m11))
        } else {
            DVec3::new(m32.atan2(m22), y, 0.0)
        }
    }

    /// Local point to parent space.
    pub fn transform_point(&self, local: DVec3) -> DVec3 {
        self.position + self.rotation * local
    }

    /// Parent-space point to local space.
    pub fn inverse_transform_point(&self, world: DVec3) -> DVec3 {
        self.rotation.inverse() * (world - self.position)
    }

    pub fn transform_vector(&self, local: DVec3) -> DVec3 {
        self.rotation * local
    }

    pub fn inverse_transform_vector(&self, world: DVec3) -> DVec3 {
        self.rotation.inverse() * world
    }

    /// Composes `self ∘ child`: the child's frame expressed in self's parent space.
    pub fn mul_transform(&self, child: &Transform) -> Transform {
        Transform {
            position: self.transform_point(child.position),
            rotation: (self.rotation * child.rotation).normalize(),
        }
    }

    /// Moves the frame in its parent's axes.
    pub fn translated(mut self, offset: DVec3) -> Self {
        self.position += offset;
        self
    }

    pub fn rotated_x(mut self, angle: f64) -> Self {
        self.rotation = self.rotation * DQuat::from_rotation_x(angle);
        self
    }

    pub fn rotated_y(mut self, angle: f64) -> Self {
        self.rotation = self.rotation * DQuat::from_rotation_y(angle);
        self
    }

    pub fn rotated_z(mut self, angle: f64) -> Self {
        self.rotation = self.rotation * DQuat::from_rotation_z(angle);
        self
    }

    /// True when both frames coincide within `tolerance` (position per axis,
    /// rotation via the quaternion dot product, sign-insensitive).
    pub fn approx_eq(&self, other: &Transform, tolerance: f64) -> bool {
        self.position.abs_diff_eq(other.position, tolerance)
            && (1.0 - self.rotation.dot(other.rotation).abs()) <= tolerance
    }
}
