//! Per-draw object transforms.
//!
//! A [`Transform`] is built for one draw, turned into a model matrix and then
//! thrown away. Rotations are Euler angles in degrees, applied X, then Y, then Z
//! (composed right-to-left), between scale and translation.

use cgmath::{Deg, Matrix4, Vector3};

/// Scale, rotation (degrees around X, Y, Z) and position of a drawn mesh.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub scale: Vector3<f32>,
    pub rotation: Vector3<f32>,
    pub position: Vector3<f32>,
}

impl Transform {
    /// Identity transform: unit scale, no rotation, at the origin.
    pub fn new() -> Self {
        Self {
            scale: Vector3::new(1.0, 1.0, 1.0),
            rotation: Vector3::new(0.0, 0.0, 0.0),
            position: Vector3::new(0.0, 0.0, 0.0),
        }
    }

    pub fn from_parts(scale: [f32; 3], rotation: [f32; 3], position: [f32; 3]) -> Self {
        Self {
            scale: Vector3::new(scale[0], scale[1], scale[2]),
            rotation: Vector3::new(rotation[0], rotation[1], rotation[2]),
            position: Vector3::new(position[0], position[1], position[2]),
        }
    }

    pub fn with_scale(mut self, x: f32, y: f32, z: f32) -> Self {
        self.scale = Vector3::new(x, y, z);
        self
    }

    pub fn with_rotation(mut self, x: f32, y: f32, z: f32) -> Self {
        self.rotation = Vector3::new(x, y, z);
        self
    }

    pub fn with_position(mut self, x: f32, y: f32, z: f32) -> Self {
        self.position = Vector3::new(x, y, z);
        self
    }

    /// `T(position) * Rx * Ry * Rz * S(scale)`
    pub fn to_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.position)
            * Matrix4::from_angle_x(Deg(self.rotation.x))
            * Matrix4::from_angle_y(Deg(self.rotation.y))
            * Matrix4::from_angle_z(Deg(self.rotation.z))
            * Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
    }
}

impl From<Vector3<f32>> for Transform {
    fn from(position: Vector3<f32>) -> Self {
        Transform {
            position,
            ..Default::default()
        }
    }
}

impl From<Transform> for Matrix4<f32> {
    fn from(transform: Transform) -> Self {
        transform.to_matrix()
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}
