//! Scene entity components

use glam::{Mat4, Quat, Vec3};

use crate::physics::RigidBodyHandle;

/// Transform component for position, rotation, and scale
#[derive(Debug, Clone, Copy)]
pub struct Transform {
    /// Position in world space
    pub position: Vec3,
    /// Rotation as a quaternion
    pub rotation: Quat,
    /// Scale factor
    pub scale: Vec3,
}

impl Transform {
    /// Create a new transform at the origin
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transform with just a position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a transform with position and rotation
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            ..Default::default()
        }
    }

    /// Get the transformation matrix
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

/// Name component for debugging
#[derive(Debug, Clone)]
pub struct Name(pub String);

impl Name {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

/// Indices into the renderer's mesh and material tables
#[derive(Debug, Clone, Copy)]
pub struct RenderMesh {
    pub mesh: usize,
    pub material: usize,
}

impl RenderMesh {
    pub fn new(mesh: usize, material: usize) -> Self {
        Self { mesh, material }
    }
}

/// Link to a rigid body whose pose drives the entity's transform
#[derive(Debug, Clone, Copy)]
pub struct PhysicsBody(pub RigidBodyHandle);
