//! # Voxel Side Module
//!
//! This module defines the six faces of a voxel and how they map onto the
//! three principal axes used by the greedy mesher.

use cgmath::Vector3;

/// Represents the six possible faces of a voxel.
///
/// Each variant is tied to one principal axis and one direction along it.
/// The order is: [FRONT, BACK, BOTTOM, TOP, LEFT, RIGHT]
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum VoxelSide {
    /// The front face (facing positive Z)
    FRONT = 0,

    /// The back face (facing negative Z)
    BACK = 1,

    /// The bottom face (facing negative Y)
    BOTTOM = 2,

    /// The top face (facing positive Y)
    TOP = 3,

    /// The left face (facing negative X)
    LEFT = 4,

    /// The right face (facing positive X)
    RIGHT = 5,
}

impl VoxelSide {
    /// Returns an array containing all six faces in a consistent order.
    pub fn all() -> [VoxelSide; 6] {
        [
            VoxelSide::FRONT,
            VoxelSide::BACK,
            VoxelSide::BOTTOM,
            VoxelSide::TOP,
            VoxelSide::LEFT,
            VoxelSide::RIGHT,
        ]
    }

    /// Resolves the face that points along `axis` (0 = X, 1 = Y, 2 = Z),
    /// towards negative coordinates when `backward` is set.
    ///
    /// # Panics
    /// Panics if `axis` is not 0, 1 or 2.
    pub fn from_axis(axis: usize, backward: bool) -> Self {
        match (axis, backward) {
            (0, false) => VoxelSide::RIGHT,
            (0, true) => VoxelSide::LEFT,
            (1, false) => VoxelSide::TOP,
            (1, true) => VoxelSide::BOTTOM,
            (2, false) => VoxelSide::FRONT,
            (2, true) => VoxelSide::BACK,
            _ => panic!("axis {axis} out of range"),
        }
    }

    /// The principal axis this face is perpendicular to.
    pub fn axis(self) -> usize {
        match self {
            VoxelSide::LEFT | VoxelSide::RIGHT => 0,
            VoxelSide::BOTTOM | VoxelSide::TOP => 1,
            VoxelSide::FRONT | VoxelSide::BACK => 2,
        }
    }

    /// Whether the face points towards negative coordinates.
    pub fn is_backward(self) -> bool {
        matches!(self, VoxelSide::LEFT | VoxelSide::BOTTOM | VoxelSide::BACK)
    }

    /// The outward unit normal of this face.
    pub fn normal(self) -> Vector3<f32> {
        let mut normal = Vector3::new(0.0, 0.0, 0.0);
        normal[self.axis()] = if self.is_backward() { -1.0 } else { 1.0 };
        normal
    }
}
