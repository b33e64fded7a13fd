//! Vertex data structures for chunk meshes.
//!
//! This module defines the vertex format handed to the external renderer.

use cgmath::{Point3, Vector3};

/// A vertex of a chunk mesh.
///
/// # Memory Layout
/// - Position: [f32; 3] (12 bytes)
/// - Normal: [f32; 3] (12 bytes)
/// - Texture Coordinates: [f32; 2] (8 bytes)
///
/// Total size: 32 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// World-space position
    pub position: [f32; 3],
    /// Outward unit normal of the face this vertex belongs to
    pub normal: [f32; 3],
    /// Texture coordinates in voxel units, so tiled materials repeat per voxel
    pub tex_coords: [f32; 2],
}

impl Vertex {
    /// Creates a new vertex.
    pub fn new(position: Point3<f32>, normal: Vector3<f32>, u: f32, v: f32) -> Self {
        Vertex {
            position: position.into(),
            normal: normal.into(),
            tex_coords: [u, v],
        }
    }

    /// Returns the position as a point.
    pub fn position(&self) -> Point3<f32> {
        Point3::from(self.position)
    }
}
