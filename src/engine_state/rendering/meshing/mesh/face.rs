use cgmath::{Point3, Vector3};

use crate::engine_state::rendering::Vertex;
use crate::engine_state::voxels::voxel::{voxel_side::VoxelSide, VoxelTypeSize};

/// A merged rectangle of exposed voxel faces lying in one slice plane.
///
/// `origin` is the chunk-local corner of the rectangle with the smallest
/// coordinates. The rectangle spans `width` voxels along the side's first
/// in-plane axis `u = (axis + 1) % 3` and `height` voxels along the second
/// `v = (axis + 2) % 3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    /// Chunk-local corner of the rectangle
    pub origin: Point3<i32>,
    /// Extent along the `u` axis, in voxels
    pub width: i32,
    /// Extent along the `v` axis, in voxels
    pub height: i32,
    /// The material tag of every unit face merged into this rectangle
    pub voxel_type_int: VoxelTypeSize,
    /// Which way the rectangle faces
    pub side: VoxelSide,
}

impl Face {
    /// Number of unit voxel faces this rectangle covers.
    pub fn area(&self) -> i32 {
        self.width * self.height
    }

    /// The four corners in world space, offset by `chunk_origin`.
    ///
    /// Corners are ordered counter-clockwise as seen from outside the solid,
    /// i.e. `(c1 - c0) x (c3 - c0)` points along the outward normal.
    pub fn corners(&self, chunk_origin: Point3<i32>) -> [Point3<f32>; 4] {
        let axis = self.side.axis();
        let u = (axis + 1) % 3;
        let v = (axis + 2) % 3;

        let mut du = Vector3::new(0.0, 0.0, 0.0);
        du[u] = self.width as f32;
        let mut dv = Vector3::new(0.0, 0.0, 0.0);
        dv[v] = self.height as f32;

        // Summed in f32: the far edge of the outermost chunk lies one past
        // i32::MAX.
        let base = Point3::new(
            chunk_origin.x as f32 + self.origin.x as f32,
            chunk_origin.y as f32 + self.origin.y as f32,
            chunk_origin.z as f32 + self.origin.z as f32,
        );

        // e_u x e_v = e_axis, so walking u then v winds around the positive
        // normal. Backward faces walk v first.
        let (first, second) = if self.side.is_backward() { (dv, du) } else { (du, dv) };

        [base, base + first, base + first + second, base + second]
    }

    /// Texture coordinates matching [`Self::corners`], scaled by the
    /// rectangle size so the material repeats once per voxel.
    fn tex_coords(&self) -> [(f32, f32); 4] {
        let (w, h) = (self.width as f32, self.height as f32);
        if self.side.is_backward() {
            [(0.0, 0.0), (0.0, h), (w, h), (w, 0.0)]
        } else {
            [(0.0, 0.0), (w, 0.0), (w, h), (0.0, h)]
        }
    }

    /// Generates the four vertices of this rectangle.
    pub fn vertices(&self, chunk_origin: Point3<i32>) -> [Vertex; 4] {
        let normal = self.side.normal();
        let corners = self.corners(chunk_origin);
        let uvs = self.tex_coords();
        [0, 1, 2, 3].map(|i| Vertex::new(corners[i], normal, uvs[i].0, uvs[i].1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn face(side: VoxelSide) -> Face {
        Face {
            origin: Point3::new(0, 0, 0),
            width: 3,
            height: 2,
            voxel_type_int: 1,
            side,
        }
    }

    #[test]
    fn test_winding_matches_normal() {
        for side in VoxelSide::all() {
            let c = face(side).corners(Point3::new(0, 0, 0));
            let cross = (c[1] - c[0]).cross(c[3] - c[0]);
            let expected = side.normal() * 6.0;
            assert_eq!(cross, expected, "winding wrong for {side:?}");
        }
    }

    #[test]
    fn test_corners_offset_by_chunk_origin() {
        let mut top = face(VoxelSide::TOP);
        top.origin = Point3::new(1, 4, 2);
        let c = top.corners(Point3::new(16, -32, 48));
        assert_eq!(c[0], Point3::new(17.0, -28.0, 50.0));
        // TOP: u = Z, v = X.
        assert_eq!(c[1], Point3::new(17.0, -28.0, 53.0));
        assert_eq!(c[2], Point3::new(19.0, -28.0, 53.0));
    }

    #[test]
    fn test_tex_coords_scale_with_size() {
        let vertices = face(VoxelSide::RIGHT).vertices(Point3::new(0, 0, 0));
        assert_eq!(vertices[2].tex_coords, [3.0, 2.0]);
        assert!(vertices.iter().all(|v| v.normal == [1.0, 0.0, 0.0]));
    }
}
