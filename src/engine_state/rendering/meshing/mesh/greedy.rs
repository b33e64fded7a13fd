//! Greedy meshing implementation for voxel rendering.
//!
//! For each principal axis the chunk is swept slice by slice. Every slice
//! boundary gets a `CHUNK_SIZE x CHUNK_SIZE` mask recording which cells have
//! an exposed face, of which material and facing which way. The mask is then
//! merged into maximal rectangles, one quad each, so the vertex count follows
//! surface complexity rather than voxel count.
//!
//! Neighbouring chunks are not consulted: a voxel on the chunk border always
//! exposes its outer face.

use cgmath::Point3;
use log::debug;
use web_time::Instant;

use crate::engine_state::voxels::{
    chunk::{Chunk, VoxelGrid, CHUNK_AREA, CHUNK_SIZE},
    voxel::{voxel_side::VoxelSide, voxel_type::VoxelType, VoxelTypeSize},
};

use super::{face::Face, mesh::Mesh};

/// Set on a mask cell when the exposed face points towards negative
/// coordinates. The low bits hold the material tag.
const BACK_FACE_BIT: u8 = 0x80;

// The highest material tag must leave the back-face bit clear.
const _: () = assert!(VoxelType::STONE as VoxelTypeSize & BACK_FACE_BIT == 0);

const SIZE: usize = CHUNK_SIZE as usize;

/// Material tag at a signed local position, air outside the chunk.
#[inline]
fn voxel_tag(grid: &VoxelGrid, position: Point3<i32>) -> VoxelTypeSize {
    grid.get_signed(position.x, position.y, position.z)
        .map_or(0, |voxel| voxel.tag())
}

/// Records the exposed faces on the boundary between slice `slice` and
/// `slice + 1` along `axis`.
fn fill_mask(grid: &VoxelGrid, axis: usize, slice: i32, mask: &mut [u8; CHUNK_AREA]) {
    let u = (axis + 1) % 3;
    let v = (axis + 2) % 3;

    for j in 0..SIZE {
        for i in 0..SIZE {
            let mut near = Point3::new(0, 0, 0);
            near[axis] = slice;
            near[u] = i as i32;
            near[v] = j as i32;
            let mut far = near;
            far[axis] += 1;

            let near_tag = voxel_tag(grid, near);
            let far_tag = voxel_tag(grid, far);

            mask[i + j * SIZE] = match (near_tag != 0, far_tag != 0) {
                (true, false) => near_tag,
                (false, true) => far_tag | BACK_FACE_BIT,
                _ => 0,
            };
        }
    }
}

/// Merges the mask into rectangles lying on `plane` along `axis`, clearing
/// every cell it consumes.
fn merge_mask(mask: &mut [u8; CHUNK_AREA], axis: usize, plane: i32, faces: &mut Vec<Face>) {
    let u = (axis + 1) % 3;
    let v = (axis + 2) % 3;

    for j in 0..SIZE {
        let mut i = 0;
        while i < SIZE {
            let tag = mask[i + j * SIZE];
            if tag == 0 {
                i += 1;
                continue;
            }

            let mut width = 1;
            while i + width < SIZE && mask[i + width + j * SIZE] == tag {
                width += 1;
            }

            let mut height = 1;
            'grow: while j + height < SIZE {
                let row = (j + height) * SIZE;
                for k in i..i + width {
                    if mask[k + row] != tag {
                        break 'grow;
                    }
                }
                height += 1;
            }

            for dy in 0..height {
                let row = (j + dy) * SIZE;
                mask[row + i..row + i + width].fill(0);
            }

            let mut origin = Point3::new(0, 0, 0);
            origin[axis] = plane;
            origin[u] = i as i32;
            origin[v] = j as i32;

            faces.push(Face {
                origin,
                width: width as i32,
                height: height as i32,
                voxel_type_int: tag & !BACK_FACE_BIT,
                side: VoxelSide::from_axis(axis, tag & BACK_FACE_BIT != 0),
            });

            i += width;
        }
    }
}

/// Extracts the merged rectangles of a voxel grid, in chunk-local space.
pub fn greedy_faces(grid: &VoxelGrid) -> Vec<Face> {
    let mut faces = Vec::new();
    if grid.is_empty() {
        return faces;
    }

    let mut mask = [0u8; CHUNK_AREA];
    for axis in 0..3 {
        for slice in -1..CHUNK_SIZE {
            fill_mask(grid, axis, slice, &mut mask);
            merge_mask(&mut mask, axis, slice + 1, &mut faces);
        }
    }

    faces
}

/// Generates the greedy mesh of a chunk in world space.
///
/// # Returns
/// An empty mesh for unloaded or all-air chunks.
pub fn greedy(chunk: &Chunk) -> Mesh {
    let mut mesh = Mesh::new();
    let Some(grid) = chunk.voxels() else {
        return mesh;
    };
    if grid.is_empty() {
        return mesh;
    }

    let start = Instant::now();
    let chunk_origin = chunk.world_origin();
    for face in greedy_faces(grid) {
        mesh.add_face(&face, chunk_origin);
    }

    debug!(
        "Meshed chunk {:?}: {} quads in {:?}",
        chunk.position(),
        mesh.quad_count(),
        start.elapsed()
    );

    mesh
}
