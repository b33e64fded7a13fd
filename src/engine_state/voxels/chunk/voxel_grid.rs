//! # Voxel Grid Module
//!
//! Fixed-size storage for one chunk's voxels. The flat layout is
//! `index = x + y * CHUNK_SIZE + z * CHUNK_SIZE²` and [`VoxelGrid::index`] is
//! the only place that formula lives; chunk generation and meshing both go
//! through it.

use cgmath::Point3;

use crate::engine_state::voxels::voxel::Voxel;

use super::{CHUNK_AREA, CHUNK_SIZE, CHUNK_VOLUME};

const SIZE: usize = CHUNK_SIZE as usize;

/// A cubic `CHUNK_SIZE³` block of voxels.
///
/// The buffer is a boxed fixed-size array, so its length can never disagree
/// with the index formula.
#[derive(Clone, PartialEq, Eq)]
pub struct VoxelGrid {
    voxels: Box<[Voxel; CHUNK_VOLUME]>,
}

impl Default for VoxelGrid {
    fn default() -> Self {
        VoxelGrid {
            voxels: Box::new([Voxel::AIR; CHUNK_VOLUME]),
        }
    }
}

impl std::fmt::Debug for VoxelGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VoxelGrid")
            .field("solid_voxels", &self.solid_count())
            .finish()
    }
}

impl VoxelGrid {
    /// Creates a grid with every cell set to `voxel`.
    pub fn filled(voxel: Voxel) -> Self {
        VoxelGrid {
            voxels: Box::new([voxel; CHUNK_VOLUME]),
        }
    }

    /// Flat index of the cell at `(x, y, z)`.
    ///
    /// # Panics
    /// Panics if any coordinate is outside `0..CHUNK_SIZE`.
    #[inline]
    pub fn index(x: usize, y: usize, z: usize) -> usize {
        assert!(
            x < SIZE && y < SIZE && z < SIZE,
            "voxel coordinate ({x}, {y}, {z}) outside chunk"
        );
        x + y * SIZE + z * CHUNK_AREA
    }

    /// Inverse of [`Self::index`].
    #[inline]
    pub fn position_of(index: usize) -> Point3<usize> {
        assert!(index < CHUNK_VOLUME, "voxel index {index} outside chunk");
        Point3::new(index % SIZE, (index / SIZE) % SIZE, index / CHUNK_AREA)
    }

    /// The voxel at `(x, y, z)`.
    ///
    /// # Panics
    /// Panics if any coordinate is outside `0..CHUNK_SIZE`.
    #[inline]
    pub fn get(&self, x: usize, y: usize, z: usize) -> Voxel {
        self.voxels[Self::index(x, y, z)]
    }

    /// The voxel at a signed local position, or `None` outside the chunk.
    #[inline]
    pub fn get_signed(&self, x: i32, y: i32, z: i32) -> Option<Voxel> {
        let range = 0..CHUNK_SIZE;
        if range.contains(&x) && range.contains(&y) && range.contains(&z) {
            Some(self.get(x as usize, y as usize, z as usize))
        } else {
            None
        }
    }

    /// Overwrites the voxel at `(x, y, z)`.
    ///
    /// # Panics
    /// Panics if any coordinate is outside `0..CHUNK_SIZE`.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, z: usize, voxel: Voxel) {
        self.voxels[Self::index(x, y, z)] = voxel;
    }

    /// Read-only view of the flat buffer in storage order.
    pub fn as_slice(&self) -> &[Voxel] {
        &self.voxels[..]
    }

    /// The buffer viewed as raw material tags.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.as_slice())
    }

    /// Number of non-air cells.
    pub fn solid_count(&self) -> usize {
        self.voxels.iter().filter(|v| v.is_solid()).count()
    }

    /// Returns `true` if every cell is air.
    pub fn is_empty(&self) -> bool {
        !self.voxels.iter().any(Voxel::is_solid)
    }
}
