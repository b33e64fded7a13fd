//! # Chunk Module
//!
//! This module provides the `Chunk` struct: one `CHUNK_SIZE³` block of voxel
//! data that can materialise itself from the terrain height field.
//!
//! ## Lifecycle
//!
//! 1. `Chunk::new` sizes the voxel buffer and fills it with air.
//! 2. `Chunk::load` fills it procedurally. Loading twice is a no-op.
//! 3. `Chunk::unload` releases the buffer. Unloading twice is a no-op.
//!
//! Generation is purely a function of the chunk position and the terrain
//! generator, so an unloaded chunk reloads to identical contents.

use cgmath::Point3;
use log::trace;

use super::terrain::TerrainGenerator;
use super::voxel::Voxel;

mod voxel_grid;

pub use voxel_grid::VoxelGrid;

/// The dimension (width, height, depth) of a chunk in voxels.
pub const CHUNK_SIZE: i32 = 16;
/// The number of voxels in a single 2D plane of a chunk (CHUNK_SIZE²).
pub const CHUNK_AREA: usize = (CHUNK_SIZE * CHUNK_SIZE) as usize;
/// The total number of voxels in a chunk (CHUNK_SIZE³).
pub const CHUNK_VOLUME: usize = CHUNK_AREA * CHUNK_SIZE as usize;
/// Smallest chunk coordinate whose voxels have representable world positions.
pub const MIN_CHUNK_COORD: i32 = i32::MIN / CHUNK_SIZE;
/// Largest chunk coordinate whose voxels have representable world positions.
pub const MAX_CHUNK_COORD: i32 = i32::MAX / CHUNK_SIZE;

/// A 16x16x16 block of voxels at a fixed chunk-space position.
pub struct Chunk {
    /// The position of this chunk in chunk coordinates (not voxel coordinates).
    position: Point3<i32>,

    /// The voxel buffer. `None` once the chunk has been unloaded.
    voxels: Option<VoxelGrid>,

    /// Whether `voxels` holds generated terrain.
    loaded: bool,
}

impl std::fmt::Debug for Chunk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chunk")
            .field("position", &self.position)
            .field("loaded", &self.loaded)
            .finish()
    }
}

impl Chunk {
    /// Returns `true` if every voxel of the chunk at `position` has a world
    /// coordinate that fits in an `i32`.
    pub fn in_world(position: Point3<i32>) -> bool {
        let range = MIN_CHUNK_COORD..=MAX_CHUNK_COORD;
        range.contains(&position.x) && range.contains(&position.y) && range.contains(&position.z)
    }

    /// Creates an unloaded chunk whose buffer is sized but all air.
    ///
    /// # Panics
    /// Panics if `position` is outside [`MIN_CHUNK_COORD`]..=[`MAX_CHUNK_COORD`].
    pub fn new(position: Point3<i32>) -> Self {
        assert!(Self::in_world(position), "chunk {position:?} outside world");
        Chunk {
            position,
            voxels: Some(VoxelGrid::default()),
            loaded: false,
        }
    }

    /// Creates an already-loaded chunk from existing voxel data. `load` on the
    /// result is a no-op.
    ///
    /// # Panics
    /// Panics if `position` is outside [`MIN_CHUNK_COORD`]..=[`MAX_CHUNK_COORD`].
    pub fn with_voxels(position: Point3<i32>, voxels: VoxelGrid) -> Self {
        assert!(Self::in_world(position), "chunk {position:?} outside world");
        Chunk {
            position,
            voxels: Some(voxels),
            loaded: true,
        }
    }

    /// The chunk-space coordinate of this chunk.
    pub fn position(&self) -> Point3<i32> {
        self.position
    }

    /// World-space position of this chunk's `(0, 0, 0)` voxel corner.
    pub fn world_origin(&self) -> Point3<i32> {
        Point3::new(
            self.position.x * CHUNK_SIZE,
            self.position.y * CHUNK_SIZE,
            self.position.z * CHUNK_SIZE,
        )
    }

    /// Whether the chunk currently holds generated terrain.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Read-only view of the voxel buffer, or `None` after `unload`.
    pub fn voxels(&self) -> Option<&VoxelGrid> {
        self.voxels.as_ref()
    }

    /// Generates the chunk's voxels from `terrain`. No-op if already loaded.
    pub fn load(&mut self, terrain: &TerrainGenerator) {
        if self.loaded {
            trace!("Chunk {:?} already loaded", self.position);
            return;
        }

        let grid = self.voxels.get_or_insert_with(VoxelGrid::default);
        Self::generate_voxels(self.position, grid, terrain);
        self.loaded = true;
    }

    /// Releases the voxel buffer. Safe to call on a chunk that is not loaded.
    pub fn unload(&mut self) {
        self.voxels = None;
        self.loaded = false;
    }

    /// Fills `grid` column by column: solid below the column's terrain height,
    /// layered by depth, and air at or above it.
    fn generate_voxels(position: Point3<i32>, grid: &mut VoxelGrid, terrain: &TerrainGenerator) {
        let size = CHUNK_SIZE as usize;
        for z in 0..size {
            for x in 0..size {
                let world_x = position.x * CHUNK_SIZE + x as i32;
                let world_z = position.z * CHUNK_SIZE + z as i32;
                let column_height = terrain.column_height(world_x, world_z);

                for y in 0..size {
                    let world_y = position.y * CHUNK_SIZE + y as i32;
                    let voxel_type = terrain.material_at(world_y, column_height);
                    grid.set(x, y, z, Voxel::new(voxel_type));
                }
            }
        }
    }
}

impl Drop for Chunk {
    fn drop(&mut self) {
        self.unload();
    }
}
