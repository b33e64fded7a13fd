//! # Voxel Module
//!
//! This module provides the single-cell voxel type, its material tags and the
//! face directions used when extracting its surface.

use voxel_type::VoxelType;

pub mod voxel_side;
pub mod voxel_type;

/// The underlying integer type used to represent voxel material tags in memory.
pub type VoxelTypeSize = u8;

/// Represents a single voxel cell.
///
/// A voxel stores only its material tag. Its grid-local position is implied by
/// its slot in the owning chunk's [`VoxelGrid`](crate::engine_state::voxels::chunk::VoxelGrid).
///
/// # Memory Layout
/// `#[repr(C)]` keeps the layout a single byte so whole grids can be viewed as
/// byte slices. The tag is always a defined [`VoxelType`]: the field is
/// private and the type is `NoUninit` rather than `Pod`, so bytes can be read
/// out of a voxel but never cast into one.
#[repr(C)]
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default, bytemuck::NoUninit, bytemuck::Zeroable, Debug)]
pub struct Voxel {
    /// The material of this voxel, encoded as a `VoxelTypeSize`.
    voxel_type: VoxelTypeSize,
}

impl Voxel {
    /// An empty cell.
    pub const AIR: Voxel = Voxel { voxel_type: 0 };

    /// Creates a new voxel of the specified material.
    pub fn new(voxel_type: VoxelType) -> Self {
        Voxel {
            voxel_type: voxel_type as VoxelTypeSize,
        }
    }

    /// The stored material tag.
    #[inline]
    pub fn tag(&self) -> VoxelTypeSize {
        self.voxel_type
    }

    /// Returns the material of this voxel.
    pub fn get_type(&self) -> VoxelType {
        VoxelType::from_int(self.voxel_type)
    }

    /// Returns `true` if this voxel is anything other than air.
    #[inline]
    pub fn is_solid(&self) -> bool {
        self.voxel_type != Voxel::AIR.voxel_type
    }
}
