//! # Voxel Type Module
//!
//! This module defines the material tags a voxel can carry.
//! It provides conversion from the compact storage integer and the depth rule
//! used by terrain generation to pick a material for a solid cell.

use num_derive::FromPrimitive;

use super::VoxelTypeSize;

/// Enumerates every material tag a voxel can hold.
///
/// The discriminants are the stored tag values: `AIR` is always 0 and never
/// contributes geometry, every other variant is a solid material.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive)]
pub enum VoxelType {
    /// Empty space. Non-solid, never meshed.
    AIR = 0,

    /// The topmost solid voxel of a terrain column.
    GRASS = 1,

    /// The three layers directly below the surface.
    DIRT = 2,

    /// Everything deeper than the dirt layers.
    STONE = 3,
}

impl VoxelType {
    /// Number of layers below the surface voxel that are still `DIRT`.
    pub const SUBSURFACE_DEPTH: i32 = 3;

    /// Converts a stored tag back into a `VoxelType`.
    ///
    /// # Panics
    /// Panics if the tag is not one of the defined materials.
    pub fn from_int(tag: VoxelTypeSize) -> Self {
        Self::try_from_int(tag).unwrap_or_else(|| panic!("undefined voxel tag {tag}"))
    }

    /// Converts a stored tag back into a `VoxelType`, returning `None` for
    /// undefined tags.
    pub fn try_from_int(tag: VoxelTypeSize) -> Option<Self> {
        num::FromPrimitive::from_u8(tag)
    }

    /// Returns `true` for every material except `AIR`.
    #[inline]
    pub fn is_solid(self) -> bool {
        self != VoxelType::AIR
    }

    /// Picks the material of a voxel at `world_y` in a column whose terrain
    /// surface sits at `column_height` (the first air cell).
    ///
    /// # Returns
    /// `AIR` at or above the surface, `GRASS` for the topmost solid voxel,
    /// `DIRT` for the next [`Self::SUBSURFACE_DEPTH`] layers and `STONE` below.
    pub fn for_depth(world_y: i32, column_height: i32) -> Self {
        if world_y >= column_height {
            VoxelType::AIR
        } else if world_y == column_height - 1 {
            VoxelType::GRASS
        } else if world_y >= column_height - 1 - Self::SUBSURFACE_DEPTH {
            VoxelType::DIRT
        } else {
            VoxelType::STONE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_layers() {
        let surface = 10;
        assert_eq!(VoxelType::for_depth(12, surface), VoxelType::AIR);
        assert_eq!(VoxelType::for_depth(10, surface), VoxelType::AIR);
        assert_eq!(VoxelType::for_depth(9, surface), VoxelType::GRASS);
        assert_eq!(VoxelType::for_depth(8, surface), VoxelType::DIRT);
        assert_eq!(VoxelType::for_depth(6, surface), VoxelType::DIRT);
        assert_eq!(VoxelType::for_depth(5, surface), VoxelType::STONE);
        assert_eq!(VoxelType::for_depth(-40, surface), VoxelType::STONE);
    }

    #[test]
    fn test_tag_conversion() {
        for tag in 0..4u8 {
            assert_eq!(VoxelType::from_int(tag) as u8, tag);
        }
        assert_eq!(VoxelType::try_from_int(4), None);
        assert!(!VoxelType::AIR.is_solid());
        assert!(VoxelType::STONE.is_solid());
    }
}
