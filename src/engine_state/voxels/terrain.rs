//! # Terrain Module
//!
//! Column-wise heightmap generation on top of [`PerlinNoise`]. Both chunk
//! filling and the stateless height query go through [`TerrainGenerator`], so
//! they always agree on where the surface is.

use crate::engine_state::config::TerrainConfig;

use super::noise::PerlinNoise;
use super::voxel::voxel_type::VoxelType;

/// Height function of the world, built once from a [`TerrainConfig`] and
/// passed explicitly to whoever needs it.
#[derive(Debug, Clone)]
pub struct TerrainGenerator {
    noise: PerlinNoise,
    config: TerrainConfig,
}

impl TerrainGenerator {
    /// Builds the generator, including the seeded permutation table.
    pub fn new(config: TerrainConfig) -> Self {
        TerrainGenerator {
            noise: PerlinNoise::new(config.seed),
            config,
        }
    }

    /// The parameters this generator was built with.
    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    fn sample(&self, world_x: f32, world_z: f32) -> f32 {
        self.noise.octave_noise(
            world_x * self.config.scale,
            world_z * self.config.scale,
            self.config.octaves,
            self.config.persistence,
        )
    }

    /// Continuous terrain height at a world X/Z position.
    pub fn height_at(&self, world_x: f32, world_z: f32) -> f32 {
        self.config.base_height as f32 + self.sample(world_x, world_z) * self.config.height_multiplier
    }

    /// Integer surface height of the column at `(world_x, world_z)`: the first
    /// world Y that is air. The noise offset is truncated toward zero.
    pub fn column_height(&self, world_x: i32, world_z: i32) -> i32 {
        let offset = self.sample(world_x as f32, world_z as f32) * self.config.height_multiplier;
        self.config.base_height + offset as i32
    }

    /// Material of the voxel at `world_y` in a column with the given surface.
    #[inline]
    pub fn material_at(&self, world_y: i32, column_height: i32) -> VoxelType {
        VoxelType::for_depth(world_y, column_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_height_stays_in_band() {
        let config = TerrainConfig::default();
        let terrain = TerrainGenerator::new(config);
        let low = config.base_height as f32 - config.height_multiplier;
        let high = config.base_height as f32 + config.height_multiplier;
        for x in (-300..300).step_by(7) {
            for z in (-300..300).step_by(11) {
                let h = terrain.height_at(x as f32, z as f32);
                assert!(h >= low && h <= high, "height {h} outside band");
            }
        }
    }

    #[test]
    fn test_column_height_truncates_offset() {
        let terrain = TerrainGenerator::new(TerrainConfig::default());
        for x in -20..20 {
            let continuous = terrain.height_at(x as f32, 3.0);
            let column = terrain.column_height(x, 3);
            let base = terrain.config().base_height as f32;
            assert!((column as f32 - continuous).abs() < 1.0 + 1e-3);
            assert!((column as f32 - base).abs() <= (continuous - base).abs() + 1e-3);
        }
    }

    #[test]
    fn test_flat_world_without_height_multiplier() {
        let config = TerrainConfig {
            height_multiplier: 0.0,
            base_height: 5,
            ..TerrainConfig::default()
        };
        let terrain = TerrainGenerator::new(config);
        assert_eq!(terrain.column_height(123, -456), 5);
        assert_eq!(terrain.height_at(1.5, 2.5), 5.0);
    }
}
