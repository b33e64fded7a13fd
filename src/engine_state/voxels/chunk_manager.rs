//! # Chunk Manager Module
//!
//! This module provides the `ChunkManager` struct which owns every live chunk
//! and decides, from the viewpoint position, which chunk coordinates should be
//! loaded.
//!
//! ## Streaming Policy
//!
//! Chunks are loaded inside a sphere of `render_distance` chunks around the
//! viewpoint chunk and evicted only once they are farther than
//! `render_distance + 1`. The one-chunk band between the two radii keeps
//! chunks on the boundary from loading and unloading every time the
//! viewpoint crosses a chunk edge.
//!
//! ## Performance Considerations
//! - Chunk lookup is O(1) using a hash map
//! - Distances are compared squared, no square roots in the per-frame path
//! - Generation is synchronous: `add_chunk` returns with the chunk filled

use std::collections::HashMap;

use cgmath::Point3;
use log::{debug, info, trace, warn};

use crate::engine_state::config::TerrainConfig;

use super::chunk::{Chunk, CHUNK_SIZE, MAX_CHUNK_COORD, MIN_CHUNK_COORD};
use super::terrain::TerrainGenerator;

/// Coordinates that entered and left the live set during one streaming update.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StreamingReport {
    /// Chunks created and generated by this update, in load order.
    pub loaded: Vec<Point3<i32>>,
    /// Chunks evicted by this update.
    pub unloaded: Vec<Point3<i32>>,
}

impl StreamingReport {
    /// Returns `true` if the update did not change the live set.
    pub fn is_empty(&self) -> bool {
        self.loaded.is_empty() && self.unloaded.is_empty()
    }
}

/// Owns the set of live chunks around the viewpoint.
///
/// Every chunk is stored exactly once in `chunks`, and its coordinate appears
/// exactly once in `order`. The two are only mutated together.
///
/// # Examples
///
/// ```
/// use cgmath::Point3;
/// use voxel_terrain::{ChunkManager, TerrainConfig};
///
/// let mut manager = ChunkManager::new(TerrainConfig::default());
/// manager.add_chunk(Point3::new(0, 0, 0));
/// assert!(manager.has_chunk(Point3::new(0, 0, 0)));
/// ```
pub struct ChunkManager {
    /// A mapping from chunk coordinates to the owned chunk.
    chunks: HashMap<Point3<i32>, Chunk>,
    /// Live coordinates in insertion order, for deterministic iteration.
    order: Vec<Point3<i32>>,
    /// Height field shared by every chunk this manager generates.
    terrain: TerrainGenerator,
}

impl ChunkManager {
    /// Creates a manager with no chunks loaded.
    pub fn new(terrain_config: TerrainConfig) -> Self {
        ChunkManager {
            chunks: HashMap::new(),
            order: Vec::new(),
            terrain: TerrainGenerator::new(terrain_config),
        }
    }

    /// The terrain generator used to fill chunks.
    pub fn terrain(&self) -> &TerrainGenerator {
        &self.terrain
    }

    /// Converts a world-space position into the coordinate of the chunk that
    /// contains it, flooring on every axis. Positions past the edge of the
    /// world clamp to the outermost chunk.
    pub fn world_to_chunk_position(position: Point3<f32>) -> Point3<i32> {
        let size = CHUNK_SIZE as f32;
        let to_chunk =
            |v: f32| ((v / size).floor() as i32).clamp(MIN_CHUNK_COORD, MAX_CHUNK_COORD);
        Point3::new(to_chunk(position.x), to_chunk(position.y), to_chunk(position.z))
    }

    #[inline]
    fn distance_squared(a: Point3<i32>, b: Point3<i32>) -> i64 {
        let dx = i64::from(a.x) - i64::from(b.x);
        let dy = i64::from(a.y) - i64::from(b.y);
        let dz = i64::from(a.z) - i64::from(b.z);
        dx * dx + dy * dy + dz * dz
    }

    /// Chunk coordinates within `radius` of `center` along one axis, cut off
    /// at the edge of the world.
    #[inline]
    fn axis_range(center: i32, radius: i32) -> std::ops::RangeInclusive<i32> {
        let low = center.saturating_sub(radius).max(MIN_CHUNK_COORD);
        let high = center.saturating_add(radius).min(MAX_CHUNK_COORD);
        low..=high
    }

    /// Creates and loads the chunk at `position` unless one already exists.
    ///
    /// # Returns
    /// `true` if a new chunk was created. Coordinates past the edge of the
    /// world are refused.
    pub fn add_chunk(&mut self, position: Point3<i32>) -> bool {
        if !Chunk::in_world(position) {
            warn!("Chunk {:?} is outside the world, not loading", position);
            return false;
        }
        if self.chunks.contains_key(&position) {
            trace!("Chunk {:?} already present", position);
            return false;
        }

        let mut chunk = Chunk::new(position);
        chunk.load(&self.terrain);
        self.chunks.insert(position, chunk);
        self.order.push(position);
        debug!("Loaded chunk {:?}", position);
        true
    }

    /// Unloads and drops the chunk at `position` if present.
    ///
    /// # Returns
    /// `true` if a chunk was removed.
    pub fn remove_chunk(&mut self, position: Point3<i32>) -> bool {
        let Some(mut chunk) = self.chunks.remove(&position) else {
            trace!("Chunk {:?} not present, nothing to remove", position);
            return false;
        };

        self.order.retain(|p| *p != position);
        chunk.unload();
        debug!("Unloaded chunk {:?}", position);
        true
    }

    /// Returns `true` if a chunk exists at `position`.
    pub fn has_chunk(&self, position: Point3<i32>) -> bool {
        self.chunks.contains_key(&position)
    }

    /// The chunk at `position`, if loaded.
    pub fn get_chunk(&self, position: Point3<i32>) -> Option<&Chunk> {
        self.chunks.get(&position)
    }

    /// Number of live chunks.
    pub fn chunk_count(&self) -> usize {
        self.order.len()
    }

    /// Live chunks in the order they were loaded. The view is valid until the
    /// next mutating call.
    pub fn loaded_chunks(&self) -> impl Iterator<Item = &Chunk> + '_ {
        self.order.iter().map(move |position| &self.chunks[position])
    }

    /// Live chunk coordinates in the order they were loaded.
    pub fn loaded_positions(&self) -> &[Point3<i32>] {
        &self.order
    }

    /// Streams chunks around `viewpoint` (world space).
    ///
    /// All loads for this call complete before any eviction is evaluated.
    ///
    /// # Arguments
    /// * `viewpoint` - World-space position of the viewer
    /// * `render_distance` - Load radius in chunks
    pub fn update_chunks_around_viewpoint(
        &mut self,
        viewpoint: Point3<f32>,
        render_distance: i32,
    ) -> StreamingReport {
        let center = Self::world_to_chunk_position(viewpoint);
        let render_distance = render_distance.max(0);
        let load_radius = i64::from(render_distance);
        let load_distance_sq = load_radius * load_radius;
        let unload_distance_sq = (load_radius + 1) * (load_radius + 1);

        let mut report = StreamingReport::default();

        for x in Self::axis_range(center.x, render_distance) {
            for y in Self::axis_range(center.y, render_distance) {
                for z in Self::axis_range(center.z, render_distance) {
                    let position = Point3::new(x, y, z);
                    if Self::distance_squared(position, center) <= load_distance_sq
                        && self.add_chunk(position)
                    {
                        report.loaded.push(position);
                    }
                }
            }
        }

        let to_unload: Vec<Point3<i32>> = self
            .order
            .iter()
            .copied()
            .filter(|position| Self::distance_squared(*position, center) > unload_distance_sq)
            .collect();

        for position in to_unload {
            if self.remove_chunk(position) {
                report.unloaded.push(position);
            }
        }

        if !report.is_empty() {
            info!(
                "Streaming around chunk {:?}: +{} -{} ({} live)",
                center,
                report.loaded.len(),
                report.unloaded.len(),
                self.chunk_count()
            );
        }

        report
    }

    /// Terrain height at a world X/Z position, computed from the height field
    /// directly. Does not load or consult any chunk.
    pub fn terrain_height_at(&self, world_x: f32, world_z: f32) -> f32 {
        self.terrain.height_at(world_x, world_z)
    }

    /// Unloads and drops every chunk.
    pub fn cleanup(&mut self) {
        for (_, mut chunk) in self.chunks.drain() {
            chunk.unload();
        }
        self.order.clear();
    }
}

impl Drop for ChunkManager {
    fn drop(&mut self) {
        self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> ChunkManager {
        ChunkManager::new(TerrainConfig::default())
    }

    fn origin() -> Point3<f32> {
        Point3::new(8.0, 8.0, 8.0)
    }

    fn assert_consistent(manager: &ChunkManager) {
        assert_eq!(manager.chunks.len(), manager.order.len());
        for position in &manager.order {
            assert_eq!(manager.chunks[position].position(), *position);
        }
    }

    #[test]
    fn test_world_to_chunk_floors() {
        let p = ChunkManager::world_to_chunk_position(Point3::new(15.9, 16.0, -0.1));
        assert_eq!(p, Point3::new(0, 1, -1));
        let p = ChunkManager::world_to_chunk_position(Point3::new(-16.0, -16.1, 33.0));
        assert_eq!(p, Point3::new(-1, -2, 2));
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut manager = manager();
        assert!(manager.add_chunk(Point3::new(1, 2, 3)));
        assert!(!manager.add_chunk(Point3::new(1, 2, 3)));
        assert_eq!(manager.chunk_count(), 1);
        assert!(manager.get_chunk(Point3::new(1, 2, 3)).unwrap().is_loaded());
        assert_consistent(&manager);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut manager = manager();
        manager.add_chunk(Point3::new(0, 0, 0));
        assert!(!manager.remove_chunk(Point3::new(9, 9, 9)));
        assert!(manager.remove_chunk(Point3::new(0, 0, 0)));
        assert!(!manager.remove_chunk(Point3::new(0, 0, 0)));
        assert_eq!(manager.chunk_count(), 0);
        assert_consistent(&manager);
    }

    #[test]
    fn test_load_region_is_spherical() {
        let mut manager = manager();
        let report = manager.update_chunks_around_viewpoint(origin(), 2);

        // Lattice points with x² + y² + z² <= 4.
        assert_eq!(report.loaded.len(), 33);
        assert!(report.unloaded.is_empty());
        assert!(manager.has_chunk(Point3::new(2, 0, 0)));
        assert!(manager.has_chunk(Point3::new(1, 1, 1)));
        assert!(!manager.has_chunk(Point3::new(2, 1, 0)));
        assert!(!manager.has_chunk(Point3::new(2, 2, 2)));
        assert_consistent(&manager);
    }

    #[test]
    fn test_unmoved_update_is_stable() {
        let mut manager = manager();
        manager.update_chunks_around_viewpoint(origin(), 2);
        let before = manager.loaded_positions().to_vec();

        let report = manager.update_chunks_around_viewpoint(origin(), 2);
        assert!(report.is_empty());
        assert_eq!(manager.loaded_positions(), &before[..]);
    }

    #[test]
    fn test_hysteresis_band() {
        let mut manager = manager();
        let render_distance = 4;

        // Distance² 20 (≈4.47): inside the band, pre-loaded.
        manager.add_chunk(Point3::new(4, 2, 0));
        // Distance² 25 (5.0): exactly the unload radius.
        manager.add_chunk(Point3::new(5, 0, 0));
        // Distance² 26 (≈5.1): beyond the unload radius.
        manager.add_chunk(Point3::new(5, 1, 0));

        let report = manager.update_chunks_around_viewpoint(origin(), render_distance);

        // Distance² 16: exactly the load radius.
        assert!(manager.has_chunk(Point3::new(4, 0, 0)));
        assert!(manager.has_chunk(Point3::new(0, -4, 0)));
        assert!(manager.has_chunk(Point3::new(4, 2, 0)));
        assert!(manager.has_chunk(Point3::new(5, 0, 0)));
        assert!(!manager.has_chunk(Point3::new(5, 1, 0)));
        assert_eq!(report.unloaded, vec![Point3::new(5, 1, 0)]);
        assert_consistent(&manager);
    }

    #[test]
    fn test_moving_viewpoint_evicts_trailing_chunks() {
        let mut manager = manager();
        manager.update_chunks_around_viewpoint(origin(), 1);
        assert!(manager.has_chunk(Point3::new(-1, 0, 0)));

        let moved = Point3::new(8.0 + 3.0 * CHUNK_SIZE as f32, 8.0, 8.0);
        let report = manager.update_chunks_around_viewpoint(moved, 1);

        assert!(!manager.has_chunk(Point3::new(-1, 0, 0)));
        assert!(report.unloaded.contains(&Point3::new(-1, 0, 0)));
        assert!(manager.has_chunk(Point3::new(4, 0, 0)));
        // (1, 0, 0) is at distance 2 from (3, 0, 0): inside the band, kept.
        assert!(manager.has_chunk(Point3::new(1, 0, 0)));
        assert_consistent(&manager);
    }

    #[test]
    fn test_viewpoint_at_world_edge() {
        let mut manager = manager();
        for viewpoint in [
            Point3::new(1.0e12, 40.0, 8.0),
            Point3::new(-1.0e12, 40.0, -1.0e12),
        ] {
            manager.update_chunks_around_viewpoint(viewpoint, 1);
            // The sphere is cut in half along every clamped axis.
            let center = ChunkManager::world_to_chunk_position(viewpoint);
            assert!(manager.has_chunk(center));
            for position in manager.loaded_positions() {
                assert!(Chunk::in_world(*position));
            }
            assert!(manager.update_chunks_around_viewpoint(viewpoint, 1).is_empty());
            assert_consistent(&manager);
        }
        assert_eq!(
            ChunkManager::world_to_chunk_position(Point3::new(1.0e12, 0.0, -1.0e12)),
            Point3::new(MAX_CHUNK_COORD, 0, MIN_CHUNK_COORD)
        );
    }

    #[test]
    fn test_extreme_render_distance_bounds() {
        let mut manager = manager();
        manager.add_chunk(Point3::new(MIN_CHUNK_COORD, 0, 0));
        let report = manager.update_chunks_around_viewpoint(Point3::new(1.0e12, 8.0, 8.0), 0);
        assert_eq!(report.loaded, vec![Point3::new(MAX_CHUNK_COORD, 0, 0)]);
        assert_eq!(report.unloaded, vec![Point3::new(MIN_CHUNK_COORD, 0, 0)]);

        assert!(!manager.add_chunk(Point3::new(i32::MAX, 0, 0)));
        assert_eq!(
            ChunkManager::axis_range(MAX_CHUNK_COORD, i32::MAX),
            MIN_CHUNK_COORD..=MAX_CHUNK_COORD
        );
    }

    #[test]
    fn test_terrain_height_independent_of_loading() {
        let mut manager = manager();
        let before = manager.terrain_height_at(37.0, -12.0);
        manager.add_chunk(ChunkManager::world_to_chunk_position(Point3::new(37.0, before, -12.0)));
        assert_eq!(manager.terrain_height_at(37.0, -12.0).to_bits(), before.to_bits());
    }

    #[test]
    fn test_cleanup_empties_both_containers() {
        let mut manager = manager();
        manager.update_chunks_around_viewpoint(origin(), 1);
        assert!(manager.chunk_count() > 0);
        manager.cleanup();
        assert_eq!(manager.chunk_count(), 0);
        assert_eq!(manager.loaded_chunks().count(), 0);
        assert_consistent(&manager);
    }
}
