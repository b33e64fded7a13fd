//! # Engine State Module
//!
//! The headless core of the engine: terrain streaming around a moving
//! viewpoint, and the renderer-side mesh cache that follows it.
//!
//! ## Key Components
//!
//! * `EngineState` - Owns the chunk manager, the mesh cache and the viewpoint
//! * `config` - Terrain and streaming parameters, loadable from JSON
//! * `rendering` - Vertex format, greedy meshing and the mesh cache
//! * `voxels` - Voxel types, noise, terrain, chunks and chunk streaming
//!
//! ## Frame Flow
//!
//! Each call to [`EngineState::move_viewpoint`] is one frame. Chunks are only
//! re-evaluated when the viewpoint crosses into a different chunk, then the
//! mesh cache is brought in line with whatever is live.

use std::fmt;

use cgmath::Point3;
use log::info;
use web_time::{Duration, Instant};

use config::EngineConfig;
use rendering::MeshManager;
use voxels::chunk_manager::{ChunkManager, StreamingReport};

pub mod config;
pub mod rendering;
pub mod voxels;

/// Height above the terrain surface at which the viewpoint starts, in voxels.
const SPAWN_HEIGHT_ABOVE_TERRAIN: f32 = 2.0;

/// Counters describing what one frame changed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FrameStats {
    /// Chunks live after the frame
    pub live_chunks: usize,
    /// Meshes cached after the frame
    pub cached_meshes: usize,
    /// Chunks loaded during the frame
    pub loaded: usize,
    /// Chunks unloaded during the frame
    pub unloaded: usize,
    /// Chunks meshed during the frame
    pub meshed: usize,
    /// Meshes dropped during the frame
    pub retired: usize,
    /// Wall time spent in the frame
    pub frame_time: Duration,
}

impl fmt::Display for FrameStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} chunks (+{} -{}), {} meshes (+{} -{}) in {:?}",
            self.live_chunks,
            self.loaded,
            self.unloaded,
            self.cached_meshes,
            self.meshed,
            self.retired,
            self.frame_time
        )
    }
}

/// The main state container for the engine.
///
/// # Examples
///
/// ```
/// use cgmath::Point3;
/// use voxel_terrain::{EngineConfig, EngineState};
///
/// let mut config = EngineConfig::default();
/// config.render_distance = 1;
///
/// let mut engine = EngineState::new(config);
/// let start = engine.viewpoint();
/// let stats = engine.move_viewpoint(Point3::new(start.x + 1.0, start.y, start.z));
/// assert_eq!(stats.loaded, 0);
/// engine.shutdown();
/// ```
pub struct EngineState {
    /// Configuration the engine was built with
    config: EngineConfig,
    /// Live chunks around the viewpoint
    chunk_manager: ChunkManager,
    /// Meshes of the live chunks
    mesh_manager: MeshManager,
    /// Current world-space viewpoint
    viewpoint: Point3<f32>,
    /// Chunk containing the viewpoint at the last streaming update
    current_viewpoint_chunk_position: Option<Point3<i32>>,
}

impl EngineState {
    /// Creates the engine and streams the initial chunk set around a
    /// viewpoint just above the terrain at the world origin.
    pub fn new(config: EngineConfig) -> Self {
        info!("Starting engine with {:?}", config);

        let chunk_manager = ChunkManager::new(config.terrain);
        let spawn_height = chunk_manager.terrain_height_at(0.0, 0.0) + SPAWN_HEIGHT_ABOVE_TERRAIN;
        let viewpoint = Point3::new(0.0, spawn_height, 0.0);

        let mut engine_state = EngineState {
            config,
            chunk_manager,
            mesh_manager: MeshManager::new(config.mesh_cache_capacity),
            viewpoint,
            current_viewpoint_chunk_position: None,
        };

        let stats = engine_state.move_viewpoint(viewpoint);
        info!("Initial chunk set ready: {}", stats);

        engine_state
    }

    /// Moves the viewpoint and advances one frame.
    ///
    /// Streaming runs only if the viewpoint entered a different chunk since
    /// the last update. The mesh cache is synced every frame.
    pub fn move_viewpoint(&mut self, viewpoint: Point3<f32>) -> FrameStats {
        let start = Instant::now();
        self.viewpoint = viewpoint;

        let chunk_position = ChunkManager::world_to_chunk_position(viewpoint);
        let streaming = if self.current_viewpoint_chunk_position != Some(chunk_position) {
            self.current_viewpoint_chunk_position = Some(chunk_position);
            self.chunk_manager
                .update_chunks_around_viewpoint(viewpoint, self.config.render_distance)
        } else {
            StreamingReport::default()
        };

        let sync = self.mesh_manager.sync(&self.chunk_manager);

        FrameStats {
            live_chunks: self.chunk_manager.chunk_count(),
            cached_meshes: self.mesh_manager.len(),
            loaded: streaming.loaded.len(),
            unloaded: streaming.unloaded.len(),
            meshed: sync.meshed.len(),
            retired: sync.retired.len(),
            frame_time: start.elapsed(),
        }
    }

    /// Current world-space viewpoint.
    pub fn viewpoint(&self) -> Point3<f32> {
        self.viewpoint
    }

    /// Configuration the engine was built with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The live chunk set.
    pub fn chunk_manager(&self) -> &ChunkManager {
        &self.chunk_manager
    }

    /// The mesh cache.
    pub fn mesh_manager(&self) -> &MeshManager {
        &self.mesh_manager
    }

    /// Unloads every chunk and drops every cached mesh.
    pub fn shutdown(&mut self) {
        self.chunk_manager.cleanup();
        self.mesh_manager.clear();
        self.current_viewpoint_chunk_position = None;
        info!("Engine shut down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> EngineConfig {
        EngineConfig {
            render_distance: 1,
            ..EngineConfig::default()
        }
    }

    #[test]
    fn test_new_spawns_above_terrain() {
        let engine = EngineState::new(small_config());
        let surface = engine.chunk_manager().terrain_height_at(0.0, 0.0);
        assert_eq!(engine.viewpoint(), Point3::new(0.0, surface + 2.0, 0.0));
        assert_eq!(engine.chunk_manager().chunk_count(), 7);
        assert_eq!(engine.mesh_manager().len(), 7);
    }

    #[test]
    fn test_move_within_chunk_streams_nothing() {
        let mut engine = EngineState::new(small_config());
        let center = ChunkManager::world_to_chunk_position(engine.viewpoint());
        let inside = Point3::new(
            center.x as f32 * 16.0 + 0.5,
            center.y as f32 * 16.0 + 0.5,
            center.z as f32 * 16.0 + 0.5,
        );
        let stats = engine.move_viewpoint(inside);
        assert_eq!((stats.loaded, stats.unloaded), (0, 0));
        assert_eq!((stats.meshed, stats.retired), (0, 0));
        assert_eq!(stats.live_chunks, 7);
    }

    #[test]
    fn test_crossing_a_chunk_boundary_streams() {
        let mut engine = EngineState::new(small_config());
        let start = engine.viewpoint();
        let far = Point3::new(start.x + 16.0 * 4.0, start.y, start.z);
        let stats = engine.move_viewpoint(far);
        assert_eq!(stats.loaded, 7);
        assert_eq!(stats.unloaded, 7);
        assert_eq!(stats.meshed, 7);
        assert_eq!(stats.retired, 7);
        assert_eq!(stats.cached_meshes, stats.live_chunks);
    }

    #[test]
    fn test_shutdown_releases_everything() {
        let mut engine = EngineState::new(small_config());
        engine.shutdown();
        assert_eq!(engine.chunk_manager().chunk_count(), 0);
        assert!(engine.mesh_manager().is_empty());

        let stats = engine.move_viewpoint(engine.viewpoint());
        assert_eq!(stats.live_chunks, 7);
    }
}
