#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel Terrain
//!
//! Procedural voxel terrain that streams in chunks around a moving viewpoint
//! and turns each chunk into a greedy-merged triangle mesh.
//!
//! ## Key Modules
//!
//! * `engine_state` - The engine coordinator, configuration, terrain
//!   generation, chunk streaming and meshing
//!
//! ## Architecture
//!
//! * A seeded Perlin height field decides every voxel, so any chunk can be
//!   regenerated from its coordinate alone
//! * The chunk manager keeps a sphere of chunks live around the viewpoint,
//!   with a one-chunk margin before anything is evicted
//! * The mesh cache meshes each live chunk once and drops meshes of chunks
//!   that left the live set
//!
//! ## Usage
//!
//! ```no_run
//! fn main() {
//!     voxel_terrain::run();
//! }
//! ```

use cgmath::Vector3;
use log::{info, warn};

pub mod engine_state;

pub use engine_state::{
    config::{ConfigError, EngineConfig, TerrainConfig},
    rendering::{
        meshing::mesh::{Face, Mesh},
        MeshManager, MeshSyncReport, Vertex,
    },
    voxels::{
        chunk::{Chunk, VoxelGrid, CHUNK_SIZE},
        chunk_manager::{ChunkManager, StreamingReport},
        noise::PerlinNoise,
        terrain::TerrainGenerator,
        voxel::{voxel_side::VoxelSide, voxel_type::VoxelType, Voxel},
    },
    EngineState, FrameStats,
};

/// Number of frames the demo walk runs for.
const WALK_FRAMES: u32 = 64;
/// Distance the viewpoint travels along +X each frame, in voxels.
const WALK_STEP: f32 = 4.0;

/// Loads the configuration named by the first command-line argument, falling
/// back to defaults when there is none or it cannot be used.
fn load_config() -> EngineConfig {
    let Some(path) = std::env::args().nth(1) else {
        info!("No config file given, using defaults");
        return EngineConfig::default();
    };

    match EngineConfig::load(&path) {
        Ok(config) => {
            info!("Loaded config from {}", path);
            config
        }
        Err(err) => {
            warn!("Could not use config {}: {}. Falling back to defaults", path, err);
            EngineConfig::default()
        }
    }
}

/// Runs the headless engine: streams terrain along a straight walk from the
/// spawn point and logs what each frame loaded, meshed and evicted.
pub fn run() {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");

    let mut engine_state = EngineState::new(load_config());
    let start = engine_state.viewpoint();

    for frame in 0..WALK_FRAMES {
        let viewpoint = start + Vector3::new(frame as f32 * WALK_STEP, 0.0, 0.0);
        let stats = engine_state.move_viewpoint(viewpoint);
        info!("Frame {}: {}", frame, stats);
    }

    let mesh_manager = engine_state.mesh_manager();
    info!(
        "Walk finished: {} meshes, {} vertices, {} indices",
        mesh_manager.len(),
        mesh_manager.total_vertex_count(),
        mesh_manager.total_index_count()
    );

    engine_state.shutdown();
}
