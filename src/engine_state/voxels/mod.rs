//! # Voxel World
//!
//! This module contains the world-streaming half of the engine: how voxels are
//! represented, how terrain is generated and how chunks are kept alive around
//! the viewpoint.
//!
//! ## Architecture
//!
//! * **Voxel**: a single cell's material tag and the six face directions
//! * **Noise**: seed-reproducible gradient noise
//! * **Terrain**: the column height function built on the noise
//! * **Chunk**: a fixed-size cubic block of voxels generated from the terrain
//! * **ChunkManager**: owns live chunks and streams them around the viewpoint
//!
//! ## Data Flow
//!
//! 1. The viewpoint position goes to the `ChunkManager`
//! 2. The manager decides which chunk coordinates to load and evict
//! 3. New chunks fill themselves from the `TerrainGenerator`
//! 4. The renderer side meshes whatever the manager reports as live

pub mod chunk;
pub mod chunk_manager;
pub mod noise;
pub mod terrain;
pub mod voxel;
