//! Mesh generation for voxel chunks.
//!
//! Converts chunk voxel data into indexed triangle geometry. Coplanar exposed
//! faces of the same material are merged into rectangles before triangulation,
//! which keeps the vertex count proportional to surface complexity.
//!
//! # Architecture
//! - [`Mesh`]: Vertices and indices of one chunk, in world space
//! - [`Face`]: One merged rectangle, in chunk-local space
//! - [`greedy`]: The slice-mask merging algorithm
//!
//! # Usage
//! ```
//! use cgmath::Point3;
//! use voxel_terrain::{Chunk, Mesh, TerrainConfig, TerrainGenerator};
//!
//! let terrain = TerrainGenerator::new(TerrainConfig::default());
//! let mut chunk = Chunk::new(Point3::new(0, 1, 0));
//! chunk.load(&terrain);
//! let mesh = Mesh::greedy(&chunk);
//! assert_eq!(mesh.indices.len(), mesh.quad_count() * 6);
//! ```

mod face;
mod greedy;
mod mesh;

pub use face::Face;
pub use greedy::{greedy, greedy_faces};
pub use mesh::*;
