//! Renderer-facing side of the engine.
//!
//! Nothing here touches a GPU. This module produces the vertex and index data
//! a renderer uploads, and caches it per chunk so the renderer only sees
//! meshes for chunks that are currently live.

pub mod meshing;
mod vertex;

// Re-export commonly used types
pub use meshing::{MeshManager, MeshSyncReport};
pub use vertex::Vertex;
