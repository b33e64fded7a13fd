//! Mesh generation and caching for voxel rendering.
//!
//! The renderer never reads chunk voxels directly. It asks the
//! [`MeshManager`] for the mesh of a chunk coordinate, and the manager keeps
//! its cache in step with the live chunk set of a
//! [`ChunkManager`](crate::engine_state::voxels::chunk_manager::ChunkManager).
//!
//! # Architecture
//! - `MeshManager`: Coordinate-keyed mesh cache with LRU eviction
//! - `mesh/`: The mesh data types and the greedy meshing algorithm
//!
//! # Performance Considerations
//! - Chunks are meshed once and reused until they leave the live set
//! - The cache is bounded but never smaller than the live set

use std::num::NonZeroUsize;

use cgmath::Point3;
use log::{debug, warn};
use lru::LruCache;

use crate::engine_state::voxels::chunk_manager::ChunkManager;

/// Mesh data types and the greedy meshing algorithm.
pub mod mesh;

use mesh::Mesh;

/// Coordinates whose meshes changed during one [`MeshManager::sync`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MeshSyncReport {
    /// Chunks meshed and inserted by this sync.
    pub meshed: Vec<Point3<i32>>,
    /// Chunks whose meshes were dropped because the chunk left the live set.
    pub retired: Vec<Point3<i32>>,
}

impl MeshSyncReport {
    /// Returns `true` if the sync left the cache contents unchanged.
    pub fn is_empty(&self) -> bool {
        self.meshed.is_empty() && self.retired.is_empty()
    }
}

/// Renderer-side cache of chunk meshes.
///
/// # Memory Management
///
/// Holds at most `capacity` meshes. A sync that sees more live chunks than
/// that grows the cache to the live count, so a live chunk's mesh is never
/// evicted.
pub struct MeshManager {
    /// LRU cache from chunk coordinate to that chunk's mesh
    least_recently_meshed_chunks: LruCache<Point3<i32>, Mesh>,
}

impl MeshManager {
    /// Creates an empty cache holding at most `capacity` meshes.
    ///
    /// A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or_else(|| {
            warn!("Mesh cache capacity of 0 requested, using 1");
            NonZeroUsize::MIN
        });

        MeshManager {
            least_recently_meshed_chunks: LruCache::new(capacity),
        }
    }

    /// Brings the cache in line with the live chunks of `chunk_manager`.
    ///
    /// Meshes of chunks that are no longer live are retired first. Then every
    /// live chunk without a cached mesh is meshed, and live chunks that are
    /// already cached are promoted to most recently used. Every coordinate
    /// lands in at most one of `meshed` and `retired`.
    pub fn sync(&mut self, chunk_manager: &ChunkManager) -> MeshSyncReport {
        let mut report = MeshSyncReport::default();

        let stale: Vec<Point3<i32>> = self
            .least_recently_meshed_chunks
            .iter()
            .map(|(position, _)| *position)
            .filter(|position| !chunk_manager.has_chunk(*position))
            .collect();

        for position in stale {
            self.least_recently_meshed_chunks.pop(&position);
            report.retired.push(position);
        }

        self.reserve(chunk_manager.chunk_count());

        for chunk in chunk_manager.loaded_chunks() {
            let position = chunk.position();
            if self.least_recently_meshed_chunks.get(&position).is_some() {
                continue;
            }

            self.least_recently_meshed_chunks.put(position, Mesh::greedy(chunk));
            report.meshed.push(position);
        }

        if !report.is_empty() {
            debug!(
                "Mesh sync: +{} -{} ({} cached)",
                report.meshed.len(),
                report.retired.len(),
                self.len()
            );
        }

        report
    }

    /// Grows the cache so it can hold `live_chunks` meshes at once.
    fn reserve(&mut self, live_chunks: usize) {
        let Some(required) = NonZeroUsize::new(live_chunks) else {
            return;
        };
        if required > self.least_recently_meshed_chunks.cap() {
            warn!(
                "{} live chunks exceed mesh cache capacity {}, growing cache",
                live_chunks,
                self.capacity()
            );
            self.least_recently_meshed_chunks.resize(required);
        }
    }

    /// The cached mesh for a chunk coordinate, without touching recency.
    pub fn mesh_for(&self, position: Point3<i32>) -> Option<&Mesh> {
        self.least_recently_meshed_chunks.peek(&position)
    }

    /// Number of cached meshes.
    pub fn len(&self) -> usize {
        self.least_recently_meshed_chunks.len()
    }

    /// Returns `true` if no meshes are cached.
    pub fn is_empty(&self) -> bool {
        self.least_recently_meshed_chunks.is_empty()
    }

    /// Maximum number of cached meshes.
    pub fn capacity(&self) -> usize {
        self.least_recently_meshed_chunks.cap().get()
    }

    /// Sum of vertex counts over every cached mesh.
    pub fn total_vertex_count(&self) -> usize {
        self.least_recently_meshed_chunks
            .iter()
            .map(|(_, mesh)| mesh.vertices.len())
            .sum()
    }

    /// Sum of index counts over every cached mesh.
    pub fn total_index_count(&self) -> usize {
        self.least_recently_meshed_chunks
            .iter()
            .map(|(_, mesh)| mesh.indices.len())
            .sum()
    }

    /// Drops every cached mesh.
    pub fn clear(&mut self) {
        self.least_recently_meshed_chunks.clear();
    }
}
