//! Mesh data structures for chunk surfaces.
//!
//! A `Mesh` is transient: it is produced on demand from a chunk snapshot and
//! handed to the renderer, which owns the GPU copy.

use cgmath::Point3;

use crate::engine_state::rendering::Vertex;
use crate::engine_state::voxels::chunk::Chunk;

use super::{face::Face, greedy};

/// Indices per quad: two triangles.
pub const INDICES_PER_FACE: usize = 6;
/// Vertices per quad.
pub const VERTICES_PER_FACE: usize = 4;

/// Triangulated surface of one chunk.
///
/// Every group of four vertices is one quad and every group of six indices
/// references only the four vertices of its own quad.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Vertex data, four per quad
    pub vertices: Vec<Vertex>,
    /// Index data, six per quad
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Creates a new, empty mesh.
    pub fn new() -> Self {
        Mesh::default()
    }

    /// Generates the greedy mesh of `chunk`.
    pub fn greedy(chunk: &Chunk) -> Self {
        greedy::greedy(chunk)
    }

    /// Returns `true` if the mesh has no geometry.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Number of quads in the mesh.
    pub fn quad_count(&self) -> usize {
        self.vertices.len() / VERTICES_PER_FACE
    }

    /// Appends one rectangle as a quad, positioned relative to `chunk_origin`.
    pub fn add_face(&mut self, face: &Face, chunk_origin: Point3<i32>) {
        let num_faces_generated = self.quad_count() as u32;
        self.vertices.extend(face.vertices(chunk_origin));
        self.indices
            .extend(Self::generate_face_indices(num_faces_generated));
    }

    /// Generates index data for a face, adjusted by the number of previously
    /// generated faces.
    ///
    /// The corners come counter-clockwise from outside, so `(0, 2, 1)` and
    /// `(0, 3, 2)` are both clockwise from outside. The pattern is fixed; the
    /// renderer's pipeline expects clockwise front faces.
    pub fn generate_face_indices(num_faces_generated: u32) -> [u32; INDICES_PER_FACE] {
        let base = num_faces_generated * VERTICES_PER_FACE as u32;
        [base, base + 2, base + 1, base, base + 3, base + 2]
    }
}
