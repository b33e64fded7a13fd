//! # Voxel Terrain Entry Point
//!
//! Calls into the library's `run()`.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release -- [config.json]
//! ```

fn main() {
    voxel_terrain::run();
}
