//! Mesh module - CPU-side vertex lists uploaded once and drawn each frame.

mod mesh;

pub use mesh::{Mesh, MeshState};
