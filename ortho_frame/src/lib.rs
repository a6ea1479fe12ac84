/*!
# Ortho Frame

Small helpers for real-time 3D rendering built on [`glam`].

## Architecture

- **OrthonormalFrame**: position plus forward/up basis, for cameras and objects
- **ViewFrustum**: perspective/orthographic volume, corners, planes and culling tests
- **Mesh**: CPU vertex list uploaded once to a [`GraphicsDevice`](ortho::render::GraphicsDevice)
- **Plane**: plane equation and segment intersection
- **PrettyPrint**: `(x, y, z)` style printing of vectors and matrices

Everything public lives under the [`ortho`] namespace module. Diagnostics go
through a process-wide logger configured with [`ortho::Diagnostics`].
*/

// Internal modules
mod error;
mod diagnostics;
pub mod log;
pub mod frame;
pub mod camera;
pub mod geometry;
pub mod graphics_device;
pub mod mesh;
pub mod utils;

// Main ortho namespace module
pub mod ortho {
    // Error types
    pub use crate::error::{Error, Result};

    // Diagnostics hub
    pub use crate::diagnostics::{Diagnostics, DiagnosticsConfig};

    // Frames
    pub use crate::frame::{OrthonormalFrame, RenormalizePolicy, ORTHONORMAL_EPSILON};

    // Frustum
    pub use crate::camera::{ViewFrustum, FrustumTest, Projection};

    // Geometry
    pub use crate::geometry::{Plane, SegmentHit};

    // Meshes
    pub use crate::mesh::{Mesh, MeshState};

    // Printing and parsing helpers
    pub use crate::utils::{Pretty, PrettyPrint, parse_vec3, parse_vec3_prefix, parse_vec3_list};

    // Logging sub-module (types only; the ortho_* macros live at the crate root)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Frustum corner and plane indices
    pub mod frustum {
        pub use crate::camera::*;
    }

    // Graphics device abstraction
    pub mod render {
        pub use crate::graphics_device::*;
    }
}

// Re-export math library at crate root
pub use glam;
