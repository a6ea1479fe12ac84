//! Position-only mesh with an explicit upload state.
//!
//! A `Mesh` collects vertex positions on the CPU, uploads them once with
//! [`Mesh::end`] and is then drawn every frame with [`Mesh::draw`].
//!
//! ```text
//! CpuOnly ──end()──▶ GpuResident ──draw()──▶ (draw call)
//!    ▲                    │
//!    └─────release()──────┘
//! ```
//!
//! GPU objects are owned through `Arc` handles, so dropping the mesh (or
//! calling `release`) frees them. Uploading twice is refused instead of
//! silently recreating buffers.

use std::fmt;
use std::sync::Arc;
use glam::Vec3;
use crate::error::{Error, Result};
use crate::graphics_device::{
    GraphicsDevice, BufferDesc, BufferUsage, BufferFormat,
    VertexArray, VertexArrayDesc, VertexAttribute, PrimitiveTopology,
};

const SOURCE: &str = "ortho::Mesh";

/// Attribute location of vertex positions
const POSITION_LOCATION: u32 = 0;

/// Where the vertex data of a mesh currently lives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshState {
    /// Vertices are editable, nothing allocated on the GPU
    CpuOnly,
    /// Vertices are uploaded and frozen until `release`
    GpuResident,
}

/// GPU objects backing an uploaded mesh
struct GpuMesh {
    vertex_array: Arc<dyn VertexArray>,
    vertex_count: u32,
}

/// Ordered list of vertex positions with a primitive topology
pub struct Mesh {
    name: String,
    vertices: Vec<Vec3>,
    topology: PrimitiveTopology,
    gpu: Option<GpuMesh>,
}

impl Mesh {
    /// Create an empty mesh drawn with `topology`
    pub fn new(topology: PrimitiveTopology) -> Self {
        Self {
            name: String::from("mesh"),
            vertices: Vec::new(),
            topology,
            gpu: None,
        }
    }

    /// Set the name used in log messages
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    // ===== ACCESSORS =====

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn topology(&self) -> PrimitiveTopology {
        self.topology
    }

    /// Change the topology used by subsequent draws
    ///
    /// Allowed in both states since the topology is not part of the upload.
    pub fn set_topology(&mut self, topology: PrimitiveTopology) {
        self.topology = topology;
    }

    pub fn state(&self) -> MeshState {
        if self.gpu.is_some() {
            MeshState::GpuResident
        } else {
            MeshState::CpuOnly
        }
    }

    pub fn is_uploaded(&self) -> bool {
        self.gpu.is_some()
    }

    /// Vertex array of the uploaded mesh, if any
    pub fn vertex_array(&self) -> Option<&Arc<dyn VertexArray>> {
        self.gpu.as_ref().map(|gpu| &gpu.vertex_array)
    }

    // ===== EDITING =====

    /// Append one vertex position
    ///
    /// # Errors
    ///
    /// `InvalidState` once the mesh is GPU-resident.
    pub fn add_vertex(&mut self, point: impl Into<Vec3>) -> Result<()> {
        self.ensure_editable()?;
        self.vertices.push(point.into());
        Ok(())
    }

    pub fn add_vertex_xyz(&mut self, x: f32, y: f32, z: f32) -> Result<()> {
        self.add_vertex(Vec3::new(x, y, z))
    }

    /// Append every position of `points`, in order
    pub fn extend_vertices<I>(&mut self, points: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<Vec3>,
    {
        self.ensure_editable()?;
        self.vertices.extend(points.into_iter().map(Into::into));
        Ok(())
    }

    /// Remove all vertices
    pub fn clear(&mut self) -> Result<()> {
        self.ensure_editable()?;
        self.vertices.clear();
        Ok(())
    }

    fn ensure_editable(&self) -> Result<()> {
        if self.gpu.is_some() {
            crate::ortho_bail!(SOURCE, Error::InvalidState(format!(
                "mesh '{}' is GPU-resident; release it before editing",
                self.name
            )));
        }
        Ok(())
    }

    // ===== GPU =====

    /// Upload the vertices as one static vertex buffer
    ///
    /// Positions are packed as tightly laid out `3 × f32` and bound to
    /// attribute location 0.
    ///
    /// # Errors
    ///
    /// - `InvalidState` when the mesh is already uploaded
    /// - `InvalidResource` when the mesh has no vertices
    /// - any error raised by the device (`OutOfMemory`, `BackendError`, ...)
    pub fn end(&mut self, device: &mut dyn GraphicsDevice) -> Result<()> {
        if self.gpu.is_some() {
            crate::ortho_bail!(SOURCE, Error::InvalidState(format!(
                "mesh '{}' already uploaded",
                self.name
            )));
        }
        if self.vertices.is_empty() {
            crate::ortho_bail!(SOURCE, Error::InvalidResource(format!(
                "mesh '{}' has no vertices to upload",
                self.name
            )));
        }
        let vertex_count = match u32::try_from(self.vertices.len()) {
            Ok(count) => count,
            Err(_) => crate::ortho_bail!(SOURCE, Error::InvalidResource(format!(
                "mesh '{}' has too many vertices ({})",
                self.name,
                self.vertices.len()
            ))),
        };

        let bytes: &[u8] = bytemuck::cast_slice(&self.vertices);
        let format = BufferFormat::R32G32B32_SFLOAT;

        let buffer_desc = BufferDesc {
            size: bytes.len() as u64,
            usage: BufferUsage::Vertex,
        };
        let vertex_buffer = device.create_buffer(&buffer_desc, bytes).map_err(|err| {
            crate::ortho_error!(SOURCE, "Vertex buffer for mesh '{}' failed: {}", self.name, err);
            err
        })?;

        let vertex_array_desc = VertexArrayDesc {
            vertex_buffer,
            attributes: vec![VertexAttribute {
                location: POSITION_LOCATION,
                format,
                offset: 0,
                stride: format.size_bytes(),
            }],
        };
        let vertex_array = device.create_vertex_array(&vertex_array_desc).map_err(|err| {
            crate::ortho_error!(SOURCE, "Vertex array for mesh '{}' failed: {}", self.name, err);
            err
        })?;

        self.gpu = Some(GpuMesh { vertex_array, vertex_count });

        crate::ortho_debug!(
            SOURCE,
            "Uploaded mesh '{}': {} vertices ({} bytes, {:?})",
            self.name, vertex_count, bytes.len(), self.topology
        );
        Ok(())
    }

    /// Draw every uploaded vertex with the current topology
    ///
    /// # Errors
    ///
    /// `InvalidState` when the mesh has not been uploaded, or the device error.
    pub fn draw(&self, device: &mut dyn GraphicsDevice) -> Result<()> {
        let gpu = match &self.gpu {
            Some(gpu) => gpu,
            None => crate::ortho_bail!(SOURCE, Error::InvalidState(format!(
                "mesh '{}' drawn before end()",
                self.name
            ))),
        };

        crate::ortho_trace!(
            SOURCE,
            "Draw mesh '{}': {} vertices as {:?}",
            self.name, gpu.vertex_count, self.topology
        );
        device.draw(&gpu.vertex_array, self.topology, 0, gpu.vertex_count)
    }

    /// Drop the GPU objects and make the mesh editable again
    ///
    /// Returns `true` if something was released.
    pub fn release(&mut self) -> bool {
        match self.gpu.take() {
            Some(gpu) => {
                crate::ortho_debug!(
                    SOURCE,
                    "Released mesh '{}' ({} vertices)",
                    self.name, gpu.vertex_count
                );
                true
            }
            None => false,
        }
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new(PrimitiveTopology::default())
    }
}

impl fmt::Debug for Mesh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mesh")
            .field("name", &self.name)
            .field("vertices", &self.vertices.len())
            .field("topology", &self.topology)
            .field("state", &self.state())
            .finish()
    }
}

#[cfg(test)]
#[path = "mesh_tests.rs"]
mod tests;
