/// GraphicsDevice trait and primitive topology

use std::sync::Arc;
use crate::error::Result;
use crate::graphics_device::{Buffer, BufferDesc, VertexArray, VertexArrayDesc};

/// How a run of vertices is assembled into primitives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrimitiveTopology {
    /// One point per vertex
    #[default]
    Points,
    /// Independent segments, two vertices each
    Lines,
    /// Connected segments
    LineStrip,
    /// Connected segments closed back to the first vertex
    LineLoop,
    /// Independent triangles, three vertices each
    Triangles,
    /// Triangles sharing an edge with the previous one
    TriangleStrip,
    /// Triangles sharing the first vertex
    TriangleFan,
}

/// Backend-agnostic graphics device
///
/// Implemented by the rendering backend (OpenGL, Vulkan, ...). Resources it
/// hands out are reference counted and release their GPU memory when the
/// last handle is dropped.
pub trait GraphicsDevice: Send + Sync {
    /// Create a buffer and fill it with `data`
    ///
    /// # Arguments
    ///
    /// * `desc` - Size and usage of the buffer
    /// * `data` - Initial contents, at most `desc.size` bytes
    fn create_buffer(&mut self, desc: &BufferDesc, data: &[u8]) -> Result<Arc<dyn Buffer>>;

    /// Create a vertex array binding a vertex buffer to attribute locations
    fn create_vertex_array(&mut self, desc: &VertexArrayDesc) -> Result<Arc<dyn VertexArray>>;

    /// Issue a non-indexed draw call
    ///
    /// # Arguments
    ///
    /// * `vertex_array` - Vertex array to source vertices from
    /// * `topology` - How vertices form primitives
    /// * `first_vertex` - Index of the first vertex to draw
    /// * `vertex_count` - Number of vertices to draw
    fn draw(
        &mut self,
        vertex_array: &Arc<dyn VertexArray>,
        topology: PrimitiveTopology,
        first_vertex: u32,
        vertex_count: u32,
    ) -> Result<()>;
}
