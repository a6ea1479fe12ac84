/// Vertex array trait and vertex layout description

use std::sync::Arc;
use crate::graphics_device::{Buffer, BufferFormat};

/// One attribute sourced from the vertex buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    /// Shader attribute location
    pub location: u32,
    /// Element format
    pub format: BufferFormat,
    /// Byte offset of the first element
    pub offset: u32,
    /// Byte distance between consecutive vertices
    pub stride: u32,
}

/// Descriptor for creating a vertex array
#[derive(Clone)]
pub struct VertexArrayDesc {
    /// Buffer holding the vertex data
    pub vertex_buffer: Arc<dyn Buffer>,
    /// Attributes read from `vertex_buffer`
    pub attributes: Vec<VertexAttribute>,
}

impl VertexArrayDesc {
    /// Number of whole vertices the buffer holds for the first attribute
    pub fn vertex_capacity(&self) -> u64 {
        vertex_capacity(self.vertex_buffer.as_ref(), &self.attributes)
    }
}

/// Number of whole vertices `buffer` holds for the first of `attributes`
///
/// Returns 0 when there are no attributes or the stride is zero.
pub fn vertex_capacity(buffer: &dyn Buffer, attributes: &[VertexAttribute]) -> u64 {
    match attributes.first() {
        Some(attr) if attr.stride > 0 => {
            let size = buffer.size();
            let used = u64::from(attr.offset) + u64::from(attr.format.size_bytes());
            if size < used {
                0
            } else {
                (size - used) / u64::from(attr.stride) + 1
            }
        }
        _ => 0,
    }
}

/// Vertex array resource trait
///
/// Destroyed together with its GPU object when the last handle is dropped.
pub trait VertexArray: Send + Sync {
    /// The vertex buffer this array reads from
    fn vertex_buffer(&self) -> &Arc<dyn Buffer>;

    /// Attribute layout
    fn attributes(&self) -> &[VertexAttribute];

    /// Number of vertices that can be drawn from this array
    fn vertex_capacity(&self) -> u64 {
        vertex_capacity(self.vertex_buffer().as_ref(), self.attributes())
    }
}
