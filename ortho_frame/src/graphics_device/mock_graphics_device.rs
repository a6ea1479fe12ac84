/// Mock graphics device for unit tests (no GPU required)
///
/// Records every call as a command string and tracks live resources in a
/// slot map, so tests can observe uploads, draws and leaks.

use std::sync::{Arc, Mutex};
use slotmap::{new_key_type, SlotMap};
use crate::error::{Error, Result};
use crate::graphics_device::{
    GraphicsDevice, Buffer, BufferDesc, BufferUsage, VertexArray,
    VertexArrayDesc, VertexAttribute, PrimitiveTopology,
};

new_key_type! {
    /// Key of a live mock resource
    pub struct MockResourceKey;
}

/// Kind of resource tracked by the mock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockResourceKind {
    Buffer,
    VertexArray,
}

type LiveResources = Arc<Mutex<SlotMap<MockResourceKey, MockResourceKind>>>;

/// Removes its entry from the live set on drop
#[derive(Debug)]
struct LiveHandle {
    key: MockResourceKey,
    live: LiveResources,
}

impl LiveHandle {
    fn register(live: &LiveResources, kind: MockResourceKind) -> Self {
        let key = live
            .lock()
            .map(|mut resources| resources.insert(kind))
            .unwrap_or_default();
        Self { key, live: Arc::clone(live) }
    }
}

impl Drop for LiveHandle {
    fn drop(&mut self) {
        if let Ok(mut resources) = self.live.lock() {
            resources.remove(self.key);
        }
    }
}

// ============================================================================
// Mock Buffer
// ============================================================================

#[derive(Debug)]
pub struct MockBuffer {
    pub size: u64,
    pub usage: BufferUsage,
    _handle: LiveHandle,
}

impl Buffer for MockBuffer {
    fn size(&self) -> u64 {
        self.size
    }
}

// ============================================================================
// Mock VertexArray
// ============================================================================

pub struct MockVertexArray {
    vertex_buffer: Arc<dyn Buffer>,
    attributes: Vec<VertexAttribute>,
    _handle: LiveHandle,
}

impl VertexArray for MockVertexArray {
    fn vertex_buffer(&self) -> &Arc<dyn Buffer> {
        &self.vertex_buffer
    }

    fn attributes(&self) -> &[VertexAttribute] {
        &self.attributes
    }
}

// ============================================================================
// Mock GraphicsDevice
// ============================================================================

/// Graphics device that tracks created resources without a GPU
#[derive(Debug, Default)]
pub struct MockGraphicsDevice {
    /// Every call, in order (e.g. "create_buffer:36", "draw:Triangles:0:3")
    pub commands: Vec<String>,
    /// Bytes passed to each successful `create_buffer`
    pub uploads: Vec<Vec<u8>>,
    /// Make every allocation fail with `OutOfMemory`
    pub fail_allocations: bool,
    /// Make every draw fail with `BackendError`
    pub fail_draws: bool,
    pub(crate) live: LiveResources,
}

impl MockGraphicsDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of resources not yet dropped
    pub fn live_resource_count(&self) -> usize {
        self.live.lock().map(|live| live.len()).unwrap_or(0)
    }

    /// Number of buffers not yet dropped
    pub fn live_buffer_count(&self) -> usize {
        self.count_live(MockResourceKind::Buffer)
    }

    /// Number of vertex arrays not yet dropped
    pub fn live_vertex_array_count(&self) -> usize {
        self.count_live(MockResourceKind::VertexArray)
    }

    /// Number of recorded draw calls
    pub fn draw_count(&self) -> usize {
        self.commands.iter().filter(|cmd| cmd.starts_with("draw:")).count()
    }

    fn count_live(&self, kind: MockResourceKind) -> usize {
        self.live
            .lock()
            .map(|live| live.values().filter(|k| **k == kind).count())
            .unwrap_or(0)
    }
}

impl GraphicsDevice for MockGraphicsDevice {
    fn create_buffer(&mut self, desc: &BufferDesc, data: &[u8]) -> Result<Arc<dyn Buffer>> {
        self.commands.push(format!("create_buffer:{}", desc.size));
        if self.fail_allocations {
            return Err(Error::OutOfMemory);
        }
        if desc.size == 0 {
            return Err(Error::InvalidResource("buffer size must be non-zero".to_string()));
        }
        if data.len() as u64 > desc.size {
            return Err(Error::InvalidResource(format!(
                "initial data ({} bytes) larger than buffer ({} bytes)",
                data.len(), desc.size
            )));
        }

        self.uploads.push(data.to_vec());

        Ok(Arc::new(MockBuffer {
            size: desc.size,
            usage: desc.usage,
            _handle: LiveHandle::register(&self.live, MockResourceKind::Buffer),
        }))
    }

    fn create_vertex_array(&mut self, desc: &VertexArrayDesc) -> Result<Arc<dyn VertexArray>> {
        self.commands.push(format!("create_vertex_array:{}", desc.attributes.len()));
        if self.fail_allocations {
            return Err(Error::OutOfMemory);
        }
        if desc.attributes.is_empty() {
            return Err(Error::InvalidResource("vertex array needs at least one attribute".to_string()));
        }

        Ok(Arc::new(MockVertexArray {
            vertex_buffer: Arc::clone(&desc.vertex_buffer),
            attributes: desc.attributes.clone(),
            _handle: LiveHandle::register(&self.live, MockResourceKind::VertexArray),
        }))
    }

    fn draw(
        &mut self,
        vertex_array: &Arc<dyn VertexArray>,
        topology: PrimitiveTopology,
        first_vertex: u32,
        vertex_count: u32,
    ) -> Result<()> {
        self.commands.push(format!("draw:{:?}:{}:{}", topology, first_vertex, vertex_count));
        if self.fail_draws {
            return Err(Error::BackendError("mock draw failure".to_string()));
        }
        let end = u64::from(first_vertex) + u64::from(vertex_count);
        if end > vertex_array.vertex_capacity() {
            return Err(Error::BackendError(format!(
                "draw range {}..{} exceeds {} vertices",
                first_vertex, end, vertex_array.vertex_capacity()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "mock_graphics_device_tests.rs"]
mod tests;
