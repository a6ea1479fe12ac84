/// Graphics device module - the minimal GPU surface meshes draw through

// Module declarations
pub mod graphics_device;
pub mod buffer;
pub mod vertex_array;

// Re-export everything from graphics_device.rs
pub use graphics_device::*;

// Re-export from other modules
pub use buffer::*;
pub use vertex_array::*;

// Mock graphics device for tests (no GPU required)
#[cfg(test)]
pub mod mock_graphics_device;
