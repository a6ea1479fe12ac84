/// Tests for Mesh
///
/// These tests drive Mesh through MockGraphicsDevice and validate the
/// upload state machine, the uploaded bytes and resource release.

use glam::Vec3;
use super::*;
use crate::graphics_device::Buffer;
use crate::graphics_device::mock_graphics_device::MockGraphicsDevice;

// ============================================================================
// Helper Functions
// ============================================================================

fn triangle() -> Mesh {
    let mut mesh = Mesh::new(PrimitiveTopology::Triangles).with_name("triangle");
    mesh.add_vertex(Vec3::new(0.0, 0.0, 0.0)).unwrap();
    mesh.add_vertex(Vec3::new(1.0, 0.0, 0.0)).unwrap();
    mesh.add_vertex(Vec3::new(0.0, 1.0, 0.0)).unwrap();
    mesh
}

// ============================================================================
// CPU side
// ============================================================================

#[test]
fn test_default_mesh() {
    let mesh = Mesh::default();
    assert_eq!(mesh.topology(), PrimitiveTopology::Points);
    assert_eq!(mesh.vertex_count(), 0);
    assert_eq!(mesh.state(), MeshState::CpuOnly);
    assert!(!mesh.is_uploaded());
    assert!(mesh.vertex_array().is_none());
}

#[test]
fn test_add_vertex_keeps_insertion_order() {
    let mut mesh = Mesh::new(PrimitiveTopology::LineStrip);
    mesh.add_vertex_xyz(3.0, 0.0, 0.0).unwrap();
    mesh.add_vertex([1.0f32, 0.0, 0.0]).unwrap();
    mesh.extend_vertices([Vec3::Y, Vec3::Z]).unwrap();

    assert_eq!(
        mesh.vertices(),
        &[Vec3::new(3.0, 0.0, 0.0), Vec3::X, Vec3::Y, Vec3::Z]
    );
}

#[test]
fn test_with_name_and_topology() {
    let mut mesh = Mesh::new(PrimitiveTopology::Lines).with_name("axes");
    assert_eq!(mesh.name(), "axes");

    mesh.set_topology(PrimitiveTopology::LineLoop);
    assert_eq!(mesh.topology(), PrimitiveTopology::LineLoop);
}

#[test]
fn test_clear() {
    let mut mesh = triangle();
    mesh.clear().unwrap();
    assert_eq!(mesh.vertex_count(), 0);
}

#[test]
fn test_debug_output() {
    let text = format!("{:?}", triangle());
    assert!(text.contains("triangle"));
    assert!(text.contains("CpuOnly"));
}

// ============================================================================
// Upload
// ============================================================================

#[test]
fn test_end_uploads_positions() {
    let mut device = MockGraphicsDevice::new();
    let mut mesh = triangle();
    mesh.end(&mut device).unwrap();

    assert_eq!(mesh.state(), MeshState::GpuResident);
    assert_eq!(device.commands, vec!["create_buffer:36", "create_vertex_array:1"]);
    assert_eq!(device.uploads.len(), 1);

    let floats: Vec<f32> = device.uploads[0]
        .chunks_exact(4)
        .map(|b| f32::from_ne_bytes([b[0], b[1], b[2], b[3]]))
        .collect();
    assert_eq!(floats, vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
}

#[test]
fn test_end_binds_position_attribute() {
    let mut device = MockGraphicsDevice::new();
    let mut mesh = triangle();
    mesh.end(&mut device).unwrap();

    let vertex_array = mesh.vertex_array().unwrap();
    let attributes = vertex_array.attributes();
    assert_eq!(attributes.len(), 1);
    assert_eq!(attributes[0].location, 0);
    assert_eq!(attributes[0].format, BufferFormat::R32G32B32_SFLOAT);
    assert_eq!(attributes[0].offset, 0);
    assert_eq!(attributes[0].stride, 12);
    assert_eq!(vertex_array.vertex_buffer().size(), 36);
    assert_eq!(vertex_array.vertex_capacity(), 3);
}

#[test]
fn test_end_twice_fails_without_leaking() {
    let mut device = MockGraphicsDevice::new();
    let mut mesh = triangle();
    mesh.end(&mut device).unwrap();

    let result = mesh.end(&mut device);
    assert!(matches!(result, Err(Error::InvalidState(_))));
    assert_eq!(device.live_buffer_count(), 1);
    assert_eq!(device.live_vertex_array_count(), 1);
    assert_eq!(device.commands.len(), 2);
}

#[test]
fn test_end_empty_mesh_fails() {
    let mut device = MockGraphicsDevice::new();
    let mut mesh = Mesh::default();

    assert!(matches!(mesh.end(&mut device), Err(Error::InvalidResource(_))));
    assert!(device.commands.is_empty());
    assert_eq!(mesh.state(), MeshState::CpuOnly);
}

#[test]
fn test_end_propagates_device_error() {
    let mut device = MockGraphicsDevice { fail_allocations: true, ..Default::default() };
    let mut mesh = triangle();

    assert!(matches!(mesh.end(&mut device), Err(Error::OutOfMemory)));
    assert!(!mesh.is_uploaded());
}

#[test]
fn test_editing_uploaded_mesh_fails() {
    let mut device = MockGraphicsDevice::new();
    let mut mesh = triangle();
    mesh.end(&mut device).unwrap();

    assert!(matches!(mesh.add_vertex(Vec3::ONE), Err(Error::InvalidState(_))));
    assert!(mesh.extend_vertices([Vec3::ONE]).is_err());
    assert!(mesh.clear().is_err());
    assert_eq!(mesh.vertex_count(), 3);
}

// ============================================================================
// Draw
// ============================================================================

#[test]
fn test_draw_uses_topology_and_count() {
    let mut device = MockGraphicsDevice::new();
    let mut mesh = triangle();
    mesh.end(&mut device).unwrap();

    mesh.draw(&mut device).unwrap();
    mesh.draw(&mut device).unwrap();

    assert_eq!(device.draw_count(), 2);
    assert_eq!(device.commands.last().unwrap(), "draw:Triangles:0:3");
}

#[test]
fn test_draw_after_topology_change() {
    let mut device = MockGraphicsDevice::new();
    let mut mesh = triangle();
    mesh.end(&mut device).unwrap();
    mesh.set_topology(PrimitiveTopology::LineLoop);

    mesh.draw(&mut device).unwrap();
    assert_eq!(device.commands.last().unwrap(), "draw:LineLoop:0:3");
}

#[test]
fn test_draw_before_end_fails() {
    let mut device = MockGraphicsDevice::new();
    let mesh = triangle();

    assert!(matches!(mesh.draw(&mut device), Err(Error::InvalidState(_))));
    assert_eq!(device.draw_count(), 0);
}

#[test]
fn test_draw_propagates_device_error() {
    let mut device = MockGraphicsDevice::new();
    let mut mesh = triangle();
    mesh.end(&mut device).unwrap();
    device.fail_draws = true;

    assert!(matches!(mesh.draw(&mut device), Err(Error::BackendError(_))));
}

// ============================================================================
// Release
// ============================================================================

#[test]
fn test_release_frees_gpu_objects() {
    let mut device = MockGraphicsDevice::new();
    let mut mesh = triangle();
    mesh.end(&mut device).unwrap();
    assert_eq!(device.live_resource_count(), 2);

    assert!(mesh.release());
    assert_eq!(device.live_resource_count(), 0);
    assert_eq!(mesh.state(), MeshState::CpuOnly);
    assert!(!mesh.release());
}

#[test]
fn test_release_then_reupload() {
    let mut device = MockGraphicsDevice::new();
    let mut mesh = triangle();
    mesh.end(&mut device).unwrap();
    mesh.release();

    mesh.add_vertex(Vec3::ONE).unwrap();
    mesh.end(&mut device).unwrap();

    assert_eq!(device.uploads.last().unwrap().len(), 48);
    assert_eq!(device.live_resource_count(), 2);
}

#[test]
fn test_drop_frees_gpu_objects() {
    let mut device = MockGraphicsDevice::new();
    {
        let mut mesh = triangle();
        mesh.end(&mut device).unwrap();
        assert_eq!(device.live_resource_count(), 2);
    }
    assert_eq!(device.live_resource_count(), 0);
}
