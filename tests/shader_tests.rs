use gpu_cloth::pipeline::{PHYSICS_ENTRY_POINT, VERTEX_ENTRY_POINT};
use gpu_cloth::shaders::{CLOTH_COMPUTE_WGSL, CLOTH_RENDER_WGSL};

#[test]
fn test_compute_shader_entry_points() {
    assert!(
        CLOTH_COMPUTE_WGSL.contains(&format!("fn {PHYSICS_ENTRY_POINT}(")),
        "Compute shader should define the physics entry point"
    );
    assert!(
        CLOTH_COMPUTE_WGSL.contains(&format!("fn {VERTEX_ENTRY_POINT}(")),
        "Compute shader should define the particle-to-vertex entry point"
    );
}

#[test]
fn test_compute_shader_bindings() {
    // Group 0: uniforms + particle in/out. Group 1: vertex output. These
    // numbers are the contract with src/pipeline.rs.
    assert!(CLOTH_COMPUTE_WGSL.contains("@group(0) @binding(0) var<uniform>"));
    assert!(CLOTH_COMPUTE_WGSL.contains("@group(0) @binding(1) var<storage, read>"));
    assert!(CLOTH_COMPUTE_WGSL.contains("@group(0) @binding(2) var<storage, read_write>"));
    assert!(CLOTH_COMPUTE_WGSL.contains("@group(1) @binding(0) var<storage, read_write>"));
}

#[test]
fn test_compute_shader_workgroup_size_matches_default() {
    let params = gpu_cloth::ClothParameters::default();
    let annotation = format!("@workgroup_size({})", params.particles_per_group);
    // Both entry points must dispatch with the size the host divides by.
    assert_eq!(
        CLOTH_COMPUTE_WGSL.matches(&annotation).count(),
        2,
        "Both compute entry points should declare {annotation}"
    );
}

#[test]
fn test_compute_shader_structs() {
    assert!(CLOTH_COMPUTE_WGSL.contains("struct ClothUniforms"));
    assert!(CLOTH_COMPUTE_WGSL.contains("struct Particle"));
    assert!(CLOTH_COMPUTE_WGSL.contains("struct Vertex"));
}

#[test]
fn test_render_shader_entry_points() {
    assert!(CLOTH_RENDER_WGSL.contains("@vertex"));
    assert!(CLOTH_RENDER_WGSL.contains("@fragment"));
    assert!(CLOTH_RENDER_WGSL.contains("fn vs_main"));
    assert!(CLOTH_RENDER_WGSL.contains("fn fs_main"));
}

#[test]
fn test_render_shader_vertex_attributes() {
    assert!(CLOTH_RENDER_WGSL.contains("@location(0) position"));
    assert!(CLOTH_RENDER_WGSL.contains("@location(1) normal"));
}
