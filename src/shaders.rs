//! Shader module loading.
//!
//! The compute kernel normally ships embedded in the binary; a path-based
//! loader exists so a modified kernel can be supplied without rebuilding.
//! Either way the module must expose the two entry points named in
//! `crate::pipeline` — drift is caught at pipeline creation.

use anyhow::{Context, Result};
use std::path::Path;
use wgpu::{Device, ShaderModule};

pub const CLOTH_COMPUTE_WGSL: &str = include_str!("shaders/cloth_compute.wgsl");
pub const CLOTH_RENDER_WGSL: &str = include_str!("shaders/cloth_render.wgsl");

/// The embedded compute kernel.
pub fn compute_module(device: &Device) -> ShaderModule {
    module_from_source(device, "Cloth Compute Shader", CLOTH_COMPUTE_WGSL)
}

/// A compute kernel read from `path` at startup.
pub fn load_compute_module(device: &Device, path: &Path) -> Result<ShaderModule> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read compute shader {}", path.display()))?;
    log::info!("loaded compute shader from {}", path.display());
    Ok(module_from_source(device, "Cloth Compute Shader", &source))
}

/// The embedded render shader.
pub fn render_module(device: &Device) -> ShaderModule {
    module_from_source(device, "Cloth Render Shader", CLOTH_RENDER_WGSL)
}

fn module_from_source(device: &Device, label: &str, source: &str) -> ShaderModule {
    device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    })
}
