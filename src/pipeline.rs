//! Compute pipeline and bind-group construction.
//!
//! Binding numbers, entry-point names, and buffer struct layouts here form
//! the shared schema with `src/shaders/cloth_compute.wgsl`; any change must be
//! made on both sides at once.

use wgpu::{BindGroup, BindGroupLayout, ComputePipeline, ShaderModule};

use crate::buffers::BufferSet;
use crate::gpu::GpuContext;
use crate::uniforms::ClothUniforms;

/// Entry point integrating particle state.
pub const PHYSICS_ENTRY_POINT: &str = "main";
/// Entry point expanding particles into renderable triangles.
pub const VERTEX_ENTRY_POINT: &str = "particle_to_vertex";

/// The two compute pipelines and the layouts their bind groups are built
/// from. Layouts are bound to buffer *shapes*; the bind groups themselves
/// reference concrete buffer handles and are rebuilt whenever those change.
pub struct ClothPipelines {
    particle_layout: BindGroupLayout,
    vertex_layout: BindGroupLayout,
    physics_pipeline: ComputePipeline,
    vertex_pipeline: ComputePipeline,
}

impl ClothPipelines {
    pub fn new(gpu: &GpuContext, shader: &ShaderModule) -> Self {
        let particle_layout = Self::create_particle_layout(gpu);
        let vertex_layout = Self::create_vertex_layout(gpu);

        let pipeline_layout = gpu
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Cloth Pipeline Layout"),
                bind_group_layouts: &[&particle_layout, &vertex_layout],
                push_constant_ranges: &[],
            });

        let physics_pipeline =
            gpu.device
                .create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
                    label: Some("Cloth Physics Pipeline"),
                    layout: Some(&pipeline_layout),
                    module: shader,
                    entry_point: PHYSICS_ENTRY_POINT,
                });

        let vertex_pipeline =
            gpu.device
                .create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
                    label: Some("Cloth Vertex Pipeline"),
                    layout: Some(&pipeline_layout),
                    module: shader,
                    entry_point: VERTEX_ENTRY_POINT,
                });

        Self {
            particle_layout,
            vertex_layout,
            physics_pipeline,
            vertex_pipeline,
        }
    }

    pub fn physics_pipeline(&self) -> &ComputePipeline {
        &self.physics_pipeline
    }

    pub fn vertex_pipeline(&self) -> &ComputePipeline {
        &self.vertex_pipeline
    }

    /// Group 0: uniforms plus the particle buffers with their current roles.
    /// `input` is bound read-only, `output` writable; callers pass the frame
    /// parity so the roles rotate without copying particle data.
    pub fn particle_bind_group(
        &self,
        gpu: &GpuContext,
        buffers: &BufferSet,
        input: usize,
        output: usize,
    ) -> BindGroup {
        gpu.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Cloth Particle Bind Group"),
            layout: &self.particle_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffers.uniform_buffer().as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: buffers.particle_buffer(input).as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: buffers.particle_buffer(output).as_entire_binding(),
                },
            ],
        })
    }

    /// Group 1: the vertex buffer the second pass writes.
    pub fn vertex_bind_group(&self, gpu: &GpuContext, buffers: &BufferSet) -> BindGroup {
        gpu.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Cloth Vertex Bind Group"),
            layout: &self.vertex_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffers.vertex_buffer().as_entire_binding(),
            }],
        })
    }

    fn create_particle_layout(gpu: &GpuContext) -> BindGroupLayout {
        gpu.device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Cloth Particle Bind Group Layout"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::COMPUTE,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: wgpu::BufferSize::new(
                                std::mem::size_of::<ClothUniforms>() as u64,
                            ),
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::COMPUTE,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Storage { read_only: true },
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 2,
                        visibility: wgpu::ShaderStages::COMPUTE,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Storage { read_only: false },
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    },
                ],
            })
    }

    fn create_vertex_layout(gpu: &GpuContext) -> BindGroupLayout {
        gpu.device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Cloth Vertex Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Storage { read_only: false },
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            })
    }
}
