//! Device buffer ownership for one cloth simulation.
//!
//! Buffer byte sizes are always `count * sizeof(entity)` for the constants
//! they were built from; a parameter change allocates a whole new set.

use wgpu::{util::DeviceExt, Buffer};

use crate::gpu::GpuContext;
use crate::params::{ClothParameters, DerivedConstants};
use crate::particle;
use crate::uniforms::ClothUniforms;

/// The four device buffers owned by a simulation: two particle buffers that
/// alternate input/output roles across frames, the vertex buffer the second
/// compute pass fills, and the uniform block.
pub struct BufferSet {
    particle_buffers: [Buffer; 2],
    vertex_buffer: Buffer,
    uniform_buffer: Buffer,
}

impl BufferSet {
    /// Allocates and seeds all buffers. Both particle buffers receive the
    /// same initial grid so either can serve as the first frame's input.
    pub fn new(
        gpu: &GpuContext,
        params: &ClothParameters,
        derived: &DerivedConstants,
        uniforms: &ClothUniforms,
    ) -> Self {
        let seed = particle::seed_grid(params, derived);
        let seed_bytes: &[u8] = bytemuck::cast_slice(&seed);

        let particle_buffers = [
            Self::create_particle_buffer(gpu, "Cloth Particle Buffer 0", seed_bytes),
            Self::create_particle_buffer(gpu, "Cloth Particle Buffer 1", seed_bytes),
        ];

        let vertex_buffer = gpu.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Cloth Vertex Buffer"),
            size: derived.vertex_buffer_size(),
            usage: wgpu::BufferUsages::STORAGE
                | wgpu::BufferUsages::VERTEX
                | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let uniform_buffer = gpu.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Cloth Uniform Buffer"),
            contents: bytemuck::bytes_of(uniforms),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        log::debug!(
            "allocated cloth buffers: 2 x {} B particles, {} B vertices, {} B uniforms",
            derived.particle_buffer_size(),
            derived.vertex_buffer_size(),
            std::mem::size_of::<ClothUniforms>(),
        );

        Self {
            particle_buffers,
            vertex_buffer,
            uniform_buffer,
        }
    }

    pub fn particle_buffer(&self, index: usize) -> &Buffer {
        &self.particle_buffers[index]
    }

    pub fn vertex_buffer(&self) -> &Buffer {
        &self.vertex_buffer
    }

    pub fn uniform_buffer(&self) -> &Buffer {
        &self.uniform_buffer
    }

    fn create_particle_buffer(gpu: &GpuContext, label: &str, seed: &[u8]) -> Buffer {
        gpu.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: seed,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
        })
    }
}

impl Drop for BufferSet {
    // Frees device memory eagerly instead of waiting for all queue-held
    // references to unwind. Bind groups referencing these buffers are dropped
    // by the owning simulation before the set itself.
    fn drop(&mut self) {
        for buffer in &self.particle_buffers {
            buffer.destroy();
        }
        self.vertex_buffer.destroy();
        self.uniform_buffer.destroy();
    }
}
