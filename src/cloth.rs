//! The cloth simulation driver.
//!
//! `ClothSim` owns every device resource of one simulation: the double-
//! buffered particle storage, the derived vertex buffer, the uniform block,
//! and the compute pipelines. Each `step` advances time, re-uploads the full
//! uniform block, rotates the particle buffers' input/output roles by frame
//! parity, and submits the two compute passes in a single command batch.

use anyhow::{anyhow, Result};
use wgpu::{BindGroup, ShaderModule};

use crate::buffers::BufferSet;
use crate::gpu::GpuContext;
use crate::params::{ClothParameters, DerivedConstants};
use crate::pipeline::ClothPipelines;
use crate::uniforms::ClothUniforms;

/// Frame counter and accumulated simulation time. Parity of the counter
/// selects which particle buffer is read and which is written.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameState {
    frame: u32,
    current_t: f32,
}

impl FrameState {
    pub fn new() -> Self {
        Self {
            frame: 0,
            current_t: 0.0,
        }
    }

    pub fn advance(&mut self, delta_t: f32) {
        self.frame += 1;
        self.current_t += delta_t;
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }

    pub fn current_t(&self) -> f32 {
        self.current_t
    }

    /// Buffer read by the current frame's physics pass.
    pub fn input_index(&self) -> usize {
        (self.frame % 2) as usize
    }

    /// Buffer the current frame's physics pass writes; still holds the state
    /// from two frames ago until overwritten.
    pub fn output_index(&self) -> usize {
        ((self.frame + 1) % 2) as usize
    }
}

impl Default for FrameState {
    fn default() -> Self {
        Self::new()
    }
}

/// Workgroups needed to cover `items` invocations, rounded up.
fn workgroup_count(items: u32, per_group: u32) -> u32 {
    (items + per_group - 1) / per_group
}

/// One cloth simulation instance. All device handles here are exclusively
/// owned; dropping the value releases bind groups, then pipelines and
/// layouts, then buffers (declaration order).
pub struct ClothSim {
    particle_bind_group: BindGroup,
    vertex_bind_group: BindGroup,
    pipelines: ClothPipelines,
    buffers: BufferSet,
    uniforms: ClothUniforms,
    params: ClothParameters,
    derived: DerivedConstants,
    state: FrameState,
}

impl ClothSim {
    /// Builds a complete simulation from validated parameters and a compiled
    /// compute module. Device-side failures (exhausted memory, a module whose
    /// entry points or bindings disagree with the host layouts) are caught by
    /// error scopes and surfaced here; on error nothing is left allocated.
    pub fn new(gpu: &GpuContext, params: ClothParameters, shader: &ShaderModule) -> Result<Self> {
        let derived = DerivedConstants::resolve(&params)?;
        let uniforms = ClothUniforms::new(&params, &derived);
        let state = FrameState::new();

        gpu.device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);
        gpu.device.push_error_scope(wgpu::ErrorFilter::Validation);

        let buffers = BufferSet::new(gpu, &params, &derived, &uniforms);
        let pipelines = ClothPipelines::new(gpu, shader);
        let particle_bind_group =
            pipelines.particle_bind_group(gpu, &buffers, state.input_index(), state.output_index());
        let vertex_bind_group = pipelines.vertex_bind_group(gpu, &buffers);

        if let Some(err) = pollster::block_on(gpu.device.pop_error_scope()) {
            return Err(anyhow!("Compute schema rejected by device: {err}"));
        }
        if let Some(err) = pollster::block_on(gpu.device.pop_error_scope()) {
            return Err(anyhow!("Out of device memory allocating cloth buffers: {err}"));
        }

        log::info!(
            "cloth initialized: {}x{} grid, {} particles, {} vertices",
            params.width,
            params.height,
            derived.num_particles,
            derived.num_vertices,
        );

        Ok(Self {
            particle_bind_group,
            vertex_bind_group,
            pipelines,
            buffers,
            uniforms,
            params,
            derived,
            state,
        })
    }

    /// Replaces this simulation with a freshly initialized one. The new
    /// resources are fully built first; if that fails, the current simulation
    /// is untouched and keeps running.
    pub fn reset(
        &mut self,
        gpu: &GpuContext,
        params: ClothParameters,
        shader: &ShaderModule,
    ) -> Result<()> {
        let next = Self::new(gpu, params, shader)?;
        *self = next;
        log::info!("cloth simulation reinitialized");
        Ok(())
    }

    /// Runs exactly one simulation step.
    ///
    /// Advance: bump the frame counter and simulation time, push the full
    /// uniform block, and rebind the particle buffers so `frame % 2` is the
    /// read-only input and `(frame + 1) % 2` the writable output.
    ///
    /// Dispatch: one command encoder, two compute passes (integration, then
    /// vertex expansion), one submit. The second pass reads the first pass's
    /// writes through the queue's ordering guarantees; the host never blocks.
    pub fn step(&mut self, gpu: &GpuContext) {
        self.state.advance(self.params.delta_t);

        self.uniforms.refresh(self.state.current_t(), &self.params);
        gpu.queue.write_buffer(
            self.buffers.uniform_buffer(),
            0,
            bytemuck::bytes_of(&self.uniforms),
        );

        self.particle_bind_group = self.pipelines.particle_bind_group(
            gpu,
            &self.buffers,
            self.state.input_index(),
            self.state.output_index(),
        );

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Cloth Step Encoder"),
            });

        {
            let mut pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some("Cloth Physics Pass"),
                timestamp_writes: None,
            });
            pass.set_pipeline(self.pipelines.physics_pipeline());
            pass.set_bind_group(0, &self.particle_bind_group, &[]);
            pass.set_bind_group(1, &self.vertex_bind_group, &[]);
            pass.dispatch_workgroups(
                workgroup_count(self.derived.num_particles, self.params.particles_per_group),
                1,
                1,
            );
        }

        {
            let mut pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some("Cloth Vertex Pass"),
                timestamp_writes: None,
            });
            pass.set_pipeline(self.pipelines.vertex_pipeline());
            pass.set_bind_group(0, &self.particle_bind_group, &[]);
            pass.set_bind_group(1, &self.vertex_bind_group, &[]);
            pass.dispatch_workgroups(
                workgroup_count(self.derived.num_vertices, self.params.particles_per_group),
                1,
                1,
            );
        }

        gpu.queue.submit(Some(encoder.finish()));
    }

    /// The geometry produced by the last `step`, for use as a read-only draw
    /// source.
    pub fn vertex_buffer(&self) -> &wgpu::Buffer {
        self.buffers.vertex_buffer()
    }

    pub fn vertex_count(&self) -> u32 {
        self.derived.num_vertices
    }

    pub fn params(&self) -> &ClothParameters {
        &self.params
    }

    pub fn frame(&self) -> u32 {
        self.state.frame()
    }

    pub fn current_t(&self) -> f32 {
        self.state.current_t()
    }
}
