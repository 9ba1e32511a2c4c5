//! GPU cloth simulation.
//!
//! A rectangular cloth modeled as a mass-spring particle grid, integrated by
//! a compute kernel and expanded into renderable triangles on the device.
//! Particle state is double-buffered: each frame binds buffer `frame % 2` as
//! read-only input and the other as output, so the roles rotate without
//! copying. `ClothSim` in [`cloth`] drives the whole thing; the remaining
//! modules are its collaborators (parameters, buffers, uniforms, pipelines)
//! and the thin window/render shell around it.

pub mod buffers;
pub mod camera;
pub mod cloth;
pub mod gpu;
pub mod params;
pub mod particle;
pub mod pipeline;
pub mod renderer;
pub mod shaders;
pub mod uniforms;

pub use cloth::ClothSim;
pub use params::ClothParameters;
