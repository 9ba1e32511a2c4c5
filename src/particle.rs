//! GPU-compatible particle and vertex representations.
//!
//! 32-byte aligned blocks matching the compute kernel's storage layout.
//! Particles are seeded on the host once per (re)initialization and mutated
//! only by the GPU afterwards; vertices are GPU-written only.

use bytemuck::{Pod, Zeroable};

use crate::params::{ClothParameters, DerivedConstants};

/// Cloth particle with GPU-aligned memory layout (32 bytes).
#[repr(C, align(16))]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct ClothParticle {
    pub position: [f32; 4], // xyz + padding
    pub velocity: [f32; 4], // xyz + padding
}

impl ClothParticle {
    pub fn at_rest(position: [f32; 3]) -> Self {
        Self {
            position: [position[0], position[1], position[2], 0.0],
            velocity: [0.0; 4],
        }
    }
}

/// Renderable cloth vertex (32 bytes). Derived from particle positions by the
/// particle-to-vertex pass each frame; the host never reads or writes these.
#[repr(C, align(16))]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct ClothVertex {
    pub position: [f32; 4],
    pub normal: [f32; 4],
}

/// Builds the initial particle grid: particle (x, y) sits at
/// `(x * dist, y * dist, 0)` with zero velocity, stored at index
/// `x * height + y`. With `centered` set, each axis is shifted by
/// `(count - 1) * dist / 2` so the grid straddles the origin.
pub fn seed_grid(params: &ClothParameters, derived: &DerivedConstants) -> Vec<ClothParticle> {
    let dist = derived.particle_dist;
    let (offset_x, offset_y) = if params.centered {
        (
            (params.width - 1) as f32 * dist * 0.5,
            (params.height - 1) as f32 * dist * 0.5,
        )
    } else {
        (0.0, 0.0)
    };

    let mut particles = Vec::with_capacity(derived.num_particles as usize);
    for x in 0..params.width {
        for y in 0..params.height {
            particles.push(ClothParticle::at_rest([
                x as f32 * dist - offset_x,
                y as f32 * dist - offset_y,
                0.0,
            ]));
        }
    }
    particles
}
