//! Simulation-global state mirrored to the compute kernel.
//!
//! Field order and padding match the WGSL `ClothUniforms` declaration; the
//! whole 80-byte block is re-uploaded every frame so no field can go stale.

use bytemuck::{Pod, Zeroable};

use crate::params::{ClothParameters, DerivedConstants};

/// Uniform block visible to both compute entry points.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct ClothUniforms {
    pub width: f32,
    pub height: f32,

    pub particle_dist: f32,
    pub particle_mass: f32,
    pub particle_scale: f32,

    pub close_spring_strength: f32,
    pub far_spring_strength: f32,
    pub max_stretch: f32,
    pub min_stretch: f32,

    pub wind_strength: f32,

    pub sphere_radius: f32,
    pub sphere_x: f32,
    pub sphere_y: f32,
    pub sphere_z: f32,

    pub delta_t: f32,
    pub current_t: f32,

    pub wind_dir: [f32; 3],
    pub _pad: f32, // vec3 rounds to 16 bytes in uniform layout
}

impl ClothUniforms {
    /// Populates every parameter-derived field; the time-varying fields start
    /// from the oscillator at t = 0.
    pub fn new(params: &ClothParameters, derived: &DerivedConstants) -> Self {
        let sphere = sphere_center(0.0, params.sphere_period, params.sphere_range);
        Self {
            width: params.width as f32,
            height: params.height as f32,
            particle_dist: derived.particle_dist,
            particle_mass: derived.particle_mass,
            particle_scale: params.scale,
            close_spring_strength: params.close_spring_strength,
            far_spring_strength: params.far_spring_strength,
            max_stretch: params.max_stretch,
            min_stretch: params.min_stretch,
            wind_strength: params.wind_strength,
            sphere_radius: params.sphere_radius,
            sphere_x: sphere[0],
            sphere_y: sphere[1],
            sphere_z: sphere[2],
            delta_t: params.delta_t,
            current_t: 0.0,
            wind_dir: params.wind_dir.to_array(),
            _pad: 0.0,
        }
    }

    /// Recomputes the time-varying fields for the given simulation time.
    pub fn refresh(&mut self, current_t: f32, params: &ClothParameters) {
        let sphere = sphere_center(current_t, params.sphere_period, params.sphere_range);
        self.current_t = current_t;
        self.sphere_x = sphere[0];
        self.sphere_y = sphere[1];
        self.sphere_z = sphere[2];
    }
}

/// Position of the collision sphere at simulation time `current_t`.
///
/// The Z component follows a triangle wave: phase is `current_t` folded into
/// `[-period, period)` and normalized, and the signed ramp
/// `range * (1 + sign * 2 * phase - 2)` sweeps `+range -> -range -> +range`
/// over one full cycle of `2 * period`.
pub fn sphere_center(current_t: f32, period: f32, range: f32) -> [f32; 3] {
    let phase = (current_t % (2.0 * period) - period) / period;
    let sign = if phase < 0.0 { -1.0 } else { 1.0 };
    let z = range * (1.0 + sign * (phase * 2.0) - 2.0);
    [0.0, 0.0, z]
}
