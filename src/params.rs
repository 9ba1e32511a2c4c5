//! Cloth configuration and the constants derived from it.
//!
//! `ClothParameters` is the sole user-facing configuration surface; every
//! downstream quantity (particle/vertex counts, masses, rest distance, buffer
//! sizes) is a pure function of it, recomputed by `DerivedConstants::resolve`
//! whenever the parameters change.

use anyhow::{bail, Result};
use glam::Vec3;

/// User-settable cloth configuration. Immutable once a simulation is built;
/// replacing it reinitializes everything downstream.
#[derive(Debug, Clone, PartialEq)]
pub struct ClothParameters {
    /// Particle count along the grid's first axis.
    pub width: u32,
    /// Particle count along the grid's second axis.
    pub height: u32,
    /// Invocations per compute workgroup; must match the kernel's
    /// `@workgroup_size`.
    pub particles_per_group: u32,

    /// Physical edge length of the cloth.
    pub scale: f32,
    /// Total mass = scale * mass_scale.
    pub mass_scale: f32,
    /// Upper spring stretch clamp, as a multiple of rest length.
    pub max_stretch: f32,
    /// Lower spring stretch clamp, as a multiple of rest length.
    pub min_stretch: f32,
    /// Strength of the structural springs to edge neighbours.
    pub close_spring_strength: f32,
    /// Strength of the shear/bend springs to diagonal and two-step neighbours.
    pub far_spring_strength: f32,

    pub wind_dir: Vec3,
    pub wind_strength: f32,

    /// Collision sphere radius.
    pub sphere_radius: f32,
    /// Half-period of the sphere's back-and-forth sweep.
    pub sphere_period: f32,
    /// Amplitude of the sweep along Z.
    pub sphere_range: f32,

    /// Integration time step.
    pub delta_t: f32,

    /// Seed the grid centered on the origin instead of growing from it.
    pub centered: bool,
}

impl Default for ClothParameters {
    fn default() -> Self {
        Self {
            width: 100,
            height: 100,
            particles_per_group: 64,
            scale: 1.0,
            mass_scale: 100.0,
            max_stretch: 1.1,
            min_stretch: 0.1,
            close_spring_strength: 73.0,
            far_spring_strength: 12.5,
            wind_dir: Vec3::new(0.0, 0.0, 1.0),
            wind_strength: 10.0,
            sphere_radius: 0.3,
            sphere_period: 150.0,
            sphere_range: 2.0,
            delta_t: 0.008,
            centered: false,
        }
    }
}

impl ClothParameters {
    /// Rejects configurations the simulation cannot be sized from. Runs
    /// before any device allocation so a failed reinitialization leaves no
    /// buffers half-built.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            bail!(
                "Cloth grid must have at least one particle per axis, got {}x{}",
                self.width,
                self.height
            );
        }
        if self.scale <= 0.0 {
            bail!("Cloth scale must be positive, got {}", self.scale);
        }
        if self.delta_t <= 0.0 {
            bail!("Time step must be positive, got {}", self.delta_t);
        }
        if self.sphere_period <= 0.0 {
            bail!("Sphere period must be positive, got {}", self.sphere_period);
        }
        if self.particles_per_group == 0 {
            bail!("Workgroup size must be positive");
        }
        Ok(())
    }
}

/// Simulation constants derived from `ClothParameters`. Never stored apart
/// from the parameters that produced them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedConstants {
    pub num_particles: u32,
    /// Two triangles per grid cell, three corners each.
    pub num_vertices: u32,
    pub total_mass: f32,
    pub particle_mass: f32,
    /// Rest distance between adjacent particles.
    pub particle_dist: f32,
}

impl DerivedConstants {
    pub fn resolve(params: &ClothParameters) -> Result<Self> {
        params.validate()?;

        let num_particles = params.width * params.height;
        let num_vertices = 6 * (params.width - 1) * (params.height - 1);
        let total_mass = params.scale * params.mass_scale;

        Ok(Self {
            num_particles,
            num_vertices,
            total_mass,
            particle_mass: total_mass / num_particles as f32,
            particle_dist: params.scale / params.height as f32,
        })
    }

    pub fn particle_buffer_size(&self) -> u64 {
        self.num_particles as u64 * std::mem::size_of::<crate::particle::ClothParticle>() as u64
    }

    pub fn vertex_buffer_size(&self) -> u64 {
        self.num_vertices as u64 * std::mem::size_of::<crate::particle::ClothVertex>() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_constants() {
        let params = ClothParameters {
            width: 4,
            height: 4,
            scale: 1.0,
            mass_scale: 100.0,
            ..ClothParameters::default()
        };
        let derived = DerivedConstants::resolve(&params).unwrap();

        assert_eq!(derived.num_particles, 16);
        assert_eq!(derived.num_vertices, 6 * 3 * 3);
        assert_eq!(derived.total_mass, 100.0);
        assert_eq!(derived.particle_mass, 100.0 / 16.0);
        assert_eq!(derived.particle_dist, 0.25);
    }

    #[test]
    fn test_mass_conservation() {
        let params = ClothParameters::default();
        let derived = DerivedConstants::resolve(&params).unwrap();

        let recombined = derived.particle_mass * derived.num_particles as f32;
        assert!((recombined - derived.total_mass).abs() < 1e-3);
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let params = ClothParameters::default();
        let first = DerivedConstants::resolve(&params).unwrap();
        let second = DerivedConstants::resolve(&params).unwrap();

        assert_eq!(first.num_particles, second.num_particles);
        assert_eq!(first.num_vertices, second.num_vertices);
        assert_eq!(first.total_mass.to_bits(), second.total_mass.to_bits());
        assert_eq!(first.particle_mass.to_bits(), second.particle_mass.to_bits());
        assert_eq!(first.particle_dist.to_bits(), second.particle_dist.to_bits());
    }

    #[test]
    fn test_rejects_empty_grid() {
        let params = ClothParameters {
            width: 0,
            ..ClothParameters::default()
        };
        assert!(DerivedConstants::resolve(&params).is_err());

        let params = ClothParameters {
            height: 0,
            ..ClothParameters::default()
        };
        assert!(DerivedConstants::resolve(&params).is_err());
    }

    #[test]
    fn test_rejects_non_positive_scale() {
        let params = ClothParameters {
            scale: 0.0,
            ..ClothParameters::default()
        };
        assert!(DerivedConstants::resolve(&params).is_err());

        let params = ClothParameters {
            scale: -1.0,
            ..ClothParameters::default()
        };
        assert!(DerivedConstants::resolve(&params).is_err());
    }

    #[test]
    fn test_buffer_sizes_track_counts() {
        let params = ClothParameters {
            width: 10,
            height: 8,
            ..ClothParameters::default()
        };
        let derived = DerivedConstants::resolve(&params).unwrap();

        assert_eq!(derived.particle_buffer_size(), 80 * 32);
        assert_eq!(derived.vertex_buffer_size(), (6 * 9 * 7) * 32);
    }
}
