//! Orbit camera for inspecting the cloth.
//!
//! Spherical coordinates around a fixed target; drag rotates, scroll zooms.

use glam::{Mat4, Vec3};

const FOV_DEGREES: f32 = 55.0;
const NEAR_PLANE: f32 = 0.05;
const FAR_PLANE: f32 = 200.0;
const MIN_PITCH: f32 = -1.45;
const MAX_PITCH: f32 = 1.45;
const MIN_DISTANCE: f32 = 0.2;

pub struct Camera {
    target: Vec3,
    distance: f32,
    yaw: f32,
    pitch: f32,
    aspect_ratio: f32,
    view_projection: Mat4,
}

impl Camera {
    pub fn new(aspect_ratio: f32, target: Vec3, distance: f32) -> Self {
        let mut camera = Self {
            target,
            distance,
            yaw: std::f32::consts::FRAC_PI_2,
            pitch: 0.3,
            aspect_ratio,
            view_projection: Mat4::IDENTITY,
        };
        camera.update_matrices();
        camera
    }

    pub fn rotate(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw += delta_yaw;
        self.pitch = (self.pitch + delta_pitch).clamp(MIN_PITCH, MAX_PITCH);
        self.update_matrices();
    }

    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance - delta).max(MIN_DISTANCE);
        self.update_matrices();
    }

    pub fn update_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio;
        self.update_matrices();
    }

    pub fn view_projection_array(&self) -> [[f32; 4]; 4] {
        self.view_projection.to_cols_array_2d()
    }

    fn update_matrices(&mut self) {
        let eye = self.target
            + self.distance
                * Vec3::new(
                    self.pitch.cos() * self.yaw.cos(),
                    self.pitch.sin(),
                    self.pitch.cos() * self.yaw.sin(),
                );
        let view = Mat4::look_at_rh(eye, self.target, Vec3::Y);
        let projection = Mat4::perspective_rh(
            FOV_DEGREES.to_radians(),
            self.aspect_ratio,
            NEAR_PLANE,
            FAR_PLANE,
        );
        self.view_projection = projection * view;
    }
}
