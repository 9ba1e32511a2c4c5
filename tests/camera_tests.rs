use glam::Vec3;
use gpu_cloth::camera::Camera;

#[test]
fn test_camera_matrix_is_finite() {
    let camera = Camera::new(16.0 / 9.0, Vec3::ZERO, 3.0);
    let matrix = camera.view_projection_array();

    for row in &matrix {
        for &val in row {
            assert!(val.is_finite());
        }
    }
}

#[test]
fn test_camera_rotation_changes_matrix() {
    let reference = Camera::new(16.0 / 9.0, Vec3::ZERO, 3.0);
    let mut moved = Camera::new(16.0 / 9.0, Vec3::ZERO, 3.0);

    moved.rotate(std::f32::consts::FRAC_PI_4, 0.1);

    assert_ne!(reference.view_projection_array(), moved.view_projection_array());
}

#[test]
fn test_camera_zoom_changes_matrix() {
    let reference = Camera::new(16.0 / 9.0, Vec3::ZERO, 3.0);
    let mut moved = Camera::new(16.0 / 9.0, Vec3::ZERO, 3.0);

    moved.zoom(-2.0);

    assert_ne!(reference.view_projection_array(), moved.view_projection_array());
}

#[test]
fn test_camera_pitch_is_clamped() {
    let mut camera = Camera::new(1.0, Vec3::ZERO, 3.0);

    // Drag far past vertical; the matrix must stay well-formed.
    camera.rotate(0.0, 100.0);
    let matrix = camera.view_projection_array();
    for row in &matrix {
        for &val in row {
            assert!(val.is_finite());
        }
    }
}
