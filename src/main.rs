//! Main entry point for the cloth simulation application.
//!
//! Parses cloth parameters from the command line, initializes the GPU
//! context and simulation, then runs the winit event loop: one simulation
//! step per frame tick, a redraw consuming the resulting vertex buffer,
//! mouse orbit/zoom, `R` to reinitialize, `Q`/Escape to quit.

use clap::Parser;
use glam::Vec3;
use gpu_cloth::{
    gpu::GpuContext,
    renderer::Renderer,
    shaders,
    ClothParameters, ClothSim,
};
use std::{
    path::PathBuf,
    time::{Duration, Instant},
};
use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, Event, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::WindowBuilder,
};

const MOUSE_SENSITIVITY: f32 = 0.01;
const WINDOW_WIDTH: u32 = 1024;
const WINDOW_HEIGHT: u32 = 768;
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Parser, Debug)]
#[command(name = "cloth")]
#[command(about = "GPU mass-spring cloth simulation")]
struct Args {
    /// Particles along the first grid axis
    #[arg(long, default_value = "100")]
    width: u32,

    /// Particles along the second grid axis
    #[arg(long, default_value = "100")]
    height: u32,

    /// Physical edge length of the cloth
    #[arg(long, default_value = "1.0")]
    scale: f32,

    /// Total mass multiplier (total mass = scale * mass_scale)
    #[arg(long, default_value = "100.0")]
    mass_scale: f32,

    /// Wind force magnitude
    #[arg(long, default_value = "10.0")]
    wind_strength: f32,

    /// Collision sphere radius
    #[arg(long, default_value = "0.3")]
    sphere_radius: f32,

    /// Half-period of the sphere sweep, in simulation time
    #[arg(long, default_value = "150.0")]
    sphere_period: f32,

    /// Amplitude of the sphere sweep along Z
    #[arg(long, default_value = "2.0")]
    sphere_range: f32,

    /// Integration time step
    #[arg(long, default_value = "0.008")]
    dt: f32,

    /// Center the cloth grid on the origin
    #[arg(long)]
    centered: bool,

    /// Load the compute kernel from a file instead of the embedded one
    #[arg(long)]
    shader: Option<PathBuf>,
}

impl Args {
    fn cloth_parameters(&self) -> ClothParameters {
        ClothParameters {
            width: self.width,
            height: self.height,
            scale: self.scale,
            mass_scale: self.mass_scale,
            wind_strength: self.wind_strength,
            sphere_radius: self.sphere_radius,
            sphere_period: self.sphere_period,
            sphere_range: self.sphere_range,
            delta_t: self.dt,
            centered: self.centered,
            ..ClothParameters::default()
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let params = args.cloth_parameters();
    params.validate()?;

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("GPU Cloth")
        .with_inner_size(winit::dpi::PhysicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT))
        .build(&event_loop)?;

    let gpu = pollster::block_on(GpuContext::new())?;

    let shader = match &args.shader {
        Some(path) => shaders::load_compute_module(&gpu.device, path)?,
        None => shaders::compute_module(&gpu.device),
    };

    let mut sim = ClothSim::new(&gpu, params.clone(), &shader)?;
    let half = params.scale * 0.5;
    let camera_target = if params.centered {
        Vec3::ZERO
    } else {
        Vec3::new(half, half, 0.0)
    };
    let mut renderer = Renderer::new(&window, &gpu, camera_target)?;

    let mut last_step = Instant::now();
    let mut mouse_pressed = false;
    let mut last_mouse_pos = PhysicalPosition::new(0.0, 0.0);

    event_loop.run(move |event, elwt| {
        elwt.set_control_flow(ControlFlow::Poll);

        match event {
            Event::AboutToWait => {
                if last_step.elapsed() >= FRAME_INTERVAL {
                    last_step = Instant::now();
                    sim.step(&gpu);
                    window.request_redraw();
                }
            }
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => elwt.exit(),
                WindowEvent::Resized(physical_size) => {
                    renderer.resize(&gpu, physical_size);
                }
                WindowEvent::MouseInput { state, button, .. } => {
                    if button == MouseButton::Left {
                        mouse_pressed = state == ElementState::Pressed;
                    }
                }
                WindowEvent::CursorMoved { position, .. } => {
                    if mouse_pressed {
                        let delta_x = (position.x - last_mouse_pos.x) as f32 * MOUSE_SENSITIVITY;
                        let delta_y = (position.y - last_mouse_pos.y) as f32 * MOUSE_SENSITIVITY;
                        renderer.camera_mut().rotate(delta_x, -delta_y);
                    }
                    last_mouse_pos = position;
                }
                WindowEvent::MouseWheel { delta, .. } => {
                    let scroll = match delta {
                        MouseScrollDelta::LineDelta(_, y) => y * 0.2,
                        MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.01,
                    };
                    renderer.camera_mut().zoom(-scroll);
                }
                WindowEvent::KeyboardInput {
                    event:
                        KeyEvent {
                            physical_key,
                            state: ElementState::Pressed,
                            ..
                        },
                    ..
                } => {
                    if let winit::keyboard::PhysicalKey::Code(code) = physical_key {
                        match code {
                            winit::keyboard::KeyCode::KeyQ | winit::keyboard::KeyCode::Escape => {
                                elwt.exit();
                            }
                            winit::keyboard::KeyCode::KeyR => {
                                if let Err(e) = sim.reset(&gpu, params.clone(), &shader) {
                                    log::error!("reset failed, keeping current cloth: {e:#}");
                                }
                            }
                            _ => {}
                        }
                    }
                }
                WindowEvent::RedrawRequested => {
                    match renderer.render(&gpu, sim.vertex_buffer(), sim.vertex_count()) {
                        Ok(_) => {}
                        Err(wgpu::SurfaceError::Lost) => renderer.resize(&gpu, window.inner_size()),
                        Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                        Err(e) => log::warn!("render error: {e:?}"),
                    }
                }
                _ => {}
            },
            _ => {}
        }
    })?;

    Ok(())
}
