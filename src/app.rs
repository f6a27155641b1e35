use std::sync::Arc;

#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;
#[cfg(target_arch = "wasm32")]
use web_time::Instant;

use log::info;
use pixels::{Pixels, SurfaceTexture};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{MouseScrollDelta, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowId};

use crate::input::InputSnapshot;
use crate::renderer::Renderer;
use crate::simulation::Simulation;
use crate::vec2::Vec2;

/// One wheel line maps to this much scroll progress.
const SCROLL_LINE_STEP: f32 = 0.05;
const SCROLL_PIXEL_STEP: f32 = 1.0 / 800.0;

/// Window host for the simulation: owns the surface, the disc
/// simulation and the renderer, and translates window events into the
/// input snapshot the physics reads. Everything is torn down together
/// when the event loop exits.
pub struct Viewer<'win> {
    window: Option<Arc<Window>>,
    pixels: Option<Pixels<'win>>,
    simulation: Option<Simulation>,
    renderer: Renderer,
    input: InputSnapshot,
    seed: u64,
    initial_size: (u32, u32),
    last_frame: Instant,
    fps: f32,
    frame_times: Vec<f32>,
}

impl<'win> Viewer<'win> {
    pub fn new(renderer: Renderer, seed: u64, initial_size: (u32, u32)) -> Self {
        Self {
            window: None,
            pixels: None,
            simulation: None,
            renderer,
            // the desktop window has no scroll context; start fully
            // scrolled in so gravity and the spawn target are at 100%
            input: InputSnapshot {
                scroll_progress: 1.0,
                ..InputSnapshot::default()
            },
            seed,
            initial_size,
            last_frame: Instant::now(),
            fps: 0.0,
            frame_times: Vec::with_capacity(100),
        }
    }

    /// Adopt a pre-built window and surface. The wasm entry point uses
    /// this because its surface has to be created asynchronously before
    /// the event loop starts.
    pub fn init(&mut self, width: u32, height: u32, window: Arc<Window>, pixels: Pixels<'win>) {
        self.simulation = Some(Simulation::new(width as f32, height as f32, self.seed));
        self.pixels = Some(pixels);
        self.window = Some(window);
        self.last_frame = Instant::now();
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 || self.pixels.is_none() {
            return;
        }
        let pixels = self.pixels.as_mut().unwrap();
        pixels.resize_surface(width, height).unwrap();
        pixels.resize_buffer(width, height).unwrap();
        if let Some(sim) = self.simulation.as_mut() {
            sim.resize(width as f32, height as f32);
        }
    }

    fn redraw(&mut self) {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.update_fps(dt);

        let Some(sim) = self.simulation.as_mut() else {
            return;
        };
        sim.advance(dt, &self.input);

        let pixels = self.pixels.as_mut().unwrap();
        let frame = pixels.frame_mut();
        self.renderer.draw(sim, frame);

        let fps_text = format!("FPS: {:.1}", self.fps);
        self.renderer
            .draw_overlay(frame, sim.width() as usize, sim.height() as usize, &fps_text);

        pixels.render().unwrap();
    }

    fn update_fps(&mut self, frame_time: f32) {
        self.frame_times.push(frame_time);
        if self.frame_times.len() > 100 {
            self.frame_times.remove(0);
        }
        let avg = self.frame_times.iter().sum::<f32>() / self.frame_times.len() as f32;
        self.fps = if avg > 0.0 { 1.0 / avg } else { 0.0 };
    }
}

impl<'win> ApplicationHandler for Viewer<'win> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.pixels.is_none() {
            let (w, h) = self.initial_size;
            let window = Arc::new(
                event_loop
                    .create_window(
                        Window::default_attributes()
                            .with_title("softdrop")
                            .with_inner_size(LogicalSize::new(w, h)),
                    )
                    .unwrap(),
            );

            let size = window.inner_size();
            let surface_texture =
                SurfaceTexture::new(size.width, size.height, Arc::clone(&window));
            let pixels = Pixels::new(size.width, size.height, surface_texture).unwrap();

            self.init(size.width, size.height, window, pixels);
        }
        self.window.as_ref().unwrap().request_redraw();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::Resized(size) => {
                self.resize(size.width, size.height);
                self.window.as_ref().unwrap().request_redraw();
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.input.pointer = Some(Vec2::new(position.x as f32, position.y as f32));
            }
            WindowEvent::CursorLeft { .. } => {
                self.input.pointer = None;
            }
            WindowEvent::MouseWheel { delta, .. } => {
                // wheel stands in for page scroll: down scrolls the
                // section further into view
                let change = match delta {
                    MouseScrollDelta::LineDelta(_, y) => -y * SCROLL_LINE_STEP,
                    MouseScrollDelta::PixelDelta(p) => -(p.y as f32) * SCROLL_PIXEL_STEP,
                };
                self.input.scroll_progress =
                    (self.input.scroll_progress + change).clamp(0.0, 1.0);
            }
            WindowEvent::Occluded(occluded) => {
                // covered window == section scrolled out of the viewport
                self.input.visible = !occluded;
            }
            WindowEvent::CloseRequested => {
                info!("close requested; stopping");
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                self.window.as_ref().unwrap().pre_present_notify();
                self.redraw();
                self.window.as_ref().unwrap().request_redraw();
            }
            _ => (),
        }
    }
}
