use std::sync::Arc;

use log::{error, info};
use pixels::wgpu::{
    Backends, DeviceDescriptor, Features, Limits, PowerPreference, RequestAdapterOptions,
    TextureFormat,
};
use pixels::{PixelsBuilder, SurfaceTexture};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use winit::event_loop::{ControlFlow, EventLoop};
use winit::platform::web::WindowExtWebSys;
use winit::window::Window;

use crate::app::Viewer;
use crate::renderer::Renderer;

const CANVAS_WIDTH: u32 = 1024;
const CANVAS_HEIGHT: u32 = 768;

#[wasm_bindgen(start)]
pub fn start() {
    spawn_local(run());
}

#[wasm_bindgen]
pub async fn run() {
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));
    console_log::init_with_level(log::Level::Info).expect("error initializing logger");

    info!("setting up event loop");
    let event_loop = EventLoop::new().unwrap();
    event_loop.set_control_flow(ControlFlow::Wait);

    #[allow(deprecated)]
    let window = Arc::new(
        event_loop
            .create_window(Window::default_attributes())
            .unwrap(),
    );

    // attach the winit canvas to the page body
    web_sys::window()
        .and_then(|win| win.document())
        .and_then(|doc| doc.body())
        .and_then(|body| {
            body.append_child(&web_sys::Element::from(window.canvas().unwrap()))
                .ok()
        })
        .expect("couldn't append canvas to document body");

    let surface_texture = SurfaceTexture::new(CANVAS_WIDTH, CANVAS_HEIGHT, Arc::clone(&window));
    let texture_format = TextureFormat::Rgba8Unorm;

    let adapter_options = RequestAdapterOptions {
        power_preference: PowerPreference::HighPerformance,
        ..Default::default()
    };
    let mut device_descriptor = DeviceDescriptor::default();
    device_descriptor.required_features = Features::empty();
    device_descriptor.required_limits = Limits::downlevel_webgl2_defaults();
    device_descriptor.required_limits.max_texture_dimension_2d = 2048;

    let pixels = match PixelsBuilder::new(CANVAS_WIDTH, CANVAS_HEIGHT, surface_texture)
        .request_adapter_options(adapter_options)
        .device_descriptor(device_descriptor)
        .texture_format(texture_format)
        .surface_texture_format(texture_format)
        .wgpu_backend(Backends::GL)
        .build_async()
        .await
    {
        Ok(pixels) => pixels,
        Err(err) => {
            error!("error building pixels: {err:?}");
            panic!("error building pixels: {err:?}");
        }
    };

    let mut viewer = Viewer::new(Renderer::default(), 0x50f7d20b, (CANVAS_WIDTH, CANVAS_HEIGHT));
    viewer.init(CANVAS_WIDTH, CANVAS_HEIGHT, Arc::clone(&window), pixels);

    event_loop.run_app(&mut viewer).unwrap();
}
