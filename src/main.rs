#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use clap::Parser;
    use log::info;
    use rand::TryRngCore;
    use winit::event_loop::{ControlFlow, EventLoop};

    use softdrop::app::Viewer;
    use softdrop::renderer::Renderer;

    /// Soft-drop disc toy: discs rain in, bounce, settle and sleep.
    #[derive(Parser, Debug)]
    #[command(name = "softdrop", version, about)]
    struct Args {
        /// Window width in pixels.
        #[arg(long, default_value_t = 1280)]
        width: u32,

        /// Window height in pixels.
        #[arg(long, default_value_t = 800)]
        height: u32,

        /// RNG seed for spawn parameters; same seed, same rain.
        /// Defaults to OS entropy.
        #[arg(long)]
        seed: Option<u64>,

        /// PNG drawn for each disc; stroked circles when absent.
        #[arg(long)]
        sprite: Option<PathBuf>,

        /// TTF for the FPS overlay; overlay disabled when absent.
        #[arg(long)]
        font: Option<PathBuf>,
    }

    pub fn run() {
        env_logger::init();
        let args = Args::parse();

        let seed = args
            .seed
            .unwrap_or_else(|| rand::rngs::OsRng.try_next_u64().unwrap_or(0x50f7d20b));
        info!("seed {seed}");

        let mut renderer = Renderer::default();
        if let Some(path) = &args.sprite {
            renderer.load_sprite(path);
        }
        if let Some(path) = &args.font {
            renderer.load_font(path);
        }

        let event_loop = EventLoop::new().unwrap();
        // Poll keeps the loop spinning between OS events; the frame
        // clock turns that into fixed physics sub-steps.
        event_loop.set_control_flow(ControlFlow::Poll);
        event_loop
            .run_app(&mut Viewer::new(renderer, seed, (args.width, args.height)))
            .unwrap();
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // the browser build starts through softdrop::web::start instead
}
