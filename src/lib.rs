//! Soft-drop disc toy: a small 2D physics simulation where discs rain
//! into a canvas, bounce, settle into stacks and fall asleep, with
//! pointer repulsion and scroll-driven gravity.
//!
//! The simulation is deterministic for a given seed and input sequence;
//! hosts (the native viewer, the wasm entry) only feed it an
//! [`InputSnapshot`] per frame and render the resulting disc set.

pub mod app;
pub mod clock;
pub mod config;
pub mod disc;
pub mod input;
pub mod renderer;
pub mod simulation;
pub mod vec2;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use clock::FrameClock;
pub use config::{Profile, SimConfig};
pub use disc::Disc;
pub use input::InputSnapshot;
pub use simulation::Simulation;
pub use vec2::Vec2;
