use crate::vec2::Vec2;

/// Host-side input state, sampled once per frame.
///
/// The window/event layer writes this; the simulation only reads it.
/// Keeping the two decoupled means the physics step never touches event
/// plumbing and can be driven directly from tests.
#[derive(Clone, Copy, Debug)]
pub struct InputSnapshot {
    /// Raw pointer position in canvas coordinates, if a pointer is over
    /// the canvas. The simulation applies its own easing on top.
    pub pointer: Option<Vec2>,
    /// How far the hosting section has scrolled into view, in [0, 1].
    /// Drives effective gravity and the spawn target.
    pub scroll_progress: f32,
    /// Whether the canvas is actually visible; gates spawning.
    pub visible: bool,
}

impl Default for InputSnapshot {
    fn default() -> Self {
        Self {
            pointer: None,
            scroll_progress: 0.0,
            visible: true,
        }
    }
}
