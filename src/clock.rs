/// Fixed-timestep accumulator.
///
/// Converts variable frame deltas into a whole number of constant-size
/// physics sub-steps, so the simulation advances identically regardless
/// of display refresh rate. Owned by whoever drives the frame loop; no
/// global ticker.
#[derive(Clone, Copy, Debug)]
pub struct FrameClock {
    step: f32,
    max_frame_dt: f32,
    accumulator: f32,
}

impl FrameClock {
    pub fn new(step: f32, max_frame_dt: f32) -> Self {
        Self {
            step,
            max_frame_dt,
            accumulator: 0.0,
        }
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    /// Feed one frame's elapsed wall-clock time; returns how many fixed
    /// sub-steps are due. The delta is capped so a stalled tab or a
    /// suspended window can't trigger a catch-up avalanche.
    pub fn tick(&mut self, dt: f32) -> u32 {
        self.accumulator += dt.clamp(0.0, self.max_frame_dt);
        let mut steps = 0;
        while self.accumulator >= self.step {
            self.accumulator -= self.step;
            steps += 1;
        }
        steps
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drains_whole_steps_and_keeps_the_remainder() {
        let mut clock = FrameClock::new(1.0 / 120.0, 0.04);
        assert_eq!(clock.tick(1.0 / 60.0), 2);
        // a quarter step is left over; the next frame tips it past one
        assert_eq!(clock.tick(1.0 / 120.0), 1);
    }

    #[test]
    fn exact_step_yields_exactly_one() {
        let mut clock = FrameClock::new(1.0 / 120.0, 0.04);
        for _ in 0..1000 {
            assert_eq!(clock.tick(1.0 / 120.0), 1);
        }
    }

    #[test]
    fn stall_is_capped() {
        let mut clock = FrameClock::new(1.0 / 120.0, 0.04);
        // a 10-second stall must not produce 1200 catch-up steps
        assert!(clock.tick(10.0) <= 5);
    }

    #[test]
    fn negative_delta_is_ignored() {
        let mut clock = FrameClock::new(1.0 / 120.0, 0.04);
        assert_eq!(clock.tick(-1.0), 0);
        assert_eq!(clock.tick(1.0 / 120.0), 1);
    }

    #[test]
    fn reset_drops_accumulated_time() {
        let mut clock = FrameClock::new(1.0 / 120.0, 0.04);
        clock.tick(0.004);
        clock.reset();
        assert_eq!(clock.tick(0.004), 0);
    }
}
