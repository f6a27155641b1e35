//! Named tunables for the disc simulation.
//!
//! All values come in three responsive profiles selected by viewport
//! width, mirroring the breakpoints the host layout uses.

/// Physics sub-step length in seconds.
pub const TIME_STEP: f32 = 1.0 / 120.0;

/// Per-frame wall-clock delta cap; prevents runaway catch-up after a stall.
pub const MAX_FRAME_DT: f32 = 0.04;

/// The floor line sits this many pixels above the bottom edge.
pub const FLOOR_INSET: f32 = 2.0;

/// Pairwise resolution passes per sub-step; stacks need more than one.
pub const COLLISION_PASSES: usize = 3;

/// Responsive breakpoint the viewport falls into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Profile {
    Mobile,
    Tablet,
    Desktop,
}

impl Profile {
    pub fn for_width(width: f32) -> Self {
        if width < 640.0 {
            Profile::Mobile
        } else if width < 1024.0 {
            Profile::Tablet
        } else {
            Profile::Desktop
        }
    }
}

/// Full tunable set for one profile.
#[derive(Clone, Copy, Debug)]
pub struct SimConfig {
    /// Inset from the side walls, pixels.
    pub padding: f32,
    /// Baseline gravity, px/s²; scroll progress modulates the effective value.
    pub gravity_base: f32,
    /// Fraction of normal velocity preserved after a bounce.
    pub restitution: f32,
    /// Uniform per-sub-step velocity bleed.
    pub air_drag: f32,
    pub floor_friction: f32,
    pub wall_friction: f32,
    pub min_radius: f32,
    pub max_radius: f32,
    /// Below this speed a grounded disc counts as still.
    pub sleep_speed: f32,
    /// Above this speed a collision wakes a sleeping disc.
    pub wake_speed: f32,
    /// Approach speeds below this get damping instead of an impulse.
    pub weak_impulse_speed: f32,
    pub pointer_radius: f32,
    pub pointer_force: f32,
    /// Per-frame easing factor chasing the raw pointer position.
    pub pointer_ease: f32,
    pub target_min: u32,
    pub target_max: u32,
    /// Floor impacts slower than this don't bounce at all.
    pub small_bounce_speed: f32,
    /// Lateral drift below this is clamped to exactly zero on the floor.
    pub micro_vx: f32,
    /// Consecutive still sub-steps on the floor before hard sleep.
    pub sleep_frames: u32,
    /// Snap tolerance for floor sticking.
    pub floor_eps: f32,
}

impl SimConfig {
    pub fn for_profile(profile: Profile) -> Self {
        let base = Self {
            padding: 12.0,
            gravity_base: 2100.0,
            restitution: 0.6,
            air_drag: 0.02,
            floor_friction: 0.22,
            wall_friction: 0.12,
            min_radius: 22.0,
            max_radius: 40.0,
            sleep_speed: 8.0,
            wake_speed: 28.0,
            weak_impulse_speed: 10.0,
            pointer_radius: 160.0,
            pointer_force: 1300.0,
            pointer_ease: 0.12,
            target_min: 14,
            target_max: 28,
            small_bounce_speed: 45.0,
            micro_vx: 4.0,
            sleep_frames: 14,
            floor_eps: 0.75,
        };
        match profile {
            Profile::Mobile => Self {
                min_radius: 27.0,
                max_radius: 35.0,
                pointer_radius: 110.0,
                pointer_force: 1050.0,
                target_min: 16,
                target_max: 20,
                gravity_base: 2000.0,
                restitution: 0.6,
                ..base
            },
            Profile::Tablet => Self {
                min_radius: 25.0,
                max_radius: 36.0,
                pointer_radius: 140.0,
                pointer_force: 1200.0,
                target_min: 18,
                target_max: 26,
                gravity_base: 2050.0,
                restitution: 0.62,
                ..base
            },
            Profile::Desktop => Self {
                min_radius: 35.0,
                max_radius: 60.0,
                pointer_radius: 160.0,
                pointer_force: 1300.0,
                target_min: 24,
                target_max: 36,
                gravity_base: 2100.0,
                restitution: 0.64,
                ..base
            },
        }
    }

    pub fn for_width(width: f32) -> Self {
        Self::for_profile(Profile::for_width(width))
    }

    /// Effective gravity for a scroll progress in [0, 1]: 60% of the
    /// baseline when the section first scrolls in, up to 140% fully in.
    pub fn gravity_at(&self, scroll_progress: f32) -> f32 {
        let eased = ease_out_cubic(scroll_progress.clamp(0.0, 1.0));
        self.gravity_base * (0.6 + 0.8 * eased)
    }

    /// Disc population to spawn toward, scaled by canvas area and eased
    /// scroll progress, bounded by the profile's min/max.
    pub fn spawn_target(&self, width: f32, height: f32, scroll_progress: f32) -> usize {
        let area = (width * height) / (1000.0 * 600.0);
        let base = (self.target_min as f32 + area * 6.0)
            .round()
            .clamp(self.target_min as f32, self.target_max as f32);
        let eased = ease_out_cubic(scroll_progress.clamp(0.0, 1.0));
        (base * (0.2 + 0.8 * eased)).round() as usize
    }
}

pub fn ease_out_cubic(x: f32) -> f32 {
    1.0 - (1.0 - x).powi(3)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_breakpoints() {
        assert_eq!(Profile::for_width(320.0), Profile::Mobile);
        assert_eq!(Profile::for_width(639.9), Profile::Mobile);
        assert_eq!(Profile::for_width(640.0), Profile::Tablet);
        assert_eq!(Profile::for_width(1023.9), Profile::Tablet);
        assert_eq!(Profile::for_width(1024.0), Profile::Desktop);
    }

    #[test]
    fn gravity_tracks_scroll() {
        let cfg = SimConfig::for_profile(Profile::Desktop);
        assert_eq!(cfg.gravity_at(0.0), cfg.gravity_base * 0.6);
        assert!((cfg.gravity_at(1.0) - cfg.gravity_base * 1.4).abs() < 1e-3);
        // out-of-range input is clamped, not extrapolated
        assert_eq!(cfg.gravity_at(-3.0), cfg.gravity_at(0.0));
        assert_eq!(cfg.gravity_at(7.0), cfg.gravity_at(1.0));
    }

    #[test]
    fn spawn_target_respects_bounds() {
        let cfg = SimConfig::for_profile(Profile::Desktop);
        // huge canvas saturates at target_max, fully scrolled in
        assert_eq!(
            cfg.spawn_target(4000.0, 4000.0, 1.0),
            cfg.target_max as usize
        );
        // zero scroll progress keeps 20% of the base target
        let dormant = cfg.spawn_target(4000.0, 4000.0, 0.0);
        assert_eq!(dormant, (cfg.target_max as f32 * 0.2).round() as usize);
        // tiny canvas floors at target_min before scroll scaling
        let tiny = cfg.spawn_target(10.0, 10.0, 1.0);
        assert_eq!(tiny, cfg.target_min as usize);
    }

    #[test]
    fn easing_endpoints() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert!(ease_out_cubic(0.5) > 0.5);
    }
}
