use log::debug;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::clock::FrameClock;
use crate::config::{COLLISION_PASSES, FLOOR_INSET, MAX_FRAME_DT, SimConfig, TIME_STEP};
use crate::disc::Disc;
use crate::input::InputSnapshot;
use crate::vec2::Vec2;

/// The disc simulation: store, spawner, integrator, collision resolver
/// and sleep manager behind one `advance` call per frame.
///
/// The disc list is owned exclusively here. Hosts feed an
/// [`InputSnapshot`] in and read the disc slice back out for rendering;
/// nothing else mutates the store.
pub struct Simulation {
    config: SimConfig,
    discs: Vec<Disc>,
    clock: FrameClock,
    rng: SmallRng,
    width: f32,
    height: f32,
    /// Effective gravity for the current frame (scroll-modulated).
    gravity: f32,
    /// Eased pointer position; chases the raw snapshot value.
    pointer: Option<Vec2>,
    scroll_progress: f32,
    visible: bool,
}

impl Simulation {
    pub fn new(width: f32, height: f32, seed: u64) -> Self {
        Self::with_config(SimConfig::for_width(width), width, height, seed)
    }

    pub fn with_config(config: SimConfig, width: f32, height: f32, seed: u64) -> Self {
        let width = width.max(1.0);
        let height = height.max(1.0);
        Self {
            config,
            discs: Vec::new(),
            clock: FrameClock::new(TIME_STEP, MAX_FRAME_DT),
            rng: SmallRng::seed_from_u64(seed),
            width,
            height,
            gravity: config.gravity_at(0.0),
            pointer: None,
            scroll_progress: 0.0,
            visible: false,
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn discs(&self) -> &[Disc] {
        &self.discs
    }

    pub fn floor_y(&self) -> f32 {
        self.height - FLOOR_INSET
    }

    /// Resize the canvas and reselect the responsive profile. Existing
    /// discs keep their radii; only future spawns use the new bounds.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width.max(1.0);
        self.height = height.max(1.0);
        self.config = SimConfig::for_width(self.width);
        debug!("resized to {}x{}", self.width, self.height);
    }

    pub fn add_disc(&mut self, disc: Disc) {
        self.discs.push(disc);
    }

    /// Advance one frame: ingest input, spawn toward the target, then
    /// drain the fixed-timestep clock. Returns the sub-steps run.
    pub fn advance(&mut self, dt: f32, input: &InputSnapshot) -> u32 {
        self.ingest(input);
        self.spawn_due();
        let steps = self.clock.tick(dt);
        for _ in 0..steps {
            self.step();
        }
        steps
    }

    fn ingest(&mut self, input: &InputSnapshot) {
        self.visible = input.visible;
        self.scroll_progress = input.scroll_progress.clamp(0.0, 1.0);
        self.gravity = self.config.gravity_at(self.scroll_progress);
        self.pointer = match (self.pointer, input.pointer) {
            // chase the raw target; snap when the pointer first appears
            (Some(p), Some(target)) => Some(p + (target - p) * self.config.pointer_ease),
            (None, Some(target)) => Some(target),
            _ => None,
        };
    }

    /// One fixed sub-step: integrate, resolve pairs, re-clamp sleepers.
    pub fn step(&mut self) {
        self.integrate(TIME_STEP);
        for _ in 0..COLLISION_PASSES {
            self.collision_pass();
        }
        self.clamp_sleepers();
    }

    // ---- spawner ----

    fn spawn_due(&mut self) {
        if !self.visible {
            return;
        }
        let target = self
            .config
            .spawn_target(self.width, self.height, self.scroll_progress);
        if self.discs.len() >= target {
            return;
        }
        let deficit = target - self.discs.len();
        // burst while the canvas is nearly empty so the drop reads as a rain
        let burst = if self.discs.len() < target.min(6) { 2 } else { 1 };
        for _ in 0..deficit.min(burst) {
            self.spawn_disc();
        }
    }

    /// New discs start above the visible area with a little sideways
    /// drift, so they appear to rain in from off-screen.
    fn spawn_disc(&mut self) {
        let cfg = self.config;
        let radius = self.rng.random_range(cfg.min_radius..=cfg.max_radius);
        let lo = cfg.padding + radius;
        let hi = (self.width - cfg.padding - radius).max(lo);
        let x = self.rng.random_range(lo..=hi);
        let drop = self.rng.random_range(60.0..=(self.height * 0.6).max(60.0));
        let vx = self.rng.random_range(-60.0..=60.0);
        let vy = self.rng.random_range(-50.0..=0.0);
        self.discs.push(Disc::new(
            Vec2::new(x, -radius - drop),
            Vec2::new(vx, vy),
            radius,
        ));
    }

    // ---- integrator ----

    fn integrate(&mut self, dt: f32) {
        let cfg = self.config;
        let gravity = self.gravity;
        let pointer = self.pointer;
        let width = self.width;
        let floor_y = self.floor_y();

        for d in &mut self.discs {
            if d.sleeping {
                // pointer contact is enough to rouse a settled disc
                if let Some(p) = pointer {
                    if (d.pos - p).length() < cfg.pointer_radius + d.radius() {
                        d.wake();
                    }
                }
                if d.sleeping {
                    continue;
                }
            }

            // gravity & air drag
            d.vel.y += gravity * dt;
            d.vel *= 1.0 - cfg.air_drag;

            // pointer repulsion, falling off linearly with distance
            if let Some(p) = pointer {
                let away = d.pos - p;
                let dist = away.length();
                let reach = cfg.pointer_radius + d.radius();
                if dist < reach {
                    let influence = 1.0 - dist / reach;
                    let div = if dist > 0.0 { dist } else { 1.0 };
                    d.vel += away * (1.0 / div) * (cfg.pointer_force * influence * dt);
                }
            }

            d.pos += d.vel * dt;

            // side walls: clamp, reflect, scrub some vertical speed
            let r = d.radius();
            if d.pos.x - r < cfg.padding {
                d.pos.x = cfg.padding + r;
                d.vel.x = -d.vel.x * cfg.restitution;
                d.vel.y *= 1.0 - cfg.wall_friction;
            }
            if d.pos.x + r > width - cfg.padding {
                d.pos.x = width - cfg.padding - r;
                d.vel.x = -d.vel.x * cfg.restitution;
                d.vel.y *= 1.0 - cfg.wall_friction;
            }

            // floor contact
            d.grounded = false;
            if d.pos.y + r > floor_y - cfg.floor_eps {
                d.pos.y = floor_y - r;
                d.grounded = true;

                // tiny impacts don't bounce; that's what causes visible buzz
                if d.vel.y.abs() < cfg.small_bounce_speed {
                    d.vel.y = 0.0;
                } else {
                    d.vel.y = -d.vel.y * cfg.restitution;
                }

                d.vel.x *= 1.0 - cfg.floor_friction;
                if d.vel.x.abs() < cfg.micro_vx {
                    d.vel.x = 0.0;
                }
            }

            if d.grounded {
                if d.speed() < cfg.sleep_speed {
                    d.still_frames += 1;
                } else {
                    d.still_frames = 0;
                }
                if d.still_frames >= cfg.sleep_frames {
                    d.sleep();
                    d.pos.y = floor_y - r;
                }
            } else {
                d.still_frames = 0;
            }
        }
    }

    // ---- collision resolver ----

    fn collision_pass(&mut self) {
        let n = self.discs.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let (head, tail) = self.discs.split_at_mut(j);
                collide(&mut head[i], &mut tail[0], &self.config);
            }
        }
    }

    /// Sleeping discs are never re-integrated, so positional correction
    /// from neighbours must not leave them outside the bounds.
    fn clamp_sleepers(&mut self) {
        let pad = self.config.padding;
        let width = self.width;
        let floor_y = self.floor_y();
        for d in &mut self.discs {
            if !d.sleeping {
                continue;
            }
            let r = d.radius();
            d.pos.x = d.pos.x.clamp(pad + r, (width - pad - r).max(pad + r));
            if d.pos.y + r > floor_y {
                d.pos.y = floor_y - r;
            }
        }
    }
}

/// Impulse-based resolution for one overlapping pair.
fn collide(a: &mut Disc, b: &mut Disc, cfg: &SimConfig) {
    if a.sleeping && b.sleeping {
        return;
    }

    let delta = b.pos - a.pos;
    let dist = delta.length();
    let min_dist = a.radius() + b.radius();
    if dist == 0.0 || dist >= min_dist {
        return;
    }

    let normal = delta * (1.0 / dist);
    let overlap = (min_dist - dist) + 0.1;

    // split the separation by opposing mass: heavier discs move less
    let total = a.mass() + b.mass();
    a.pos -= normal * (overlap * b.mass() / total);
    b.pos += normal * (overlap * a.mass() / total);

    let rel = b.vel - a.vel;
    let vel_n = rel.dot(normal);

    // gentle contact: bleed a little energy instead of applying an
    // impulse, which would make lightly touching discs buzz
    if vel_n > -cfg.weak_impulse_speed {
        a.vel *= 0.998;
        b.vel *= 0.998;
        return;
    }

    let j = -(1.0 + cfg.restitution) * vel_n / (a.inv_mass() + b.inv_mass());
    let impulse = normal * j;
    a.vel -= impulse * a.inv_mass();
    b.vel += impulse * b.inv_mass();

    a.vel.x *= 0.999;
    b.vel.x *= 0.999;

    if a.speed() > cfg.wake_speed {
        a.wake();
    }
    if b.speed() > cfg.wake_speed {
        b.wake();
    }
    // a kick too weak to wake a sleeper must not leave residual velocity
    // on it: sleeping implies exactly zero velocity
    if a.sleeping {
        a.vel = Vec2::ZERO;
    }
    if b.sleeping {
        b.vel = Vec2::ZERO;
    }
}
