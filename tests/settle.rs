//! End-to-end scenarios against the public API.

use std::f32::consts::PI;

use softdrop::config::TIME_STEP;
use softdrop::{Disc, InputSnapshot, Simulation, Vec2};

fn offscreen() -> InputSnapshot {
    InputSnapshot {
        pointer: None,
        scroll_progress: 0.5,
        visible: false,
    }
}

#[test]
fn single_disc_drop_settles_exactly_on_the_floor() {
    let mut sim = Simulation::new(800.0, 2000.0, 11);
    sim.add_disc(Disc::new(Vec2::new(100.0, -50.0), Vec2::ZERO, 30.0));

    let mut settled_after = None;
    for step in 0..6000 {
        sim.advance(TIME_STEP, &offscreen());
        if sim.discs()[0].sleeping {
            settled_after = Some(step);
            break;
        }
    }

    let d = &sim.discs()[0];
    assert!(settled_after.is_some(), "disc never slept");
    assert_eq!(d.pos.y, sim.floor_y() - 30.0);
    assert_eq!(d.vel, Vec2::ZERO);
    assert_eq!(d.mass(), 30.0 * 30.0 * PI);
}

#[test]
fn full_session_is_reproducible_and_stays_in_bounds() {
    let visible = InputSnapshot {
        pointer: Some(Vec2::new(400.0, 500.0)),
        scroll_progress: 0.9,
        visible: true,
    };

    let mut a = Simulation::new(1100.0, 700.0, 99);
    let mut b = Simulation::new(1100.0, 700.0, 99);

    // rain in, stir with the pointer, then let everything calm down
    for frame in 0..2400 {
        let input = if frame < 1200 { visible } else { offscreen() };
        a.advance(1.0 / 60.0, &input);
        b.advance(1.0 / 60.0, &input);
    }

    assert!(!a.discs().is_empty());
    assert_eq!(a.discs().len(), b.discs().len());
    for (da, db) in a.discs().iter().zip(b.discs()) {
        assert_eq!(da.pos, db.pos);
        assert_eq!(da.vel, db.vel);
    }

    // mass never desynchronizes from radius, and nothing tunneled out
    let pad = a.config().padding;
    for d in a.discs() {
        assert_eq!(d.mass(), d.radius() * d.radius() * PI);
        assert!(d.pos.x - d.radius() >= pad - 1.0);
        assert!(d.pos.x + d.radius() <= a.width() - pad + 1.0);
        assert!(d.pos.y + d.radius() <= a.floor_y() + 1.0);
    }
}

#[test]
fn pointer_sweep_scatters_a_settled_stack() {
    let mut sim = Simulation::new(1000.0, 600.0, 5);
    let visible = InputSnapshot {
        pointer: None,
        scroll_progress: 1.0,
        visible: true,
    };

    // populate and let the bottom row fall asleep
    for _ in 0..3600 {
        sim.advance(1.0 / 60.0, &visible);
    }
    let sleepers_before = sim.discs().iter().filter(|d| d.sleeping).count();
    assert!(sleepers_before > 0, "no disc settled");

    // drag the pointer along the floor line
    let floor = sim.floor_y();
    for i in 0..240 {
        let x = 20.0 + (i as f32 / 240.0) * 960.0;
        let sweep = InputSnapshot {
            pointer: Some(Vec2::new(x, floor - 20.0)),
            ..visible
        };
        sim.advance(1.0 / 60.0, &sweep);
    }

    // the sweep must have disturbed at least part of the stack
    let moving = sim
        .discs()
        .iter()
        .filter(|d| !d.sleeping && d.speed() > 0.0)
        .count();
    assert!(moving > 0, "pointer sweep woke nothing");
}
