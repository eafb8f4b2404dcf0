//! Integration tests for bm-sim.

use bm_core::{BodyId, GasConfig, Vec2, Wall};
use bm_schedule::EventKind;

use crate::{Engine, EngineBuilder, NoopObserver, SimDiff, SimError, SimObserver};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn small_gas(seed: u64) -> GasConfig {
    GasConfig::new(40, 3, 300, 200, seed)
}

/// Two equal discs 20 apart on the x axis, closing at unit speed each.
fn head_on() -> Engine {
    EngineBuilder::new(200.0, 100.0)
        .body(Vec2::new(90.0, 50.0), Vec2::new(1.0, 0.0), 10.0, 5.0)
        .body(Vec2::new(110.0, 50.0), Vec2::new(-1.0, 0.0), 10.0, 5.0)
        .build()
        .unwrap()
}

fn single_body() -> Engine {
    EngineBuilder::new(100.0, 100.0)
        .body(Vec2::new(50.0, 50.0), Vec2::new(1.0, 0.0), 10.0, 5.0)
        .build()
        .unwrap()
}

/// No live event may predate the current leg of any of its participants.
fn assert_no_stale_live_events(engine: &Engine) {
    for event in engine.schedule().live_events() {
        let (a, b) = event.kind().participants();
        for id in std::iter::once(a).chain(b) {
            let body = engine.body(id).unwrap();
            assert!(
                event.scheduled_at() >= body.reference_time(),
                "{} scheduled at {} but {id} changed course at {}",
                event.kind(),
                event.scheduled_at(),
                body.reference_time(),
            );
        }
    }
}

fn assert_one_wall_event_per_moving_body(engine: &Engine) {
    for body in engine.bodies() {
        let walls = engine
            .schedule()
            .live_events()
            .filter(|e| matches!(e.kind(), EventKind::Wall { body: b, .. } if b == body.id()))
            .count();
        let expected = usize::from(body.velocity() != Vec2::ZERO);
        assert_eq!(walls, expected, "{} has {walls} live wall events", body.id());
    }
}

#[derive(Default)]
struct Recorder {
    diffs:    Vec<SimDiff>,
    run_ends: Vec<(f64, u64)>,
}

impl SimObserver for Recorder {
    fn on_event(&mut self, diff: &SimDiff) {
        self.diffs.push(diff.clone());
    }

    fn on_run_end(&mut self, time: f64, events_resolved: u64) {
        self.run_ends.push((time, events_resolved));
    }
}

// ── Construction ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod construction {
    use super::*;

    #[test]
    fn population_starts_at_centre() {
        let config = small_gas(1);
        let engine = Engine::new(&config).unwrap();
        assert_eq!(engine.bodies().len(), 43);
        assert_eq!(engine.now(), 0.0);
        for (i, body) in engine.bodies().iter().enumerate() {
            assert_eq!(body.id(), BodyId(i as u32));
            assert_eq!(body.reference_position(), Vec2::new(150.0, 100.0));
            assert_eq!(body.reference_time(), 0.0);
        }
    }

    #[test]
    fn classes_get_their_profiles_and_speed_bounds() {
        let config = small_gas(2);
        let engine = Engine::new(&config).unwrap();
        let (light, heavy) = engine.bodies().split_at(config.light.count);

        assert!(light.iter().all(|b| b.mass() == 10.0 && b.radius() == 5.0));
        assert!(heavy.iter().all(|b| b.mass() == 100.0 && b.radius() == 10.0));
        assert!(light.iter().all(|b| b.velocity().length() < 0.3 * 1.5 + 1e-12));
        assert!(heavy.iter().all(|b| b.velocity().length() < 0.1 + 1e-12));
    }

    #[test]
    fn initial_schedule_has_one_wall_event_per_body() {
        let engine = Engine::new(&small_gas(3)).unwrap();
        assert_one_wall_event_per_moving_body(&engine);
        // Everyone overlaps at the centre, so no pair is approaching from outside.
        assert!(engine
            .schedule()
            .live_events()
            .all(|e| matches!(e.kind(), EventKind::Wall { .. })));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = GasConfig::new(0, 0, 800, 600, 0);
        assert!(matches!(Engine::new(&config), Err(SimError::Config(_))));

        let mut config = GasConfig::default();
        config.heavy.radius = -1.0;
        assert!(matches!(Engine::new(&config), Err(SimError::Config(_))));
    }

    #[test]
    fn builder_rejects_bad_box_and_bodies() {
        let err = EngineBuilder::new(0.0, 100.0).build().unwrap_err();
        assert!(matches!(err, SimError::Config(_)));

        let err = EngineBuilder::new(100.0, 100.0)
            .body(Vec2::new(50.0, 50.0), Vec2::ZERO, 0.0, 5.0)
            .build()
            .unwrap_err();
        assert!(matches!(err, SimError::Config(_)));
    }

    #[test]
    fn body_as_wide_as_the_box_is_rejected() {
        let err = EngineBuilder::new(10.0, 100.0)
            .body(Vec2::new(5.0, 50.0), Vec2::new(1.0, 0.0), 10.0, 5.0)
            .build()
            .unwrap_err();
        assert!(matches!(err, SimError::Config(_)));

        assert!(matches!(Engine::new(&GasConfig::new(1, 0, 10, 600, 3)), Err(SimError::Config(_))));
        assert!(matches!(Engine::new(&GasConfig::new(1, 0, 600, 10, 3)), Err(SimError::Config(_))));
    }

    #[test]
    fn clock_advances_in_the_narrowest_box() {
        // Light radius 5 in an 11-wide box leaves one unit of travel.
        let mut engine = Engine::new(&GasConfig::new(1, 0, 11, 600, 3)).unwrap();
        let mut times = Vec::with_capacity(1000);
        for _ in 0..1000 {
            times.push(engine.step().unwrap().time);
        }
        assert!(engine.now() > 0.0, "clock stuck at {}", engine.now());
        let advancing = times.windows(2).filter(|w| w[1] > w[0]).count();
        assert!(advancing >= 990, "only {advancing} of 999 steps moved the clock");
    }

    #[test]
    fn same_seed_same_population() {
        let a = Engine::new(&small_gas(9)).unwrap();
        let b = Engine::new(&small_gas(9)).unwrap();
        let c = Engine::new(&small_gas(10)).unwrap();
        assert_eq!(a.snapshots(), b.snapshots());
        assert_ne!(a.snapshots(), c.snapshots());
    }
}

// ── Scripted scenarios ────────────────────────────────────────────────────────

#[cfg(test)]
mod scenarios {
    use super::*;

    #[test]
    fn head_on_equal_masses_swap_velocities() {
        let mut engine = head_on();
        let diff = engine.step().unwrap();

        assert_eq!(diff.time, 5.0);
        assert_eq!(diff.cause, EventKind::Particle { a: BodyId(0), b: BodyId(1) });
        assert_eq!(diff.len(), 2);

        let a = diff.get(BodyId(0)).unwrap();
        let b = diff.get(BodyId(1)).unwrap();
        assert_eq!(a.velocity, Vec2::new(-1.0, 0.0));
        assert_eq!(b.velocity, Vec2::new(1.0, 0.0));
        assert_eq!(a.reference_position, Vec2::new(95.0, 50.0));
        assert_eq!(b.reference_position, Vec2::new(105.0, 50.0));
        assert_eq!((b.reference_position - a.reference_position).length(), 10.0);
        assert_eq!(engine.now(), 5.0);
    }

    #[test]
    fn head_on_then_walls() {
        let mut engine = head_on();
        engine.step().unwrap();
        // Both now travel 90 units to their walls: 95 - 5 and 200 - 5 - 105.
        let first = engine.step().unwrap();
        let second = engine.step().unwrap();
        assert_eq!(first.time, 95.0);
        assert_eq!(second.time, 95.0);
        assert_eq!(first.cause, EventKind::Wall { body: BodyId(0), wall: Wall::Left });
        assert_eq!(second.cause, EventKind::Wall { body: BodyId(1), wall: Wall::Right });
    }

    #[test]
    fn single_body_bounces_between_side_walls() {
        let mut engine = single_body();

        let diff = engine.step().unwrap();
        assert_eq!(diff.time, 45.0);
        assert_eq!(diff.cause, EventKind::Wall { body: BodyId(0), wall: Wall::Right });
        assert_eq!(diff.bodies[0].velocity, Vec2::new(-1.0, 0.0));
        assert_eq!(diff.bodies[0].reference_position, Vec2::new(95.0, 50.0));

        let diff = engine.step().unwrap();
        assert_eq!(diff.time, 135.0);
        assert_eq!(diff.cause, EventKind::Wall { body: BodyId(0), wall: Wall::Left });
        assert_eq!(diff.bodies[0].velocity, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn heavy_body_barely_moves_a_light_one_back() {
        let mut engine = EngineBuilder::new(400.0, 100.0)
            .body(Vec2::new(100.0, 50.0), Vec2::new(1.0, 0.0), 10.0, 5.0)
            .body(Vec2::new(200.0, 50.0), Vec2::ZERO, 100.0, 10.0)
            .build()
            .unwrap();
        let diff = engine.step().unwrap();
        assert_eq!(diff.time, 85.0);
        let light = diff.get(BodyId(0)).unwrap();
        let heavy = diff.get(BodyId(1)).unwrap();
        // u1' = (10 - 100) / 110, u2' = 20 / 110.
        assert!((light.velocity.x - (-90.0 / 110.0)).abs() < 1e-12);
        assert!((heavy.velocity.x - (20.0 / 110.0)).abs() < 1e-12);
        // The struck body now has a wall event of its own.
        assert_one_wall_event_per_moving_body(&engine);
    }
}

// ── Long runs ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod long_runs {
    use super::*;

    #[test]
    fn kinetic_energy_is_conserved() {
        let mut engine = Engine::new(&small_gas(4)).unwrap();
        let e0 = engine.kinetic_energy();
        engine.run_events(3_000, &mut NoopObserver).unwrap();
        let e1 = engine.kinetic_energy();
        assert!(((e1 - e0) / e0).abs() < 1e-9, "energy drifted {e0} → {e1}");
    }

    #[test]
    fn particle_events_conserve_momentum_locally() {
        let mut engine = Engine::new(&small_gas(5)).unwrap();
        let mut checked = 0;
        for _ in 0..3_000 {
            let before = engine.snapshots();
            let diff = engine.step().unwrap();
            if let EventKind::Particle { a, b } = diff.cause {
                let p0 = before[a.index()].momentum() + before[b.index()].momentum();
                let p1 = diff.get(a).unwrap().momentum() + diff.get(b).unwrap().momentum();
                assert!((p1 - p0).length() < 1e-9);

                let sa = diff.get(a).unwrap();
                let sb = diff.get(b).unwrap();
                let gap = (sb.position_at(diff.time) - sa.position_at(diff.time)).length();
                assert!((gap - (sa.radius + sb.radius)).abs() < 1e-6, "gap {gap}");
                checked += 1;
            }
        }
        assert!(checked > 0, "run produced no particle collisions");
    }

    #[test]
    fn time_never_goes_backwards() {
        let mut engine = Engine::new(&small_gas(6)).unwrap();
        let mut rec = Recorder::default();
        engine.run_events(2_000, &mut rec).unwrap();
        assert!(rec.diffs.windows(2).all(|w| w[0].time <= w[1].time));
        assert_eq!(rec.diffs.last().unwrap().time, engine.now());
    }

    #[test]
    fn schedule_stays_consistent_after_every_step() {
        let mut engine = Engine::new(&small_gas(7)).unwrap();
        for _ in 0..1_000 {
            engine.step().unwrap();
            assert_no_stale_live_events(&engine);
            assert_one_wall_event_per_moving_body(&engine);
        }
    }

    #[test]
    fn bodies_stay_inside_the_box() {
        let mut engine = Engine::new(&small_gas(8)).unwrap();
        engine.run_events(2_000, &mut NoopObserver).unwrap();
        let t = engine.now();
        for body in engine.bodies() {
            let p = body.position_at(t);
            let r = body.radius();
            assert!(p.x >= r - 1e-6 && p.x <= engine.width() - r + 1e-6, "{} at {p}", body.id());
            assert!(p.y >= r - 1e-6 && p.y <= engine.height() - r + 1e-6, "{} at {p}", body.id());
        }
    }

    #[test]
    fn runs_are_reproducible() {
        let mut a = Engine::new(&small_gas(11)).unwrap();
        let mut b = Engine::new(&small_gas(11)).unwrap();
        let mut ra = Recorder::default();
        let mut rb = Recorder::default();
        a.run_events(500, &mut ra).unwrap();
        b.run_events(500, &mut rb).unwrap();
        assert_eq!(ra.diffs, rb.diffs);
    }

    #[test]
    fn diff_snapshots_match_engine_state() {
        let mut engine = Engine::new(&small_gas(12)).unwrap();
        for _ in 0..200 {
            let diff = engine.step().unwrap();
            for snap in &diff.bodies {
                assert_eq!(*snap, engine.body(snap.id).unwrap().snapshot());
                assert_eq!(snap.reference_time, diff.time);
            }
        }
    }
}

// ── Run helpers and observers ─────────────────────────────────────────────────

#[cfg(test)]
mod run_helpers {
    use super::*;

    #[test]
    fn run_events_reports_every_diff() {
        let mut engine = Engine::new(&small_gas(13)).unwrap();
        let mut rec = Recorder::default();
        engine.run_events(25, &mut rec).unwrap();
        engine.run_events(5, &mut rec).unwrap();
        assert_eq!(rec.diffs.len(), 30);
        assert_eq!(engine.events_resolved(), 30);
        assert_eq!(rec.run_ends.len(), 2);
        assert_eq!(rec.run_ends[1], (engine.now(), 30));
    }

    #[test]
    fn advance_until_is_inclusive() {
        let mut engine = single_body();
        let mut rec = Recorder::default();
        assert_eq!(engine.advance_until(44.0, &mut rec).unwrap(), 0);
        assert_eq!(engine.advance_until(135.0, &mut rec).unwrap(), 2);
        assert_eq!(engine.now(), 135.0);
        assert_eq!(rec.diffs.len(), 2);
        // Position between events comes from the current leg.
        let p = engine.body(BodyId(0)).unwrap().position_at(140.0);
        assert_eq!(p, Vec2::new(10.0, 50.0));
    }

    #[test]
    fn stale_events_are_counted() {
        let mut engine = head_on();
        // The collision at t = 5 kills both wall events due at t = 105.
        engine.step().unwrap();
        assert_eq!(engine.schedule().dead_len(), 2);
        assert_eq!(engine.stale_discarded(), 0);

        // Two wall bounces at t = 95 set up a second head-on at t = 185;
        // popping it first drops the two dead entries.
        engine.step().unwrap();
        engine.step().unwrap();
        let diff = engine.step().unwrap();
        assert_eq!(diff.time, 185.0);
        assert_eq!(diff.cause, EventKind::Particle { a: BodyId(1), b: BodyId(0) });
        assert_eq!(engine.stale_discarded(), 2);
    }
}

// ── Empty and stationary populations ──────────────────────────────────────────

#[cfg(test)]
mod exhausted {
    use super::*;

    #[test]
    fn empty_builder_reports_exhausted_schedule() {
        let mut engine = EngineBuilder::new(100.0, 100.0).build().unwrap();
        assert!(engine.schedule().is_empty());
        assert!(matches!(engine.step(), Err(SimError::ScheduleExhausted { time }) if time == 0.0));
        assert!(engine.run_events(1, &mut NoopObserver).is_err());
        assert!(engine.advance_until(10.0, &mut NoopObserver).is_err());
    }

    #[test]
    fn stationary_body_has_nothing_to_do() {
        let mut engine = EngineBuilder::new(100.0, 100.0)
            .body(Vec2::new(50.0, 50.0), Vec2::ZERO, 1.0, 5.0)
            .build()
            .unwrap();
        assert_eq!(engine.schedule().live_len(), 0);
        assert!(matches!(engine.step(), Err(SimError::ScheduleExhausted { .. })));
    }

    #[test]
    fn error_does_not_corrupt_state() {
        let mut engine = EngineBuilder::new(100.0, 100.0).build().unwrap();
        let _ = engine.step();
        assert_eq!(engine.events_resolved(), 0);
        assert_eq!(engine.now(), 0.0);
    }
}
