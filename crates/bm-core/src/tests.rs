//! Unit tests for bm-core primitives.

#[cfg(test)]
mod ids {
    use crate::BodyId;

    #[test]
    fn index_roundtrip() {
        let id = BodyId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(BodyId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(BodyId(0) < BodyId(1));
    }

    #[test]
    fn display() {
        assert_eq!(BodyId(7).to_string(), "BodyId(7)");
    }
}

#[cfg(test)]
mod body {
    use crate::{BmError, Body, BodyId, Vec2};

    fn mover() -> Body {
        Body::new(BodyId(3), Vec2::new(10.0, 20.0), Vec2::new(2.0, -1.0), 4.0, 1.5).unwrap()
    }

    #[test]
    fn new_body_starts_at_time_zero() {
        let b = mover();
        assert_eq!(b.id(), BodyId(3));
        assert_eq!(b.reference_time(), 0.0);
        assert_eq!(b.reference_position(), Vec2::new(10.0, 20.0));
        assert_eq!(b.mass(), 4.0);
        assert_eq!(b.radius(), 1.5);
    }

    #[test]
    fn rejects_non_positive_mass_and_radius() {
        let err = Body::new(BodyId(0), Vec2::ZERO, Vec2::ZERO, 0.0, 1.0).unwrap_err();
        assert!(matches!(err, BmError::InvalidBody { .. }));
        assert!(err.to_string().contains("mass"));

        let err = Body::new(BodyId(0), Vec2::ZERO, Vec2::ZERO, 1.0, -2.0).unwrap_err();
        assert!(err.to_string().contains("radius"));
    }

    #[test]
    fn rejects_non_finite_kinematics() {
        assert!(Body::new(BodyId(0), Vec2::new(f64::NAN, 0.0), Vec2::ZERO, 1.0, 1.0).is_err());
        assert!(Body::new(BodyId(0), Vec2::ZERO, Vec2::new(0.0, f64::INFINITY), 1.0, 1.0).is_err());
    }

    #[test]
    fn position_is_linear_in_time() {
        let b = mover();
        assert_eq!(b.position_at(0.0), Vec2::new(10.0, 20.0));
        assert_eq!(b.position_at(3.0), Vec2::new(16.0, 17.0));
    }

    #[test]
    fn advance_moves_reference_point() {
        let mut b = mover();
        b.advance_to(2.5);
        assert_eq!(b.reference_time(), 2.5);
        assert_eq!(b.reference_position(), Vec2::new(15.0, 17.5));
        // The trajectory itself is unchanged.
        assert_eq!(b.position_at(3.0), Vec2::new(16.0, 17.0));
    }

    #[test]
    fn advance_to_same_time_is_noop() {
        let mut b = mover();
        b.advance_to(1.0);
        let before = b.clone();
        b.advance_to(1.0);
        assert_eq!(b, before);
    }

    #[test]
    fn energy_and_momentum() {
        let b = Body::new(BodyId(0), Vec2::ZERO, Vec2::new(3.0, 4.0), 2.0, 1.0).unwrap();
        assert!((b.kinetic_energy() - 25.0).abs() < 1e-12);
        assert_eq!(b.momentum(), Vec2::new(6.0, 8.0));
    }

    #[test]
    fn snapshot_is_detached_from_body() {
        let mut b = mover();
        let snap = b.snapshot();
        b.advance_to(5.0);
        b.set_velocity(Vec2::new(-9.0, 0.0));
        assert_eq!(snap.reference_time, 0.0);
        assert_eq!(snap.velocity, Vec2::new(2.0, -1.0));
        assert_eq!(snap.position_at(3.0), Vec2::new(16.0, 17.0));
        assert_eq!(snap.id, b.id());
    }
}

#[cfg(test)]
mod config {
    use crate::{BmError, GasConfig};

    #[test]
    fn defaults_match_reference_constants() {
        let cfg = GasConfig::default();
        assert_eq!(cfg.light.count, 500);
        assert_eq!(cfg.heavy.count, 10);
        assert_eq!(cfg.light.mass, 10.0);
        assert_eq!(cfg.heavy.mass, 100.0);
        assert_eq!(cfg.light.radius, 5.0);
        assert_eq!(cfg.heavy.radius, 10.0);
        assert_eq!((cfg.width, cfg.height), (800, 600));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn channel_capacity_is_twice_population() {
        let cfg = GasConfig::new(7, 3, 100, 100, 1);
        assert_eq!(cfg.total_bodies(), 10);
        assert_eq!(cfg.channel_capacity(), 20);
    }

    #[test]
    fn oversized_population_rejected_without_overflow() {
        let cfg = GasConfig::new(usize::MAX, 1, 800, 600, 1);
        assert_eq!(cfg.total_bodies(), usize::MAX);
        assert_eq!(cfg.channel_capacity(), usize::MAX);
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("body id range"), "{err}");

        let cfg = GasConfig::new(u32::MAX as usize, 1, 800, 600, 1);
        assert!(matches!(cfg.validate(), Err(BmError::Config(_))));
    }

    #[test]
    fn empty_population_rejected() {
        let err = GasConfig::new(0, 0, 100, 100, 1).validate().unwrap_err();
        assert!(matches!(err, BmError::Config(_)));
    }

    #[test]
    fn single_empty_class_allowed() {
        assert!(GasConfig::new(0, 4, 100, 100, 1).validate().is_ok());
        assert!(GasConfig::new(4, 0, 100, 100, 1).validate().is_ok());
    }

    #[test]
    fn zero_dimension_rejected() {
        assert!(GasConfig::new(5, 1, 0, 100, 1).validate().is_err());
        assert!(GasConfig::new(5, 1, 100, 0, 1).validate().is_err());
    }

    #[test]
    fn bad_profile_values_rejected() {
        let mut cfg = GasConfig::new(5, 1, 100, 100, 1);
        cfg.light.mass = 0.0;
        assert!(cfg.validate().unwrap_err().to_string().contains("light mass"));

        let mut cfg = GasConfig::new(5, 1, 100, 100, 1);
        cfg.heavy.radius = f64::NAN;
        assert!(cfg.validate().unwrap_err().to_string().contains("heavy radius"));

        let mut cfg = GasConfig::new(5, 1, 100, 100, 1);
        cfg.light.max_start_speed = -1.0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn body_must_fit_in_box() {
        // Heavy radius 10 needs a box strictly wider and taller than 20.
        assert!(GasConfig::new(0, 1, 19, 100, 1).validate().is_err());
        assert!(GasConfig::new(0, 1, 20, 100, 1).validate().is_err());
        assert!(GasConfig::new(0, 1, 100, 20, 1).validate().is_err());
        assert!(GasConfig::new(0, 1, 21, 21, 1).validate().is_ok());
    }
}

#[cfg(test)]
mod rng {
    use crate::SimRng;

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = SimRng::new(12345);
        let mut r2 = SimRng::new(12345);
        for _ in 0..100 {
            assert_eq!(r1.unit_vector(), r2.unit_vector());
            assert_eq!(r1.speed_below(0.3), r2.speed_below(0.3));
        }
    }

    #[test]
    fn unit_vectors_have_unit_length() {
        let mut rng = SimRng::new(9);
        for _ in 0..1000 {
            let v = rng.unit_vector();
            assert!((v.length() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn speed_in_bounds() {
        let mut rng = SimRng::new(0);
        for _ in 0..1000 {
            let s = rng.speed_below(0.45);
            assert!((0.0..0.45).contains(&s));
        }
        assert_eq!(rng.speed_below(0.0), 0.0);
    }
}

#[cfg(test)]
mod wall {
    use crate::Wall;

    #[test]
    fn orientation() {
        assert!(Wall::Left.is_vertical());
        assert!(Wall::Right.is_vertical());
        assert!(!Wall::Top.is_vertical());
        assert!(!Wall::Bottom.is_vertical());
    }

    #[test]
    fn display() {
        assert_eq!(Wall::Bottom.to_string(), "bottom");
    }
}
