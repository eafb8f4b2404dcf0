//! Fluent builder for constructing an [`Engine`].

use bm_core::{BmError, Body, BodyId, GasConfig, LIGHT_SPEED_SCALE, SimRng, Vec2};

use crate::{Engine, SimResult};

/// Initial state of one body, validated at [`EngineBuilder::build`].
#[derive(Copy, Clone, Debug)]
struct BodySpec {
    position: Vec2,
    velocity: Vec2,
    mass:     f64,
    radius:   f64,
}

/// Fluent builder for [`Engine`].
///
/// Bodies receive ids `0..n` in the order they are added.  Use
/// [`from_config`][Self::from_config] for the standard randomized
/// population, or add bodies by hand for scripted scenarios:
///
/// ```rust,ignore
/// let mut engine = EngineBuilder::new(100.0, 100.0)
///     .body(Vec2::new(40.0, 50.0), Vec2::new(1.0, 0.0), 10.0, 5.0)
///     .body(Vec2::new(60.0, 50.0), Vec2::new(-1.0, 0.0), 10.0, 5.0)
///     .build()?;
/// let diff = engine.step()?;
/// ```
///
/// A builder with no bodies is accepted; the resulting engine has an empty
/// schedule and every `step` fails with
/// [`SimError::ScheduleExhausted`][crate::SimError::ScheduleExhausted].
#[derive(Clone, Debug)]
pub struct EngineBuilder {
    width:  f64,
    height: f64,
    bodies: Vec<BodySpec>,
}

impl EngineBuilder {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height, bodies: Vec::new() }
    }

    /// Validate `config` and lay out its population: light bodies first,
    /// then heavy, all at the centre of the box.
    ///
    /// Each body draws a direction uniformly from the unit circle, then a
    /// speed uniformly from `[0, bound)` where `bound` is the class's
    /// `max_start_speed`, scaled by [`LIGHT_SPEED_SCALE`] for light bodies.
    pub fn from_config(config: &GasConfig) -> SimResult<Self> {
        config.validate()?;

        let width = config.width as f64;
        let height = config.height as f64;
        let centre = Vec2::new(width / 2.0, height / 2.0);
        let mut rng = SimRng::new(config.seed);

        let classes = [
            (&config.light, config.light.max_start_speed * LIGHT_SPEED_SCALE),
            (&config.heavy, config.heavy.max_start_speed),
        ];

        let mut builder = Self::new(width, height);
        builder.bodies.reserve(config.total_bodies());
        for (profile, bound) in classes {
            for _ in 0..profile.count {
                let direction = rng.unit_vector();
                let speed = rng.speed_below(bound);
                builder = builder.body(centre, direction * speed, profile.mass, profile.radius);
            }
        }
        Ok(builder)
    }

    /// Append a body.  Its leg starts at `t = 0`.
    pub fn body(mut self, position: Vec2, velocity: Vec2, mass: f64, radius: f64) -> Self {
        self.bodies.push(BodySpec { position, velocity, mass, radius });
        self
    }

    /// Number of bodies added so far.
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Validate every body, predict the initial schedule, and return a
    /// ready-to-step [`Engine`].
    pub fn build(self) -> SimResult<Engine> {
        if !self.width.is_finite() || self.width <= 0.0 || !self.height.is_finite() || self.height <= 0.0 {
            return Err(BmError::Config(format!(
                "box must be finite and non-empty, got {}x{}",
                self.width, self.height
            ))
            .into());
        }

        let mut bodies = Vec::with_capacity(self.bodies.len());
        for (i, spec) in self.bodies.into_iter().enumerate() {
            let id = BodyId::try_from(i)
                .map_err(|_| BmError::Config(format!("body index {i} exceeds the id range")))?;
            let body = Body::new(id, spec.position, spec.velocity, spec.mass, spec.radius)?;
            let diameter = 2.0 * body.radius();
            if diameter >= self.width || diameter >= self.height {
                return Err(BmError::Config(format!(
                    "{id} (radius {}) does not fit in a {}x{} box",
                    body.radius(),
                    self.width,
                    self.height
                ))
                .into());
            }
            bodies.push(body);
        }

        Engine::seeded(bodies, self.width, self.height)
    }
}
