//! Elastic collision resolution.

use bm_core::{Body, Vec2, Wall};

/// Resolve a perfectly elastic collision between `a` and `b` at `time`.
///
/// Both bodies are advanced to `time` first, so the contact normal is taken
/// between their centres at the moment of impact.  Only the velocity
/// components along that normal change, by the 1D elastic formula:
///
/// ```text
/// u1' = (u1(m1 − m2) + 2 m2 u2) / (m1 + m2)
/// u2' = (u2(m2 − m1) + 2 m1 u1) / (m1 + m2)
/// ```
///
/// Total momentum and kinetic energy are conserved up to rounding.  If the
/// centres coincide there is no normal and velocities are left unchanged.
pub fn resolve_particles(time: f64, a: &mut Body, b: &mut Body) {
    a.advance_to(time);
    b.advance_to(time);

    let n = (b.reference_position() - a.reference_position()).normalize_or_zero();
    if n == Vec2::ZERO {
        return;
    }

    let (m1, m2) = (a.mass(), b.mass());
    let u1 = a.velocity().dot(n);
    let u2 = b.velocity().dot(n);

    let v1 = (u1 * (m1 - m2) + 2.0 * m2 * u2) / (m1 + m2);
    let v2 = (u2 * (m2 - m1) + 2.0 * m1 * u1) / (m1 + m2);

    a.set_velocity(a.velocity() + n * (v1 - u1));
    b.set_velocity(b.velocity() + n * (v2 - u2));
}

/// Reflect `body` off `wall` at `time`: the normal velocity component flips
/// sign, the tangential one is untouched.
pub fn resolve_wall(time: f64, body: &mut Body, wall: Wall) {
    body.advance_to(time);
    let v = body.velocity();
    let reflected = if wall.is_vertical() {
        Vec2::new(-v.x, v.y)
    } else {
        Vec2::new(v.x, -v.y)
    };
    body.set_velocity(reflected);
}
