//! Collision-time prediction.
//!
//! Both predictors return *absolute* simulation times, measured on the same
//! clock as `Body::reference_time`.

use bm_core::{Body, Wall};

/// The first wall a body will reach on its current leg.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WallHit {
    /// Absolute time of contact.
    pub time: f64,
    pub wall: Wall,
}

/// Absolute time at which `a` and `b` first touch, or `f64::INFINITY` if
/// they never do on their current legs.
///
/// Both bodies are first projected to a common instant — the later of their
/// two reference times — and the contact condition
///
/// ```text
/// |Δp + Δv·s|² = (r_a + r_b)²
/// ```
///
/// is solved for the smallest `s ≥ 0`.  Only approaching pairs
/// (`Δp·Δv < 0`) with a strictly positive discriminant collide, so grazing
/// trajectories, separating or overlapping-and-separating pairs, and pairs
/// with no relative motion all come back as infinity.
pub fn time_to_collide(a: &Body, b: &Body) -> f64 {
    let common = a.reference_time().max(b.reference_time());

    let dp = b.position_at(common) - a.position_at(common);
    let dv = b.velocity() - a.velocity();

    let aa = dv.dot(dv);
    if aa == 0.0 {
        return f64::INFINITY;
    }
    let bb = dp.dot(dv);
    let reach = a.radius() + b.radius();
    let cc = dp.dot(dp) - reach * reach;

    let disc = bb * bb - aa * cc;
    if disc > 0.0 && bb < 0.0 {
        let s = (-bb - disc.sqrt()) / aa;
        if s >= 0.0 {
            return common + s;
        }
    }
    f64::INFINITY
}

/// The first wall `body` reaches inside the `[0, width] × [0, height]` box,
/// or `None` if the body is at rest.
///
/// Each axis is considered independently; an axis with zero velocity never
/// contributes.  When both axes would be hit at exactly the same instant the
/// `y` wall is reported.  A body that has drifted past a boundary by
/// floating-point error reports contact at its reference time rather than in
/// the past.
pub fn time_to_hit_wall(body: &Body, width: f64, height: f64) -> Option<WallHit> {
    let p = body.reference_position();
    let v = body.velocity();
    let r = body.radius();

    let (tx, x_wall) = axis_contact(p.x, v.x, r, width, Wall::Left, Wall::Right);
    let (ty, y_wall) = axis_contact(p.y, v.y, r, height, Wall::Top, Wall::Bottom);

    let (rel, wall) = if tx < ty { (tx, x_wall) } else { (ty, y_wall) };
    if !rel.is_finite() {
        return None;
    }
    Some(WallHit {
        time: body.reference_time() + rel.max(0.0),
        wall,
    })
}

/// Relative time to contact along one axis with extent `[0, extent]`.
#[inline]
fn axis_contact(pos: f64, vel: f64, radius: f64, extent: f64, near: Wall, far: Wall) -> (f64, Wall) {
    if vel > 0.0 {
        ((extent - radius - pos) / vel, far)
    } else if vel < 0.0 {
        ((radius - pos) / vel, near)
    } else {
        (f64::INFINITY, near)
    }
}
