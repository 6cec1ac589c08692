//! Softened inverse-square attraction.
//!
//! Separations below [`SOFTENING`] are treated as exactly [`SOFTENING`], so
//! close encounters stay bounded instead of blowing up.

use crate::{body::Body, vector::VectorExt};
use cgmath::{InnerSpace, Vector2, Zero};

pub const SOFTENING: f64 = 5.0;
pub const SOFTENING_SQUARED: f64 = SOFTENING * SOFTENING;
/// Cap on a single pair's force magnitude; products of huge masses would
/// otherwise overflow to infinity and be discarded.
pub const MAX_PAIR_FORCE: f64 = 1e300;

/// Force on `a` from `b`, ignoring whether either body is static.
///
/// Coincident bodies have no direction between them and get the zero force.
pub fn pair_force(a: &Body, b: &Body, gravity: f64) -> Vector2<f64> {
    let a_to_b = b.position() - a.position();
    if gravity == 0.0 {
        return Vector2::zero();
    }
    let distance_squared = a_to_b.magnitude2().max(SOFTENING_SQUARED);
    let strength = (gravity * (a.mass() * b.mass()) / distance_squared).min(MAX_PAIR_FORCE);
    a_to_b.set_magnitude(strength)
}

/// Force that actually moves `a`: zero when `a` is static.
pub fn attract(a: &Body, b: &Body, gravity: f64) -> Vector2<f64> {
    if a.is_static() {
        return Vector2::zero();
    }
    pair_force(a, b, gravity)
}

pub fn potential_energy(a: &Body, b: &Body, gravity: f64) -> f64 {
    if a.is_static() && b.is_static() {
        return 0.0;
    }
    let distance = (b.position() - a.position()).magnitude().max(SOFTENING);
    -gravity * (a.mass() * b.mass()) / distance
}
