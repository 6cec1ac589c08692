use crate::{body::BodyList, gravity};
use cgmath::{Vector2, Zero};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EnergyReport {
    pub kinetic: f64,
    pub potential: f64,
    pub total: f64,
}

pub fn kinetic_energy(bodies: &BodyList) -> f64 {
    bodies.iter().map(|(_, body)| body.kinetic_energy()).sum()
}

/// Sum over unordered pairs, each pair counted once.
pub fn potential_energy(bodies: &BodyList, gravity: f64) -> f64 {
    let mut potential = 0.0;
    bodies.iter_pairs(|a, b| potential += gravity::potential_energy(a, b, gravity));
    potential
}

pub fn energy(bodies: &BodyList, gravity: f64) -> EnergyReport {
    let kinetic = kinetic_energy(bodies);
    let potential = potential_energy(bodies, gravity);
    EnergyReport {
        kinetic,
        potential,
        total: kinetic + potential,
    }
}

/// Mass-weighted mean position of the bodies that can move. Static bodies are
/// left out; with nothing left the origin is returned.
pub fn center_of_mass(bodies: &BodyList) -> Vector2<f64> {
    let (total_mass, weighted) = bodies
        .iter()
        .filter(|(_, body)| !body.is_static())
        .fold((0.0, Vector2::<f64>::zero()), |(mass, sum), (_, body)| {
            (mass + body.mass(), sum + body.position() * body.mass())
        });
    if total_mass == 0.0 {
        return Vector2::zero();
    }
    weighted / total_mass
}
