use approx::assert_relative_eq;
use cgmath::{InnerSpace, Vector2, Zero};
use orbit_sandbox::{BodyId, Parameters, Universe};
use std::f64::consts::PI;

const G: f64 = 1.0;

fn sun_and_planet(dt: f64) -> (Universe, BodyId, BodyId) {
    let mut universe = Universe::new(Parameters::new(G, dt).unwrap());
    let sun = universe
        .add_body(Vector2::zero(), Vector2::zero(), 1000.0, true)
        .unwrap();
    let speed = (G * 1000.0 / 200.0).sqrt();
    let planet = universe
        .add_body(Vector2::new(200.0, 0.0), Vector2::new(0.0, speed), 10.0, false)
        .unwrap();
    (universe, sun, planet)
}

fn period(radius: f64, central_mass: f64) -> f64 {
    2.0 * PI * (radius.powi(3) / (G * central_mass)).sqrt()
}

#[test]
fn circular_orbit_returns_to_start_after_one_period() {
    let dt = 0.1;
    let (mut universe, _, planet) = sun_and_planet(dt);
    let start = universe.body(planet).unwrap().position();

    let steps = (period(200.0, 1000.0) / dt).round() as usize;
    for _ in 0..steps {
        universe.step();
    }

    let end = universe.body(planet).unwrap().position();
    assert!(
        (end - start).magnitude() < 1.0,
        "planet ended at {end:?}, started at {start:?}"
    );
    assert_relative_eq!(end.magnitude(), 200.0, max_relative = 5e-3);
}

#[test]
fn energy_drift_is_small_over_one_period() {
    for dt in [0.1, 0.5] {
        let (mut universe, _, _) = sun_and_planet(dt);
        let initial = universe.energy().total;
        let steps = (period(200.0, 1000.0) / dt).round() as usize;
        for _ in 0..steps {
            universe.step();
        }
        let drift = (universe.energy().total - initial).abs() / initial.abs();
        assert!(drift < 0.01, "dt = {dt}: relative energy drift {drift:e}");
    }
}

#[test]
fn free_binary_conserves_energy() {
    let dt = 0.5;
    let (heavy, light, separation) = (1000.0, 10.0, 200.0);
    let relative_speed = (G * (heavy + light) / separation).sqrt();

    let mut universe = Universe::new(Parameters::new(G, dt).unwrap());
    universe
        .add_body(
            Vector2::new(-separation * light / (heavy + light), 0.0),
            Vector2::new(0.0, -relative_speed * light / (heavy + light)),
            heavy,
            false,
        )
        .unwrap();
    universe
        .add_body(
            Vector2::new(separation * heavy / (heavy + light), 0.0),
            Vector2::new(0.0, relative_speed * heavy / (heavy + light)),
            light,
            false,
        )
        .unwrap();

    let initial = universe.energy().total;
    let initial_com = universe.center_of_mass();
    let steps = (period(separation, heavy + light) / dt).round() as usize;
    for _ in 0..steps {
        universe.step();
    }

    let drift = (universe.energy().total - initial).abs() / initial.abs();
    assert!(drift < 0.01, "relative energy drift {drift:e}");
    assert!((universe.center_of_mass() - initial_com).magnitude() < 1e-6);
}

#[test]
fn static_body_never_changes() {
    let (mut universe, sun, _) = sun_and_planet(0.2);
    universe
        .add_body(Vector2::new(-80.0, 30.0), Vector2::new(1.0, 2.0), 50.0, false)
        .unwrap();
    for _ in 0..2000 {
        universe.step();
    }
    let sun = universe.body(sun).unwrap();
    assert_eq!(sun.position(), Vector2::zero());
    assert_eq!(sun.velocity(), Vector2::zero());
    assert_eq!(sun.acceleration(), Vector2::zero());
}

#[test]
fn near_collision_stays_finite() {
    let mut universe = Universe::new(Parameters::new(G, 0.1).unwrap());
    universe
        .add_body(Vector2::zero(), Vector2::zero(), 1e6, false)
        .unwrap();
    universe
        .add_body(Vector2::new(1e-12, 0.0), Vector2::zero(), 1e-3, false)
        .unwrap();
    universe
        .add_body(Vector2::zero(), Vector2::zero(), 5.0, false)
        .unwrap();
    for _ in 0..500 {
        universe.step();
    }
    for (_, body) in universe.bodies().iter() {
        assert!(body.position().x.is_finite() && body.position().y.is_finite());
        assert!(body.velocity().x.is_finite() && body.velocity().y.is_finite());
    }
    assert!(universe.energy().total.is_finite());
}

#[test]
fn ids_stay_ordered_across_adds_and_removes() {
    let (mut universe, _, planet) = sun_and_planet(0.1);
    let mut ids = vec![planet];
    for i in 0..12 {
        universe.step();
        let id = universe
            .add_body(
                Vector2::new(50.0 + 10.0 * i as f64, 25.0),
                Vector2::new(0.0, 1.0),
                1.0 + i as f64,
                i % 4 == 0,
            )
            .unwrap();
        ids.push(id);

        if i % 3 == 2 {
            let victim = ids.remove(ids.len() / 2);
            universe.remove_body(victim).unwrap();
        }
    }
    let listed: Vec<_> = universe.bodies().iter().skip(1).map(|(id, _)| id).collect();
    assert_eq!(listed, ids);
}

#[test]
fn tick_after_removal_uses_each_bodys_own_acceleration() {
    let dt = 0.1;
    let (mut universe, sun, planet) = sun_and_planet(dt);
    let others: Vec<_> = (0..4)
        .map(|i| {
            let angle = i as f64 * 1.3;
            universe
                .add_body(
                    Vector2::new(angle.cos(), angle.sin()) * (120.0 + 40.0 * i as f64),
                    Vector2::new(-angle.sin(), angle.cos()) * 2.0,
                    3.0 + i as f64,
                    false,
                )
                .unwrap()
        })
        .collect();
    for _ in 0..25 {
        universe.step();
    }
    universe.remove_body(others[1]).unwrap();

    let before: Vec<_> = universe
        .bodies()
        .iter()
        .map(|(id, body)| (id, body.position(), body.velocity(), body.acceleration()))
        .collect();
    assert_eq!(before.len(), 5);
    universe.step();

    for (id, position, velocity, acceleration) in before {
        let body = universe.body(id).unwrap();
        if id == sun {
            assert_eq!(body.position(), position);
            continue;
        }
        let expected_position = position + velocity * dt + acceleration * (0.5 * dt * dt);
        assert!(
            (body.position() - expected_position).magnitude() < 1e-9,
            "body {id} moved to {:?}, expected {expected_position:?}",
            body.position()
        );
        let expected_velocity = velocity + (acceleration + body.acceleration()) * (0.5 * dt);
        assert!(
            (body.velocity() - expected_velocity).magnitude() < 1e-9,
            "body {id} has velocity {:?}, expected {expected_velocity:?}",
            body.velocity()
        );
    }
    assert!(universe.body(planet).is_some());
}

#[test]
fn huge_masses_keep_attracting() {
    let mut universe = Universe::new(Parameters::new(G, 0.1).unwrap());
    let a = universe
        .add_body(Vector2::zero(), Vector2::zero(), 1e200, false)
        .unwrap();
    let b = universe
        .add_body(Vector2::new(100.0, 0.0), Vector2::zero(), 1e200, false)
        .unwrap();
    universe.step();
    let pull_a = universe.body(a).unwrap().acceleration();
    let pull_b = universe.body(b).unwrap().acceleration();
    assert!(pull_a.x.is_finite() && pull_a.x > 0.0);
    assert_eq!(pull_b, -pull_a);
}

#[test]
fn removal_targets_identity_not_position() {
    let (mut universe, sun, planet) = sun_and_planet(0.1);
    let third = universe
        .add_body(Vector2::new(0.0, 400.0), Vector2::new(1.0, 0.0), 7.0, false)
        .unwrap();
    for _ in 0..10 {
        universe.step();
    }
    let third_state = universe.body(third).unwrap().position();

    universe.remove_body(sun).unwrap();
    assert!(universe.body(sun).is_none());
    assert_eq!(universe.body(planet).unwrap().mass(), 10.0);
    assert_eq!(universe.body(third).unwrap().position(), third_state);
    let ids: Vec<_> = universe.bodies().iter().map(|(id, _)| id).collect();
    assert_eq!(ids, vec![planet, third]);
}

#[test]
fn add_then_remove_restores_counts() {
    let (mut universe, _, _) = sun_and_planet(0.1);
    universe.step();
    let bodies = universe.bodies().len();

    let id = universe
        .add_body(Vector2::new(10.0, 10.0), Vector2::zero(), 2.0, false)
        .unwrap();
    universe.remove_body(id).unwrap();

    assert_eq!(universe.bodies().len(), bodies);
    assert!(universe.remove_body(id).is_err());
}

#[test]
fn larger_time_step_scales_displacement() {
    let mut universe = Universe::new(Parameters::new(G, 0.1).unwrap());
    let id = universe
        .add_body(Vector2::zero(), Vector2::new(3.0, 4.0), 1.0, false)
        .unwrap();

    universe.step();
    let after_first = universe.body(id).unwrap().position();
    universe.step();
    let small = universe.body(id).unwrap().position() - after_first;

    universe.set_time_step(0.3).unwrap();
    let before = universe.body(id).unwrap().position();
    universe.step();
    let large = universe.body(id).unwrap().position() - before;

    assert_relative_eq!(large.magnitude() / small.magnitude(), 3.0, max_relative = 1e-9);
    // Earlier ticks are not recomputed.
    assert_relative_eq!(before.x, 0.6, max_relative = 1e-12);
    assert_relative_eq!(universe.time(), 0.5, max_relative = 1e-12);
}

#[test]
fn gravity_change_applies_from_next_tick() {
    let (mut universe, _, planet) = sun_and_planet(0.1);
    universe.step();
    let weak = universe.body(planet).unwrap().acceleration().magnitude();
    universe.set_gravity(4.0 * G).unwrap();
    assert_eq!(universe.body(planet).unwrap().acceleration().magnitude(), weak);
    universe.step();
    let strong = universe.body(planet).unwrap().acceleration().magnitude();
    assert_relative_eq!(strong / weak, 4.0, max_relative = 1e-3);
}
