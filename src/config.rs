use crate::{
    error::{Result, SimulationError},
    universe::{DEFAULT_GRAVITY, DEFAULT_TIME_STEP, Parameters},
};
use anyhow::Context;
use cgmath::{Vector2, Zero};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const SUN_MASS: f64 = 1000.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyConfig {
    pub position: Vector2<f64>,
    #[serde(default = "zero_vector")]
    pub velocity: Vector2<f64>,
    pub mass: f64,
    #[serde(default)]
    pub is_static: bool,
}

fn zero_vector() -> Vector2<f64> {
    Vector2::zero()
}

/// Startup settings. Every field is optional in the JSON form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub gravity: f64,
    pub time_step: f64,
    pub steps_per_frame: usize,
    /// Ticks between debug dumps of accelerations and energy. 0 turns them off.
    pub debug_log_interval: u64,
    pub random_mass_min: f64,
    pub random_mass_max: f64,
    /// Replaces the built-in sun and two planets when set.
    pub bodies: Option<Vec<BodyConfig>>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            time_step: DEFAULT_TIME_STEP,
            steps_per_frame: 1,
            debug_log_interval: 120,
            random_mass_min: 1.0,
            random_mass_max: 15.0,
            bodies: None,
        }
    }
}

impl SimulationConfig {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let config: Self = serde_json::from_str(json).context("malformed simulation config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("could not read config {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("in config {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        self.params()?;
        let mass_range_ok = self.random_mass_min.is_finite()
            && self.random_mass_min > 0.0
            && self.random_mass_max.is_finite()
            && self.random_mass_max >= self.random_mass_min;
        if !mass_range_ok {
            return Err(SimulationError::InvalidParameter {
                name: "random_mass_max",
                value: self.random_mass_max,
            });
        }
        if let Some(bodies) = &self.bodies {
            for body in bodies {
                if !(body.mass.is_finite() && body.mass > 0.0) {
                    return Err(SimulationError::InvalidMass(body.mass));
                }
            }
        }
        Ok(())
    }

    pub fn params(&self) -> Result<Parameters> {
        Parameters::new(self.gravity, self.time_step)
    }

    /// Bodies a reset seeds the universe with.
    pub fn initial_bodies(&self, gravity: f64) -> Vec<BodyConfig> {
        match &self.bodies {
            Some(bodies) => bodies.clone(),
            None => default_scenario(gravity),
        }
    }
}

/// A static sun with two planets: one on a circular orbit, the other at 80%
/// of circular speed.
pub fn default_scenario(gravity: f64) -> Vec<BodyConfig> {
    let circular_speed = |distance: f64| (gravity * SUN_MASS / distance).sqrt();
    vec![
        BodyConfig {
            position: Vector2::zero(),
            velocity: Vector2::zero(),
            mass: SUN_MASS,
            is_static: true,
        },
        BodyConfig {
            position: Vector2::new(200.0, 0.0),
            velocity: Vector2::new(0.0, circular_speed(200.0)),
            mass: 10.0,
            is_static: false,
        },
        BodyConfig {
            position: Vector2::new(0.0, -300.0),
            velocity: Vector2::new(circular_speed(300.0) * 0.8, 0.0),
            mass: 15.0,
            is_static: false,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn empty_json_gives_defaults() {
        let config = SimulationConfig::from_json("{}").unwrap();
        assert_eq!(config, SimulationConfig::default());
    }

    #[test]
    fn partial_json_overrides_fields() {
        let config = SimulationConfig::from_json(
            r#"{
                "gravity": 2.5,
                "steps_per_frame": 4,
                "bodies": [
                    { "position": { "x": 0.0, "y": 0.0 }, "mass": 500.0, "is_static": true },
                    { "position": { "x": 80.0, "y": 0.0 }, "velocity": { "x": 0.0, "y": 4.0 }, "mass": 2.0 }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(config.gravity, 2.5);
        assert_eq!(config.time_step, DEFAULT_TIME_STEP);
        assert_eq!(config.steps_per_frame, 4);
        let bodies = config.initial_bodies(config.gravity);
        assert_eq!(bodies.len(), 2);
        assert!(bodies[0].is_static);
        assert_eq!(bodies[0].velocity, Vector2::zero());
        assert_eq!(bodies[1].velocity, Vector2::new(0.0, 4.0));
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(SimulationConfig::from_json(r#"{ "time_step": 0.0 }"#).is_err());
        assert!(SimulationConfig::from_json(r#"{ "gravity": -1.0 }"#).is_err());
        assert!(
            SimulationConfig::from_json(r#"{ "random_mass_min": 5.0, "random_mass_max": 1.0 }"#)
                .is_err()
        );
        assert!(
            SimulationConfig::from_json(
                r#"{ "bodies": [ { "position": { "x": 0.0, "y": 0.0 }, "mass": 0.0 } ] }"#
            )
            .is_err()
        );
        assert!(SimulationConfig::from_json("not json").is_err());
    }

    #[test]
    fn default_scenario_uses_circular_speeds() {
        let bodies = default_scenario(1.0);
        assert_eq!(bodies.len(), 3);
        assert!(bodies[0].is_static);
        assert_relative_eq!(bodies[1].velocity.y, (1000.0f64 / 200.0).sqrt());
        assert_relative_eq!(bodies[2].velocity.x, (1000.0f64 / 300.0).sqrt() * 0.8);
        assert_relative_eq!(
            default_scenario(4.0)[1].velocity.y,
            2.0 * 5.0f64.sqrt(),
            max_relative = 1e-12
        );
    }
}
