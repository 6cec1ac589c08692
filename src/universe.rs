use crate::{
    body::{Body, BodyId, BodyList},
    diagnostics::{self, EnergyReport},
    error::{Result, SimulationError},
    gravity,
};
use cgmath::Vector2;

pub const DEFAULT_GRAVITY: f64 = 1.0;
pub const DEFAULT_TIME_STEP: f64 = 0.1;

/// Global constants of a run. Changes are picked up by the next tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameters {
    gravity: f64,
    time_step: f64,
}

impl Parameters {
    pub fn new(gravity: f64, time_step: f64) -> Result<Self> {
        let mut params = Self::default();
        params.set_gravity(gravity)?;
        params.set_time_step(time_step)?;
        Ok(params)
    }

    pub fn gravity(&self) -> f64 {
        self.gravity
    }

    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    pub fn set_gravity(&mut self, gravity: f64) -> Result<()> {
        if !(gravity.is_finite() && gravity >= 0.0) {
            return Err(SimulationError::InvalidParameter {
                name: "gravity",
                value: gravity,
            });
        }
        self.gravity = gravity;
        Ok(())
    }

    pub fn set_time_step(&mut self, time_step: f64) -> Result<()> {
        if !(time_step.is_finite() && time_step > 0.0) {
            return Err(SimulationError::InvalidParameter {
                name: "time_step",
                value: time_step,
            });
        }
        self.time_step = time_step;
        Ok(())
    }
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            time_step: DEFAULT_TIME_STEP,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Universe {
    bodies: BodyList,
    params: Parameters,
    time: f64,
}

impl Universe {
    pub fn new(params: Parameters) -> Self {
        Self {
            bodies: BodyList::new(),
            params,
            time: 0.0,
        }
    }

    pub fn bodies(&self) -> &BodyList {
        &self.bodies
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id)
    }

    pub fn params(&self) -> Parameters {
        self.params
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn set_gravity(&mut self, gravity: f64) -> Result<()> {
        self.params.set_gravity(gravity)
    }

    pub fn set_time_step(&mut self, time_step: f64) -> Result<()> {
        self.params.set_time_step(time_step)
    }

    pub fn add_body(
        &mut self,
        position: Vector2<f64>,
        velocity: Vector2<f64>,
        mass: f64,
        is_static: bool,
    ) -> Result<BodyId> {
        let body = Body::new(position, velocity, mass, is_static)?;
        Ok(self.bodies.push(body))
    }

    pub fn remove_body(&mut self, id: BodyId) -> Result<Body> {
        self.bodies
            .remove(id)
            .ok_or(SimulationError::UnknownBody(id))
    }

    fn body_mut(&mut self, id: BodyId) -> Result<&mut Body> {
        self.bodies
            .get_mut(id)
            .ok_or(SimulationError::UnknownBody(id))
    }

    pub fn start_drag(&mut self, id: BodyId) -> Result<()> {
        if self.body_mut(id)?.start_drag() {
            Ok(())
        } else {
            Err(SimulationError::StaticBody(id))
        }
    }

    pub fn drag_body(&mut self, id: BodyId, position: Vector2<f64>) -> Result<()> {
        let body = self.body_mut(id)?;
        if !body.is_dragged() {
            return Err(SimulationError::NotDragged(id));
        }
        if body.drag_to(position) {
            Ok(())
        } else {
            Err(SimulationError::NonFinite("drag position"))
        }
    }

    pub fn release_drag(&mut self, id: BodyId) -> Result<()> {
        self.body_mut(id)?.stop_drag();
        Ok(())
    }

    /// One Velocity Verlet tick. Every phase runs over all bodies before the
    /// next one starts.
    pub fn step(&mut self) {
        let Parameters {
            gravity: g,
            time_step: dt,
        } = self.params;

        for slot in self.bodies.slots_mut() {
            slot.acceleration_at_start = slot.body.acceleration();
        }
        for (_, body) in self.bodies.iter_mut() {
            body.update_position(dt);
        }
        for (_, body) in self.bodies.iter_mut() {
            body.reset_acceleration();
        }
        self.bodies.iter_mut_pairs(|a, b| {
            // The raw pair force, so a static `a` still pulls on `b`.
            let force = gravity::pair_force(a, b, g);
            a.apply_force(force);
            b.apply_force(-force);
        });
        for slot in self.bodies.slots_mut() {
            slot.body
                .update_velocity(slot.acceleration_at_start, dt);
        }

        self.time += dt;
    }

    pub fn energy(&self) -> EnergyReport {
        diagnostics::energy(&self.bodies, self.params.gravity)
    }

    pub fn center_of_mass(&self) -> Vector2<f64> {
        diagnostics::center_of_mass(&self.bodies)
    }
}

impl Default for Universe {
    fn default() -> Self {
        Self::new(Parameters::default())
    }
}
