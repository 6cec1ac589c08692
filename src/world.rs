use crate::{
    body::{Body, BodyId, BodyList},
    config::{SUN_MASS, SimulationConfig},
    diagnostics::EnergyReport,
    error::{Result, SimulationError},
    universe::{Parameters, Universe},
};
use cgmath::Vector2;
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::f64::consts::TAU;

#[derive(Debug, Clone, Copy)]
struct Drag {
    id: BodyId,
    paused_simulation: bool,
}

/// Everything a front end talks to: the universe plus the run/pause flag,
/// selection and the body currently held by the pointer.
///
/// The host calls [`World::update`] once per frame; commands are applied
/// between ticks.
pub struct World {
    config: SimulationConfig,
    universe: Universe,
    running: bool,
    selected: Option<BodyId>,
    drag: Option<Drag>,
    ticks: u64,
    rng: StdRng,
}

impl World {
    pub fn new(config: SimulationConfig) -> Result<Self> {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    pub fn with_seed(config: SimulationConfig, seed: u64) -> Result<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: SimulationConfig, rng: StdRng) -> Result<Self> {
        config.validate()?;
        let mut world = Self {
            universe: Universe::new(config.params()?),
            config,
            running: true,
            selected: None,
            drag: None,
            ticks: 0,
            rng,
        };
        world.reset()?;
        Ok(world)
    }

    /// Reseeds the initial bodies. G and dt keep their current values and the
    /// simulation is left running.
    pub fn reset(&mut self) -> Result<()> {
        let params = self.universe.params();
        let mut universe = Universe::new(params);
        for body in self.config.initial_bodies(params.gravity()) {
            universe.add_body(body.position, body.velocity, body.mass, body.is_static)?;
        }
        log::info!("reset with {} bodies", universe.bodies().len());

        self.universe = universe;
        self.selected = None;
        self.drag = None;
        self.running = true;
        self.ticks = 0;
        Ok(())
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Replaces the settings used by later frames, resets and random planets.
    /// G and dt of the running universe are left alone; call [`World::reset`]
    /// or the parameter setters for those.
    pub fn set_config(&mut self, config: SimulationConfig) -> Result<()> {
        config
            .validate()
            .inspect_err(|err| log::warn!("rejected config: {err}"))?;
        self.config = config;
        Ok(())
    }

    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    pub fn bodies(&self) -> &BodyList {
        self.universe.bodies()
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.universe.body(id)
    }

    pub fn body_count(&self) -> usize {
        self.universe.bodies().len()
    }

    pub fn time(&self) -> f64 {
        self.universe.time()
    }

    pub fn params(&self) -> Parameters {
        self.universe.params()
    }

    pub fn energy(&self) -> EnergyReport {
        self.universe.energy()
    }

    pub fn center_of_mass(&self) -> Vector2<f64> {
        self.universe.center_of_mass()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn resume(&mut self) {
        self.running = true;
    }

    pub fn toggle_pause(&mut self) {
        self.running = !self.running;
    }

    /// Runs this frame's ticks if the simulation is not paused.
    pub fn update(&mut self) {
        if !self.running {
            return;
        }
        for _ in 0..self.config.steps_per_frame {
            self.step();
        }
    }

    /// A single tick, paused or not.
    pub fn step(&mut self) {
        self.universe.step();
        self.ticks += 1;

        let interval = self.config.debug_log_interval;
        if interval != 0 && self.ticks % interval == 1 % interval {
            self.log_diagnostics();
        }
    }

    fn log_diagnostics(&self) {
        if !log::log_enabled!(log::Level::Debug) {
            return;
        }
        log::debug!("tick {} at t = {:.2}", self.ticks, self.time());
        for (id, body) in self.bodies().iter().filter(|(_, body)| !body.is_static()) {
            let acceleration = body.acceleration();
            log::debug!(
                "  body {id} acceleration ({:.5}, {:.5})",
                acceleration.x,
                acceleration.y
            );
        }
        let energy = self.energy();
        log::debug!(
            "  kinetic {:.1} potential {:.1} total {:.1}",
            energy.kinetic,
            energy.potential,
            energy.total
        );
    }

    pub fn set_gravity(&mut self, gravity: f64) -> Result<()> {
        self.universe
            .set_gravity(gravity)
            .inspect_err(|err| log::warn!("{err}"))
    }

    pub fn set_time_step(&mut self, time_step: f64) -> Result<()> {
        self.universe
            .set_time_step(time_step)
            .inspect_err(|err| log::warn!("{err}"))
    }

    pub fn add_body(
        &mut self,
        position: Vector2<f64>,
        velocity: Vector2<f64>,
        mass: f64,
        is_static: bool,
    ) -> Result<BodyId> {
        let id = self
            .universe
            .add_body(position, velocity, mass, is_static)
            .inspect_err(|err| log::warn!("could not add body: {err}"))?;
        log::info!("added body {id}, {} bodies", self.body_count());
        Ok(id)
    }

    /// Adds a planet somewhere around `center`, moving tangentially at the
    /// circular speed for the first body's mass.
    pub fn add_random_body(&mut self, center: Vector2<f64>, max_distance: f64) -> Result<BodyId> {
        if !(max_distance.is_finite() && max_distance > 0.0) {
            return Err(SimulationError::InvalidParameter {
                name: "max_distance",
                value: max_distance,
            });
        }
        let angle = self.rng.random_range(0.0..TAU);
        let distance = self.rng.random_range(max_distance * 0.2..=max_distance);
        let mass = self
            .rng
            .random_range(self.config.random_mass_min..=self.config.random_mass_max);

        let central_mass = self.bodies().first().map_or(SUN_MASS, Body::mass);
        let speed = (self.params().gravity() * central_mass / distance.max(1.0)).sqrt();
        let (sin, cos) = angle.sin_cos();

        self.add_body(
            center + Vector2::new(cos, sin) * distance,
            Vector2::new(-sin, cos) * speed,
            mass,
            false,
        )
    }

    pub fn remove_body(&mut self, id: BodyId) -> Result<Body> {
        let body = self
            .universe
            .remove_body(id)
            .inspect_err(|err| log::warn!("could not remove body: {err}"))?;
        if self.selected == Some(id) {
            self.selected = None;
        }
        if self.drag.is_some_and(|drag| drag.id == id) {
            self.end_drag();
        }
        log::info!("removed body {id}, {} bodies", self.body_count());
        Ok(body)
    }

    pub fn remove_selected(&mut self) -> Option<Body> {
        let id = self.selected?;
        self.remove_body(id).ok()
    }

    pub fn selected(&self) -> Option<BodyId> {
        self.selected
    }

    pub fn selected_body(&self) -> Option<(BodyId, &Body)> {
        let id = self.selected?;
        Some((id, self.body(id)?))
    }

    pub fn select(&mut self, id: Option<BodyId>) -> Result<()> {
        if let Some(id) = id
            && !self.bodies().contains(id)
        {
            return Err(SimulationError::UnknownBody(id));
        }
        self.selected = id;
        Ok(())
    }

    /// Topmost body under `point`; later bodies are drawn over earlier ones.
    pub fn pick(&self, point: Vector2<f64>) -> Option<BodyId> {
        self.bodies()
            .iter()
            .rev()
            .find(|(_, body)| body.contains(point))
            .map(|(id, _)| id)
    }

    /// Click selection: the topmost body under `point`, unless it is static.
    /// Anything else clears the selection.
    pub fn select_at(&mut self, point: Vector2<f64>) -> Option<BodyId> {
        self.selected = self
            .pick(point)
            .filter(|&id| self.body(id).is_some_and(|body| !body.is_static()));
        self.selected
    }

    pub fn dragged(&self) -> Option<BodyId> {
        self.drag.map(|drag| drag.id)
    }

    /// Selects the body and takes it out of the integration. A running
    /// simulation is paused until the drag ends.
    pub fn begin_drag(&mut self, id: BodyId) -> Result<()> {
        if self.drag.is_some() {
            self.end_drag();
        }
        self.universe.start_drag(id)?;
        self.selected = Some(id);
        self.drag = Some(Drag {
            id,
            paused_simulation: self.running,
        });
        self.running = false;
        Ok(())
    }

    /// Moves the held body. Without an active drag this does nothing.
    pub fn drag_to(&mut self, position: Vector2<f64>) -> Result<()> {
        match self.drag {
            Some(drag) => self.universe.drag_body(drag.id, position),
            None => Ok(()),
        }
    }

    pub fn end_drag(&mut self) {
        let Some(drag) = self.drag.take() else {
            return;
        };
        // The body may have been removed mid-drag.
        let _ = self.universe.release_drag(drag.id);
        if drag.paused_simulation {
            self.running = true;
        }
    }
}
