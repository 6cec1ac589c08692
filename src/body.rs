use crate::{
    error::{Result, SimulationError},
    vector::VectorExt,
};
use cgmath::*;
use std::fmt;

/// Display radius per cube root of mass.
pub const RADIUS_SCALE: f64 = 1.5;

#[derive(Debug, Clone)]
pub struct Body {
    mass: f64,
    radius: f64,
    is_static: bool,
    position: Vector2<f64>,
    velocity: Vector2<f64>,
    acceleration: Vector2<f64>,
    dragged: bool,
}

impl Body {
    pub fn new(
        position: Vector2<f64>,
        velocity: Vector2<f64>,
        mass: f64,
        is_static: bool,
    ) -> Result<Self> {
        if !(mass.is_finite() && mass > 0.0) {
            return Err(SimulationError::InvalidMass(mass));
        }
        if !position.all_finite() {
            return Err(SimulationError::NonFinite("position"));
        }
        if !velocity.all_finite() {
            return Err(SimulationError::NonFinite("velocity"));
        }
        Ok(Self {
            mass,
            radius: mass.cbrt() * RADIUS_SCALE,
            is_static,
            position,
            velocity,
            acceleration: Vector2::zero(),
            dragged: false,
        })
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    pub fn is_dragged(&self) -> bool {
        self.dragged
    }

    pub fn position(&self) -> Vector2<f64> {
        self.position
    }

    pub fn velocity(&self) -> Vector2<f64> {
        self.velocity
    }

    pub fn acceleration(&self) -> Vector2<f64> {
        self.acceleration
    }

    /// Adds `force / mass` to the acceleration accumulator.
    pub fn apply_force(&mut self, force: Vector2<f64>) {
        if self.is_static {
            return;
        }
        if !force.all_finite() {
            log::warn!("non-finite force {force:?} replaced by zero");
            return;
        }
        self.acceleration += force / self.mass;
    }

    pub fn reset_acceleration(&mut self) {
        self.acceleration = Vector2::zero();
    }

    /// First Verlet half: `x += v dt + a dt^2 / 2`, with `a` still holding a(t).
    pub fn update_position(&mut self, dt: f64) {
        if self.is_static || self.dragged {
            return;
        }
        let position = self.position + self.velocity * dt + self.acceleration * (0.5 * dt * dt);
        if !position.all_finite() {
            log::warn!("non-finite position {position:?}, body stopped in place");
            self.velocity = Vector2::zero();
            return;
        }
        self.position = position;
    }

    /// Second Verlet half. `acceleration_at_start` is a(t); the accumulator
    /// must already hold a(t + dt).
    pub fn update_velocity(&mut self, acceleration_at_start: Vector2<f64>, dt: f64) {
        if self.is_static || self.dragged {
            return;
        }
        if !acceleration_at_start.all_finite() {
            log::warn!("non-finite step-start acceleration {acceleration_at_start:?} replaced by zero");
        }
        if !self.acceleration.all_finite() {
            log::warn!("non-finite acceleration {:?} replaced by zero", self.acceleration);
            self.acceleration = Vector2::zero();
        }
        let average = acceleration_at_start.finite_or_zero() + self.acceleration;
        let velocity = self.velocity + average * (0.5 * dt);
        if !velocity.all_finite() {
            log::warn!("non-finite velocity {velocity:?} replaced by zero");
        }
        self.velocity = velocity.finite_or_zero();
    }

    /// Momentum is dropped on purpose: the body restarts from rest when released.
    pub fn start_drag(&mut self) -> bool {
        if self.is_static {
            return false;
        }
        self.dragged = true;
        self.velocity = Vector2::zero();
        self.acceleration = Vector2::zero();
        true
    }

    pub fn drag_to(&mut self, position: Vector2<f64>) -> bool {
        if !self.dragged || !position.all_finite() {
            return false;
        }
        self.position = position;
        true
    }

    pub fn stop_drag(&mut self) {
        self.dragged = false;
    }

    pub fn contains(&self, point: Vector2<f64>) -> bool {
        (point - self.position).magnitude2() < self.radius * self.radius
    }

    pub fn kinetic_energy(&self) -> f64 {
        if self.is_static {
            return 0.0;
        }
        0.5 * self.mass * self.velocity.magnitude2()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BodyId(u64);

impl BodyId {
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One entry of the body table. The acceleration snapshot lives next to the
/// body it belongs to so the two can never fall out of step.
#[derive(Debug, Clone)]
pub struct Slot {
    pub id: BodyId,
    pub body: Body,
    pub acceleration_at_start: Vector2<f64>,
}

/// Bodies in insertion order. Ids are minted in increasing order and only
/// ever appended, so the table stays sorted by id and lookups binary search.
#[derive(Debug, Clone)]
pub struct BodyList {
    slots: Vec<Slot>,
    next_id: u64,
}

impl BodyList {
    pub fn new() -> Self {
        Self {
            slots: vec![],
            next_id: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn index_of(&self, id: BodyId) -> Option<usize> {
        self.slots.binary_search_by_key(&id, |slot| slot.id).ok()
    }

    pub fn push(&mut self, body: Body) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        self.slots.push(Slot {
            id,
            body,
            acceleration_at_start: Vector2::zero(),
        });
        id
    }

    pub fn remove(&mut self, id: BodyId) -> Option<Body> {
        self.index_of(id).map(|index| self.slots.remove(index).body)
    }

    pub fn contains(&self, id: BodyId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.index_of(id).map(|index| &self.slots[index].body)
    }

    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.index_of(id).map(|index| &mut self.slots[index].body)
    }

    pub fn first(&self) -> Option<&Body> {
        self.slots.first().map(|slot| &slot.body)
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = (BodyId, &Body)> + DoubleEndedIterator {
        self.slots.iter().map(|slot| (slot.id, &slot.body))
    }

    pub fn iter_mut(&mut self) -> impl ExactSizeIterator<Item = (BodyId, &mut Body)> {
        self.slots.iter_mut().map(|slot| (slot.id, &mut slot.body))
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub(crate) fn slots_mut(&mut self) -> &mut [Slot] {
        &mut self.slots
    }

    pub fn iter_pairs(&self, mut f: impl FnMut(&Body, &Body)) {
        for i in 0..self.slots.len() {
            for j in i + 1..self.slots.len() {
                f(&self.slots[i].body, &self.slots[j].body)
            }
        }
    }

    pub fn iter_mut_pairs(&mut self, mut f: impl FnMut(&mut Body, &mut Body)) {
        for i in 0..self.slots.len() {
            let (head, tail) = self.slots.split_at_mut(i + 1);
            let a = &mut head[i].body;
            for b in tail.iter_mut() {
                f(a, &mut b.body)
            }
        }
    }
}

impl Default for BodyList {
    fn default() -> Self {
        Self::new()
    }
}
