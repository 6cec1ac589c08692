//! Direct-summation gravitational N-body sandbox.
//!
//! The [`universe::Universe`] owns the body table and advances it with
//! Velocity Verlet; the [`world::World`] wraps it with the run/pause flag,
//! selection and dragging that an interactive front end needs.

pub mod body;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod gravity;
pub mod universe;
pub mod vector;
pub mod world;

pub use body::{Body, BodyId, BodyList};
pub use config::SimulationConfig;
pub use diagnostics::EnergyReport;
pub use error::{Result, SimulationError};
pub use universe::{Parameters, Universe};
pub use world::World;
