use crate::body::BodyId;
use std::fmt;

pub type Result<T, E = SimulationError> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    UnknownBody(BodyId),
    StaticBody(BodyId),
    NotDragged(BodyId),
    InvalidMass(f64),
    InvalidParameter { name: &'static str, value: f64 },
    NonFinite(&'static str),
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownBody(id) => write!(f, "no body with id {id}"),
            Self::StaticBody(id) => write!(f, "body {id} is static and cannot be moved"),
            Self::NotDragged(id) => write!(f, "body {id} is not being dragged"),
            Self::InvalidMass(mass) => write!(f, "mass must be positive and finite, got {mass}"),
            Self::InvalidParameter { name, value } => write!(f, "invalid value {value} for {name}"),
            Self::NonFinite(what) => write!(f, "{what} has a non-finite component"),
        }
    }
}

impl std::error::Error for SimulationError {}
