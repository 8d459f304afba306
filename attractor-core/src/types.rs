use crate::error::{Error, Result};
use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of coordinates in a system's phase space.
///
/// Serialized as the plain integers `2` and `3`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Dimension {
    Two,
    Three,
}

impl Dimension {
    pub fn axes(self) -> usize {
        match self {
            Dimension::Two => 2,
            Dimension::Three => 3,
        }
    }
}

impl TryFrom<u8> for Dimension {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            2 => Ok(Dimension::Two),
            3 => Ok(Dimension::Three),
            n => Err(Error::InvalidDimension(n)),
        }
    }
}

impl From<Dimension> for u8 {
    fn from(dim: Dimension) -> u8 {
        dim.axes() as u8
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}D", self.axes())
    }
}

/// A point in phase space.
///
/// The variant fixes the dimension for the lifetime of the value. The type
/// is `Copy`, so a trail snapshot can never alias the live state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StateVector {
    Planar(DVec2),
    Spatial(DVec3),
}

impl StateVector {
    pub fn zero(dim: Dimension) -> Self {
        match dim {
            Dimension::Two => StateVector::Planar(DVec2::ZERO),
            Dimension::Three => StateVector::Spatial(DVec3::ZERO),
        }
    }

    /// Builds a state from raw coordinates.
    ///
    /// ### Errors
    /// [`Error::InvalidStateLength`] unless `coords` has exactly 2 or 3 entries.
    pub fn from_slice(coords: &[f64]) -> Result<Self> {
        match *coords {
            [x, y] => Ok(StateVector::Planar(DVec2::new(x, y))),
            [x, y, z] => Ok(StateVector::Spatial(DVec3::new(x, y, z))),
            _ => Err(Error::InvalidStateLength(coords.len())),
        }
    }

    pub fn dimension(&self) -> Dimension {
        match self {
            StateVector::Planar(_) => Dimension::Two,
            StateVector::Spatial(_) => Dimension::Three,
        }
    }

    pub fn coords(&self) -> Vec<f64> {
        match self {
            StateVector::Planar(v) => v.to_array().to_vec(),
            StateVector::Spatial(v) => v.to_array().to_vec(),
        }
    }

    /// Lifts the state into 3-D space for rendering; planar states sit on `z = 0`.
    pub fn to_vec3(&self) -> DVec3 {
        match *self {
            StateVector::Planar(v) => v.extend(0.0),
            StateVector::Spatial(v) => v,
        }
    }

    /// `false` once a diverging system has produced an infinite or NaN coordinate.
    pub fn is_finite(&self) -> bool {
        match self {
            StateVector::Planar(v) => v.is_finite(),
            StateVector::Spatial(v) => v.is_finite(),
        }
    }
}

impl From<DVec2> for StateVector {
    fn from(v: DVec2) -> Self {
        StateVector::Planar(v)
    }
}

impl From<DVec3> for StateVector {
    fn from(v: DVec3) -> Self {
        StateVector::Spatial(v)
    }
}
