//! The closed family of strange attractors and their update rules.
//!
//! [`AttractorKind`] names a variant; [`Attractor`] carries a variant
//! together with its typed coefficient tuple and knows how to advance a
//! [`StateVector`] by one tick.

use crate::error::{Error, Result};
use crate::integrator::{self, Scheme};
use crate::types::{Dimension, StateVector};
use glam::{DVec2, DVec3};
use rand::Rng;
use std::fmt;
use std::str::FromStr;

/// Name of an attractor variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AttractorKind {
    Clifford,
    DeJong,
    Lorenz,
    Aizawa,
}

impl AttractorKind {
    pub const ALL: [AttractorKind; 4] = [
        AttractorKind::Clifford,
        AttractorKind::DeJong,
        AttractorKind::Lorenz,
        AttractorKind::Aizawa,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AttractorKind::Clifford => "Clifford",
            AttractorKind::DeJong => "DeJong",
            AttractorKind::Lorenz => "Lorenz",
            AttractorKind::Aizawa => "Aizawa",
        }
    }

    pub fn dimension(self) -> Dimension {
        match self {
            AttractorKind::Clifford | AttractorKind::DeJong => Dimension::Two,
            AttractorKind::Lorenz | AttractorKind::Aizawa => Dimension::Three,
        }
    }

    pub fn coefficient_count(self) -> usize {
        match self {
            AttractorKind::Lorenz => 3,
            AttractorKind::Clifford | AttractorKind::DeJong => 4,
            AttractorKind::Aizawa => 5,
        }
    }

    pub fn scheme(self) -> Scheme {
        match self {
            AttractorKind::Clifford | AttractorKind::DeJong => Scheme::MapIteration,
            AttractorKind::Lorenz | AttractorKind::Aizawa => Scheme::RungeKutta4,
        }
    }

    /// Picks one variant uniformly at random.
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

impl fmt::Display for AttractorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AttractorKind {
    type Err = Error;

    /// Case-insensitive; spaces, dashes and underscores are ignored so
    /// `"De Jong"` and `"de_jong"` both resolve to [`AttractorKind::DeJong`].
    fn from_str(s: &str) -> Result<Self> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "clifford" => Ok(AttractorKind::Clifford),
            "dejong" => Ok(AttractorKind::DeJong),
            "lorenz" => Ok(AttractorKind::Lorenz),
            "aizawa" => Ok(AttractorKind::Aizawa),
            _ => Err(Error::UnknownVariant(s.to_string())),
        }
    }
}

/// An attractor variant with its coefficients bound.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Attractor {
    Clifford { a: f64, b: f64, c: f64, d: f64 },
    DeJong { a: f64, b: f64, c: f64, d: f64 },
    Lorenz { sigma: f64, rho: f64, beta: f64 },
    Aizawa { a: f64, b: f64, c: f64, d: f64, e: f64 },
}

impl Attractor {
    /// Binds a coefficient tuple to a variant.
    ///
    /// Only the tuple length is checked; any real values are accepted.
    ///
    /// ### Errors
    /// [`Error::CoefficientCount`] if `coefficients` does not have exactly
    /// [`AttractorKind::coefficient_count`] entries.
    pub fn new(kind: AttractorKind, coefficients: &[f64]) -> Result<Self> {
        let attractor = match (kind, coefficients) {
            (AttractorKind::Clifford, &[a, b, c, d]) => Attractor::Clifford { a, b, c, d },
            (AttractorKind::DeJong, &[a, b, c, d]) => Attractor::DeJong { a, b, c, d },
            (AttractorKind::Lorenz, &[sigma, rho, beta]) => Attractor::Lorenz { sigma, rho, beta },
            (AttractorKind::Aizawa, &[a, b, c, d, e]) => Attractor::Aizawa { a, b, c, d, e },
            _ => {
                return Err(Error::CoefficientCount {
                    kind: kind.name(),
                    expected: kind.coefficient_count(),
                    found: coefficients.len(),
                });
            }
        };
        Ok(attractor)
    }

    pub fn kind(&self) -> AttractorKind {
        match self {
            Attractor::Clifford { .. } => AttractorKind::Clifford,
            Attractor::DeJong { .. } => AttractorKind::DeJong,
            Attractor::Lorenz { .. } => AttractorKind::Lorenz,
            Attractor::Aizawa { .. } => AttractorKind::Aizawa,
        }
    }

    pub fn dimension(&self) -> Dimension {
        self.kind().dimension()
    }

    /// Advances `state` by one tick: a single map iteration for the 2-D
    /// maps, one RK4 step of size `dt` for the flows.
    ///
    /// ### Panics
    /// Panics if `state` does not have this attractor's dimension.
    /// [`crate::model::AttractorModel`] rejects such states in `set_state`
    /// and is the only caller.
    pub(crate) fn advance(&self, state: StateVector, dt: f64) -> StateVector {
        match (*self, state) {
            (Attractor::Clifford { a, b, c, d }, StateVector::Planar(s)) => {
                StateVector::Planar(integrator::iterate_map(s, |p| clifford(p, a, b, c, d)))
            }
            (Attractor::DeJong { a, b, c, d }, StateVector::Planar(s)) => {
                StateVector::Planar(integrator::iterate_map(s, |p| de_jong(p, a, b, c, d)))
            }
            (Attractor::Lorenz { sigma, rho, beta }, StateVector::Spatial(s)) => {
                StateVector::Spatial(integrator::rk4(s, dt, |p| lorenz(p, sigma, rho, beta)))
            }
            (Attractor::Aizawa { a, b, c, d, e }, StateVector::Spatial(s)) => {
                StateVector::Spatial(integrator::rk4(s, dt, |p| aizawa(p, a, b, c, d, e)))
            }
            (attractor, state) => panic!(
                "{} attractor cannot advance a {} state",
                attractor.kind(),
                state.dimension()
            ),
        }
    }
}

/// Clifford map: `x' = sin(a y) + c cos(a x)`, `y' = sin(b x) + d cos(b y)`.
#[inline]
pub fn clifford(p: DVec2, a: f64, b: f64, c: f64, d: f64) -> DVec2 {
    DVec2::new(
        (a * p.y).sin() + c * (a * p.x).cos(),
        (b * p.x).sin() + d * (b * p.y).cos(),
    )
}

/// Peter de Jong map: `x' = sin(a y) - cos(b x)`, `y' = sin(c x) - cos(d y)`.
#[inline]
pub fn de_jong(p: DVec2, a: f64, b: f64, c: f64, d: f64) -> DVec2 {
    DVec2::new(
        (a * p.y).sin() - (b * p.x).cos(),
        (c * p.x).sin() - (d * p.y).cos(),
    )
}

/// Lorenz field.
#[inline]
pub fn lorenz(p: DVec3, sigma: f64, rho: f64, beta: f64) -> DVec3 {
    DVec3::new(
        sigma * (p.y - p.x),
        p.x * (rho - p.z) - p.y,
        p.x * p.y - beta * p.z,
    )
}

/// Aizawa field.
#[inline]
pub fn aizawa(p: DVec3, a: f64, b: f64, c: f64, d: f64, e: f64) -> DVec3 {
    let DVec3 { x, y, z } = p;
    DVec3::new(
        (z - b) * x - d * y,
        d * x + (z - b) * y,
        c + a * z - z.powi(3) / 3.0 - (x * x + y * y) * (1.0 + e * z) + 0.1 * z * x.powi(3),
    )
}
