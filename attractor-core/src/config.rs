use crate::attractor::AttractorKind;
use crate::error::{Error, Result};
use crate::types::Dimension;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Trail length used by the built-in presets.
pub const DEFAULT_TRAIL_LENGTH: usize = 10_000;
/// Integration step for the continuous systems.
pub const DEFAULT_DT: f64 = 0.01;

fn default_dt() -> f64 {
    DEFAULT_DT
}

fn default_speed() -> u32 {
    5
}

/// Immutable description of the system to simulate.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AttractorParams {
    pub coefficients: Vec<f64>,
    /// Variant name, resolved through [`AttractorKind`]'s `FromStr`.
    pub name: String,
    pub dimension: Dimension,
    pub trail_length: usize,
}

impl AttractorParams {
    /// The coefficient sets the visualizer ships with.
    pub fn preset(kind: AttractorKind) -> Self {
        let coefficients = match kind {
            AttractorKind::Lorenz => vec![10.0, 28.0, 8.0 / 3.0],
            AttractorKind::Clifford => vec![-1.4, 1.6, 1.0, 0.7],
            AttractorKind::DeJong => vec![-2.0, -2.0, -1.2, 2.0],
            AttractorKind::Aizawa => vec![0.95, 0.7, 0.6, 3.5, 0.25],
        };
        Self {
            coefficients,
            name: kind.name().to_string(),
            dimension: kind.dimension(),
            trail_length: DEFAULT_TRAIL_LENGTH,
        }
    }

    pub fn with_trail_length(mut self, trail_length: usize) -> Self {
        self.trail_length = trail_length;
        self
    }

    /// Resolves the variant and checks the record against it.
    ///
    /// ### Errors
    /// - [`Error::UnknownVariant`] for an unrecognized `name`.
    /// - [`Error::ZeroCapacity`] if `trail_length` is `0`.
    /// - [`Error::DimensionMismatch`] if `dimension` disagrees with the variant.
    /// - [`Error::CoefficientCount`] if the tuple has the wrong length.
    pub fn validate(&self) -> Result<AttractorKind> {
        let kind: AttractorKind = self.name.parse()?;
        if self.trail_length == 0 {
            return Err(Error::ZeroCapacity);
        }
        if self.dimension != kind.dimension() {
            return Err(Error::DimensionMismatch {
                expected: kind.dimension(),
                found: self.dimension,
            });
        }
        if self.coefficients.len() != kind.coefficient_count() {
            return Err(Error::CoefficientCount {
                kind: kind.name(),
                expected: kind.coefficient_count(),
                found: self.coefficients.len(),
            });
        }
        Ok(kind)
    }
}

/// Everything needed to start a simulation session, loadable from JSON.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SessionConfig {
    pub attractor: AttractorParams,
    /// RK4 step size; ignored by the discrete maps.
    #[serde(default = "default_dt")]
    pub dt: f64,
    /// Steps per tick.
    #[serde(default = "default_speed")]
    pub speed: u32,
    /// Seed for the initial-state sampler; `None` draws from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl SessionConfig {
    pub fn new(attractor: AttractorParams) -> Self {
        Self {
            attractor,
            dt: DEFAULT_DT,
            speed: default_speed(),
            seed: None,
        }
    }

    pub fn validate(&self) -> Result<AttractorKind> {
        if self.speed == 0 {
            return Err(Error::ZeroSpeed);
        }
        self.attractor.validate()
    }

    /// Save the configuration as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load and validate a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        let config: SessionConfig = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }
}
