//! Deterministic simulation core for strange-attractor visualizations.
//!
//! Main components:
//! - [`types`] — phase-space state vectors and dimensions.
//! - [`attractor`] — the Clifford, De Jong, Lorenz and Aizawa systems.
//! - [`integrator`] — map iteration and fixed-step RK4.
//! - [`trail`] — bounded, resizable history of visited states.
//! - [`color`] — hue-rotating rainbow colouring of trails.
//! - [`model`] — a running attractor with its trail and sampler.
//! - [`simulation`] — tick driver producing render frames.
//! - [`config`] — attractor parameters, presets and session files.
//! - [`error`] — the crate error type.

pub mod attractor;
pub mod color;
pub mod config;
pub mod error;
pub mod integrator;
pub mod model;
pub mod simulation;
pub mod trail;
pub mod types;

pub use attractor::{Attractor, AttractorKind};
pub use config::{AttractorParams, SessionConfig};
pub use error::{Error, Result};
pub use model::AttractorModel;
pub use simulation::{Frame, Simulation, TrailPoint};
pub use trail::TrailBuffer;
pub use types::{Dimension, StateVector};
