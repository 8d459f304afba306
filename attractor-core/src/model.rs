use crate::attractor::{Attractor, AttractorKind};
use crate::config::AttractorParams;
use crate::error::{Error, Result};
use crate::trail::TrailBuffer;
use crate::types::{Dimension, StateVector};
use glam::{DVec2, DVec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

/// Half-width of the box initial states are drawn from.
pub const INITIAL_SPREAD: f64 = 0.1;

/// A running attractor: current position, bounded history and the
/// sampler used to (re)start it.
///
/// All randomness happens at construction and in [`AttractorModel::reset`];
/// [`AttractorModel::step`] is deterministic.
#[derive(Debug)]
pub struct AttractorModel {
    params: AttractorParams,
    attractor: Attractor,
    dt: f64,
    state: StateVector,
    trail: TrailBuffer,
    rng: StdRng,
}

impl AttractorModel {
    /// Builds a model from validated parameters.
    ///
    /// The initial state has each coordinate drawn uniformly from
    /// `[-0.1, 0.1)` using `rng`, and is recorded as the first trail entry.
    ///
    /// ### Parameters
    /// - `params` - Variant, coefficients, dimension and trail length.
    /// - `dt` - RK4 step size; unused by the discrete maps.
    /// - `rng` - Sampler for the initial state and later resets.
    ///
    /// ### Errors
    /// Any error from [`AttractorParams::validate`]; nothing is constructed.
    pub fn new(params: AttractorParams, dt: f64, mut rng: StdRng) -> Result<Self> {
        let kind = params.validate()?;
        let attractor = Attractor::new(kind, &params.coefficients)?;
        let mut trail = TrailBuffer::new(params.trail_length)?;

        let state = random_state(params.dimension, &mut rng);
        trail.append(state);

        info!(
            attractor = %kind,
            scheme = ?kind.scheme(),
            dt,
            trail_length = params.trail_length,
            "created attractor model"
        );

        Ok(Self {
            params,
            attractor,
            dt,
            state,
            trail,
            rng,
        })
    }

    /// Same as [`AttractorModel::new`] with a sampler seeded from `seed`.
    pub fn seeded(params: AttractorParams, dt: f64, seed: u64) -> Result<Self> {
        Self::new(params, dt, StdRng::seed_from_u64(seed))
    }

    /// Same as [`AttractorModel::new`] with a sampler seeded from OS entropy.
    pub fn from_entropy(params: AttractorParams, dt: f64) -> Result<Self> {
        Self::new(params, dt, StdRng::from_os_rng())
    }

    /// Advances by one tick and records the new state in the trail.
    ///
    /// Returns a copy of the new state; mutating it does not affect the model.
    pub fn step(&mut self) -> StateVector {
        self.state = self.attractor.advance(self.state, self.dt);
        self.trail.append(self.state);
        self.state
    }

    /// Draws a fresh random state, clears the trail and records the new
    /// state as its first entry.
    pub fn reset(&mut self) {
        self.state = random_state(self.params.dimension, &mut self.rng);
        self.trail.clear();
        self.trail.append(self.state);
        debug!(attractor = %self.kind(), "reset attractor state");
    }

    /// Drops the trail history, keeping the current state.
    pub fn clear_trail(&mut self) {
        self.trail.clear();
    }

    /// Overwrites the current state without touching the trail.
    ///
    /// ### Errors
    /// [`Error::DimensionMismatch`] if `state` has the wrong dimension.
    pub fn set_state(&mut self, state: StateVector) -> Result<()> {
        let expected = self.params.dimension;
        if state.dimension() != expected {
            return Err(Error::DimensionMismatch {
                expected,
                found: state.dimension(),
            });
        }
        self.state = state;
        Ok(())
    }

    /// Changes how many past states are kept; see [`TrailBuffer::resize`].
    pub fn set_trail_capacity(&mut self, capacity: usize) -> Result<()> {
        self.trail.resize(capacity)?;
        debug!(capacity, "trail capacity changed");
        Ok(())
    }

    pub fn state(&self) -> StateVector {
        self.state
    }

    pub fn trail(&self) -> &TrailBuffer {
        &self.trail
    }

    pub fn params(&self) -> &AttractorParams {
        &self.params
    }

    pub fn attractor(&self) -> &Attractor {
        &self.attractor
    }

    pub fn kind(&self) -> AttractorKind {
        self.attractor.kind()
    }

    pub fn dimension(&self) -> Dimension {
        self.params.dimension
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }
}

fn random_state(dim: Dimension, rng: &mut impl Rng) -> StateVector {
    let mut coord = || rng.random_range(-INITIAL_SPREAD..INITIAL_SPREAD);
    match dim {
        Dimension::Two => StateVector::Planar(DVec2::new(coord(), coord())),
        Dimension::Three => StateVector::Spatial(DVec3::new(coord(), coord(), coord())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integrator;

    fn lorenz() -> AttractorParams {
        AttractorParams::preset(AttractorKind::Lorenz).with_trail_length(8)
    }

    #[test]
    fn new_seeds_trail_with_initial_state() {
        let model = AttractorModel::seeded(lorenz(), 0.01, 1).unwrap();
        assert_eq!(model.trail().len(), 1);
        assert_eq!(model.trail().latest(), Some(&model.state()));
        assert_eq!(model.dimension(), Dimension::Three);
    }

    #[test]
    fn initial_state_lies_in_spread_box() {
        for seed in 0..32 {
            let model = AttractorModel::seeded(lorenz(), 0.01, seed).unwrap();
            assert!(
                model
                    .state()
                    .coords()
                    .iter()
                    .all(|c| (-INITIAL_SPREAD..INITIAL_SPREAD).contains(c))
            );
        }
    }

    #[test]
    fn same_seed_same_initial_state() {
        let a = AttractorModel::seeded(lorenz(), 0.01, 77).unwrap();
        let b = AttractorModel::seeded(lorenz(), 0.01, 77).unwrap();
        assert_eq!(a.state(), b.state());
    }

    #[test]
    fn new_rejects_zero_trail_length() {
        let err = AttractorModel::seeded(lorenz().with_trail_length(0), 0.01, 0).unwrap_err();
        assert!(matches!(err, Error::ZeroCapacity));
        assert!(err.is_configuration());
    }

    #[test]
    fn new_rejects_unknown_variant() {
        let mut params = lorenz();
        params.name = "Halvorsen".into();
        let err = AttractorModel::seeded(params, 0.01, 0).unwrap_err();
        assert!(matches!(err, Error::UnknownVariant(_)));
    }

    #[test]
    fn step_appends_copy_and_returns_new_state() {
        let mut model = AttractorModel::seeded(lorenz(), 0.01, 3).unwrap();
        let before = model.state();

        let mut returned = model.step();
        assert_ne!(returned, before);
        assert_eq!(model.state(), returned);
        assert_eq!(model.trail().to_vec(), vec![before, returned]);

        // The returned value is a snapshot.
        returned = StateVector::zero(Dimension::Three);
        assert_ne!(model.state(), returned);
    }

    #[test]
    fn step_is_deterministic_from_a_fixed_state() {
        for kind in AttractorKind::ALL {
            let mut a = AttractorModel::seeded(AttractorParams::preset(kind), 0.01, 1).unwrap();
            let mut b = AttractorModel::seeded(AttractorParams::preset(kind), 0.01, 2).unwrap();
            let start = StateVector::from_slice(&vec![0.05; kind.dimension().axes()]).unwrap();
            a.set_state(start).unwrap();
            b.set_state(start).unwrap();
            assert_eq!(a.step(), b.step(), "{kind} diverged between identical runs");
        }
    }

    #[test]
    fn lorenz_step_matches_rk4_reference() {
        let mut model = AttractorModel::seeded(lorenz(), 0.01, 0).unwrap();
        let start = DVec3::splat(0.1);
        model.set_state(StateVector::Spatial(start)).unwrap();

        let f = |p: DVec3| {
            DVec3::new(
                10.0 * (p.y - p.x),
                p.x * (28.0 - p.z) - p.y,
                p.x * p.y - 8.0 / 3.0 * p.z,
            )
        };
        let expected = integrator::rk4(start, 0.01, f);

        let StateVector::Spatial(got) = model.step() else {
            panic!("Lorenz must stay 3-D");
        };
        assert!((got - expected).abs().max_element() < 1e-9);
    }

    #[test]
    fn clifford_step_from_origin() {
        let params = AttractorParams::preset(AttractorKind::Clifford).with_trail_length(4);
        let mut model = AttractorModel::seeded(params, 0.01, 0).unwrap();
        model.set_state(StateVector::Planar(DVec2::ZERO)).unwrap();
        assert_eq!(model.step(), StateVector::Planar(DVec2::new(1.0, 0.7)));
    }

    #[test]
    fn trail_respects_capacity_while_stepping() {
        let mut model = AttractorModel::seeded(lorenz(), 0.01, 5).unwrap();
        let mut last = Vec::new();
        for _ in 0..20 {
            last.push(model.step());
        }
        assert_eq!(model.trail().len(), 8);
        assert_eq!(model.trail().to_vec(), last[12..].to_vec());
    }

    #[test]
    fn reset_rerandomizes_and_restarts_trail() {
        let mut model = AttractorModel::seeded(lorenz(), 0.01, 11).unwrap();
        for _ in 0..5 {
            model.step();
        }
        let before = model.state();

        model.reset();

        assert_ne!(model.state(), before);
        assert_eq!(model.trail().to_vec(), vec![model.state()]);
        assert!(
            model
                .state()
                .coords()
                .iter()
                .all(|c| c.abs() <= INITIAL_SPREAD)
        );
    }

    #[test]
    fn clear_trail_keeps_state() {
        let mut model = AttractorModel::seeded(lorenz(), 0.01, 4).unwrap();
        model.step();
        let state = model.state();
        model.clear_trail();
        assert!(model.trail().is_empty());
        assert_eq!(model.state(), state);

        model.step();
        assert_eq!(model.trail().len(), 1);
    }

    #[test]
    fn set_state_rejects_wrong_dimension() {
        let mut model = AttractorModel::seeded(lorenz(), 0.01, 0).unwrap();
        let err = model
            .set_state(StateVector::Planar(DVec2::ZERO))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::DimensionMismatch {
                expected: Dimension::Three,
                found: Dimension::Two
            }
        ));
    }

    #[test]
    fn set_trail_capacity_shrinks_history() {
        let mut model = AttractorModel::seeded(lorenz(), 0.01, 8).unwrap();
        for _ in 0..6 {
            model.step();
        }
        let recent = model.trail().to_vec()[5..].to_vec();
        model.set_trail_capacity(2).unwrap();
        assert_eq!(model.trail().to_vec(), recent);
        assert!(matches!(model.set_trail_capacity(0), Err(Error::ZeroCapacity)));
    }
}
