//! Tick-driven session around an [`AttractorModel`].
//!
//! A [`Simulation`] is what a UI timer talks to. Each [`Simulation::tick`]
//! steps the model `speed` times and returns a [`Frame`] ready to draw:
//! every trail position paired with its colour, plus the current point for
//! a highlight marker. Everything runs on the caller's thread.

use crate::color::{self, HuePhase, Rgba};
use crate::config::SessionConfig;
use crate::error::{Error, Result};
use crate::model::AttractorModel;
use crate::types::StateVector;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

/// One trail entry ready for the renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailPoint {
    pub position: StateVector,
    pub color: Rgba,
}

/// Render input for one tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
    /// Trail oldest first.
    pub points: Vec<TrailPoint>,
    /// Newest trail entry, if any.
    pub marker: Option<StateVector>,
}

impl Frame {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[derive(Debug)]
pub struct Simulation {
    model: AttractorModel,
    speed: u32,
    paused: bool,
    phase: HuePhase,
}

impl Simulation {
    /// Wraps `model`, stepping it `speed` times per tick.
    ///
    /// ### Errors
    /// [`Error::ZeroSpeed`] if `speed` is `0`.
    pub fn new(model: AttractorModel, speed: u32) -> Result<Self> {
        if speed == 0 {
            return Err(Error::ZeroSpeed);
        }
        Ok(Self {
            model,
            speed,
            paused: false,
            phase: HuePhase::default(),
        })
    }

    /// Builds the model described by `config` and wraps it.
    pub fn from_config(config: &SessionConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let model = AttractorModel::new(config.attractor.clone(), config.dt, rng)?;
        Self::new(model, config.speed)
    }

    /// Advances the session by one timer tick.
    ///
    /// When paused nothing changes and `None` is returned, so the caller
    /// keeps showing its previous frame. Otherwise the model is stepped
    /// `speed` times, a frame is built and the hue phase moves on.
    pub fn tick(&mut self) -> Option<Frame> {
        if self.paused {
            return None;
        }
        for _ in 0..self.speed {
            self.model.step();
        }
        let frame = self.frame();
        self.phase.advance();
        Some(frame)
    }

    /// Builds a frame from the current trail without stepping.
    pub fn frame(&self) -> Frame {
        let trail = self.model.trail();
        let colors = color::trail_colors(trail.len(), self.phase.value());
        let points = trail
            .iter()
            .zip(colors)
            .map(|(&position, color)| TrailPoint { position, color })
            .collect();
        Frame {
            points,
            marker: trail.latest().copied(),
        }
    }

    /// ### Errors
    /// [`Error::ZeroSpeed`] if `speed` is `0`; the old speed is kept.
    pub fn set_speed(&mut self, speed: u32) -> Result<()> {
        if speed == 0 {
            return Err(Error::ZeroSpeed);
        }
        if speed != self.speed {
            debug!(speed, "speed changed");
        }
        self.speed = speed;
        Ok(())
    }

    /// ### Errors
    /// [`Error::ZeroCapacity`] if `capacity` is `0`; the trail is kept.
    pub fn set_trail_capacity(&mut self, capacity: usize) -> Result<()> {
        self.model.set_trail_capacity(capacity)
    }

    pub fn pause(&mut self) {
        if !self.paused {
            info!("simulation paused");
        }
        self.paused = true;
    }

    pub fn resume(&mut self) {
        if self.paused {
            info!("simulation resumed");
        }
        self.paused = false;
    }

    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    /// Re-randomizes the state and restarts the trail from it.
    pub fn reset(&mut self) {
        self.model.reset();
    }

    pub fn clear_trail(&mut self) {
        self.model.clear_trail();
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn phase(&self) -> f64 {
        self.phase.value()
    }

    pub fn model(&self) -> &AttractorModel {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut AttractorModel {
        &mut self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attractor::AttractorKind;
    use crate::config::AttractorParams;
    use glam::DVec2;

    fn sim(speed: u32, trail: usize) -> Simulation {
        let params = AttractorParams::preset(AttractorKind::Clifford).with_trail_length(trail);
        let model = AttractorModel::seeded(params, 0.01, 21).unwrap();
        Simulation::new(model, speed).unwrap()
    }

    #[test]
    fn new_rejects_zero_speed() {
        let params = AttractorParams::preset(AttractorKind::Lorenz);
        let model = AttractorModel::seeded(params, 0.01, 0).unwrap();
        assert!(matches!(Simulation::new(model, 0), Err(Error::ZeroSpeed)));
    }

    #[test]
    fn tick_steps_speed_times() {
        let mut s = sim(4, 100);
        let frame = s.tick().unwrap();
        // Initial point plus four steps.
        assert_eq!(frame.points.len(), 5);
        assert_eq!(s.model().trail().len(), 5);
    }

    #[test]
    fn frame_pairs_positions_with_colors() {
        let mut s = sim(3, 100);
        let frame = s.tick().unwrap();
        let trail = s.model().trail().to_vec();
        let colors = color::trail_colors(trail.len(), 0.0);

        let positions: Vec<StateVector> = frame.points.iter().map(|p| p.position).collect();
        assert_eq!(positions, trail);
        let got: Vec<Rgba> = frame.points.iter().map(|p| p.color).collect();
        assert_eq!(got, colors);
        assert_eq!(frame.marker, Some(s.model().state()));
    }

    #[test]
    fn tick_advances_phase_once_per_frame() {
        let mut s = sim(10, 100);
        assert_eq!(s.phase(), 0.0);
        s.tick();
        s.tick();
        assert!((s.phase() - 2.0 * color::PHASE_STEP).abs() < 1e-15);
    }

    #[test]
    fn paused_tick_changes_nothing() {
        let mut s = sim(2, 100);
        s.tick();
        let state = s.model().state();
        let phase = s.phase();

        s.pause();
        assert!(s.tick().is_none());
        assert!(s.tick().is_none());
        assert_eq!(s.model().state(), state);
        assert_eq!(s.phase(), phase);

        s.resume();
        assert!(s.tick().is_some());
        assert_ne!(s.model().state(), state);
    }

    #[test]
    fn toggle_pause_flips() {
        let mut s = sim(1, 10);
        assert!(!s.is_paused());
        s.toggle_pause();
        assert!(s.is_paused());
        s.toggle_pause();
        assert!(!s.is_paused());
    }

    #[test]
    fn set_speed_rejects_zero_and_keeps_old_value() {
        let mut s = sim(3, 10);
        assert!(matches!(s.set_speed(0), Err(Error::ZeroSpeed)));
        assert_eq!(s.speed(), 3);
        s.set_speed(7).unwrap();
        assert_eq!(s.speed(), 7);
    }

    #[test]
    fn trail_capacity_bounds_frames() {
        let mut s = sim(10, 6);
        let frame = s.tick().unwrap();
        assert_eq!(frame.points.len(), 6);

        s.set_trail_capacity(2).unwrap();
        assert_eq!(s.frame().points.len(), 2);
        assert!(s.set_trail_capacity(0).is_err());
        assert_eq!(s.model().trail().capacity(), 2);
    }

    #[test]
    fn clear_trail_yields_empty_frame_until_next_step() {
        let mut s = sim(1, 10);
        s.tick();
        s.clear_trail();
        let frame = s.frame();
        assert!(frame.is_empty());
        assert_eq!(frame.marker, None);

        let frame = s.tick().unwrap();
        assert_eq!(frame.points.len(), 1);
        // A lone point is drawn at full brightness.
        let c = frame.points[0].color;
        assert!((c.r.max(c.g).max(c.b) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn reset_restarts_from_single_point() {
        let mut s = sim(5, 100);
        s.tick();
        s.reset();
        let frame = s.frame();
        assert_eq!(frame.points.len(), 1);
        assert_eq!(frame.marker, Some(s.model().state()));
    }

    #[test]
    fn from_config_honours_seed() {
        let mut cfg = SessionConfig::new(AttractorParams::preset(AttractorKind::DeJong));
        cfg.seed = Some(5);
        cfg.speed = 2;
        let a = Simulation::from_config(&cfg).unwrap();
        let b = Simulation::from_config(&cfg).unwrap();
        assert_eq!(a.model().state(), b.model().state());
        assert_eq!(a.speed(), 2);
    }

    #[test]
    fn model_mut_allows_scripted_start() {
        let mut s = sim(1, 10);
        s.model_mut()
            .set_state(StateVector::Planar(DVec2::ZERO))
            .unwrap();
        s.tick();
        assert_eq!(s.model().state(), StateVector::Planar(DVec2::new(1.0, 0.7)));
    }
}
