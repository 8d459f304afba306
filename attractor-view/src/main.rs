//! Application entry point for the strange-attractor viewer.
//!
//! Usage: `attractor-view [SESSION.json]`
//!
//! With a session file the simulation is built from it; otherwise one of
//! the built-in presets is picked at random. All UI state and rendering
//! are handled by [`Viewer`].

mod viewer;

use attractor_core::{AttractorKind, AttractorParams, SessionConfig, Simulation};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, Registry, layer::SubscriberExt, util::SubscriberInitExt};
use viewer::Viewer;

/// Installs a `fmt` subscriber filtered by `RUST_LOG` (default `info`).
///
/// Returns `false` if a global subscriber was already set; the refusal is
/// logged as a warning through that subscriber.
fn init_tracing() -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(true);
    match Registry::default().with(filter).with(fmt_layer).try_init() {
        Ok(()) => true,
        Err(err) => {
            warn!("tracing subscriber already installed: {err}");
            false
        }
    }
}

/// Reads the session from the first CLI argument, or picks a random preset.
fn session_config() -> attractor_core::Result<SessionConfig> {
    match std::env::args_os().nth(1) {
        Some(path) => {
            info!(path = %path.to_string_lossy(), "loading session");
            SessionConfig::load(path)
        }
        None => {
            let kind = AttractorKind::random(&mut rand::rng());
            info!(attractor = %kind, "no session file given, using random preset");
            Ok(SessionConfig::new(AttractorParams::preset(kind)))
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = session_config().inspect_err(|err| warn!("cannot start session: {err}"))?;
    let sim = Simulation::from_config(&config)?;

    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "Strange Attractor Evolution",
        options,
        Box::new(|_cc| Ok(Box::new(Viewer::new(sim)))),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_tracing_init_is_refused_without_panicking() {
        init_tracing();
        assert!(!init_tracing());
    }
}
