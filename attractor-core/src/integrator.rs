//! Fixed-step advancement of a phase-space state.
//!
//! Two schemes are provided:
//! - [`iterate_map`]: a discrete map *is* the update, so one step is a
//!   single substitution.
//! - [`rk4`]: classic fourth-order Runge-Kutta for continuous systems.
//!
//! Both are generic over the vector type so the same code serves the 2-D
//! and 3-D `glam` vectors. No step-size control or divergence detection
//! is performed.

use std::ops::{Add, Mul};

/// Stepping scheme used by an attractor variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scheme {
    /// One direct application of the map per tick; `dt` is ignored.
    MapIteration,
    /// One RK4 step of size `dt` per tick.
    RungeKutta4,
}

/// Applies a discrete map once.
#[inline]
pub fn iterate_map<V, F>(s: V, map: F) -> V
where
    F: Fn(V) -> V,
{
    map(s)
}

/// Advances `s` by one RK4 step of size `dt` along the field `f`.
///
/// ```text
/// k1 = f(s)
/// k2 = f(s + dt/2 * k1)
/// k3 = f(s + dt/2 * k2)
/// k4 = f(s + dt * k3)
/// s' = s + dt/6 * (k1 + 2 k2 + 2 k3 + k4)
/// ```
///
/// ### Parameters
/// - `s` - Current state.
/// - `dt` - Step size, fixed by the caller.
/// - `f` - Time-independent derivative `ds/dt`.
///
/// ### Returns
/// The state after one step. Large `dt` or unstable fields may yield
/// non-finite values; these are returned as-is.
pub fn rk4<V, F>(s: V, dt: f64, f: F) -> V
where
    V: Copy + Add<Output = V> + Mul<f64, Output = V>,
    F: Fn(V) -> V,
{
    let half = 0.5 * dt;
    let k1 = f(s);
    let k2 = f(s + k1 * half);
    let k3 = f(s + k2 * half);
    let k4 = f(s + k3 * dt);
    s + (k1 + k2 * 2.0 + k3 * 2.0 + k4) * (dt / 6.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{DVec2, DVec3};

    #[test]
    fn iterate_map_applies_the_map_once() {
        let s = DVec2::new(1.0, 2.0);
        let out = iterate_map(s, |v: DVec2| DVec2::new(v.y, v.x));
        assert_eq!(out, DVec2::new(2.0, 1.0));
    }

    #[test]
    fn rk4_is_exact_for_constant_field() {
        let s = DVec3::new(1.0, 0.0, -1.0);
        let v = DVec3::new(0.5, 1.0, 2.0);
        let out = rk4(s, 0.1, |_| v);
        assert!((out - (s + v * 0.1)).length() < 1e-12);
    }

    #[test]
    fn rk4_tracks_exponential_decay() {
        // ds/dt = -s has exact solution s0 * e^{-t}; RK4 local error is O(dt^5).
        let dt = 0.01;
        let mut s = DVec2::new(1.0, 2.0);
        for _ in 0..100 {
            s = rk4(s, dt, |v| -v);
        }
        let exact = DVec2::new(1.0, 2.0) * (-1.0f64).exp();
        assert!((s - exact).length() < 1e-9, "s = {s:?}, exact = {exact:?}");
    }

    #[test]
    fn rk4_matches_hand_expanded_stages() {
        // Linear rotation field: f(x, y) = (-y, x).
        let f = |v: DVec2| DVec2::new(-v.y, v.x);
        let s = DVec2::new(1.0, 0.0);
        let dt = 0.1;

        let k1 = f(s);
        let k2 = f(s + 0.5 * dt * k1);
        let k3 = f(s + 0.5 * dt * k2);
        let k4 = f(s + dt * k3);
        let expected = s + dt / 6.0 * (k1 + 2.0 * k2 + 2.0 * k3 + k4);

        let out = rk4(s, dt, f);
        assert!((out - expected).length() < 1e-15);
    }
}
