//! Rainbow colouring for trails.
//!
//! [`trail_colors`] is a pure function of the trail length and a hue-shift
//! phase. The phase itself lives in [`HuePhase`], owned by whoever drives
//! the frames (see [`crate::simulation::Simulation`]).

/// Saturation used for every trail colour.
pub const SATURATION: f64 = 0.8;
/// Brightness of the oldest trail entry; the newest is always `1.0`.
pub const MIN_VALUE: f64 = 0.2;
/// Amount the hue phase advances per rendered frame.
pub const PHASE_STEP: f64 = 0.001;

/// Linear RGBA colour with components in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::new(1.0, 1.0, 1.0, 1.0);

    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_array(self) -> [f64; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Quantizes to 8-bit channels, unmultiplied alpha.
    pub fn to_rgba8(self) -> [u8; 4] {
        self.to_array()
            .map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
    }
}

/// Standard HSV → RGB conversion with all inputs in `[0, 1]`.
///
/// The hue wraps, so `h = 1.0` is the same red as `h = 0.0`.
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (f64, f64, f64) {
    if s == 0.0 {
        return (v, v, v);
    }
    let h = h.rem_euclid(1.0) * 6.0;
    let i = h.floor();
    let f = h - i;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match i as u32 % 6 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    }
}

/// Colours for a trail of `n` entries, oldest first.
///
/// Entry `i` gets hue `(i / n + phase) mod 1`, saturation [`SATURATION`]
/// and a brightness that rises linearly from [`MIN_VALUE`] at the oldest
/// entry to `1.0` at the newest. Alpha is always `1.0`.
///
/// A single-entry trail is drawn at full brightness with hue `phase`; an
/// empty trail yields no colours.
pub fn trail_colors(n: usize, phase: f64) -> Vec<Rgba> {
    if n == 0 {
        return Vec::new();
    }
    if n == 1 {
        let (r, g, b) = hsv_to_rgb(phase.rem_euclid(1.0), SATURATION, 1.0);
        return vec![Rgba::new(r, g, b, 1.0)];
    }

    let last = (n - 1) as f64;
    (0..n)
        .map(|i| {
            let hue = (i as f64 / n as f64 + phase).rem_euclid(1.0);
            let value = MIN_VALUE + (1.0 - MIN_VALUE) * (i as f64 / last);
            let (r, g, b) = hsv_to_rgb(hue, SATURATION, value);
            Rgba::new(r, g, b, 1.0)
        })
        .collect()
}

/// Slowly rotating hue offset in `[0, 1)`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HuePhase(f64);

impl HuePhase {
    pub fn new(phase: f64) -> Self {
        Self(phase.rem_euclid(1.0))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Moves the phase forward by [`PHASE_STEP`], wrapping at `1.0`.
    pub fn advance(&mut self) {
        self.0 = (self.0 + PHASE_STEP).rem_euclid(1.0);
    }
}
