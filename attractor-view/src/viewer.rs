//! Interactive strange-attractor viewer built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns a [`Simulation`] and
//! implements [`eframe::App`] to drive it on a fixed cadence and paint the
//! resulting trail. 3-D systems slowly turn around their vertical axis and
//! are drawn with an orthographic projection; 2-D maps are drawn flat.

use attractor_core::{
    AttractorKind, AttractorParams, Dimension, Frame, SessionConfig, Simulation,
    color::Rgba,
};
use eframe::App;
use glam::{DVec3, Vec2};
use tracing::{info, warn};

/// Target time between simulation ticks (~60 Hz).
const TICK_INTERVAL: f64 = 0.016;
/// Degrees the camera turns per rendered frame for 3-D systems.
const ROTATION_STEP: f64 = 0.1;

const SPEED_RANGE: std::ops::RangeInclusive<u32> = 1..=10;
const TRAIL_RANGE: std::ops::RangeInclusive<usize> = 100..=5000;

/// Initial zoom (pixels per world unit) and world-space centre for a variant.
fn view_defaults(kind: AttractorKind) -> (f32, DVec3) {
    match kind {
        AttractorKind::Clifford | AttractorKind::DeJong => (120.0, DVec3::ZERO),
        AttractorKind::Lorenz => (8.0, DVec3::new(0.0, 0.0, 25.0)),
        AttractorKind::Aizawa => (150.0, DVec3::new(0.0, 0.0, 0.5)),
    }
}

fn to_color32(c: Rgba) -> egui::Color32 {
    let [r, g, b, a] = c.to_rgba8();
    egui::Color32::from_rgba_unmultiplied(r, g, b, a)
}

/// Main application state for the viewer.
///
/// ### Fields
/// - `sim` - The simulation session being displayed.
/// - `frame` - Last frame produced by the simulation; kept while paused.
/// - `kind` - Variant selected in the preset picker.
///
/// - `speed` / `trail_length` - Slider values mirrored into `sim`.
/// - `show_lines` - `false` after "Clear" until "Show lines" is pressed.
/// - `show_points` - Draw every trail point as a dot.
///
/// - `zoom` - Pixels per world unit.
/// - `pan` - Screen-space pan offset in pixels.
/// - `center` - World point drawn at the middle of the canvas.
/// - `azimuth` / `roll` - Camera angles in degrees (3-D only).
///
/// - `last_tick_time` - egui time of the last simulation tick.
pub struct Viewer {
    sim: Simulation,
    frame: Frame,
    kind: AttractorKind,

    speed: u32,
    trail_length: usize,
    show_lines: bool,
    show_points: bool,

    zoom: f32,
    pan: egui::Vec2,
    center: DVec3,
    azimuth: f64,
    roll: f64,

    last_tick_time: f64,
}

impl Viewer {
    /// Wraps an already-built simulation.
    ///
    /// A trail capacity outside the slider range is clamped into it and
    /// applied, so the slider always shows the capacity in effect.
    pub fn new(mut sim: Simulation) -> Self {
        let kind = sim.model().kind();
        let (zoom, center) = view_defaults(kind);
        let speed = sim.speed();
        let trail_length = sim
            .model()
            .trail()
            .capacity()
            .clamp(*TRAIL_RANGE.start(), *TRAIL_RANGE.end());
        if let Err(err) = sim.set_trail_capacity(trail_length) {
            warn!("rejected trail length {trail_length}: {err}");
        }
        let frame = sim.frame();

        Self {
            sim,
            frame,
            kind,
            speed,
            trail_length,
            show_lines: true,
            show_points: false,
            zoom,
            pan: egui::vec2(0.0, 0.0),
            center,
            azimuth: 0.0,
            roll: 0.0,
            last_tick_time: 0.0,
        }
    }

    /// Starts a fresh session for `kind` with its preset coefficients,
    /// keeping the current speed.
    fn switch_to(&mut self, kind: AttractorKind) {
        let mut config = SessionConfig::new(AttractorParams::preset(kind));
        config.speed = self.speed;
        match Simulation::from_config(&config) {
            Ok(sim) => {
                info!(attractor = %kind, "switched attractor");
                *self = Self::new(sim);
            }
            Err(err) => warn!("cannot start {kind}: {err}"),
        }
    }

    /// Re-randomizes the state and restarts the trail.
    fn reset(&mut self) {
        self.sim.reset();
        self.frame = self.sim.frame();
    }

    /// "Clear" drops the trail and hides lines; pressing again shows them.
    fn toggle_clear(&mut self) {
        if self.show_lines {
            self.sim.clear_trail();
            self.frame = self.sim.frame();
            self.show_lines = false;
        } else {
            self.show_lines = true;
        }
    }

    fn apply_speed(&mut self) {
        if let Err(err) = self.sim.set_speed(self.speed) {
            warn!("rejected speed {}: {err}", self.speed);
        }
    }

    fn apply_trail_length(&mut self) {
        match self.sim.set_trail_capacity(self.trail_length) {
            Ok(()) => self.frame = self.sim.frame(),
            Err(err) => warn!("rejected trail length {}: {err}", self.trail_length),
        }
    }

    /// Ticks the simulation if at least [`TICK_INTERVAL`] has passed.
    ///
    /// ### Returns
    /// `true` if a new frame was produced.
    fn advance_if_due(&mut self, now: f64) -> bool {
        if now - self.last_tick_time < TICK_INTERVAL {
            return false;
        }
        self.last_tick_time = now;
        let Some(frame) = self.sim.tick() else {
            return false;
        };
        self.frame = frame;
        if self.sim.model().dimension() == Dimension::Three {
            self.azimuth = (self.azimuth + ROTATION_STEP) % 360.0;
            self.roll = (self.roll + ROTATION_STEP) % 360.0;
        }
        true
    }

    /// Projects a world-space state onto the view plane.
    ///
    /// Planar states use their `x`/`y` directly. Spatial states are turned
    /// by `azimuth` around the `z` axis, viewed along `y`, then rolled in
    /// the view plane.
    fn project(&self, p: DVec3, dim: Dimension) -> Vec2 {
        let q = p - self.center;
        match dim {
            Dimension::Two => Vec2::new(q.x as f32, q.y as f32),
            Dimension::Three => {
                let (sa, ca) = self.azimuth.to_radians().sin_cos();
                let (sr, cr) = self.roll.to_radians().sin_cos();
                let x = ca * q.x - sa * q.y;
                let up = q.z;
                Vec2::new((cr * x - sr * up) as f32, (sr * x + cr * up) as f32)
            }
        }
    }

    /// Converts a view-plane position to screen-space.
    ///
    /// The y-axis is flipped so that positive y goes up.
    fn world_to_screen(&self, p: Vec2, rect: egui::Rect) -> egui::Pos2 {
        let center = rect.center();
        egui::pos2(
            center.x + p.x * self.zoom + self.pan.x,
            center.y - p.y * self.zoom + self.pan.y,
        )
    }

    /// Inverse of [`Viewer::world_to_screen`].
    fn screen_to_world(&self, p: egui::Pos2, rect: egui::Rect) -> Vec2 {
        let center = rect.center();
        let x = (p.x - center.x - self.pan.x) / self.zoom;
        let y = (center.y - p.y + self.pan.y) / self.zoom;
        Vec2::new(x, y)
    }

    /// Builds the top panel (run controls, sliders, preset picker).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui
                    .button(if self.sim.is_paused() { "▶ Resume" } else { "⏸ Pause" })
                    .clicked()
                {
                    self.sim.toggle_pause();
                }

                if ui.button("Reset").clicked() {
                    self.reset();
                }

                if ui
                    .button(if self.show_lines { "Clear" } else { "Show lines" })
                    .clicked()
                {
                    self.toggle_clear();
                }

                if ui
                    .button(if self.show_points { "Hide points" } else { "Show points" })
                    .clicked()
                {
                    self.show_points = !self.show_points;
                }

                ui.separator();
                if ui
                    .add(egui::Slider::new(&mut self.speed, SPEED_RANGE).text("Evolution speed"))
                    .changed()
                {
                    self.apply_speed();
                }
                if ui
                    .add(egui::Slider::new(&mut self.trail_length, TRAIL_RANGE).text("Trail length"))
                    .changed()
                {
                    self.apply_trail_length();
                }

                ui.separator();
                let mut selected = self.kind;
                egui::ComboBox::from_id_salt("attractor_kind")
                    .selected_text(selected.name())
                    .show_ui(ui, |ui| {
                        for kind in AttractorKind::ALL {
                            ui.selectable_value(&mut selected, kind, kind.name());
                        }
                    });
                if selected != self.kind {
                    self.switch_to(selected);
                }
            });
        });
    }

    /// Builds the bottom status bar.
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let model = self.sim.model();
                ui.label(format!("phase = {:.3}", self.sim.phase()));
                ui.label(format!(
                    "trail = {}/{}",
                    model.trail().len(),
                    model.trail().capacity()
                ));
                ui.separator();
                let coords: Vec<String> = model
                    .state()
                    .coords()
                    .iter()
                    .map(|c| format!("{c:.3}"))
                    .collect();
                ui.label(format!("state = ({})", coords.join(", ")));
                ui.label(model.kind().name());
            });
        });
    }

    /// Draws the trail, optional point cloud and current-point marker.
    fn paint_frame(&self, painter: &egui::Painter, rect: egui::Rect) {
        let dim = self.sim.model().dimension();
        let to_screen = |p: attractor_core::StateVector| {
            p.is_finite()
                .then(|| self.world_to_screen(self.project(p.to_vec3(), dim), rect))
        };

        if self.show_lines {
            for pair in self.frame.points.windows(2) {
                if let (Some(a), Some(b)) = (to_screen(pair[0].position), to_screen(pair[1].position))
                {
                    painter.line_segment([a, b], egui::Stroke::new(1.0, to_color32(pair[1].color)));
                }
            }
        }

        if self.show_points {
            let grey = egui::Color32::from_rgba_unmultiplied(128, 128, 128, 178);
            for p in self.frame.points.iter().filter_map(|p| to_screen(p.position)) {
                painter.circle_filled(p, 1.0, grey);
            }
        }

        if let Some(p) = self.frame.marker.and_then(to_screen) {
            painter.circle_filled(p, 5.0, egui::Color32::WHITE);
        }
    }

    /// Builds the central canvas: pan/zoom interaction, drawing and ticking.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(egui::Color32::BLACK))
            .show(ctx, |ui| {
                let response = ui.allocate_response(ui.available_size(), egui::Sense::drag());
                let rect = response.rect;
                let painter = ui.painter_at(rect);

                if response.dragged() {
                    self.pan += response.drag_delta();
                }

                // Zoom around the mouse cursor.
                let scroll = ui.ctx().input(|i| i.raw_scroll_delta.y);
                if scroll != 0.0 {
                    let pointer_screen = response.hover_pos().unwrap_or(rect.center());
                    let world_before = self.screen_to_world(pointer_screen, rect);

                    let factor = (1.0 + scroll * 0.001).clamp(0.5, 2.0);
                    self.zoom = (self.zoom * factor).clamp(0.5, 1000.0);

                    let screen_after = self.world_to_screen(world_before, rect);
                    self.pan += pointer_screen - screen_after;
                }

                self.paint_frame(&painter, rect);

                let now = ctx.input(|i| i.time);
                self.advance_if_due(now);
                ctx.request_repaint();
            });
    }
}

impl App for Viewer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_central_panel(ctx);
    }
}
