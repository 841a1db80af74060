//! Interactive letter playground built with eframe/egui.
//!
//! This module defines [`LetterView`], which owns the simulation
//! ([`World`]) and its step scheduler ([`Driver`]) and implements
//! [`eframe::App`] to measure, draw and drive them.

use crate::measure;
use eframe::App;
use glam::Vec2;
use letterfall_core::{
    body::LOGO,
    config::Config,
    drag::PointerDown,
    driver::{Driver, Tick},
    session::Phase,
    types::Bounds,
    world::{Frame, World},
};
use tracing::debug;

const HINT: &str = "Click anywhere to let the letters fall. Drag letters around after they stack.";

/// Main application state for the viewer.
///
/// The per-frame update is:
/// 1. Read the container rect and pick the font size for it.
/// 2. If the world is not placed yet, measure the letters and try to place them.
/// 3. Feed pointer press/move/release into the world.
/// 4. Let the driver run one step if the session is released.
/// 5. Draw the resulting frame.
///
/// ### Fields
/// - `world` - Bodies, drag state and session flags.
/// - `driver` - Step scheduler; idle until the first release.
/// - `next_tick` - The tick to fire on the next refresh, if running.
/// - `font_size` - Label size for the current viewport class.
pub struct LetterView {
    world: World,
    driver: Driver,
    next_tick: Option<Tick>,
    font_size: f32,
}

impl LetterView {
    pub fn new(cfg: Config) -> Self {
        Self {
            world: World::new(LOGO.to_vec(), cfg),
            driver: Driver::new(),
            next_tick: None,
            font_size: measure::font_size_for_width(f32::INFINITY),
        }
    }

    /// Converts a screen position to container coordinates.
    fn screen_to_local(p: egui::Pos2, rect: egui::Rect) -> Vec2 {
        Vec2::new(p.x - rect.min.x, p.y - rect.min.y)
    }

    fn bounds_of(rect: egui::Rect) -> Bounds {
        Bounds::new(rect.width(), rect.height())
    }

    /// Measures and places the letters if that has not happened yet.
    fn try_place(&mut self, painter: &egui::Painter, bounds: Bounds) {
        if self.world.is_placed() {
            return;
        }
        let sizes = measure::measure_letters(painter, self.world.letters(), self.font_size);
        if let Err(err) = self.world.place(&sizes, bounds) {
            debug!(%err, "placement deferred");
        }
    }

    /// Routes this frame's pointer input into the world.
    fn handle_pointer(&mut self, ctx: &egui::Context, rect: egui::Rect, bounds: Bounds) {
        let (pressed, released, moved, press_pos, latest) = ctx.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
                i.pointer.delta() != egui::Vec2::ZERO,
                i.pointer.press_origin(),
                i.pointer.latest_pos(),
            )
        });

        if pressed
            && let Some(p) = press_pos
            && rect.contains(p)
        {
            let local = Self::screen_to_local(p, rect);
            if let PointerDown::Grabbed(id) = self.world.pointer_down(local) {
                debug!(id, "letter picked up");
            }
        }

        if moved
            && self.world.drag_state().is_dragging()
            && let Some(p) = latest
        {
            self.world.pointer_move(Self::screen_to_local(p, rect), bounds);
        }

        if released {
            self.world.pointer_up();
        }
    }

    /// Runs the scheduler for this refresh.
    ///
    /// Starts the driver on the first refresh after release, then fires one
    /// tick per refresh. Once stopped, the driver stays stopped. Returns the frame produced by the step, if any.
    fn pump(&mut self, now: f64, bounds: Bounds) -> Option<Frame> {
        let Some(tick) = self.next_tick.take() else {
            self.next_tick = self.driver.sync(self.world.is_released(), now);
            return None;
        };
        let (frame, next) = self.driver.fire(tick, now, &mut self.world, bounds)?;
        self.next_tick = Some(next);
        Some(frame)
    }

    /// Paints every body as its colored glyph inside its box.
    fn draw(&self, painter: &egui::Painter, rect: egui::Rect, frame: &Frame) {
        let font = measure::font_id(self.font_size);
        for b in &frame.bodies {
            let min = rect.min + egui::vec2(b.pos.x, b.pos.y);
            let [r, g, bl] = b.color;
            painter.text(
                min,
                egui::Align2::LEFT_TOP,
                b.label,
                font.clone(),
                egui::Color32::from_rgb(r, g, bl),
            );
        }
    }

    /// Shows the instruction pill until the session is released.
    fn ui_hint(&self, painter: &egui::Painter, rect: egui::Rect) {
        if self.world.is_released() {
            return;
        }
        let pos = rect.center() + egui::vec2(0.0, 112.0);
        let font = egui::FontId::proportional(15.0);
        let galley = painter.layout_no_wrap(HINT.to_owned(), font, egui::Color32::from_gray(115));
        let pill = egui::Rect::from_center_size(pos, galley.size() + egui::vec2(32.0, 16.0));
        painter.rect_filled(
            pill,
            pill.height() / 2.0,
            egui::Color32::from_rgba_unmultiplied(255, 255, 255, 180),
        );
        painter.galley(
            pill.center() - galley.size() / 2.0,
            galley,
            egui::Color32::from_gray(115),
        );
    }

    /// Builds the bottom status bar (phase, steps, drag).
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let phase = match self.world.session().phase() {
                    Phase::Uninitialized => "measuring",
                    Phase::Placed => "waiting",
                    Phase::Simulating => "running",
                };
                ui.label(format!("steps = {}", self.driver.steps()));
                ui.label(format!("phase = {phase}"));
                ui.separator();
                match self.world.drag_state().dragged_id() {
                    Some(id) => ui.label(format!("dragging #{id}")),
                    None => ui.label("idle"),
                };
            });
        });
    }

    /// Builds the central panel that hosts the simulation.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(egui::Color32::WHITE))
            .show(ctx, |ui| {
                let response = ui.allocate_response(ui.available_size(), egui::Sense::drag());
                let rect = response.rect;
                let painter = ui.painter_at(rect);
                // Bounds are read fresh every frame so resizes apply at once.
                let bounds = Self::bounds_of(rect);

                self.font_size = measure::font_size_for_width(rect.width());
                self.try_place(&painter, bounds);
                self.handle_pointer(ctx, rect, bounds);

                let now = ctx.input(|i| i.time);
                let frame = self
                    .pump(now, bounds)
                    .unwrap_or_else(|| self.world.snapshot());

                self.draw(&painter, rect, &frame);
                self.ui_hint(&painter, rect);

                if self.driver.is_running() || self.next_tick.is_some() {
                    ctx.request_repaint();
                }
            });
    }
}

impl App for LetterView {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui_status_bar(ctx);
        self.ui_central_panel(ctx);
    }
}

impl Drop for LetterView {
    fn drop(&mut self) {
        // Any tick still held becomes stale.
        self.driver.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use letterfall_core::layout::Measurement;

    fn placed_view() -> LetterView {
        let mut view = LetterView::new(Config::default());
        view.world
            .place(&[Measurement::new(60.0, 90.0); 6], Bounds::new(1000.0, 600.0))
            .unwrap();
        view
    }

    #[test]
    fn screen_to_local_subtracts_container_origin() {
        let rect = egui::Rect::from_min_size(egui::pos2(20.0, 35.0), egui::vec2(800.0, 600.0));
        let p = LetterView::screen_to_local(egui::pos2(120.0, 85.0), rect);
        assert_eq!(p, Vec2::new(100.0, 50.0));
        assert_eq!(LetterView::bounds_of(rect), Bounds::new(800.0, 600.0));
    }

    #[test]
    fn pump_waits_for_release() {
        let mut view = placed_view();
        let bounds = Bounds::new(1000.0, 600.0);
        let before = view.world.snapshot();

        for i in 0..5 {
            assert!(view.pump(i as f64 / 60.0, bounds).is_none());
        }
        assert!(!view.driver.is_running());
        assert_eq!(view.world.snapshot(), before);
    }

    #[test]
    fn pump_steps_every_refresh_after_release() {
        let mut view = placed_view();
        let bounds = Bounds::new(1000.0, 600.0);
        view.world.release();

        // First refresh only schedules.
        assert!(view.pump(0.0, bounds).is_none());
        assert!(view.driver.is_running());

        for i in 1..=3 {
            let frame = view.pump(i as f64 / 60.0, bounds).expect("step frame");
            assert_eq!(frame, view.world.snapshot());
        }
        assert_eq!(view.driver.steps(), 3);
        assert!(view.world.bodies().iter().all(|b| b.vel.y > 0.0));
    }

    #[test]
    fn stopped_driver_does_not_step() {
        let mut view = placed_view();
        let bounds = Bounds::new(1000.0, 600.0);
        view.world.release();
        assert!(view.pump(0.0, bounds).is_none());

        view.driver.stop();
        let before = view.world.snapshot();
        for i in 1..=5 {
            assert!(view.pump(i as f64 / 60.0, bounds).is_none());
        }
        assert!(!view.driver.is_running());
        assert_eq!(view.driver.steps(), 0);
        assert_eq!(view.world.snapshot(), before);
    }
}
