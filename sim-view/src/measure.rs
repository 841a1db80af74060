//! Letter measurement: the layout side of the viewer.
//!
//! Letters are laid out with egui's text engine at a font size picked from
//! the viewport width, and their galley sizes are handed to the simulation.

use egui::{Color32, FontId, Painter};
use letterfall_core::{body::Letter, layout::Measurement};

/// Picks the label font size for a viewport width, in points.
///
/// Only affects measurement and drawing. Bodies already placed keep their
/// size when the viewport class changes.
pub fn font_size_for_width(width: f32) -> f32 {
    if width < 400.0 {
        68.0
    } else if width < 640.0 {
        84.0
    } else if width < 1024.0 {
        96.0
    } else {
        112.0
    }
}

pub fn font_id(size: f32) -> FontId {
    FontId::proportional(size)
}

/// Measures every letter at `font_size`, rounding up to whole pixels.
pub fn measure_letters(painter: &Painter, letters: &[Letter], font_size: f32) -> Vec<Measurement> {
    letters
        .iter()
        .map(|l| {
            let galley =
                painter.layout_no_wrap(l.label.to_string(), font_id(font_size), Color32::BLACK);
            let size = galley.size();
            Measurement::new(size.x.ceil(), size.y.ceil())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use letterfall_core::body::LOGO;

    #[test]
    fn font_size_steps_with_viewport_class() {
        assert_eq!(font_size_for_width(320.0), 68.0);
        assert_eq!(font_size_for_width(400.0), 84.0);
        assert_eq!(font_size_for_width(639.0), 84.0);
        assert_eq!(font_size_for_width(800.0), 96.0);
        assert_eq!(font_size_for_width(1024.0), 112.0);
        assert_eq!(font_size_for_width(2560.0), 112.0);
    }

    #[test]
    fn measured_letters_are_whole_and_positive() {
        let ctx = egui::Context::default();
        let mut sizes = Vec::new();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                sizes = measure_letters(ui.painter(), &LOGO, 96.0);
            });
        });

        assert_eq!(sizes.len(), LOGO.len());
        for m in &sizes {
            assert!(m.width > 0.0 && m.height > 0.0);
            assert_eq!(m.width, m.width.ceil());
            assert_eq!(m.height, m.height.ceil());
        }
        // Same glyph, same size.
        assert_eq!(sizes[1], sizes[2]);
    }
}
