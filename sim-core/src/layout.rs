//! Initial placement of bodies from measured letter sizes.
//!
//! The letters start as a horizontally centered row whose bottom edges sit
//! on a baseline at `baseline_ratio * height`, separated by a gap of
//! `gap_ratio * width` rounded to whole pixels.

use crate::{
    body::{Body, Letter},
    config::Config,
    types::Bounds,
};
use glam::Vec2;
use thiserror::Error;

/// Rendered size of one letter as reported by the layout provider.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Measurement {
    pub width: f32,
    pub height: f32,
}

impl Measurement {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    fn is_usable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Reasons placement cannot happen yet.
///
/// None of these are fatal: the caller keeps the world unplaced and tries
/// again once the layout provider has real numbers.
#[derive(Debug, Error, PartialEq)]
pub enum LayoutError {
    #[error("no letters to place")]
    NoLetters,
    #[error("container is not measurable yet ({width}x{height})")]
    EmptyContainer { width: f32, height: f32 },
    #[error("expected {expected} measurements, got {got}")]
    CountMismatch { expected: usize, got: usize },
    #[error("measurement {index} is zero or not finite")]
    InvalidMeasurement { index: usize },
}

/// Builds the body list for `letters` from their measured sizes.
///
/// Body `i` gets id `i`, zero velocity, and is not dragged. The result is
/// either a complete list or an error; nothing partial is ever returned.
///
/// ### Parameters
/// - `letters` - Display metadata, one per body, in creation order.
/// - `sizes` - Measured pixel sizes, same order and length as `letters`.
/// - `bounds` - Current container size.
/// - `cfg` - Supplies `gap_ratio` and `baseline_ratio`.
///
/// ### Returns
/// The placed bodies, or a [`LayoutError`] describing why placement must wait.
pub fn place_bodies(
    letters: &[Letter],
    sizes: &[Measurement],
    bounds: Bounds,
    cfg: &Config,
) -> Result<Vec<Body>, LayoutError> {
    if letters.is_empty() {
        return Err(LayoutError::NoLetters);
    }
    if !bounds.is_usable() {
        return Err(LayoutError::EmptyContainer {
            width: bounds.width,
            height: bounds.height,
        });
    }
    if sizes.len() != letters.len() {
        return Err(LayoutError::CountMismatch {
            expected: letters.len(),
            got: sizes.len(),
        });
    }
    if let Some(index) = sizes.iter().position(|s| !s.is_usable()) {
        return Err(LayoutError::InvalidMeasurement { index });
    }

    let total_width: f32 = sizes.iter().map(|s| s.width).sum();
    let gap = (cfg.gap_ratio * bounds.width).round();
    let full = total_width + gap * (sizes.len() - 1) as f32;
    let baseline = bounds.height * cfg.baseline_ratio;

    let mut x = (bounds.width - full) / 2.0;
    let bodies = letters
        .iter()
        .zip(sizes)
        .enumerate()
        .map(|(id, (&letter, s))| {
            let pos = Vec2::new(x, baseline - s.height);
            x += s.width + gap;
            Body::new(id, pos, Vec2::new(s.width, s.height), letter)
        })
        .collect();

    Ok(bodies)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::LOGO;
    use approx::assert_relative_eq;

    #[test]
    fn five_letters_are_centered_on_the_baseline() {
        let letters = &LOGO[..5];
        let heights = [60.0, 45.0, 45.0, 62.0, 58.0];
        let sizes: Vec<Measurement> = heights.iter().map(|&h| Measurement::new(40.0, h)).collect();
        let bounds = Bounds::new(800.0, 200.0);

        let bodies = place_bodies(letters, &sizes, bounds, &Config::default()).unwrap();
        assert_eq!(bodies.len(), 5);

        // 5 * 40 + 4 * 16 = 264 wide, so the group starts at (800 - 264) / 2.
        let left = bodies[0].pos.x;
        let right = bodies[4].right();
        assert_relative_eq!(left, 268.0);
        assert_relative_eq!(right, 532.0);
        assert_relative_eq!(left, bounds.width - right);

        for pair in bodies.windows(2) {
            assert_relative_eq!(pair[1].pos.x - pair[0].right(), 16.0);
        }
        for (i, b) in bodies.iter().enumerate() {
            assert_eq!(b.id, i);
            assert_relative_eq!(b.bottom(), 56.0);
            assert_eq!(b.vel, Vec2::ZERO);
            assert!(!b.is_dragged);
            assert_eq!(b.letter, LOGO[i]);
        }
    }

    #[test]
    fn gap_is_rounded_to_whole_pixels() {
        let sizes = [Measurement::new(10.0, 10.0); 2];
        // 2% of 530 is 10.6, which rounds to 11.
        let bodies =
            place_bodies(&LOGO[..2], &sizes, Bounds::new(530.0, 100.0), &Config::default())
                .unwrap();
        assert_relative_eq!(bodies[1].pos.x - bodies[0].right(), 11.0);
    }

    #[test]
    fn unusable_container_defers_placement() {
        let sizes = [Measurement::new(10.0, 10.0)];
        let err = place_bodies(&LOGO[..1], &sizes, Bounds::new(0.0, 300.0), &Config::default())
            .unwrap_err();
        assert_eq!(
            err,
            LayoutError::EmptyContainer {
                width: 0.0,
                height: 300.0
            }
        );
    }

    #[test]
    fn zero_measurement_defers_placement() {
        let sizes = [
            Measurement::new(10.0, 10.0),
            Measurement::new(0.0, 10.0),
            Measurement::new(10.0, 10.0),
        ];
        let err = place_bodies(&LOGO[..3], &sizes, Bounds::new(300.0, 300.0), &Config::default())
            .unwrap_err();
        assert_eq!(err, LayoutError::InvalidMeasurement { index: 1 });

        let sizes = [Measurement::new(f32::NAN, 10.0)];
        let err = place_bodies(&LOGO[..1], &sizes, Bounds::new(300.0, 300.0), &Config::default())
            .unwrap_err();
        assert_eq!(err, LayoutError::InvalidMeasurement { index: 0 });
    }

    #[test]
    fn measurement_count_must_match_letters() {
        let sizes = [Measurement::new(10.0, 10.0); 2];
        let err = place_bodies(&LOGO, &sizes, Bounds::new(300.0, 300.0), &Config::default())
            .unwrap_err();
        assert_eq!(
            err,
            LayoutError::CountMismatch {
                expected: 6,
                got: 2
            }
        );
        assert_eq!(
            place_bodies(&[], &[], Bounds::new(300.0, 300.0), &Config::default()).unwrap_err(),
            LayoutError::NoLetters
        );
    }
}
