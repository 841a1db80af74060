use crate::types::{BodyId, Rgb};
use glam::Vec2;

/// Display metadata for one letter. Opaque to the physics.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Letter {
    pub label: char,
    pub color: Rgb,
}

impl Letter {
    pub const fn new(label: char, color: Rgb) -> Self {
        Self { label, color }
    }
}

/// The six letters of the logo, in creation order.
pub const LOGO: [Letter; 6] = [
    Letter::new('G', [0x42, 0x85, 0xF4]),
    Letter::new('o', [0xDB, 0x44, 0x37]),
    Letter::new('o', [0xF4, 0xB4, 0x00]),
    Letter::new('g', [0x42, 0x85, 0xF4]),
    Letter::new('l', [0x0F, 0x9D, 0x58]),
    Letter::new('e', [0xDB, 0x44, 0x37]),
];

/// One axis-aligned rigid rectangle.
///
/// `pos` is the top-left corner in pixels with y pointing down. `size` is
/// fixed after creation. While `is_dragged` is set the body is kinematic:
/// the step phases read it but never write to it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Body {
    pub id: BodyId,
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub letter: Letter,
    pub is_dragged: bool,
}

impl Body {
    pub fn new(id: BodyId, pos: Vec2, size: Vec2, letter: Letter) -> Self {
        Self {
            id,
            pos,
            size,
            vel: Vec2::ZERO,
            letter,
            is_dragged: false,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Point-in-rectangle test, inclusive on all four edges.
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.pos.x && p.x <= self.right() && p.y >= self.pos.y && p.y <= self.bottom()
    }

    /// Returns `true` if the two boxes overlap with positive area.
    ///
    /// Touching edges do not count as overlap.
    pub fn overlaps(&self, other: &Body) -> bool {
        !(self.right() <= other.pos.x
            || other.right() <= self.pos.x
            || self.bottom() <= other.pos.y
            || other.bottom() <= self.pos.y)
    }

    /// Penetration depth along each axis, assuming the boxes overlap.
    pub fn penetration(&self, other: &Body) -> Vec2 {
        Vec2::new(
            (self.right() - other.pos.x).min(other.right() - self.pos.x),
            (self.bottom() - other.pos.y).min(other.bottom() - self.pos.y),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(id: BodyId, x: f32, y: f32, side: f32) -> Body {
        Body::new(id, Vec2::new(x, y), Vec2::splat(side), LOGO[0])
    }

    #[test]
    fn contains_is_inclusive_on_edges() {
        let b = square(0, 10.0, 20.0, 50.0);
        assert!(b.contains(Vec2::new(10.0, 20.0)));
        assert!(b.contains(Vec2::new(60.0, 70.0)));
        assert!(b.contains(Vec2::new(35.0, 45.0)));
        assert!(!b.contains(Vec2::new(9.9, 45.0)));
        assert!(!b.contains(Vec2::new(35.0, 70.1)));
    }

    #[test]
    fn touching_boxes_do_not_overlap() {
        let a = square(0, 0.0, 0.0, 50.0);
        let right = square(1, 50.0, 0.0, 50.0);
        let below = square(2, 0.0, 50.0, 50.0);
        assert!(!a.overlaps(&right));
        assert!(!a.overlaps(&below));
        assert!(!right.overlaps(&a));
    }

    #[test]
    fn penetration_is_symmetric() {
        let a = square(0, 0.0, 0.0, 50.0);
        let b = square(1, 40.0, 30.0, 50.0);
        assert!(a.overlaps(&b));
        assert_eq!(a.penetration(&b), Vec2::new(10.0, 20.0));
        assert_eq!(b.penetration(&a), Vec2::new(10.0, 20.0));
    }
}
