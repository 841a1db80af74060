/// Identifier for a body in a [`crate::world::World`].
///
/// This is an index into the world's body list, assigned in creation order
/// and never reused while the world lives.
pub type BodyId = usize;

/// Opaque display color carried by a body.
pub type Rgb = [u8; 3];

/// Current size of the container the bodies live in, in pixels.
///
/// Bounds are never cached by the simulation: callers pass the latest value
/// on every step and drag so a resized viewport takes effect immediately.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns `true` if both dimensions are finite and strictly positive.
    pub fn is_usable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}
