//! Single-pointer drag state machine.
//!
//! Transitions take the current [`DragState`] by value and return the next
//! one, so there is never more than one drag session alive. The body named
//! by [`DragState::Dragging`] is the only body with `is_dragged` set.

use crate::{
    body::Body,
    config::Config,
    types::{BodyId, Bounds},
};
use glam::Vec2;
use tracing::debug;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        id: BodyId,
        /// Pointer position minus body top-left at grab time.
        offset: Vec2,
        /// Pointer position at the previous move, for velocity estimation.
        last: Vec2,
    },
}

/// Result of a pointer-down.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerDown {
    /// A body was hit and is now being dragged.
    Grabbed(BodyId),
    /// Nothing was hit; the caller should release the session.
    Missed,
}

/// Returns the topmost body under `p`.
///
/// Bodies are tested from last to first so later bodies win, matching the
/// draw order.
pub fn hit_test(bodies: &[Body], p: Vec2) -> Option<BodyId> {
    bodies.iter().rev().find(|b| b.contains(p)).map(|b| b.id)
}

impl DragState {
    pub fn dragged_id(&self) -> Option<BodyId> {
        match *self {
            DragState::Idle => None,
            DragState::Dragging { id, .. } => Some(id),
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragged_id().is_some()
    }

    /// Starts a drag on the topmost body under `p`.
    ///
    /// On a hit the body is marked dragged and its velocity zeroed. If a
    /// different body was already being dragged it is let go first, so the
    /// new grab wins. On a miss the current state is kept unchanged.
    pub fn pointer_down(self, bodies: &mut [Body], p: Vec2) -> (Self, PointerDown) {
        let Some(id) = hit_test(bodies, p) else {
            return (self, PointerDown::Missed);
        };

        if let Some(prev) = self.dragged_id()
            && prev != id
            && let Some(b) = bodies.get_mut(prev)
        {
            b.is_dragged = false;
        }

        let b = &mut bodies[id];
        b.is_dragged = true;
        b.vel = Vec2::ZERO;
        let offset = p - b.pos;
        debug!(id, x = p.x, y = p.y, "grab");

        (
            DragState::Dragging {
                id,
                offset,
                last: p,
            },
            PointerDown::Grabbed(id),
        )
    }

    /// Moves the dragged body to follow the pointer.
    ///
    /// The new top-left is `p - offset`, clamped so the body stays inside
    /// the container on both axes. Velocity becomes the pointer delta since
    /// the last move times `drag_velocity_scale`. Does nothing when idle or
    /// when the dragged id no longer names a body.
    pub fn pointer_move(self, bodies: &mut [Body], p: Vec2, bounds: Bounds, cfg: &Config) -> Self {
        let DragState::Dragging { id, offset, last } = self else {
            return self;
        };
        let Some(b) = bodies.get_mut(id) else {
            return self;
        };

        let target = p - offset;
        // min then max: a body larger than the container pins to 0.
        b.pos.x = target.x.min(bounds.width - b.size.x).max(0.0);
        b.pos.y = target.y.min(bounds.height - b.size.y).max(0.0);
        b.vel = (p - last) * cfg.drag_velocity_scale;

        DragState::Dragging {
            id,
            offset,
            last: p,
        }
    }

    /// Ends the drag, handing the body back to the physics.
    ///
    /// The body keeps the velocity computed by the last move. Returns `true`
    /// if a drag was actually ended.
    pub fn pointer_up(self, bodies: &mut [Body]) -> (Self, bool) {
        let Some(id) = self.dragged_id() else {
            return (self, false);
        };
        if let Some(b) = bodies.get_mut(id) {
            b.is_dragged = false;
            debug!(id, vx = b.vel.x, vy = b.vel.y, "drop");
        }
        (DragState::Idle, true)
    }
}
