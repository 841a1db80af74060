//! The body store and everything that mutates it.
//!
//! [`World`] owns the bodies, the drag state and the session flags. All
//! mutation goes through its methods, each of which runs to completion, so
//! an observer only ever sees the store between whole steps or whole
//! pointer events.

use crate::{
    body::{Body, Letter},
    config::Config,
    drag::{DragState, PointerDown},
    layout::{self, LayoutError, Measurement},
    phases,
    session::Session,
    types::{BodyId, Bounds, Rgb},
};
use glam::Vec2;
use tracing::{debug, trace};

/// Read-only view of one body for drawing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyView {
    pub id: BodyId,
    pub pos: Vec2,
    pub size: Vec2,
    pub label: char,
    pub color: Rgb,
}

impl From<&Body> for BodyView {
    fn from(b: &Body) -> Self {
        Self {
            id: b.id,
            pos: b.pos,
            size: b.size,
            label: b.letter.label,
            color: b.letter.color,
        }
    }
}

/// Immutable snapshot of all bodies, in id order.
///
/// Produced by every [`World::step`] as the "bodies changed" notification.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
    pub bodies: Vec<BodyView>,
}

#[derive(Debug)]
pub struct World {
    letters: Vec<Letter>,
    bodies: Vec<Body>,
    drag: DragState,
    session: Session,
    cfg: Config,
}

impl World {
    /// Creates an unplaced world for the given letters.
    pub fn new(letters: Vec<Letter>, cfg: Config) -> Self {
        Self {
            letters,
            bodies: Vec::new(),
            drag: DragState::Idle,
            session: Session::new(),
            cfg,
        }
    }

    /// Creates an already placed world from prepared bodies.
    ///
    /// Ids are reassigned to match positions in `bodies`.
    pub fn from_bodies(mut bodies: Vec<Body>, cfg: Config) -> Self {
        for (i, b) in bodies.iter_mut().enumerate() {
            b.id = i;
        }
        let mut session = Session::new();
        session.mark_placed();
        Self {
            letters: bodies.iter().map(|b| b.letter).collect(),
            bodies,
            drag: DragState::Idle,
            session,
            cfg,
        }
    }

    pub fn letters(&self) -> &[Letter] {
        &self.letters
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn session(&self) -> Session {
        self.session
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn is_placed(&self) -> bool {
        self.session.is_placed()
    }

    pub fn is_released(&self) -> bool {
        self.session.is_released()
    }

    /// Places the bodies from measured letter sizes.
    ///
    /// The first successful call builds the whole body list at once. Later
    /// calls (re-measurement after a font or viewport change) are ignored so
    /// bodies in flight keep their positions. On error nothing changes and
    /// the caller may retry with better measurements.
    pub fn place(&mut self, sizes: &[Measurement], bounds: Bounds) -> Result<(), LayoutError> {
        if self.session.is_placed() {
            trace!("placement already done; ignoring re-measurement");
            return Ok(());
        }
        let bodies = layout::place_bodies(&self.letters, sizes, bounds, &self.cfg)?;
        debug!(
            count = bodies.len(),
            width = bounds.width,
            height = bounds.height,
            "bodies placed"
        );
        self.bodies = bodies;
        self.session.mark_placed();
        Ok(())
    }

    /// Advances the simulation by one step.
    ///
    /// `dt` is clamped to `[dt_min, dt_max]` before use. When `bounds` is not
    /// usable (the host view is gone or collapsed) the bodies are left alone.
    ///
    /// ### Parameters
    /// - `dt` - Seconds since the previous step.
    /// - `bounds` - Container size, queried fresh by the caller.
    ///
    /// ### Returns
    /// A [`Frame`] snapshot of the bodies after the step.
    pub fn step(&mut self, dt: f32, bounds: Bounds) -> Frame {
        if !bounds.is_usable() {
            trace!(?bounds, "skipping step: container unavailable");
            return self.snapshot();
        }
        let dt = self.cfg.clamp_dt(dt);

        phases::integration_phase(&mut self.bodies, &self.cfg, dt);
        phases::boundary_phase(&mut self.bodies, &self.cfg, bounds);
        phases::collision_phase(&mut self.bodies, &self.cfg);

        self.snapshot()
    }

    /// Handles a pointer press at `p` in container coordinates.
    ///
    /// A hit starts a drag; a miss releases the session.
    pub fn pointer_down(&mut self, p: Vec2) -> PointerDown {
        let (drag, outcome) = self.drag.pointer_down(&mut self.bodies, p);
        self.drag = drag;
        if outcome == PointerDown::Missed {
            self.session.release();
        }
        outcome
    }

    /// Handles pointer motion. Only has an effect while dragging.
    pub fn pointer_move(&mut self, p: Vec2, bounds: Bounds) {
        self.drag = self.drag.pointer_move(&mut self.bodies, p, bounds, &self.cfg);
    }

    /// Handles a pointer release. Ending a drag also releases the session.
    pub fn pointer_up(&mut self) {
        let (drag, ended) = self.drag.pointer_up(&mut self.bodies);
        self.drag = drag;
        if ended {
            self.session.release();
        }
    }

    /// Releases the session without a pointer event.
    pub fn release(&mut self) -> bool {
        self.session.release()
    }

    pub fn snapshot(&self) -> Frame {
        Frame {
            bodies: self.bodies.iter().map(BodyView::from).collect(),
        }
    }
}
