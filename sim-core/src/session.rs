use tracing::info;

/// Coarse lifecycle of a session, derived from [`Session`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// No bodies yet; waiting for usable measurements.
    Uninitialized,
    /// Bodies are placed and frozen until the first release.
    Placed,
    /// Released: the step loop runs for the rest of the session.
    Simulating,
}

/// One-way session flags.
///
/// Both flags only ever go from `false` to `true`, and only through the
/// methods below.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Session {
    placed: bool,
    released: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_placed(&self) -> bool {
        self.placed
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    pub fn mark_placed(&mut self) {
        self.placed = true;
    }

    /// Sets the released flag.
    ///
    /// Returns `true` only for the call that performed the transition.
    pub fn release(&mut self) -> bool {
        if self.released {
            return false;
        }
        self.released = true;
        info!("session released");
        true
    }

    pub fn phase(&self) -> Phase {
        match (self.placed, self.released) {
            (false, _) => Phase::Uninitialized,
            (true, false) => Phase::Placed,
            (true, true) => Phase::Simulating,
        }
    }
}
