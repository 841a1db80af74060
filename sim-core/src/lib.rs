//! Core 2-D letter physics: falling, stacking and draggable boxes.
//!
//! Main components:
//! - [`body`] — rigid rectangles and the letters they display.
//! - [`config`] — tunable constants and their TOML loader.
//! - [`layout`] — initial placement from measured letter sizes.
//! - [`phases`] — integration, boundary and pairwise collision phases.
//! - [`drag`] — single-pointer grab/drag/throw state machine.
//! - [`session`] — one-way placed/released lifecycle flags.
//! - [`world`] — the body store tying the above together.
//! - [`driver`] — per-refresh step scheduler with cancellation.
//! - [`types`] — shared ids and container bounds.

pub mod body;
pub mod config;
pub mod drag;
pub mod driver;
pub mod layout;
pub mod phases;
pub mod session;
pub mod types;
pub mod world;
