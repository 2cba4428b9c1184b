//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per call, no wall-clock reads
//! - Seeded RNG only
//! - Stable iteration order (floe storage order)
//! - No rendering, audio or chain dependencies

pub mod collision;
pub mod config;
pub mod state;
pub mod tick;

pub use collision::{find_landing, lands_on};
pub use config::{SimConfig, Variant};
pub use state::{
    Actor, ActorView, Floe, FloeView, GameEvent, GamePhase, GameState, RunOutcome, Snapshot, Star,
};
pub use tick::{TickInput, autopilot_wants_jump, tick};
