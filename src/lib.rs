//! Penguin Rush - hop a penguin across drifting ice floes to the mountain
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, floe generation, scoring)
//! - `platform`: Frame pacing between display refresh and simulation steps
//! - `persistence`: Key/value storage (LocalStorage on web)
//! - `sync`: Boundary to the chain-sync collaborator (contract calls)
//! - `leaderboard`: Read-only view of on-chain high scores

pub mod highscores;
pub mod leaderboard;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod sync;

pub use highscores::HighScores;
pub use leaderboard::Leaderboard;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (pixels)
    pub const PLAYFIELD_WIDTH: f32 = 700.0;
    pub const PLAYFIELD_HEIGHT: f32 = 450.0;

    /// Penguin spawn position and size. X never changes, the world scrolls.
    pub const ACTOR_X: f32 = 100.0;
    pub const ACTOR_WIDTH: f32 = 35.0;
    pub const ACTOR_HEIGHT: f32 = 45.0;

    /// Starting floe (wide, under the penguin)
    pub const START_FLOE_X: f32 = 70.0;
    pub const START_FLOE_WIDTH: f32 = 120.0;
    pub const START_FLOE_BASE_Y: f32 = 350.0;

    /// Floes placed ahead of the start floe on reset
    pub const INITIAL_FLOES_AHEAD: usize = 4;
    pub const INITIAL_GAP_MIN: f32 = 35.0;
    pub const INITIAL_GAP_JITTER: f32 = 10.0;

    /// Floe geometry
    pub const FLOE_HEIGHT: f32 = 30.0;
    pub const FLOE_MIN_WIDTH: f32 = 70.0;
    pub const FLOE_WIDTH_JITTER: f32 = 50.0;
    /// Spawn band for new floes (subset of the drift band)
    pub const FLOE_SPAWN_Y: f32 = 320.0;
    pub const FLOE_SPAWN_Y_JITTER: f32 = 30.0;

    /// Spawn spacing: BASE + speed * PER_SPEED + U(0, speed * JITTER_PER_SPEED)
    pub const SPAWN_GAP_BASE: f32 = 30.0;
    pub const SPAWN_GAP_PER_SPEED: f32 = 20.0;
    pub const SPAWN_GAP_JITTER_PER_SPEED: f32 = 10.0;

    /// Active floe count floor after every spawn check
    pub const MIN_FLOES: usize = 5;
    /// Floes are dropped once `x + width` passes this
    pub const DESPAWN_X: f32 = -40.0;

    /// Bobbing (render offset around base_y)
    pub const BOB_AMPLITUDE: f32 = 7.0;
    pub const BOB_SPEED_MIN: f32 = 0.03;
    pub const BOB_SPEED_JITTER: f32 = 0.02;

    /// Vertical drift of base_y, reversing at the band edges
    pub const DRIFT_MIN_Y: f32 = 300.0;
    pub const DRIFT_MAX_Y: f32 = 370.0;
    pub const DRIFT_SPEED_MIN: f32 = 0.3;
    pub const DRIFT_SPEED_JITTER: f32 = 0.4;
    pub const DRIFT_SCALE: f32 = 0.25;

    /// Landing test: horizontal inset on both floe edges
    pub const LANDING_INSET: f32 = 4.0;
    /// Landing test: depth of the top slice that counts as the surface
    pub const LANDING_BAND: f32 = 22.0;

    /// Below this the penguin has missed every floe
    pub const FALL_THRESHOLD_Y: f32 = 410.0;

    /// Goal marker parallax
    pub const MOUNTAIN_START_X: f32 = 750.0;
    pub const MOUNTAIN_PARALLAX: f32 = 0.25;

    /// Decorative phases
    pub const WAVE_PHASE_STEP: f32 = 0.08;
    pub const STAR_TWINKLE_STEP: f32 = 0.05;
    pub const STAR_COUNT: usize = 40;
    pub const STAR_FIELD_HEIGHT: f32 = 180.0;

    /// Reference refresh rate the per-frame constants were tuned at
    pub const FRAME_DT: f64 = 1.0 / 60.0;
    /// Maximum substeps per display frame in fixed-step mode
    pub const MAX_SUBSTEPS: u32 = 4;
}
