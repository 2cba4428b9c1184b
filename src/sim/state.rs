//! Game state and core simulation types
//!
//! Everything the step function reads or writes lives in `GameState`.
//! Renderers get a `Snapshot`; they never touch the state itself.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::config::SimConfig;
use crate::consts::*;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Entities placed, waiting for start
    NotStarted,
    /// Active gameplay
    Running,
    /// Reached the mountain
    Won,
    /// Fell in the water
    Lost,
}

impl GamePhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::Won | GamePhase::Lost)
    }
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunOutcome {
    ReachedGoal,
    Fell,
}

/// Notifications for collaborators (chain sync, audio, HUD). Fire-and-forget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    RunStarted,
    Jumped { jump_count: u32 },
    Landed { floe_id: u32, bonus: u64 },
    RunEnded { outcome: RunOutcome, score: u64, jumps: u32 },
}

/// The penguin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    /// Top-left corner. `pos.x` is fixed for the whole run.
    pub pos: Vec2,
    pub size: Vec2,
    pub velocity_y: f32,
    pub is_jumping: bool,
    pub on_floe: bool,
    /// Id of the supporting floe, looked up in `GameState::floes`
    pub current_floe: Option<u32>,
}

impl Actor {
    pub fn new() -> Self {
        Self {
            pos: Vec2::new(ACTOR_X, 0.0),
            size: Vec2::new(ACTOR_WIDTH, ACTOR_HEIGHT),
            velocity_y: 0.0,
            is_jumping: false,
            on_floe: true,
            current_floe: None,
        }
    }

    /// Y coordinate of the penguin's feet
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Rest on top of a floe
    pub fn snap_to(&mut self, floe: &Floe) {
        self.pos.y = floe.pos.y - self.size.y;
    }
}

impl Default for Actor {
    fn default() -> Self {
        Self::new()
    }
}

/// A drifting ice floe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Floe {
    pub id: u32,
    /// Left edge and current (bobbed) top. Collision uses `pos.y`.
    pub pos: Vec2,
    /// Drift reference the bob oscillates around, kept in the drift band
    pub base_y: f32,
    pub width: f32,
    pub height: f32,
    pub float_phase: f32,
    pub float_speed: f32,
    /// +1 drifting down, -1 drifting up
    pub drift_direction: f32,
    pub drift_speed: f32,
    /// Landing bonus already awarded
    pub scored: bool,
}

impl Floe {
    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.width
    }

    /// Scroll left, bob, and drift within the band
    pub fn advance(&mut self, scroll: f32) {
        self.pos.x -= scroll;
        self.float_phase += self.float_speed;
        self.pos.y = self.base_y + self.float_phase.sin() * BOB_AMPLITUDE;
        self.base_y += self.drift_direction * self.drift_speed * DRIFT_SCALE;
        if self.base_y < DRIFT_MIN_Y {
            self.base_y = DRIFT_MIN_Y;
            self.drift_direction = 1.0;
        }
        if self.base_y > DRIFT_MAX_Y {
            self.base_y = DRIFT_MAX_Y;
            self.drift_direction = -1.0;
        }
    }

    pub fn is_offscreen(&self) -> bool {
        self.right() < DESPAWN_X
    }
}

/// Background star (cosmetic)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Star {
    pub pos: Vec2,
    pub size: f32,
    pub twinkle: f32,
}

/// Read-only actor pose for renderers
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ActorView {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub is_jumping: bool,
}

/// Read-only floe for renderers
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FloeView {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub actor: ActorView,
    pub floes: Vec<FloeView>,
    pub stars: Vec<Star>,
    pub mountain_x: f32,
    pub wave_offset: f32,
    pub score: u64,
    pub distance_remaining: f64,
    pub jump_count: u32,
    pub phase: GamePhase,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    pub config: SimConfig,
    pub phase: GamePhase,
    pub score: u64,
    pub jump_count: u32,
    pub distance_remaining: f64,
    pub game_speed: f32,
    /// Steps taken this run
    pub time_ticks: u64,
    pub actor: Actor,
    /// Active floes, in spawn order
    pub floes: Vec<Floe>,
    pub stars: Vec<Star>,
    pub mountain_x: f32,
    pub wave_offset: f32,
    pub(crate) rng: Pcg32,
    events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a new state with entities placed and phase `NotStarted`
    pub fn new(seed: u64, config: SimConfig) -> Self {
        let mut state = Self {
            seed,
            config,
            phase: GamePhase::NotStarted,
            score: 0,
            jump_count: 0,
            distance_remaining: f64::from(config.distance_target),
            game_speed: config.base_speed,
            time_ticks: 0,
            actor: Actor::new(),
            floes: Vec::new(),
            stars: Vec::new(),
            mountain_x: MOUNTAIN_START_X,
            wave_offset: 0.0,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            next_id: 1,
        };
        state.reset();
        state
    }

    /// Allocate a new floe ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Reinitialize every entity and counter. The RNG stream continues.
    pub fn reset(&mut self) {
        self.phase = GamePhase::NotStarted;
        self.score = 0;
        self.jump_count = 0;
        self.distance_remaining = f64::from(self.config.distance_target);
        self.game_speed = self.config.base_speed;
        self.time_ticks = 0;
        self.mountain_x = MOUNTAIN_START_X;
        self.wave_offset = 0.0;

        self.stars.clear();
        for _ in 0..STAR_COUNT {
            let star = Star {
                pos: Vec2::new(
                    self.rng.random::<f32>() * PLAYFIELD_WIDTH,
                    self.rng.random::<f32>() * STAR_FIELD_HEIGHT,
                ),
                size: self.rng.random::<f32>() * 2.0 + 1.0,
                twinkle: self.rng.random::<f32>() * std::f32::consts::TAU,
            };
            self.stars.push(star);
        }

        self.floes.clear();
        let start = self.create_floe(START_FLOE_X, START_FLOE_BASE_Y, Some(START_FLOE_WIDTH));
        let mut last_right = start.right();

        self.actor = Actor::new();
        self.actor.current_floe = Some(start.id);
        self.actor.snap_to(&start);
        self.floes.push(start);

        for _ in 0..INITIAL_FLOES_AHEAD {
            let x = last_right + INITIAL_GAP_MIN + self.rng.random::<f32>() * INITIAL_GAP_JITTER;
            let y = FLOE_SPAWN_Y + self.rng.random::<f32>() * FLOE_SPAWN_Y_JITTER;
            let floe = self.create_floe(x, y, None);
            last_right = floe.right();
            self.floes.push(floe);
        }

        self.events.clear();
    }

    /// Enter `Running`. Restarting from a terminal phase resets first.
    pub fn start(&mut self) {
        match self.phase {
            GamePhase::Running => return,
            GamePhase::Won | GamePhase::Lost => self.reset(),
            GamePhase::NotStarted => {}
        }
        self.phase = GamePhase::Running;
        self.events.push(GameEvent::RunStarted);
        log::info!("Run started (seed {})", self.seed);
    }

    /// Build a floe with randomized width (unless given), bob and drift
    pub fn create_floe(&mut self, x: f32, y: f32, width: Option<f32>) -> Floe {
        let id = self.next_entity_id();
        let width =
            width.unwrap_or_else(|| FLOE_MIN_WIDTH + self.rng.random::<f32>() * FLOE_WIDTH_JITTER);
        let float_phase = self.rng.random::<f32>() * std::f32::consts::TAU;
        let float_speed = BOB_SPEED_MIN + self.rng.random::<f32>() * BOB_SPEED_JITTER;
        let drift_direction = if self.rng.random_bool(0.5) { 1.0 } else { -1.0 };
        let drift_speed = DRIFT_SPEED_MIN + self.rng.random::<f32>() * DRIFT_SPEED_JITTER;
        Floe {
            id,
            pos: Vec2::new(x, y),
            base_y: y,
            width,
            height: FLOE_HEIGHT,
            float_phase,
            float_speed,
            drift_direction,
            drift_speed,
            scored: false,
        }
    }

    /// Look up a floe by id
    pub fn floe(&self, id: u32) -> Option<&Floe> {
        self.floes.iter().find(|f| f.id == id)
    }

    /// The floe currently supporting the penguin, if it still exists
    pub fn current_floe(&self) -> Option<&Floe> {
        self.actor.current_floe.and_then(|id| self.floe(id))
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            actor: ActorView {
                x: self.actor.pos.x,
                y: self.actor.pos.y,
                width: self.actor.size.x,
                height: self.actor.size.y,
                is_jumping: self.actor.is_jumping,
            },
            floes: self
                .floes
                .iter()
                .map(|f| FloeView {
                    x: f.pos.x,
                    y: f.pos.y,
                    width: f.width,
                    height: f.height,
                })
                .collect(),
            stars: self.stars.clone(),
            mountain_x: self.mountain_x,
            wave_offset: self.wave_offset,
            score: self.score,
            distance_remaining: self.distance_remaining,
            jump_count: self.jump_count,
            phase: self.phase,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_layout() {
        let state = GameState::new(7, SimConfig::rush());
        assert_eq!(state.phase, GamePhase::NotStarted);
        assert_eq!(state.floes.len(), 1 + INITIAL_FLOES_AHEAD);
        assert_eq!(state.stars.len(), STAR_COUNT);

        let start = &state.floes[0];
        assert_eq!(start.pos.x, START_FLOE_X);
        assert_eq!(start.width, START_FLOE_WIDTH);

        // Penguin rests on the start floe
        assert!(state.actor.on_floe);
        assert_eq!(state.actor.current_floe, Some(start.id));
        assert_eq!(state.actor.pos.y, start.pos.y - state.actor.size.y);

        // Floes ahead are spaced and inside the spawn band
        for pair in state.floes.windows(2) {
            let gap = pair[1].pos.x - pair[0].right();
            assert!(gap > INITIAL_GAP_MIN - 1e-3 && gap < INITIAL_GAP_MIN + INITIAL_GAP_JITTER + 1e-3);
        }
        for floe in &state.floes[1..] {
            assert!(floe.base_y >= FLOE_SPAWN_Y && floe.base_y <= FLOE_SPAWN_Y + FLOE_SPAWN_Y_JITTER);
            assert!(floe.width >= FLOE_MIN_WIDTH && floe.width <= FLOE_MIN_WIDTH + FLOE_WIDTH_JITTER);
        }
    }

    #[test]
    fn test_floe_ids_unique() {
        let mut state = GameState::new(3, SimConfig::rush());
        state.reset();
        let mut ids: Vec<u32> = state.floes.iter().map(|f| f.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), state.floes.len());
        // Ids keep growing across resets
        assert!(ids[0] > 1 + INITIAL_FLOES_AHEAD as u32);
    }

    #[test]
    fn test_start_transitions() {
        let mut state = GameState::new(1, SimConfig::rush());
        state.start();
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.drain_events(), vec![GameEvent::RunStarted]);

        // Already running: no second RunStarted
        state.start();
        assert!(state.drain_events().is_empty());

        // Restart from a terminal phase reinitializes
        state.score = 120;
        state.phase = GamePhase::Lost;
        state.start();
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.floes[0].pos.x, START_FLOE_X);
    }

    #[test]
    fn test_drift_reverses_at_band_edges() {
        let mut state = GameState::new(5, SimConfig::rush());
        let mut floe = state.create_floe(200.0, DRIFT_MAX_Y - 0.01, None);
        floe.drift_direction = 1.0;
        floe.drift_speed = 0.7;
        floe.advance(0.0);
        assert_eq!(floe.base_y, DRIFT_MAX_Y);
        assert_eq!(floe.drift_direction, -1.0);

        floe.base_y = DRIFT_MIN_Y + 0.01;
        floe.advance(0.0);
        assert_eq!(floe.base_y, DRIFT_MIN_Y);
        assert_eq!(floe.drift_direction, 1.0);
    }

    #[test]
    fn test_snapshot_mirrors_state() {
        let state = GameState::new(11, SimConfig::classic());
        let snap = state.snapshot();
        assert_eq!(snap.floes.len(), state.floes.len());
        assert_eq!(snap.phase, GamePhase::NotStarted);
        assert_eq!(snap.actor.x, ACTOR_X);
        assert_eq!(
            snap.distance_remaining,
            f64::from(SimConfig::classic().distance_target)
        );
        assert!(serde_json::to_string(&snap).is_ok());
    }
}
