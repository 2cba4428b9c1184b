//! Per-frame simulation step
//!
//! One call advances the world by one display frame. Physics constants are
//! expressed per step; frame pacing is the caller's concern (see `platform`).

use rand::Rng;

use super::collision::find_landing;
use super::state::{Floe, GameEvent, GamePhase, GameState, RunOutcome};
use crate::consts::*;

/// Autopilot jumps this many frames of scroll before losing its footing
const AUTOPILOT_LEAD_FRAMES: f32 = 2.0;

/// Remaining distance that counts as arrived. Absorbs rounding of decimal
/// speeds and ratios; far below the smallest per-step decrement.
const GOAL_EPSILON: f64 = 1e-3;

/// Input commands for a single step
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump trigger (key press, click, tap)
    pub jump: bool,
    /// Demo mode - autopilot decides when to jump
    pub idle_mode: bool,
}

impl GameState {
    /// Jump trigger. Silently ignored outside `Running` and while airborne.
    pub fn trigger_jump(&mut self) {
        if self.phase != GamePhase::Running {
            return;
        }
        if self.actor.is_jumping && !self.actor.on_floe {
            return;
        }

        self.actor.velocity_y = self.config.jump_impulse;
        self.actor.is_jumping = true;
        self.actor.on_floe = false;
        self.actor.current_floe = None;

        self.score += self.config.jump_bonus;
        self.jump_count += 1;
        self.push_event(GameEvent::Jumped {
            jump_count: self.jump_count,
        });
    }

    /// Advance the world by one frame. No-op unless `Running`.
    pub fn step(&mut self) {
        if self.phase != GamePhase::Running {
            return;
        }
        self.time_ticks += 1;

        self.game_speed = self.config.speed_for_score(self.score);
        let speed = self.game_speed;

        // Ballistic motion, overridden while glued to a floe
        self.actor.velocity_y += self.config.gravity;
        self.actor.pos.y += self.actor.velocity_y;
        if self.actor.on_floe {
            if let Some(y) = self.current_floe().map(|f| f.pos.y) {
                self.actor.pos.y = y - self.actor.size.y;
            }
        }

        for floe in &mut self.floes {
            floe.advance(speed);
        }

        self.floes.retain(|f| !f.is_offscreen());
        if let Some(id) = self.actor.current_floe {
            if self.floe(id).is_none() {
                self.actor.current_floe = None;
                self.actor.on_floe = false;
            }
        }
        while self.floes.len() < MIN_FLOES {
            self.spawn_floe();
        }

        self.distance_remaining -= f64::from(speed) * f64::from(self.config.distance_ratio);
        if self.distance_remaining <= GOAL_EPSILON {
            self.distance_remaining = 0.0;
            self.score += self.config.goal_bonus;
            self.end_run(GamePhase::Won);
            return;
        }

        self.mountain_x -= speed * MOUNTAIN_PARALLAX;
        self.wave_offset += WAVE_PHASE_STEP;
        for star in &mut self.stars {
            star.twinkle += STAR_TWINKLE_STEP;
        }

        self.actor.on_floe = false;
        if let Some(index) = find_landing(&self.actor, &self.floes) {
            let bonus = self.config.landing_bonus;
            let floe = &mut self.floes[index];
            let floe_id = floe.id;
            let first_landing = !floe.scored;
            floe.scored = true;

            self.actor.pos.y = floe.pos.y - self.actor.size.y;
            self.actor.velocity_y = 0.0;
            self.actor.is_jumping = false;
            self.actor.on_floe = true;
            self.actor.current_floe = Some(floe_id);

            if first_landing {
                self.score += bonus;
                self.push_event(GameEvent::Landed { floe_id, bonus });
            }
        }

        if self.actor.pos.y > FALL_THRESHOLD_Y || self.actor.pos.x < 0.0 {
            self.end_run(GamePhase::Lost);
        }
    }

    /// Append a floe after the rightmost one, spaced by current speed
    fn spawn_floe(&mut self) {
        let speed = self.game_speed;
        let last_right = self
            .floes
            .iter()
            .map(Floe::right)
            .reduce(f32::max)
            .unwrap_or(PLAYFIELD_WIDTH);
        let gap = SPAWN_GAP_BASE
            + speed * SPAWN_GAP_PER_SPEED
            + self.rng.random::<f32>() * speed * SPAWN_GAP_JITTER_PER_SPEED;
        let y = FLOE_SPAWN_Y + self.rng.random::<f32>() * FLOE_SPAWN_Y_JITTER;
        let floe = self.create_floe(last_right + gap, y, None);
        self.floes.push(floe);
    }

    fn end_run(&mut self, phase: GamePhase) {
        self.phase = phase;
        let outcome = match phase {
            GamePhase::Won => RunOutcome::ReachedGoal,
            _ => RunOutcome::Fell,
        };
        self.push_event(GameEvent::RunEnded {
            outcome,
            score: self.score,
            jumps: self.jump_count,
        });
        log::info!(
            "Run ended: {:?} with score {} after {} jumps ({} steps)",
            outcome,
            self.score,
            self.jump_count,
            self.time_ticks
        );
    }
}

/// Demo autopilot: jump off the supporting floe just before its landable edge
/// slides past the penguin
pub fn autopilot_wants_jump(state: &GameState) -> bool {
    if state.phase != GamePhase::Running || !state.actor.on_floe {
        return false;
    }
    let Some(floe) = state.current_floe() else {
        return false;
    };
    let trailing_edge = floe.right() - LANDING_INSET;
    trailing_edge - state.game_speed * AUTOPILOT_LEAD_FRAMES <= state.actor.pos.x
}

/// Apply one frame of input, then advance the simulation
pub fn tick(state: &mut GameState, input: &TickInput) {
    let jump = input.jump || (input.idle_mode && autopilot_wants_jump(state));
    if jump {
        state.trigger_jump();
    }
    state.step();
}
