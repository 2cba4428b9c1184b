//! Landing detection
//!
//! A landing only counts when the penguin's feet enter the shallow top slice
//! of a floe while falling. Passing through a floe's side mid-arc is not a
//! landing.

use super::state::{Actor, Floe};
use crate::consts::{LANDING_BAND, LANDING_INSET};

/// True if the actor touches down on `floe` this step
pub fn lands_on(actor: &Actor, floe: &Floe) -> bool {
    let falling = actor.velocity_y >= 0.0;
    let overlaps_x = actor.pos.x + actor.size.x > floe.pos.x + LANDING_INSET
        && actor.pos.x < floe.pos.x + floe.width - LANDING_INSET;
    let feet = actor.bottom();
    let in_top_band = feet > floe.pos.y && feet < floe.pos.y + LANDING_BAND;
    falling && overlaps_x && in_top_band
}

/// Index of the first floe (storage order) the actor lands on
pub fn find_landing(actor: &Actor, floes: &[Floe]) -> Option<usize> {
    floes.iter().position(|floe| lands_on(actor, floe))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn floe_at(id: u32, x: f32, y: f32, width: f32) -> Floe {
        Floe {
            id,
            pos: Vec2::new(x, y),
            base_y: y,
            width,
            height: 30.0,
            float_phase: 0.0,
            float_speed: 0.0,
            drift_direction: 1.0,
            drift_speed: 0.0,
            scored: false,
        }
    }

    fn falling_actor(feet_y: f32) -> Actor {
        let mut actor = Actor::new();
        actor.on_floe = false;
        actor.velocity_y = 2.0;
        actor.pos.y = feet_y - actor.size.y;
        actor
    }

    #[test]
    fn test_lands_in_top_band() {
        let floe = floe_at(1, 80.0, 340.0, 100.0);
        assert!(lands_on(&falling_actor(345.0), &floe));
        assert!(lands_on(&falling_actor(361.9), &floe));
    }

    #[test]
    fn test_side_pass_is_not_a_landing() {
        let floe = floe_at(1, 80.0, 340.0, 100.0);
        // Feet below the top slice: passing the floe's side
        assert!(!lands_on(&falling_actor(362.0), &floe));
        assert!(!lands_on(&falling_actor(369.0), &floe));
        // Feet exactly on the surface line do not count (strict)
        assert!(!lands_on(&falling_actor(340.0), &floe));
    }

    #[test]
    fn test_rising_actor_never_lands() {
        let floe = floe_at(1, 80.0, 340.0, 100.0);
        let mut actor = falling_actor(345.0);
        actor.velocity_y = -0.5;
        assert!(!lands_on(&actor, &floe));
        actor.velocity_y = 0.0;
        assert!(lands_on(&actor, &floe));
    }

    #[test]
    fn test_edge_insets() {
        let actor = falling_actor(345.0);
        // Actor spans [100, 135]
        assert!(!lands_on(&actor, &floe_at(1, 131.0, 340.0, 100.0)));
        assert!(lands_on(&actor, &floe_at(1, 130.0, 340.0, 100.0)));
        assert!(!lands_on(&actor, &floe_at(1, 0.0, 340.0, 104.0)));
        assert!(lands_on(&actor, &floe_at(1, 0.0, 340.0, 105.0)));
    }

    #[test]
    fn test_first_match_wins() {
        let actor = falling_actor(345.0);
        let floes = vec![
            floe_at(1, 400.0, 340.0, 100.0),
            floe_at(2, 90.0, 342.0, 100.0),
            floe_at(3, 90.0, 335.0, 100.0),
        ];
        assert_eq!(find_landing(&actor, &floes), Some(1));
        assert_eq!(find_landing(&actor, &floes[..1]), None);
    }
}
