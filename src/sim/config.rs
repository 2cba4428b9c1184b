//! Data-driven game balance
//!
//! The game shipped as two engines differing only in tuning. Both are
//! expressed here as presets of a single `SimConfig`.

use serde::{Deserialize, Serialize};

/// Tuning preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Variant {
    /// Faster, heavier penguin
    #[default]
    Rush,
    /// Slower, floatier tuning
    Classic,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Rush => "Rush",
            Variant::Classic => "Classic",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "rush" => Some(Variant::Rush),
            "classic" => Some(Variant::Classic),
            _ => None,
        }
    }
}

/// Per-step physics and scoring constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Added to vertical velocity every step
    pub gravity: f32,
    /// Vertical velocity set by a jump (negative = up)
    pub jump_impulse: f32,
    /// Scroll speed at score 0
    pub base_speed: f32,
    /// Scroll speed cap
    pub max_speed: f32,
    /// Score points per +1 scroll speed
    pub speed_divisor: f32,
    /// Distance to the mountain at run start
    pub distance_target: f32,
    /// Distance covered per pixel of scroll
    pub distance_ratio: f32,
    pub jump_bonus: u64,
    pub landing_bonus: u64,
    pub goal_bonus: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::rush()
    }
}

impl SimConfig {
    pub fn rush() -> Self {
        Self {
            gravity: 0.65,
            jump_impulse: -11.5,
            base_speed: 1.2,
            max_speed: 5.0,
            speed_divisor: 300.0,
            distance_target: 500.0,
            distance_ratio: 0.1,
            jump_bonus: 5,
            landing_bonus: 10,
            goal_bonus: 500,
        }
    }

    pub fn classic() -> Self {
        Self {
            gravity: 0.55,
            jump_impulse: -11.0,
            base_speed: 0.8,
            max_speed: 3.5,
            speed_divisor: 400.0,
            ..Self::rush()
        }
    }

    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Rush => Self::rush(),
            Variant::Classic => Self::classic(),
        }
    }

    /// Scroll speed for a score: monotonic in score, clamped to `max_speed`
    pub fn speed_for_score(&self, score: u64) -> f32 {
        (self.base_speed + score as f32 / self.speed_divisor).min(self.max_speed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_curve_clamps() {
        let cfg = SimConfig::rush();
        assert!((cfg.speed_for_score(0) - 1.2).abs() < 1e-6);
        assert!((cfg.speed_for_score(300) - 2.2).abs() < 1e-5);
        assert_eq!(cfg.speed_for_score(1_000_000), 5.0);

        let classic = SimConfig::classic();
        assert!((classic.speed_for_score(400) - 1.8).abs() < 1e-5);
        assert_eq!(classic.speed_for_score(1_000_000), 3.5);
    }

    #[test]
    fn test_speed_curve_monotonic() {
        let cfg = SimConfig::classic();
        let mut last = 0.0;
        for score in (0..5000).step_by(5) {
            let speed = cfg.speed_for_score(score);
            assert!(speed >= last);
            last = speed;
        }
    }

    #[test]
    fn test_variant_parse() {
        assert_eq!(Variant::from_str("RUSH"), Some(Variant::Rush));
        assert_eq!(Variant::from_str("classic"), Some(Variant::Classic));
        assert_eq!(Variant::from_str("turbo"), None);
        assert_eq!(SimConfig::for_variant(Variant::Classic).gravity, 0.55);
        // Shared scoring survives the preset override
        assert_eq!(SimConfig::classic().goal_bonus, 500);
    }
}
