//! Platform abstraction layer
//!
//! Frame pacing between the display callback and the simulation. The step
//! constants were tuned for one step per 60 Hz frame; `FrameClock` decides how
//! many steps each display frame gets.

use serde::{Deserialize, Serialize};

use crate::consts::{FRAME_DT, MAX_SUBSTEPS};

/// Longest frame gap fed to the accumulator (ms), e.g. after a background tab
const MAX_FRAME_MS: f64 = 100.0;

/// How display frames map to simulation steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TimestepMode {
    /// One step per display frame; speed follows the refresh rate
    PerFrame,
    /// Fixed 60 Hz steps from measured frame time
    #[default]
    Fixed,
}

/// Converts animation-frame timestamps into step counts
#[derive(Debug, Clone)]
pub struct FrameClock {
    pub mode: TimestepMode,
    accumulator: f64,
    last_time_ms: Option<f64>,
}

impl FrameClock {
    pub fn new(mode: TimestepMode) -> Self {
        Self {
            mode,
            accumulator: 0.0,
            last_time_ms: None,
        }
    }

    /// Number of simulation steps to run for a frame at `now_ms`
    pub fn advance(&mut self, now_ms: f64) -> u32 {
        let elapsed_ms = match self.last_time_ms {
            Some(last) => (now_ms - last).clamp(0.0, MAX_FRAME_MS),
            None => FRAME_DT * 1000.0,
        };
        self.last_time_ms = Some(now_ms);

        match self.mode {
            TimestepMode::PerFrame => 1,
            TimestepMode::Fixed => {
                self.accumulator += elapsed_ms / 1000.0;
                let mut steps = 0;
                while self.accumulator >= FRAME_DT && steps < MAX_SUBSTEPS {
                    self.accumulator -= FRAME_DT;
                    steps += 1;
                }
                // Drop what we could not catch up on
                if steps == MAX_SUBSTEPS {
                    self.accumulator = self.accumulator.min(FRAME_DT);
                }
                steps
            }
        }
    }

    /// Forget timing history (on restart or resume)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.last_time_ms = None;
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(TimestepMode::default())
    }
}
