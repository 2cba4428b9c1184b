//! Chain-sync boundary
//!
//! Gameplay milestones are mirrored as contract calls by an external wallet
//! layer. The simulation only emits `GameEvent`s; `SyncBridge` turns them into
//! `ContractCall`s and hands them to a `ChainSync` without waiting on the
//! result. Signing, submission and receipts all live on the other side.

use serde::{Deserialize, Serialize};

use crate::sim::GameEvent;

/// Default minimum spacing between mirrored jumps (ms)
pub const JUMP_COOLDOWN_MS: f64 = 200.0;

/// Contract functions the game is allowed to call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "function", rename_all = "camelCase")]
pub enum ContractCall {
    StartGame,
    Jump,
    StoreNewHighScore { score: u64 },
}

impl ContractCall {
    pub fn function_name(&self) -> &'static str {
        match self {
            ContractCall::StartGame => "startGame",
            ContractCall::Jump => "jump",
            ContractCall::StoreNewHighScore { .. } => "storeNewHighScore",
        }
    }
}

/// Receiver of contract calls. Must not block the caller.
pub trait ChainSync {
    fn submit(&mut self, call: ContractCall);
}

/// Lets at most one jump through per cooldown window
#[derive(Debug, Clone)]
pub struct JumpThrottle {
    pub cooldown_ms: f64,
    last_pass_ms: Option<f64>,
}

impl JumpThrottle {
    pub fn new(cooldown_ms: f64) -> Self {
        Self {
            cooldown_ms,
            last_pass_ms: None,
        }
    }

    pub fn allow(&mut self, now_ms: f64) -> bool {
        let open = self
            .last_pass_ms
            .is_none_or(|last| now_ms - last > self.cooldown_ms);
        if open {
            self.last_pass_ms = Some(now_ms);
        }
        open
    }
}

impl Default for JumpThrottle {
    fn default() -> Self {
        Self::new(JUMP_COOLDOWN_MS)
    }
}

/// Forwards game events to a `ChainSync`
pub struct SyncBridge<S: ChainSync> {
    sink: S,
    throttle: JumpThrottle,
    pub submitted: u64,
    pub throttled: u64,
}

impl<S: ChainSync> SyncBridge<S> {
    pub fn new(sink: S) -> Self {
        Self::with_throttle(sink, JumpThrottle::default())
    }

    pub fn with_throttle(sink: S, throttle: JumpThrottle) -> Self {
        Self {
            sink,
            throttle,
            submitted: 0,
            throttled: 0,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Translate one event observed at `now_ms`
    pub fn handle(&mut self, event: &GameEvent, now_ms: f64) {
        let call = match *event {
            GameEvent::RunStarted => Some(ContractCall::StartGame),
            GameEvent::Jumped { .. } => {
                if self.throttle.allow(now_ms) {
                    Some(ContractCall::Jump)
                } else {
                    self.throttled += 1;
                    None
                }
            }
            GameEvent::RunEnded { score, .. } if score > 0 => {
                Some(ContractCall::StoreNewHighScore { score })
            }
            GameEvent::RunEnded { .. } | GameEvent::Landed { .. } => None,
        };
        if let Some(call) = call {
            log::debug!("Chain call: {}", call.function_name());
            self.sink.submit(call);
            self.submitted += 1;
        }
    }
}

/// Collects calls in memory (native builds, tests)
#[derive(Debug, Default)]
pub struct RecordingSync {
    pub calls: Vec<ContractCall>,
}

impl ChainSync for RecordingSync {
    fn submit(&mut self, call: ContractCall) {
        self.calls.push(call);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::RunOutcome;

    #[test]
    fn test_throttle_window() {
        let mut throttle = JumpThrottle::new(200.0);
        assert!(throttle.allow(1000.0));
        assert!(!throttle.allow(1100.0));
        assert!(!throttle.allow(1200.0));
        assert!(throttle.allow(1200.5));
        assert!(!throttle.allow(1300.0));
    }

    #[test]
    fn test_bridge_translates_events() {
        let mut bridge = SyncBridge::new(RecordingSync::default());
        bridge.handle(&GameEvent::RunStarted, 0.0);
        bridge.handle(&GameEvent::Jumped { jump_count: 1 }, 10.0);
        bridge.handle(&GameEvent::Jumped { jump_count: 2 }, 50.0);
        bridge.handle(&GameEvent::Landed { floe_id: 3, bonus: 10 }, 60.0);
        bridge.handle(&GameEvent::Jumped { jump_count: 3 }, 400.0);
        bridge.handle(
            &GameEvent::RunEnded {
                outcome: RunOutcome::Fell,
                score: 25,
                jumps: 3,
            },
            500.0,
        );

        assert_eq!(
            bridge.sink().calls,
            vec![
                ContractCall::StartGame,
                ContractCall::Jump,
                ContractCall::Jump,
                ContractCall::StoreNewHighScore { score: 25 },
            ]
        );
        assert_eq!(bridge.submitted, 4);
        assert_eq!(bridge.throttled, 1);
    }

    #[test]
    fn test_zero_score_not_stored() {
        let mut bridge = SyncBridge::new(RecordingSync::default());
        bridge.handle(
            &GameEvent::RunEnded {
                outcome: RunOutcome::Fell,
                score: 0,
                jumps: 0,
            },
            0.0,
        );
        assert!(bridge.sink().calls.is_empty());
    }

    #[test]
    fn test_call_json_shape() {
        let json = serde_json::to_string(&ContractCall::StoreNewHighScore { score: 42 }).unwrap();
        assert_eq!(json, r#"{"function":"storeNewHighScore","score":42}"#);
        let json = serde_json::to_string(&ContractCall::Jump).unwrap();
        assert_eq!(json, r#"{"function":"jump"}"#);
    }
}
