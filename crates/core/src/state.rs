use crate::MaskKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FlowState {
    Intro,
    Menu,
    Playing,
    GameOver,
    Victory,
    GameComplete,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DiscoveryStep {
    Unveil,
    RuleText,
}

// One turn in flight at a time. Board intents are accepted only in Idle;
// the pauses accept nothing but an advance input.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TurnPhase {
    Idle,
    Resolving,
    Discovery { kind: MaskKind, step: DiscoveryStep },
    Tutorial { step: usize },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelStatus {
    pub level: u32,
    pub budget: u32,
    #[serde(default)]
    pub masks_spawned: u32,
    #[serde(default)]
    pub masks_defeated: u32,
    #[serde(default)]
    pub failures: u32,
    #[serde(default)]
    pub flushes_left: u8,
}

impl LevelStatus {
    pub fn fresh(level: u32, budget: u32, flushes: u8) -> Self {
        Self {
            level,
            budget,
            masks_spawned: 0,
            masks_defeated: 0,
            failures: 0,
            flushes_left: flushes,
        }
    }

    pub fn masks_remaining(&self) -> u32 {
        self.budget.saturating_sub(self.masks_defeated)
    }

    pub fn budget_left(&self) -> u32 {
        self.budget.saturating_sub(self.masks_spawned)
    }
}
