use crate::{Card, MaskKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    RunStarted { seed: u64 },
    LevelStarted { level: u32, budget: u32, pool: usize },
    MaskSpawned { row: usize, col: usize, kind: MaskKind },
    CardDrawn { card: Card },
    BattleWon { kind: MaskKind, row: usize, col: usize, played: Card },
    BattleLost { kind: MaskKind, row: usize, col: usize, played: Card },
    MaskCaptured { kind: MaskKind, prize: Card },
    MaskUnlocked { kind: MaskKind },
    MaskPushed { from_row: usize, col: usize },
    MaskFell { col: usize, kind: MaskKind },
    HandFlushed { redrawn: usize, left: u8 },
    GenerationStalled { level: u32, attempts: u32 },
    LevelCleared { level: u32 },
    RunComplete { levels: u32 },
    GameOver { level: u32, defeated: u32 },
}

#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<Event>,
}

impl EventBus {
    pub fn push(&mut self, event: Event) {
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.queue.drain(..)
    }
}
