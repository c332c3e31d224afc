use crate::{
    Board, Card, Deck, Effect, EffectKind, FlowState, GameConfig, LevelStatus, MaskKind, RngState,
    TurnPhase,
};
use std::collections::{BTreeSet, VecDeque};
use thiserror::Error;

mod intents;
mod resolve;
mod setup;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("missing config for level {0}")]
    MissingLevelRule(u32),
    #[error("invalid flow state: {0:?}")]
    InvalidFlow(FlowState),
    #[error("turn already in flight")]
    TurnInFlight,
    #[error("no pause to advance")]
    NoPause,
    #[error("invalid hand index")]
    InvalidSelection,
    #[error("no card selected")]
    NoCardSelected,
    #[error("cell out of bounds")]
    OutOfBounds,
    #[error("no mask at cell")]
    EmptyCell,
    #[error("hand is full")]
    HandFull,
    #[error("hand is empty")]
    HandEmpty,
    #[error("draw pile is empty")]
    DeckExhausted,
    #[error("no flushes left")]
    NoFlushesLeft,
}

#[derive(Debug)]
pub struct RunState {
    pub config: GameConfig,
    pub rng: RngState,
    pub deck: Deck,
    pub board: Board,
    pub hand: Vec<Card>,
    pub selected: Option<usize>,
    pub status: LevelStatus,
    pub flow: FlowState,
    pub phase: TurnPhase,
    pub unlocked: BTreeSet<MaskKind>,
    pub(crate) effects: VecDeque<Effect>,
}

impl RunState {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            rng: RngState::from_seed(seed),
            deck: Deck::spanish40(),
            board: Board::new(),
            hand: Vec::new(),
            selected: None,
            status: LevelStatus::fresh(0, 0, 0),
            flow: FlowState::Intro,
            phase: TurnPhase::Idle,
            unlocked: BTreeSet::new(),
            effects: VecDeque::new(),
        }
    }

    pub fn is_busy(&self) -> bool {
        !matches!(self.phase, TurnPhase::Idle)
    }

    pub fn current_effect(&self) -> Option<&Effect> {
        self.effects.front()
    }

    pub fn is_unlocked(&self, kind: MaskKind) -> bool {
        self.unlocked.contains(&kind)
    }

    // Tooltip payload for a mask on the board. Locked kinds keep their rule
    // hidden.
    pub fn rule_tooltip(&self, kind: MaskKind) -> Option<&'static str> {
        if self.is_unlocked(kind) {
            Some(kind.rule_text())
        } else {
            None
        }
    }

    pub fn victory_reached(&self) -> bool {
        self.board.is_empty() && self.status.masks_spawned >= self.status.budget
    }

    pub fn tutorial_line(&self) -> Option<&'static str> {
        match self.phase {
            TurnPhase::Tutorial { step } => crate::tutorial_script().get(step).copied(),
            _ => None,
        }
    }

    // Horizontal displacement of a mid-shake cell, 0.0..=1.0, peaking halfway.
    pub fn shake_offset(&self, row: usize, col: usize) -> f32 {
        match self.effects.front() {
            Some(Effect {
                kind: EffectKind::Shake { row: r, col: c },
                progress,
                ..
            }) if *r == row && *c == col => {
                if *progress < 0.5 {
                    *progress * 2.0
                } else {
                    (1.0 - *progress) * 2.0
                }
            }
            _ => 0.0,
        }
    }
}
