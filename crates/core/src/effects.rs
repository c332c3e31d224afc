use crate::{Card, MaskKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CellMove {
    pub row: usize,
    pub col: usize,
}

// Everything the board can visibly do, as plain data. The renderer reads the
// front effect and its progress; the engine commits the mutation when the
// progress completes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum EffectKind {
    Capture {
        row: usize,
        col: usize,
        played: Card,
    },
    Shake {
        row: usize,
        col: usize,
    },
    // Each listed cell moves down one row, committed bottom to top.
    Slide {
        moves: Vec<CellMove>,
    },
    // A mask dropping past the danger row. Committing it ends the run.
    Fall {
        col: usize,
        kind: MaskKind,
    },
    Cleared {
        level: u32,
    },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FollowUp {
    None,
    LossPenalty { row: usize, col: usize, trauma: bool },
    SpawnCheck,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Effect {
    pub kind: EffectKind,
    pub progress: f32,
    pub after: FollowUp,
}

impl Effect {
    pub fn new(kind: EffectKind, after: FollowUp) -> Self {
        Self {
            kind,
            progress: 0.0,
            after,
        }
    }
}
