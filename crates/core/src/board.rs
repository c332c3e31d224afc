use crate::{Card, MaskKind};
use serde::{Deserialize, Serialize};

pub const BOARD_ROWS: usize = 4;
pub const BOARD_COLS: usize = 4;
pub const SPAWN_ROW: usize = 0;
pub const DANGER_ROW: usize = BOARD_ROWS - 1;

// A mask and the card it guards always occupy a cell together.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct MaskSlot {
    pub card: Card,
    pub mask: MaskKind,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq)]
pub struct Board {
    cells: [[Option<MaskSlot>; BOARD_COLS]; BOARD_ROWS],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_bounds(row: usize, col: usize) -> bool {
        row < BOARD_ROWS && col < BOARD_COLS
    }

    pub fn slot(&self, row: usize, col: usize) -> Option<MaskSlot> {
        *self.cells.get(row)?.get(col)?
    }

    pub fn set(&mut self, row: usize, col: usize, slot: MaskSlot) {
        if let Some(cell) = self.cells.get_mut(row).and_then(|cells| cells.get_mut(col)) {
            *cell = Some(slot);
        }
    }

    pub fn take(&mut self, row: usize, col: usize) -> Option<MaskSlot> {
        self.cells
            .get_mut(row)
            .and_then(|cells| cells.get_mut(col))
            .and_then(|cell| cell.take())
    }

    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize, MaskSlot)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter_map(move |(col, cell)| cell.map(|slot| (row, col, slot)))
        })
    }

    pub fn cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.occupied().map(|(_, _, slot)| slot.card)
    }

    pub fn active_masks(&self) -> usize {
        self.occupied().count()
    }

    pub fn is_empty(&self) -> bool {
        self.active_masks() == 0
    }

    pub fn empty_spawn_cols(&self) -> Vec<usize> {
        (0..BOARD_COLS)
            .filter(|&col| self.slot(SPAWN_ROW, col).is_none())
            .collect()
    }

    pub fn danger_row_occupied(&self) -> Option<(usize, MaskSlot)> {
        (0..BOARD_COLS).find_map(|col| self.slot(DANGER_ROW, col).map(|slot| (col, slot)))
    }
}
