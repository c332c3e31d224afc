use super::*;
use crate::*;

impl RunState {
    // Drives the one effect at the front of the queue. Called once per UI
    // frame; everything behind the front waits its turn.
    pub fn tick(&mut self, events: &mut EventBus) {
        if self.flow != FlowState::Playing || self.phase != TurnPhase::Resolving {
            return;
        }
        let Some(effect) = self.effects.front_mut() else {
            self.phase = TurnPhase::Idle;
            return;
        };
        effect.progress += self.config.effect_step;
        if effect.progress < 1.0 {
            return;
        }
        // A finished capture of a never-seen kind pauses for the reveal.
        // The effect stays queued and commits when the pause closes.
        if let EffectKind::Capture { row, col, .. } = effect.kind {
            if let Some(slot) = self.board.slot(row, col) {
                if !self.unlocked.contains(&slot.mask) {
                    self.phase = TurnPhase::Discovery {
                        kind: slot.mask,
                        step: DiscoveryStep::Unveil,
                    };
                    return;
                }
            }
        }
        self.commit_front_effect(events);
    }

    // Applies the front effect to the board in one shot, then runs whatever
    // it scheduled to happen next.
    pub(super) fn commit_front_effect(&mut self, events: &mut EventBus) {
        let Some(effect) = self.effects.pop_front() else {
            if self.flow == FlowState::Playing {
                self.phase = TurnPhase::Idle;
            }
            return;
        };
        match effect.kind {
            EffectKind::Capture { row, col, .. } => {
                if let Some(slot) = self.board.take(row, col) {
                    self.status.masks_defeated += 1;
                    if self.hand.len() < self.config.hand_capacity {
                        self.hand.push(slot.card);
                    } else {
                        self.deck.discard(slot.card);
                    }
                    events.push(Event::MaskCaptured {
                        kind: slot.mask,
                        prize: slot.card,
                    });
                }
            }
            EffectKind::Shake { .. } => {}
            EffectKind::Slide { mut moves } => {
                moves.sort_by(|a, b| b.row.cmp(&a.row));
                for mv in moves {
                    if let Some(slot) = self.board.take(mv.row, mv.col) {
                        self.board.set(mv.row + 1, mv.col, slot);
                        events.push(Event::MaskPushed {
                            from_row: mv.row,
                            col: mv.col,
                        });
                    }
                }
            }
            EffectKind::Fall { col, kind } => {
                if let Some(slot) = self.board.take(DANGER_ROW, col) {
                    self.deck.discard(slot.card);
                }
                events.push(Event::MaskFell { col, kind });
                self.game_over(events);
                return;
            }
            EffectKind::Cleared { level } => {
                self.level_won(level, events);
                return;
            }
        }
        match effect.after {
            FollowUp::None => {}
            FollowUp::LossPenalty { row, col, trauma } => {
                self.queue_loss_penalty(row, col, trauma);
            }
            FollowUp::SpawnCheck => {
                self.respawn_check(events);
                if self.victory_reached() {
                    self.effects.push_back(Effect::new(
                        EffectKind::Cleared {
                            level: self.status.level,
                        },
                        FollowUp::None,
                    ));
                }
            }
        }
        if self.effects.is_empty() && self.flow == FlowState::Playing {
            self.phase = TurnPhase::Idle;
        }
    }

    // The board's answer to a lost battle. Trauma punishes everyone; any
    // other mask marches its own column down.
    fn queue_loss_penalty(&mut self, row: usize, col: usize, trauma: bool) {
        if trauma {
            if let Some((col, slot)) = self.board.danger_row_occupied() {
                self.effects.push_back(Effect::new(
                    EffectKind::Fall {
                        col,
                        kind: slot.mask,
                    },
                    FollowUp::None,
                ));
            } else {
                let moves: Vec<CellMove> = self
                    .board
                    .occupied()
                    .map(|(row, col, _)| CellMove { row, col })
                    .collect();
                if !moves.is_empty() {
                    self.effects
                        .push_back(Effect::new(EffectKind::Slide { moves }, FollowUp::SpawnCheck));
                }
            }
            return;
        }
        match self.board.slot(DANGER_ROW, col) {
            Some(slot) => {
                self.effects.push_back(Effect::new(
                    EffectKind::Fall {
                        col,
                        kind: slot.mask,
                    },
                    FollowUp::None,
                ));
            }
            None => {
                let moves: Vec<CellMove> = (row..DANGER_ROW)
                    .filter(|&r| self.board.slot(r, col).is_some())
                    .map(|r| CellMove { row: r, col })
                    .collect();
                if !moves.is_empty() {
                    self.effects
                        .push_back(Effect::new(EffectKind::Slide { moves }, FollowUp::SpawnCheck));
                }
            }
        }
    }

    pub(super) fn game_over(&mut self, events: &mut EventBus) {
        self.flow = FlowState::GameOver;
        self.phase = TurnPhase::Idle;
        self.effects.clear();
        self.selected = None;
        events.push(Event::GameOver {
            level: self.status.level,
            defeated: self.status.masks_defeated,
        });
    }

    fn level_won(&mut self, level: u32, events: &mut EventBus) {
        self.phase = TurnPhase::Idle;
        self.effects.clear();
        self.selected = None;
        events.push(Event::LevelCleared { level });
        if level >= self.config.final_level().unwrap_or(level) {
            self.flow = FlowState::GameComplete;
            events.push(Event::RunComplete { levels: level + 1 });
        } else {
            self.flow = FlowState::Victory;
        }
    }
}
