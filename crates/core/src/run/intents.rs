use super::*;
use crate::*;

impl RunState {
    pub fn select_card(&mut self, index: usize) -> Result<(), RunError> {
        self.ensure_idle()?;
        if index >= self.hand.len() {
            return Err(RunError::InvalidSelection);
        }
        // Selecting the held card again puts it back.
        self.selected = if self.selected == Some(index) {
            None
        } else {
            Some(index)
        };
        Ok(())
    }

    pub fn target_cell(
        &mut self,
        row: usize,
        col: usize,
        events: &mut EventBus,
    ) -> Result<(), RunError> {
        self.ensure_idle()?;
        let index = self.selected.ok_or(RunError::NoCardSelected)?;
        if !Board::in_bounds(row, col) {
            return Err(RunError::OutOfBounds);
        }
        let slot = self.board.slot(row, col).ok_or(RunError::EmptyCell)?;
        let played = *self.hand.get(index).ok_or(RunError::InvalidSelection)?;
        // The played card still counts as held while the rule is judged.
        let won = {
            let ctx = RuleContext {
                board: &self.board,
                hand: &self.hand,
                active_masks: self.board.active_masks(),
                level_failures: self.status.failures,
            };
            rules::wins(slot.mask, played, slot.card, (row, col), &ctx)
        };
        self.hand.remove(index);
        self.selected = None;
        self.deck.discard(played);
        if won {
            events.push(Event::BattleWon {
                kind: slot.mask,
                row,
                col,
                played,
            });
            self.effects.push_back(Effect::new(
                EffectKind::Capture { row, col, played },
                FollowUp::SpawnCheck,
            ));
        } else {
            self.status.failures += 1;
            events.push(Event::BattleLost {
                kind: slot.mask,
                row,
                col,
                played,
            });
            self.effects.push_back(Effect::new(
                EffectKind::Shake { row, col },
                FollowUp::LossPenalty {
                    row,
                    col,
                    trauma: slot.mask == MaskKind::Trauma,
                },
            ));
        }
        self.phase = TurnPhase::Resolving;
        Ok(())
    }

    // Drawing costs tempo: one mask steps down towards the danger row.
    pub fn draw_penalty(&mut self, events: &mut EventBus) -> Result<(), RunError> {
        self.ensure_idle()?;
        if self.hand.len() >= self.config.hand_capacity {
            return Err(RunError::HandFull);
        }
        let card = self.deck.draw_card().ok_or(RunError::DeckExhausted)?;
        self.hand.push(card);
        events.push(Event::CardDrawn { card });
        match self.pick_push_victim() {
            Some((row, col)) => {
                if row == DANGER_ROW {
                    if let Some(slot) = self.board.slot(row, col) {
                        self.effects.push_back(Effect::new(
                            EffectKind::Fall {
                                col,
                                kind: slot.mask,
                            },
                            FollowUp::None,
                        ));
                    }
                } else {
                    self.effects.push_back(Effect::new(
                        EffectKind::Slide {
                            moves: vec![CellMove { row, col }],
                        },
                        FollowUp::SpawnCheck,
                    ));
                }
                self.phase = TurnPhase::Resolving;
            }
            None => self.respawn_check(events),
        }
        Ok(())
    }

    pub fn trigger_flush(&mut self, events: &mut EventBus) -> Result<(), RunError> {
        self.ensure_idle()?;
        if self.status.flushes_left == 0 {
            return Err(RunError::NoFlushesLeft);
        }
        if self.hand.is_empty() {
            return Err(RunError::HandEmpty);
        }
        let count = self.hand.len();
        for card in self.hand.drain(..) {
            self.deck.discard(card);
        }
        self.selected = None;
        self.deck.reshuffle_discard(&mut self.rng);
        self.hand = self.deck.draw_cards(count);
        self.status.flushes_left -= 1;
        events.push(Event::HandFlushed {
            redrawn: self.hand.len(),
            left: self.status.flushes_left,
        });
        Ok(())
    }

    // Steps through whichever pause is on screen: tutorial lines first,
    // then the two-stage mask discovery.
    pub fn advance(&mut self, events: &mut EventBus) -> Result<(), RunError> {
        match self.phase {
            TurnPhase::Tutorial { step } => {
                if step + 1 < crate::tutorial_script().len() {
                    self.phase = TurnPhase::Tutorial { step: step + 1 };
                } else {
                    self.phase = TurnPhase::Idle;
                }
                Ok(())
            }
            TurnPhase::Discovery { kind, step } => match step {
                DiscoveryStep::Unveil => {
                    self.phase = TurnPhase::Discovery {
                        kind,
                        step: DiscoveryStep::RuleText,
                    };
                    Ok(())
                }
                DiscoveryStep::RuleText => {
                    self.unlocked.insert(kind);
                    events.push(Event::MaskUnlocked { kind });
                    self.phase = TurnPhase::Resolving;
                    self.commit_front_effect(events);
                    Ok(())
                }
            },
            _ => Err(RunError::NoPause),
        }
    }

    pub(super) fn ensure_idle(&self) -> Result<(), RunError> {
        if self.flow != FlowState::Playing {
            return Err(RunError::InvalidFlow(self.flow));
        }
        if self.phase != TurnPhase::Idle {
            return Err(RunError::TurnInFlight);
        }
        Ok(())
    }

    // Candidates either have room below or already sit on the danger row.
    // The hindmost candidate row (smallest index, furthest from danger) is
    // kept and ties between its columns break on the seeded rng.
    fn pick_push_victim(&mut self) -> Option<(usize, usize)> {
        let mut candidates: Vec<(usize, usize)> = self
            .board
            .occupied()
            .filter(|&(row, col, _)| {
                row == DANGER_ROW || self.board.slot(row + 1, col).is_none()
            })
            .map(|(row, col, _)| (row, col))
            .collect();
        let hindmost = candidates.iter().map(|&(row, _)| row).min()?;
        candidates.retain(|&(row, _)| row == hindmost);
        let idx = self.rng.pick_index(candidates.len())?;
        candidates.get(idx).copied()
    }
}
