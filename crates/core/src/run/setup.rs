use super::*;
use crate::*;

impl RunState {
    pub fn advance_intro(&mut self) -> Result<(), RunError> {
        if self.flow != FlowState::Intro {
            return Err(RunError::InvalidFlow(self.flow));
        }
        self.flow = FlowState::Menu;
        Ok(())
    }

    pub fn start_run(&mut self, events: &mut EventBus) -> Result<(), RunError> {
        match self.flow {
            FlowState::Menu | FlowState::GameOver | FlowState::GameComplete => {}
            other => return Err(RunError::InvalidFlow(other)),
        }
        events.push(Event::RunStarted {
            seed: self.rng.seed(),
        });
        self.start_level(0, events)
    }

    pub fn next_level(&mut self, events: &mut EventBus) -> Result<(), RunError> {
        if self.flow != FlowState::Victory {
            return Err(RunError::InvalidFlow(self.flow));
        }
        self.start_level(self.status.level + 1, events)
    }

    pub fn to_menu(&mut self) -> Result<(), RunError> {
        match self.flow {
            FlowState::GameOver | FlowState::Victory | FlowState::GameComplete => {
                self.flow = FlowState::Menu;
                Ok(())
            }
            other => Err(RunError::InvalidFlow(other)),
        }
    }

    // Deck, board, hand and counters are rebuilt from scratch every level.
    // Only the unlocked-mask codex carries over.
    pub(super) fn start_level(&mut self, level: u32, events: &mut EventBus) -> Result<(), RunError> {
        let rule = self
            .config
            .level_rule(level)
            .ok_or(RunError::MissingLevelRule(level))?
            .clone();
        self.status = LevelStatus::fresh(level, rule.budget, rule.flushes);
        self.board = Board::new();
        self.selected = None;
        self.effects.clear();
        self.deck.reset(&mut self.rng);
        self.hand = self.deck.draw_cards(self.config.starting_hand);
        events.push(Event::LevelStarted {
            level,
            budget: rule.budget,
            pool: rule.pool.len(),
        });
        self.fill_spawn_row(&rule, events);
        self.flow = FlowState::Playing;
        self.phase = if rule.scripted_row {
            TurnPhase::Tutorial { step: 0 }
        } else {
            TurnPhase::Idle
        };
        Ok(())
    }

    // Batch fill of the spawn row: draw one card per column, sort them
    // ascending, pair each with a kind from the pool. Any invalid pairing
    // rejects the whole batch and the cards go back under the pile.
    pub(super) fn fill_spawn_row(&mut self, rule: &LevelRule, events: &mut EventBus) {
        if rule.pool.is_empty() {
            return;
        }
        let want = BOARD_COLS.min(self.status.budget_left() as usize);
        if want == 0 {
            return;
        }
        let mut attempts = 0u32;
        loop {
            let mut cards = self.deck.draw_cards(want);
            cards.sort_by_key(|card| card.value());
            match self.pick_row_kinds(rule, &cards) {
                Some(kinds) => {
                    for (col, (card, kind)) in cards.into_iter().zip(kinds).enumerate() {
                        self.place_mask(col, card, kind, events);
                    }
                    return;
                }
                None => {
                    self.deck.return_to_front(cards);
                    attempts += 1;
                    if attempts >= self.config.setup_retry_limit {
                        events.push(Event::GenerationStalled {
                            level: rule.level,
                            attempts,
                        });
                        self.fill_spawn_row_fallback(rule, want, events);
                        return;
                    }
                }
            }
        }
    }

    // One spawn-row cell, used by the respawn check. Same reject-and-retry
    // loop as the batch fill, one card at a time.
    pub(super) fn spawn_mask_at(
        &mut self,
        col: usize,
        rule: &LevelRule,
        events: &mut EventBus,
    ) -> bool {
        if rule.pool.is_empty() || self.status.budget_left() == 0 {
            return false;
        }
        let mut attempts = 0u32;
        loop {
            let Some(card) = self.deck.draw_card() else {
                return false;
            };
            let kind = match self.rng.pick_index(rule.pool.len()) {
                Some(idx) => rule.pool[idx],
                None => return false,
            };
            if is_valid_setup(kind, card) {
                self.place_mask(col, card, kind, events);
                return true;
            }
            self.deck.return_to_front(vec![card]);
            attempts += 1;
            if attempts >= self.config.setup_retry_limit {
                events.push(Event::GenerationStalled {
                    level: rule.level,
                    attempts,
                });
                let Some(card) = self.deck.draw_card() else {
                    return false;
                };
                if let Some(kind) = first_valid_kind(&rule.pool, card) {
                    self.place_mask(col, card, kind, events);
                    return true;
                }
                self.deck.return_to_front(vec![card]);
                return false;
            }
        }
    }

    // Runs after captures, pushes and penalty draws. Each empty spawn cell
    // gets an independent chance while budget remains; if the board went
    // completely quiet with budget left, a forced pass keeps the level
    // moving.
    pub(super) fn respawn_check(&mut self, events: &mut EventBus) {
        let Some(rule) = self.config.level_rule(self.status.level) else {
            return;
        };
        let rule = rule.clone();
        if rule.pool.is_empty() {
            return;
        }
        let mut spawned_any = false;
        for col in self.board.empty_spawn_cols() {
            if self.status.budget_left() == 0 {
                break;
            }
            if self.rng.one_in(self.config.spawn_one_in) && self.spawn_mask_at(col, &rule, events)
            {
                spawned_any = true;
            }
        }
        if !spawned_any && self.board.is_empty() && self.status.budget_left() > 0 {
            for col in self.board.empty_spawn_cols() {
                if self.status.budget_left() == 0 {
                    break;
                }
                self.spawn_mask_at(col, &rule, events);
            }
        }
    }

    fn pick_row_kinds(&mut self, rule: &LevelRule, cards: &[Card]) -> Option<Vec<MaskKind>> {
        let mut kinds = Vec::with_capacity(cards.len());
        for (slot, card) in cards.iter().enumerate() {
            let kind = if rule.scripted_row {
                rule.pool[slot % rule.pool.len()]
            } else {
                let idx = self.rng.pick_index(rule.pool.len())?;
                rule.pool[idx]
            };
            if !is_valid_setup(kind, *card) {
                return None;
            }
            kinds.push(kind);
        }
        Some(kinds)
    }

    fn fill_spawn_row_fallback(&mut self, rule: &LevelRule, want: usize, events: &mut EventBus) {
        let mut cards = self.deck.draw_cards(want);
        cards.sort_by_key(|card| card.value());
        let mut col = 0;
        for card in cards {
            match first_valid_kind(&rule.pool, card) {
                Some(kind) => {
                    self.place_mask(col, card, kind, events);
                    col += 1;
                }
                None => self.deck.return_to_front(vec![card]),
            }
        }
    }

    fn place_mask(&mut self, col: usize, card: Card, kind: MaskKind, events: &mut EventBus) {
        self.board.set(SPAWN_ROW, col, MaskSlot { card, mask: kind });
        self.status.masks_spawned += 1;
        events.push(Event::MaskSpawned {
            row: SPAWN_ROW,
            col,
            kind,
        });
    }
}

fn first_valid_kind(pool: &[MaskKind], card: Card) -> Option<MaskKind> {
    pool.iter().copied().find(|&kind| is_valid_setup(kind, card))
}
