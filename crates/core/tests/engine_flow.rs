use baraja_core::{
    Card, DiscoveryStep, EffectKind, Event, EventBus, FlowState, GameConfig, LevelStatus, MaskKind,
    MaskSlot, RunError, RunState, Suit, TurnPhase,
};
use Suit::{Bastos, Copas, Oros};

// A run frozen mid-level: board and hand placed by hand, budget already
// fully spawned so the respawn roll stays quiet unless a test raises it.
fn staged(hand: Vec<Card>, slots: &[(usize, usize, MaskKind, Card)]) -> RunState {
    let mut run = RunState::new(GameConfig::classic(), 5);
    run.flow = FlowState::Playing;
    run.status = LevelStatus::fresh(0, slots.len() as u32, 2);
    run.status.masks_spawned = slots.len() as u32;
    for &(row, col, kind, card) in slots {
        run.board.set(row, col, MaskSlot { card, mask: kind });
        run.unlocked.insert(kind);
    }
    run.hand = hand;
    run
}

fn settle(run: &mut RunState, events: &mut EventBus) {
    for _ in 0..200 {
        if run.phase != TurnPhase::Resolving {
            break;
        }
        run.tick(events);
    }
}

#[test]
fn opening_flow_walks_intro_menu_tutorial() {
    let mut run = RunState::new(GameConfig::classic(), 11);
    let mut events = EventBus::default();
    assert_eq!(run.flow, FlowState::Intro);
    assert!(matches!(run.select_card(0), Err(RunError::InvalidFlow(_))));
    run.advance_intro().unwrap();
    assert_eq!(run.flow, FlowState::Menu);
    assert!(run.advance_intro().is_err());
    assert!(matches!(
        run.draw_penalty(&mut events),
        Err(RunError::InvalidFlow(_))
    ));
    run.start_run(&mut events).unwrap();
    assert_eq!(run.flow, FlowState::Playing);
    assert_eq!(run.phase, TurnPhase::Tutorial { step: 0 });
    assert!(run.tutorial_line().is_some());
    assert!(matches!(run.select_card(0), Err(RunError::TurnInFlight)));
    for _ in 0..6 {
        run.advance(&mut events).unwrap();
    }
    assert_eq!(run.phase, TurnPhase::Idle);
    assert!(matches!(run.advance(&mut events), Err(RunError::NoPause)));
    let log: Vec<Event> = events.drain().collect();
    assert!(log.contains(&Event::RunStarted { seed: 11 }));
    assert!(log
        .iter()
        .any(|event| matches!(event, Event::LevelStarted { level: 0, .. })));
}

#[test]
fn winning_battle_captures_mask_and_prize() {
    let played = Card::from_parts(Copas, 3);
    let prize = Card::from_parts(Bastos, 3);
    let mut run = staged(
        vec![played],
        &[
            (1, 1, MaskKind::Ira, prize),
            (0, 0, MaskKind::Felicidad, Card::from_parts(Oros, 5)),
        ],
    );
    let mut events = EventBus::default();
    run.select_card(0).unwrap();
    run.target_cell(1, 1, &mut events).unwrap();
    assert!(run.is_busy());
    assert!(matches!(run.select_card(0), Err(RunError::TurnInFlight)));
    assert!(matches!(
        run.trigger_flush(&mut events),
        Err(RunError::TurnInFlight)
    ));
    assert!(matches!(
        run.draw_penalty(&mut events),
        Err(RunError::TurnInFlight)
    ));
    assert_eq!(run.status.flushes_left, 2);
    assert!(matches!(
        run.current_effect().map(|effect| &effect.kind),
        Some(EffectKind::Capture { .. })
    ));
    settle(&mut run, &mut events);
    assert_eq!(run.phase, TurnPhase::Idle);
    assert!(run.board.slot(1, 1).is_none());
    assert_eq!(run.hand, vec![prize]);
    assert_eq!(run.status.masks_defeated, 1);
    assert_eq!(run.flow, FlowState::Playing);
    let log: Vec<Event> = events.drain().collect();
    assert!(log.contains(&Event::BattleWon {
        kind: MaskKind::Ira,
        row: 1,
        col: 1,
        played,
    }));
    assert!(log.contains(&Event::MaskCaptured {
        kind: MaskKind::Ira,
        prize,
    }));
}

#[test]
fn losing_battle_pushes_the_column() {
    let played = Card::from_parts(Oros, 2);
    let mut run = staged(
        vec![played],
        &[
            (1, 1, MaskKind::Felicidad, Card::from_parts(Copas, 9)),
            (2, 1, MaskKind::Ira, Card::from_parts(Bastos, 4)),
        ],
    );
    let mut events = EventBus::default();
    run.select_card(0).unwrap();
    run.target_cell(1, 1, &mut events).unwrap();
    assert!(matches!(
        run.current_effect().map(|effect| &effect.kind),
        Some(EffectKind::Shake { .. })
    ));
    run.tick(&mut events);
    run.tick(&mut events);
    assert!(run.shake_offset(1, 1) > 0.0);
    assert_eq!(run.shake_offset(0, 0), 0.0);
    settle(&mut run, &mut events);
    assert_eq!(run.status.failures, 1);
    assert_eq!(run.phase, TurnPhase::Idle);
    assert!(run.board.slot(1, 1).is_none());
    assert_eq!(
        run.board.slot(2, 1).map(|slot| slot.mask),
        Some(MaskKind::Felicidad)
    );
    assert_eq!(run.board.slot(3, 1).map(|slot| slot.mask), Some(MaskKind::Ira));
    assert!(run.deck.discard.contains(&played));
    let log: Vec<Event> = events.drain().collect();
    let pushes = log
        .iter()
        .filter(|event| matches!(event, Event::MaskPushed { .. }))
        .count();
    assert_eq!(pushes, 2);
}

#[test]
fn losing_on_the_danger_row_ends_the_run() {
    let played = Card::from_parts(Oros, 2);
    let mut run = staged(
        vec![played],
        &[(3, 2, MaskKind::Felicidad, Card::from_parts(Copas, 9))],
    );
    let mut events = EventBus::default();
    run.select_card(0).unwrap();
    run.target_cell(3, 2, &mut events).unwrap();
    settle(&mut run, &mut events);
    assert_eq!(run.flow, FlowState::GameOver);
    assert_eq!(run.phase, TurnPhase::Idle);
    assert!(run.board.is_empty());
    let log: Vec<Event> = events.drain().collect();
    assert!(log
        .iter()
        .any(|event| matches!(event, Event::MaskFell { col: 2, .. })));
    assert!(log
        .iter()
        .any(|event| matches!(event, Event::GameOver { .. })));
    assert!(matches!(run.select_card(0), Err(RunError::InvalidFlow(_))));
    run.to_menu().unwrap();
    assert_eq!(run.flow, FlowState::Menu);
    run.start_run(&mut events).unwrap();
    assert_eq!(run.flow, FlowState::Playing);
    assert_eq!(run.status.level, 0);
}

#[test]
fn trauma_loss_shoves_every_mask() {
    let played = Card::from_parts(Oros, 1);
    let mut run = staged(
        vec![played],
        &[
            (0, 0, MaskKind::Trauma, Card::from_parts(Copas, 5)),
            (1, 2, MaskKind::Ira, Card::from_parts(Bastos, 7)),
        ],
    );
    let mut events = EventBus::default();
    run.select_card(0).unwrap();
    run.target_cell(0, 0, &mut events).unwrap();
    settle(&mut run, &mut events);
    assert_eq!(run.flow, FlowState::Playing);
    assert!(run.board.slot(0, 0).is_none());
    assert!(run.board.slot(1, 2).is_none());
    assert_eq!(
        run.board.slot(1, 0).map(|slot| slot.mask),
        Some(MaskKind::Trauma)
    );
    assert_eq!(run.board.slot(2, 2).map(|slot| slot.mask), Some(MaskKind::Ira));
}

#[test]
fn trauma_loss_with_mask_at_the_brink_ends_the_run() {
    let played = Card::from_parts(Oros, 1);
    let mut run = staged(
        vec![played],
        &[
            (1, 1, MaskKind::Trauma, Card::from_parts(Copas, 5)),
            (3, 0, MaskKind::Ira, Card::from_parts(Bastos, 7)),
        ],
    );
    let mut events = EventBus::default();
    run.select_card(0).unwrap();
    run.target_cell(1, 1, &mut events).unwrap();
    settle(&mut run, &mut events);
    assert_eq!(run.flow, FlowState::GameOver);
    let log: Vec<Event> = events.drain().collect();
    assert!(log
        .iter()
        .any(|event| matches!(event, Event::MaskFell { col: 0, .. })));
}

#[test]
fn draw_penalty_marches_a_lone_mask_to_the_brink() {
    let mut run = staged(
        Vec::new(),
        &[(1, 1, MaskKind::Ira, Card::from_parts(Copas, 5))],
    );
    let mut events = EventBus::default();
    run.draw_penalty(&mut events).unwrap();
    settle(&mut run, &mut events);
    assert_eq!(run.hand.len(), 1);
    assert_eq!(run.board.slot(2, 1).map(|slot| slot.mask), Some(MaskKind::Ira));
    run.draw_penalty(&mut events).unwrap();
    settle(&mut run, &mut events);
    assert_eq!(run.board.slot(3, 1).map(|slot| slot.mask), Some(MaskKind::Ira));
    run.draw_penalty(&mut events).unwrap();
    settle(&mut run, &mut events);
    assert_eq!(run.flow, FlowState::GameOver);
    assert_eq!(run.hand.len(), 3);
    let drawn = events
        .drain()
        .filter(|event| matches!(event, Event::CardDrawn { .. }))
        .count();
    assert_eq!(drawn, 3);
}

#[test]
fn draw_penalty_picks_the_rearmost_free_mask() {
    let mut run = staged(
        Vec::new(),
        &[
            (0, 0, MaskKind::Ira, Card::from_parts(Copas, 5)),
            (2, 2, MaskKind::Felicidad, Card::from_parts(Bastos, 4)),
            (3, 1, MaskKind::Conspirador, Card::from_parts(Oros, 7)),
        ],
    );
    let mut events = EventBus::default();
    run.draw_penalty(&mut events).unwrap();
    settle(&mut run, &mut events);
    // Row 0 is the rearmost candidate; the deeper masks stay put and the
    // danger-row mask never falls while someone behind can still move.
    assert_eq!(run.flow, FlowState::Playing);
    assert!(run.board.slot(0, 0).is_none());
    assert_eq!(run.board.slot(1, 0).map(|slot| slot.mask), Some(MaskKind::Ira));
    assert_eq!(
        run.board.slot(2, 2).map(|slot| slot.mask),
        Some(MaskKind::Felicidad)
    );
    assert_eq!(
        run.board.slot(3, 1).map(|slot| slot.mask),
        Some(MaskKind::Conspirador)
    );
}

#[test]
fn draw_penalty_skips_masks_with_no_room_below() {
    let mut run = staged(
        Vec::new(),
        &[
            (0, 1, MaskKind::Ira, Card::from_parts(Copas, 5)),
            (1, 1, MaskKind::Felicidad, Card::from_parts(Bastos, 4)),
        ],
    );
    let mut events = EventBus::default();
    run.draw_penalty(&mut events).unwrap();
    settle(&mut run, &mut events);
    // The stacked top mask cannot move; the bottom of the stack steps down.
    assert_eq!(run.board.slot(0, 1).map(|slot| slot.mask), Some(MaskKind::Ira));
    assert!(run.board.slot(1, 1).is_none());
    assert_eq!(
        run.board.slot(2, 1).map(|slot| slot.mask),
        Some(MaskKind::Felicidad)
    );
}

#[test]
fn draw_penalty_with_everyone_at_the_brink_ends_the_run() {
    let mut run = staged(
        Vec::new(),
        &[
            (3, 0, MaskKind::Ira, Card::from_parts(Copas, 5)),
            (3, 2, MaskKind::Felicidad, Card::from_parts(Bastos, 4)),
        ],
    );
    let mut events = EventBus::default();
    run.draw_penalty(&mut events).unwrap();
    settle(&mut run, &mut events);
    assert_eq!(run.flow, FlowState::GameOver);
    let log: Vec<Event> = events.drain().collect();
    assert!(log.iter().any(|event| matches!(event, Event::MaskFell { .. })));
}

#[test]
fn draw_penalty_with_empty_board_spawns_instead() {
    let mut run = staged(Vec::new(), &[]);
    run.status.budget = 4;
    let mut events = EventBus::default();
    run.draw_penalty(&mut events).unwrap();
    assert_eq!(run.phase, TurnPhase::Idle);
    assert!(run.board.active_masks() >= 1, "forced refill never ran");
    assert_eq!(run.hand.len(), 1);
}

#[test]
fn full_hand_blocks_the_penalty_draw() {
    let hand: Vec<Card> = (1..=5).map(|value| Card::from_parts(Oros, value)).collect();
    let mut run = staged(hand, &[(1, 1, MaskKind::Ira, Card::from_parts(Copas, 5))]);
    let mut events = EventBus::default();
    assert!(matches!(
        run.draw_penalty(&mut events),
        Err(RunError::HandFull)
    ));
}

#[test]
fn flush_redraws_and_burns_a_charge() {
    let hand = vec![
        Card::from_parts(Oros, 1),
        Card::from_parts(Copas, 2),
        Card::from_parts(Bastos, 3),
    ];
    let mut run = staged(hand, &[(1, 1, MaskKind::Ira, Card::from_parts(Copas, 5))]);
    let mut events = EventBus::default();
    run.select_card(0).unwrap();
    run.trigger_flush(&mut events).unwrap();
    assert_eq!(run.hand.len(), 3);
    assert_eq!(run.selected, None);
    assert_eq!(run.status.flushes_left, 1);
    run.trigger_flush(&mut events).unwrap();
    assert_eq!(run.status.flushes_left, 0);
    assert!(matches!(
        run.trigger_flush(&mut events),
        Err(RunError::NoFlushesLeft)
    ));
    let log: Vec<Event> = events.drain().collect();
    assert!(log.contains(&Event::HandFlushed { redrawn: 3, left: 1 }));
    assert!(log.contains(&Event::HandFlushed { redrawn: 3, left: 0 }));
}

#[test]
fn flush_needs_cards_in_hand() {
    let mut run = staged(Vec::new(), &[(1, 1, MaskKind::Ira, Card::from_parts(Copas, 5))]);
    let mut events = EventBus::default();
    assert!(matches!(
        run.trigger_flush(&mut events),
        Err(RunError::HandEmpty)
    ));
}

#[test]
fn selection_toggles_and_validates_targets() {
    let mut run = staged(
        vec![Card::from_parts(Oros, 1), Card::from_parts(Copas, 2)],
        &[(1, 1, MaskKind::Ira, Card::from_parts(Bastos, 5))],
    );
    let mut events = EventBus::default();
    assert!(matches!(
        run.target_cell(1, 1, &mut events),
        Err(RunError::NoCardSelected)
    ));
    run.select_card(0).unwrap();
    assert_eq!(run.selected, Some(0));
    run.select_card(0).unwrap();
    assert_eq!(run.selected, None);
    run.select_card(1).unwrap();
    assert_eq!(run.selected, Some(1));
    assert!(matches!(run.select_card(9), Err(RunError::InvalidSelection)));
    assert!(matches!(
        run.target_cell(9, 9, &mut events),
        Err(RunError::OutOfBounds)
    ));
    assert!(matches!(
        run.target_cell(0, 0, &mut events),
        Err(RunError::EmptyCell)
    ));
    assert_eq!(run.selected, Some(1));
}

#[test]
fn clearing_the_board_within_budget_wins_the_level() {
    let played = Card::from_parts(Copas, 3);
    let mut run = staged(
        vec![played],
        &[(1, 1, MaskKind::Ira, Card::from_parts(Bastos, 3))],
    );
    let mut events = EventBus::default();
    run.select_card(0).unwrap();
    run.target_cell(1, 1, &mut events).unwrap();
    settle(&mut run, &mut events);
    assert_eq!(run.flow, FlowState::Victory);
    let log: Vec<Event> = events.drain().collect();
    assert!(log.contains(&Event::LevelCleared { level: 0 }));
    run.next_level(&mut events).unwrap();
    assert_eq!(run.flow, FlowState::Playing);
    assert_eq!(run.phase, TurnPhase::Idle);
    assert_eq!(run.status.level, 1);
    assert_eq!(run.status.budget, 15);
    assert_eq!(run.hand.len(), 3);
    assert!(run.board.active_masks() > 0);
}

#[test]
fn unspent_budget_blocks_victory() {
    let played = Card::from_parts(Copas, 3);
    let mut run = staged(
        vec![played],
        &[(1, 1, MaskKind::Ira, Card::from_parts(Bastos, 3))],
    );
    run.status.budget = 2;
    let mut events = EventBus::default();
    run.select_card(0).unwrap();
    run.target_cell(1, 1, &mut events).unwrap();
    settle(&mut run, &mut events);
    assert_eq!(run.flow, FlowState::Playing);
    assert_eq!(run.board.active_masks(), 1, "forced refill should restock");
    assert_eq!(run.status.masks_spawned, 2);
}

#[test]
fn final_level_win_completes_the_game() {
    let played = Card::from_parts(Copas, 3);
    let mut run = staged(
        vec![played],
        &[(1, 1, MaskKind::Ira, Card::from_parts(Bastos, 3))],
    );
    run.status.level = 3;
    let mut events = EventBus::default();
    run.select_card(0).unwrap();
    run.target_cell(1, 1, &mut events).unwrap();
    settle(&mut run, &mut events);
    assert_eq!(run.flow, FlowState::GameComplete);
    let log: Vec<Event> = events.drain().collect();
    assert!(log.contains(&Event::RunComplete { levels: 4 }));
    run.start_run(&mut events).unwrap();
    assert_eq!(run.flow, FlowState::Playing);
    assert_eq!(run.status.level, 0);
}

#[test]
fn discovery_pauses_once_per_kind() {
    let played = Card::from_parts(Copas, 3);
    let second = Card::from_parts(Bastos, 3);
    let mut run = staged(
        vec![played],
        &[
            (1, 1, MaskKind::Ira, second),
            (0, 0, MaskKind::Felicidad, Card::from_parts(Oros, 2)),
        ],
    );
    run.unlocked.remove(&MaskKind::Ira);
    let mut events = EventBus::default();
    run.select_card(0).unwrap();
    run.target_cell(1, 1, &mut events).unwrap();
    settle(&mut run, &mut events);
    assert_eq!(
        run.phase,
        TurnPhase::Discovery {
            kind: MaskKind::Ira,
            step: DiscoveryStep::Unveil,
        }
    );
    // Frozen: the mask is still on the board and the prize not yet paid.
    assert!(run.board.slot(1, 1).is_some());
    assert!(run.hand.is_empty());
    run.tick(&mut events);
    assert!(run.board.slot(1, 1).is_some());
    assert!(matches!(run.select_card(0), Err(RunError::TurnInFlight)));
    run.advance(&mut events).unwrap();
    assert_eq!(
        run.phase,
        TurnPhase::Discovery {
            kind: MaskKind::Ira,
            step: DiscoveryStep::RuleText,
        }
    );
    run.advance(&mut events).unwrap();
    assert!(run.is_unlocked(MaskKind::Ira));
    assert_eq!(run.rule_tooltip(MaskKind::Ira), Some(MaskKind::Ira.rule_text()));
    assert!(run.board.slot(1, 1).is_none());
    assert_eq!(run.hand, vec![second]);
    assert_eq!(run.phase, TurnPhase::Idle);
    let log: Vec<Event> = events.drain().collect();
    assert!(log.contains(&Event::MaskUnlocked { kind: MaskKind::Ira }));
    // A known kind captures without pausing.
    run.select_card(0).unwrap();
    run.target_cell(0, 0, &mut events).unwrap();
    settle(&mut run, &mut events);
    assert_eq!(run.phase, TurnPhase::Idle);
    assert!(run.board.slot(0, 0).is_none());
}

#[test]
fn locked_masks_keep_their_rule_hidden() {
    let run = staged(Vec::new(), &[]);
    assert_eq!(run.rule_tooltip(MaskKind::Sorpresa), None);
}
