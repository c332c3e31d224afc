use baraja_core::{
    Card, Event, EventBus, FlowState, GameConfig, MaskKind, RunError, RunState, Suit, TurnPhase,
    BOARD_COLS, BOARD_ROWS,
};
use std::collections::{BTreeSet, VecDeque};

pub const DEFAULT_RUN_SEED: u64 = 0xBA7A;
const MAX_EVENT_LOG: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiLocale {
    EnUs,
    EsEs,
}

impl UiLocale {
    pub fn from_opt(value: Option<&str>) -> Self {
        let lowered = value.unwrap_or("").trim().to_ascii_lowercase();
        if lowered.starts_with("es") {
            Self::EsEs
        } else {
            Self::EnUs
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::EnUs => "en_US",
            Self::EsEs => "es_ES",
        }
    }

    pub fn text<'a>(self, en: &'a str, es: &'a str) -> &'a str {
        if matches!(self, Self::EsEs) {
            es
        } else {
            en
        }
    }
}

pub struct App {
    pub locale: UiLocale,
    pub seed: u64,
    pub run: RunState,
    pub events: EventBus,
    pub cursor: (usize, usize),
    pub event_log: VecDeque<String>,
    pub status_line: String,
    pub show_help: bool,
    pub should_quit: bool,
}

impl App {
    pub fn bootstrap(locale: UiLocale, seed: u64) -> Self {
        Self {
            locale,
            seed,
            run: RunState::new(GameConfig::classic(), seed),
            events: EventBus::default(),
            cursor: (1, 0),
            event_log: VecDeque::new(),
            status_line: locale
                .text("press Enter to begin", "pulsa Enter para empezar")
                .to_string(),
            show_help: false,
            should_quit: false,
        }
    }

    pub fn on_tick(&mut self) {
        self.run.tick(&mut self.events);
        self.flush_events();
    }

    pub fn move_cursor(&mut self, drow: i32, dcol: i32) {
        let row = self.cursor.0 as i32 + drow;
        let col = self.cursor.1 as i32 + dcol;
        self.cursor.0 = row.clamp(0, BOARD_ROWS as i32 - 1) as usize;
        self.cursor.1 = col.clamp(0, BOARD_COLS as i32 - 1) as usize;
    }

    pub fn select_card(&mut self, index: usize) {
        match self.run.select_card(index) {
            Ok(_) => {
                let line = match self.run.selected.and_then(|idx| self.run.hand.get(idx)) {
                    Some(card) => format!(
                        "{} {}",
                        self.locale.text("holding", "sostienes"),
                        format_card(*card)
                    ),
                    None => self
                        .locale
                        .text("card put back", "carta devuelta")
                        .to_string(),
                };
                self.push_status(line);
            }
            Err(err) => self.push_error(err),
        }
        self.flush_events();
    }

    pub fn clear_selection(&mut self) {
        if let Some(index) = self.run.selected {
            if self.run.select_card(index).is_ok() {
                self.push_status(self.locale.text("card put back", "carta devuelta"));
            }
        }
    }

    // Enter is contextual: it moves the flow forward wherever the game is
    // waiting, and plays the held card at the cursor otherwise.
    pub fn activate_primary(&mut self) {
        if self.show_help {
            self.show_help = false;
            return;
        }
        match self.run.flow {
            FlowState::Intro => self.advance_intro(),
            FlowState::Menu => self.start_run(),
            FlowState::Victory => self.next_level(),
            FlowState::GameOver | FlowState::GameComplete => self.start_run(),
            FlowState::Playing => match self.run.phase {
                TurnPhase::Tutorial { .. } | TurnPhase::Discovery { .. } => self.advance_pause(),
                _ => self.play_at_cursor(),
            },
        }
    }

    pub fn play_at_cursor(&mut self) {
        let (row, col) = self.cursor;
        match self.run.target_cell(row, col, &mut self.events) {
            Ok(_) => self.push_status(self.locale.text("resolving...", "resolviendo...")),
            Err(err) => self.push_error(err),
        }
        self.flush_events();
    }

    pub fn draw_penalty(&mut self) {
        match self.run.draw_penalty(&mut self.events) {
            Ok(_) => self.push_status(
                self.locale
                    .text("penalty card drawn", "carta de castigo robada"),
            ),
            Err(err) => self.push_error(err),
        }
        self.flush_events();
    }

    pub fn flush_hand(&mut self) {
        match self.run.trigger_flush(&mut self.events) {
            Ok(_) => self.push_status(self.locale.text("hand flushed", "mano renovada")),
            Err(err) => self.push_error(err),
        }
        self.flush_events();
    }

    pub fn advance_pause(&mut self) {
        if let Err(err) = self.run.advance(&mut self.events) {
            self.push_error(err);
        }
        self.flush_events();
    }

    pub fn advance_intro(&mut self) {
        if let Err(err) = self.run.advance_intro() {
            self.push_error(err);
        }
    }

    pub fn start_run(&mut self) {
        match self.run.start_run(&mut self.events) {
            Ok(_) => self.push_status(self.locale.text("new run", "nueva partida")),
            Err(err) => self.push_error(err),
        }
        self.flush_events();
    }

    pub fn next_level(&mut self) {
        match self.run.next_level(&mut self.events) {
            Ok(_) => self.push_status(self.locale.text("next level", "siguiente nivel")),
            Err(err) => self.push_error(err),
        }
        self.flush_events();
    }

    // `n` continues whatever ended: the next level after a win, a fresh
    // attempt after a defeat or a completed run.
    pub fn continue_run(&mut self) {
        match self.run.flow {
            FlowState::Victory => self.next_level(),
            FlowState::Menu | FlowState::GameOver | FlowState::GameComplete => self.start_run(),
            _ => self.push_status(
                self.locale
                    .text("nothing to continue", "nada que continuar"),
            ),
        }
    }

    pub fn to_menu(&mut self) {
        match self.run.to_menu() {
            Ok(_) => self.push_status(self.locale.text("back to menu", "de vuelta al menú")),
            Err(err) => self.push_error(err),
        }
    }

    pub fn toggle_locale(&mut self) {
        self.locale = match self.locale {
            UiLocale::EnUs => UiLocale::EsEs,
            UiLocale::EsEs => UiLocale::EnUs,
        };
        self.push_status(format!(
            "{}: {}",
            self.locale.text("language", "idioma"),
            self.locale.code()
        ));
    }

    pub fn next_hint(&self) -> String {
        match self.run.flow {
            FlowState::Intro => self.locale.text("Enter to continue", "Enter para seguir"),
            FlowState::Menu => self
                .locale
                .text("Enter to start a run", "Enter para empezar"),
            FlowState::Victory => self
                .locale
                .text("n next level, m menu", "n siguiente nivel, m menú"),
            FlowState::GameOver => self.locale.text("n retry, m menu", "n reintentar, m menú"),
            FlowState::GameComplete => self
                .locale
                .text("n new run, m menu", "n nueva partida, m menú"),
            FlowState::Playing => match self.run.phase {
                TurnPhase::Idle => self.locale.text(
                    "1-5 pick a card, Enter plays it at the cursor",
                    "1-5 elige carta, Enter la juega en el cursor",
                ),
                TurnPhase::Resolving => self.locale.text("resolving...", "resolviendo..."),
                TurnPhase::Tutorial { .. } => {
                    self.locale.text("Enter to continue", "Enter para seguir")
                }
                TurnPhase::Discovery { .. } => {
                    self.locale.text("Enter to reveal", "Enter para revelar")
                }
            },
        }
        .to_string()
    }

    pub fn flow_label(&self) -> &'static str {
        match self.run.flow {
            FlowState::Intro => self.locale.text("intro", "intro"),
            FlowState::Menu => self.locale.text("menu", "menú"),
            FlowState::Playing => self.locale.text("playing", "jugando"),
            FlowState::GameOver => self.locale.text("defeat", "derrota"),
            FlowState::Victory => self.locale.text("level clear", "nivel superado"),
            FlowState::GameComplete => self.locale.text("run complete", "partida completa"),
        }
    }

    pub fn card_label(&self, index: usize, card: Card) -> String {
        let marker = if self.run.selected == Some(index) {
            '*'
        } else {
            ' '
        };
        format!("{marker}{}: {}", index + 1, format_card(card))
    }

    // Board and codex show "???" until the kind has been captured once.
    pub fn mask_label(&self, kind: MaskKind) -> &'static str {
        if self.run.is_unlocked(kind) {
            kind.display_name()
        } else {
            "???"
        }
    }

    pub fn codex_lines(&self, limit: usize) -> Vec<String> {
        MaskKind::ALL
            .iter()
            .filter(|kind| self.run.is_unlocked(**kind))
            .take(limit)
            .map(|kind| format!("{}: {}", kind.display_name(), kind.rule_text()))
            .collect()
    }

    pub fn push_status(&mut self, value: impl Into<String>) {
        self.status_line = value.into();
    }

    pub fn push_error(&mut self, err: RunError) {
        self.status_line = format!("{}: {err}", self.locale.text("error", "error"));
    }

    fn flush_events(&mut self) {
        let drained: Vec<_> = self.events.drain().collect();
        for event in drained {
            let line = format_event(&self.run.unlocked, &event);
            self.push_event_line(line);
        }
    }

    fn push_event_line(&mut self, line: String) {
        if self.event_log.len() >= MAX_EVENT_LOG {
            let _ = self.event_log.pop_front();
        }
        self.event_log.push_back(line);
    }
}

// Event log lines mirror what the player is allowed to know: a kind that has
// never been captured stays "???" even in the log.
fn format_event(unlocked: &BTreeSet<MaskKind>, event: &Event) -> String {
    let name = |kind: &MaskKind| -> &'static str {
        if unlocked.contains(kind) {
            kind.display_name()
        } else {
            "???"
        }
    };
    match event {
        Event::RunStarted { seed } => format!("run started, seed {seed}"),
        Event::LevelStarted {
            level,
            budget,
            pool,
        } => format!(
            "level {} started, budget {budget}, pool {pool}",
            level + 1
        ),
        Event::MaskSpawned { row, col, kind } => {
            format!("{} appears at r{row}c{col}", name(kind))
        }
        Event::CardDrawn { card } => format!("penalty drew {}", format_card(*card)),
        Event::BattleWon {
            kind,
            row,
            col,
            played,
        } => format!(
            "won against {} at r{row}c{col} with {}",
            name(kind),
            format_card(*played)
        ),
        Event::BattleLost {
            kind,
            row,
            col,
            played,
        } => format!(
            "lost against {} at r{row}c{col} with {}",
            name(kind),
            format_card(*played)
        ),
        Event::MaskCaptured { kind, prize } => {
            format!("captured {}, prize {}", name(kind), format_card(*prize))
        }
        Event::MaskUnlocked { kind } => format!("codex unlocked: {}", kind.display_name()),
        Event::MaskPushed { from_row, col } => {
            format!("mask pushed down from r{from_row}c{col}")
        }
        Event::MaskFell { col, kind } => format!("{} fell off column {col}", name(kind)),
        Event::HandFlushed { redrawn, left } => {
            format!("hand flushed, {redrawn} redrawn, {left} left")
        }
        Event::GenerationStalled { level, attempts } => format!(
            "spawn retries exhausted on level {} after {attempts} tries",
            level + 1
        ),
        Event::LevelCleared { level } => format!("level {} cleared", level + 1),
        Event::RunComplete { levels } => format!("run complete: {levels} levels"),
        Event::GameOver { level, defeated } => {
            format!("game over on level {} with {defeated} captured", level + 1)
        }
    }
}

pub fn format_card(card: Card) -> String {
    format!("{} de {}", value_name(card.value()), suit_name(card.suit()))
}

fn value_name(value: u8) -> &'static str {
    match value {
        1 => "as",
        2 => "2",
        3 => "3",
        4 => "4",
        5 => "5",
        6 => "6",
        7 => "7",
        8 => "sota",
        9 => "caballo",
        _ => "rey",
    }
}

fn suit_name(suit: Suit) -> &'static str {
    match suit {
        Suit::Oros => "Oros",
        Suit::Copas => "Copas",
        Suit::Espadas => "Espadas",
        Suit::Bastos => "Bastos",
    }
}
