use crate::app::{format_card, App};
use baraja_core::{
    DiscoveryStep, FlowState, MaskKind, TurnPhase, BOARD_COLS, BOARD_ROWS, DANGER_ROW,
};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Line, Modifier, Style, Stylize};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

pub fn draw(frame: &mut Frame, app: &App) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),
            Constraint::Min(14),
            Constraint::Length(10),
        ])
        .split(frame.area());

    draw_header(frame, root[0], app);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(root[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(9), Constraint::Length(7)])
        .split(middle[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(6)])
        .split(middle[1]);

    draw_board(frame, left[0], app);
    draw_hand(frame, left[1], app);
    draw_piles(frame, right[0], app);
    draw_codex(frame, right[1], app);
    draw_events(frame, root[2], app);

    match app.run.flow {
        FlowState::Intro => draw_intro_popup(frame, app),
        FlowState::Menu => draw_menu_popup(frame, app),
        FlowState::Victory => draw_victory_popup(frame, app),
        FlowState::GameOver => draw_game_over_popup(frame, app),
        FlowState::GameComplete => draw_complete_popup(frame, app),
        FlowState::Playing => match app.run.phase {
            TurnPhase::Tutorial { .. } => draw_tutorial_popup(frame, app),
            TurnPhase::Discovery { kind, step } => draw_discovery_popup(frame, app, kind, step),
            _ => {}
        },
    }

    if app.show_help {
        draw_help_popup(frame, app);
    }
}

fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let title = format!(
        "{} | {} | {}",
        app.locale.text("La Baraja", "La Baraja"),
        app.flow_label(),
        app.next_hint()
    );
    let status = &app.run.status;
    let summary = format!(
        "{} {}  {} {}  {} {}/{}  {} {}  {} {}",
        app.locale.text("Level", "Nivel"),
        status.level + 1,
        app.locale.text("Masks", "Máscaras"),
        app.run.board.active_masks(),
        app.locale.text("Spawned", "Surgidas"),
        status.masks_spawned,
        status.budget,
        app.locale.text("Captured", "Capturadas"),
        status.masks_defeated,
        app.locale.text("Losses", "Derrotas"),
        status.failures
    );
    let extra = format!(
        "{} {} | {} {} | {} {} | {} {}",
        app.locale.text("Seed", "Semilla"),
        app.seed,
        app.locale.text("Lang", "Idioma"),
        app.locale.code(),
        app.locale.text("Deck", "Mazo"),
        app.run.deck.remaining(),
        app.locale.text("Flushes", "Descartes"),
        status.flushes_left
    );
    let lines = vec![
        Line::from(title.bold()),
        Line::from(summary),
        Line::from(extra),
        Line::from(format!(
            "{}: {}",
            app.locale.text("Status", "Estado"),
            app.status_line
        )),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .title(app.locale.text("Overview", "Resumen"));
    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true }).block(block);
    frame.render_widget(paragraph, area);
}

fn draw_board(frame: &mut Frame, area: Rect, app: &App) {
    let outer = pane_block(app.locale.text("Board", "Tablero"));
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Ratio(1, 4); BOARD_ROWS])
        .split(inner);
    for row in 0..BOARD_ROWS {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 4); BOARD_COLS])
            .split(rows[row]);
        for col in 0..BOARD_COLS {
            draw_cell(frame, cols[col], app, row, col);
        }
    }
}

fn draw_cell(frame: &mut Frame, area: Rect, app: &App, row: usize, col: usize) {
    let mut block = Block::default().borders(Borders::ALL);
    if app.cursor == (row, col) {
        block = block.border_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
    }
    // Shake pushes the cell text sideways while the loss effect plays out.
    let pad = " ".repeat((app.run.shake_offset(row, col) * 3.0).round() as usize);
    let lines = match app.run.board.slot(row, col) {
        Some(slot) => {
            let name = format!("{pad}{}", app.mask_label(slot.mask));
            let name_line = if row == DANGER_ROW {
                Line::from(name.red())
            } else {
                Line::from(name)
            };
            vec![
                name_line,
                Line::from(format!("{pad}{}", format_card(slot.card))),
            ]
        }
        None => vec![Line::from(""), Line::from(format!("{pad}·"))],
    };
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_hand(frame: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem<'_>> = if app.run.hand.is_empty() {
        vec![ListItem::new(app.locale.text("empty", "vacía"))]
    } else {
        app.run
            .hand
            .iter()
            .enumerate()
            .map(|(idx, card)| ListItem::new(app.card_label(idx, *card)))
            .collect()
    };
    let block = pane_block(app.locale.text("Hand", "Mano"));
    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(">> ");
    let mut state = ListState::default();
    if !app.run.hand.is_empty() {
        state.select(app.run.selected.map(|idx| idx.min(app.run.hand.len() - 1)));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_piles(frame: &mut Frame, area: Rect, app: &App) {
    let top = app
        .run
        .deck
        .top_discard()
        .map(format_card)
        .unwrap_or_else(|| "-".to_string());
    let lines = vec![
        Line::from(format!(
            "{}: {}",
            app.locale.text("Draw pile", "Mazo"),
            app.run.deck.remaining()
        )),
        Line::from(format!(
            "{}: {}",
            app.locale.text("Discard pile", "Descartes"),
            app.run.deck.discard.len()
        )),
        Line::from(format!(
            "{}: {}",
            app.locale.text("Top discard", "Último descarte"),
            top
        )),
        Line::from(format!(
            "{}: {}",
            app.locale.text("Flushes left", "Renovaciones"),
            app.run.status.flushes_left
        )),
        Line::from(format!(
            "{}: {}",
            app.locale.text("Losses this level", "Derrotas del nivel"),
            app.run.status.failures
        )),
    ];
    let block = pane_block(app.locale.text("Piles", "Montones"));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_codex(frame: &mut Frame, area: Rect, app: &App) {
    let capacity = area.height.saturating_sub(2) as usize;
    let mut lines: Vec<Line<'_>> = app
        .codex_lines(capacity)
        .into_iter()
        .map(Line::from)
        .collect();
    if lines.is_empty() {
        lines.push(Line::from(app.locale.text(
            "capture a mask to learn its rule",
            "captura una máscara para aprender su regla",
        )));
    }
    let title = format!(
        "{} {}/{}",
        app.locale.text("Codex", "Códice"),
        app.run.unlocked.len(),
        MaskKind::ALL.len()
    );
    let block = pane_block(title.as_str());
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: true }).block(block),
        area,
    );
}

fn draw_events(frame: &mut Frame, area: Rect, app: &App) {
    let capacity = area.height.saturating_sub(2) as usize;
    let start = app.event_log.len().saturating_sub(capacity);
    let lines: Vec<Line<'_>> = app
        .event_log
        .iter()
        .skip(start)
        .map(|line| Line::from(line.clone()))
        .collect();
    let block = pane_block(app.locale.text("Events", "Eventos"));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_intro_popup(frame: &mut Frame, app: &App) {
    let area = centered_rect(60, 45, frame.area());
    frame.render_widget(Clear, area);
    let lines = vec![
        Line::from(app.locale.text(
            "Forty Spanish cards against a wall of masks.",
            "Cuarenta cartas contra un muro de máscaras.",
        )),
        Line::from(app.locale.text(
            "Each mask hides its rule until you capture it once.",
            "Cada máscara esconde su regla hasta que la capturas.",
        )),
        Line::from(app.locale.text(
            "Let a mask reach the bottom row and the run is over.",
            "Si una máscara llega a la última fila, se acabó.",
        )),
        Line::from(""),
        Line::from(
            app.locale
                .text("Enter to continue", "Enter para seguir")
                .bold(),
        ),
    ];
    let block = Block::default()
        .title("La Baraja")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn draw_menu_popup(frame: &mut Frame, app: &App) {
    let area = centered_rect(50, 40, frame.area());
    frame.render_widget(Clear, area);
    let lines = vec![
        Line::from(format!(
            "{}: {}",
            app.locale.text("Seed", "Semilla"),
            app.seed
        )),
        Line::from(format!(
            "{}: {}/{}",
            app.locale.text("Codex", "Códice"),
            app.run.unlocked.len(),
            MaskKind::ALL.len()
        )),
        Line::from(""),
        Line::from(
            app.locale
                .text("Enter - start a run", "Enter - empezar partida"),
        ),
        Line::from(app.locale.text("l - language | q - quit", "l - idioma | q - salir")),
    ];
    let block = Block::default()
        .title(app.locale.text("Menu", "Menú"))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_tutorial_popup(frame: &mut Frame, app: &App) {
    let area = centered_rect(60, 30, frame.area());
    frame.render_widget(Clear, area);
    let lines = vec![
        Line::from(app.run.tutorial_line().unwrap_or("")),
        Line::from(""),
        Line::from(app.locale.text("(Enter)", "(Enter)")),
    ];
    let block = Block::default()
        .title(app.locale.text("Tutorial", "Tutorial"))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn draw_discovery_popup(frame: &mut Frame, app: &App, kind: MaskKind, step: DiscoveryStep) {
    let area = centered_rect(60, 35, frame.area());
    frame.render_widget(Clear, area);
    let lines = match step {
        DiscoveryStep::Unveil => vec![
            Line::from(kind.display_name().bold()),
            Line::from(
                app.locale
                    .text("MASK UNLOCKED!", "¡MÁSCARA DESBLOQUEADA!"),
            ),
            Line::from(""),
            Line::from(
                app.locale
                    .text("Enter to read its rule", "Enter para leer su regla"),
            ),
        ],
        DiscoveryStep::RuleText => vec![
            Line::from(kind.display_name().bold()),
            Line::from(kind.rule_text()),
            Line::from(""),
            Line::from(app.locale.text("(Enter)", "(Enter)")),
        ],
    };
    let block = Block::default()
        .title(app.locale.text("Discovery", "Descubrimiento"))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta));
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn draw_victory_popup(frame: &mut Frame, app: &App) {
    let area = centered_rect(50, 30, frame.area());
    frame.render_widget(Clear, area);
    let lines = vec![
        Line::from(format!(
            "{} {}",
            app.locale.text("Level cleared:", "Nivel superado:"),
            app.run.status.level + 1
        )),
        Line::from(format!(
            "{} {}",
            app.locale.text("Masks captured:", "Máscaras capturadas:"),
            app.run.status.masks_defeated
        )),
        Line::from(""),
        Line::from(
            app.locale
                .text("n - next level | m - menu", "n - siguiente nivel | m - menú"),
        ),
    ];
    let block = Block::default()
        .title(app.locale.text("Victory", "Victoria"))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_game_over_popup(frame: &mut Frame, app: &App) {
    let area = centered_rect(50, 30, frame.area());
    frame.render_widget(Clear, area);
    let lines = vec![
        Line::from(format!(
            "{} {}",
            app.locale.text("Fell on level", "Caída en el nivel"),
            app.run.status.level + 1
        )),
        Line::from(format!(
            "{} {}",
            app.locale.text("Masks captured:", "Máscaras capturadas:"),
            app.run.status.masks_defeated
        )),
        Line::from(""),
        Line::from(
            app.locale
                .text("n - try again | m - menu", "n - otra vez | m - menú"),
        ),
    ];
    let block = Block::default()
        .title(app.locale.text("Defeat", "Derrota"))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_complete_popup(frame: &mut Frame, app: &App) {
    let area = centered_rect(55, 35, frame.area());
    frame.render_widget(Clear, area);
    let lines = vec![
        Line::from(app.locale.text(
            "Every level cleared. The wall is down.",
            "Todos los niveles superados. El muro cayó.",
        )),
        Line::from(format!(
            "{}: {}/{}",
            app.locale.text("Codex", "Códice"),
            app.run.unlocked.len(),
            MaskKind::ALL.len()
        )),
        Line::from(""),
        Line::from(
            app.locale
                .text("n - new run | m - menu", "n - nueva partida | m - menú"),
        ),
    ];
    let block = Block::default()
        .title(app.locale.text("Run complete", "Partida completa"))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_help_popup(frame: &mut Frame, app: &App) {
    let area = centered_rect(70, 60, frame.area());
    frame.render_widget(Clear, area);
    let lines = vec![
        Line::from(app.locale.text(
            "q quit | ? help | arrows/jk move the cursor",
            "q salir | ? ayuda | flechas/jk mueven el cursor",
        )),
        Line::from(app.locale.text(
            "1-5 pick up or put back a hand card",
            "1-5 coge o devuelve una carta de la mano",
        )),
        Line::from(app.locale.text(
            "Enter/Space play at the cursor, or advance",
            "Enter/Espacio juega en el cursor, o avanza",
        )),
        Line::from(app.locale.text(
            "d penalty draw | f flush the hand",
            "d roba con castigo | f renueva la mano",
        )),
        Line::from(app.locale.text(
            "n continue | m menu | l language",
            "n continuar | m menú | l idioma",
        )),
        Line::from(app.locale.text(
            "Esc puts the held card back",
            "Esc devuelve la carta sostenida",
        )),
    ];
    let block = Block::default()
        .title(app.locale.text("Help", "Ayuda"))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn pane_block(title: &str) -> Block<'_> {
    Block::default().title(title).borders(Borders::ALL)
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
