use baraja_core::{
    Event, EventBus, FlowState, GameConfig, MaskKind, RngState, RunState, TurnPhase,
};
use serde::Serialize;

const DEFAULT_RUN_SEED: u64 = 0xBA7A;
const MAX_AUTO_STEPS: u32 = 20_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UiLocale {
    EnUs,
    EsEs,
}

impl UiLocale {
    fn code(self) -> &'static str {
        match self {
            Self::EnUs => "en_US",
            Self::EsEs => "es_ES",
        }
    }

    fn from_opt(value: Option<&str>) -> Self {
        let lowered = value.unwrap_or("").trim().to_ascii_lowercase();
        if lowered.starts_with("es") {
            Self::EsEs
        } else {
            Self::EnUs
        }
    }

    fn text<'a>(self, en: &'a str, es: &'a str) -> &'a str {
        if matches!(self, Self::EsEs) {
            es
        } else {
            en
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct CliOptions {
    auto: Option<u32>,
    cui: bool,
    json: bool,
    seed: Option<u64>,
    locale: UiLocale,
}

fn parse_cli_options(args: &[String]) -> CliOptions {
    let mut auto = None;
    let mut cui = false;
    let mut json = false;
    let mut seed = None;
    let mut locale_arg: Option<String> = std::env::var("BARAJA_LANG").ok();
    let mut idx = 0usize;
    while idx < args.len() {
        let arg = args[idx].as_str();
        match arg {
            "--auto" => auto = Some(1),
            "--cui" => cui = true,
            "--json" => json = true,
            "--lang" | "-l" => {
                if let Some(value) = args.get(idx + 1) {
                    locale_arg = Some(value.clone());
                    idx += 1;
                }
            }
            "--seed" => {
                if let Some(value) = args.get(idx + 1) {
                    seed = value.parse::<u64>().ok();
                    idx += 1;
                }
            }
            _ => {
                if let Some(count) = arg.strip_prefix("--auto=") {
                    auto = count.parse::<u32>().ok().filter(|&n| n > 0).or(Some(1));
                }
            }
        }
        idx += 1;
    }
    CliOptions {
        auto,
        cui,
        json,
        seed,
        locale: UiLocale::from_opt(locale_arg.as_deref()),
    }
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = parse_cli_options(&args);
    if options.cui {
        launch_cui(&options);
        return;
    }
    if let Some(runs) = options.auto {
        run_auto(options, runs);
        return;
    }
    launch_cui(&options);
}

fn launch_cui(options: &CliOptions) {
    let launch = baraja_cui::LaunchOptions {
        locale: Some(options.locale.code().to_string()),
        seed: options.seed,
    };
    if let Err(err) = baraja_cui::run(launch) {
        eprintln!("cui launch error: {err}");
        std::process::exit(1);
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
enum RunOutcome {
    Complete,
    Defeated,
    MaxSteps,
}

#[derive(Debug, Serialize)]
struct RunRecord {
    seed: u64,
    outcome: RunOutcome,
    levels_cleared: u32,
    masks_captured: u32,
    codex: usize,
    steps: u32,
    events: Vec<Event>,
}

#[derive(Debug, Serialize)]
struct AutoReport {
    locale: &'static str,
    base_seed: u64,
    runs: Vec<RunRecord>,
}

// Headless demo driver: a random but legal policy plays full runs and the
// event stream tells the story. With --json the stream is swallowed and the
// whole transcript is dumped at the end instead.
fn run_auto(options: CliOptions, runs: u32) {
    let locale = options.locale;
    let base_seed = options.seed.unwrap_or(DEFAULT_RUN_SEED);
    let echo = !options.json;
    if echo {
        println!("locale: {}", locale.code());
        println!("base seed: {base_seed}");
    }
    let mut report = AutoReport {
        locale: locale.code(),
        base_seed,
        runs: Vec::with_capacity(runs as usize),
    };
    for index in 0..runs {
        let seed = base_seed.wrapping_add(index as u64);
        if echo {
            println!(
                "--- {} {} ({} {seed}) ---",
                locale.text("run", "partida"),
                index + 1,
                locale.text("seed", "semilla")
            );
        }
        let record = play_one_run(seed, echo);
        if echo {
            print_run_summary(locale, &record);
        }
        report.runs.push(record);
    }
    if options.json {
        let body = serde_json::to_string_pretty(&report).expect("serialize transcript");
        println!("{body}");
    } else {
        print_table(locale, &report.runs);
    }
}

fn play_one_run(seed: u64, echo: bool) -> RunRecord {
    let mut run = RunState::new(GameConfig::classic(), seed);
    let mut events = EventBus::default();
    let mut dice = RngState::from_seed(seed ^ 0x5EED);
    let mut record = RunRecord {
        seed,
        outcome: RunOutcome::MaxSteps,
        levels_cleared: 0,
        masks_captured: 0,
        codex: 0,
        steps: 0,
        events: Vec::new(),
    };
    run.advance_intro().expect("leave intro");
    run.start_run(&mut events).expect("start run");
    while record.steps < MAX_AUTO_STEPS {
        record.steps += 1;
        match run.phase {
            TurnPhase::Tutorial { .. } | TurnPhase::Discovery { .. } => {
                let _ = run.advance(&mut events);
            }
            TurnPhase::Resolving => run.tick(&mut events),
            TurnPhase::Idle => play_idle_step(&mut run, &mut dice, &mut events),
        }
        drain_into(&mut record, &mut events, echo);
        match run.flow {
            FlowState::Victory => {
                record.levels_cleared += 1;
                run.next_level(&mut events).expect("next level");
            }
            FlowState::GameOver => {
                record.outcome = RunOutcome::Defeated;
                break;
            }
            FlowState::GameComplete => {
                record.levels_cleared += 1;
                record.outcome = RunOutcome::Complete;
                break;
            }
            _ => {}
        }
        drain_into(&mut record, &mut events, echo);
    }
    record.masks_captured = record
        .events
        .iter()
        .filter(|event| matches!(event, Event::MaskCaptured { .. }))
        .count() as u32;
    record.codex = run.unlocked.len();
    record
}

// One idle decision: mostly battles, a penalty draw when the hand runs low,
// the odd flush. Rejected intents are just skipped beats for the policy.
fn play_idle_step(run: &mut RunState, dice: &mut RngState, events: &mut EventBus) {
    let roll = dice.next_u64() % 10;
    if roll >= 9 && run.status.flushes_left > 0 && run.hand.len() > 1 {
        let _ = run.trigger_flush(events);
        return;
    }
    if (roll >= 7 || run.hand.is_empty()) && run.draw_penalty(events).is_ok() {
        return;
    }
    let cells: Vec<(usize, usize)> = run
        .board
        .occupied()
        .map(|(row, col, _)| (row, col))
        .collect();
    let (Some(cell), Some(card)) = (
        dice.pick_index(cells.len()),
        dice.pick_index(run.hand.len()),
    ) else {
        let _ = run.draw_penalty(events);
        return;
    };
    let (row, col) = cells[cell];
    if run.selected != Some(card) {
        let _ = run.select_card(card);
    }
    let _ = run.target_cell(row, col, events);
}

fn drain_into(record: &mut RunRecord, events: &mut EventBus, echo: bool) {
    for event in events.drain() {
        if echo {
            println!("event: {event:?}");
        }
        record.events.push(event);
    }
}

fn print_run_summary(locale: UiLocale, record: &RunRecord) {
    let outcome = match record.outcome {
        RunOutcome::Complete => locale.text("run complete", "partida completa"),
        RunOutcome::Defeated => locale.text("defeated", "derrota"),
        RunOutcome::MaxSteps => locale.text("step limit reached", "límite de pasos"),
    };
    println!(
        "{}: {} | {}: {} | {}: {} | {}: {}/{} | {}: {}",
        locale.text("outcome", "resultado"),
        outcome,
        locale.text("levels cleared", "niveles superados"),
        record.levels_cleared,
        locale.text("masks captured", "máscaras capturadas"),
        record.masks_captured,
        locale.text("codex", "códice"),
        record.codex,
        MaskKind::ALL.len(),
        locale.text("steps", "pasos"),
        record.steps
    );
}

fn print_table(locale: UiLocale, runs: &[RunRecord]) {
    println!(
        "{:>4} {:>12} {:>10} {:>7} {:>9} {:>6} {:>7}",
        locale.text("run", "part."),
        locale.text("seed", "semilla"),
        locale.text("outcome", "result."),
        locale.text("levels", "niveles"),
        locale.text("captured", "capturas"),
        locale.text("codex", "códice"),
        locale.text("steps", "pasos")
    );
    for (index, record) in runs.iter().enumerate() {
        let outcome = match record.outcome {
            RunOutcome::Complete => locale.text("complete", "completa"),
            RunOutcome::Defeated => locale.text("defeat", "derrota"),
            RunOutcome::MaxSteps => locale.text("capped", "tope"),
        };
        println!(
            "{:>4} {:>12} {:>10} {:>7} {:>9} {:>6} {:>7}",
            index + 1,
            record.seed,
            outcome,
            record.levels_cleared,
            record.masks_captured,
            record.codex,
            record.steps
        );
    }
}
