use crate::{Board, Card, MaskKind, Suit, BOARD_COLS};

// Read-only view of everything a win predicate may consult. The played card
// is still part of `hand` while the battle is evaluated.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub board: &'a Board,
    pub hand: &'a [Card],
    pub active_masks: usize,
    pub level_failures: u32,
}

pub fn wins(
    kind: MaskKind,
    played: Card,
    guarded: Card,
    at: (usize, usize),
    ctx: &RuleContext,
) -> bool {
    let mut visited = [false; BOARD_COLS];
    if let Some(flag) = visited.get_mut(at.1) {
        *flag = true;
    }
    wins_inner(kind, played, guarded, at, ctx, &mut visited)
}

pub fn is_valid_setup(kind: MaskKind, card: Card) -> bool {
    match kind {
        MaskKind::Felicidad => card.value() != 10,
        MaskKind::Tristeza => card.value() != 1,
        _ => true,
    }
}

fn wins_inner(
    kind: MaskKind,
    played: Card,
    guarded: Card,
    at: (usize, usize),
    ctx: &RuleContext,
    visited: &mut [bool; BOARD_COLS],
) -> bool {
    let pv = played.value();
    let bv = guarded.value();
    match kind {
        MaskKind::Felicidad => pv > bv,
        MaskKind::Tristeza => pv < bv,
        MaskKind::Ira => pv == bv,
        MaskKind::Conspirador => played.suit() == guarded.suit(),
        MaskKind::Cinismo => pv != bv && played.suit() != guarded.suit(),
        MaskKind::Soldado => played.suit() == Suit::Espadas,
        MaskKind::Bruto => played.suit() == Suit::Bastos,
        MaskKind::Borracho => played.suit() == Suit::Copas,
        MaskKind::Codicia => played.suit() == Suit::Oros,
        MaskKind::Desliz => pv % 2 != bv % 2,
        MaskKind::Preocupacion => pv % 2 == bv % 2 && played.suit() == guarded.suit(),
        MaskKind::Sorpresa => {
            let pa = played.adjusted_value() as i32;
            let ba = guarded.adjusted_value() as i32;
            pa + ba == 7 || (pa - ba).abs() == 7
        }
        MaskKind::Trauma => pv.abs_diff(bv) <= 1,
        MaskKind::Artista => pv.abs_diff(bv) == 1,
        MaskKind::Afouteza => pv as usize == ctx.active_masks,
        MaskKind::Decepcion => {
            min_adjusted(ctx.hand).is_some_and(|lowest| played.adjusted_value() == lowest)
        }
        MaskKind::Presumido => {
            max_adjusted(ctx.hand).is_some_and(|highest| played.adjusted_value() == highest)
        }
        MaskKind::Enfado => played.adjusted_value() as u32 == ctx.level_failures,
        MaskKind::Alteza => pv == 10,
        MaskKind::Cabalo => pv == 9,
        MaskKind::Carlista => pv == 8,
        MaskKind::Pirata => matches!(played.suit(), Suit::Copas | Suit::Oros) && pv > bv,
        MaskKind::Dereita => delegate(played, at, 1, ctx, visited),
        MaskKind::Esquerda => delegate(played, at, -1, ctx, visited),
    }
}

// A delegating mask answers with its neighbour's rule. No neighbour, or a
// delegation loop, is an automatic loss.
fn delegate(
    played: Card,
    at: (usize, usize),
    step: isize,
    ctx: &RuleContext,
    visited: &mut [bool; BOARD_COLS],
) -> bool {
    let (row, col) = at;
    let next = col as isize + step;
    if next < 0 || next >= BOARD_COLS as isize {
        return false;
    }
    let next = next as usize;
    if visited[next] {
        return false;
    }
    visited[next] = true;
    match ctx.board.slot(row, next) {
        Some(slot) => wins_inner(slot.mask, played, slot.card, (row, next), ctx, visited),
        None => false,
    }
}

fn min_adjusted(hand: &[Card]) -> Option<u8> {
    hand.iter().map(|card| card.adjusted_value()).min()
}

fn max_adjusted(hand: &[Card]) -> Option<u8> {
    hand.iter().map(|card| card.adjusted_value()).max()
}
