use crate::{Card, RngState, DECK_SIZE};

#[derive(Debug, Default, Clone)]
pub struct Deck {
    pub draw: Vec<Card>,
    pub discard: Vec<Card>,
}

impl Deck {
    pub fn spanish40() -> Self {
        let mut draw = Vec::with_capacity(DECK_SIZE as usize);
        for id in 1..=DECK_SIZE {
            draw.push(Card::from_id(id));
        }
        Self {
            draw,
            discard: Vec::new(),
        }
    }

    pub fn reset(&mut self, rng: &mut RngState) {
        *self = Deck::spanish40();
        rng.shuffle(&mut self.draw);
    }

    pub fn shuffle(&mut self, rng: &mut RngState) {
        rng.shuffle(&mut self.draw);
    }

    pub fn draw_card(&mut self) -> Option<Card> {
        self.draw.pop()
    }

    pub fn draw_cards(&mut self, count: usize) -> Vec<Card> {
        let mut cards = Vec::with_capacity(count);
        for _ in 0..count {
            if let Some(card) = self.draw.pop() {
                cards.push(card);
            } else {
                break;
            }
        }
        cards
    }

    // Rejected setup batches go under the pile so the next draw sees new cards.
    pub fn return_to_front(&mut self, cards: Vec<Card>) {
        let mut rest = std::mem::take(&mut self.draw);
        self.draw = cards;
        self.draw.append(&mut rest);
    }

    pub fn discard(&mut self, card: Card) {
        self.discard.push(card);
    }

    pub fn top_discard(&self) -> Option<Card> {
        self.discard.last().copied()
    }

    pub fn remaining(&self) -> usize {
        self.draw.len()
    }

    pub fn reshuffle_discard(&mut self, rng: &mut RngState) {
        if self.discard.is_empty() {
            return;
        }
        self.draw.append(&mut self.discard);
        rng.shuffle(&mut self.draw);
    }
}
