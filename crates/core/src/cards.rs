use serde::{Deserialize, Serialize};

pub const DECK_SIZE: u8 = 40;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Suit {
    Oros,
    Copas,
    Espadas,
    Bastos,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Oros, Suit::Copas, Suit::Espadas, Suit::Bastos];

    pub fn from_index(index: u8) -> Option<Suit> {
        Suit::ALL.get(index as usize).copied()
    }

    pub fn index(self) -> u8 {
        match self {
            Suit::Oros => 0,
            Suit::Copas => 1,
            Suit::Espadas => 2,
            Suit::Bastos => 3,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Suit::Oros => "oros",
            Suit::Copas => "copas",
            Suit::Espadas => "espadas",
            Suit::Bastos => "bastos",
        }
    }
}

// One of the forty cards, identified by 1..=40. Value and suit are derived,
// never stored.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Card {
    pub id: u8,
}

impl Card {
    pub fn from_id(id: u8) -> Self {
        Self { id }
    }

    pub fn from_parts(suit: Suit, value: u8) -> Self {
        Self {
            id: suit.index() * 10 + value,
        }
    }

    pub fn value(self) -> u8 {
        (self.id - 1) % 10 + 1
    }

    pub fn suit(self) -> Suit {
        match (self.id - 1) / 10 {
            0 => Suit::Oros,
            1 => Suit::Copas,
            2 => Suit::Espadas,
            _ => Suit::Bastos,
        }
    }

    // Sota, caballo and rey count as 10, 11 and 12 where adjusted values apply.
    pub fn adjusted_value(self) -> u8 {
        let value = self.value();
        if value > 7 {
            value + 2
        } else {
            value
        }
    }
}
