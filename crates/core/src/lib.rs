//! Core game logic. Keep this crate free of IO and platform concerns.

pub mod board;
pub mod cards;
pub mod deck;
pub mod effects;
pub mod events;
pub mod levels;
pub mod masks;
pub mod rng;
pub mod rules;
pub mod run;
pub mod state;

pub use board::*;
pub use cards::*;
pub use deck::*;
pub use effects::*;
pub use events::*;
pub use levels::*;
pub use masks::*;
pub use rng::*;
pub use rules::*;
pub use run::*;
pub use state::*;
