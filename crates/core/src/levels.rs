use crate::MaskKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelRule {
    pub level: u32,
    pub pool: Vec<MaskKind>,
    pub budget: u32,
    pub flushes: u8,
    #[serde(default)]
    pub scripted_row: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub levels: Vec<LevelRule>,
    pub hand_capacity: usize,
    pub starting_hand: usize,
    pub spawn_one_in: u64,
    pub effect_step: f32,
    pub setup_retry_limit: u32,
}

impl GameConfig {
    pub fn classic() -> Self {
        let base = vec![
            MaskKind::Felicidad,
            MaskKind::Tristeza,
            MaskKind::Ira,
            MaskKind::Conspirador,
        ];
        let mut second = base.clone();
        second.extend([
            MaskKind::Cinismo,
            MaskKind::Soldado,
            MaskKind::Bruto,
            MaskKind::Borracho,
            MaskKind::Codicia,
            MaskKind::Desliz,
            MaskKind::Artista,
            MaskKind::Alteza,
            MaskKind::Cabalo,
            MaskKind::Carlista,
            MaskKind::Pirata,
        ]);
        let mut third = second.clone();
        third.extend([
            MaskKind::Preocupacion,
            MaskKind::Sorpresa,
            MaskKind::Trauma,
            MaskKind::Decepcion,
            MaskKind::Presumido,
        ]);
        let mut last = third.clone();
        last.extend([
            MaskKind::Afouteza,
            MaskKind::Enfado,
            MaskKind::Dereita,
            MaskKind::Esquerda,
        ]);
        Self {
            levels: vec![
                LevelRule {
                    level: 0,
                    pool: base,
                    budget: 4,
                    flushes: 2,
                    scripted_row: true,
                },
                LevelRule {
                    level: 1,
                    pool: second,
                    budget: 15,
                    flushes: 2,
                    scripted_row: false,
                },
                LevelRule {
                    level: 2,
                    pool: third,
                    budget: 20,
                    flushes: 2,
                    scripted_row: false,
                },
                LevelRule {
                    level: 3,
                    pool: last,
                    budget: 25,
                    flushes: 2,
                    scripted_row: false,
                },
            ],
            hand_capacity: 5,
            starting_hand: 3,
            spawn_one_in: 2,
            effect_step: 0.2,
            setup_retry_limit: 32,
        }
    }

    // Levels past the table reuse its last row.
    pub fn level_rule(&self, level: u32) -> Option<&LevelRule> {
        self.levels
            .iter()
            .filter(|rule| rule.level <= level)
            .max_by_key(|rule| rule.level)
    }

    pub fn final_level(&self) -> Option<u32> {
        self.levels.iter().map(|rule| rule.level).max()
    }
}

pub fn tutorial_script() -> &'static [&'static str] {
    &TUTORIAL_SCRIPT
}

const TUTORIAL_SCRIPT: [&str; 6] = [
    "Bienvenido a La Baraja. Cada máscara esconde una regla.",
    "Elige una carta de tu mano y juégala contra una máscara.",
    "Acierta la regla oculta y capturas la máscara y su carta.",
    "Falla y su columna desciende. La última fila es la ruina.",
    "Robar del mazo da una carta extra, pero algo descenderá.",
    "Sin jugadas posibles, baraja de nuevo la mano. Suerte.",
];
