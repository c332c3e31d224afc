use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
pub enum MaskKind {
    Felicidad,
    Tristeza,
    Ira,
    Conspirador,
    Cinismo,
    Soldado,
    Bruto,
    Borracho,
    Codicia,
    Desliz,
    Preocupacion,
    Sorpresa,
    Trauma,
    Artista,
    Afouteza,
    Decepcion,
    Presumido,
    Enfado,
    Alteza,
    Cabalo,
    Carlista,
    Pirata,
    Dereita,
    Esquerda,
}

impl MaskKind {
    pub const ALL: [MaskKind; 24] = [
        MaskKind::Felicidad,
        MaskKind::Tristeza,
        MaskKind::Ira,
        MaskKind::Conspirador,
        MaskKind::Cinismo,
        MaskKind::Soldado,
        MaskKind::Bruto,
        MaskKind::Borracho,
        MaskKind::Codicia,
        MaskKind::Desliz,
        MaskKind::Preocupacion,
        MaskKind::Sorpresa,
        MaskKind::Trauma,
        MaskKind::Artista,
        MaskKind::Afouteza,
        MaskKind::Decepcion,
        MaskKind::Presumido,
        MaskKind::Enfado,
        MaskKind::Alteza,
        MaskKind::Cabalo,
        MaskKind::Carlista,
        MaskKind::Pirata,
        MaskKind::Dereita,
        MaskKind::Esquerda,
    ];

    pub fn id(self) -> &'static str {
        match self {
            MaskKind::Felicidad => "felicidad",
            MaskKind::Tristeza => "tristeza",
            MaskKind::Ira => "ira",
            MaskKind::Conspirador => "conspirador",
            MaskKind::Cinismo => "cinismo",
            MaskKind::Soldado => "soldado",
            MaskKind::Bruto => "bruto",
            MaskKind::Borracho => "borracho",
            MaskKind::Codicia => "codicia",
            MaskKind::Desliz => "desliz",
            MaskKind::Preocupacion => "preocupacion",
            MaskKind::Sorpresa => "sorpresa",
            MaskKind::Trauma => "trauma",
            MaskKind::Artista => "artista",
            MaskKind::Afouteza => "afouteza",
            MaskKind::Decepcion => "decepcion",
            MaskKind::Presumido => "presumido",
            MaskKind::Enfado => "enfado",
            MaskKind::Alteza => "alteza",
            MaskKind::Cabalo => "cabalo",
            MaskKind::Carlista => "carlista",
            MaskKind::Pirata => "pirata",
            MaskKind::Dereita => "dereita",
            MaskKind::Esquerda => "esquerda",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            MaskKind::Felicidad => "FELICIDAD",
            MaskKind::Tristeza => "TRISTEZA",
            MaskKind::Ira => "IRA",
            MaskKind::Conspirador => "CONSPIRADOR",
            MaskKind::Cinismo => "CINISMO",
            MaskKind::Soldado => "SOLDADO",
            MaskKind::Bruto => "BRUTO",
            MaskKind::Borracho => "BORRACHO",
            MaskKind::Codicia => "CODICIA",
            MaskKind::Desliz => "DESLIZ",
            MaskKind::Preocupacion => "PREOCUPACIÓN",
            MaskKind::Sorpresa => "SORPRESA",
            MaskKind::Trauma => "TRAUMA",
            MaskKind::Artista => "ARTISTA",
            MaskKind::Afouteza => "AFOUTEZA",
            MaskKind::Decepcion => "DECEPCIÓN",
            MaskKind::Presumido => "PRESUMIDO",
            MaskKind::Enfado => "ENFADO",
            MaskKind::Alteza => "ALTEZA",
            MaskKind::Cabalo => "CABALO",
            MaskKind::Carlista => "CARLISTA",
            MaskKind::Pirata => "PIRATA",
            MaskKind::Dereita => "DEREITA",
            MaskKind::Esquerda => "ESQUERDA",
        }
    }

    // Tooltip text, shown once the kind has been unlocked.
    pub fn rule_text(self) -> &'static str {
        match self {
            MaskKind::Felicidad => "Vence con una carta de mayor valor.",
            MaskKind::Tristeza => "Vence con una carta de menor valor.",
            MaskKind::Ira => "Vence igualando el valor de su carta.",
            MaskKind::Conspirador => "Vence con una carta del mismo palo.",
            MaskKind::Cinismo => "Vence con distinto valor y distinto palo.",
            MaskKind::Soldado => "Vence con cualquier espada.",
            MaskKind::Bruto => "Vence con cualquier basto.",
            MaskKind::Borracho => "Vence con cualquier copa.",
            MaskKind::Codicia => "Vence con cualquier oro.",
            MaskKind::Desliz => "Vence si la paridad no coincide.",
            MaskKind::Preocupacion => "Vence con igual paridad e igual palo.",
            MaskKind::Sorpresa => "Vence si la suma o la diferencia ajustada es siete.",
            MaskKind::Trauma => "Vence a un paso del valor. Si pierdes, todo desciende.",
            MaskKind::Artista => "Vence exactamente a un paso del valor.",
            MaskKind::Afouteza => "Vence igualando las máscaras activas.",
            MaskKind::Decepcion => "Vence con la carta más baja de tu mano.",
            MaskKind::Presumido => "Vence con la carta más alta de tu mano.",
            MaskKind::Enfado => "Vence igualando tus fracasos del nivel.",
            MaskKind::Alteza => "Solo se inclina ante el rey.",
            MaskKind::Cabalo => "Solo se inclina ante el caballo.",
            MaskKind::Carlista => "Solo se inclina ante la sota.",
            MaskKind::Pirata => "Vence con copas u oros de mayor valor.",
            MaskKind::Dereita => "Delega en la máscara de su derecha.",
            MaskKind::Esquerda => "Delega en la máscara de su izquierda.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn all_kinds_have_distinct_ids() {
        let mut ids = BTreeSet::new();
        for kind in MaskKind::ALL {
            assert!(ids.insert(kind.id()), "duplicate id for {kind:?}");
        }
        assert_eq!(ids.len(), MaskKind::ALL.len());
    }

    #[test]
    fn every_kind_carries_display_and_rule_text() {
        for kind in MaskKind::ALL {
            assert!(!kind.display_name().is_empty());
            assert!(!kind.rule_text().is_empty());
        }
    }
}
