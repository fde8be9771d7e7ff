//! Textual-consistency pass: what the answer *says* happened wins over the
//! booleans the model emitted next to it.
//!
//! The answer is split into clauses. Within a clause every mention of a device
//! is paired with the nearest confirmation word ("encendí", "apagadas",
//! "opened", "off", …); on a tie the word before the mention wins. A
//! confirmation preceded closely by a negation is ignored, as are clauses
//! inside a question. When a device is confirmed several times the last
//! confirmation counts.

use crate::device::{DeviceKind, DeviceState};
use crate::interpreter::vocabulary;
use crate::text::{Tokens, normalize};

const ON_CONFIRMATIONS: &[&str] = &[
    "encendido",
    "encendida",
    "encendidos",
    "encendidas",
    "encendi",
    "enciendo",
    "prendido",
    "prendida",
    "prendidos",
    "prendidas",
    "prendi",
    "prendo",
    "activado",
    "activada",
    "activados",
    "activadas",
    "active",
    "on",
    "activated",
    "enabled",
];

const OFF_CONFIRMATIONS: &[&str] = &[
    "apagado",
    "apagada",
    "apagados",
    "apagadas",
    "apague",
    "apago",
    "desactivado",
    "desactivada",
    "desactivados",
    "desactivadas",
    "desactive",
    "off",
    "deactivated",
    "disabled",
];

const OPEN_CONFIRMATIONS: &[&str] = &[
    "abierta",
    "abiertas",
    "abierto",
    "abiertos",
    "abri",
    "abro",
    "subi",
    "subo",
    "subida",
    "subidas",
    "levantada",
    "levantadas",
    "levante",
    "open",
    "opened",
    "raised",
];

const CLOSE_CONFIRMATIONS: &[&str] = &[
    "cerrada",
    "cerradas",
    "cerrado",
    "cerrados",
    "cerre",
    "cierro",
    "baje",
    "bajada",
    "bajadas",
    "closed",
    "shut",
    "lowered",
];

const NEGATIONS: &[&str] = &[
    "no", "ni", "nunca", "not", "never", "didn", "don", "doesn", "isn", "aren", "wasn",
    "weren", "won", "haven", "hasn", "cannot", "t",
];

/// How many tokens before a confirmation a negation still applies.
const NEGATION_WINDOW: usize = 3;

const CLAUSE_BREAKS: &[char] = &['.', ',', ';', ':', '!', '?', '¡', '¿', '\n'];

/// Override every device in `state` that `answer` explicitly confirms.
#[must_use]
pub fn align_with_prose(answer: &str, state: DeviceState) -> DeviceState {
    let mut aligned = state;
    for kind in DeviceKind::ALL {
        if let Some(value) = asserted_state(answer, kind) {
            aligned.set(kind, value);
        }
    }
    aligned
}

/// The last state of `kind` that `answer` confirms, if any.
#[must_use]
pub fn asserted_state(answer: &str, kind: DeviceKind) -> Option<bool> {
    let (engaged, released) = confirmations(kind);
    let nouns = vocabulary::device(kind).nouns;

    let mut last = None;
    for clause in declarative_clauses(&normalize(answer)) {
        let tokens = Tokens::new(clause);
        let mut marks: Vec<(usize, bool)> = tokens
            .positions_of(engaged)
            .into_iter()
            .map(|index| (index, true))
            .chain(tokens.positions_of(released).into_iter().map(|index| (index, false)))
            .filter(|(index, _)| !is_negated(&tokens, *index))
            .collect();
        if marks.is_empty() {
            continue;
        }
        marks.sort_unstable_by_key(|(index, _)| *index);

        for mention in tokens.positions_of(nouns) {
            let nearest = marks
                .iter()
                .min_by_key(|(index, _)| (index.abs_diff(mention), *index > mention));
            if let Some((_, value)) = nearest {
                last = Some(*value);
            }
        }
    }
    last
}

fn confirmations(kind: DeviceKind) -> (&'static [&'static str], &'static [&'static str]) {
    match kind {
        DeviceKind::Fan | DeviceKind::Lights => (ON_CONFIRMATIONS, OFF_CONFIRMATIONS),
        DeviceKind::Blinds => (OPEN_CONFIRMATIONS, CLOSE_CONFIRMATIONS),
    }
}

fn is_negated(tokens: &Tokens, index: usize) -> bool {
    (index.saturating_sub(NEGATION_WINDOW)..index)
        .filter_map(|i| tokens.get(i))
        .any(|token| NEGATIONS.contains(&token))
}

/// Clauses of `text`, skipping those that belong to a question.
fn declarative_clauses(text: &str) -> Vec<&str> {
    let mut clauses = Vec::new();
    let mut in_question = false;
    for segment in text.split_inclusive(CLAUSE_BREAKS) {
        let terminator = segment.chars().last();
        let asks = in_question || terminator == Some('?');
        match terminator {
            Some('¿') => in_question = true,
            Some('?') => in_question = false,
            _ => {}
        }
        if !asks {
            clauses.push(segment);
        }
    }
    clauses
}
