//! Command interpreter — maps an utterance and the current device state to
//! the state the user intends.
//!
//! Interpretation is deterministic and never fails. Rules are evaluated in a
//! fixed order:
//!
//! | # | Rule | Effect |
//! |---|------|--------|
//! | 1 | explicit "everything off" phrase | every device `false` |
//! | 2 | explicit "everything on" phrase | every device `true` |
//! | 3 | on or off verb (not both) + ≥2 device categories + "all" quantifier | every device `false` for an off verb, `true` for an on verb |
//! | 4 | per-device verbs (only when 1–3 did not match) | per command clause, engage group sets `true`, then release group sets `false` |
//!
//! After a bulk rule (1–3) matched, devices first named *after* an exception
//! marker ("menos", "except", …) revert to their previous value.
//!
//! Rule 4 first splits the utterance into command clauses: a new clause
//! starts at a verb once the current clause already holds a verb and a device
//! name, so "enciende las luces y apaga el ventilador" is two clauses. Within
//! a clause the release group is evaluated after the engage group, so when
//! both are present for the same device it ends up off / closed. For blinds
//! the release group is the close verbs plus the generic off verbs.

pub mod vocabulary;

use crate::device::{DeviceKind, DeviceState};
use crate::text::Tokens;
use crate::utterance::{Classification, Utterance};

use vocabulary::{
    ALL_OFF_PHRASES, ALL_ON_PHRASES, ALL_QUANTIFIERS, CLOSE_VERBS, CONDITIONAL_CUES,
    EXCEPTION_MARKERS, OFF_VERBS, ON_VERBS, OPEN_VERBS, QUESTION_CUES,
};

/// Result of interpreting one utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interpretation {
    pub classification: Classification,
    /// Intended device state. Equal to the input state for questions.
    pub state: DeviceState,
    /// Name of the rule that decided the state, if any.
    pub rule: Option<&'static str>,
}

/// A bulk rule: returns the value every device should take, if it applies.
struct BulkRule {
    name: &'static str,
    apply: fn(&Tokens) -> Option<bool>,
}

const BULK_RULES: [BulkRule; 3] = [
    BulkRule {
        name: "all-off",
        apply: explicit_all_off,
    },
    BulkRule {
        name: "all-on",
        apply: explicit_all_on,
    },
    BulkRule {
        name: "inferred-all",
        apply: inferred_all,
    },
];

const PER_DEVICE_RULE: &str = "per-device";

/// Interpret `utterance` against `current`.
#[must_use]
pub fn interpret(utterance: &Utterance, current: DeviceState) -> Interpretation {
    let tokens = Tokens::new(utterance.as_str());
    let conditional = tokens.contains_any(CONDITIONAL_CUES);

    if !conditional && is_question(utterance.as_str(), &tokens) {
        return Interpretation {
            classification: Classification::Question,
            state: current,
            rule: None,
        };
    }

    let (state, rule) = apply_rules(&tokens, current);
    let classification = if conditional || rule.is_some() {
        Classification::Command
    } else {
        Classification::Statement
    };

    Interpretation {
        classification,
        state,
        rule,
    }
}

/// Whether the utterance asks something rather than commanding, ignoring
/// conditional cues.
#[must_use]
pub fn is_question(raw: &str, tokens: &Tokens) -> bool {
    raw.contains('?') || raw.contains('¿') || tokens.contains_any(QUESTION_CUES)
}

fn apply_rules(tokens: &Tokens, current: DeviceState) -> (DeviceState, Option<&'static str>) {
    if tokens.is_empty() {
        return (current, None);
    }
    for rule in &BULK_RULES {
        if let Some(value) = (rule.apply)(tokens) {
            let mut next = DeviceState::all(value);
            carve_out_exceptions(tokens, current, &mut next);
            return (next, Some(rule.name));
        }
    }

    let mut next = current;
    let mut fired = false;
    for clause in command_clauses(tokens) {
        for kind in DeviceKind::ALL {
            let vocab = vocabulary::device(kind);
            if !clause.contains_any(vocab.nouns) {
                continue;
            }
            if vocab.engage.iter().any(|group| clause.contains_any(group)) {
                next.set(kind, true);
                fired = true;
            }
            if vocab.release.iter().any(|group| clause.contains_any(group)) {
                next.set(kind, false);
                fired = true;
            }
        }
    }

    (next, fired.then_some(PER_DEVICE_RULE))
}

/// Split `tokens` where a verb follows a clause that already has both a verb
/// and a device name.
fn command_clauses(tokens: &Tokens) -> Vec<Tokens> {
    let mut verbs: Vec<usize> = [ON_VERBS, OFF_VERBS, OPEN_VERBS, CLOSE_VERBS]
        .into_iter()
        .flat_map(|group| tokens.positions_of(group))
        .collect();
    verbs.sort_unstable();
    verbs.dedup();
    let nouns: Vec<usize> = DeviceKind::ALL
        .into_iter()
        .flat_map(|kind| tokens.positions_of(vocabulary::device(kind).nouns))
        .collect();

    let mut clauses = Vec::new();
    let mut start = 0;
    for &verb in &verbs {
        let within = |position: &usize| (start..verb).contains(position);
        if verbs.iter().any(within) && nouns.iter().any(within) {
            clauses.push(tokens.slice(start..verb));
            start = verb;
        }
    }
    clauses.push(tokens.slice(start..tokens.len()));
    clauses
}

fn explicit_all_off(tokens: &Tokens) -> Option<bool> {
    tokens.contains_any(ALL_OFF_PHRASES).then_some(false)
}

fn explicit_all_on(tokens: &Tokens) -> Option<bool> {
    tokens.contains_any(ALL_ON_PHRASES).then_some(true)
}

fn inferred_all(tokens: &Tokens) -> Option<bool> {
    if !tokens.contains_any(ALL_QUANTIFIERS) {
        return None;
    }
    let off = tokens.contains_any(OFF_VERBS);
    let on = tokens.contains_any(ON_VERBS);
    if off && on {
        return None;
    }
    let mentioned = DeviceKind::ALL
        .into_iter()
        .filter(|kind| tokens.contains_any(vocabulary::device(*kind).nouns))
        .count();
    if mentioned < 2 {
        return None;
    }
    if off {
        Some(false)
    } else if on {
        Some(true)
    } else {
        None
    }
}

/// Restore devices first named after the exception marker.
fn carve_out_exceptions(tokens: &Tokens, current: DeviceState, next: &mut DeviceState) {
    let Some(marker) = tokens.first_of(EXCEPTION_MARKERS) else {
        return;
    };
    for kind in DeviceKind::ALL {
        let first_mention = tokens.first_of(vocabulary::device(kind).nouns);
        if first_mention.is_some_and(|position| position > marker) {
            next.set(kind, current.get(kind));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_STATES: [DeviceState; 8] = [
        DeviceState { fan: false, blinds: false, lights: false },
        DeviceState { fan: false, blinds: false, lights: true },
        DeviceState { fan: false, blinds: true, lights: false },
        DeviceState { fan: false, blinds: true, lights: true },
        DeviceState { fan: true, blinds: false, lights: false },
        DeviceState { fan: true, blinds: false, lights: true },
        DeviceState { fan: true, blinds: true, lights: false },
        DeviceState { fan: true, blinds: true, lights: true },
    ];

    fn run(text: &str, current: DeviceState) -> Interpretation {
        interpret(&Utterance::new(text), current)
    }

    #[test]
    fn should_leave_state_unchanged_when_nothing_matches() {
        for state in ALL_STATES {
            for text in ["hola, buenos días", "tell me a joke", "", "hace calor hoy"] {
                let result = run(text, state);
                assert_eq!(result.state, state, "{text:?}");
                assert_eq!(result.classification, Classification::Statement);
                assert_eq!(result.rule, None);
            }
        }
    }

    #[test]
    fn should_turn_everything_off_from_any_state() {
        for state in ALL_STATES {
            let result = run("turn everything off", state);
            assert_eq!(result.state, DeviceState::all(false));
            assert_eq!(result.classification, Classification::Command);
            assert_eq!(result.rule, Some("all-off"));
        }
    }

    #[test]
    fn should_turn_everything_on_except_blinds() {
        for state in ALL_STATES {
            let result = run("turn everything on except the blinds", state);
            assert_eq!(
                result.state,
                DeviceState::new(true, state.blinds, true),
                "from {state:?}"
            );
        }
    }

    #[test]
    fn should_apply_spanish_all_off_with_exception() {
        let current = DeviceState::new(true, true, true);
        let result = run("Apaga todo menos las luces", current);
        assert_eq!(result.state, DeviceState::new(false, false, true));
    }

    #[test]
    fn should_keep_bulk_effect_for_devices_named_before_exception() {
        let current = DeviceState::new(false, false, false);
        let result = run("enciende todo, el ventilador también, excepto la persiana", current);
        assert_eq!(result.state, DeviceState::new(true, false, true));
    }

    #[test]
    fn should_handle_multi_word_exception_marker() {
        let current = DeviceState::new(true, true, true);
        let result = run("everything off but not the fan", current);
        assert_eq!(result.state, DeviceState::new(true, false, false));
    }

    #[test]
    fn should_infer_all_off_from_quantifier_and_several_devices() {
        let current = DeviceState::new(true, true, true);
        let result = run("apaga todas las luces y los ventiladores", current);
        assert_eq!(result.state, DeviceState::all(false));
        assert_eq!(result.rule, Some("inferred-all"));
    }

    #[test]
    fn should_infer_all_on_with_exception() {
        let current = DeviceState::new(false, false, false);
        let result = run("turn on all the lights and fans without the blinds", current);
        assert_eq!(result.state, DeviceState::new(true, false, true));
    }

    #[test]
    fn should_not_infer_all_for_single_device_category() {
        let current = DeviceState::new(true, true, true);
        let result = run("apaga todas las luces", current);
        assert_eq!(result.state, DeviceState::new(true, true, false));
        assert_eq!(result.rule, Some("per-device"));
    }

    #[test]
    fn should_turn_off_lights_and_fan_only() {
        let current = DeviceState::new(false, true, true);
        let result = run("turn off the lights and the fan", current);
        assert_eq!(result.state, DeviceState::new(false, true, false));
        assert_eq!(result.classification, Classification::Command);
    }

    #[test]
    fn should_turn_on_single_device_in_spanish() {
        let current = DeviceState::new(false, false, false);
        let result = run("Enciende el ventilador", current);
        assert_eq!(result.state, DeviceState::new(true, false, false));
    }

    #[test]
    fn should_open_and_close_blinds() {
        let closed = DeviceState::new(false, false, false);
        assert!(run("abre las persianas", closed).state.blinds);

        let open = DeviceState::new(false, true, false);
        assert!(!run("baja las cortinas", open).state.blinds);
        assert!(!run("close the blinds", open).state.blinds);
    }

    #[test]
    fn should_close_blinds_with_generic_off_verb() {
        let open = DeviceState::new(false, true, false);
        let result = run("apaga las persianas", open);
        assert_eq!(result.state, DeviceState::new(false, false, false));
    }

    #[test]
    fn should_not_open_blinds_with_on_verb() {
        let closed = DeviceState::new(false, false, false);
        let result = run("enciende la persiana", closed);
        assert_eq!(result.state, closed);
        assert_eq!(result.classification, Classification::Statement);
    }

    #[test]
    fn should_let_release_verbs_win_when_both_groups_present() {
        let current = DeviceState::new(false, false, false);
        let result = run("enciende y luego apaga la luz", current);
        assert!(!result.state.lights);

        let current = DeviceState::new(true, true, true);
        let result = run("apaga y enciende la luz", current);
        assert!(!result.state.lights);
    }

    #[test]
    fn should_treat_question_mark_as_question() {
        for state in ALL_STATES {
            let result = run("¿Enciendo el ventilador?", state);
            assert_eq!(result.classification, Classification::Question);
            assert_eq!(result.state, state);
        }
    }

    #[test]
    fn should_treat_opinion_cues_as_question() {
        for text in [
            "crees que debo apagar las luces",
            "should I turn off the fan",
            "me recomiendas abrir las persianas",
            "apaga todo es mejor",
        ] {
            for state in ALL_STATES {
                let result = run(text, state);
                assert_eq!(result.classification, Classification::Question, "{text:?}");
                assert_eq!(result.state, state);
            }
        }
    }

    #[test]
    fn should_force_command_for_conditional_phrasing() {
        let current = DeviceState::new(false, true, true);
        let result = run("si crees que hace calor, enciende el ventilador", current);
        assert_eq!(result.classification, Classification::Command);
        assert_eq!(result.state, DeviceState::new(true, true, true));

        let result = run("if you think it's too dark, turn on the lights?", DeviceState::all(false));
        assert_eq!(result.classification, Classification::Command);
        assert!(result.state.lights);
    }

    #[test]
    fn should_ignore_accents_and_case() {
        let current = DeviceState::new(true, true, true);
        let result = run("APÁGAME la ILUMINACIÓN", current);
        assert_eq!(result.state, DeviceState::new(true, true, false));
    }

    #[test]
    fn should_not_match_device_names_inside_other_words() {
        let current = DeviceState::new(false, false, false);
        let result = run("turn on the fantastic music", current);
        assert_eq!(result.state, current);
    }

    #[test]
    fn should_handle_mixed_devices_in_one_command() {
        let current = DeviceState::new(true, false, true);
        let result = run("apaga el ventilador y sube las persianas", current);
        assert_eq!(result.state, DeviceState::new(false, true, true));

        let result = run("enciende las luces y abre la ventana", DeviceState::all(false));
        assert_eq!(result.state, DeviceState::new(false, true, true));
    }

    #[test]
    fn should_not_infer_all_when_on_and_off_verbs_are_mixed() {
        let current = DeviceState::new(true, true, false);
        for text in [
            "enciende todas las luces y apaga el ventilador",
            "turn on all the lights and turn off the fan",
        ] {
            let result = run(text, current);
            assert_eq!(result.state, DeviceState::new(false, true, true), "{text:?}");
            assert_eq!(result.rule, Some("per-device"), "{text:?}");
        }
    }

    #[test]
    fn should_scope_verbs_to_their_own_clause() {
        let current = DeviceState::new(false, true, true);
        let result = run("apaga las luces y enciende el ventilador", current);
        assert_eq!(result.state, DeviceState::new(true, true, false));

        let result = run("cierra las persianas y prende la luz", DeviceState::all(false));
        assert_eq!(result.state, DeviceState::new(false, false, true));
    }

    #[test]
    fn should_share_verb_across_devices_listed_together() {
        let current = DeviceState::all(true);
        let result = run("apaga las luces y el ventilador", current);
        assert_eq!(result.state, DeviceState::new(false, true, false));
    }
}
