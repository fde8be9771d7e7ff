//! Word lists recognised by the interpreter.
//!
//! Every entry is already normalized (lowercase, no diacritics). Multi-word
//! entries match consecutive tokens. Spanish is the primary language of the
//! smart-space; English equivalents are accepted alongside.

use crate::device::DeviceKind;

/// Cues that mark an utterance as a question or a request for an opinion.
pub const QUESTION_CUES: &[&str] = &[
    "deberia",
    "debo",
    "puedo",
    "podria",
    "recomiendas",
    "recomienda",
    "recomendarias",
    "crees que",
    "cree que",
    "piensas que",
    "opinas",
    "que hago",
    "que haces",
    "conviene",
    "mejor",
    "peor",
    "sugieres",
    "aconsejas",
    "es buena idea",
    "es mala idea",
    "esta bien",
    "como ves",
    "que te parece",
    "necesito",
    "hace falta",
    "tendria que",
    "should",
    "do you think",
    "what do you think",
    "recommend",
    "suggest",
    "advise",
    "good idea",
    "bad idea",
    "better",
    "worse",
    "is it ok",
    "how about",
];

/// Conditional phrasing that turns an opinion cue back into a command
/// ("if you think it's hot, turn on the fan").
pub const CONDITIONAL_CUES: &[&str] = &[
    "si crees",
    "si piensas",
    "si te parece",
    "si consideras",
    "if you think",
    "if you feel",
    "if you consider",
];

/// Canonical "everything off" phrasing.
pub const ALL_OFF_PHRASES: &[&str] = &[
    "apaga todo",
    "apagar todo",
    "desactiva todo",
    "apagalo todo",
    "apagame todo",
    "todo apagado",
    "everything off",
    "off everything",
];

/// Canonical "everything on" phrasing.
pub const ALL_ON_PHRASES: &[&str] = &[
    "enciende todo",
    "prende todo",
    "activa todo",
    "encender todo",
    "prender todo",
    "todo encendido",
    "todo prendido",
    "everything on",
    "on everything",
];

/// Explicit "all" quantifiers for the inferred bulk rule.
pub const ALL_QUANTIFIERS: &[&str] = &["todo", "todos", "todas", "all", "every"];

/// Markers introducing devices to leave out of a bulk action.
pub const EXCEPTION_MARKERS: &[&str] = &[
    "menos",
    "excepto",
    "salvo",
    "sin",
    "pero no",
    "except",
    "but not",
    "without",
    "apart from",
    "other than",
];

pub const ON_VERBS: &[&str] = &[
    "enciende",
    "encienda",
    "enciendan",
    "encender",
    "encendeme",
    "prende",
    "prenda",
    "prendan",
    "prender",
    "prendeme",
    "activa",
    "activar",
    "on",
    "activate",
    "enable",
    "start",
];

pub const OFF_VERBS: &[&str] = &[
    "apaga",
    "apague",
    "apaguen",
    "apagar",
    "apagame",
    "apagalo",
    "desactiva",
    "desactivar",
    "off",
    "deactivate",
    "disable",
    "stop",
];

pub const OPEN_VERBS: &[&str] = &[
    "abre",
    "abrir",
    "abrime",
    "abreme",
    "sube",
    "subir",
    "subeme",
    "levanta",
    "levantar",
    "open",
    "raise",
    "lift",
    "up",
];

pub const CLOSE_VERBS: &[&str] = &[
    "cierra",
    "cerrar",
    "cierrame",
    "baja",
    "bajar",
    "bajame",
    "close",
    "shut",
    "lower",
    "down",
];

const FAN_NOUNS: &[&str] = &[
    "ventilador",
    "ventiladores",
    "abanico",
    "abanicos",
    "aire",
    "fan",
    "fans",
];

const BLINDS_NOUNS: &[&str] = &[
    "persiana",
    "persianas",
    "cortina",
    "cortinas",
    "ventana",
    "ventanas",
    "blind",
    "blinds",
    "curtain",
    "curtains",
    "shade",
    "shades",
    "shutter",
    "shutters",
    "window",
    "windows",
];

const LIGHTS_NOUNS: &[&str] = &[
    "luz",
    "luces",
    "foco",
    "focos",
    "bombilla",
    "bombillas",
    "lampara",
    "lamparas",
    "iluminacion",
    "light",
    "lights",
    "lamp",
    "lamps",
    "bulb",
    "bulbs",
    "lighting",
];

/// Names and verb groups for one device category.
#[derive(Debug)]
pub struct DeviceVocabulary {
    /// Words naming the device.
    pub nouns: &'static [&'static str],
    /// Verb groups that set the device to `true` (on / open).
    pub engage: &'static [&'static [&'static str]],
    /// Verb groups that set the device to `false` (off / closed).
    pub release: &'static [&'static [&'static str]],
}

static FAN: DeviceVocabulary = DeviceVocabulary {
    nouns: FAN_NOUNS,
    engage: &[ON_VERBS],
    release: &[OFF_VERBS],
};

static BLINDS: DeviceVocabulary = DeviceVocabulary {
    nouns: BLINDS_NOUNS,
    engage: &[OPEN_VERBS],
    release: &[CLOSE_VERBS, OFF_VERBS],
};

static LIGHTS: DeviceVocabulary = DeviceVocabulary {
    nouns: LIGHTS_NOUNS,
    engage: &[ON_VERBS],
    release: &[OFF_VERBS],
};

/// Vocabulary for `kind`.
#[must_use]
pub fn device(kind: DeviceKind) -> &'static DeviceVocabulary {
    match kind {
        DeviceKind::Fan => &FAN,
        DeviceKind::Blinds => &BLINDS,
        DeviceKind::Lights => &LIGHTS,
    }
}
