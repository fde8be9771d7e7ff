//! Prompt construction for the language model.
//!
//! The prompt is written in Spanish, the language the assistant speaks.

use chrono::{DateTime, FixedOffset};

use domus_domain::device::{DeviceKind, DeviceState};
use domus_domain::interpreter::Interpretation;
use domus_domain::sensor::SensorReading;
use domus_domain::utterance::{Classification, Utterance};

/// A chat-style prompt: persona instructions plus the user turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

/// Everything the prompt is built from.
#[derive(Debug, Clone, Copy)]
pub struct PromptContext<'a> {
    pub assistant_name: &'a str,
    pub utterance: &'a Utterance,
    pub interpretation: &'a Interpretation,
    /// State before the turn.
    pub current: DeviceState,
    pub readings: &'a SensorReading,
    pub now: DateTime<FixedOffset>,
}

impl Prompt {
    #[must_use]
    pub fn build(context: &PromptContext<'_>) -> Self {
        Self {
            system: system_message(context.assistant_name),
            user: user_message(context),
        }
    }
}

fn system_message(assistant_name: &str) -> String {
    format!(
        "Eres un asistente de hogar inteligente en español llamado {assistant_name}. \
         Responde de forma natural, breve, amigable y conversacional. \
         NO uses emojis porque tu respuesta será convertida a voz.\n\
         Responde SIEMPRE con un único objeto JSON con las claves \"answer\" (tu respuesta), \
         \"fan\", \"blinds\" y \"lights\" (booleanos con el estado final del ventilador, \
         las persianas y las luces)."
    )
}

fn user_message(context: &PromptContext<'_>) -> String {
    let intended = context.interpretation.state;
    let readings = context.readings;
    format!(
        "INFORMACIÓN ACTUAL:\n\
         Hora: {time}\n\
         Fecha: {date}\n\
         Temperatura: {temperature}°C\n\
         Humedad: {humidity}%\n\
         Luz ambiente: {light}%\n\
         \n\
         ESTADOS DE LOS DISPOSITIVOS:\n\
         Ventilador: {fan}\n\
         Persianas: {blinds}\n\
         Luces: {lights}\n\
         \n\
         SOLICITUD DEL USUARIO: {utterance}\n\
         \n\
         CONTEXTO: {hint}",
        time = context.now.format("%H:%M"),
        date = context.now.format("%d/%m/%Y"),
        temperature = readings.temperature,
        humidity = readings.humidity,
        light = readings.light,
        fan = describe(DeviceKind::Fan, intended.fan),
        blinds = describe(DeviceKind::Blinds, intended.blinds),
        lights = describe(DeviceKind::Lights, intended.lights),
        utterance = context.utterance,
        hint = hint(context.interpretation.classification, context.current, intended),
    )
}

fn describe(kind: DeviceKind, value: bool) -> &'static str {
    match (kind, value) {
        (DeviceKind::Fan, true) => "encendido",
        (DeviceKind::Fan, false) => "apagado",
        (DeviceKind::Blinds, true) => "abiertas",
        (DeviceKind::Blinds, false) => "cerradas",
        (DeviceKind::Lights, true) => "encendidas",
        (DeviceKind::Lights, false) => "apagadas",
    }
}

fn noun(kind: DeviceKind) -> &'static str {
    match kind {
        DeviceKind::Fan => "ventilador",
        DeviceKind::Blinds => "persianas",
        DeviceKind::Lights => "luces",
    }
}

fn hint(classification: Classification, current: DeviceState, intended: DeviceState) -> String {
    if classification == Classification::Question {
        return "El usuario está haciendo una PREGUNTA. Responde con tu recomendación u \
                opinión basada en las condiciones actuales y no cambies ningún dispositivo."
            .to_string();
    }
    let changes = current.changes(&intended);
    if changes.is_empty() {
        return "No se han realizado cambios en los dispositivos. Responde apropiadamente."
            .to_string();
    }
    let summary = changes
        .iter()
        .map(|change| format!("{} {}", noun(change.kind), describe(change.kind, change.value)))
        .collect::<Vec<_>>()
        .join(", ");
    format!("Se han realizado los siguientes cambios: {summary}. Confirma las acciones de forma natural.")
}
