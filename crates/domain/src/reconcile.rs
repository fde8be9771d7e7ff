//! Reconciliation of a language model's structured answer.
//!
//! The model is asked to reply with `{"answer": …, "fan": …, "blinds": …,
//! "lights": …}` but small local models regularly wrap the object in code
//! fences, reply with a bare string, drop fields or use the wrong types.
//! [`reconcile`] turns whatever came back into a [`ReconciledResponse`]
//! without ever failing:
//!
//! 1. strip code fences and prose around a single JSON object;
//! 2. a bare JSON string becomes the answer, with the declared device state;
//! 3. device fields that are missing or mistyped keep the declared value;
//! 4. explicit confirmations in the answer text override the booleans
//!    (see [`prose`]);
//! 5. anything undecodable yields [`FALLBACK_ANSWER`] and the declared state.

pub mod prose;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::device::DeviceState;

/// Answer used when the model output cannot be decoded at all.
pub const FALLBACK_ANSWER: &str =
    "Lo siento, no pude procesar tu solicitud. ¿Puedes repetirla, por favor?";

/// Validated output of one conversation turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciledResponse {
    pub answer: String,
    #[serde(flatten)]
    pub state: DeviceState,
}

impl ReconciledResponse {
    /// Fail-safe response: fixed apology, state untouched.
    #[must_use]
    pub fn fallback(current: DeviceState) -> Self {
        Self {
            answer: FALLBACK_ANSWER.to_string(),
            state: current,
        }
    }

    /// Whether this is the fail-safe response.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.answer == FALLBACK_ANSWER
    }
}

/// Structured record as emitted by the model. Every field is optional and a
/// value of the wrong type decodes as `None`.
#[derive(Debug, Deserialize)]
struct ModelTurn {
    #[serde(default, deserialize_with = "lenient")]
    answer: Option<String>,
    #[serde(default, alias = "ventilador", deserialize_with = "lenient")]
    fan: Option<bool>,
    #[serde(default, alias = "persianas", deserialize_with = "lenient")]
    blinds: Option<bool>,
    #[serde(default, alias = "bulbs", deserialize_with = "lenient")]
    lights: Option<bool>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Validate and correct `raw` model output against the declared `current`
/// state.
#[must_use]
pub fn reconcile(raw: &str, current: DeviceState) -> ReconciledResponse {
    let Some(decoded) = decode(strip_decoration(raw), current) else {
        return ReconciledResponse::fallback(current);
    };
    let state = prose::align_with_prose(&decoded.answer, decoded.state);
    ReconciledResponse {
        answer: decoded.answer,
        state,
    }
}

/// Remove a surrounding code fence (with optional info string) and trim.
fn strip_decoration(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = match rest.split_once('\n') {
        Some((_, body)) => body,
        None => rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric()),
    };
    body.find("```").map_or(body, |end| &body[..end]).trim()
}

fn decode(payload: &str, current: DeviceState) -> Option<ReconciledResponse> {
    let value = serde_json::from_str::<serde_json::Value>(payload)
        .ok()
        .or_else(|| embedded_object(payload))?;

    let turn = match value {
        serde_json::Value::String(answer) => ModelTurn {
            answer: Some(answer),
            fan: None,
            blinds: None,
            lights: None,
        },
        value @ serde_json::Value::Object(_) => serde_json::from_value(value).ok()?,
        _ => return None,
    };

    let answer = turn.answer.filter(|answer| !answer.trim().is_empty())?;
    Some(ReconciledResponse {
        answer,
        state: DeviceState {
            fan: turn.fan.unwrap_or(current.fan),
            blinds: turn.blinds.unwrap_or(current.blinds),
            lights: turn.lights.unwrap_or(current.lights),
        },
    })
}

/// The object between the first `{` and the last `}`, for replies that add
/// prose around the JSON.
fn embedded_object(payload: &str) -> Option<serde_json::Value> {
    let start = payload.find('{')?;
    let end = payload.rfind('}')?;
    if end <= start {
        return None;
    }
    serde_json::from_str::<serde_json::Value>(&payload[start..=end])
        .ok()
        .filter(serde_json::Value::is_object)
}
