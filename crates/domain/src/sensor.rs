//! Sensor readings published by the smart-space controller.

use serde::{Deserialize, Serialize};

use crate::device::DeviceState;

/// One telemetry sample: ambient measurements plus the actuator state the
/// controller reports.
///
/// Immutable once produced by ingestion. Deserialization also accepts the
/// Spanish field names used by the controller firmware.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    /// Ambient temperature in °C.
    #[serde(alias = "temperatura")]
    pub temperature: f64,
    /// Relative humidity in %.
    #[serde(alias = "humedad")]
    pub humidity: f64,
    /// Ambient light level in %.
    #[serde(alias = "luz")]
    pub light: f64,
    #[serde(alias = "ventilador")]
    pub fan: bool,
    #[serde(alias = "persianas")]
    pub blinds: bool,
    #[serde(alias = "bulbs")]
    pub lights: bool,
}

impl SensorReading {
    /// All-zero / all-off reading returned by snapshot queries before the
    /// first ingest.
    #[must_use]
    pub fn zeroed() -> Self {
        Self {
            temperature: 0.0,
            humidity: 0.0,
            light: 0.0,
            fan: false,
            blinds: false,
            lights: false,
        }
    }

    /// Neutral context used for conversations before the first ingest.
    #[must_use]
    pub fn conversation_defaults() -> Self {
        Self {
            temperature: 20.0,
            humidity: 20.0,
            light: 20.0,
            fan: true,
            blinds: true,
            lights: true,
        }
    }

    /// The actuator part of the reading.
    #[must_use]
    pub fn device_state(&self) -> DeviceState {
        DeviceState::new(self.fan, self.blinds, self.lights)
    }
}
