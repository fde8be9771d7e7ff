//! # domus-adapter-mqtt
//!
//! MQTT adapter — the ingestion side of the telemetry bus.
//!
//! ## Responsibilities
//! - Connect to an MQTT broker and keep reconnecting when the link drops
//! - Subscribe to the telemetry topic (default `data`)
//! - Decode each payload into a [`SensorReading`](domus_domain::sensor::SensorReading)
//!   and hand it to a [`TelemetrySink`](domus_app::ports::TelemetrySink)
//!
//! Malformed payloads are logged and skipped; they never stop ingestion.
//!
//! ## Dependency rule
//! Same as other adapters: depends on `domus-app` and `domus-domain`.

pub mod config;
pub mod error;
pub mod subscriber;

pub use config::MqttConfig;
pub use error::MqttError;
pub use subscriber::MqttSubscriber;
