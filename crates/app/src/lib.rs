//! # domus-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** for the external collaborators:
//!   - `Transcriber` — speech to text
//!   - `Synthesizer` — text to speech
//!   - `LanguageModel` — prompt to completion
//!   - `TelemetrySink` — where ingestion adapters push sensor readings
//! - Provide **in-process infrastructure** that doesn't need IO:
//!   - `TelemetryBus` — latest reading plus one delivery queue per client
//!   - `sensor_stream` — per-client event stream with keepalives
//! - Orchestrate a conversation turn (`ConversationService`): transcribe,
//!   interpret, prompt, call the model, reconcile, synthesize
//!
//! ## Dependency rule
//! Depends on `domus-domain` only (plus `tokio::sync` / `tokio::time`).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod prompt;
pub mod sensor_stream;
pub mod services;
pub mod telemetry_bus;
