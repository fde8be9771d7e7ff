//! Port definitions — traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside world.
//! They are defined here (in `app`) so that both the use-case layer and the
//! adapter layer can depend on them without creating circular dependencies.

pub mod language_model;
pub mod speech;
pub mod telemetry;

pub use language_model::LanguageModel;
pub use speech::{Synthesizer, Transcriber};
pub use telemetry::TelemetrySink;
