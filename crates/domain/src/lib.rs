//! # domus-domain
//!
//! Pure domain model for the domus voice-controlled smart-space.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **device state** (fan / blinds / lights) and **sensor readings**
//! - Define **utterances** and their **classification**
//! - Interpret natural-language commands into a new device state
//!   ([`interpreter`])
//! - Validate and correct a language model's structured answer
//!   ([`reconcile`])
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod device;
pub mod interpreter;
pub mod reconcile;
pub mod sensor;
pub mod text;
pub mod utterance;
