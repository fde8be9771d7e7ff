//! Device state — the three actuators of the smart-space.

use serde::{Deserialize, Serialize};

/// One of the controllable actuators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    Fan,
    Blinds,
    Lights,
}

impl DeviceKind {
    /// Every kind, in the fixed evaluation order used by the interpreter.
    pub const ALL: [Self; 3] = [Self::Fan, Self::Blinds, Self::Lights];
}

impl std::fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fan => f.write_str("fan"),
            Self::Blinds => f.write_str("blinds"),
            Self::Lights => f.write_str("lights"),
        }
    }
}

/// Boolean state vector for fan / blinds / lights.
///
/// `blinds == true` means the blinds are open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeviceState {
    pub fan: bool,
    pub blinds: bool,
    pub lights: bool,
}

impl DeviceState {
    #[must_use]
    pub fn new(fan: bool, blinds: bool, lights: bool) -> Self {
        Self {
            fan,
            blinds,
            lights,
        }
    }

    /// Every device set to `value`.
    #[must_use]
    pub fn all(value: bool) -> Self {
        Self::new(value, value, value)
    }

    #[must_use]
    pub fn get(&self, kind: DeviceKind) -> bool {
        match kind {
            DeviceKind::Fan => self.fan,
            DeviceKind::Blinds => self.blinds,
            DeviceKind::Lights => self.lights,
        }
    }

    pub fn set(&mut self, kind: DeviceKind, value: bool) {
        match kind {
            DeviceKind::Fan => self.fan = value,
            DeviceKind::Blinds => self.blinds = value,
            DeviceKind::Lights => self.lights = value,
        }
    }

    /// Devices whose value differs in `next`, in [`DeviceKind::ALL`] order.
    #[must_use]
    pub fn changes(&self, next: &Self) -> Vec<DeviceChange> {
        DeviceKind::ALL
            .into_iter()
            .filter(|kind| self.get(*kind) != next.get(*kind))
            .map(|kind| DeviceChange {
                kind,
                value: next.get(kind),
            })
            .collect()
    }
}

/// A single device transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceChange {
    pub kind: DeviceKind,
    pub value: bool,
}
