//! DamageOutcome - wound state and audit log after a damage fold

use crate::character::lenient;
use serde::{Deserialize, Serialize};

/// Wounds taken so far
///
/// `value` counts up from 0 to `max`; anything past `max` lands in
/// `critical`, which has no upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WoundState {
    #[serde(deserialize_with = "lenient::int")]
    pub value: i32,
    #[serde(deserialize_with = "lenient::int")]
    pub critical: i32,
    #[serde(deserialize_with = "lenient::int")]
    pub max: i32,
}

impl WoundState {
    /// Unhurt with the given maximum
    pub fn new(max: i32) -> Self {
        WoundState {
            value: 0,
            critical: 0,
            max,
        }
    }

    /// Set wounds already taken (builder style)
    pub fn with_value(mut self, value: i32) -> Self {
        self.value = value;
        self
    }

    pub fn is_at_max(&self) -> bool {
        self.value >= self.max
    }

    /// Ordinary wounds left before hits turn critical
    pub fn remaining(&self) -> i32 {
        self.max.saturating_sub(self.value).max(0)
    }
}

/// Which counter a log line went to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageSource {
    #[serde(rename = "Wounds")]
    Wounds,
    #[serde(rename = "Critical")]
    Critical,
    /// Righteous fury roll, recorded for the host but not added to any counter
    #[serde(rename = "Critical Effect (RF)")]
    CriticalEffect,
}

impl DamageSource {
    pub fn label(self) -> &'static str {
        match self {
            DamageSource::Wounds => "Wounds",
            DamageSource::Critical => "Critical",
            DamageSource::CriticalEffect => "Critical Effect (RF)",
        }
    }
}

/// One line of the damage log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DamageLogEntry {
    pub amount: i32,
    pub source: DamageSource,
    /// Location as the event named it
    pub location: String,
    pub damage_type: String,
}

/// Result of folding damage events into a wound state
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DamageOutcome {
    pub wounds: WoundState,
    pub log: Vec<DamageLogEntry>,
}

impl DamageOutcome {
    fn total_for(&self, source: DamageSource) -> i32 {
        self.log
            .iter()
            .filter(|entry| entry.source == source)
            .fold(0i32, |total, entry| total.saturating_add(entry.amount))
    }

    /// Ordinary wounds added across all events
    pub fn wounds_dealt(&self) -> i32 {
        self.total_for(DamageSource::Wounds)
    }

    /// Critical wounds added across all events
    pub fn critical_dealt(&self) -> i32 {
        self.total_for(DamageSource::Critical)
    }

    /// Righteous fury entries, for the host to resolve
    pub fn critical_effects(&self) -> impl Iterator<Item = &DamageLogEntry> {
        self.log
            .iter()
            .filter(|entry| entry.source == DamageSource::CriticalEffect)
    }

    /// Get a summary string
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();

        let wounds = self.wounds_dealt();
        if wounds > 0 {
            parts.push(format!("{} wounds", wounds));
        }

        let critical = self.critical_dealt();
        if critical > 0 {
            parts.push(format!("{} critical", critical));
        }

        let effects = self.critical_effects().count();
        if effects > 0 {
            parts.push(format!("{} critical effect(s)", effects));
        }

        if parts.is_empty() {
            "No damage".to_string()
        } else {
            format!(
                "{} ({}/{} wounds, {} critical)",
                parts.join(", "),
                self.wounds.value,
                self.wounds.max,
                self.wounds.critical
            )
        }
    }
}
