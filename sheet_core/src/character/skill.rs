//! Skills and specialities

use super::lenient;
use crate::types::SkillRank;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Advance of a skill nobody has trained
pub const UNTRAINED_ADVANCE: i32 = -20;

/// A skill, optionally split into specialities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Skill {
    /// Governing characteristic short codes; the first one is used
    #[serde(deserialize_with = "lenient::string_list")]
    pub characteristics: Vec<String>,
    #[serde(deserialize_with = "lenient::int")]
    pub advance: i32,
    #[serde(deserialize_with = "lenient::flag")]
    pub is_specialist: bool,
    #[serde(deserialize_with = "lenient::skip_invalid_entries")]
    pub specialities: BTreeMap<String, Speciality>,
    #[serde(deserialize_with = "lenient::string_set")]
    pub aptitudes: BTreeSet<String>,
    /// Granted at character creation: the first step is free
    #[serde(deserialize_with = "lenient::flag")]
    pub starter: bool,
    #[serde(deserialize_with = "lenient::int")]
    pub cost: i32,

    // === Derived ===
    #[serde(deserialize_with = "lenient::int")]
    pub total: i32,
    #[serde(deserialize_with = "lenient::record_or_default")]
    pub rank: SkillRank,
}

impl Default for Skill {
    fn default() -> Self {
        Skill {
            characteristics: Vec::new(),
            advance: UNTRAINED_ADVANCE,
            is_specialist: false,
            specialities: BTreeMap::new(),
            aptitudes: BTreeSet::new(),
            starter: false,
            cost: 0,
            total: 0,
            rank: SkillRank::Untrained,
        }
    }
}

impl Skill {
    /// Create a plain skill governed by one characteristic
    pub fn new(characteristic: impl Into<String>, advance: i32) -> Self {
        Skill {
            characteristics: vec![characteristic.into()],
            advance,
            ..Default::default()
        }
    }

    /// Create a specialist skill with no specialities yet
    pub fn specialist(characteristic: impl Into<String>) -> Self {
        Skill {
            is_specialist: true,
            ..Skill::new(characteristic, UNTRAINED_ADVANCE)
        }
    }

    /// Add a speciality (builder style)
    pub fn with_speciality(mut self, name: impl Into<String>, speciality: Speciality) -> Self {
        self.specialities.insert(name.into(), speciality);
        self
    }

    /// Add an aptitude (builder style)
    pub fn with_aptitude(mut self, aptitude: impl Into<String>) -> Self {
        self.aptitudes.insert(aptitude.into());
        self
    }

    /// Short code of the governing characteristic, empty when none is set
    pub fn governing_characteristic(&self) -> &str {
        self.characteristics.first().map(String::as_str).unwrap_or("")
    }
}

/// One field of a specialist skill (e.g. Common Lore (Imperium))
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Speciality {
    #[serde(deserialize_with = "lenient::int")]
    pub advance: i32,
    #[serde(deserialize_with = "lenient::flag")]
    pub starter: bool,
    #[serde(deserialize_with = "lenient::int")]
    pub cost: i32,

    // === Derived ===
    #[serde(deserialize_with = "lenient::int")]
    pub total: i32,
    #[serde(deserialize_with = "lenient::flag")]
    pub is_known: bool,
    #[serde(deserialize_with = "lenient::record_or_default")]
    pub rank: SkillRank,
}

impl Default for Speciality {
    fn default() -> Self {
        Speciality {
            advance: UNTRAINED_ADVANCE,
            starter: false,
            cost: 0,
            total: 0,
            is_known: false,
            rank: SkillRank::Untrained,
        }
    }
}

impl Speciality {
    pub fn new(advance: i32) -> Self {
        Speciality {
            advance,
            ..Default::default()
        }
    }
}
