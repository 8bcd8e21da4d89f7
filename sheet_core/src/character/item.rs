//! Items carried by a character

use super::lenient;
use crate::types::{ArmourLocation, PerLocation};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Anything owned by a character: gear, talents, aptitudes, powers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    /// Carried weight; missing or unreadable weight counts as 0
    #[serde(default, deserialize_with = "lenient::number")]
    pub weight: f64,
    #[serde(flatten)]
    pub kind: ItemKind,
}

/// What an item is, with the data each kind carries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ItemKind {
    /// An aptitude; the item name is the aptitude
    Aptitude,
    Talent(Talent),
    PsychicPower(PsychicPower),
    Armour(Armour),
    /// Weapons, tools, drugs and other gear that only contribute weight
    #[serde(other)]
    Gear,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Talent {
    #[serde(deserialize_with = "lenient::int")]
    pub tier: i32,
    #[serde(deserialize_with = "lenient::string_set")]
    pub aptitudes: BTreeSet<String>,
    #[serde(deserialize_with = "lenient::flag")]
    pub starter: bool,
    #[serde(deserialize_with = "lenient::int")]
    pub cost: i32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PsychicPower {
    #[serde(deserialize_with = "lenient::int")]
    pub cost: i32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Armour {
    /// Armour points per location
    #[serde(deserialize_with = "lenient::location_values")]
    pub part: PerLocation<i32>,
    /// Stacks on top of the best worn armour instead of competing with it
    #[serde(alias = "isAdditive", deserialize_with = "lenient::flag")]
    pub additive: bool,
}

impl Item {
    /// Plain gear that only has weight
    pub fn gear(name: impl Into<String>, weight: f64) -> Self {
        Item {
            name: name.into(),
            weight,
            kind: ItemKind::Gear,
        }
    }

    pub fn aptitude(name: impl Into<String>) -> Self {
        Item {
            name: name.into(),
            weight: 0.0,
            kind: ItemKind::Aptitude,
        }
    }

    pub fn talent(name: impl Into<String>, talent: Talent) -> Self {
        Item {
            name: name.into(),
            weight: 0.0,
            kind: ItemKind::Talent(talent),
        }
    }

    pub fn psychic_power(name: impl Into<String>, cost: i32) -> Self {
        Item {
            name: name.into(),
            weight: 0.0,
            kind: ItemKind::PsychicPower(PsychicPower { cost }),
        }
    }

    /// Armour covering the given locations with the same value
    pub fn armour(
        name: impl Into<String>,
        value: i32,
        locations: &[ArmourLocation],
        additive: bool,
    ) -> Self {
        let part = PerLocation::from_fn(|loc| if locations.contains(&loc) { value } else { 0 });
        Item {
            name: name.into(),
            weight: 0.0,
            kind: ItemKind::Armour(Armour { part, additive }),
        }
    }

    /// Set the weight (builder style)
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn is_aptitude(&self) -> bool {
        matches!(self.kind, ItemKind::Aptitude)
    }

    pub fn as_talent(&self) -> Option<&Talent> {
        match &self.kind {
            ItemKind::Talent(talent) => Some(talent),
            _ => None,
        }
    }

    pub fn as_armour(&self) -> Option<&Armour> {
        match &self.kind {
            ItemKind::Armour(armour) => Some(armour),
            _ => None,
        }
    }

    pub fn as_psychic_power(&self) -> Option<&PsychicPower> {
        match &self.kind {
            ItemKind::PsychicPower(power) => Some(power),
            _ => None,
        }
    }
}
