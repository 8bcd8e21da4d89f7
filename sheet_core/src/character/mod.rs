//! Character - the snapshot the host hands in and gets back
//!
//! Input fields are whatever the host stores for a character; derived fields
//! (totals, bonuses, armour, movement, experience spends) are recomputed from
//! scratch by [`crate::deriver::derive`] and are never authoritative.

mod characteristic;
mod item;
pub mod lenient;
mod skill;

pub use characteristic::{bonus_for, find_by_short, Characteristic};
pub use item::{Armour, Item, ItemKind, PsychicPower, Talent};
pub use skill::{Skill, Speciality, UNTRAINED_ADVANCE};

use crate::combat::{apply_damage, DamageEvent, DamageOutcome, WoundState};
use crate::config::SheetSettings;
use crate::defense::ArmourSet;
use regex_lite::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Borrow;
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

/// Keys of the characteristics the deriver reads by name
pub mod keys {
    pub const WEAPON_SKILL: &str = "weaponSkill";
    pub const BALLISTIC_SKILL: &str = "ballisticSkill";
    pub const STRENGTH: &str = "strength";
    pub const TOUGHNESS: &str = "toughness";
    pub const AGILITY: &str = "agility";
    pub const INTELLIGENCE: &str = "intelligence";
    pub const PERCEPTION: &str = "perception";
    pub const WILLPOWER: &str = "willpower";
    pub const FELLOWSHIP: &str = "fellowship";
}

/// Aptitude every character has
pub const GENERAL_APTITUDE: &str = "General";

/// Size of an ordinary human
pub const AVERAGE_SIZE: i32 = 4;

/// Snapshot parsing error
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Failed to parse character JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Look up a key, falling back to the given placeholder
pub fn lookup<'a, K, Q, V>(map: &'a BTreeMap<K, V>, key: &Q, placeholder: &'a V) -> &'a V
where
    K: Borrow<Q> + Ord,
    Q: Ord + ?Sized,
{
    map.get(key).unwrap_or(placeholder)
}

/// Complete character sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Character {
    #[serde(deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(deserialize_with = "lenient::skip_invalid_entries")]
    pub characteristics: BTreeMap<String, Characteristic>,
    #[serde(deserialize_with = "lenient::skip_invalid_entries")]
    pub skills: BTreeMap<String, Skill>,
    #[serde(deserialize_with = "lenient::skip_invalid")]
    pub items: Vec<Item>,
    #[serde(deserialize_with = "lenient::record_or_default")]
    pub initiative: Initiative,
    #[serde(deserialize_with = "lenient::record_or_default")]
    pub wounds: WoundState,
    #[serde(deserialize_with = "lenient::record_or_default")]
    pub fatigue: Fatigue,
    #[serde(deserialize_with = "lenient::record_or_default")]
    pub psy: Psy,
    #[serde(deserialize_with = "lenient::record_or_default")]
    pub experience: Experience,
    #[serde(deserialize_with = "lenient::int")]
    pub insanity: i32,
    #[serde(deserialize_with = "lenient::int")]
    pub corruption: i32,
    #[serde(deserialize_with = "lenient::int")]
    pub size: i32,

    // === Derived ===
    #[serde(deserialize_with = "lenient::int")]
    pub insanity_bonus: i32,
    #[serde(deserialize_with = "lenient::int")]
    pub corruption_bonus: i32,
    #[serde(deserialize_with = "lenient::record_or_default")]
    pub armour: ArmourSet,
    #[serde(deserialize_with = "lenient::record_or_default")]
    pub encumbrance: Encumbrance,
    #[serde(deserialize_with = "lenient::record_or_default")]
    pub movement: Movement,
}

impl Default for Character {
    fn default() -> Self {
        Character {
            name: String::new(),
            characteristics: BTreeMap::new(),
            skills: BTreeMap::new(),
            items: Vec::new(),
            initiative: Initiative::default(),
            wounds: WoundState::default(),
            fatigue: Fatigue::default(),
            psy: Psy::default(),
            experience: Experience::default(),
            insanity: 0,
            corruption: 0,
            size: AVERAGE_SIZE,
            insanity_bonus: 0,
            corruption_bonus: 0,
            armour: ArmourSet::default(),
            encumbrance: Encumbrance::default(),
            movement: Movement::default(),
        }
    }
}

/// Initiative roll inputs; the roll is `1d10 + base + bonus`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Initiative {
    /// Key of the characteristic whose bonus feeds initiative
    #[serde(deserialize_with = "initiative_characteristic")]
    pub characteristic: String,
    #[serde(deserialize_with = "lenient::int")]
    pub base: i32,
    #[serde(deserialize_with = "lenient::int")]
    pub bonus: i32,
}

/// Blank or unreadable initiative keys fall back to agility
fn initiative_characteristic<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(lenient::optional_text(deserializer)?
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
        .unwrap_or_else(|| keys::AGILITY.to_string()))
}

impl Default for Initiative {
    fn default() -> Self {
        Initiative {
            characteristic: keys::AGILITY.to_string(),
            base: 0,
            bonus: 0,
        }
    }
}

impl Initiative {
    /// Flat modifier added to the initiative die
    pub fn roll_modifier(&self) -> i32 {
        self.base.saturating_add(self.bonus)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Fatigue {
    #[serde(deserialize_with = "lenient::int")]
    pub value: i32,
    #[serde(deserialize_with = "lenient::int")]
    pub max: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Psy {
    #[serde(deserialize_with = "lenient::int")]
    pub rating: i32,
    #[serde(deserialize_with = "lenient::int")]
    pub sustained: i32,
    #[serde(deserialize_with = "lenient::int")]
    pub current_rating: i32,
    /// Experience spent on psy rating
    #[serde(deserialize_with = "lenient::int")]
    pub cost: i32,
}

/// Experience earned and where it went
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Experience {
    /// Total earned
    #[serde(deserialize_with = "lenient::int")]
    pub value: i32,
    /// Spent outside the sheet's own accounting (elite advances etc.); null reads as 0
    #[serde(deserialize_with = "lenient::int")]
    pub spent_other: i32,

    // === Derived ===
    #[serde(deserialize_with = "lenient::int")]
    pub spent_characteristics: i32,
    #[serde(deserialize_with = "lenient::int")]
    pub spent_skills: i32,
    #[serde(deserialize_with = "lenient::int")]
    pub spent_talents: i32,
    #[serde(deserialize_with = "lenient::int")]
    pub spent_psychic_powers: i32,
    #[serde(deserialize_with = "lenient::int")]
    pub total_spent: i32,
    #[serde(deserialize_with = "lenient::int")]
    pub remaining: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Encumbrance {
    /// Carried weight
    #[serde(deserialize_with = "lenient::number")]
    pub value: f64,
    /// Carry capacity
    #[serde(deserialize_with = "lenient::number")]
    pub max: f64,
}

impl Encumbrance {
    pub fn is_overloaded(&self) -> bool {
        self.value > self.max
    }
}

/// Movement per action type; may be negative for tiny, slow creatures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Movement {
    #[serde(deserialize_with = "lenient::int")]
    pub half: i32,
    #[serde(deserialize_with = "lenient::int")]
    pub full: i32,
    #[serde(deserialize_with = "lenient::int")]
    pub charge: i32,
    #[serde(deserialize_with = "lenient::int")]
    pub run: i32,
}

impl Character {
    /// Create an empty character with a name
    pub fn new(name: impl Into<String>) -> Self {
        Character {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Parse a host snapshot
    ///
    /// Only malformed JSON is an error. Unreadable fields fall back to their
    /// defaults and a document that is not an object reads as an empty sheet.
    pub fn from_json(json: &str) -> Result<Self, SheetError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Ok(serde_json::from_value(value).unwrap_or_else(|err| {
            tracing::debug!(%err, "snapshot is not a character object, using an empty sheet");
            Character::default()
        }))
    }

    /// Serialize back for the host
    pub fn to_json(&self) -> Result<String, SheetError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Insert a characteristic (builder style)
    pub fn with_characteristic(mut self, key: impl Into<String>, characteristic: Characteristic) -> Self {
        self.characteristics.insert(key.into(), characteristic);
        self
    }

    /// Insert a skill (builder style)
    pub fn with_skill(mut self, key: impl Into<String>, skill: Skill) -> Self {
        self.skills.insert(key.into(), skill);
        self
    }

    /// Add an item (builder style)
    pub fn with_item(mut self, item: Item) -> Self {
        self.items.push(item);
        self
    }

    /// Characteristic by key (`"strength"`), or a zeroed placeholder
    pub fn characteristic(&self, key: &str) -> &Characteristic {
        lookup(&self.characteristics, key, &characteristic::PLACEHOLDER)
    }

    /// Characteristic by short code (`"S"`), or a zeroed placeholder
    pub fn characteristic_by_short(&self, short: &str) -> &Characteristic {
        find_by_short(&self.characteristics, short)
    }

    /// Aptitude names from aptitude items, always including `General`
    pub fn aptitudes(&self) -> BTreeSet<String> {
        let mut aptitudes: BTreeSet<String> = self
            .items
            .iter()
            .filter(|item| item.is_aptitude())
            .map(|item| item.name.trim().to_string())
            .collect();
        aptitudes.insert(GENERAL_APTITUDE.to_string());
        aptitudes
    }

    /// Bonus tokens usable in roll formulas, e.g. `("SB", 4)`
    pub fn attribute_bonuses(&self) -> Vec<(String, i32)> {
        self.characteristics
            .values()
            .filter(|c| !c.short.is_empty())
            .map(|c| (format!("{}B", c.short), c.bonus))
            .collect()
    }

    /// Replace bonus tokens in a roll formula, ignoring case (`1d10+sb` → `1d10+4`)
    pub fn substitute_bonuses(&self, formula: &str) -> String {
        let mut bonuses = self.attribute_bonuses();
        // Longest token first so "WPB" is not eaten by a shorter "PB"
        bonuses.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

        let mut result = formula.to_string();
        for (token, bonus) in bonuses {
            let pattern = format!("(?i){}", regex_lite::escape(&token));
            match Regex::new(&pattern) {
                Ok(re) => result = re.replace_all(&result, bonus.to_string().as_str()).into_owned(),
                Err(err) => tracing::debug!(token = %token, %err, "skipping unusable bonus token"),
            }
        }
        result
    }

    /// Recompute every derived field
    pub fn derived(&self, settings: &SheetSettings) -> Character {
        crate::deriver::derive(self, settings)
    }

    /// Apply hits using this character's own armour and toughness bonus
    ///
    /// Armour and bonus are read from the derived fields, so derive first.
    pub fn receive_damage(&self, events: &[DamageEvent]) -> (Character, DamageOutcome) {
        let toughness_bonus = self.characteristic(keys::TOUGHNESS).bonus;
        let outcome = apply_damage(self.wounds, &self.armour, toughness_bonus, events);
        let mut updated = self.clone();
        updated.wounds = outcome.wounds;
        (updated, outcome)
    }
}
