//! Characteristic - a base attribute with total and bonus

use super::lenient;
use crate::types::CharacteristicRank;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A characteristic such as strength or willpower
///
/// `base`, `advance`, `unnatural` and `aptitudes` come from the host;
/// `total`, `bonus` and `rank` are overwritten on every derivation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Characteristic {
    /// Short code skills refer to (e.g. "Ag", "WP")
    #[serde(deserialize_with = "lenient::text")]
    pub short: String,
    #[serde(deserialize_with = "lenient::int")]
    pub base: i32,
    /// Purchased advance, in steps of 5
    #[serde(deserialize_with = "lenient::int")]
    pub advance: i32,
    /// Unnatural multiplier added straight onto the bonus
    #[serde(deserialize_with = "lenient::int")]
    pub unnatural: i32,
    #[serde(deserialize_with = "lenient::string_set")]
    pub aptitudes: BTreeSet<String>,
    /// Experience spent; written back when costs are calculated automatically
    #[serde(deserialize_with = "lenient::int")]
    pub cost: i32,

    // === Derived ===
    #[serde(deserialize_with = "lenient::int")]
    pub total: i32,
    #[serde(deserialize_with = "lenient::int")]
    pub bonus: i32,
    #[serde(deserialize_with = "lenient::record_or_default")]
    pub rank: CharacteristicRank,
}

/// Stand-in for a characteristic that could not be found
pub(crate) static PLACEHOLDER: Characteristic = Characteristic {
    short: String::new(),
    base: 0,
    advance: 0,
    unnatural: 0,
    aptitudes: BTreeSet::new(),
    cost: 0,
    total: 0,
    bonus: 0,
    rank: CharacteristicRank::None,
};

/// Characteristic with the given short code, or the placeholder
pub fn find_by_short<'a>(characteristics: &'a BTreeMap<String, Characteristic>, short: &str) -> &'a Characteristic {
    characteristics
        .values()
        .find(|c| c.short == short)
        .unwrap_or(&PLACEHOLDER)
}

/// Tens digit plus unnatural; floors for negative totals
pub fn bonus_for(total: i32, unnatural: i32) -> i32 {
    total.div_euclid(10).saturating_add(unnatural)
}

/// Halve rounding up (toward positive infinity)
fn halve_up(total: i32) -> i32 {
    total.div_euclid(2) + total.rem_euclid(2)
}

impl Characteristic {
    /// Create a characteristic with its progression inputs
    pub fn new(short: impl Into<String>, base: i32, advance: i32) -> Self {
        Characteristic {
            short: short.into(),
            base,
            advance,
            ..Default::default()
        }
    }

    /// Add an aptitude (builder style)
    pub fn with_aptitude(mut self, aptitude: impl Into<String>) -> Self {
        self.aptitudes.insert(aptitude.into());
        self
    }

    /// Total before any fatigue penalty
    pub fn unpenalized_total(&self) -> i32 {
        self.base.saturating_add(self.advance)
    }

    /// Recompute total, bonus and rank under the given fatigue level
    ///
    /// Fatigue above this characteristic's own unpenalized bonus halves the
    /// total (rounding up) and the bonus is taken from the halved total.
    pub fn recompute(&mut self, fatigue: i32) {
        self.total = self.unpenalized_total();
        self.bonus = bonus_for(self.total, self.unnatural);
        if fatigue > self.bonus {
            self.total = halve_up(self.total);
            self.bonus = bonus_for(self.total, self.unnatural);
        }
        self.rank = CharacteristicRank::from_advance(self.advance);
    }

    /// Whether the last recompute applied the fatigue penalty
    pub fn is_fatigued(&self) -> bool {
        self.total != self.unpenalized_total()
    }
}
