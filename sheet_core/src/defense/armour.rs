//! Armour - per-location protection from worn armour and toughness

use crate::character::{lenient, Item};
use crate::types::{ArmourLocation, PerLocation};
use serde::{Deserialize, Serialize};

/// Protection at one hit location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocationArmour {
    #[serde(deserialize_with = "lenient::int")]
    pub toughness_bonus: i32,
    /// Armour points from worn items
    #[serde(deserialize_with = "lenient::int")]
    pub value: i32,
    /// `toughness_bonus + value`
    #[serde(deserialize_with = "lenient::int")]
    pub total: i32,
}

impl LocationArmour {
    pub fn new(toughness_bonus: i32, value: i32) -> Self {
        LocationArmour {
            toughness_bonus,
            value,
            total: toughness_bonus.saturating_add(value),
        }
    }
}

/// Armour for every hit location
pub type ArmourSet = PerLocation<LocationArmour>;

impl PerLocation<LocationArmour> {
    /// Armour points at a location given by name; unknown names have none
    pub fn value_at(&self, location: &str) -> i32 {
        match ArmourLocation::parse(location) {
            Some(loc) => self.get(loc).value,
            None => {
                tracing::debug!(location, "unknown hit location, no armour applies");
                0
            }
        }
    }
}

/// Armour points per location from worn items
///
/// The best single non-additive piece counts at each location; additive
/// pieces (force-layered plates, cybernetic plating) stack on top.
pub fn calculate_armour_values<'a>(items: impl IntoIterator<Item = &'a Item>) -> PerLocation<i32> {
    let mut best = PerLocation::<i32>::default();
    let mut stacked = PerLocation::<i32>::default();

    for armour in items.into_iter().filter_map(Item::as_armour) {
        for &loc in ArmourLocation::all() {
            let points = *armour.part.get(loc);
            if armour.additive {
                let total = stacked.get_mut(loc);
                *total = total.saturating_add(points);
            } else if points > *best.get(loc) {
                *best.get_mut(loc) = points;
            }
        }
    }

    PerLocation::from_fn(|loc| best.get(loc).saturating_add(*stacked.get(loc)))
}

/// Full armour set for a toughness bonus and the items worn
pub fn calculate_armour<'a>(
    toughness_bonus: i32,
    items: impl IntoIterator<Item = &'a Item>,
) -> ArmourSet {
    let values = calculate_armour_values(items);
    PerLocation::from_fn(|loc| LocationArmour::new(toughness_bonus, *values.get(loc)))
}
