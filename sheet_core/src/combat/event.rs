//! DamageEvent - one incoming hit

use crate::character::lenient::{self, int_from_text, number_from_text};
use crate::types::ArmourLocation;
use serde::{Deserialize, Serialize};

/// A single hit from a damage roll
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DamageEvent {
    #[serde(deserialize_with = "lenient::int")]
    pub amount: i32,
    /// Hit location, either `ARMOUR.HEAD` style or `head` style
    #[serde(deserialize_with = "lenient::text")]
    pub location: String,
    #[serde(deserialize_with = "lenient::int")]
    pub penetration: i32,
    #[serde(rename = "type", deserialize_with = "lenient::text")]
    pub damage_type: String,
    /// Righteous fury roll; zero when the hit did not trigger fury
    #[serde(deserialize_with = "lenient::int")]
    pub righteous_fury: i32,
}

impl DamageEvent {
    /// A hit with no penetration or fury
    pub fn new(amount: i32, location: ArmourLocation) -> Self {
        DamageEvent {
            amount,
            location: location.label().to_string(),
            ..Default::default()
        }
    }

    pub fn with_penetration(mut self, penetration: i32) -> Self {
        self.penetration = penetration;
        self
    }

    pub fn with_type(mut self, damage_type: impl Into<String>) -> Self {
        self.damage_type = damage_type.into();
        self
    }

    pub fn with_righteous_fury(mut self, roll: i32) -> Self {
        self.righteous_fury = roll;
        self
    }

    pub fn has_righteous_fury(&self) -> bool {
        self.righteous_fury != 0
    }

    /// Resolved location, `None` when the name is not a known location
    pub fn armour_location(&self) -> Option<ArmourLocation> {
        ArmourLocation::parse(&self.location)
    }
}

/// Damage cells as printed on a damage roll card, one column per field
#[derive(Debug, Clone, Default)]
pub struct DamageColumns {
    pub amounts: Vec<String>,
    pub locations: Vec<String>,
    pub penetrations: Vec<String>,
    pub types: Vec<String>,
    pub righteous_fury: Vec<String>,
}

fn cell(column: &[String], row: usize) -> &str {
    column.get(row).map(|s| s.trim()).unwrap_or("")
}

/// Amount after the damage multiplier, floored and clamped to `i32`
///
/// A NaN product reads as 0.
fn scaled_amount(amount: f64, multiplier: f64) -> i32 {
    let scaled = (amount * multiplier).floor();
    if scaled.is_nan() {
        0
    } else {
        scaled.clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
    }
}

/// Build events from card columns
///
/// Columns may differ in length; missing cells read as empty and empty or
/// non-numeric numbers read as 0. `multiplier` scales the amount, which the
/// host uses for half or double damage; fractional results round down.
pub fn parse_damage_rows(columns: &DamageColumns, multiplier: f64) -> Vec<DamageEvent> {
    let rows = [
        columns.amounts.len(),
        columns.locations.len(),
        columns.penetrations.len(),
        columns.types.len(),
        columns.righteous_fury.len(),
    ]
    .into_iter()
    .max()
    .unwrap_or(0);

    (0..rows)
        .map(|row| DamageEvent {
            amount: scaled_amount(number_from_text(cell(&columns.amounts, row)), multiplier),
            location: cell(&columns.locations, row).to_string(),
            penetration: int_from_text(cell(&columns.penetrations, row)),
            damage_type: cell(&columns.types, row).to_string(),
            righteous_fury: int_from_text(cell(&columns.righteous_fury, row)),
        })
        .collect()
}
