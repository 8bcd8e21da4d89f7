//! Rule tables: experience cost curves and carrying capacity

use super::ConfigError;
use crate::types::saturate_i32;
use serde::{Deserialize, Serialize};

/// Numeric tables the deriver reads
///
/// Cost tables are indexed `[row][2 - matched_aptitudes]`, so the first
/// column is the price with two matching aptitudes and the last with none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleTables {
    /// Characteristic advance cost per 5-point step; row 0 is the unadvanced step
    #[serde(default = "default_characteristic_costs")]
    pub characteristic_costs: Vec<[i32; 3]>,
    /// Talent cost per tier (rows are tiers 1..=3)
    #[serde(default = "default_talent_costs")]
    pub talent_costs: Vec<[i32; 3]>,
    /// Max carry weight indexed by strength bonus + toughness bonus
    #[serde(default = "default_encumbrance")]
    pub encumbrance: Vec<f64>,
    /// Skill step multiplier: step n costs (n + 1) * (3 - matched) * this
    #[serde(default = "default_skill_step_cost")]
    pub skill_step_cost: i32,
    /// Psy rating multiplier on the triangular-number curve
    #[serde(default = "default_psy_rating_step_cost")]
    pub psy_rating_step_cost: i32,
}

impl Default for RuleTables {
    fn default() -> Self {
        RuleTables {
            characteristic_costs: default_characteristic_costs(),
            talent_costs: default_talent_costs(),
            encumbrance: default_encumbrance(),
            skill_step_cost: default_skill_step_cost(),
            psy_rating_step_cost: default_psy_rating_step_cost(),
        }
    }
}

fn default_characteristic_costs() -> Vec<[i32; 3]> {
    vec![
        [0, 0, 0],
        [100, 250, 500],
        [250, 500, 750],
        [500, 750, 1000],
        [750, 1000, 1500],
        [1250, 1500, 2500],
    ]
}

fn default_talent_costs() -> Vec<[i32; 3]> {
    vec![[200, 300, 600], [300, 450, 900], [400, 600, 1200]]
}

fn default_encumbrance() -> Vec<f64> {
    vec![
        0.9, 2.25, 4.5, 9.0, 18.0, 27.0, 36.0, 45.0, 56.0, 67.0, 78.0, 90.0, 112.0, 225.0, 337.0,
        450.0, 675.0, 900.0, 1350.0, 1800.0, 2250.0,
    ]
}

fn default_skill_step_cost() -> i32 {
    100
}

fn default_psy_rating_step_cost() -> i32 {
    200
}

/// n(n+1)/2; exact for every i32 input
fn triangular(n: i64) -> i64 {
    n * (n + 1) / 2
}

/// Column for a matched-aptitude count; only 0, 1 and 2 are distinguished
fn aptitude_column(matched: usize) -> usize {
    2 - matched.min(2)
}

impl RuleTables {
    /// Check the tables are usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.characteristic_costs.first() {
            Some(row) if row.iter().all(|c| *c == 0) => {}
            Some(_) => {
                return Err(ConfigError::ValidationError(
                    "characteristic_costs row 0 must be free".to_string(),
                ))
            }
            None => {
                return Err(ConfigError::ValidationError(
                    "characteristic_costs is empty".to_string(),
                ))
            }
        }
        if self.talent_costs.len() != 3 {
            return Err(ConfigError::ValidationError(format!(
                "talent_costs needs 3 tiers, found {}",
                self.talent_costs.len()
            )));
        }
        if self.encumbrance.is_empty() {
            return Err(ConfigError::ValidationError("encumbrance is empty".to_string()));
        }
        if self.skill_step_cost < 0 || self.psy_rating_step_cost < 0 {
            return Err(ConfigError::ValidationError(
                "step costs cannot be negative".to_string(),
            ));
        }
        Ok(())
    }

    /// Cost of a single characteristic step; steps past the table are free
    pub fn characteristic_step_cost(&self, step: usize, matched: usize) -> i32 {
        self.characteristic_costs
            .get(step)
            .map(|row| row[aptitude_column(matched)])
            .unwrap_or(0)
    }

    /// Total cost of a characteristic advance (steps 0..=advance/5)
    pub fn characteristic_cost(&self, advance: i32, matched: usize) -> i32 {
        let Ok(last_step) = usize::try_from(advance.div_euclid(5)) else {
            return 0;
        };
        // Steps past the table are free, so only the table rows are walked
        self.characteristic_costs
            .iter()
            .take(last_step.saturating_add(1))
            .fold(0i32, |total, row| total.saturating_add(row[aptitude_column(matched)]))
    }

    /// Total cost of a skill or speciality advance (steps start..=advance/10)
    ///
    /// Step n costs `(n + 1) * (3 - matched) * skill_step_cost`, so the sum
    /// is taken in closed form. Starter skills skip the first step.
    pub fn skill_cost(&self, advance: i32, matched: usize, starter: bool) -> i32 {
        let first_step: i64 = if starter { 1 } else { 0 };
        let last_step = i64::from(advance.div_euclid(10));
        if last_step < first_step {
            return 0;
        }
        let multiplier = 3 - matched.min(2) as i64;
        // Sum of (n + 1) for n in first..=last
        let units = triangular(last_step + 1) - triangular(first_step);
        saturate_i32(
            units
                .saturating_mul(multiplier)
                .saturating_mul(i64::from(self.skill_step_cost)),
        )
    }

    /// Talent cost for a tier; starter talents and tiers outside 1..=3 are free
    pub fn talent_cost(&self, tier: i32, matched: usize, starter: bool) -> i32 {
        if starter || !(1..=3).contains(&tier) {
            return 0;
        }
        self.talent_costs
            .get((tier - 1) as usize)
            .map(|row| row[aptitude_column(matched)])
            .unwrap_or(0)
    }

    /// Psy rating cost: (r(r+1)/2 - 1) * step, never negative
    pub fn psy_rating_cost(&self, rating: i32) -> i32 {
        let cost = (triangular(i64::from(rating)) - 1).saturating_mul(i64::from(self.psy_rating_step_cost));
        saturate_i32(cost.max(0))
    }

    /// Carry capacity for a strength + toughness bonus sum, clamped to the table
    pub fn max_encumbrance(&self, attribute_bonus: i32) -> f64 {
        let last = self.encumbrance.len().saturating_sub(1);
        let index = (attribute_bonus.max(0) as usize).min(last);
        self.encumbrance.get(index).copied().unwrap_or(0.0)
    }
}
