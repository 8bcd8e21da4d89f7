//! Experience stage - what the advances cost and what is left
//!
//! In automatic mode every cost is recalculated from aptitudes and the rule
//! tables and written back onto the sheet. In manual mode the costs the host
//! stored are trusted and only summed.

use crate::character::{Character, ItemKind};
use crate::config::{RuleTables, SheetSettings};
use std::collections::BTreeSet;

/// Experience spent per category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Spend {
    characteristics: i32,
    skills: i32,
    talents: i32,
    psychic_powers: i32,
}

pub fn derive_experience(character: &mut Character, settings: &SheetSettings) {
    let spend = if settings.auto_calc_xp_costs {
        calculate_costs(character, &settings.rules)
    } else {
        sum_stored_costs(character)
    };

    let experience = &mut character.experience;
    experience.spent_characteristics = spend.characteristics;
    experience.spent_skills = spend.skills;
    experience.spent_talents = spend.talents;
    experience.spent_psychic_powers = spend.psychic_powers;
    experience.total_spent = [
        spend.characteristics,
        spend.skills,
        spend.talents,
        spend.psychic_powers,
    ]
    .into_iter()
    .fold(experience.spent_other, i32::saturating_add);
    experience.remaining = experience.value.saturating_sub(experience.total_spent);

    tracing::debug!(
        auto = settings.auto_calc_xp_costs,
        total_spent = experience.total_spent,
        remaining = experience.remaining,
        "experience derived"
    );
}

fn saturating_sum(costs: impl Iterator<Item = i32>) -> i32 {
    costs.fold(0, i32::saturating_add)
}

fn matched(held: &BTreeSet<String>, wanted: &BTreeSet<String>) -> usize {
    held.intersection(wanted).count()
}

fn calculate_costs(character: &mut Character, rules: &RuleTables) -> Spend {
    let aptitudes = character.aptitudes();
    let mut spend = Spend::default();

    for characteristic in character.characteristics.values_mut() {
        let m = matched(&aptitudes, &characteristic.aptitudes);
        characteristic.cost = rules.characteristic_cost(characteristic.advance, m);
        spend.characteristics = spend.characteristics.saturating_add(characteristic.cost);
    }

    for skill in character.skills.values_mut() {
        let m = matched(&aptitudes, &skill.aptitudes);
        if skill.is_specialist {
            for speciality in skill.specialities.values_mut() {
                speciality.cost = rules.skill_cost(speciality.advance, m, speciality.starter);
                spend.skills = spend.skills.saturating_add(speciality.cost);
            }
        } else {
            skill.cost = rules.skill_cost(skill.advance, m, skill.starter);
            spend.skills = spend.skills.saturating_add(skill.cost);
        }
    }

    for item in character.items.iter_mut() {
        match &mut item.kind {
            ItemKind::Talent(talent) => {
                let m = matched(&aptitudes, &talent.aptitudes);
                talent.cost = rules.talent_cost(talent.tier, m, talent.starter);
                spend.talents = spend.talents.saturating_add(talent.cost);
            }
            ItemKind::PsychicPower(power) => {
                spend.psychic_powers = spend.psychic_powers.saturating_add(power.cost)
            }
            _ => {}
        }
    }

    character.psy.cost = rules.psy_rating_cost(character.psy.rating);
    spend.psychic_powers = spend.psychic_powers.saturating_add(character.psy.cost);

    spend
}

fn sum_stored_costs(character: &Character) -> Spend {
    let mut spend = Spend {
        characteristics: saturating_sum(character.characteristics.values().map(|c| c.cost)),
        psychic_powers: character.psy.cost,
        ..Default::default()
    };

    for skill in character.skills.values() {
        let cost = if skill.is_specialist {
            saturating_sum(skill.specialities.values().map(|s| s.cost))
        } else {
            skill.cost
        };
        spend.skills = spend.skills.saturating_add(cost);
    }

    for item in &character.items {
        match &item.kind {
            ItemKind::Talent(talent) => spend.talents = spend.talents.saturating_add(talent.cost),
            ItemKind::PsychicPower(power) => {
                spend.psychic_powers = spend.psychic_powers.saturating_add(power.cost)
            }
            _ => {}
        }
    }

    spend
}
