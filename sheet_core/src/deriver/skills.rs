//! Skill stage: totals and rank markers from the governing characteristic

use crate::character::{find_by_short, Character};
use crate::types::SkillRank;

pub fn derive_skills(character: &mut Character) {
    let Character {
        characteristics,
        skills,
        ..
    } = character;

    for (name, skill) in skills.iter_mut() {
        let code = skill.governing_characteristic();
        let characteristic = find_by_short(characteristics, code);
        if characteristic.short.is_empty() {
            tracing::debug!(skill = %name, code, "unknown characteristic, skill total uses 0");
        }
        let base = characteristic.total;

        skill.total = base.saturating_add(skill.advance);
        skill.rank = SkillRank::from_advance(skill.advance);

        if skill.is_specialist {
            for speciality in skill.specialities.values_mut() {
                speciality.total = base.saturating_add(speciality.advance);
                speciality.is_known = speciality.advance >= 0;
                speciality.rank = SkillRank::from_advance(speciality.advance);
            }
        }
    }
}
