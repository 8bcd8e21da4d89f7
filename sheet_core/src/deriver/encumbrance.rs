//! Encumbrance stage

use crate::character::{keys, Character};
use crate::config::RuleTables;

pub fn derive_encumbrance(character: &mut Character, rules: &RuleTables) {
    let carried: f64 = character.items.iter().map(|item| item.weight).sum();
    let attribute_bonus = character
        .characteristic(keys::STRENGTH)
        .bonus
        .saturating_add(character.characteristic(keys::TOUGHNESS).bonus);

    character.encumbrance.value = carried;
    character.encumbrance.max = rules.max_encumbrance(attribute_bonus);
}
