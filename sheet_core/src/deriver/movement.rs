//! Armour and movement stages

use crate::character::{keys, Character, AVERAGE_SIZE};
use crate::defense::calculate_armour;

/// Per-location armour from worn items plus the toughness bonus
pub fn derive_armour(character: &mut Character) {
    let toughness_bonus = character.characteristic(keys::TOUGHNESS).bonus;
    character.armour = calculate_armour(toughness_bonus, &character.items);
}

/// Half/full/charge/run distances from agility bonus and size
pub fn derive_movement(character: &mut Character) {
    let unit = character
        .characteristic(keys::AGILITY)
        .bonus
        .saturating_add(character.size)
        .saturating_sub(AVERAGE_SIZE);
    character.movement.half = unit;
    character.movement.full = unit.saturating_mul(2);
    character.movement.charge = unit.saturating_mul(3);
    character.movement.run = unit.saturating_mul(6);
}
