//! Characteristic stage: totals, bonuses and the values hanging off them

use crate::character::{keys, Character};

/// Recompute characteristics, then insanity/corruption bonuses, current psy
/// rating, initiative bonus and fatigue threshold
pub fn derive_characteristics(character: &mut Character) {
    let fatigue = character.fatigue.value;
    for characteristic in character.characteristics.values_mut() {
        characteristic.recompute(fatigue);
    }

    character.insanity_bonus = character.insanity.div_euclid(10);
    character.corruption_bonus = character.corruption.div_euclid(10);
    character.psy.current_rating = character.psy.rating.saturating_sub(character.psy.sustained);

    let initiative_bonus = character
        .characteristic(&character.initiative.characteristic)
        .bonus;
    character.initiative.bonus = initiative_bonus;

    // Uses the unpenalized totals so fatigue never feeds back into its own limit
    let toughness = character.characteristic(keys::TOUGHNESS).unpenalized_total();
    let willpower = character.characteristic(keys::WILLPOWER).unpenalized_total();
    character.fatigue.max = toughness.div_euclid(10) + willpower.div_euclid(10);
}
