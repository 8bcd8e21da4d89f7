//! Deriver - recompute every derived field of a character snapshot
//!
//! The input is never modified; [`derive`] returns a new snapshot. Stages run
//! in a fixed order because later stages read what earlier ones wrote:
//!
//! 1. Characteristics (totals, bonuses, fatigue penalty, initiative, fatigue max)
//! 2. Skills and specialities
//! 3. Encumbrance
//! 4. Experience
//! 5. Armour
//! 6. Movement
//!
//! Running `derive` on its own output gives the same snapshot back.

mod characteristics;
mod encumbrance;
mod experience;
mod movement;
mod skills;

pub use characteristics::derive_characteristics;
pub use encumbrance::derive_encumbrance;
pub use experience::derive_experience;
pub use movement::{derive_armour, derive_movement};
pub use skills::derive_skills;

use crate::character::Character;
use crate::config::SheetSettings;

/// Derive all fields for a snapshot under the given settings
pub fn derive(character: &Character, settings: &SheetSettings) -> Character {
    let mut derived = character.clone();

    derive_characteristics(&mut derived);
    derive_skills(&mut derived);
    derive_encumbrance(&mut derived, &settings.rules);
    derive_experience(&mut derived, settings);
    derive_armour(&mut derived);
    derive_movement(&mut derived);

    tracing::debug!(
        name = %derived.name,
        characteristics = derived.characteristics.len(),
        skills = derived.skills.len(),
        items = derived.items.len(),
        "character derived"
    );

    derived
}
