//! sheet_core - Derived statistics and damage resolution for Dark Heresy character sheets
//!
//! This library provides:
//! - Character: the snapshot a host stores, parsed leniently from JSON
//! - Deriver: recomputes totals, bonuses, costs, armour and movement
//! - Damage Resolution: folds incoming hits into wounds and critical wounds
//! - Config: rule tables and the experience-costing switch, loaded from TOML

pub mod character;
pub mod combat;
pub mod config;
pub mod defense;
pub mod deriver;
pub mod prelude;
pub mod types;

// Re-export core types for convenience
pub use character::{
    Armour, Character, Characteristic, Encumbrance, Experience, Fatigue, Initiative, Item, ItemKind,
    Movement, Psy, PsychicPower, SheetError, Skill, Speciality, Talent,
};
pub use combat::{
    apply_damage, parse_damage_rows, DamageColumns, DamageEvent, DamageLogEntry, DamageOutcome,
    DamageSource, WoundState,
};
pub use config::{default_settings, load_settings, parse_settings, ConfigError, RuleTables, SheetSettings};
pub use defense::{calculate_armour, ArmourSet, LocationArmour};
pub use deriver::derive;
pub use types::{ArmourLocation, CharacteristicRank, PerLocation, SkillRank};
