//! Prelude module for convenient imports
//!
//! ```rust
//! use sheet_core::prelude::*;
//! ```

// Character snapshot
pub use crate::character::{keys, Character, Characteristic, Item, ItemKind, Skill, Speciality, Talent};
pub use crate::types::{ArmourLocation, CharacteristicRank, SkillRank};

// Derivation
pub use crate::deriver::derive;

// Combat
pub use crate::combat::{DamageEvent, DamageOutcome, DamageSource, WoundState};

// Config
pub use crate::config::{default_settings, SheetSettings};
