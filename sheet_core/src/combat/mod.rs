//! Combat resolution - apply damage events to a wound state

mod event;
mod resolution;
mod result;

pub use event::{parse_damage_rows, DamageColumns, DamageEvent};
pub use resolution::{apply_damage, wounds_from_hit};
pub use result::{DamageLogEntry, DamageOutcome, DamageSource, WoundState};
