//! Defense - armour worn at each hit location

mod armour;

pub use armour::{calculate_armour, calculate_armour_values, ArmourSet, LocationArmour};
