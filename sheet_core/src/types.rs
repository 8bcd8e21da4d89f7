//! Core enums shared across the sheet

use serde::{Deserialize, Serialize};

/// Clamp a wide intermediate back into sheet range
pub fn saturate_i32(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Hit location on the body, each with its own armour value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ArmourLocation {
    Head,
    LeftArm,
    RightArm,
    Body,
    LeftLeg,
    RightLeg,
}

impl ArmourLocation {
    /// Get all armour locations
    pub fn all() -> &'static [ArmourLocation] {
        &[
            ArmourLocation::Head,
            ArmourLocation::LeftArm,
            ArmourLocation::RightArm,
            ArmourLocation::Body,
            ArmourLocation::LeftLeg,
            ArmourLocation::RightLeg,
        ]
    }

    /// camelCase key used in character data (`leftArm`)
    pub fn key(self) -> &'static str {
        match self {
            ArmourLocation::Head => "head",
            ArmourLocation::LeftArm => "leftArm",
            ArmourLocation::RightArm => "rightArm",
            ArmourLocation::Body => "body",
            ArmourLocation::LeftLeg => "leftLeg",
            ArmourLocation::RightLeg => "rightLeg",
        }
    }

    /// Localisation key the host prints on damage rolls (`ARMOUR.LEFT_ARM`)
    pub fn label(self) -> &'static str {
        match self {
            ArmourLocation::Head => "ARMOUR.HEAD",
            ArmourLocation::LeftArm => "ARMOUR.LEFT_ARM",
            ArmourLocation::RightArm => "ARMOUR.RIGHT_ARM",
            ArmourLocation::Body => "ARMOUR.BODY",
            ArmourLocation::LeftLeg => "ARMOUR.LEFT_LEG",
            ArmourLocation::RightLeg => "ARMOUR.RIGHT_LEG",
        }
    }

    /// Resolve either a localisation key or a data key.
    ///
    /// Returns `None` for anything unrecognised; callers treat that as a
    /// location without armour.
    pub fn parse(name: &str) -> Option<ArmourLocation> {
        let name = name.trim();
        Self::all()
            .iter()
            .copied()
            .find(|loc| loc.label() == name || loc.key() == name)
    }
}

/// One value per armour location
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerLocation<T> {
    pub head: T,
    pub left_arm: T,
    pub right_arm: T,
    pub body: T,
    pub left_leg: T,
    pub right_leg: T,
}

impl<T> PerLocation<T> {
    /// Build every location from a function
    pub fn from_fn(mut f: impl FnMut(ArmourLocation) -> T) -> Self {
        PerLocation {
            head: f(ArmourLocation::Head),
            left_arm: f(ArmourLocation::LeftArm),
            right_arm: f(ArmourLocation::RightArm),
            body: f(ArmourLocation::Body),
            left_leg: f(ArmourLocation::LeftLeg),
            right_leg: f(ArmourLocation::RightLeg),
        }
    }

    pub fn get(&self, location: ArmourLocation) -> &T {
        match location {
            ArmourLocation::Head => &self.head,
            ArmourLocation::LeftArm => &self.left_arm,
            ArmourLocation::RightArm => &self.right_arm,
            ArmourLocation::Body => &self.body,
            ArmourLocation::LeftLeg => &self.left_leg,
            ArmourLocation::RightLeg => &self.right_leg,
        }
    }

    pub fn get_mut(&mut self, location: ArmourLocation) -> &mut T {
        match location {
            ArmourLocation::Head => &mut self.head,
            ArmourLocation::LeftArm => &mut self.left_arm,
            ArmourLocation::RightArm => &mut self.right_arm,
            ArmourLocation::Body => &mut self.body,
            ArmourLocation::LeftLeg => &mut self.left_leg,
            ArmourLocation::RightLeg => &mut self.right_leg,
        }
    }

    /// Iterate locations in sheet order
    pub fn iter(&self) -> impl Iterator<Item = (ArmourLocation, &T)> {
        ArmourLocation::all().iter().map(move |loc| (*loc, self.get(*loc)))
    }
}

/// Purchased characteristic advance, in 5-point steps
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacteristicRank {
    #[default]
    #[serde(rename = "N")]
    None,
    #[serde(rename = "S")]
    Simple,
    #[serde(rename = "I")]
    Intermediate,
    #[serde(rename = "T")]
    Trained,
    #[serde(rename = "P")]
    Proficient,
    #[serde(rename = "E")]
    Expert,
}

impl CharacteristicRank {
    /// Map an advance value to its rank. Off-table values read as `None`.
    pub fn from_advance(advance: i32) -> Self {
        match advance {
            5 => CharacteristicRank::Simple,
            10 => CharacteristicRank::Intermediate,
            15 => CharacteristicRank::Trained,
            20 => CharacteristicRank::Proficient,
            25 => CharacteristicRank::Expert,
            _ => CharacteristicRank::None,
        }
    }

    /// Single-letter sheet marker
    pub fn label(self) -> &'static str {
        match self {
            CharacteristicRank::None => "N",
            CharacteristicRank::Simple => "S",
            CharacteristicRank::Intermediate => "I",
            CharacteristicRank::Trained => "T",
            CharacteristicRank::Proficient => "P",
            CharacteristicRank::Expert => "E",
        }
    }
}

/// Skill training level, in 10-point steps from -20 (untrained)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillRank {
    #[default]
    #[serde(rename = "U")]
    Untrained,
    #[serde(rename = "K")]
    Known,
    #[serde(rename = "T")]
    Trained,
    #[serde(rename = "E")]
    Experienced,
    #[serde(rename = "V")]
    Veteran,
}

impl SkillRank {
    /// Map an advance value to its rank. Off-table values read as `Untrained`.
    pub fn from_advance(advance: i32) -> Self {
        match advance {
            0 => SkillRank::Known,
            10 => SkillRank::Trained,
            20 => SkillRank::Experienced,
            30 => SkillRank::Veteran,
            _ => SkillRank::Untrained,
        }
    }

    /// Single-letter sheet marker
    pub fn label(self) -> &'static str {
        match self {
            SkillRank::Untrained => "U",
            SkillRank::Known => "K",
            SkillRank::Trained => "T",
            SkillRank::Experienced => "E",
            SkillRank::Veteran => "V",
        }
    }
}
