//! Damage resolution - fold hits into a wound state

use super::event::DamageEvent;
use super::result::{DamageLogEntry, DamageOutcome, DamageSource, WoundState};
use crate::defense::ArmourSet;
use crate::types::saturate_i32;

/// Wounds a single hit inflicts before righteous fury
///
/// 1. Penetration strips armour, never below 0
/// 2. Toughness bonus soaks damage, never below 0
/// 3. Remaining armour soaks the rest, never below 0
pub fn wounds_from_hit(amount: i32, penetration: i32, armour: i32, toughness_bonus: i32) -> i32 {
    let effective_armour = armour.saturating_sub(penetration).max(0);
    let after_toughness = amount.saturating_sub(toughness_bonus).max(0);
    after_toughness.saturating_sub(effective_armour).max(0)
}

/// Apply damage events in order to a wound state
///
/// Wounds fill up to `max`; the overflow of the hit that crosses `max` and
/// every later hit become critical wounds. A righteous fury hit always deals
/// at least one wound. When a fury hit already deals damage its fury roll is
/// logged as a critical effect for the host to resolve; it is not added to
/// either counter here.
///
/// Counters saturate at `i32::MAX` instead of wrapping.
pub fn apply_damage(
    wounds: WoundState,
    armour: &ArmourSet,
    toughness_bonus: i32,
    events: &[DamageEvent],
) -> DamageOutcome {
    let mut state = wounds;
    let mut log = Vec::new();

    for event in events {
        let armour_value = armour.value_at(&event.location);
        let mut to_add = wounds_from_hit(event.amount, event.penetration, armour_value, toughness_bonus);

        let mut record = |amount: i32, source: DamageSource| {
            log.push(DamageLogEntry {
                amount,
                source,
                location: event.location.clone(),
                damage_type: event.damage_type.clone(),
            });
        };

        if event.has_righteous_fury() {
            if to_add == 0 {
                to_add = 1;
            } else {
                record(event.righteous_fury, DamageSource::CriticalEffect);
            }
        }

        // Widened so value + hit never wraps
        let value = i64::from(state.value);
        let max = i64::from(state.max);
        let reached = value + i64::from(to_add);

        if value >= max {
            state.critical = state.critical.saturating_add(to_add);
            record(to_add, DamageSource::Critical);
        } else if reached > max {
            let overflow = saturate_i32(reached - max);
            record(saturate_i32(max - value), DamageSource::Wounds);
            state.value = state.max;
            state.critical = state.critical.saturating_add(overflow);
            record(overflow, DamageSource::Critical);
        } else {
            state.value = saturate_i32(reached);
            record(to_add, DamageSource::Wounds);
        }

        tracing::trace!(
            location = %event.location,
            amount = event.amount,
            armour = armour_value,
            wounds = to_add,
            value = state.value,
            critical = state.critical,
            "applied hit"
        );
    }

    DamageOutcome { wounds: state, log }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::Item;
    use crate::defense::calculate_armour;
    use crate::types::ArmourLocation::{self, *};

    fn body_armour(value: i32) -> ArmourSet {
        calculate_armour(0, &[Item::armour("Flak", value, ArmourLocation::all(), false)])
    }

    #[test]
    fn test_wounds_from_hit() {
        // 15 - TB 2 = 13, minus armour 3 = 10
        assert_eq!(wounds_from_hit(15, 0, 3, 2), 10);
        // Penetration beyond armour does not add damage
        assert_eq!(wounds_from_hit(15, 10, 3, 2), 13);
        // Toughness soaks everything
        assert_eq!(wounds_from_hit(2, 0, 0, 4), 0);
    }

    #[test]
    fn test_hit_crossing_max_splits() {
        let wounds = WoundState::new(10).with_value(8);
        let events = [DamageEvent::new(15, Body)];
        let outcome = apply_damage(wounds, &body_armour(3), 2, &events);

        assert_eq!(outcome.wounds.value, 10);
        assert_eq!(outcome.wounds.critical, 8);
        assert_eq!(outcome.log.len(), 2);
        assert_eq!(outcome.log[0].source, DamageSource::Wounds);
        assert_eq!(outcome.log[0].amount, 2);
        assert_eq!(outcome.log[1].source, DamageSource::Critical);
        assert_eq!(outcome.log[1].amount, 8);
    }

    #[test]
    fn test_hit_below_max() {
        let wounds = WoundState::new(12).with_value(1);
        let events = [DamageEvent::new(9, Head).with_type("Impact")];
        let outcome = apply_damage(wounds, &body_armour(2), 3, &events);

        assert_eq!(outcome.wounds.value, 5);
        assert_eq!(outcome.wounds.critical, 0);
        assert_eq!(outcome.log[0].damage_type, "Impact");
        assert_eq!(outcome.log[0].location, "ARMOUR.HEAD");
    }

    #[test]
    fn test_already_at_max_goes_critical() {
        let wounds = WoundState { value: 10, critical: 3, max: 10 };
        let events = [DamageEvent::new(6, LeftLeg)];
        let outcome = apply_damage(wounds, &body_armour(0), 0, &events);

        assert_eq!(outcome.wounds.value, 10);
        assert_eq!(outcome.wounds.critical, 9);
        assert_eq!(outcome.log[0].source, DamageSource::Critical);
    }

    #[test]
    fn test_exactly_reaching_max_is_wounds() {
        let wounds = WoundState::new(10).with_value(6);
        let events = [DamageEvent::new(4, Body)];
        let outcome = apply_damage(wounds, &body_armour(0), 0, &events);

        assert_eq!(outcome.wounds.value, 10);
        assert_eq!(outcome.wounds.critical, 0);
        assert_eq!(outcome.log.len(), 1);
    }

    #[test]
    fn test_sequence_accumulates() {
        let wounds = WoundState::new(10);
        let events = [
            DamageEvent::new(6, Body),
            DamageEvent::new(6, Body),
            DamageEvent::new(6, Body),
        ];
        let outcome = apply_damage(wounds, &body_armour(0), 0, &events);

        assert_eq!(outcome.wounds.value, 10);
        assert_eq!(outcome.wounds.critical, 8);
        let sources: Vec<_> = outcome.log.iter().map(|e| (e.source, e.amount)).collect();
        assert_eq!(
            sources,
            vec![
                (DamageSource::Wounds, 6),
                (DamageSource::Wounds, 4),
                (DamageSource::Critical, 2),
                (DamageSource::Critical, 6),
            ]
        );
    }

    #[test]
    fn test_righteous_fury_forces_one_wound() {
        let wounds = WoundState::new(10);
        let events = [DamageEvent::new(3, Body).with_righteous_fury(7)];
        let outcome = apply_damage(wounds, &body_armour(4), 3, &events);

        assert_eq!(outcome.wounds.value, 1);
        assert_eq!(outcome.critical_effects().count(), 0);
    }

    #[test]
    fn test_righteous_fury_logged_as_critical_effect() {
        let wounds = WoundState::new(10);
        let events = [DamageEvent::new(12, Body).with_righteous_fury(7)];
        let outcome = apply_damage(wounds, &body_armour(0), 2, &events);

        assert_eq!(outcome.wounds.value, 10);
        assert_eq!(outcome.wounds.critical, 0);
        assert_eq!(outcome.log[0].source, DamageSource::CriticalEffect);
        assert_eq!(outcome.log[0].amount, 7);
        assert_eq!(outcome.log[1].source, DamageSource::Wounds);
    }

    #[test]
    fn test_unknown_location_has_no_armour() {
        let wounds = WoundState::new(20);
        let mut event = DamageEvent::new(10, Body);
        event.location = "ARMOUR.TENTACLE".to_string();
        let outcome = apply_damage(wounds, &body_armour(5), 0, &[event]);

        assert_eq!(outcome.wounds.value, 10);
        assert_eq!(outcome.log[0].location, "ARMOUR.TENTACLE");
    }

    #[test]
    fn test_penetration_reduces_armour() {
        let wounds = WoundState::new(20);
        let events = [DamageEvent::new(10, Body).with_penetration(3)];
        let outcome = apply_damage(wounds, &body_armour(5), 2, &events);
        // 10 - 2 = 8, armour 5 - 3 = 2 => 6
        assert_eq!(outcome.wounds.value, 6);
    }

    #[test]
    fn test_huge_hits_saturate() {
        assert_eq!(wounds_from_hit(i32::MAX, 0, 0, -5), i32::MAX);
        assert_eq!(wounds_from_hit(i32::MIN, 0, 0, 5), 0);
        assert_eq!(wounds_from_hit(10, i32::MIN, i32::MAX, 0), 0);

        let wounds = WoundState::new(10).with_value(5);
        let events = [DamageEvent::new(i32::MAX, Body), DamageEvent::new(i32::MAX, Body)];
        let outcome = apply_damage(wounds, &body_armour(0), 2, &events);

        assert_eq!(outcome.wounds.value, 10);
        assert_eq!(outcome.wounds.critical, i32::MAX);
        assert_eq!(outcome.log[0].amount, 5);
        assert_eq!(outcome.log[1].amount, i32::MAX - 2 - 5);
        assert_eq!(outcome.wounds_dealt(), 5);
        assert_eq!(outcome.critical_dealt(), i32::MAX);
    }

    #[test]
    fn test_negative_value_crossing_max() {
        let wounds = WoundState { value: i32::MIN, critical: 0, max: i32::MAX };
        let events = [DamageEvent::new(i32::MAX, Body)];
        let outcome = apply_damage(wounds, &body_armour(0), 0, &events);

        // The gap to max is wider than i32, so the hit stays in ordinary wounds
        assert_eq!(outcome.wounds.value, -1);
        assert_eq!(outcome.wounds.critical, 0);
    }

    #[test]
    fn test_no_events_is_unchanged() {
        let wounds = WoundState { value: 4, critical: 1, max: 10 };
        let outcome = apply_damage(wounds, &ArmourSet::default(), 3, &[]);
        assert_eq!(outcome.wounds, wounds);
        assert!(outcome.log.is_empty());
    }
}
