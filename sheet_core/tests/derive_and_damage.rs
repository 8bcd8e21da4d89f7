use proptest::prelude::*;
use sheet_core::character::bonus_for;
use sheet_core::prelude::*;
use sheet_core::{apply_damage, calculate_armour, parse_damage_rows, DamageColumns};

const SNAPSHOT: &str = r#"{
    "name": "Interrogator Vail",
    "characteristics": {
        "weaponSkill":    {"short": "WS",  "base": 30, "advance": 10, "aptitudes": ["Weapon Skill", "Offence"]},
        "ballisticSkill": {"short": "BS",  "base": "34", "advance": 5, "aptitudes": "Ballistic Skill, Finesse"},
        "strength":       {"short": "S",   "base": 31, "advance": 0, "aptitudes": ["Strength", "Offence"]},
        "toughness":      {"short": "T",   "base": 28, "advance": 5, "aptitudes": ["Toughness", "Defence"]},
        "agility":        {"short": "Ag",  "base": 36, "advance": 0, "aptitudes": ["Agility", "Finesse"]},
        "intelligence":   {"short": "Int", "base": 40, "advance": 0, "aptitudes": ["Intelligence", "Knowledge"]},
        "perception":     {"short": "Per", "base": 33, "advance": 0, "aptitudes": ["Perception", "Fieldcraft"]},
        "willpower":      {"short": "WP",  "base": 38, "advance": 0, "aptitudes": ["Willpower", "Psyker"]},
        "fellowship":     {"short": "Fel", "base": 29, "advance": 0, "aptitudes": ["Fellowship", "Social"]}
    },
    "skills": {
        "dodge":    {"characteristics": ["Ag"], "advance": 10, "aptitudes": ["Agility", "Defence"]},
        "awareness":{"characteristics": "Per", "advance": 0, "starter": true, "aptitudes": ["Perception", "Fieldcraft"]},
        "charm":    {"characteristics": ["Fel"], "aptitudes": ["Fellowship", "Social"]},
        "commonLore": {
            "characteristics": ["Int"],
            "isSpecialist": true,
            "aptitudes": ["Intelligence", "General"],
            "specialities": {
                "imperium":     {"advance": 0, "starter": true},
                "adeptaSororitas": {"advance": -20}
            }
        }
    },
    "items": [
        {"name": "Offence", "type": "aptitude"},
        {"name": "Finesse", "type": "aptitude"},
        {"name": "Defence", "type": "aptitude"},
        {"name": "Knowledge", "type": "aptitude"},
        {"name": "Flak Coat", "type": "armour", "weight": 4,
         "part": {"body": 3, "leftArm": 3, "rightArm": 3, "leftLeg": 3, "rightLeg": 3}},
        {"name": "Carapace Helm", "type": "armour", "weight": "1.5", "part": {"head": 5}},
        {"name": "Force Ward", "type": "armour", "part": {"body": 1}, "isAdditive": true},
        {"name": "Laspistol", "type": "weapon", "weight": 1.5, "damage": "1d10+2"},
        {"name": "Ambidextrous", "type": "talent", "tier": 1, "aptitudes": "Weapon Skill, Ballistic Skill", "cost": 300},
        {"name": "Smite", "type": "psychicPower", "cost": "200"},
        null
    ],
    "initiative": {"characteristic": "agility", "base": 1},
    "wounds": {"value": 8, "critical": 0, "max": 10},
    "fatigue": {"value": 0},
    "psy": {"rating": 3, "sustained": 1, "cost": 1000},
    "experience": {"value": 5000, "spentOther": null},
    "insanity": 14,
    "corruption": 3,
    "size": 4
}"#;

fn snapshot() -> Character {
    Character::from_json(SNAPSHOT).unwrap()
}

#[test]
fn test_snapshot_parses_leniently() {
    let character = snapshot();
    assert_eq!(character.items.len(), 10);
    assert_eq!(character.characteristic(keys::BALLISTIC_SKILL).base, 34);
    assert!(character
        .characteristic(keys::BALLISTIC_SKILL)
        .aptitudes
        .contains("Finesse"));
    assert_eq!(character.skills["charm"].advance, -20);
    assert_eq!(character.skills["awareness"].governing_characteristic(), "Per");
}

#[test]
fn test_full_derivation() {
    let derived = derive(&snapshot(), &default_settings());

    let ws = derived.characteristic(keys::WEAPON_SKILL);
    assert_eq!((ws.total, ws.bonus), (40, 4));
    assert_eq!(ws.rank, CharacteristicRank::Intermediate);
    assert_eq!(derived.characteristic(keys::TOUGHNESS).bonus, 3);

    assert_eq!(derived.skills["dodge"].total, 46);
    assert_eq!(derived.skills["dodge"].rank, SkillRank::Trained);
    assert_eq!(derived.skills["charm"].total, 9);
    let lore = &derived.skills["commonLore"];
    assert_eq!(lore.specialities["imperium"].total, 40);
    assert!(lore.specialities["imperium"].is_known);
    assert!(!lore.specialities["adeptaSororitas"].is_known);

    assert_eq!(derived.insanity_bonus, 1);
    assert_eq!(derived.corruption_bonus, 0);
    assert_eq!(derived.psy.current_rating, 2);
    assert_eq!(derived.initiative.bonus, 3);
    assert_eq!(derived.initiative.roll_modifier(), 4);
    assert_eq!(derived.fatigue.max, 3 + 3);

    // Strength 3 + toughness 3
    assert!((derived.encumbrance.max - 36.0).abs() < f64::EPSILON);
    assert!((derived.encumbrance.value - 7.0).abs() < f64::EPSILON);

    assert_eq!(derived.armour.head.value, 5);
    assert_eq!(derived.armour.body.value, 4);
    assert_eq!(derived.armour.body.total, 7);
    assert_eq!(derived.armour.left_arm.total, 6);

    assert_eq!(derived.movement.half, 3);
    assert_eq!(derived.movement.run, 18);

    // Manual mode sums stored costs: 300 talent, 1000 psy + 200 power
    assert_eq!(derived.experience.spent_talents, 300);
    assert_eq!(derived.experience.spent_psychic_powers, 1200);
    assert_eq!(derived.experience.remaining, 5000 - 1500);
}

#[test]
fn test_automatic_costs_rewrite_sheet() {
    let derived = derive(&snapshot(), &SheetSettings::auto_xp());

    // Weapon Skill has Offence only: 0 + 250 + 500
    assert_eq!(derived.characteristic(keys::WEAPON_SKILL).cost, 750);
    // Ballistic Skill has Finesse only: 0 + 250
    assert_eq!(derived.characteristic(keys::BALLISTIC_SKILL).cost, 250);
    // Toughness has Defence only: 0 + 250
    assert_eq!(derived.characteristic(keys::TOUGHNESS).cost, 250);
    // Dodge has Defence: (1 + 2) * 2 * 100
    assert_eq!(derived.skills["dodge"].cost, 600);
    // Starter at advance 0 costs nothing
    assert_eq!(derived.skills["awareness"].cost, 0);
    assert_eq!(derived.skills["charm"].cost, 0);
    // Ambidextrous has no matching aptitude
    let talent = derived.items.iter().find_map(Item::as_talent).unwrap();
    assert_eq!(talent.cost, 600);
    assert_eq!(derived.psy.cost, 1000);

    let xp = derived.experience;
    assert_eq!(xp.spent_characteristics, 1250);
    assert_eq!(xp.spent_skills, 600);
    assert_eq!(xp.spent_talents, 600);
    assert_eq!(xp.spent_psychic_powers, 1200);
    assert_eq!(xp.remaining, 5000 - 3650);
}

#[test]
fn test_derive_then_damage() {
    let derived = derive(&snapshot(), &default_settings());
    let columns = DamageColumns {
        amounts: vec!["9".into(), "12".into(), "4".into()],
        locations: vec!["ARMOUR.BODY".into(), "ARMOUR.HEAD".into(), "ARMOUR.LEFT_LEG".into()],
        penetrations: vec!["".into(), "5".into()],
        types: vec!["Impact".into(), "Energy".into(), "Rending".into()],
        righteous_fury: vec!["".into(), "".into(), "6".into()],
    };
    let events = parse_damage_rows(&columns, 1.0);
    let (after, outcome) = derived.receive_damage(&events);

    // 9 - 3 - 4 = 2 -> value 10, no overflow
    // 12 - 3 - 0 = 9 -> already at max, all critical
    // 4 - 3 - 3 = 0 with fury -> forced to 1 critical
    assert_eq!(after.wounds.value, 10);
    assert_eq!(after.wounds.critical, 10);
    assert_eq!(outcome.wounds_dealt(), 2);
    assert_eq!(outcome.critical_dealt(), 10);
    assert_eq!(outcome.critical_effects().count(), 0);
    assert_eq!(outcome.log.last().map(|e| e.damage_type.as_str()), Some("Rending"));

    // Derived fields are untouched by damage
    assert_eq!(after.armour, derived.armour);
}

#[test]
fn test_snapshot_survives_json_round_trip() {
    let derived = derive(&snapshot(), &SheetSettings::auto_xp());
    let back = Character::from_json(&derived.to_json().unwrap()).unwrap();
    assert_eq!(back, derived);
    assert_eq!(derive(&back, &SheetSettings::auto_xp()), derived);
}

fn event_strategy() -> impl Strategy<Value = DamageEvent> {
    (0..40i32, 0..8i32, 0..6usize, prop::bool::ANY).prop_map(|(amount, pen, loc, fury)| {
        DamageEvent::new(amount, ArmourLocation::all()[loc])
            .with_penetration(pen)
            .with_righteous_fury(if fury { 5 } else { 0 })
    })
}

proptest! {
    #[test]
    fn prop_bonus_is_tens_plus_unnatural(base in 0..100i32, advance in 0..6i32, unnatural in 0..4i32) {
        let mut characteristic = Characteristic::new("S", base, advance * 5);
        characteristic.unnatural = unnatural;
        characteristic.recompute(0);
        prop_assert_eq!(characteristic.total, base + advance * 5);
        prop_assert_eq!(characteristic.bonus, bonus_for(characteristic.total, unnatural));
        prop_assert_eq!(characteristic.bonus, characteristic.total / 10 + unnatural);
    }

    #[test]
    fn prop_skill_total_is_characteristic_plus_advance(base in 0..80i32, step in 0..5i32, fatigue in 0..10i32) {
        let mut character = Character::new("Scout")
            .with_characteristic(keys::AGILITY, Characteristic::new("Ag", base, 0))
            .with_skill("dodge", Skill::new("Ag", step * 10 - 20));
        character.fatigue.value = fatigue;
        let derived = derive(&character, &SheetSettings::default());
        let agility = derived.characteristic(keys::AGILITY).total;
        prop_assert_eq!(derived.skills["dodge"].total, agility + step * 10 - 20);
    }

    #[test]
    fn prop_armour_total_is_bonus_plus_value(tb in 0..8i32, value in 0..10i32, extra in 0..3i32) {
        let items = [
            Item::armour("Plate", value, ArmourLocation::all(), false),
            Item::armour("Ward", extra, &[ArmourLocation::Body], true),
        ];
        let set = calculate_armour(tb, &items);
        for (_, armour) in set.iter() {
            prop_assert_eq!(armour.total, tb + armour.value);
        }
        prop_assert_eq!(set.body.value, value + extra);
    }

    #[test]
    fn prop_remaining_is_value_minus_spent(value in 0..20000i32, other in 0..2000i32, rating in 0..6i32, auto in prop::bool::ANY) {
        let mut character = snapshot();
        character.experience.value = value;
        character.experience.spent_other = other;
        character.psy.rating = rating;
        let settings = if auto { SheetSettings::auto_xp() } else { SheetSettings::default() };
        let xp = derive(&character, &settings).experience;
        prop_assert_eq!(
            xp.total_spent,
            other + xp.spent_characteristics + xp.spent_skills + xp.spent_talents + xp.spent_psychic_powers
        );
        prop_assert_eq!(xp.remaining, value - xp.total_spent);
    }

    #[test]
    fn prop_wounds_never_exceed_max(
        max in 1..20i32,
        start in 0..20i32,
        tb in 0..6i32,
        events in prop::collection::vec(event_strategy(), 0..10)
    ) {
        let wounds = WoundState::new(max).with_value(start.min(max));
        let armour = calculate_armour(tb, std::iter::empty());
        let outcome = apply_damage(wounds, &armour, tb, &events);

        // One event at a time: value stays capped and critical never drops
        let mut state = wounds;
        for event in &events {
            let step = apply_damage(state, &armour, tb, std::slice::from_ref(event));
            prop_assert!(step.wounds.value <= step.wounds.max);
            prop_assert!(step.wounds.value >= state.value);
            prop_assert!(step.wounds.critical >= state.critical);
            state = step.wounds;
        }
        prop_assert_eq!(state, outcome.wounds);

        // Replaying the log reaches the same counters through the same bounds
        let (mut value, mut critical) = (wounds.value, wounds.critical);
        for entry in &outcome.log {
            prop_assert!(entry.amount >= 0);
            match entry.source {
                DamageSource::Wounds => value += entry.amount,
                DamageSource::Critical => {
                    prop_assert_eq!(value, max);
                    critical += entry.amount;
                }
                DamageSource::CriticalEffect => {}
            }
            prop_assert!(value <= max);
        }
        prop_assert_eq!((value, critical), (outcome.wounds.value, outcome.wounds.critical));
    }

    #[test]
    fn prop_fatigue_halves_exactly_when_above_bonus(
        base in -50..150i32,
        advance in 0..6i32,
        unnatural in -2..5i32,
        fatigue in 0..20i32
    ) {
        let mut characteristic = Characteristic::new("T", base, advance * 5);
        characteristic.unnatural = unnatural;
        characteristic.recompute(fatigue);

        let unpenalized = base + advance * 5;
        let halved = unpenalized.div_euclid(2) + unpenalized.rem_euclid(2);
        let penalized = fatigue > bonus_for(unpenalized, unnatural);
        if penalized {
            prop_assert_eq!(characteristic.total, halved);
        } else {
            prop_assert_eq!(characteristic.total, unpenalized);
        }
        prop_assert_eq!(characteristic.bonus, bonus_for(characteristic.total, unnatural));
        prop_assert_eq!(characteristic.unpenalized_total(), unpenalized);
        // Halving only leaves 0 and 1 unchanged
        if !(0..=1).contains(&unpenalized) {
            prop_assert_eq!(characteristic.is_fatigued(), penalized);
        }
    }
}
