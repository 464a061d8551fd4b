use wfrp_engine::{Ability, Enemy, StatBlock, Weapon};

fn orc() -> Enemy {
    let stats = StatBlock {
        weapon_skill: 35,
        ballistic_skill: 25,
        strength: 4,
        toughness: 4,
        agility: 25,
        intelligence: 20,
        will_power: 30,
        fellowship: 20,
        attacks: 1,
        wounds: 12,
    };
    let abilities = vec![Ability::new("Brutal", "+1 damage on critical hits").unwrap()];
    Enemy::new("orc", "Orc", stats, abilities, "Choppa", 0).unwrap()
}

#[test]
fn starts_at_full_wounds() {
    let e = orc();
    assert_eq!(e.current_wounds(), 12);
    assert!(e.is_alive());

    let hurt = Enemy::new("orc", "Orc", *e.stats(), vec![], "", 5).unwrap();
    assert_eq!(hurt.current_wounds(), 5);
}

#[test]
fn damage_then_heal_round_trips() {
    let e = orc();
    for d in 0..=12 {
        assert_eq!(e.take_damage(d).heal(d).current_wounds(), 12, "d = {}", d);
    }
    let mid = e.with_current_wounds(6);
    for d in 0..=6 {
        assert_eq!(mid.take_damage(d).heal(d).current_wounds(), 6);
    }
}

#[test]
fn wounds_clamp_at_both_ends() {
    let e = orc();
    assert_eq!(e.take_damage(50).current_wounds(), 0);
    assert_eq!(e.heal(50).current_wounds(), 12);
    assert_eq!(e.with_current_wounds(-3).current_wounds(), 0);
    assert!(!e.take_damage(12).is_alive());
}

#[test]
fn updates_leave_the_original_alone() {
    let e = orc();
    let hurt = e.take_damage(4);
    assert_eq!(e.current_wounds(), 12);
    assert_eq!(hurt.current_wounds(), 8);
    assert_eq!(hurt.id(), e.id());
}

#[test]
fn ability_lookup_ignores_case() {
    let e = orc();
    assert!(e.has_ability("brutal"));
    assert_eq!(e.ability("BRUTAL").unwrap().description(), "+1 damage on critical hits");
    assert!(e.ability("Cowardly").is_none());
}

#[test]
fn json_defaults_and_validation() {
    let e: Enemy = serde_json::from_str(
        r#"{"id":"rat","name":"Giant Rat","stats":{"weaponSkill":25,"ballisticSkill":0,
            "strength":2,"toughness":2,"agility":35,"intelligence":10,"willPower":10,
            "fellowship":5,"attacks":1,"wounds":5},"currentWounds":0}"#,
    )
    .unwrap();
    assert_eq!(e.current_wounds(), 5);
    assert!(e.abilities().is_empty());
    assert_eq!(e.weapon_name(), "");

    let blank = serde_json::from_str::<Enemy>(
        r#"{"id":" ","name":"Nobody","stats":{"weaponSkill":1,"ballisticSkill":1,
            "strength":1,"toughness":1,"agility":1,"intelligence":1,"willPower":1,
            "fellowship":1,"attacks":1,"wounds":1}}"#,
    );
    assert!(blank.unwrap_err().to_string().contains("enemy id cannot be empty"));

    let no_stats = serde_json::from_str::<Enemy>(r#"{"id":"x","name":"X"}"#);
    assert!(no_stats.is_err());
}

#[test]
fn serializes_with_camel_case_keys() {
    let json = serde_json::to_value(orc().take_damage(2)).unwrap();
    assert_eq!(json["stats"]["weaponSkill"], 35);
    assert_eq!(json["weaponName"], "Choppa");
    assert_eq!(json["currentWounds"], 10);

    let back: Enemy = serde_json::from_value(json).unwrap();
    assert_eq!(back.current_wounds(), 10);
}

#[test]
fn weapon_validation() {
    assert!(Weapon::new("axe", "Axe", -1, "").is_err());
    assert!(Weapon::new("", "Axe", 1, "").is_err());
    let w: Weapon = serde_json::from_str(r#"{"id":"axe","name":"Axe","damage":0}"#).unwrap();
    assert_eq!(w.traits(), "");
    let bad = serde_json::from_str::<Weapon>(r#"{"id":"axe","name":"Axe","damage":-2}"#);
    assert!(bad.unwrap_err().to_string().contains("negative"));
}
