use wfrp_engine::{
    describe, run_encounter, Bestiary, CombatResolver, Dice, Die, Encounter, EncounterConfig,
    EncounterError, Enemy, StatBlock, Weapon,
};

fn bestiary() -> Bestiary {
    Bestiary::builtin().unwrap()
}

fn scripted(values: Vec<i32>) -> Encounter {
    Encounter::new(CombatResolver::new(Dice::from_scripted(values)))
}

fn hero() -> Enemy {
    let stats = StatBlock {
        weapon_skill: 100,
        strength: 4,
        toughness: 40,
        agility: 5,
        wounds: 10,
        ..Default::default()
    };
    Enemy::new("hero", "Hero", stats, vec![], "Hand Weapon", 0).unwrap()
}

#[test]
fn entries_render_in_initiative_order() {
    let b = bestiary();
    let mut enc = scripted(vec![2, 7]);
    assert_eq!(enc.add(b.find_by_id("goblin").unwrap().clone()), 5);
    assert_eq!(enc.add(b.find_by_id("orc").unwrap().clone()), 9);

    insta::assert_snapshot!(enc.entry_lines().join("\n"), @r"
    Orc (Init: 9, W: 2/2)
    Goblin (Init: 5, W: 1/1)
    ");
    assert_eq!(enc.current_turn_label(), "Current: Orc (Round 1)");
    assert_eq!(enc.log()[0], "[INIT] Added Goblin to encounter (Initiative: 5)");
}

#[test]
fn repeated_enemies_get_numbered() {
    let b = bestiary();
    let gob = b.find_by_id("goblin").unwrap().clone();
    let mut enc = Encounter::from_seed(3);
    enc.add(gob.clone());
    enc.add(gob.clone());
    enc.add(gob);
    let entries = enc.tracker().entries();
    let mut ids: Vec<_> = entries.iter().map(|e| e.combatant.id()).collect();
    ids.sort();
    assert_eq!(ids, vec!["goblin", "goblin#2", "goblin#3"]);
    assert!(enc.tracker().find("goblin#2").unwrap().combatant.name() == "Goblin 2");
}

#[test]
fn next_turn_on_empty_encounter_is_a_no_op() {
    let mut enc = Encounter::from_seed(1);
    assert!(enc.next_turn().is_none());
    assert!(enc.log().is_empty());
    assert_eq!(enc.current_turn_label(), "No active encounter");
}

#[test]
fn turns_advance_and_clear_resets() {
    let b = bestiary();
    let mut enc = scripted(vec![2, 7]);
    enc.add(b.find_by_id("goblin").unwrap().clone());
    enc.add(b.find_by_id("orc").unwrap().clone());

    let current = enc.next_turn().unwrap();
    assert_eq!(current.combatant.id(), "goblin");
    enc.next_turn();
    assert_eq!(enc.current_turn_label(), "Current: Orc (Round 2)");
    assert!(enc.log().iter().any(|l| l.starts_with("[TURN] --- Next Turn ---")));

    enc.clear();
    assert!(enc.tracker().is_empty());
    assert_eq!(enc.log().last().unwrap(), "[CLEAR] Encounter cleared");
}

#[test]
fn free_rolls_are_logged() {
    let mut enc = scripted(vec![7]);
    assert_eq!(enc.roll(Die::D10), 7);
    assert_eq!(enc.take_log(), vec!["[ROLL] Rolled d10: 7".to_string()]);
    assert!(enc.log().is_empty());
}

#[test]
fn lethal_attack_removes_the_defender() {
    let b = bestiary();
    // hero init d10, goblin init d10, hit d100, damage d10, toughness d100
    let mut enc = scripted(vec![10, 1, 50, 6, 90]);
    enc.add(hero());
    enc.add(b.find_by_id("goblin").unwrap().clone());
    let weapon = Weapon::new("hand-weapon", "Hand Weapon", 1, "one-handed").unwrap();

    let res = enc.attack("hero", "goblin", &weapon).unwrap();
    assert!(res.hit);
    assert_eq!(res.damage, 4 + 1 + 3);
    assert!(enc.tracker().find("goblin").is_none());
    assert_eq!(enc.tracker().len(), 1);
    assert!(enc.log().iter().any(|l| l == "[STATE][Goblin] is slain"));
}

#[test]
fn wounds_are_written_back() {
    let mut enc = scripted(vec![10, 1, 50, 1, 90]);
    enc.add(hero());
    enc.add(Enemy::new("brute", "Brute", *hero().stats(), vec![], "", 0).unwrap());
    let club = Weapon::new("club", "Club", 0, "").unwrap();

    let res = enc.attack("hero", "brute", &club).unwrap();
    assert_eq!(res.damage, 4);
    let brute = &enc.tracker().find("brute").unwrap().combatant;
    assert_eq!(brute.current_wounds(), 6);
    assert!(enc.entry_lines().iter().any(|l| l.contains("W: 6/10")));
}

#[test]
fn unknown_combatants_are_errors() {
    let mut enc = Encounter::from_seed(5);
    enc.add(hero());
    let club = Weapon::new("club", "Club", 0, "").unwrap();
    assert_eq!(
        enc.attack("hero", "ghost", &club).unwrap_err(),
        EncounterError::UnknownCombatant("ghost".into())
    );
}

#[test]
fn combatants_cannot_attack_themselves() {
    let mut enc = scripted(vec![10, 1, 50]);
    enc.add(hero());
    let club = Weapon::new("club", "Club", 0, "").unwrap();
    assert_eq!(
        enc.attack("hero", "hero", &club).unwrap_err(),
        EncounterError::SelfAttack("hero".into())
    );
    assert_eq!(enc.tracker().find("hero").unwrap().combatant.current_wounds(), 10);
    assert!(!enc.log().iter().any(|l| l.starts_with("[ATTACK]")));
}

#[test]
fn stat_card() {
    let b = bestiary();
    insta::assert_snapshot!(describe(b.find_by_id("goblin").unwrap()), @r"
    === Goblin ===

    Statistics:
    WS: 3  BS: 3  S: 3  T: 3
    Ag: 3  Int: 2  WP: 2  Fel: 2
    A: 1  W: 1

    Weapon: Short Sword

    Abilities:
    • Cowardly: Must pass Will Power test to stand and fight if outnumbered
    ");
}

#[test]
fn seeded_runs_replay_exactly() {
    let cfg = EncounterConfig {
        seed: Some(2025),
        enemies: vec!["orc".into(), "goblin".into(), "skaven-clanrat".into()],
        turns: 12,
        ..Default::default()
    };
    let a = run_encounter(&cfg).unwrap();
    let b = run_encounter(&cfg).unwrap();
    assert_eq!(a.log, b.log);
    assert_eq!(a.entries, b.entries);
    assert!(a.turns_played <= 12);
    assert!(a.log.iter().filter(|l| l.starts_with("[INIT]")).count() == 3);
}

#[test]
fn run_needs_known_enemies() {
    let unknown = EncounterConfig { enemies: vec!["dragon".into()], ..Default::default() };
    assert!(run_encounter(&unknown).unwrap_err().to_string().contains("dragon"));

    let empty = EncounterConfig::default();
    assert!(run_encounter(&empty).is_err());
}
