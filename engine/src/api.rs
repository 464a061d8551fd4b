use anyhow::{anyhow, bail, Result};
use serde::Serialize;

use crate::combat::CombatResolver;
use crate::config::EncounterConfig;
use crate::content::Armoury;
use crate::encounter::Encounter;
use crate::model::{Enemy, Weapon};

const FALLBACK_WEAPON_ID: &str = "hand-weapon";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct EncounterReport {
    pub turns_played: u32,
    pub round: usize,
    pub current: String,
    pub entries: Vec<String>,
    pub log: Vec<String>,
}

/// Build the configured encounter and let it play out for `cfg.turns` turns.
///
/// Each turn the acting combatant attacks the first other living entry in
/// initiative order with its listed weapon.
pub fn run_encounter(cfg: &EncounterConfig) -> Result<EncounterReport> {
    let bestiary = cfg.bestiary()?;
    let armoury = cfg.armoury()?;

    let mut encounter = Encounter::new(CombatResolver::new(cfg.dice()));
    for id in &cfg.enemies {
        let enemy = bestiary
            .find_by_id(id)
            .cloned()
            .ok_or_else(|| anyhow!("enemy '{}' not found in bestiary", id))?;
        encounter.add(enemy);
    }
    if encounter.tracker().is_empty() {
        bail!("encounter has no combatants");
    }

    let mut turns_played = 0;
    while turns_played < cfg.turns {
        let Some(current) = encounter.tracker().current_entry() else {
            break;
        };
        let attacker = current.combatant.clone();
        let target = encounter
            .tracker()
            .entries()
            .into_iter()
            .find(|e| e.combatant.id() != attacker.id() && e.combatant.is_alive());
        let Some(target) = target else {
            break;
        };

        let weapon = weapon_for(&armoury, &attacker)?;
        encounter.attack(attacker.id(), target.combatant.id(), &weapon)?;
        turns_played += 1;
        encounter.next_turn();
    }

    Ok(EncounterReport {
        turns_played,
        round: encounter.tracker().current_round(),
        current: encounter.current_turn_label(),
        entries: encounter.entry_lines(),
        log: encounter.take_log(),
    })
}

fn weapon_for(armoury: &Armoury, enemy: &Enemy) -> Result<Weapon> {
    let listed = armoury
        .find_by_name(enemy.weapon_name())
        .or_else(|| armoury.find_by_id(FALLBACK_WEAPON_ID));
    match listed {
        Some(w) => Ok(w.clone()),
        None => Ok(Weapon::new(FALLBACK_WEAPON_ID, "Hand Weapon", 1, "one-handed")?),
    }
}
