use tracing::info;

use crate::combat::{AttackResult, CombatResolver};
use crate::initiative::{InitiativeEntry, InitiativeTracker};
use crate::model::{Enemy, Weapon};
use crate::{Dice, Die};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncounterError {
    #[error("no combatant '{0}' in this encounter")]
    UnknownCombatant(String),
    #[error("'{0}' cannot attack itself")]
    SelfAttack(String),
}

/// One table session: turn order, dice and a running combat log.
#[derive(Debug, Clone, Default)]
pub struct Encounter {
    resolver: CombatResolver,
    tracker: InitiativeTracker,
    log: Vec<String>,
}

impl Encounter {
    pub fn new(resolver: CombatResolver) -> Self {
        Self { resolver, tracker: InitiativeTracker::new(), log: Vec::new() }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self::new(CombatResolver::new(Dice::from_seed(seed)))
    }

    pub fn tracker(&self) -> &InitiativeTracker {
        &self.tracker
    }

    pub fn resolver_mut(&mut self) -> &mut CombatResolver {
        &mut self.resolver
    }

    /// Roll initiative and join the encounter. A second copy of the same
    /// bestiary entry gets a numbered id and name ("goblin#2", "Goblin 2").
    pub fn add(&mut self, enemy: Enemy) -> i32 {
        let enemy = self.unique(enemy);
        let name = enemy.name().to_string();
        let initiative = self.tracker.add_rolled(enemy, &mut self.resolver);
        info!(combatant = %name, initiative, "joined encounter");
        self.log
            .push(format!("[INIT] Added {} to encounter (Initiative: {})", name, initiative));
        initiative
    }

    fn unique(&self, enemy: Enemy) -> Enemy {
        if self.tracker.find(enemy.id()).is_none() {
            return enemy;
        }
        let n = (2..)
            .find(|n| self.tracker.find(&format!("{}#{}", enemy.id(), n)).is_none())
            .unwrap_or(2);
        enemy.with_identity(
            format!("{}#{}", enemy.id(), n),
            format!("{} {}", enemy.name(), n),
        )
    }

    pub fn clear(&mut self) {
        self.tracker.reset();
        info!("encounter cleared");
        self.log.push("[CLEAR] Encounter cleared".to_string());
    }

    /// Does nothing while nobody is in the encounter.
    pub fn next_turn(&mut self) -> Option<&InitiativeEntry> {
        if self.tracker.is_empty() {
            return None;
        }
        self.tracker.next_turn();
        let line = format!("[TURN] --- Next Turn --- {}", self.current_turn_label());
        self.log.push(line);
        self.tracker.current_entry()
    }

    pub fn roll(&mut self, die: Die) -> i32 {
        let value = self.resolver.dice_mut().roll(die);
        self.log.push(format!("[ROLL] Rolled {}: {}", die, value));
        value
    }

    /// Resolve one attack and write the defender's new wounds back into the
    /// turn order. A defender reduced to 0 wounds leaves the encounter.
    /// Attacker and defender must be different combatants.
    pub fn attack(
        &mut self,
        attacker_id: &str,
        defender_id: &str,
        weapon: &Weapon,
    ) -> Result<AttackResult, EncounterError> {
        if attacker_id == defender_id {
            return Err(EncounterError::SelfAttack(attacker_id.to_string()));
        }
        let attacker = self.combatant(attacker_id)?;
        let defender = self.combatant(defender_id)?;

        let res = self.resolver.resolve_attack(&attacker, &defender, weapon);
        self.log.push(format!(
            "[ATTACK][{}] {} vs {}: d100={} vs WS {} → {}",
            attacker.name(),
            weapon.name(),
            defender.name(),
            res.hit_roll,
            attacker.stats().weapon_skill,
            if res.hit { "HIT" } else { "MISS" }
        ));
        if !res.hit {
            return Ok(res);
        }

        self.log.push(format!(
            "[DMG][{}] d10={} toughness d100={} vs T {} ({}) → {} damage",
            attacker.name(),
            res.damage_roll,
            res.toughness_roll,
            defender.stats().toughness,
            if res.toughness_pass { "soaked" } else { "failed" },
            res.damage
        ));

        let wounded = defender.take_damage(res.damage);
        self.tracker.update_combatant(&wounded);
        self.log.push(format!(
            "[HP][{}] {} → {}",
            defender.name(),
            defender.current_wounds(),
            wounded.current_wounds()
        ));

        if !wounded.is_alive() {
            info!(combatant = wounded.name(), "slain");
            self.log.push(format!("[STATE][{}] is slain", wounded.name()));
            self.tracker.remove_entry(wounded.id());
        }
        Ok(res)
    }

    fn combatant(&self, id: &str) -> Result<Enemy, EncounterError> {
        self.tracker
            .find(id)
            .map(|e| e.combatant.clone())
            .ok_or_else(|| EncounterError::UnknownCombatant(id.to_string()))
    }

    pub fn entry_lines(&self) -> Vec<String> {
        self.tracker
            .entries()
            .iter()
            .map(|e| {
                format!(
                    "{} (Init: {}, W: {}/{})",
                    e.combatant.name(),
                    e.initiative,
                    e.combatant.current_wounds(),
                    e.combatant.max_wounds()
                )
            })
            .collect()
    }

    pub fn current_turn_label(&self) -> String {
        match self.tracker.current_entry() {
            Some(entry) => format!(
                "Current: {} (Round {})",
                entry.combatant.name(),
                self.tracker.current_round()
            ),
            None => "No active encounter".to_string(),
        }
    }

    pub fn log(&self) -> &[String] {
        &self.log
    }

    pub fn take_log(&mut self) -> Vec<String> {
        std::mem::take(&mut self.log)
    }
}

/// Stat block card for the details pane.
pub fn describe(enemy: &Enemy) -> String {
    let s = enemy.stats();
    let mut out = format!("=== {} ===\n\n", enemy.name());
    out.push_str("Statistics:\n");
    out.push_str(&format!(
        "WS: {}  BS: {}  S: {}  T: {}\n",
        s.weapon_skill, s.ballistic_skill, s.strength, s.toughness
    ));
    out.push_str(&format!(
        "Ag: {}  Int: {}  WP: {}  Fel: {}\n",
        s.agility, s.intelligence, s.will_power, s.fellowship
    ));
    out.push_str(&format!("A: {}  W: {}\n\n", s.attacks, s.wounds));

    if !enemy.weapon_name().is_empty() {
        out.push_str(&format!("Weapon: {}\n\n", enemy.weapon_name()));
    }
    if !enemy.abilities().is_empty() {
        out.push_str("Abilities:\n");
        for a in enemy.abilities() {
            out.push_str(&format!("• {}: {}\n", a.name(), a.description()));
        }
    }
    out
}
