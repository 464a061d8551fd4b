use serde::Serialize;
use tracing::debug;

use crate::model::{Enemy, Weapon};
use crate::Dice;

/// Outcome of a single melee attack. Rolls that never happened are 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AttackResult {
    pub hit: bool,
    pub damage: i32,
    pub hit_roll: i32,
    pub damage_roll: i32,
    pub toughness_roll: i32,
    pub toughness_pass: bool,
}

impl AttackResult {
    fn miss(hit_roll: i32) -> Self {
        Self {
            hit: false,
            damage: 0,
            hit_roll,
            damage_roll: 0,
            toughness_roll: 0,
            toughness_pass: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CharacteristicTestResult {
    pub success: bool,
    pub roll: i32,
    pub target: i32,
    /// Degrees of success (or failure): the margin in whole steps of 10.
    pub degrees: i32,
}

/// Roll-under combat rules. Holds no state besides its dice.
#[derive(Debug, Clone, Default)]
pub struct CombatResolver {
    dice: Dice,
}

impl CombatResolver {
    pub fn new(dice: Dice) -> Self {
        Self { dice }
    }

    pub fn dice_mut(&mut self) -> &mut Dice {
        &mut self.dice
    }

    /// WS test to hit, then S + weapon + d10/2 damage, then a Toughness test
    /// that soaks one point but never the last one.
    pub fn resolve_attack(&mut self, attacker: &Enemy, defender: &Enemy, weapon: &Weapon) -> AttackResult {
        let hit_roll = self.dice.roll_d100();
        if hit_roll > attacker.stats().weapon_skill {
            debug!(attacker = attacker.name(), hit_roll, "attack missed");
            return AttackResult::miss(hit_roll);
        }

        let damage_roll = self.dice.roll_d10();
        let raw = raw_damage(attacker.stats().strength, weapon.damage(), damage_roll);

        let toughness_roll = self.dice.roll_d100();
        let toughness_pass = toughness_roll <= defender.stats().toughness;
        let damage = if toughness_pass { raw.saturating_sub(1).max(1) } else { raw.max(0) };

        debug!(
            attacker = attacker.name(),
            defender = defender.name(),
            weapon = weapon.name(),
            hit_roll,
            damage_roll,
            toughness_roll,
            toughness_pass,
            damage,
            "attack hit"
        );
        AttackResult { hit: true, damage, hit_roll, damage_roll, toughness_roll, toughness_pass }
    }

    pub fn resolve_parry(&mut self, defender: &Enemy) -> bool {
        let roll = self.dice.roll_d100();
        let parried = roll <= defender.stats().weapon_skill;
        debug!(defender = defender.name(), roll, parried, "parry");
        parried
    }

    /// d10 + Agility.
    pub fn roll_initiative(&mut self, combatant: &Enemy) -> i32 {
        let roll = self.dice.roll_d10();
        debug!(combatant = combatant.name(), roll, "initiative");
        roll.saturating_add(combatant.stats().agility)
    }

    pub fn test_characteristic(&mut self, characteristic: i32, modifier: i32) -> CharacteristicTestResult {
        let target = characteristic.saturating_add(modifier);
        let roll = self.dice.roll_d100();
        CharacteristicTestResult {
            success: roll <= target,
            roll,
            target,
            degrees: i32::try_from(roll.abs_diff(target) / 10).unwrap_or(i32::MAX),
        }
    }
}

fn raw_damage(strength: i32, weapon_damage: i32, roll: i32) -> i32 {
    strength.saturating_add(weapon_damage).saturating_add(roll / 2)
}
