use serde::Serialize;
use tracing::debug;

use crate::combat::CombatResolver;
use crate::model::Enemy;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InitiativeEntry {
    pub combatant: Enemy,
    pub initiative: i32,
}

/// Turn order for one encounter, highest initiative first.
///
/// The turn counter only ever grows; the acting entry and the round are both
/// derived from it.
#[derive(Debug, Clone, Default)]
pub struct InitiativeTracker {
    entries: Vec<InitiativeEntry>,
    turn: usize,
}

impl InitiativeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ties keep their insertion order (`sort_by` is stable).
    pub fn add_entry(&mut self, combatant: Enemy, initiative: i32) {
        debug!(combatant = combatant.name(), initiative, "initiative entry added");
        self.entries.push(InitiativeEntry { combatant, initiative });
        self.entries.sort_by(|a, b| b.initiative.cmp(&a.initiative));
    }

    pub fn add_rolled(&mut self, combatant: Enemy, resolver: &mut CombatResolver) -> i32 {
        let initiative = resolver.roll_initiative(&combatant);
        self.add_entry(combatant, initiative);
        initiative
    }

    /// Drops every entry for `id`. If the counter now points past the end it
    /// goes back to 0, which can jump the current turn.
    pub fn remove_entry(&mut self, id: &str) {
        self.entries.retain(|e| e.combatant.id() != id);
        if self.turn >= self.entries.len() {
            self.turn = 0;
        }
    }

    /// Replace the snapshot held for `combatant.id()`. Order is untouched.
    pub fn update_combatant(&mut self, combatant: &Enemy) -> bool {
        let mut found = false;
        for entry in self.entries.iter_mut().filter(|e| e.combatant.id() == combatant.id()) {
            entry.combatant = combatant.clone();
            found = true;
        }
        found
    }

    pub fn current_entry(&self) -> Option<&InitiativeEntry> {
        if self.entries.is_empty() {
            return None;
        }
        self.entries.get(self.turn % self.entries.len())
    }

    pub fn next_turn(&mut self) {
        self.turn += 1;
    }

    pub fn current_round(&self) -> usize {
        if self.entries.is_empty() {
            0
        } else {
            self.turn / self.entries.len() + 1
        }
    }

    pub fn reset(&mut self) {
        self.entries.clear();
        self.turn = 0;
    }

    pub fn entries(&self) -> Vec<InitiativeEntry> {
        self.entries.clone()
    }

    pub fn find(&self, id: &str) -> Option<&InitiativeEntry> {
        self.entries.iter().find(|e| e.combatant.id() == id)
    }

    pub fn turn(&self) -> usize {
        self.turn
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
