use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub mod api;
pub mod combat;
pub mod config;
pub mod content;
pub mod encounter;
pub mod initiative;
pub mod model;

pub use api::{run_encounter, EncounterReport};
pub use combat::{AttackResult, CharacteristicTestResult, CombatResolver};
pub use config::EncounterConfig;
pub use content::{Armoury, Bestiary, ContentError};
pub use encounter::{describe, Encounter, EncounterError};
pub use initiative::{InitiativeEntry, InitiativeTracker};
pub use model::{Ability, Enemy, ModelError, StatBlock, Weapon};

/// The dice the rules actually call for.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Die { D100, D10, D6 }

impl Die {
    pub fn sides(self) -> i32 {
        match self {
            Die::D100 => 100,
            Die::D10 => 10,
            Die::D6 => 6,
        }
    }
}

impl std::fmt::Display for Die {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "d{}", self.sides())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DiceError {
    #[error("a die needs at least one side, got {0}")]
    InvalidSides(i32),
    #[error("cannot roll a negative number of dice ({0})")]
    NegativeCount(i32),
    #[error("{count}d{sides} does not fit in an i32 total")]
    Overflow { count: i32, sides: i32 },
}

#[derive(Debug, Clone)]
enum Source {
    Rng(ChaCha8Rng),
    /// Replays fixed values in a cycle; used to pin down exact roll sequences.
    Scripted { values: Vec<i32>, next: usize },
}

/// Owns its generator state. Not meant to be shared between callers.
#[derive(Debug, Clone)]
pub struct Dice { source: Source }

impl Dice {
    pub fn from_seed(seed: u64) -> Self {
        Self { source: Source::Rng(ChaCha8Rng::seed_from_u64(seed)) }
    }

    pub fn from_entropy() -> Self {
        Self { source: Source::Rng(ChaCha8Rng::from_entropy()) }
    }

    /// Each scripted value is clamped into `[1, sides]` of the die it lands on.
    /// An empty script always rolls 1.
    pub fn from_scripted(values: Vec<i32>) -> Self {
        Self { source: Source::Scripted { values, next: 0 } }
    }

    // `sides` must already be known positive.
    fn roll_die(&mut self, sides: i32) -> i32 {
        match &mut self.source {
            Source::Rng(rng) => rng.gen_range(1..=sides),
            Source::Scripted { values, next } => {
                let value = values
                    .get(*next % values.len().max(1))
                    .copied()
                    .unwrap_or(1);
                *next += 1;
                value.clamp(1, sides)
            }
        }
    }

    /// Uniform roll in `[1, sides]`.
    pub fn roll_bounded(&mut self, sides: i32) -> Result<i32, DiceError> {
        if sides <= 0 {
            return Err(DiceError::InvalidSides(sides));
        }
        Ok(self.roll_die(sides))
    }

    pub fn roll(&mut self, die: Die) -> i32 {
        self.roll_die(die.sides())
    }

    pub fn roll_d100(&mut self) -> i32 {
        self.roll(Die::D100)
    }

    pub fn roll_d10(&mut self) -> i32 {
        self.roll(Die::D10)
    }

    pub fn roll_d6(&mut self) -> i32 {
        self.roll(Die::D6)
    }

    /// Sum of `count` independent rolls. Zero dice sum to zero.
    pub fn roll_multiple(&mut self, count: i32, sides: i32) -> Result<i32, DiceError> {
        if count < 0 {
            return Err(DiceError::NegativeCount(count));
        }
        if count == 0 {
            return Ok(0);
        }
        if sides <= 0 {
            return Err(DiceError::InvalidSides(sides));
        }
        (0..count).try_fold(0i32, |total, _| {
            total
                .checked_add(self.roll_die(sides))
                .ok_or(DiceError::Overflow { count, sides })
        })
    }

    /// d100 plus a modifier, kept on the percentile scale.
    pub fn roll_d100_with_modifier(&mut self, modifier: i32) -> i32 {
        self.roll_d100().saturating_add(modifier).clamp(1, 100)
    }

    /// Roll-under test: succeeds when the d100 is at or below `target`.
    pub fn test_against(&mut self, target: i32) -> bool {
        self.roll_d100() <= target
    }

    pub fn test_against_with_modifier(&mut self, target: i32, modifier: i32) -> bool {
        self.roll_d100_with_modifier(modifier) <= target
    }
}

impl Default for Dice {
    fn default() -> Self {
        Self::from_entropy()
    }
}
