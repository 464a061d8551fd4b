use serde::{Deserialize, Serialize};

/// Construction-time data errors. These mean the bundled data is broken, not
/// that something went wrong at the table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("{kind} id cannot be empty")]
    EmptyId { kind: &'static str },
    #[error("{kind} name cannot be empty")]
    EmptyName { kind: &'static str },
    #[error("weapon damage cannot be negative (got {0})")]
    NegativeDamage(i32),
}

fn require(value: String, err: ModelError) -> Result<String, ModelError> {
    if value.trim().is_empty() { Err(err) } else { Ok(value) }
}

/// WFRP 2e main and secondary profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatBlock {
    pub weapon_skill: i32,
    pub ballistic_skill: i32,
    pub strength: i32,
    pub toughness: i32,
    pub agility: i32,
    pub intelligence: i32,
    pub will_power: i32,
    pub fellowship: i32,
    pub attacks: i32,
    pub wounds: i32,
}

/// A named trait or rules note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AbilityRecord")]
pub struct Ability {
    name: String,
    description: String,
}

#[derive(Deserialize)]
struct AbilityRecord {
    name: String,
    #[serde(default)]
    description: Option<String>,
}

impl TryFrom<AbilityRecord> for Ability {
    type Error = ModelError;

    fn try_from(r: AbilityRecord) -> Result<Self, Self::Error> {
        Ability::new(r.name, r.description.unwrap_or_default())
    }
}

impl Ability {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Result<Self, ModelError> {
        Ok(Self {
            name: require(name.into(), ModelError::EmptyName { kind: "ability" })?,
            description: description.into(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// A bestiary entry with its current wound state.
///
/// Values are never mutated in place: damage and healing return a new `Enemy`,
/// so older copies stay valid snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "EnemyRecord", into = "EnemyRecord")]
pub struct Enemy {
    id: String,
    name: String,
    stats: StatBlock,
    abilities: Vec<Ability>,
    weapon_name: String,
    current_wounds: i32,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EnemyRecord {
    id: String,
    name: String,
    stats: StatBlock,
    #[serde(default)]
    abilities: Vec<Ability>,
    #[serde(default)]
    weapon_name: Option<String>,
    #[serde(default)]
    current_wounds: i32,
}

impl TryFrom<EnemyRecord> for Enemy {
    type Error = ModelError;

    fn try_from(r: EnemyRecord) -> Result<Self, Self::Error> {
        Enemy::new(
            r.id,
            r.name,
            r.stats,
            r.abilities,
            r.weapon_name.unwrap_or_default(),
            r.current_wounds,
        )
    }
}

impl From<Enemy> for EnemyRecord {
    fn from(e: Enemy) -> Self {
        Self {
            id: e.id,
            name: e.name,
            stats: e.stats,
            abilities: e.abilities,
            weapon_name: Some(e.weapon_name),
            current_wounds: e.current_wounds,
        }
    }
}

impl Enemy {
    /// A non-positive `current_wounds` starts the enemy at full wounds.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        stats: StatBlock,
        abilities: Vec<Ability>,
        weapon_name: impl Into<String>,
        current_wounds: i32,
    ) -> Result<Self, ModelError> {
        Ok(Self {
            id: require(id.into(), ModelError::EmptyId { kind: "enemy" })?,
            name: require(name.into(), ModelError::EmptyName { kind: "enemy" })?,
            stats,
            abilities,
            weapon_name: weapon_name.into(),
            current_wounds: if current_wounds <= 0 { stats.wounds } else { current_wounds },
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stats(&self) -> &StatBlock {
        &self.stats
    }

    pub fn abilities(&self) -> &[Ability] {
        &self.abilities
    }

    pub fn weapon_name(&self) -> &str {
        &self.weapon_name
    }

    pub fn current_wounds(&self) -> i32 {
        self.current_wounds
    }

    pub fn max_wounds(&self) -> i32 {
        self.stats.wounds
    }

    pub fn is_alive(&self) -> bool {
        self.current_wounds > 0
    }

    pub fn has_ability(&self, name: &str) -> bool {
        self.ability(name).is_some()
    }

    pub fn ability(&self, name: &str) -> Option<&Ability> {
        self.abilities.iter().find(|a| a.name.eq_ignore_ascii_case(name))
    }

    /// Copy with wounds clamped into `[0, max]`. Zero sticks here; only
    /// construction treats it as "unset".
    pub fn with_current_wounds(&self, wounds: i32) -> Self {
        Self {
            current_wounds: wounds.min(self.stats.wounds).max(0),
            ..self.clone()
        }
    }

    // Callers build the new id/name from an already validated one.
    pub(crate) fn with_identity(&self, id: String, name: String) -> Self {
        Self { id, name, ..self.clone() }
    }

    pub fn take_damage(&self, damage: i32) -> Self {
        self.with_current_wounds(self.current_wounds.saturating_sub(damage))
    }

    pub fn heal(&self, amount: i32) -> Self {
        self.with_current_wounds(self.current_wounds.saturating_add(amount))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WeaponRecord")]
pub struct Weapon {
    id: String,
    name: String,
    damage: i32,
    traits: String,
}

#[derive(Deserialize)]
struct WeaponRecord {
    id: String,
    name: String,
    damage: i32,
    #[serde(default)]
    traits: Option<String>,
}

impl TryFrom<WeaponRecord> for Weapon {
    type Error = ModelError;

    fn try_from(r: WeaponRecord) -> Result<Self, Self::Error> {
        Weapon::new(r.id, r.name, r.damage, r.traits.unwrap_or_default())
    }
}

impl Weapon {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        damage: i32,
        traits: impl Into<String>,
    ) -> Result<Self, ModelError> {
        if damage < 0 {
            return Err(ModelError::NegativeDamage(damage));
        }
        Ok(Self {
            id: require(id.into(), ModelError::EmptyId { kind: "weapon" })?,
            name: require(name.into(), ModelError::EmptyName { kind: "weapon" })?,
            damage,
            traits: traits.into(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn damage(&self) -> i32 {
        self.damage
    }

    /// Raw comma-separated trait text.
    pub fn traits(&self) -> &str {
        &self.traits
    }

    /// Case-insensitive substring match over the trait text.
    pub fn has_trait(&self, name: &str) -> bool {
        self.traits.to_lowercase().contains(&name.to_lowercase())
    }

    pub fn traits_list(&self) -> Vec<&str> {
        self.traits
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect()
    }
}
