use std::{fs, path::Path};

use indexmap::IndexMap;
use serde::de::DeserializeOwned;

use crate::model::{Enemy, Weapon};

const BUILTIN_ENEMIES: &str = include_str!("../content/enemies.json");
const BUILTIN_WEAPONS: &str = include_str!("../content/weapons.json");

#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("failed to read {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {what} JSON")]
    Parse {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("duplicate {what} id '{id}'")]
    DuplicateId { what: &'static str, id: String },
}

fn read(path: &Path) -> Result<String, ContentError> {
    fs::read_to_string(path).map_err(|source| ContentError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Parse a JSON array and key it by id, keeping file order.
fn index<T: DeserializeOwned>(
    json: &str,
    what: &'static str,
    id_of: fn(&T) -> &str,
) -> Result<IndexMap<String, T>, ContentError> {
    let items: Vec<T> =
        serde_json::from_str(json).map_err(|source| ContentError::Parse { what, source })?;
    let mut map = IndexMap::with_capacity(items.len());
    for item in items {
        let id = id_of(&item).to_string();
        if map.contains_key(&id) {
            return Err(ContentError::DuplicateId { what, id });
        }
        map.insert(id, item);
    }
    Ok(map)
}

/// Enemy catalog.
#[derive(Debug, Clone, Default)]
pub struct Bestiary {
    enemies: IndexMap<String, Enemy>,
}

impl Bestiary {
    pub fn builtin() -> Result<Self, ContentError> {
        Self::from_json_str(BUILTIN_ENEMIES)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ContentError> {
        let enemies = index(json, "enemy", Enemy::id)?;
        tracing::debug!(count = enemies.len(), "bestiary loaded");
        Ok(Self { enemies })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ContentError> {
        Self::from_json_str(&read(path.as_ref())?)
    }

    pub fn all(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.values()
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Enemy> {
        self.enemies.get(id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Enemy> {
        self.all().find(|e| e.name().eq_ignore_ascii_case(name))
    }

    pub fn find_by_ability(&self, ability: &str) -> Vec<&Enemy> {
        self.all().filter(|e| e.has_ability(ability)).collect()
    }

    pub fn find_by_min_weapon_skill(&self, min: i32) -> Vec<&Enemy> {
        self.all().filter(|e| e.stats().weapon_skill >= min).collect()
    }

    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }
}

/// Weapon catalog.
#[derive(Debug, Clone, Default)]
pub struct Armoury {
    weapons: IndexMap<String, Weapon>,
}

impl Armoury {
    pub fn builtin() -> Result<Self, ContentError> {
        Self::from_json_str(BUILTIN_WEAPONS)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ContentError> {
        let weapons = index(json, "weapon", Weapon::id)?;
        tracing::debug!(count = weapons.len(), "armoury loaded");
        Ok(Self { weapons })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ContentError> {
        Self::from_json_str(&read(path.as_ref())?)
    }

    pub fn all(&self) -> impl Iterator<Item = &Weapon> {
        self.weapons.values()
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Weapon> {
        self.weapons.get(id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Weapon> {
        self.all().find(|w| w.name().eq_ignore_ascii_case(name))
    }

    pub fn find_by_trait(&self, name: &str) -> Vec<&Weapon> {
        self.all().filter(|w| w.has_trait(name)).collect()
    }

    pub fn len(&self) -> usize {
        self.weapons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weapons.is_empty()
    }
}
