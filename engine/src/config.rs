use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::content::{Armoury, Bestiary};
use crate::Dice;

const DEFAULT_TURNS: u32 = 10;

/// Encounter setup, usually read from a YAML file:
///
/// ```yaml
/// seed: 2025
/// enemies: [orc, goblin, goblin]
/// turns: 12
/// bestiary_path: my_bestiary.json
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct EncounterConfig {
    /// Fixed seed for a replayable session; entropy when absent.
    pub seed: Option<u64>,
    pub bestiary_path: Option<PathBuf>,
    pub weapons_path: Option<PathBuf>,
    /// Bestiary ids to add, in order. Repeats are allowed.
    pub enemies: Vec<String>,
    pub turns: u32,
}

impl Default for EncounterConfig {
    fn default() -> Self {
        Self {
            seed: None,
            bestiary_path: None,
            weapons_path: None,
            enemies: Vec::new(),
            turns: DEFAULT_TURNS,
        }
    }
}

impl EncounterConfig {
    /// `.json` files are read as JSON, anything else as YAML. Relative content
    /// paths are taken relative to the config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read encounter config: {}", path.display()))?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let cfg = if is_json {
            Self::from_json_str(&text)
        } else {
            Self::from_yaml_str(&text)
        }
        .with_context(|| format!("failed to parse encounter config: {}", path.display()))?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Ok(cfg.relative_to(base))
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    fn relative_to(mut self, base: &Path) -> Self {
        let fix = |p: PathBuf| if p.is_relative() { base.join(p) } else { p };
        self.bestiary_path = self.bestiary_path.map(fix);
        self.weapons_path = self.weapons_path.map(fix);
        self
    }

    pub fn dice(&self) -> Dice {
        self.seed.map_or_else(Dice::from_entropy, Dice::from_seed)
    }

    pub fn bestiary(&self) -> Result<Bestiary> {
        match &self.bestiary_path {
            Some(p) => Bestiary::load(p)
                .with_context(|| format!("failed to load bestiary: {}", p.display())),
            None => Ok(Bestiary::builtin()?),
        }
    }

    pub fn armoury(&self) -> Result<Armoury> {
        match &self.weapons_path {
            Some(p) => Armoury::load(p)
                .with_context(|| format!("failed to load weapons: {}", p.display())),
            None => Ok(Armoury::builtin()?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaml_fills_defaults() {
        let cfg = EncounterConfig::from_yaml_str("enemies: [orc, goblin]\n").unwrap();
        assert_eq!(cfg.enemies, vec!["orc", "goblin"]);
        assert_eq!(cfg.turns, DEFAULT_TURNS);
        assert_eq!(cfg.seed, None);
    }

    #[test]
    fn content_paths_follow_config_dir() {
        let cfg = EncounterConfig {
            bestiary_path: Some("beasts.json".into()),
            weapons_path: Some("/abs/weapons.json".into()),
            ..Default::default()
        }
        .relative_to(Path::new("campaign"));
        assert_eq!(cfg.bestiary_path, Some(PathBuf::from("campaign/beasts.json")));
        assert_eq!(cfg.weapons_path, Some(PathBuf::from("/abs/weapons.json")));
    }
}
