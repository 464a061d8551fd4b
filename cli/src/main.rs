use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand, ValueEnum};
use encoding_rs::Encoding;
use std::{fs, path::Path, path::PathBuf};
use tracing_subscriber::EnvFilter;
use wfrp_engine::{
    describe, run_encounter, Armoury, Bestiary, CombatResolver, Dice, Die, EncounterConfig,
};

#[derive(Copy, Clone, ValueEnum)]
enum DieArg {
    D100,
    D10,
    D6,
}

#[derive(Subcommand)]
enum Cmd {
    /// Roll dice; a --modifier turns it into a clamped d100 roll
    Roll {
        /// RNG seed for determinism (random when omitted)
        #[arg(long)]
        seed: Option<u64>,
        /// Which die to roll
        #[arg(long, value_enum, default_value_t = DieArg::D100)]
        die: DieArg,
        /// Any number of sides, overrides --die
        #[arg(long)]
        sides: Option<i32>,
        /// Number of dice to sum
        #[arg(long, default_value_t = 1)]
        count: i32,
        /// Modifier added to a single d100 roll (result stays within 1..=100)
        #[arg(long, allow_negative_numbers = true, conflicts_with_all = ["die", "sides", "count"])]
        modifier: Option<i32>,
    },
    /// Roll-under test against a characteristic
    Test {
        /// RNG seed for determinism (random when omitted)
        #[arg(long)]
        seed: Option<u64>,
        /// Characteristic value, e.g. 35
        #[arg(long)]
        characteristic: i32,
        /// Difficulty modifier added to the target
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        modifier: i32,
    },
    /// List the bestiary, or show one entry
    Bestiary {
        /// Bestiary JSON (built-in when omitted)
        #[arg(long)]
        file: Option<PathBuf>,
        /// Only enemies with this ability
        #[arg(long)]
        ability: Option<String>,
        /// Only enemies with at least this Weapon Skill
        #[arg(long)]
        min_ws: Option<i32>,
        /// Print the full stat block for this id
        #[arg(long)]
        show: Option<String>,
    },
    /// List the weapon catalog
    Weapons {
        /// Weapons JSON (built-in when omitted)
        #[arg(long)]
        file: Option<PathBuf>,
        /// Only weapons with this trait
        #[arg(long = "trait")]
        trait_name: Option<String>,
    },
    /// Resolve a single attack between two bestiary entries
    Attack {
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        attacker: String,
        #[arg(long)]
        defender: String,
        /// Weapon name (defaults to the attacker's listed weapon)
        #[arg(long)]
        weapon: Option<String>,
    },
    /// Parry attempt for a bestiary entry
    Parry {
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        defender: String,
    },
    /// Run an encounter from a config file and/or flags
    Encounter {
        /// YAML (or .json) encounter config
        #[arg(long)]
        config: Option<PathBuf>,
        /// Bestiary id to add; repeat for more combatants
        #[arg(long = "enemy")]
        enemies: Vec<String>,
        #[arg(long)]
        turns: Option<u32>,
        #[arg(long)]
        seed: Option<u64>,
        /// Print the report as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

#[derive(Parser)]
#[command(name = "wfrp")]
#[command(about = "Warhammer encounter manager")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

fn to_die(d: DieArg) -> Die {
    match d {
        DieArg::D100 => Die::D100,
        DieArg::D10 => Die::D10,
        DieArg::D6 => Die::D6,
    }
}

fn dice(seed: Option<u64>) -> Dice {
    seed.map_or_else(Dice::from_entropy, Dice::from_seed)
}

fn read_text_auto(path: &Path) -> anyhow::Result<String> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    if let Some((enc, bom_len)) = Encoding::for_bom(&bytes) {
        let (cow, _, _) = enc.decode(&bytes[bom_len..]);
        Ok(cow.into_owned())
    } else {
        Ok(String::from_utf8(bytes)?)
    }
}

fn load_bestiary(file: Option<&Path>) -> anyhow::Result<Bestiary> {
    Ok(match file {
        Some(p) => Bestiary::from_json_str(&read_text_auto(p)?)?,
        None => Bestiary::builtin()?,
    })
}

fn load_armoury(file: Option<&Path>) -> anyhow::Result<Armoury> {
    Ok(match file {
        Some(p) => Armoury::from_json_str(&read_text_auto(p)?)?,
        None => Armoury::builtin()?,
    })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Cmd::Roll {
            seed,
            die,
            sides,
            count,
            modifier,
        } => {
            let mut dice = dice(seed);
            if let Some(m) = modifier {
                println!("d100{:+} = {}", m, dice.roll_d100_with_modifier(m));
            } else {
                let sides = sides.unwrap_or(to_die(die).sides());
                let total = dice.roll_multiple(count, sides)?;
                println!("{}d{} = {}", count, sides, total);
            }
        }
        Cmd::Test {
            seed,
            characteristic,
            modifier,
        } => {
            let mut resolver = CombatResolver::new(dice(seed));
            let res = resolver.test_characteristic(characteristic, modifier);
            println!(
                "roll={} target={} => {} ({} degrees)",
                res.roll,
                res.target,
                if res.success { "SUCCESS" } else { "FAIL" },
                res.degrees
            );
        }
        Cmd::Bestiary {
            file,
            ability,
            min_ws,
            show,
        } => {
            let bestiary = load_bestiary(file.as_deref())?;
            if let Some(id) = show {
                let enemy = bestiary
                    .find_by_id(&id)
                    .ok_or_else(|| anyhow!("enemy '{}' not found", id))?;
                print!("{}", describe(enemy));
                return Ok(());
            }
            let mut enemies = match ability.as_deref() {
                Some(a) => bestiary.find_by_ability(a),
                None => bestiary.all().collect(),
            };
            if let Some(ws) = min_ws {
                let skilled = bestiary.find_by_min_weapon_skill(ws);
                enemies.retain(|e| skilled.iter().any(|s| s.id() == e.id()));
            }
            for e in enemies {
                let s = e.stats();
                println!(
                    "{:<16} {:<16} WS {:>3}  BS {:>3}  S {:>3}  T {:>3}  W {:>3}",
                    e.id(),
                    e.name(),
                    s.weapon_skill,
                    s.ballistic_skill,
                    s.strength,
                    s.toughness,
                    s.wounds
                );
            }
        }
        Cmd::Weapons { file, trait_name } => {
            let armoury = load_armoury(file.as_deref())?;
            let weapons = match trait_name.as_deref() {
                Some(t) => armoury.find_by_trait(t),
                None => armoury.all().collect(),
            };
            for w in weapons {
                println!("{:<16} {:<16} dmg {:>2}  [{}]", w.id(), w.name(), w.damage(), w.traits());
            }
        }
        Cmd::Attack {
            seed,
            attacker,
            defender,
            weapon,
        } => {
            let bestiary = Bestiary::builtin()?;
            let armoury = Armoury::builtin()?;
            let att = bestiary
                .find_by_id(&attacker)
                .ok_or_else(|| anyhow!("enemy '{}' not found", attacker))?;
            let def = bestiary
                .find_by_id(&defender)
                .ok_or_else(|| anyhow!("enemy '{}' not found", defender))?;
            let weapon_name = weapon.as_deref().unwrap_or(att.weapon_name());
            let w = armoury
                .find_by_name(weapon_name)
                .ok_or_else(|| anyhow!("weapon '{}' not found", weapon_name))?;

            let mut resolver = CombatResolver::new(dice(seed));
            let res = resolver.resolve_attack(att, def, w);
            if res.hit {
                println!(
                    "{} hits {} with {}: hit={} damage_roll={} toughness={} ({}) => {} damage",
                    att.name(),
                    def.name(),
                    w.name(),
                    res.hit_roll,
                    res.damage_roll,
                    res.toughness_roll,
                    if res.toughness_pass { "pass" } else { "fail" },
                    res.damage
                );
            } else {
                println!("{} misses {}: hit={}", att.name(), def.name(), res.hit_roll);
            }
        }
        Cmd::Parry { seed, defender } => {
            let bestiary = Bestiary::builtin()?;
            let def = bestiary
                .find_by_id(&defender)
                .ok_or_else(|| anyhow!("enemy '{}' not found", defender))?;
            let mut resolver = CombatResolver::new(dice(seed));
            let parried = resolver.resolve_parry(def);
            println!("{} => {}", def.name(), if parried { "PARRIED" } else { "FAIL" });
        }
        Cmd::Encounter {
            config,
            enemies,
            turns,
            seed,
            json,
        } => {
            let mut cfg = match config {
                Some(path) => EncounterConfig::load(path)?,
                None => EncounterConfig::default(),
            };
            cfg.enemies.extend(enemies);
            if let Some(t) = turns {
                cfg.turns = t;
            }
            if seed.is_some() {
                cfg.seed = seed;
            }

            let report = run_encounter(&cfg)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                for line in &report.log {
                    println!("{}", line);
                }
                println!();
                for line in &report.entries {
                    println!("{}", line);
                }
                println!("{}", report.current);
            }
        }
    }
    Ok(())
}
