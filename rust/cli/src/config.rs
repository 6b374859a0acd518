use serde::{Deserialize, Serialize};
use std::fs;

use chromatic_engine::dice::{DEFAULT_DICE_COUNT, DEFAULT_SIDES};
use chromatic_engine::hand::Hand;

/// Resolved CLI settings. Command-line flags override these per invocation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub seed: Option<u64>,
    pub hand_size: usize,
    pub dice: usize,
    pub dice_sides: u8,
    pub data_dir: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub seed: ValueSource,
    pub hand_size: ValueSource,
    pub dice: ValueSource,
    pub dice_sides: ValueSource,
    pub data_dir: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            seed: ValueSource::Default,
            hand_size: ValueSource::Default,
            dice: ValueSource::Default,
            dice_sides: ValueSource::Default,
            data_dir: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

/// Combat variants play with five cards; the engine default of ten is for
/// out-of-combat hands.
pub const DEFAULT_HAND_SIZE: usize = 5;

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            hand_size: DEFAULT_HAND_SIZE,
            dice: DEFAULT_DICE_COUNT,
            dice_sides: DEFAULT_SIDES,
            data_dir: "data".into(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => write!(f, "{}", msg),
        }
    }
}

/// Layers defaults, then the TOML file named by `CHROMATIC_CONFIG`, then
/// `CHROMATIC_*` variables, remembering where each value came from.
pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var("CHROMATIC_CONFIG")
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.hand_size {
            cfg.hand_size = v;
            sources.hand_size = ValueSource::File;
        }
        if let Some(v) = f.dice {
            cfg.dice = v;
            sources.dice = ValueSource::File;
        }
        if let Some(v) = f.dice_sides {
            cfg.dice_sides = v;
            sources.dice_sides = ValueSource::File;
        }
        if let Some(v) = f.data_dir {
            cfg.data_dir = v;
            sources.data_dir = ValueSource::File;
        }
    }

    if let Some(seed) = env_value("CHROMATIC_SEED") {
        cfg.seed = Some(parse_env(&seed, "seed")?);
        sources.seed = ValueSource::Env;
    }
    if let Some(size) = env_value("CHROMATIC_HAND_SIZE") {
        cfg.hand_size = parse_env(&size, "hand size")?;
        sources.hand_size = ValueSource::Env;
    }
    if let Some(dice) = env_value("CHROMATIC_DICE") {
        cfg.dice = parse_env(&dice, "dice count")?;
        sources.dice = ValueSource::Env;
    }
    if let Some(sides) = env_value("CHROMATIC_DICE_SIDES") {
        cfg.dice_sides = parse_env(&sides, "dice sides")?;
        sources.dice_sides = ValueSource::Env;
    }
    if let Some(dir) = env_value("CHROMATIC_DATA_DIR") {
        cfg.data_dir = dir;
        sources.data_dir = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    hand_size: Option<usize>,
    #[serde(default)]
    dice: Option<usize>,
    #[serde(default)]
    dice_sides: Option<u8>,
    #[serde(default)]
    data_dir: Option<String>,
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

fn parse_env<T: std::str::FromStr>(raw: &str, what: &str) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::Invalid(format!("Invalid {}: {}", what, raw)))
}

pub fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.hand_size == 0 || cfg.hand_size > Hand::DEFAULT_MAX_SIZE * 4 {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: hand_size must be in 1..={}",
            Hand::DEFAULT_MAX_SIZE * 4
        )));
    }
    if cfg.dice == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: dice must be >=1".into(),
        ));
    }
    if cfg.dice_sides < 2 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: dice_sides must be >=2".into(),
        ));
    }
    if cfg.data_dir.trim().is_empty() {
        return Err(ConfigError::Invalid(
            "Invalid configuration: data_dir must not be empty".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = Config::default();
        assert!(validate(&cfg).is_ok());
        assert_eq!(cfg.hand_size, 5);
        assert_eq!(cfg.dice, 5);
        assert_eq!(cfg.dice_sides, 6);
    }

    #[test]
    fn validate_rejects_degenerate_values() {
        let one_sided = Config {
            dice_sides: 1,
            ..Config::default()
        };
        assert!(validate(&one_sided).is_err());

        let no_hand = Config {
            hand_size: 0,
            ..Config::default()
        };
        assert!(validate(&no_hand).is_err());

        let no_dice = Config {
            dice: 0,
            ..Config::default()
        };
        assert!(validate(&no_dice).is_err());
    }

    #[test]
    fn file_config_fields_are_optional() {
        let f: FileConfig = toml::from_str("dice = 6\n").unwrap();
        assert_eq!(f.dice, Some(6));
        assert!(f.seed.is_none());
        assert!(f.data_dir.is_none());
    }
}
