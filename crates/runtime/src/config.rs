//! Script configuration structures and loaders.
//!
//! Every world-specific constant a script relies on (marketplace region, clerk
//! name, currency id, bank access points, wait budgets) lives here so tests and
//! alternative worlds can inject their own values.
use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use world_core::{Area, ErrorSeverity, ItemId, Skill, WorldError};

/// Environment variable naming a TOML configuration file.
pub const CONFIG_PATH_ENV: &str = "QUESTBOT_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl WorldError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            ConfigError::Io { .. } => "CONFIG_IO",
            ConfigError::Parse { .. } => "CONFIG_PARSE",
        }
    }
}

/// Configuration shared by every helper in a [`ScriptContext`](crate::ScriptContext).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptConfig {
    pub marketplace: MarketplaceConfig,
    pub bank: BankConfig,
    pub waits: WaitConfig,
    pub combat: CombatConfig,
    pub magic: MagicConfig,
    pub events: EventConfig,
}

impl ScriptConfig {
    /// Parses a TOML document. Missing sections and fields keep their defaults.
    pub fn from_toml_str(source: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(source).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source, path)
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `QUESTBOT_CONFIG` - TOML file to start from (default: built-in values)
    /// - `QUESTBOT_WAIT_TICKS` - Default wait budget (default: 100)
    /// - `QUESTBOT_BANK_OPEN_TICKS` - Budget for the bank to open (default: 10)
    /// - `QUESTBOT_MARKET_OPEN_TICKS` - Budget for the marketplace to open (default: 100)
    /// - `QUESTBOT_PURCHASE_TICKS` - Budget for bought goods to arrive (default: 100)
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = match env::var_os(CONFIG_PATH_ENV) {
            Some(path) => Self::load(PathBuf::from(path))?,
            None => Self::default(),
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Applies `QUESTBOT_*_TICKS` overrides on top of the current values.
    pub fn apply_env_overrides(&mut self) {
        if let Some(ticks) = read_env::<u32>("QUESTBOT_WAIT_TICKS") {
            self.waits.default_ticks = ticks.max(1);
        }
        if let Some(ticks) = read_env::<u32>("QUESTBOT_BANK_OPEN_TICKS") {
            self.waits.bank_open_ticks = ticks.max(1);
        }
        if let Some(ticks) = read_env::<u32>("QUESTBOT_MARKET_OPEN_TICKS") {
            self.waits.market_open_ticks = ticks.max(1);
        }
        if let Some(ticks) = read_env::<u32>("QUESTBOT_PURCHASE_TICKS") {
            self.waits.purchase_ticks = ticks.max(1);
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketplaceConfig {
    /// Region the actor must stand in to trade.
    pub area: Area,
    pub clerk: String,
    /// Item used to pay for purchases.
    pub currency: ItemId,
}

impl Default for MarketplaceConfig {
    fn default() -> Self {
        Self {
            area: Area::rectangle(3159, 3493, 3169, 3485),
            clerk: "Grand Exchange Clerk".to_owned(),
            currency: ItemId(995),
        }
    }
}

/// Bank access points, in priority order: bankers, then booths, then chests.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BankConfig {
    pub bankers: Vec<String>,
    pub booths: Vec<String>,
    pub chests: Vec<String>,
    /// Known bank regions; the nearest is walked to when the bank is closed.
    pub locations: Vec<Area>,
}

impl Default for BankConfig {
    fn default() -> Self {
        Self {
            bankers: vec!["Banker".to_owned()],
            booths: vec!["Bank booth".to_owned()],
            chests: vec!["Bank chest".to_owned()],
            locations: vec![
                // Grand Exchange
                Area::rectangle(3160, 3485, 3170, 3495),
                // Varrock west
                Area::rectangle(3180, 3433, 3185, 3447),
                // Varrock east
                Area::rectangle(3250, 3419, 3257, 3423),
                // Lumbridge castle, top floor
                Area::rectangle_on(3207, 3215, 3210, 3222, 2),
                // Draynor
                Area::rectangle(3092, 3240, 3097, 3246),
                // Falador east
                Area::rectangle(3009, 3353, 3018, 3358),
            ],
        }
    }
}

/// Tick budgets for the waits issued by helpers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaitConfig {
    pub default_ticks: u32,
    pub bank_open_ticks: u32,
    pub market_open_ticks: u32,
    pub purchase_ticks: u32,
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            default_ticks: 100,
            bank_open_ticks: 10,
            market_open_ticks: 100,
            purchase_ticks: 100,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// Skills whose drained level means the actor should restore before fighting.
    pub restore_skills: Vec<Skill>,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            restore_skills: vec![Skill::Attack, Skill::Defence, Skill::Strength],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MagicConfig {
    pub home_teleport: String,
}

impl Default for MagicConfig {
    fn default() -> Self {
        Self {
            home_teleport: "Lumbridge Home Teleport".to_owned(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventConfig {
    /// Per-topic broadcast capacity.
    pub capacity: usize,
}

impl Default for EventConfig {
    fn default() -> Self {
        Self { capacity: 100 }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use world_core::Position;

    #[test]
    fn defaults_match_the_stock_world() {
        let config = ScriptConfig::default();
        assert_eq!(config.marketplace.currency, ItemId(995));
        assert_eq!(config.marketplace.clerk, "Grand Exchange Clerk");
        assert!(config.marketplace.area.contains(Position::new(3164, 3490)));
        assert!(!config.marketplace.area.contains(Position::new(3170, 3490)));
        assert_eq!(config.waits.bank_open_ticks, 10);
        assert_eq!(config.waits.default_ticks, 100);
    }

    #[test]
    fn partial_files_keep_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[marketplace]
clerk = "Trader"
area = {{ shape = "rectangle", min = [0, 0], max = [4, 4] }}

[waits]
bank_open_ticks = 3
"#
        )
        .unwrap();

        let config = ScriptConfig::load(file.path()).unwrap();
        assert_eq!(config.marketplace.clerk, "Trader");
        assert_eq!(config.marketplace.currency, ItemId(995));
        assert!(config.marketplace.area.contains(Position::new(2, 2)));
        assert_eq!(config.waits.bank_open_ticks, 3);
        assert_eq!(config.waits.default_ticks, 100);
        assert_eq!(config.bank.bankers, vec!["Banker".to_owned()]);
    }

    #[test]
    fn malformed_files_report_the_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[waits]\ndefault_ticks = \"soon\"").unwrap();

        let err = ScriptConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert_eq!(err.error_code(), "CONFIG_PARSE");
    }

    #[test]
    fn missing_files_are_io_errors() {
        let dir = tempfile::tempdir().unwrap();
        let err = ScriptConfig::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
