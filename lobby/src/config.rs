use arcade_execution::{Pacer, Step};
use arcade_types::casino::{DEFAULT_RESET_AMOUNT, STARTING_BALANCE};
use serde::{Deserialize, Serialize};
use std::{
    num::NonZeroU64,
    path::{Path, PathBuf},
    str::FromStr,
    time::Duration,
};
use thiserror::Error;
use tracing::Level;

const DEFAULT_RESCUE: NonZeroU64 = match NonZeroU64::new(DEFAULT_RESET_AMOUNT) {
    Some(amount) => amount,
    None => panic!("default rescue amount must be non-zero"),
};

/// Lobby configuration as read from YAML. Every field has a default.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Balance used when no snapshot has been persisted yet.
    #[serde(default = "default_starting_balance")]
    pub starting_balance: u64,
    /// Balance granted when a rescue offer is accepted.
    #[serde(default = "default_rescue_amount")]
    pub rescue_amount: u64,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Snapshot file. Without one the session is not persisted.
    #[serde(default)]
    pub state_path: Option<PathBuf>,
    #[serde(default)]
    pub pace: PaceConfig,
}

/// Milliseconds spent at each suspension point of a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PaceConfig {
    pub dice_roll_ms: u64,
    pub slots_spin_ms: u64,
    pub dealer_draw_ms: u64,
    pub poker_draw_ms: u64,
    pub roulette_spin_ms: u64,
}

impl Default for PaceConfig {
    fn default() -> Self {
        Self {
            dice_roll_ms: 1_200,
            slots_spin_ms: 2_500,
            dealer_draw_ms: 800,
            poker_draw_ms: 0,
            roulette_spin_ms: 4_000,
        }
    }
}

impl PaceConfig {
    pub fn pacer(&self) -> Pacer {
        [
            (Step::DiceRoll, self.dice_roll_ms),
            (Step::SlotsSpin, self.slots_spin_ms),
            (Step::DealerDraw, self.dealer_draw_ms),
            (Step::PokerDraw, self.poker_draw_ms),
            (Step::RouletteSpin, self.roulette_spin_ms),
        ]
        .into_iter()
        .fold(Pacer::instant(), |pacer, (step, ms)| {
            pacer.with(step, Duration::from_millis(ms))
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            starting_balance: default_starting_balance(),
            rescue_amount: default_rescue_amount(),
            log_level: default_log_level(),
            state_path: None,
            pace: PaceConfig::default(),
        }
    }
}

fn default_starting_balance() -> u64 {
    STARTING_BALANCE
}

fn default_rescue_amount() -> u64 {
    DEFAULT_RESET_AMOUNT
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse config file")]
    Parse {
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid log level: {value}")]
    InvalidLogLevel { value: String },
    #[error("{field} must be > 0 (got {value})")]
    InvalidNonZero { field: &'static str, value: u64 },
}

/// Checked configuration, ready to open an arcade with.
#[derive(Clone, Debug)]
pub struct ValidatedConfig {
    pub starting_balance: u64,
    pub rescue_amount: NonZeroU64,
    pub log_level: Level,
    pub state_path: Option<PathBuf>,
    pub pacer: Pacer,
}

impl Config {
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(text).map_err(|source| ConfigError::Parse { source })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&text)
    }

    pub fn validate(self) -> Result<ValidatedConfig, ConfigError> {
        let log_level =
            Level::from_str(&self.log_level).map_err(|_| ConfigError::InvalidLogLevel {
                value: self.log_level.clone(),
            })?;
        if self.starting_balance == 0 {
            return Err(ConfigError::InvalidNonZero {
                field: "starting_balance",
                value: 0,
            });
        }
        let rescue_amount =
            NonZeroU64::new(self.rescue_amount).ok_or(ConfigError::InvalidNonZero {
                field: "rescue_amount",
                value: self.rescue_amount,
            })?;

        Ok(ValidatedConfig {
            starting_balance: self.starting_balance,
            rescue_amount,
            log_level,
            state_path: self.state_path,
            pacer: self.pace.pacer(),
        })
    }
}

impl ValidatedConfig {
    /// Defaults with every wait removed.
    pub fn instant() -> Self {
        Self {
            pacer: Pacer::instant(),
            ..Self::default()
        }
    }
}

impl Default for ValidatedConfig {
    fn default() -> Self {
        Self {
            starting_balance: STARTING_BALANCE,
            rescue_amount: DEFAULT_RESCUE,
            log_level: Level::INFO,
            state_path: None,
            pacer: PaceConfig::default().pacer(),
        }
    }
}
