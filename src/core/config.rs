//! Rules configuration.
//!
//! `RulesConfig` holds the tunable parts of the ruleset. It travels inside
//! the `GameModel` so a saved game resumes under the rules it started with.
//!
//! Configs can be written by hand as TOML:
//!
//! ```
//! use robo_race::core::RulesConfig;
//!
//! let config = RulesConfig::from_toml_str("hand_size = 9\nseed = 3").unwrap();
//! assert_eq!(config.hand_size, 9);
//! assert_eq!(config.max_health, 10); // default
//! ```

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Number of program registers per robot.
pub const REGISTER_COUNT: usize = 5;

/// Tunable rules.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Cards dealt to each player per round.
    pub hand_size: usize,

    /// Starting (and maximum) robot health.
    pub max_health: u8,

    /// Run a second, express-only belt pass after the full belt pass.
    pub express_second_pass: bool,

    /// Run belts, gears and lasers in every register phase.
    ///
    /// When false a register phase only resolves cards and checkpoints.
    pub board_elements: bool,

    /// Seed for the initial deck shuffle and later reshuffles.
    pub seed: u64,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            hand_size: 11,
            max_health: 10,
            express_second_pass: true,
            board_elements: true,
            seed: 0,
        }
    }
}

impl RulesConfig {
    /// Parse a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the hand size.
    #[must_use]
    pub fn with_hand_size(mut self, hand_size: usize) -> Self {
        self.hand_size = hand_size;
        self
    }

    /// Disable belts, gears and lasers.
    #[must_use]
    pub fn without_board_elements(mut self) -> Self {
        self.board_elements = false;
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_health == 0 {
            return Err(ConfigError::Invalid("max_health must be at least 1".into()));
        }
        if self.hand_size < REGISTER_COUNT {
            return Err(ConfigError::Invalid(format!(
                "hand_size must be at least {REGISTER_COUNT}"
            )));
        }
        Ok(())
    }
}
