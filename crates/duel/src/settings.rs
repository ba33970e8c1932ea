//! Match settings loaded from TOML and overridden from the command line.

use crate::cli::PlayArgs;
use derive_getters::Getters;
use derive_more::{Display, Error};
use duel_tictactoe::{
    BestOf, DEFAULT_PLAYER_NAME, Difficulty, MatchMode, Opponent, Player, SessionConfig,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Settings file read when `--config` is not given.
pub const DEFAULT_SETTINGS_FILE: &str = "duel.toml";

/// Pause before a computer move.
pub const DEFAULT_COMPUTER_DELAY_MS: u64 = 400;

/// Everything needed to set up an interactive match.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct MatchSettings {
    /// Quick or endless round boundaries.
    #[serde(default)]
    mode: MatchMode,

    /// Computer or second human.
    #[serde(default)]
    opponent: Opponent,

    /// Computer strength.
    #[serde(default)]
    difficulty: Difficulty,

    /// Symbol of the first player.
    #[serde(default = "default_symbol")]
    symbol: Player,

    /// Match length (integer or string; unusable values mean unbounded).
    #[serde(default = "default_best_of")]
    best_of: BestOf,

    /// First player's name.
    #[serde(default = "default_player_name")]
    player_name: String,

    /// Second player's name; ignored against the computer.
    #[serde(default)]
    opponent_name: String,

    /// Pause before each computer move, in milliseconds.
    #[serde(default = "default_computer_delay_ms")]
    computer_delay_ms: u64,
}

fn default_symbol() -> Player {
    Player::X
}

fn default_best_of() -> BestOf {
    BestOf::Rounds(3)
}

fn default_player_name() -> String {
    DEFAULT_PLAYER_NAME.to_string()
}

fn default_computer_delay_ms() -> u64 {
    DEFAULT_COMPUTER_DELAY_MS
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            mode: MatchMode::default(),
            opponent: Opponent::default(),
            difficulty: Difficulty::default(),
            symbol: default_symbol(),
            best_of: default_best_of(),
            player_name: default_player_name(),
            opponent_name: String::new(),
            computer_delay_ms: default_computer_delay_ms(),
        }
    }
}

impl MatchSettings {
    /// Loads settings from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading settings from file");
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ConfigError::new(format!("Failed to read settings file: {}", e))
        })?;

        let settings: Self = toml::from_str(&content).map_err(|e| {
            ConfigError::new(format!("Failed to parse settings: {}", e))
        })?;

        info!(mode = %settings.mode, opponent = %settings.opponent, "Settings loaded");
        Ok(settings)
    }

    /// Loads `path` if given, else [`DEFAULT_SETTINGS_FILE`] if it exists,
    /// else the built-in defaults.
    ///
    /// # Errors
    ///
    /// Fails when an explicitly named file is missing or when any chosen
    /// file cannot be parsed.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_SETTINGS_FILE).exists() => {
                Self::from_file(DEFAULT_SETTINGS_FILE)
            }
            None => {
                debug!("No settings file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Applies command-line flags on top of these settings.
    #[instrument(skip(self))]
    pub fn with_overrides(mut self, args: &PlayArgs) -> Self {
        if let Some(mode) = args.mode {
            self.mode = mode;
        }
        if let Some(opponent) = args.opponent {
            self.opponent = opponent;
        }
        if let Some(difficulty) = args.difficulty {
            self.difficulty = difficulty;
        }
        if let Some(symbol) = args.symbol {
            self.symbol = symbol;
        }
        if let Some(best_of) = args.best_of {
            self.best_of = best_of;
        }
        if let Some(name) = &args.name {
            self.player_name = name.clone();
        }
        if let Some(name) = &args.opponent_name {
            self.opponent_name = name.clone();
        }
        if let Some(delay) = args.delay_ms {
            self.computer_delay_ms = delay;
        }
        self
    }

    /// Session configuration for these settings, with names resolved.
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig::new(
            self.mode,
            self.opponent,
            self.difficulty,
            self.symbol,
            self.best_of,
        )
        .with_names(&self.player_name, &self.opponent_name)
    }

    /// Pause before each computer move.
    pub fn computer_delay(&self) -> Duration {
        Duration::from_millis(self.computer_delay_ms)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = MatchSettings::default();
        assert_eq!(*settings.mode(), MatchMode::Endless);
        assert_eq!(*settings.best_of(), BestOf::Rounds(3));
        assert_eq!(settings.computer_delay(), Duration::from_millis(400));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let settings: MatchSettings = toml::from_str(
            r#"
            mode = "quick"
            difficulty = "medium"
            "#,
        )
        .unwrap();
        assert_eq!(*settings.mode(), MatchMode::Quick);
        assert_eq!(*settings.difficulty(), Difficulty::Medium);
        assert_eq!(*settings.symbol(), Player::X);
        assert_eq!(settings.player_name(), DEFAULT_PLAYER_NAME);
    }

    #[test]
    fn test_best_of_accepts_strings_and_falls_back() {
        let settings: MatchSettings = toml::from_str("best_of = 5").unwrap();
        assert_eq!(*settings.best_of(), BestOf::Rounds(5));
        let settings: MatchSettings = toml::from_str("best_of = \"7\"").unwrap();
        assert_eq!(*settings.best_of(), BestOf::Rounds(7));
        let settings: MatchSettings = toml::from_str("best_of = -2").unwrap();
        assert_eq!(*settings.best_of(), BestOf::Unbounded);
        let settings: MatchSettings = toml::from_str("best_of = \"lots\"").unwrap();
        assert_eq!(*settings.best_of(), BestOf::Unbounded);
    }

    #[test]
    fn test_overrides_win_over_file() {
        let args = PlayArgs {
            opponent: Some(Opponent::Human),
            symbol: Some(Player::O),
            name: Some("Ada".to_string()),
            opponent_name: Some("Kai".to_string()),
            delay_ms: Some(0),
            ..PlayArgs::default()
        };
        let settings = MatchSettings::default().with_overrides(&args);
        let config = settings.session_config();
        assert_eq!(config.computer_symbol(), None);
        assert_eq!(config.name_for(Player::O), "Ada");
        assert_eq!(config.name_for(Player::X), "Kai");
        assert_eq!(settings.computer_delay(), Duration::ZERO);
    }
}
