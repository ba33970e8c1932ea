//! Match and session configuration.

use crate::engine::Difficulty;
use crate::types::Player;
use derive_getters::Getters;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::convert::Infallible;
use std::str::FromStr;
use tracing::debug;

/// Default display name for the first participant.
pub const DEFAULT_PLAYER_NAME: &str = "Player 1";

/// Default display name for a second human participant.
pub const DEFAULT_OPPONENT_NAME: &str = "Player 2";

/// Display name of the computer opponent.
pub const COMPUTER_NAME: &str = "Computer";

/// Length of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BestOf {
    /// The match only ends when someone ends it.
    #[default]
    Unbounded,
    /// First to a majority of this many rounds wins the match.
    Rounds(u32),
}

impl BestOf {
    /// Match of `count` rounds; zero means unbounded.
    pub fn rounds(count: u32) -> Self {
        if count == 0 {
            BestOf::Unbounded
        } else {
            BestOf::Rounds(count)
        }
    }

    /// Parses a round count, falling back to [`BestOf::Unbounded`] for
    /// missing, zero, negative or malformed input.
    pub fn parse_or_unbounded(s: &str) -> Self {
        match s.trim().parse::<u32>() {
            Ok(count) => Self::rounds(count),
            Err(_) => {
                debug!(input = s, "Unrecognised best-of value, using unbounded match");
                BestOf::Unbounded
            }
        }
    }

    /// Wins needed to take the match: `ceil(rounds / 2)`.
    pub fn needed_wins(self) -> Option<u32> {
        match self {
            BestOf::Unbounded => None,
            BestOf::Rounds(count) => Some(count.div_ceil(2)),
        }
    }

    /// Round count, with 0 for unbounded.
    pub fn count(self) -> u32 {
        match self {
            BestOf::Unbounded => 0,
            BestOf::Rounds(count) => count,
        }
    }
}

impl FromStr for BestOf {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse_or_unbounded(s))
    }
}

impl std::fmt::Display for BestOf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BestOf::Unbounded => write!(f, "unbounded"),
            BestOf::Rounds(count) => write!(f, "best of {}", count),
        }
    }
}

impl Serialize for BestOf {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.count())
    }
}

impl<'de> Deserialize<'de> for BestOf {
    /// Accepts an integer or a string; anything unusable becomes unbounded.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Count(i64),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer) {
            Ok(Raw::Count(count)) => u32::try_from(count).map(Self::rounds).unwrap_or_default(),
            Ok(Raw::Text(text)) => Self::parse_or_unbounded(&text),
            Err(_) => BestOf::Unbounded,
        })
    }
}

/// Match rules owned by the match controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Match length.
    #[serde(default)]
    pub best_of: BestOf,
}

impl MatchConfig {
    /// Creates a match configuration.
    pub fn new(best_of: BestOf) -> Self {
        Self { best_of }
    }

    /// Wins needed to take the match, `None` when unbounded.
    pub fn needed_wins(&self) -> Option<u32> {
        self.best_of.needed_wins()
    }
}

/// How round boundaries are handled.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum MatchMode {
    /// Rounds follow one another until the best-of target is reached.
    Quick,
    /// After each round the players choose to continue, end or reset.
    #[default]
    Endless,
}

/// Who sits across from the first participant.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Opponent {
    /// The computer, driven by the move engine.
    #[default]
    Computer,
    /// A second human sharing the board.
    Human,
}

/// Everything needed to start a match through a game session.
///
/// Deserialization goes through [`SessionConfig::with_names`], so names read
/// from a file follow the same defaults as names set in code.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(from = "SessionConfigRecord")]
pub struct SessionConfig {
    /// Round boundary handling.
    mode: MatchMode,
    /// Computer or second human.
    opponent: Opponent,
    /// Computer strength; ignored against a human.
    difficulty: Difficulty,
    /// Symbol of the first participant; the opponent takes the other.
    player_symbol: Player,
    /// Match length.
    best_of: BestOf,
    /// Display name of the first participant.
    player_name: String,
    /// Display name of the opponent.
    opponent_name: String,
}

impl SessionConfig {
    /// Creates a configuration with default names.
    pub fn new(
        mode: MatchMode,
        opponent: Opponent,
        difficulty: Difficulty,
        player_symbol: Player,
        best_of: BestOf,
    ) -> Self {
        Self {
            mode,
            opponent,
            difficulty,
            player_symbol,
            best_of,
            player_name: DEFAULT_PLAYER_NAME.to_string(),
            opponent_name: default_opponent_name(opponent).to_string(),
        }
    }

    /// Sets the participants' names. Blank names fall back to defaults and
    /// the computer is always called "Computer".
    pub fn with_names(mut self, player_name: &str, opponent_name: &str) -> Self {
        self.player_name = non_blank(player_name).unwrap_or(DEFAULT_PLAYER_NAME).to_string();
        self.opponent_name = match self.opponent {
            Opponent::Computer => COMPUTER_NAME.to_string(),
            Opponent::Human => non_blank(opponent_name)
                .unwrap_or(DEFAULT_OPPONENT_NAME)
                .to_string(),
        };
        self
    }

    /// Symbol played by the opponent.
    pub fn opponent_symbol(&self) -> Player {
        self.player_symbol.opponent()
    }

    /// Symbol played by the computer, if the opponent is the computer.
    pub fn computer_symbol(&self) -> Option<Player> {
        match self.opponent {
            Opponent::Computer => Some(self.opponent_symbol()),
            Opponent::Human => None,
        }
    }

    /// Display name of whoever plays `symbol`.
    pub fn name_for(&self, symbol: Player) -> &str {
        if symbol == self.player_symbol {
            &self.player_name
        } else {
            &self.opponent_name
        }
    }

    /// The match rules derived from this configuration.
    pub fn match_config(&self) -> MatchConfig {
        MatchConfig::new(self.best_of)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new(
            MatchMode::default(),
            Opponent::default(),
            Difficulty::default(),
            Player::X,
            BestOf::Rounds(3),
        )
    }
}

/// Serialized form of [`SessionConfig`] before the name rules apply.
#[derive(Deserialize)]
#[serde(default)]
struct SessionConfigRecord {
    mode: MatchMode,
    opponent: Opponent,
    difficulty: Difficulty,
    player_symbol: Player,
    best_of: BestOf,
    player_name: String,
    opponent_name: String,
}

impl Default for SessionConfigRecord {
    fn default() -> Self {
        let config = SessionConfig::default();
        Self {
            mode: config.mode,
            opponent: config.opponent,
            difficulty: config.difficulty,
            player_symbol: config.player_symbol,
            best_of: config.best_of,
            player_name: String::new(),
            opponent_name: String::new(),
        }
    }
}

impl From<SessionConfigRecord> for SessionConfig {
    fn from(record: SessionConfigRecord) -> Self {
        SessionConfig::new(
            record.mode,
            record.opponent,
            record.difficulty,
            record.player_symbol,
            record.best_of,
        )
        .with_names(&record.player_name, &record.opponent_name)
    }
}

fn default_opponent_name(opponent: Opponent) -> &'static str {
    match opponent {
        Opponent::Computer => COMPUTER_NAME,
        Opponent::Human => DEFAULT_OPPONENT_NAME,
    }
}

fn non_blank(name: &str) -> Option<&str> {
    let name = name.trim();
    (!name.is_empty()).then_some(name)
}
