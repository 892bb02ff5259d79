use crate::results::HangmanError;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The ways a session can be played.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GameMode {
    /// Generous error budget, no clock, and a few elimination hints.
    Easy,
    /// Generous error budget against the clock.
    Normal,
    /// Tight error budget against the clock.
    Hard,
    /// Rounds keep coming with words of any difficulty until one is lost.
    Infinite,
}

/// The clock of a timed mode.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TimerRules {
    /// Time on the clock when a round starts.
    pub start: Duration,
    /// Time added for each accepted letter that is in the word.
    pub bonus_per_hit: Duration,
    /// Time removed for each accepted letter that isn't.
    pub penalty_per_miss: Duration,
}

/// What a mode changes about a round.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ModeRules {
    pub max_errors: u32,
    pub timer: Option<TimerRules>,
    /// Elimination hints available per round.
    pub hints: u32,
    /// Whether each round draws from any difficulty instead of the one chosen.
    pub any_difficulty: bool,
    /// Whether rounds chain until a loss, scoring the whole run.
    pub endless: bool,
}

const CLASSIC_TIMER: TimerRules = TimerRules {
    start: Duration::from_secs(30),
    bonus_per_hit: Duration::from_secs(5),
    penalty_per_miss: Duration::from_secs(5),
};

impl GameMode {
    pub const ALL: [GameMode; 4] = [
        GameMode::Easy,
        GameMode::Normal,
        GameMode::Hard,
        GameMode::Infinite,
    ];

    pub fn rules(self) -> ModeRules {
        match self {
            GameMode::Easy => ModeRules {
                max_errors: 7,
                timer: None,
                hints: 3,
                any_difficulty: false,
                endless: false,
            },
            GameMode::Normal => ModeRules {
                max_errors: 7,
                timer: Some(CLASSIC_TIMER),
                hints: 0,
                any_difficulty: false,
                endless: false,
            },
            GameMode::Hard => ModeRules {
                max_errors: 5,
                timer: Some(CLASSIC_TIMER),
                hints: 0,
                any_difficulty: false,
                endless: false,
            },
            GameMode::Infinite => ModeRules {
                max_errors: 5,
                timer: None,
                hints: 0,
                any_difficulty: true,
                endless: true,
            },
        }
    }

    /// The leaderboard category that scores from this mode are filed under.
    pub fn category(self) -> &'static str {
        match self {
            GameMode::Easy => "easy",
            GameMode::Normal => "normal",
            GameMode::Hard => "hard",
            GameMode::Infinite => "infinite",
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.category())
    }
}

impl FromStr for GameMode {
    type Err = HangmanError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.trim().to_lowercase().as_str() {
            "easy" | "facile" => Ok(GameMode::Easy),
            "normal" => Ok(GameMode::Normal),
            "hard" | "difficile" => Ok(GameMode::Hard),
            "infinite" | "endless" => Ok(GameMode::Infinite),
            _ => Err(HangmanError::UnknownMode(name.to_string())),
        }
    }
}
