use std::io;

use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Where a round currently stands.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GameStatus {
    /// The word has not been found and the error budget is not used up.
    #[default]
    InProgress,
    /// Every distinct letter of the secret word has been played.
    Won,
    /// The error budget has been used up.
    Lost,
}

impl GameStatus {
    /// Returns `true` once the round can no longer change.
    pub fn is_terminal(self) -> bool {
        self != GameStatus::InProgress
    }
}

/// Why a guess was turned down. A rejected guess never changes the round.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RejectReason {
    /// The input was not exactly one alphabetic character.
    NotALetter,
    /// The (uppercased) letter has already been played this round.
    AlreadyPlayed(char),
    /// The round has already been won or lost.
    RoundOver,
}

/// The result of submitting a guess to a round.
///
/// Rejections are an expected part of play, so they are reported as a value rather than as an
/// error. Callers should check the outcome and re-prompt on [`GuessOutcome::Rejected`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GuessOutcome {
    /// The letter was added to the played letters.
    Accepted {
        /// The normalized (uppercase) letter.
        letter: char,
        /// Whether the letter occurs in the secret word.
        hit: bool,
    },
    /// The guess was ignored.
    Rejected(RejectReason),
}

impl GuessOutcome {
    /// Returns `true` iff the guess was accepted, whether or not it was in the word.
    pub fn is_accepted(&self) -> bool {
        matches!(self, GuessOutcome::Accepted { .. })
    }
}

/// Indicates that an error occurred while setting up a game or managing its word list.
#[derive(Debug, Error)]
pub enum HangmanError {
    /// Reading or writing a word list failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// A secret word or a word to add was empty.
    #[error("the word must not be empty")]
    EmptyWord,
    /// A round was created with no room for errors.
    #[error("the error budget must be at least 1")]
    ZeroErrorBudget,
    /// A stored round contradicts its own played letters.
    #[error("invalid game state: {0}")]
    InvalidState(String),
    /// The word is already in the word list for that difficulty.
    #[error("'{word}' already exists in {difficulty} difficulty")]
    DuplicateWord { word: String, difficulty: String },
    /// The name didn't match any difficulty.
    #[error("unknown difficulty '{0}', expected easy, normal or hard")]
    UnknownDifficulty(String),
    /// The name didn't match any game mode.
    #[error("unknown game mode '{0}', expected easy, normal, hard or infinite")]
    UnknownMode(String),
}
