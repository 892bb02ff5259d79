use crate::results::*;
use log::{debug, trace};
use std::collections::BTreeSet;
use std::result::Result;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The error budget used when the caller doesn't pick one.
pub const DEFAULT_MAX_ERRORS: u32 = 7;

/// The letters a guess may be drawn from.
pub const ALPHABET: std::ops::RangeInclusive<char> = 'A'..='Z';

/// The state of a single round of Hangman.
///
/// A round is created with a secret word and an error budget, then mutated in place by
/// [`GameState::play_letter`] until it is won or lost:
///
/// ```
/// use hangman_engine::*;
///
/// let mut game = GameState::new("cat", 6);
/// assert!(game.play_letter("c").is_accepted());
/// assert_eq!(game.masked_word(), "C _ _");
///
/// game.play_letter("a");
/// game.play_letter("t");
/// assert_eq!(game.status(), GameStatus::Won);
/// ```
///
/// With the `serde` feature, deserializing re-checks the round: the word must be non-empty, the
/// budget non-zero, the error count must match the misses and the status must follow from the
/// played letters.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "SerializedGameState"))]
pub struct GameState {
    secret_word: Box<str>,
    max_errors: u32,
    letters_played: BTreeSet<char>,
    error_count: u32,
    status: GameStatus,
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct SerializedGameState {
    secret_word: Box<str>,
    max_errors: u32,
    letters_played: BTreeSet<char>,
    error_count: u32,
    status: GameStatus,
}

#[cfg(feature = "serde")]
impl TryFrom<SerializedGameState> for GameState {
    type Error = HangmanError;

    fn try_from(raw: SerializedGameState) -> Result<Self, Self::Error> {
        if raw.secret_word.is_empty() {
            return Err(HangmanError::EmptyWord);
        }
        if raw.max_errors == 0 {
            return Err(HangmanError::ZeroErrorBudget);
        }
        if let Some(letter) = raw
            .letters_played
            .iter()
            .find(|letter| !letter.is_alphabetic() || letter.is_lowercase())
        {
            return Err(HangmanError::InvalidState(format!(
                "{:?} is not an uppercase letter",
                letter
            )));
        }
        let game = GameState {
            secret_word: raw.secret_word,
            max_errors: raw.max_errors,
            letters_played: raw.letters_played,
            error_count: raw.error_count,
            status: raw.status,
        };
        let misses = game
            .letters_played
            .iter()
            .filter(|&&letter| !game.secret_word.contains(letter))
            .count();
        if misses != game.error_count as usize || game.error_count > game.max_errors {
            return Err(HangmanError::InvalidState(format!(
                "error count {} doesn't match {} misses with a budget of {}",
                game.error_count, misses, game.max_errors
            )));
        }
        let expected = if game.is_won() {
            GameStatus::Won
        } else if game.is_lost() {
            GameStatus::Lost
        } else {
            GameStatus::InProgress
        };
        if game.status != expected {
            return Err(HangmanError::InvalidState(format!(
                "status {:?} doesn't match the played letters, expected {:?}",
                game.status, expected
            )));
        }
        Ok(game)
    }
}

impl GameState {
    /// Starts a new round. The secret word is converted to upper case.
    ///
    /// The word is expected to be non-empty and alphabetic; use [`GameState::try_new`] to have
    /// that checked.
    pub fn new(secret_word: &str, max_errors: u32) -> GameState {
        GameState {
            secret_word: Box::from(secret_word.to_uppercase().as_str()),
            max_errors,
            letters_played: BTreeSet::new(),
            error_count: 0,
            status: GameStatus::InProgress,
        }
    }

    /// Starts a new round with [`DEFAULT_MAX_ERRORS`].
    pub fn with_default_budget(secret_word: &str) -> GameState {
        GameState::new(secret_word, DEFAULT_MAX_ERRORS)
    }

    /// Like [`GameState::new`], but fails if the trimmed word is empty or no errors are allowed.
    pub fn try_new(secret_word: &str, max_errors: u32) -> Result<GameState, HangmanError> {
        let secret_word = secret_word.trim();
        if secret_word.is_empty() {
            return Err(HangmanError::EmptyWord);
        }
        if max_errors == 0 {
            return Err(HangmanError::ZeroErrorBudget);
        }
        Ok(GameState::new(secret_word, max_errors))
    }

    /// Plays a guess, given as user input.
    ///
    /// The input is upper-cased first. It is rejected without changing the round if it isn't
    /// exactly one alphabetic character, if that letter was already played, or if the round is
    /// already over. Otherwise the letter is recorded, a miss costs one error, and the status is
    /// re-evaluated (a completed word wins before the error budget is checked).
    pub fn play_letter(&mut self, letter: &str) -> GuessOutcome {
        let normalized = letter.to_uppercase();
        let mut chars = normalized.chars();
        match (chars.next(), chars.next()) {
            (Some(letter), None) if letter.is_alphabetic() => self.play_normalized(letter),
            _ => {
                trace!("Rejected guess {:?}: not a single letter", letter);
                GuessOutcome::Rejected(RejectReason::NotALetter)
            }
        }
    }

    /// Plays a single character, e.g. a keystroke. Same rules as [`GameState::play_letter`].
    pub fn play_char(&mut self, letter: char) -> GuessOutcome {
        let mut buffer = [0; 4];
        self.play_letter(letter.encode_utf8(&mut buffer))
    }

    fn play_normalized(&mut self, letter: char) -> GuessOutcome {
        if self.status.is_terminal() {
            trace!("Rejected guess {}: round is {:?}", letter, self.status);
            return GuessOutcome::Rejected(RejectReason::RoundOver);
        }
        if !self.letters_played.insert(letter) {
            trace!("Rejected guess {}: already played", letter);
            return GuessOutcome::Rejected(RejectReason::AlreadyPlayed(letter));
        }

        let hit = self.secret_word.contains(letter);
        if !hit {
            self.error_count += 1;
        }

        if self.is_won() {
            self.status = GameStatus::Won;
        } else if self.is_lost() {
            self.status = GameStatus::Lost;
        }
        debug!(
            "Played {} ({}), errors {}/{}, status {:?}",
            letter,
            if hit { "hit" } else { "miss" },
            self.error_count,
            self.max_errors,
            self.status
        );
        GuessOutcome::Accepted { letter, hit }
    }

    /// Renders the secret word with unplayed letters replaced by `_`, separated by spaces.
    ///
    /// Every occurrence of a letter is revealed once that letter has been played.
    pub fn masked_word(&self) -> String {
        self.secret_word
            .chars()
            .map(|letter| {
                if self.letters_played.contains(&letter) {
                    letter
                } else {
                    '_'
                }
            })
            .fold(String::with_capacity(self.secret_word.len() * 2), |mut masked, letter| {
                if !masked.is_empty() {
                    masked.push(' ');
                }
                masked.push(letter);
                masked
            })
    }

    /// Returns `true` iff every distinct letter of the secret word has been played.
    ///
    /// This is derived from the played letters, independently of [`GameState::status`].
    pub fn is_won(&self) -> bool {
        self.secret_word
            .chars()
            .all(|letter| self.letters_played.contains(&letter))
    }

    /// Returns `true` iff the error budget is used up.
    pub fn is_lost(&self) -> bool {
        self.error_count >= self.max_errors
    }

    /// The played letters in alphabetical order.
    pub fn played_letters(&self) -> Vec<char> {
        self.letters_played.iter().copied().collect()
    }

    /// Letters of [`ALPHABET`] that haven't been played and are not in the secret word.
    pub fn absent_letters(&self) -> Vec<char> {
        ALPHABET
            .filter(|letter| {
                !self.letters_played.contains(letter) && !self.secret_word.contains(*letter)
            })
            .collect()
    }

    /// Returns `true` if the (uppercased) letter has already been played.
    pub fn has_played(&self, letter: char) -> bool {
        letter
            .to_uppercase()
            .all(|letter| self.letters_played.contains(&letter))
    }

    pub fn secret_word(&self) -> &str {
        &self.secret_word
    }

    pub fn max_errors(&self) -> u32 {
        self.max_errors
    }

    pub fn error_count(&self) -> u32 {
        self.error_count
    }

    /// How many more misses the round can absorb before it is lost.
    pub fn remaining_errors(&self) -> u32 {
        self.max_errors.saturating_sub(self.error_count)
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub(crate) fn letters(&self) -> &BTreeSet<char> {
        &self.letters_played
    }
}
