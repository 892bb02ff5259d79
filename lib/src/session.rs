use crate::engine::GameState;
use crate::modes::{GameMode, ModeRules};
use crate::results::*;
use crate::scoring::{calculate_score, ScoreBonuses};
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;
use std::result::Result;
use std::time::Duration;

/// How a round ended.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RoundOutcome {
    Won,
    Lost,
    /// The clock ran out before the word was found.
    TimedOut,
}

/// The result of a finished round, as returned by [`Session::finish_round`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoundSummary {
    pub outcome: RoundOutcome,
    pub secret_word: Box<str>,
    /// The score of this round alone.
    pub score: i64,
    /// The session's cumulative score, including this round.
    pub total_score: i64,
}

/// A sequence of rounds played in one [`GameMode`].
///
/// The session owns the current round along with everything the mode layers on top of it: the
/// clock, the hints, and the running score. Nothing here is shared, so independent sessions can be
/// played side by side.
#[derive(Clone, Debug)]
pub struct Session {
    mode: GameMode,
    rules: ModeRules,
    round: Option<GameState>,
    time_remaining: Option<Duration>,
    timed_out: bool,
    hints_left: u32,
    hints_used: u32,
    summarized: bool,
    total_score: i64,
    last_score: i64,
    rounds_played: u32,
    rounds_won: u32,
    over: bool,
}

impl Session {
    pub fn new(mode: GameMode) -> Session {
        Session {
            mode,
            rules: mode.rules(),
            round: None,
            time_remaining: None,
            timed_out: false,
            hints_left: 0,
            hints_used: 0,
            summarized: false,
            total_score: 0,
            last_score: 0,
            rounds_played: 0,
            rounds_won: 0,
            over: false,
        }
    }

    /// Starts a new round with the given secret word, replacing any current round.
    ///
    /// Starting a round once the session is over begins a fresh run with its totals reset.
    pub fn start_round(&mut self, secret_word: &str) -> Result<&GameState, HangmanError> {
        let game = GameState::try_new(secret_word, self.rules.max_errors)?;
        if self.over {
            debug!("Starting a new {} run", self.mode);
            self.total_score = 0;
            self.rounds_played = 0;
            self.rounds_won = 0;
            self.over = false;
        }
        self.time_remaining = self.rules.timer.map(|timer| timer.start);
        self.timed_out = false;
        self.hints_left = self.rules.hints;
        self.hints_used = 0;
        self.summarized = false;
        debug!(
            "Starting {} round {} with a {} letter word",
            self.mode,
            self.rounds_played + 1,
            game.secret_word().chars().count()
        );
        let game: &GameState = self.round.insert(game);
        Ok(game)
    }

    /// Plays a guess in the current round.
    ///
    /// In timed modes, an accepted hit adds time and an accepted miss removes it. A guess made
    /// with no round in play, or after the round has ended, is rejected with
    /// [`RejectReason::RoundOver`].
    pub fn guess(&mut self, letter: &str) -> GuessOutcome {
        if self.round_outcome().is_some() {
            return GuessOutcome::Rejected(RejectReason::RoundOver);
        }
        let outcome = match self.round.as_mut() {
            Some(round) => round.play_letter(letter),
            None => return GuessOutcome::Rejected(RejectReason::RoundOver),
        };
        if let GuessOutcome::Accepted { hit, .. } = outcome {
            self.adjust_clock(hit);
        }
        outcome
    }

    fn adjust_clock(&mut self, hit: bool) {
        let (Some(timer), Some(remaining)) = (self.rules.timer, self.time_remaining) else {
            return;
        };
        let remaining = if hit {
            remaining + timer.bonus_per_hit
        } else {
            remaining.saturating_sub(timer.penalty_per_miss)
        };
        self.set_time_remaining(remaining);
    }

    fn set_time_remaining(&mut self, remaining: Duration) {
        self.time_remaining = Some(remaining);
        let in_progress = self
            .round
            .as_ref()
            .map_or(false, |round| !round.status().is_terminal());
        if remaining.is_zero() && in_progress {
            debug!("Clock ran out");
            self.timed_out = true;
        }
    }

    /// Counts the clock down by `elapsed`. Does nothing in untimed modes or once the round is
    /// over. Returns the round's outcome, if it has one.
    pub fn tick(&mut self, elapsed: Duration) -> Option<RoundOutcome> {
        if self.round_outcome().is_none() {
            if let Some(remaining) = self.time_remaining {
                self.set_time_remaining(remaining.saturating_sub(elapsed));
            }
        }
        self.round_outcome()
    }

    /// Uses an elimination hint: a random letter that is not in the word is played on the
    /// player's behalf. The letter counts as a miss.
    ///
    /// Returns the letter, or `None` if the mode has no hints left, the round is over, or every
    /// absent letter has already been played.
    pub fn use_hint<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<char> {
        if self.hints_left == 0 || self.round_outcome().is_some() {
            return None;
        }
        let letter = *self.round.as_ref()?.absent_letters().choose(rng)?;
        if !self.guess(&letter.to_string()).is_accepted() {
            return None;
        }
        self.hints_left -= 1;
        self.hints_used += 1;
        debug!("Hint revealed {}, {} left", letter, self.hints_left);
        Some(letter)
    }

    /// How the current round ended, or `None` while it is still in play (or not started).
    pub fn round_outcome(&self) -> Option<RoundOutcome> {
        let round = self.round.as_ref()?;
        match round.status() {
            GameStatus::Won => Some(RoundOutcome::Won),
            GameStatus::Lost => Some(RoundOutcome::Lost),
            GameStatus::InProgress if self.timed_out => Some(RoundOutcome::TimedOut),
            GameStatus::InProgress => None,
        }
    }

    /// The current round's score so far, including the clock and hint modifiers.
    pub fn current_score(&self) -> i64 {
        self.round
            .as_ref()
            .map_or(0, |round| calculate_score(round, &self.bonuses()))
    }

    fn bonuses(&self) -> ScoreBonuses {
        ScoreBonuses::new(
            self.time_remaining.map_or(0.0, |t| t.as_secs_f64()),
            self.hints_used,
        )
    }

    /// Scores the current round and adds it to the session's total.
    ///
    /// Returns `None` if the round is still in play or has already been scored. In endless mode,
    /// anything but a win ends the session.
    pub fn finish_round(&mut self) -> Option<RoundSummary> {
        if self.summarized {
            return None;
        }
        let outcome = self.round_outcome()?;
        let score = self.current_score();
        self.summarized = true;
        self.last_score = score;
        self.total_score += score;
        self.rounds_played += 1;
        if outcome == RoundOutcome::Won {
            self.rounds_won += 1;
        } else if self.rules.endless {
            self.over = true;
        }
        debug!(
            "{} round finished: {:?}, score {}, total {}",
            self.mode, outcome, score, self.total_score
        );
        Some(RoundSummary {
            outcome,
            secret_word: Box::from(self.round.as_ref()?.secret_word()),
            score,
            total_score: self.total_score,
        })
    }

    /// The score to submit to the leaderboard: the whole run in endless mode, otherwise the last
    /// finished round.
    pub fn submission_score(&self) -> i64 {
        if self.rules.endless {
            self.total_score
        } else {
            self.last_score
        }
    }

    /// Returns `true` once an endless run has been lost.
    pub fn is_over(&self) -> bool {
        self.over
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn rules(&self) -> &ModeRules {
        &self.rules
    }

    pub fn round(&self) -> Option<&GameState> {
        self.round.as_ref()
    }

    /// Time left on the clock, or `None` in untimed modes.
    pub fn time_remaining(&self) -> Option<Duration> {
        self.time_remaining
    }

    pub fn hints_left(&self) -> u32 {
        self.hints_left
    }

    pub fn hints_used(&self) -> u32 {
        self.hints_used
    }

    pub fn total_score(&self) -> i64 {
        self.total_score
    }

    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    pub fn rounds_won(&self) -> u32 {
        self.rounds_won
    }
}
