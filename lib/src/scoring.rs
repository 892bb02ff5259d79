use crate::engine::GameState;
use std::collections::BTreeSet;

/// Points for each distinct played letter that is in the secret word.
pub const POINTS_PER_CORRECT_LETTER: i64 = 20;
/// Points lost for each distinct played letter that is not in the secret word.
pub const PENALTY_PER_WRONG_LETTER: i64 = 10;
/// Points lost for each hint used during the round.
pub const PENALTY_PER_HINT: i64 = 20;
/// Points for each whole second left on the clock.
pub const POINTS_PER_SECOND_REMAINING: i64 = 2;

/// Session-level modifiers that feed into a round's score.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScoreBonuses {
    /// Seconds left on the clock. Only whole seconds count; negative values count as zero.
    pub time_remaining: f64,
    /// Number of hints used during the round.
    pub hints_used: u32,
}

impl ScoreBonuses {
    pub fn new(time_remaining: f64, hints_used: u32) -> ScoreBonuses {
        ScoreBonuses {
            time_remaining,
            hints_used,
        }
    }
}

/// Computes the score for a round, finished or not.
///
/// The score is `20 * correct - 10 * wrong - 20 * hints + 2 * whole seconds left`, where
/// `correct` and `wrong` count the distinct played letters that are and aren't in the word. The
/// result is never negative.
///
/// ```
/// use hangman_engine::*;
///
/// let mut game = GameState::new("cat", 7);
/// for letter in ["c", "a", "t", "x", "z"] {
///     game.play_letter(letter);
/// }
/// assert_eq!(calculate_score(&game, &ScoreBonuses::default()), 40);
/// ```
pub fn calculate_score(game: &GameState, bonuses: &ScoreBonuses) -> i64 {
    let (correct, wrong) = count_letters(game.secret_word(), game.letters().iter().copied());
    apply_formula(correct, wrong, bonuses)
}

/// Computes the score for an arbitrary snapshot of a secret word and the letters played against
/// it. Letters are compared case-insensitively and duplicates are only counted once.
pub fn score_letters<I>(secret_word: &str, letters_played: I, bonuses: &ScoreBonuses) -> i64
where
    I: IntoIterator<Item = char>,
{
    let secret_word = secret_word.to_uppercase();
    let letters: BTreeSet<char> = letters_played
        .into_iter()
        .flat_map(char::to_uppercase)
        .collect();
    let (correct, wrong) = count_letters(&secret_word, letters.into_iter());
    apply_formula(correct, wrong, bonuses)
}

/// Counts (correct, wrong) over letters that are already distinct.
fn count_letters(secret_word: &str, distinct_letters: impl Iterator<Item = char>) -> (i64, i64) {
    distinct_letters.fold((0, 0), |(correct, wrong), letter| {
        if secret_word.contains(letter) {
            (correct + 1, wrong)
        } else {
            (correct, wrong + 1)
        }
    })
}

fn apply_formula(correct: i64, wrong: i64, bonuses: &ScoreBonuses) -> i64 {
    let whole_seconds = if bonuses.time_remaining > 0.0 {
        bonuses.time_remaining.floor() as i64
    } else {
        0
    };
    // `as` saturates, so huge or infinite times reach i64::MAX and must not overflow below.
    let raw = (POINTS_PER_CORRECT_LETTER.saturating_mul(correct))
        .saturating_sub(PENALTY_PER_WRONG_LETTER.saturating_mul(wrong))
        .saturating_sub(PENALTY_PER_HINT.saturating_mul(i64::from(bonuses.hints_used)))
        .saturating_add(POINTS_PER_SECOND_REMAINING.saturating_mul(whole_seconds));
    raw.max(0)
}
