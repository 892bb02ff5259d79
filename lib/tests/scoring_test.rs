use hangman_engine::*;

fn play_all(word: &str, letters: &[&str]) -> GameState {
    let mut game = GameState::new(word, 100);
    for letter in letters {
        game.play_letter(letter);
    }
    game
}

#[test]
fn calculate_score_basic() {
    let game = play_all("cat", &["c", "a", "t", "x", "z"]);

    // 3 correct * 20 - 2 wrong * 10
    assert_eq!(calculate_score(&game, &ScoreBonuses::default()), 40);
}

#[test]
fn calculate_score_with_time_bonus() {
    let game = play_all("cat", &["c", "a", "t"]);

    assert_eq!(calculate_score(&game, &ScoreBonuses::new(10.0, 0)), 80);
}

#[test]
fn calculate_score_with_hints() {
    let game = play_all("cat", &["c", "a", "t"]);

    assert_eq!(calculate_score(&game, &ScoreBonuses::new(0.0, 2)), 20);
}

#[test]
fn calculate_score_minimum_zero() {
    let game = play_all("cat", &["x", "y", "z", "w", "q", "r", "s"]);

    assert_eq!(calculate_score(&game, &ScoreBonuses::default()), 0);
}

#[test]
fn calculate_score_empty_game() {
    let game = GameState::new("cat", 7);

    assert_eq!(calculate_score(&game, &ScoreBonuses::default()), 0);
}

#[test]
fn calculate_score_repeated_letters_count_once() {
    let game = play_all("hello", &["h", "e", "l", "o", "l", "L"]);

    assert_eq!(calculate_score(&game, &ScoreBonuses::default()), 80);
}

#[test]
fn calculate_score_combined() {
    let game = play_all("python", &["p", "y", "t", "h", "o", "n", "x", "z"]);

    // 120 - 20 - 20 + 30
    assert_eq!(calculate_score(&game, &ScoreBonuses::new(15.0, 1)), 110);
}

#[test]
fn calculate_score_mid_round() {
    let mut game = GameState::new("python", 7);
    game.play_letter("p");
    let first = calculate_score(&game, &ScoreBonuses::default());
    game.play_letter("y");

    assert_eq!(first, 20);
    assert_eq!(calculate_score(&game, &ScoreBonuses::default()), 40);
    assert_eq!(game.status(), GameStatus::InProgress);
}

#[test]
fn calculate_score_each_term() {
    let base = play_all("python", &["p", "y", "x"]);
    let one_more_correct = play_all("python", &["p", "y", "t", "x"]);
    let one_more_wrong = play_all("python", &["p", "y", "x", "z"]);
    let bonuses = ScoreBonuses::new(20.0, 1);
    let score = calculate_score(&base, &bonuses);

    assert_eq!(calculate_score(&one_more_correct, &bonuses) - score, 20);
    assert_eq!(calculate_score(&one_more_wrong, &bonuses) - score, -10);
    assert_eq!(calculate_score(&base, &ScoreBonuses::new(20.0, 2)) - score, -20);
    assert_eq!(calculate_score(&base, &ScoreBonuses::new(21.0, 1)) - score, 2);
}

#[test]
fn score_letters_deduplicates_and_ignores_case() {
    let letters = ['c', 'a', 't', 'x', 'z', 'C', 'x'];

    assert_eq!(
        score_letters("cat", letters, &ScoreBonuses::default()),
        40
    );
    assert_eq!(
        score_letters(
            "python",
            "pythonxz".chars(),
            &ScoreBonuses::new(15.0, 1)
        ),
        110
    );
    assert_eq!(
        score_letters("cat", "xyzwqrs".chars(), &ScoreBonuses::default()),
        0
    );
}

#[test]
fn check_if_highscore_non_positive_score() {
    let leaderboard = Leaderboard::new();

    assert!(!check_if_highscore(&leaderboard, 0, "test_category"));
    assert!(!check_if_highscore(&leaderboard, -5, "test_category"));
    assert!(!check_if_highscore(&leaderboard, -10, "test_category"));
}

#[test]
fn check_if_highscore_new_category() {
    let mut leaderboard = Leaderboard::new();
    leaderboard.record("ann", 500, "normal");

    assert!(check_if_highscore(&leaderboard, 1, "brand-new-category"));
}

#[test]
fn check_if_highscore_category_with_room() {
    let mut leaderboard = Leaderboard::new();
    for score in [900, 800, 700] {
        leaderboard.record("bob", score, "hard");
    }

    assert!(leaderboard.is_highscore(1, "hard"));
}

#[test]
fn check_if_highscore_full_category() {
    let mut leaderboard = Leaderboard::new();
    for score in (1..=10).map(|n| n * 10) {
        leaderboard.record("eve", score, "easy");
    }

    assert!(!leaderboard.is_highscore(5, "easy"));
    assert!(!leaderboard.is_highscore(10, "easy"));
    assert!(leaderboard.is_highscore(11, "easy"));
}

#[test]
fn record_keeps_top_ten_in_descending_order() {
    let mut leaderboard = Leaderboard::new();
    for score in [30, 10, 50, 20, 40, 60, 70, 80, 90, 100] {
        leaderboard.record("p", score, "normal");
    }

    assert_eq!(leaderboard.record("low", 5, "normal"), None);
    assert_eq!(leaderboard.record("new", 55, "normal"), Some(6));

    let scores: Vec<i64> = leaderboard
        .entries("normal")
        .iter()
        .map(|entry| entry.score)
        .collect();
    assert_eq!(scores, vec![100, 90, 80, 70, 60, 55, 50, 40, 30, 20]);
}

#[test]
fn record_ties_keep_earlier_entry_first() {
    let mut leaderboard = Leaderboard::new();
    leaderboard.record("first", 50, "normal");

    assert_eq!(leaderboard.record("second", 50, "normal"), Some(2));
    assert_eq!(leaderboard.entries("normal")[0].name, "FIRST");
}

#[test]
fn record_normalizes_name() {
    let mut leaderboard = Leaderboard::new();
    leaderboard.record("  alexander ", 10, "normal");

    assert_eq!(
        leaderboard.entries("normal"),
        &[ScoreEntry {
            name: "ALEXA".to_string(),
            score: 10
        }]
    );
}

#[test]
fn record_leaves_other_categories_alone() {
    let mut leaderboard = Leaderboard::new();
    leaderboard.record("a", 10, "easy");
    leaderboard.record("b", 20, "hard");

    assert_eq!(leaderboard.entries("easy").len(), 1);
    assert_eq!(leaderboard.entries("hard").len(), 1);
    assert!(leaderboard.entries("normal").is_empty());
    assert_eq!(leaderboard.categories().collect::<Vec<_>>(), vec!["easy", "hard"]);
}

#[test]
fn calculate_score_with_unbounded_time() {
    let game = GameState::new("cat", 7);

    assert_eq!(
        calculate_score(&game, &ScoreBonuses::new(1e19, 0)),
        i64::MAX
    );
    assert_eq!(
        calculate_score(&game, &ScoreBonuses::new(f64::INFINITY, 0)),
        i64::MAX
    );
}
