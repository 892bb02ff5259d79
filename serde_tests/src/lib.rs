#[cfg(test)]
mod tests {

    use std::error::Error;

    use hangman_engine::*;
    use ron;
    use serde_json;

    #[test]
    fn leaderboard_json_layout() -> Result<(), Box<dyn Error>> {
        let mut leaderboard = Leaderboard::new();
        leaderboard.record("ann", 40, "normal");
        leaderboard.record("bob", 90, "normal");

        let json = serde_json::to_value(&leaderboard)?;

        assert_eq!(
            json,
            serde_json::json!({
                "normal": [
                    { "name": "BOB", "score": 90 },
                    { "name": "ANN", "score": 40 },
                ]
            })
        );
        Ok(())
    }

    #[test]
    fn leaderboard_json_is_sorted_on_read() -> Result<(), Box<dyn Error>> {
        let json = r#"{
            "hard": [
                { "name": "LOW", "score": 10 },
                { "name": "HIGH", "score": 70 }
            ],
            "easy": []
        }"#;

        let leaderboard: Leaderboard = serde_json::from_str(json)?;

        assert_eq!(leaderboard.entries("hard")[0].name, "HIGH");
        assert!(leaderboard.is_highscore(1, "easy"));
        assert!(leaderboard.is_highscore(1, "hard"));
        Ok(())
    }

    #[test]
    fn game_state_ron_round_trip() -> Result<(), Box<dyn Error>> {
        let mut game = GameState::new("python", 6);
        game.play_letter("p");
        game.play_letter("z");
        let masked = game.masked_word();

        let ser = ron::to_string(&game)?;
        let mut deser = ron::from_str::<GameState>(&ser)?;

        assert_eq!(deser, game);
        assert_eq!(deser.masked_word(), masked);
        assert!(deser.play_letter("y").is_accepted());
        Ok(())
    }

    #[test]
    fn game_state_rejects_inconsistent_rounds() {
        let cases = [
            // Status says won but the word isn't spelled out.
            r#"(secret_word: "CAT", max_errors: 7, letters_played: ['C'], error_count: 0, status: Won)"#,
            // One miss recorded as none.
            r#"(secret_word: "CAT", max_errors: 7, letters_played: ['Z'], error_count: 0, status: InProgress)"#,
            // Budget used up but still in progress.
            r#"(secret_word: "CAT", max_errors: 1, letters_played: ['Z'], error_count: 1, status: InProgress)"#,
            r#"(secret_word: "CAT", max_errors: 7, letters_played: ['c'], error_count: 0, status: InProgress)"#,
            r#"(secret_word: "", max_errors: 7, letters_played: [], error_count: 0, status: InProgress)"#,
            r#"(secret_word: "CAT", max_errors: 0, letters_played: [], error_count: 0, status: InProgress)"#,
        ];

        for case in cases {
            assert!(ron::from_str::<GameState>(case).is_err(), "accepted {}", case);
        }
    }

    #[test]
    fn game_state_accepts_finished_rounds() -> Result<(), Box<dyn Error>> {
        let mut game = GameState::new("cat", 2);
        game.play_letter("x");
        game.play_letter("y");
        assert_eq!(game.status(), GameStatus::Lost);

        let deser = ron::from_str::<GameState>(&ron::to_string(&game)?)?;

        assert_eq!(deser, game);
        Ok(())
    }

    #[test]
    fn mode_and_difficulty_serde() -> Result<(), Box<dyn Error>> {
        let ser = ron::to_string(&(GameMode::Hard, Difficulty::Easy, GameStatus::Won))?;

        let deser = ron::from_str::<(GameMode, Difficulty, GameStatus)>(&ser)?;

        assert_eq!(deser, (GameMode::Hard, Difficulty::Easy, GameStatus::Won));
        Ok(())
    }
}
