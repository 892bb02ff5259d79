use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use hangman_engine::*;
use log::{debug, info};
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Play Hangman in the terminal.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Path to a word list with `[facile]`, `[moyen]` and `[difficile]` sections. Defaults to
    /// `data/words_<language>.txt`.
    #[arg(short = 'f', long, env = "HANGMAN_WORDS_FILE")]
    words_file: Option<PathBuf>,

    /// Which bundled word list to use when no words file is given.
    #[arg(short, long, value_enum, default_value_t = Language::En, env = "HANGMAN_LANGUAGE")]
    language: Language,

    /// Where the leaderboard is kept.
    #[arg(
        short,
        long,
        default_value = "highscores.json",
        env = "HANGMAN_SCORES_FILE"
    )]
    scores_file: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Language {
    En,
    Fr,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play a session of Hangman.
    Play {
        /// One of easy, normal, hard or infinite.
        #[arg(short, long, default_value = "normal")]
        mode: GameMode,
        /// One of easy, normal or hard. Ignored in infinite mode.
        #[arg(short, long, default_value = "normal")]
        difficulty: Difficulty,
        /// Name to record a high score under. Asked for if needed and not given.
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Add a word to the word list.
    AddWord { word: String, difficulty: Difficulty },
    /// Show the leaderboard.
    Scores {
        /// Only show this category.
        category: Option<String>,
    },
}

const HANGMAN_PICS: [&str; 7] = [
    "
   +---+
   |   |
       |
       |
       |
       |
=========",
    "
   +---+
   |   |
   O   |
       |
       |
       |
=========",
    "
   +---+
   |   |
   O   |
   |   |
       |
       |
=========",
    "
   +---+
   |   |
   O   |
  /|   |
       |
       |
=========",
    "
   +---+
   |   |
   O   |
  /|\\  |
       |
       |
=========",
    "
   +---+
   |   |
   O   |
  /|\\  |
  /    |
       |
=========",
    "
   +---+
   |   |
   O   |
  /|\\  |
  / \\  |
       |
=========",
];

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let words_file = args.words_file.clone().unwrap_or_else(|| {
        PathBuf::from(match args.language {
            Language::En => "data/words_en.txt",
            Language::Fr => "data/words_fr.txt",
        })
    });

    match args.command {
        Command::Play {
            mode,
            difficulty,
            name,
        } => {
            let word_bank = load_word_bank(&words_file)?;
            let mut leaderboard = load_leaderboard(&args.scores_file)?;
            let mut scores = ScoreKeeper {
                leaderboard: &mut leaderboard,
                category: mode.category(),
                name,
            };
            play_session(mode, difficulty, &word_bank, &mut scores)?;
            save_leaderboard(&args.scores_file, &leaderboard)?;
        }
        Command::AddWord { word, difficulty } => {
            let mut word_bank = load_word_bank(&words_file)?;
            word_bank.add_word(&word, difficulty)?;
            let mut writer = BufWriter::new(
                File::create(&words_file)
                    .with_context(|| format!("Couldn't write {}", words_file.display()))?,
            );
            word_bank.write_to(&mut writer)?;
            writer.flush()?;
            println!("Added '{}' to the {} words.", word.trim(), difficulty);
        }
        Command::Scores { category } => {
            let leaderboard = load_leaderboard(&args.scores_file)?;
            print_scores(&leaderboard, category.as_deref());
        }
    }

    Ok(())
}

fn load_word_bank(path: &Path) -> Result<WordBank> {
    let reader = BufReader::new(
        File::open(path).with_context(|| format!("Couldn't open {}", path.display()))?,
    );
    let word_bank = WordBank::from_reader(reader)?;
    info!("Loaded {} words from {}", word_bank.len(), path.display());
    Ok(word_bank)
}

/// Reads the leaderboard. A missing or blank file is an empty leaderboard; a corrupt one is an
/// error, so that it doesn't get overwritten.
fn load_leaderboard(path: &Path) -> Result<Leaderboard> {
    if !path.exists() {
        debug!("No leaderboard at {}", path.display());
        return Ok(Leaderboard::new());
    }
    let contents =
        fs::read_to_string(path).with_context(|| format!("Couldn't read {}", path.display()))?;
    if contents.trim().is_empty() {
        return Ok(Leaderboard::new());
    }
    serde_json::from_str(&contents)
        .with_context(|| format!("{} is not a valid leaderboard", path.display()))
}

fn save_leaderboard(path: &Path, leaderboard: &Leaderboard) -> Result<()> {
    let mut writer = BufWriter::new(
        File::create(path).with_context(|| format!("Couldn't write {}", path.display()))?,
    );
    serde_json::to_writer_pretty(&mut writer, leaderboard)?;
    writer.flush()?;
    Ok(())
}

/// Plays rounds until the player stops or quits (or, in infinite mode, loses), submitting scores
/// as they are earned.
fn play_session(
    mode: GameMode,
    difficulty: Difficulty,
    word_bank: &WordBank,
    scores: &mut ScoreKeeper,
) -> Result<()> {
    let mut rng = rand::thread_rng();
    let mut session = Session::new(mode);
    loop {
        let word = draw_word(session.rules(), difficulty, word_bank, &mut rng)?;
        session.start_round(&word)?;

        if !play_round(&mut session, &mut rng)? {
            println!("Goodbye!");
            return Ok(());
        }

        let Some(summary) = session.finish_round() else {
            bail!("Round ended without an outcome");
        };
        print_summary(&summary);

        if session.rules().endless {
            if session.is_over() {
                println!(
                    "Run over after {} words. Total score: {}",
                    session.rounds_won(),
                    session.total_score()
                );
                return scores.submit(session.submission_score());
            }
            continue;
        }
        scores.submit(session.submission_score())?;
        if !ask_yes_no("Play again? [y/N] ")? {
            return Ok(());
        }
    }
}

fn draw_word<R: rand::Rng>(
    rules: &ModeRules,
    difficulty: Difficulty,
    word_bank: &WordBank,
    rng: &mut R,
) -> Result<Box<str>> {
    if rules.any_difficulty {
        return word_bank
            .random_word_any(rng)
            .context("No words available in any difficulty");
    }
    word_bank
        .random_word(difficulty, rng)
        .with_context(|| format!("No words available for {} difficulty", difficulty))
}

/// Runs one round to completion. Returns `false` if the player quit.
fn play_round<R: rand::Rng>(session: &mut Session, rng: &mut R) -> Result<bool> {
    while session.round_outcome().is_none() {
        print_round(session);

        let started = Instant::now();
        let Some(input) = read_line("Please enter a letter: ")? else {
            return Ok(false);
        };
        if session.tick(started.elapsed()).is_some() {
            println!("Time's up!");
            break;
        }

        let input = input.trim();
        match input {
            "quit" | "exit" => return Ok(false),
            "?" => match session.use_hint(rng) {
                Some(letter) => println!("Hint: the word has no {}.", letter),
                None => println!("Error: no hints available."),
            },
            _ => match session.guess(input) {
                GuessOutcome::Accepted { letter, hit: true } => {
                    println!("Yes, {} is in the word.", letter)
                }
                GuessOutcome::Accepted { letter, hit: false } => {
                    println!("No {} in the word.", letter)
                }
                GuessOutcome::Rejected(RejectReason::AlreadyPlayed(letter)) => {
                    println!("Error: you have already played {}. Try another one.", letter)
                }
                GuessOutcome::Rejected(RejectReason::NotALetter) => {
                    println!("Error: invalid input. Please enter a single letter.")
                }
                GuessOutcome::Rejected(RejectReason::RoundOver) => break,
            },
        }
    }
    Ok(true)
}

fn print_round(session: &Session) {
    let Some(game) = session.round() else {
        return;
    };
    let pic_index = (game.error_count() as usize * (HANGMAN_PICS.len() - 1))
        / game.max_errors().max(1) as usize;
    println!("{}", HANGMAN_PICS[pic_index.min(HANGMAN_PICS.len() - 1)]);
    println!("\nWord: {}\n", game.masked_word());
    println!("Errors: {}/{}", game.error_count(), game.max_errors());
    let played: Vec<String> = game.played_letters().iter().map(char::to_string).collect();
    println!("Played letters: {}", played.join(", "));
    if let Some(remaining) = session.time_remaining() {
        println!("Time left: {}s", remaining.as_secs());
    }
    if session.rules().hints > 0 {
        println!("Hints left: {} (enter '?' to use one)", session.hints_left());
    }
    println!("Score: {}", session.current_score());
}

fn print_summary(summary: &RoundSummary) {
    println!();
    match summary.outcome {
        RoundOutcome::Won => println!("CONGRATULATIONS! You won!"),
        RoundOutcome::Lost => println!("GAME OVER! The hangman is complete."),
        RoundOutcome::TimedOut => println!("GAME OVER! You ran out of time."),
    }
    println!("The word was: {}", summary.secret_word);
    println!("Round score: {} (total {})", summary.score, summary.total_score);
}

/// Files qualifying scores under one leaderboard category.
struct ScoreKeeper<'a> {
    leaderboard: &'a mut Leaderboard,
    category: &'static str,
    /// Asked for the first time a score qualifies, if not given up front.
    name: Option<String>,
}

impl ScoreKeeper<'_> {
    fn submit(&mut self, score: i64) -> Result<()> {
        if !self.leaderboard.is_highscore(score, self.category) {
            return Ok(());
        }
        println!("New high score in {}: {}!", self.category, score);
        if self.name.is_none() {
            let prompt = format!("Enter your name (up to {} letters): ", MAX_NAME_LEN);
            self.name = read_line(&prompt)?.filter(|name| !name.trim().is_empty());
        }
        let name = self.name.as_deref().unwrap_or("???");
        if let Some(rank) = self.leaderboard.record(name, score, self.category) {
            println!("You are number {} in {}.", rank, self.category);
        }
        Ok(())
    }
}

fn print_scores(leaderboard: &Leaderboard, category: Option<&str>) {
    if leaderboard.is_empty() {
        println!("No scores yet.");
        return;
    }
    let categories: Vec<&str> = match category {
        Some(category) => vec![category],
        None => leaderboard.categories().collect(),
    };
    for category in categories {
        println!("|{}|Name|Score|", category);
        println!("|---|-----|-----|");
        for (rank, entry) in leaderboard.entries(category).iter().enumerate() {
            println!("|{}|{}|{}|", rank + 1, entry.name, entry.score);
        }
        println!();
    }
}

/// Prompts and reads one line from stdin. Returns `None` at end of input.
fn read_line(prompt: &str) -> io::Result<Option<String>> {
    print!("{}", prompt);
    io::stdout().flush()?;
    let mut buffer = String::new();
    if io::stdin().lock().read_line(&mut buffer)? == 0 {
        return Ok(None);
    }
    Ok(Some(buffer.trim_end_matches(['\r', '\n']).to_string()))
}

fn ask_yes_no(prompt: &str) -> io::Result<bool> {
    Ok(read_line(prompt)?
        .map_or(false, |answer| answer.trim().eq_ignore_ascii_case("y")))
}
