use crate::results::*;
use log::warn;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeMap;
use std::fmt;
use std::io::BufRead;
use std::io::Write;
use std::result::Result;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How hard the words in a section of the word list are.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    /// The section header used for this difficulty in word list files.
    pub fn section_name(self) -> &'static str {
        match self {
            Difficulty::Easy => "facile",
            Difficulty::Normal => "moyen",
            Difficulty::Hard => "difficile",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        })
    }
}

impl FromStr for Difficulty {
    type Err = HangmanError;

    /// Accepts both the English names and the word list section names, in any case.
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.trim().to_lowercase().as_str() {
            "easy" | "facile" => Ok(Difficulty::Easy),
            "normal" | "medium" | "moyen" => Ok(Difficulty::Normal),
            "hard" | "difficile" => Ok(Difficulty::Hard),
            _ => Err(HangmanError::UnknownDifficulty(name.to_string())),
        }
    }
}

/// Contains the candidate secret words, grouped by difficulty.
///
/// Words are stored in lower case and handed out in upper case.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WordBank {
    words: BTreeMap<Difficulty, Vec<Box<str>>>,
}

impl WordBank {
    /// Constructs a new `WordBank` by reading a sectioned word list from the given reader.
    ///
    /// The list has one word per line, grouped under `[facile]`, `[moyen]` and `[difficile]`
    /// headers (`[easy]`, `[normal]` and `[hard]` also work). Blank lines are ignored, as are
    /// words before the first header or under an unknown header.
    ///
    /// ```
    /// use hangman_engine::*;
    /// use std::io::Cursor;
    ///
    /// let mut cursor = Cursor::new("[facile]\ncat\ndog\n\n[difficile]\nalgorithm\n");
    /// let bank = WordBank::from_reader(&mut cursor).unwrap();
    ///
    /// assert_eq!(bank.words(Difficulty::Easy).len(), 2);
    /// assert!(bank.words(Difficulty::Normal).is_empty());
    /// ```
    pub fn from_reader<R: BufRead>(word_reader: R) -> Result<Self, HangmanError> {
        let mut bank = WordBank::default();
        let mut current: Option<Difficulty> = None;
        let mut in_unknown_section = false;
        for (line_number, maybe_line) in word_reader.lines().enumerate() {
            let line = maybe_line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                match name.parse::<Difficulty>() {
                    Ok(difficulty) => {
                        bank.words.entry(difficulty).or_default();
                        current = Some(difficulty);
                        in_unknown_section = false;
                    }
                    Err(_) => {
                        warn!("Skipping unknown section [{}] on line {}", name, line_number + 1);
                        current = None;
                        in_unknown_section = true;
                    }
                }
                continue;
            }
            match current {
                Some(difficulty) => bank.push(difficulty, line),
                None if !in_unknown_section => {
                    warn!("Skipping '{}' on line {}: no section yet", line, line_number + 1)
                }
                None => {}
            }
        }
        Ok(bank)
    }

    /// Constructs a new `WordBank` from `(difficulty, word)` pairs. Empty words are skipped.
    pub fn from_iterator<S, I>(words: I) -> Self
    where
        S: AsRef<str>,
        I: IntoIterator<Item = (Difficulty, S)>,
    {
        let mut bank = WordBank::default();
        for (difficulty, word) in words {
            let word = word.as_ref().trim();
            if !word.is_empty() {
                bank.push(difficulty, word);
            }
        }
        bank
    }

    fn push(&mut self, difficulty: Difficulty, word: &str) {
        self.words
            .entry(difficulty)
            .or_default()
            .push(Box::from(word.to_lowercase().as_str()));
    }

    /// The words available at the given difficulty, in file order.
    pub fn words(&self, difficulty: Difficulty) -> &[Box<str>] {
        self.words
            .get(&difficulty)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Picks a random upper-case word of the given difficulty, or `None` if there are none.
    pub fn random_word<R: Rng + ?Sized>(
        &self,
        difficulty: Difficulty,
        rng: &mut R,
    ) -> Option<Box<str>> {
        self.words(difficulty)
            .choose(rng)
            .map(|word| Box::from(word.to_uppercase().as_str()))
    }

    /// Picks a random difficulty, then a random word from it. If that difficulty has no words,
    /// the others are tried in random order.
    pub fn random_word_any<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Box<str>> {
        let mut difficulties = Difficulty::ALL;
        difficulties.shuffle(rng);
        difficulties
            .iter()
            .find_map(|difficulty| self.random_word(*difficulty, rng))
    }

    /// Adds a word under the given difficulty.
    ///
    /// Fails if the trimmed word is empty or already present at that difficulty, ignoring case.
    pub fn add_word(&mut self, word: &str, difficulty: Difficulty) -> Result<(), HangmanError> {
        let word = word.trim();
        if word.is_empty() {
            return Err(HangmanError::EmptyWord);
        }
        let lower = word.to_lowercase();
        if self
            .words(difficulty)
            .iter()
            .any(|existing| **existing == *lower)
        {
            return Err(HangmanError::DuplicateWord {
                word: word.to_string(),
                difficulty: difficulty.section_name().to_string(),
            });
        }
        self.push(difficulty, &lower);
        Ok(())
    }

    /// Writes the bank in the format read by [`WordBank::from_reader`]. Sections are written from
    /// easiest to hardest and empty sections are left out.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), HangmanError> {
        for (difficulty, words) in &self.words {
            if words.is_empty() {
                continue;
            }
            writeln!(writer, "[{}]", difficulty.section_name())?;
            for word in words {
                writeln!(writer, "{}", word)?;
            }
            writeln!(writer)?;
        }
        Ok(())
    }

    /// Returns the total number of words across all difficulties.
    pub fn len(&self) -> usize {
        self.words.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
