use log::debug;
use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How many entries each category keeps.
pub const MAX_ENTRIES_PER_CATEGORY: usize = 10;

/// How many characters of a player's name are kept.
pub const MAX_NAME_LEN: usize = 5;

/// One ranked score.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScoreEntry {
    pub name: String,
    pub score: i64,
}

/// The best scores per category, each list sorted from highest to lowest and capped at
/// [`MAX_ENTRIES_PER_CATEGORY`].
///
/// With the `serde` feature, this serializes as a plain map from category name to its list of
/// entries. Lists read this way are re-sorted and truncated.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(
        from = "BTreeMap<String, Vec<ScoreEntry>>",
        into = "BTreeMap<String, Vec<ScoreEntry>>"
    )
)]
pub struct Leaderboard {
    categories: BTreeMap<String, Vec<ScoreEntry>>,
}

impl Leaderboard {
    pub fn new() -> Leaderboard {
        Leaderboard::default()
    }

    /// Returns `true` if `score` would earn a place in `category`.
    ///
    /// Non-positive scores never qualify. Any positive score qualifies for a category with no
    /// entries yet or with free places; otherwise it must beat the lowest retained score.
    pub fn is_highscore(&self, score: i64, category: &str) -> bool {
        if score <= 0 {
            return false;
        }
        match self.categories.get(category) {
            None => true,
            Some(entries) if entries.len() < MAX_ENTRIES_PER_CATEGORY => true,
            Some(entries) => entries.last().map_or(true, |lowest| score > lowest.score),
        }
    }

    /// Records a score under `category`.
    ///
    /// The name is trimmed, cut to [`MAX_NAME_LEN`] characters and upper-cased. Ties keep the
    /// earlier entry first. Returns the 1-based rank of the new entry, or `None` if it fell off
    /// the end of the list.
    pub fn record(&mut self, name: &str, score: i64, category: &str) -> Option<usize> {
        let name: String = name.trim().chars().take(MAX_NAME_LEN).collect();
        let entries = self.categories.entry(category.to_string()).or_default();
        let position = entries
            .iter()
            .position(|entry| entry.score < score)
            .unwrap_or(entries.len());
        entries.insert(
            position,
            ScoreEntry {
                name: name.to_uppercase(),
                score,
            },
        );
        entries.truncate(MAX_ENTRIES_PER_CATEGORY);

        let rank = (position < MAX_ENTRIES_PER_CATEGORY).then_some(position + 1);
        debug!("Recorded {} in '{}' at rank {:?}", score, category, rank);
        rank
    }

    /// The entries of `category`, best first. Empty if the category is unknown.
    pub fn entries(&self, category: &str) -> &[ScoreEntry] {
        self.categories
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Category names in alphabetical order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Returns `true` if `score` would earn a place in `category` of `leaderboard`.
///
/// See [`Leaderboard::is_highscore`].
pub fn check_if_highscore(leaderboard: &Leaderboard, score: i64, category: &str) -> bool {
    leaderboard.is_highscore(score, category)
}

impl From<BTreeMap<String, Vec<ScoreEntry>>> for Leaderboard {
    fn from(mut categories: BTreeMap<String, Vec<ScoreEntry>>) -> Self {
        for entries in categories.values_mut() {
            entries.sort_by(|a, b| b.score.cmp(&a.score));
            entries.truncate(MAX_ENTRIES_PER_CATEGORY);
        }
        Leaderboard { categories }
    }
}

impl From<Leaderboard> for BTreeMap<String, Vec<ScoreEntry>> {
    fn from(leaderboard: Leaderboard) -> Self {
        leaderboard.categories
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, score: i64) -> ScoreEntry {
        ScoreEntry {
            name: name.to_string(),
            score,
        }
    }

    #[test]
    fn from_map_sorts_and_truncates() {
        let mut map = BTreeMap::new();
        map.insert(
            "normal".to_string(),
            (1..=12).map(|score| entry("A", score)).collect::<Vec<_>>(),
        );

        let leaderboard = Leaderboard::from(map);
        let entries = leaderboard.entries("normal");

        assert_eq!(entries.len(), MAX_ENTRIES_PER_CATEGORY);
        assert_eq!(entries[0].score, 12);
        assert_eq!(entries[9].score, 3);
    }

    #[test]
    fn is_highscore_with_empty_category() {
        let mut map = BTreeMap::new();
        map.insert("hard".to_string(), Vec::new());

        assert!(Leaderboard::from(map).is_highscore(1, "hard"));
    }
}
