//! A Hangman game engine.
//!
//! A [`GameState`] holds a single round: the secret word, the letters played against it, and the
//! errors made. [`calculate_score`] turns a round into points, and a [`Leaderboard`] decides which
//! scores are worth keeping. On top of that, a [`WordBank`] supplies secret words by
//! [`Difficulty`], and a [`Session`] plays rounds under the rules of a [`GameMode`].

mod data;
mod engine;
mod leaderboard;
mod modes;
mod results;
mod scoring;
mod session;

pub use data::Difficulty;
pub use data::WordBank;
pub use engine::*;
pub use leaderboard::*;
pub use modes::*;
pub use results::*;
pub use scoring::*;
pub use session::*;
