//! Reasoning about the feedback of Wordle-style guessing games.
//!
//! The same engine serves both the word game and the arithmetic (Nerdle-style) game. A
//! [`GameVariant`] supplies the alphabet and answer length, and everything else is shared:
//!
//! * [`get_result`] computes the feedback for a guess against an answer.
//! * [`decode`] and [`encode`] convert feedback to and from the compact text notation.
//! * [`Knowledge`] accumulates feedback into constraints on the answer.
//! * [`valid_solutions`] filters a universe of candidates against those constraints.
//! * [`rank_guesses`] scores guesses by how many candidates they are expected to eliminate.
//!
//! ```
//! use rs_wordle_knowledge::*;
//!
//! let universe = WordBank::from_iterator(["point", "joint", "title", "paint"]).unwrap();
//! let mut knowledge = Knowledge::for_variant(&GameVariant::wordle());
//! knowledge.add_result(&decode(&GameVariant::wordle(), "t?i?tle").unwrap()).unwrap();
//!
//! let remaining = valid_solutions(&knowledge, &universe);
//! assert_eq!(remaining.len(), 3);
//! ```

mod codec;
mod data;
mod engine;
mod error;
mod evaluator;
mod knowledge;
mod pool;
mod results;
mod variant;

pub mod equations;

pub use codec::{decode, decode_exact, encode};
pub use data::{count_valid_solutions, sorted_valid_solutions, valid_solutions, WordBank};
pub use engine::*;
pub use error::{Contradiction, WordleError};
pub use evaluator::*;
pub use knowledge::Knowledge;
pub use pool::{CancelToken, WorkerPool};
pub use results::*;
pub use variant::{GameVariant, CORRECT_MARKER, WRONG_PLACE_MARKER};
