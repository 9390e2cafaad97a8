use crate::error::WordleError;
use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The feedback given for a single character of a guess.
#[derive(Debug, Eq, PartialEq, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TileFeedback {
    /// The character is in the answer at this position.
    Correct,
    /// The character is not in the answer (or not as many times as it was guessed).
    Wrong,
    /// The character is in the answer, but not at this position.
    WrongPlace,
}

/// One character of a guess along with the feedback it received.
#[derive(Debug, Eq, PartialEq, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ResultPiece {
    pub character: char,
    pub feedback: TileFeedback,
}

impl ResultPiece {
    pub fn new(character: char, feedback: TileFeedback) -> ResultPiece {
        ResultPiece {
            character,
            feedback,
        }
    }
}

/// The result of a single guess: one [`ResultPiece`] per position, in guess order.
///
/// The constraints implied by the result are derived once on construction, and the result is
/// never modified afterwards.
#[derive(Debug, Eq, PartialEq, Clone)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(from = "Vec<ResultPiece>", into = "Vec<ResultPiece>")
)]
pub struct GuessResult {
    pieces: Vec<ResultPiece>,
    correct_positions: Vec<(usize, char)>,
    min_counts: BTreeMap<char, usize>,
    max_counts: BTreeMap<char, usize>,
    wrong_positions: Vec<(usize, char)>,
}

impl GuessResult {
    /// Constructs a result from its pieces, deriving the implied constraints.
    pub fn new(pieces: Vec<ResultPiece>) -> GuessResult {
        let correct_positions = pieces
            .iter()
            .enumerate()
            .filter(|(_, piece)| piece.feedback == TileFeedback::Correct)
            .map(|(index, piece)| (index, piece.character))
            .collect();
        let wrong_positions = pieces
            .iter()
            .enumerate()
            .filter(|(_, piece)| piece.feedback == TileFeedback::WrongPlace)
            .map(|(index, piece)| (index, piece.character))
            .collect();

        let mut min_counts: BTreeMap<char, usize> = BTreeMap::new();
        let mut max_counts: BTreeMap<char, usize> = BTreeMap::new();
        for piece in &pieces {
            match piece.feedback {
                TileFeedback::Wrong => {
                    // Finalised below, once every present copy has been counted.
                    max_counts.insert(piece.character, 0);
                }
                _ => *min_counts.entry(piece.character).or_insert(0) += 1,
            }
        }
        // A character marked wrong appears exactly as many times as it was marked present.
        for (character, max) in max_counts.iter_mut() {
            *max = min_counts.get(character).copied().unwrap_or(0);
        }

        GuessResult {
            pieces,
            correct_positions,
            min_counts,
            max_counts,
            wrong_positions,
        }
    }

    pub fn pieces(&self) -> &[ResultPiece] {
        &self.pieces
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// The guess this result was computed for.
    pub fn guess(&self) -> String {
        self.pieces.iter().map(|piece| piece.character).collect()
    }

    /// Returns `true` iff every character was correct.
    pub fn is_solved(&self) -> bool {
        self.pieces
            .iter()
            .all(|piece| piece.feedback == TileFeedback::Correct)
    }

    /// Positions known to hold the given character.
    pub fn correct_positions(&self) -> &[(usize, char)] {
        &self.correct_positions
    }

    /// The minimum number of times each character must appear in the answer.
    pub fn min_counts(&self) -> &BTreeMap<char, usize> {
        &self.min_counts
    }

    /// The exact number of times a character appears in the answer. Only present for characters
    /// that received [`TileFeedback::Wrong`] at least once.
    pub fn max_counts(&self) -> &BTreeMap<char, usize> {
        &self.max_counts
    }

    /// Positions where a character was present in the answer, but elsewhere.
    pub fn wrong_positions(&self) -> &[(usize, char)] {
        &self.wrong_positions
    }
}

impl From<Vec<ResultPiece>> for GuessResult {
    fn from(pieces: Vec<ResultPiece>) -> Self {
        GuessResult::new(pieces)
    }
}

impl From<GuessResult> for Vec<ResultPiece> {
    fn from(result: GuessResult) -> Self {
        result.pieces
    }
}

/// Determines the result of the given `guess` when applied to the given `answer`.
///
/// Repeated characters in the guess are marked present from left to right, up to the number of
/// times the character appears in the answer. Exact matches are always counted first.
///
/// ```
/// use rs_wordle_knowledge::{get_result, TileFeedback};
///
/// let result = get_result("abbey", "blobs").unwrap();
/// let feedback: Vec<TileFeedback> = result.pieces().iter().map(|p| p.feedback).collect();
/// assert_eq!(
///     feedback,
///     vec![
///         TileFeedback::WrongPlace,
///         TileFeedback::Wrong,
///         TileFeedback::Wrong,
///         TileFeedback::WrongPlace,
///         TileFeedback::Wrong,
///     ]
/// );
/// ```
pub fn get_result(answer: &str, guess: &str) -> Result<GuessResult, WordleError> {
    let answer: Vec<char> = answer.chars().collect();
    let guess: Vec<char> = guess.chars().collect();
    if answer.len() != guess.len() {
        return Err(WordleError::WordLength(answer.len()));
    }

    let mut feedback: Vec<Option<TileFeedback>> = guess
        .iter()
        .zip(answer.iter())
        .map(|(g, a)| {
            if g == a {
                Some(TileFeedback::Correct)
            } else if !answer.contains(g) {
                Some(TileFeedback::Wrong)
            } else {
                None
            }
        })
        .collect();

    for index in 0..guess.len() {
        if feedback[index].is_some() {
            continue;
        }
        let letter = guess[index];
        let in_answer = answer.iter().filter(|a| **a == letter).count();
        let already_marked = guess
            .iter()
            .zip(feedback.iter())
            .filter(|(g, f)| {
                **g == letter
                    && matches!(f, Some(TileFeedback::Correct | TileFeedback::WrongPlace))
            })
            .count();
        feedback[index] = if in_answer > already_marked {
            Some(TileFeedback::WrongPlace)
        } else {
            Some(TileFeedback::Wrong)
        };
    }

    Ok(GuessResult::new(
        guess
            .into_iter()
            .zip(feedback)
            .map(|(character, feedback)| {
                ResultPiece::new(character, feedback.unwrap_or(TileFeedback::Wrong))
            })
            .collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feedback_of(result: &GuessResult) -> Vec<TileFeedback> {
        result.pieces().iter().map(|piece| piece.feedback).collect()
    }

    #[test]
    fn derived_counts_with_duplicates() -> Result<(), WordleError> {
        let result = get_result("abbey", "bobby")?;

        assert_eq!(
            feedback_of(&result),
            vec![
                TileFeedback::WrongPlace,
                TileFeedback::Wrong,
                TileFeedback::Correct,
                TileFeedback::Wrong,
                TileFeedback::Correct,
            ]
        );
        assert_eq!(result.correct_positions(), &[(2, 'b'), (4, 'y')]);
        assert_eq!(result.wrong_positions(), &[(0, 'b')]);
        assert_eq!(
            result.min_counts(),
            &BTreeMap::from([('b', 2), ('y', 1)])
        );
        assert_eq!(result.max_counts(), &BTreeMap::from([('b', 2), ('o', 0)]));
        Ok(())
    }

    #[test]
    fn max_only_for_wrong_characters() -> Result<(), WordleError> {
        let result = get_result("point", "title")?;

        assert_eq!(result.min_counts(), &BTreeMap::from([('i', 1), ('t', 1)]));
        // 't' was marked wrong once, so it appears exactly as often as it was marked present.
        assert_eq!(
            result.max_counts(),
            &BTreeMap::from([('e', 0), ('l', 0), ('t', 1)])
        );
        Ok(())
    }

    #[test]
    fn solved() -> Result<(), WordleError> {
        assert!(get_result("12+35=47", "12+35=47")?.is_solved());
        assert!(!get_result("12+35=47", "35+12=47")?.is_solved());
        Ok(())
    }

    #[test]
    fn guess_is_preserved() -> Result<(), WordleError> {
        assert_eq!(get_result("point", "trout")?.guess(), "trout");
        Ok(())
    }

    #[test]
    fn long_results_count_many_repeats() -> Result<(), WordleError> {
        let answer = "a".repeat(300);
        let guess = format!("{}b", "a".repeat(299));

        let result = get_result(&answer, &guess)?;

        assert_eq!(result.min_counts(), &BTreeMap::from([('a', 299)]));
        assert_eq!(result.max_counts(), &BTreeMap::from([('b', 0)]));
        let mut knowledge = crate::knowledge::Knowledge::new(300);
        knowledge.add_result(&result)?;
        assert!(knowledge.is_valid_solution(&answer));
        Ok(())
    }
}
