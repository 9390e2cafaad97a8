use crate::codec::decode_exact;
use crate::data::valid_solutions;
use crate::error::{Contradiction, WordleError};
use crate::results::GuessResult;
use crate::variant::GameVariant;
use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Everything learned so far within a game.
///
/// Results are merged in with [`Knowledge::add_result`]. Merging only ever tightens the
/// constraints, so the set of valid solutions can shrink but never grow. Cloning produces an
/// independent copy, which is how hypothetical results are explored without touching the
/// original.
///
/// ```
/// use rs_wordle_knowledge::{GameVariant, Knowledge};
///
/// let knowledge = Knowledge::from_result_strs(&GameVariant::wordle(), &["b?lob?s"]).unwrap();
/// assert!(knowledge.is_valid_solution("abbey"));
/// assert!(!knowledge.is_valid_solution("blobs"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "KnowledgeFields")
)]
pub struct Knowledge {
    /// The character known to be at each position, if any.
    positions: Vec<Option<char>>,
    /// The minimum number of times each character must appear.
    min_counts: BTreeMap<char, usize>,
    /// The maximum number of times each character may appear. Fixed once known.
    max_counts: BTreeMap<char, usize>,
    /// Characters known not to be at each position.
    excluded: Vec<BTreeSet<char>>,
}

/// The serialized form of [`Knowledge`], checked before it is accepted.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct KnowledgeFields {
    positions: Vec<Option<char>>,
    min_counts: BTreeMap<char, usize>,
    max_counts: BTreeMap<char, usize>,
    excluded: Vec<BTreeSet<char>>,
}

#[cfg(feature = "serde")]
impl TryFrom<KnowledgeFields> for Knowledge {
    type Error = WordleError;

    fn try_from(fields: KnowledgeFields) -> Result<Self, Self::Error> {
        if fields.excluded.len() != fields.positions.len() {
            return Err(WordleError::WordLength(fields.positions.len()));
        }
        for (&character, &min) in &fields.min_counts {
            if let Some(&max) = fields.max_counts.get(&character) {
                if min > max {
                    return Err(Contradiction::MinAboveMax {
                        character,
                        min,
                        max,
                    }
                    .into());
                }
            }
        }
        Ok(Knowledge {
            positions: fields.positions,
            min_counts: fields.min_counts,
            max_counts: fields.max_counts,
            excluded: fields.excluded,
        })
    }
}

impl Knowledge {
    /// Creates empty knowledge for answers of the given length.
    pub fn new(answer_length: usize) -> Knowledge {
        Knowledge {
            positions: vec![None; answer_length],
            min_counts: BTreeMap::new(),
            max_counts: BTreeMap::new(),
            excluded: vec![BTreeSet::new(); answer_length],
        }
    }

    /// Creates empty knowledge for the given variant.
    pub fn for_variant(variant: &GameVariant) -> Knowledge {
        Knowledge::new(variant.answer_length())
    }

    /// Folds each of the given results into new knowledge, in order.
    pub fn from_results<'a>(
        variant: &GameVariant,
        results: impl IntoIterator<Item = &'a GuessResult>,
    ) -> Result<Knowledge, WordleError> {
        let mut knowledge = Knowledge::for_variant(variant);
        for result in results {
            knowledge.add_result(result)?;
        }
        Ok(knowledge)
    }

    /// Decodes each result string and folds it into new knowledge, in order.
    pub fn from_result_strs<S: AsRef<str>>(
        variant: &GameVariant,
        results: &[S],
    ) -> Result<Knowledge, WordleError> {
        let mut knowledge = Knowledge::for_variant(variant);
        for text in results {
            knowledge.add_result(&decode_exact(variant, text.as_ref())?)?;
        }
        Ok(knowledge)
    }

    pub fn answer_length(&self) -> usize {
        self.positions.len()
    }

    pub fn positions(&self) -> &[Option<char>] {
        &self.positions
    }

    pub fn min_counts(&self) -> &BTreeMap<char, usize> {
        &self.min_counts
    }

    pub fn max_counts(&self) -> &BTreeMap<char, usize> {
        &self.max_counts
    }

    pub fn excluded(&self) -> &[BTreeSet<char>] {
        &self.excluded
    }

    /// Merges the constraints implied by the given result.
    ///
    /// Returns [`WordleError::ConstraintViolation`] if the result contradicts what is already
    /// known. Every check runs before anything is written, so on error this knowledge is left
    /// unchanged.
    pub fn add_result(&mut self, result: &GuessResult) -> Result<(), WordleError> {
        if result.len() != self.answer_length() {
            return Err(WordleError::WordLength(self.answer_length()));
        }
        self.check_result(result)?;

        for &(index, character) in result.correct_positions() {
            self.positions[index] = Some(character);
        }
        for (&character, &min) in result.min_counts() {
            let known_min = self.min_counts.entry(character).or_insert(0);
            if min > *known_min {
                *known_min = min;
            }
        }
        for (&character, &max) in result.max_counts() {
            self.max_counts.entry(character).or_insert(max);
        }
        for &(index, character) in result.wrong_positions() {
            self.excluded[index].insert(character);
        }
        Ok(())
    }

    fn check_result(&self, result: &GuessResult) -> Result<(), Contradiction> {
        for &(index, proposed) in result.correct_positions() {
            if let Some(known) = self.positions[index] {
                if known != proposed {
                    return Err(Contradiction::Position {
                        index,
                        known,
                        proposed,
                    });
                }
            }
        }
        for (&character, &min) in result.min_counts() {
            if let Some(&max) = self.max_counts.get(&character) {
                if min > max {
                    return Err(Contradiction::MinAboveMax {
                        character,
                        min,
                        max,
                    });
                }
            }
        }
        for (&character, &max) in result.max_counts() {
            if let Some(&min) = self.min_counts.get(&character) {
                if max < min {
                    return Err(Contradiction::MaxBelowMin {
                        character,
                        max,
                        min,
                    });
                }
            }
            if let Some(&known) = self.max_counts.get(&character) {
                if known != max {
                    return Err(Contradiction::MaxChanged {
                        character,
                        known,
                        proposed: max,
                    });
                }
            }
        }
        Ok(())
    }

    /// Returns `true` iff the given word is still a possible answer.
    pub fn is_valid_solution(&self, word: &str) -> bool {
        let mut length = 0;
        for (index, letter) in word.chars().enumerate() {
            length += 1;
            if index >= self.positions.len() {
                return false;
            }
            if let Some(known) = self.positions[index] {
                if known != letter {
                    return false;
                }
            }
            if self.excluded[index].contains(&letter) {
                return false;
            }
        }
        if length != self.positions.len() {
            return false;
        }
        let count_of = |letter: char| word.chars().filter(|c| *c == letter).count();
        self.min_counts
            .iter()
            .all(|(letter, min)| count_of(*letter) >= *min)
            && self
                .max_counts
                .iter()
                .all(|(letter, max)| count_of(*letter) <= *max)
    }

    /// Returns every word in the universe that is still a possible answer, in universe order.
    pub fn valid_solutions(&self, universe: &[Arc<str>]) -> Vec<Arc<str>> {
        valid_solutions(self, universe)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::get_result;
    use assert_matches::assert_matches;

    #[test]
    fn accumulates_counts_and_positions() -> Result<(), WordleError> {
        let mut knowledge = Knowledge::for_variant(&GameVariant::wordle());

        knowledge.add_result(&get_result("abbey", "blobs")?)?;
        assert_eq!(knowledge.min_counts(), &BTreeMap::from([('b', 2)]));
        assert_eq!(knowledge.positions(), &[None; 5]);
        assert_eq!(
            knowledge.max_counts(),
            &BTreeMap::from([('l', 0), ('o', 0), ('s', 0)])
        );

        knowledge.add_result(&get_result("abbey", "blurb")?)?;
        assert_eq!(knowledge.min_counts(), &BTreeMap::from([('b', 2)]));
        assert_eq!(knowledge.positions(), &[None; 5]);
        assert_eq!(
            knowledge.max_counts(),
            &BTreeMap::from([('l', 0), ('o', 0), ('r', 0), ('s', 0), ('u', 0)])
        );

        knowledge.add_result(&get_result("abbey", "bobby")?)?;
        assert_eq!(knowledge.min_counts(), &BTreeMap::from([('b', 2), ('y', 1)]));
        assert_eq!(
            knowledge.positions(),
            &[None, None, Some('b'), None, Some('y')]
        );
        assert_eq!(
            knowledge.max_counts(),
            &BTreeMap::from([('b', 2), ('l', 0), ('o', 0), ('r', 0), ('s', 0), ('u', 0)])
        );
        assert_eq!(knowledge.excluded()[0], BTreeSet::from(['b']));
        assert_eq!(knowledge.excluded()[3], BTreeSet::from(['b']));
        assert_eq!(knowledge.excluded()[4], BTreeSet::from(['b']));
        Ok(())
    }

    #[test]
    fn tracks_maximum_counts() -> Result<(), WordleError> {
        let mut knowledge = Knowledge::for_variant(&GameVariant::wordle());
        knowledge.add_result(&get_result("odder", "order")?)?;

        assert!(!knowledge.is_valid_solution("order"));
        assert!(knowledge.is_valid_solution("odder"));

        let mut knowledge = Knowledge::for_variant(&GameVariant::wordle());
        knowledge.add_result(&get_result("order", "odder")?)?;

        assert!(!knowledge.is_valid_solution("odder"));
        assert!(knowledge.is_valid_solution("order"));
        Ok(())
    }

    #[test]
    fn is_valid_solution_rejects_wrong_length() {
        let knowledge = Knowledge::new(5);

        assert!(knowledge.is_valid_solution("abcde"));
        assert!(!knowledge.is_valid_solution("abcd"));
        assert!(!knowledge.is_valid_solution("abcdef"));
    }

    #[test]
    fn adding_same_result_twice_changes_nothing() -> Result<(), WordleError> {
        let result = get_result("abbey", "bobby")?;
        let mut once = Knowledge::new(5);
        once.add_result(&result)?;
        let mut twice = once.clone();

        twice.add_result(&result)?;

        assert_eq!(once, twice);
        Ok(())
    }

    #[test]
    fn conflicting_positions_fail() -> Result<(), WordleError> {
        let variant = GameVariant::wordle();
        let mut knowledge = Knowledge::from_result_strs(&variant, &["a@bcde"])?;

        assert_eq!(
            knowledge.add_result(&decode_exact(&variant, "x@bcde")?),
            Err(WordleError::ConstraintViolation(Contradiction::Position {
                index: 0,
                known: 'a',
                proposed: 'x'
            }))
        );
        Ok(())
    }

    #[test]
    fn min_above_known_max_fails() -> Result<(), WordleError> {
        let variant = GameVariant::wordle();
        let mut knowledge = Knowledge::from_result_strs(&variant, &["abcde"])?;

        assert_matches!(
            knowledge.add_result(&decode_exact(&variant, "a?fghi")?),
            Err(WordleError::ConstraintViolation(Contradiction::MinAboveMax {
                character: 'a',
                min: 1,
                max: 0
            }))
        );
        Ok(())
    }

    #[test]
    fn max_below_known_min_fails() -> Result<(), WordleError> {
        let variant = GameVariant::wordle();
        let mut knowledge = Knowledge::from_result_strs(&variant, &["a?a?cde"])?;

        // 'a' is present once here and absent once, which caps it at one copy.
        assert_matches!(
            knowledge.add_result(&decode_exact(&variant, "a?fagh")?),
            Err(WordleError::ConstraintViolation(Contradiction::MaxBelowMin {
                character: 'a',
                max: 1,
                min: 2
            }))
        );
        Ok(())
    }

    #[test]
    fn changed_max_fails() -> Result<(), WordleError> {
        let variant = GameVariant::wordle();
        let mut knowledge = Knowledge::new(5);
        knowledge.min_counts.insert('a', 1);
        knowledge.max_counts.insert('a', 2);

        assert_matches!(
            knowledge.add_result(&decode_exact(&variant, "a?bcda")?),
            Err(WordleError::ConstraintViolation(Contradiction::MaxChanged {
                character: 'a',
                known: 2,
                proposed: 1
            }))
        );
        Ok(())
    }

    #[test]
    fn failed_merge_leaves_knowledge_unchanged() -> Result<(), WordleError> {
        let variant = GameVariant::wordle();
        let mut knowledge = Knowledge::from_result_strs(&variant, &["a@bcde"])?;
        let before = knowledge.clone();

        // Valid excluded letters and counts precede the conflicting position.
        let result = decode_exact(&variant, "x@y?zqr")?;
        assert_matches!(
            knowledge.add_result(&result),
            Err(WordleError::ConstraintViolation(_))
        );
        assert_eq!(knowledge, before);
        Ok(())
    }

    #[test]
    fn wrong_length_result_fails() -> Result<(), WordleError> {
        let mut knowledge = Knowledge::new(5);

        assert_eq!(
            knowledge.add_result(&get_result("abc", "abd")?),
            Err(WordleError::WordLength(5))
        );
        Ok(())
    }

    #[test]
    fn copy_is_independent() -> Result<(), WordleError> {
        let original = Knowledge::new(5);
        let mut copy = original.clone();

        copy.add_result(&get_result("point", "title")?)?;

        assert_eq!(original, Knowledge::new(5));
        assert!(original.is_valid_solution("title"));
        assert!(!copy.is_valid_solution("title"));
        Ok(())
    }
}
