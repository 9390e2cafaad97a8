use crate::error::WordleError;
use crate::knowledge::Knowledge;
use crate::variant::GameVariant;
use std::io::BufRead;
use std::ops::Deref;
use std::sync::Arc;

/// Contains all the candidate words (or equations) for a game.
///
/// The list is read-only once constructed, and keeps the order it was given in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordBank {
    all_words: Vec<Arc<str>>,
    word_length: usize,
}

impl WordBank {
    /// Constructs a new `WordBank` struct by reading words from the given reader.
    ///
    /// The reader should provide one word per line. Each word will be trimmed and converted to
    /// lower case, and empty lines are skipped. All words must have the same length.
    pub fn from_reader<R: BufRead>(word_reader: R) -> Result<Self, WordleError> {
        let words = word_reader
            .lines()
            .collect::<std::io::Result<Vec<String>>>()
            .map_err(|err| WordleError::Configuration(format!("unable to read words: {err}")))?;
        WordBank::from_iterator(words)
    }

    /// Constructs a new `WordBank` struct using the words from the given iterator.
    ///
    /// Each word will be trimmed and converted to lower case, and empty words are skipped. All
    /// words must have the same length.
    pub fn from_iterator<S>(words: impl IntoIterator<Item = S>) -> Result<Self, WordleError>
    where
        S: AsRef<str>,
    {
        let mut word_length = 0;
        let all_words = words
            .into_iter()
            .filter_map(|word| {
                let word = word.as_ref().trim();
                if word.is_empty() {
                    return None;
                }
                Some(word.to_lowercase())
            })
            .map(|word| {
                let length = word.chars().count();
                if word_length == 0 {
                    word_length = length;
                } else if word_length != length {
                    return Err(WordleError::WordLength(word_length));
                }
                Ok(Arc::from(word.as_str()))
            })
            .collect::<Result<Vec<Arc<str>>, WordleError>>()?;
        Ok(WordBank {
            all_words,
            word_length,
        })
    }

    /// Wraps words that are already known to be well-formed and of the given length.
    pub(crate) fn from_generated(all_words: Vec<Arc<str>>, word_length: usize) -> Self {
        WordBank {
            all_words,
            word_length,
        }
    }

    /// Returns the number of possible words.
    pub fn len(&self) -> usize {
        self.all_words.len()
    }

    /// Returns `true` iff there are no words in the bank.
    pub fn is_empty(&self) -> bool {
        self.all_words.is_empty()
    }

    /// Returns the length of each word in the bank, or 0 if the bank is empty.
    pub fn word_length(&self) -> usize {
        self.word_length
    }

    /// Checks that every word in the bank belongs to the given variant.
    pub fn check_variant(&self, variant: &GameVariant) -> Result<(), WordleError> {
        if self.is_empty() {
            return Ok(());
        }
        self.all_words
            .iter()
            .try_for_each(|word| variant.check_word(word))
    }
}

impl Deref for WordBank {
    type Target = [Arc<str>];

    fn deref(&self) -> &Self::Target {
        &self.all_words
    }
}

/// Gets the list of words in the universe that are still possible answers, in universe order.
pub fn valid_solutions(knowledge: &Knowledge, universe: &[Arc<str>]) -> Vec<Arc<str>> {
    universe
        .iter()
        .filter(|word| knowledge.is_valid_solution(word))
        .map(Arc::clone)
        .collect()
}

/// Like [`valid_solutions`], but sorted for display.
pub fn sorted_valid_solutions(knowledge: &Knowledge, universe: &[Arc<str>]) -> Vec<Arc<str>> {
    let mut words = valid_solutions(knowledge, universe);
    words.sort_unstable();
    words
}

/// Counts the words in the universe that are still possible answers.
pub fn count_valid_solutions(knowledge: &Knowledge, universe: &[Arc<str>]) -> usize {
    universe
        .iter()
        .filter(|word| knowledge.is_valid_solution(word))
        .count()
}
