use crate::error::WordleError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Marks a character that is in the answer, but somewhere else.
pub const WRONG_PLACE_MARKER: char = '?';
/// Marks a character that is in the answer at this exact position.
pub const CORRECT_MARKER: char = '@';

/// Describes one flavour of the game: which characters may appear, how long every answer is, and
/// which of those characters are arithmetic operators.
///
/// Both supported games share every algorithm in this crate; only this value differs.
///
/// ```
/// use rs_wordle_knowledge::GameVariant;
///
/// let wordle = GameVariant::wordle();
/// assert_eq!(wordle.answer_length(), 5);
/// assert!(wordle.contains('q'));
/// assert!(!wordle.contains('='));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "GameVariantFields")
)]
pub struct GameVariant {
    alphabet: Vec<char>,
    answer_length: usize,
    operators: Vec<char>,
}

/// The serialized form of [`GameVariant`], validated by [`GameVariant::new`].
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct GameVariantFields {
    alphabet: Vec<char>,
    answer_length: usize,
    operators: Vec<char>,
}

#[cfg(feature = "serde")]
impl TryFrom<GameVariantFields> for GameVariant {
    type Error = WordleError;

    fn try_from(fields: GameVariantFields) -> Result<Self, Self::Error> {
        GameVariant::new(fields.alphabet, fields.answer_length, fields.operators)
    }
}

impl GameVariant {
    /// Constructs a custom variant, validating its parameters.
    pub fn new(
        alphabet: impl IntoIterator<Item = char>,
        answer_length: usize,
        operators: impl IntoIterator<Item = char>,
    ) -> Result<GameVariant, WordleError> {
        let alphabet: Vec<char> = alphabet.into_iter().collect();
        let operators: Vec<char> = operators.into_iter().collect();
        if answer_length == 0 {
            return Err(WordleError::Configuration(
                "the answer length must be positive".to_string(),
            ));
        }
        if alphabet.is_empty() {
            return Err(WordleError::Configuration(
                "the alphabet must not be empty".to_string(),
            ));
        }
        for (index, symbol) in alphabet.iter().enumerate() {
            if alphabet[..index].contains(symbol) {
                return Err(WordleError::Configuration(format!(
                    "{symbol:?} appears more than once in the alphabet"
                )));
            }
            if *symbol == WRONG_PLACE_MARKER || *symbol == CORRECT_MARKER {
                return Err(WordleError::Configuration(format!(
                    "{symbol:?} is reserved as a feedback marker"
                )));
            }
        }
        if let Some(operator) = operators.iter().find(|op| !alphabet.contains(op)) {
            return Err(WordleError::Configuration(format!(
                "operator {operator:?} is not in the alphabet"
            )));
        }
        Ok(GameVariant {
            alphabet,
            answer_length,
            operators,
        })
    }

    /// The classic five letter game over `a-z`.
    pub fn wordle() -> GameVariant {
        GameVariant {
            alphabet: ('a'..='z').collect(),
            answer_length: 5,
            operators: Vec::new(),
        }
    }

    /// The eight character arithmetic game over `0-9+-*/=`.
    pub fn nerdle() -> GameVariant {
        GameVariant {
            alphabet: ('0'..='9').chain("+-*/=".chars()).collect(),
            answer_length: 8,
            operators: "+-*/".chars().collect(),
        }
    }

    pub fn alphabet(&self) -> &[char] {
        &self.alphabet
    }

    pub fn answer_length(&self) -> usize {
        self.answer_length
    }

    pub fn operators(&self) -> &[char] {
        &self.operators
    }

    /// Returns `true` iff the character is part of this variant's alphabet.
    pub fn contains(&self, character: char) -> bool {
        self.alphabet.contains(&character)
    }

    /// Checks that the word has the right length and only uses characters from the alphabet.
    pub fn check_word(&self, word: &str) -> Result<(), WordleError> {
        if word.chars().count() != self.answer_length {
            return Err(WordleError::WordLength(self.answer_length));
        }
        if let Some(character) = word.chars().find(|c| !self.contains(*c)) {
            return Err(WordleError::UnsupportedCharacter {
                word: word.to_string(),
                character,
            });
        }
        Ok(())
    }
}
