use thiserror::Error;

/// Identifies which merge rule a new [`GuessResult`](crate::GuessResult) broke when it was added
/// to a [`Knowledge`](crate::Knowledge).
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Contradiction {
    /// A different character is already known to be at this index.
    Position {
        index: usize,
        known: char,
        proposed: char,
    },
    /// The result requires more copies of a character than its known maximum allows.
    MinAboveMax { character: char, min: usize, max: usize },
    /// The result caps a character below the number of copies already known to be required.
    MaxBelowMin { character: char, max: usize, min: usize },
    /// The maximum for this character is already fixed to a different value.
    MaxChanged {
        character: char,
        known: usize,
        proposed: usize,
    },
}

impl std::fmt::Display for Contradiction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Contradiction::Position {
                index,
                known,
                proposed,
            } => write!(
                f,
                "index {index} is known to be {known:?}, but the result says {proposed:?}"
            ),
            Contradiction::MinAboveMax {
                character,
                min,
                max,
            } => write!(
                f,
                "{character:?} must appear at least {min} times, but at most {max} are allowed"
            ),
            Contradiction::MaxBelowMin {
                character,
                max,
                min,
            } => write!(
                f,
                "{character:?} may appear at most {max} times, but at least {min} are required"
            ),
            Contradiction::MaxChanged {
                character,
                known,
                proposed,
            } => write!(
                f,
                "{character:?} is known to appear at most {known} times, but the result says {proposed}"
            ),
        }
    }
}

/// Indicates that an error occurred while decoding, merging, or searching.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum WordleError {
    /// The feedback text could not be decoded. Reports the offending index and character.
    #[error("unexpected {character:?} at index {index} of the feedback text")]
    Decode { index: usize, character: char },
    /// The given results are impossible, because they contradict what is already known.
    #[error("the results contradict each other: {0}")]
    ConstraintViolation(Contradiction),
    /// The variant or generator parameters are invalid.
    #[error("invalid configuration: {0}")]
    Configuration(String),
    /// A word, guess, or result had the wrong length. Contains the expected length.
    #[error("words must have length {0}")]
    WordLength(usize),
    /// A word in a candidate universe uses a character outside the variant's alphabet.
    #[error("{word:?} contains {character:?}, which is not in the alphabet")]
    UnsupportedCharacter { word: String, character: char },
}

impl From<Contradiction> for WordleError {
    fn from(contradiction: Contradiction) -> Self {
        WordleError::ConstraintViolation(contradiction)
    }
}
