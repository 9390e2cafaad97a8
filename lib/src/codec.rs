//! Compact text notation for [`GuessResult`]s.
//!
//! Each position is written as its character, optionally followed by a marker:
//!
//! * no marker: the character is not in the answer ([`TileFeedback::Wrong`])
//! * `?`: the character is in the answer, but elsewhere ([`TileFeedback::WrongPlace`])
//! * `@`: the character is in the answer at this position ([`TileFeedback::Correct`])
//!
//! For example, guessing `trout` when the answer is `point` is written `tro?ut@`.

use crate::error::WordleError;
use crate::results::{GuessResult, ResultPiece, TileFeedback};
use crate::variant::{GameVariant, CORRECT_MARKER, WRONG_PLACE_MARKER};
use std::fmt;

/// Decodes a result written in the text notation, using the given variant's alphabet.
///
/// Fails with [`WordleError::Decode`] on a marker that doesn't follow an unmarked character, or
/// on any character outside the alphabet. The reported index is the index into `text`, counted
/// in characters.
///
/// ```
/// use rs_wordle_knowledge::{decode, encode, GameVariant};
///
/// let result = decode(&GameVariant::wordle(), "b?lob?s").unwrap();
/// assert_eq!(encode(&result), "b?lob?s");
/// ```
pub fn decode(variant: &GameVariant, text: &str) -> Result<GuessResult, WordleError> {
    let mut pieces: Vec<ResultPiece> = Vec::with_capacity(variant.answer_length());
    // Whether the most recent piece may still take a marker.
    let mut last_is_open = false;
    for (index, character) in text.chars().enumerate() {
        if variant.contains(character) {
            pieces.push(ResultPiece::new(character, TileFeedback::Wrong));
            last_is_open = true;
            continue;
        }
        let feedback = match character {
            WRONG_PLACE_MARKER => TileFeedback::WrongPlace,
            CORRECT_MARKER => TileFeedback::Correct,
            _ => return Err(WordleError::Decode { index, character }),
        };
        match pieces.last_mut() {
            Some(piece) if last_is_open => {
                piece.feedback = feedback;
                last_is_open = false;
            }
            _ => return Err(WordleError::Decode { index, character }),
        }
    }
    Ok(GuessResult::new(pieces))
}

/// Encodes a result in the text notation. This is the inverse of [`decode`].
pub fn encode(result: &GuessResult) -> String {
    result.to_string()
}

/// Decodes and checks that the result has exactly the variant's answer length.
pub fn decode_exact(variant: &GameVariant, text: &str) -> Result<GuessResult, WordleError> {
    let result = decode(variant, text)?;
    if result.len() != variant.answer_length() {
        return Err(WordleError::WordLength(variant.answer_length()));
    }
    Ok(result)
}

impl fmt::Display for GuessResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for piece in self.pieces() {
            write!(f, "{}", piece.character)?;
            match piece.feedback {
                TileFeedback::Wrong => {}
                TileFeedback::WrongPlace => write!(f, "{WRONG_PLACE_MARKER}")?,
                TileFeedback::Correct => write!(f, "{CORRECT_MARKER}")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn decode_all_feedback_kinds() -> Result<(), WordleError> {
        let result = decode(&GameVariant::wordle(), "tro?ut@")?;

        assert_eq!(
            result.pieces(),
            &[
                ResultPiece::new('t', TileFeedback::Wrong),
                ResultPiece::new('r', TileFeedback::Wrong),
                ResultPiece::new('o', TileFeedback::WrongPlace),
                ResultPiece::new('u', TileFeedback::Wrong),
                ResultPiece::new('t', TileFeedback::Correct),
            ]
        );
        Ok(())
    }

    #[test]
    fn decode_equation() -> Result<(), WordleError> {
        let result = decode(&GameVariant::nerdle(), "8?7-?6?4=@2@3")?;

        assert_eq!(result.len(), 8);
        assert_eq!(result.guess(), "87-64=23");
        assert_eq!(result.correct_positions(), &[(5, '='), (6, '2')]);
        Ok(())
    }

    #[test]
    fn decode_leading_marker_fails() {
        assert_eq!(
            decode(&GameVariant::wordle(), "?abcde"),
            Err(WordleError::Decode {
                index: 0,
                character: '?'
            })
        );
    }

    #[test]
    fn decode_double_marker_fails() {
        assert_eq!(
            decode(&GameVariant::wordle(), "ab?@cde"),
            Err(WordleError::Decode {
                index: 3,
                character: '@'
            })
        );
        assert_matches!(
            decode(&GameVariant::wordle(), "ab??cde"),
            Err(WordleError::Decode { index: 3, .. })
        );
    }

    #[test]
    fn decode_outside_alphabet_fails() {
        assert_eq!(
            decode(&GameVariant::wordle(), "ab1de"),
            Err(WordleError::Decode {
                index: 2,
                character: '1'
            })
        );
        assert_eq!(
            decode(&GameVariant::nerdle(), "12+a5=17"),
            Err(WordleError::Decode {
                index: 3,
                character: 'a'
            })
        );
    }

    #[test]
    fn decode_exact_checks_length() {
        assert_eq!(
            decode_exact(&GameVariant::wordle(), "ab?c"),
            Err(WordleError::WordLength(5))
        );
        assert!(decode_exact(&GameVariant::wordle(), "ab?cd@e").is_ok());
    }
}
