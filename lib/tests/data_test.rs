#[macro_use]
extern crate assert_matches;

use rs_wordle_knowledge::*;

use std::io::Cursor;
use std::result::Result;
use std::sync::Arc;

macro_rules! assert_arc_eq {
    ($arc_vec:expr, $non_arc_vec:expr) => {
        assert_eq!(
            $arc_vec as &[Arc<str>],
            $non_arc_vec
                .iter()
                .map(|thing| Arc::from(*thing))
                .collect::<Vec<Arc<_>>>()
        );
    };
}

#[test]
fn word_bank_from_reader_succeeds() -> Result<(), WordleError> {
    let mut cursor = Cursor::new(String::from("\n\npoint\n Title\n"));

    let word_bank = WordBank::from_reader(&mut cursor)?;

    assert_eq!(word_bank.len(), 2);
    assert_arc_eq!(&word_bank, &["point", "title"]);
    assert_eq!(word_bank.word_length(), 5);
    Ok(())
}

#[test]
fn word_bank_from_iterator_succeeds() -> Result<(), WordleError> {
    let word_bank = WordBank::from_iterator(vec![
        "".to_string(),
        "12+35=47".to_string(),
        "9*8-2=70 ".to_string(),
    ])?;

    assert_arc_eq!(&word_bank, &["12+35=47", "9*8-2=70"]);
    assert_eq!(word_bank.word_length(), 8);
    word_bank.check_variant(&GameVariant::nerdle())?;
    Ok(())
}

#[test]
fn word_bank_from_iterator_mixed_lengths_fails() {
    assert_matches!(
        WordBank::from_iterator(["point", "pints", "pin"]),
        Err(WordleError::WordLength(5))
    );
}

#[test]
fn word_bank_rejects_out_of_alphabet_words() -> Result<(), WordleError> {
    let word_bank = WordBank::from_iterator(["point", "p0int"])?;

    assert_matches!(
        word_bank.check_variant(&GameVariant::wordle()),
        Err(WordleError::UnsupportedCharacter { character: '0', .. })
    );
    Ok(())
}

#[test]
fn empty_word_bank() -> Result<(), WordleError> {
    let word_bank = WordBank::from_iterator(Vec::<&str>::new())?;

    assert!(word_bank.is_empty());
    assert_eq!(word_bank.word_length(), 0);
    assert_eq!(valid_solutions(&Knowledge::new(5), &word_bank), Vec::<Arc<str>>::new());
    Ok(())
}

#[test]
fn valid_solutions_after_results() -> Result<(), WordleError> {
    let word_bank = WordBank::from_iterator(["point", "joint", "title", "trout", "paint"])?;
    let knowledge = Knowledge::from_result_strs(&GameVariant::wordle(), &["t?i?tle"])?;

    assert_arc_eq!(
        &valid_solutions(&knowledge, &word_bank),
        &["point", "joint", "paint"]
    );
    assert_arc_eq!(
        &sorted_valid_solutions(&knowledge, &word_bank),
        &["joint", "paint", "point"]
    );
    assert_eq!(count_valid_solutions(&knowledge, &word_bank), 3);
    Ok(())
}
