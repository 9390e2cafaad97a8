#[macro_use]
extern crate assert_matches;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rs_wordle_knowledge::*;
use std::sync::Arc;

const WORDS: [&str; 20] = [
    "point", "joint", "paint", "title", "trout", "abbey", "blobs", "bobby", "lurbs", "eerie",
    "geese", "sassy", "mesas", "llama", "crane", "toast", "array", "queue", "taint", "saint",
];

fn word_bank() -> WordBank {
    WordBank::from_iterator(WORDS).unwrap()
}

#[test]
fn valid_solutions_never_grow() -> Result<(), WordleError> {
    let bank = word_bank();
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..20 {
        let answer = bank.choose(&mut rng).unwrap();
        let mut knowledge = Knowledge::for_variant(&GameVariant::wordle());
        let mut num_valid = count_valid_solutions(&knowledge, &bank);
        for _ in 0..6 {
            let guess = bank.choose(&mut rng).unwrap();
            knowledge.add_result(&get_result(answer, guess)?)?;

            let now_valid = count_valid_solutions(&knowledge, &bank);
            assert!(now_valid <= num_valid);
            assert!(knowledge.is_valid_solution(answer));
            num_valid = now_valid;
        }
    }
    Ok(())
}

#[test]
fn adding_result_twice_changes_nothing() -> Result<(), WordleError> {
    for guess in ["title", "trout", "paint", "llama"] {
        let result = get_result("point", guess)?;
        let mut once = Knowledge::new(5);
        once.add_result(&result)?;
        let mut twice = once.clone();
        twice.add_result(&result)?;

        assert_eq!(once, twice);
    }
    Ok(())
}

#[test]
fn knowledge_from_result_strs() -> Result<(), WordleError> {
    let wordle = GameVariant::wordle();
    let knowledge = Knowledge::from_result_strs(&wordle, &["t?i?tle", "tro?ut@"])?;

    assert_eq!(
        valid_solutions(&knowledge, &word_bank()),
        vec![Arc::<str>::from("point"), Arc::from("joint")]
    );
    assert_eq!(
        knowledge,
        Knowledge::from_results(
            &wordle,
            &[get_result("point", "title")?, get_result("point", "trout")?]
        )?
    );
    Ok(())
}

#[test]
fn different_characters_at_same_position_fail() -> Result<(), WordleError> {
    let wordle = GameVariant::wordle();
    let mut knowledge = Knowledge::from_result_strs(&wordle, &["p@xxxx"])?;

    assert_matches!(
        knowledge.add_result(&decode(&wordle, "j@xxxx")?),
        Err(WordleError::ConstraintViolation(Contradiction::Position {
            index: 0,
            known: 'p',
            proposed: 'j',
        }))
    );
    Ok(())
}

#[test]
fn count_contradictions_fail() -> Result<(), WordleError> {
    let wordle = GameVariant::wordle();
    // At most one 'a'.
    let mut knowledge = Knowledge::from_result_strs(&wordle, &["a?axxx"])?;

    assert_matches!(
        knowledge.add_result(&decode(&wordle, "a?a?xxx")?),
        Err(WordleError::ConstraintViolation(Contradiction::MinAboveMax {
            character: 'a',
            min: 2,
            max: 1,
        }))
    );

    // At least two 'b's.
    let mut knowledge = Knowledge::from_result_strs(&wordle, &["b?b?xxx"])?;
    assert_matches!(
        knowledge.add_result(&decode(&wordle, "b?bxxx")?),
        Err(WordleError::ConstraintViolation(
            Contradiction::MaxBelowMin { character: 'b', .. }
        ))
    );
    Ok(())
}
