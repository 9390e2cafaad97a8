use crate::data::valid_solutions;
use crate::error::WordleError;
use crate::evaluator::{rank_guesses_with_pool, SearchObserver, SearchOptions};
use crate::knowledge::Knowledge;
use crate::pool::{CancelToken, WorkerPool};
use crate::results::{get_result, GuessResult};
use log::debug;
use std::sync::Arc;

/// Whether the solver should play to win, or play the least helpful guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GuessStrategy {
    /// Play the guess with the largest expected reduction.
    #[default]
    Best,
    /// Play the guess with the smallest expected reduction.
    Worst,
}

/// Options for a [`ReductionGuesser`].
#[derive(Clone, Default)]
pub struct GuesserOptions<'a> {
    /// Only play guesses that could still be the answer.
    pub hard_mode: bool,
    /// How many worker threads to use, or one per CPU if `None`.
    pub threads: Option<usize>,
    pub strategy: GuessStrategy,
    pub cancel: CancelToken,
    pub observer: Option<&'a dyn SearchObserver>,
}

/// Guesses the word that is expected to shrink the set of valid solutions the most.
///
/// ```
/// use rs_wordle_knowledge::{GuesserOptions, ReductionGuesser, WordBank};
///
/// let answers = WordBank::from_iterator(["abcde", "abcdf", "abcdg"]).unwrap();
/// let guesses = WordBank::from_iterator(["abcde", "fgxxx", "fxxxx"]).unwrap();
/// let guesser = ReductionGuesser::new(&answers, &guesses, GuesserOptions::default()).unwrap();
///
/// assert_eq!(guesser.select_next_guess().unwrap().as_deref(), Some("fgxxx"));
/// ```
pub struct ReductionGuesser<'a> {
    universe: &'a [Arc<str>],
    allowed_guesses: &'a [Arc<str>],
    knowledge: Knowledge,
    pretend_answers: Option<Vec<Arc<str>>>,
    options: GuesserOptions<'a>,
    pool: WorkerPool,
}

impl<'a> ReductionGuesser<'a> {
    /// Constructs a guesser that considers `universe` as the possible answers, and may play any
    /// of `allowed_guesses`. The answer length is taken from the universe.
    pub fn new(
        universe: &'a [Arc<str>],
        allowed_guesses: &'a [Arc<str>],
        options: GuesserOptions<'a>,
    ) -> Result<ReductionGuesser<'a>, WordleError> {
        let answer_length = universe
            .first()
            .map(|word| word.chars().count())
            .unwrap_or(0);
        Ok(ReductionGuesser {
            universe,
            allowed_guesses,
            knowledge: Knowledge::new(answer_length),
            pretend_answers: None,
            pool: WorkerPool::new(options.threads)?,
            options,
        })
    }

    /// Scores guesses against only these answers, instead of every valid solution.
    pub fn with_pretend_answers(mut self, pretend_answers: Vec<Arc<str>>) -> Self {
        self.pretend_answers = Some(pretend_answers);
        self
    }

    pub fn knowledge(&self) -> &Knowledge {
        &self.knowledge
    }

    /// Merges the result of the latest guess.
    pub fn update(&mut self, result: &GuessResult) -> Result<(), WordleError> {
        self.knowledge.add_result(result)
    }

    /// Returns the words that could still be the answer.
    pub fn possible_words(&self) -> Vec<Arc<str>> {
        valid_solutions(&self.knowledge, self.universe)
    }

    /// Selects the next guess, or `None` if no word can be the answer.
    pub fn select_next_guess(&self) -> Result<Option<Arc<str>>, WordleError> {
        let possible_words = self.possible_words();
        if possible_words.len() <= 1 {
            return Ok(possible_words.into_iter().next());
        }
        let ranking = rank_guesses_with_pool(
            &self.pool,
            &self.knowledge,
            self.universe,
            self.allowed_guesses,
            &SearchOptions {
                hard_mode: self.options.hard_mode,
                threads: None,
                order: Default::default(),
                pretend_answers: self.pretend_answers.as_deref(),
                cancel: self.options.cancel.clone(),
                observer: self.options.observer,
            },
        )?;
        let choice = match self.options.strategy {
            GuessStrategy::Best => ranking.best(),
            GuessStrategy::Worst => ranking.worst(),
        };
        Ok(choice
            .map(|scored| Arc::clone(&scored.guess))
            .or_else(|| possible_words.into_iter().next()))
    }
}

/// Whether the game was won or lost by the guesser.
#[derive(Debug, Eq, PartialEq)]
pub enum GameResult {
    /// Indicates that the guesser won the game, and provides the guesses that were given.
    Success(Vec<Box<str>>),
    /// Indicates that the guesser failed to guess the word, and provides the guesses that were given.
    Failure(Vec<Box<str>>),
    /// Indicates that the given word was not in the word bank.
    UnknownWord,
}

/// Attempts to guess the given word within the maximum number of guesses.
///
/// The first guesses are taken from `opening_guesses`, then the guesser takes over. With
/// [`GuessStrategy::Worst`], guesses are scored against the real answer only, so the guesser
/// plays whichever guess helps least.
pub fn play_game(
    answer: &str,
    max_num_guesses: u32,
    universe: &[Arc<str>],
    allowed_guesses: &[Arc<str>],
    opening_guesses: &[&str],
    options: GuesserOptions,
) -> Result<GameResult, WordleError> {
    if !universe.iter().any(|word| &**word == answer) {
        return Ok(GameResult::UnknownWord);
    }
    let strategy = options.strategy;
    let mut guesser = ReductionGuesser::new(universe, allowed_guesses, options)?;
    if strategy == GuessStrategy::Worst {
        guesser = guesser.with_pretend_answers(vec![Arc::from(answer)]);
    }

    let mut guesses: Vec<Box<str>> = Vec::new();
    for round in 0..max_num_guesses as usize {
        let guess: Arc<str> = match opening_guesses.get(round) {
            Some(opening) => Arc::from(*opening),
            None => match guesser.select_next_guess()? {
                Some(guess) => guess,
                None => return Ok(GameResult::UnknownWord),
            },
        };
        guesses.push(Box::from(&*guess));
        let result = get_result(answer, &guess)?;
        debug!("Round {}: {}", round + 1, result);
        if result.is_solved() {
            return Ok(GameResult::Success(guesses));
        }
        guesser.update(&result)?;
    }
    Ok(GameResult::Failure(guesses))
}
