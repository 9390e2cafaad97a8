use crate::data::{count_valid_solutions, valid_solutions};
use crate::error::WordleError;
use crate::knowledge::Knowledge;
use crate::pool::{CancelToken, WorkerPool};
use crate::results::get_result;
use log::{debug, trace};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;

/// Computes how many candidates the given guess is expected to eliminate.
///
/// Each of the `pretend_answers` is assumed in turn to be the real answer. The guess's feedback
/// against it is merged into a copy of `knowledge`, and the number of words in `universe` that
/// remain valid is counted. The result is the number of pretend answers minus the average of
/// those counts, or 0 if there are no pretend answers.
///
/// If `pretend_answers` is `None`, every word in `universe` that is still a valid solution is
/// used, each considered equally likely.
///
/// ```
/// use rs_wordle_knowledge::{guess_reduction, Knowledge, WordBank};
///
/// let universe = WordBank::from_iterator(["abcde", "abcdf", "fghij"]).unwrap();
/// let knowledge = Knowledge::new(5);
///
/// // "fghij" fully separates all three words, leaving one candidate each time.
/// let reduction = guess_reduction(&knowledge, &universe, "fghij", None).unwrap();
/// assert_eq!(reduction, 2.0);
/// ```
pub fn guess_reduction(
    knowledge: &Knowledge,
    universe: &[Arc<str>],
    guess: &str,
    pretend_answers: Option<&[Arc<str>]>,
) -> Result<f64, WordleError> {
    let current_solutions;
    let pretend_answers = match pretend_answers {
        Some(answers) => answers,
        None => {
            current_solutions = valid_solutions(knowledge, universe);
            &current_solutions
        }
    };
    if pretend_answers.is_empty() {
        return Ok(0.0);
    }

    let mut total_remaining = 0;
    for pretend_answer in pretend_answers {
        let mut hypothetical = knowledge.clone();
        hypothetical.add_result(&get_result(pretend_answer, guess)?)?;
        total_remaining += count_valid_solutions(&hypothetical, universe);
    }
    let num_answers = pretend_answers.len() as f64;
    Ok(num_answers - total_remaining as f64 / num_answers)
}

/// The order in which a [`Ranking`] lists its guesses. Ties are always listed in lexical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RankOrder {
    /// Smallest reduction first, so the best guess is last.
    Ascending,
    /// Largest reduction first, so the best guess is first.
    #[default]
    Descending,
}

/// Receives progress updates from a search. Called from worker threads.
pub trait SearchObserver: Sync {
    /// Called once, before any guess is scored.
    fn on_search_started(&self, _num_guesses: usize) {}

    /// Called as soon as each guess has been scored, in completion order.
    fn on_guess_scored(&self, guess: &str, reduction: f64);
}

/// Configures [`rank_guesses`].
#[derive(Clone, Default)]
pub struct SearchOptions<'a> {
    /// Only consider guesses that could still be the answer.
    pub hard_mode: bool,
    /// How many worker threads to use, or one per CPU if `None`.
    pub threads: Option<usize>,
    pub order: RankOrder,
    /// Overrides the answers assumed during scoring. Defaults to the current valid solutions.
    pub pretend_answers: Option<&'a [Arc<str>]>,
    pub cancel: CancelToken,
    pub observer: Option<&'a dyn SearchObserver>,
}

/// A guess along with its expected reduction.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredGuess {
    pub guess: Arc<str>,
    pub reduction: f64,
    /// The number of valid solutions before this guess is played.
    pub num_candidates: usize,
}

impl ScoredGuess {
    /// The expected number of valid solutions left after this guess is played.
    pub fn expected_remaining(&self) -> f64 {
        self.num_candidates as f64 - self.reduction
    }
}

/// The outcome of [`rank_guesses`].
#[derive(Debug, Clone, PartialEq)]
pub struct Ranking {
    /// Every scored guess, in the requested order.
    pub scored: Vec<ScoredGuess>,
    /// The number of valid solutions before any guess is played.
    pub num_candidates: usize,
    /// Whether the search was cancelled before every guess was scored.
    pub cancelled: bool,
}

impl Ranking {
    /// The guess with the largest reduction, breaking ties lexically.
    pub fn best(&self) -> Option<&ScoredGuess> {
        self.scored.iter().max_by(|a, b| {
            a.reduction
                .total_cmp(&b.reduction)
                .then_with(|| b.guess.cmp(&a.guess))
        })
    }

    /// The guess with the smallest reduction, breaking ties lexically.
    pub fn worst(&self) -> Option<&ScoredGuess> {
        self.scored.iter().min_by(|a, b| {
            a.reduction
                .total_cmp(&b.reduction)
                .then_with(|| a.guess.cmp(&b.guess))
        })
    }
}

/// Scores every guess with [`guess_reduction`] in parallel and ranks them.
///
/// The ranking depends only on the inputs, never on which worker finishes first.
pub fn rank_guesses(
    knowledge: &Knowledge,
    universe: &[Arc<str>],
    guesses: &[Arc<str>],
    options: &SearchOptions,
) -> Result<Ranking, WordleError> {
    let pool = WorkerPool::new(options.threads)?;
    rank_guesses_with_pool(&pool, knowledge, universe, guesses, options)
}

/// Like [`rank_guesses`], but runs on an existing pool. `options.threads` is ignored.
pub fn rank_guesses_with_pool(
    pool: &WorkerPool,
    knowledge: &Knowledge,
    universe: &[Arc<str>],
    guesses: &[Arc<str>],
    options: &SearchOptions,
) -> Result<Ranking, WordleError> {
    let candidates = valid_solutions(knowledge, universe);
    let pretend_answers = options.pretend_answers.unwrap_or(&candidates[..]);

    let mut seen: HashSet<&str> = HashSet::new();
    let mut unique_guesses: Vec<Arc<str>> = Vec::with_capacity(guesses.len());
    for guess in guesses {
        if !seen.insert(guess.as_ref()) {
            continue;
        }
        if options.hard_mode && !knowledge.is_valid_solution(guess) {
            continue;
        }
        unique_guesses.push(Arc::clone(guess));
    }
    let guesses = unique_guesses;
    debug!(
        "Scoring {} guesses against {} pretend answers ({} candidates) on {} threads",
        guesses.len(),
        pretend_answers.len(),
        candidates.len(),
        pool.num_threads()
    );
    if let Some(observer) = options.observer {
        observer.on_search_started(guesses.len());
    }

    let outcomes = pool.run(&guesses, &options.cancel, |guess| {
        let reduction = guess_reduction(knowledge, universe, guess, Some(pretend_answers))?;
        trace!("{} reduces by {}", guess, reduction);
        if let Some(observer) = options.observer {
            observer.on_guess_scored(guess, reduction);
        }
        Ok::<f64, WordleError>(reduction)
    });

    let mut cancelled = false;
    let mut scored = Vec::with_capacity(guesses.len());
    for (guess, outcome) in guesses.into_iter().zip(outcomes) {
        match outcome {
            Some(reduction) => scored.push(ScoredGuess {
                guess,
                reduction: reduction?,
                num_candidates: candidates.len(),
            }),
            None => cancelled = true,
        }
    }
    if cancelled {
        debug!("Search cancelled after scoring {} guesses", scored.len());
    }

    scored.sort_by(|a, b| compare_scored(a, b, options.order));
    Ok(Ranking {
        scored,
        num_candidates: candidates.len(),
        cancelled,
    })
}

fn compare_scored(a: &ScoredGuess, b: &ScoredGuess, order: RankOrder) -> Ordering {
    let by_reduction = match order {
        RankOrder::Ascending => a.reduction.total_cmp(&b.reduction),
        RankOrder::Descending => b.reduction.total_cmp(&a.reduction),
    };
    by_reduction.then_with(|| a.guess.cmp(&b.guess))
}
