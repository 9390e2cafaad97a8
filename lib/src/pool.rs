use crate::error::WordleError;
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A shared flag used to stop a long search early.
///
/// Cancellation is cooperative: work that has already started runs to completion, and only
/// work that hasn't started yet is skipped.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> CancelToken {
        CancelToken::default()
    }

    /// Requests that any search using this token stops starting new work.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// A bounded pool of worker threads that runs one independent task per item.
#[derive(Debug)]
pub struct WorkerPool {
    pool: rayon::ThreadPool,
}

impl WorkerPool {
    /// Creates a pool with the given number of threads, or one per CPU if `None`.
    pub fn new(num_threads: Option<usize>) -> Result<WorkerPool, WordleError> {
        let mut builder = rayon::ThreadPoolBuilder::new();
        if let Some(num_threads) = num_threads {
            if num_threads == 0 {
                return Err(WordleError::Configuration(
                    "the worker pool needs at least one thread".to_string(),
                ));
            }
            builder = builder.num_threads(num_threads);
        }
        let pool = builder
            .build()
            .map_err(|err| WordleError::Configuration(format!("unable to start workers: {err}")))?;
        Ok(WorkerPool { pool })
    }

    pub fn num_threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Runs `task` once per item and returns the outputs in the same order as `items`.
    ///
    /// The token is checked before each task starts. Items whose task was never started because
    /// of cancellation are `None`.
    pub fn run<T, R, F>(&self, items: &[T], cancel: &CancelToken, task: F) -> Vec<Option<R>>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> R + Sync,
    {
        self.pool.install(|| {
            items
                .par_iter()
                .map(|item| {
                    if cancel.is_cancelled() {
                        return None;
                    }
                    Some(task(item))
                })
                .collect()
        })
    }
}
