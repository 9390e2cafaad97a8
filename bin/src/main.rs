use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use rand::seq::SliceRandom;
use rs_wordle_knowledge::equations::EquationUniverse;
use rs_wordle_knowledge::*;
use std::fs::File;
use std::io;
use std::ops::Deref;
use std::sync::Arc;
use std::time::Instant;

/// Reasons about the feedback of Wordle-style games: computes results, filters candidates, and
/// ranks guesses by how many candidates they are expected to eliminate.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Which game to play.
    #[clap(long, value_enum, default_value_t = Variant::Wordle)]
    variant: Variant,

    /// Path to a file that contains a list of possible answers, with one on each line. Required
    /// for the word game; equations are generated when this is omitted.
    #[clap(short = 'f', long)]
    words_file: Option<String>,

    /// Path to a file of extra words that may be guessed but are never the answer.
    #[clap(long)]
    guesses_file: Option<String>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Variant {
    Wordle,
    Nerdle,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the result of GUESS when the answer is ANSWER.
    GetResult { answer: String, guess: String },
    /// Show the answers that are still possible given the results so far.
    ValidSolutions {
        /// Results in the text notation, e.g. "t?i?tle".
        results: Vec<String>,
    },
    /// Rank guesses by how much they are expected to reduce the possible answers.
    BestGuess {
        /// Results in the text notation, e.g. "t?i?tle".
        results: Vec<String>,
        /// Only consider guesses that could still be the answer.
        #[clap(long)]
        hard_mode: bool,
        /// Only score these guesses.
        #[clap(short = 'g', long = "guess")]
        guesses: Vec<String>,
        /// Number of worker threads. Defaults to one per CPU.
        #[clap(long)]
        threads: Option<usize>,
        /// List the least helpful guesses first.
        #[clap(long)]
        worst: bool,
        /// Only print this many guesses.
        #[clap(long)]
        top: Option<usize>,
    },
    /// Let the solver play against ANSWER, optionally starting from the given guesses. Use
    /// "random" to pick an answer at random.
    Bot {
        answer: String,
        initial_guesses: Vec<String>,
        #[clap(long)]
        hard_mode: bool,
        /// Play the least helpful guess each round.
        #[clap(long)]
        worst: bool,
        #[clap(long)]
        threads: Option<usize>,
        #[clap(long, default_value_t = 20)]
        max_guesses: u32,
    },
    /// List every equation of the given length.
    Equations {
        #[clap(long, default_value_t = 8)]
        length: usize,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let start_time = Instant::now();
    let args = Args::parse();
    let variant = match args.variant {
        Variant::Wordle => GameVariant::wordle(),
        Variant::Nerdle => GameVariant::nerdle(),
    };

    match &args.command {
        Command::GetResult { answer, guess } => {
            variant.check_word(answer).context("invalid answer")?;
            variant.check_word(guess).context("invalid guess")?;
            println!("{}", get_result(answer, guess)?);
        }
        Command::Equations { length } => {
            let universe = EquationUniverse::new(*length)?;
            for equation in universe.get().iter() {
                println!("{}", equation);
            }
            info!("Generated {} equations", universe.get().len());
        }
        Command::ValidSolutions { results } => {
            let universe = load_universe(&args, &variant)?;
            let knowledge = parse_results(&variant, results)?;
            for word in sorted_valid_solutions(&knowledge, &universe) {
                println!("{}", word);
            }
        }
        Command::BestGuess {
            results,
            hard_mode,
            guesses,
            threads,
            worst,
            top,
        } => {
            let universe = load_universe(&args, &variant)?;
            let knowledge = parse_results(&variant, results)?;
            let allowed_guesses = if guesses.is_empty() {
                load_allowed_guesses(&args, &variant, &universe)?
            } else {
                guesses
                    .iter()
                    .map(|guess| {
                        variant.check_word(guess)?;
                        Ok(Arc::from(guess.as_str()))
                    })
                    .collect::<Result<Vec<Arc<str>>, WordleError>>()?
            };
            let progress = ProgressObserver::new();
            let ranking = rank_guesses(
                &knowledge,
                &universe,
                &allowed_guesses,
                &SearchOptions {
                    hard_mode: *hard_mode,
                    threads: *threads,
                    order: if *worst {
                        RankOrder::Ascending
                    } else {
                        RankOrder::Descending
                    },
                    observer: Some(&progress),
                    ..Default::default()
                },
            )?;
            progress.finish();
            println!("{} valid solutions", ranking.num_candidates);
            let limit = top.unwrap_or(ranking.scored.len());
            for scored in ranking.scored.iter().take(limit) {
                println!(
                    "{} reduces average of {:.3} down to average of {:.3}",
                    scored.guess,
                    scored.reduction,
                    scored.expected_remaining()
                );
            }
        }
        Command::Bot {
            answer,
            initial_guesses,
            hard_mode,
            worst,
            threads,
            max_guesses,
        } => {
            let universe = load_universe(&args, &variant)?;
            let allowed_guesses = load_allowed_guesses(&args, &variant, &universe)?;
            let answer: Arc<str> = if answer == "random" {
                universe
                    .choose(&mut rand::thread_rng())
                    .map(Arc::clone)
                    .context("there are no possible answers")?
            } else {
                Arc::from(answer.as_str())
            };
            for guess in initial_guesses {
                variant.check_word(guess).context("invalid initial guess")?;
            }
            let opening_guesses: Vec<&str> = initial_guesses.iter().map(String::as_str).collect();
            let progress = ProgressObserver::new();
            let result = play_game(
                &answer,
                *max_guesses,
                &universe,
                &allowed_guesses,
                &opening_guesses,
                GuesserOptions {
                    hard_mode: *hard_mode,
                    threads: *threads,
                    strategy: if *worst {
                        GuessStrategy::Worst
                    } else {
                        GuessStrategy::Best
                    },
                    observer: Some(&progress),
                    ..Default::default()
                },
            )?;
            progress.finish();
            print_game(&answer, result)?;
        }
    }

    info!(
        "Command executed in {:.3}s.",
        start_time.elapsed().as_secs_f64()
    );
    Ok(())
}

/// Either a word list read from disk, or equations generated on demand.
enum Universe {
    Words(WordBank),
    Equations(EquationUniverse),
}

impl Deref for Universe {
    type Target = [Arc<str>];

    fn deref(&self) -> &Self::Target {
        match self {
            Universe::Words(bank) => &bank[..],
            Universe::Equations(equations) => &equations.get()[..],
        }
    }
}

fn load_universe(args: &Args, variant: &GameVariant) -> anyhow::Result<Universe> {
    let universe = match &args.words_file {
        Some(path) => Universe::Words(read_word_bank(path, variant)?),
        None => match args.variant {
            Variant::Nerdle => Universe::Equations(EquationUniverse::for_variant(variant)?),
            Variant::Wordle => bail!("--words-file is required for the word game"),
        },
    };
    info!("There are {} possible answers.", universe.len());
    Ok(universe)
}

fn load_allowed_guesses(
    args: &Args,
    variant: &GameVariant,
    universe: &Universe,
) -> anyhow::Result<Vec<Arc<str>>> {
    let mut allowed_guesses: Vec<Arc<str>> = universe.to_vec();
    if let Some(path) = &args.guesses_file {
        allowed_guesses.extend(read_word_bank(path, variant)?.iter().cloned());
    }
    Ok(allowed_guesses)
}

fn read_word_bank(path: &str, variant: &GameVariant) -> anyhow::Result<WordBank> {
    let file = File::open(path).with_context(|| format!("unable to open {path}"))?;
    let bank = WordBank::from_reader(io::BufReader::new(file))
        .with_context(|| format!("unable to read words from {path}"))?;
    bank.check_variant(variant)
        .with_context(|| format!("{path} doesn't match the chosen variant"))?;
    Ok(bank)
}

fn parse_results(variant: &GameVariant, results: &[String]) -> anyhow::Result<Knowledge> {
    let mut knowledge = Knowledge::for_variant(variant);
    for text in results {
        let result =
            decode_exact(variant, text).with_context(|| format!("invalid result {text}"))?;
        knowledge
            .add_result(&result)
            .with_context(|| format!("{text} contradicts the earlier results"))?;
    }
    Ok(knowledge)
}

fn print_game(answer: &str, result: GameResult) -> anyhow::Result<()> {
    match result {
        GameResult::Success(guesses) => {
            println!("Solved it! It took me {} guesses.", guesses.len());
            for guess in guesses.iter() {
                println!("\t{}", get_result(answer, guess)?);
            }
        }
        GameResult::Failure(guesses) => {
            println!(
                "I still couldn't solve it after {} guesses :(",
                guesses.len()
            );
            for guess in guesses.iter() {
                println!("\t{}", get_result(answer, guess)?);
            }
        }
        GameResult::UnknownWord => {
            bail!("{answer} is not one of the possible answers");
        }
    }
    Ok(())
}

/// Shows a progress bar while guesses are scored.
struct ProgressObserver {
    bar: ProgressBar,
}

impl ProgressObserver {
    fn new() -> ProgressObserver {
        let bar = ProgressBar::hidden();
        if let Ok(style) =
            ProgressStyle::with_template("{bar:40} {pos}/{len} [{elapsed_precise}] {msg}")
        {
            bar.set_style(style);
        }
        ProgressObserver { bar }
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl SearchObserver for ProgressObserver {
    fn on_search_started(&self, num_guesses: usize) {
        self.bar.reset();
        self.bar.set_length(num_guesses as u64);
        self.bar
            .set_draw_target(indicatif::ProgressDrawTarget::stderr());
    }

    fn on_guess_scored(&self, guess: &str, _reduction: f64) {
        self.bar.set_message(guess.to_string());
        self.bar.inc(1);
    }
}
