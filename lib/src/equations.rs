//! Enumerates every valid equation of a given length, for use as the candidate universe of the
//! arithmetic variant.
//!
//! An equation looks like `<left>=<right>`, where the left side is two or more whole numbers
//! joined by operators, and the right side is the value of the left side written out in decimal.
//! Numbers never have leading zeros, the usual operator precedence applies, and division must be
//! exact overall (`9/2*2=9` is valid, since it is evaluated without rounding). The right side
//! is any integer whose decimal form, including a leading `-`, fills the remaining length, so
//! `1-11=-10` is an equation of length 8.

use crate::data::WordBank;
use crate::error::WordleError;
use crate::variant::GameVariant;
use log::debug;
use rayon::prelude::*;
use std::sync::Arc;
use std::sync::OnceLock;

/// The longest equation this module will generate.
pub const MAX_EQUATION_LENGTH: usize = 10;

/// The operators that equations may use.
pub const SUPPORTED_OPERATORS: [char; 4] = ['+', '-', '*', '/'];

/// Generates every valid equation with exactly `total_length` characters, using all of the
/// [`SUPPORTED_OPERATORS`].
///
/// **This is expensive for long equations.** Prefer [`EquationUniverse`] to generate the list
/// once and share it.
///
/// ```
/// use rs_wordle_knowledge::equations::generate;
///
/// let equations = generate(5).unwrap();
/// assert!(equations.contains(&"1+2=3".to_string()));
/// assert!(equations.contains(&"8/4=2".to_string()));
/// assert!(equations.contains(&"1-2=-1".to_string()));
/// ```
pub fn generate(total_length: usize) -> Result<Vec<String>, WordleError> {
    generate_with_operators(total_length, &SUPPORTED_OPERATORS)
}

/// Generates every valid equation for the given variant, using the variant's operators.
pub fn generate_for_variant(variant: &GameVariant) -> Result<Vec<String>, WordleError> {
    check_variant(variant)?;
    generate_with_operators(variant.answer_length(), variant.operators())
}

/// Generates every valid equation with exactly `total_length` characters, using only the given
/// operators.
pub fn generate_with_operators(
    total_length: usize,
    operators: &[char],
) -> Result<Vec<String>, WordleError> {
    check_length(total_length)?;
    let operators = check_operators(operators)?;
    Ok(generate_unchecked(total_length, &operators))
}

fn check_variant(variant: &GameVariant) -> Result<(), WordleError> {
    if !variant.contains('=') {
        return Err(WordleError::Configuration(
            "equations need '=' in the alphabet".to_string(),
        ));
    }
    if let Some(digit) = ('0'..='9').find(|digit| !variant.contains(*digit)) {
        return Err(WordleError::Configuration(format!(
            "equations need {digit:?} in the alphabet"
        )));
    }
    Ok(())
}

/// Returns the operators without duplicates, failing if any can't be evaluated.
fn check_operators(operators: &[char]) -> Result<Vec<char>, WordleError> {
    if operators.is_empty() {
        return Err(WordleError::Configuration(
            "at least one operator is required".to_string(),
        ));
    }
    let mut unique_operators: Vec<char> = Vec::new();
    for operator in operators {
        if !SUPPORTED_OPERATORS.contains(operator) {
            return Err(WordleError::Configuration(format!(
                "{operator:?} is not a supported operator"
            )));
        }
        if !unique_operators.contains(operator) {
            unique_operators.push(*operator);
        }
    }
    Ok(unique_operators)
}

fn check_length(total_length: usize) -> Result<(), WordleError> {
    if total_length == 0 || total_length > MAX_EQUATION_LENGTH {
        return Err(WordleError::Configuration(format!(
            "equation length must be between 1 and {MAX_EQUATION_LENGTH}, not {total_length}"
        )));
    }
    Ok(())
}

/// One shape of equation: how many digits each term has, which operators join them, and how
/// many digits the answer must have.
struct Layout {
    term_sizes: Vec<usize>,
    operators: Vec<char>,
    answer_size: usize,
}

fn generate_unchecked(total_length: usize, operators: &[char]) -> Vec<String> {
    let mut layouts: Vec<Layout> = Vec::new();
    for left_size in 1..total_length.saturating_sub(1) {
        let answer_size = total_length - left_size - 1;
        let max_operators = (left_size - 1) / 2;
        for num_operators in 1..=max_operators {
            let total_term_size = left_size - num_operators;
            let term_partitions = partitions(total_term_size, num_operators + 1);
            let operator_choices = operator_sequences(operators, num_operators);
            for term_sizes in &term_partitions {
                for ops in &operator_choices {
                    layouts.push(Layout {
                        term_sizes: term_sizes.clone(),
                        operators: ops.clone(),
                        answer_size,
                    });
                }
            }
        }
    }

    let equations: Vec<String> = layouts
        .par_iter()
        .map(equations_for_layout)
        .collect::<Vec<Vec<String>>>()
        .into_iter()
        .flatten()
        .collect();
    debug!(
        "Generated {} equations of length {} from {} layouts",
        equations.len(),
        total_length,
        layouts.len()
    );
    equations
}

/// All ordered ways to split `total` into `parts` positive sizes, in lexicographic order.
fn partitions(total: usize, parts: usize) -> Vec<Vec<usize>> {
    if parts == 1 {
        return vec![vec![total]];
    }
    let mut all = Vec::new();
    for first in 1..=(total - (parts - 1)) {
        for mut rest in partitions(total - first, parts - 1) {
            rest.insert(0, first);
            all.push(rest);
        }
    }
    all
}

/// Every sequence of `length` operators, in the order the operators were given.
fn operator_sequences(operators: &[char], length: usize) -> Vec<Vec<char>> {
    let mut sequences: Vec<Vec<char>> = vec![Vec::new()];
    for _ in 0..length {
        sequences = sequences
            .into_iter()
            .flat_map(|sequence| {
                operators.iter().map(move |op| {
                    let mut next = sequence.clone();
                    next.push(*op);
                    next
                })
            })
            .collect();
    }
    sequences
}

fn equations_for_layout(layout: &Layout) -> Vec<String> {
    let lower_bounds: Vec<i64> = layout
        .term_sizes
        .iter()
        .map(|size| 10_i64.pow(*size as u32 - 1))
        .collect();
    let upper_bounds: Vec<i64> = layout
        .term_sizes
        .iter()
        .map(|size| 10_i64.pow(*size as u32))
        .collect();
    let answer_min = if layout.answer_size == 1 {
        0
    } else {
        10_i64.pow(layout.answer_size as u32 - 1)
    };
    let answer_max = 10_i64.pow(layout.answer_size as u32);
    // The sign takes one character, so a one-character answer is never negative.
    let negative_limit = -(10_i64.pow(layout.answer_size as u32 - 1));

    let mut equations = Vec::new();
    let mut terms = lower_bounds.clone();
    loop {
        if let Some(answer) = evaluate(&terms, &layout.operators) {
            let fits = if answer < 0 {
                answer > negative_limit
            } else {
                answer >= answer_min && answer < answer_max
            };
            if fits {
                equations.push(format_equation(&terms, &layout.operators, answer));
            }
        }

        // Advance the rightmost term, carrying into the terms to its left.
        let mut index = terms.len();
        loop {
            if index == 0 {
                return equations;
            }
            index -= 1;
            terms[index] += 1;
            if terms[index] < upper_bounds[index] {
                break;
            }
            terms[index] = lower_bounds[index];
        }
    }
}

fn format_equation(terms: &[i64], operators: &[char], answer: i64) -> String {
    let mut equation = terms[0].to_string();
    for (op, term) in operators.iter().zip(&terms[1..]) {
        equation.push(*op);
        equation.push_str(&term.to_string());
    }
    equation.push('=');
    equation.push_str(&answer.to_string());
    equation
}

/// An exact fraction, always stored in lowest terms with a positive denominator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Fraction {
    numerator: i128,
    denominator: i128,
}

impl Fraction {
    fn whole(value: i64) -> Fraction {
        Fraction {
            numerator: value as i128,
            denominator: 1,
        }
    }

    fn new(numerator: i128, denominator: i128) -> Option<Fraction> {
        if denominator == 0 {
            return None;
        }
        let divisor = gcd(numerator.abs(), denominator.abs()).max(1);
        let sign = if denominator < 0 { -1 } else { 1 };
        Some(Fraction {
            numerator: sign * numerator / divisor,
            denominator: sign * denominator / divisor,
        })
    }

    fn add(self, other: Fraction) -> Option<Fraction> {
        Fraction::new(
            self.numerator * other.denominator + other.numerator * self.denominator,
            self.denominator * other.denominator,
        )
    }

    fn sub(self, other: Fraction) -> Option<Fraction> {
        Fraction::new(
            self.numerator * other.denominator - other.numerator * self.denominator,
            self.denominator * other.denominator,
        )
    }

    fn mul(self, other: Fraction) -> Option<Fraction> {
        Fraction::new(
            self.numerator * other.numerator,
            self.denominator * other.denominator,
        )
    }

    fn div(self, other: Fraction) -> Option<Fraction> {
        Fraction::new(
            self.numerator * other.denominator,
            self.denominator * other.numerator,
        )
    }

    fn as_integer(self) -> Option<i64> {
        if self.denominator != 1 {
            return None;
        }
        i64::try_from(self.numerator).ok()
    }
}

fn gcd(mut a: i128, mut b: i128) -> i128 {
    while b != 0 {
        let remainder = a % b;
        a = b;
        b = remainder;
    }
    a
}

/// Evaluates the expression exactly, returning `None` if the value isn't an integer.
fn evaluate(terms: &[i64], operators: &[char]) -> Option<i64> {
    let mut total = Fraction::whole(0);
    let mut product = Fraction::whole(terms[0]);
    let mut product_is_negative = false;
    for (op, term) in operators.iter().zip(&terms[1..]) {
        let term = Fraction::whole(*term);
        match op {
            '*' => product = product.mul(term)?,
            '/' => product = product.div(term)?,
            _ => {
                total = if product_is_negative {
                    total.sub(product)?
                } else {
                    total.add(product)?
                };
                product = term;
                product_is_negative = *op == '-';
            }
        }
    }
    total = if product_is_negative {
        total.sub(product)?
    } else {
        total.add(product)?
    };
    total.as_integer()
}

/// A compute-once cache of every equation for one length.
///
/// Generation happens on the first call to [`EquationUniverse::get`]; every later call returns
/// the same list. Construct one per length and share it by reference.
///
/// ```
/// use rs_wordle_knowledge::equations::EquationUniverse;
///
/// let universe = EquationUniverse::new(5).unwrap();
/// assert!(!universe.is_generated());
/// let count = universe.get().len();
/// assert!(universe.is_generated());
/// assert_eq!(universe.get().len(), count);
/// ```
#[derive(Debug)]
pub struct EquationUniverse {
    total_length: usize,
    operators: Vec<char>,
    equations: OnceLock<WordBank>,
}

impl EquationUniverse {
    /// Prepares a cache for equations of the given length. Nothing is generated yet.
    pub fn new(total_length: usize) -> Result<EquationUniverse, WordleError> {
        check_length(total_length)?;
        Ok(EquationUniverse {
            total_length,
            operators: SUPPORTED_OPERATORS.to_vec(),
            equations: OnceLock::new(),
        })
    }

    /// Prepares a cache for the given variant's equation length and operators.
    pub fn for_variant(variant: &GameVariant) -> Result<EquationUniverse, WordleError> {
        check_variant(variant)?;
        check_length(variant.answer_length())?;
        Ok(EquationUniverse {
            total_length: variant.answer_length(),
            operators: check_operators(variant.operators())?,
            equations: OnceLock::new(),
        })
    }

    pub fn total_length(&self) -> usize {
        self.total_length
    }

    /// Returns `true` once the equations have been generated.
    pub fn is_generated(&self) -> bool {
        self.equations.get().is_some()
    }

    /// Returns every equation, generating them first if needed.
    pub fn get(&self) -> &WordBank {
        self.equations.get_or_init(|| {
            let equations = generate_unchecked(self.total_length, &self.operators);
            WordBank::from_generated(
                equations.iter().map(|e| Arc::from(e.as_str())).collect(),
                self.total_length,
            )
        })
    }
}
