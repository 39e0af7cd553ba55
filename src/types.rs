//! This module defines the core data structures and types used throughout the Turing Machine
//! engine, including the machine description, transitions, execution results, and error types.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use thiserror::Error;

use crate::analyzer::analyze;
use crate::Rule;

/// The default blank symbol used on the Turing Machine tape.
pub const DEFAULT_BLANK_SYMBOL: char = '_';
/// The maximum allowed size for a configuration source in bytes.
pub const MAX_CONFIG_SIZE: usize = 65536; // 64KB
/// The maximum number of steps to execute before a run is forcibly rejected.
pub const MAX_EXECUTION_STEPS: usize = 500;

/// Represents the possible directions a Turing Machine head can move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Move the head one position to the left.
    Left,
    /// Move the head one position to the right.
    Right,
    /// Keep the head in the same position.
    Stay,
}

impl Direction {
    /// Returns the signed head displacement for this direction.
    pub fn offset(self) -> i64 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
            Direction::Stay => 0,
        }
    }

    /// Returns the single-letter notation used in traces (`L`, `R`, `S`).
    pub fn symbol(self) -> char {
        match self {
            Direction::Left => 'L',
            Direction::Right => 'R',
            Direction::Stay => 'S',
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// The right-hand side of a transition: what the machine does after reading a symbol
/// in a given state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    /// The state the machine transitions to.
    pub next_state: String,
    /// The symbol written to the cell under the head.
    pub write: char,
    /// The direction the head moves after writing.
    pub direction: Direction,
}

/// A complete transition rule `(state, read) -> (next_state, write, direction)`.
///
/// This is the flat form used to build and serialize a [`Description`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRule {
    pub state: String,
    pub read: char,
    pub next_state: String,
    pub write: char,
    pub direction: Direction,
}

/// An immutable, validated description of a single-tape deterministic Turing Machine.
///
/// The transition table is keyed by state and then by the symbol read, so a lookup for
/// `(state, symbol)` never allocates. A missing entry is an undefined transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DescriptionRepr", into = "DescriptionRepr")]
pub struct Description {
    states: BTreeSet<String>,
    input_alphabet: BTreeSet<char>,
    blank: char,
    transitions: HashMap<String, HashMap<char, Transition>>,
    start_state: String,
    accept_state: String,
    reject_state: String,
}

impl Description {
    /// Starts building a new description.
    pub fn builder() -> DescriptionBuilder {
        DescriptionBuilder::default()
    }

    pub fn states(&self) -> &BTreeSet<String> {
        &self.states
    }

    pub fn input_alphabet(&self) -> &BTreeSet<char> {
        &self.input_alphabet
    }

    /// Returns every symbol the tape may hold: the input alphabet plus the blank symbol.
    pub fn tape_alphabet(&self) -> BTreeSet<char> {
        let mut symbols = self.input_alphabet.clone();
        symbols.insert(self.blank);
        symbols
    }

    /// Checks whether `symbol` belongs to the tape alphabet.
    pub fn is_tape_symbol(&self, symbol: char) -> bool {
        symbol == self.blank || self.input_alphabet.contains(&symbol)
    }

    pub fn blank(&self) -> char {
        self.blank
    }

    pub fn start_state(&self) -> &str {
        &self.start_state
    }

    pub fn accept_state(&self) -> &str {
        &self.accept_state
    }

    pub fn reject_state(&self) -> &str {
        &self.reject_state
    }

    /// Returns `true` for the accept and reject states.
    pub fn is_halting_state(&self, state: &str) -> bool {
        state == self.accept_state || state == self.reject_state
    }

    /// Looks up the transition for `(state, symbol)`.
    pub fn transition(&self, state: &str, symbol: char) -> Option<&Transition> {
        self.transitions.get(state)?.get(&symbol)
    }

    /// Returns the total number of defined transitions.
    pub fn transition_count(&self) -> usize {
        self.transitions.values().map(HashMap::len).sum()
    }

    /// Iterates over all transitions as `(state, read, transition)` triples.
    pub fn transitions(&self) -> impl Iterator<Item = (&str, char, &Transition)> {
        self.transitions.iter().flat_map(|(state, row)| {
            row.iter()
                .map(move |(&read, transition)| (state.as_str(), read, transition))
        })
    }

    /// Returns all transitions as flat rules, sorted by state and symbol.
    pub fn rules(&self) -> Vec<TransitionRule> {
        let mut rules: Vec<TransitionRule> = self
            .transitions()
            .map(|(state, read, t)| TransitionRule {
                state: state.to_string(),
                read,
                next_state: t.next_state.clone(),
                write: t.write,
                direction: t.direction,
            })
            .collect();
        rules.sort_by(|a, b| (&a.state, a.read).cmp(&(&b.state, b.read)));
        rules
    }
}

/// Incrementally assembles a [`Description`].
///
/// `build` rejects duplicate `(state, read)` rules and runs the analyzer, so every
/// `Description` in circulation satisfies the machine invariants.
#[derive(Debug, Default, Clone)]
pub struct DescriptionBuilder {
    states: BTreeSet<String>,
    input_alphabet: BTreeSet<char>,
    blank: Option<char>,
    start_state: Option<String>,
    accept_state: Option<String>,
    reject_state: Option<String>,
    rules: Vec<TransitionRule>,
}

impl DescriptionBuilder {
    pub fn state(mut self, name: impl Into<String>) -> Self {
        self.states.insert(name.into());
        self
    }

    pub fn states<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.states.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn input_alphabet<I: IntoIterator<Item = char>>(mut self, symbols: I) -> Self {
        self.input_alphabet.extend(symbols);
        self
    }

    pub fn blank(mut self, blank: char) -> Self {
        self.blank = Some(blank);
        self
    }

    pub fn start_state(mut self, name: impl Into<String>) -> Self {
        self.start_state = Some(name.into());
        self
    }

    pub fn accept_state(mut self, name: impl Into<String>) -> Self {
        self.accept_state = Some(name.into());
        self
    }

    pub fn reject_state(mut self, name: impl Into<String>) -> Self {
        self.reject_state = Some(name.into());
        self
    }

    /// Adds the rule `(state, read) -> (next_state, write, direction)`.
    pub fn rule(
        mut self,
        state: impl Into<String>,
        read: char,
        next_state: impl Into<String>,
        write: char,
        direction: Direction,
    ) -> Self {
        self.rules.push(TransitionRule {
            state: state.into(),
            read,
            next_state: next_state.into(),
            write,
            direction,
        });
        self
    }

    /// Validates the collected parts and produces the immutable description.
    ///
    /// # Returns
    ///
    /// * `Ok(Description)` if all required parts are present and the invariants hold.
    /// * `Err(TuringMachineError::ValidationError)` otherwise.
    pub fn build(self) -> Result<Description, TuringMachineError> {
        let start_state = required(self.start_state, "start state")?;
        let accept_state = required(self.accept_state, "accept state")?;
        let reject_state = required(self.reject_state, "reject state")?;

        let mut transitions: HashMap<String, HashMap<char, Transition>> = HashMap::new();
        for rule in self.rules {
            let row = transitions.entry(rule.state.clone()).or_default();
            if row.contains_key(&rule.read) {
                return Err(TuringMachineError::ValidationError(format!(
                    "Duplicate transition for state '{}' and symbol '{}'",
                    rule.state, rule.read
                )));
            }
            row.insert(
                rule.read,
                Transition {
                    next_state: rule.next_state,
                    write: rule.write,
                    direction: rule.direction,
                },
            );
        }

        let description = Description {
            states: self.states,
            input_alphabet: self.input_alphabet,
            blank: self.blank.unwrap_or(DEFAULT_BLANK_SYMBOL),
            transitions,
            start_state,
            accept_state,
            reject_state,
        };

        analyze(&description)?;

        Ok(description)
    }
}

fn required(value: Option<String>, name: &str) -> Result<String, TuringMachineError> {
    value.ok_or_else(|| TuringMachineError::ValidationError(format!("Missing {name}")))
}

/// Serialized shape of a [`Description`]: plain lists instead of nested maps.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct DescriptionRepr {
    states: Vec<String>,
    input_alphabet: String,
    blank: char,
    start_state: String,
    accept_state: String,
    reject_state: String,
    rules: Vec<TransitionRule>,
}

impl From<Description> for DescriptionRepr {
    fn from(description: Description) -> Self {
        let rules = description.rules();
        Self {
            states: description.states.into_iter().collect(),
            input_alphabet: description.input_alphabet.into_iter().collect(),
            blank: description.blank,
            start_state: description.start_state,
            accept_state: description.accept_state,
            reject_state: description.reject_state,
            rules,
        }
    }
}

impl TryFrom<DescriptionRepr> for Description {
    type Error = TuringMachineError;

    fn try_from(repr: DescriptionRepr) -> Result<Self, Self::Error> {
        let builder = Description::builder()
            .states(repr.states)
            .input_alphabet(repr.input_alphabet.chars())
            .blank(repr.blank)
            .start_state(repr.start_state)
            .accept_state(repr.accept_state)
            .reject_state(repr.reject_state);

        repr.rules
            .into_iter()
            .fold(builder, |b, r| {
                b.rule(r.state, r.read, r.next_state, r.write, r.direction)
            })
            .build()
    }
}

/// A parsed configuration source: the alphabet to generate a machine for, and the inputs
/// to run through it in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// The digits of the numeral system, lowest value first.
    pub alphabet: String,
    /// One tape input per entry.
    pub inputs: Vec<String>,
}

/// Represents the outcome of a Turing Machine execution step.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// The machine performed a step and is still running.
    Continue,
    /// The machine has halted.
    Halt(Halt),
}

impl Step {
    /// Returns whether the machine is still running after this step.
    pub fn is_running(&self) -> bool {
        matches!(self, Step::Continue)
    }
}

/// Why a run stopped.
#[derive(Debug, Clone, PartialEq)]
pub enum Halt {
    /// The machine entered its accept state.
    Accept,
    /// The machine entered its reject state through a defined transition.
    Reject,
    /// The run was rejected for a diagnosable reason: invalid input, an undefined
    /// transition, or the step ceiling.
    Err(TuringMachineError),
}

impl Halt {
    pub fn is_accept(&self) -> bool {
        matches!(self, Halt::Accept)
    }
}

impl fmt::Display for Halt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Halt::Accept => write!(f, "accepted"),
            Halt::Reject => write!(f, "rejected"),
            Halt::Err(e) => write!(f, "rejected ({e})"),
        }
    }
}

/// The engine's own lifecycle, distinct from the states of the simulated machine.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Status {
    /// No run in progress; the initial state and the state after `reset`.
    #[default]
    Idle,
    Running,
    Halted(Halt),
}

/// Represents various errors that can occur during Turing Machine operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TuringMachineError {
    /// The alphabet handed to the generator cannot form a positional numeral system.
    #[error("Invalid alphabet: {0}")]
    InvalidAlphabet(String),
    /// The input contains a symbol outside the tape alphabet, or the blank symbol itself.
    #[error("Invalid symbol '{0}' in input")]
    InvalidSymbol(char),
    /// Indicates that there's no rule defined for a state and the symbol under the head.
    #[error("No rule defined for state {0} and symbol '{1}'")]
    UndefinedTransition(String, char),
    /// The run exceeded the step ceiling.
    #[error("Step limit of {0} exceeded")]
    StepLimitExceeded(usize),
    /// Indicates an error during the parsing of a configuration source.
    #[error("Config parsing error: {0}")]
    ParseError(#[from] Box<pest::error::Error<Rule>>),
    /// Indicates a machine description or configuration that violates its invariants.
    #[error("Validation error: {0}")]
    ValidationError(String),
    /// Indicates an error related to file system operations.
    #[error("File error: {0}")]
    FileError(String),
}
