//! This module provides functions for analyzing machine descriptions before execution.
//! `analyze` enforces the formal machine invariants: distinguished states, the blank
//! symbol, transition targets and symbols. `lint` reports tables that are valid but
//! suspicious, such as unreachable states or rules out of a halting state.

use crate::types::{Description, TuringMachineError};
use std::collections::{BTreeSet, HashSet};

/// Represents the errors that can be found during the analysis of a machine description.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum AnalysisError {
    /// The accept and reject states are the same state.
    IndistinctHaltingStates(String),
    /// A distinguished (start, accept or reject) state is not among the declared states.
    UnknownDistinguishedState(String),
    /// The blank symbol is part of the input alphabet.
    BlankInInputAlphabet(char),
    /// Transitions leave from or lead to undeclared states.
    UndefinedStates(Vec<String>),
    /// Transitions read or write symbols outside the tape alphabet.
    InvalidTapeSymbols(Vec<char>),
    /// Transitions are defined for the accept or reject state.
    HaltingStateTransitions(Vec<String>),
    /// Non-halting states that cannot be reached from the start state.
    UnreachableStates(Vec<String>),
}

impl From<AnalysisError> for TuringMachineError {
    /// Converts an `AnalysisError` into a `TuringMachineError::ValidationError`.
    fn from(error: AnalysisError) -> Self {
        match error {
            AnalysisError::IndistinctHaltingStates(state) => TuringMachineError::ValidationError(
                format!("Accept and reject state must differ, both are '{}'", state),
            ),
            AnalysisError::UnknownDistinguishedState(state) => {
                TuringMachineError::ValidationError(format!("Unknown state: {}", state))
            }
            AnalysisError::BlankInInputAlphabet(blank) => TuringMachineError::ValidationError(
                format!("Blank symbol '{}' must not be part of the input alphabet", blank),
            ),
            AnalysisError::UndefinedStates(states) => TuringMachineError::ValidationError(
                format!("Transitions reference undefined states: {:?}", states),
            ),
            AnalysisError::InvalidTapeSymbols(symbols) => TuringMachineError::ValidationError(
                format!("Transitions use symbols outside the tape alphabet: {:?}", symbols),
            ),
            AnalysisError::HaltingStateTransitions(states) => TuringMachineError::ValidationError(
                format!("Halting states must not have transitions: {:?}", states),
            ),
            AnalysisError::UnreachableStates(states) => TuringMachineError::ValidationError(
                format!("Unreachable states detected: {:?}", states),
            ),
        }
    }
}

/// Analyzes a `Description` for violations of the machine invariants.
///
/// # Returns
///
/// * `Ok(())` if no errors are found.
/// * `Err(TuringMachineError::ValidationError)` describing the first violated check.
pub fn analyze(description: &Description) -> Result<(), TuringMachineError> {
    [
        check_halting_states,
        check_distinguished_states,
        check_blank_symbol,
        check_transition_states,
        check_transition_symbols,
    ]
    .iter()
    .find_map(|f| f(description).err())
    .map_or(Ok(()), |error| Err(error.into()))
}

/// Reports dead parts of a valid description: rules out of the accept or reject state
/// (never taken, the machine stops on entering them) and states the start state cannot
/// reach.
///
/// `DescriptionBuilder::build` does not call this; such descriptions run fine.
///
/// # Returns
///
/// * `Ok(())` if the table has no dead parts.
/// * `Err(AnalysisError)` describing the first finding.
pub fn lint(description: &Description) -> Result<(), AnalysisError> {
    [check_halting_transitions, check_unreachable_states]
        .iter()
        .find_map(|f| f(description).err())
        .map_or(Ok(()), Err)
}

/// Checks that the accept and reject states are different.
fn check_halting_states(description: &Description) -> Result<(), AnalysisError> {
    if description.accept_state() == description.reject_state() {
        return Err(AnalysisError::IndistinctHaltingStates(
            description.accept_state().to_string(),
        ));
    }

    Ok(())
}

/// Checks that the start, accept and reject states are declared states.
fn check_distinguished_states(description: &Description) -> Result<(), AnalysisError> {
    [
        description.start_state(),
        description.accept_state(),
        description.reject_state(),
    ]
    .into_iter()
    .find(|state| !description.states().contains(*state))
    .map_or(Ok(()), |state| {
        Err(AnalysisError::UnknownDistinguishedState(state.to_string()))
    })
}

fn check_blank_symbol(description: &Description) -> Result<(), AnalysisError> {
    let blank = description.blank();
    if description.input_alphabet().contains(&blank) {
        return Err(AnalysisError::BlankInInputAlphabet(blank));
    }

    Ok(())
}

/// Checks that every transition leaves from and leads to a declared state.
fn check_transition_states(description: &Description) -> Result<(), AnalysisError> {
    let undefined: BTreeSet<String> = description
        .transitions()
        .flat_map(|(state, _, t)| [state, t.next_state.as_str()])
        .filter(|state| !description.states().contains(*state))
        .map(str::to_string)
        .collect();

    if !undefined.is_empty() {
        return Err(AnalysisError::UndefinedStates(undefined.into_iter().collect()));
    }

    Ok(())
}

/// Checks that every transition reads and writes symbols of the tape alphabet.
fn check_transition_symbols(description: &Description) -> Result<(), AnalysisError> {
    let invalid: BTreeSet<char> = description
        .transitions()
        .flat_map(|(_, read, t)| [read, t.write])
        .filter(|&symbol| !description.is_tape_symbol(symbol))
        .collect();

    if !invalid.is_empty() {
        return Err(AnalysisError::InvalidTapeSymbols(invalid.into_iter().collect()));
    }

    Ok(())
}

/// Checks that the machine has nothing left to do once it halts.
fn check_halting_transitions(description: &Description) -> Result<(), AnalysisError> {
    let halting: BTreeSet<String> = description
        .transitions()
        .map(|(state, _, _)| state)
        .filter(|state| description.is_halting_state(state))
        .map(str::to_string)
        .collect();

    if !halting.is_empty() {
        return Err(AnalysisError::HaltingStateTransitions(
            halting.into_iter().collect(),
        ));
    }

    Ok(())
}

/// Checks for unreachable states by traversing the transitions from the start state.
///
/// The accept and reject states are exempt: the reject state in particular is usually
/// entered through an undefined transition rather than an explicit rule.
fn check_unreachable_states(description: &Description) -> Result<(), AnalysisError> {
    let mut visited = HashSet::new();
    let mut queue = vec![description.start_state()];

    while let Some(state) = queue.pop() {
        if !visited.insert(state) {
            continue;
        }

        for (from, _, transition) in description.transitions() {
            if from == state && !visited.contains(transition.next_state.as_str()) {
                queue.push(transition.next_state.as_str());
            }
        }
    }

    let unreachable: Vec<String> = description
        .states()
        .iter()
        .filter(|state| !visited.contains(state.as_str()))
        .filter(|state| !description.is_halting_state(state))
        .cloned()
        .collect();

    if !unreachable.is_empty() {
        return Err(AnalysisError::UnreachableStates(unreachable));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DescriptionBuilder, Direction};

    fn create_test_builder() -> DescriptionBuilder {
        DescriptionBuilder::default()
            .states(["start", "accept", "reject"])
            .input_alphabet(['a'])
            .blank('-')
            .start_state("start")
            .accept_state("accept")
            .reject_state("reject")
            .rule("start", 'a', "accept", 'a', Direction::Stay)
    }

    fn validation_message(builder: DescriptionBuilder) -> String {
        match builder.build() {
            Err(TuringMachineError::ValidationError(msg)) => msg,
            other => panic!("Expected a validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_description() {
        assert!(create_test_builder().build().is_ok());
    }

    #[test]
    fn test_accept_equals_reject() {
        let msg = validation_message(create_test_builder().reject_state("accept"));
        assert!(msg.contains("must differ"));
    }

    #[test]
    fn test_unknown_distinguished_state() {
        let msg = validation_message(create_test_builder().start_state("nowhere"));
        assert_eq!(msg, "Unknown state: nowhere");
    }

    #[test]
    fn test_blank_in_input_alphabet() {
        let msg = validation_message(create_test_builder().input_alphabet(['-']));
        assert!(msg.contains("Blank symbol '-'"));
    }

    #[test]
    fn test_undefined_next_state() {
        let msg = validation_message(create_test_builder().rule(
            "start",
            '-',
            "missing",
            '-',
            Direction::Right,
        ));
        assert!(msg.contains("undefined states"));
        assert!(msg.contains("missing"));
    }

    #[test]
    fn test_symbol_outside_tape_alphabet() {
        let msg = validation_message(create_test_builder().rule(
            "start",
            '-',
            "accept",
            'z',
            Direction::Right,
        ));
        assert!(msg.contains("['z']"));
    }

    #[test]
    fn test_dead_parts_do_not_block_build() {
        let builder = create_test_builder()
            .state("spare")
            .rule("accept", 'a', "accept", 'a', Direction::Stay);

        assert!(builder.build().is_ok());
    }

    #[test]
    fn test_lint_transition_from_halting_state() {
        let description = create_test_builder()
            .rule("accept", 'a', "start", 'a', Direction::Right)
            .build()
            .unwrap();

        assert_eq!(
            lint(&description),
            Err(AnalysisError::HaltingStateTransitions(vec!["accept".into()]))
        );
    }

    #[test]
    fn test_lint_unreachable_states() {
        let description = create_test_builder()
            .state("island")
            .rule("island", 'a', "accept", 'a', Direction::Stay)
            .build()
            .unwrap();

        let error: TuringMachineError = lint(&description).unwrap_err().into();
        assert_eq!(
            error,
            TuringMachineError::ValidationError(
                "Unreachable states detected: [\"island\"]".into()
            )
        );
    }

    #[test]
    fn test_lint_ignores_unreachable_reject_state() {
        let description = create_test_builder().build().unwrap();

        assert!(analyze(&description).is_ok());
        assert!(lint(&description).is_ok());
    }

    #[test]
    fn test_analysis_error_conversion() {
        let error: TuringMachineError = AnalysisError::BlankInInputAlphabet('_').into();
        assert!(matches!(error, TuringMachineError::ValidationError(_)));
    }
}
