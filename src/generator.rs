//! This module generates Turing Machine descriptions that increment a numeral by one.
//!
//! The alphabet is read as the digits of a positional numeral system, lowest value first:
//! `"01"` is binary, `"0123456789"` is decimal. The numeral on the tape is written most
//! significant digit first, and an all-blank tape is the empty numeral.

use std::collections::HashSet;

use crate::types::{Description, Direction, TuringMachineError, DEFAULT_BLANK_SYMBOL};

/// Start state: reads the first cell before any movement.
pub const START_STATE: &str = "q_start";
/// Walks right to the blank after the least significant digit.
pub const SCAN_STATE: &str = "q_move_right";
/// Adds one to the digit under the head, carrying leftwards.
pub const INCREMENT_STATE: &str = "q_increment";
pub const ACCEPT_STATE: &str = "q_accept";
pub const REJECT_STATE: &str = "q_reject";

/// Generates an incrementer for `alphabet` using `DEFAULT_BLANK_SYMBOL` as the blank.
pub fn incrementer(alphabet: &str) -> Result<Description, TuringMachineError> {
    incrementer_with_blank(alphabet, DEFAULT_BLANK_SYMBOL)
}

/// Generates a five-state machine that increments the numeral on its tape.
///
/// For digits `d0 < d1 < ... < dn` the table is:
///
/// * `q_start`: any digit moves right into `q_move_right`; a blank (empty numeral)
///   writes `d1` and accepts in place.
/// * `q_move_right`: digits move right; the first blank turns into `q_increment` one
///   cell to the left, on the least significant digit.
/// * `q_increment`: `di` (i < n) writes `d(i+1)` and accepts; `dn` writes `d0` and moves
///   left to carry; a blank means the carry ran past the most significant digit, so it
///   writes `d1` and accepts.
///
/// # Returns
///
/// * `Ok(Description)` for an alphabet of at least two distinct symbols.
/// * `Err(TuringMachineError::InvalidAlphabet)` if the alphabet is too short, repeats a
///   symbol, or contains `blank`.
pub fn incrementer_with_blank(
    alphabet: &str,
    blank: char,
) -> Result<Description, TuringMachineError> {
    let digits = check_alphabet(alphabet, blank)?;
    let first = digits[0];
    let second = digits[1];
    let last = digits[digits.len() - 1];

    let mut builder = Description::builder()
        .states([
            START_STATE,
            SCAN_STATE,
            INCREMENT_STATE,
            ACCEPT_STATE,
            REJECT_STATE,
        ])
        .input_alphabet(digits.iter().copied())
        .blank(blank)
        .start_state(START_STATE)
        .accept_state(ACCEPT_STATE)
        .reject_state(REJECT_STATE);

    // Scan to the right end of the numeral.
    for &digit in &digits {
        builder = builder
            .rule(START_STATE, digit, SCAN_STATE, digit, Direction::Right)
            .rule(SCAN_STATE, digit, SCAN_STATE, digit, Direction::Right);
    }
    builder = builder
        .rule(START_STATE, blank, ACCEPT_STATE, second, Direction::Stay)
        .rule(SCAN_STATE, blank, INCREMENT_STATE, blank, Direction::Left);

    // Add one, carrying while the digit overflows.
    for (digit, next) in digits.iter().zip(digits.iter().skip(1)) {
        builder = builder.rule(INCREMENT_STATE, *digit, ACCEPT_STATE, *next, Direction::Stay);
    }
    builder = builder
        .rule(INCREMENT_STATE, last, INCREMENT_STATE, first, Direction::Left)
        .rule(INCREMENT_STATE, blank, ACCEPT_STATE, second, Direction::Stay);

    builder.build()
}

/// Splits the alphabet into digits, checking it can serve as a positional system.
fn check_alphabet(alphabet: &str, blank: char) -> Result<Vec<char>, TuringMachineError> {
    let digits: Vec<char> = alphabet.chars().collect();

    if digits.len() < 2 {
        return Err(TuringMachineError::InvalidAlphabet(format!(
            "a positional system needs at least 2 symbols, got {}",
            digits.len()
        )));
    }

    if digits.contains(&blank) {
        return Err(TuringMachineError::InvalidAlphabet(format!(
            "symbol '{blank}' is reserved as the blank symbol"
        )));
    }

    let mut seen = HashSet::new();
    if let Some(duplicate) = digits.iter().find(|c| !seen.insert(**c)) {
        return Err(TuringMachineError::InvalidAlphabet(format!(
            "symbol '{duplicate}' appears more than once"
        )));
    }

    Ok(digits)
}
