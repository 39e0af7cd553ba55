//! This module provides the parser for configuration sources, utilizing the `pest` crate.
//! The grammar in `grammar.pest` splits the text into entries, skipping blank lines and
//! `#` comments; the first entry is the alphabet and every later entry is a tape input.

use crate::types::{Config, TuringMachineError};
use pest::{iterators::Pair, Parser as PestParser};
use pest_derive::Parser as PestParser;

/// Derives a `PestParser` for the configuration grammar defined in `grammar.pest`.
#[derive(PestParser)]
#[grammar = "grammar.pest"]
pub struct ConfigParser;

/// Parses the given text into a `Config`.
///
/// Whitespace inside the alphabet entry is dropped, so `0 1` and `01` describe the same
/// alphabet. Input entries are trimmed but otherwise kept verbatim; checking their
/// symbols is left to the machine.
///
/// # Returns
///
/// * `Ok(Config)` if the text contains at least one entry.
/// * `Err(TuringMachineError::ParseError)` if the text does not match the grammar.
/// * `Err(TuringMachineError::ValidationError)` if there is no alphabet entry.
pub fn parse_config(input: &str) -> Result<Config, TuringMachineError> {
    let root = ConfigParser::parse(Rule::config, input)
        .map_err(|e| TuringMachineError::ParseError(e.into()))?
        .next()
        .ok_or_else(missing_alphabet)?;

    let mut entries = root
        .into_inner()
        .filter(|p| p.as_rule() == Rule::entry)
        .map(parse_entry);

    let alphabet = entries
        .next()
        .ok_or_else(missing_alphabet)?
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    Ok(Config {
        alphabet,
        inputs: entries.map(str::to_string).collect(),
    })
}

/// Extracts the trimmed text of an entry.
fn parse_entry<'i>(pair: Pair<'i, Rule>) -> &'i str {
    pair.as_str().trim()
}

fn missing_alphabet() -> TuringMachineError {
    TuringMachineError::ValidationError("Missing alphabet line".to_string())
}
