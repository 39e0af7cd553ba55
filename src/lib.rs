//! This crate provides the core logic for a single-tape Turing Machine simulator.
//! It includes the execution engine with its sparse tape, a generator for machines that
//! increment a numeral in any positional alphabet, description analysis, and loading of
//! configuration sources.

pub mod analyzer;
pub mod generator;
pub mod loader;
pub mod machine;
pub mod observer;
pub mod parser;
pub mod presets;
pub mod tape;
pub mod types;

/// Re-exports the `Rule` enum from the parser module, used by the `pest` grammar.
pub use crate::parser::Rule;
/// Re-exports the `analyze` and `lint` functions and `AnalysisError` enum from the analyzer module.
pub use analyzer::{analyze, lint, AnalysisError};
/// Re-exports the machine generators.
pub use generator::{incrementer, incrementer_with_blank};
/// Re-exports the `ConfigLoader` struct from the loader module.
pub use loader::ConfigLoader;
/// Re-exports the `TuringMachine` struct from the machine module.
pub use machine::TuringMachine;
/// Re-exports the step observers.
pub use observer::{Recorder, StepEvent, StepObserver, TracingObserver};
/// Re-exports the `parse_config` function from the parser module.
pub use parser::parse_config;
/// Re-exports `PresetManager` and `PRESETS` from the presets module.
pub use presets::{PresetManager, PRESETS};
/// Re-exports the `Tape` struct from the tape module.
pub use tape::Tape;
/// Re-exports various types related to machine definition and execution from the types module.
pub use types::{
    Config, Description, DescriptionBuilder, Direction, Halt, Status, Step, Transition,
    TransitionRule, TuringMachineError, MAX_EXECUTION_STEPS,
};
