//! This module defines the `TuringMachine` struct, which simulates a single-tape deterministic
//! Turing Machine. It owns the tape, the head, the current state and the run status, and
//! executes the transition table of an immutable `Description`.

use tracing::{debug, info, warn};

use crate::observer::{StepEvent, StepObserver, TracingObserver};
use crate::tape::Tape;
use crate::types::{Description, Halt, Status, Step, TuringMachineError, MAX_EXECUTION_STEPS};

/// Represents a single-tape Turing Machine.
///
/// One instance can run any number of inputs one after another. Every `run` starts from a
/// freshly reset configuration, so nothing leaks from one input to the next.
#[derive(Debug, Clone)]
pub struct TuringMachine {
    description: Description,
    tape: Tape,
    state: String,
    status: Status,
    step_count: usize,
    step_limit: usize,
}

impl TuringMachine {
    /// Creates an idle `TuringMachine` for the given `Description`.
    pub fn new(description: Description) -> Self {
        Self {
            tape: Tape::new(description.blank()),
            state: description.start_state().to_string(),
            status: Status::Idle,
            step_count: 0,
            step_limit: MAX_EXECUTION_STEPS,
            description,
        }
    }

    /// Overrides the step ceiling (defaults to `MAX_EXECUTION_STEPS`).
    pub fn with_step_limit(mut self, step_limit: usize) -> Self {
        self.step_limit = step_limit;
        self
    }

    /// Checks that every symbol of `input` belongs to the tape alphabet and is not the
    /// blank symbol.
    ///
    /// # Returns
    ///
    /// * `Ok(())` if the input may be placed on the tape.
    /// * `Err(TuringMachineError::InvalidSymbol)` with the first offending symbol.
    pub fn validate(&self, input: &str) -> Result<(), TuringMachineError> {
        let blank = self.description.blank();

        match input
            .chars()
            .find(|&c| !self.description.is_tape_symbol(c) || c == blank)
        {
            Some(symbol) => Err(TuringMachineError::InvalidSymbol(symbol)),
            None => Ok(()),
        }
    }

    /// Places `input` on the tape starting at position 0, moves the head to 0, enters the
    /// start state and marks the machine as running.
    pub fn initialize(&mut self, input: &str) {
        self.tape.load(input);
        self.state = self.description.start_state().to_string();
        self.status = Status::Running;
        self.step_count = 0;

        debug!(input, state = %self.state, "tape initialized");
    }

    /// Returns the machine to the idle configuration: start state, empty tape, head at 0,
    /// no steps taken.
    pub fn reset(&mut self) {
        self.tape.clear();
        self.state = self.description.start_state().to_string();
        self.status = Status::Idle;
        self.step_count = 0;
    }

    /// Executes a single transition, reporting it to the `tracing` observer.
    pub fn step(&mut self) -> Step {
        self.step_with(&mut TracingObserver)
    }

    /// Executes a single transition and reports it to `observer`.
    ///
    /// A missing transition moves the machine into its reject state. Entering the accept
    /// or reject state stops the machine. Calling this on a machine that is not running
    /// changes nothing: a halted machine repeats its halt, an idle one reports a rejection.
    ///
    /// # Returns
    ///
    /// * `Step::Continue` if the machine is still running after the step.
    /// * `Step::Halt(_)` if the machine has stopped.
    pub fn step_with<O>(&mut self, observer: &mut O) -> Step
    where
        O: StepObserver + ?Sized,
    {
        match &self.status {
            Status::Running => {}
            Status::Halted(halt) => return Step::Halt(halt.clone()),
            Status::Idle => return Step::Halt(Halt::Reject),
        }

        let read = self.tape.read();
        let Some(transition) = self.description.transition(&self.state, read).cloned() else {
            warn!(state = %self.state, symbol = %read, "no transition defined");
            let error = TuringMachineError::UndefinedTransition(self.state.clone(), read);
            self.state = self.description.reject_state().to_string();
            return self.halt(Halt::Err(error));
        };

        self.tape.write(transition.write);
        self.tape.shift(transition.direction);
        let state_before = std::mem::replace(&mut self.state, transition.next_state);
        self.step_count += 1;

        observer.on_step(&StepEvent {
            step: self.step_count,
            state_before,
            read,
            state_after: self.state.clone(),
            write: transition.write,
            direction: transition.direction,
        });

        if self.state == self.description.accept_state() {
            self.halt(Halt::Accept)
        } else if self.state == self.description.reject_state() {
            self.halt(Halt::Reject)
        } else {
            Step::Continue
        }
    }

    /// Validates and runs `input` to completion.
    ///
    /// # Returns
    ///
    /// `true` if the machine halted in its accept state.
    pub fn run(&mut self, input: &str) -> bool {
        self.execute(input).is_accept()
    }

    /// Like `run`, but returns the detailed reason the machine stopped.
    pub fn execute(&mut self, input: &str) -> Halt {
        self.execute_with(input, &mut TracingObserver)
    }

    /// Validates and runs `input` to completion, reporting every step to `observer`.
    ///
    /// Invalid input is rejected before the tape is touched. A run still going after
    /// `step_limit` steps is stopped and rejected with `StepLimitExceeded`.
    pub fn execute_with<O>(&mut self, input: &str, observer: &mut O) -> Halt
    where
        O: StepObserver + ?Sized,
    {
        if let Err(error) = self.validate(input) {
            warn!(input, %error, "input rejected");
            self.state = self.description.reject_state().to_string();
            self.step_count = 0;
            self.status = Status::Halted(Halt::Err(error.clone()));
            return Halt::Err(error);
        }

        self.reset();
        self.initialize(input);

        loop {
            if self.step_count >= self.step_limit {
                warn!(limit = self.step_limit, state = %self.state, "step limit reached");
                self.state = self.description.reject_state().to_string();
                let error = TuringMachineError::StepLimitExceeded(self.step_limit);
                self.halt(Halt::Err(error.clone()));
                return Halt::Err(error);
            }

            if let Step::Halt(halt) = self.step_with(observer) {
                return halt;
            }
        }
    }

    fn halt(&mut self, halt: Halt) -> Step {
        info!(
            state = %self.state,
            steps = self.step_count,
            outcome = %halt,
            "machine halted"
        );
        self.status = Status::Halted(halt.clone());
        Step::Halt(halt)
    }

    /// Returns the current state of the Turing Machine.
    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == Status::Running
    }

    /// Returns the reason for the last halt, if the machine has halted.
    pub fn halt_reason(&self) -> Option<&Halt> {
        match &self.status {
            Status::Halted(halt) => Some(halt),
            _ => None,
        }
    }

    /// Returns the number of steps executed in the current run.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    pub fn step_limit(&self) -> usize {
        self.step_limit
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    pub fn description(&self) -> &Description {
        &self.description
    }
}
