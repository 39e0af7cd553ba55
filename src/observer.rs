//! Per-step observation of a running machine.
//!
//! An observer is notified once for every executed transition. It only receives shared
//! references, so tracing or recording a run can never change its outcome.

use crate::types::Direction;

/// One executed transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepEvent {
    /// 1-based index of the step within the run.
    pub step: usize,
    pub state_before: String,
    pub read: char,
    pub state_after: String,
    pub write: char,
    pub direction: Direction,
}

/// Receives a notification for every executed step.
pub trait StepObserver {
    fn on_step(&mut self, event: &StepEvent);
}

impl<F> StepObserver for F
where
    F: FnMut(&StepEvent),
{
    fn on_step(&mut self, event: &StepEvent) {
        self(event)
    }
}

/// Emits each step as a `tracing` debug event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl StepObserver for TracingObserver {
    fn on_step(&mut self, event: &StepEvent) {
        tracing::debug!(
            step = event.step,
            state = %event.state_before,
            read = %event.read,
            next_state = %event.state_after,
            write = %event.write,
            direction = %event.direction,
            "step"
        );
    }
}

/// Collects every step event in order.
#[derive(Debug, Default, Clone)]
pub struct Recorder {
    events: Vec<StepEvent>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[StepEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<StepEvent> {
        self.events
    }
}

impl StepObserver for Recorder {
    fn on_step(&mut self, event: &StepEvent) {
        self.events.push(event.clone());
    }
}
