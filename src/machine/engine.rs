//! The workflow machine itself
//!
//! `WorkflowMachine` owns the current step and context and advances them
//! one event at a time. Each `send` is a synchronous, atomic step: guard
//! evaluation, state update, and action application happen to completion
//! with no interleaving. The machine performs no I/O; persistence of its
//! snapshots is the session controller's concern.

use crate::machine::context::WorkflowContext;
use crate::machine::event::{EventKind, WorkflowEvent};
use crate::machine::snapshot::WorkflowSnapshot;
use crate::machine::step::WorkflowStep;
use crate::machine::transition::{candidates, Transition};
use tracing::debug;

/// What happened when an event was sent into the machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// A transition fired and the machine moved to a new step
    Transitioned {
        /// Step before the event
        from: WorkflowStep,
        /// Step after the event
        to: WorkflowStep,
    },
    /// The event was consumed but the machine stayed in place
    /// (invalid submission or no guard passed)
    Held,
    /// The event kind has no transition from the current step; state and
    /// context are unchanged
    NotApplicable,
}

impl SendOutcome {
    /// Whether the event moved the machine to a different step
    pub fn advanced(&self) -> bool {
        matches!(self, SendOutcome::Transitioned { .. })
    }
}

/// Deterministic finite-state machine over the wizard steps
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowMachine {
    current: WorkflowStep,
    context: WorkflowContext,
}

impl WorkflowMachine {
    /// Create a machine at the initial step with a fresh context
    pub fn new() -> Self {
        Self {
            current: WorkflowStep::INITIAL,
            context: WorkflowContext::new(),
        }
    }

    /// Construct a machine whose step and context equal the snapshot
    /// verbatim, with no transition side effects
    pub fn restore(snapshot: WorkflowSnapshot) -> Self {
        Self {
            current: snapshot.step,
            context: snapshot.context,
        }
    }

    /// The active step
    pub fn current_step(&self) -> WorkflowStep {
        self.current
    }

    /// The completion flags
    pub fn context(&self) -> &WorkflowContext {
        &self.context
    }

    /// Capture the current (step, context) pair for persistence
    pub fn snapshot(&self) -> WorkflowSnapshot {
        WorkflowSnapshot {
            step: self.current,
            context: self.context,
        }
    }

    /// Whether at least one transition exists from the current step for
    /// the given event kind
    ///
    /// Pure query; never mutates. The UI calls this before rendering a
    /// navigation control so inapplicable actions are never offered.
    pub fn can_send(&self, kind: EventKind) -> bool {
        candidates(self.current).iter().any(|t| t.on == kind)
    }

    /// The step an event would move the machine to, without committing it
    ///
    /// Returns `None` when the event kind is not applicable in the current
    /// step. Used by the UI to preview the next step.
    pub fn peek(&self, event: &WorkflowEvent) -> Option<WorkflowStep> {
        self.select(event).map(|t| t.target)
    }

    /// Process one event to completion
    ///
    /// Candidates declared for the event's kind are evaluated in order;
    /// the first whose guard passes (or which has no guard) is taken, its
    /// action applied, and the machine moves to its target. An event kind
    /// with no candidates leaves step and context untouched.
    pub fn send(&mut self, event: &WorkflowEvent) -> SendOutcome {
        let Some(transition) = self.select(event) else {
            debug!(
                step = self.current.name(),
                event = %event.kind(),
                "event not acceptable in current step"
            );
            return SendOutcome::NotApplicable;
        };

        let from = self.current;
        if let Some(action) = transition.action {
            action.apply(&mut self.context);
        }
        self.current = transition.target;

        if from == self.current && transition.action.is_none() {
            debug!(step = from.name(), event = %event.kind(), "held on step");
            SendOutcome::Held
        } else {
            debug!(
                from = from.name(),
                to = self.current.name(),
                event = %event.kind(),
                "transition taken"
            );
            SendOutcome::Transitioned {
                from,
                to: self.current,
            }
        }
    }

    /// Pick the first declared candidate whose guard passes
    fn select(&self, event: &WorkflowEvent) -> Option<&'static Transition> {
        candidates(self.current)
            .iter()
            .filter(|t| t.on == event.kind())
            .find(|t| match t.guard {
                Some(guard) => guard.evaluate(&self.context, event),
                None => true,
            })
    }
}

impl Default for WorkflowMachine {
    fn default() -> Self {
        Self::new()
    }
}
