//! Workflow Machine - the deterministic state machine behind the wizard
//!
//! This module is pure logic with no I/O:
//! - Steps are the states of the machine, a closed enumeration
//! - Events carry the UI's validity signal as a payload
//! - Guards are pure predicates over (context, event)
//! - Actions are the only code allowed to mutate the context
//! - Snapshots are the serializable (step, context) pair used for
//!   persistence and resumption

pub mod context;
pub mod event;
pub mod guard;
pub mod snapshot;
pub mod step;
pub mod transition;

mod engine;

pub use context::WorkflowContext;
pub use engine::{SendOutcome, WorkflowMachine};
pub use event::{EventKind, WorkflowEvent};
pub use guard::Guard;
pub use snapshot::WorkflowSnapshot;
pub use step::WorkflowStep;
pub use transition::{candidates, Action, Transition};
